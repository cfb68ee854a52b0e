// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use trellis_event_state::event::{Event, FocusEvent, KeyboardEvent};
use trellis_event_state::handlers::EventHandlers;
use trellis_state::IdRegistration;

use super::AccordionItemContext;
use crate::collapsible::{
    CollapsibleContent, CollapsibleContentOptions, CollapsibleTrigger, CollapsibleTriggerOptions,
};
use crate::interactions::FocusInteraction;
use crate::polymorphic::{Attributes, Element, ElementKind, ElementProps, Polymorphic};

/// Header configuration.
#[derive(Clone, Debug, Default)]
pub struct AccordionHeaderOptions {
    /// Element override; defaults to `h3`.
    pub as_: Option<ElementKind>,
}

/// The heading wrapping an item's trigger.
#[derive(Clone, Debug)]
pub struct AccordionHeader {
    item: AccordionItemContext,
    polymorphic: Polymorphic,
}

impl AccordionHeader {
    /// Create the header of `item`.
    pub fn new(item: &AccordionItemContext, options: AccordionHeaderOptions) -> Self {
        Self {
            item: item.clone(),
            polymorphic: Polymorphic::new(ElementKind::H3, options.as_),
        }
    }

    /// Render the header.
    pub fn render(&self, props: ElementProps) -> Element {
        let mut own = Attributes::new();
        own.apply_dataset(&self.item.dataset().get());
        self.polymorphic.render(own, props, EventHandlers::new())
    }
}

/// Trigger configuration.
#[derive(Clone, Debug, Default)]
pub struct AccordionTriggerOptions {
    /// Element id. Defaults to the item's `trigger` id.
    pub id: Option<String>,
    /// Element override; defaults to `button`.
    pub as_: Option<ElementKind>,
}

/// The button that expands and collapses an item.
///
/// Pressing it toggles the item. ArrowDown/ArrowUp/Home/End move focus between the
/// enabled triggers of the accordion; the new target is published through
/// [`Accordion::focused_value`](super::Accordion::focused_value).
#[derive(Debug)]
pub struct AccordionTrigger {
    item: AccordionItemContext,
    trigger: CollapsibleTrigger,
    focus: FocusInteraction,
    registration: IdRegistration,
}

impl AccordionTrigger {
    /// Create the trigger of `item` and publish its id.
    pub fn new(item: &AccordionItemContext, options: AccordionTriggerOptions) -> Self {
        let id = options.id.unwrap_or_else(|| item.generate_id("trigger"));
        let trigger = CollapsibleTrigger::new(
            item.collapsible(),
            CollapsibleTriggerOptions {
                id: Some(id.clone()),
                as_: options.as_,
            },
        );
        Self {
            item: item.clone(),
            trigger,
            focus: FocusInteraction::new(),
            registration: item.register_trigger_id(id),
        }
    }

    /// The trigger id.
    pub fn id(&self) -> &str {
        self.registration.id()
    }

    /// Focus state of the trigger.
    pub fn focus(&self) -> &FocusInteraction {
        &self.focus
    }

    /// Render the trigger.
    pub fn render(&self, props: ElementProps) -> Element {
        let track_focus = {
            let item = self.item.clone();
            EventHandlers::new().on_focus(move |_: &mut FocusEvent| {
                item.accordion()
                    .set_focused_value(Some(String::from(item.value())));
            })
        };
        let navigate = {
            let item = self.item.clone();
            EventHandlers::new().on_key_down(move |e: &mut KeyboardEvent| {
                if item.accordion().navigate(item.value(), e.key).is_some() {
                    e.prevent_default();
                }
            })
        };
        let extra = EventHandlers::compose(
            self.focus.handlers(),
            EventHandlers::compose(track_focus, navigate),
        );
        self.trigger.render_with(props, extra)
    }
}

/// Content configuration.
#[derive(Clone, Debug, Default)]
pub struct AccordionContentOptions {
    /// Element id. Defaults to the item's `content` id.
    pub id: Option<String>,
    /// Element override; defaults to `div`.
    pub as_: Option<ElementKind>,
}

/// The region an item shows while expanded.
#[derive(Debug)]
pub struct AccordionContent {
    item: AccordionItemContext,
    content: CollapsibleContent,
}

impl AccordionContent {
    /// Create the content of `item` and publish its id.
    pub fn new(item: &AccordionItemContext, options: AccordionContentOptions) -> Self {
        let content = CollapsibleContent::new(
            item.collapsible(),
            CollapsibleContentOptions {
                id: Some(options.id.unwrap_or_else(|| item.generate_id("content"))),
                as_: options.as_,
            },
        );
        Self {
            item: item.clone(),
            content,
        }
    }

    /// The content id.
    pub fn id(&self) -> &str {
        self.content.id()
    }

    /// Render the content, or `None` while collapsed and not force-mounted.
    pub fn render(&self, props: ElementProps) -> Option<Element> {
        let mut attributes = Attributes::new().with("role", "region");
        attributes.set_opt("aria-labelledby", self.item.trigger_id());
        attributes.merge(props.attributes);
        self.content.render(ElementProps {
            attributes,
            handlers: props.handlers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accordion::{Accordion, AccordionItem, AccordionItemOptions, AccordionOptions};
    use alloc::string::ToString;
    use trellis_event_state::event::{DomEvent, FocusModality, Key, MouseEvent};

    fn setup() -> (Accordion, AccordionItem, AccordionItem) {
        let accordion = Accordion::new(AccordionOptions {
            is_collapsible: true,
            ..AccordionOptions::default()
        });
        let make = |value: &str| {
            AccordionItem::new(
                &accordion,
                AccordionItemOptions {
                    value: value.to_string(),
                    ..AccordionItemOptions::default()
                },
            )
            .unwrap()
        };
        let (a, b) = (make("a"), make("b"));
        (accordion, a, b)
    }

    #[test]
    fn trigger_press_toggles_and_links_content() {
        let (accordion, a, _b) = setup();
        let trigger = AccordionTrigger::new(a.context(), AccordionTriggerOptions::default());
        let content = AccordionContent::new(a.context(), AccordionContentOptions::default());

        let mut button = trigger.render(ElementProps::new());
        assert_eq!(button.kind, ElementKind::Button);
        assert_eq!(button.attr("aria-expanded"), Some("false"));

        button.dispatch(&mut DomEvent::Click(MouseEvent::virtual_click()));
        assert!(accordion.is_expanded("a"));

        let button = trigger.render(ElementProps::new());
        assert_eq!(button.attr("aria-expanded"), Some("true"));
        assert_eq!(button.attr("aria-controls"), Some(content.id()));

        let region = content.render(ElementProps::new()).expect("expanded");
        assert_eq!(region.attr("role"), Some("region"));
        assert_eq!(region.attr("aria-labelledby"), Some(trigger.id()));
        assert_eq!(region.attr("id"), Some(a.context().generate_id("content").as_str()));

        // Collapsible accordion: a second press closes it again.
        let mut button = trigger.render(ElementProps::new());
        button.dispatch(&mut DomEvent::Click(MouseEvent::virtual_click()));
        assert!(content.render(ElementProps::new()).is_none());
    }

    #[test]
    fn content_omits_labelledby_without_trigger() {
        let (accordion, a, _b) = setup();
        accordion.toggle("a");
        let content = AccordionContent::new(a.context(), AccordionContentOptions::default());
        let region = content.render(ElementProps::new()).expect("expanded");
        assert_eq!(region.attr("aria-labelledby"), None);

        let trigger = AccordionTrigger::new(a.context(), AccordionTriggerOptions::default());
        let region = content.render(ElementProps::new()).expect("expanded");
        assert_eq!(region.attr("aria-labelledby"), Some(trigger.id()));
        drop(trigger);
        assert_eq!(a.context().trigger_id(), None);
    }

    #[test]
    fn trigger_keys_move_focus() {
        let (accordion, a, _b) = setup();
        let trigger = AccordionTrigger::new(a.context(), AccordionTriggerOptions::default());
        let mut button = trigger.render(ElementProps::new());

        button.dispatch(&mut DomEvent::Focus(FocusEvent::new(FocusModality::Keyboard)));
        assert_eq!(accordion.focused_value().as_deref(), Some("a"));
        assert!(trigger.focus().is_focus_visible());

        let mut down = DomEvent::KeyDown(KeyboardEvent::new(Key::ArrowDown));
        button.dispatch(&mut down);
        assert!(down.is_default_prevented());
        assert_eq!(accordion.focused_value().as_deref(), Some("b"));

        // Enter presses rather than navigates.
        let mut enter = DomEvent::KeyDown(KeyboardEvent::new(Key::Enter));
        button.dispatch(&mut enter);
        assert!(!enter.is_default_prevented());
    }

    #[test]
    fn header_defaults_to_h3() {
        let (_accordion, a, _b) = setup();
        let header = AccordionHeader::new(a.context(), AccordionHeaderOptions::default());
        let element = header.render(ElementProps::new().attr("class", "title"));
        assert_eq!(element.kind, ElementKind::H3);
        assert_eq!(element.attr("class"), Some("title"));
        assert_eq!(element.attr("data-expanded"), None);
    }
}
