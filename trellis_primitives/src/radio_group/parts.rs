// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::{String, ToString};

use trellis_event_state::event::{ChangeEvent, Event, KeyboardEvent};
use trellis_event_state::handlers::EventHandlers;

use super::RadioGroupItemContext;
use crate::polymorphic::{Attributes, Element, ElementKind, ElementProps, Polymorphic};

/// Configuration shared by the input and control parts.
#[derive(Clone, Debug, Default)]
pub struct RadioGroupPartOptions {
    /// Element id. Defaults to the item's part id (`input`, `control`).
    pub id: Option<String>,
    /// Element override.
    pub as_: Option<ElementKind>,
}

/// The native radio input of an item, visually hidden by the host.
///
/// It carries the form semantics (`name`, `value`, `checked`) and keyboard focus.
#[derive(Debug)]
pub struct RadioGroupItemInput {
    item: RadioGroupItemContext,
    id: String,
    polymorphic: Polymorphic,
}

impl RadioGroupItemInput {
    /// Create the input of `item`.
    pub fn new(item: &RadioGroupItemContext, options: RadioGroupPartOptions) -> Self {
        Self {
            id: options.id.unwrap_or_else(|| item.generate_id("input")),
            item: item.clone(),
            polymorphic: Polymorphic::new(ElementKind::Input, options.as_),
        }
    }

    /// The input id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Render the input.
    pub fn render(&self, props: ElementProps) -> Element {
        let item = &self.item;
        let group = item.group();
        let control = group.form_control();

        let mut own = Attributes::new()
            .with("id", self.id.clone())
            .with("type", "radio")
            .with("name", group.name().to_string())
            .with("value", item.value().to_string());
        own.set_flag("checked", item.is_selected());
        own.set_flag("disabled", item.is_disabled());
        own.set_flag("required", control.is_required());
        own.set_flag("readonly", control.is_read_only());
        own.set_opt("aria-describedby", control.aria_described_by());
        own.apply_dataset(&item.dataset());

        let select = {
            let item = item.clone();
            EventHandlers::new().on_change(move |e: &mut ChangeEvent| {
                if !e.checked {
                    return;
                }
                if let Err(err) = item.group().set_selected_value(item.value()) {
                    tracing::warn!(%err, "radio input change ignored");
                }
            })
        };
        let arrows = {
            let item = item.clone();
            EventHandlers::new().on_key_down(move |e: &mut KeyboardEvent| {
                if let Some(target) = item.group().select_adjacent(item.value(), e.key) {
                    tracing::debug!(from = item.value(), to = %target, "radio arrow selection");
                    e.prevent_default();
                }
            })
        };
        let internal = EventHandlers::compose(
            item.focus().handlers(),
            EventHandlers::compose(select, arrows),
        );
        self.polymorphic.render(own, props, internal)
    }
}

/// The visual radio circle of an item.
#[derive(Debug)]
pub struct RadioGroupItemControl {
    item: RadioGroupItemContext,
    id: String,
    polymorphic: Polymorphic,
}

impl RadioGroupItemControl {
    /// Create the control of `item`.
    pub fn new(item: &RadioGroupItemContext, options: RadioGroupPartOptions) -> Self {
        Self {
            id: options.id.unwrap_or_else(|| item.generate_id("control")),
            item: item.clone(),
            polymorphic: Polymorphic::new(ElementKind::Div, options.as_),
        }
    }

    /// Render the control.
    pub fn render(&self, props: ElementProps) -> Element {
        let mut own = Attributes::new().with("id", self.id.clone());
        own.apply_dataset(&self.item.dataset());
        self.polymorphic.render(own, props, EventHandlers::new())
    }
}

/// Indicator configuration.
#[derive(Clone, Debug, Default)]
pub struct RadioGroupItemIndicatorOptions {
    /// Element id. Defaults to the item's `indicator` id.
    pub id: Option<String>,
    /// Keep the indicator present while unchecked.
    pub force_mount: bool,
    /// Element override; defaults to `div`.
    pub as_: Option<ElementKind>,
}

/// The dot shown inside the control while the item is checked.
#[derive(Debug)]
pub struct RadioGroupItemIndicator {
    item: RadioGroupItemContext,
    id: String,
    force_mount: bool,
    polymorphic: Polymorphic,
}

impl RadioGroupItemIndicator {
    /// Create the indicator of `item`.
    pub fn new(item: &RadioGroupItemContext, options: RadioGroupItemIndicatorOptions) -> Self {
        Self {
            id: options.id.unwrap_or_else(|| item.generate_id("indicator")),
            item: item.clone(),
            force_mount: options.force_mount,
            polymorphic: Polymorphic::new(ElementKind::Div, options.as_),
        }
    }

    /// Whether the indicator is present.
    pub fn is_present(&self) -> bool {
        self.force_mount || self.item.is_selected()
    }

    /// Render the indicator, or `None` while absent.
    pub fn render(&self, props: ElementProps) -> Option<Element> {
        if !self.is_present() {
            return None;
        }
        let mut own = Attributes::new().with("id", self.id.clone());
        own.apply_dataset(&self.item.dataset());
        Some(self.polymorphic.render(own, props, EventHandlers::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::radio_group::{RadioGroup, RadioGroupItem, RadioGroupItemOptions, RadioGroupOptions};
    use alloc::vec::Vec;
    use trellis_event_state::event::{DomEvent, FocusEvent, FocusModality, Key};

    fn setup(options: RadioGroupOptions) -> (RadioGroup, Vec<RadioGroupItem>) {
        let group = RadioGroup::new(options);
        let items = ["a", "b", "c"]
            .into_iter()
            .map(|value| {
                RadioGroupItem::new(
                    &group,
                    RadioGroupItemOptions {
                        value: value.to_string(),
                        ..RadioGroupItemOptions::default()
                    },
                )
                .unwrap()
            })
            .collect();
        (group, items)
    }

    #[test]
    fn input_carries_form_semantics() {
        let (group, items) = setup(RadioGroupOptions {
            name: Some("plan".to_string()),
            is_required: true,
            default_value: Some("b".to_string()),
            ..RadioGroupOptions::default()
        });
        let b = RadioGroupItemInput::new(items[1].context(), RadioGroupPartOptions::default());
        let el = b.render(ElementProps::new());
        assert_eq!(el.kind, ElementKind::Input);
        assert_eq!(el.attr("type"), Some("radio"));
        assert_eq!(el.attr("name"), Some("plan"));
        assert_eq!(el.attr("value"), Some("b"));
        assert_eq!(el.attr("checked"), Some(""));
        assert_eq!(el.attr("required"), Some(""));
        assert_eq!(el.attr("disabled"), None);
        assert_eq!(el.attr("id"), Some(items[1].context().generate_id("input").as_str()));

        group.form_control().set_disabled(true);
        let el = b.render(ElementProps::new());
        assert_eq!(el.attr("disabled"), Some(""));
        assert_eq!(el.attr("data-disabled"), Some(""));
    }

    #[test]
    fn change_event_selects() {
        let (group, items) = setup(RadioGroupOptions::default());
        let c = RadioGroupItemInput::new(items[2].context(), RadioGroupPartOptions::default());
        let mut el = c.render(ElementProps::new());
        el.dispatch(&mut DomEvent::Change(ChangeEvent::new(false)));
        assert_eq!(group.selected_value(), None);
        el.dispatch(&mut DomEvent::Change(ChangeEvent::new(true)));
        assert_eq!(group.selected_value().as_deref(), Some("c"));
    }

    #[test]
    fn read_only_group_ignores_change() {
        let (group, items) = setup(RadioGroupOptions {
            is_read_only: true,
            ..RadioGroupOptions::default()
        });
        let a = RadioGroupItemInput::new(items[0].context(), RadioGroupPartOptions::default());
        let mut el = a.render(ElementProps::new());
        assert_eq!(el.attr("readonly"), Some(""));
        el.dispatch(&mut DomEvent::Change(ChangeEvent::new(true)));
        assert_eq!(group.selected_value(), None);
    }

    #[test]
    fn arrows_select_and_focus_tracks_visibility() {
        let (group, items) = setup(RadioGroupOptions::default());
        let a = RadioGroupItemInput::new(items[0].context(), RadioGroupPartOptions::default());
        let mut el = a.render(ElementProps::new());

        el.dispatch(&mut DomEvent::Focus(FocusEvent::new(FocusModality::Keyboard)));
        assert!(items[0].context().is_focus_visible());
        assert_eq!(items[0].context().dataset().get("data-focus-visible"), Some(""));

        let mut right = DomEvent::KeyDown(KeyboardEvent::new(Key::ArrowRight));
        el.dispatch(&mut right);
        assert!(right.is_default_prevented());
        assert_eq!(group.selected_value().as_deref(), Some("b"));

        let mut home = DomEvent::KeyDown(KeyboardEvent::new(Key::Home));
        el.dispatch(&mut home);
        assert!(!home.is_default_prevented());
        assert_eq!(group.selected_value().as_deref(), Some("b"));
    }

    #[test]
    fn caller_change_handler_runs_first() {
        let (group, items) = setup(RadioGroupOptions::default());
        let a = RadioGroupItemInput::new(items[0].context(), RadioGroupPartOptions::default());
        let seen = alloc::rc::Rc::new(core::cell::Cell::new(None));
        let props = ElementProps::new().handlers(EventHandlers::new().on_change({
            let (group, seen) = (group.clone(), seen.clone());
            move |_: &mut ChangeEvent| seen.set(Some(group.selected_value()))
        }));
        let mut el = a.render(props);
        el.dispatch(&mut DomEvent::Change(ChangeEvent::new(true)));
        assert_eq!(seen.take(), Some(None));
        assert_eq!(group.selected_value().as_deref(), Some("a"));
    }

    #[test]
    fn indicator_presence() {
        let (group, items) = setup(RadioGroupOptions::default());
        let indicator = RadioGroupItemIndicator::new(
            items[0].context(),
            RadioGroupItemIndicatorOptions::default(),
        );
        let forced = RadioGroupItemIndicator::new(
            items[1].context(),
            RadioGroupItemIndicatorOptions {
                force_mount: true,
                ..RadioGroupItemIndicatorOptions::default()
            },
        );
        assert!(indicator.render(ElementProps::new()).is_none());
        let el = forced.render(ElementProps::new()).expect("force mounted");
        assert_eq!(el.attr("data-checked"), None);

        group.set_value(Some("a"));
        let el = indicator.render(ElementProps::new()).expect("checked");
        assert_eq!(el.attr("data-checked"), Some(""));
    }

    #[test]
    fn control_mirrors_item_data() {
        let (group, items) = setup(RadioGroupOptions::default());
        let control = RadioGroupItemControl::new(items[2].context(), RadioGroupPartOptions::default());
        group.set_value(Some("c"));
        let el = control.render(ElementProps::new().attr("class", "circle"));
        assert_eq!(el.kind, ElementKind::Div);
        assert_eq!(el.attr("class"), Some("circle"));
        assert_eq!(el.attr("data-checked"), Some(""));
    }
}
