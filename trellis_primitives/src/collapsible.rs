// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapsible: a region whose content is shown or hidden by a trigger.
//!
//! Open state is either owned by the collapsible (`default_open`) or supplied by
//! the caller as a [`Derived`] together with an `on_open_change` callback. The
//! accordion uses the second form, with its selection as the source of truth.

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use trellis_event_state::handlers::EventHandlers;
use trellis_state::{Derived, GenerateId, IdRegistration, RegisterId, Signal, unique_id};

use crate::dataset::{DataFlags, DataSet};
use crate::interactions::{Callback, PressInteraction, PressOptions};
use crate::polymorphic::{Attributes, Element, ElementKind, ElementProps, Polymorphic};

/// Collapsible configuration.
#[derive(Clone, Default)]
pub struct CollapsibleOptions {
    /// Root id. Defaults to `collapsible-{unique id}`.
    pub id: Option<String>,
    /// Caller-owned open state. When set, `default_open` is ignored and toggling
    /// only reports through `on_open_change`.
    pub is_open: Option<Derived<bool>>,
    /// Initial open state when the collapsible owns it. Defaults to closed.
    pub default_open: bool,
    /// Disables the trigger. Defaults to false.
    pub is_disabled: Derived<bool>,
    /// Keep the content present while closed.
    pub force_mount: bool,
    /// Called with the requested open state.
    pub on_open_change: Option<Callback<bool>>,
    /// Root element override; defaults to `div`.
    pub as_: Option<ElementKind>,
}

impl fmt::Debug for CollapsibleOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollapsibleOptions")
            .field("id", &self.id)
            .field("controlled", &self.is_open.is_some())
            .field("default_open", &self.default_open)
            .field("force_mount", &self.force_mount)
            .field("as_", &self.as_)
            .finish_non_exhaustive()
    }
}

/// Collapsible root state.
///
/// Cloning yields another handle to the same collapsible.
#[derive(Clone)]
pub struct Collapsible {
    inner: Rc<CollapsibleInner>,
}

struct CollapsibleInner {
    id: String,
    generate_id: GenerateId,
    is_open: Derived<bool>,
    owned_open: Option<Signal<bool>>,
    is_disabled: Derived<bool>,
    force_mount: bool,
    content_id: Signal<Option<String>>,
    on_open_change: Option<Callback<bool>>,
    polymorphic: Polymorphic,
}

impl Collapsible {
    /// Create a collapsible.
    pub fn new(options: CollapsibleOptions) -> Self {
        let id = options
            .id
            .unwrap_or_else(|| format!("collapsible-{}", unique_id()));
        let (is_open, owned_open) = match options.is_open {
            Some(is_open) => (is_open, None),
            None => {
                let owned = Signal::new(options.default_open);
                (owned.read_only(), Some(owned))
            }
        };
        Self {
            inner: Rc::new(CollapsibleInner {
                generate_id: GenerateId::fixed(id.clone()),
                id,
                is_open,
                owned_open,
                is_disabled: options.is_disabled,
                force_mount: options.force_mount,
                content_id: Signal::new(None),
                on_open_change: options.on_open_change,
                polymorphic: Polymorphic::new(ElementKind::Div, options.as_),
            }),
        }
    }

    /// The root id.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// The id of `part`, scoped to the root id.
    pub fn generate_id(&self, part: &str) -> String {
        self.inner.generate_id.generate(part)
    }

    /// Whether the content is shown.
    pub fn is_open(&self) -> bool {
        self.inner.is_open.get()
    }

    /// The open state as a read-only accessor.
    pub fn open(&self) -> Derived<bool> {
        self.inner.is_open.clone()
    }

    /// Whether the trigger is disabled.
    pub fn is_disabled(&self) -> bool {
        self.inner.is_disabled.get()
    }

    /// The disabled state as a read-only accessor.
    pub fn disabled(&self) -> Derived<bool> {
        self.inner.is_disabled.clone()
    }

    /// Whether the content should be present: open, or force-mounted.
    pub fn is_content_present(&self) -> bool {
        self.inner.force_mount || self.is_open()
    }

    /// Request the open state `open`. Ignored while disabled.
    pub fn set_open(&self, open: bool) {
        if self.is_disabled() || self.is_open() == open {
            return;
        }
        tracing::debug!(id = %self.inner.id, open, "collapsible open change");
        if let Some(owned) = &self.inner.owned_open {
            owned.set(open);
        }
        if let Some(cb) = &self.inner.on_open_change {
            cb(open);
        }
    }

    /// Flip the open state.
    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    /// Publish the content part's id.
    pub fn register_content_id(&self, id: impl Into<String>) -> IdRegistration {
        RegisterId::new(self.inner.content_id.clone()).register(id)
    }

    /// The registered content id.
    pub fn content_id(&self) -> Option<String> {
        self.inner.content_id.get()
    }

    /// Dataset shared by every part: expanded, disabled.
    pub fn dataset(&self) -> Derived<DataSet> {
        let (open, disabled) = (self.open(), self.disabled());
        let deps = open
            .triggers()
            .iter()
            .chain(disabled.triggers())
            .cloned()
            .collect::<Vec<_>>();
        Derived::new(deps, move || {
            DataSet::new(DataFlags::empty())
                .with(DataFlags::EXPANDED, open.get())
                .with(DataFlags::DISABLED, disabled.get())
        })
    }

    /// Render the root element.
    pub fn render(&self, props: ElementProps) -> Element {
        let mut own = Attributes::new().with("id", self.inner.id.clone());
        own.apply_dataset(&self.dataset().get());
        self.inner
            .polymorphic
            .render(own, props, EventHandlers::new())
    }
}

impl fmt::Debug for Collapsible {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collapsible")
            .field("id", &self.inner.id)
            .field("is_open", &self.is_open())
            .field("is_disabled", &self.is_disabled())
            .finish_non_exhaustive()
    }
}

/// Trigger configuration.
#[derive(Clone, Debug, Default)]
pub struct CollapsibleTriggerOptions {
    /// Element id, if any.
    pub id: Option<String>,
    /// Element override; defaults to `button`.
    pub as_: Option<ElementKind>,
}

/// The button that toggles a [`Collapsible`].
#[derive(Clone, Debug)]
pub struct CollapsibleTrigger {
    collapsible: Collapsible,
    id: Option<String>,
    press: PressInteraction,
    polymorphic: Polymorphic,
}

impl CollapsibleTrigger {
    /// Create a trigger for `collapsible`.
    pub fn new(collapsible: &Collapsible, options: CollapsibleTriggerOptions) -> Self {
        let target = collapsible.clone();
        let polymorphic = Polymorphic::new(ElementKind::Button, options.as_);
        let press = PressInteraction::new(
            PressOptions {
                is_disabled: collapsible.disabled(),
                element: Some(polymorphic.kind().clone()),
                ..PressOptions::default()
            }
            .on_press(move |_| target.toggle()),
        );
        Self {
            collapsible: collapsible.clone(),
            id: options.id,
            press,
            polymorphic,
        }
    }

    /// The press hook driving the trigger.
    pub fn press(&self) -> &PressInteraction {
        &self.press
    }

    /// The trigger's own attributes, without the caller's.
    pub fn attributes(&self) -> Attributes {
        let collapsible = &self.collapsible;
        let open = collapsible.is_open();
        let disabled = collapsible.is_disabled();
        let mut attrs = Attributes::new();
        attrs.set_opt("id", self.id.clone());
        if *self.polymorphic.kind() == ElementKind::Button {
            attrs.set("type", "button");
            attrs.set_flag("disabled", disabled);
        } else if disabled {
            attrs.set("aria-disabled", "true");
        }
        attrs.set("aria-expanded", if open { "true" } else { "false" });
        attrs.set_opt("aria-controls", collapsible.content_id().filter(|_| open));
        attrs.apply_dataset(&collapsible.dataset().get());
        attrs
    }

    /// Render with the caller's `props` and any extra internal handlers, which run
    /// after the press handlers.
    pub fn render_with(&self, props: ElementProps, extra: EventHandlers) -> Element {
        let internal = EventHandlers::compose(self.press.handlers(), extra);
        self.polymorphic.render(self.attributes(), props, internal)
    }

    /// Render the trigger.
    pub fn render(&self, props: ElementProps) -> Element {
        self.render_with(props, EventHandlers::new())
    }
}

/// Content configuration.
#[derive(Clone, Debug, Default)]
pub struct CollapsibleContentOptions {
    /// Element id. Defaults to the collapsible's `content` id.
    pub id: Option<String>,
    /// Element override; defaults to `div`.
    pub as_: Option<ElementKind>,
}

/// The region a [`Collapsible`] shows and hides.
#[derive(Debug)]
pub struct CollapsibleContent {
    collapsible: Collapsible,
    registration: IdRegistration,
    polymorphic: Polymorphic,
}

impl CollapsibleContent {
    /// Create the content part and publish its id.
    pub fn new(collapsible: &Collapsible, options: CollapsibleContentOptions) -> Self {
        let id = options
            .id
            .unwrap_or_else(|| collapsible.generate_id("content"));
        Self {
            registration: collapsible.register_content_id(id),
            collapsible: collapsible.clone(),
            polymorphic: Polymorphic::new(ElementKind::Div, options.as_),
        }
    }

    /// The content id.
    pub fn id(&self) -> &str {
        self.registration.id()
    }

    /// Render the content, or `None` while it is not present.
    pub fn render(&self, props: ElementProps) -> Option<Element> {
        if !self.collapsible.is_content_present() {
            return None;
        }
        let mut own = Attributes::new().with("id", self.id());
        own.apply_dataset(&self.collapsible.dataset().get());
        Some(self.polymorphic.render(own, props, EventHandlers::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use trellis_event_state::event::{DomEvent, MouseEvent};

    #[test]
    fn uncontrolled_trigger_toggles() {
        let collapsible = Collapsible::new(CollapsibleOptions::default());
        let trigger = CollapsibleTrigger::new(&collapsible, CollapsibleTriggerOptions::default());
        let content = CollapsibleContent::new(&collapsible, CollapsibleContentOptions::default());
        assert!(content.render(ElementProps::new()).is_none());

        let mut element = trigger.render(ElementProps::new());
        assert_eq!(element.attr("id"), Some(trigger.id()));
        assert_eq!(element.attr("aria-expanded"), Some("false"));
        assert_eq!(element.attr("aria-controls"), None);
        element.dispatch(&mut DomEvent::Click(MouseEvent::virtual_click()));

        assert!(collapsible.is_open());
        let element = trigger.render(ElementProps::new());
        assert_eq!(element.attr("aria-expanded"), Some("true"));
        assert_eq!(element.attr("aria-controls"), Some(content.id()));
        assert_eq!(element.attr("data-expanded"), Some(""));
        assert!(content.render(ElementProps::new()).is_some());
    }

    #[test]
    fn controlled_open_reports_requests() {
        let requested = Rc::new(core::cell::Cell::new(None::<bool>));
        let open = Signal::new(false);
        let collapsible = Collapsible::new(CollapsibleOptions {
            is_open: Some(open.read_only()),
            on_open_change: Some({
                let requested = requested.clone();
                Rc::new(move |value: bool| requested.set(Some(value)))
            }),
            ..CollapsibleOptions::default()
        });

        collapsible.toggle();
        assert_eq!(requested.get(), Some(true));
        // The caller owns the state and has not applied the request.
        assert!(!collapsible.is_open());
        open.set(true);
        assert!(collapsible.is_open());
    }

    #[test]
    fn disabled_trigger_does_nothing() {
        let collapsible = Collapsible::new(CollapsibleOptions {
            is_disabled: Derived::constant(true),
            ..CollapsibleOptions::default()
        });
        let trigger = CollapsibleTrigger::new(&collapsible, CollapsibleTriggerOptions::default());
        let mut element = trigger.render(ElementProps::new());
        assert_eq!(element.attr("disabled"), Some(""));
        assert_eq!(element.attr("data-disabled"), Some(""));

        let mut click = DomEvent::Click(MouseEvent::virtual_click());
        element.dispatch(&mut click);
        assert!(click.is_default_prevented());
        assert!(!collapsible.is_open());
    }

    #[test]
    fn force_mount_keeps_content_present() {
        let collapsible = Collapsible::new(CollapsibleOptions {
            id: Some("faq".to_string()),
            force_mount: true,
            as_: Some(ElementKind::Span),
            ..CollapsibleOptions::default()
        });
        let content = CollapsibleContent::new(&collapsible, CollapsibleContentOptions::default());
        let element = content.render(ElementProps::new()).expect("force-mounted");
        assert_eq!(element.attr("id"), Some("faq-content"));
        assert_eq!(element.attr("data-expanded"), None);

        let root = collapsible.render(ElementProps::new());
        assert_eq!(root.kind, ElementKind::Span);
    }
}
