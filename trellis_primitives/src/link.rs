// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Link: an accessible anchor that can also be rendered as another element.
//!
//! ```
//! use trellis_event_state::event::{DomEvent, MouseEvent};
//! use trellis_primitives::link::{Link, LinkOptions};
//! use trellis_primitives::polymorphic::ElementProps;
//!
//! let link = Link::new(LinkOptions {
//!     href: Some("/docs".into()),
//!     is_disabled: true,
//!     ..Default::default()
//! });
//! let mut a = link.render(ElementProps::new());
//! assert_eq!(a.attr("aria-disabled"), Some("true"));
//!
//! // A disabled link does not navigate.
//! let mut click = DomEvent::Click(MouseEvent::new(Default::default()));
//! a.dispatch(&mut click);
//! assert!(click.is_default_prevented());
//! ```

use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;
use trellis_event_state::handlers::EventHandlers;
use trellis_event_state::press::PressModality;
use trellis_state::{Derived, Signal, Trigger};

use crate::dataset::{DataFlags, DataSet};
use crate::interactions::{
    Callback, FocusInteraction, HoverInteraction, HoverOptions, PressInteraction, PressOptions,
};
use crate::polymorphic::{Attributes, Element, ElementKind, ElementProps, Polymorphic};

/// Link configuration.
#[derive(Clone, Default)]
pub struct LinkOptions {
    /// Navigation target.
    pub href: Option<String>,
    /// Disable the link: it stays focusable by assistive technology but does not
    /// activate.
    pub is_disabled: bool,
    /// Element override; defaults to `a`.
    pub as_: Option<ElementKind>,
    /// Called when the link is activated.
    pub on_press: Option<Callback<PressModality>>,
}

impl fmt::Debug for LinkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkOptions")
            .field("href", &self.href)
            .field("is_disabled", &self.is_disabled)
            .field("as_", &self.as_)
            .finish_non_exhaustive()
    }
}

/// A link.
#[derive(Clone)]
pub struct Link {
    href: Option<String>,
    is_disabled: Signal<bool>,
    press: PressInteraction,
    hover: HoverInteraction,
    focus: FocusInteraction,
    dataset: Derived<DataSet>,
    polymorphic: Polymorphic,
}

impl Link {
    /// Create a link.
    pub fn new(options: LinkOptions) -> Self {
        let is_disabled = Signal::new(options.is_disabled);
        let focus = FocusInteraction::new();
        let polymorphic = Polymorphic::new(ElementKind::A, options.as_);
        let press = PressInteraction::new(PressOptions {
            is_disabled: is_disabled.read_only(),
            focus: Some(focus.clone()),
            element: Some(polymorphic.kind().clone()),
            on_press: options.on_press,
            ..PressOptions::default()
        });
        let hover = HoverInteraction::new(HoverOptions {
            is_disabled: is_disabled.read_only(),
            ..HoverOptions::default()
        });

        let dataset = {
            let (disabled, hovered, pressed) =
                (is_disabled.clone(), hover.hovered(), press.pressed());
            let focus = focus.clone();
            let deps: SmallVec<[Trigger; 8]> = [
                disabled.trigger(),
                focus.trigger(),
                press.trigger(),
            ]
            .into_iter()
            .chain(hovered.triggers().iter().cloned())
            .collect();
            Derived::new(deps, move || {
                DataSet::new(DataFlags::empty())
                    .with(DataFlags::DISABLED, disabled.get())
                    .with(DataFlags::HOVER, hovered.get())
                    .with(DataFlags::ACTIVE, pressed.get())
                    .with(DataFlags::FOCUS_VISIBLE, focus.is_focus_visible())
            })
        };

        Self {
            href: options.href,
            is_disabled,
            press,
            hover,
            focus,
            dataset,
            polymorphic,
        }
    }

    /// Whether the link is disabled.
    pub fn is_disabled(&self) -> bool {
        self.is_disabled.get()
    }

    /// Change the disabled flag; disabling ends any press or hover.
    pub fn set_disabled(&self, disabled: bool) {
        self.is_disabled.set(disabled);
    }

    /// Whether the link is pressed.
    pub fn is_pressed(&self) -> bool {
        self.press.is_pressed()
    }

    /// Whether a pointer hovers the link.
    pub fn is_hovered(&self) -> bool {
        self.hover.is_hovered()
    }

    /// Focus state of the link.
    pub fn focus(&self) -> &FocusInteraction {
        &self.focus
    }

    /// The link dataset: disabled, hover, active, focus-visible.
    pub fn dataset(&self) -> DataSet {
        self.dataset.get()
    }

    /// Render the link.
    pub fn render(&self, props: ElementProps) -> Element {
        let disabled = self.is_disabled();
        let mut own = Attributes::new();
        if *self.polymorphic.kind() != ElementKind::A {
            own.set("role", "link");
            if !disabled {
                own.set("tabindex", "0");
            }
        }
        own.set_opt("href", self.href.clone());
        own.set_opt("aria-disabled", disabled.then_some("true"));
        own.apply_dataset(&self.dataset());

        let internal = EventHandlers::compose(
            self.press.handlers(),
            EventHandlers::compose(self.hover.handlers(), self.focus.handlers()),
        );
        self.polymorphic.render(own, props, internal)
    }
}

impl fmt::Debug for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Link")
            .field("href", &self.href)
            .field("dataset", &self.dataset())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::ToString;
    use core::cell::Cell;
    use kurbo::Point;
    use trellis_event_state::event::{
        DomEvent, FocusEvent, FocusModality, Key, KeyboardEvent, MouseEvent, PointerEvent,
        PointerType,
    };

    fn counting(count: &Rc<Cell<u32>>) -> Callback<PressModality> {
        let count = count.clone();
        Rc::new(move |_| count.set(count.get() + 1))
    }

    #[test]
    fn anchor_has_no_role() {
        let link = Link::new(LinkOptions {
            href: Some("/home".to_string()),
            ..LinkOptions::default()
        });
        let a = link.render(ElementProps::new());
        assert_eq!(a.kind, ElementKind::A);
        assert_eq!(a.attr("href"), Some("/home"));
        assert_eq!(a.attr("role"), None);
        assert_eq!(a.attr("tabindex"), None);
        assert_eq!(a.attr("aria-disabled"), None);
        assert_eq!(a.to_string(), r#"<a href="/home">"#);
    }

    #[test]
    fn other_elements_get_link_role() {
        let link = Link::new(LinkOptions {
            as_: Some(ElementKind::Span),
            ..LinkOptions::default()
        });
        let span = link.render(ElementProps::new());
        assert_eq!(span.attr("role"), Some("link"));
        assert_eq!(span.attr("tabindex"), Some("0"));

        link.set_disabled(true);
        let span = link.render(ElementProps::new());
        assert_eq!(span.attr("tabindex"), None);
        assert_eq!(span.attr("aria-disabled"), Some("true"));
        assert_eq!(span.attr("data-disabled"), Some(""));
    }

    #[test]
    fn enabled_link_presses() {
        let count = Rc::new(Cell::new(0));
        let link = Link::new(LinkOptions {
            on_press: Some(counting(&count)),
            ..LinkOptions::default()
        });
        let mut a = link.render(ElementProps::new());

        let mut click = DomEvent::Click(MouseEvent::virtual_click());
        a.dispatch(&mut click);
        assert!(!click.is_default_prevented());
        assert_eq!(count.get(), 1);

        a.dispatch(&mut DomEvent::KeyDown(KeyboardEvent::new(Key::Enter)));
        assert!(link.is_pressed());
        assert_eq!(link.dataset().get("data-active"), Some(""));
        a.dispatch(&mut DomEvent::KeyUp(KeyboardEvent::new(Key::Enter)));
        assert_eq!(count.get(), 2);
        assert!(!link.is_pressed());
    }

    #[test]
    fn span_link_counts_host_click_after_key_press() {
        let count = Rc::new(Cell::new(0));
        let link = Link::new(LinkOptions {
            as_: Some(ElementKind::Span),
            on_press: Some(counting(&count)),
            ..LinkOptions::default()
        });
        let mut span = link.render(ElementProps::new());

        span.dispatch(&mut DomEvent::KeyDown(KeyboardEvent::new(Key::Enter)));
        span.dispatch(&mut DomEvent::KeyUp(KeyboardEvent::new(Key::Enter)));
        assert_eq!(count.get(), 1);

        // A span gets no click from the browser, so this one came from the host.
        span.dispatch(&mut DomEvent::Click(MouseEvent::virtual_click()));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn anchor_swallows_click_synthesized_by_key_press() {
        let count = Rc::new(Cell::new(0));
        let link = Link::new(LinkOptions {
            on_press: Some(counting(&count)),
            ..LinkOptions::default()
        });
        let mut a = link.render(ElementProps::new());

        a.dispatch(&mut DomEvent::KeyDown(KeyboardEvent::new(Key::Enter)));
        a.dispatch(&mut DomEvent::KeyUp(KeyboardEvent::new(Key::Enter)));
        a.dispatch(&mut DomEvent::Click(MouseEvent::virtual_click()));
        assert_eq!(count.get(), 1);

        a.dispatch(&mut DomEvent::Click(MouseEvent::virtual_click()));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn disabled_link_prevents_navigation() {
        let count = Rc::new(Cell::new(0));
        let link = Link::new(LinkOptions {
            href: Some("/x".to_string()),
            is_disabled: true,
            on_press: Some(counting(&count)),
            ..LinkOptions::default()
        });
        let mut a = link.render(ElementProps::new());
        let mut click = DomEvent::Click(MouseEvent::new(Point::new(2.0, 2.0)));
        a.dispatch(&mut click);
        assert!(click.is_default_prevented());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn hover_and_focus_visible_data() {
        let link = Link::new(LinkOptions::default());
        let mut a = link.render(ElementProps::new());
        a.dispatch(&mut DomEvent::PointerEnter(PointerEvent::new(
            PointerType::Mouse,
            Point::ZERO,
        )));
        assert_eq!(link.dataset().get("data-hover"), Some(""));

        a.dispatch(&mut DomEvent::Focus(FocusEvent::new(FocusModality::Keyboard)));
        assert_eq!(link.dataset().get("data-focus-visible"), Some(""));
        // The link dataset exposes no data-focus.
        assert!(!link.dataset().keys().contains(DataFlags::FOCUS));

        link.set_disabled(true);
        assert!(!link.is_hovered());
        assert_eq!(link.dataset().get("data-hover"), None);
    }
}
