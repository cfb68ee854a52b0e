// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accordion: a vertically stacked set of collapsible sections.
//!
//! The [`Accordion`] owns which items are expanded, through a
//! [`SelectionManager`]. Each [`AccordionItem`] is a collapsible whose open state is
//! the accordion's selection of its value. Its parts ([`AccordionHeader`],
//! [`AccordionTrigger`], [`AccordionContent`]) are built from the item's
//! [`AccordionItemContext`].
//!
//! ```
//! use trellis_primitives::accordion::{
//!     Accordion, AccordionContent, AccordionItem, AccordionItemOptions, AccordionOptions,
//!     AccordionTrigger,
//! };
//! use trellis_primitives::polymorphic::ElementProps;
//!
//! let accordion = Accordion::new(AccordionOptions::default());
//! let item = AccordionItem::new(
//!     &accordion,
//!     AccordionItemOptions { value: "shipping".into(), ..Default::default() },
//! )?;
//! let trigger = AccordionTrigger::new(item.context(), Default::default());
//! let content = AccordionContent::new(item.context(), Default::default());
//!
//! assert!(content.render(ElementProps::new()).is_none());
//! accordion.toggle("shipping");
//!
//! let region = content.render(ElementProps::new()).expect("expanded");
//! assert_eq!(region.attr("aria-labelledby"), Some(trigger.id()));
//! # Ok::<(), trellis_primitives::Error>(())
//! ```

mod item;
mod parts;

pub use item::{AccordionItem, AccordionItemContext, AccordionItemOptions};
pub use parts::{
    AccordionContent, AccordionContentOptions, AccordionHeader, AccordionHeaderOptions,
    AccordionTrigger, AccordionTriggerOptions,
};

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use trellis_event_state::event::Key;
use trellis_event_state::handlers::EventHandlers;
use trellis_focus::{Orientation, WrapMode};
use trellis_state::{GenerateId, Signal, unique_id};

use crate::interactions::Callback;
use crate::polymorphic::{Attributes, Element, ElementKind, ElementProps, Polymorphic};
use crate::selection::{ItemRegistry, SelectionManager, SelectionMode};

/// Accordion configuration.
#[derive(Clone)]
pub struct AccordionOptions {
    /// Root id. Defaults to `accordion-{unique id}`.
    pub id: Option<String>,
    /// Expanded values supplied by the caller; takes precedence over
    /// `default_value`.
    pub value: Option<Vec<String>>,
    /// Initially expanded values.
    pub default_value: Vec<String>,
    /// Allow several items to be expanded at once. Defaults to false.
    pub is_multiple: bool,
    /// Allow collapsing the last expanded item. Defaults to false; always allowed
    /// when `is_multiple` is set.
    pub is_collapsible: bool,
    /// Arrow keys wrap from the last trigger to the first. Defaults to true.
    pub should_focus_wrap: bool,
    /// Called with the expanded values after they change.
    pub on_change: Option<Callback<Vec<String>>>,
    /// Root element override; defaults to `div`.
    pub as_: Option<ElementKind>,
}

impl Default for AccordionOptions {
    fn default() -> Self {
        Self {
            id: None,
            value: None,
            default_value: Vec::new(),
            is_multiple: false,
            is_collapsible: false,
            should_focus_wrap: true,
            on_change: None,
            as_: None,
        }
    }
}

impl fmt::Debug for AccordionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccordionOptions")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("is_multiple", &self.is_multiple)
            .field("is_collapsible", &self.is_collapsible)
            .field("should_focus_wrap", &self.should_focus_wrap)
            .field("as_", &self.as_)
            .finish_non_exhaustive()
    }
}

/// Accordion root state.
///
/// Cloning yields another handle to the same accordion.
#[derive(Clone)]
pub struct Accordion {
    inner: Rc<AccordionInner>,
}

struct AccordionInner {
    id: String,
    generate_id: GenerateId,
    selection: SelectionManager,
    items: ItemRegistry,
    focused_value: Signal<Option<String>>,
    wrap: WrapMode,
    on_change: Option<Callback<Vec<String>>>,
    polymorphic: Polymorphic,
}

impl Accordion {
    /// Create an accordion.
    pub fn new(options: AccordionOptions) -> Self {
        let id = options
            .id
            .unwrap_or_else(|| format!("accordion-{}", unique_id()));
        let mode = if options.is_multiple {
            SelectionMode::Multiple
        } else {
            SelectionMode::Single
        };
        let initial = options.value.unwrap_or(options.default_value);
        let allows_empty = options.is_multiple || options.is_collapsible;
        Self {
            inner: Rc::new(AccordionInner {
                generate_id: GenerateId::fixed(id.clone()),
                id,
                selection: SelectionManager::new(mode, allows_empty, initial),
                items: ItemRegistry::new(),
                focused_value: Signal::new(None),
                wrap: if options.should_focus_wrap {
                    WrapMode::Wrap
                } else {
                    WrapMode::Never
                },
                on_change: options.on_change,
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

    /// The expansion state.
    pub fn selection_manager(&self) -> &SelectionManager {
        &self.inner.selection
    }

    /// The mounted items.
    pub fn items(&self) -> &ItemRegistry {
        &self.inner.items
    }

    /// Whether the item with `value` is expanded.
    pub fn is_expanded(&self, value: &str) -> bool {
        self.inner.selection.is_selected(value)
    }

    /// Expanded values, sorted.
    pub fn expanded_values(&self) -> Vec<String> {
        self.inner.selection.selected_keys()
    }

    /// Expand or collapse `value`. Returns whether anything changed.
    ///
    /// Collapsing the last expanded item of a non-collapsible accordion is refused.
    pub fn set_expanded(&self, value: &str, expanded: bool) -> bool {
        let selection = &self.inner.selection;
        let changed = if expanded {
            selection.select(value)
        } else {
            selection.deselect(value)
        };
        if changed {
            self.notify_change();
        }
        changed
    }

    /// Flip the expansion of `value`.
    pub fn toggle(&self, value: &str) -> bool {
        self.set_expanded(value, !self.is_expanded(value))
    }

    /// Replace the expanded values as a caller-owned value would, without calling
    /// `on_change`.
    pub fn set_value(&self, values: impl IntoIterator<Item = impl Into<String>>) -> bool {
        self.inner.selection.replace(values)
    }

    /// The value of the item whose trigger has focus.
    pub fn focused_value(&self) -> Option<String> {
        self.inner.focused_value.get()
    }

    /// Record which trigger has focus.
    pub fn set_focused_value(&self, value: Option<String>) {
        self.inner.focused_value.set(value);
    }

    /// Move focus from the trigger of `from` according to `key`.
    ///
    /// ArrowDown/ArrowUp move to the next/previous enabled trigger, Home/End to the
    /// first/last. Returns the newly focused value, which the host should focus.
    pub fn navigate(&self, from: &str, key: Key) -> Option<String> {
        let navigation = Orientation::Vertical.navigation_for(key)?;
        let target = self
            .inner
            .items
            .navigate(Some(from), navigation, self.inner.wrap)?;
        tracing::debug!(from, to = %target, "accordion focus move");
        self.set_focused_value(Some(target.clone()));
        Some(target)
    }

    /// Render the root element.
    pub fn render(&self, props: ElementProps) -> Element {
        let own = Attributes::new().with("id", self.inner.id.clone());
        self.inner
            .polymorphic
            .render(own, props, EventHandlers::new())
    }

    fn notify_change(&self) {
        if let Some(cb) = &self.inner.on_change {
            cb(self.expanded_values());
        }
    }
}

impl fmt::Debug for Accordion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accordion")
            .field("id", &self.inner.id)
            .field("expanded", &self.expanded_values())
            .field("items", &self.inner.items)
            .finish_non_exhaustive()
    }
}
