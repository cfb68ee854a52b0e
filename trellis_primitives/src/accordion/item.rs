// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use trellis_state::{Derived, IdRegistration, RegisterId, Signal, unique_id};

use super::Accordion;
use crate::collapsible::{Collapsible, CollapsibleOptions};
use crate::dataset::DataSet;
use crate::error::Error;
use crate::polymorphic::{Element, ElementKind, ElementProps};
use crate::selection::ItemRegistration;

/// Accordion item configuration.
#[derive(Clone, Debug, Default)]
pub struct AccordionItemOptions {
    /// The value the accordion selects to expand this item. Must be unique within
    /// the accordion.
    pub value: String,
    /// Root id. Defaults to `{accordion id}-item-{unique id}`.
    pub id: Option<String>,
    /// Disable the item's trigger.
    pub is_disabled: bool,
    /// Keep the content present while collapsed.
    pub force_mount: bool,
    /// Root element override; defaults to `div`.
    pub as_: Option<ElementKind>,
}

/// State shared by the parts of one accordion item.
#[derive(Clone)]
pub struct AccordionItemContext {
    inner: Rc<ItemInner>,
}

struct ItemInner {
    accordion: Accordion,
    value: String,
    is_disabled: Signal<bool>,
    collapsible: Collapsible,
    trigger_id: Signal<Option<String>>,
}

impl AccordionItemContext {
    /// The owning accordion.
    pub fn accordion(&self) -> &Accordion {
        &self.inner.accordion
    }

    /// The item's value.
    pub fn value(&self) -> &str {
        &self.inner.value
    }

    /// The item's root id.
    pub fn id(&self) -> &str {
        self.inner.collapsible.id()
    }

    /// The id of `part`, scoped to the item id.
    pub fn generate_id(&self, part: &str) -> String {
        self.inner.collapsible.generate_id(part)
    }

    /// The collapsible backing this item.
    pub fn collapsible(&self) -> &Collapsible {
        &self.inner.collapsible
    }

    /// Whether the item is expanded.
    pub fn is_expanded(&self) -> bool {
        self.inner.collapsible.is_open()
    }

    /// Whether the item is disabled.
    pub fn is_disabled(&self) -> bool {
        self.inner.is_disabled.get()
    }

    /// Change the disabled flag.
    pub fn set_disabled(&self, disabled: bool) {
        self.inner.is_disabled.set(disabled);
    }

    /// The trigger's registered id.
    pub fn trigger_id(&self) -> Option<String> {
        self.inner.trigger_id.get()
    }

    /// The content's registered id.
    pub fn content_id(&self) -> Option<String> {
        self.inner.collapsible.content_id()
    }

    /// Publish the trigger part's id.
    pub fn register_trigger_id(&self, id: impl Into<String>) -> IdRegistration {
        RegisterId::new(self.inner.trigger_id.clone()).register(id)
    }

    /// Publish the content part's id.
    pub fn register_content_id(&self, id: impl Into<String>) -> IdRegistration {
        self.inner.collapsible.register_content_id(id)
    }

    /// Dataset of every item part: expanded, disabled.
    pub fn dataset(&self) -> Derived<DataSet> {
        self.inner.collapsible.dataset()
    }
}

impl fmt::Debug for AccordionItemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccordionItemContext")
            .field("value", &self.inner.value)
            .field("collapsible", &self.inner.collapsible)
            .field("trigger_id", &self.trigger_id())
            .finish_non_exhaustive()
    }
}

/// One section of an [`Accordion`].
#[derive(Debug)]
pub struct AccordionItem {
    context: AccordionItemContext,
    _registration: ItemRegistration,
}

impl AccordionItem {
    /// Create an item and register it with `accordion`.
    pub fn new(accordion: &Accordion, options: AccordionItemOptions) -> Result<Self, Error> {
        let is_disabled = Signal::new(options.is_disabled);
        let registration = accordion
            .items()
            .register(options.value.clone(), is_disabled.read_only())?;

        let id = options
            .id
            .unwrap_or_else(|| format!("{}-{}", accordion.generate_id("item"), unique_id()));
        let is_expanded = {
            let (accordion, value) = (accordion.clone(), options.value.clone());
            Derived::new([accordion.selection_manager().trigger()], move || {
                accordion.is_expanded(&value)
            })
        };
        let on_open_change = {
            let (accordion, value) = (accordion.clone(), options.value.clone());
            Rc::new(move |open: bool| {
                accordion.set_expanded(&value, open);
            })
        };
        let collapsible = Collapsible::new(CollapsibleOptions {
            id: Some(id),
            is_open: Some(is_expanded),
            default_open: false,
            is_disabled: is_disabled.read_only(),
            force_mount: options.force_mount,
            on_open_change: Some(on_open_change),
            as_: options.as_,
        });

        Ok(Self {
            context: AccordionItemContext {
                inner: Rc::new(ItemInner {
                    accordion: accordion.clone(),
                    value: options.value,
                    is_disabled,
                    collapsible,
                    trigger_id: Signal::new(None),
                }),
            },
            _registration: registration,
        })
    }

    /// State shared with the item's parts.
    pub fn context(&self) -> &AccordionItemContext {
        &self.context
    }

    /// Render the item root.
    pub fn render(&self, props: ElementProps) -> Element {
        self.context.collapsible().render(props)
    }
}
