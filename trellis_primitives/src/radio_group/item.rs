// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::fmt;

use smallvec::SmallVec;
use trellis_event_state::handlers::EventHandlers;
use trellis_state::{Derived, GenerateId, Signal, Trigger, unique_id};

use super::RadioGroup;
use crate::dataset::{DataInputs, DataSet};
use crate::error::Error;
use crate::interactions::{
    FocusInteraction, HoverInteraction, HoverOptions, PressInteraction, PressOptions,
};
use crate::polymorphic::{Attributes, Element, ElementKind, ElementProps, Polymorphic};
use crate::selection::ItemRegistration;

/// Radio item configuration.
#[derive(Clone, Debug, Default)]
pub struct RadioGroupItemOptions {
    /// The value the group selects when this item is checked. Must be unique
    /// within the group.
    pub value: String,
    /// Root id. Defaults to `{group id}-item-{unique id}`.
    pub id: Option<String>,
    /// Disable this item; the group's disabled flag applies as well.
    pub is_disabled: bool,
}

/// State shared by the parts of one radio item.
#[derive(Clone)]
pub struct RadioGroupItemContext {
    inner: Rc<ItemInner>,
}

struct ItemInner {
    group: RadioGroup,
    value: String,
    id: String,
    generate_id: GenerateId,
    local_disabled: Signal<bool>,
    is_selected: Derived<bool>,
    is_disabled: Derived<bool>,
    focus: FocusInteraction,
    dataset: Derived<DataSet>,
}

impl RadioGroupItemContext {
    /// The owning group.
    pub fn group(&self) -> &RadioGroup {
        &self.inner.group
    }

    /// The item's value.
    pub fn value(&self) -> &str {
        &self.inner.value
    }

    /// The item's root id.
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// The id of `part`, scoped to the item id.
    pub fn generate_id(&self, part: &str) -> String {
        self.inner.generate_id.generate(part)
    }

    /// Whether the group has this item's value selected.
    pub fn is_selected(&self) -> bool {
        self.inner.is_selected.get()
    }

    /// The checked state as a read-only accessor.
    pub fn selected(&self) -> Derived<bool> {
        self.inner.is_selected.clone()
    }

    /// Whether the item is disabled, by its own flag or the group's.
    pub fn is_disabled(&self) -> bool {
        self.inner.is_disabled.get()
    }

    /// The disabled state as a read-only accessor.
    pub fn disabled(&self) -> Derived<bool> {
        self.inner.is_disabled.clone()
    }

    /// Change the item's own disabled flag.
    pub fn set_disabled(&self, disabled: bool) {
        self.inner.local_disabled.set(disabled);
    }

    /// Focus state of the item, shared with its input.
    pub fn focus(&self) -> &FocusInteraction {
        &self.inner.focus
    }

    /// Whether the item has focus.
    pub fn is_focused(&self) -> bool {
        self.inner.focus.is_focused()
    }

    /// Whether the item's focus should be indicated.
    pub fn is_focus_visible(&self) -> bool {
        self.inner.focus.is_focus_visible()
    }

    /// The item dataset.
    pub fn dataset(&self) -> DataSet {
        self.inner.dataset.get()
    }

    /// The item dataset as a read-only accessor.
    pub fn data(&self) -> Derived<DataSet> {
        self.inner.dataset.clone()
    }
}

impl fmt::Debug for RadioGroupItemContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioGroupItemContext")
            .field("value", &self.inner.value)
            .field("id", &self.inner.id)
            .field("dataset", &self.dataset())
            .finish_non_exhaustive()
    }
}

/// One radio button of a [`RadioGroup`].
#[derive(Debug)]
pub struct RadioGroupItem {
    context: RadioGroupItemContext,
    press: PressInteraction,
    hover: HoverInteraction,
    polymorphic: Polymorphic,
    _registration: ItemRegistration,
}

impl RadioGroupItem {
    /// Create an item and register it with `group`.
    pub fn new(group: &RadioGroup, options: RadioGroupItemOptions) -> Result<Self, Error> {
        let value = options.value;
        let local_disabled = Signal::new(options.is_disabled);
        let is_disabled = {
            let local = local_disabled.clone();
            let control = group.form_control().clone();
            let mut deps = control.disabled().triggers().to_vec();
            deps.push(local_disabled.trigger());
            Derived::new(deps, move || local.get() || control.is_disabled())
        };
        let registration = group.items().register(value.clone(), is_disabled.clone())?;

        let id = options
            .id
            .unwrap_or_else(|| format!("{}-{}", group.generate_id("item"), unique_id()));
        let is_selected = {
            let (group, value) = (group.clone(), value.clone());
            Derived::new([group.selection_trigger()], move || {
                group.is_selected_value(&value)
            })
        };

        let focus = FocusInteraction::new();
        let press = PressInteraction::new(
            PressOptions {
                is_disabled: is_disabled.clone(),
                // Re-pressing the focused item must not steal focus back from the input.
                prevent_focus_on_press: focus.focused(),
                focus: Some(focus.clone()),
                element: Some(ElementKind::Label),
                ..PressOptions::default()
            }
            .on_press({
                // The label activates its input.
                let (group, value) = (group.clone(), value.clone());
                move |_| {
                    if let Err(err) = group.set_selected_value(&value) {
                        tracing::warn!(%err, "radio item press ignored");
                    }
                }
            }),
        );
        let hover = HoverInteraction::new(HoverOptions {
            is_disabled: is_disabled.clone(),
            ..HoverOptions::default()
        });

        let dataset = {
            let control = group.form_control().clone();
            let (selected, disabled) = (is_selected.clone(), is_disabled.clone());
            let (hovered, pressed) = (hover.hovered(), press.pressed());
            let focus = focus.clone();
            let deps: SmallVec<[Trigger; 8]> = [
                selected.triggers(),
                disabled.triggers(),
                hovered.triggers(),
                pressed.triggers(),
                control.validation().triggers(),
            ]
            .into_iter()
            .flatten()
            .cloned()
            .chain([focus.trigger()])
            .collect();
            Derived::new(deps, move || {
                DataSet::derive(&DataInputs {
                    checked: selected.get(),
                    disabled: disabled.get(),
                    hovered: hovered.get(),
                    focused: focus.is_focused(),
                    focus_visible: focus.is_focus_visible(),
                    pressed: pressed.get(),
                    validation: control.validation_state(),
                })
            })
        };

        Ok(Self {
            context: RadioGroupItemContext {
                inner: Rc::new(ItemInner {
                    group: group.clone(),
                    value,
                    generate_id: GenerateId::fixed(id.clone()),
                    id,
                    local_disabled,
                    is_selected,
                    is_disabled,
                    focus,
                    dataset,
                }),
            },
            press,
            hover,
            polymorphic: Polymorphic::new(ElementKind::Label, None),
            _registration: registration,
        })
    }

    /// State shared with the item's parts.
    pub fn context(&self) -> &RadioGroupItemContext {
        &self.context
    }

    /// Whether the item is pressed.
    pub fn is_pressed(&self) -> bool {
        self.press.is_pressed()
    }

    /// Whether a pointer hovers the item.
    pub fn is_hovered(&self) -> bool {
        self.hover.is_hovered()
    }

    /// Render the item root, a `label` wrapping the item's parts.
    pub fn render(&self, props: ElementProps) -> Element {
        let mut own = Attributes::new().with("id", self.context.id());
        own.apply_dataset(&self.context.dataset());
        let internal = EventHandlers::compose(self.press.handlers(), self.hover.handlers());
        self.polymorphic.render(own, props, internal)
    }
}
