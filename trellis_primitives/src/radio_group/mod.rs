// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Radio group: a set of checkable items of which at most one is checked.
//!
//! The [`RadioGroup`] is a form control that owns the selected value. Each
//! [`RadioGroupItem`] derives its checked state from the group's predicate on its
//! value and its disabled state from its own flag OR the group's. Items render as a
//! `label` wrapping a native radio input ([`RadioGroupItemInput`]), a visual control
//! ([`RadioGroupItemControl`]) and an indicator ([`RadioGroupItemIndicator`]).
//!
//! ```
//! use trellis_event_state::event::{DomEvent, MouseEvent};
//! use trellis_primitives::polymorphic::ElementProps;
//! use trellis_primitives::radio_group::{RadioGroup, RadioGroupItem, RadioGroupItemOptions, RadioGroupOptions};
//!
//! let group = RadioGroup::new(RadioGroupOptions::default());
//! let monthly = RadioGroupItem::new(
//!     &group,
//!     RadioGroupItemOptions { value: "monthly".into(), ..Default::default() },
//! )?;
//!
//! let mut label = monthly.render(ElementProps::new());
//! assert_eq!(label.attr("data-checked"), None);
//!
//! // Clicking the label checks the radio.
//! label.dispatch(&mut DomEvent::Click(MouseEvent::virtual_click()));
//! assert_eq!(group.selected_value().as_deref(), Some("monthly"));
//! assert_eq!(monthly.render(ElementProps::new()).attr("data-checked"), Some(""));
//! # Ok::<(), trellis_primitives::Error>(())
//! ```

mod item;
mod parts;

pub use item::{RadioGroupItem, RadioGroupItemContext, RadioGroupItemOptions};
pub use parts::{
    RadioGroupItemControl, RadioGroupItemIndicator, RadioGroupItemIndicatorOptions,
    RadioGroupItemInput, RadioGroupPartOptions,
};

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::fmt;

use trellis_event_state::event::Key;
use trellis_event_state::handlers::EventHandlers;
use trellis_focus::{Orientation, WrapMode};
use trellis_state::{IdRegistration, Trigger};

use crate::error::Error;
use crate::form_control::{FormControl, FormControlOptions, ValidationState};
use crate::interactions::Callback;
use crate::polymorphic::{Attributes, Element, ElementKind, ElementProps, Polymorphic};
use crate::selection::{ItemRegistry, SelectionManager, SelectionMode};

/// Radio group configuration.
#[derive(Clone, Default)]
pub struct RadioGroupOptions {
    /// Root id. Defaults to `radiogroup-{unique id}`.
    pub id: Option<String>,
    /// Selected value supplied by the caller; takes precedence over
    /// `default_value`.
    pub value: Option<String>,
    /// Initially selected value.
    pub default_value: Option<String>,
    /// Name of the native inputs. Defaults to the root id.
    pub name: Option<String>,
    /// Layout axis, reported as `aria-orientation`. Defaults to vertical.
    pub orientation: Orientation,
    /// Disable every item.
    pub is_disabled: bool,
    /// A value must be selected before submission.
    pub is_required: bool,
    /// Items can be focused but the selection cannot change.
    pub is_read_only: bool,
    /// Validation state.
    pub validation_state: Option<ValidationState>,
    /// Called with the newly selected value.
    pub on_change: Option<Callback<String>>,
    /// Root element override; defaults to `div`.
    pub as_: Option<ElementKind>,
}

impl fmt::Debug for RadioGroupOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioGroupOptions")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("name", &self.name)
            .field("orientation", &self.orientation)
            .field("is_disabled", &self.is_disabled)
            .field("is_required", &self.is_required)
            .field("is_read_only", &self.is_read_only)
            .field("validation_state", &self.validation_state)
            .field("as_", &self.as_)
            .finish_non_exhaustive()
    }
}

/// Radio group root state.
///
/// Cloning yields another handle to the same group.
#[derive(Clone)]
pub struct RadioGroup {
    inner: Rc<RadioGroupInner>,
}

struct RadioGroupInner {
    form_control: FormControl,
    selection: SelectionManager,
    name: String,
    orientation: Orientation,
    items: ItemRegistry,
    on_change: Option<Callback<String>>,
    polymorphic: Polymorphic,
}

impl RadioGroup {
    /// Create a radio group.
    pub fn new(options: RadioGroupOptions) -> Self {
        let form_control = FormControl::new(
            FormControlOptions {
                id: options.id,
                validation_state: options.validation_state,
                is_required: options.is_required,
                is_disabled: options.is_disabled,
                is_read_only: options.is_read_only,
            },
            "radiogroup",
        );
        let name = options
            .name
            .unwrap_or_else(|| form_control.id().to_string());
        let initial = options.value.or(options.default_value);
        Self {
            inner: Rc::new(RadioGroupInner {
                form_control,
                selection: SelectionManager::new(SelectionMode::Single, true, initial),
                name,
                orientation: options.orientation,
                items: ItemRegistry::new(),
                on_change: options.on_change,
                polymorphic: Polymorphic::new(ElementKind::Div, options.as_),
            }),
        }
    }

    /// Form-field state: id, disabled, required, read-only, validation.
    pub fn form_control(&self) -> &FormControl {
        &self.inner.form_control
    }

    /// The root id.
    pub fn id(&self) -> &str {
        self.inner.form_control.id()
    }

    /// The id of `part`, scoped to the root id.
    pub fn generate_id(&self, part: &str) -> String {
        self.inner.form_control.generate_id(part)
    }

    /// Name shared by the native inputs.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Layout axis.
    pub fn orientation(&self) -> Orientation {
        self.inner.orientation
    }

    /// The mounted items.
    pub fn items(&self) -> &ItemRegistry {
        &self.inner.items
    }

    /// The selected value.
    pub fn selected_value(&self) -> Option<String> {
        self.inner.selection.selected_keys().into_iter().next()
    }

    /// Whether `value` is the selected value.
    pub fn is_selected_value(&self, value: &str) -> bool {
        self.inner.selection.is_selected(value)
    }

    /// The trigger notified when the selected value changes.
    pub fn selection_trigger(&self) -> Trigger {
        self.inner.selection.trigger()
    }

    /// Select `value` on behalf of the user.
    ///
    /// Ignored while the group is disabled or read-only, or the item is disabled.
    /// Returns whether the selection changed.
    pub fn set_selected_value(&self, value: &str) -> Result<bool, Error> {
        let control = &self.inner.form_control;
        if control.is_disabled() || control.is_read_only() {
            return Ok(false);
        }
        match self.inner.items.is_disabled(value) {
            None => return Err(Error::UnknownValue(value.to_string())),
            Some(true) => return Ok(false),
            Some(false) => {}
        }
        let changed = self.inner.selection.select(value);
        if changed {
            if let Some(cb) = &self.inner.on_change {
                cb(value.to_string());
            }
        }
        Ok(changed)
    }

    /// Replace the selected value as a caller-owned value would, without calling
    /// `on_change`.
    pub fn set_value(&self, value: Option<&str>) -> bool {
        match value {
            Some(value) => self.inner.selection.replace([value]),
            None => self.inner.selection.clear(),
        }
    }

    /// Select the item an arrow key leads to from `from`.
    ///
    /// Both arrow pairs move, like native radio groups, wrapping at the ends and
    /// skipping disabled items. Returns the target value, which the host should
    /// focus.
    pub fn select_adjacent(&self, from: &str, key: Key) -> Option<String> {
        if !matches!(
            key,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        ) {
            return None;
        }
        let navigation = Orientation::Both.navigation_for(key)?;
        let target = self
            .inner
            .items
            .navigate(Some(from), navigation, WrapMode::Wrap)?;
        self.set_selected_value(&target).ok()?;
        Some(target)
    }

    /// Render the root element.
    pub fn render(&self, props: ElementProps) -> Element {
        let control = &self.inner.form_control;
        let mut own = Attributes::new()
            .with("role", "radiogroup")
            .with("id", self.id().to_string());
        own.set_opt("aria-orientation", self.inner.orientation.aria_value());
        own.set_opt("aria-required", control.is_required().then_some("true"));
        own.set_opt("aria-disabled", control.is_disabled().then_some("true"));
        own.set_opt("aria-readonly", control.is_read_only().then_some("true"));
        own.set_opt("aria-invalid", control.is_invalid().then_some("true"));
        own.set_opt("aria-labelledby", control.label_id());
        own.set_opt("aria-describedby", control.aria_described_by());
        own.apply_dataset(&control.dataset().get());
        self.inner
            .polymorphic
            .render(own, props, EventHandlers::new())
    }
}

impl fmt::Debug for RadioGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioGroup")
            .field("id", &self.id())
            .field("selected", &self.selected_value())
            .field("items", &self.inner.items)
            .finish_non_exhaustive()
    }
}

/// Which group-level text part to build.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RadioGroupTextKind {
    /// The visible label; referenced by `aria-labelledby`.
    Label,
    /// Help text; referenced by `aria-describedby`.
    Description,
    /// Validation message; present and referenced only while invalid.
    ErrorMessage,
}

/// A label, description or error message of a [`RadioGroup`].
#[derive(Debug)]
pub struct RadioGroupText {
    group: RadioGroup,
    kind: RadioGroupTextKind,
    registration: IdRegistration,
    polymorphic: Polymorphic,
}

impl RadioGroupText {
    /// Create a text part and publish its id.
    pub fn new(group: &RadioGroup, kind: RadioGroupTextKind, as_: Option<ElementKind>) -> Self {
        let control = group.form_control();
        let (part, default_kind) = match kind {
            RadioGroupTextKind::Label => ("label", ElementKind::Span),
            RadioGroupTextKind::Description => ("description", ElementKind::Div),
            RadioGroupTextKind::ErrorMessage => ("error-message", ElementKind::Div),
        };
        let id = control.generate_id(part);
        let registration = match kind {
            RadioGroupTextKind::Label => control.register_label(id),
            RadioGroupTextKind::Description => control.register_description(id),
            RadioGroupTextKind::ErrorMessage => control.register_error_message(id),
        };
        Self {
            group: group.clone(),
            kind,
            registration,
            polymorphic: Polymorphic::new(default_kind, as_),
        }
    }

    /// The part id.
    pub fn id(&self) -> &str {
        self.registration.id()
    }

    /// Render the part; an error message renders only while the group is invalid.
    pub fn render(&self, props: ElementProps) -> Option<Element> {
        let control = self.group.form_control();
        if self.kind == RadioGroupTextKind::ErrorMessage && !control.is_invalid() {
            return None;
        }
        let mut own = Attributes::new().with("id", self.id().to_string());
        own.apply_dataset(&control.dataset().get());
        Some(self.polymorphic.render(own, props, EventHandlers::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    fn group_with(options: RadioGroupOptions, values: &[&str]) -> (RadioGroup, Vec<RadioGroupItem>) {
        let group = RadioGroup::new(options);
        let items = values
            .iter()
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
    fn value_takes_precedence_and_on_change_fires() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let (group, _items) = group_with(
            RadioGroupOptions {
                value: Some("b".to_string()),
                default_value: Some("a".to_string()),
                on_change: Some({
                    let changes = changes.clone();
                    Rc::new(move |value: String| changes.borrow_mut().push(value))
                }),
                ..RadioGroupOptions::default()
            },
            &["a", "b"],
        );
        assert_eq!(group.selected_value().as_deref(), Some("b"));
        assert_eq!(group.set_selected_value("a"), Ok(true));
        assert_eq!(group.set_selected_value("a"), Ok(false));
        assert_eq!(*changes.borrow(), ["a"]);
    }

    #[test]
    fn set_value_does_not_call_on_change() {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let (group, items) = group_with(
            RadioGroupOptions {
                on_change: Some({
                    let changes = changes.clone();
                    Rc::new(move |value: String| changes.borrow_mut().push(value))
                }),
                ..RadioGroupOptions::default()
            },
            &["a", "b"],
        );
        assert!(group.set_value(Some("a")));
        assert!(items[0].context().is_selected());
        assert!(group.set_value(None));
        assert_eq!(group.selected_value(), None);
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn unknown_values_are_errors() {
        let (group, _items) = group_with(RadioGroupOptions::default(), &["a"]);
        assert_eq!(
            group.set_selected_value("zzz"),
            Err(Error::UnknownValue("zzz".to_string()))
        );
    }

    #[test]
    fn read_only_and_disabled_groups_ignore_selection() {
        let (group, _items) = group_with(
            RadioGroupOptions {
                is_read_only: true,
                ..RadioGroupOptions::default()
            },
            &["a"],
        );
        assert_eq!(group.set_selected_value("a"), Ok(false));
        group.form_control().set_read_only(false);
        group.form_control().set_disabled(true);
        assert_eq!(group.set_selected_value("a"), Ok(false));
        assert_eq!(group.selected_value(), None);
    }

    #[test]
    fn arrows_select_adjacent_enabled_item() {
        let (group, items) = group_with(RadioGroupOptions::default(), &["a", "b", "c"]);
        items[1].context().set_disabled(true);

        assert_eq!(group.select_adjacent("a", Key::ArrowDown).as_deref(), Some("c"));
        assert_eq!(group.selected_value().as_deref(), Some("c"));
        assert_eq!(group.select_adjacent("c", Key::ArrowRight).as_deref(), Some("a"));
        assert_eq!(group.select_adjacent("a", Key::ArrowLeft).as_deref(), Some("c"));
        assert_eq!(group.select_adjacent("a", Key::Home), None);
    }

    #[test]
    fn root_reports_aria_state() {
        let (group, _items) = group_with(
            RadioGroupOptions {
                id: Some("plan".to_string()),
                orientation: Orientation::Horizontal,
                is_required: true,
                validation_state: Some(ValidationState::Invalid),
                ..RadioGroupOptions::default()
            },
            &["a"],
        );
        let label = RadioGroupText::new(&group, RadioGroupTextKind::Label, None);
        let description = RadioGroupText::new(&group, RadioGroupTextKind::Description, None);
        let error = RadioGroupText::new(&group, RadioGroupTextKind::ErrorMessage, None);

        let root = group.render(ElementProps::new());
        assert_eq!(root.attr("role"), Some("radiogroup"));
        assert_eq!(root.attr("id"), Some("plan"));
        assert_eq!(root.attr("aria-orientation"), Some("horizontal"));
        assert_eq!(root.attr("aria-required"), Some("true"));
        assert_eq!(root.attr("aria-invalid"), Some("true"));
        assert_eq!(root.attr("aria-disabled"), None);
        assert_eq!(root.attr("aria-labelledby"), Some(label.id()));
        assert_eq!(
            root.attr("aria-describedby"),
            Some("plan-description plan-error-message")
        );
        assert_eq!(root.attr("data-invalid"), Some(""));
        assert!(error.render(ElementProps::new()).is_some());

        group.form_control().set_validation_state(None);
        assert!(error.render(ElementProps::new()).is_none());
        assert_eq!(
            group.render(ElementProps::new()).attr("aria-describedby"),
            Some(description.id())
        );
    }

    #[test]
    fn name_defaults_to_id() {
        let group = RadioGroup::new(RadioGroupOptions {
            id: Some("plan".to_string()),
            ..RadioGroupOptions::default()
        });
        assert_eq!(group.name(), "plan");
    }
}
