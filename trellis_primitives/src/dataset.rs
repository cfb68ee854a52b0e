// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boolean-presence `data-*` attributes.
//!
//! Unstyled components expose their state to stylesheets and accessibility tooling
//! through attributes that are either present with an empty value or absent, such as
//! `data-checked=""`. A [`DataSet`] is that mapping for one rendered element: the set
//! of keys the component exposes plus which of them are present.
//!
//! Datasets are pure projections of a component's signals. Components hold them as
//! a `Derived<DataSet>` recomputed on every read, never as stored state.

use bitflags::bitflags;

use crate::form_control::ValidationState;

bitflags! {
    /// One bit per dataset attribute.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct DataFlags: u16 {
        /// `data-valid`
        const VALID = 1 << 0;
        /// `data-invalid`
        const INVALID = 1 << 1;
        /// `data-checked`
        const CHECKED = 1 << 2;
        /// `data-expanded`
        const EXPANDED = 1 << 3;
        /// `data-disabled`
        const DISABLED = 1 << 4;
        /// `data-hover`
        const HOVER = 1 << 5;
        /// `data-focus`
        const FOCUS = 1 << 6;
        /// `data-focus-visible`
        const FOCUS_VISIBLE = 1 << 7;
        /// `data-active`
        const ACTIVE = 1 << 8;
        /// `data-required`
        const REQUIRED = 1 << 9;
        /// `data-readonly`
        const READONLY = 1 << 10;
    }
}

const ATTRIBUTE_NAMES: [(DataFlags, &str); 11] = [
    (DataFlags::VALID, "data-valid"),
    (DataFlags::INVALID, "data-invalid"),
    (DataFlags::CHECKED, "data-checked"),
    (DataFlags::EXPANDED, "data-expanded"),
    (DataFlags::DISABLED, "data-disabled"),
    (DataFlags::HOVER, "data-hover"),
    (DataFlags::FOCUS, "data-focus"),
    (DataFlags::FOCUS_VISIBLE, "data-focus-visible"),
    (DataFlags::ACTIVE, "data-active"),
    (DataFlags::REQUIRED, "data-required"),
    (DataFlags::READONLY, "data-readonly"),
];

impl DataFlags {
    /// Attribute name of a single flag.
    pub fn attribute_name(self) -> Option<&'static str> {
        ATTRIBUTE_NAMES
            .iter()
            .find(|(flag, _)| *flag == self)
            .map(|(_, name)| *name)
    }

    /// The flag named `name`.
    pub fn from_attribute_name(name: &str) -> Option<Self> {
        ATTRIBUTE_NAMES
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(flag, _)| *flag)
    }
}

/// The `data-*` attributes of one element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DataSet {
    keys: DataFlags,
    present: DataFlags,
}

impl DataSet {
    /// A dataset exposing `keys`, all absent.
    pub fn new(keys: DataFlags) -> Self {
        Self {
            keys,
            present: DataFlags::empty(),
        }
    }

    /// Expose `flag` and mark it present or absent.
    pub fn with(mut self, flag: DataFlags, present: bool) -> Self {
        self.keys |= flag;
        self.present.set(flag, present);
        self
    }

    /// The attributes this dataset exposes.
    pub fn keys(&self) -> DataFlags {
        self.keys
    }

    /// The attributes currently present.
    pub fn present(&self) -> DataFlags {
        self.present
    }

    /// Whether every flag in `flag` is present.
    pub fn contains(&self, flag: DataFlags) -> bool {
        self.present.contains(flag)
    }

    /// `Some("")` if the attribute `name` is present, `None` if it is absent or
    /// not exposed.
    pub fn get(&self, name: &str) -> Option<&'static str> {
        let flag = DataFlags::from_attribute_name(name)?;
        self.present.contains(flag).then_some("")
    }

    /// Every exposed attribute with its value, in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<&'static str>)> + '_ {
        ATTRIBUTE_NAMES
            .iter()
            .filter(|(flag, _)| self.keys.contains(*flag))
            .map(|(flag, name)| (*name, self.present.contains(*flag).then_some("")))
    }

    /// Overlay `other`: its keys replace this dataset's values for those keys.
    pub fn merge(self, other: Self) -> Self {
        Self {
            keys: self.keys | other.keys,
            present: (self.present - other.keys) | other.present,
        }
    }

    /// The interaction dataset of a checkable item.
    ///
    /// Exposes valid, invalid, checked, disabled, hover, focus, focus-visible and
    /// active.
    pub fn derive(inputs: &DataInputs) -> Self {
        Self::new(DataFlags::empty())
            .with(
                DataFlags::VALID,
                inputs.validation == Some(ValidationState::Valid),
            )
            .with(
                DataFlags::INVALID,
                inputs.validation == Some(ValidationState::Invalid),
            )
            .with(DataFlags::CHECKED, inputs.checked)
            .with(DataFlags::DISABLED, inputs.disabled)
            .with(DataFlags::HOVER, inputs.hovered)
            .with(DataFlags::FOCUS, inputs.focused)
            .with(DataFlags::FOCUS_VISIBLE, inputs.focus_visible)
            .with(DataFlags::ACTIVE, inputs.pressed)
    }
}

/// Inputs of [`DataSet::derive`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DataInputs {
    /// Selected / checked.
    pub checked: bool,
    /// Disabled, local or inherited.
    pub disabled: bool,
    /// Hovered by a pointer.
    pub hovered: bool,
    /// Has focus.
    pub focused: bool,
    /// Has keyboard-visible focus.
    pub focus_visible: bool,
    /// Being pressed.
    pub pressed: bool,
    /// Validation state inherited from the form control.
    pub validation: Option<ValidationState>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn derive_maps_every_input() {
        let dataset = DataSet::derive(&DataInputs {
            checked: true,
            pressed: true,
            validation: Some(ValidationState::Invalid),
            ..DataInputs::default()
        });
        assert_eq!(dataset.get("data-checked"), Some(""));
        assert_eq!(dataset.get("data-active"), Some(""));
        assert_eq!(dataset.get("data-invalid"), Some(""));
        assert_eq!(dataset.get("data-valid"), None);
        assert_eq!(dataset.get("data-disabled"), None);
        // Not exposed by item datasets at all.
        assert!(!dataset.keys().contains(DataFlags::EXPANDED));
    }

    #[test]
    fn iter_lists_exposed_keys_in_order() {
        let dataset = DataSet::new(DataFlags::DISABLED | DataFlags::CHECKED)
            .with(DataFlags::DISABLED, true);
        let entries: Vec<_> = dataset.iter().collect();
        assert_eq!(
            entries,
            [("data-checked", None), ("data-disabled", Some(""))]
        );
    }

    #[test]
    fn merge_overrides_shared_keys() {
        let inherited = DataSet::new(DataFlags::DISABLED | DataFlags::VALID)
            .with(DataFlags::DISABLED, true)
            .with(DataFlags::VALID, true);
        let local = DataSet::new(DataFlags::DISABLED | DataFlags::CHECKED)
            .with(DataFlags::CHECKED, true);
        let merged = inherited.merge(local);

        assert!(merged.contains(DataFlags::VALID));
        assert!(merged.contains(DataFlags::CHECKED));
        assert!(!merged.contains(DataFlags::DISABLED));
    }

    #[test]
    fn attribute_names_round_trip() {
        for flag in DataFlags::all().iter() {
            let name = flag.attribute_name().expect("every flag is named");
            assert_eq!(DataFlags::from_attribute_name(name), Some(flag));
        }
        assert_eq!(DataFlags::from_attribute_name("data-open"), None);
    }
}
