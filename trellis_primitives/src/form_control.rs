// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared form-field state.
//!
//! A [`FormControl`] holds what every form field exposes to its parts: a base id,
//! the disabled/required/read-only/validation signals, and the ids of the label,
//! description and error message parts once they register.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use trellis_state::{Derived, GenerateId, IdRegistration, RegisterId, Signal};

use crate::dataset::{DataFlags, DataSet};

/// Validation outcome of a form field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValidationState {
    /// The value passed validation.
    Valid,
    /// The value failed validation.
    Invalid,
}

/// Initial form-control configuration.
#[derive(Clone, Debug, Default)]
pub struct FormControlOptions {
    /// Base id. Defaults to a generated unique id.
    pub id: Option<String>,
    /// Validation state; `None` means not validated.
    pub validation_state: Option<ValidationState>,
    /// The field must have a value before submission.
    pub is_required: bool,
    /// The field does not accept interaction.
    pub is_disabled: bool,
    /// The field can be focused but not changed.
    pub is_read_only: bool,
}

/// State shared by the parts of a form field.
#[derive(Clone, Debug)]
pub struct FormControl {
    id: String,
    generate_id: GenerateId,
    is_disabled: Signal<bool>,
    is_required: Signal<bool>,
    is_read_only: Signal<bool>,
    validation_state: Signal<Option<ValidationState>>,
    label_id: Signal<Option<String>>,
    description_id: Signal<Option<String>>,
    error_message_id: Signal<Option<String>>,
}

impl FormControl {
    /// Build form-control state; `id_prefix` names the generated default id.
    pub fn new(options: FormControlOptions, id_prefix: &str) -> Self {
        let id = options
            .id
            .unwrap_or_else(|| format!("{id_prefix}-{}", trellis_state::unique_id()));
        Self {
            generate_id: GenerateId::fixed(id.clone()),
            id,
            is_disabled: Signal::new(options.is_disabled),
            is_required: Signal::new(options.is_required),
            is_read_only: Signal::new(options.is_read_only),
            validation_state: Signal::new(options.validation_state),
            label_id: Signal::new(None),
            description_id: Signal::new(None),
            error_message_id: Signal::new(None),
        }
    }

    /// The base id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The id of `part`, scoped to the base id.
    pub fn generate_id(&self, part: &str) -> String {
        self.generate_id.generate(part)
    }

    /// Whether the field is disabled.
    pub fn is_disabled(&self) -> bool {
        self.is_disabled.get()
    }

    /// Change the disabled flag.
    pub fn set_disabled(&self, disabled: bool) {
        self.is_disabled.set(disabled);
    }

    /// The disabled flag as a read-only accessor.
    pub fn disabled(&self) -> Derived<bool> {
        self.is_disabled.read_only()
    }

    /// Whether the field is required.
    pub fn is_required(&self) -> bool {
        self.is_required.get()
    }

    /// Change the required flag.
    pub fn set_required(&self, required: bool) {
        self.is_required.set(required);
    }

    /// Whether the field is read-only.
    pub fn is_read_only(&self) -> bool {
        self.is_read_only.get()
    }

    /// Change the read-only flag.
    pub fn set_read_only(&self, read_only: bool) {
        self.is_read_only.set(read_only);
    }

    /// The validation state.
    pub fn validation_state(&self) -> Option<ValidationState> {
        self.validation_state.get()
    }

    /// Change the validation state.
    pub fn set_validation_state(&self, state: Option<ValidationState>) {
        self.validation_state.set(state);
    }

    /// The validation state as a read-only accessor.
    pub fn validation(&self) -> Derived<Option<ValidationState>> {
        self.validation_state.read_only()
    }

    /// Whether the field is invalid.
    pub fn is_invalid(&self) -> bool {
        self.validation_state() == Some(ValidationState::Invalid)
    }

    /// Publish the label part's id.
    pub fn register_label(&self, id: impl Into<String>) -> IdRegistration {
        RegisterId::new(self.label_id.clone()).register(id)
    }

    /// Publish the description part's id.
    pub fn register_description(&self, id: impl Into<String>) -> IdRegistration {
        RegisterId::new(self.description_id.clone()).register(id)
    }

    /// Publish the error message part's id.
    pub fn register_error_message(&self, id: impl Into<String>) -> IdRegistration {
        RegisterId::new(self.error_message_id.clone()).register(id)
    }

    /// The registered label id.
    pub fn label_id(&self) -> Option<String> {
        self.label_id.get()
    }

    /// `aria-describedby` for the field: the description, then the error message
    /// while invalid.
    pub fn aria_described_by(&self) -> Option<String> {
        let mut ids: Vec<String> = Vec::new();
        ids.extend(self.description_id.get());
        if self.is_invalid() {
            ids.extend(self.error_message_id.get());
        }
        (!ids.is_empty()).then(|| ids.join(" "))
    }

    /// Field-level dataset: valid, invalid, required, disabled, readonly.
    pub fn dataset(&self) -> Derived<DataSet> {
        let this = self.clone();
        Derived::new(
            [
                self.is_disabled.trigger(),
                self.is_required.trigger(),
                self.is_read_only.trigger(),
                self.validation_state.trigger(),
            ],
            move || {
                let validation = this.validation_state();
                DataSet::new(DataFlags::empty())
                    .with(DataFlags::VALID, validation == Some(ValidationState::Valid))
                    .with(DataFlags::INVALID, validation == Some(ValidationState::Invalid))
                    .with(DataFlags::REQUIRED, this.is_required())
                    .with(DataFlags::DISABLED, this.is_disabled())
                    .with(DataFlags::READONLY, this.is_read_only())
            },
        )
    }
}
