// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Errors reported by component constructors and group operations.
///
/// Interaction handling itself never fails; these only cover caller mistakes that
/// can be detected at run time.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// An `as_` tag name that is not a valid HTML element name.
    #[error("`{0}` is not a valid element tag name")]
    InvalidElement(String),
    /// Two items of one group share a value.
    #[error("an item with value `{0}` is already registered in this group")]
    DuplicateValue(String),
    /// Selecting a value no item of the group registered.
    #[error("no item with value `{0}` is registered in this group")]
    UnknownValue(String),
}
