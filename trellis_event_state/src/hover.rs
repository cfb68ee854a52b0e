// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking.
//!
//! [`HoverState`] follows pointer enter/leave on a single control. Touch contacts
//! never hover: a finger that lands on a control has no "about to press" phase, and
//! browsers fire enter/leave around every tap, so honoring them would leave controls
//! stuck in a hovered look after the finger lifts.

use crate::event::{PointerEvent, PointerType};

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HoverEvent {
    /// A pointer started hovering the control.
    Start(PointerType),
    /// The hovering pointer left, or hovering was suppressed.
    End(PointerType),
}

/// Hover state machine for one control.
#[derive(Clone, Debug, Default)]
pub struct HoverState {
    hovered_by: Option<PointerType>,
    disabled: bool,
}

impl HoverState {
    /// Create an unhovered, enabled hover state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a pointer is hovering the control.
    pub fn is_hovered(&self) -> bool {
        self.hovered_by.is_some()
    }

    /// Update the disabled flag. Becoming disabled ends any hover.
    pub fn set_disabled(&mut self, disabled: bool) -> Option<HoverEvent> {
        self.disabled = disabled;
        if disabled {
            self.hovered_by.take().map(HoverEvent::End)
        } else {
            None
        }
    }

    /// Record a pointer entering the control.
    pub fn on_pointer_enter(&mut self, event: &PointerEvent) -> Option<HoverEvent> {
        if self.disabled || event.pointer_type == PointerType::Touch || self.hovered_by.is_some() {
            return None;
        }
        tracing::trace!(pointer_type = ?event.pointer_type, "hover start");
        self.hovered_by = Some(event.pointer_type);
        Some(HoverEvent::Start(event.pointer_type))
    }

    /// Record a pointer leaving the control.
    pub fn on_pointer_leave(&mut self, event: &PointerEvent) -> Option<HoverEvent> {
        if event.pointer_type == PointerType::Touch {
            return None;
        }
        let pointer_type = self.hovered_by.take()?;
        tracing::trace!(?pointer_type, "hover end");
        Some(HoverEvent::End(pointer_type))
    }
}
