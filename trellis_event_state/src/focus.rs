// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus and focus-visible tracking.
//!
//! A control shows a focus ring only when the user is navigating with the keyboard.
//! [`FocusState`] records whether the control has focus and whether that focus
//! should be visible, based on how focus arrived and on the input that followed.

use crate::event::{FocusEvent, FocusModality, Key, KeyboardEvent, Modifiers};

/// Focus state of one control.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FocusState {
    focused: bool,
    focus_visible: bool,
}

impl FocusState {
    /// Create an unfocused state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the control has focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the control has focus that should be indicated.
    pub fn is_focus_visible(&self) -> bool {
        self.focus_visible
    }

    /// Record the control receiving focus.
    pub fn on_focus(&mut self, event: &FocusEvent) {
        self.focused = true;
        self.focus_visible = matches!(
            event.modality,
            FocusModality::Keyboard | FocusModality::Virtual
        );
        tracing::trace!(modality = ?event.modality, visible = self.focus_visible, "focus");
    }

    /// Record the control losing focus.
    pub fn on_blur(&mut self) {
        self.focused = false;
        self.focus_visible = false;
        tracing::trace!("blur");
    }

    /// Record a key press while focused.
    ///
    /// Any key other than a shortcut chord switches to keyboard modality, so a control
    /// focused by mouse shows its ring once the user starts typing or navigating.
    pub fn on_key_down(&mut self, event: &KeyboardEvent) {
        if !self.focused || event.key == Key::Other {
            return;
        }
        let chord = event
            .modifiers
            .intersects(Modifiers::CONTROL | Modifiers::META | Modifiers::ALT);
        if !chord {
            self.focus_visible = true;
        }
    }

    /// Record a pointer press while focused; pointer modality hides the ring.
    pub fn on_pointer_down(&mut self) {
        self.focus_visible = false;
    }
}
