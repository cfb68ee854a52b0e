// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press recognition over pointer, mouse and keyboard input.
//!
//! [`PressState`] normalizes the input a pressable control receives into a single
//! idle → pressed → idle machine and reports [`PressEvent`]s for each transition.
//! It owns no callbacks and no signals; callers map the reported events onto
//! whatever notification mechanism they use.
//!
//! ## Usage
//!
//! ```
//! use kurbo::Point;
//! use trellis_event_state::event::{PointerEvent, PointerType};
//! use trellis_event_state::press::{PressEvent, PressModality, PressState};
//!
//! let mut state = PressState::new();
//! let down = PointerEvent::new(PointerType::Mouse, Point::new(5.0, 5.0));
//!
//! let events = state.on_pointer_down(&down);
//! assert_eq!(events.as_slice(), [PressEvent::Start(PressModality::Mouse)]);
//! assert!(state.is_pressed());
//!
//! let events = state.on_pointer_up(&down);
//! assert_eq!(
//!     events.as_slice(),
//!     [
//!         PressEvent::Up(PressModality::Mouse),
//!         PressEvent::End(PressModality::Mouse),
//!         PressEvent::Press(PressModality::Mouse),
//!     ]
//! );
//! assert!(!state.is_pressed());
//! ```
//!
//! ## Press Rules
//!
//! 1. **Start**: primary-button pointer down, mouse down when the host never sent
//!    pointer events, or a non-repeating Enter/Space key down. Ignored while disabled
//!    or while another press is active.
//! 2. **Release**: only the input that started the press ends it (same pointer id,
//!    same key, or the mouse). Releasing over the target reports `Up`, `End` and
//!    `Press`; releasing elsewhere ends silently because `End` was already reported
//!    when the pointer left.
//! 3. **Leaving**: `pointerleave`, or a `pointermove` whose contact no longer overlaps
//!    the target bounds, reports `End` and keeps tracking; coming back reports `Start`
//!    again.
//! 4. **Cancel**: `dragstart`, `pointercancel`, [`PressState::cancel`] or becoming
//!    disabled report `End` without `Press`.
//! 5. **Virtual clicks**: a `click` with no pointer behind it (`detail == 0`) reports
//!    a full `Start`, `Up`, `End`, `Press` sequence, unless it is the click a native
//!    control's host synthesizes right after a keyboard press that already
//!    activated (see [`PressState::set_synthesizes_key_click`]).
//! 6. **Disabled**: every transition is suppressed and clicks have their default
//!    prevented, so a disabled link does not navigate.

use smallvec::SmallVec;

use crate::event::{
    Button, DragEvent, Event, Key, KeyboardEvent, MouseEvent, PointerEvent, PointerId,
    PointerType,
};

/// The input that drives a press.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PressModality {
    /// Mouse pointer or mouse events.
    Mouse,
    /// Stylus.
    Pen,
    /// Touch.
    Touch,
    /// Enter or Space.
    Keyboard,
    /// Assistive technology or a synthesized click.
    Virtual,
}

impl From<PointerType> for PressModality {
    fn from(pointer_type: PointerType) -> Self {
        match pointer_type {
            PointerType::Mouse => Self::Mouse,
            PointerType::Pen => Self::Pen,
            PointerType::Touch => Self::Touch,
        }
    }
}

/// A press transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PressEvent {
    /// The control became pressed.
    Start(PressModality),
    /// The pressing input was released over the control.
    Up(PressModality),
    /// The control stopped being pressed.
    End(PressModality),
    /// The press completed over the control and should activate it.
    Press(PressModality),
}

/// Transitions produced by one input event, in the order they happened.
pub type PressEvents = SmallVec<[PressEvent; 4]>;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Source {
    Pointer(PointerId),
    Mouse,
    Key(Key),
}

/// State for an active press.
#[derive(Clone, Debug)]
pub struct ActivePress {
    /// Input that started the press.
    pub modality: PressModality,
    /// Whether the pointer is currently over the target.
    ///
    /// Always true for keyboard presses.
    pub is_over_target: bool,
    source: Source,
}

/// Press recognition state machine.
#[derive(Clone, Debug)]
pub struct PressState {
    active: Option<ActivePress>,
    disabled: bool,
    /// Set once any pointer event arrives; mouse events are compatibility
    /// duplicates from then on.
    pointer_events_seen: bool,
    /// The host follows a keyboard activation with a detail-0 click.
    synthesizes_key_click: bool,
    /// Swallow the synthesized click that follows a keyboard activation.
    ignore_next_click: bool,
}

impl Default for PressState {
    fn default() -> Self {
        Self {
            active: None,
            disabled: false,
            pointer_events_seen: false,
            synthesizes_key_click: true,
            ignore_next_click: false,
        }
    }
}

impl PressState {
    /// Create an idle, enabled press state for a native control, whose host follows
    /// Enter/Space activation with a synthesized click.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare whether the host synthesizes a click after a keyboard activation.
    ///
    /// True for native buttons, links and inputs. Elements acting as controls
    /// (`span`, `div`) get no such click, so a later virtual click is a real
    /// activation and must not be swallowed.
    pub fn set_synthesizes_key_click(&mut self, synthesizes: bool) {
        self.synthesizes_key_click = synthesizes;
        if !synthesizes {
            self.ignore_next_click = false;
        }
    }

    /// Whether the host synthesizes a click after a keyboard activation.
    pub fn synthesizes_key_click(&self) -> bool {
        self.synthesizes_key_click
    }

    /// Whether a press is active and over the target.
    pub fn is_pressed(&self) -> bool {
        self.active.as_ref().is_some_and(|press| press.is_over_target)
    }

    /// The active press, pressed or not.
    pub fn active(&self) -> Option<&ActivePress> {
        self.active.as_ref()
    }

    /// Whether transitions are currently suppressed.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Update the disabled flag. Becoming disabled cancels an active press.
    pub fn set_disabled(&mut self, disabled: bool) -> PressEvents {
        self.disabled = disabled;
        if disabled {
            self.cancel()
        } else {
            PressEvents::new()
        }
    }

    /// Record a pointer down event.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> PressEvents {
        self.pointer_events_seen = true;
        if self.disabled || event.button != Button::Primary || self.active.is_some() {
            return PressEvents::new();
        }
        let modality = PressModality::from(event.pointer_type);
        tracing::trace!(?modality, pointer_id = event.pointer_id.get(), "press start");
        self.active = Some(ActivePress {
            modality,
            is_over_target: true,
            source: Source::Pointer(event.pointer_id),
        });
        self.ignore_next_click = false;
        smallvec::smallvec![PressEvent::Start(modality)]
    }

    /// Record a pointer move; only meaningful when the event carries target bounds.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> PressEvents {
        self.pointer_events_seen = true;
        let Some(bounds) = event.target_bounds else {
            return PressEvents::new();
        };
        let over = event.is_over(bounds);
        self.set_over_target(Source::Pointer(event.pointer_id), over)
    }

    /// Record the pointer entering the target.
    pub fn on_pointer_enter(&mut self, event: &PointerEvent) -> PressEvents {
        self.pointer_events_seen = true;
        self.set_over_target(Source::Pointer(event.pointer_id), true)
    }

    /// Record the pointer leaving the target.
    pub fn on_pointer_leave(&mut self, event: &PointerEvent) -> PressEvents {
        self.pointer_events_seen = true;
        self.set_over_target(Source::Pointer(event.pointer_id), false)
    }

    /// Record a pointer up event.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> PressEvents {
        self.pointer_events_seen = true;
        if event.button != Button::Primary {
            return PressEvents::new();
        }
        let over = event.target_bounds.map(|bounds| event.is_over(bounds));
        self.release(Source::Pointer(event.pointer_id), over)
    }

    /// Record a pointer cancel event.
    pub fn on_pointer_cancel(&mut self, event: &PointerEvent) -> PressEvents {
        match &self.active {
            Some(press) if press.source == Source::Pointer(event.pointer_id) => self.cancel(),
            _ => PressEvents::new(),
        }
    }

    /// Record a mouse down event.
    ///
    /// Hosts that deliver pointer events also deliver compatibility mouse events;
    /// those never start a press.
    pub fn on_mouse_down(&mut self, event: &MouseEvent) -> PressEvents {
        if self.pointer_events_seen
            || self.disabled
            || event.button != Button::Primary
            || self.active.is_some()
        {
            return PressEvents::new();
        }
        tracing::trace!("press start (mouse events)");
        self.active = Some(ActivePress {
            modality: PressModality::Mouse,
            is_over_target: true,
            source: Source::Mouse,
        });
        self.ignore_next_click = false;
        smallvec::smallvec![PressEvent::Start(PressModality::Mouse)]
    }

    /// Record a mouse up event.
    pub fn on_mouse_up(&mut self, event: &MouseEvent) -> PressEvents {
        if event.button != Button::Primary {
            return PressEvents::new();
        }
        self.release(Source::Mouse, None)
    }

    /// Record a key down event.
    ///
    /// Prevents the default action of Space so the page does not scroll.
    pub fn on_key_down(&mut self, event: &mut KeyboardEvent) -> PressEvents {
        if self.disabled || !event.key.is_press_key() {
            return PressEvents::new();
        }
        if event.key == Key::Space {
            event.prevent_default();
        }
        if event.repeat || self.active.is_some() {
            return PressEvents::new();
        }
        tracing::trace!(key = ?event.key, "press start (keyboard)");
        self.active = Some(ActivePress {
            modality: PressModality::Keyboard,
            is_over_target: true,
            source: Source::Key(event.key),
        });
        self.ignore_next_click = false;
        smallvec::smallvec![PressEvent::Start(PressModality::Keyboard)]
    }

    /// Record a key up event.
    pub fn on_key_up(&mut self, event: &mut KeyboardEvent) -> PressEvents {
        if !event.key.is_press_key() {
            return PressEvents::new();
        }
        let is_ours = matches!(
            &self.active,
            Some(press) if press.source == Source::Key(event.key)
        );
        if !is_ours {
            return PressEvents::new();
        }
        if event.key == Key::Space {
            event.prevent_default();
        }
        self.release(Source::Key(event.key), None)
    }

    /// Record a click event.
    pub fn on_click(&mut self, event: &mut MouseEvent) -> PressEvents {
        if self.disabled {
            event.prevent_default();
            return PressEvents::new();
        }
        if core::mem::take(&mut self.ignore_next_click) {
            return PressEvents::new();
        }
        if !event.is_virtual() || self.active.is_some() {
            return PressEvents::new();
        }
        tracing::trace!("virtual press");
        let modality = PressModality::Virtual;
        smallvec::smallvec![
            PressEvent::Start(modality),
            PressEvent::Up(modality),
            PressEvent::End(modality),
            PressEvent::Press(modality),
        ]
    }

    /// Record a drag start; dragging cancels the press.
    pub fn on_drag_start(&mut self, _event: &mut DragEvent) -> PressEvents {
        self.cancel()
    }

    /// Cancel the active press without activating.
    pub fn cancel(&mut self) -> PressEvents {
        match self.active.take() {
            Some(press) if press.is_over_target => {
                tracing::trace!(modality = ?press.modality, "press canceled");
                smallvec::smallvec![PressEvent::End(press.modality)]
            }
            _ => PressEvents::new(),
        }
    }

    fn set_over_target(&mut self, source: Source, over: bool) -> PressEvents {
        let Some(press) = self.active.as_mut() else {
            return PressEvents::new();
        };
        if press.source != source || press.is_over_target == over {
            return PressEvents::new();
        }
        press.is_over_target = over;
        tracing::trace!(over, "press target crossing");
        if over {
            smallvec::smallvec![PressEvent::Start(press.modality)]
        } else {
            smallvec::smallvec![PressEvent::End(press.modality)]
        }
    }

    /// End the press started by `source`. `over` overrides the tracked target state.
    fn release(&mut self, source: Source, over: Option<bool>) -> PressEvents {
        let press = match self.active.take() {
            Some(press) if press.source == source => press,
            other => {
                self.active = other;
                return PressEvents::new();
            }
        };
        let was_pressed = press.is_over_target;
        let released_over = over.unwrap_or(was_pressed);
        let modality = press.modality;

        let mut events = PressEvents::new();
        if released_over {
            events.push(PressEvent::Up(modality));
        }
        if was_pressed {
            events.push(PressEvent::End(modality));
        }
        if released_over && was_pressed {
            tracing::trace!(?modality, "press activated");
            events.push(PressEvent::Press(modality));
            // Pointer-driven clicks carry a non-zero detail and never start a
            // virtual press, so only keyboard activations need the guard.
            self.ignore_next_click =
                modality == PressModality::Keyboard && self.synthesizes_key_click;
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Modifiers, PointerType};
    use core::num::NonZeroU64;
    use kurbo::{Point, Rect};

    fn mouse(x: f64, y: f64) -> PointerEvent {
        PointerEvent::new(PointerType::Mouse, Point::new(x, y))
    }

    #[test]
    fn pointer_press_and_release_activates() {
        let mut state = PressState::new();
        assert!(!state.is_pressed());

        state.on_pointer_down(&mouse(1.0, 1.0));
        assert!(state.is_pressed());

        let events = state.on_pointer_up(&mouse(1.0, 1.0));
        assert_eq!(
            events.as_slice(),
            [
                PressEvent::Up(PressModality::Mouse),
                PressEvent::End(PressModality::Mouse),
                PressEvent::Press(PressModality::Mouse),
            ]
        );
        assert!(!state.is_pressed());
    }

    #[test]
    fn disabled_never_presses() {
        let mut state = PressState::new();
        let _ = state.set_disabled(true);

        assert!(state.on_pointer_down(&mouse(1.0, 1.0)).is_empty());
        assert!(!state.is_pressed());
        assert!(
            state
                .on_key_down(&mut KeyboardEvent::new(Key::Enter))
                .is_empty()
        );
        assert!(!state.is_pressed());
        assert!(state.on_pointer_up(&mouse(1.0, 1.0)).is_empty());
    }

    #[test]
    fn disabled_click_prevents_default() {
        let mut state = PressState::new();
        let _ = state.set_disabled(true);
        let mut click = MouseEvent::new(Point::ZERO);
        assert!(state.on_click(&mut click).is_empty());
        assert!(click.is_default_prevented());
    }

    #[test]
    fn becoming_disabled_resets_press() {
        let mut state = PressState::new();
        state.on_pointer_down(&mouse(1.0, 1.0));
        assert!(state.is_pressed());

        let events = state.set_disabled(true);
        assert_eq!(events.as_slice(), [PressEvent::End(PressModality::Mouse)]);
        assert!(!state.is_pressed());
        assert!(state.active().is_none());

        // The release that follows is not an activation.
        assert!(state.on_pointer_up(&mouse(1.0, 1.0)).is_empty());
    }

    #[test]
    fn secondary_button_is_ignored() {
        let mut state = PressState::new();
        let events = state.on_pointer_down(&mouse(1.0, 1.0).with_button(Button::Secondary));
        assert!(events.is_empty());
        assert!(!state.is_pressed());
    }

    #[test]
    fn only_initiating_pointer_releases() {
        let mut state = PressState::new();
        let first = NonZeroU64::new(1).unwrap();
        let second = NonZeroU64::new(2).unwrap();

        state.on_pointer_down(&mouse(1.0, 1.0).with_pointer_id(first));
        // A second finger neither starts nor ends the press.
        assert!(
            state
                .on_pointer_down(&mouse(2.0, 2.0).with_pointer_id(second))
                .is_empty()
        );
        assert!(
            state
                .on_pointer_up(&mouse(2.0, 2.0).with_pointer_id(second))
                .is_empty()
        );
        assert!(state.is_pressed());

        let events = state.on_pointer_up(&mouse(1.0, 1.0).with_pointer_id(first));
        assert!(events.contains(&PressEvent::Press(PressModality::Mouse)));
    }

    #[test]
    fn leaving_ends_and_reentering_restarts() {
        let mut state = PressState::new();
        state.on_pointer_down(&mouse(1.0, 1.0));

        let events = state.on_pointer_leave(&mouse(20.0, 1.0));
        assert_eq!(events.as_slice(), [PressEvent::End(PressModality::Mouse)]);
        assert!(!state.is_pressed());

        let events = state.on_pointer_enter(&mouse(1.0, 1.0));
        assert_eq!(events.as_slice(), [PressEvent::Start(PressModality::Mouse)]);
        assert!(state.is_pressed());
    }

    #[test]
    fn release_outside_does_not_activate() {
        let mut state = PressState::new();
        state.on_pointer_down(&mouse(1.0, 1.0));
        state.on_pointer_leave(&mouse(20.0, 1.0));

        let events = state.on_pointer_up(&mouse(20.0, 1.0));
        assert!(events.is_empty());
        assert!(state.active().is_none());
    }

    #[test]
    fn moving_out_of_bounds_ends_press() {
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);
        let mut state = PressState::new();
        state.on_pointer_down(&mouse(5.0, 5.0).with_target_bounds(bounds));

        // Still inside: nothing happens.
        assert!(
            state
                .on_pointer_move(&mouse(9.0, 9.0).with_target_bounds(bounds))
                .is_empty()
        );

        let events = state.on_pointer_move(&mouse(15.0, 5.0).with_target_bounds(bounds));
        assert_eq!(events.as_slice(), [PressEvent::End(PressModality::Mouse)]);

        let events = state.on_pointer_move(&mouse(5.0, 5.0).with_target_bounds(bounds));
        assert_eq!(events.as_slice(), [PressEvent::Start(PressModality::Mouse)]);

        // Released outside the bounds even though the last move was inside.
        let events = state.on_pointer_up(&mouse(15.0, 5.0).with_target_bounds(bounds));
        assert_eq!(events.as_slice(), [PressEvent::End(PressModality::Mouse)]);
    }

    #[test]
    fn keyboard_press_with_matching_key() {
        let mut state = PressState::new();
        let mut down = KeyboardEvent::new(Key::Space);
        let events = state.on_key_down(&mut down);
        assert_eq!(events.as_slice(), [PressEvent::Start(PressModality::Keyboard)]);
        assert!(down.is_default_prevented());

        // Repeats keep the press but do not restart it.
        let mut repeat = KeyboardEvent::new(Key::Space).repeated();
        assert!(state.on_key_down(&mut repeat).is_empty());
        assert!(state.is_pressed());

        // Enter up does not release a Space press.
        assert!(state.on_key_up(&mut KeyboardEvent::new(Key::Enter)).is_empty());
        assert!(state.is_pressed());

        let events = state.on_key_up(&mut KeyboardEvent::new(Key::Space));
        assert_eq!(
            events.last(),
            Some(&PressEvent::Press(PressModality::Keyboard))
        );
        assert!(!state.is_pressed());
    }

    #[test]
    fn non_press_keys_are_ignored() {
        let mut state = PressState::new();
        let mut tab = KeyboardEvent::new(Key::Tab).with_modifiers(Modifiers::SHIFT);
        assert!(state.on_key_down(&mut tab).is_empty());
        assert!(!tab.is_default_prevented());
    }

    #[test]
    fn click_after_activation_is_swallowed() {
        let mut state = PressState::new();
        state.on_key_down(&mut KeyboardEvent::new(Key::Enter));
        state.on_key_up(&mut KeyboardEvent::new(Key::Enter));

        // Native buttons synthesize a detail-0 click after Enter.
        assert!(state.on_click(&mut MouseEvent::virtual_click()).is_empty());
        // The next one is a genuine virtual click.
        let events = state.on_click(&mut MouseEvent::virtual_click());
        assert_eq!(events.len(), 4);
        assert_eq!(events[3], PressEvent::Press(PressModality::Virtual));
        assert!(!state.is_pressed());
    }

    #[test]
    fn virtual_click_after_key_press_on_non_native_element() {
        let mut state = PressState::new();
        state.set_synthesizes_key_click(false);
        state.on_key_down(&mut KeyboardEvent::new(Key::Enter));
        let events = state.on_key_up(&mut KeyboardEvent::new(Key::Enter));
        assert_eq!(events.last(), Some(&PressEvent::Press(PressModality::Keyboard)));

        // No click follows on a span; a screen reader activation still counts.
        let events = state.on_click(&mut MouseEvent::virtual_click());
        assert_eq!(events.last(), Some(&PressEvent::Press(PressModality::Virtual)));
    }

    #[test]
    fn pointer_press_leaves_later_virtual_click_alone() {
        let mut state = PressState::new();
        state.on_pointer_down(&mouse(1.0, 1.0));
        state.on_pointer_up(&mouse(1.0, 1.0));
        // The host's own click never arrived.
        let events = state.on_click(&mut MouseEvent::virtual_click());
        assert_eq!(events.last(), Some(&PressEvent::Press(PressModality::Virtual)));
    }

    #[test]
    fn pointer_click_does_not_double_activate() {
        let mut state = PressState::new();
        state.on_pointer_down(&mouse(1.0, 1.0));
        state.on_pointer_up(&mouse(1.0, 1.0));
        assert!(state.on_click(&mut MouseEvent::new(Point::new(1.0, 1.0))).is_empty());
    }

    #[test]
    fn drag_start_cancels() {
        let mut state = PressState::new();
        state.on_pointer_down(&mouse(1.0, 1.0));
        let events = state.on_drag_start(&mut DragEvent::new());
        assert_eq!(events.as_slice(), [PressEvent::End(PressModality::Mouse)]);
        assert!(state.on_pointer_up(&mouse(1.0, 1.0)).is_empty());
    }

    #[test]
    fn pointer_cancel_cancels_matching_pointer() {
        let mut state = PressState::new();
        let touch = PointerEvent::new(PointerType::Touch, Point::new(1.0, 1.0));
        state.on_pointer_down(&touch);
        let events = state.on_pointer_cancel(&touch);
        assert_eq!(events.as_slice(), [PressEvent::End(PressModality::Touch)]);
    }

    #[test]
    fn mouse_events_drive_press_without_pointer_events() {
        let mut state = PressState::new();
        let down = MouseEvent::new(Point::new(1.0, 1.0));
        assert_eq!(
            state.on_mouse_down(&down).as_slice(),
            [PressEvent::Start(PressModality::Mouse)]
        );
        let events = state.on_mouse_up(&down);
        assert!(events.contains(&PressEvent::Press(PressModality::Mouse)));
    }

    #[test]
    fn compatibility_mouse_events_are_ignored() {
        let mut state = PressState::new();
        let touch = PointerEvent::new(PointerType::Touch, Point::new(1.0, 1.0));
        state.on_pointer_down(&touch);
        state.on_pointer_up(&touch);

        // Browsers replay touches as mouse events afterwards.
        let compat = MouseEvent::new(Point::new(1.0, 1.0));
        assert!(state.on_mouse_down(&compat).is_empty());
        assert!(state.on_mouse_up(&compat).is_empty());
        assert!(!state.is_pressed());
    }
}
