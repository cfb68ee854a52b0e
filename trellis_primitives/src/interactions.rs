// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction hooks.
//!
//! The state machines in [`trellis_event_state`] are pure: they consume an event and
//! report transitions. The hooks here own one machine each, publish its state as a
//! signal, fire the caller's callbacks for every transition, and hand out the
//! [`EventHandlers`] a component composes into its rendered element.
//!
//! Configuration that may change over time (`is_disabled`,
//! `prevent_focus_on_press`) is passed as a [`Derived`] and read when an event
//! arrives, so a handler never acts on a stale value. Press and hover hooks also
//! subscribe to `is_disabled` and reset as soon as it turns true.

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::fmt;

use trellis_event_state::event::{
    Button, DragEvent, Event, FocusEvent, FocusModality, KeyboardEvent, MouseEvent,
    PointerEvent, PointerType,
};
use trellis_event_state::focus::FocusState;
use trellis_event_state::handlers::EventHandlers;
use trellis_event_state::hover::{HoverEvent, HoverState};
use trellis_event_state::press::{PressEvent, PressEvents, PressModality, PressState};
use trellis_state::{Derived, Signal, Subscription, Trigger};

use crate::polymorphic::ElementKind;

/// A shared callback.
pub type Callback<T> = Rc<dyn Fn(T)>;

/// Configuration of a [`PressInteraction`].
#[derive(Clone, Default)]
pub struct PressOptions {
    /// Suppresses presses; turning true cancels an active press. Defaults to false.
    pub is_disabled: Derived<bool>,
    /// Leave focus alone on pointer press and prevent the `mousedown` default that
    /// would move it. Defaults to false.
    pub prevent_focus_on_press: Derived<bool>,
    /// Focus state of the control, focused on pointer press.
    pub focus: Option<FocusInteraction>,
    /// The element the handlers are attached to. Native controls get a click from
    /// the host after a keyboard press, which must not activate twice; other
    /// elements do not. Defaults to a native control.
    pub element: Option<ElementKind>,
    /// A press started, or the pointer re-entered the target.
    pub on_press_start: Option<Callback<PressModality>>,
    /// A press ended, was canceled, or the pointer left the target.
    pub on_press_end: Option<Callback<PressModality>>,
    /// The press was released over the target.
    pub on_press_up: Option<Callback<PressModality>>,
    /// The press completed and activated the control.
    pub on_press: Option<Callback<PressModality>>,
    /// The pressed state changed.
    pub on_press_change: Option<Callback<bool>>,
}

impl PressOptions {
    /// Set [`on_press`](Self::on_press).
    pub fn on_press(mut self, f: impl Fn(PressModality) + 'static) -> Self {
        self.on_press = Some(Rc::new(f));
        self
    }

    /// Set [`on_press_start`](Self::on_press_start).
    pub fn on_press_start(mut self, f: impl Fn(PressModality) + 'static) -> Self {
        self.on_press_start = Some(Rc::new(f));
        self
    }

    /// Set [`on_press_end`](Self::on_press_end).
    pub fn on_press_end(mut self, f: impl Fn(PressModality) + 'static) -> Self {
        self.on_press_end = Some(Rc::new(f));
        self
    }

    /// Set [`on_press_up`](Self::on_press_up).
    pub fn on_press_up(mut self, f: impl Fn(PressModality) + 'static) -> Self {
        self.on_press_up = Some(Rc::new(f));
        self
    }

    /// Set [`on_press_change`](Self::on_press_change).
    pub fn on_press_change(mut self, f: impl Fn(bool) + 'static) -> Self {
        self.on_press_change = Some(Rc::new(f));
        self
    }
}

impl fmt::Debug for PressOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressOptions")
            .field("is_disabled", &self.is_disabled.get())
            .field("prevent_focus_on_press", &self.prevent_focus_on_press.get())
            .field("focus", &self.focus)
            .field("element", &self.element)
            .finish_non_exhaustive()
    }
}

/// Press tracking for one control.
///
/// Cloning yields another handle to the same press state.
#[derive(Clone)]
pub struct PressInteraction {
    inner: Rc<PressInner>,
}

struct PressInner {
    state: RefCell<PressState>,
    is_pressed: Signal<bool>,
    options: PressOptions,
    _disabled: Subscription,
}

impl PressInteraction {
    /// Create a press hook.
    pub fn new(options: PressOptions) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<PressInner>| {
            let weak = weak.clone();
            let disabled = options.is_disabled.subscribe(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.sync_disabled();
                }
            });
            let mut state = PressState::new();
            // Nothing can be active yet, so there are no transitions to report.
            let _ = state.set_disabled(options.is_disabled.get());
            if let Some(kind) = &options.element {
                state.set_synthesizes_key_click(kind.synthesizes_key_click());
            }
            PressInner {
                state: RefCell::new(state),
                is_pressed: Signal::new(false),
                options,
                _disabled: disabled,
            }
        });
        Self { inner }
    }

    /// Whether the control is pressed.
    pub fn is_pressed(&self) -> bool {
        self.inner.is_pressed.get()
    }

    /// The pressed state as a read-only accessor.
    pub fn pressed(&self) -> Derived<bool> {
        self.inner.is_pressed.read_only()
    }

    /// The trigger notified when the pressed state changes.
    pub fn trigger(&self) -> Trigger {
        self.inner.is_pressed.trigger()
    }

    /// Cancel any active press without activating.
    pub fn cancel(&self) {
        let events = self.inner.state.borrow_mut().cancel();
        self.inner.emit(&events);
    }

    /// Handlers for every event press recognition consumes.
    pub fn handlers(&self) -> EventHandlers {
        EventHandlers::new()
            .on_pointer_down(self.handler(|inner, e: &mut PointerEvent| inner.pointer_down(e)))
            .on_pointer_move(self.handler(|inner, e: &mut PointerEvent| {
                inner.run(|s| s.on_pointer_move(e));
            }))
            .on_pointer_enter(self.handler(|inner, e: &mut PointerEvent| {
                inner.run(|s| s.on_pointer_enter(e));
            }))
            .on_pointer_leave(self.handler(|inner, e: &mut PointerEvent| {
                inner.run(|s| s.on_pointer_leave(e));
            }))
            .on_pointer_up(self.handler(|inner, e: &mut PointerEvent| {
                inner.run(|s| s.on_pointer_up(e));
            }))
            .on_pointer_cancel(self.handler(|inner, e: &mut PointerEvent| {
                inner.run(|s| s.on_pointer_cancel(e));
            }))
            .on_mouse_down(self.handler(|inner, e: &mut MouseEvent| inner.mouse_down(e)))
            .on_mouse_up(self.handler(|inner, e: &mut MouseEvent| {
                inner.run(|s| s.on_mouse_up(e));
            }))
            .on_key_down(self.handler(|inner, e: &mut KeyboardEvent| {
                inner.run(|s| s.on_key_down(e));
            }))
            .on_key_up(self.handler(|inner, e: &mut KeyboardEvent| {
                inner.run(|s| s.on_key_up(e));
            }))
            .on_click(self.handler(|inner, e: &mut MouseEvent| inner.run(|s| s.on_click(e))))
            .on_drag_start(self.handler(|inner, e: &mut DragEvent| {
                inner.run(|s| s.on_drag_start(e));
            }))
    }

    fn handler<E: 'static>(
        &self,
        f: impl Fn(&PressInner, &mut E) + 'static,
    ) -> impl FnMut(&mut E) + 'static {
        let inner = self.inner.clone();
        move |event: &mut E| f(&*inner, event)
    }
}

impl fmt::Debug for PressInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PressInteraction")
            .field("is_pressed", &self.is_pressed())
            .finish_non_exhaustive()
    }
}

impl PressInner {
    /// Apply the current disabled value, then feed the machine.
    fn run(&self, f: impl FnOnce(&mut PressState) -> PressEvents) {
        self.sync_disabled();
        let events = f(&mut *self.state.borrow_mut());
        self.emit(&events);
    }

    fn pointer_down(&self, event: &mut PointerEvent) {
        self.sync_disabled();
        // Read before focusing: the answer may depend on the focus state.
        let prevent_focus = self.options.prevent_focus_on_press.get();
        let events = self.state.borrow_mut().on_pointer_down(event);
        self.focus_on_start(&events, prevent_focus);
        self.emit(&events);
    }

    fn mouse_down(&self, event: &mut MouseEvent) {
        self.sync_disabled();
        let prevent_focus = self.options.prevent_focus_on_press.get();
        let disabled = self.state.borrow().is_disabled();
        if prevent_focus && !disabled && event.button == Button::Primary {
            event.prevent_default();
        }
        let events = self.state.borrow_mut().on_mouse_down(event);
        self.focus_on_start(&events, prevent_focus);
        self.emit(&events);
    }

    fn focus_on_start(&self, events: &[PressEvent], prevent_focus: bool) {
        let started = events.iter().any(|e| matches!(e, PressEvent::Start(_)));
        if !started || prevent_focus {
            return;
        }
        if let Some(focus) = &self.options.focus {
            focus.focus(FocusModality::Pointer);
        }
    }

    fn sync_disabled(&self) {
        let disabled = self.options.is_disabled.get();
        let events = {
            let mut state = self.state.borrow_mut();
            if state.is_disabled() == disabled {
                return;
            }
            state.set_disabled(disabled)
        };
        tracing::debug!(disabled, "press disabled state changed");
        self.emit(&events);
    }

    /// Publish transitions. Must be called with the machine unborrowed, since
    /// callbacks may write signals that feed back into this hook.
    fn emit(&self, events: &[PressEvent]) {
        let options = &self.options;
        for event in events {
            match *event {
                PressEvent::Start(modality) => {
                    self.is_pressed.set(true);
                    if let Some(cb) = &options.on_press_start {
                        cb(modality);
                    }
                    if let Some(cb) = &options.on_press_change {
                        cb(true);
                    }
                }
                PressEvent::Up(modality) => {
                    if let Some(cb) = &options.on_press_up {
                        cb(modality);
                    }
                }
                PressEvent::End(modality) => {
                    self.is_pressed.set(false);
                    if let Some(cb) = &options.on_press_end {
                        cb(modality);
                    }
                    if let Some(cb) = &options.on_press_change {
                        cb(false);
                    }
                }
                PressEvent::Press(modality) => {
                    if let Some(cb) = &options.on_press {
                        cb(modality);
                    }
                }
            }
        }
    }
}

/// Configuration of a [`HoverInteraction`].
#[derive(Clone, Default)]
pub struct HoverOptions {
    /// Suppresses hover; turning true ends any hover. Defaults to false.
    pub is_disabled: Derived<bool>,
    /// A pointer started hovering.
    pub on_hover_start: Option<Callback<PointerType>>,
    /// Hovering ended.
    pub on_hover_end: Option<Callback<PointerType>>,
    /// The hovered state changed.
    pub on_hover_change: Option<Callback<bool>>,
}

impl fmt::Debug for HoverOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverOptions")
            .field("is_disabled", &self.is_disabled.get())
            .finish_non_exhaustive()
    }
}

/// Hover tracking for one control.
#[derive(Clone)]
pub struct HoverInteraction {
    inner: Rc<HoverInner>,
}

struct HoverInner {
    state: RefCell<HoverState>,
    is_hovered: Signal<bool>,
    options: HoverOptions,
    _disabled: Subscription,
}

impl HoverInteraction {
    /// Create a hover hook.
    pub fn new(options: HoverOptions) -> Self {
        let inner = Rc::new_cyclic(|weak: &Weak<HoverInner>| {
            let weak = weak.clone();
            let disabled = options.is_disabled.subscribe(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.sync_disabled();
                }
            });
            let mut state = HoverState::new();
            let _ = state.set_disabled(options.is_disabled.get());
            HoverInner {
                state: RefCell::new(state),
                is_hovered: Signal::new(false),
                options,
                _disabled: disabled,
            }
        });
        Self { inner }
    }

    /// Whether a pointer hovers the control.
    pub fn is_hovered(&self) -> bool {
        self.inner.is_hovered.get()
    }

    /// The hovered state as a read-only accessor.
    pub fn hovered(&self) -> Derived<bool> {
        self.inner.is_hovered.read_only()
    }

    /// Handlers for pointer enter and leave.
    pub fn handlers(&self) -> EventHandlers {
        let enter = self.inner.clone();
        let leave = self.inner.clone();
        EventHandlers::new()
            .on_pointer_enter(move |e: &mut PointerEvent| {
                enter.sync_disabled();
                let event = enter.state.borrow_mut().on_pointer_enter(e);
                enter.emit(event);
            })
            .on_pointer_leave(move |e: &mut PointerEvent| {
                leave.sync_disabled();
                let event = leave.state.borrow_mut().on_pointer_leave(e);
                leave.emit(event);
            })
    }
}

impl fmt::Debug for HoverInteraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HoverInteraction")
            .field("is_hovered", &self.is_hovered())
            .finish_non_exhaustive()
    }
}

impl HoverInner {
    fn sync_disabled(&self) {
        let disabled = self.options.is_disabled.get();
        let event = self.state.borrow_mut().set_disabled(disabled);
        self.emit(event);
    }

    fn emit(&self, event: Option<HoverEvent>) {
        let options = &self.options;
        match event {
            Some(HoverEvent::Start(pointer_type)) => {
                self.is_hovered.set(true);
                if let Some(cb) = &options.on_hover_start {
                    cb(pointer_type);
                }
                if let Some(cb) = &options.on_hover_change {
                    cb(true);
                }
            }
            Some(HoverEvent::End(pointer_type)) => {
                self.is_hovered.set(false);
                if let Some(cb) = &options.on_hover_end {
                    cb(pointer_type);
                }
                if let Some(cb) = &options.on_hover_change {
                    cb(false);
                }
            }
            None => {}
        }
    }
}

/// Focus and focus-visible tracking for one control.
///
/// Both flags live in one signal, so observers never see a focused control whose
/// visibility has not been updated yet.
#[derive(Clone, Debug, Default)]
pub struct FocusInteraction {
    state: Signal<FocusState>,
}

impl FocusInteraction {
    /// An unfocused control.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the control has focus.
    pub fn is_focused(&self) -> bool {
        self.state.with(FocusState::is_focused)
    }

    /// Whether the control's focus should be indicated.
    pub fn is_focus_visible(&self) -> bool {
        self.state.with(FocusState::is_focus_visible)
    }

    /// The focused flag as a read-only accessor.
    pub fn focused(&self) -> Derived<bool> {
        self.state.derive(FocusState::is_focused)
    }

    /// The focus-visible flag as a read-only accessor.
    pub fn focus_visible(&self) -> Derived<bool> {
        self.state.derive(FocusState::is_focus_visible)
    }

    /// The trigger notified on every focus transition.
    pub fn trigger(&self) -> Trigger {
        self.state.trigger()
    }

    /// Record focus arriving with `modality`.
    pub fn focus(&self, modality: FocusModality) {
        self.transition(|s| s.on_focus(&FocusEvent::new(modality)));
    }

    /// Record focus leaving.
    pub fn blur(&self) {
        self.transition(FocusState::on_blur);
    }

    /// Handlers for focus, blur, key down and pointer down.
    pub fn handlers(&self) -> EventHandlers {
        let (focus, blur, key, pointer) = (self.clone(), self.clone(), self.clone(), self.clone());
        EventHandlers::new()
            .on_focus(move |e: &mut FocusEvent| focus.transition(|s| s.on_focus(e)))
            .on_blur(move |_: &mut FocusEvent| blur.blur())
            .on_key_down(move |e: &mut KeyboardEvent| key.transition(|s| s.on_key_down(e)))
            .on_pointer_down(move |_: &mut PointerEvent| pointer.transition(FocusState::on_pointer_down))
    }

    fn transition(&self, f: impl FnOnce(&mut FocusState)) {
        let mut next = self.state.get();
        f(&mut next);
        self.state.set(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use kurbo::{Point, Rect};
    use trellis_event_state::event::{DomEvent, Key};

    fn mouse() -> PointerEvent {
        PointerEvent::new(PointerType::Mouse, Point::new(5.0, 5.0))
    }

    fn log() -> (Rc<RefCell<Vec<&'static str>>>, PressOptions) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let options = PressOptions::default()
            .on_press_start({
                let log = log.clone();
                move |_| log.borrow_mut().push("start")
            })
            .on_press_up({
                let log = log.clone();
                move |_| log.borrow_mut().push("up")
            })
            .on_press_end({
                let log = log.clone();
                move |_| log.borrow_mut().push("end")
            })
            .on_press({
                let log = log.clone();
                move |_| log.borrow_mut().push("press")
            });
        (log, options)
    }

    #[test]
    fn pointer_press_publishes_pressed_and_callbacks() {
        let (log, options) = log();
        let press = PressInteraction::new(options);
        let mut handlers = press.handlers();

        let mut history = Vec::new();
        history.push(press.is_pressed());
        handlers.dispatch(&mut DomEvent::PointerDown(mouse()));
        history.push(press.is_pressed());
        handlers.dispatch(&mut DomEvent::PointerUp(mouse()));
        history.push(press.is_pressed());

        assert_eq!(history, [false, true, false]);
        assert_eq!(*log.borrow(), ["start", "up", "end", "press"]);
    }

    #[test]
    fn leaving_and_reentering_the_target() {
        let press = PressInteraction::new(PressOptions::default());
        let mut handlers = press.handlers();
        let bounds = Rect::new(0.0, 0.0, 10.0, 10.0);

        handlers.dispatch(&mut DomEvent::PointerDown(mouse()));
        handlers.dispatch(&mut DomEvent::PointerMove(
            PointerEvent::new(PointerType::Mouse, Point::new(50.0, 50.0)).with_target_bounds(bounds),
        ));
        assert!(!press.is_pressed());
        handlers.dispatch(&mut DomEvent::PointerMove(mouse().with_target_bounds(bounds)));
        assert!(press.is_pressed());
    }

    #[test]
    fn disabled_press_never_becomes_pressed() {
        let disabled = Signal::new(true);
        let press = PressInteraction::new(PressOptions {
            is_disabled: disabled.read_only(),
            ..PressOptions::default()
        });
        let mut handlers = press.handlers();
        handlers.dispatch(&mut DomEvent::PointerDown(mouse()));
        assert!(!press.is_pressed());
        handlers.dispatch(&mut DomEvent::KeyDown(KeyboardEvent::new(Key::Enter)));
        assert!(!press.is_pressed());
    }

    #[test]
    fn disabling_mid_press_resets_without_activation() {
        let (log, options) = log();
        let disabled = Signal::new(false);
        let press = PressInteraction::new(PressOptions {
            is_disabled: disabled.read_only(),
            ..options
        });
        let mut handlers = press.handlers();
        handlers.dispatch(&mut DomEvent::PointerDown(mouse()));
        assert!(press.is_pressed());

        disabled.set(true);
        assert!(!press.is_pressed());
        handlers.dispatch(&mut DomEvent::PointerUp(mouse()));
        assert_eq!(*log.borrow(), ["start", "end"]);
    }

    #[test]
    fn pointer_press_focuses_the_control() {
        let focus = FocusInteraction::new();
        let press = PressInteraction::new(PressOptions {
            focus: Some(focus.clone()),
            ..PressOptions::default()
        });
        press.handlers().dispatch(&mut DomEvent::PointerDown(mouse()));
        assert!(focus.is_focused());
        assert!(!focus.is_focus_visible());
    }

    #[test]
    fn prevent_focus_on_press_leaves_focus_alone() {
        let focus = FocusInteraction::new();
        focus.focus(FocusModality::Keyboard);
        let before = (focus.is_focused(), focus.is_focus_visible());

        let press = PressInteraction::new(PressOptions {
            prevent_focus_on_press: focus.focused(),
            focus: Some(focus.clone()),
            ..PressOptions::default()
        });
        let mut handlers = press.handlers();
        handlers.dispatch(&mut DomEvent::PointerDown(mouse()));
        assert_eq!((focus.is_focused(), focus.is_focus_visible()), before);

        let mut mouse_down = DomEvent::MouseDown(MouseEvent::new(Point::new(5.0, 5.0)));
        handlers.dispatch(&mut mouse_down);
        assert!(mouse_down.is_default_prevented());
    }

    #[test]
    fn keyboard_press_and_synthesized_click() {
        let (log, options) = log();
        let press = PressInteraction::new(options);
        let mut handlers = press.handlers();

        handlers.dispatch(&mut DomEvent::KeyDown(KeyboardEvent::new(Key::Space)));
        handlers.dispatch(&mut DomEvent::KeyUp(KeyboardEvent::new(Key::Space)));
        // The browser follows Space with a click; it must not activate twice.
        handlers.dispatch(&mut DomEvent::Click(MouseEvent::virtual_click()));
        assert_eq!(*log.borrow(), ["start", "up", "end", "press"]);
    }

    #[test]
    fn hover_ignores_touch_and_resets_when_disabled() {
        let disabled = Signal::new(false);
        let hover = HoverInteraction::new(HoverOptions {
            is_disabled: disabled.read_only(),
            ..HoverOptions::default()
        });
        let mut handlers = hover.handlers();

        handlers.dispatch(&mut DomEvent::PointerEnter(PointerEvent::new(
            PointerType::Touch,
            Point::ZERO,
        )));
        assert!(!hover.is_hovered());

        handlers.dispatch(&mut DomEvent::PointerEnter(mouse()));
        assert!(hover.is_hovered());
        disabled.set(true);
        assert!(!hover.is_hovered());
    }

    #[test]
    fn focus_updates_both_flags_in_one_write() {
        let focus = FocusInteraction::new();
        let writes = Rc::new(RefCell::new(Vec::new()));
        let _sub = {
            let (focus, writes) = (focus.clone(), writes.clone());
            focus.trigger().subscribe(move || {
                writes
                    .borrow_mut()
                    .push((focus.is_focused(), focus.is_focus_visible()));
            })
        };
        let mut handlers = focus.handlers();
        handlers.dispatch(&mut DomEvent::Focus(FocusEvent::new(FocusModality::Keyboard)));
        handlers.dispatch(&mut DomEvent::PointerDown(mouse()));
        handlers.dispatch(&mut DomEvent::Blur(FocusEvent::default()));

        assert_eq!(*writes.borrow(), [(true, true), (true, false), (false, false)]);
    }
}
