// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event handler slots and composition.
//!
//! A component usually needs its own handlers (press, hover, focus tracking) on the
//! same events the caller wants to observe. Composition runs every handler in
//! declared order with the same event object. Components compose the caller's
//! handler first and their own second, so a caller sees each event before the
//! component reacts to it, and may prevent its default action.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use trellis_event_state::event::{DomEvent, MouseEvent};
//! use trellis_event_state::handlers::EventHandlers;
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//!
//! let caller = {
//!     let log = log.clone();
//!     EventHandlers::new().on_click(move |_| log.borrow_mut().push("caller"))
//! };
//! let internal = {
//!     let log = log.clone();
//!     EventHandlers::new().on_click(move |_| log.borrow_mut().push("internal"))
//! };
//!
//! let mut handlers = EventHandlers::compose(caller, internal);
//! let mut click = DomEvent::Click(MouseEvent::virtual_click());
//! assert!(handlers.dispatch(&mut click));
//! assert_eq!(*log.borrow(), ["caller", "internal"]);
//! ```

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use crate::event::{
    ChangeEvent, DomEvent, DragEvent, FocusEvent, KeyboardEvent, MouseEvent, PointerEvent,
};

/// A boxed event handler.
pub type Handler<E> = Box<dyn FnMut(&mut E)>;

/// Combine handlers into one that calls each present handler in order.
///
/// Returns `None` when no handler is present. A handler that prevents the default
/// action does not stop the handlers after it.
pub fn compose_handlers<E: 'static>(
    handlers: impl IntoIterator<Item = Option<Handler<E>>>,
) -> Option<Handler<E>> {
    let mut present: SmallVec<[Handler<E>; 2]> = handlers.into_iter().flatten().collect();
    match present.len() {
        0 => None,
        1 => present.pop(),
        _ => Some(Box::new(move |event: &mut E| {
            for handler in present.iter_mut() {
                handler(event);
            }
        })),
    }
}

macro_rules! event_handlers {
    ($( $field:ident, $builder:ident : $event:ty => $variant:ident, $dom:literal; )*) => {
        /// Optional handlers for every event type a component touches.
        #[derive(Default)]
        pub struct EventHandlers {
            $(
                #[doc = concat!("Handler for `", $dom, "`.")]
                pub $field: Option<Handler<$event>>,
            )*
        }

        impl EventHandlers {
            $(
                #[doc = concat!("Set the `", $dom, "` handler, replacing any previous one.")]
                pub fn $builder(mut self, handler: impl FnMut(&mut $event) + 'static) -> Self {
                    self.$field = Some(Box::new(handler));
                    self
                }
            )*

            /// Compose two handler sets slot by slot; `first` runs before `second`.
            pub fn compose(first: Self, second: Self) -> Self {
                Self {
                    $( $field: compose_handlers([first.$field, second.$field]), )*
                }
            }

            /// Route `event` to its slot. Returns whether a handler ran.
            pub fn dispatch(&mut self, event: &mut DomEvent) -> bool {
                match event {
                    $(
                        DomEvent::$variant(e) => match self.$field.as_mut() {
                            Some(handler) => {
                                handler(e);
                                true
                            }
                            None => false,
                        },
                    )*
                }
            }

            /// Whether no slot holds a handler.
            pub fn is_empty(&self) -> bool {
                true $( && self.$field.is_none() )*
            }
        }

        impl fmt::Debug for EventHandlers {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let mut list = f.debug_set();
                $(
                    if self.$field.is_some() {
                        list.entry(&$dom);
                    }
                )*
                list.finish()
            }
        }
    };
}

event_handlers! {
    pointer_down, on_pointer_down: PointerEvent => PointerDown, "pointerdown";
    pointer_up, on_pointer_up: PointerEvent => PointerUp, "pointerup";
    pointer_move, on_pointer_move: PointerEvent => PointerMove, "pointermove";
    pointer_enter, on_pointer_enter: PointerEvent => PointerEnter, "pointerenter";
    pointer_leave, on_pointer_leave: PointerEvent => PointerLeave, "pointerleave";
    pointer_cancel, on_pointer_cancel: PointerEvent => PointerCancel, "pointercancel";
    mouse_down, on_mouse_down: MouseEvent => MouseDown, "mousedown";
    mouse_up, on_mouse_up: MouseEvent => MouseUp, "mouseup";
    click, on_click: MouseEvent => Click, "click";
    key_down, on_key_down: KeyboardEvent => KeyDown, "keydown";
    key_up, on_key_up: KeyboardEvent => KeyUp, "keyup";
    drag_start, on_drag_start: DragEvent => DragStart, "dragstart";
    focus, on_focus: FocusEvent => Focus, "focus";
    blur, on_blur: FocusEvent => Blur, "blur";
    change, on_change: ChangeEvent => Change, "change";
}

impl EventHandlers {
    /// An empty handler set.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, Key, PointerType};
    use alloc::rc::Rc;
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use kurbo::Point;

    #[test]
    fn compose_runs_in_declared_order_with_same_event() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let h1: Handler<MouseEvent> = {
            let log = log.clone();
            Box::new(move |e: &mut MouseEvent| {
                log.borrow_mut().push(("h1", e.detail));
                e.detail = 7;
            })
        };
        let h2: Handler<MouseEvent> = {
            let log = log.clone();
            Box::new(move |e: &mut MouseEvent| log.borrow_mut().push(("h2", e.detail)))
        };

        let mut composed = compose_handlers([Some(h1), None, Some(h2)]).expect("two handlers");
        composed(&mut MouseEvent::new(Point::ZERO));
        // h2 observes the mutation h1 made, so both saw the same object.
        assert_eq!(*log.borrow(), vec![("h1", 1), ("h2", 7)]);
    }

    #[test]
    fn compose_of_nothing_is_none() {
        assert!(compose_handlers::<MouseEvent>([None, None]).is_none());
    }

    #[test]
    fn prevent_default_does_not_stop_later_handlers() {
        let ran = Rc::new(RefCell::new(false));
        let first = EventHandlers::new().on_key_down(|e| e.prevent_default());
        let second = {
            let ran = ran.clone();
            EventHandlers::new().on_key_down(move |_| *ran.borrow_mut() = true)
        };
        let mut handlers = EventHandlers::compose(first, second);

        let mut event = DomEvent::KeyDown(KeyboardEvent::new(Key::Space));
        handlers.dispatch(&mut event);
        assert!(*ran.borrow());
        assert!(event.is_default_prevented());
    }

    #[test]
    fn dispatch_reports_missing_slot() {
        let mut handlers = EventHandlers::new().on_pointer_enter(|_| {});
        assert!(!handlers.is_empty());
        let mut leave = DomEvent::PointerLeave(PointerEvent::new(PointerType::Mouse, Point::ZERO));
        assert!(!handlers.dispatch(&mut leave));
        let mut enter = DomEvent::PointerEnter(PointerEvent::new(PointerType::Mouse, Point::ZERO));
        assert!(handlers.dispatch(&mut enter));
    }
}
