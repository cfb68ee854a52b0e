// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM-like input events.
//!
//! The host toolkit translates its native input into these types and dispatches them
//! to the handlers a component produced. Each event carries a default-prevented flag
//! that handlers set through [`Event::prevent_default`]; the host reads it back after
//! dispatch to decide whether to run its default action (focusing on mouse down,
//! following a link, scrolling on Space).

use core::num::NonZeroU64;

use bitflags::bitflags;
use kurbo::{Point, Rect, Size};

/// Pointer identifier for tracking multiple concurrent pointers.
pub type PointerId = NonZeroU64;

/// Common behavior of every event type.
pub trait Event {
    /// Ask the host to skip its default action for this event.
    fn prevent_default(&mut self);

    /// Whether a handler called [`Event::prevent_default`].
    fn is_default_prevented(&self) -> bool;
}

macro_rules! impl_event {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Event for $ty {
                fn prevent_default(&mut self) {
                    self.default_prevented = true;
                }

                fn is_default_prevented(&self) -> bool {
                    self.default_prevented
                }
            }
        )*
    };
}

/// Kind of device behind a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerType {
    /// A mouse or trackpad.
    Mouse,
    /// A stylus.
    Pen,
    /// A finger on a touch surface.
    Touch,
}

/// Pointer or mouse button, following the DOM `button` numbering.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    /// Usually the left button (DOM `0`).
    Primary,
    /// Usually the wheel button (DOM `1`).
    Auxiliary,
    /// Usually the right button (DOM `2`).
    Secondary,
    /// Any other button.
    Other(u8),
}

impl Button {
    /// Map a DOM `button` value.
    pub fn from_dom(button: u8) -> Self {
        match button {
            0 => Self::Primary,
            1 => Self::Auxiliary,
            2 => Self::Secondary,
            n => Self::Other(n),
        }
    }
}

bitflags! {
    /// Modifier keys held during an event.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 1 << 0;
        /// Control.
        const CONTROL = 1 << 1;
        /// Alt / Option.
        const ALT = 1 << 2;
        /// Meta / Command / Windows.
        const META = 1 << 3;
    }
}

/// Keys the interaction state machines distinguish.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// Tab.
    Tab,
    /// Escape.
    Escape,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// A printable character other than space.
    Character(char),
    /// Anything else (function keys, modifiers on their own, ...).
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Tab" => Self::Tab,
            "Escape" | "Esc" => Self::Escape,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// Whether this key activates a pressable control.
    pub fn is_press_key(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// A pointer event (`pointerdown`, `pointermove`, `pointerup`, ...).
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer identifier, stable for the lifetime of one contact.
    pub pointer_id: PointerId,
    /// Device kind.
    pub pointer_type: PointerType,
    /// Button that changed state; [`Button::Primary`] for moves.
    pub button: Button,
    /// Pointer position in the host's coordinate space.
    pub position: Point,
    /// Contact geometry (touch radius); zero for mice.
    pub contact_size: Size,
    /// Bounds of the element the handlers belong to, in the same space as `position`.
    ///
    /// When present, press tracking uses it to notice the pointer leaving the target.
    pub target_bounds: Option<Rect>,
    /// Held modifier keys.
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl PointerEvent {
    /// A primary-button event from pointer `1` at `position`.
    pub fn new(pointer_type: PointerType, position: Point) -> Self {
        Self {
            pointer_id: PointerId::MIN,
            pointer_type,
            button: Button::Primary,
            position,
            contact_size: Size::ZERO,
            target_bounds: None,
            modifiers: Modifiers::empty(),
            default_prevented: false,
        }
    }

    /// Set the pointer id.
    pub fn with_pointer_id(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Set the button.
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    /// Set the contact size.
    pub fn with_contact_size(mut self, size: Size) -> Self {
        self.contact_size = size;
        self
    }

    /// Set the target bounds.
    pub fn with_target_bounds(mut self, bounds: Rect) -> Self {
        self.target_bounds = Some(bounds);
        self
    }

    /// Set the modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// The area covered by the contact, centered on `position`.
    pub fn contact_rect(&self) -> Rect {
        Rect::from_center_size(self.position, self.contact_size)
    }

    /// Whether the contact overlaps `bounds`; touching edges count as overlapping.
    pub fn is_over(&self, bounds: Rect) -> bool {
        let contact = self.contact_rect();
        !(contact.x0 > bounds.x1
            || contact.x1 < bounds.x0
            || contact.y0 > bounds.y1
            || contact.y1 < bounds.y0)
    }
}

/// A mouse event (`mousedown`, `mouseup`, `click`).
#[derive(Clone, Debug, PartialEq)]
pub struct MouseEvent {
    /// Button that changed state.
    pub button: Button,
    /// Pointer position.
    pub position: Point,
    /// Click count; `0` for clicks synthesized by assistive technology or `element.click()`.
    pub detail: u32,
    /// Held modifier keys.
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl MouseEvent {
    /// A primary-button event at `position` with a click count of one.
    pub fn new(position: Point) -> Self {
        Self {
            button: Button::Primary,
            position,
            detail: 1,
            modifiers: Modifiers::empty(),
            default_prevented: false,
        }
    }

    /// A click with no pointer behind it, as produced by screen readers.
    pub fn virtual_click() -> Self {
        Self {
            detail: 0,
            ..Self::new(Point::ZERO)
        }
    }

    /// Set the button.
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    /// Whether no pointing device produced this click.
    pub fn is_virtual(&self) -> bool {
        self.detail == 0
    }
}

/// A keyboard event (`keydown`, `keyup`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key.
    pub key: Key,
    /// Whether this is an auto-repeat of a held key.
    pub repeat: bool,
    /// Held modifier keys.
    pub modifiers: Modifiers,
    default_prevented: bool,
}

impl KeyboardEvent {
    /// A non-repeating event for `key`.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            repeat: false,
            modifiers: Modifiers::empty(),
            default_prevented: false,
        }
    }

    /// Mark the event as an auto-repeat.
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// Set the modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// A `dragstart` event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DragEvent {
    default_prevented: bool,
}

impl DragEvent {
    /// A new drag start.
    pub fn new() -> Self {
        Self::default()
    }
}

/// How focus arrived.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusModality {
    /// Tab or arrow-key navigation.
    Keyboard,
    /// Clicking or tapping.
    Pointer,
    /// Assistive technology.
    Virtual,
    /// Script-driven `focus()`.
    #[default]
    Programmatic,
}

/// A `focus` or `blur` event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusEvent {
    /// How focus arrived (meaningless for blur).
    pub modality: FocusModality,
    default_prevented: bool,
}

impl FocusEvent {
    /// A focus event with the given modality.
    pub fn new(modality: FocusModality) -> Self {
        Self {
            modality,
            default_prevented: false,
        }
    }
}

/// A `change` event from a checkable native input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChangeEvent {
    /// The input's new checked state.
    pub checked: bool,
    default_prevented: bool,
}

impl ChangeEvent {
    /// A change to `checked`.
    pub fn new(checked: bool) -> Self {
        Self {
            checked,
            default_prevented: false,
        }
    }
}

impl_event!(
    PointerEvent,
    MouseEvent,
    KeyboardEvent,
    DragEvent,
    FocusEvent,
    ChangeEvent,
);

/// Any event a component's handlers accept, tagged with its DOM type.
#[derive(Clone, Debug, PartialEq)]
pub enum DomEvent {
    /// `pointerdown`.
    PointerDown(PointerEvent),
    /// `pointerup`.
    PointerUp(PointerEvent),
    /// `pointermove`.
    PointerMove(PointerEvent),
    /// `pointerenter`.
    PointerEnter(PointerEvent),
    /// `pointerleave`.
    PointerLeave(PointerEvent),
    /// `pointercancel`.
    PointerCancel(PointerEvent),
    /// `mousedown`.
    MouseDown(MouseEvent),
    /// `mouseup`.
    MouseUp(MouseEvent),
    /// `click`.
    Click(MouseEvent),
    /// `keydown`.
    KeyDown(KeyboardEvent),
    /// `keyup`.
    KeyUp(KeyboardEvent),
    /// `dragstart`.
    DragStart(DragEvent),
    /// `focus`.
    Focus(FocusEvent),
    /// `blur`.
    Blur(FocusEvent),
    /// `change`.
    Change(ChangeEvent),
}

impl DomEvent {
    /// The DOM event type name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PointerDown(_) => "pointerdown",
            Self::PointerUp(_) => "pointerup",
            Self::PointerMove(_) => "pointermove",
            Self::PointerEnter(_) => "pointerenter",
            Self::PointerLeave(_) => "pointerleave",
            Self::PointerCancel(_) => "pointercancel",
            Self::MouseDown(_) => "mousedown",
            Self::MouseUp(_) => "mouseup",
            Self::Click(_) => "click",
            Self::KeyDown(_) => "keydown",
            Self::KeyUp(_) => "keyup",
            Self::DragStart(_) => "dragstart",
            Self::Focus(_) => "focus",
            Self::Blur(_) => "blur",
            Self::Change(_) => "change",
        }
    }

    /// Whether a handler prevented the default action.
    pub fn is_default_prevented(&self) -> bool {
        match self {
            Self::PointerDown(e)
            | Self::PointerUp(e)
            | Self::PointerMove(e)
            | Self::PointerEnter(e)
            | Self::PointerLeave(e)
            | Self::PointerCancel(e) => e.is_default_prevented(),
            Self::MouseDown(e) | Self::MouseUp(e) | Self::Click(e) => e.is_default_prevented(),
            Self::KeyDown(e) | Self::KeyUp(e) => e.is_default_prevented(),
            Self::DragStart(e) => e.is_default_prevented(),
            Self::Focus(e) | Self::Blur(e) => e.is_default_prevented(),
            Self::Change(e) => e.is_default_prevented(),
        }
    }
}
