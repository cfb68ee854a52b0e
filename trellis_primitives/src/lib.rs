// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_primitives --heading-base-level=0

//! Trellis Primitives: unstyled, accessible UI components.
//!
//! Every component is a state holder plus a `render` method that describes the
//! element to produce: its kind, its ARIA and `data-*` attributes, and the event
//! handlers the host should attach. Hosts map [`Element`](polymorphic::Element)
//! descriptions onto their own tree and feed DOM-like events back through
//! [`Element::dispatch`](polymorphic::Element::dispatch).
//!
//! - [`radio_group`]: a form control of which at most one item is checked.
//! - [`accordion`]: stacked collapsible sections, single or multiple expansion.
//! - [`collapsible`]: one region toggled by a trigger.
//! - [`link`]: an anchor, or any element acting as one.
//!
//! Building blocks shared by the components:
//!
//! - [`interactions`]: press, hover and focus hooks over `trellis_event_state`.
//! - [`dataset`]: the `data-*` presence attributes styling hooks select on.
//! - [`polymorphic`]: element kinds, attribute lists and caller-first handler
//!   composition.
//! - [`form_control`]: ids, disabled/required/read-only flags and validation.
//! - [`selection`]: selected values and the mounted items of a group.
//!
//! ## Example
//!
//! ```
//! use trellis_event_state::event::{DomEvent, FocusEvent, FocusModality, Key, KeyboardEvent};
//! use trellis_primitives::polymorphic::ElementProps;
//! use trellis_primitives::radio_group::{
//!     RadioGroup, RadioGroupItem, RadioGroupItemInput, RadioGroupItemOptions, RadioGroupOptions,
//! };
//!
//! let group = RadioGroup::new(RadioGroupOptions {
//!     default_value: Some("s".into()),
//!     ..Default::default()
//! });
//! let sizes = ["s", "m", "l"]
//!     .into_iter()
//!     .map(|value| {
//!         RadioGroupItem::new(&group, RadioGroupItemOptions { value: value.into(), ..Default::default() })
//!     })
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! let input = RadioGroupItemInput::new(sizes[0].context(), Default::default());
//! let mut el = input.render(ElementProps::new());
//! el.dispatch(&mut DomEvent::Focus(FocusEvent::new(FocusModality::Keyboard)));
//! el.dispatch(&mut DomEvent::KeyDown(KeyboardEvent::new(Key::ArrowDown)));
//!
//! assert_eq!(group.selected_value().as_deref(), Some("m"));
//! assert!(sizes[0].context().is_focus_visible());
//! # Ok::<(), trellis_primitives::Error>(())
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo` through the event crate.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`. State holders use `Rc`, so they stay on
//! the thread that created them.

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod accordion;
pub mod collapsible;
pub mod dataset;
pub mod form_control;
pub mod interactions;
pub mod link;
pub mod polymorphic;
pub mod radio_group;
pub mod selection;

mod error;

pub use error::Error;
