// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_event_state --heading-base-level=0

//! Trellis Event State: input normalization for headless controls.
//!
//! This crate turns raw, DOM-like input into the interaction states an accessible
//! control renders: pressed, hovered, focused and focus-visible. It contains no
//! widgets and no reactive runtime; each machine is a plain struct that consumes
//! events and reports transitions, so it can be driven by any toolkit and tested
//! without one.
//!
//! - [`event`]: the event model ([`PointerEvent`](event::PointerEvent),
//!   [`KeyboardEvent`](event::KeyboardEvent), [`MouseEvent`](event::MouseEvent), ...)
//!   and the [`DomEvent`](event::DomEvent) union hosts dispatch.
//! - [`handlers`]: typed handler slots and caller-first composition.
//! - [`press`]: [`PressState`](press::PressState), pointer/keyboard/virtual press
//!   recognition with cancellation and target-leave tracking.
//! - [`hover`]: [`HoverState`](hover::HoverState), pointer hover that ignores touch.
//! - [`focus`]: [`FocusState`](focus::FocusState), focus and focus-visible.
//!
//! Positions and bounds use [`kurbo`] types, like the rest of the geometry in a
//! Kurbo-based UI stack.
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: enables `no_std` builds that rely on `libm` for floating-point math.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod event;
pub mod focus;
pub mod handlers;
pub mod hover;
pub mod press;
