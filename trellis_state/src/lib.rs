// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=trellis_state --heading-base-level=0

//! Trellis State: explicit state holders for headless UI components.
//!
//! Components in Trellis share state by handing each other explicit handles rather
//! than through an ambient context. This crate provides those handles:
//!
//! - [`Signal`]: a shared mutable cell whose writes notify subscribers.
//! - [`Derived`]: a read-only value recomputed from its sources on every read, carrying
//!   the [`Trigger`]s of the signals it depends on.
//! - [`Subscription`]: an observer registration, released on drop.
//! - [`unique_id`], [`GenerateId`] and [`RegisterId`]: id plumbing for ARIA
//!   relationships between the parts of a composite widget.
//!
//! ## Example
//!
//! ```
//! use trellis_state::{GenerateId, RegisterId, Signal, unique_id};
//!
//! let item_id = format!("accordion-item-{}", unique_id());
//! let ids = GenerateId::fixed(item_id.clone());
//!
//! let trigger_id = Signal::new(None::<String>);
//! let register_trigger_id = RegisterId::new(trigger_id.clone());
//!
//! // The trigger part publishes the id it renders with.
//! let registration = register_trigger_id.register(ids.generate("trigger"));
//! assert_eq!(trigger_id.get(), Some(format!("{item_id}-trigger")));
//!
//! // Unmounting the trigger unpublishes it; consumers then omit `aria-labelledby`.
//! drop(registration);
//! assert_eq!(trigger_id.get(), None);
//! ```
//!
//! Everything here is single-threaded (`Rc`/`RefCell`) and change notification is
//! synchronous.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod id;
mod signal;

pub use id::{GenerateId, IdRegistration, RegisterId, unique_id};
pub use signal::{Derived, Signal, Subscription, Trigger};
