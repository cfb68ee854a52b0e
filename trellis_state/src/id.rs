// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Unique ids, sub-id generation and id registration.
//!
//! Composite widgets link their parts with ARIA id references (`aria-controls`,
//! `aria-labelledby`, `aria-describedby`). Each item builds a root id from its
//! parent's generated id plus a [`unique_id`], derives part ids from it with
//! [`GenerateId`], and lets parts publish the id they actually render with through a
//! [`RegisterId`].

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};

use crate::signal::{Derived, Signal};

static NEXT_UNIQUE_ID: AtomicUsize = AtomicUsize::new(0);

/// Return an identifier that no other call in this process returns.
pub fn unique_id() -> String {
    let n = NEXT_UNIQUE_ID.fetch_add(1, Ordering::Relaxed);
    format!("trellis-{n}")
}

/// Derives part ids from a base id.
///
/// `generate("trigger")` on an item whose id is `accordion-item-trellis-3` yields
/// `accordion-item-trellis-3-trigger`. The base is read at call time, so a generator
/// built on a signal follows id changes.
#[derive(Clone)]
pub struct GenerateId {
    base: Derived<String>,
}

impl GenerateId {
    /// Build a generator over a possibly changing base id.
    pub fn new(base: Derived<String>) -> Self {
        Self { base }
    }

    /// Build a generator over a fixed base id.
    pub fn fixed(base: impl Into<String>) -> Self {
        Self::new(Derived::constant(base.into()))
    }

    /// The current base id.
    pub fn base(&self) -> String {
        self.base.get()
    }

    /// The id of `part`, scoped to the base id.
    pub fn generate(&self, part: &str) -> String {
        format!("{}-{part}", self.base.get())
    }
}

impl fmt::Debug for GenerateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerateId")
            .field("base", &self.base.get())
            .finish()
    }
}

/// Publishes a part's id into its owner's id slot.
#[derive(Clone, Debug)]
pub struct RegisterId {
    slot: Signal<Option<String>>,
}

impl RegisterId {
    /// Wrap the owner's id slot.
    pub fn new(slot: Signal<Option<String>>) -> Self {
        Self { slot }
    }

    /// Publish `id`. Dropping the returned registration clears the slot again.
    pub fn register(&self, id: impl Into<String>) -> IdRegistration {
        let id = id.into();
        tracing::debug!(id = %id, "registering id");
        self.slot.set(Some(id.clone()));
        IdRegistration {
            slot: self.slot.clone(),
            id,
        }
    }
}

/// A published id; unpublished on drop.
///
/// The slot is only cleared if it still holds this registration's id, so a part that
/// re-registers before its previous registration drops keeps the newer id.
#[must_use = "dropping the registration unpublishes the id"]
pub struct IdRegistration {
    slot: Signal<Option<String>>,
    id: String,
}

impl IdRegistration {
    /// The published id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl Drop for IdRegistration {
    fn drop(&mut self) {
        let still_ours = self
            .slot
            .with(|current| current.as_deref() == Some(self.id.as_str()));
        if still_ours {
            tracing::debug!(id = %self.id, "unregistering id");
            self.slot.set(None);
        }
    }
}

impl fmt::Debug for IdRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdRegistration")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
