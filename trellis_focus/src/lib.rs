// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Focus: roving-focus navigation primitives.
//!
//! Composite widgets such as radio groups and accordions keep a single tab stop and
//! move focus between their items with the arrow keys. This crate models that
//! navigation as a combination of:
//! - **Navigation intents** ([`Navigation`]) such as [`Navigation::Next`] or
//!   [`Navigation::Last`], mapped from keys with [`Orientation::navigation_for`].
//! - **Candidates** ([`FocusEntry`] / [`FocusSpace`]) describing the items of the
//!   group in registration order, their enabled state and an optional explicit order.
//! - Pluggable **policies** ([`FocusPolicy`]) that select the next item given an
//!   origin, an intent, and a read-only view of the candidates.
//!
//! ## Minimal example
//!
//! Three radio buttons, the middle one disabled:
//!
//! ```rust
//! use trellis_event_state::event::Key;
//! use trellis_focus::{
//!     FocusEntry, FocusPolicy, FocusSpace, LinearPolicy, Navigation, Orientation, WrapMode,
//! };
//!
//! let entries = vec![
//!     FocusEntry::new("a"),
//!     FocusEntry { enabled: false, ..FocusEntry::new("b") },
//!     FocusEntry::new("c"),
//! ];
//! let space = FocusSpace { nodes: &entries };
//! let policy = LinearPolicy { wrap: WrapMode::Wrap };
//!
//! let nav = Orientation::Vertical.navigation_for(Key::ArrowDown).unwrap();
//! assert_eq!(nav, Navigation::Next);
//!
//! // Down from "a" skips the disabled "b"...
//! assert_eq!(policy.next(Some(&"a"), nav, &space), Some("c"));
//! // ...and wraps back around.
//! assert_eq!(policy.next(Some(&"c"), nav, &space), Some("a"));
//! ```
//!
//! The types are generic over the item identifier `K`; Trellis uses item values
//! (`String`), but any cloneable, comparable handle works.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::cmp::Ordering;

use trellis_event_state::event::Key;

/// Direction of focus navigation within a group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// Move to the next candidate (for example, ArrowDown in a vertical list).
    Next,
    /// Move to the previous candidate.
    Prev,
    /// Move to the first candidate (Home).
    First,
    /// Move to the last candidate (End).
    Last,
}

/// Layout axis of a group, which decides the arrow keys it responds to.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Items flow left to right; Left/Right arrows navigate.
    Horizontal,
    /// Items flow top to bottom; Up/Down arrows navigate.
    #[default]
    Vertical,
    /// Both arrow pairs navigate (native radio groups behave this way).
    Both,
}

impl Orientation {
    /// The navigation intent `key` expresses in a group with this orientation.
    pub fn navigation_for(self, key: Key) -> Option<Navigation> {
        let horizontal = matches!(self, Self::Horizontal | Self::Both);
        let vertical = matches!(self, Self::Vertical | Self::Both);
        match key {
            Key::ArrowDown if vertical => Some(Navigation::Next),
            Key::ArrowUp if vertical => Some(Navigation::Prev),
            Key::ArrowRight if horizontal => Some(Navigation::Next),
            Key::ArrowLeft if horizontal => Some(Navigation::Prev),
            Key::Home => Some(Navigation::First),
            Key::End => Some(Navigation::Last),
            _ => None,
        }
    }

    /// The ARIA `aria-orientation` token, if the orientation has one.
    pub fn aria_value(self) -> Option<&'static str> {
        match self {
            Self::Horizontal => Some("horizontal"),
            Self::Vertical => Some("vertical"),
            Self::Both => None,
        }
    }
}

/// A single focusable candidate within a [`FocusSpace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusEntry<K> {
    /// Identifier for this item.
    pub id: K,
    /// Optional explicit ordering key.
    ///
    /// Entries with an order come first, sorted by it; the rest keep their
    /// position in the space.
    pub order: Option<i32>,
    /// Whether this item can receive focus.
    ///
    /// Disabled items are skipped during traversal.
    pub enabled: bool,
}

impl<K> FocusEntry<K> {
    /// An enabled entry with no explicit order.
    pub fn new(id: K) -> Self {
        Self {
            id,
            order: None,
            enabled: true,
        }
    }
}

/// A read-only view of focusable candidates, in registration order.
///
/// Policies should treat it as an immutable snapshot.
#[derive(Clone, Debug)]
pub struct FocusSpace<'a, K> {
    /// Focusable candidates of the group.
    pub nodes: &'a [FocusEntry<K>],
}

/// Wrap mode configuration for focus traversal.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WrapMode {
    /// Do not wrap; reaching the end of the sequence yields no next candidate.
    Never,
    /// Wrap around to the other end of the group.
    #[default]
    Wrap,
}

/// Trait for focus traversal policies.
///
/// A policy receives a navigation intent, the current origin (if any item has focus),
/// and a read-only view of candidates, and returns the item to focus next, if any.
pub trait FocusPolicy<K>
where
    K: Clone + Eq,
{
    /// Compute the next focus target given an origin, navigation intent, and focus space.
    fn next(&self, origin: Option<&K>, direction: Navigation, space: &FocusSpace<'_, K>)
    -> Option<K>;
}

/// Linear traversal in explicit order, then registration order.
#[derive(Copy, Clone, Debug, Default)]
pub struct LinearPolicy {
    /// Wrap behavior at the ends of the group.
    pub wrap: WrapMode,
}

impl<K> FocusPolicy<K> for LinearPolicy
where
    K: Clone + Eq,
{
    fn next(
        &self,
        origin: Option<&K>,
        direction: Navigation,
        space: &FocusSpace<'_, K>,
    ) -> Option<K> {
        let nodes = space.nodes;

        // Collect enabled candidates and sort them by explicit order. The sort is
        // stable, so unordered entries keep registration order.
        let mut indices: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.enabled.then_some(i))
            .collect();
        if indices.is_empty() {
            return None;
        }
        indices.sort_by(|&ia, &ib| compare_order(&nodes[ia], &nodes[ib]));

        let first = indices[0];
        let last = indices[indices.len() - 1];
        let wraps = self.wrap == WrapMode::Wrap;

        // Locate the origin within the sorted candidates, if present.
        let origin_pos = origin.and_then(|o| indices.iter().position(|&i| nodes[i].id == *o));

        let picked = match direction {
            Navigation::First => Some(first),
            Navigation::Last => Some(last),
            Navigation::Next => match origin_pos {
                Some(pos) if pos + 1 < indices.len() => Some(indices[pos + 1]),
                Some(_) => wraps.then_some(first),
                None => Some(first),
            },
            Navigation::Prev => match origin_pos {
                Some(pos) if pos > 0 => Some(indices[pos - 1]),
                Some(_) => wraps.then_some(last),
                None => Some(last),
            },
        };
        picked.map(|i| nodes[i].id.clone())
    }
}

fn compare_order<K>(a: &FocusEntry<K>, b: &FocusEntry<K>) -> Ordering {
    match (a.order, b.order) {
        (Some(ao), Some(bo)) => ao.cmp(&bo),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
