// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection state and item registration for groups.
//!
//! A [`SelectionManager`] owns the set of selected values of a group and enforces the
//! group's mode: single or multiple selection, and whether the selection may become
//! empty. An [`ItemRegistry`] records the group's items in mount order so keyboard
//! navigation can walk them and duplicate values are rejected.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;
use trellis_focus::{FocusEntry, FocusPolicy, FocusSpace, LinearPolicy, Navigation, WrapMode};
use trellis_state::{Derived, Signal, Subscription, Trigger};

use crate::error::Error;

/// How many values a group may select at once.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SelectionMode {
    /// At most one value.
    #[default]
    Single,
    /// Any number of values.
    Multiple,
}

/// The selected values of a group.
///
/// Cloning yields another handle to the same selection.
#[derive(Clone, Debug)]
pub struct SelectionManager {
    mode: SelectionMode,
    allows_empty: bool,
    selected: Signal<HashSet<String>>,
}

impl SelectionManager {
    /// Create a selection. In single mode only the first initial value is kept.
    pub fn new(
        mode: SelectionMode,
        allows_empty: bool,
        initial: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut selected = HashSet::new();
        for value in initial {
            if mode == SelectionMode::Single && !selected.is_empty() {
                break;
            }
            selected.insert(value.into());
        }
        Self {
            mode,
            allows_empty,
            selected: Signal::new(selected),
        }
    }

    /// The selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Whether deselecting the last value is allowed.
    pub fn allows_empty_selection(&self) -> bool {
        self.allows_empty
    }

    /// Whether `value` is selected.
    pub fn is_selected(&self, value: &str) -> bool {
        self.selected.with(|set| set.contains(value))
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.with(HashSet::is_empty)
    }

    /// The selected values, sorted.
    pub fn selected_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.selected.with(|set| set.iter().cloned().collect());
        keys.sort_unstable();
        keys
    }

    /// The selected values as a read-only accessor.
    pub fn selection(&self) -> Derived<Vec<String>> {
        let this = self.clone();
        Derived::new([self.selected.trigger()], move || this.selected_keys())
    }

    /// Select `value`. In single mode this replaces the selection.
    ///
    /// Returns whether the selection changed.
    pub fn select(&self, value: &str) -> bool {
        let next = self.selected.with(|set| {
            let mut next = match self.mode {
                SelectionMode::Single => HashSet::new(),
                SelectionMode::Multiple => set.clone(),
            };
            next.insert(String::from(value));
            next
        });
        self.commit(next)
    }

    /// Deselect `value`, unless that would empty a selection that must not be empty.
    ///
    /// Returns whether the selection changed.
    pub fn deselect(&self, value: &str) -> bool {
        let next = self.selected.with(|set| {
            let mut next = set.clone();
            next.remove(value);
            next
        });
        if next.is_empty() && !self.allows_empty {
            return false;
        }
        self.commit(next)
    }

    /// Select `value` if unselected, deselect it otherwise.
    pub fn toggle(&self, value: &str) -> bool {
        if self.is_selected(value) {
            self.deselect(value)
        } else {
            self.select(value)
        }
    }

    /// Replace the whole selection. In single mode only the first value is kept.
    pub fn replace(&self, values: impl IntoIterator<Item = impl Into<String>>) -> bool {
        let mut next = HashSet::new();
        for value in values {
            if self.mode == SelectionMode::Single && !next.is_empty() {
                break;
            }
            next.insert(value.into());
        }
        if next.is_empty() && !self.allows_empty {
            return false;
        }
        self.commit(next)
    }

    /// Deselect everything, if an empty selection is allowed.
    pub fn clear(&self) -> bool {
        if !self.allows_empty {
            return false;
        }
        self.commit(HashSet::new())
    }

    /// The trigger notified when the selection changes.
    pub fn trigger(&self) -> Trigger {
        self.selected.trigger()
    }

    /// Run `observer` after every selection change.
    pub fn subscribe(&self, observer: impl Fn() + 'static) -> Subscription {
        self.selected.subscribe(observer)
    }

    fn commit(&self, next: HashSet<String>) -> bool {
        let changed = self.selected.set(next);
        if changed {
            tracing::debug!(selected = ?self.selected_keys(), "selection changed");
        }
        changed
    }
}

#[derive(Clone)]
struct RegisteredItem {
    value: String,
    is_disabled: Derived<bool>,
}

#[derive(Clone, Default)]
struct Registry {
    order: Vec<RegisteredItem>,
    values: HashSet<String>,
}

/// The items of a group, in mount order.
#[derive(Clone, Default)]
pub struct ItemRegistry {
    items: Signal<Registry>,
}

impl ItemRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an item. Fails if another live item has the same value.
    pub fn register(
        &self,
        value: impl Into<String>,
        is_disabled: Derived<bool>,
    ) -> Result<ItemRegistration, Error> {
        let value = value.into();
        if self.contains(&value) {
            return Err(Error::DuplicateValue(value));
        }
        tracing::debug!(value = %value, "registering item");
        self.items.update(|registry| {
            registry.values.insert(value.clone());
            registry.order.push(RegisteredItem {
                value: value.clone(),
                is_disabled,
            });
        });
        Ok(ItemRegistration {
            items: self.items.clone(),
            value,
        })
    }

    /// Whether an item with `value` is registered.
    pub fn contains(&self, value: &str) -> bool {
        self.items.with(|registry| registry.values.contains(value))
    }

    /// Registered values in mount order.
    pub fn values(&self) -> Vec<String> {
        self.items
            .with(|registry| registry.order.iter().map(|item| item.value.clone()).collect())
    }

    /// Number of registered items.
    pub fn len(&self) -> usize {
        self.items.with(|registry| registry.order.len())
    }

    /// Whether no item is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the item with `value` is currently disabled.
    pub fn is_disabled(&self, value: &str) -> Option<bool> {
        let item = self.items.with(|registry| {
            registry
                .order
                .iter()
                .find(|item| item.value == value)
                .cloned()
        })?;
        Some(item.is_disabled.get())
    }

    /// The trigger notified when items mount or unmount.
    pub fn trigger(&self) -> Trigger {
        self.items.trigger()
    }

    /// The item `navigation` leads to from `origin`, skipping disabled items.
    pub fn navigate(&self, origin: Option<&str>, navigation: Navigation, wrap: WrapMode) -> Option<String> {
        // Snapshot first; disabled accessors may read other signals.
        let items: Vec<RegisteredItem> = self.items.with(|registry| registry.order.clone());
        let entries: Vec<FocusEntry<String>> = items
            .iter()
            .map(|item| FocusEntry {
                enabled: !item.is_disabled.get(),
                ..FocusEntry::new(item.value.clone())
            })
            .collect();
        let origin = origin.map(String::from);
        LinearPolicy { wrap }.next(origin.as_ref(), navigation, &FocusSpace { nodes: &entries })
    }
}

impl fmt::Debug for ItemRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRegistry")
            .field("values", &self.values())
            .finish()
    }
}

/// A registered item; unregistered on drop.
#[must_use = "dropping the registration removes the item from its group"]
pub struct ItemRegistration {
    items: Signal<Registry>,
    value: String,
}

impl ItemRegistration {
    /// The registered value.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Drop for ItemRegistration {
    fn drop(&mut self) {
        tracing::debug!(value = %self.value, "unregistering item");
        let value = &self.value;
        self.items.update(|registry| {
            registry.values.remove(value.as_str());
            registry.order.retain(|item| item.value != *value);
        });
    }
}

impl fmt::Debug for ItemRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRegistration")
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}
