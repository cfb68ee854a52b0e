// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Signals, derived values and explicit subscriptions.
//!
//! A [`Signal`] owns a value and a [`Trigger`]. Writing the signal notifies every
//! observer subscribed to its trigger, after the write has completed, so an observer
//! that reads the signal (or anything derived from it) sees the new value.
//!
//! A [`Derived`] value is a read-only accessor recomputed on every read. It carries the
//! triggers of the signals it reads, which lets callers subscribe to "anything this
//! value depends on" without a tracking runtime:
//!
//! ```
//! use core::cell::Cell;
//! use std::rc::Rc;
//! use trellis_state::{Derived, Signal};
//!
//! let local = Signal::new(false);
//! let inherited = Signal::new(false);
//!
//! let is_disabled = {
//!     let (local, inherited) = (local.clone(), inherited.clone());
//!     Derived::new([local.trigger(), inherited.trigger()], move || {
//!         local.get() || inherited.get()
//!     })
//! };
//!
//! let seen = Rc::new(Cell::new(0));
//! let _sub = {
//!     let (seen, is_disabled) = (seen.clone(), is_disabled.clone());
//!     is_disabled.clone().subscribe(move || {
//!         // Observers always read the value produced by the write that notified them.
//!         assert!(is_disabled.get());
//!         seen.set(seen.get() + 1);
//!     })
//! };
//!
//! inherited.set(true);
//! assert!(is_disabled.get());
//! assert_eq!(seen.get(), 1);
//! ```

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;

type Observer = Rc<dyn Fn()>;

struct Observers {
    entries: RefCell<SmallVec<[(u64, Observer); 2]>>,
    next_key: Cell<u64>,
}

/// A list of observers that can be notified of a change.
///
/// Every [`Signal`] owns one trigger. Cloning a trigger yields another handle to the
/// same observer list.
#[derive(Clone)]
pub struct Trigger {
    observers: Rc<Observers>,
}

impl Trigger {
    /// Create a trigger with no observers.
    pub fn new() -> Self {
        Self {
            observers: Rc::new(Observers {
                entries: RefCell::new(SmallVec::new()),
                next_key: Cell::new(0),
            }),
        }
    }

    /// Register `observer` and return the handle that keeps it registered.
    ///
    /// Observers run in subscription order.
    pub fn subscribe(&self, observer: impl Fn() + 'static) -> Subscription {
        let key = self.observers.next_key.get();
        self.observers.next_key.set(key + 1);
        self.observers
            .entries
            .borrow_mut()
            .push((key, Rc::new(observer)));
        Subscription::single(Rc::downgrade(&self.observers), key)
    }

    /// Call every registered observer.
    ///
    /// Observers are snapshotted first, so an observer may subscribe or drop
    /// subscriptions while being notified. Observers added during notification are
    /// not called until the next notification.
    pub fn notify(&self) {
        let snapshot: SmallVec<[Observer; 4]> = self
            .observers
            .entries
            .borrow()
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();
        for observer in snapshot {
            observer();
        }
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.observers.entries.borrow().len()
    }

    /// Whether `self` and `other` share an observer list.
    pub fn same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.observers, &other.observers)
    }
}

impl Default for Trigger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trigger")
            .field("observers", &self.observer_count())
            .finish()
    }
}

/// Handle returned by the `subscribe` methods.
///
/// Dropping the handle unregisters its observers. A subscription may cover several
/// triggers, for example when subscribing to a [`Derived`] value with more than one
/// dependency.
#[must_use = "dropping a subscription unregisters its observer"]
pub struct Subscription {
    entries: SmallVec<[(Weak<Observers>, u64); 1]>,
}

impl Subscription {
    /// A subscription covering nothing.
    pub fn empty() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    fn single(observers: Weak<Observers>, key: u64) -> Self {
        let mut entries = SmallVec::new();
        entries.push((observers, key));
        Self { entries }
    }

    /// Combine two subscriptions into one handle.
    pub fn merge(mut self, mut other: Self) -> Self {
        self.entries.extend(core::mem::take(&mut other.entries));
        self
    }

    /// Whether this handle covers no observer.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep the observers registered for as long as their triggers live.
    pub fn detach(mut self) {
        self.entries.clear();
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        for (observers, key) in self.entries.drain(..) {
            if let Some(observers) = observers.upgrade() {
                observers
                    .entries
                    .borrow_mut()
                    .retain(|(entry_key, _)| *entry_key != key);
            }
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("observers", &self.entries.len())
            .finish()
    }
}

/// A shared mutable cell whose writes notify subscribers.
///
/// Cloning a signal yields another handle to the same cell.
pub struct Signal<T> {
    value: Rc<RefCell<T>>,
    trigger: Trigger,
}

impl<T> Signal<T> {
    /// Create a signal holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            trigger: Trigger::new(),
        }
    }

    /// Read the current value by reference.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.value.borrow())
    }

    /// Replace the value and notify observers if it changed.
    ///
    /// Returns whether the value changed.
    pub fn set(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        {
            let mut slot = self.value.borrow_mut();
            if *slot == value {
                return false;
            }
            *slot = value;
        }
        self.trigger.notify();
        true
    }

    /// Mutate the value in place and notify observers unconditionally.
    ///
    /// `f` must not read this signal.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        f(&mut self.value.borrow_mut());
        self.trigger.notify();
    }

    /// The trigger notified on every write.
    pub fn trigger(&self) -> Trigger {
        self.trigger.clone()
    }

    /// Register `observer` to run after every write.
    pub fn subscribe(&self, observer: impl Fn() + 'static) -> Subscription {
        self.trigger.subscribe(observer)
    }

    /// A derived accessor projecting this signal through `f`.
    pub fn derive<U>(&self, f: impl Fn(&T) -> U + 'static) -> Derived<U>
    where
        T: 'static,
    {
        let source = self.clone();
        Derived::new([self.trigger()], move || source.with(&f))
    }
}

impl<T: Clone> Signal<T> {
    /// Clone out the current value.
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }

    /// A read-only view of this signal.
    pub fn read_only(&self) -> Derived<T>
    where
        T: 'static,
    {
        self.derive(T::clone)
    }
}

impl<T> Clone for Signal<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            trigger: self.trigger.clone(),
        }
    }
}

impl<T: Default> Default for Signal<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Signal");
        match self.value.try_borrow() {
            Ok(value) => s.field("value", &*value),
            Err(_) => s.field("value", &"<borrowed>"),
        };
        s.field("trigger", &self.trigger).finish()
    }
}

/// A read-only value recomputed from its sources on every read.
///
/// Because nothing is cached, a derived value can never disagree with the signals it
/// reads. The dependency triggers are only used for change notification.
pub struct Derived<T> {
    compute: Rc<dyn Fn() -> T>,
    deps: Rc<[Trigger]>,
}

impl<T> Derived<T> {
    /// Create a derived value from its dependency triggers and a compute function.
    ///
    /// Duplicate triggers are collapsed so each observer runs once per write.
    pub fn new(deps: impl IntoIterator<Item = Trigger>, compute: impl Fn() -> T + 'static) -> Self {
        let mut unique: Vec<Trigger> = Vec::new();
        for dep in deps {
            if !unique.iter().any(|seen| seen.same(&dep)) {
                unique.push(dep);
            }
        }
        Self {
            compute: Rc::new(compute),
            deps: unique.into(),
        }
    }

    /// Compute the current value.
    pub fn get(&self) -> T {
        (self.compute)()
    }

    /// Triggers of every source this value reads.
    pub fn triggers(&self) -> &[Trigger] {
        &self.deps
    }

    /// Register `observer` to run after any dependency is written.
    pub fn subscribe(&self, observer: impl Fn() + 'static) -> Subscription {
        let observer: Observer = Rc::new(observer);
        self.deps.iter().fold(Subscription::empty(), |sub, dep| {
            let observer = observer.clone();
            sub.merge(dep.subscribe(move || observer()))
        })
    }

    /// A derived value applying `f` to this one, with the same dependencies.
    pub fn map<U>(&self, f: impl Fn(T) -> U + 'static) -> Derived<U>
    where
        T: 'static,
    {
        let source = self.clone();
        Derived::new(self.deps.iter().cloned(), move || f(source.get()))
    }
}

impl<T: Clone + 'static> Derived<T> {
    /// A value that never changes and has no dependencies.
    pub fn constant(value: T) -> Self {
        Self::new([], move || value.clone())
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            compute: self.compute.clone(),
            deps: self.deps.clone(),
        }
    }
}

impl<T: Clone + 'static> From<Signal<T>> for Derived<T> {
    fn from(signal: Signal<T>) -> Self {
        signal.read_only()
    }
}

impl<T: Clone + Default + 'static> Default for Derived<T> {
    fn default() -> Self {
        Self::constant(T::default())
    }
}

impl<T> fmt::Debug for Derived<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("deps", &self.deps.len())
            .finish_non_exhaustive()
    }
}
