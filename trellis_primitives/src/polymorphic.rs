// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Polymorphic element descriptions.
//!
//! Components do not render markup themselves. Each one produces an [`Element`]: the
//! element kind, its attributes and its composed event handlers. The host turns that
//! into real UI and routes input back through [`Element::dispatch`].
//!
//! The element kind is chosen once, when the component is constructed, from the
//! component's default and an optional `as_` override. Rendering adds no wrapper and
//! no structure of its own.

use alloc::borrow::Cow;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use trellis_event_state::event::DomEvent;
use trellis_event_state::handlers::EventHandlers;

use crate::dataset::DataSet;
use crate::error::Error;

/// The kind of element a component renders as.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `div`
    Div,
    /// `span`
    Span,
    /// `label`
    Label,
    /// `button`
    Button,
    /// `a`
    A,
    /// `input`
    Input,
    /// `h3`
    H3,
    /// Any other element, by lowercase tag name.
    Custom(Cow<'static, str>),
}

impl ElementKind {
    /// The tag name.
    pub fn tag(&self) -> &str {
        match self {
            Self::Div => "div",
            Self::Span => "span",
            Self::Label => "label",
            Self::Button => "button",
            Self::A => "a",
            Self::Input => "input",
            Self::H3 => "h3",
            Self::Custom(tag) => tag,
        }
    }

    /// Whether the host follows Enter/Space activation of this element with a
    /// synthesized click: buttons, links and inputs.
    pub fn synthesizes_key_click(&self) -> bool {
        matches!(self, Self::Button | Self::A | Self::Input)
    }
}

impl FromStr for ElementKind {
    type Err = Error;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let kind = match tag {
            "div" => Self::Div,
            "span" => Self::Span,
            "label" => Self::Label,
            "button" => Self::Button,
            "a" => Self::A,
            "input" => Self::Input,
            "h3" => Self::H3,
            _ => {
                let mut chars = tag.chars();
                let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
                let rest_valid =
                    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
                if !starts_with_letter || !rest_valid {
                    return Err(Error::InvalidElement(tag.to_string()));
                }
                Self::Custom(Cow::Owned(tag.to_string()))
            }
        };
        Ok(kind)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An ordered attribute map.
///
/// Setting an existing name replaces its value in place, so attributes keep the
/// order in which they were first set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(Cow<'static, str>, String)>,
}

impl Attributes {
    /// An empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`.
    pub fn set(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set `name` when `value` is `Some`, remove it otherwise.
    pub fn set_opt(&mut self, name: impl Into<Cow<'static, str>>, value: Option<impl Into<String>>) {
        let name = name.into();
        match value {
            Some(value) => self.set(name, value),
            None => {
                self.remove(&name);
            }
        }
    }

    /// Set `name` to the empty string when `present`, remove it otherwise.
    pub fn set_flag(&mut self, name: impl Into<Cow<'static, str>>, present: bool) {
        self.set_opt(name, present.then_some(""));
    }

    /// Remove `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let index = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(index).1)
    }

    /// The value of `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Whether `name` is set.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Attributes in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (&**n, v.as_str()))
    }

    /// Write every exposed key of `dataset`: present keys as `""`, absent ones removed.
    pub fn apply_dataset(&mut self, dataset: &DataSet) {
        for (name, value) in dataset.iter() {
            self.set_opt(name, value);
        }
    }

    /// Overlay `other`; its values win.
    pub fn merge(&mut self, other: Self) {
        for (name, value) in other.entries {
            self.set(name, value);
        }
    }
}

/// Caller-supplied input to a component's render: extra attributes and handlers.
#[derive(Debug, Default)]
pub struct ElementProps {
    /// Pass-through attributes; they override the component's own.
    pub attributes: Attributes,
    /// Caller handlers; they run before the component's own.
    pub handlers: EventHandlers,
}

impl ElementProps {
    /// Empty props.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pass-through attribute.
    pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    /// Replace the caller handlers.
    pub fn handlers(mut self, handlers: EventHandlers) -> Self {
        self.handlers = handlers;
        self
    }
}

/// The element kind a component resolved at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polymorphic {
    kind: ElementKind,
}

impl Polymorphic {
    /// Resolve `as_` against the component's default kind.
    pub fn new(default: ElementKind, as_: Option<ElementKind>) -> Self {
        Self {
            kind: as_.unwrap_or(default),
        }
    }

    /// The resolved kind.
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Render with the component's own attributes and handlers plus the caller's props.
    pub fn render(&self, own: Attributes, props: ElementProps, internal: EventHandlers) -> Element {
        let mut attributes = own;
        attributes.merge(props.attributes);
        Element {
            kind: self.kind.clone(),
            attributes,
            handlers: EventHandlers::compose(props.handlers, internal),
        }
    }
}

/// A rendered element description.
#[derive(Debug)]
pub struct Element {
    /// What to render.
    pub kind: ElementKind,
    /// Attributes in order.
    pub attributes: Attributes,
    /// Composed handlers.
    pub handlers: EventHandlers,
}

impl Element {
    /// Deliver `event` to this element's handlers. Returns whether a handler ran.
    pub fn dispatch(&mut self, event: &mut DomEvent) -> bool {
        self.handlers.dispatch(event)
    }

    /// The value of attribute `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)
    }
}

impl fmt::Display for Element {
    /// Formats the opening tag, e.g. `<label id="a" data-checked="">`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}", self.kind)?;
        for (name, value) in self.attributes.iter() {
            write!(f, " {name}=\"")?;
            for c in value.chars() {
                match c {
                    '&' => f.write_str("&amp;")?,
                    '"' => f.write_str("&quot;")?,
                    '<' => f.write_str("&lt;")?,
                    c => write!(f, "{c}")?,
                }
            }
            f.write_str("\"")?;
        }
        f.write_str(">")
    }
}
