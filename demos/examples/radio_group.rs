// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A billing-period radio group driven by synthetic events.
//!
//! Shows the element descriptions a host would render, how pointer and keyboard
//! input move the selection, and the `data-*` attributes styling hooks see.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p trellis_demos --example radio_group`

use std::rc::Rc;

use kurbo::Point;
use tracing_subscriber::EnvFilter;
use trellis_event_state::event::{
    DomEvent, FocusEvent, FocusModality, Key, KeyboardEvent, PointerEvent, PointerType,
};
use trellis_primitives::Error;
use trellis_primitives::polymorphic::{Element, ElementProps};
use trellis_primitives::radio_group::{
    RadioGroup, RadioGroupItem, RadioGroupItemIndicator, RadioGroupItemInput,
    RadioGroupItemOptions, RadioGroupOptions, RadioGroupPartOptions, RadioGroupText,
    RadioGroupTextKind,
};

fn print_tree(group: &RadioGroup, label: &RadioGroupText, items: &[Item]) {
    println!("{}", group.render(ElementProps::new()));
    if let Some(el) = label.render(ElementProps::new()) {
        println!("  {el}");
    }
    for item in items {
        println!("  {}", item.root.render(ElementProps::new()));
        println!("    {}", item.input.render(ElementProps::new()));
        if let Some(el) = item.indicator.render(ElementProps::new()) {
            println!("    {el}");
        }
    }
}

struct Item {
    root: RadioGroupItem,
    input: RadioGroupItemInput,
    indicator: RadioGroupItemIndicator,
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let group = RadioGroup::new(RadioGroupOptions {
        id: Some("billing".into()),
        default_value: Some("monthly".into()),
        on_change: Some(Rc::new(|value: String| {
            tracing::info!(%value, "billing period changed");
        })),
        ..Default::default()
    });
    let label = RadioGroupText::new(&group, RadioGroupTextKind::Label, None);

    let mut items = Vec::new();
    for (value, is_disabled) in [("monthly", false), ("quarterly", true), ("yearly", false)] {
        let root = RadioGroupItem::new(
            &group,
            RadioGroupItemOptions {
                value: value.into(),
                is_disabled,
                ..Default::default()
            },
        )?;
        let input = RadioGroupItemInput::new(root.context(), RadioGroupPartOptions::default());
        let indicator = RadioGroupItemIndicator::new(root.context(), Default::default());
        items.push(Item {
            root,
            input,
            indicator,
        });
    }

    println!("== initial");
    print_tree(&group, &label, &items);

    // Keyboard: focus the first input and arrow down; the disabled item is skipped.
    let mut input: Element = items[0].input.render(ElementProps::new());
    input.dispatch(&mut DomEvent::Focus(FocusEvent::new(FocusModality::Keyboard)));
    input.dispatch(&mut DomEvent::KeyDown(KeyboardEvent::new(Key::ArrowDown)));
    println!("== after ArrowDown");
    print_tree(&group, &label, &items);

    // Pointer: press the first item's label.
    let at = Point::new(4.0, 4.0);
    let mut root = items[0].root.render(ElementProps::new());
    root.dispatch(&mut DomEvent::PointerEnter(PointerEvent::new(PointerType::Mouse, at)));
    root.dispatch(&mut DomEvent::PointerDown(PointerEvent::new(PointerType::Mouse, at)));
    println!("== pressing monthly");
    println!("  {}", items[0].root.render(ElementProps::new()));
    root.dispatch(&mut DomEvent::PointerUp(PointerEvent::new(PointerType::Mouse, at)));
    println!("== after release");
    print_tree(&group, &label, &items);

    // A disabled group ignores input.
    group.form_control().set_disabled(true);
    let mut input = items[2].input.render(ElementProps::new());
    input.dispatch(&mut DomEvent::KeyDown(KeyboardEvent::new(Key::ArrowUp)));
    println!("== disabled group");
    print_tree(&group, &label, &items);
    Ok(())
}
