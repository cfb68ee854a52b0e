// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An FAQ accordion driven by synthetic events.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p trellis_demos --example accordion`

use std::rc::Rc;

use tracing_subscriber::EnvFilter;
use trellis_event_state::event::{DomEvent, FocusEvent, FocusModality, Key, KeyboardEvent, MouseEvent};
use trellis_primitives::Error;
use trellis_primitives::accordion::{
    Accordion, AccordionContent, AccordionHeader, AccordionItem, AccordionItemOptions,
    AccordionOptions, AccordionTrigger,
};
use trellis_primitives::polymorphic::ElementProps;

struct Section {
    item: AccordionItem,
    header: AccordionHeader,
    trigger: AccordionTrigger,
    content: AccordionContent,
}

fn print_tree(accordion: &Accordion, sections: &[Section]) {
    println!("{}", accordion.render(ElementProps::new()));
    for section in sections {
        println!("  {}", section.item.render(ElementProps::new()));
        println!("    {}", section.header.render(ElementProps::new()));
        println!("      {}", section.trigger.render(ElementProps::new()));
        if let Some(el) = section.content.render(ElementProps::new()) {
            println!("    {el}");
        }
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let accordion = Accordion::new(AccordionOptions {
        id: Some("faq".into()),
        is_collapsible: true,
        on_change: Some(Rc::new(|values: Vec<String>| {
            tracing::info!(?values, "accordion expansion changed");
        })),
        ..Default::default()
    });

    let mut sections = Vec::new();
    for value in ["shipping", "returns", "warranty"] {
        let item = AccordionItem::new(
            &accordion,
            AccordionItemOptions {
                value: value.into(),
                ..Default::default()
            },
        )?;
        let ctx = item.context().clone();
        sections.push(Section {
            header: AccordionHeader::new(&ctx, Default::default()),
            trigger: AccordionTrigger::new(&ctx, Default::default()),
            content: AccordionContent::new(&ctx, Default::default()),
            item,
        });
    }

    println!("== initial");
    print_tree(&accordion, &sections);

    let mut trigger = sections[0].trigger.render(ElementProps::new());
    trigger.dispatch(&mut DomEvent::Click(MouseEvent::virtual_click()));
    println!("== after clicking shipping");
    print_tree(&accordion, &sections);

    // Keyboard: focus moves down the triggers; Enter toggles the focused one.
    trigger.dispatch(&mut DomEvent::Focus(FocusEvent::new(FocusModality::Keyboard)));
    trigger.dispatch(&mut DomEvent::KeyDown(KeyboardEvent::new(Key::ArrowDown)));
    let focused = accordion.focused_value();
    println!("== focus moved to {focused:?}");
    if let Some(section) = sections
        .iter()
        .find(|s| Some(s.item.context().value()) == focused.as_deref())
    {
        let mut next = section.trigger.render(ElementProps::new());
        next.dispatch(&mut DomEvent::KeyDown(KeyboardEvent::new(Key::Enter)));
        next.dispatch(&mut DomEvent::KeyUp(KeyboardEvent::new(Key::Enter)));
    }
    println!("== after Enter");
    print_tree(&accordion, &sections);
    Ok(())
}
