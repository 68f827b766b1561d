// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two right-hand drawers and a declarative panel, driven by a fake clock.
//!
//! This example shows how to combine:
//! - `understory_element_tree` as the document,
//! - `understory_drawer::document` for trigger routing and the open/close state machine,
//! - `understory_drawer::panel` for a master/detail panel whose open state the app owns.
//!
//! Run:
//! - `RUST_LOG=understory_drawer=debug cargo run -p understory_demos --example drawer_document`

use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_drawer::document::DrawerDocument;
use understory_drawer::panel::{DrawerProps, Panel, PanelEffect};
use understory_drawer::views::ViewNode;
use understory_element_tree::{Element, NodeId, Tag, Tree};
use understory_focus::KeyPress;

fn drawer(tree: &mut Tree, parent: NodeId, id: &str) -> NodeId {
    let drawer = tree.insert(
        Some(parent),
        Element::new(Tag::Div)
            .with_id(id)
            .with_class("o-drawer-right")
            .with_class("o-drawer-animated")
            .with_attr("data-o-component", "o-drawer"),
    );
    let target = format!("#{id}");
    tree.insert(
        Some(drawer),
        Element::new(Tag::Button)
            .with_attr("data-close", "o-drawer")
            .with_attr("data-target", &target),
    );
    tree.insert(
        Some(drawer),
        Element::new(Tag::Anchor).with_attr("href", "/settings"),
    );
    drawer
}

fn trigger(tree: &mut Tree, parent: NodeId, id: &str) -> NodeId {
    tree.insert(
        Some(parent),
        Element::new(Tag::Anchor)
            .with_attr("data-toggle", "o-drawer")
            .with_attr("href", &format!("#{id}")),
    )
}

fn print_events(doc: &mut DrawerDocument) {
    for event in doc.take_events() {
        println!("  signal {} on {:?}", event.name(), event.target);
    }
}

fn vanilla() {
    let mut tree = Tree::new();
    let body = tree.insert(None, Element::new(Tag::Body));
    let account = drawer(&mut tree, body, "account");
    let cart = drawer(&mut tree, body, "cart");
    let account_trigger = trigger(&mut tree, body, "account");
    let cart_trigger = trigger(&mut tree, body, "cart");

    let mut doc = DrawerDocument::new(tree);
    let built = doc.init(None).expect("static selectors");
    info!(drawers = built.len(), "constructed");

    let mut now = 0;
    println!("click account trigger at {now}ms");
    doc.click(account_trigger, now);
    print_events(&mut doc);

    while let Some(due) = doc.drawers().next_deadline() {
        now = due;
        doc.advance(now);
    }
    println!(
        "after {now}ms: account open={}, focus={:?}",
        doc.is_open(account),
        doc.tree().active_element()
    );

    let outcome = doc.key_down(KeyPress::SHIFT_TAB, now);
    println!("shift+tab on the entry point -> {outcome:?}");

    now += 100;
    println!("click cart trigger at {now}ms");
    doc.click(cart_trigger, now);
    print_events(&mut doc);
    println!(
        "account open={}, cart open={}",
        doc.is_open(account),
        doc.is_open(cart)
    );

    now += 400;
    doc.advance(now);
    let shown = doc.tree().element(account).is_some_and(|e| e.is_visible());
    println!("after the close transition account is shown={shown}");
}

fn declarative() {
    let views = vec![
        ViewNode::basic("Orders").with_detail("orders"),
        ViewNode::basic("Help"),
        ViewNode::detail("orders", "Recent orders"),
    ];
    let props = DrawerProps::new("side-panel", "app-root");
    let mut panel: Panel<u32, &str> = Panel::new(props, views)
        .expect("required props are set")
        .on_basic_click(|index, label| println!("  basic view {index} ({label}) clicked"));

    let show = |effects: &[PanelEffect<u32>]| println!("  effects {effects:?}");
    show(&panel.set_open(true));
    show(&panel.select_basic(0));
    let rendered: Vec<_> = panel.visible_views().iter().map(|v| v.content).collect();
    println!("  rendering {rendered:?}");

    let controls = [1, 2, 3];
    for _ in 0..4 {
        show(&panel.handle_key(KeyPress::TAB, &controls));
    }
    show(&panel.back());
    show(&panel.handle_key(KeyPress::ESCAPE, &controls));
    println!("  panel open={}", panel.is_open());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("vanilla document:");
    vanilla();
    println!("declarative panel:");
    declarative();
}
