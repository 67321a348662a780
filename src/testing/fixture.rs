//! The reference portfolio page, with fixed geometry for a 1280x800 window.
//!
//! ```text
//! body                         0..4200
//! ├── header > nav             0..80     .nav-toggle, 5 a.nav-link
//! ├── section#hero            80..800    .animate-title, .glass-card, #downloadResume.ripple
//! ├── section#about          800..1400   .reveal @900, .timeline-item @1150
//! ├── section#projects      1400..2200   3 .proj-card @1500
//! ├── section#skills        2200..3000   2 .skill @2300, .progress[80] @2500, .progress @2600
//! ├── section#contact       3000..4000   form#contactForm, #contactSuccess
//! ├── button#scrollTop
//! └── footer                4000..4200
//! ```

use crate::config::FxConfig;
use crate::dom::{Dom, NodeData, NodeId};
use crate::geometry::Region;
use crate::page::Page;

const WIDTH: i32 = 1280;

fn block(dom: &mut Dom, parent: NodeId, data: NodeData) -> NodeId {
    // Parents in the fixture always exist.
    dom.append_child(parent, data).unwrap_or(parent)
}

fn section(dom: &mut Dom, body: NodeId, id: &str, y: i32, height: i32) -> NodeId {
    block(dom, body, NodeData::new("section").with_id(id).with_layout(Region::new(0, y, WIDTH, height)))
}

/// Build the portfolio DOM.
pub fn portfolio_dom() -> Dom {
    let mut dom = Dom::new();
    let html = dom.insert(NodeData::new("html").with_layout(Region::new(0, 0, WIDTH, 4200)));
    let body = block(&mut dom, html, NodeData::new("body").with_layout(Region::new(0, 0, WIDTH, 4200)));

    // Header & nav
    let header = block(&mut dom, body, NodeData::new("header").with_layout(Region::new(0, 0, WIDTH, 80)));
    let nav = block(&mut dom, header, NodeData::new("nav").with_layout(Region::new(0, 0, WIDTH, 80)));
    block(&mut dom, nav, NodeData::new("button").with_class("nav-toggle").with_layout(Region::new(1220, 20, 40, 40)));
    for (i, target) in ["hero", "about", "projects", "skills", "contact"].into_iter().enumerate() {
        block(
            &mut dom,
            nav,
            NodeData::new("a")
                .with_id(format!("link-{target}"))
                .with_class("nav-link")
                .with_attr("href", format!("#{target}"))
                .with_layout(Region::new(600 + 110 * i as i32, 28, 100, 24)),
        );
    }

    // Hero
    let hero = section(&mut dom, body, "hero", 80, 720);
    block(&mut dom, hero, NodeData::new("h1").with_class("animate-title").with_layout(Region::new(100, 200, 600, 80)));
    block(&mut dom, hero, NodeData::new("div").with_class("glass-card").with_layout(Region::new(800, 200, 300, 300)));
    block(
        &mut dom,
        hero,
        NodeData::new("button")
            .with_id("downloadResume")
            .with_classes(["btn", "ripple"])
            .with_layout(Region::new(100, 400, 160, 48)),
    );

    // About
    let about = section(&mut dom, body, "about", 800, 600);
    block(&mut dom, about, NodeData::new("div").with_id("intro").with_class("reveal").with_layout(Region::new(100, 900, 1080, 200)));
    block(&mut dom, about, NodeData::new("div").with_id("job").with_class("timeline-item").with_layout(Region::new(100, 1150, 1080, 120)));

    // Projects
    let projects = section(&mut dom, body, "projects", 1400, 800);
    for i in 0..3 {
        block(
            &mut dom,
            projects,
            NodeData::new("article")
                .with_id(format!("project-{i}"))
                .with_classes(["card", "proj-card"])
                .with_layout(Region::new(100 + 380 * i, 1500, 320, 300)),
        );
    }

    // Skills
    let skills = section(&mut dom, body, "skills", 2200, 800);
    for i in 0..2 {
        block(
            &mut dom,
            skills,
            NodeData::new("div")
                .with_id(format!("skill-{i}"))
                .with_class("skill")
                .with_layout(Region::new(100 + 600 * i, 2300, 500, 100)),
        );
    }
    for (id, y, percent) in [("bar-rust", 2500, Some("80")), ("bar-misc", 2600, None)] {
        let mut bar = NodeData::new("div")
            .with_id(id)
            .with_class("progress")
            .with_layout(Region::new(100, y, 500, 12));
        if let Some(p) = percent {
            bar = bar.with_attr("data-percent", p);
        }
        let bar = block(&mut dom, skills, bar);
        block(
            &mut dom,
            bar,
            NodeData::new("div").with_id(format!("{id}-fill")).with_class("fill").with_layout(Region::new(100, y, 0, 12)),
        );
    }

    // Contact
    let contact = section(&mut dom, body, "contact", 3000, 1000);
    let form = block(&mut dom, contact, NodeData::new("form").with_id("contactForm").with_layout(Region::new(100, 3100, 600, 600)));
    for (input, tag, error) in [("name", "input", "err-name"), ("email", "input", "err-email"), ("message", "textarea", "err-message")] {
        block(&mut dom, form, NodeData::new(tag).with_id(input));
        block(&mut dom, form, NodeData::new("div").with_id(error).with_class("error"));
    }
    block(
        &mut dom,
        form,
        NodeData::new("button")
            .with_id("send")
            .with_classes(["btn", "ripple"])
            .with_attr("type", "submit")
            .with_layout(Region::new(100, 3600, 120, 40)),
    );
    block(&mut dom, form, NodeData::new("button").with_id("clearForm").with_layout(Region::new(240, 3600, 120, 40)));
    block(&mut dom, contact, NodeData::new("div").with_id("contactSuccess").with_layout(Region::new(100, 3720, 600, 40)));

    block(&mut dom, body, NodeData::new("button").with_id("scrollTop").with_layout(Region::new(1200, 3900, 48, 48)));
    block(&mut dom, body, NodeData::new("footer").with_layout(Region::new(0, 4000, WIDTH, 200)));
    dom
}

/// The portfolio page with default config, not yet loaded.
pub fn portfolio_page() -> Page {
    Page::new(portfolio_dom(), FxConfig::default())
}
