//! Counter Example - The runtime on a real terminal
//!
//! This example demonstrates everything working together:
//! - Signals bound to text, a checkbox and a text input
//! - A list rebuilt from a store
//! - Show toggled by a checkbox
//! - A scroll container driven by the mouse wheel
//! - Tab / Shift+Tab focus, Enter to activate
//!
//! Logs go to `spark-grid.log` (filter with `RUST_LOG`, e.g.
//! `RUST_LOG=spark_grid=debug`).
//!
//! Run with: cargo run --example counter

use std::fs::File;
use std::rc::Rc;
use std::sync::Mutex;

use spark_grid::prelude::*;
use spark_grid::{AlignItems, JustifyContent};
use tracing_subscriber::EnvFilter;

fn main() -> spark_grid::Result<()> {
    let log = File::create("spark-grid.log")?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    let mut host = TerminalHost::new()?;
    let config = RuntimeConfig {
        theme: spark_grid::get_preset("dracula").unwrap_or_default(),
        ..RuntimeConfig::default()
    };
    run(&mut host, config, app)
}

fn app() -> Node {
    let count = signal(0i32);
    let show_details = signal(true);
    let draft = signal(String::new());
    let (todos, set_todos) = create_store(vec![String::from("read the docs")]);

    let header = row(vec![
        heading(1, "spark-grid"),
        button(ButtonProps::new("quit", || {
            request_stop();
        })),
    ]);

    let counter = {
        let (label, inc, dec) = (count.clone(), count.clone(), count.clone());
        container(ContainerProps {
            style: Style {
                align: AlignItems::Center,
                ..Style::row()
            },
            children: vec![
                button(ButtonProps::new("-", move || dec.update(|c| *c -= 1))),
                text(derive(move || format!("count = {}", label.get()))),
                button(ButtonProps::new("+", move || inc.update(|c| *c += 1))),
            ],
        })
    };

    let details = {
        let toggle = checkbox(CheckboxProps::bound(show_details.clone()));
        let count = count.clone();
        let body = show(
            show_details,
            move || {
                let count = count.clone();
                text(derive(move || {
                    let value = count.get();
                    if value % 2 == 0 {
                        format!("{value} is even")
                    } else {
                        format!("{value} is odd")
                    }
                }))
            },
            Some(|| text("details hidden")),
        );
        column(vec![row(vec![toggle, text("show details")]), body])
    };

    let entry = {
        let submit_draft = draft.clone();
        let add = set_todos.clone();
        text_input(InputProps {
            placeholder: String::from("new todo, Enter to add"),
            width: Some(24),
            on_submit: Some(Rc::new(move |item: String| {
                if item.trim().is_empty() {
                    return;
                }
                add.update(|items| {
                    let mut next = items.clone();
                    next.push(item.clone());
                    next
                });
                submit_draft.set(String::new());
            })),
            ..InputProps::bound(draft)
        })
    };

    let todo_list = scroll(
        ScrollProps {
            width: Dimension::Cells(30),
            height: Dimension::Cells(6),
            ..ScrollProps::default()
        },
        list(todos.signal(), |item: String, index| {
            text(derive(move || format!("{}. {item}", index.get() + 1)))
        }),
    );

    container(ContainerProps {
        style: Style {
            justify: JustifyContent::Start,
            width: Some(Dimension::FillDisplay),
            height: Some(Dimension::FillDisplay),
            ..Style::column()
        },
        children: vec![header, counter, details, entry, todo_list],
    })
}
