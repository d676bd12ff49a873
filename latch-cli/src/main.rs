//! Demonstration binary for the latch command binder.
//!
//! Registers a handful of commands with typed option holders, then feeds the
//! process argument vector straight into the registry. Each action reads its
//! holder after binding has filled it.

use ansi_term::Colour::{Green, Yellow};
use anyhow::Result;
use latch_core::{App, LatchError, Options, Slot, REST_FIELD};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Default)]
struct GreetOpts {
    name: String,
    count: u8,
    shout: bool,
    rest: Vec<String>,
}

impl Options for GreetOpts {
    fn field(&mut self, name: &str) -> Option<Slot<'_>> {
        match name {
            "Name" => Some(Slot::Str(&mut self.name)),
            "Count" => Some(Slot::U8(&mut self.count)),
            "Shout" => Some(Slot::Bool(&mut self.shout)),
            REST_FIELD => Some(Slot::StrList(&mut self.rest)),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct SumOpts {
    scale: f64,
    rest: Vec<String>,
}

impl Options for SumOpts {
    fn field(&mut self, name: &str) -> Option<Slot<'_>> {
        match name {
            "Scale" => Some(Slot::F64(&mut self.scale)),
            REST_FIELD => Some(Slot::StrList(&mut self.rest)),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct ShowOpts {
    label: String,
    offset: i16,
    limit: u32,
    ratio: f32,
    raw: bool,
}

impl Options for ShowOpts {
    fn field(&mut self, name: &str) -> Option<Slot<'_>> {
        match name {
            "Label" => Some(Slot::Str(&mut self.label)),
            "Offset" => Some(Slot::I16(&mut self.offset)),
            "Limit" => Some(Slot::U32(&mut self.limit)),
            "Ratio" => Some(Slot::F32(&mut self.ratio)),
            "Raw" => Some(Slot::Bool(&mut self.raw)),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();

    let mut app = App::new(
        "latch",
        "Binds command-line flags to typed option holders",
        "v0.1.0",
    );

    let greet = Rc::new(RefCell::new(GreetOpts::default()));
    let greet_opts = greet.clone();
    app.register(
        "greet",
        "Print a greeting for -name, -count times",
        move || {
            let opts = greet_opts.borrow();
            let who = if opts.name.is_empty() {
                "world"
            } else {
                opts.name.as_str()
            };
            let mut line = format!("Hello, {}", who);
            for extra in &opts.rest {
                line.push_str(", ");
                line.push_str(extra);
            }
            if opts.shout {
                line = line.to_uppercase();
            }
            let painted = Green.paint(line);
            for _ in 0..opts.count.max(1) {
                println!("{}", painted);
            }
            Ok(())
        },
        Some(greet as Rc<RefCell<dyn Options>>),
    )?;

    let sum = Rc::new(RefCell::new(SumOpts::default()));
    let sum_opts = sum.clone();
    app.register(
        "sum",
        "Add the positional numbers, scaled by -scale",
        move || {
            let opts = sum_opts.borrow();
            let mut total = 0.0;
            for token in &opts.rest {
                let value: f64 = token
                    .parse()
                    .map_err(|_| LatchError::Other(format!("Not a number: '{}'", token)))?;
                total += value;
            }
            let scale = if opts.scale == 0.0 { 1.0 } else { opts.scale };
            println!("{} {}", Yellow.paint("total:"), total * scale);
            Ok(())
        },
        Some(sum as Rc<RefCell<dyn Options>>),
    )?;

    let show = Rc::new(RefCell::new(ShowOpts::default()));
    let show_opts = show.clone();
    app.register(
        "show",
        "Dump the bound options as JSON",
        move || {
            let opts = show_opts.borrow();
            let value = json!({
                "label": opts.label,
                "offset": opts.offset,
                "limit": opts.limit,
                "ratio": opts.ratio,
                "raw": opts.raw,
            });
            if opts.raw {
                println!("{}", value);
            } else {
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            Ok(())
        },
        Some(show as Rc<RefCell<dyn Options>>),
    )?;

    app.register(
        "version",
        "Print the library version",
        || {
            println!("latch {}", latch_core::VERSION);
            Ok(())
        },
        None,
    )?;

    app.run(&argv)?;
    Ok(())
}
