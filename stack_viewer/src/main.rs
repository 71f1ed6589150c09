//! # stack_viewer
//!
//! Command line tool for checking a setup file: it builds every stack the file describes and
//! prints an overview of each, then writes the full stacks as JSON next to the setup.
//!
//! ## Setup files
//! * A list of `units`, each with a `label` and a `unit_type`
//! * A list of `groups`, each with an optional `position` and one or more `stacks`
//! * Each stack entry names a unit by its number in the unit list, may give a `unit_id` and a
//! `stack_id`, and may list `portaged` entries of the same shape
//! * Either leave every `stack_id` out or make them unique within their group
//!
//! Log verbosity is read from `STACK_VIEWER_LOG` (error, warn, info, debug, trace).

mod read;
mod setup;

use std::env;
use std::fs;

use eyre::Result;
use log::{info, Level};
use prelude::lang;

use crate::read::*;
use crate::setup::Setup;

fn log_level() -> Level {
    env::var("STACK_VIEWER_LOG")
        .ok()
        .and_then(|level| level.parse().ok())
        .unwrap_or(Level::Info)
}

fn main() -> Result<()> {
    simple_logger::init_with_level(log_level())?;

    get_lang()?;

    let path = get_path()?;
    let setup = Setup::from_json(&fs::read_to_string(&path)?)?;
    let stacks = setup.build()?;
    info!("Built {} stacks from {path}", stacks.len());

    for stack in &stacks {
        println!("{}\n", stack.to_text());
    }

    let json = stacks
        .iter()
        .map(|stack| stack.to_json())
        .collect::<serde_json::Result<Vec<_>>>()?;
    let out_path = path + OUTPUT_SUFFIX;
    fs::write(&out_path, format!("[\n{}\n]\n", json.join(",\n")))?;

    println!(
        "{}: {}",
        lang!["Kiírt file", "Written file"],
        out_path
    );

    Ok(())
}
