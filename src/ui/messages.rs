//! Operator-facing console output.
//!
//! Everything the engine says goes through these helpers so the whole CLI
//! shares one look: coloured icon, then plain text.

use crate::models::day_batch::OverlapPair;
use ansi_term::{Colour, Style};
use std::fmt;

const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";

fn icon(colour: Colour, icon: &str) -> String {
    Style::new().bold().fg(colour).paint(icon).to_string()
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", icon(Colour::Blue, ICON_INFO), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", icon(Colour::Green, ICON_OK), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{} {}", icon(Colour::Yellow, ICON_WARN), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", icon(Colour::Red, ICON_ERR), msg);
}

/// Section header, one per processed day.
pub fn header<T: fmt::Display>(msg: T) {
    println!(
        "{}",
        Style::new()
            .bold()
            .fg(Colour::Blue)
            .paint(format!("====================== {msg}"))
    );
}

/// One overlap as shown to the operator: local side first.
pub fn overlap_line(pair: &OverlapPair) -> String {
    format!(
        "local {} \"{}\"  ↔  remote {} \"{}\"",
        Colour::Cyan.paint(pair.local.range_label()),
        pair.local.comment,
        Colour::Yellow.paint(pair.remote.range_label()),
        pair.remote.comment
    )
}
