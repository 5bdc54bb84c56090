// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Operator Log Stream
//!
//! Wires up the global `tracing` subscriber. Every diagnostic goes to stderr so
//! stdout stays reserved for position records.
//!
//! The layer stack:
//! 1.  **Filter**: `RUST_LOG` if set, otherwise `info` (`debug` with `-v`,
//!     `error` with `-qq`).
//! 2.  **Formatter**: [`ConnmapFormatter`], which prints a status symbol in
//!     front of each message and hides events whose `verbosity` field is
//!     higher than the `-v` count.

use colored::*;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Target used by `cprint!` for undecorated terminal output.
pub const PRINT_TARGET: &str = "connmap::print";

pub fn init_logging(verbosity: u8, quiet: u8) {
    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity, quiet)));

    let formatting_layer = tracing_subscriber::fmt::layer()
        .event_format(ConnmapFormatter {
            max_verbosity: verbosity,
        })
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(formatting_layer)
        .init();
}

/// `-qq` leaves only errors on stderr; otherwise `-v` opens up debug events.
fn default_filter(verbosity: u8, quiet: u8) -> &'static str {
    match (quiet, verbosity) {
        (2.., _) => "error",
        (_, 0) => "info",
        _ => "debug",
    }
}

pub struct ConnmapFormatter {
    pub max_verbosity: u8,
}

impl<S, N> FormatEvent<S, N> for ConnmapFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if meta.target() == PRINT_TARGET {
            let mut visitor = RawVisitor::new(writer.by_ref());
            event.record(&mut visitor);
            return writeln!(writer);
        }

        let mut meta_visitor = MetaVisitor::default();
        event.record(&mut meta_visitor);

        if meta_visitor.verbosity.unwrap_or(0) > self.max_verbosity {
            return Ok(());
        }

        write!(writer, "{} ", symbol(meta.level(), meta_visitor.status.as_deref()))?;

        let mut output_visitor = OutputVisitor::new(writer.by_ref());
        event.record(&mut output_visitor);

        writeln!(writer)
    }
}

fn symbol(level: &Level, status: Option<&str>) -> ColoredString {
    match *level {
        Level::TRACE => "[ ]".dimmed(),
        Level::DEBUG => "[?]".blue(),
        Level::INFO => match status {
            Some("info") => "[»]".cyan().bold(),
            _ => "[+]".green().bold(),
        },
        Level::WARN => "[*]".yellow().bold(),
        Level::ERROR => "[-]".red().bold(),
    }
}

#[derive(Default)]
struct MetaVisitor {
    status: Option<String>,
    verbosity: Option<u8>,
}

impl Visit for MetaVisitor {
    fn record_debug(&mut self, _field: &Field, _value: &dyn std::fmt::Debug) {}

    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "verbosity" {
            self.verbosity = Some(u8::try_from(value).unwrap_or(u8::MAX));
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if field.name() == "verbosity" {
            self.verbosity = Some(u8::try_from(value).unwrap_or(u8::MAX));
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "status" {
            self.status = Some(value.to_string());
        }
    }
}

struct OutputVisitor<'a> {
    writer: Writer<'a>,
}

impl<'a> OutputVisitor<'a> {
    fn new(writer: Writer<'a>) -> Self {
        Self { writer }
    }
}

impl Visit for OutputVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "status" {
            return;
        }
        let _ = write!(self.writer, " {}={}", field.name().italic(), value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        match field.name() {
            "status" | "verbosity" => {}
            "message" => {
                let _ = write!(self.writer, "{:?}", value);
            }
            name => {
                let _ = write!(self.writer, " {}={:?}", name.italic(), value);
            }
        }
    }
}

struct RawVisitor<'a> {
    writer: Writer<'a>,
}

impl<'a> RawVisitor<'a> {
    fn new(writer: Writer<'a>) -> Self {
        Self { writer }
    }
}

impl Visit for RawVisitor<'_> {
    // `%` fields arrive here; their Debug output is the Display text.
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "raw_msg" {
            let _ = write!(self.writer, "{:?}", value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "raw_msg" {
            let _ = write!(self.writer, "{}", value);
        }
    }
}
