// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Hands position records to whatever draws the map.
//!
//! Records carry the numeric family code (4 or 6) so plotting tools can group
//! markers per family without knowing anything about this crate.

use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use connmap_common::config::{Config, OutputFormat};
use connmap_common::models::position::Position;

/// Writes `positions` to the configured file, or stdout if none is set.
pub fn emit(positions: &[Position], cfg: &Config) -> anyhow::Result<()> {
    match &cfg.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_positions(&mut writer, positions, cfg.format)?;
            writer
                .flush()
                .with_context(|| format!("writing {}", path.display()))
        }
        None => {
            let mut stdout = io::stdout().lock();
            write_positions(&mut stdout, positions, cfg.format)?;
            stdout.flush().context("writing to stdout")
        }
    }
}

pub fn write_positions<W: Write>(
    writer: &mut W,
    positions: &[Position],
    format: OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Plain => {
            for position in positions {
                let (lat, lon, family) = position.as_record();
                writeln!(writer, "{lat} {lon} {family}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *writer, positions)
                .context("serializing positions")?;
            writeln!(writer)?;
        }
    }
    Ok(())
}
