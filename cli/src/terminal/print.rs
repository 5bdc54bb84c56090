// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use anyhow::bail;
use colored::*;
use unicode_width::UnicodeWidthStr;

use connmap_common::config::Config;
use connmap_common::models::family::IpFamily;
use connmap_common::models::outcome::{FailureReason, PipelineResult};

use crate::terminal::colors;

pub const TOTAL_WIDTH: usize = 64;

/// Width of the key column in [`aligned_line`].
const KEY_WIDTH: usize = 10;

static PRINT: OnceLock<Print> = OnceLock::new();

#[macro_export]
macro_rules! cprint {
    () => {
        $crate::cprint!("");
    };
    ($($arg:tt)*) => {
        tracing::info!(
            target: "connmap::print",
            raw_msg = %format_args!($($arg)*)
        );
    };
}

pub struct Print {
    no_banner: bool,
    q_level: u8,
}

impl Print {
    fn new(cfg: &Config) -> Self {
        Self {
            no_banner: cfg.no_banner,
            q_level: cfg.quiet,
        }
    }

    pub fn init(cfg: &Config) -> anyhow::Result<()> {
        let term = Self::new(cfg);
        if PRINT.set(term).is_err() {
            bail!("terminal has already been initialized")
        }
        Ok(())
    }

    fn get() -> &'static Self {
        PRINT.get().expect("terminal has not been initialized")
    }

    pub fn banner() {
        let p = Self::get();
        if p.no_banner || p.q_level > 0 {
            return;
        }

        let text_content: String = format!("⟦ CONNMAP v{} ⟧ ", env!("CARGO_PKG_VERSION"));
        let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
        let text: ColoredString = text_content.bright_green().bold();
        let sep: ColoredString = "═"
            .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
            .bright_black();

        cprint!("{}{}{}", sep, text, sep);
    }

    pub fn header(msg: &str) {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }

        let formatted: String = format!("⟦ {} ⟧", msg);
        let msg_len: usize = formatted.chars().count();

        let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
        let left: usize = dash_count / 2;
        let right: usize = dash_count - left;

        let line: ColoredString = format!(
            "{}{}{}",
            "─".repeat(left),
            formatted.to_uppercase().bright_green(),
            "─".repeat(right)
        )
        .bright_black();

        cprint!("{}", line);
    }

    /// One line per requested family: how many peers were placed on the map,
    /// how many were dropped, or why the family could not be processed.
    pub fn summary(result: &PipelineResult, families: &BTreeSet<IpFamily>) {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }

        for &family in families {
            let key = family.to_string().color(colors::family(family));
            aligned_line(&key, family_status(result, family));
        }

        divider();
        let total = format!("{} positions", result.positions.len()).bold().green();
        let skipped = format!("{} skipped", result.skipped_count()).bold().yellow();
        let line = format!("Mapping Complete: {total}, {skipped}").color(colors::TEXT_DEFAULT);
        centerln(&line.to_string());
    }

    pub fn end_of_program() {
        let p = Self::get();
        if p.q_level > 0 {
            return;
        }
        cprint!("{}", "═".repeat(TOTAL_WIDTH).color(colors::SEPARATOR));
    }
}

fn family_status(result: &PipelineResult, family: IpFamily) -> ColoredString {
    let failure = result.failures.iter().find(|f| f.family == family);
    if let Some(FailureReason::DatabaseUnavailable(reason)) = failure.map(|f| &f.reason) {
        return format!("database unavailable ({reason})").color(colors::FAILURE);
    }

    let located = result.positions_for(family).count();
    let skipped = result.skipped.iter().filter(|s| s.family == family).count();
    let text = format!("{located} located, {skipped} skipped");

    match failure {
        Some(_) => format!("{text} (listing failed)").color(colors::FAILURE),
        None => text.color(colors::TEXT_DEFAULT),
    }
}

pub fn divider() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    cprint!("{}", sep);
}

pub fn aligned_line(key: &ColoredString, value: ColoredString) {
    let dots: String = ".".repeat((KEY_WIDTH + 1).saturating_sub(key.chars().count()));
    cprint!(
        "{} {}{}{} {}",
        ">".color(colors::SEPARATOR),
        key,
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value
    );
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    cprint!("{}{}", space, msg);
}
