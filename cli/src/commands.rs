// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Command Line Interface Definitions
//!
//! The flags, their defaults and their help text live here. The
//! `From<&CommandLine> for Config` implementation is the only place that
//! knows about both the CLI and the runtime [`Config`], so the core crates
//! never see a clap type.

pub mod map;

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, ValueEnum};
use connmap_common::config::{Config, DEFAULT_GEO_DB, DEFAULT_LIST_COMMAND, OutputFormat};
use connmap_common::models::family;

#[derive(Parser)]
#[command(name = "connmap")]
#[command(about = "Geolocate active connections and emit map coordinates.")]
pub struct CommandLine {
    /// Geolocate IPv4 connections (default if no family is given)
    #[arg(short = '4', long = "ipv4")]
    pub ipv4: bool,

    /// Geolocate IPv6 connections
    #[arg(short = '6', long = "ipv6")]
    pub ipv6: bool,

    /// GeoLite2/GeoIP2 City database
    #[arg(long = "db", value_name = "PATH", env = "CONNMAP_GEOIP_DB", default_value = DEFAULT_GEO_DB)]
    pub db: PathBuf,

    /// Separate City database for IPv6 lookups (defaults to --db)
    #[arg(long = "db-v6", value_name = "PATH", env = "CONNMAP_GEOIP_DB_V6")]
    pub db_v6: Option<PathBuf>,

    /// Program that lists sockets (must accept -n -4 / -n -6)
    #[arg(long = "list-command", value_name = "CMD", default_value = DEFAULT_LIST_COMMAND)]
    pub list_command: String,

    /// Seconds to wait for the connection listing
    #[arg(long = "timeout", value_name = "SECS", default_value_t = 10)]
    pub timeout: u64,

    /// Format of the position records
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Plain)]
    pub format: Format,

    /// Write position records to FILE instead of stdout
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Keep logs and colors but hide the banner
    #[arg(long = "no-banner")]
    pub no_banner: bool,

    /// Reduce UI visual density (-q: logs only, -qq: records only)
    #[arg(short = 'q', long = "quiet", action = ArgAction::Count)]
    pub quiet: u8,

    /// Increase logging detail (-v: debug logs)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `latitude longitude family` per line
    Plain,
    /// JSON array of objects
    Json,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Plain => OutputFormat::Plain,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl From<&CommandLine> for Config {
    fn from(cmd: &CommandLine) -> Self {
        Self {
            no_banner: cmd.no_banner,
            quiet: cmd.quiet,
            families: family::requested_families(cmd.ipv4, cmd.ipv6),
            geo_db_v4: cmd.db.clone(),
            geo_db_v6: cmd.db_v6.clone().unwrap_or_else(|| cmd.db.clone()),
            list_command: cmd.list_command.clone(),
            list_timeout: Duration::from_secs(cmd.timeout),
            format: cmd.format.into(),
            output: cmd.output.clone(),
        }
    }
}
