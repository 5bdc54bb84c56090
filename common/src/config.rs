// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::family::IpFamily;

/// Where MaxMind-packaged distributions install the free city database.
pub const DEFAULT_GEO_DB: &str = "/usr/share/GeoIP/GeoLite2-City.mmdb";

/// Connection-listing tool invoked once per family.
pub const DEFAULT_LIST_COMMAND: &str = "ss";

pub const DEFAULT_LIST_TIMEOUT: Duration = Duration::from_secs(10);

/// Shape of the position records handed to the plotting side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One `latitude longitude family` line per position.
    #[default]
    Plain,
    /// A JSON array of `{latitude, longitude, family}` objects.
    Json,
}

/// Runtime options for one mapping run.
///
/// Built from the CLI arguments; the pipeline itself only ever sees the parts
/// it needs (families, database paths, listing command), never the raw flags.
#[derive(Debug, Clone)]
pub struct Config {
    /// Skips the startup banner while keeping headers and logs.
    pub no_banner: bool,

    /// Controls the visual density of the terminal output.
    ///
    /// # Levels
    /// * **0** (Default): banner, headers and per-family summary.
    /// * **1**: no decoration, logs only.
    /// * **2**: nothing but the position records on stdout.
    pub quiet: u8,

    /// Address families to map. Iterated in order, so IPv4 always comes first.
    pub families: BTreeSet<IpFamily>,

    /// City database used for IPv4 lookups.
    pub geo_db_v4: PathBuf,

    /// City database used for IPv6 lookups. Usually the same file as
    /// `geo_db_v4`; GeoLite2-City covers both families.
    pub geo_db_v6: PathBuf,

    /// Program that prints the socket table (`ss`-compatible output).
    pub list_command: String,

    /// Upper bound for a single invocation of `list_command`.
    pub list_timeout: Duration,

    pub format: OutputFormat,

    /// Write records to this file instead of stdout.
    pub output: Option<PathBuf>,
}

impl Config {
    pub fn geo_db(&self, family: IpFamily) -> &Path {
        match family {
            IpFamily::V4 => &self.geo_db_v4,
            IpFamily::V6 => &self.geo_db_v6,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_banner: false,
            quiet: 0,
            families: BTreeSet::from([IpFamily::V4]),
            geo_db_v4: PathBuf::from(DEFAULT_GEO_DB),
            geo_db_v6: PathBuf::from(DEFAULT_GEO_DB),
            list_command: DEFAULT_LIST_COMMAND.to_string(),
            list_timeout: DEFAULT_LIST_TIMEOUT,
            format: OutputFormat::default(),
            output: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_maps_ipv4_with_system_database() {
        let cfg = Config::default();
        assert_eq!(cfg.families, BTreeSet::from([IpFamily::V4]));
        assert_eq!(cfg.geo_db(IpFamily::V4), Path::new(DEFAULT_GEO_DB));
        assert_eq!(cfg.geo_db(IpFamily::V6), Path::new(DEFAULT_GEO_DB));
    }

    #[test]
    fn geo_db_picks_per_family_path() {
        let cfg = Config {
            geo_db_v6: PathBuf::from("/tmp/v6.mmdb"),
            ..Config::default()
        };
        assert_eq!(cfg.geo_db(IpFamily::V6), Path::new("/tmp/v6.mmdb"));
    }
}
