// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! MaxMind GeoLite2 / GeoIP2 City backend.
//!
//! The whole `.mmdb` file is read into memory on open, so lookups never touch
//! the disk again.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use connmap_common::config::Config;
use connmap_common::debug;
use connmap_common::models::family::IpFamily;
use connmap_common::models::position::Coordinates;
use maxminddb::{MaxMindDBError, Reader, geoip2};

use crate::geo::{GeoBackend, GeoError, GeoResolver};

pub struct MaxmindResolver {
    reader: Reader<Vec<u8>>,
}

impl MaxmindResolver {
    pub fn open(path: &Path) -> Result<Self, GeoError> {
        let reader = Reader::open_readfile(path).map_err(|e| GeoError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        debug!(
            "Opened {} ({}, built {})",
            path.display(),
            reader.metadata.database_type,
            reader.metadata.build_epoch
        );

        Ok(Self { reader })
    }
}

impl GeoResolver for MaxmindResolver {
    fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeoError> {
        let ip: IpAddr = address
            .parse()
            .map_err(|_| GeoError::InvalidAddress(address.to_string()))?;

        match self.reader.lookup::<geoip2::City>(ip) {
            Ok(city) => Ok(city.location.and_then(|location| {
                Some(Coordinates::new(location.latitude?, location.longitude?))
            })),
            Err(MaxMindDBError::AddressNotFoundError(_)) => Ok(None),
            Err(e) => Err(GeoError::Database(e.to_string())),
        }
    }
}

/// Opens a city database per family from configured paths.
#[derive(Debug, Clone)]
pub struct MaxmindBackend {
    v4_path: PathBuf,
    v6_path: PathBuf,
}

impl MaxmindBackend {
    pub fn new(v4_path: impl Into<PathBuf>, v6_path: impl Into<PathBuf>) -> Self {
        Self {
            v4_path: v4_path.into(),
            v6_path: v6_path.into(),
        }
    }

    pub fn path(&self, family: IpFamily) -> &Path {
        match family {
            IpFamily::V4 => &self.v4_path,
            IpFamily::V6 => &self.v6_path,
        }
    }
}

impl From<&Config> for MaxmindBackend {
    fn from(cfg: &Config) -> Self {
        Self::new(cfg.geo_db(IpFamily::V4), cfg.geo_db(IpFamily::V6))
    }
}

impl GeoBackend for MaxmindBackend {
    fn open(&self, family: IpFamily) -> Result<Box<dyn GeoResolver>, GeoError> {
        let resolver = MaxmindResolver::open(self.path(family))?;
        Ok(Box::new(resolver))
    }
}
