// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Geolocation
//!
//! A narrow seam between the pipeline and whatever database answers "where is
//! this address?".
//!
//! * [`GeoBackend`] opens one [`GeoResolver`] per address family. The handle is
//!   owned by that family's pass and released when the pass ends.
//! * [`GeoResolver::lookup`] distinguishes three outcomes: located, not found,
//!   and failed. The last two are never conflated.
//!
//! The shipped backend reads MaxMind city databases, see [`maxmind`].

pub mod maxmind;

use std::path::PathBuf;

use connmap_common::models::connection::ClassifiedAddress;
use connmap_common::models::family::IpFamily;
use connmap_common::models::position::{Coordinates, Position, PositionError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("cannot open geolocation database {path:?}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("'{0}' is not an IP address")]
    InvalidAddress(String),

    #[error("malformed record for {address}: {source}")]
    MalformedRecord {
        address: String,
        source: PositionError,
    },

    #[error("database lookup failed: {0}")]
    Database(String),
}

pub trait GeoResolver: Send + Sync {
    /// `Ok(None)` means the database has no location for `address`.
    fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeoError>;
}

pub trait GeoBackend: Send + Sync {
    fn open(&self, family: IpFamily) -> Result<Box<dyn GeoResolver>, GeoError>;
}

impl<F> GeoBackend for F
where
    F: Fn(IpFamily) -> Result<Box<dyn GeoResolver>, GeoError> + Send + Sync,
{
    fn open(&self, family: IpFamily) -> Result<Box<dyn GeoResolver>, GeoError> {
        self(family)
    }
}

#[derive(Debug)]
pub enum Resolution {
    Located(Position),
    NotFound,
    Failed(GeoError),
}

/// Looks up a routable address and builds its [`Position`].
///
/// The family comes from the classification, not from the database. Records
/// with out-of-range coordinates are reported as [`GeoError::MalformedRecord`].
pub fn resolve(resolver: &dyn GeoResolver, address: &ClassifiedAddress) -> Resolution {
    match resolver.lookup(address.address()) {
        Ok(Some(coords)) => match Position::new(coords, address.family()) {
            Ok(position) => Resolution::Located(position),
            Err(source) => Resolution::Failed(GeoError::MalformedRecord {
                address: address.address().to_string(),
                source,
            }),
        },
        Ok(None) => Resolution::NotFound,
        Err(e) => Resolution::Failed(e),
    }
}
