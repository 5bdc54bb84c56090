// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Position Model
//!
//! The only thing a run hands to the outside world: where a routable peer is,
//! and which family it was reached over.

use serde::Serialize;
use thiserror::Error;

use crate::models::family::IpFamily;

/// Raw coordinates as returned by a geolocation backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PositionError {
    #[error("latitude {0} is outside [-90, 90]")]
    Latitude(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    Longitude(f64),
}

/// A located peer. Fields are private so every instance has valid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    latitude: f64,
    longitude: f64,
    family: IpFamily,
}

impl Position {
    pub fn new(coords: Coordinates, family: IpFamily) -> Result<Self, PositionError> {
        // NaN fails both range checks
        if !(-90.0..=90.0).contains(&coords.latitude) {
            return Err(PositionError::Latitude(coords.latitude));
        }
        if !(-180.0..=180.0).contains(&coords.longitude) {
            return Err(PositionError::Longitude(coords.longitude));
        }
        Ok(Self {
            latitude: coords.latitude,
            longitude: coords.longitude,
            family,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn family(&self) -> IpFamily {
        self.family
    }

    /// `(latitude, longitude, family code)` as consumed by plotting tools.
    pub fn as_record(&self) -> (f64, f64, u8) {
        (self.latitude, self.longitude, self.family.code())
    }
}
