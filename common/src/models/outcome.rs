// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Pipeline Outcome
//!
//! The aggregated result of one run. Besides the located positions it keeps a
//! record of every address that was dropped and every family whose pass could
//! not complete, so an operator can tell "nothing to show" apart from
//! "something is broken".

use std::fmt;

use crate::models::family::IpFamily;
use crate::models::position::Position;
use crate::utils::ip::ClassificationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Private, loopback or unique-local peer. Never looked up.
    Local,
    /// The address could not be classified.
    Malformed(ClassificationError),
    /// The database has no location for the address.
    NotFound,
    /// The lookup itself failed.
    LookupFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Local => write!(f, "local address"),
            SkipReason::Malformed(e) => write!(f, "malformed address: {e}"),
            SkipReason::NotFound => write!(f, "not found"),
            SkipReason::LookupFailed(e) => write!(f, "lookup failed: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedAddress {
    pub address: String,
    pub family: IpFamily,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Listing connections failed; the family was processed as empty.
    Enumeration(String),
    /// The geolocation database could not be opened; the family was skipped.
    DatabaseUnavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyFailure {
    pub family: IpFamily,
    pub reason: FailureReason,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineResult {
    pub positions: Vec<Position>,
    pub skipped: Vec<SkippedAddress>,
    pub failures: Vec<FamilyFailure>,
}

impl PipelineResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    pub fn skip(&mut self, address: impl Into<String>, family: IpFamily, reason: SkipReason) {
        self.skipped.push(SkippedAddress {
            address: address.into(),
            family,
            reason,
        });
    }

    pub fn fail(&mut self, family: IpFamily, reason: FailureReason) {
        self.failures.push(FamilyFailure { family, reason });
    }

    pub fn positions_for(&self, family: IpFamily) -> impl Iterator<Item = &Position> {
        self.positions.iter().filter(move |p| p.family() == family)
    }

    pub fn failed(&self, family: IpFamily) -> bool {
        self.failures.iter().any(|f| f.family == family)
    }

    /// True when every requested family failed, i.e. the run produced nothing
    /// it could vouch for.
    pub fn total_failure<I>(&self, requested: I) -> bool
    where
        I: IntoIterator<Item = IpFamily>,
    {
        let mut any = false;
        for family in requested {
            any = true;
            if !self.failed(family) {
                return false;
            }
        }
        any
    }
}
