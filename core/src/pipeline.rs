// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! Orchestration of a mapping run.
//!
//! For every requested family, in [`IpFamily`] order:
//! 1. open a resolver from the [`GeoBackend`] (failure skips the family),
//! 2. list connections (failure is logged and treated as empty output),
//! 3. parse, classify, resolve, and collect positions in discovery order.
//!
//! Nothing inside a family pass aborts it; every dropped address ends up in
//! [`PipelineResult::skipped`] with the reason it was dropped.

use std::collections::BTreeSet;

use connmap_common::models::connection::{ClassifiedAddress, Connection};
use connmap_common::models::family::IpFamily;
use connmap_common::models::outcome::{FailureReason, PipelineResult, SkipReason};
use connmap_common::system::ConnectionLister;
use connmap_common::{debug, error, success, warn};

use crate::geo::{self, GeoBackend, GeoResolver, Resolution};
use crate::parser;

pub struct ConnectionPipeline<'a> {
    lister: &'a dyn ConnectionLister,
    backend: &'a dyn GeoBackend,
}

impl<'a> ConnectionPipeline<'a> {
    pub fn new(lister: &'a dyn ConnectionLister, backend: &'a dyn GeoBackend) -> Self {
        Self { lister, backend }
    }

    /// Runs one pass per family and aggregates the results.
    ///
    /// Duplicate families are collapsed and IPv4 is always processed first,
    /// so identical inputs give identical results.
    pub async fn run<I>(&self, families: I) -> PipelineResult
    where
        I: IntoIterator<Item = IpFamily>,
    {
        let families: BTreeSet<IpFamily> = families.into_iter().collect();
        let mut result = PipelineResult::new();

        for family in families {
            self.run_family(family, &mut result).await;
        }

        result
    }

    async fn run_family(&self, family: IpFamily, result: &mut PipelineResult) {
        // Dropped at the end of this pass on every path.
        let resolver = match self.backend.open(family) {
            Ok(resolver) => resolver,
            Err(e) => {
                error!("Skipping {family}: {e}");
                result.fail(family, FailureReason::DatabaseUnavailable(e.to_string()));
                return;
            }
        };

        let listing = match self.lister.list_connections(family).await {
            Ok(text) => text,
            Err(e) => {
                error!("Could not list {family} connections: {e}");
                result.fail(family, FailureReason::Enumeration(e.to_string()));
                String::new()
            }
        };

        let found_before = result.positions.len();
        let skipped_before = result.skipped_count();

        for connection in parser::parse_connections(&listing, family) {
            process(resolver.as_ref(), connection, result);
        }

        success!(
            "{family}: {} peers located, {} skipped",
            result.positions.len() - found_before,
            result.skipped_count() - skipped_before
        );
    }
}

fn process(resolver: &dyn GeoResolver, connection: Connection, result: &mut PipelineResult) {
    let address = connection.remote_address.clone();
    let family = connection.family;

    let classified = match ClassifiedAddress::classify(connection) {
        Ok(classified) => classified,
        Err(e) => {
            warn!("Could not classify {address}: {e}");
            result.skip(address, family, SkipReason::Malformed(e));
            return;
        }
    };

    if classified.is_local {
        debug!("{address} is local, skipping");
        result.skip(address, family, SkipReason::Local);
        return;
    }

    match geo::resolve(resolver, &classified) {
        Resolution::Located(position) => {
            debug!(
                "{address} located at {:.4}, {:.4}",
                position.latitude(),
                position.longitude()
            );
            result.positions.push(position);
        }
        Resolution::NotFound => {
            warn!("{address} not found in geolocation database, skipping");
            result.skip(address, family, SkipReason::NotFound);
        }
        Resolution::Failed(e) => {
            error!("Lookup for {address} failed: {e}");
            result.skip(address, family, SkipReason::LookupFailed(e.to_string()));
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
