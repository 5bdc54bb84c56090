// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Connection Model
//!
//! A [`Connection`] is the remote end of one line of connection-table output.
//! It lives only long enough to be classified; nothing here is retained after
//! a run.

use crate::models::family::IpFamily;
use crate::utils::ip::{self, ClassificationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    /// Textual remote address with any port, brackets or scope id removed.
    pub remote_address: String,
    pub family: IpFamily,
}

impl Connection {
    pub fn new(remote_address: impl Into<String>, family: IpFamily) -> Self {
        Self {
            remote_address: remote_address.into(),
            family,
        }
    }
}

/// A connection together with its local/routable verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedAddress {
    pub connection: Connection,
    pub is_local: bool,
}

impl ClassifiedAddress {
    /// Runs the address classifier over `connection`.
    ///
    /// Addresses that cannot be split into the expected segments are returned
    /// as an error rather than being folded into either verdict.
    pub fn classify(connection: Connection) -> Result<Self, ClassificationError> {
        let is_local = ip::is_local(&connection.remote_address, connection.family)?;
        Ok(Self {
            connection,
            is_local,
        })
    }

    pub fn address(&self) -> &str {
        &self.connection.remote_address
    }

    pub fn family(&self) -> IpFamily {
        self.connection.family
    }
}
