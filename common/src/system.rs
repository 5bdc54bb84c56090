// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::family::IpFamily;

#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("could not run '{command}': {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },

    #[error("'{command}' exited with {status}")]
    Status { command: String, status: String },

    #[error("'{command}' did not finish within {timeout:?}")]
    Timeout { command: String, timeout: Duration },
}

/// Defines the contract for reading the OS socket table.
///
/// One call per address family. The returned text is the tool's raw output:
/// one header line followed by one connection per line, with the remote
/// endpoint in the last whitespace-separated column.
#[async_trait]
pub trait ConnectionLister: Send + Sync {
    async fn list_connections(&self, family: IpFamily) -> Result<String, EnumerationError>;
}
