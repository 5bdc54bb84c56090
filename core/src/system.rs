// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use connmap_common::config::Config;
use connmap_common::debug;
use connmap_common::models::family::IpFamily;
use connmap_common::system::{ConnectionLister, EnumerationError};

/// Lists sockets by running `ss -n -4` / `ss -n -6`.
///
/// The child is killed if it outlives `timeout`.
pub struct SsLister {
    command: String,
    timeout: Duration,
}

impl SsLister {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }
}

impl From<&Config> for SsLister {
    fn from(cfg: &Config) -> Self {
        Self::new(cfg.list_command.clone(), cfg.list_timeout)
    }
}

#[async_trait]
impl ConnectionLister for SsLister {
    async fn list_connections(&self, family: IpFamily) -> Result<String, EnumerationError> {
        let command_line = format!("{} -n {}", self.command, family.selector());
        debug!("Running '{command_line}'");

        let mut cmd = Command::new(&self.command);
        cmd.arg("-n").arg(family.selector()).kill_on_drop(true);

        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| EnumerationError::Timeout {
                command: command_line.clone(),
                timeout: self.timeout,
            })?
            .map_err(|source| EnumerationError::Spawn {
                command: command_line.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let status = match stderr.lines().next() {
                Some(first) if !first.trim().is_empty() => {
                    format!("{} ({})", output.status, first.trim())
                }
                _ => output.status.to_string(),
            };
            return Err(EnumerationError::Status {
                command: command_line,
                status,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn successful_command_returns_stdout() {
        let lister = SsLister::new("true", Duration::from_secs(5));
        let text = lister.list_connections(IpFamily::V4).await.unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn non_zero_exit_is_a_status_error() {
        let lister = SsLister::new("false", Duration::from_secs(5));
        let err = lister.list_connections(IpFamily::V6).await.unwrap_err();
        assert!(matches!(err, EnumerationError::Status { .. }));
        assert!(err.to_string().starts_with("'false -n -6' exited with"));
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let lister = SsLister::new("connmap-no-such-binary", Duration::from_secs(5));
        let err = lister.list_connections(IpFamily::V4).await.unwrap_err();
        assert!(matches!(err, EnumerationError::Spawn { .. }));
    }
}
