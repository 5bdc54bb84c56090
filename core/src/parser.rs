// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Connection Table Parser
//!
//! Turns `ss`-style output into [`Connection`] records.
//!
//! Expected format (cols): `State Recv-Q Send-Q Local_Address:Port Peer_Address:Port`,
//! one header line first. Only the last column matters here.
//!
//! Lines that do not fit are dropped without a diagnostic: the header and
//! blank lines hit that path on every run.

use connmap_common::models::connection::Connection;
use connmap_common::models::family::IpFamily;

/// Yields one [`Connection`] per usable line of `text`.
///
/// Line 0 is always treated as the header. The iterator borrows `text`, so a
/// fresh call restarts from the top.
pub fn parse_connections(text: &str, family: IpFamily) -> impl Iterator<Item = Connection> + '_ {
    text.lines()
        .skip(1)
        .filter_map(move |line| parse_line(line, family))
}

pub fn parse_line(line: &str, family: IpFamily) -> Option<Connection> {
    let endpoint = line.split_whitespace().last()?;
    extract_host(endpoint).map(|host| Connection::new(host, family))
}

/// Strips the port (and any scope id) from a `host:port` endpoint.
///
/// Handles `8.8.8.8:443`, `[2001:db8::1]:443`, `2001:db8::1:443` (last colon
/// wins) and `[fe80::1%eth0]:22`. A token without a colon is taken whole.
pub fn extract_host(endpoint: &str) -> Option<&str> {
    let host = match endpoint.strip_prefix('[') {
        Some(rest) => rest.split_once(']')?.0,
        None => endpoint
            .rsplit_once(':')
            .map_or(endpoint, |(host, _port)| host),
    };

    let host = host.split_once('%').map_or(host, |(addr, _scope)| addr);
    (!host.is_empty()).then_some(host)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
