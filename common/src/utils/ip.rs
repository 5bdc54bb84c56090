// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Address Classification
//!
//! Decides whether a peer address is worth geolocating.
//!
//! The rules work on the textual address as it appears in connection-table
//! output rather than on a parsed [`std::net::IpAddr`], and they are
//! intentionally narrow:
//!
//! * **IPv4**: loopback (`127/8`) and the RFC1918 blocks `10/8`, `172.16/12`
//!   and `192.168/16` are local.
//! * **IPv6**: only addresses starting with `fd` (the populated half of the
//!   unique-local block) are local. `fc00::/8`, `::1` and `fe80::/10` are
//!   treated as routable and left to the geolocation database to reject.
//!
//! Input that cannot be split into the expected segments is reported as a
//! [`ClassificationError`] instead of being guessed at.

use thiserror::Error;

use crate::models::family::IpFamily;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassificationError {
    #[error("empty address")]
    Empty,

    #[error("'{segment}' is not a valid segment of '{address}'")]
    InvalidSegment { address: String, segment: String },

    #[error("'{address}' is missing octet {index}")]
    MissingOctet { address: String, index: usize },

    #[error("'{address}' has more than four octets")]
    TooManySegments { address: String },

    #[error("'{address}' is not an IPv6 address")]
    NotIpv6 { address: String },
}

/// Returns `true` if `address` falls into a private, loopback or unique-local
/// range for the given family.
pub fn is_local(address: &str, family: IpFamily) -> Result<bool, ClassificationError> {
    match family {
        IpFamily::V4 => is_local_v4(address),
        IpFamily::V6 => is_local_v6(address),
    }
}

fn is_local_v4(address: &str) -> Result<bool, ClassificationError> {
    if address.is_empty() {
        return Err(ClassificationError::Empty);
    }
    if address == "127.0.0.1" {
        return Ok(true);
    }

    let octets: Vec<u8> = address
        .split('.')
        .map(|segment| parse_octet(address, segment))
        .collect::<Result<_, _>>()?;

    if octets.len() > 4 {
        return Err(ClassificationError::TooManySegments {
            address: address.to_string(),
        });
    }

    match octets.as_slice() {
        [127, ..] | [10, ..] => Ok(true),
        [192, 168, ..] => Ok(true),
        [172, second, ..] => Ok((16..=31).contains(second)),
        [192] | [172] => Err(ClassificationError::MissingOctet {
            address: address.to_string(),
            index: 1,
        }),
        _ => Ok(false),
    }
}

fn is_local_v6(address: &str) -> Result<bool, ClassificationError> {
    if address.is_empty() {
        return Err(ClassificationError::Empty);
    }

    let groups: Vec<&str> = address.split(':').collect();
    // "::" may add up to two empty groups to the eight real ones
    if groups.len() < 2 || groups.len() > 9 {
        return Err(ClassificationError::NotIpv6 {
            address: address.to_string(),
        });
    }

    let last = groups.len() - 1;
    for (idx, group) in groups.iter().enumerate() {
        let valid = match *group {
            "" => true,
            g if idx == last && g.contains('.') => is_dotted_quad(g),
            g => g.len() <= 4 && g.chars().all(|c| c.is_ascii_hexdigit()),
        };
        if !valid {
            return Err(ClassificationError::InvalidSegment {
                address: address.to_string(),
                segment: group.to_string(),
            });
        }
    }

    Ok(address
        .get(..2)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("fd")))
}

fn parse_octet(address: &str, segment: &str) -> Result<u8, ClassificationError> {
    let plausible = !segment.is_empty()
        && segment.len() <= 3
        && segment.chars().all(|c| c.is_ascii_digit());

    plausible
        .then(|| segment.parse::<u8>().ok())
        .flatten()
        .ok_or_else(|| ClassificationError::InvalidSegment {
            address: address.to_string(),
            segment: segment.to_string(),
        })
}

fn is_dotted_quad(group: &str) -> bool {
    let segments: Vec<&str> = group.split('.').collect();
    segments.len() == 4 && segments.iter().all(|s| parse_octet(group, s).is_ok())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
