// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # Address Family
//!
//! Every connection, position and database handle belongs to exactly one
//! address family. The ordering of [`IpFamily`] is significant: a run always
//! processes IPv4 before IPv6, and sorted sets of families inherit that order.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IpFamily {
    V4,
    V6,
}

impl IpFamily {
    pub const ALL: [IpFamily; 2] = [IpFamily::V4, IpFamily::V6];

    /// Numeric family code used when positions leave the process (4 or 6).
    pub fn code(self) -> u8 {
        match self {
            IpFamily::V4 => 4,
            IpFamily::V6 => 6,
        }
    }

    /// The flag understood by connection-listing tools (`-4` / `-6`).
    pub fn selector(self) -> &'static str {
        match self {
            IpFamily::V4 => "-4",
            IpFamily::V6 => "-6",
        }
    }
}

impl fmt::Display for IpFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpFamily::V4 => write!(f, "IPv4"),
            IpFamily::V6 => write!(f, "IPv6"),
        }
    }
}

impl Serialize for IpFamily {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Builds the requested family set from the `-4` / `-6` flag pair.
///
/// Asking for neither selects IPv4 only.
pub fn requested_families(ipv4: bool, ipv6: bool) -> BTreeSet<IpFamily> {
    let mut families = BTreeSet::new();
    if ipv4 || !ipv6 {
        families.insert(IpFamily::V4);
    }
    if ipv6 {
        families.insert(IpFamily::V6);
    }
    families
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_defaults_to_ipv4() {
        let families = requested_families(false, false);
        assert_eq!(families.into_iter().collect::<Vec<_>>(), vec![IpFamily::V4]);
    }

    #[test]
    fn only_ipv6_excludes_ipv4() {
        let families = requested_families(false, true);
        assert_eq!(families.into_iter().collect::<Vec<_>>(), vec![IpFamily::V6]);
    }

    #[test]
    fn both_flags_iterate_ipv4_first() {
        let families = requested_families(true, true);
        assert_eq!(
            families.into_iter().collect::<Vec<_>>(),
            vec![IpFamily::V4, IpFamily::V6]
        );
    }

    #[test]
    fn codes_match_family_numbers() {
        assert_eq!(IpFamily::V4.code(), 4);
        assert_eq!(IpFamily::V6.code(), 6);
        assert_eq!(IpFamily::V6.to_string(), "IPv6");
    }
}
