// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

#![cfg(test)]
use connmap_common::models::family::IpFamily;
use connmap_common::models::outcome::{FailureReason, SkipReason};
use connmap_core::geo::maxmind::MaxmindBackend;
use connmap_core::pipeline::ConnectionPipeline;

use crate::utils::{ScriptedLister, TableBackend, listing};

#[tokio::test]
async fn test_public_peer_located_private_peer_skipped() {
    let text = "State  Recv-Q Send-Q Local-Address:Port  Peer-Address:Port\n\
                ESTAB  0      0      10.0.0.5:51000     8.8.8.8:443\n\
                ESTAB  0      0      10.0.0.5:51001     192.168.1.1:22\n";
    let lister = ScriptedLister::default().with(IpFamily::V4, text);
    let backend = TableBackend::new(&[("8.8.8.8", (37.4, -122.1))]);

    let result = ConnectionPipeline::new(&lister, &backend)
        .run([IpFamily::V4])
        .await;

    let records: Vec<(f64, f64, u8)> = result.positions.iter().map(|p| p.as_record()).collect();
    assert_eq!(records, vec![(37.4, -122.1, 4)]);
    assert_eq!(result.skipped_count(), 1);
    assert_eq!(result.skipped[0].address, "192.168.1.1");
    assert_eq!(result.skipped[0].reason, SkipReason::Local);
    assert!(result.failures.is_empty());
}

#[tokio::test]
async fn test_not_found_peer_does_not_abort_batch() {
    let peers = [
        "1.1.1.1:443",
        "8.8.8.8:443",
        "9.9.9.9:53",
        "208.67.222.222:53",
        "94.140.14.14:853",
    ];
    let lister = ScriptedLister::default().with(IpFamily::V4, &listing(&peers));
    let backend = TableBackend::new(&[
        ("1.1.1.1", (-33.49, 143.21)),
        ("8.8.8.8", (37.4, -122.1)),
        ("208.67.222.222", (37.77, -122.39)),
        ("94.140.14.14", (34.68, 33.04)),
    ]);

    let result = ConnectionPipeline::new(&lister, &backend)
        .run([IpFamily::V4])
        .await;

    assert_eq!(result.positions.len(), 4);
    assert_eq!(result.positions[2].latitude(), 37.77);
    assert_eq!(result.skipped_count(), 1);
    assert_eq!(result.skipped[0].address, "9.9.9.9");
    assert_eq!(result.skipped[0].reason, SkipReason::NotFound);
}

#[tokio::test]
async fn test_ipv6_enumeration_failure_keeps_ipv4_results() {
    let lister =
        ScriptedLister::default().with(IpFamily::V4, &listing(&["8.8.8.8:443", "10.1.1.1:22"]));
    let backend = TableBackend::new(&[("8.8.8.8", (37.4, -122.1))]);

    let result = ConnectionPipeline::new(&lister, &backend)
        .run([IpFamily::V4, IpFamily::V6])
        .await;

    assert_eq!(result.positions.len(), 1);
    assert_eq!(result.positions[0].family(), IpFamily::V4);
    assert_eq!(result.failures.len(), 1);
    assert_eq!(result.failures[0].family, IpFamily::V6);
    assert!(matches!(
        result.failures[0].reason,
        FailureReason::Enumeration(_)
    ));
    assert!(!result.total_failure([IpFamily::V4, IpFamily::V6]));
    assert_eq!(backend.times_opened(), 2);
    assert_eq!(backend.open_handles(), 0);
}

#[tokio::test]
async fn test_identical_input_gives_identical_result() {
    let lister = ScriptedLister::default()
        .with(
            IpFamily::V4,
            &listing(&["8.8.8.8:443", "172.20.0.3:5432", "1.1.1.1:443", "203.0.113.9:80"]),
        )
        .with(
            IpFamily::V6,
            &listing(&["[2001:4860:4860::8888]:443", "[fd12::1]:22", "[2001:db8::1]:80"]),
        );
    let backend = TableBackend::new(&[
        ("8.8.8.8", (37.4, -122.1)),
        ("1.1.1.1", (-33.49, 143.21)),
        ("2001:4860:4860::8888", (37.75, -97.82)),
    ]);
    let pipeline = ConnectionPipeline::new(&lister, &backend);

    let first = pipeline.run([IpFamily::V4, IpFamily::V6]).await;
    let second = pipeline.run([IpFamily::V4, IpFamily::V6]).await;

    assert_eq!(first, second);
    assert_eq!(first.positions.len(), 3);
    assert_eq!(first.skipped_count(), 4);
}

#[tokio::test]
async fn test_database_handle_released_after_each_family() {
    let lister = ScriptedLister::default()
        .with(IpFamily::V4, &listing(&["8.8.8.8:443"]))
        .with(IpFamily::V6, &listing(&["[2001:4860:4860::8888]:443"]));
    let backend = TableBackend::new(&[("8.8.8.8", (37.4, -122.1))]);

    let _ = ConnectionPipeline::new(&lister, &backend)
        .run([IpFamily::V4, IpFamily::V6])
        .await;

    assert_eq!(backend.times_opened(), 2);
    assert_eq!(backend.open_handles(), 0);
}

#[tokio::test]
async fn test_missing_database_is_total_failure() {
    let lister = ScriptedLister::default().with(IpFamily::V4, &listing(&["8.8.8.8:443"]));
    let backend = MaxmindBackend::new("/nonexistent/GeoLite2-City.mmdb", "/nonexistent/GeoLite2-City.mmdb");

    let result = ConnectionPipeline::new(&lister, &backend)
        .run([IpFamily::V4])
        .await;

    assert!(result.positions.is_empty());
    assert!(matches!(
        result.failures[0].reason,
        FailureReason::DatabaseUnavailable(_)
    ));
    assert!(result.total_failure([IpFamily::V4]));
}
