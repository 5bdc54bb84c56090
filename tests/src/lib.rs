// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

mod pipeline;

/// In-memory collaborators standing in for `ss` and the city database.
#[cfg(test)]
pub mod utils {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use connmap_common::models::family::IpFamily;
    use connmap_common::models::position::Coordinates;
    use connmap_common::system::{ConnectionLister, EnumerationError};
    use connmap_core::geo::{GeoBackend, GeoError, GeoResolver};

    /// Serves canned listing text per family; a missing entry fails like a
    /// non-zero exit of the listing command.
    #[derive(Default)]
    pub struct ScriptedLister {
        listings: HashMap<IpFamily, String>,
    }

    impl ScriptedLister {
        pub fn with(mut self, family: IpFamily, text: &str) -> Self {
            self.listings.insert(family, text.to_string());
            self
        }
    }

    #[async_trait]
    impl ConnectionLister for ScriptedLister {
        async fn list_connections(&self, family: IpFamily) -> Result<String, EnumerationError> {
            self.listings
                .get(&family)
                .cloned()
                .ok_or_else(|| EnumerationError::Status {
                    command: format!("ss -n {}", family.selector()),
                    status: "exit status: 1".to_string(),
                })
        }
    }

    /// Address → coordinates table shared by every resolver it opens.
    /// Counts how many resolvers are alive so tests can check the handle is
    /// released after each family pass.
    #[derive(Clone, Default)]
    pub struct TableBackend {
        table: Arc<HashMap<String, (f64, f64)>>,
        open_handles: Arc<AtomicUsize>,
        opened: Arc<AtomicUsize>,
    }

    impl TableBackend {
        pub fn new(entries: &[(&str, (f64, f64))]) -> Self {
            Self {
                table: Arc::new(
                    entries
                        .iter()
                        .map(|(addr, coords)| (addr.to_string(), *coords))
                        .collect(),
                ),
                ..Self::default()
            }
        }

        pub fn open_handles(&self) -> usize {
            self.open_handles.load(Ordering::SeqCst)
        }

        pub fn times_opened(&self) -> usize {
            self.opened.load(Ordering::SeqCst)
        }
    }

    impl GeoBackend for TableBackend {
        fn open(&self, _family: IpFamily) -> Result<Box<dyn GeoResolver>, GeoError> {
            self.opened.fetch_add(1, Ordering::SeqCst);
            self.open_handles.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(TableResolver {
                table: self.table.clone(),
                open_handles: self.open_handles.clone(),
            }))
        }
    }

    struct TableResolver {
        table: Arc<HashMap<String, (f64, f64)>>,
        open_handles: Arc<AtomicUsize>,
    }

    impl GeoResolver for TableResolver {
        fn lookup(&self, address: &str) -> Result<Option<Coordinates>, GeoError> {
            Ok(self
                .table
                .get(address)
                .map(|&(lat, lon)| Coordinates::new(lat, lon)))
        }
    }

    impl Drop for TableResolver {
        fn drop(&mut self) {
            self.open_handles.fetch_sub(1, Ordering::SeqCst);
        }
    }

    pub fn listing(peers: &[&str]) -> String {
        let mut text = String::from("State  Recv-Q Send-Q Local-Address:Port  Peer-Address:Port\n");
        for (idx, peer) in peers.iter().enumerate() {
            text.push_str(&format!("ESTAB  0      0      10.0.0.5:{}     {peer}\n", 51000 + idx));
        }
        text
    }
}
