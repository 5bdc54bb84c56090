// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

use anyhow::bail;
use connmap_common::{config::Config, info};
use connmap_core::geo::maxmind::MaxmindBackend;
use connmap_core::pipeline::ConnectionPipeline;
use connmap_core::system::SsLister;

use crate::output;
use crate::terminal::print::Print;

pub async fn map(cfg: &Config) -> anyhow::Result<()> {
    Print::header(&format!("{} connections", hostname()));

    let families: Vec<String> = cfg.families.iter().map(|f| f.to_string()).collect();
    info!(verbosity = 1, "Mapping {} peers", families.join(" and "));

    let lister = SsLister::from(cfg);
    let backend = MaxmindBackend::from(cfg);
    let result = ConnectionPipeline::new(&lister, &backend)
        .run(cfg.families.iter().copied())
        .await;

    Print::summary(&result, &cfg.families);
    output::emit(&result.positions, cfg)?;

    if result.total_failure(cfg.families.iter().copied()) {
        bail!("none of the requested address families could be mapped");
    }
    Ok(())
}

fn hostname() -> String {
    sys_info::hostname().unwrap_or_else(|_| String::from("localhost"))
}
