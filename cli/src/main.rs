// Copyright (c) 2026 OverTheFlow and Contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public License, v. 2.0.
// If a copy of the MPL was not distributed with this file, You can obtain one at
// https://mozilla.org/MPL/2.0/.

//! # connmap CLI Entry Point
//!
//! Bootstraps logging and configuration, runs one mapping pass and converts
//! the outcome into an exit status.
//!
//! ## Responsibilities
//!
//! 1.  **Runtime Initialization**: a current-thread tokio runtime. The run is
//!     strictly sequential; the runtime exists so the connection listing can be
//!     bounded by a timeout.
//! 2.  **Global State Setup**: the `tracing` subscriber (stderr) and terminal
//!     output modes (quiet levels, banner).
//! 3.  **Configuration Mapping**: `CommandLine` → `Config`.
//! 4.  **Error Boundary**: any error that reaches `main` is logged and turned
//!     into a non-zero `ExitCode`. Per-address and per-family problems never
//!     get this far; they are reported by the pipeline and the run continues.

mod commands;
mod output;
mod terminal;

use std::process::ExitCode;

use connmap_common::{config::Config, error};

use crate::{
    commands::{CommandLine, map},
    terminal::{logging, print::Print},
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let commands = CommandLine::parse_args();
    logging::init_logging(commands.verbosity, commands.quiet);

    let cfg = Config::from(&commands);

    let _ = Print::init(&cfg);
    Print::banner();

    let exit_code = match map::map(&cfg).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Critical failure: {e:#}");
            ExitCode::FAILURE
        }
    };

    Print::end_of_program();

    exit_code
}
