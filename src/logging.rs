// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_ENV: &str = "HISABKITAB_LOG";

/// Install the stderr subscriber. Stdout is reserved for command output.
///
/// The filter comes from `HISABKITAB_LOG` (e.g. `hisabkitab=debug`) and
/// defaults to `warn`; `verbose` raises the default to `debug`.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let stderr_log = fmt::layer().with_writer(std::io::stderr).with_target(false);

    // Keep an already-installed subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(stderr_log)
        .try_init();
}
