// SPDX-License-Identifier: GPL-3.0-only

use tracing_subscriber::EnvFilter;

use crate::config::LoggingLevel;

/// Log to stderr. `RUST_LOG` takes precedence over `level`.
pub(crate) fn init(level: LoggingLevel) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(level.as_directive())),
        )
        .init();
}
