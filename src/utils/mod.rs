pub mod atomic;
pub mod build_info;
pub mod paths;

use std::{io, sync::Once};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "otori_core=info";

/// Initializes the global tracing subscriber. Logs go to stderr so they never
/// land inside a wizard frame.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    });
}
