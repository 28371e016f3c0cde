//! Log output for the service.
//!
//! `RUST_LOG` takes precedence; without it the service logs its own `info` events and
//! the HTTP trace layer. Module paths are hidden (`with_target(false)`) because every
//! actor event already carries an `entity_type` field.
//!
//! ```bash
//! RUST_LOG=debug storefront --log-format json
//! ```

use crate::config::LogFormat;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "storefront=info,tower_http=info,actor_framework=info";

pub fn setup_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}
