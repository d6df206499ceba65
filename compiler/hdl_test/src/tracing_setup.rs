use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for the test runner.
///
/// Does nothing unless `RUST_LOG` is set, and only installs a subscriber
/// the first time it is called.
///
/// ```bash
/// RUST_LOG=hdl_test=debug cargo test
/// ```
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}
