//! Tracing setup
//!
//! The terminal belongs to the UI, so logs only go to a file and only when
//! one is configured.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log to `log_path`, filtered by `RUST_LOG` (default `info`)
///
/// Does nothing when `log_path` is `None`.
pub fn init_tracing(log_path: Option<&Path>) -> io::Result<()> {
    let Some(log_path) = log_path else {
        return Ok(());
    };

    let file = File::create(log_path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
    Ok(())
}
