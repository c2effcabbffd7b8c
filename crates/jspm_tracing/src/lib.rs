use std::sync::atomic::{AtomicBool, Ordering};

use tracing::Level;
use tracing_subscriber::{filter::Targets, fmt, prelude::*, EnvFilter};

/// Crates whose spans and events are shown at every level.
const JSPM_TARGETS: &[&str] = &["jspm_plugin", "jspm_plugin_import_map", "jspm_compiler"];

static IS_INIT: AtomicBool = AtomicBool::new(false);

/// Install a global subscriber printing jspm events, filtered by `RUST_LOG`.
///
/// Only the first call has an effect. A subscriber installed by someone else
/// is left alone.
pub fn init() {
  if IS_INIT.swap(true, Ordering::SeqCst) {
    return;
  }
  let targets = Targets::new().with_targets(JSPM_TARGETS.iter().map(|target| (*target, Level::TRACE)));
  let _ = tracing_subscriber::registry()
    .with(fmt::layer().with_target(true))
    .with(EnvFilter::from_default_env())
    .with(targets)
    .try_init();
}

/// Install the subscriber only when `RUST_LOG` asks for output. Returns whether
/// it did.
pub fn enable_tracing_on_demand() -> bool {
  let requested = std::env::var_os("RUST_LOG").is_some();
  if requested {
    init();
  }
  requested
}
