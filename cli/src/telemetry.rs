use std::{fs::File, path::Path};

use anyhow::{Context, Result};

use pprof::{ProfilerGuard, ProfilerGuardBuilder};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialise tracing output and, when requested, start a CPU profiler.
pub fn init_telemetry(profiling: bool) -> Option<ProfilerGuard<'static>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false);
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();

    if !profiling {
        return None;
    }
    ProfilerGuardBuilder::default()
        .frequency(1000)
        .blocklist(&["libc", "libpthread", "libgcc", "libm"])
        .build()
        .ok()
}

/// Renders the samples collected so far as a flamegraph SVG at `path`.
pub fn write_flamegraph(guard: ProfilerGuard<'_>, path: &Path) -> Result<()> {
    let report = guard
        .report()
        .build()
        .context("failed to collect CPU profile")?;
    let file = File::create(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    report
        .flamegraph(file)
        .with_context(|| format!("failed to render flamegraph into {}", path.display()))
}
