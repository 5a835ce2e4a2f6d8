// File: crates/multiline-core/src/telemetry.rs
// Summary: Opt-in tracing subscriber setup for host binaries (feature `telemetry`).

/// Install a compact `fmt` subscriber; `RUST_LOG` wins over `default_filter`.
///
/// Returns `false` without the `telemetry` feature, or when the host already
/// installed a global subscriber.
#[must_use]
pub fn init_tracing(default_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
        tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().try_init().is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_filter;
        false
    }
}

/// [`init_tracing`] at `info`.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing("info")
}
