//! Logging initialization

/// Install `env_logger` as the `log` backend.
///
/// The filter defaults to `info` and can be overridden with `RUST_LOG`.
/// Timestamps carry milliseconds so per-stage timings are readable in
/// generation logs. The library itself never calls this.
///
/// # Example
/// ```no_run
/// voxgen::core::logging::init();
/// log::info!("Generator started");
/// ```
pub fn init() {
    builder().init();
}

/// Same as [`init`] but returns an error instead of panicking when a logger
/// is already installed (tests, embedding applications).
pub fn try_init() -> Result<(), log::SetLoggerError> {
    builder().try_init()
}

fn builder() -> env_logger::Builder {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info"),
    );
    builder.format_timestamp_millis();
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_rejected() {
        // The first call either installs the logger or finds one already there
        let _ = try_init();
        assert!(try_init().is_err());
    }
}
