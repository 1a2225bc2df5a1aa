use std::sync::Once;

/// Filter used when neither the config nor `RUST_LOG` supplies one.
///
/// wgpu and naga are chatty at `info`; their warnings still come through.
pub const DEFAULT_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

/// Logger configuration.
///
/// `env_filter` uses the `env_logger` filter syntax, e.g. `"strata_engine=debug,wgpu=warn"`.
/// Set `strata_engine=debug` to see every batch flush and depth-buffer wrap.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

impl LoggingConfig {
    pub fn with_filter(filter: impl Into<String>) -> Self {
        Self {
            env_filter: Some(filter.into()),
            ..Self::default()
        }
    }

    /// The filter that will be applied: explicit config, then `RUST_LOG`, then the default.
    pub fn resolved_filter(&self) -> String {
        self.env_filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| DEFAULT_FILTER.to_string())
    }
}

static INIT: Once = Once::new();

/// Installs the global logger. Only the first call has an effect.
///
/// A logger installed elsewhere (a test harness, a host application) is left in place.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let filter = config.resolved_filter();
        let result = env_logger::Builder::new()
            .parse_filters(&filter)
            .write_style(config.write_style)
            .try_init();

        match result {
            Ok(()) => log::debug!("logging initialized ({filter})"),
            Err(e) => log::debug!("logger already installed: {e}"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins() {
        let config = LoggingConfig::with_filter("strata_engine=debug");
        assert_eq!(config.resolved_filter(), "strata_engine=debug");
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging(LoggingConfig::with_filter("warn"));
        init_logging(LoggingConfig::default());
    }
}
