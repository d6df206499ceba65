use hdl_diagnostic::ColorMode;

/// Configuration for the test runner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TestRunnerConfig {
    /// Run only the unit test with exactly this name.
    pub filter: Option<String>,
    /// Ask the interpreter to trace every expression.
    pub trace_all: bool,
    /// Quickcheck seed; derived from pid and clock when absent.
    pub seed: Option<u64>,
    /// Color mode for located diagnostics.
    pub color: ColorMode,
}

#[derive(Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid seed `{0}`: expected an unsigned 64-bit integer")]
    InvalidSeed(String),
    #[error("invalid color mode `{0}`: expected auto, always or never")]
    InvalidColor(String),
}

impl TestRunnerConfig {
    /// Build a config from command-line style arguments.
    ///
    /// Flags may appear anywhere; arguments that are not recognized flags
    /// (such as the input path) are ignored.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self, ConfigError> {
        let mut config = TestRunnerConfig::default();
        for arg in args {
            let arg = arg.as_ref();
            if let Some(filter) = arg.strip_prefix("--filter=") {
                config.filter = Some(filter.to_string());
            } else if arg == "--trace-all" {
                config.trace_all = true;
            } else if let Some(seed) = arg.strip_prefix("--seed=") {
                let seed = seed
                    .parse()
                    .map_err(|_| ConfigError::InvalidSeed(seed.to_string()))?;
                config.seed = Some(seed);
            } else if let Some(color) = arg.strip_prefix("--color=") {
                config.color = parse_color(color)?;
            }
        }
        Ok(config)
    }

    /// Whether the unit test `name` passes the filter.
    pub fn matches(&self, name: &str) -> bool {
        self.filter.as_deref().is_none_or(|filter| filter == name)
    }
}

fn parse_color(value: &str) -> Result<ColorMode, ConfigError> {
    match value {
        "auto" => Ok(ColorMode::Auto),
        "always" => Ok(ColorMode::Always),
        "never" => Ok(ColorMode::Never),
        _ => Err(ConfigError::InvalidColor(value.to_string())),
    }
}
