use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// The HTTP stack logs every connection and request. Hidden below TRACE.
const DEPENDENCY_MODULES: &[&str] = &["tower", "tracing", "hyper", "axum", "mio"];

/// Handlers echo every broker request body, binding credentials included.
/// Hidden in production below TRACE.
const REQUEST_ECHO_MODULES: &[&str] = &["web::controller"];

/// How the broker's console output is set up for a given [`Config`].
#[derive(Debug, PartialEq)]
pub struct LogProfile {
    pub level: LevelFilter,
    pub ignored_modules: Vec<&'static str>,
    pub color: bool,
}

impl LogProfile {
    pub fn for_config(config: &Config) -> Self {
        let level = config.log_level_filter;
        let tracing = level == LevelFilter::Trace;

        let mut ignored_modules = Vec::new();
        if !tracing {
            ignored_modules.extend_from_slice(DEPENDENCY_MODULES);
            if config.is_production() {
                ignored_modules.extend_from_slice(REQUEST_ECHO_MODULES);
            }
        }

        Self {
            level,
            ignored_modules,
            // Production output goes to log collectors, not terminals.
            color: !config.is_production(),
        }
    }

    fn simplelog_config(&self) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();
        for module in &self.ignored_modules {
            builder.add_filter_ignore_str(module);
        }

        builder.build()
    }

    fn color_choice(&self) -> ColorChoice {
        if self.color {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }
}

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger. Fails if one is already installed.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        let profile = LogProfile::for_config(config);

        TermLogger::init(
            profile.level,
            profile.simplelog_config(),
            TerminalMode::Mixed,
            profile.color_choice(),
        )
    }
}
