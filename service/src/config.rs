use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Seed document loaded at startup and on every reset, relative to the working directory.
pub const DEFAULT_SEED_PATH: &str = "data.json";

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Path to the JSON seed document defining the initial behaviors and limits.
    /// The broker returns to this document on every `POST /config/reset`.
    #[arg(short, long, env, default_value = DEFAULT_SEED_PATH)]
    seed_path: PathBuf,

    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use. Production leaves backtraces out of
    /// server error reports.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Builds a configuration from explicit flags only, skipping `.env` and the
    /// process arguments.
    pub fn from_args(args: &[&str]) -> Self {
        Config::parse_from(std::iter::once("mock_broker").chain(args.iter().copied()))
    }

    pub fn seed_path(&self) -> &Path {
        &self.seed_path
    }

    pub fn interface(&self) -> &str {
        self.interface.as_deref().unwrap_or("127.0.0.1")
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rust_env_parses_case_insensitively() {
        assert_eq!("PRODUCTION".parse::<RustEnv>(), Ok(RustEnv::Production));
        assert_eq!("staging".parse::<RustEnv>(), Ok(RustEnv::Staging));
        assert_eq!("qa".parse::<RustEnv>(), Err(RustEnvParseError));
    }

    #[test]
    fn command_line_flags_override_defaults() {
        let config = Config::parse_from([
            "mock_broker",
            "--seed-path",
            "fixtures/seed.json",
            "--port",
            "9292",
            "--runtime-env",
            "production",
            "--log-level-filter",
            "DEBUG",
        ]);

        assert_eq!(config.seed_path(), Path::new("fixtures/seed.json"));
        assert_eq!(config.port, 9292);
        assert!(config.is_production());
        assert_eq!(config.log_level_filter, LevelFilter::Debug);
    }

    #[test]
    fn seed_path_defaults_to_the_bundled_seed() {
        let config = Config::from_args(&[]);

        assert_eq!(config.seed_path(), Path::new(DEFAULT_SEED_PATH));
        assert_eq!(config.interface(), "127.0.0.1");
    }
}
