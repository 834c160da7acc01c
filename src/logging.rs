//! log4rs setup.
//!
//! Logs always go to stderr so stdout only carries the rendered plan.

use crate::error::{Error, Result};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::Path;

/// Environment variable naming the log4rs YAML file.
pub const LOG_CONFIG_ENV: &str = "IPCALC_LOG_CONFIG";

/// Default log4rs YAML file, relative to the working directory.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

/// Path of the log configuration file to try.
pub fn log_config_path() -> String {
    std::env::var(LOG_CONFIG_ENV).unwrap_or_else(|_| DEFAULT_LOG_CONFIG.to_string())
}

/// Initialise logging from the YAML file if present, otherwise warn-level
/// logging to stderr.
pub fn init_logging() -> Result<()> {
    let config_file = log_config_path();
    if Path::new(&config_file).exists() {
        return log4rs::init_file(&config_file, Default::default())
            .map_err(|e| Error::Logging(format!("{config_file}: {e}")));
    }

    log4rs::init_config(default_config(LevelFilter::Warn)?)
        .map(|_| ())
        .map_err(|e| Error::Logging(e.to_string()))
}

/// stderr console appender at `level`.
pub fn default_config(level: LevelFilter) -> Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}",
        )))
        .build();

    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(|e| Error::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_builds() {
        let config = default_config(LevelFilter::Debug).expect("config should build");
        assert_eq!(config.root().level(), LevelFilter::Debug);
        assert_eq!(config.appenders().len(), 1);
    }
}
