use std::{fs, path::Path};

use anyhow::{Context, Result};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use strum::Display;

pub fn default_logs_datetime_format() -> String {
    "%Y-%m-%d".to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Display)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Default for LogLevel {
    fn default() -> Self {
        Self::Info
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

pub struct LoggerConfig<'a> {
    pub level: LogLevel,
    pub dir_path: &'a str,
    pub filename_log: &'a str,
    pub disable_file_logging: bool,
    pub disable_file_log_date_based: bool,
    pub disable_colors: bool,
    // Overrides per module target, e.g. ("sled", Warn)
    pub module_levels: &'a [(String, LogLevel)],
}

/// Install the global logger: colored console output plus an optional log file.
pub fn init_logger(config: LoggerConfig) -> Result<()> {
    let colors = ColoredLevelConfig::new()
        .error(Color::Red)
        .warn(Color::Yellow)
        .info(Color::Green)
        .debug(Color::Cyan)
        .trace(Color::Magenta);

    let disable_colors = config.disable_colors;
    let console = fern::Dispatch::new()
        .format(move |out, message, record| {
            let level = if disable_colors {
                record.level().to_string()
            } else {
                colors.color(record.level()).to_string()
            };
            out.finish(format_args!(
                "[{}] [{}] [{}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                level,
                record.target(),
                message
            ))
        })
        .chain(std::io::stderr());

    let mut base = fern::Dispatch::new()
        .level(config.level.into())
        // sled is very chatty at debug level
        .level_for("sled", LevelFilter::Warn);

    for (module, level) in config.module_levels {
        base = base.level_for(module.clone(), (*level).into());
    }

    base = base.chain(console);

    if !config.disable_file_logging {
        let dir = Path::new(config.dir_path);
        fs::create_dir_all(dir)
            .with_context(|| format!("Error while creating logs directory {:?}", dir))?;

        let file = fern::Dispatch::new().format(|out, message, record| {
            out.finish(format_args!(
                "[{}] [{}] [{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        });

        let file = if config.disable_file_log_date_based {
            let path = dir.join(config.filename_log);
            file.chain(
                fern::log_file(&path)
                    .with_context(|| format!("Error while opening log file {:?}", path))?,
            )
        } else {
            let pattern = format!(
                "{}.{}",
                default_logs_datetime_format(),
                config.filename_log
            );
            file.chain(fern::DateBased::new(format!("{}/", dir.display()), pattern))
        };

        base = base.chain(file);
    }

    base.apply().context("Error while installing the logger")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_conversion() {
        assert_eq!(LevelFilter::from(LogLevel::Warn), LevelFilter::Warn);
        assert_eq!(LogLevel::default(), LogLevel::Info);
        assert_eq!(LogLevel::Debug.to_string(), "debug");
    }
}
