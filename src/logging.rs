use std::path::Path;

use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::runtime::ConfigErrors;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use thiserror::Error;

use crate::config::Config;

const PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%S%.3f%:z)} {h({l:<5})} {t} - {m}{n}";

#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("could not open log file: {0}")]
    File(#[from] std::io::Error),

    #[error("invalid logging configuration: {0}")]
    Config(#[from] ConfigErrors),

    #[error("logger already installed: {0}")]
    Install(#[from] log::SetLoggerError),
}

/// Installs the global logger: stdout always, plus a file when configured.
pub fn init(config: &Config) -> Result<log4rs::Handle, LoggingError> {
    let config = build(config.log_level, config.log_file.as_deref())?;
    Ok(log4rs::init_config(config)?)
}

pub fn build(level: LevelFilter, log_file: Option<&Path>) -> Result<log4rs::Config, LoggingError> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();

    let mut builder = log4rs::Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)));
    let mut root = Root::builder().appender("stdout");

    if let Some(path) = log_file {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(path)?;
        builder = builder.appender(Appender::builder().build("logfile", Box::new(logfile)));
        root = root.appender("logfile");
    }

    Ok(builder.build(root.build(level))?)
}
