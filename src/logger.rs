use std::path::Path;

use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

/// Initializes the logging system.
///
/// Uses the given log4rs YAML file when provided, then a `log4rs.yaml` in the
/// working directory, and falls back to an info-level stderr appender.
/// It should be called once at the beginning of the application's execution.
pub fn init(config: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = config {
        log4rs::init_file(path, Default::default())?;
        return Ok(());
    }
    if Path::new("log4rs.yaml").exists() {
        log4rs::init_file("log4rs.yaml", Default::default())?;
        return Ok(());
    }
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new("{d(%Y-%m-%d %H:%M:%S)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(log::LevelFilter::Info))?;
    log4rs::init_config(config)?;
    Ok(())
}
