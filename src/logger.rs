use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::rolling_file::RollingFileAppender;
use log4rs::append::rolling_file::policy::compound::{
    CompoundPolicy, roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger,
};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::{Path, PathBuf};

/// Target used for per-plan-entry timing lines.
pub const METRICS_TARGET: &str = "kdbench::metrics";

const FILE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l}] {t} - {m}{n}";
const CONSOLE_PATTERN: &str = "[{l}] {m}{n}";
const ROLL_SIZE: u64 = 10 * 1024 * 1024;

/// Parse a textual level; anything unknown falls back to `info`.
#[must_use]
pub fn parse_level(level: Option<&str>) -> LevelFilter {
    match level.unwrap_or("info").to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

fn rolling(base: &Path, stem: &str, keep: u32) -> Result<RollingFileAppender, Box<dyn std::error::Error>> {
    let roller = FixedWindowRoller::builder()
        .build(&format!("{}", base.join(format!("{stem}.{{}}.log")).display()), keep)?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(ROLL_SIZE)), Box::new(roller));
    let appender = RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(FILE_PATTERN)))
        .build(base.join(format!("{stem}.log")), Box::new(policy))?;
    Ok(appender)
}

/// Build the log4rs configuration.
///
/// - `dir`: when set, `app.log` and `metrics.log` roll inside it; when `None`, everything goes to stderr.
/// - `level`: error|warn|info|debug|trace
/// - `retention`: number of rolled files to keep (default 7)
///
/// # Errors
/// Returns an error if the directory cannot be created or an appender cannot be built.
pub fn build_config(
    dir: Option<&Path>,
    level: Option<&str>,
    retention: Option<usize>,
) -> Result<Config, Box<dyn std::error::Error>> {
    let lvl = parse_level(level);
    let keep = u32::try_from(retention.unwrap_or(7)).unwrap_or(u32::MAX);
    let builder = match dir {
        Some(base) => {
            std::fs::create_dir_all(base)?;
            Config::builder()
                .appender(Appender::builder().build("app", Box::new(rolling(base, "app", keep)?)))
                .appender(Appender::builder().build("metrics", Box::new(rolling(base, "metrics", keep)?)))
                .logger(Logger::builder().appender("metrics").additive(false).build(METRICS_TARGET, lvl))
        }
        None => {
            // stdout stays clean for the summary table
            let console = ConsoleAppender::builder()
                .target(Target::Stderr)
                .encoder(Box::new(PatternEncoder::new(CONSOLE_PATTERN)))
                .build();
            Config::builder().appender(Appender::builder().build("app", Box::new(console)))
        }
    };
    Ok(builder.build(Root::builder().appender("app").build(lvl))?)
}

/// Configure logging globally for the process. A second call is ignored by log4rs.
pub fn configure_logging(dir: Option<&Path>, level: Option<&str>, retention: Option<usize>) {
    match build_config(dir, level, retention) {
        Ok(config) => {
            let _ = log4rs::init_config(config);
        }
        Err(e) => eprintln!("logging disabled: {e}"),
    }
}

/// Configure logging from environment variables if present:
/// - KDBENCH_LOG_DIR
/// - KDBENCH_LOG_LEVEL
/// - KDBENCH_LOG_RETENTION
pub fn configure_from_env() {
    let dir = std::env::var("KDBENCH_LOG_DIR").ok().map(PathBuf::from);
    let level = std::env::var("KDBENCH_LOG_LEVEL").ok();
    let retention =
        std::env::var("KDBENCH_LOG_RETENTION").ok().and_then(|s| s.parse::<usize>().ok());
    configure_logging(dir.as_deref(), level.as_deref(), retention);
}
