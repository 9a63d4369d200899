use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const LOG_FILE_PREFIX: &str = "signup-load-test.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub format: LogFormat,
    pub dir: Option<PathBuf>,
    pub verbose: bool,
}

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "info,signup_load_test=debug"
    } else {
        "info"
    }
}

/// Console layer plus, when a directory is given, a daily-rolling JSON file layer.
///
/// The returned guard flushes the file writer on drop and must outlive the run.
pub fn build_layers(options: &LogOptions) -> (Vec<BoxedLayer>, Option<WorkerGuard>) {
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(2);

    match options.format {
        LogFormat::Text => layers.push(fmt::layer().boxed()),
        LogFormat::Json => layers.push(fmt::layer().json().boxed()),
    }

    let guard = options.dir.as_ref().map(|dir| {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        layers.push(
            fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .boxed(),
        );
        guard
    });

    (layers, guard)
}

pub fn init_logging(options: &LogOptions) -> anyhow::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(options.verbose)));

    let (layers, guard) = build_layers(options);

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "info");
        assert!(default_directive(true).contains("signup_load_test=debug"));
    }

    #[test]
    fn test_file_layer_writes_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let options = LogOptions {
            format: LogFormat::Text,
            dir: Some(dir.path().to_path_buf()),
            verbose: false,
        };

        let (layers, guard) = build_layers(&options);
        assert_eq!(layers.len(), 2);
        let guard = guard.expect("file logging should return a guard");

        let subscriber = tracing_subscriber::registry().with(layers);
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(vu = 7, "Signup sent");
        });
        drop(guard);

        let log_file = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(Result::ok)
            .find(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(LOG_FILE_PREFIX)
            })
            .expect("rolling log file should exist");
        let contents = std::fs::read_to_string(log_file.path()).unwrap();
        let line: serde_json::Value = serde_json::from_str(contents.lines().next().unwrap()).unwrap();

        assert_eq!(line["fields"]["message"], "Signup sent");
        assert_eq!(line["fields"]["vu"], 7);
    }

    #[test]
    fn test_console_only_without_dir() {
        let (layers, guard) = build_layers(&LogOptions::default());
        assert_eq!(layers.len(), 1);
        assert!(guard.is_none());
    }
}
