//! 開発用ロギング
//!
//! logファサードに対する最小限のstderr出力ロガー

use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// ログレベル指定用の環境変数名
const LOG_LEVEL_ENV: &str = "DATAFILE_LOG";

/// stderrへ出力する簡易ロガー
struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// ロガーを初期化
///
/// レベルは環境変数 `DATAFILE_LOG` から取得（既定はwarn）。
/// ライブラリ本体は初期化なしでも動作する。
pub fn init() -> Result<(), SetLoggerError> {
    let level = std::env::var(LOG_LEVEL_ENV)
        .map(|value| parse_level(&value))
        .unwrap_or(LevelFilter::Warn);

    log::set_logger(&LOGGER).map(|()| log::set_max_level(level))
}

/// レベル文字列の解釈（未知の値はwarn扱い）
fn parse_level(value: &str) -> LevelFilter {
    match value.to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}
