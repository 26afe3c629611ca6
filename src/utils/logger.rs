use crate::utils::error::{BookingError, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const CRATE_TARGET: &str = "detail_booking";

/// 終端機輸出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Compact,
    /// 一行一筆 JSON，事件欄位攤平到最上層
    Json,
}

/// `RUST_LOG` 未設定時使用的過濾條件
pub fn default_directive(verbose: bool) -> String {
    if verbose {
        format!("{}=debug,info", CRATE_TARGET)
    } else {
        format!("{}=info", CRATE_TARGET)
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// 安裝全域 subscriber；重複呼叫會回傳 `ConfigError`
pub fn init_logger(format: LogFormat, verbose: bool) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(verbose));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false);

    let installed = match format {
        LogFormat::Compact => registry.with(fmt_layer.compact()).try_init(),
        LogFormat::Json => registry
            .with(
                fmt_layer
                    .json()
                    .flatten_event(true)
                    .with_current_span(false),
            )
            .try_init(),
    };

    installed.map_err(|e| BookingError::ConfigError {
        message: format!("failed to install logger: {}", e),
    })
}
