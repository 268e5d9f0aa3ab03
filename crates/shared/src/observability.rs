//! # 返品通知サービスのトレーシング初期化
//!
//! Notification Service の起動時に一度だけ呼び出し、ログ出力先と形式を決める。
//!
//! ## 出力形式
//!
//! | `LOG_FORMAT` | 用途 | 備考 |
//! |--------------|------|------|
//! | `json` | 本番 | チャネルごとの配信結果を `notification.channel` で集計できる |
//! | `pretty`（既定） | 開発 | 未設定・不正値もこちら |
//!
//! 配信結果のビジネスイベントは次のように抽出できる:
//!
//! ```bash
//! jq 'select(.["event.kind"] == "business_event" and .["notification.channel"] == "client_sms")'
//! ```
//!
//! リポジトリ障害の `InfraError` は生成時の `SpanTrace` を持つため、
//! [`init_tracing`] は `tracing_error::ErrorLayer` も登録する。

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 1 行 1 イベントの JSON
    Json,
    /// 人間向けの整形出力
    #[default]
    Pretty,
}

impl LogFormat {
    /// `LOG_FORMAT` の値を解釈する（不正値は警告して `Pretty`）
    pub fn parse(s: &str) -> Self {
        match s {
            "json" => Self::Json,
            "pretty" => Self::Pretty,
            other => {
                eprintln!("WARNING: unknown LOG_FORMAT={other:?}, falling back to pretty");
                Self::Pretty
            }
        }
    }

    /// 任意の参照関数から `LOG_FORMAT` を読む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        lookup("LOG_FORMAT").map_or_else(Self::default, |value| Self::parse(&value))
    }
}

/// トレーシング初期化設定
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// 起動ログに出すサービス名
    pub service_name: String,
    pub log_format:   LogFormat,
}

impl TracingConfig {
    pub fn new(service_name: impl Into<String>, log_format: LogFormat) -> Self {
        Self {
            service_name: service_name.into(),
            log_format,
        }
    }

    /// 環境変数 `LOG_FORMAT` で出力形式を決める
    pub fn from_env(service_name: impl Into<String>) -> Self {
        Self::new(
            service_name,
            LogFormat::from_lookup(|name| std::env::var(name).ok()),
        )
    }
}

/// トレーシングを初期化する
///
/// ログレベルは `RUST_LOG` で制御し、未設定なら返品通知の各クレートを debug、
/// それ以外を info で出力する。
#[cfg(feature = "observability")]
pub fn init_tracing(config: TracingConfig) {
    use tracing_subscriber::{Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,returnflow=debug".into());

    let fmt_layer = match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_target(true)
            .with_current_span(true)
            .with_span_list(false)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer().boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(tracing_error::ErrorLayer::default())
        .init();

    tracing::info!(
        service = %config.service_name,
        log_format = ?config.log_format,
        "トレーシングを初期化しました"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsonを指定するとjson形式になる() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
    }

    #[test]
    fn test_不正な値はprettyにフォールバックする() {
        assert_eq!(LogFormat::parse("unknown"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Pretty);
    }

    #[test]
    fn test_log_format未設定ならpretty() {
        assert_eq!(LogFormat::from_lookup(|_| None), LogFormat::Pretty);
        assert_eq!(
            LogFormat::from_lookup(|name| (name == "LOG_FORMAT").then(|| "json".to_string())),
            LogFormat::Json
        );
    }

    #[test]
    fn test_サービス名と形式を保持する() {
        let config = TracingConfig::new("notification-service", LogFormat::Json);

        assert_eq!(config.service_name, "notification-service");
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
