//! # Notification Service 設定
//!
//! 環境変数から Notification Service の設定を読み込む。
//!
//! 必須項目の欠落や不正な値は [`ConfigError`] として返す。

use std::{collections::HashMap, env, str::FromStr};

use returnflow_domain::contractor::SellerId;
use strum::EnumString;
use thiserror::Error;

/// 設定読み込みエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 必須の環境変数が未設定
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    /// 環境変数の値が不正
    #[error("{name} の値が不正です: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Notification Service の設定
#[derive(Debug, Clone)]
pub struct NotificationServiceConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
    /// メール送信設定
    pub messaging:    MessagingConfig,
    /// SMS 送信設定
    pub sms:          SmsConfig,
    /// ローカライズ設定
    pub localization: LocalizationConfig,
}

/// メール送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum MessagingBackend {
    Smtp,
    Noop,
}

/// メール送信の設定
#[derive(Debug, Clone)]
pub struct MessagingConfig {
    pub backend:   MessagingBackend,
    /// SMTP ホスト（backend=smtp の場合に使用）
    pub smtp_host: String,
    /// SMTP ポート（backend=smtp の場合に使用）
    pub smtp_port: u16,
}

/// SMS 送信バックエンド
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SmsBackend {
    Http,
    Noop,
}

/// SMS 送信の設定
#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub backend:      SmsBackend,
    /// ゲートウェイ URL（backend=http の場合は必須）
    pub gateway_url:  Option<String>,
    /// ゲートウェイへのリクエストタイムアウト（秒）
    pub timeout_secs: u64,
}

/// ローカライズの設定
#[derive(Debug, Clone)]
pub struct LocalizationConfig {
    /// 既定のロケール
    pub default_locale: String,
    /// 販売者ごとのロケール
    pub seller_locales: HashMap<SellerId, String>,
}

impl NotificationServiceConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &'static str, default: &str| {
            lookup(name).unwrap_or_else(|| default.to_string())
        };
        let require = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));

        let sms_backend: SmsBackend = parse("SMS_BACKEND", get("SMS_BACKEND", "noop"))?;
        let gateway_url = lookup("SMS_GATEWAY_URL");
        if sms_backend == SmsBackend::Http && gateway_url.is_none() {
            return Err(ConfigError::Missing("SMS_GATEWAY_URL"));
        }

        Ok(Self {
            host:         get("NOTIFICATION_SERVICE_HOST", "0.0.0.0"),
            port:         parse("NOTIFICATION_SERVICE_PORT", require("NOTIFICATION_SERVICE_PORT")?)?,
            database_url: require("DATABASE_URL")?,
            messaging:    MessagingConfig {
                backend:   parse("MESSAGING_BACKEND", get("MESSAGING_BACKEND", "noop"))?,
                smtp_host: get("SMTP_HOST", "localhost"),
                smtp_port: parse("SMTP_PORT", get("SMTP_PORT", "1025"))?,
            },
            sms:          SmsConfig {
                backend: sms_backend,
                gateway_url,
                timeout_secs: parse("SMS_TIMEOUT_SECS", get("SMS_TIMEOUT_SECS", "5"))?,
            },
            localization: LocalizationConfig {
                default_locale: get("DEFAULT_LOCALE", "en"),
                seller_locales: parse_seller_locales(&get("SELLER_LOCALES", ""))?,
            },
        })
    }
}

fn parse<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { name, value })
}

/// `"<seller_id>=<locale>,..."` 形式を解析する
fn parse_seller_locales(value: &str) -> Result<HashMap<SellerId, String>, ConfigError> {
    let invalid = || ConfigError::Invalid {
        name:  "SELLER_LOCALES",
        value: value.to_string(),
    };

    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let (id, locale) = entry.split_once('=').ok_or_else(invalid)?;
            let seller_id = id
                .trim()
                .parse()
                .ok()
                .and_then(SellerId::new)
                .ok_or_else(invalid)?;
            let locale = locale.trim();
            if locale.is_empty() {
                return Err(invalid());
            }
            Ok((seller_id, locale.to_string()))
        })
        .collect()
}
