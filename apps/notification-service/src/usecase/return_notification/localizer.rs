//! # ローカライズ
//!
//! 通知文言のローカライズとステータス名の解決を行う。
//!
//! ## 設計方針
//!
//! - **`include_str!` によるコンパイル時埋め込み**: `templates/locales/{locale}.json` を
//!   バイナリに埋め込む
//! - **tera テンプレート**: 各キーの文言を `{locale}/{key}` という名前で tera に登録する
//! - **販売者ごとのロケール**: 未設定の販売者は既定ロケールを使い、
//!   ロケールにキーがなければ既定ロケールの文言にフォールバックする

use std::collections::{BTreeMap, HashMap, HashSet};

use returnflow_domain::{contractor::SellerId, status::ReturnStatus};
use serde_json::{Map, Value};
use tera::{Context, Tera};
use thiserror::Error;

/// ローカライズキー
pub mod keys {
    pub const NEW_POSITION_ADDED: &str = "NewPositionAdded";
    pub const POSITION_STATUS_HAS_CHANGED: &str = "PositionStatusHasChanged";
    pub const EMPLOYEE_EMAIL_SUBJECT: &str = "complaintEmployeeEmailSubject";
    pub const EMPLOYEE_EMAIL_BODY: &str = "complaintEmployeeEmailBody";
    pub const CLIENT_EMAIL_SUBJECT: &str = "complaintClientEmailSubject";
    pub const CLIENT_EMAIL_BODY: &str = "complaintClientEmailBody";
}

/// 埋め込みロケール
const LOCALES: [(&str, &str); 2] = [
    ("en", include_str!("../../../../../templates/locales/en.json")),
    ("ru", include_str!("../../../../../templates/locales/ru.json")),
];

/// ローカライズエラー
#[derive(Debug, Error)]
pub enum LocalizationError {
    /// 未知のロケール
    #[error("未知のロケール: {0}")]
    UnknownLocale(String),

    /// どのロケールにも存在しないキー
    #[error("未知のローカライズキー: {0}")]
    UnknownKey(String),

    /// 文言定義の読み込みに失敗
    #[error("文言定義の読み込みに失敗: {0}")]
    Load(String),

    /// テンプレートのレンダリングに失敗
    #[error("テンプレートレンダリングに失敗: {0}")]
    Render(String),
}

/// 文言のローカライズ
pub trait Localizer: Send + Sync {
    /// キーに対応する文言をパラメータで展開して返す
    fn localize(
        &self,
        key: &str,
        params: &Map<String, Value>,
        seller_id: SellerId,
    ) -> Result<String, LocalizationError>;
}

/// ステータス名の解決
pub trait StatusCatalog: Send + Sync {
    /// ステータスコードの表示名（未知のコードは `None`）
    fn status_name(&self, code: i64) -> Option<String>;
}

/// 固定のステータス一覧
#[derive(Debug, Clone, Default)]
pub struct StaticStatusCatalog;

impl StatusCatalog for StaticStatusCatalog {
    fn status_name(&self, code: i64) -> Option<String> {
        ReturnStatus::from_code(code).map(|status| status.display_name().to_string())
    }
}

/// tera による Localizer 実装
pub struct TeraLocalizer {
    engine:         Tera,
    registered:     HashSet<String>,
    default_locale: String,
    seller_locales: HashMap<SellerId, String>,
}

impl TeraLocalizer {
    /// 新しいローカライザを作成
    ///
    /// 既定ロケールと販売者ロケールはいずれも埋め込みロケールに含まれている必要がある。
    pub fn new(
        default_locale: impl Into<String>,
        seller_locales: HashMap<SellerId, String>,
    ) -> Result<Self, LocalizationError> {
        let default_locale = default_locale.into();
        let is_known = |locale: &str| LOCALES.iter().any(|(name, _)| *name == locale);
        if let Some(unknown) = std::iter::once(&default_locale)
            .chain(seller_locales.values())
            .find(|locale| !is_known(locale))
        {
            return Err(LocalizationError::UnknownLocale(unknown.clone()));
        }

        let mut templates = Vec::new();
        for (locale, source) in LOCALES {
            let messages: BTreeMap<String, String> = serde_json::from_str(source)
                .map_err(|e| LocalizationError::Load(format!("{locale}: {e}")))?;
            templates.extend(
                messages
                    .into_iter()
                    .map(|(key, template)| (format!("{locale}/{key}"), template)),
            );
        }

        let registered = templates.iter().map(|(name, _)| name.clone()).collect();
        let mut engine = Tera::default();
        engine
            .add_raw_templates(templates)
            .map_err(|e| LocalizationError::Load(e.to_string()))?;

        Ok(Self {
            engine,
            registered,
            default_locale,
            seller_locales,
        })
    }

    fn locale_for(&self, seller_id: SellerId) -> &str {
        self.seller_locales
            .get(&seller_id)
            .unwrap_or(&self.default_locale)
    }

    fn template_name(&self, key: &str, seller_id: SellerId) -> Option<String> {
        [self.locale_for(seller_id), self.default_locale.as_str()]
            .into_iter()
            .map(|locale| format!("{locale}/{key}"))
            .find(|name| self.registered.contains(name))
    }
}

impl Localizer for TeraLocalizer {
    fn localize(
        &self,
        key: &str,
        params: &Map<String, Value>,
        seller_id: SellerId,
    ) -> Result<String, LocalizationError> {
        let name = self
            .template_name(key, seller_id)
            .ok_or_else(|| LocalizationError::UnknownKey(key.to_string()))?;
        let context =
            Context::from_serialize(params).map_err(|e| LocalizationError::Render(e.to_string()))?;

        self.engine
            .render(&name, &context)
            .map_err(|e| LocalizationError::Render(e.to_string()))
    }
}
