//! # エラーレスポンス（RFC 9457 Problem Details）
//!
//! HTTP 境界で返すエラーレスポンス構造体を提供する。
//!
//! ## 設計
//!
//! - `ErrorResponse` は純粋なデータ構造（`Serialize` / `Deserialize` のみ）
//! - axum の `IntoResponse` 変換はサービス側の責務
//! - 使うエラー種別のみ便利コンストラクタで提供する

use serde::{Deserialize, Serialize};

/// error_type URI のベースパス
const ERROR_TYPE_BASE: &str = "https://returnflow.example.com/errors";

/// エラーレスポンス（RFC 9457 Problem Details）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub error_type: String,
    pub title:      String,
    pub status:     u16,
    pub detail:     String,
}

impl ErrorResponse {
    /// 汎用コンストラクタ
    ///
    /// `error_type_suffix` はベース URI に付加される（例: `"template-data-empty"`）。
    pub fn new(
        error_type_suffix: &str,
        title: impl Into<String>,
        status: u16,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            error_type: format!("{ERROR_TYPE_BASE}/{error_type_suffix}"),
            title: title.into(),
            status,
            detail: detail.into(),
        }
    }

    /// 400 Validation Error
    pub fn validation_error(detail: impl Into<String>) -> Self {
        Self::new("validation-error", "Validation Error", 400, detail)
    }

    /// 400 Bad Request（参照エンティティの不在・不整合）
    pub fn entity_not_found(detail: impl Into<String>) -> Self {
        Self::new("entity-not-found", "Bad Request", 400, detail)
    }

    /// 500 テンプレートデータ不備
    ///
    /// 入力は正しいがレンダリング用データが欠けている内部不整合。
    pub fn template_data_empty(detail: impl Into<String>) -> Self {
        Self::new("template-data-empty", "Internal Server Error", 500, detail)
    }

    /// 500 Internal Server Error
    ///
    /// detail は固定値（内部情報を漏らさないため）。
    pub fn internal_error() -> Self {
        Self::new(
            "internal-error",
            "Internal Server Error",
            500,
            "内部エラーが発生しました",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_で全フィールドが正しく設定される() {
        let error = ErrorResponse::new("custom-error", "Custom Error", 418, "カスタムエラー");

        assert_eq!(
            error.error_type,
            "https://returnflow.example.com/errors/custom-error"
        );
        assert_eq!(error.title, "Custom Error");
        assert_eq!(error.status, 418);
        assert_eq!(error.detail, "カスタムエラー");
    }

    #[test]
    fn test_validation_error_が400を返す() {
        let error = ErrorResponse::validation_error("Invalid or missing data for key: date");

        assert_eq!(error.status, 400);
        assert_eq!(
            error.error_type,
            "https://returnflow.example.com/errors/validation-error"
        );
    }

    #[test]
    fn test_template_data_empty_が500を返す() {
        let error = ErrorResponse::template_data_empty("Template Data (DIFFERENCES) is empty!");

        assert_eq!(error.status, 500);
        assert_eq!(error.detail, "Template Data (DIFFERENCES) is empty!");
    }

    #[test]
    fn test_serializeでtypeキーにリネームされる() {
        let json = serde_json::to_value(ErrorResponse::internal_error()).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "type": "https://returnflow.example.com/errors/internal-error",
                "title": "Internal Server Error",
                "status": 500,
                "detail": "内部エラーが発生しました"
            })
        );
    }
}
