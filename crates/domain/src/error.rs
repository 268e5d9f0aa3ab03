//! # 返品通知のエラー定義
//!
//! パイプラインのどの段階で処理が中断したかを表現するエラー型。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | 用途 |
//! |-----------|----------------|------|
//! | `Validation` | 400 Bad Request | 入力値の欠落・型変換失敗 |
//! | `NotFound` | 400 Bad Request | 販売者・顧客・従業員が存在しない |
//! | `Template` | 500 Internal Server Error | 組み立てたテンプレートデータに空項目がある |
//! | `Internal` | 500 Internal Server Error | リポジトリ・ローカライズの障害 |
//!
//! ステータスコードへの変換は HTTP アダプタ側で行う。
//! 通知チャネルの送信失敗はエラーではなく [`NotificationResult`](crate::goods_return::NotificationResult)
//! のデータとして返す。

use strum::IntoStaticStr;
use thiserror::Error;

use crate::contractor::EmployeeRole;

/// 返品通知の処理中に発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReturnNotificationError {
    /// 入力フィールドの欠落または型変換の失敗
    ///
    /// `field` には最初に検証に失敗したフィールド名（リクエストのキー名）が入る。
    #[error("Invalid or missing data for key: {field}")]
    Validation { field: String },

    /// 関連エンティティが見つからない
    #[error("{0}")]
    NotFound(NotFoundTarget),

    /// テンプレートデータの必須項目が空
    #[error("Template Data ({field}) is empty!")]
    Template { field: String },

    /// リポジトリ障害・ローカライズ失敗などの内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

/// 見つからなかったエンティティ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotFoundTarget {
    #[error("Seller not found!")]
    Seller,
    #[error("Client not found or mismatched seller!")]
    Client,
    #[error("Creator not found!")]
    Creator,
    #[error("Expert not found!")]
    Expert,
}

impl From<EmployeeRole> for NotFoundTarget {
    fn from(role: EmployeeRole) -> Self {
        match role {
            EmployeeRole::Creator => Self::Creator,
            EmployeeRole::Expert => Self::Expert,
        }
    }
}

/// エラー種別（HTTP ステータスへのマッピングに使用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotFound,
    Template,
    Internal,
}

impl ReturnNotificationError {
    pub fn validation(field: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
        }
    }

    pub fn template(field: impl Into<String>) -> Self {
        Self::Template {
            field: field.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Template { .. } => ErrorKind::Template,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }

    /// 呼び出し元の入力に起因するエラーかどうか
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation | ErrorKind::NotFound)
    }
}
