//! # ReturnFlow ドメイン層
//!
//! 返品通知パイプラインの中核となるドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! - **値オブジェクト**: 正の整数でのみ生成できる ID 型（例: SellerId, ClientId）
//! - **エンティティ**: 販売者・顧客・従業員（いずれも読み取り専用）
//! - **通知ペイロード**: 13 項目のテンプレートデータと通知結果
//! - **ドメインエラー**: 入力不正・未検出・テンプレート不備・内部障害の 4 分類
//!
//! ## 依存関係の方向
//!
//! ```text
//! notification-service → infra → domain
//! ```
//!
//! ドメイン層はインフラ層（DB、SMTP、SMS ゲートウェイ）には一切依存しない。
//!
//! ## モジュール構成
//!
//! - [`contractor`] - 販売者・顧客・従業員
//! - [`goods_return`] - 返品通知リクエスト、テンプレートデータ、通知結果
//! - [`notification`] - 送信メッセージとチャネルごとの送信結果
//! - [`status`] - 返品ステータス
//! - [`error`] - 返品通知のエラー分類
//!
//! ## 使用例
//!
//! ```rust
//! use returnflow_domain::{ReturnNotificationError, error::ErrorKind};
//!
//! let error = ReturnNotificationError::validation("clientId");
//! assert_eq!(error.kind(), ErrorKind::Validation);
//! assert_eq!(error.to_string(), "Invalid or missing data for key: clientId");
//! ```

#[macro_use]
mod macros;

pub mod contractor;
pub mod error;
pub mod goods_return;
pub mod notification;
pub mod status;

pub use error::ReturnNotificationError;
