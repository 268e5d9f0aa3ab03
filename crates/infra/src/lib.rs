//! # ReturnFlow インフラ層
//!
//! 外部システムとの接続・通信を担当するインフラストラクチャ層。
//!
//! ## 責務
//!
//! - **データベース接続**: PostgreSQL への接続プール管理とマイグレーション
//! - **リポジトリ実装**: 販売者・顧客・従業員・通知権限の読み取り
//! - **メール送信**: SMTP / Noop
//! - **SMS 送信**: HTTP ゲートウェイ / Noop
//!
//! ## 依存関係
//!
//! ```text
//! notification-service → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`db`] - PostgreSQL データベース接続管理
//! - [`error`] - インフラ層エラー定義
//! - [`repository`] - リポジトリ実装
//! - [`messaging`] - メール送信
//! - [`sms`] - SMS 送信
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use returnflow_infra::{db, repository::PostgresSellerRepository};
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = db::create_pool("postgres://localhost/returnflow").await?;
//!     let sellers = PostgresSellerRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod db;
pub mod error;
pub mod messaging;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;
pub mod repository;
pub mod sms;

pub use error::InfraError;
pub use messaging::{MessagesClient, NoopMessagesClient, SmtpMessagesClient};
pub use sms::{HttpNotificationManager, NoopNotificationManager, NotificationManager};
