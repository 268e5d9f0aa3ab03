//! # ユースケース層
//!
//! Notification Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **依存性注入**: リポジトリと送信クライアントを `Arc<dyn Trait>` で外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod return_notification;

pub use return_notification::{ReturnNotificationDeps, ReturnNotificationUseCaseImpl};
