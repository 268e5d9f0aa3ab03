//! # メール送信
//!
//! 返品通知メールの送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `MessagesClient` trait でメール送信を抽象化
//! - **2 つの実装**: SMTP（Mailpit 開発用・SMTP リレー）、Noop（テスト・無効化用）
//! - **環境変数切替**: `MESSAGING_BACKEND` でランタイム選択

mod noop;
mod smtp;

use async_trait::async_trait;
pub use noop::NoopMessagesClient;
use returnflow_domain::notification::{MessageContext, NotificationError, OutgoingMessage};
pub use smtp::SmtpMessagesClient;

/// メール送信トレイト
///
/// 1 回の呼び出しで同一コンテキストの複数メッセージを送信する。
/// 途中のメッセージで失敗した場合は残りを送信せずにエラーを返す。
#[async_trait]
pub trait MessagesClient: Send + Sync {
    /// メッセージをまとめて送信する
    async fn send(
        &self,
        messages: &[OutgoingMessage],
        context: &MessageContext,
    ) -> Result<(), NotificationError>;
}
