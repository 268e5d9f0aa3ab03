//! # SMS 送信
//!
//! 顧客向け SMS の送信を担当するインフラストラクチャモジュール。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: `NotificationManager` trait で SMS ゲートウェイを抽象化
//! - **送信可否はデータ**: ゲートウェイが送信を拒否した場合は `Ok(SmsOutcome { sent: false, .. })`、
//!   通信自体に失敗した場合のみ `Err` を返す
//! - **環境変数切替**: `SMS_BACKEND` でランタイム選択

mod http;
mod noop;

use async_trait::async_trait;
pub use http::HttpNotificationManager;
pub use noop::NoopNotificationManager;
use returnflow_domain::{
    contractor::{Customer, Seller},
    goods_return::TemplateData,
    notification::{NotificationError, NotificationEvent, SmsOutcome},
};

/// SMS 送信トレイト
#[async_trait]
pub trait NotificationManager: Send + Sync {
    /// 顧客の携帯番号へ通知 SMS を送信する
    async fn send(
        &self,
        seller: &Seller,
        client: &Customer,
        event: NotificationEvent,
        target_status: i64,
        data: &TemplateData,
    ) -> Result<SmsOutcome, NotificationError>;
}
