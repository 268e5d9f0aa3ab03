//! Noop SMS 送信実装
//!
//! SMS を実際に送信せず、ログ出力のみ行う。

use async_trait::async_trait;
use returnflow_domain::{
    contractor::{Customer, Seller},
    goods_return::TemplateData,
    notification::{NotificationError, NotificationEvent, SmsOutcome},
};

use super::NotificationManager;

/// Noop SMS 送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopNotificationManager;

#[async_trait]
impl NotificationManager for NoopNotificationManager {
    async fn send(
        &self,
        seller: &Seller,
        client: &Customer,
        event: NotificationEvent,
        target_status: i64,
        _data: &TemplateData,
    ) -> Result<SmsOutcome, NotificationError> {
        tracing::info!(
            seller_id = %seller.id(),
            client_id = %client.id(),
            %event,
            target_status,
            "Noop: SMS 送信をスキップ"
        );
        Ok(SmsOutcome::sent())
    }
}
