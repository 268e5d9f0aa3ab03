//! Noop メール送信実装
//!
//! メールを実際に送信せず、ログ出力のみ行う。
//! テスト環境や通知無効化時に使用する。

use async_trait::async_trait;
use returnflow_domain::notification::{MessageContext, NotificationError, OutgoingMessage};

use super::MessagesClient;

/// Noop メール送信（ログ出力のみ）
#[derive(Debug, Clone)]
pub struct NoopMessagesClient;

#[async_trait]
impl MessagesClient for NoopMessagesClient {
    async fn send(
        &self,
        messages: &[OutgoingMessage],
        context: &MessageContext,
    ) -> Result<(), NotificationError> {
        for message in messages {
            tracing::info!(
                to = %message.to,
                subject = %message.subject,
                event = %context.event,
                seller_id = %context.seller_id,
                "Noop: メール送信をスキップ"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use returnflow_domain::{contractor::SellerId, notification::NotificationEvent};

    use super::*;

    #[tokio::test]
    async fn sendがエラーを返さない() {
        let client = NoopMessagesClient;
        let message = OutgoingMessage {
            from:    "shop@example.com".to_string(),
            to:      "staff@example.com".to_string(),
            subject: "テスト件名".to_string(),
            body:    "テスト".to_string(),
        };
        let context = MessageContext::for_employees(
            SellerId::new(1).unwrap(),
            NotificationEvent::ChangeReturnStatus,
        );

        let result = client.send(&[message], &context).await;
        assert!(result.is_ok());
    }
}
