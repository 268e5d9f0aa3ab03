//! SMTP メール送信実装
//!
//! lettre の `AsyncSmtpTransport` を使用してメールを送信する。
//! 開発環境では Mailpit（ローカル SMTP サーバー）に接続する。

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport,
    AsyncTransport,
    Tokio1Executor,
    message::{Message, header::ContentType},
};
use returnflow_domain::notification::{MessageContext, NotificationError, OutgoingMessage};

use super::MessagesClient;

/// SMTP メール送信
///
/// `lettre::AsyncSmtpTransport<Tokio1Executor>` をラップする。
/// 送信元アドレスは販売者ごとに異なるため、メッセージ側で指定する。
pub struct SmtpMessagesClient {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMessagesClient {
    /// 新しい SMTP 送信インスタンスを作成
    ///
    /// # 引数
    ///
    /// - `host`: SMTP サーバーのホスト名（例: "localhost"）
    /// - `port`: SMTP サーバーのポート番号（例: 1025 for Mailpit）
    pub fn new(host: &str, port: u16) -> Self {
        // builder_dangerous: TLS なしで接続（Mailpit 等のローカル SMTP 向け）
        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
            .port(port)
            .build();

        Self { transport }
    }

    fn build_message(message: &OutgoingMessage) -> Result<Message, NotificationError> {
        Message::builder()
            .from(message.from.parse().map_err(|e| {
                NotificationError::InvalidMessage(format!("送信元アドレス不正: {e}"))
            })?)
            .to(message
                .to
                .parse()
                .map_err(|e| NotificationError::InvalidMessage(format!("宛先アドレス不正: {e}")))?)
            .subject(&message.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .map_err(|e| NotificationError::InvalidMessage(format!("メッセージ構築失敗: {e}")))
    }
}

#[async_trait]
impl MessagesClient for SmtpMessagesClient {
    #[tracing::instrument(skip_all, level = "debug", fields(event = %context.event, seller_id = %context.seller_id))]
    async fn send(
        &self,
        messages: &[OutgoingMessage],
        context: &MessageContext,
    ) -> Result<(), NotificationError> {
        for message in messages {
            let email = Self::build_message(message)?;
            self.transport
                .send(email)
                .await
                .map_err(|e| NotificationError::SendFailed(format!("SMTP 送信失敗: {e}")))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(to: &str) -> OutgoingMessage {
        OutgoingMessage {
            from:    "shop@example.com".to_string(),
            to:      to.to_string(),
            subject: "Return C-100".to_string(),
            body:    "Status changed".to_string(),
        }
    }

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SmtpMessagesClient>();
    }

    #[test]
    fn 正しいアドレスならメッセージを構築できる() {
        assert!(SmtpMessagesClient::build_message(&message("staff@example.com")).is_ok());
    }

    #[test]
    fn 不正な宛先アドレスはinvalid_messageになる() {
        let result = SmtpMessagesClient::build_message(&message("not-an-address"));
        assert!(matches!(result, Err(NotificationError::InvalidMessage(_))));
    }
}
