//! # 通知ディスパッチ
//!
//! テンプレートデータをもとに各チャネルへ通知を送り、結果を [`NotificationResult`] に集約する。
//!
//! ## チャネル
//!
//! 1. **従業員メール**: 販売者の送信元アドレスと `tsGoodsReturn` 権限を持つ従業員が
//!    そろっている場合に宛先ごとに 1 通ずつ送信する。送信を試みた時点で成功扱いとし、
//!    送信失敗は宛先ごとにログに残して残りの宛先への送信を続ける
//! 2. **顧客メール**: 変更通知かつ変更後ステータスがある場合に、送信元アドレスと
//!    顧客のメールアドレスがそろっていれば送信する
//! 3. **顧客 SMS**: 2 と同じ条件で、顧客の携帯番号があれば送信する
//!
//! 2 と 3 は並行に実行する。どのチャネルの失敗も処理全体を中断しない。

use std::sync::Arc;

use returnflow_domain::{
    contractor::{Customer, Seller, SellerId},
    goods_return::{ClientSmsResult, NotificationResult, ReturnNotificationRequest, TemplateData},
    notification::{MessageContext, NotificationEvent, OutgoingMessage},
};
use returnflow_infra::{messaging::MessagesClient, repository::PermissionRepository, sms::NotificationManager};
use returnflow_shared::{
    event_log::{self, event},
    log_business_event,
};
use serde_json::{Map, Value};

use super::{
    localizer::{Localizer, keys},
    request_validator::coerce_int,
};

/// 従業員メールの宛先を決める権限キー
pub const GOODS_RETURN_PERMIT: &str = "tsGoodsReturn";

/// 通知ディスパッチ
pub struct NotificationDispatcher {
    permissions: Arc<dyn PermissionRepository>,
    messages:    Arc<dyn MessagesClient>,
    sms:         Arc<dyn NotificationManager>,
    localizer:   Arc<dyn Localizer>,
}

/// ローカライズ済みの件名と本文
struct Rendered {
    subject: String,
    body:    String,
}

impl NotificationDispatcher {
    pub fn new(
        permissions: Arc<dyn PermissionRepository>,
        messages: Arc<dyn MessagesClient>,
        sms: Arc<dyn NotificationManager>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            permissions,
            messages,
            sms,
            localizer,
        }
    }

    /// すべてのチャネルへ通知を送る
    #[tracing::instrument(skip_all, level = "debug", fields(seller_id = %seller.id(), client_id = %client.id()))]
    pub async fn dispatch(
        &self,
        request: &ReturnNotificationRequest,
        seller: &Seller,
        client: &Customer,
        data: &TemplateData,
    ) -> NotificationResult {
        let mut result = NotificationResult::default();
        let params = data.to_params();
        let email_from = self.email_from(seller.id()).await;

        result.employee_email_sent = self
            .notify_employees(seller.id(), email_from.as_deref(), &params)
            .await;

        let Some(target_status) = request.client_target().and_then(coerce_int) else {
            tracing::debug!("変更後ステータスがないため顧客への通知を行いません");
            return result;
        };

        let (client_email_sent, client_sms) = tokio::join!(
            self.notify_client_by_email(seller.id(), client, email_from.as_deref(), target_status, &params),
            self.notify_client_by_sms(seller, client, target_status, data),
        );
        result.client_email_sent = client_email_sent;
        result.client_sms = client_sms;

        result
    }

    async fn email_from(&self, seller_id: SellerId) -> Option<String> {
        match self.permissions.email_from(seller_id).await {
            Ok(email_from) => email_from,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    error.category = event_log::error::category::INFRASTRUCTURE,
                    error.kind = event_log::error::kind::PERMISSION_LOOKUP,
                    "送信元アドレスの取得に失敗しました"
                );
                None
            }
        }
    }

    async fn recipients(&self, seller_id: SellerId) -> Vec<String> {
        match self
            .permissions
            .emails_by_permit(seller_id, GOODS_RETURN_PERMIT)
            .await
        {
            Ok(recipients) => recipients,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    error.category = event_log::error::category::INFRASTRUCTURE,
                    error.kind = event_log::error::kind::PERMISSION_LOOKUP,
                    "通知先従業員の取得に失敗しました"
                );
                Vec::new()
            }
        }
    }

    fn render(
        &self,
        subject_key: &str,
        body_key: &str,
        params: &Map<String, Value>,
        seller_id: SellerId,
    ) -> Option<Rendered> {
        let rendered = self
            .localizer
            .localize(subject_key, params, seller_id)
            .and_then(|subject| {
                let body = self.localizer.localize(body_key, params, seller_id)?;
                Ok(Rendered { subject, body })
            });

        match rendered {
            Ok(rendered) => Some(rendered),
            Err(e) => {
                tracing::error!(
                    error = %e,
                    error.kind = event_log::error::kind::LOCALIZATION,
                    subject_key,
                    "メール文面のローカライズに失敗しました"
                );
                None
            }
        }
    }

    /// 従業員へメールを送る（送信を試みたかどうかを返す）
    async fn notify_employees(
        &self,
        seller_id: SellerId,
        email_from: Option<&str>,
        params: &Map<String, Value>,
    ) -> bool {
        let Some(from) = email_from else {
            log_skipped(seller_id, event::channel::EMPLOYEE_EMAIL, "送信元アドレス未設定");
            return false;
        };
        let recipients = self.recipients(seller_id).await;
        if recipients.is_empty() {
            log_skipped(seller_id, event::channel::EMPLOYEE_EMAIL, "通知先従業員なし");
            return false;
        }
        let Some(rendered) = self.render(
            keys::EMPLOYEE_EMAIL_SUBJECT,
            keys::EMPLOYEE_EMAIL_BODY,
            params,
            seller_id,
        ) else {
            return false;
        };

        let context = MessageContext::for_employees(seller_id, NotificationEvent::ChangeReturnStatus);

        for to in recipients {
            let message = OutgoingMessage {
                from: from.to_string(),
                to,
                subject: rendered.subject.clone(),
                body: rendered.body.clone(),
            };
            match self.messages.send(std::slice::from_ref(&message), &context).await {
                Ok(()) => log_sent(seller_id, event::channel::EMPLOYEE_EMAIL),
                Err(e) => log_failed(seller_id, event::channel::EMPLOYEE_EMAIL, &e.to_string()),
            }
        }
        true
    }

    /// 顧客へメールを送る（送信に成功したかどうかを返す）
    async fn notify_client_by_email(
        &self,
        seller_id: SellerId,
        client: &Customer,
        email_from: Option<&str>,
        target_status: i64,
        params: &Map<String, Value>,
    ) -> bool {
        let (Some(from), Some(to)) = (email_from, client.email()) else {
            log_skipped(seller_id, event::channel::CLIENT_EMAIL, "送信元または宛先が未設定");
            return false;
        };
        let Some(rendered) = self.render(
            keys::CLIENT_EMAIL_SUBJECT,
            keys::CLIENT_EMAIL_BODY,
            params,
            seller_id,
        ) else {
            return false;
        };

        let message = OutgoingMessage {
            from:    from.to_string(),
            to:      to.to_string(),
            subject: rendered.subject,
            body:    rendered.body,
        };
        let context = MessageContext::for_client(
            seller_id,
            client.id(),
            NotificationEvent::ChangeReturnStatus,
            target_status,
        );

        match self.messages.send(&[message], &context).await {
            Ok(()) => {
                log_sent(seller_id, event::channel::CLIENT_EMAIL);
                true
            }
            Err(e) => {
                log_failed(seller_id, event::channel::CLIENT_EMAIL, &e.to_string());
                false
            }
        }
    }

    /// 顧客へ SMS を送る
    async fn notify_client_by_sms(
        &self,
        seller: &Seller,
        client: &Customer,
        target_status: i64,
        data: &TemplateData,
    ) -> ClientSmsResult {
        if client.mobile().is_none() {
            log_skipped(seller.id(), event::channel::CLIENT_SMS, "携帯番号が未設定");
            return ClientSmsResult::default();
        }

        let outcome = self
            .sms
            .send(
                seller,
                client,
                NotificationEvent::ChangeReturnStatus,
                target_status,
                data,
            )
            .await;

        let result = match outcome {
            Ok(outcome) => ClientSmsResult {
                sent:    outcome.sent,
                message: outcome.error.unwrap_or_default(),
            },
            Err(e) => ClientSmsResult {
                sent:    false,
                message: e.to_string(),
            },
        };

        if result.sent {
            log_sent(seller.id(), event::channel::CLIENT_SMS);
        } else {
            log_failed(seller.id(), event::channel::CLIENT_SMS, &result.message);
        }
        result
    }
}

fn log_sent(seller_id: SellerId, channel: &'static str) {
    log_business_event!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_SENT,
        event.seller_id = %seller_id,
        event.result = event::result::SUCCESS,
        notification.channel = channel,
        "通知送信成功"
    );
}

fn log_failed(seller_id: SellerId, channel: &'static str, error: &str) {
    let error_kind = if channel == event::channel::CLIENT_SMS {
        event_log::error::kind::SMS_GATEWAY
    } else {
        event_log::error::kind::MESSAGING
    };
    log_business_event!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_FAILED,
        event.seller_id = %seller_id,
        event.result = event::result::FAILURE,
        notification.channel = channel,
        error.category = event_log::error::category::EXTERNAL_SERVICE,
        error.kind = error_kind,
        error,
        "通知送信失敗"
    );
}

fn log_skipped(seller_id: SellerId, channel: &'static str, reason: &'static str) {
    tracing::debug!(
        event.category = event::category::NOTIFICATION,
        event.action = event::action::NOTIFICATION_SKIPPED,
        event.seller_id = %seller_id,
        notification.channel = channel,
        reason,
        "通知をスキップしました"
    );
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;
    use returnflow_domain::{
        contractor::{ClientId, ContractorType, EmployeeId, NewCustomer},
        goods_return::{Differences, NotificationType},
        notification::SmsOutcome,
    };
    use returnflow_infra::mock::{
        MockPermissionRepository,
        RecordingMessagesClient,
        ScriptedNotificationManager,
    };
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;
    use crate::usecase::return_notification::localizer::TeraLocalizer;

    fn seller() -> Seller {
        Seller::new(SellerId::new(10).unwrap(), "Shop")
    }

    fn client(email: Option<&str>, mobile: Option<&str>) -> Customer {
        Customer::new(NewCustomer {
            id: ClientId::new(5).unwrap(),
            contractor_type: ContractorType::Customer,
            seller_id: SellerId::new(10),
            email: email.map(str::to_string),
            mobile: mobile.map(str::to_string),
            name: "Ivanov".to_string(),
            full_name: "Ivan Ivanov".to_string(),
        })
    }

    fn request(notification_type: NotificationType, differences: Option<Value>) -> ReturnNotificationRequest {
        ReturnNotificationRequest {
            reseller_id: SellerId::new(10).unwrap(),
            notification_type,
            client_id: ClientId::new(5).unwrap(),
            creator_id: EmployeeId::new(7).unwrap(),
            expert_id: EmployeeId::new(8).unwrap(),
            complaint_id: 100,
            complaint_number: "C-100".to_string(),
            consumption_id: 200,
            consumption_number: "S-200".to_string(),
            agreement_number: "A-1".to_string(),
            date: "2024-05-01".to_string(),
            differences: Differences::from_raw(differences.as_ref()),
        }
    }

    #[fixture]
    fn data() -> TemplateData {
        TemplateData {
            complaint_id:       100,
            complaint_number:   "C-100".to_string(),
            creator_id:         7,
            creator_name:       "Anna Petrova".to_string(),
            expert_id:          8,
            expert_name:        "Oleg Sidorov".to_string(),
            client_id:          5,
            client_name:        "Ivan Ivanov".to_string(),
            consumption_id:     200,
            consumption_number: "S-200".to_string(),
            agreement_number:   "A-1".to_string(),
            date:               "2024-05-01".to_string(),
            differences:        "Position status has changed from Pending to Completed".to_string(),
        }
    }

    struct Fixture {
        dispatcher: NotificationDispatcher,
        messages:   RecordingMessagesClient,
        sms:        ScriptedNotificationManager,
    }

    fn dispatcher(
        permissions: MockPermissionRepository,
        messages: RecordingMessagesClient,
        sms: ScriptedNotificationManager,
    ) -> Fixture {
        let localizer = TeraLocalizer::new("en", HashMap::new()).unwrap();
        Fixture {
            dispatcher: NotificationDispatcher::new(
                Arc::new(permissions),
                Arc::new(messages.clone()),
                Arc::new(sms.clone()),
                Arc::new(localizer),
            ),
            messages,
            sms,
        }
    }

    fn staff_permissions() -> MockPermissionRepository {
        MockPermissionRepository::new(Some("shop@example.com"), &["a@example.com", "b@example.com"])
    }

    #[rstest]
    #[tokio::test]
    async fn test_従業員全員にメールを送る(data: TemplateData) {
        let f = dispatcher(staff_permissions(), RecordingMessagesClient::new(), ScriptedNotificationManager::default());

        let result = f
            .dispatcher
            .dispatch(&request(NotificationType::New, None), &seller(), &client(None, None), &data)
            .await;

        assert!(result.employee_email_sent);
        assert!(!result.client_email_sent);
        let sent = f.messages.sent();
        assert_eq!(sent.len(), 2);
        let recipients: Vec<&str> = sent
            .iter()
            .map(|(messages, _)| {
                assert_eq!(messages.len(), 1);
                messages[0].to.as_str()
            })
            .collect();
        assert_eq!(recipients, vec!["a@example.com", "b@example.com"]);
        let (messages, context) = &sent[0];
        assert_eq!(messages[0].from, "shop@example.com");
        assert!(messages[0].subject.contains("C-100"));
        assert_eq!(context.event, NotificationEvent::ChangeReturnStatus);
        assert_eq!(context.client_id, None);
    }

    #[rstest]
    #[tokio::test]
    async fn test_拒否された宛先があっても残りの従業員に送る(data: TemplateData) {
        let f = dispatcher(
            MockPermissionRepository::new(Some("shop@example.com"), &["bad", "ok@example.com"]),
            RecordingMessagesClient::failing_for(&["bad"]),
            ScriptedNotificationManager::default(),
        );

        let result = f
            .dispatcher
            .dispatch(&request(NotificationType::New, None), &seller(), &client(None, None), &data)
            .await;

        assert!(result.employee_email_sent);
        let sent = f.messages.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].0[0].to, "bad");
        assert_eq!(sent[1].0[0].to, "ok@example.com");
    }

    #[rstest]
    #[case(MockPermissionRepository::new(None, &["a@example.com"]))]
    #[case(MockPermissionRepository::new(Some("shop@example.com"), &[]))]
    #[case(MockPermissionRepository::failing())]
    #[tokio::test]
    async fn test_送信元か宛先がなければ従業員メールは送らない(
        #[case] permissions: MockPermissionRepository,
        data: TemplateData,
    ) {
        let f = dispatcher(permissions, RecordingMessagesClient::new(), ScriptedNotificationManager::default());

        let result = f
            .dispatcher
            .dispatch(&request(NotificationType::New, None), &seller(), &client(None, None), &data)
            .await;

        assert!(!result.employee_email_sent);
        assert!(f.messages.sent().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_従業員メールの送信失敗は送信済みとして扱う(data: TemplateData) {
        let f = dispatcher(staff_permissions(), RecordingMessagesClient::failing(), ScriptedNotificationManager::default());

        let result = f
            .dispatcher
            .dispatch(&request(NotificationType::New, None), &seller(), &client(None, None), &data)
            .await;

        assert!(result.employee_email_sent);
    }

    #[rstest]
    #[tokio::test]
    async fn test_変更後ステータスがなければ顧客には送らない(data: TemplateData) {
        let f = dispatcher(staff_permissions(), RecordingMessagesClient::new(), ScriptedNotificationManager::default());

        let result = f
            .dispatcher
            .dispatch(
                &request(NotificationType::Change, Some(json!({"from": 1}))),
                &seller(),
                &client(Some("client@example.com"), Some("+79990000000")),
                &data,
            )
            .await;

        assert!(!result.client_email_sent);
        assert_eq!(result.client_sms, ClientSmsResult::default());
        assert!(f.messages.sent_to_client().is_empty());
        assert!(f.sms.calls().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_新規通知では顧客には送らない(data: TemplateData) {
        let f = dispatcher(staff_permissions(), RecordingMessagesClient::new(), ScriptedNotificationManager::default());

        let result = f
            .dispatcher
            .dispatch(
                &request(NotificationType::New, Some(json!({"from": 1, "to": 2}))),
                &seller(),
                &client(Some("client@example.com"), Some("+79990000000")),
                &data,
            )
            .await;

        assert!(!result.client_email_sent);
        assert!(f.sms.calls().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_変更通知は顧客にメールとsmsを送る(data: TemplateData) {
        let f = dispatcher(staff_permissions(), RecordingMessagesClient::new(), ScriptedNotificationManager::default());

        let result = f
            .dispatcher
            .dispatch(
                &request(NotificationType::Change, Some(json!({"from": 1, "to": 0}))),
                &seller(),
                &client(Some("client@example.com"), Some("+79990000000")),
                &data,
            )
            .await;

        assert!(result.employee_email_sent);
        assert!(result.client_email_sent);
        assert_eq!(
            result.client_sms,
            ClientSmsResult {
                sent:    true,
                message: String::new(),
            }
        );

        let client_sent = f.messages.sent_to_client();
        assert_eq!(client_sent.len(), 1);
        let (messages, context) = &client_sent[0];
        assert_eq!(messages[0].to, "client@example.com");
        assert_eq!(context.client_id, ClientId::new(5));
        assert_eq!(context.target_status, Some(0));

        let calls = f.sms.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].target_status, 0);
        assert_eq!(calls[0].event, NotificationEvent::ChangeReturnStatus);
    }

    #[rstest]
    #[tokio::test]
    async fn test_sms拒否の理由をそのまま返しメールは送る(data: TemplateData) {
        let f = dispatcher(
            staff_permissions(),
            RecordingMessagesClient::new(),
            ScriptedNotificationManager::returning(SmsOutcome::rejected("quota exceeded")),
        );

        let result = f
            .dispatcher
            .dispatch(
                &request(NotificationType::Change, Some(json!({"from": 1, "to": 2}))),
                &seller(),
                &client(Some("client@example.com"), Some("+79990000000")),
                &data,
            )
            .await;

        assert!(result.client_email_sent);
        assert_eq!(
            result.client_sms,
            ClientSmsResult {
                sent:    false,
                message: "quota exceeded".to_string(),
            }
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_sms通信エラーは未送信とエラー文言になる(data: TemplateData) {
        let f = dispatcher(
            staff_permissions(),
            RecordingMessagesClient::new(),
            ScriptedNotificationManager::erroring("connection refused"),
        );

        let result = f
            .dispatcher
            .dispatch(
                &request(NotificationType::Change, Some(json!({"from": 1, "to": 2}))),
                &seller(),
                &client(None, Some("+79990000000")),
                &data,
            )
            .await;

        assert!(!result.client_email_sent);
        assert_eq!(result.client_sms.message, "connection refused");
        assert!(!result.client_sms.sent);
    }

    #[rstest]
    #[tokio::test]
    async fn test_顧客メールの送信失敗は未送信になる(data: TemplateData) {
        let f = dispatcher(staff_permissions(), RecordingMessagesClient::failing(), ScriptedNotificationManager::default());

        let result = f
            .dispatcher
            .dispatch(
                &request(NotificationType::Change, Some(json!({"from": 1, "to": 2}))),
                &seller(),
                &client(Some("client@example.com"), None),
                &data,
            )
            .await;

        assert!(result.employee_email_sent);
        assert!(!result.client_email_sent);
        assert!(!result.client_sms.sent);
        assert!(f.sms.calls().is_empty());
    }
}
