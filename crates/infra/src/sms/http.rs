//! HTTP SMS ゲートウェイ実装
//!
//! reqwest で SMS ゲートウェイに JSON を POST する。
//!
//! リクエスト:
//!
//! ```json
//! {
//!   "sellerId": 10, "clientId": 5, "phone": "+79990000000",
//!   "event": "changeReturnStatus", "targetStatus": 2,
//!   "templateData": { "COMPLAINT_ID": 100, ... }
//! }
//! ```
//!
//! レスポンス: `{ "sent": bool, "error": string? }`

use std::time::Duration;

use async_trait::async_trait;
use returnflow_domain::{
    contractor::{Customer, Seller},
    goods_return::TemplateData,
    notification::{NotificationError, NotificationEvent, SmsOutcome},
};
use serde::Serialize;

use super::NotificationManager;
use crate::error::InfraError;

/// HTTP SMS ゲートウェイクライアント
#[derive(Debug, Clone)]
pub struct HttpNotificationManager {
    client:      reqwest::Client,
    gateway_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendSmsRequest<'a> {
    seller_id:     i64,
    client_id:     i64,
    phone:         &'a str,
    event:         NotificationEvent,
    target_status: i64,
    template_data: &'a TemplateData,
}

impl HttpNotificationManager {
    /// 新しいクライアントを作成
    ///
    /// # 引数
    ///
    /// - `gateway_url`: 送信エンドポイントの URL
    /// - `timeout`: 1 リクエストあたりのタイムアウト
    pub fn new(gateway_url: impl Into<String>, timeout: Duration) -> Result<Self, InfraError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            gateway_url: gateway_url.into(),
        })
    }
}

#[async_trait]
impl NotificationManager for HttpNotificationManager {
    #[tracing::instrument(skip_all, level = "debug", fields(seller_id = %seller.id(), client_id = %client.id()))]
    async fn send(
        &self,
        seller: &Seller,
        client: &Customer,
        event: NotificationEvent,
        target_status: i64,
        data: &TemplateData,
    ) -> Result<SmsOutcome, NotificationError> {
        let Some(phone) = client.mobile() else {
            return Err(NotificationError::InvalidMessage(
                "携帯番号が未設定です".to_string(),
            ));
        };

        let body = SendSmsRequest {
            seller_id: seller.id().as_i64(),
            client_id: client.id().as_i64(),
            phone,
            event,
            target_status,
            template_data: data,
        };

        let response = self
            .client
            .post(&self.gateway_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotificationError::GatewayFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::GatewayFailed(format!(
                "SMS gateway responded with {status}"
            )));
        }

        response
            .json::<SmsOutcome>()
            .await
            .map_err(|e| NotificationError::GatewayFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use returnflow_domain::contractor::{ClientId, ContractorType, NewCustomer, SellerId};

    use super::*;

    #[test]
    fn トレイトはsendとsyncを実装している() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpNotificationManager>();
    }

    #[test]
    fn リクエストはcamelcaseでシリアライズされる() {
        let data = TemplateData {
            complaint_id:       100,
            complaint_number:   "C-100".to_string(),
            creator_id:         7,
            creator_name:       "Anna".to_string(),
            expert_id:          8,
            expert_name:        "Oleg".to_string(),
            client_id:          5,
            client_name:        "Ivan".to_string(),
            consumption_id:     200,
            consumption_number: "S-200".to_string(),
            agreement_number:   "A-1".to_string(),
            date:               "2024-05-01".to_string(),
            differences:        "Pending -> Completed".to_string(),
        };
        let body = SendSmsRequest {
            seller_id: 10,
            client_id: 5,
            phone: "+79990000000",
            event: NotificationEvent::ChangeReturnStatus,
            target_status: 0,
            template_data: &data,
        };

        let value = serde_json::to_value(&body).unwrap();

        assert_eq!(value["sellerId"], 10);
        assert_eq!(value["event"], "changeReturnStatus");
        assert_eq!(value["targetStatus"], 0);
        assert_eq!(value["templateData"]["COMPLAINT_NUMBER"], "C-100");
    }

    #[tokio::test]
    async fn 携帯番号がない顧客はinvalid_messageになる() {
        let manager =
            HttpNotificationManager::new("http://127.0.0.1:9/sms", Duration::from_secs(1)).unwrap();
        let seller = Seller::new(SellerId::new(10).unwrap(), "Shop");
        let client = Customer::new(NewCustomer {
            id:              ClientId::new(5).unwrap(),
            contractor_type: ContractorType::Customer,
            seller_id:       SellerId::new(10),
            email:           None,
            mobile:          None,
            name:            "Ivan".to_string(),
            full_name:       "Ivan Ivanov".to_string(),
        });
        let data = TemplateData {
            complaint_id:       1,
            complaint_number:   "C".to_string(),
            creator_id:         1,
            creator_name:       "A".to_string(),
            expert_id:          1,
            expert_name:        "B".to_string(),
            client_id:          5,
            client_name:        "Ivan".to_string(),
            consumption_id:     1,
            consumption_number: "S".to_string(),
            agreement_number:   "A".to_string(),
            date:               "2024-05-01".to_string(),
            differences:        "x".to_string(),
        };

        let result = manager
            .send(&seller, &client, NotificationEvent::ChangeReturnStatus, 0, &data)
            .await;

        assert!(matches!(result, Err(NotificationError::InvalidMessage(_))));
    }
}
