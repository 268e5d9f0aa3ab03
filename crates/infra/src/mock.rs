//! # テスト用モック
//!
//! ユースケーステストで使用するインメモリのリポジトリと送信クライアント。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! returnflow-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use returnflow_domain::{
    contractor::{ClientId, Customer, Employee, EmployeeId, Seller, SellerId},
    goods_return::TemplateData,
    notification::{
        MessageContext,
        NotificationError,
        NotificationEvent,
        OutgoingMessage,
        SmsOutcome,
    },
};

use crate::{
    error::InfraError,
    messaging::MessagesClient,
    repository::{CustomerRepository, EmployeeRepository, PermissionRepository, SellerRepository},
    sms::NotificationManager,
};

// ===== MockSellerRepository =====

#[derive(Clone, Default)]
pub struct MockSellerRepository {
    sellers: Arc<Mutex<Vec<Seller>>>,
    failing: bool,
}

impl MockSellerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// すべての検索でデータベースエラーを返すモック
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn add_seller(&self, seller: Seller) {
        self.sellers.lock().unwrap().push(seller);
    }
}

#[async_trait]
impl SellerRepository for MockSellerRepository {
    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, InfraError> {
        if self.failing {
            return Err(InfraError::unexpected("seller repository unavailable"));
        }
        Ok(self
            .sellers
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id() == id)
            .cloned())
    }
}

// ===== MockCustomerRepository =====

#[derive(Clone, Default)]
pub struct MockCustomerRepository {
    customers: Arc<Mutex<Vec<Customer>>>,
    failing:   bool,
}

impl MockCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn add_customer(&self, customer: Customer) {
        self.customers.lock().unwrap().push(customer);
    }
}

#[async_trait]
impl CustomerRepository for MockCustomerRepository {
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Customer>, InfraError> {
        if self.failing {
            return Err(InfraError::unexpected("customer repository unavailable"));
        }
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }
}

// ===== MockEmployeeRepository =====

#[derive(Clone, Default)]
pub struct MockEmployeeRepository {
    employees: Arc<Mutex<Vec<Employee>>>,
    failing:   bool,
}

impl MockEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn add_employee(&self, employee: Employee) {
        self.employees.lock().unwrap().push(employee);
    }
}

#[async_trait]
impl EmployeeRepository for MockEmployeeRepository {
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
        if self.failing {
            return Err(InfraError::unexpected("employee repository unavailable"));
        }
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id() == id)
            .cloned())
    }
}

// ===== MockPermissionRepository =====

/// 送信元アドレスと権限保持者を固定で返すモック
#[derive(Clone, Default)]
pub struct MockPermissionRepository {
    email_from: Option<String>,
    recipients: Vec<String>,
    failing:    bool,
}

impl MockPermissionRepository {
    pub fn new(email_from: Option<&str>, recipients: &[&str]) -> Self {
        Self {
            email_from: email_from.map(str::to_string),
            recipients: recipients.iter().map(|r| r.to_string()).collect(),
            failing:    false,
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl PermissionRepository for MockPermissionRepository {
    async fn email_from(&self, _seller_id: SellerId) -> Result<Option<String>, InfraError> {
        if self.failing {
            return Err(InfraError::unexpected("permission repository unavailable"));
        }
        Ok(self.email_from.clone())
    }

    async fn emails_by_permit(
        &self,
        _seller_id: SellerId,
        _permit: &str,
    ) -> Result<Vec<String>, InfraError> {
        if self.failing {
            return Err(InfraError::unexpected("permission repository unavailable"));
        }
        Ok(self.recipients.clone())
    }
}

// ===== RecordingMessagesClient =====

/// 送信要求を記録するメール送信クライアント
///
/// `failing()` / `failing_for()` で作成した場合も送信要求は記録し、結果としてエラーを返す。
#[derive(Clone, Default)]
pub struct RecordingMessagesClient {
    sent:               Arc<Mutex<Vec<(Vec<OutgoingMessage>, MessageContext)>>>,
    failing:            bool,
    refused_recipients: Vec<String>,
}

impl RecordingMessagesClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// 指定した宛先を含む送信要求だけ失敗させる
    pub fn failing_for(recipients: &[&str]) -> Self {
        Self {
            refused_recipients: recipients.iter().map(|r| r.to_string()).collect(),
            ..Self::default()
        }
    }

    /// 記録された送信要求（呼び出し順）
    pub fn sent(&self) -> Vec<(Vec<OutgoingMessage>, MessageContext)> {
        self.sent.lock().unwrap().clone()
    }

    /// 顧客向けの送信要求
    pub fn sent_to_client(&self) -> Vec<(Vec<OutgoingMessage>, MessageContext)> {
        self.sent()
            .into_iter()
            .filter(|(_, context)| context.client_id.is_some())
            .collect()
    }
}

#[async_trait]
impl MessagesClient for RecordingMessagesClient {
    async fn send(
        &self,
        messages: &[OutgoingMessage],
        context: &MessageContext,
    ) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .unwrap()
            .push((messages.to_vec(), context.clone()));
        if self.failing {
            return Err(NotificationError::SendFailed("smtp unavailable".to_string()));
        }
        if let Some(refused) = messages
            .iter()
            .find(|m| self.refused_recipients.contains(&m.to))
        {
            return Err(NotificationError::SendFailed(format!(
                "recipient refused: {}",
                refused.to
            )));
        }
        Ok(())
    }
}

// ===== ScriptedNotificationManager =====

/// SMS 送信の記録
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsCall {
    pub seller_id:     SellerId,
    pub client_id:     ClientId,
    pub event:         NotificationEvent,
    pub target_status: i64,
}

/// あらかじめ決めた結果を返す SMS 送信モック
#[derive(Clone)]
pub struct ScriptedNotificationManager {
    response: Result<SmsOutcome, String>,
    calls:    Arc<Mutex<Vec<SmsCall>>>,
}

impl ScriptedNotificationManager {
    /// 常に指定の結果を返す
    pub fn returning(outcome: SmsOutcome) -> Self {
        Self {
            response: Ok(outcome),
            calls:    Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// 常にゲートウェイ通信エラーを返す
    pub fn erroring(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls:    Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<SmsCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for ScriptedNotificationManager {
    fn default() -> Self {
        Self::returning(SmsOutcome::sent())
    }
}

#[async_trait]
impl NotificationManager for ScriptedNotificationManager {
    async fn send(
        &self,
        seller: &Seller,
        client: &Customer,
        event: NotificationEvent,
        target_status: i64,
        _data: &TemplateData,
    ) -> Result<SmsOutcome, NotificationError> {
        self.calls.lock().unwrap().push(SmsCall {
            seller_id: seller.id(),
            client_id: client.id(),
            event,
            target_status,
        });
        self.response
            .clone()
            .map_err(NotificationError::GatewayFailed)
    }
}
