//! 返品通知テストビルダー
//!
//! 標準的な販売者・顧客・従業員を登録したモックと、それを使うユースケースを組み立てる。
//!
//! | データ | ID | 備考 |
//! |-------|----|------|
//! | 販売者 | 10 | 送信元 `shop@example.com` |
//! | 顧客 | 5 | メール・携帯番号あり |
//! | 作成者 | 7 | |
//! | 担当者 | 8 | |
//! | 通知先従業員 | - | `staff@example.com` |

use std::{collections::HashMap, sync::Arc};

use returnflow_domain::{
    contractor::{ClientId, ContractorType, Customer, Employee, EmployeeId, NewCustomer, Seller, SellerId},
    notification::SmsOutcome,
};
use returnflow_infra::mock::{
    MockCustomerRepository,
    MockEmployeeRepository,
    MockPermissionRepository,
    MockSellerRepository,
    RecordingMessagesClient,
    ScriptedNotificationManager,
};
use serde_json::{Map, Value, json};

use crate::usecase::{
    ReturnNotificationDeps,
    ReturnNotificationUseCaseImpl,
    return_notification::{StaticStatusCatalog, TeraLocalizer},
};

pub const SELLER_ID: i64 = 10;
pub const CLIENT_ID: i64 = 5;
pub const CREATOR_ID: i64 = 7;
pub const EXPERT_ID: i64 = 8;

/// テストのセットアップデータ
pub struct ReturnNotificationTestSetup {
    pub sut:      Arc<ReturnNotificationUseCaseImpl>,
    pub messages: RecordingMessagesClient,
    pub sms:      ScriptedNotificationManager,
}

/// 返品通知テストビルダー
///
/// # 使用例
///
/// ```ignore
/// use returnflow_notification_service::test_utils::{ReturnNotificationTestBuilder, raw_request};
///
/// let setup = ReturnNotificationTestBuilder::new().build();
/// let result = setup.sut.execute(&raw_request(1, None)).await;
/// ```
pub struct ReturnNotificationTestBuilder {
    customer:    Option<Customer>,
    employees:   Vec<Employee>,
    permissions: MockPermissionRepository,
    messages:    RecordingMessagesClient,
    sms:         ScriptedNotificationManager,
}

impl Default for ReturnNotificationTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReturnNotificationTestBuilder {
    pub fn new() -> Self {
        Self {
            customer:    Some(Self::customer(Some("client@example.com"), Some("+79990000000"))),
            employees:   vec![
                Employee::new(EmployeeId::new(CREATOR_ID).unwrap(), "Anna Petrova"),
                Employee::new(EmployeeId::new(EXPERT_ID).unwrap(), "Oleg Sidorov"),
            ],
            permissions: MockPermissionRepository::new(Some("shop@example.com"), &["staff@example.com"]),
            messages:    RecordingMessagesClient::new(),
            sms:         ScriptedNotificationManager::default(),
        }
    }

    /// 標準の顧客（販売者 10 所属）を連絡先を指定して作る
    pub fn customer(email: Option<&str>, mobile: Option<&str>) -> Customer {
        Customer::new(NewCustomer {
            id: ClientId::new(CLIENT_ID).unwrap(),
            contractor_type: ContractorType::Customer,
            seller_id: SellerId::new(SELLER_ID),
            email: email.map(str::to_string),
            mobile: mobile.map(str::to_string),
            name: "Ivanov".to_string(),
            full_name: "Ivan Ivanov".to_string(),
        })
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.customer = Some(customer);
        self
    }

    pub fn without_customer(mut self) -> Self {
        self.customer = None;
        self
    }

    pub fn without_employee(mut self, id: i64) -> Self {
        self.employees.retain(|employee| employee.id().as_i64() != id);
        self
    }

    pub fn with_permissions(mut self, permissions: MockPermissionRepository) -> Self {
        self.permissions = permissions;
        self
    }

    pub fn with_failing_messages(mut self) -> Self {
        self.messages = RecordingMessagesClient::failing();
        self
    }

    pub fn with_sms_outcome(mut self, outcome: SmsOutcome) -> Self {
        self.sms = ScriptedNotificationManager::returning(outcome);
        self
    }

    pub fn with_sms_error(mut self, message: &str) -> Self {
        self.sms = ScriptedNotificationManager::erroring(message);
        self
    }

    pub fn build(self) -> ReturnNotificationTestSetup {
        let sellers = MockSellerRepository::new();
        sellers.add_seller(Seller::new(SellerId::new(SELLER_ID).unwrap(), "Shop"));

        let customers = MockCustomerRepository::new();
        if let Some(customer) = self.customer {
            customers.add_customer(customer);
        }

        let employees = MockEmployeeRepository::new();
        for employee in self.employees {
            employees.add_employee(employee);
        }

        let localizer = TeraLocalizer::new("en", HashMap::new()).unwrap();
        let sut = ReturnNotificationUseCaseImpl::new(ReturnNotificationDeps {
            sellers:     Arc::new(sellers),
            customers:   Arc::new(customers),
            employees:   Arc::new(employees),
            permissions: Arc::new(self.permissions),
            messages:    Arc::new(self.messages.clone()),
            sms:         Arc::new(self.sms.clone()),
            localizer:   Arc::new(localizer),
            statuses:    Arc::new(StaticStatusCatalog),
        });

        ReturnNotificationTestSetup {
            sut: Arc::new(sut),
            messages: self.messages,
            sms: self.sms,
        }
    }
}

/// 標準データを参照する正しいリクエストを作る
pub fn raw_request(notification_type: i64, differences: Option<Value>) -> Map<String, Value> {
    let mut raw = Map::new();
    raw.insert("resellerId".to_string(), json!(SELLER_ID));
    raw.insert("notificationType".to_string(), json!(notification_type));
    raw.insert("clientId".to_string(), json!(CLIENT_ID));
    raw.insert("creatorId".to_string(), json!(CREATOR_ID));
    raw.insert("expertId".to_string(), json!(EXPERT_ID));
    raw.insert("complaintId".to_string(), json!(100));
    raw.insert("complaintNumber".to_string(), json!("C-100"));
    raw.insert("consumptionId".to_string(), json!(200));
    raw.insert("consumptionNumber".to_string(), json!("S-200"));
    raw.insert("agreementNumber".to_string(), json!("A-1"));
    raw.insert("date".to_string(), json!("2024-05-01"));
    if let Some(differences) = differences {
        raw.insert("differences".to_string(), differences);
    }
    raw
}
