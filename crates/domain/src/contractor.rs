//! # 取引先（販売者・顧客・従業員）
//!
//! 返品通知で参照する取引先エンティティを定義する。
//! いずれも外部リポジトリが所有し、このクレートでは読み取り専用として扱う。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`Seller`] | 販売者（リセラー） | 返品処理のコンテキストを所有する事業者 |
//! | [`Customer`] | 顧客（クライアント） | 返品の相手方。顧客種別かつ販売者に所属すること |
//! | [`Employee`] | 従業員 | 作成者（creator）と担当者（expert）の 2 役割で参照 |

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, FromRepr, IntoStaticStr};

define_numeric_id! {
    /// 販売者 ID
    pub struct SellerId;
}

define_numeric_id! {
    /// 顧客 ID
    pub struct ClientId;
}

define_numeric_id! {
    /// 従業員 ID
    pub struct EmployeeId;
}

/// 取引先種別
///
/// `contractors.contractor_type` カラムに整数で格納される。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    IntoStaticStr,
    FromRepr,
)]
#[strum(serialize_all = "snake_case")]
#[repr(i16)]
pub enum ContractorType {
    /// 顧客
    Customer = 0,
    /// 販売者
    Seller   = 1,
    /// 従業員
    Employee = 2,
}

impl ContractorType {
    /// DB の整数値から変換する
    pub fn from_code(code: i16) -> Option<Self> {
        Self::from_repr(code)
    }

    /// DB に格納する整数値
    pub fn code(self) -> i16 {
        self as i16
    }
}

/// 販売者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    id:   SellerId,
    name: String,
}

impl Seller {
    pub fn new(id: SellerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> SellerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// 顧客として参照される取引先
///
/// リポジトリは種別を問わず取引先を返すため、`contractor_type` と
/// `seller_id` の整合性は呼び出し側（エンティティ解決）で検証する。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    id:              ClientId,
    contractor_type: ContractorType,
    seller_id:       Option<SellerId>,
    email:           Option<String>,
    mobile:          Option<String>,
    name:            String,
    full_name:       String,
}

/// [`Customer`] の生成パラメータ
#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub id:              ClientId,
    pub contractor_type: ContractorType,
    pub seller_id:       Option<SellerId>,
    pub email:           Option<String>,
    pub mobile:          Option<String>,
    pub name:            String,
    pub full_name:       String,
}

impl Customer {
    pub fn new(params: NewCustomer) -> Self {
        Self {
            id:              params.id,
            contractor_type: params.contractor_type,
            seller_id:       params.seller_id,
            email:           params.email.filter(|e| !e.trim().is_empty()),
            mobile:          params.mobile.filter(|m| !m.trim().is_empty()),
            name:            params.name,
            full_name:       params.full_name,
        }
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn contractor_type(&self) -> ContractorType {
        self.contractor_type
    }

    pub fn seller_id(&self) -> Option<SellerId> {
        self.seller_id
    }

    /// 空文字のメールアドレスは未設定として扱う
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// 空文字の携帯番号は未設定として扱う
    pub fn mobile(&self) -> Option<&str> {
        self.mobile.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// 通知に表示する顧客名
    ///
    /// フルネームが空の場合は短縮名にフォールバックする。
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.name
        } else {
            &self.full_name
        }
    }

    /// 指定販売者に所属する顧客かどうか
    pub fn is_customer_of(&self, seller_id: SellerId) -> bool {
        self.contractor_type == ContractorType::Customer && self.seller_id == Some(seller_id)
    }
}

/// 従業員
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id:        EmployeeId,
    full_name: String,
}

impl Employee {
    pub fn new(id: EmployeeId, full_name: impl Into<String>) -> Self {
        Self {
            id,
            full_name: full_name.into(),
        }
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }
}

/// 従業員の役割
///
/// 見つからなかった場合のエラーメッセージを決める。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
pub enum EmployeeRole {
    /// 返品の作成者
    Creator,
    /// 返品の担当者
    Expert,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn seller_id() -> SellerId {
        SellerId::new(10).unwrap()
    }

    fn customer(contractor_type: ContractorType, seller_id: Option<SellerId>) -> Customer {
        Customer::new(NewCustomer {
            id: ClientId::new(5).unwrap(),
            contractor_type,
            seller_id,
            email: Some("client@example.com".to_string()),
            mobile: Some("".to_string()),
            name: "Ivanov".to_string(),
            full_name: "Ivan Ivanov".to_string(),
        })
    }

    #[rstest]
    #[case(0, true)]
    #[case(-3, true)]
    #[case(1, false)]
    fn test_idは0以下を受け付けない(#[case] value: i64, #[case] rejected: bool) {
        assert_eq!(SellerId::new(value).is_none(), rejected);
    }

    #[rstest]
    fn test_顧客種別かつ同一販売者なら所属とみなす(seller_id: SellerId) {
        let client = customer(ContractorType::Customer, Some(seller_id));
        assert!(client.is_customer_of(seller_id));
    }

    #[rstest]
    fn test_顧客種別でない取引先は所属とみなさない(seller_id: SellerId) {
        let client = customer(ContractorType::Employee, Some(seller_id));
        assert!(!client.is_customer_of(seller_id));
    }

    #[rstest]
    fn test_別販売者の顧客は所属とみなさない(seller_id: SellerId) {
        let client = customer(ContractorType::Customer, SellerId::new(11));
        assert!(!client.is_customer_of(seller_id));

        let orphan = customer(ContractorType::Customer, None);
        assert!(!orphan.is_customer_of(seller_id));
    }

    #[rstest]
    fn test_空の携帯番号は未設定として扱う(seller_id: SellerId) {
        let client = customer(ContractorType::Customer, Some(seller_id));
        assert_eq!(client.mobile(), None);
        assert_eq!(client.email(), Some("client@example.com"));
    }

    #[test]
    fn test_フルネームが空なら短縮名を表示名にする() {
        let client = Customer::new(NewCustomer {
            id: ClientId::new(5).unwrap(),
            contractor_type: ContractorType::Customer,
            seller_id: SellerId::new(10),
            email: None,
            mobile: None,
            name: "Ivanov".to_string(),
            full_name: "".to_string(),
        });
        assert_eq!(client.display_name(), "Ivanov");
    }

    #[test]
    fn test_取引先種別の整数変換が正しい() {
        assert_eq!(ContractorType::from_code(0), Some(ContractorType::Customer));
        assert_eq!(ContractorType::from_code(2), Some(ContractorType::Employee));
        assert_eq!(ContractorType::from_code(9), None);
        assert_eq!(ContractorType::Seller.code(), 1);
    }
}
