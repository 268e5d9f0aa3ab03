//! # 返品通知
//!
//! 返品ステータスの変更・登録イベントから組み立てる値を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`ReturnNotificationRequest`] | 検証済みリクエスト | 必須項目がすべて型変換済み |
//! | [`Differences`] | ステータス差分 | `from` / `to` のステータスコード（未検証） |
//! | [`TemplateData`] | テンプレートデータ | 通知文面に埋め込む 13 項目 |
//! | [`NotificationResult`] | 通知結果 | チャネルごとの送信結果 |
//!
//! 変更後ステータス `0`（完了）は「未指定」ではなく有効な値として扱い、顧客へも通知する。
//! 未指定とみなすのは `differences.to` が欠落・`null`・空文字の場合のみ。

use serde::Serialize;
use serde_json::{Map, Value};

use crate::contractor::{ClientId, EmployeeId, SellerId};

/// 通知種別
///
/// 未知のコードも受け付け、`Other` として保持する。
/// `Other` の場合は差分文言が空になり、テンプレート検証で弾かれる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    /// 返品の新規登録
    New,
    /// 返品ステータスの変更
    Change,
    /// 上記以外のコード
    Other(i64),
}

impl NotificationType {
    pub const NEW: i64 = 1;
    pub const CHANGE: i64 = 2;

    pub fn from_code(code: i64) -> Self {
        match code {
            Self::NEW => Self::New,
            Self::CHANGE => Self::Change,
            other => Self::Other(other),
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Self::New => Self::NEW,
            Self::Change => Self::CHANGE,
            Self::Other(code) => code,
        }
    }
}

/// ステータス差分
///
/// リクエストの `differences` オブジェクトをそのまま保持する。
/// ステータスコードへの変換は利用時に行う。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Differences {
    from: Option<Value>,
    to:   Option<Value>,
}

impl Differences {
    pub fn new(from: Option<Value>, to: Option<Value>) -> Self {
        Self { from, to }
    }

    /// リクエストの値から差分を取り出す
    ///
    /// オブジェクト以外・`null`・空オブジェクトは「差分なし」として `None` を返す。
    pub fn from_raw(raw: Option<&Value>) -> Option<Self> {
        let object = raw?.as_object().filter(|o| !o.is_empty())?;
        Some(Self {
            from: object.get("from").cloned(),
            to:   object.get("to").cloned(),
        })
    }

    /// 変更前ステータスの値
    pub fn source(&self) -> Option<&Value> {
        self.from.as_ref()
    }

    /// 変更後ステータスの値
    ///
    /// `null` と空文字は未指定として扱う。
    pub fn target(&self) -> Option<&Value> {
        self.to
            .as_ref()
            .filter(|v| !v.is_null() && v.as_str() != Some(""))
    }
}

/// 検証済みの返品通知リクエスト
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnNotificationRequest {
    pub reseller_id:        SellerId,
    pub notification_type:  NotificationType,
    pub client_id:          ClientId,
    pub creator_id:         EmployeeId,
    pub expert_id:          EmployeeId,
    pub complaint_id:       i64,
    pub complaint_number:   String,
    pub consumption_id:     i64,
    pub consumption_number: String,
    pub agreement_number:   String,
    pub date:               String,
    pub differences:        Option<Differences>,
}

impl ReturnNotificationRequest {
    /// 顧客向け通知の対象となる変更後ステータスの値
    ///
    /// 変更通知かつ `differences.to` が指定されている場合のみ返す。
    pub fn client_target(&self) -> Option<&Value> {
        if self.notification_type != NotificationType::Change {
            return None;
        }
        self.differences.as_ref()?.target()
    }
}

/// テンプレートデータの 1 項目の値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateValue<'a> {
    Int(i64),
    Text(&'a str),
}

impl TemplateValue<'_> {
    /// 整数は 0、文字列は空白のみの場合に空とみなす
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Int(value) => *value == 0,
            Self::Text(value) => value.trim().is_empty(),
        }
    }

    fn to_json(self) -> Value {
        match self {
            Self::Int(value) => Value::from(value),
            Self::Text(value) => Value::from(value),
        }
    }
}

/// 通知文面に埋め込むテンプレートデータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct TemplateData {
    pub complaint_id:       i64,
    pub complaint_number:   String,
    pub creator_id:         i64,
    pub creator_name:       String,
    pub expert_id:          i64,
    pub expert_name:        String,
    pub client_id:          i64,
    pub client_name:        String,
    pub consumption_id:     i64,
    pub consumption_number: String,
    pub agreement_number:   String,
    pub date:               String,
    pub differences:        String,
}

impl TemplateData {
    /// 項目名と値を宣言順に返す
    pub fn entries(&self) -> [(&'static str, TemplateValue<'_>); 13] {
        use TemplateValue::{Int, Text};
        [
            ("COMPLAINT_ID", Int(self.complaint_id)),
            ("COMPLAINT_NUMBER", Text(&self.complaint_number)),
            ("CREATOR_ID", Int(self.creator_id)),
            ("CREATOR_NAME", Text(&self.creator_name)),
            ("EXPERT_ID", Int(self.expert_id)),
            ("EXPERT_NAME", Text(&self.expert_name)),
            ("CLIENT_ID", Int(self.client_id)),
            ("CLIENT_NAME", Text(&self.client_name)),
            ("CONSUMPTION_ID", Int(self.consumption_id)),
            ("CONSUMPTION_NUMBER", Text(&self.consumption_number)),
            ("AGREEMENT_NUMBER", Text(&self.agreement_number)),
            ("DATE", Text(&self.date)),
            ("DIFFERENCES", Text(&self.differences)),
        ]
    }

    /// 最初に見つかった空項目の名前
    pub fn first_empty_field(&self) -> Option<&'static str> {
        self.entries()
            .into_iter()
            .find(|(_, value)| value.is_empty())
            .map(|(name, _)| name)
    }

    /// ローカライズのパラメータとして使う平坦なマップ
    pub fn to_params(&self) -> Map<String, Value> {
        self.entries()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.to_json()))
            .collect()
    }
}

/// 顧客向け SMS の送信結果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClientSmsResult {
    #[serde(rename = "isSent")]
    pub sent:    bool,
    pub message: String,
}

/// 通知結果
///
/// 空の状態で作成し、各チャネルの送信後に更新する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NotificationResult {
    #[serde(rename = "notificationEmployeeByEmail")]
    pub employee_email_sent: bool,
    #[serde(rename = "notificationClientByEmail")]
    pub client_email_sent:   bool,
    #[serde(rename = "notificationClientBySms")]
    pub client_sms:          ClientSmsResult,
}
