//! # 通知メッセージ
//!
//! メッセージングポート・SMS ポートとやり取りする値を定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 備考 |
//! |---|------------|------|
//! | [`NotificationEvent`] | 通知イベント | 送信コンテキストに付与するイベント名 |
//! | [`OutgoingMessage`] | 送信メール | 件名・本文はローカライズ済み |
//! | [`MessageContext`] | 送信コンテキスト | 販売者・顧客・目標ステータス |
//! | [`SmsOutcome`] | SMS 送信結果 | ゲートウェイが返す送信可否とエラー文言 |
//!
//! 送信失敗は返品通知全体を中断しない。各チャネルの結果は
//! [`NotificationResult`](crate::goods_return::NotificationResult) に集約される。

use serde::{Deserialize, Serialize};
use strum::IntoStaticStr;
use thiserror::Error;

use crate::contractor::{ClientId, SellerId};

/// 通知送信エラー
#[derive(Debug, Error)]
pub enum NotificationError {
    /// メール送信に失敗
    #[error("メール送信に失敗: {0}")]
    SendFailed(String),

    /// SMS ゲートウェイとの通信に失敗
    #[error("{0}")]
    GatewayFailed(String),

    /// 送信内容が不正（アドレス形式など）
    #[error("送信内容が不正: {0}")]
    InvalidMessage(String),
}

/// 通知イベント
///
/// 外部のメッセージング基盤が購読者の振り分けに使う名前。
/// camelCase でシリアライズされる。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum NotificationEvent {
    /// 返品ステータスの変更
    ChangeReturnStatus,
}

impl NotificationEvent {
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// 送信メール
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    /// 送信元メールアドレス
    pub from:    String,
    /// 送信先メールアドレス
    pub to:      String,
    /// 件名
    pub subject: String,
    /// 本文（プレーンテキスト）
    pub body:    String,
}

/// 送信コンテキスト
///
/// 従業員向けメールでは `client_id` と `target_status` は `None`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub seller_id:     SellerId,
    pub client_id:     Option<ClientId>,
    pub event:         NotificationEvent,
    pub target_status: Option<i64>,
}

impl MessageContext {
    /// 従業員向けメールのコンテキスト
    pub fn for_employees(seller_id: SellerId, event: NotificationEvent) -> Self {
        Self {
            seller_id,
            client_id: None,
            event,
            target_status: None,
        }
    }

    /// 顧客向けメールのコンテキスト
    pub fn for_client(
        seller_id: SellerId,
        client_id: ClientId,
        event: NotificationEvent,
        target_status: i64,
    ) -> Self {
        Self {
            seller_id,
            client_id: Some(client_id),
            event,
            target_status: Some(target_status),
        }
    }
}

/// SMS 送信結果
///
/// ゲートウェイが送信を拒否した場合は `sent = false` と理由の文言を返す。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmsOutcome {
    pub sent:  bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SmsOutcome {
    pub fn sent() -> Self {
        Self {
            sent:  true,
            error: None,
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self {
            sent:  false,
            error: Some(reason.into()),
        }
    }
}
