//! # テンプレートデータ構築
//!
//! 検証済みリクエストと解決済みエンティティから 13 項目のテンプレートデータを組み立てる。
//!
//! `DIFFERENCES` は通知種別で決まる:
//!
//! | 通知種別 | differences | DIFFERENCES |
//! |---------|-------------|-------------|
//! | 新規（1） | 任意 | `NewPositionAdded` |
//! | 変更（2） | あり | `PositionStatusHasChanged`（FROM / TO にステータス名、変換できない値はコード 0） |
//! | それ以外 | - | 空文字（テンプレート検証で弾かれる） |

use std::sync::Arc;

use returnflow_domain::{
    ReturnNotificationError,
    contractor::{Customer, Employee, SellerId},
    goods_return::{Differences, NotificationType, ReturnNotificationRequest, TemplateData},
};
use serde_json::{Map, Value};

use super::{
    localizer::{Localizer, StatusCatalog, keys},
    request_validator::coerce_int,
};

/// テンプレートデータ構築
pub struct TemplateDataBuilder {
    localizer: Arc<dyn Localizer>,
    statuses:  Arc<dyn StatusCatalog>,
}

impl TemplateDataBuilder {
    pub fn new(localizer: Arc<dyn Localizer>, statuses: Arc<dyn StatusCatalog>) -> Self {
        Self {
            localizer,
            statuses,
        }
    }

    /// テンプレートデータを組み立てる
    pub fn build(
        &self,
        request: &ReturnNotificationRequest,
        client: &Customer,
        creator: &Employee,
        expert: &Employee,
    ) -> Result<TemplateData, ReturnNotificationError> {
        let differences = self.differences_text(request)?;

        Ok(TemplateData {
            complaint_id: request.complaint_id,
            complaint_number: request.complaint_number.clone(),
            creator_id: creator.id().as_i64(),
            creator_name: creator.full_name().to_string(),
            expert_id: expert.id().as_i64(),
            expert_name: expert.full_name().to_string(),
            client_id: client.id().as_i64(),
            client_name: client.display_name().to_string(),
            consumption_id: request.consumption_id,
            consumption_number: request.consumption_number.clone(),
            agreement_number: request.agreement_number.clone(),
            date: request.date.clone(),
            differences,
        })
    }

    fn differences_text(
        &self,
        request: &ReturnNotificationRequest,
    ) -> Result<String, ReturnNotificationError> {
        match (request.notification_type, &request.differences) {
            (NotificationType::New, _) => {
                self.localize(keys::NEW_POSITION_ADDED, &Map::new(), request.reseller_id)
            }
            (NotificationType::Change, Some(differences)) => {
                let mut params = Map::new();
                params.insert(
                    "FROM".to_string(),
                    Value::from(self.status_name(differences, Side::From)),
                );
                params.insert(
                    "TO".to_string(),
                    Value::from(self.status_name(differences, Side::To)),
                );
                self.localize(keys::POSITION_STATUS_HAS_CHANGED, &params, request.reseller_id)
            }
            _ => Ok(String::new()),
        }
    }

    /// 差分のステータスコードを表示名に変換する
    ///
    /// 値の欠落や整数に変換できない値はコード `0` として扱う。
    /// 一覧にないコードは数値をそのまま表示名にする。
    fn status_name(&self, differences: &Differences, side: Side) -> String {
        let value = match side {
            Side::From => differences.source(),
            Side::To => differences.target(),
        };
        let code = value.and_then(coerce_int).unwrap_or(0);

        self.statuses
            .status_name(code)
            .unwrap_or_else(|| code.to_string())
    }

    fn localize(
        &self,
        key: &str,
        params: &Map<String, Value>,
        seller_id: SellerId,
    ) -> Result<String, ReturnNotificationError> {
        self.localizer.localize(key, params, seller_id).map_err(|e| {
            tracing::error!(error = %e, key, "文言のローカライズに失敗しました");
            ReturnNotificationError::internal(e.to_string())
        })
    }
}

#[derive(Clone, Copy)]
enum Side {
    From,
    To,
}
