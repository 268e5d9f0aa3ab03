//! # 返品通知ユースケース
//!
//! 返品ステータスの登録・変更イベントを受け取り、従業員と顧客へ通知する。
//!
//! ## 処理の流れ
//!
//! ```text
//! 生リクエスト
//!   → request_validator        （型変換・サニタイズ）
//!   → entity_resolver          （販売者・顧客・作成者・担当者）
//!   → template_data_builder    （13 項目のテンプレートデータ）
//!   → template_data_validator  （空項目の検出）
//!   → dispatcher               （従業員メール・顧客メール・顧客 SMS）
//!   → NotificationResult
//! ```
//!
//! 検証・解決・構築のいずれかが失敗した場合は通知を一切送らずにエラーを返す。
//! 送信段階の失敗は [`NotificationResult`] に記録され、エラーにはならない。
//!
//! ## モジュール構成
//!
//! - [`request_validator`] - リクエストの型変換と検証
//! - [`entity_resolver`] - 関連エンティティの取得
//! - [`localizer`] - 文言のローカライズとステータス名
//! - [`template_data_builder`] - テンプレートデータの組み立て
//! - [`template_data_validator`] - テンプレートデータの空項目検証
//! - [`dispatcher`] - 各チャネルへの送信

pub mod dispatcher;
pub mod entity_resolver;
pub mod localizer;
pub mod request_validator;
pub mod template_data_builder;
pub mod template_data_validator;

use std::sync::Arc;

pub use dispatcher::NotificationDispatcher;
pub use entity_resolver::{EntityResolver, ResolvedEntities};
pub use localizer::{Localizer, StaticStatusCatalog, StatusCatalog, TeraLocalizer};
use returnflow_domain::{ReturnNotificationError, goods_return::NotificationResult};
use returnflow_infra::{
    messaging::MessagesClient,
    repository::{CustomerRepository, EmployeeRepository, PermissionRepository, SellerRepository},
    sms::NotificationManager,
};
use returnflow_shared::{event_log::event, log_business_event};
use serde_json::{Map, Value};
pub use template_data_builder::TemplateDataBuilder;

/// ユースケースが依存するコンポーネント
pub struct ReturnNotificationDeps {
    pub sellers:     Arc<dyn SellerRepository>,
    pub customers:   Arc<dyn CustomerRepository>,
    pub employees:   Arc<dyn EmployeeRepository>,
    pub permissions: Arc<dyn PermissionRepository>,
    pub messages:    Arc<dyn MessagesClient>,
    pub sms:         Arc<dyn NotificationManager>,
    pub localizer:   Arc<dyn Localizer>,
    pub statuses:    Arc<dyn StatusCatalog>,
}

/// 返品通知ユースケース実装
pub struct ReturnNotificationUseCaseImpl {
    resolver:   EntityResolver,
    builder:    TemplateDataBuilder,
    dispatcher: NotificationDispatcher,
}

impl ReturnNotificationUseCaseImpl {
    pub fn new(deps: ReturnNotificationDeps) -> Self {
        Self {
            resolver:   EntityResolver::new(deps.sellers, deps.customers, deps.employees),
            builder:    TemplateDataBuilder::new(deps.localizer.clone(), deps.statuses),
            dispatcher: NotificationDispatcher::new(
                deps.permissions,
                deps.messages,
                deps.sms,
                deps.localizer,
            ),
        }
    }

    /// 返品通知を実行する
    #[tracing::instrument(skip_all)]
    pub async fn execute(
        &self,
        raw: &Map<String, Value>,
    ) -> Result<NotificationResult, ReturnNotificationError> {
        let request = request_validator::validate(raw).inspect_err(|e| {
            log_business_event!(
                event.category = event::category::GOODS_RETURN,
                event.action = event::action::RETURN_NOTIFICATION_REJECTED,
                event.result = event::result::FAILURE,
                error = %e,
                "返品通知リクエストを受け付けませんでした"
            );
        })?;

        log_business_event!(
            event.category = event::category::GOODS_RETURN,
            event.action = event::action::RETURN_NOTIFICATION_REQUESTED,
            event.seller_id = %request.reseller_id,
            event.result = event::result::SUCCESS,
            goods_return.notification_type = request.notification_type.code(),
            goods_return.complaint_id = request.complaint_id,
            "返品通知リクエストを受け付けました"
        );

        let ResolvedEntities {
            seller,
            client,
            creator,
            expert,
        } = self.resolver.resolve(&request).await?;

        let data = self.builder.build(&request, &client, &creator, &expert)?;
        template_data_validator::validate(&data)?;

        Ok(self
            .dispatcher
            .dispatch(&request, &seller, &client, &data)
            .await)
    }
}
