//! # エンティティ解決
//!
//! 検証済みリクエストの ID から販売者・顧客・作成者・担当者を取得する。
//! 取得は販売者 → 顧客 → 作成者 → 担当者の順に行い、最初の失敗で中断する。

use std::sync::Arc;

use returnflow_domain::{
    ReturnNotificationError,
    contractor::{ClientId, Customer, Employee, EmployeeId, EmployeeRole, Seller, SellerId},
    error::NotFoundTarget,
    goods_return::ReturnNotificationRequest,
};
use returnflow_infra::{
    InfraError,
    repository::{CustomerRepository, EmployeeRepository, SellerRepository},
};
use returnflow_shared::event_log::error as error_field;

/// 解決済みのエンティティ
#[derive(Debug, Clone)]
pub struct ResolvedEntities {
    pub seller:  Seller,
    pub client:  Customer,
    pub creator: Employee,
    pub expert:  Employee,
}

/// エンティティ解決
pub struct EntityResolver {
    sellers:   Arc<dyn SellerRepository>,
    customers: Arc<dyn CustomerRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

fn repository_error(e: InfraError) -> ReturnNotificationError {
    tracing::error!(
        error = %e,
        error.category = error_field::category::INFRASTRUCTURE,
        error.kind = error_field::kind::DATABASE,
        span_trace = %e.span_trace(),
        "リポジトリの参照に失敗しました"
    );
    ReturnNotificationError::internal(e.to_string())
}

impl EntityResolver {
    pub fn new(
        sellers: Arc<dyn SellerRepository>,
        customers: Arc<dyn CustomerRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            sellers,
            customers,
            employees,
        }
    }

    /// 販売者を取得する
    pub async fn resolve_seller(&self, id: SellerId) -> Result<Seller, ReturnNotificationError> {
        self.sellers
            .find_by_id(id)
            .await
            .map_err(repository_error)?
            .ok_or(ReturnNotificationError::NotFound(NotFoundTarget::Seller))
    }

    /// 顧客を取得する
    ///
    /// 顧客種別でない、または別の販売者に所属する取引先は未検出として扱う。
    pub async fn resolve_client(
        &self,
        id: ClientId,
        seller_id: SellerId,
    ) -> Result<Customer, ReturnNotificationError> {
        self.customers
            .find_by_id(id)
            .await
            .map_err(repository_error)?
            .filter(|client| client.is_customer_of(seller_id))
            .ok_or(ReturnNotificationError::NotFound(NotFoundTarget::Client))
    }

    /// 従業員を取得する
    pub async fn resolve_employee(
        &self,
        id: EmployeeId,
        role: EmployeeRole,
    ) -> Result<Employee, ReturnNotificationError> {
        self.employees
            .find_by_id(id)
            .await
            .map_err(repository_error)?
            .ok_or_else(|| ReturnNotificationError::NotFound(role.into()))
    }

    /// リクエストに関連するエンティティをすべて取得する
    #[tracing::instrument(skip_all, level = "debug", fields(seller_id = %request.reseller_id))]
    pub async fn resolve(
        &self,
        request: &ReturnNotificationRequest,
    ) -> Result<ResolvedEntities, ReturnNotificationError> {
        let seller = self.resolve_seller(request.reseller_id).await?;
        let client = self
            .resolve_client(request.client_id, request.reseller_id)
            .await?;
        let creator = self
            .resolve_employee(request.creator_id, EmployeeRole::Creator)
            .await?;
        let expert = self
            .resolve_employee(request.expert_id, EmployeeRole::Expert)
            .await?;

        tracing::debug!(client_id = %client.id(), "エンティティを解決しました");

        Ok(ResolvedEntities {
            seller,
            client,
            creator,
            expert,
        })
    }
}
