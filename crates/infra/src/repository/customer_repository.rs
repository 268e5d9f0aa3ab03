//! # CustomerRepository
//!
//! 顧客として指定された取引先の取得を担当するリポジトリ。
//!
//! 種別を問わず取引先を返す。顧客種別であること、指定販売者に
//! 所属することの検証はエンティティ解決側の責務。

use async_trait::async_trait;
use returnflow_domain::contractor::{ClientId, ContractorType, Customer, NewCustomer, SellerId};
use sqlx::PgPool;

use crate::error::InfraError;

/// 顧客リポジトリトレイト
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// ID で取引先を検索
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Customer>, InfraError>;
}

/// PostgreSQL 実装の CustomerRepository
#[derive(Debug, Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ContractorRow {
    id:              i64,
    contractor_type: i16,
    seller_id:       Option<i64>,
    email:           Option<String>,
    mobile:          Option<String>,
    name:            String,
    full_name:       String,
}

impl TryFrom<ContractorRow> for Customer {
    type Error = InfraError;

    fn try_from(row: ContractorRow) -> Result<Self, Self::Error> {
        let id = ClientId::new(row.id)
            .ok_or_else(|| InfraError::invalid_data(format!("contractor id={}", row.id)))?;
        let contractor_type = ContractorType::from_code(row.contractor_type).ok_or_else(|| {
            InfraError::invalid_data(format!("contractor_type={}", row.contractor_type))
        })?;

        Ok(Customer::new(NewCustomer {
            id,
            contractor_type,
            seller_id: row.seller_id.and_then(SellerId::new),
            email: row.email,
            mobile: row.mobile,
            name: row.name,
            full_name: row.full_name,
        }))
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: ClientId) -> Result<Option<Customer>, InfraError> {
        let row: Option<ContractorRow> = sqlx::query_as(
            r#"
            SELECT id, contractor_type, seller_id, email, mobile, name, full_name
            FROM contractors
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }
}
