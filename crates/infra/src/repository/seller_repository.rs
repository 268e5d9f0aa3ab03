//! # SellerRepository
//!
//! 販売者の取得を担当するリポジトリ。
//! 販売者は `contractors` テーブルの `contractor_type = 1` の行。

use async_trait::async_trait;
use returnflow_domain::contractor::{ContractorType, Seller, SellerId};
use sqlx::PgPool;

use crate::error::InfraError;

/// 販売者リポジトリトレイト
#[async_trait]
pub trait SellerRepository: Send + Sync {
    /// ID で販売者を検索
    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, InfraError>;
}

/// PostgreSQL 実装の SellerRepository
#[derive(Debug, Clone)]
pub struct PostgresSellerRepository {
    pool: PgPool,
}

impl PostgresSellerRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SellerRow {
    id:   i64,
    name: String,
}

#[async_trait]
impl SellerRepository for PostgresSellerRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: SellerId) -> Result<Option<Seller>, InfraError> {
        let row: Option<SellerRow> = sqlx::query_as(
            r#"
            SELECT id, name
            FROM contractors
            WHERE id = $1 AND contractor_type = $2
            "#,
        )
        .bind(id.as_i64())
        .bind(ContractorType::Seller.code())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let seller_id = SellerId::new(row.id)
            .ok_or_else(|| InfraError::invalid_data(format!("seller id={}", row.id)))?;
        Ok(Some(Seller::new(seller_id, row.name)))
    }
}
