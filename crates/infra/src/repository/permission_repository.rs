//! # PermissionRepository
//!
//! 販売者のメール送信元アドレスと、通知権限を持つ従業員のメールアドレスを取得する。

use async_trait::async_trait;
use returnflow_domain::contractor::SellerId;
use sqlx::PgPool;

use crate::error::InfraError;

/// 通知権限リポジトリトレイト
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    /// 販売者のメール送信元アドレス（未設定なら `None`）
    async fn email_from(&self, seller_id: SellerId) -> Result<Option<String>, InfraError>;

    /// 指定の権限を持つ従業員のメールアドレス一覧
    async fn emails_by_permit(
        &self,
        seller_id: SellerId,
        permit: &str,
    ) -> Result<Vec<String>, InfraError>;
}

/// PostgreSQL 実装の PermissionRepository
#[derive(Debug, Clone)]
pub struct PostgresPermissionRepository {
    pool: PgPool,
}

impl PostgresPermissionRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PermissionRepository for PostgresPermissionRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%seller_id))]
    async fn email_from(&self, seller_id: SellerId) -> Result<Option<String>, InfraError> {
        let email: Option<String> = sqlx::query_scalar(
            r#"
            SELECT email_from
            FROM seller_mail_settings
            WHERE seller_id = $1
            "#,
        )
        .bind(seller_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        Ok(email.filter(|e| !e.trim().is_empty()))
    }

    #[tracing::instrument(skip_all, level = "debug", fields(%seller_id, %permit))]
    async fn emails_by_permit(
        &self,
        seller_id: SellerId,
        permit: &str,
    ) -> Result<Vec<String>, InfraError> {
        let emails: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT c.email
            FROM employee_permits p
            JOIN contractors c ON c.id = p.employee_id
            WHERE p.seller_id = $1
              AND p.permit = $2
              AND c.email IS NOT NULL
              AND c.email <> ''
            ORDER BY c.id
            "#,
        )
        .bind(seller_id.as_i64())
        .bind(permit)
        .fetch_all(&self.pool)
        .await?;

        Ok(emails)
    }
}
