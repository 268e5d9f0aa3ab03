//! # EmployeeRepository
//!
//! 従業員の取得を担当するリポジトリ。
//! 従業員は `contractors` テーブルの `contractor_type = 2` の行。

use async_trait::async_trait;
use returnflow_domain::contractor::{ContractorType, Employee, EmployeeId};
use sqlx::PgPool;

use crate::error::InfraError;

/// 従業員リポジトリトレイト
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// ID で従業員を検索
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError>;
}

/// PostgreSQL 実装の EmployeeRepository
#[derive(Debug, Clone)]
pub struct PostgresEmployeeRepository {
    pool: PgPool,
}

impl PostgresEmployeeRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct EmployeeRow {
    id:        i64,
    full_name: String,
}

#[async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    #[tracing::instrument(skip_all, level = "debug", fields(%id))]
    async fn find_by_id(&self, id: EmployeeId) -> Result<Option<Employee>, InfraError> {
        let row: Option<EmployeeRow> = sqlx::query_as(
            r#"
            SELECT id, full_name
            FROM contractors
            WHERE id = $1 AND contractor_type = $2
            "#,
        )
        .bind(id.as_i64())
        .bind(ContractorType::Employee.code())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let employee_id = EmployeeId::new(row.id)
            .ok_or_else(|| InfraError::invalid_data(format!("employee id={}", row.id)))?;
        Ok(Some(Employee::new(employee_id, row.full_name)))
    }
}
