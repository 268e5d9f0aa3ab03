//! # リポジトリ実装
//!
//! 返品通知が参照する取引先・メール設定・権限の読み取りを提供する。
//!
//! ## 設計方針
//!
//! - **読み取り専用**: 1 回の通知処理の間、参照データは変更しない
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でモック可能な設計

pub mod customer_repository;
pub mod employee_repository;
pub mod permission_repository;
pub mod seller_repository;

pub use customer_repository::{CustomerRepository, PostgresCustomerRepository};
pub use employee_repository::{EmployeeRepository, PostgresEmployeeRepository};
pub use permission_repository::{PermissionRepository, PostgresPermissionRepository};
pub use seller_repository::{PostgresSellerRepository, SellerRepository};
