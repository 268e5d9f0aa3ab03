//! # ReturnFlow 共有ユーティリティ
//!
//! 返品通知サービスと各クレートで共通して使うユーティリティを提供する。
//!
//! ## 設計方針
//!
//! - domain / infra / apps のいずれからも依存される
//! - ビジネスロジックを含まない純粋なユーティリティのみを配置
//! - axum など Web フレームワークには依存しない

pub mod api_response;
pub mod error_response;
pub mod event_log;
pub mod health;
pub mod observability;

pub use api_response::ApiResponse;
pub use error_response::ErrorResponse;
pub use health::HealthResponse;
