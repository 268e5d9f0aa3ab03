//! # Notification Service ライブラリ
//!
//! 返品通知のユースケース・ハンドラ・ルーターを公開する。
//! テスト用に内部モジュールへのアクセスを提供する。

pub mod config;
pub mod error;
pub mod handler;
pub mod usecase;

// テストユーティリティ（内部実装、ドキュメントからは隠す）
#[cfg(feature = "test-utils")]
#[doc(hidden)]
pub mod test_utils;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use handler::{ReturnNotificationState, health_check, notify_return};
use tower_http::trace::TraceLayer;

/// ルーターを構築する
///
/// | メソッド | パス | ハンドラ |
/// |---------|------|---------|
/// | GET | `/health` | [`health_check`] |
/// | POST | `/internal/returns/notifications` | [`notify_return`] |
pub fn build_router(state: Arc<ReturnNotificationState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/internal/returns/notifications", post(notify_return))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
