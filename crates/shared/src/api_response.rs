//! # API レスポンスエンベロープ
//!
//! 内部 API の統一レスポンス形式 `{ "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 内部 API の統一レスポンス型
///
/// 返品通知エンドポイントは配信結果を `{ "data": NotificationResult }` で返す。
///
/// ## 使用例
///
/// ```
/// use returnflow_shared::ApiResponse;
///
/// let response = ApiResponse::new(true);
/// assert!(response.data);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
