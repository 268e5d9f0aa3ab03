//! # 返品通知ハンドラ
//!
//! ## エンドポイント
//!
//! ```text
//! POST /internal/returns/notifications
//! ```
//!
//! リクエストボディは JSON オブジェクトとして読み取り、型変換はユースケース側で行う。
//! オブジェクトとして解釈できないボディは空オブジェクトとして扱うため、
//! 先頭の必須項目 `resellerId` のバリデーションエラーになる。
//!
//! ## レスポンス例
//!
//! ```json
//! {
//!   "data": {
//!     "notificationEmployeeByEmail": true,
//!     "notificationClientByEmail": false,
//!     "notificationClientBySms": { "isSent": false, "message": "" }
//!   }
//! }
//! ```

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use returnflow_shared::ApiResponse;
use serde_json::{Map, Value};

use crate::{error::ServiceError, usecase::ReturnNotificationUseCaseImpl};

/// 返品通知ハンドラーの State
pub struct ReturnNotificationState {
    pub usecase: Arc<ReturnNotificationUseCaseImpl>,
}

fn parse_body(body: &[u8]) -> Map<String, Value> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            tracing::debug!(error = %e, "リクエストボディを JSON として解釈できません");
            Map::new()
        }
    }
}

/// 返品通知を実行する
#[tracing::instrument(skip_all)]
pub async fn notify_return(
    State(state): State<Arc<ReturnNotificationState>>,
    body: Bytes,
) -> Result<Response, ServiceError> {
    let raw = parse_body(&body);
    let result = state.usecase.execute(&raw).await?;

    Ok(Json(ApiResponse::new(result)).into_response())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case(br#"{"resellerId": 1}"#.as_slice(), 1)]
    #[case(b"[1, 2]".as_slice(), 0)]
    #[case(b"not json".as_slice(), 0)]
    #[case(b"".as_slice(), 0)]
    fn test_オブジェクト以外のボディは空として扱う(#[case] body: &[u8], #[case] len: usize) {
        assert_eq!(parse_body(body).len(), len);
    }

    #[test]
    fn test_オブジェクトの値はそのまま保持する() {
        let raw = parse_body(br#"{"clientId": "5", "differences": {"to": 0}}"#);
        assert_eq!(raw.get("clientId"), Some(&json!("5")));
        assert_eq!(raw.get("differences"), Some(&json!({"to": 0})));
    }
}
