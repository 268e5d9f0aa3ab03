//! # Notification Service エラー定義
//!
//! 返品通知のエラーを HTTP レスポンス（RFC 9457 Problem Details）へ変換する。
//!
//! | エラー種別 | HTTP ステータス |
//! |-----------|----------------|
//! | `Validation` | 400 |
//! | `NotFound` | 400 |
//! | `Template` | 500 |
//! | `Internal` | 500（detail は固定文言） |

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use returnflow_domain::{ReturnNotificationError, error::ErrorKind};
use returnflow_shared::ErrorResponse;
use thiserror::Error;

/// Notification Service で発生するエラー
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 返品通知パイプラインのエラー
    #[error(transparent)]
    ReturnNotification(#[from] ReturnNotificationError),
}

impl ServiceError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            ServiceError::ReturnNotification(e) => match e.kind() {
                ErrorKind::Validation => ErrorResponse::validation_error(e.to_string()),
                ErrorKind::NotFound => ErrorResponse::entity_not_found(e.to_string()),
                ErrorKind::Template => {
                    tracing::error!(error = %e, "テンプレートデータに空項目があります");
                    ErrorResponse::template_data_empty(e.to_string())
                }
                ErrorKind::Internal => {
                    tracing::error!(error = %e, "内部エラー");
                    ErrorResponse::internal_error()
                }
            },
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = self.to_error_response();
        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use returnflow_domain::error::NotFoundTarget;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(ReturnNotificationError::validation("clientId"), 400, "Invalid or missing data for key: clientId")]
    #[case(
        ReturnNotificationError::NotFound(NotFoundTarget::Seller),
        400,
        "Seller not found!"
    )]
    #[case(
        ReturnNotificationError::template("DIFFERENCES"),
        500,
        "Template Data (DIFFERENCES) is empty!"
    )]
    #[case(ReturnNotificationError::internal("db down"), 500, "内部エラーが発生しました")]
    fn test_エラー種別ごとにステータスと詳細が決まる(
        #[case] error: ReturnNotificationError,
        #[case] status: u16,
        #[case] detail: &str,
    ) {
        let body = ServiceError::from(error).to_error_response();

        assert_eq!(body.status, status);
        assert_eq!(body.detail, detail);
    }

    #[test]
    fn test_into_responseがステータスコードを設定する() {
        let response =
            ServiceError::from(ReturnNotificationError::NotFound(NotFoundTarget::Client))
                .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
