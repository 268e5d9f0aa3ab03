//! # テストユーティリティ
//!
//! 統合テストとハンドラテストで共有するセットアップ。

mod return_notification_test_builder;

pub use return_notification_test_builder::{
    ReturnNotificationTestBuilder,
    ReturnNotificationTestSetup,
    raw_request,
};
