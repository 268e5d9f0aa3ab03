//! # Notification Service サーバー
//!
//! 返品ステータスの登録・変更イベントを受け取り、従業員と顧客へ通知する内部サービス。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `NOTIFICATION_SERVICE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `NOTIFICATION_SERVICE_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `MESSAGING_BACKEND` | No | `smtp` / `noop`（デフォルト: `noop`） |
//! | `SMTP_HOST` / `SMTP_PORT` | No | SMTP 接続先（デフォルト: `localhost:1025`） |
//! | `SMS_BACKEND` | No | `http` / `noop`（デフォルト: `noop`） |
//! | `SMS_GATEWAY_URL` | `SMS_BACKEND=http` の場合 | SMS ゲートウェイ URL |
//! | `SMS_TIMEOUT_SECS` | No | SMS ゲートウェイのタイムアウト秒（デフォルト: `5`） |
//! | `DEFAULT_LOCALE` | No | 既定ロケール（デフォルト: `en`） |
//! | `SELLER_LOCALES` | No | 販売者ごとのロケール（`10=ru,11=en`） |
//! | `LOG_FORMAT` | No | `json` / `pretty` |
//!
//! ## 起動方法
//!
//! ```bash
//! NOTIFICATION_SERVICE_PORT=3010 DATABASE_URL=postgres://... \
//!   cargo run -p returnflow-notification-service
//! ```

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context as _;
use returnflow_infra::{
    HttpNotificationManager,
    MessagesClient,
    NoopMessagesClient,
    NoopNotificationManager,
    NotificationManager,
    SmtpMessagesClient,
    db,
    repository::{
        PostgresCustomerRepository,
        PostgresEmployeeRepository,
        PostgresPermissionRepository,
        PostgresSellerRepository,
    },
};
use returnflow_notification_service::{
    build_router,
    config::{MessagingBackend, NotificationServiceConfig, SmsBackend},
    handler::ReturnNotificationState,
    usecase::{
        ReturnNotificationDeps,
        ReturnNotificationUseCaseImpl,
        return_notification::{StaticStatusCatalog, TeraLocalizer},
    },
};
use returnflow_shared::observability::{TracingConfig, init_tracing};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("notification-service"));

    let config = NotificationServiceConfig::from_env().context("設定の読み込みに失敗しました")?;
    tracing::info!(
        "Notification Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    let pool = db::create_pool(&config.database_url)
        .await
        .context("データベース接続に失敗しました")?;
    db::run_migrations(&pool)
        .await
        .context("マイグレーションの実行に失敗しました")?;
    tracing::info!("データベースに接続しました");

    let messages: Arc<dyn MessagesClient> = match config.messaging.backend {
        MessagingBackend::Smtp => {
            tracing::info!(
                "SMTP でメールを送信します: {}:{}",
                config.messaging.smtp_host,
                config.messaging.smtp_port
            );
            Arc::new(SmtpMessagesClient::new(
                &config.messaging.smtp_host,
                config.messaging.smtp_port,
            ))
        }
        MessagingBackend::Noop => {
            tracing::info!("メール送信は無効です（Noop）");
            Arc::new(NoopMessagesClient)
        }
    };

    let sms: Arc<dyn NotificationManager> = match (config.sms.backend, &config.sms.gateway_url) {
        (SmsBackend::Http, Some(url)) => {
            tracing::info!("SMS ゲートウェイを使用します: {url}");
            Arc::new(HttpNotificationManager::new(
                url.as_str(),
                Duration::from_secs(config.sms.timeout_secs),
            )?)
        }
        _ => {
            tracing::info!("SMS 送信は無効です（Noop）");
            Arc::new(NoopNotificationManager)
        }
    };

    let localizer = TeraLocalizer::new(
        config.localization.default_locale.clone(),
        config.localization.seller_locales.clone(),
    )
    .context("ローカライズ定義の読み込みに失敗しました")?;

    let usecase = ReturnNotificationUseCaseImpl::new(ReturnNotificationDeps {
        sellers: Arc::new(PostgresSellerRepository::new(pool.clone())),
        customers: Arc::new(PostgresCustomerRepository::new(pool.clone())),
        employees: Arc::new(PostgresEmployeeRepository::new(pool.clone())),
        permissions: Arc::new(PostgresPermissionRepository::new(pool)),
        messages,
        sms,
        localizer: Arc::new(localizer),
        statuses: Arc::new(StaticStatusCatalog),
    });
    let state = Arc::new(ReturnNotificationState {
        usecase: Arc::new(usecase),
    });

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("バインドアドレスが不正です")?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Notification Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
