//! # mail-sender
//!
//! 標準入力から JSON 形式のメッセージを読み込み、設定された送信経路で 1 通送信する。
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `MAIL_BACKEND` | No | `smtp` / `ses`（デフォルト: `smtp`） |
//! | `SMTP_URL` | smtp の場合 **Yes** | SMTP 接続 URL |
//! | `SMTP_CONNECT_TIMEOUT_SECONDS` | No | 接続タイムアウト秒数（デフォルト: `10`） |
//! | `SES_REGION` | ses の場合 **Yes** | AWS リージョン（未設定で `AWS_REGION`） |
//! | `SES_ENDPOINT_URL` | No | SES エンドポイント URL |
//! | `LOG_FORMAT` | No | `json` / `pretty`（デフォルト: `pretty`） |
//!
//! ## 実行方法
//!
//! ```bash
//! echo '{"from":"from@example.com","to":["to@example.com"],"subject":"Test","textBody":"Hello"}' \
//!   | SMTP_URL=smtp://localhost:1025 cargo run -p mailz-mail-sender
//! ```

mod config;

use std::io::Read;

use anyhow::Context as _;
use config::{MailBackend, SenderConfig};
use mailz_domain::mail::Message;
use mailz_infra::{
    Context,
    mail::{self, ses_config_injector, smtp_config_injector},
};
use mailz_shared::observability::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    init_tracing(TracingConfig::from_env("mailz-mail-sender"));

    let config = SenderConfig::from_env().context("設定の読み込みに失敗しました")?;
    let backend = config.backend();
    tracing::info!(%backend, "メール送信経路を初期化します");

    let ctx = match config {
        SenderConfig::Smtp(smtp) => smtp_config_injector(smtp),
        SenderConfig::Ses(ses) => ses_config_injector(ses),
    }
    .inject(&Context::new());

    // 初期化に失敗した場合は起動を中断する
    let (injector, releaser) = match backend {
        MailBackend::Smtp => mail::smtp_initializer(&ctx).await,
        MailBackend::Ses => mail::ses_initializer(&ctx).await,
    }
    .context("メール送信経路の初期化に失敗しました")?;
    let ctx = injector.inject(&ctx);

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("標準入力の読み込みに失敗しました")?;
    let message: Message =
        serde_json::from_str(&input).context("メッセージの JSON が不正です")?;

    let result = mail::get(&ctx).send(&message).await;
    releaser.release();
    result.context("メール送信に失敗しました")?;

    tracing::info!(recipients = message.to.len() + message.cc.len(), "メールを送信しました");
    Ok(())
}
