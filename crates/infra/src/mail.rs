//! # メール送信
//!
//! SMTP と Amazon SES v2 の 2 つの送信経路を [`Mail`] トレイトで統一する。
//!
//! ## 設計方針
//!
//! - **trait による抽象化**: 呼び出し元はどちらの送信経路が有効かを意識しない
//! - **純粋な変換関数**: [`Message`] から各トランスポートのペイロードへの変換
//!   （[`to_smtp`] / [`to_ses`]）は I/O を伴わない
//! - **明示的な受け渡し**: 設定と実装は [`Context`] に注入し、呼び出し元が
//!   コンテキストを引き回す
//!
//! ## 初期化の流れ
//!
//! ```text
//! 設定 → smtp_config_injector / ses_config_injector → Context
//!      → smtp_initializer / ses_initializer → (Injector, Releaser)
//!      → Injector::inject → get(&ctx).send(&message)
//! ```
//!
//! ## 使用例
//!
//! ```rust,ignore
//! use mailz_infra::{Context, mail};
//!
//! async fn setup(config: mail::SmtpConfig) -> Result<(), mailz_infra::MailError> {
//!     let ctx = mail::smtp_config_injector(config).inject(&Context::new());
//!     let (injector, releaser) = mail::smtp_initializer(&ctx).await?;
//!     let ctx = injector.inject(&ctx);
//!
//!     mail::get(&ctx).send(&mail::Message::default()).await?;
//!     releaser.release();
//!     Ok(())
//! }
//! ```

mod config;
mod ses;
mod smtp;

use std::{fmt, sync::Arc};

use async_trait::async_trait;
pub use config::{SesConfig, SesCredentials, SmtpConfig, ses_config_injector, smtp_config_injector};
pub use mailz_domain::mail::Message;
pub use ses::{SesMail, SesSendRequest, create_client, ses_initializer, to_ses};
pub use smtp::{SmtpEndpoint, SmtpMail, parse_smtp_url, smtp_initializer, to_smtp};

use crate::{
    MailError,
    context::{Context, ContextKey, Injector},
};

/// メール送信トレイト
///
/// SMTP / SES のどちらの実装も満たす唯一の操作。
/// 実装は不変のクライアントのみを保持し、並行に呼び出してよい。
#[async_trait]
pub trait Mail: Send + Sync {
    /// メールを送信する
    ///
    /// トランスポートのエラーは解釈し直さずに返す。再試行は行わない。
    async fn send(&self, ctx: &Context, message: &Message) -> Result<(), MailError>;
}

struct MailKey;

impl ContextKey for MailKey {
    type Value = Arc<dyn Mail>;
}

/// 常に同じ [`Mail`] 実装を注入する
pub fn mail_injector(mail: Arc<dyn Mail>) -> Injector {
    Injector::singleton::<MailKey>(mail)
}

/// コンテキストから [`Mail`] を取り出し、[`ContextMail`] として返す
///
/// # Panics
///
/// [`Mail`] が注入されていない場合。起動時の初期化処理の呼び出し漏れであり、
/// 実行時に回復すべき状況ではないため、エラー値ではなくパニックとする。
pub fn get(ctx: &Context) -> ContextMail {
    let mail = ctx
        .value::<MailKey>()
        .map(Arc::clone)
        .expect("Mail がコンテキストに注入されていません（初期化処理の呼び出し漏れ）");

    ContextMail {
        ctx: ctx.clone(),
        mail,
    }
}

/// コンテキストを束縛した [`Mail`]
///
/// 呼び出しごとにコンテキストを渡さずに送信できる。
#[derive(Clone)]
pub struct ContextMail {
    ctx:  Context,
    mail: Arc<dyn Mail>,
}

impl ContextMail {
    /// メールを送信する
    pub async fn send(&self, message: &Message) -> Result<(), MailError> {
        self.mail.send(&self.ctx, message).await
    }
}

impl fmt::Debug for ContextMail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextMail")
            .field("ctx", &self.ctx)
            .finish_non_exhaustive()
    }
}
