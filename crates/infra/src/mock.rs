//! # テスト用モック
//!
//! 送信したメッセージをメモリに記録する [`Mail`] 実装。
//! `test-utils` feature を有効にすることで、他クレートからも利用可能。
//!
//! ```toml
//! [dev-dependencies]
//! mailz-infra = { workspace = true, features = ["test-utils"] }
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{
    MailError,
    context::Context,
    mail::{Mail, Message},
};

// ===== MockMail =====

#[derive(Clone, Default)]
pub struct MockMail {
    sent:         Arc<Mutex<Vec<Message>>>,
    last_context: Arc<Mutex<Option<Context>>>,
}

impl MockMail {
    pub fn new() -> Self {
        Self::default()
    }

    /// 送信されたメッセージを送信順に返す
    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }

    /// 最後の送信で渡されたコンテキスト
    pub fn last_context(&self) -> Option<Context> {
        self.last_context.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mail for MockMail {
    async fn send(&self, ctx: &Context, message: &Message) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(message.clone());
        *self.last_context.lock().unwrap() = Some(ctx.clone());
        Ok(())
    }
}
