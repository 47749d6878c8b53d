//! # mailz インフラ層
//!
//! メールの送信経路（SMTP / Amazon SES v2）との接続・通信を担当する。
//!
//! ## 責務
//!
//! - **コンテキスト**: 設定と実装を呼び出し元へ受け渡す型付きレジストリ
//! - **送信実装**: [`mail::Mail`] トレイトの SMTP / SES 実装と初期化処理
//! - **エラー**: 設定・トランスポートのエラーを [`MailError`] に集約
//!
//! ## 依存関係
//!
//! ```text
//! mail-sender → infra → domain
//!      ↘
//!        shared
//! ```
//!
//! ## モジュール構成
//!
//! - [`context`] - コンテキストと注入・解放処理
//! - [`error`] - インフラ層エラー定義
//! - [`mail`] - メール送信トレイトと各実装

pub mod context;
pub mod error;
pub mod mail;
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

pub use context::{Context, ContextKey, Injector, Releaser};
pub use error::{MailError, MailErrorKind};
