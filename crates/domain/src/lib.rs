//! # mailz ドメイン層
//!
//! メール送信の対象となるメッセージモデルを定義する。
//!
//! ## 設計方針
//!
//! - **トランスポート非依存**: SMTP / SES のどちらにも依存しない純粋なデータ型
//! - **全フィールド任意**: 空文字列・空リストは「未設定」として扱う
//!
//! ## 依存関係の方向
//!
//! ```text
//! apps → infra → domain
//! ```
//!
//! ## モジュール構成
//!
//! - [`mail`] - メールメッセージと空値判定ヘルパー
//!
//! ## 使用例
//!
//! ```rust
//! use mailz_domain::mail::{Message, NonEmpty};
//!
//! let message = Message {
//!     from: "from@domain.com".to_string(),
//!     to: vec!["to@domain.com".to_string()],
//!     subject: "Test".to_string(),
//!     ..Message::default()
//! };
//!
//! assert_eq!(message.subject.non_empty(), Some("Test"));
//! assert_eq!(message.cc.non_empty(), None);
//! ```

pub mod mail;

pub use mail::{Message, NonEmpty};
