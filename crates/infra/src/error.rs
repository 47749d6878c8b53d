//! # メール送信エラー定義
//!
//! 設定の検証、クライアントの初期化、メール送信で発生するエラーを表現する。
//!
//! ## 設計方針
//!
//! - **元エラーの保持**: lettre / AWS SDK のエラーは解釈し直さずそのまま保持する
//! - **発生位置の記録**: エラー生成時に [`SpanTrace`] を自動キャプチャし、
//!   呼び出し経路を付加情報として残す
//! - **ログを出さない**: エラーは呼び出し元に返すのみで、この層では記録しない
//!
//! ## 構造
//!
//! `std::io::Error` と同じ struct + enum パターンを採用:
//! - [`MailError`]: エラー種別（[`MailErrorKind`]）と [`SpanTrace`] を保持するラッパー
//! - [`MailErrorKind`]: エラーの具体的な種別
//!
//! コンテキストに `Mail` が注入されていない状態での取得はエラー値ではなく
//! パニックとして扱う（起動時の配線漏れであり、実行時に回復する状況ではない）。

use std::{fmt, num::ParseIntError};

use derive_more::Display;
use thiserror::Error;
use tracing_error::SpanTrace;

/// メール送信モジュールで発生するエラー
///
/// エラー種別（[`MailErrorKind`]）と [`SpanTrace`]（呼び出し経路）を保持する。
/// `From` 実装でエラーを生成すると、その時点のスパン情報が自動的にキャプチャされる。
#[derive(Display)]
#[display("{kind}")]
pub struct MailError {
    kind:       MailErrorKind,
    span_trace: SpanTrace,
}

/// メール送信エラーの種別
#[derive(Debug, Error)]
pub enum MailErrorKind {
    /// 初期化に必要な設定がコンテキストに注入されていない
    #[error("メール設定が注入されていません: {0}")]
    MissingConfig(&'static str),

    /// 設定値の検証に失敗（必須項目の欠落、URL 形式不正など）
    #[error("メール設定が不正です: {0}")]
    InvalidConfig(#[source] validator::ValidationErrors),

    /// SMTP URL の形式が不正
    #[error("SMTP URL の解析に失敗: {0}")]
    InvalidUrl(#[source] http::uri::InvalidUri),

    /// SMTP URL のポート番号が欠落している、または u16 に収まらない
    #[error("SMTP ポート番号の解析に失敗: {0}")]
    InvalidPort(#[source] ParseIntError),

    /// メッセージをトランスポートのペイロードに変換できない
    ///
    /// アドレスの書式不正や、lettre が要求する From / 宛先の欠落など。
    #[error("メッセージの構築に失敗: {0}")]
    InvalidMessage(String),

    /// SMTP サーバーへの接続確認に失敗
    #[error("SMTP サーバーに接続できません: {0}")]
    Unreachable(String),

    /// SMTP トランスポートのエラー
    #[error("SMTP 送信に失敗: {0}")]
    Smtp(#[source] lettre::transport::smtp::Error),

    /// SES API のエラー
    #[error("SES 送信に失敗: {0}")]
    Ses(#[source] aws_sdk_sesv2::Error),
}

// ===== MailError のメソッド =====

impl MailError {
    /// エラー種別を取得する
    pub fn kind(&self) -> &MailErrorKind {
        &self.kind
    }

    /// SpanTrace を取得する
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// MailError を分解して MailErrorKind と SpanTrace を取り出す
    pub fn into_parts(self) -> (MailErrorKind, SpanTrace) {
        (self.kind, self.span_trace)
    }

    /// 初期化時の設定エラーか
    ///
    /// 設定エラーは起動処理を中断すべきエラーであり、再試行しても解消しない。
    pub fn is_config_error(&self) -> bool {
        matches!(
            self.kind,
            MailErrorKind::MissingConfig(_)
                | MailErrorKind::InvalidConfig(_)
                | MailErrorKind::InvalidUrl(_)
                | MailErrorKind::InvalidPort(_)
        )
    }

    /// 送信経路（SMTP / SES）のエラーか
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self.kind,
            MailErrorKind::Unreachable(_) | MailErrorKind::Smtp(_) | MailErrorKind::Ses(_)
        )
    }

    // ===== Convenience constructors =====

    /// 設定未注入エラーを生成する
    pub fn missing_config(name: &'static str) -> Self {
        MailErrorKind::MissingConfig(name).into()
    }

    /// メッセージ構築エラーを生成する
    pub fn invalid_message(msg: impl Into<String>) -> Self {
        MailErrorKind::InvalidMessage(msg.into()).into()
    }

    /// 接続確認失敗エラーを生成する
    pub fn unreachable(msg: impl Into<String>) -> Self {
        MailErrorKind::Unreachable(msg.into()).into()
    }
}

// ===== トレイト実装 =====

impl fmt::Debug for MailError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailError")
            .field("kind", &self.kind)
            .field("span_trace", &self.span_trace)
            .finish()
    }
}

impl std::error::Error for MailError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.kind.source()
    }
}

// ===== From 実装（SpanTrace 自動キャプチャ） =====

impl From<MailErrorKind> for MailError {
    fn from(kind: MailErrorKind) -> Self {
        Self {
            kind,
            span_trace: SpanTrace::capture(),
        }
    }
}

impl From<validator::ValidationErrors> for MailError {
    fn from(source: validator::ValidationErrors) -> Self {
        MailErrorKind::InvalidConfig(source).into()
    }
}

impl From<http::uri::InvalidUri> for MailError {
    fn from(source: http::uri::InvalidUri) -> Self {
        MailErrorKind::InvalidUrl(source).into()
    }
}

impl From<ParseIntError> for MailError {
    fn from(source: ParseIntError) -> Self {
        MailErrorKind::InvalidPort(source).into()
    }
}

impl From<lettre::transport::smtp::Error> for MailError {
    fn from(source: lettre::transport::smtp::Error) -> Self {
        MailErrorKind::Smtp(source).into()
    }
}

impl From<lettre::address::AddressError> for MailError {
    fn from(source: lettre::address::AddressError) -> Self {
        Self::invalid_message(format!("アドレスの書式が不正: {source}"))
    }
}

impl From<lettre::error::Error> for MailError {
    fn from(source: lettre::error::Error) -> Self {
        Self::invalid_message(source.to_string())
    }
}

impl From<aws_sdk_sesv2::Error> for MailError {
    fn from(source: aws_sdk_sesv2::Error) -> Self {
        MailErrorKind::Ses(source).into()
    }
}

impl From<aws_sdk_sesv2::error::BuildError> for MailError {
    fn from(source: aws_sdk_sesv2::error::BuildError) -> Self {
        Self::invalid_message(source.to_string())
    }
}
