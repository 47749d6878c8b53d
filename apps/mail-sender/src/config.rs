//! # mail-sender 設定
//!
//! 環境変数から送信バックエンドとその設定を読み込む。

use std::{env, str::FromStr};

use anyhow::{Context as _, bail};
use mailz_infra::mail::{SesConfig, SmtpConfig};
use strum::{Display, EnumString};

/// `SMTP_CONNECT_TIMEOUT_SECONDS` 未設定時の接続タイムアウト（秒）
const DEFAULT_CONNECT_TIMEOUT_SECONDS: u32 = 10;

/// 送信バックエンド
///
/// `MAIL_BACKEND` 環境変数で切り替える:
/// - `smtp`: SMTP サーバー経由で送信（デフォルト）
/// - `ses`: Amazon SES v2 経由で送信
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum MailBackend {
    #[default]
    Smtp,
    Ses,
}

/// 選択したバックエンドとその設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SenderConfig {
    Smtp(SmtpConfig),
    Ses(SesConfig),
}

impl SenderConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 変数名から値を引く関数を使って設定を組み立てる
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let backend = match lookup("MAIL_BACKEND") {
            Some(value) => MailBackend::from_str(&value)
                .with_context(|| format!("MAIL_BACKEND は smtp か ses である必要があります: {value}"))?,
            None => MailBackend::default(),
        };

        match backend {
            MailBackend::Smtp => {
                let Some(url) = lookup("SMTP_URL") else {
                    bail!("SMTP_URL が設定されていません");
                };
                let connect_timeout_seconds = match lookup("SMTP_CONNECT_TIMEOUT_SECONDS") {
                    Some(value) => value.parse().with_context(|| {
                        format!("SMTP_CONNECT_TIMEOUT_SECONDS は正の整数である必要があります: {value}")
                    })?,
                    None => DEFAULT_CONNECT_TIMEOUT_SECONDS,
                };
                Ok(Self::Smtp(SmtpConfig {
                    url,
                    connect_timeout_seconds,
                }))
            }
            MailBackend::Ses => {
                let Some(region) = lookup("SES_REGION").or_else(|| lookup("AWS_REGION")) else {
                    bail!("SES_REGION（または AWS_REGION）が設定されていません");
                };
                Ok(Self::Ses(SesConfig {
                    region,
                    endpoint_url: lookup("SES_ENDPOINT_URL"),
                    credentials: None,
                    timeout_seconds: None,
                }))
            }
        }
    }

    pub fn backend(&self) -> MailBackend {
        match self {
            Self::Smtp(_) => MailBackend::Smtp,
            Self::Ses(_) => MailBackend::Ses,
        }
    }
}
