//! テスト共通フィクスチャ
//!
//! SMTP の統合テストで使用するインメモリ SMTP サーバーと、
//! 送信メッセージのフィクスチャ。 Rust の統合テスト規約に従い
//! `tests/common/mod.rs` に配置。

// 各テストファイルが独立したクレートとしてコンパイルされるため、
// 使用しない関数に dead_code 警告が出る。モジュール全体で抑制する。
#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use mailz_infra::mail::Message;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{TcpListener, TcpStream},
};

// =============================================================================
// メッセージ
// =============================================================================

/// 全フィールドを設定したメッセージ
pub fn full_message() -> Message {
    Message {
        from:      "From <from@domain.com>".to_string(),
        reply_to:  "ReplyTo <reply-to@domain.com>".to_string(),
        to:        vec![
            "TO1 <to1@domain.com>".to_string(),
            "TO2 <to2@domain.com>".to_string(),
        ],
        cc:        vec![
            "CC1 <cc1@domain.com>".to_string(),
            "CC2 <cc2@domain.com>".to_string(),
        ],
        subject:   "Subject".to_string(),
        text_body: "TextBody".to_string(),
        html_body: "HTMLBody".to_string(),
    }
}

// =============================================================================
// SMTP サーバー
// =============================================================================

/// 受信したトランザクション
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceivedMail {
    pub mail_from: String,
    pub rcpt_to:   Vec<String>,
    pub data:      String,
}

/// 最小限のコマンドのみ応答する SMTP サーバー
///
/// 認証・TLS には対応しない。受信した DATA は [`FakeSmtpServer::received`] で取得する。
pub struct FakeSmtpServer {
    addr:     SocketAddr,
    received: Arc<Mutex<Vec<ReceivedMail>>>,
}

impl FakeSmtpServer {
    /// ループバックの空きポートで待ち受けを開始する
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));

        let store = Arc::clone(&received);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(handle_connection(stream, Arc::clone(&store)));
            }
        });

        Self { addr, received }
    }

    /// 接続先 URL（認証なし）
    pub fn url(&self) -> String {
        format!("smtp://{}:{}", self.addr.ip(), self.addr.port())
    }

    pub fn received(&self) -> Vec<ReceivedMail> {
        self.received.lock().unwrap().clone()
    }
}

async fn handle_connection(stream: TcpStream, store: Arc<Mutex<Vec<ReceivedMail>>>) {
    let (reader, mut writer) = stream.into_split();
    let mut lines = BufReader::new(reader).lines();
    let mut current = ReceivedMail::default();

    if writer.write_all(b"220 localhost ESMTP\r\n").await.is_err() {
        return;
    }

    while let Ok(Some(line)) = lines.next_line().await {
        let command = line.to_ascii_uppercase();
        let reply: &[u8] = if command.starts_with("EHLO") || command.starts_with("HELO") {
            b"250 localhost\r\n"
        } else if command.starts_with("MAIL FROM:") {
            current = ReceivedMail {
                mail_from: line["MAIL FROM:".len()..].to_string(),
                ..ReceivedMail::default()
            };
            b"250 OK\r\n"
        } else if command.starts_with("RCPT TO:") {
            current.rcpt_to.push(line["RCPT TO:".len()..].to_string());
            b"250 OK\r\n"
        } else if command == "DATA" {
            if writer.write_all(b"354 End data with <CR><LF>.<CR><LF>\r\n").await.is_err() {
                return;
            }
            while let Ok(Some(data_line)) = lines.next_line().await {
                if data_line == "." {
                    break;
                }
                current.data.push_str(&data_line);
                current.data.push('\n');
            }
            store.lock().unwrap().push(std::mem::take(&mut current));
            b"250 OK\r\n"
        } else if command == "QUIT" {
            let _ = writer.write_all(b"221 Bye\r\n").await;
            return;
        } else {
            // NOOP / RSET
            b"250 OK\r\n"
        };

        if writer.write_all(reply).await.is_err() {
            return;
        }
    }
}
