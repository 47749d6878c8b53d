//! # メール
//!
//! トランスポートに依存しないメールメッセージを定義する。
//!
//! ## 設計方針
//!
//! - **フィールド単位の省略**: 各フィールドは独立して任意。空文字列・空リストは
//!   送信ペイロード上でヘッダ/フィールドごと省略される
//! - **省略判定の共通化**: [`NonEmpty`] を SMTP / SES 両アダプタで共有し、
//!   2 つのエンコーディングの判定が食い違わないようにする

use serde::{Deserialize, Serialize};

/// メールメッセージ
///
/// 送信元・宛先・件名・本文を保持する。識別子は持たず、値の等価性で比較する。
/// JSON では `from, replyTo, to, cc, subject, textBody, htmlBody` の
/// フィールド名でシリアライズされる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    /// 送信元アドレス（例: `From <from@domain.com>`）
    pub from:      String,
    /// 返信先アドレス
    pub reply_to:  String,
    /// 宛先アドレス（順序を保持）
    pub to:        Vec<String>,
    /// CC アドレス（順序を保持）
    pub cc:        Vec<String>,
    /// 件名
    pub subject:   String,
    /// プレーンテキスト本文
    pub text_body: String,
    /// HTML 本文
    pub html_body: String,
}

impl Message {
    /// 宛先（To / CC）が 1 件以上あるか
    pub fn has_recipients(&self) -> bool {
        !self.to.is_empty() || !self.cc.is_empty()
    }

    /// 件名・本文のいずれかが設定されているか
    pub fn has_content(&self) -> bool {
        !self.subject.is_empty() || !self.text_body.is_empty() || !self.html_body.is_empty()
    }
}

/// 空値を「未設定」として扱うためのヘルパー
///
/// 空であれば `None`、そうでなければ `Some(self)` を返す。
/// アダプタはこの結果が `Some` の場合にのみヘッダ/フィールドを設定する。
pub trait NonEmpty {
    fn non_empty(&self) -> Option<&Self>;
}

impl NonEmpty for str {
    fn non_empty(&self) -> Option<&Self> {
        (!self.is_empty()).then_some(self)
    }
}

impl<T> NonEmpty for [T] {
    fn non_empty(&self) -> Option<&Self> {
        (!self.is_empty()).then_some(self)
    }
}
