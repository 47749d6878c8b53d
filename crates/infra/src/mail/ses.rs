//! SES 送信実装
//!
//! AWS SES v2 API の `SendEmail` を使用してメールを送信する。
//! 初期化時にネットワーク呼び出しは行わない。

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use aws_sdk_sesv2::{
    Client,
    config::Credentials,
    types::{Body, Content, Destination, EmailContent, Message as SesMessage},
};
use mailz_domain::mail::{Message, NonEmpty};
use validator::Validate;

use super::{Mail, SesConfig, config::SesConfigKey, mail_injector};
use crate::{
    MailError,
    context::{Context, Injector, Releaser},
};

/// SES の全テキストフィールドに付与する文字セット
const CHARSET: &str = "UTF-8";

/// `SendEmail` に渡すリクエスト内容
///
/// 未設定のフィールドは `None` のまま送信され、API 上でも省略される。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SesSendRequest {
    pub from_email_address: Option<String>,
    pub reply_to_addresses: Option<Vec<String>>,
    pub destination:        Option<Destination>,
    pub content:            Option<EmailContent>,
}

/// メッセージを SES の送信リクエストに変換する
///
/// - 宛先ブロックは To / CC のいずれかがある場合のみ設定し、空の側は省略する
/// - 内容ブロックは件名・本文のいずれかがある場合のみ設定する
/// - 件名・テキスト・HTML はそれぞれ空でなければ文字セット `UTF-8` 付きで設定する
pub fn to_ses(message: &Message) -> Result<SesSendRequest, MailError> {
    let destination = message.has_recipients().then(|| {
        Destination::builder()
            .set_to_addresses(message.to.non_empty().map(<[String]>::to_vec))
            .set_cc_addresses(message.cc.non_empty().map(<[String]>::to_vec))
            .build()
    });

    let content = if message.has_content() {
        let subject = message.subject.non_empty().map(utf8_content).transpose()?;
        let text = message.text_body.non_empty().map(utf8_content).transpose()?;
        let html = message.html_body.non_empty().map(utf8_content).transpose()?;

        let body = (text.is_some() || html.is_some())
            .then(|| Body::builder().set_text(text).set_html(html).build());

        Some(
            EmailContent::builder()
                .simple(
                    SesMessage::builder()
                        .set_subject(subject)
                        .set_body(body)
                        .build(),
                )
                .build(),
        )
    } else {
        None
    };

    Ok(SesSendRequest {
        from_email_address: message.from.non_empty().map(str::to_string),
        reply_to_addresses: message
            .reply_to
            .non_empty()
            .map(|reply_to| vec![reply_to.to_string()]),
        destination,
        content,
    })
}

fn utf8_content(data: &str) -> Result<Content, MailError> {
    Ok(Content::builder().data(data).charset(CHARSET).build()?)
}

/// SES クライアントを作成する
///
/// 認証情報が設定されていればそれを使い、なければ SDK のデフォルト認証チェーン
/// （環境変数、プロファイル、IAM ロール）で解決する。
/// `endpoint_url` を指定するとローカルのモックサーバー等に接続できる。
pub async fn create_client(config: &SesConfig) -> Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint_url) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }
    if let Some(credentials) = &config.credentials {
        loader = loader.credentials_provider(Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            credentials.session_token.clone(),
            None,
            "mailz",
        ));
    }
    if let Some(timeout_seconds) = config.timeout_seconds {
        loader = loader.timeout_config(
            aws_config::timeout::TimeoutConfig::builder()
                .operation_timeout(Duration::from_secs(timeout_seconds.into()))
                .build(),
        );
    }

    Client::new(&loader.load().await)
}

/// SES 送信
///
/// `aws_sdk_sesv2::Client` をラップする。
#[derive(Debug, Clone)]
pub struct SesMail {
    client: Client,
}

impl SesMail {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Mail for SesMail {
    #[tracing::instrument(skip_all, fields(transport = "ses"))]
    async fn send(&self, _ctx: &Context, message: &Message) -> Result<(), MailError> {
        let request = to_ses(message)?;

        self.client
            .send_email()
            .set_from_email_address(request.from_email_address)
            .set_reply_to_addresses(request.reply_to_addresses)
            .set_destination(request.destination)
            .set_content(request.content)
            .send()
            .await
            .map_err(aws_sdk_sesv2::Error::from)?;

        Ok(())
    }
}

/// SES 実装の初期化
///
/// コンテキストの [`SesConfig`] を検証し、クライアントを作成する。
/// 成功すると [`SesMail`] を注入する関数と、何もしない解放処理を返す。
#[tracing::instrument(skip_all)]
pub async fn ses_initializer(ctx: &Context) -> Result<(Injector, Releaser), MailError> {
    let config = ctx
        .value::<SesConfigKey>()
        .ok_or_else(|| MailError::missing_config("SesConfig"))?;
    config.validate()?;

    let mail = SesMail::new(create_client(config).await);

    tracing::debug!(region = %config.region, "SES クライアントを初期化しました");

    Ok((mail_injector(Arc::new(mail)), Releaser::noop()))
}
