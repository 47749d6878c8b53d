//! SES 送信の統合テスト
//!
//! wiremock で SES v2 API を模擬し、`SendEmail` のリクエスト内容を検証する。
//!
//! 実行方法:
//! ```bash
//! cargo test -p mailz-infra --test ses_test
//! ```

mod common;

use common::full_message;
use mailz_infra::{
    Context,
    MailErrorKind,
    mail::{self, SesConfig, SesCredentials, ses_config_injector},
};
use serde_json::json;
use wiremock::{
    Mock,
    MockServer,
    ResponseTemplate,
    matchers::{body_json, method, path},
};

const SEND_EMAIL_PATH: &str = "/v2/email/outbound-emails";

fn config(endpoint_url: String) -> SesConfig {
    SesConfig {
        region:          "us-east-1".to_string(),
        endpoint_url:    Some(endpoint_url),
        credentials:     Some(SesCredentials {
            access_key_id:     "AKIDEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
            session_token:     None,
        }),
        timeout_seconds: Some(5),
    }
}

async fn context_mail(server: &MockServer) -> mail::ContextMail {
    let ctx = ses_config_injector(config(server.uri())).inject(&Context::new());
    let (injector, _releaser) = mail::ses_initializer(&ctx).await.unwrap();
    mail::get(&injector.inject(&ctx))
}

#[tokio::test]
async fn test_全フィールドを設定したメッセージのリクエスト内容() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_EMAIL_PATH))
        .and(body_json(json!({
            "Content": {
                "Simple": {
                    "Body": {
                        "Html": { "Charset": "UTF-8", "Data": "HTMLBody" },
                        "Text": { "Charset": "UTF-8", "Data": "TextBody" }
                    },
                    "Subject": { "Charset": "UTF-8", "Data": "Subject" }
                }
            },
            "Destination": {
                "CcAddresses": ["CC1 <cc1@domain.com>", "CC2 <cc2@domain.com>"],
                "ToAddresses": ["TO1 <to1@domain.com>", "TO2 <to2@domain.com>"]
            },
            "FromEmailAddress": "From <from@domain.com>",
            "ReplyToAddresses": ["ReplyTo <reply-to@domain.com>"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "MessageId": "test-id" })))
        .expect(1)
        .mount(&server)
        .await;

    context_mail(&server).await.send(&full_message()).await.unwrap();
}

#[tokio::test]
async fn test_空のフィールドはリクエストから省略される() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_EMAIL_PATH))
        .and(body_json(json!({
            "Destination": { "ToAddresses": ["to@domain.com"] },
            "FromEmailAddress": "from@domain.com"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "MessageId": "test-id" })))
        .expect(1)
        .mount(&server)
        .await;

    let message = mail::Message {
        from: "from@domain.com".to_string(),
        to: vec!["to@domain.com".to_string()],
        ..mail::Message::default()
    };
    context_mail(&server).await.send(&message).await.unwrap();
}

#[tokio::test]
async fn test_apiのエラーはsesエラーとして返る() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SEND_EMAIL_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .insert_header("x-amzn-ErrorType", "MessageRejected")
                .set_body_json(json!({ "message": "Email address is not verified." })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = context_mail(&server)
        .await
        .send(&full_message())
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), MailErrorKind::Ses(_)), "{err:?}");
    assert!(err.is_transport_error());
}

#[tokio::test]
async fn test_初期化時にapiを呼び出さない() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let ctx = ses_config_injector(config(server.uri())).inject(&Context::new());

    assert!(mail::ses_initializer(&ctx).await.is_ok());
}

#[tokio::test]
async fn test_エンドポイントurlが不正な設定は検証エラーになる() {
    let ctx = ses_config_injector(config("not a url".to_string())).inject(&Context::new());

    let err = mail::ses_initializer(&ctx).await.unwrap_err();

    assert!(matches!(err.kind(), MailErrorKind::InvalidConfig(_)));
}
