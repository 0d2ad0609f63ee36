//! Telegram delivery against a mocked Bot API

mod helpers;

use assert_matches::assert_matches;
use serde_json::{json, Value};
use teloxide::Bot;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};
use bowlbot::services::{Messenger, OutgoingMessage, ReplyMarkupKind, TelegramMessenger};
use bowlbot::BowlBotError;
use helpers::*;

const TOKEN: &str = "12345:test_token";

fn sent_message(message_id: i32) -> Value {
    json!({
        "ok": true,
        "result": {
            "message_id": message_id,
            "from": {
                "id": 12345,
                "is_bot": true,
                "first_name": "BowlBot",
                "username": BOT_USERNAME
            },
            "chat": {
                "id": GROUP_CHAT_ID,
                "title": GROUP_TITLE,
                "type": "supergroup"
            },
            "date": 1640995200,
            "text": "Test message"
        }
    })
}

async fn messenger(server: &MockServer) -> TelegramMessenger {
    let bot = Bot::new(TOKEN).set_api_url(server.uri().parse().unwrap());
    TelegramMessenger::new(bot)
}

#[tokio::test]
async fn test_send_returns_message_id() {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent_message(123)))
        .expect(1)
        .mount(&server)
        .await;

    let id = messenger(&server)
        .await
        .send(OutgoingMessage::new(GROUP_CHAT_ID, "Hey everyone"))
        .await
        .unwrap();
    assert_eq!(id, 123);
}

#[tokio::test]
async fn test_prompt_options_are_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .and(body_partial_json(json!({
            "chat_id": GROUP_CHAT_ID,
            "text": "And what time does it start?",
            "disable_notification": true,
            "reply_parameters": { "message_id": 77 },
            "reply_markup": { "force_reply": true, "selective": true }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent_message(124)))
        .expect(1)
        .mount(&server)
        .await;

    let prompt = OutgoingMessage::new(GROUP_CHAT_ID, "And what time does it start?")
        .reply_to(77)
        .markup(ReplyMarkupKind::ForceReply)
        .silent();
    assert_eq!(messenger(&server).await.send(prompt).await.unwrap(), 124);
}

#[tokio::test]
async fn test_markdown_announcement() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .and(body_partial_json(json!({ "parse_mode": "Markdown" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sent_message(125)))
        .expect(1)
        .mount(&server)
        .await;

    let announcement = OutgoingMessage::new(GROUP_CHAT_ID, "Good news everyone!").markdown();
    assert_eq!(messenger(&server).await.send(announcement).await.unwrap(), 125);
}

#[tokio::test]
async fn test_api_error_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TOKEN)))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "ok": false,
            "error_code": 400,
            "description": "Bad Request: message text is empty"
        })))
        .mount(&server)
        .await;

    let result = messenger(&server)
        .await
        .send(OutgoingMessage::new(GROUP_CHAT_ID, ""))
        .await;
    assert_matches!(result, Err(BowlBotError::Telegram(_)));
}
