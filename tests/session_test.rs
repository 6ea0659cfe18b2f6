// End-to-end session flow: corpus file -> responder -> conversation log

use mockito::Matcher;
use std::io::Write;
use std::sync::Arc;

use moa::cli::SessionLog;
use moa::corpus::CorpusLoader;
use moa::gemini::GeminiClient;
use moa::responder::{Responder, RespondError};

const FAILURE_MESSAGE: &str = "죄송합니다. 답변을 생성하는 데 문제가 발생했습니다.";

fn responder_for(server: &mockito::ServerGuard, context: Arc<str>) -> Responder {
    let client = GeminiClient::new("test-key".to_string())
        .unwrap()
        .with_base_url(server.url())
        .with_retry_enabled(false);
    Responder::new(client, "gemini-flash-latest".to_string(), context)
}

/// One chat turn the way the REPL records it: the question and either the
/// answer or an inline failure message are appended to the session log.
async fn ask(responder: &Responder, log: &mut SessionLog, question: &str) {
    log.add_user_message(question.to_string());
    match responder.respond(question).await {
        Ok(answer) => log.add_assistant_message(answer),
        Err(_) => log.add_assistant_message(FAILURE_MESSAGE.to_string()),
    }
}

#[tokio::test]
async fn two_questions_produce_a_four_message_log() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("제안.csv");
    std::fs::File::create(&path)
        .unwrap()
        .write_all("제목,내용\n급식 개선,채식 메뉴 확대\n".as_bytes())
        .unwrap();

    let context = CorpusLoader::new().load(&path).unwrap();

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", Matcher::Regex(r":generateContent$".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"답변입니다."}]}}]}"#)
        .expect(2)
        .create_async()
        .await;

    let responder = responder_for(&server, context);
    let mut log = SessionLog::new();

    ask(&responder, &mut log, "1번 제안이 뭐야?").await;
    ask(&responder, &mut log, "비슷한 제안이 또 있어?").await;

    assert_eq!(log.message_count(), 4);
    let roles: Vec<&str> = log.messages().iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, ["user", "assistant", "user", "assistant"]);
    assert_eq!(log.messages()[1].content, "답변입니다.");
}

#[tokio::test]
async fn backend_failure_is_recorded_inline_and_chat_continues() {
    let mut server = mockito::Server::new_async().await;
    // First call fails, second succeeds.
    server
        .mock("POST", Matcher::Regex(r":generateContent$".to_string()))
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("backend exploded")
        .expect(1)
        .create_async()
        .await;

    let responder = responder_for(&server, Arc::from("[1번 제안] 제목: 급식 개선 / 내용: ..."));
    let mut log = SessionLog::new();

    ask(&responder, &mut log, "1번 제안이 뭐야?").await;

    assert_eq!(log.message_count(), 2);
    assert_eq!(log.messages()[1].role, "assistant");
    assert_eq!(log.messages()[1].content, FAILURE_MESSAGE);

    server
        .mock("POST", Matcher::Regex(r":generateContent$".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"이제 됩니다."}]}}]}"#)
        .create_async()
        .await;

    ask(&responder, &mut log, "다시 알려줘").await;
    assert_eq!(log.message_count(), 4);
    assert_eq!(log.messages()[3].content, "이제 됩니다.");
}

#[tokio::test]
async fn empty_backend_payload_never_becomes_a_blank_answer() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", Matcher::Regex(r":generateContent$".to_string()))
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#)
        .create_async()
        .await;

    let responder = responder_for(&server, Arc::from("데이터"));
    let err = responder.respond("질문").await.unwrap_err();
    assert!(matches!(err, RespondError::EmptyResponse));
}
