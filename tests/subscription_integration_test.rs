// Integration tests driving the reqwest client against a local mock origin.

mod common;

use bytes::Bytes;
use common::{drain, event_stream, fast_config, MockOrigin};
use sse_notify::adapters::ReqwestHttpClient;
use sse_notify::{notify, CancelToken, Connector, NotifyError, Subscription};
use std::time::Duration;
use tokio::sync::mpsc;
use wiremock::ResponseTemplate;

#[tokio::test]
async fn test_reconnect_resumes_with_last_event_id_then_fails_on_status() {
    let origin = MockOrigin::start()
        .await
        .once(event_stream("data: event 1\nretry: 100\nid: myid\n\n"))
        .await
        .resuming_from("myid", ResponseTemplate::new(204))
        .await;

    let (tx, rx) = mpsc::channel(8);
    let mut connector = Connector::new(ReqwestHttpClient::new(), fast_config(true));
    let result = connector
        .notify(&origin.url(), &tx, &CancelToken::never())
        .await;
    drop(tx);

    let err = result.unwrap_err();
    assert!(matches!(err, NotifyError::UnexpectedStatus { status: 204, .. }));
    assert!(err.to_string().ends_with("204"));

    let events = drain(rx).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].data, Bytes::from("event 1"));
    assert_eq!(events[0].id, "myid");
    assert_eq!(events[0].origin, origin.url());
    assert_eq!(connector.state().reconnect_wait, Duration::from_millis(100));
}

#[tokio::test]
async fn test_single_stream_without_reconnect() {
    let origin = MockOrigin::start()
        .await
        .once(
            ResponseTemplate::new(200).set_body_raw(
                b"data: This is the first message.\n\n\
                  data: This is the second message, it\n\
                  data: has two lines.\n\n"
                    .to_vec(),
                "text/event-stream; charset=utf-8",
            ),
        )
        .await;

    let (tx, rx) = mpsc::channel(1);
    let url = origin.url();
    let consumer = tokio::spawn(drain(rx));

    notify(&url, false, &tx).await.unwrap();
    drop(tx);

    let events = consumer.await.unwrap();
    let data: Vec<Bytes> = events.into_iter().map(|e| e.data).collect();
    assert_eq!(
        data,
        vec![
            Bytes::from("This is the first message."),
            Bytes::from("This is the second message, it\nhas two lines."),
        ]
    );
}

#[tokio::test]
async fn test_wrong_content_type_is_fatal() {
    let origin = MockOrigin::start()
        .await
        .once(ResponseTemplate::new(200).set_body_raw(b"data: x\n\n".to_vec(), "text/plain"))
        .await;

    let (tx, rx) = mpsc::channel(8);
    let mut connector = Connector::new(ReqwestHttpClient::new(), fast_config(true));
    let result = connector
        .notify(&origin.url(), &tx, &CancelToken::never())
        .await;
    drop(tx);

    match result {
        Err(NotifyError::UnexpectedContentType { content_type, .. }) => {
            assert_eq!(content_type, "text/plain")
        }
        other => panic!("expected content type error, got {:?}", other),
    }
    assert!(drain(rx).await.is_empty());
}

#[tokio::test]
async fn test_extra_headers_and_accept_are_sent() {
    let origin = MockOrigin::start().await;
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::header("Accept", "text/event-stream"))
        .and(wiremock::matchers::header("Authorization", "Bearer secret"))
        .respond_with(event_stream("event: hello\n\n"))
        .expect(1)
        .mount(origin.server())
        .await;

    let config = fast_config(false).with_header("Authorization", "Bearer secret");
    let (tx, rx) = mpsc::channel(8);
    let mut connector = Connector::new(ReqwestHttpClient::new(), config);
    connector
        .notify(&origin.url(), &tx, &CancelToken::never())
        .await
        .unwrap();
    drop(tx);

    let events = drain(rx).await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].event_type, "hello");
    assert!(events[0].data.is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_request_error() {
    let (tx, _rx) = mpsc::channel(8);
    let mut connector = Connector::new(ReqwestHttpClient::new(), fast_config(true));
    let result = connector
        .notify("http://127.0.0.1:59999/events", &tx, &CancelToken::never())
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, NotifyError::Request { .. }));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn test_spawned_subscription_cancelled_between_attempts() {
    let origin = MockOrigin::start()
        .await
        .once(event_stream("retry: 60000\nid: 1\ndata: only\n\n"))
        .await;

    let connector = Connector::new(ReqwestHttpClient::new(), fast_config(true));
    let mut subscription = Subscription::spawn(connector, origin.url());

    let event = subscription.recv().await.unwrap();
    assert_eq!(event.data, Bytes::from("only"));

    subscription.cancel();
    let finished = tokio::time::timeout(Duration::from_secs(5), subscription.join())
        .await
        .expect("subscription should stop after cancel")
        .unwrap();

    assert!(finished.result.is_ok());
    assert_eq!(finished.state.last_event_id, "1");
    assert_eq!(finished.state.reconnect_wait, Duration::from_secs(60));
}
