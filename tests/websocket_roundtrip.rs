use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use palaver::core::app::{apply_action, App, AppAction, AppCommand, InputField, View};
use palaver::protocol::OutboundMessage;
use palaver::transport::{ConnectionManager, TransportEvent, TransportUpdate};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;
use tokio_tungstenite::{accept_async, tungstenite::Message};

const WAIT: Duration = Duration::from_secs(5);

async fn next_update(rx: &mut UnboundedReceiver<TransportUpdate>) -> TransportUpdate {
    tokio::time::timeout(WAIT, rx.recv())
        .await
        .expect("timed out waiting for transport update")
        .expect("transport channel closed")
}

/// Accepts one client, checks its login frame, answers, then closes. The
/// receiver reports whether the client answered the close frame.
async fn spawn_chat_server() -> (String, oneshot::Receiver<bool>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (handshake_tx, handshake_rx) = oneshot::channel();

    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept");
        let mut ws = accept_async(stream).await.expect("handshake");

        let Some(Ok(Message::Text(login))) = ws.next().await else {
            panic!("expected login frame");
        };
        let login: Value = serde_json::from_str(&login).expect("login json");
        assert_eq!(login["type"], "login");
        assert_eq!(login["username"], "alice");
        assert_eq!(login["password"], "pw");

        for frame in [
            r#"{"type":"login","status":"success","message":"Login successful."}"#,
            r#"{"type":"message","username":"bob","content":"welcome"}"#,
        ] {
            ws.send(Message::Text(frame.to_string())).await.expect("send");
        }

        let Some(Ok(Message::Text(chat))) = ws.next().await else {
            panic!("expected chat frame");
        };
        let chat: Value = serde_json::from_str(&chat).expect("chat json");
        assert_eq!(chat["type"], "message");
        assert_eq!(chat["message"], "hi bob");

        ws.close(None).await.expect("close");
        let reply = ws.next().await;
        let _ = handshake_tx.send(matches!(reply, Some(Ok(Message::Close(_)))));
    });

    (format!("ws://{addr}"), handshake_rx)
}

fn execute(connections: &mut ConnectionManager, commands: Vec<AppCommand>) {
    for command in commands {
        match command {
            AppCommand::Connect { connection_id, url } => connections.open(connection_id, url),
            AppCommand::Send {
                connection_id,
                message,
            } => connections
                .send(connection_id, &message)
                .expect("send on open channel"),
            AppCommand::ScheduleBannerClear { .. } => {}
        }
    }
}

#[tokio::test]
async fn login_chat_and_close_against_live_server() {
    let (url, handshake) = spawn_chat_server().await;
    let (mut connections, mut updates) = ConnectionManager::new();
    let mut app = App::new(url, Some("alice"));
    app.ui.set_input_value(InputField::Password, "pw");

    let commands = apply_action(&mut app, AppAction::SubmitLogin);
    execute(&mut connections, commands);

    let opened = next_update(&mut updates).await;
    assert_eq!(opened.event, TransportEvent::Opened);
    let commands = apply_action(&mut app, AppAction::Transport(opened));
    assert!(matches!(
        commands.as_slice(),
        [AppCommand::Send {
            message: OutboundMessage::Login { .. },
            ..
        }]
    ));
    execute(&mut connections, commands);

    for _ in 0..2 {
        let update = next_update(&mut updates).await;
        assert!(matches!(update.event, TransportEvent::Frame(_)));
        apply_action(&mut app, AppAction::Transport(update));
    }
    assert_eq!(app.ui.view, View::Chat);
    let texts: Vec<_> = app.ui.transcript.iter().map(|l| l.text.clone()).collect();
    assert_eq!(texts, vec!["bob", "welcome"]);

    app.ui.set_input_value(InputField::Message, "hi bob");
    let commands = apply_action(&mut app, AppAction::SubmitInput);
    execute(&mut connections, commands);

    let closed = next_update(&mut updates).await;
    assert_eq!(closed.event, TransportEvent::Closed);
    apply_action(&mut app, AppAction::Transport(closed));
    assert!(app.session.as_ref().is_some_and(|s| s.is_closed()));
    assert_eq!(
        app.ui.banners.text(palaver::core::banner::BannerScope::Chat),
        Some(palaver::core::constants::CONNECTION_CLOSED_TEXT)
    );

    let answered = tokio::time::timeout(WAIT, handshake)
        .await
        .expect("timed out waiting for close reply")
        .expect("server task ended early");
    assert!(answered, "client did not answer the close frame");
}

#[tokio::test]
async fn refused_connection_reports_error_then_closed() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let (mut connections, mut updates) = ConnectionManager::new();
    connections.open(7, format!("ws://{addr}"));

    let first = next_update(&mut updates).await;
    assert_eq!(first.connection_id, 7);
    assert!(matches!(first.event, TransportEvent::Error(_)));
    let second = next_update(&mut updates).await;
    assert_eq!(second.event, TransportEvent::Closed);
}

#[tokio::test]
async fn abandoned_connection_rejects_sends() {
    let url = spawn_idle_server().await;
    let (mut connections, mut updates) = ConnectionManager::new();
    connections.open(1, url.clone());
    assert_eq!(next_update(&mut updates).await.event, TransportEvent::Opened);

    connections.open(2, url);
    assert_eq!(connections.active_id(), Some(2));
    let message = OutboundMessage::Message {
        message: "stale".into(),
    };
    assert!(connections.send(1, &message).is_err());
}

/// Accepts connections and holds them open without speaking.
async fn spawn_idle_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((stream, _)) = listener.accept().await {
            if let Ok(ws) = accept_async(stream).await {
                held.push(ws);
            }
        }
    });
    format!("ws://{addr}")
}
