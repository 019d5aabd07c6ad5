//! Transport simulator integration tests
//! Run with: cargo test --test transport_test

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use messagesphere::application::transport::{ChatSocket, Origin, TransportTiming};
use messagesphere::domain::entities::{Contact, User};
use messagesphere::domain::traits::{CurrentActor, Notifier};

/// Actor provider pinned to a fixed user (or nobody)
struct FixedActor(Option<User>);

impl CurrentActor for FixedActor {
    fn current_user(&self) -> Option<User> {
        self.0.clone()
    }
}

/// Notifier that records every notice instead of printing it
#[derive(Default)]
struct RecordingNotifier {
    notices: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    fn notices(&self) -> Vec<String> {
        self.notices.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, text: &str) {
        self.notices.lock().unwrap().push(text.to_string());
    }

    fn success(&self, text: &str) {
        self.notices.lock().unwrap().push(text.to_string());
    }
}

/// Everything a listener can observe, in observation order
#[derive(Debug, Clone, PartialEq, Eq)]
enum Event {
    Typing(String, bool),
    Message {
        sender: String,
        receiver: String,
        content: String,
        read: bool,
    },
    Presence(String, bool),
}

type EventLog = Arc<Mutex<Vec<Event>>>;

fn socket_for(actor: Option<User>) -> (Arc<ChatSocket>, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let socket = Arc::new(ChatSocket::new(
        Arc::new(FixedActor(actor)),
        notifier.clone(),
    ));
    (socket, notifier)
}

fn demo_user() -> User {
    User::new("u1", "Demo User", "demo@example.com")
}

fn record_all(socket: &ChatSocket, log: &EventLog) {
    socket.on_typing({
        let log = log.clone();
        move |contact_id, is_typing| {
            log.lock()
                .unwrap()
                .push(Event::Typing(contact_id.to_string(), is_typing));
        }
    });
    socket.on_message({
        let log = log.clone();
        move |message| {
            log.lock().unwrap().push(Event::Message {
                sender: message.sender_id.clone(),
                receiver: message.receiver_id.clone(),
                content: message.content.clone(),
                read: message.read,
            });
        }
    });
    socket.on_presence({
        let log = log.clone();
        move |contact_id, online| {
            log.lock()
                .unwrap()
                .push(Event::Presence(contact_id.to_string(), online));
        }
    });
}

#[tokio::test(start_paused = true)]
async fn test_connect_and_disconnect_are_idempotent() {
    let (socket, _) = socket_for(Some(demo_user()));

    assert!(!socket.is_connected());
    socket.connect().await;
    assert!(socket.is_connected());
    socket.connect().await;
    assert!(socket.is_connected());

    socket.disconnect();
    assert!(!socket.is_connected());
    socket.disconnect();
    assert!(!socket.is_connected());
}

#[tokio::test(start_paused = true)]
async fn test_send_while_disconnected_returns_none_and_fires_nothing() {
    let (socket, notifier) = socket_for(Some(demo_user()));
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    record_all(&socket, &log);

    assert!(socket.send_message("c1", "hi", Origin::User).is_none());

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(notifier.notices(), vec!["Not connected to the server"]);
}

#[tokio::test(start_paused = true)]
async fn test_send_without_actor_returns_none_and_notifies() {
    let (socket, notifier) = socket_for(None);
    socket.connect().await;
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    record_all(&socket, &log);

    assert!(socket.send_message("c1", "hi", Origin::User).is_none());

    assert!(log.lock().unwrap().is_empty());
    assert_eq!(notifier.notices(), vec!["User not authenticated"]);
}

#[tokio::test(start_paused = true)]
async fn test_outbound_send_reaches_listeners_with_a_fresh_id() {
    let (socket, notifier) = socket_for(Some(demo_user()));
    socket.connect().await;
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    record_all(&socket, &log);

    let message = socket
        .send_message("c1", "hi", Origin::User)
        .expect("connected send should succeed");

    assert_eq!(message.sender_id, "u1");
    assert_eq!(message.receiver_id, "c1");
    assert_eq!(message.content, "hi");
    assert!(!message.read);
    assert!(message.id.starts_with("msg-"));
    assert_eq!(
        log.lock().unwrap().as_slice(),
        [Event::Message {
            sender: "u1".to_string(),
            receiver: "c1".to_string(),
            content: "hi".to_string(),
            read: false,
        }]
    );
    assert!(notifier.notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_simulated_origin_swaps_roles_and_premarks_read() {
    // Deliberately not connected: simulated-origin sends bypass that guard
    let (socket, notifier) = socket_for(Some(demo_user()));

    let message = socket
        .send_message("c1", "yo", Origin::Contact)
        .expect("simulated-origin send should succeed while disconnected");

    assert_eq!(message.sender_id, "c1");
    assert_eq!(message.receiver_id, "u1");
    assert!(message.read);
    assert!(notifier.notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_listeners_see_exactly_the_events_in_their_window() {
    let (socket, _) = socket_for(Some(demo_user()));
    socket.connect().await;

    let first: EventLog = Arc::new(Mutex::new(Vec::new()));
    let second: EventLog = Arc::new(Mutex::new(Vec::new()));

    let sub_first = socket.on_message({
        let log = first.clone();
        move |message| log.lock().unwrap().push(Event::Message {
            sender: message.sender_id.clone(),
            receiver: message.receiver_id.clone(),
            content: message.content.clone(),
            read: message.read,
        })
    });

    socket.send_message("c1", "e1", Origin::User).unwrap();

    socket.on_message({
        let log = second.clone();
        move |message| log.lock().unwrap().push(Event::Message {
            sender: message.sender_id.clone(),
            receiver: message.receiver_id.clone(),
            content: message.content.clone(),
            read: message.read,
        })
    });

    socket.send_message("c1", "e2", Origin::User).unwrap();
    socket.unsubscribe(sub_first);
    socket.send_message("c1", "e3", Origin::User).unwrap();

    let contents = |log: &EventLog| -> Vec<String> {
        log.lock()
            .unwrap()
            .iter()
            .map(|event| match event {
                Event::Message { content, .. } => content.clone(),
                other => panic!("unexpected event: {:?}", other),
            })
            .collect()
    };

    assert_eq!(contents(&first), vec!["e1", "e2"]);
    assert_eq!(contents(&second), vec!["e2", "e3"]);
}

#[tokio::test(start_paused = true)]
async fn test_unsubscribe_twice_is_a_no_op() {
    let (socket, _) = socket_for(Some(demo_user()));
    socket.connect().await;

    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    let sub = socket.on_typing({
        let log = log.clone();
        move |id, typing| log.lock().unwrap().push(Event::Typing(id.to_string(), typing))
    });

    socket.unsubscribe(sub);
    socket.unsubscribe(sub);
    socket.send_typing("c1", true);

    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_typing_indicator_reports_the_sender_not_the_receiver() {
    let (socket, _) = socket_for(Some(demo_user()));
    socket.connect().await;
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    record_all(&socket, &log);

    socket.send_typing("c1", true);
    socket.send_typing("some-other-receiver", false);

    assert_eq!(
        log.lock().unwrap().as_slice(),
        [
            Event::Typing("u1".to_string(), true),
            Event::Typing("u1".to_string(), false),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_typing_indicator_is_silent_when_disconnected_or_signed_out() {
    let (socket, notifier) = socket_for(Some(demo_user()));
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    record_all(&socket, &log);

    socket.send_typing("c1", true);

    let (signed_out, _) = socket_for(None);
    signed_out.connect().await;
    record_all(&signed_out, &log);
    signed_out.send_typing("c1", true);

    assert!(log.lock().unwrap().is_empty());
    assert!(notifier.notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_simulate_inbound_orders_typing_then_message() {
    let (socket, _) = socket_for(Some(demo_user()));
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    record_all(&socket, &log);

    let contact = Contact::new("c1", "Contact One", "c1@example.com");
    let handle = socket
        .simulate_inbound(&contact, "yo")
        .expect("actor is signed in");

    // Typing-start fans out synchronously, before the delay
    assert_eq!(
        log.lock().unwrap().as_slice(),
        [Event::Typing("c1".to_string(), true)]
    );

    handle.await.unwrap();

    assert_eq!(
        log.lock().unwrap().as_slice(),
        [
            Event::Typing("c1".to_string(), true),
            Event::Typing("c1".to_string(), false),
            Event::Message {
                sender: "c1".to_string(),
                receiver: "u1".to_string(),
                content: "yo".to_string(),
                read: false,
            },
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_simulate_inbound_without_actor_is_a_no_op() {
    let (socket, notifier) = socket_for(None);
    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    record_all(&socket, &log);

    let contact = Contact::new("c1", "Contact One", "c1@example.com");
    assert!(socket.simulate_inbound(&contact, "yo").is_none());

    assert!(log.lock().unwrap().is_empty());
    assert!(notifier.notices().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_ten_thousand_sends_never_collide_on_id() {
    let (socket, _) = socket_for(Some(demo_user()));
    socket.connect().await;

    let mut ids = HashSet::new();
    for _ in 0..10_000 {
        let message = socket.send_message("c1", "hi", Origin::User).unwrap();
        assert!(ids.insert(message.id), "duplicate message id");
    }
    assert_eq!(ids.len(), 10_000);
}

#[tokio::test(start_paused = true)]
async fn test_presence_drift_picks_from_the_roster() {
    let timing = TransportTiming {
        connect_delay_ms: 0,
        typing_delay_ms: 0..=0,
        presence_interval_ms: 100..=200,
    };
    let notifier = Arc::new(RecordingNotifier::default());
    let socket = Arc::new(
        ChatSocket::new(Arc::new(FixedActor(Some(demo_user()))), notifier).with_timing(timing),
    );

    let log: EventLog = Arc::new(Mutex::new(Vec::new()));
    record_all(&socket, &log);

    let roster = vec!["2".to_string(), "3".to_string(), "4".to_string()];
    let drift = socket.spawn_presence_drift(roster.clone());

    tokio::time::sleep(std::time::Duration::from_secs(2)).await;
    drift.abort();

    let events = log.lock().unwrap().clone();
    assert!(!events.is_empty(), "presence drift never fired");
    for event in events {
        match event {
            Event::Presence(id, _) => assert!(roster.contains(&id)),
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
