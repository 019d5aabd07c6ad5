//! Simulated real-time transport - stands in for a socket connection
//!
//! Owns the connection flag and three independent listener registries
//! (message, typing, presence), and drives the two demo simulations:
//! typing-then-message delivery from a contact, and random presence drift.
//! Fan-out is synchronous and in registration order; the only failure modes
//! are the guarded no-ops (not connected, not authenticated), surfaced as a
//! user notice and a `None` return.

pub mod registry;

use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;

use crate::domain::entities::{Contact, Message};
use crate::domain::traits::{CurrentActor, Notifier, Scheduler, TokioScheduler};
use registry::Registry;

pub use registry::{EventKind, Subscription};

/// Who originated a send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Outbound message from the signed-in user
    User,
    /// Simulated inbound reply: sender/receiver are swapped and the message
    /// is pre-marked read
    Contact,
}

pub type MessageListener = Arc<dyn Fn(&Message) + Send + Sync>;
pub type TypingListener = Arc<dyn Fn(&str, bool) + Send + Sync>;
pub type PresenceListener = Arc<dyn Fn(&str, bool) + Send + Sync>;

/// Timing bounds for the simulated transport, in milliseconds
#[derive(Debug, Clone)]
pub struct TransportTiming {
    pub connect_delay_ms: u64,
    pub typing_delay_ms: RangeInclusive<u64>,
    pub presence_interval_ms: RangeInclusive<u64>,
}

impl Default for TransportTiming {
    fn default() -> Self {
        Self {
            connect_delay_ms: 1000,
            typing_delay_ms: 2000..=4000,
            presence_interval_ms: 30_000..=60_000,
        }
    }
}

/// Simulated socket connection
pub struct ChatSocket {
    connected: AtomicBool,
    next_token: AtomicU64,
    message_listeners: Registry<MessageListener>,
    typing_listeners: Registry<TypingListener>,
    presence_listeners: Registry<PresenceListener>,
    actor: Arc<dyn CurrentActor>,
    notifier: Arc<dyn Notifier>,
    scheduler: Arc<dyn Scheduler>,
    timing: TransportTiming,
}

impl ChatSocket {
    pub fn new(actor: Arc<dyn CurrentActor>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            connected: AtomicBool::new(false),
            next_token: AtomicU64::new(0),
            message_listeners: Registry::new(),
            typing_listeners: Registry::new(),
            presence_listeners: Registry::new(),
            actor,
            notifier,
            scheduler: Arc::new(TokioScheduler),
            timing: TransportTiming::default(),
        }
    }

    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    pub fn with_timing(mut self, timing: TransportTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Connect after a simulated handshake delay. Always succeeds; calling
    /// while already connected just re-resolves.
    pub async fn connect(&self) {
        self.scheduler
            .sleep(Duration::from_millis(self.timing.connect_delay_ms))
            .await;
        self.connected.store(true, Ordering::SeqCst);
        tracing::info!("Socket connected");
    }

    /// Drop the connection immediately. Idempotent.
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
        tracing::info!("Socket disconnected");
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Register a message listener; fires for every message event raised
    /// between registration and unsubscription, in raise order.
    pub fn on_message(&self, listener: impl Fn(&Message) + Send + Sync + 'static) -> Subscription {
        let token = self.fresh_token();
        self.message_listeners.insert(token, Arc::new(listener));
        Subscription {
            kind: EventKind::Message,
            token,
        }
    }

    /// Register a typing listener; receives `(contact_id, is_typing)`
    pub fn on_typing(&self, listener: impl Fn(&str, bool) + Send + Sync + 'static) -> Subscription {
        let token = self.fresh_token();
        self.typing_listeners.insert(token, Arc::new(listener));
        Subscription {
            kind: EventKind::Typing,
            token,
        }
    }

    /// Register a presence listener; receives `(contact_id, is_online)`
    pub fn on_presence(
        &self,
        listener: impl Fn(&str, bool) + Send + Sync + 'static,
    ) -> Subscription {
        let token = self.fresh_token();
        self.presence_listeners.insert(token, Arc::new(listener));
        Subscription {
            kind: EventKind::Presence,
            token,
        }
    }

    /// Remove a listener. Takes effect for future events only; a fan-out
    /// already in flight keeps its snapshot. No-op if already removed.
    pub fn unsubscribe(&self, sub: Subscription) {
        match sub.kind {
            EventKind::Message => self.message_listeners.remove(sub.token),
            EventKind::Typing => self.typing_listeners.remove(sub.token),
            EventKind::Presence => self.presence_listeners.remove(sub.token),
        }
    }

    /// Send a message and fan it out to every message listener.
    ///
    /// `Origin::User` requires a live connection and a signed-in actor; on
    /// violation a notice is emitted and no event is raised. With
    /// `Origin::Contact` the receiver argument becomes the sender, the
    /// current actor becomes the receiver, and the message is pre-marked
    /// read - an inbound automated reply using the same call shape.
    pub fn send_message(&self, receiver_id: &str, content: &str, origin: Origin) -> Option<Message> {
        if origin == Origin::User && !self.is_connected() {
            self.notifier.error("Not connected to the server");
            return None;
        }

        let Some(user) = self.actor.current_user() else {
            if origin == Origin::User {
                self.notifier.error("User not authenticated");
            }
            return None;
        };

        let message = match origin {
            Origin::User => Message::new(&user.id, receiver_id, content),
            Origin::Contact => Message::new(receiver_id, &user.id, content).mark_read(),
        };

        for listener in self.message_listeners.snapshot() {
            listener(&message);
        }

        Some(message)
    }

    /// Broadcast a typing indicator carrying the *actor's* id. The receiver
    /// argument is accepted for call-shape parity but delivery is not
    /// targeted; filtering by conversation is the caller's concern.
    /// Silent no-op when disconnected or signed out.
    pub fn send_typing(&self, _receiver_id: &str, is_typing: bool) {
        if !self.is_connected() {
            return;
        }
        let Some(user) = self.actor.current_user() else {
            return;
        };

        for listener in self.typing_listeners.snapshot() {
            listener(&user.id, is_typing);
        }
    }

    /// Simulate a contact replying: a typing-start pulse now, then after a
    /// randomized delay a typing-stop followed in the same tick by the
    /// message (unread, sender = contact, receiver = actor). Typing-stop
    /// always lands before the message for a given call; no ordering holds
    /// across interleaved calls for different contacts.
    ///
    /// Returns `None` when no actor is signed in. The handle resolves once
    /// the delayed half has been delivered.
    pub fn simulate_inbound(
        self: &Arc<Self>,
        contact: &Contact,
        content: &str,
    ) -> Option<JoinHandle<()>> {
        let user = self.actor.current_user()?;
        let message = Message::new(&contact.id, &user.id, content);

        for listener in self.typing_listeners.snapshot() {
            listener(&contact.id, true);
        }

        let socket = Arc::clone(self);
        let contact_id = contact.id.clone();
        let delay = jitter(&self.timing.typing_delay_ms);
        Some(tokio::spawn(async move {
            socket.scheduler.sleep(delay).await;
            for listener in socket.typing_listeners.snapshot() {
                listener(&contact_id, false);
            }
            for listener in socket.message_listeners.snapshot() {
                listener(&message);
            }
        }))
    }

    /// Randomly flip one roster contact's presence on a re-randomized
    /// interval, forever. Abort the returned handle to stop.
    pub fn spawn_presence_drift(self: &Arc<Self>, roster: Vec<String>) -> JoinHandle<()> {
        let socket = Arc::clone(self);
        tokio::spawn(async move {
            if roster.is_empty() {
                return;
            }
            loop {
                let interval = jitter(&socket.timing.presence_interval_ms);
                socket.scheduler.sleep(interval).await;

                let (contact_id, online) = {
                    let mut rng = rand::thread_rng();
                    let index = rng.gen_range(0..roster.len());
                    (roster[index].clone(), rng.gen_bool(0.5))
                };

                tracing::debug!("Presence drift: {} -> {}", contact_id, online);
                for listener in socket.presence_listeners.snapshot() {
                    listener(&contact_id, online);
                }
            }
        })
    }

    fn fresh_token(&self) -> u64 {
        self.next_token.fetch_add(1, Ordering::Relaxed)
    }
}

/// Uniformly random duration within the configured bounds
fn jitter(range: &RangeInclusive<u64>) -> Duration {
    let ms = rand::thread_rng().gen_range(range.clone());
    Duration::from_millis(ms)
}
