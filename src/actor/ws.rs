//! WebSocket Actor - Bidirectional Communication
//!
//! This actor is responsible for:
//! - Managing WebSocket client connections
//! - Broadcasting reload/error messages to all connected clients
//! - Receiving scroll reports and running each client's section tracker
//! - Pushing active-section changes back for nav highlighting
//!
//! # Architecture
//!
//! ```text
//! BuildActor --[Reload/Error]--> WsActor --[broadcast]--> Clients
//!                                   ^                        |
//!                                   +-----[scroll report]----+
//!                                   |
//!                            ActiveSectionTracker (one per client)
//! ```
//!
//! Each client owns one `ActiveSectionTracker`; reports are evaluated on
//! the reader thread in arrival order and an `active` push goes out only
//! when the evaluated id actually changed. Disconnecting drops the
//! tracker and the client's `ACTIVE_SECTIONS` entry, so nothing keeps
//! evaluating bounds for a page nobody is viewing.

use std::net::TcpStream;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tungstenite::WebSocket;
use tungstenite::protocol::Message;

use super::messages::WsMsg;
use crate::reload::active::{ACTIVE_SECTIONS, ClientId};
use crate::reload::message::LiveReloadMessage;
use crate::scrollspy::{ActiveSectionTracker, ScrollSnapshot, SectionRegistry};

/// Client id allocator (process-wide, never reused).
static NEXT_CLIENT_ID: AtomicU64 = AtomicU64::new(1);

/// A registered WebSocket client with its own section tracker
struct RegisteredClient {
    id: ClientId,
    ws: WebSocket<TcpStream>,
    tracker: ActiveSectionTracker,
}

/// Pending rebuild error, re-sent to clients that connect after the fact
struct PendingError {
    path: String,
    error: String,
}

/// WebSocket Actor - manages client connections and broadcasts
pub struct WsActor {
    /// Channel to receive messages
    rx: mpsc::Receiver<WsMsg>,
    /// Connected clients (shared with the reader thread)
    clients: Arc<Mutex<Vec<RegisteredClient>>>,
    /// Tracker template for new clients (registry + activation line)
    tracker_template: ActiveSectionTracker,
    /// Pending error to send to new clients
    pending_error: Arc<Mutex<Option<PendingError>>>,
}

impl WsActor {
    /// Create a new WsActor for the given section registry.
    pub fn new(rx: mpsc::Receiver<WsMsg>, registry: SectionRegistry, activation_line: f64) -> Self {
        Self {
            rx,
            clients: Arc::new(Mutex::new(Vec::new())),
            tracker_template: ActiveSectionTracker::new(registry)
                .with_activation_line(activation_line),
            pending_error: Arc::new(Mutex::new(None)),
        }
    }

    /// Run the actor event loop
    pub async fn run(mut self) {
        // Spawn a background thread to poll client messages
        let clients_for_reader = Arc::clone(&self.clients);
        std::thread::spawn(move || {
            Self::client_reader_loop(clients_for_reader);
        });

        while let Some(msg) = self.rx.recv().await {
            match msg {
                WsMsg::Reload { reason } => {
                    crate::debug!("ws"; "sending reload: {}", reason);
                    let hr_msg = LiveReloadMessage::reload_with_reason(&reason);
                    self.broadcast(Message::Text(hr_msg.to_json().into()));
                }

                WsMsg::Error { path, error } => {
                    // Cache error for clients connecting after the failure
                    *self.pending_error.lock() = Some(PendingError {
                        path: path.clone(),
                        error: error.clone(),
                    });
                    let hr_msg = LiveReloadMessage::error(&path, &error);
                    self.broadcast(Message::Text(hr_msg.to_json().into()));
                }

                WsMsg::ClearError => {
                    *self.pending_error.lock() = None;
                    let hr_msg = LiveReloadMessage::clear_error();
                    self.broadcast(Message::Text(hr_msg.to_json().into()));
                }

                WsMsg::AddClient(stream) => {
                    self.add_client(stream);
                }

                WsMsg::Shutdown => {
                    crate::debug!("ws"; "shutting down");
                    let mut clients = self.clients.lock();
                    for mut client in clients.drain(..) {
                        let _ = client.ws.close(None);
                    }
                    ACTIVE_SECTIONS.clear();
                    break;
                }
            }
        }
    }

    /// Add a new client connection
    fn add_client(&self, stream: TcpStream) {
        // Keep blocking mode during handshake, switch to non-blocking after
        match tungstenite::accept(stream) {
            Ok(mut ws) => {
                let _ = ws.get_ref().set_nonblocking(true);

                // Send connected message
                let connected_msg = LiveReloadMessage::connected();
                if let Err(e) = ws.send(Message::Text(connected_msg.to_json().into())) {
                    crate::log!("ws"; "failed to send connected message: {}", e);
                    return;
                }

                // Send pending error if any
                if let Some(ref err) = *self.pending_error.lock() {
                    let hr_msg = LiveReloadMessage::error(&err.path, &err.error);
                    if let Err(e) = ws.send(Message::Text(hr_msg.to_json().into())) {
                        crate::log!("ws"; "failed to send pending error: {}", e);
                    }
                }

                let id = NEXT_CLIENT_ID.fetch_add(1, Ordering::Relaxed);
                let tracker = self.tracker_template.clone();

                // The nav starts on the tracker's initial section
                let initial = LiveReloadMessage::active(tracker.active().clone());
                let _ = ws.send(Message::Text(initial.to_json().into()));
                ACTIVE_SECTIONS.set(id, tracker.active().clone());

                let mut clients = self.clients.lock();
                crate::debug!("ws"; "client {} connected (total: {})", id, clients.len() + 1);
                clients.push(RegisteredClient { id, ws, tracker });
            }
            Err(e) => {
                crate::log!("ws"; "handshake failed: {}", e);
            }
        }
    }

    /// Background thread reading client messages (non-blocking poll).
    ///
    /// Scroll reports are processed to completion in arrival order per
    /// client; the tracker is only touched from this thread.
    fn client_reader_loop(clients: Arc<Mutex<Vec<RegisteredClient>>>) {
        loop {
            std::thread::sleep(std::time::Duration::from_millis(50));

            let mut clients_guard = clients.lock();
            let mut disconnected = Vec::new();

            for (i, client) in clients_guard.iter_mut().enumerate() {
                match client.ws.read() {
                    Ok(Message::Text(text)) => {
                        if let Some(reply) = Self::handle_client_message(client, &text) {
                            if client.ws.send(Message::Text(reply.to_json().into())).is_err() {
                                disconnected.push(i);
                            }
                        }
                    }
                    Ok(Message::Close(_)) => {
                        disconnected.push(i);
                    }
                    Err(tungstenite::Error::Io(ref e))
                        if e.kind() == std::io::ErrorKind::WouldBlock =>
                    {
                        // No data available, continue
                    }
                    Err(_) => {
                        disconnected.push(i);
                    }
                    _ => {}
                }
            }

            // Remove disconnected clients and their active-section entries
            for i in disconnected.into_iter().rev() {
                ACTIVE_SECTIONS.remove(clients_guard[i].id);
                clients_guard.remove(i);
            }

            if clients_guard.is_empty() {
                ACTIVE_SECTIONS.clear();
            }
        }
    }

    /// Handle one text message from a client.
    ///
    /// Returns a reply to send back, if any. Malformed messages are
    /// dropped silently; a broken report must never take the page down.
    fn handle_client_message(
        client: &mut RegisteredClient,
        text: &str,
    ) -> Option<LiveReloadMessage> {
        match LiveReloadMessage::from_json(text)? {
            LiveReloadMessage::Scroll { offset, sections } => {
                let snapshot = ScrollSnapshot::new(offset, sections);
                let before = client.tracker.active().clone();
                client.tracker.on_scroll(&snapshot);

                let after = client.tracker.active();
                if *after != before {
                    ACTIVE_SECTIONS.set(client.id, after.clone());
                    crate::debug!(
                        "ws"; "client {}: #{} active ({} viewing)",
                        client.id, after, ACTIVE_SECTIONS.viewers()
                    );
                    return Some(LiveReloadMessage::active(after.clone()));
                }
                None
            }
            LiveReloadMessage::Pong { .. } => None,
            // Clients don't originate other message types; ignore them
            _ => None,
        }
    }

    /// Broadcast a message to all connected clients
    fn broadcast(&self, msg: Message) {
        let mut clients = self.clients.lock();
        let count = clients.len();

        if count == 0 {
            crate::debug!("ws"; "no clients connected");
            return;
        }

        clients.retain_mut(|client| match client.ws.send(msg.clone()) {
            Ok(_) => true,
            Err(e) => {
                crate::debug!("ws"; "client {} disconnected: {}", client.id, e);
                ACTIVE_SECTIONS.remove(client.id);
                false
            }
        });
        crate::debug!("ws"; "broadcast to {} clients", count);
    }
}
