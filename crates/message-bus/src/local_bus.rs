//! # Local Bus
//!
//! In-process dispatcher that routes messages to registered handlers and
//! synthesizes replies through the message's own reply factory when no
//! handler can answer.

use crate::error::{BusError, ErrorCode};
use crate::message::{Message, Reply};
use crate::BUS_TRACE_LEVEL;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use storage_telemetry::metric_inc;
use storage_telemetry::metrics::{BUS_MESSAGES_SENT, BUS_REPLIES_SYNTHESIZED};
use tokio::sync::RwLock;
use tracing::{debug, warn};

/// Destination-side handler for messages of type `M`.
#[async_trait]
pub trait MessageHandler<M: Message + 'static>: Send + Sync {
    /// Answer `message`.
    ///
    /// On error the bus builds the reply itself via `message.make_reply()`
    /// and attaches the returned error, so the message is only borrowed.
    async fn handle(&self, message: &mut M) -> Result<M::Reply, BusError>;
}

/// In-memory implementation of the bus.
///
/// Suitable for single-process operation and tests; a networked transport
/// would route by service name to remote nodes instead.
pub struct LocalBus<M: Message + 'static> {
    /// Registered handlers by route.
    routes: RwLock<HashMap<String, Arc<dyn MessageHandler<M>>>>,

    /// Total messages accepted for delivery.
    messages_sent: AtomicU64,

    /// Replies the bus had to manufacture itself.
    replies_synthesized: AtomicU64,

    shutdown: AtomicBool,
}

impl<M: Message + 'static> LocalBus<M> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(HashMap::new()),
            messages_sent: AtomicU64::new(0),
            replies_synthesized: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Register `handler` for `route`, replacing any previous handler.
    pub async fn register(&self, route: impl Into<String>, handler: Arc<dyn MessageHandler<M>>) {
        let route = route.into();
        debug!(route = %route, "Handler registered");
        self.routes.write().await.insert(route, handler);
    }

    /// Remove the handler for `route`. Returns whether one was registered.
    pub async fn unregister(&self, route: &str) -> bool {
        let removed = self.routes.write().await.remove(route).is_some();
        debug!(route = %route, removed, "Handler unregistered");
        removed
    }

    /// Deliver `message` to `route` and return its reply.
    ///
    /// - With a handler registered, the handler's reply is returned. A handler
    ///   failure yields a synthesized reply carrying `HandlerFailed`.
    /// - Without a handler, the reply is synthesized and carries
    ///   `NoAddressForService`.
    /// - If `time_remaining` is set and elapses while the handler runs, the
    ///   reply is synthesized and carries `Timeout`.
    ///
    /// # Errors
    ///
    /// - `Shutdown` once [`LocalBus::shutdown`] has been called.
    /// - `ReplyFactoryFailed` if a reply had to be synthesized and the
    ///   message's reply factory failed.
    pub async fn send(&self, route: &str, mut message: M) -> Result<M::Reply, BusError> {
        if self.shutdown.load(Ordering::Acquire) {
            return Err(BusError::new(ErrorCode::Shutdown, "bus is shut down"));
        }

        self.messages_sent.fetch_add(1, Ordering::Relaxed);
        metric_inc!(BUS_MESSAGES_SENT);
        message
            .context_mut()
            .trace
            .trace(BUS_TRACE_LEVEL, format!("Sending to route '{route}'"));

        let handler = self.routes.read().await.get(route).cloned();
        let Some(handler) = handler else {
            return self.synthesize(
                message,
                BusError::new(
                    ErrorCode::NoAddressForService,
                    format!("No handler registered for route '{route}'"),
                ),
            );
        };

        let outcome = match message.context().time_remaining {
            Some(limit) => {
                match tokio::time::timeout(limit, handler.handle(&mut message)).await {
                    Ok(outcome) => outcome,
                    Err(_elapsed) => {
                        return self.synthesize(
                            message,
                            BusError::new(
                                ErrorCode::Timeout,
                                format!("No reply from route '{route}' within {limit:?}"),
                            ),
                        );
                    }
                }
            }
            None => handler.handle(&mut message).await,
        };

        match outcome {
            Ok(reply) => {
                debug!(
                    route = %route,
                    protocol = message.protocol(),
                    message_type = message.message_type(),
                    "Reply delivered"
                );
                Ok(reply)
            }
            Err(err) => self.synthesize(
                message,
                BusError::new(ErrorCode::HandlerFailed, err.message),
            ),
        }
    }

    fn synthesize(&self, mut message: M, error: BusError) -> Result<M::Reply, BusError> {
        let mut reply = message.make_reply().map_err(|e| {
            warn!(
                protocol = message.protocol(),
                message_type = message.message_type(),
                error = %e,
                "Reply factory failed"
            );
            BusError::new(ErrorCode::ReplyFactoryFailed, e.to_string())
        })?;

        warn!(
            protocol = message.protocol(),
            message_type = message.message_type(),
            error = %error,
            "Reply synthesized by bus"
        );

        self.replies_synthesized.fetch_add(1, Ordering::Relaxed);
        metric_inc!(BUS_REPLIES_SYNTHESIZED, &[error.code.as_str()]);
        reply.add_error(error);
        Ok(reply)
    }

    /// Refuse all further sends.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        debug!("Local bus shut down");
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    pub fn messages_sent(&self) -> u64 {
        self.messages_sent.load(Ordering::Relaxed)
    }

    pub fn replies_synthesized(&self) -> u64 {
        self.replies_synthesized.load(Ordering::Relaxed)
    }

    pub async fn route_count(&self) -> usize {
        self.routes.read().await.len()
    }
}

impl<M: Message + 'static> Default for LocalBus<M> {
    fn default() -> Self {
        Self::new()
    }
}
