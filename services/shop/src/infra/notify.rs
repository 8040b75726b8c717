//! Best-effort notification outbox.
//!
//! Use cases push [`Notification`]s onto an unbounded channel after their
//! durable write commits. A single [`NotificationDispatcher`] task drains the
//! channel and delivers every message concurrently, one attempt each. Failures
//! are logged and dropped; nothing flows back to the request that enqueued.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::domain::repository::{ChatGateway, Mailer, NotificationPort};
use crate::domain::types::Notification;

/// Sending half of the outbox. Cheap to clone into every request.
#[derive(Clone)]
pub struct NotificationQueue {
    tx: mpsc::UnboundedSender<Notification>,
}

impl NotificationQueue {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl NotificationPort for NotificationQueue {
    fn enqueue(&self, notification: Notification) {
        if let Err(mpsc::error::SendError(dropped)) = self.tx.send(notification) {
            tracing::warn!(
                channel = dropped.channel(),
                target = dropped.target(),
                "notification queue closed, dropping"
            );
        }
    }
}

pub struct NotificationDispatcher<M: Mailer, C: ChatGateway> {
    mailer: Arc<M>,
    chat: Arc<C>,
}

impl<M: Mailer, C: ChatGateway> NotificationDispatcher<M, C> {
    pub fn new(mailer: M, chat: C) -> Self {
        Self {
            mailer: Arc::new(mailer),
            chat: Arc::new(chat),
        }
    }

    /// Deliver until every queue handle is dropped, then wait for in-flight sends.
    pub async fn run(self, mut rx: mpsc::UnboundedReceiver<Notification>) {
        let mut in_flight = JoinSet::new();
        loop {
            tokio::select! {
                received = rx.recv() => match received {
                    Some(notification) => {
                        in_flight.spawn(deliver(
                            Arc::clone(&self.mailer),
                            Arc::clone(&self.chat),
                            notification,
                        ));
                    }
                    None => break,
                },
                Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                    if let Err(e) = joined {
                        tracing::error!(error = %e, "notification task aborted");
                    }
                }
            }
        }
        while let Some(joined) = in_flight.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "notification task aborted");
            }
        }
        tracing::info!("notification dispatcher stopped");
    }
}

async fn deliver<M: Mailer, C: ChatGateway>(
    mailer: Arc<M>,
    chat: Arc<C>,
    notification: Notification,
) {
    let result = match &notification {
        Notification::Email { to, subject, body } => mailer.send(to, subject, body).await,
        Notification::Chat { phone, text } => chat.send(phone, text).await,
    };
    match result {
        Ok(()) => tracing::info!(
            channel = notification.channel(),
            target = notification.target(),
            "notification delivered"
        ),
        Err(e) => tracing::warn!(
            channel = notification.channel(),
            target = notification.target(),
            error = %e,
            "notification delivery failed"
        ),
    }
}
