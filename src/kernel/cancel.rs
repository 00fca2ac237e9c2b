use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::event::Event;
use super::state::ActionId;

/// Confirmation deadlines. The kernel only decides *that* a timer exists;
/// the tokio tasks live here, in the effect layer.
#[derive(Debug)]
pub struct ConfirmationTimers {
    tx: mpsc::Sender<Event>,
    armed: HashMap<ActionId, CancellationToken>,
}

impl ConfirmationTimers {
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self {
            tx,
            armed: HashMap::new(),
        }
    }

    /// Starts (or restarts) the deadline for `action_id`.
    pub fn arm(&mut self, action_id: ActionId, after: Duration) {
        self.disarm(action_id);

        let token = CancellationToken::new();
        let guard = token.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                _ = guard.cancelled() => {
                    debug!("Confirmation timer {} disarmed", action_id);
                }
                _ = tokio::time::sleep(after) => {
                    if let Err(e) = tx.send(Event::ConfirmationExpired { action_id }).await {
                        warn!("Failed to deliver confirmation expiry: {}", e);
                    }
                }
            }
        });

        self.armed.insert(action_id, token);
    }

    pub fn disarm(&mut self, action_id: ActionId) {
        if let Some(token) = self.armed.remove(&action_id) {
            token.cancel();
        }
    }

    pub fn disarm_all(&mut self) {
        for (_, token) in self.armed.drain() {
            token.cancel();
        }
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }
}

impl Drop for ConfirmationTimers {
    fn drop(&mut self) {
        self.disarm_all();
    }
}
