//! In-process live updates keyed by tournament.

use super::api::{ApiResult, LiveChannel};
use crate::tournament::models::{Tournament, TournamentId};
use async_trait::async_trait;
use std::{
    collections::HashMap,
    sync::atomic::{AtomicU64, Ordering},
};
use tokio::sync::{RwLock, mpsc};

/// Default number of undelivered updates buffered per subscriber
pub const DEFAULT_SUBSCRIBER_CAPACITY: usize = 16;

/// A subscription to one tournament's updates
#[derive(Debug)]
pub struct LiveSubscription {
    pub tournament_id: TournamentId,
    pub subscriber_id: u64,
    pub receiver: mpsc::Receiver<Tournament>,
}

/// Fans canonical tournaments out to subscribers
///
/// Subscribers whose buffer is full miss the update; subscribers that have
/// dropped their receiver are removed on the next publish.
pub struct LiveUpdateHub {
    subscribers: RwLock<HashMap<TournamentId, HashMap<u64, mpsc::Sender<Tournament>>>>,
    next_subscriber_id: AtomicU64,
    capacity: usize,
}

impl LiveUpdateHub {
    /// Create a hub buffering `capacity` updates per subscriber
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            next_subscriber_id: AtomicU64::new(1),
            capacity: capacity.max(1),
        }
    }

    /// Subscribe to a tournament
    pub async fn subscribe(&self, tournament_id: TournamentId) -> LiveSubscription {
        let subscriber_id = self.next_subscriber_id.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = mpsc::channel(self.capacity);

        self.subscribers
            .write()
            .await
            .entry(tournament_id)
            .or_default()
            .insert(subscriber_id, sender);

        log::debug!("Subscriber {} subscribed to tournament {}", subscriber_id, tournament_id);

        LiveSubscription {
            tournament_id,
            subscriber_id,
            receiver,
        }
    }

    /// Remove a subscription
    pub async fn unsubscribe(&self, tournament_id: TournamentId, subscriber_id: u64) {
        let mut subscribers = self.subscribers.write().await;
        if let Some(tournament) = subscribers.get_mut(&tournament_id) {
            tournament.remove(&subscriber_id);
            if tournament.is_empty() {
                subscribers.remove(&tournament_id);
            }
        }
        log::debug!("Subscriber {} unsubscribed from tournament {}", subscriber_id, tournament_id);
    }

    /// Number of live subscribers of a tournament
    pub async fn subscriber_count(&self, tournament_id: TournamentId) -> usize {
        self.subscribers
            .read()
            .await
            .get(&tournament_id)
            .map_or(0, HashMap::len)
    }

    /// Deliver a tournament to its subscribers, returning how many received it
    pub async fn broadcast(&self, tournament: &Tournament) -> usize {
        let mut subscribers = self.subscribers.write().await;
        let Some(tournament_subscribers) = subscribers.get_mut(&tournament.id) else {
            return 0;
        };

        let mut delivered = 0;
        tournament_subscribers.retain(|subscriber_id, sender| {
            match sender.try_send(tournament.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(mpsc::error::TrySendError::Full(_)) => {
                    log::warn!("Subscriber {} channel full, dropping update", subscriber_id);
                    true
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    log::debug!("Subscriber {} disconnected, removing", subscriber_id);
                    false
                }
            }
        });

        if tournament_subscribers.is_empty() {
            subscribers.remove(&tournament.id);
        }
        delivered
    }
}

impl Default for LiveUpdateHub {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSCRIBER_CAPACITY)
    }
}

#[async_trait]
impl LiveChannel for LiveUpdateHub {
    async fn publish(&self, tournament: &Tournament) -> ApiResult<()> {
        let delivered = self.broadcast(tournament).await;
        log::debug!("Published tournament {} to {} subscriber(s)", tournament.id, delivered);
        Ok(())
    }
}
