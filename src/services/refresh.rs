use crate::services::feed_cache::FeedCache;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Fire-and-forget request to repopulate one category's cached rows
#[derive(Debug, Clone)]
pub struct RefreshCommand {
    pub category_id: String,
    pub endpoint_url: String,
}

/// Sender half used by request handlers to enqueue refreshes
#[derive(Clone)]
pub struct RefreshHandle {
    tx: mpsc::Sender<RefreshCommand>,
}

impl RefreshHandle {
    /// Enqueue a refresh without blocking the interactive path
    ///
    /// A full queue drops the command: the cache repopulates on the
    /// next poll anyway.
    pub fn enqueue(&self, command: RefreshCommand) -> bool {
        match self.tx.try_send(command) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Refresh queue full, dropping command: {}", e);
                false
            }
        }
    }
}

/// Spawn the worker that consumes refresh commands and re-primes the
/// feed cache, decoupled from request handling
pub fn spawn_refresh_worker(cache: Arc<FeedCache>, queue_depth: usize) -> RefreshHandle {
    let (tx, mut rx) = mpsc::channel::<RefreshCommand>(queue_depth);

    tokio::spawn(async move {
        while let Some(command) = rx.recv().await {
            tracing::debug!("Refreshing category {}", command.category_id);
            let count = cache
                .refresh(&command.category_id, &command.endpoint_url)
                .await;
            tracing::info!(
                "Refreshed category {} ({} rows)",
                command.category_id,
                count
            );
        }
        tracing::info!("Refresh worker stopped");
    });

    RefreshHandle { tx }
}
