use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::error::LookupError;
use crate::models::destination::Destination;
use crate::services::ports::DestinationLookup;

use super::controller::{DestinationSearchController, SearchDispatch, SearchSnapshot};
use super::SearchConfig;

type LookupResponse = (u64, Result<Vec<Destination>, LookupError>);

/// Runs a [`DestinationSearchController`] on the tokio runtime.
///
/// Keystrokes go in through the [`SearchHandle`]; the debounce timer and the
/// lookups are awaited inside one task, and every state change is published
/// on a watch channel. Lookups run on the blocking pool because the stores
/// are synchronous.
pub struct SearchDriver;

impl SearchDriver {
    /// Spawn the search task. Must be called from within a tokio runtime.
    pub fn spawn<L>(lookup: Arc<L>, config: SearchConfig) -> SearchHandle
    where
        L: DestinationLookup + Send + Sync + 'static,
    {
        let (query_tx, query_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(SearchSnapshot::default());

        let task = tokio::spawn(run(
            DestinationSearchController::new(config),
            lookup,
            query_rx,
            snapshot_tx,
        ));

        SearchHandle {
            queries: query_tx,
            snapshot: snapshot_rx,
            task,
        }
    }
}

async fn run<L>(
    mut controller: DestinationSearchController,
    lookup: Arc<L>,
    mut queries: mpsc::UnboundedReceiver<String>,
    snapshot_tx: watch::Sender<SearchSnapshot>,
) where
    L: DestinationLookup + Send + Sync + 'static,
{
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<LookupResponse>();

    loop {
        let deadline = controller.next_deadline();
        let wake_at = tokio::time::Instant::from_std(deadline.unwrap_or_else(Instant::now));

        tokio::select! {
            received = queries.recv() => match received {
                Some(text) => controller.on_query_changed_at(text, Instant::now()),
                None => break,
            },
            _ = tokio::time::sleep_until(wake_at), if deadline.is_some() => {
                if let Some(dispatch) = controller.poll_at(Instant::now()) {
                    dispatch_lookup(Arc::clone(&lookup), dispatch, done_tx.clone());
                }
            }
            Some((token, response)) = done_rx.recv() => {
                controller.apply_response(token, response);
            }
        }

        let next = controller.snapshot();
        snapshot_tx.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }

    log::debug!("Destination search task stopped");
}

fn dispatch_lookup<L>(
    lookup: Arc<L>,
    dispatch: SearchDispatch,
    done: mpsc::UnboundedSender<LookupResponse>,
)
where
    L: DestinationLookup + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let token = dispatch.token;
        let response = tokio::task::spawn_blocking(move || {
            lookup.search_destinations(&dispatch.query, dispatch.limit)
        })
        .await
        .unwrap_or_else(|join_err| Err(LookupError::Backend(join_err.to_string())));

        // receiver gone means the search was shut down
        let _ = done.send((token, response));
    });
}

/// Host-side handle to a running search.
pub struct SearchHandle {
    queries: mpsc::UnboundedSender<String>,
    snapshot: watch::Receiver<SearchSnapshot>,
    task: JoinHandle<()>,
}

impl SearchHandle {
    /// Forward the text box contents after a keystroke.
    pub fn on_query_changed(&self, text: impl Into<String>) -> Result<(), LookupError> {
        self.queries
            .send(text.into())
            .map_err(|_| LookupError::Cancelled)
    }

    pub fn current_results(&self) -> Vec<Destination> {
        self.snapshot.borrow().results.clone()
    }

    pub fn current_error(&self) -> Option<String> {
        self.snapshot.borrow().error.clone()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Wait for the next published change.
    pub async fn changed(&mut self) -> Result<SearchSnapshot, LookupError> {
        self.snapshot
            .changed()
            .await
            .map_err(|_| LookupError::Cancelled)?;
        Ok(self.snapshot.borrow_and_update().clone())
    }

    /// Wait until the published state satisfies `predicate`.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&SearchSnapshot) -> bool,
    ) -> Result<SearchSnapshot, LookupError> {
        let snapshot = self
            .snapshot
            .wait_for(predicate)
            .await
            .map_err(|_| LookupError::Cancelled)?;
        Ok(snapshot.clone())
    }

    /// Stop the task. In-flight lookups finish but their answers are dropped.
    pub async fn shutdown(self) {
        drop(self.queries);
        if let Err(err) = self.task.await {
            log::warn!("Destination search task ended abnormally: {}", err);
        }
    }
}
