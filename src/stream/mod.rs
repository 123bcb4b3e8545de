use std::sync::Arc;

use futures::Stream;
use serde::Serialize;
use serde_json::json;
use tokio::{
    select,
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::fetch::{FetchRequest, run_with_progress};
use crate::progress::{ProgressFn, ProgressState};
use crate::records::FetchResult;
use crate::{MaiClient, MaiError};

/* ---------------- Public API ---------------- */

/// Upper bound on events per fetch: 13 progress states plus one terminal event.
const MAX_EVENTS: usize = 14;

/// One push event of a streamed fetch.
///
/// Zero or more `Progress` events are followed by exactly one `Data` or `Error`, after which the
/// channel closes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "lowercase")]
pub enum FetchEvent {
    Progress { state: ProgressState },
    Data(FetchResult),
    Error { error: String },
}

impl FetchEvent {
    /// Event name on the wire (`progress`, `data`, `error`).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Progress { .. } => "progress",
            Self::Data(_) => "data",
            Self::Error { .. } => "error",
        }
    }

    /// Whether this event ends the stream.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }

    /// The event body without its name.
    pub fn payload(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::Progress { state } => Ok(json!({ "state": state })),
            Self::Data(result) => serde_json::to_value(result),
            Self::Error { error } => Ok(json!({ "error": error })),
        }
    }

    /// Render as a server-sent-events frame.
    pub fn to_sse(&self) -> Result<String, serde_json::Error> {
        let data = serde_json::to_string(&self.payload()?)?;
        Ok(format!("event: {}\ndata: {data}\n\n", self.name()))
    }
}

impl From<Result<FetchResult, MaiError>> for FetchEvent {
    fn from(outcome: Result<FetchResult, MaiError>) -> Self {
        match outcome {
            Ok(result) => Self::Data(result),
            Err(e) => Self::Error {
                error: e.to_string(),
            },
        }
    }
}

/// A handle for a running fetch task.
pub struct StreamHandle {
    join: JoinHandle<()>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl StreamHandle {
    /// Ask the fetch to stop (no further events are sent) and wait for the task to finish.
    /// Upstream calls already in flight are dropped.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        let _ = self.join.await;
    }

    /// Immediately abort the background task (no more events will be sent).
    pub fn abort(self) {
        self.join.abort();
    }

    /// Wait for the task to finish on its own.
    pub async fn join(self) {
        let _ = self.join.await;
    }
}

/// Builder to start a streamed fetch.
pub struct FetchStream {
    client: MaiClient,
    request: FetchRequest,
    buffer: usize,
}

impl FetchStream {
    /// Start from an existing client (cloned internally).
    pub fn new(client: &MaiClient, request: FetchRequest) -> Self {
        Self {
            client: client.clone(),
            request,
            buffer: MAX_EVENTS,
        }
    }

    /// Channel capacity. Never below what one fetch can emit, so progress is never dropped.
    pub fn buffer(mut self, capacity: usize) -> Self {
        self.buffer = capacity.max(MAX_EVENTS);
        self
    }

    /// Start the fetch. Returns a handle and a receiver of events.
    ///
    /// Dropping the receiver cancels the fetch: no further events are produced and the pending
    /// upstream call is dropped.
    ///
    /// # Errors
    ///
    /// [`MaiError::InvalidRequest`] if the request fails validation; nothing is spawned then.
    pub fn start(self) -> Result<(StreamHandle, mpsc::Receiver<FetchEvent>), MaiError> {
        self.request.validate()?;

        let (tx, rx) = mpsc::channel::<FetchEvent>(self.buffer);
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let progress_tx = tx.clone();
        let progress: ProgressFn = Arc::new(move |state| {
            // Capacity covers every event of one fetch; a failure means the receiver is gone.
            let _ = progress_tx.try_send(FetchEvent::Progress { state });
        });

        let client = self.client;
        let request = self.request;

        let join = tokio::spawn(async move {
            let outcome = select! {
                outcome = run_with_progress(&client, &request, Some(progress)) => outcome,
                () = tx.closed() => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("fetch stream receiver dropped; cancelling");
                    return;
                }
                Ok(()) = &mut stop_rx => return,
            };
            let _ = tx.send(FetchEvent::from(outcome)).await;
        });

        Ok((
            StreamHandle {
                join,
                stop_tx: Some(stop_tx),
            },
            rx,
        ))
    }
}

/// Adapt an event receiver into a `Stream`, for transports that consume streams.
pub fn into_stream(rx: mpsc::Receiver<FetchEvent>) -> impl Stream<Item = FetchEvent> {
    futures::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|event| (event, rx))
    })
}
