//! Fetch worker thread
//!
//! Runs suggestion fetches in a background thread so the UI loop never
//! blocks on the network. Each request is fetched in its own task, which
//! means responses can complete out of order; every response carries the
//! sequence number of its request and the widget decides whether it is stale.
//! Nothing is ever cancelled: superseded responses are ignored on arrival.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::time::Duration;

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use super::{SourceError, SuggestionSource};
use crate::candidate::Candidate;
use crate::suggest::{FetchRequest, SuggestMsg};

/// Response messages received from the fetch worker
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResponse {
    Loaded {
        seq: u64,
        candidates: Vec<Candidate>,
    },
    Failed {
        seq: u64,
        error: String,
    },
}

impl FetchResponse {
    pub fn seq(&self) -> u64 {
        match self {
            FetchResponse::Loaded { seq, .. } | FetchResponse::Failed { seq, .. } => *seq,
        }
    }

    /// Convert into the widget's input message
    pub fn into_msg(self) -> SuggestMsg {
        match self {
            FetchResponse::Loaded { seq, candidates } => {
                SuggestMsg::ResponseReceived { seq, candidates }
            }
            FetchResponse::Failed { seq, error } => SuggestMsg::ResponseFailed { seq, error },
        }
    }
}

/// UI-side handle to the worker
#[derive(Debug)]
pub struct FetchHandle {
    request_tx: UnboundedSender<FetchRequest>,
    response_rx: Receiver<FetchResponse>,
}

impl FetchHandle {
    /// Queue a request. Returns false if the worker has shut down.
    pub fn send(&self, request: FetchRequest) -> bool {
        self.request_tx.send(request).is_ok()
    }

    /// Next completed response, without blocking
    pub fn try_recv(&self) -> Option<FetchResponse> {
        match self.response_rx.try_recv() {
            Ok(response) => Some(response),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                log::debug!("Fetch worker disconnected");
                None
            }
        }
    }
}

/// Spawn the fetch worker thread
///
/// Every fetch is bounded by `timeout`; expiry is reported as a failure.
pub fn spawn_worker(source: SuggestionSource, timeout: Duration) -> FetchHandle {
    let (request_tx, request_rx) = unbounded_channel();
    let (response_tx, response_rx) = mpsc::channel();

    std::thread::spawn(move || {
        worker_loop(source, timeout, request_rx, response_tx);
    });

    FetchHandle {
        request_tx,
        response_rx,
    }
}

/// Main worker loop - processes requests until the channel is closed
fn worker_loop(
    source: SuggestionSource,
    timeout: Duration,
    mut request_rx: UnboundedReceiver<FetchRequest>,
    response_tx: Sender<FetchResponse>,
) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            // Answer every request so the widget never waits forever
            log::error!("Failed to start fetch runtime: {}", e);
            while let Some(request) = request_rx.blocking_recv() {
                let _ = response_tx.send(FetchResponse::Failed {
                    seq: request.seq,
                    error: format!("fetch runtime unavailable: {}", e),
                });
            }
            return;
        }
    };

    let source = Arc::new(source);
    runtime.block_on(async move {
        while let Some(request) = request_rx.recv().await {
            let source = Arc::clone(&source);
            let response_tx = response_tx.clone();
            tokio::spawn(async move {
                let response = fetch_one(&source, request, timeout).await;
                if response_tx.send(response).is_err() {
                    log::debug!("UI disconnected, dropping response");
                }
            });
        }
    });

    log::debug!("Fetch worker shutting down");
}

async fn fetch_one(
    source: &SuggestionSource,
    request: FetchRequest,
    timeout: Duration,
) -> FetchResponse {
    let FetchRequest { seq, term, limit } = request;
    let result = match tokio::time::timeout(timeout, source.fetch(&term, limit)).await {
        Ok(result) => result,
        Err(_) => Err(SourceError::Timeout(timeout.as_millis() as u64)),
    };

    match result {
        Ok(candidates) => {
            log::debug!("Query {} returned {} candidates", seq, candidates.len());
            FetchResponse::Loaded { seq, candidates }
        }
        Err(e) => FetchResponse::Failed {
            seq,
            error: e.to_string(),
        },
    }
}

#[cfg(test)]
#[path = "worker_tests.rs"]
mod worker_tests;
