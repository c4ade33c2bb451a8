//! Scripted remote source for scheduler and session tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{RemoteError, RemoteResult, RemoteSource};
use crate::models::Quote;

enum Response {
    Quotes(Vec<Quote>),
    Fail(fn() -> RemoteError),
}

pub struct StubRemote {
    response: Mutex<Response>,
    calls: AtomicUsize,
    called: Notify,
    gate: Option<Notify>,
}

impl StubRemote {
    fn with(response: Response, gated: bool) -> Self {
        Self {
            response: Mutex::new(response),
            calls: AtomicUsize::new(0),
            called: Notify::new(),
            gate: gated.then(Notify::new),
        }
    }

    pub fn returning(quotes: Vec<Quote>) -> Self {
        Self::with(Response::Quotes(quotes), false)
    }

    pub fn failing(error: fn() -> RemoteError) -> Self {
        Self::with(Response::Fail(error), false)
    }

    /// Blocks every fetch until [`Self::release`] is called.
    pub fn gated(quotes: Vec<Quote>) -> Self {
        Self::with(Response::Quotes(quotes), true)
    }

    pub fn set_quotes(&self, quotes: Vec<Quote>) {
        *self.response.lock().unwrap() = Response::Quotes(quotes);
    }

    pub fn set_failing(&self, error: fn() -> RemoteError) {
        *self.response.lock().unwrap() = Response::Fail(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub async fn wait_until_called(&self) {
        self.called.notified().await;
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }
}

#[async_trait]
impl RemoteSource for StubRemote {
    async fn fetch_remote_quotes(&self) -> RemoteResult<Vec<Quote>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.called.notify_one();
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match &*self.response.lock().unwrap() {
            Response::Quotes(quotes) => Ok(quotes.clone()),
            Response::Fail(error) => Err(error()),
        }
    }
}
