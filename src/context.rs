// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per-operation call context
//!
//! A [`CallContext`] is handed down explicitly through every operation that
//! talks to a remote host. It carries the caller's cancellation token, an
//! optional per-call timeout, and the tracing span that log lines for the
//! operation are recorded under.

use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::Span;

use crate::errors::{CallError, RemoteError};

/// Cancellation, timeout and logging handle for one operation
#[derive(Debug, Clone)]
pub struct CallContext {
    cancel: CancellationToken,
    call_timeout: Option<Duration>,
    span: Span,
}

impl CallContext {
    /// Context with a fresh cancellation token, no timeout, and the current span
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            call_timeout: None,
            span: Span::current(),
        }
    }

    /// Context driven by an existing cancellation token
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        Self {
            cancel,
            ..Self::new()
        }
    }

    /// Bound every remote call made through this context
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    /// Record log lines for this operation under `span`
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Same token and timeout, logging under `span`
    pub fn scoped(&self, span: Span) -> Self {
        Self {
            cancel: self.cancel.clone(),
            call_timeout: self.call_timeout,
            span,
        }
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.call_timeout
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Run one remote call, racing it against cancellation and the timeout
    ///
    /// Cancellation is checked first so a context cancelled before the call
    /// starts never reaches the remote side.
    pub async fn call<T, F>(&self, future: F) -> Result<T, CallError>
    where
        F: Future<Output = Result<T, RemoteError>>,
    {
        if self.cancel.is_cancelled() {
            return Err(CallError::Cancelled);
        }

        match self.call_timeout {
            Some(timeout) => {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => Err(CallError::Cancelled),
                    _ = tokio::time::sleep(timeout) => Err(CallError::TimedOut(timeout)),
                    result = future => result.map_err(CallError::from),
                }
            }
            None => {
                tokio::select! {
                    biased;
                    _ = self.cancel.cancelled() => Err(CallError::Cancelled),
                    result = future => result.map_err(CallError::from),
                }
            }
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::new()
    }
}
