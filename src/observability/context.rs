//! Telemetry context injected into the HTTP layer.
//!
//! Request futures run with the context's dispatcher as their default, so
//! handlers never consult a process-global tracer. The dispatcher stays the
//! default while a request future is dropped too: closing a span that is
//! still entered releases the registry's reference through the current
//! default, and a cancelled request must close its spans in the same
//! subscriber that opened them.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::dispatcher::{self, Dispatch};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

use crate::observability::provider::{export_layer, TRACER_NAME};

#[derive(Clone)]
pub struct Telemetry {
    dispatch: Dispatch,
}

impl Telemetry {
    /// Wrap an existing dispatcher (usually the process subscriber).
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }

    /// A subscriber that only feeds `provider`, for isolated use.
    pub fn for_provider(provider: &SdkTracerProvider) -> Self {
        Self::new(Dispatch::new(Registry::default().with(export_layer(provider, TRACER_NAME))))
    }

    /// Records nothing.
    pub fn disabled() -> Self {
        Self::new(Dispatch::none())
    }

    pub fn dispatch(&self) -> &Dispatch {
        &self.dispatch
    }

    /// Run `future` under this context, from first poll through drop.
    pub fn scope<F: Future>(&self, future: F) -> Scoped<F> {
        Scoped {
            future: Some(Box::pin(future)),
            dispatch: self.dispatch.clone(),
        }
    }
}

/// Future returned by [`Telemetry::scope`].
pub struct Scoped<F> {
    future: Option<Pin<Box<F>>>,
    dispatch: Dispatch,
}

impl<F: Future> Future for Scoped<F> {
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<F::Output> {
        let this = self.get_mut();
        let _default = dispatcher::set_default(&this.dispatch);

        let Some(future) = this.future.as_mut() else {
            return Poll::Pending;
        };
        let poll = future.as_mut().poll(cx);
        if poll.is_ready() {
            this.future = None;
        }
        poll
    }
}

impl<F> Drop for Scoped<F> {
    fn drop(&mut self) {
        if let Some(future) = self.future.take() {
            let _default = dispatcher::set_default(&self.dispatch);
            drop(future);
        }
    }
}
