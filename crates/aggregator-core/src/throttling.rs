use std::fmt::{Debug, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

use crate::error::ClientBuildError;
use crate::http_client::{HttpClient, HttpError, HttpRequest, HttpResponse};

pub type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Token bucket admitting `rate` requests per second with a burst of one.
pub fn limiter_for_rate(rate: f64) -> Result<DirectRateLimiter, ClientBuildError> {
    Ok(RateLimiter::direct(quota_for_rate(rate)?))
}

/// Interval between two admitted requests, `None` when `rate` cannot drive a bucket.
///
/// Rejects non-finite and non-positive rates, and rates so high that the
/// interval rounds down to zero nanoseconds.
pub fn rate_period(rate: f64) -> Option<Duration> {
    if !rate.is_finite() || rate <= 0.0 {
        return None;
    }
    Duration::try_from_secs_f64(1.0 / rate)
        .ok()
        .filter(|period| !period.is_zero())
}

fn quota_for_rate(rate: f64) -> Result<Quota, ClientBuildError> {
    let period = rate_period(rate).ok_or(ClientBuildError::InvalidRate { rate })?;

    // with_period keeps the burst at a single cell.
    Quota::with_period(period).ok_or(ClientBuildError::InvalidRate { rate })
}

/// Wraps another client behind its own token bucket.
///
/// Every request waits for a free cell before it is handed to the inner client.
pub struct RateLimitedClient<C> {
    inner: C,
    limiter: DirectRateLimiter,
    rate: f64,
}

impl<C: HttpClient> RateLimitedClient<C> {
    pub fn new(inner: C, rate: f64) -> Result<Self, ClientBuildError> {
        Ok(Self {
            inner,
            limiter: limiter_for_rate(rate)?,
            rate,
        })
    }

    pub const fn rate(&self) -> f64 {
        self.rate
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Takes a cell without waiting; `false` when the bucket is empty.
    pub fn try_acquire(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

impl<C: HttpClient> HttpClient for RateLimitedClient<C> {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            self.limiter.until_ready().await;
            self.inner.execute(request).await
        })
    }
}

impl<C: Debug> Debug for RateLimitedClient<C> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitedClient")
            .field("inner", &self.inner)
            .field("rate", &self.rate)
            .finish()
    }
}
