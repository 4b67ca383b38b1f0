//! Shared request throttle
//!
//! The Web API enforces its quota per app over a rolling window, so a 429 on
//! one call says the next call from anywhere in the process will fail too.
//! Every clone of an [`HttpClient`](super::HttpClient) therefore shares one
//! [`Throttle`]. When a 429 arrives, its `Retry-After` wait becomes a pause
//! that every caller sits out before sending, not just the caller that got
//! rejected.
//!
//! Callers can also opt into [`Pacing`], a governor token bucket that spaces
//! requests out before the server ever has to push back.

use governor::clock::DefaultClock;
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

type Bucket = RateLimiter<NotKeyed, InMemoryState, DefaultClock, NoOpMiddleware>;

/// Up-front request pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Sustained requests per second
    pub per_second: u32,
    /// Requests allowed back to back before pacing kicks in
    pub burst: u32,
}

impl Pacing {
    /// `per_second` sustained, with bursts of up to `burst`. Zero counts as one.
    pub fn new(per_second: u32, burst: u32) -> Self {
        Self { per_second, burst }
    }

    fn bucket(self) -> Bucket {
        let at_least_one = |n| NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::per_second(at_least_one(self.per_second))
            .allow_burst(at_least_one(self.burst));
        RateLimiter::direct(quota)
    }
}

/// Gate every request of a client passes before it is sent
#[derive(Clone, Default)]
pub struct Throttle {
    paused_until: Arc<Mutex<Option<Instant>>>,
    bucket: Option<Arc<Bucket>>,
}

impl Throttle {
    /// A throttle that only honors server pauses, or also paces when given
    pub fn new(pacing: Option<Pacing>) -> Self {
        Self {
            paused_until: Arc::default(),
            bucket: pacing.map(|p| Arc::new(p.bucket())),
        }
    }

    /// Whether up-front pacing is configured
    pub fn is_paced(&self) -> bool {
        self.bucket.is_some()
    }

    /// Hold every caller back for `wait` from now.
    ///
    /// An overlapping pause that already ends later is kept.
    pub fn pause_for(&self, wait: Duration) {
        let until = Instant::now() + wait;
        let mut slot = self
            .paused_until
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if (*slot).map_or(true, |current| current < until) {
            *slot = Some(until);
        }
    }

    /// End of the current server pause, if one is still running
    pub fn paused_until(&self) -> Option<Instant> {
        let slot = self
            .paused_until
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        (*slot).filter(|until| *until > Instant::now())
    }

    /// Wait out any server pause, then take a pacing permit
    pub async fn ready(&self) {
        // A pause may be extended while we sleep, so look again after waking
        while let Some(until) = self.paused_until() {
            tokio::time::sleep_until(until).await;
        }
        if let Some(bucket) = &self.bucket {
            bucket.until_ready().await;
        }
    }
}

impl std::fmt::Debug for Throttle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Throttle")
            .field("paced", &self.is_paced())
            .field("paused_until", &self.paused_until())
            .finish()
    }
}
