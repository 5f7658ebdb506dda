//! @ai:module:intent Throttle requests to the production-data endpoint
//! @ai:module:layer infrastructure
//! @ai:module:public_api RateLimiter
//! @ai:module:stateless false

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// @ai:intent Trait for rate limiting functionality
pub trait RateLimiterTrait: Send + Sync {
    /// @ai:intent Wait until a request is allowed
    fn wait(&self) -> impl std::future::Future<Output = ()> + Send;
}

/// @ai:intent Token bucket shared by every store that uses the same fetcher
pub struct RateLimiter {
    bucket: Option<Mutex<Bucket>>,
    refill_per_sec: f64,
    capacity: f64,
}

struct Bucket {
    tokens: f64,
    refreshed_at: Instant,
}

impl Bucket {
    fn refill(&mut self, refill_per_sec: f64, capacity: f64) {
        let now = Instant::now();
        let gained = now.duration_since(self.refreshed_at).as_secs_f64() * refill_per_sec;
        self.tokens = (self.tokens + gained).min(capacity);
        self.refreshed_at = now;
    }
}

impl RateLimiter {
    /// @ai:intent Create a limiter allowing a burst of `requests_per_minute`, zero disables it
    /// @ai:effects pure
    pub fn new(requests_per_minute: u32) -> Self {
        let capacity = f64::from(requests_per_minute);
        let bucket = (requests_per_minute > 0).then(|| {
            Mutex::new(Bucket {
                tokens: capacity,
                refreshed_at: Instant::now(),
            })
        });

        Self {
            bucket,
            refill_per_sec: capacity / 60.0,
            capacity,
        }
    }

    /// @ai:intent Limiter that never waits
    /// @ai:effects pure
    pub fn unlimited() -> Self {
        Self::new(0)
    }

    pub fn is_unlimited(&self) -> bool {
        self.bucket.is_none()
    }
}

impl RateLimiterTrait for RateLimiter {
    /// @ai:intent Wait until a token is available, then consume it
    /// @ai:effects state:write, time
    async fn wait(&self) {
        let Some(bucket) = &self.bucket else {
            return;
        };

        loop {
            let pause = {
                let mut bucket = bucket.lock().await;
                bucket.refill(self.refill_per_sec, self.capacity);

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    return;
                }

                Duration::from_secs_f64((1.0 - bucket.tokens) / self.refill_per_sec)
            };

            tracing::debug!("Rate limit reached, waiting {:?}", pause);
            tokio::time::sleep(pause).await;
        }
    }
}
