//! Rewarded-ad collaborator
//!
//! There is no real ad network behind the terminal build; the simulated
//! gate reproduces the mediation timing so the continue flow exercises
//! the same marshaling path a production gate would: the outcome is
//! produced off-thread and delivered back to the app loop over a
//! channel before any session state is touched.

use std::time::Duration;

use tokio::sync::mpsc::Sender;

use crate::session::{AdGate, AdOutcome};

/// Simulated rewarded-ad gate with a fixed "playback" delay
#[derive(Debug)]
pub struct SimulatedAdGate {
    delay: Duration,
    /// Every nth request fails, 0 = never fails
    fail_every: u32,
    requests: u32,
}

impl SimulatedAdGate {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(1200),
            fail_every: 0,
            requests: 0,
        }
    }

    /// Make every `n`th ad request fail, for exercising the
    /// ad-unavailable path
    pub fn with_fail_every(mut self, n: u32) -> Self {
        self.fail_every = n;
        self
    }

    /// Override the simulated playback delay
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for SimulatedAdGate {
    fn default() -> Self {
        Self::new()
    }
}

impl AdGate for SimulatedAdGate {
    fn request_rewarded_ad(&mut self, reply: Sender<AdOutcome>) {
        self.requests += 1;
        let outcome = if self.fail_every > 0 && self.requests % self.fail_every == 0 {
            AdOutcome::Failed
        } else {
            AdOutcome::Watched
        };
        let delay = self.delay;
        log::debug!("ads: rewarded ad requested, outcome {:?} in {:?}", outcome, delay);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The app loop may already be gone on shutdown.
            let _ = reply.send(outcome).await;
        });
    }
}
