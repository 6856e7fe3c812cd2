//! Simulated asynchronous flows.
//!
//! Sign-in and promo application have no backend. Each is a
//! [`SimulatedTask`] that moves `Idle -> Pending -> Resolved | Rejected`
//! after waiting on an injected [`Delay`], so tests can run with
//! [`NoDelay`].

mod auth;
mod promo;
mod task;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use auth::{AuthFlow, AuthForm, AuthMode, AuthOutcome};
pub use promo::PromoEntry;
pub use task::{Delay, NoDelay, SimulatedTask, TaskState, TokioDelay};

/// Latencies of the simulated requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimings {
    /// Email sign-in and sign-up.
    pub sign_in: Duration,
    /// Google sign-in.
    pub google: Duration,
    /// Promo code validation.
    pub promo: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            sign_in: Duration::from_millis(1500),
            google: Duration::from_millis(2000),
            promo: Duration::from_millis(1000),
        }
    }
}
