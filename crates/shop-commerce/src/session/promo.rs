//! Simulated promo code application.

use crate::cart::{Cart, PromoCode};
use crate::error::CommerceError;
use crate::session::{Delay, SimulatedTask, TaskState};
use std::time::Duration;

/// The cart page's promo code field.
#[derive(Debug, Clone)]
pub struct PromoEntry {
    /// Text bound to the input.
    pub input: String,
    task: SimulatedTask<PromoCode, CommerceError>,
}

impl PromoEntry {
    pub fn new(latency: Duration) -> Self {
        Self {
            input: String::new(),
            task: SimulatedTask::new(latency),
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn state(&self) -> &TaskState<PromoCode, CommerceError> {
        self.task.state()
    }

    /// Validate the entered code after the latency and apply it to the cart.
    ///
    /// A recognised code clears the input; an unknown one leaves the cart and
    /// the input untouched.
    pub async fn apply<D>(&mut self, cart: &mut Cart, delay: &D) -> &TaskState<PromoCode, CommerceError>
    where
        D: Delay + ?Sized,
    {
        let input = self.input.clone();
        tracing::info!(code = %input, "applying promo code");
        self.task.run(delay, || input.parse::<PromoCode>()).await;

        match self.task.state() {
            TaskState::Resolved(promo) => {
                cart.apply_promo(*promo);
                self.input.clear();
            }
            TaskState::Rejected(err) => tracing::warn!(error = %err, "promo code rejected"),
            TaskState::Idle | TaskState::Pending => {}
        }
        self.task.state()
    }
}
