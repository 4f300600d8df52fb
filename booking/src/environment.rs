//! Dependencies injected into the booking reducers.
//!
//! Everything that touches the outside world sits behind a trait object so
//! tests can substitute fakes: the gateway, the confirmation prompt, the
//! navigator and the clock.

use crate::types::ReservationSummary;
use async_trait::async_trait;
use courtside_core::environment::Clock;
use courtside_gateway::BookingGateway;
use std::sync::Arc;
use std::time::Duration;

/// Default debounce window for price quotes.
pub const DEFAULT_QUOTE_DEBOUNCE: Duration = Duration::from_millis(250);

/// Asks the user to confirm a reservation before it is submitted.
#[async_trait]
pub trait ConfirmationPrompt: Send + Sync {
    /// Present the summary and return whether the user accepted.
    async fn confirm(&self, summary: ReservationSummary) -> bool;
}

/// Moves the user to another screen after a successful reservation.
pub trait Navigator: Send + Sync {
    /// Navigate to the reservations list.
    fn go_to_reservations(&self);
}

/// Dependencies for [`BookingReducer`](crate::reducer::BookingReducer) and
/// [`ReservationsReducer`](crate::reservations::ReservationsReducer).
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Remote club API
    pub gateway: Arc<dyn BookingGateway>,
    /// Confirmation prompt shown before submitting
    pub confirmer: Arc<dyn ConfirmationPrompt>,
    /// Post-submission navigation
    pub navigator: Arc<dyn Navigator>,
    /// Source of "today" for the initial date
    pub clock: Arc<dyn Clock>,
    /// Debounce window applied to price quotes
    pub quote_debounce: Duration,
}

impl BookingEnvironment {
    /// Build an environment with the default quote debounce.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn BookingGateway>,
        confirmer: Arc<dyn ConfirmationPrompt>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway,
            confirmer,
            navigator,
            clock,
            quote_debounce: DEFAULT_QUOTE_DEBOUNCE,
        }
    }

    /// Override the quote debounce window (tests use short windows).
    #[must_use]
    pub const fn with_quote_debounce(mut self, debounce: Duration) -> Self {
        self.quote_debounce = debounce;
        self
    }
}
