//! # Courtside Booking
//!
//! The reservation-building workflow for a padel club: a court/slot catalog,
//! per-date availability, multi-slot multi-court selection, debounced price
//! quoting and reservation submission, all expressed as reducers over a
//! single state value.
//!
//! The reducers run on the [`courtside_runtime::Store`]; remote calls go
//! through [`courtside_gateway::BookingGateway`] and come back as completion
//! actions.

pub mod environment;
pub mod format;
pub mod reducer;
pub mod reservations;
pub mod types;

pub use environment::{
    BookingEnvironment, ConfirmationPrompt, DEFAULT_QUOTE_DEBOUNCE, Navigator,
};
pub use reducer::BookingReducer;
pub use reservations::{
    ReservationsAction, ReservationsReducer, ReservationsState, sorted_slots,
};
pub use types::{
    AvailabilityState, BookingAction, BookingState, Catalog, CatalogState, CourtPanel,
    QuoteState, ReservationSummary, SubmissionState,
};
