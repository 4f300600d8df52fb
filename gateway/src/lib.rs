//! # Courtside Gateway
//!
//! Typed HTTP client for the padel-club API.
//!
//! The gateway performs authenticated JSON calls and normalizes success and
//! error responses into the [`GatewayError`] taxonomy. It carries no retry
//! logic: retries are always a caller decision (and the booking workflow
//! performs none - retry is a manual user action).
//!
//! ## Example
//!
//! ```no_run
//! use courtside_gateway::{BookingGateway, ClubApiClient, CredentialStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = CredentialStore::new();
//!     credentials.set("eyJhbGciOi...");
//!
//!     let client = ClubApiClient::new("https://club.example.com", credentials);
//!     let courts = client.list_courts().await?;
//!
//!     println!("{} courts", courts.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod credentials;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::{BookingGateway, ClubApiClient};
pub use credentials::CredentialStore;
pub use error::GatewayError;
pub use types::{
    AppliedSurcharge, AvailableSlot, Court, CourtAvailability, CourtId, Period, PriceQuote,
    PriceValue, ReservationRecord, ReservationSlot, SlotDefinition, SlotId,
};
