//! Terminal demo: load the catalog, today's availability and the user's
//! reservations from a live club API.
//!
//! Configuration comes from `COURTSIDE_API_URL` and, optionally,
//! `COURTSIDE_ACCESS_TOKEN`.

use anyhow::Result;
use courtside_booking::{
    BookingAction, BookingEnvironment, BookingReducer, BookingState, ConfirmationPrompt,
    Navigator, ReservationSummary, ReservationsAction, ReservationsReducer, ReservationsState,
    format,
};
use courtside_core::environment::{Clock, SystemClock};
use courtside_gateway::ClubApiClient;
use courtside_runtime::Store;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Prints the summary and accepts. A real front end would prompt.
struct AutoConfirm;

#[async_trait::async_trait]
impl ConfirmationPrompt for AutoConfirm {
    async fn confirm(&self, summary: ReservationSummary) -> bool {
        println!("{}", summary.to_message());
        true
    }
}

struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn go_to_reservations(&self) {
        tracing::info!("Navigate: reservations list");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = ClubApiClient::from_env()?;
    let clock = Arc::new(SystemClock);
    let env = BookingEnvironment::new(
        Arc::new(client),
        Arc::new(AutoConfirm),
        Arc::new(LoggingNavigator),
        clock.clone(),
    );

    let store = Store::new(BookingState::new(clock.today()), BookingReducer, env.clone());

    // Mount and wait until both the catalog and availability have landed.
    let mut actions = store.subscribe_actions();
    store.send(BookingAction::WorkflowMounted).await?;

    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    let (mut catalog_done, mut availability_done) = (false, false);
    while !(catalog_done && availability_done) {
        match tokio::time::timeout_at(deadline, actions.recv()).await?? {
            BookingAction::CatalogLoaded { .. } => catalog_done = true,
            BookingAction::AvailabilityLoaded { .. } => availability_done = true,
            _ => {},
        }
    }

    store
        .state(|state| {
            println!("Disponibilidad para {}", state.date.format("%Y-%m-%d"));
            match state.catalog.ready() {
                Some(catalog) => {
                    for court in catalog.ordered_courts() {
                        let free = state
                            .availability
                            .free_for(court.id)
                            .map_or(0, BTreeSet::len);
                        println!(
                            "  {} — {} franjas libres, base {}",
                            court.name,
                            free,
                            format::euro(&court.base_price)
                        );
                    }
                },
                None => println!("  (catálogo no disponible)"),
            }
            if let Some(error) = &state.availability.error {
                println!("  disponibilidad no disponible: {error}");
            }
        })
        .await;

    // The reservations list shares the same environment.
    let reservations = Store::new(
        ReservationsState::default(),
        ReservationsReducer,
        env,
    );
    reservations
        .send_and_wait_for(
            ReservationsAction::Mounted,
            |action| matches!(action, ReservationsAction::Loaded { .. }),
            Duration::from_secs(10),
        )
        .await?;

    reservations
        .state(|state| {
            println!("Mis reservas:");
            if let Some(error) = &state.error {
                println!("  no disponibles: {error}");
            }
            for record in state.ordered() {
                println!(
                    "  #{} {} {} — {}",
                    record.id,
                    record.date,
                    record.court_name.as_deref().unwrap_or("?"),
                    format::euro_or_dash(record.total.as_ref())
                );
            }
        })
        .await;

    reservations.shutdown(Duration::from_secs(5)).await?;
    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}
