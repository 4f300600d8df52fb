//! The user's reservations list.
//!
//! A small read-only companion to the booking workflow: load the list, show
//! it newest-first. The server's date strings are `YYYY-MM-DD`, so ordering
//! on the raw string matches chronological order.

use crate::environment::BookingEnvironment;
use crate::types::BookingAction;
use courtside_core::effect::Effect;
use courtside_core::reducer::{Effects, Reducer};
use courtside_gateway::{ReservationRecord, ReservationSlot};
use smallvec::smallvec;
use std::sync::Arc;

/// State of the reservations list.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReservationsState {
    /// Whether a load is in flight
    pub loading: bool,
    /// Error from the most recent load, if it failed
    pub error: Option<String>,
    /// Reservations as the server returned them
    pub items: Vec<ReservationRecord>,
}

impl ReservationsState {
    /// Reservations newest-first: date descending, then id descending.
    #[must_use]
    pub fn ordered(&self) -> Vec<&ReservationRecord> {
        let mut items: Vec<&ReservationRecord> = self.items.iter().collect();
        items.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        items
    }
}

/// A reservation's slot lines in ascending slot order.
///
/// Lines without a slot id sort last, in server order.
#[must_use]
pub fn sorted_slots(record: &ReservationRecord) -> Vec<&ReservationSlot> {
    let mut slots: Vec<&ReservationSlot> = record.slots.iter().collect();
    slots.sort_by_key(|s| (s.slot_id.is_none(), s.slot_id));
    slots
}

/// Actions driving the reservations list.
#[derive(Clone, Debug)]
pub enum ReservationsAction {
    /// The list screen was opened
    Mounted,
    /// The load completed
    Loaded {
        /// The reservations, or the error
        result: Result<Vec<ReservationRecord>, String>,
    },
}

/// Reducer for the reservations list.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReservationsReducer;

impl Reducer for ReservationsReducer {
    type State = ReservationsState;
    type Action = ReservationsAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            ReservationsAction::Mounted => {
                state.loading = true;
                state.error = None;

                let gateway = Arc::clone(&env.gateway);
                smallvec![Effect::future(async move {
                    let result = gateway.my_reservations().await.map_err(|e| e.to_string());
                    Some(ReservationsAction::Loaded { result })
                })]
            },
            ReservationsAction::Loaded { result } => {
                state.loading = false;
                match result {
                    Ok(items) => state.items = items,
                    Err(error) => {
                        tracing::warn!(%error, "Reservations load failed");
                        state.error = Some(error);
                    },
                }
                smallvec![]
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use crate::environment::{BookingEnvironment, ConfirmationPrompt, Navigator};
    use crate::types::ReservationSummary;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use courtside_core::environment::FixedClock;
    use courtside_gateway::{
        BookingGateway, Court, CourtAvailability, CourtId, GatewayError, PriceQuote,
        SlotDefinition, SlotId,
    };
    use courtside_testing::ReducerTest;
    use courtside_testing::assertions::{assert_has_future_effect, assert_no_effects};

    struct StubGateway;

    #[async_trait]
    impl BookingGateway for StubGateway {
        async fn list_courts(&self) -> Result<Vec<Court>, GatewayError> {
            Ok(vec![])
        }

        async fn list_slots(&self) -> Result<Vec<SlotDefinition>, GatewayError> {
            Ok(vec![])
        }

        async fn availability(
            &self,
            _date: NaiveDate,
        ) -> Result<Vec<CourtAvailability>, GatewayError> {
            Ok(vec![])
        }

        async fn calculate_price(
            &self,
            _court: CourtId,
            _date: NaiveDate,
            _slots: &[SlotId],
        ) -> Result<PriceQuote, GatewayError> {
            Ok(PriceQuote {
                total: None,
                per_slot: None,
                surcharge: None,
            })
        }

        async fn reserve(
            &self,
            _court: CourtId,
            _date: NaiveDate,
            _slots: &[SlotId],
        ) -> Result<(), GatewayError> {
            Ok(())
        }

        async fn my_reservations(&self) -> Result<Vec<ReservationRecord>, GatewayError> {
            Ok(vec![])
        }
    }

    struct DeclinePrompt;

    #[async_trait]
    impl ConfirmationPrompt for DeclinePrompt {
        async fn confirm(&self, _summary: ReservationSummary) -> bool {
            false
        }
    }

    struct NoopNavigator;

    impl Navigator for NoopNavigator {
        fn go_to_reservations(&self) {}
    }

    fn env() -> BookingEnvironment {
        BookingEnvironment::new(
            std::sync::Arc::new(StubGateway),
            std::sync::Arc::new(DeclinePrompt),
            std::sync::Arc::new(NoopNavigator),
            std::sync::Arc::new(FixedClock::new("2024-06-01T10:00:00Z".parse().unwrap())),
        )
    }

    fn record(id: i64, date: &str) -> ReservationRecord {
        ReservationRecord {
            id,
            court_id: None,
            court_name: None,
            date: date.to_string(),
            total: None,
            slots: vec![],
        }
    }

    #[test]
    fn mounted_starts_loading() {
        ReducerTest::new(ReservationsReducer)
            .with_env(env())
            .given_state(ReservationsState::default())
            .when_action(ReservationsAction::Mounted)
            .then_state(|state| {
                assert!(state.loading);
                assert!(state.error.is_none());
            })
            .then_effects(assert_has_future_effect)
            .run();
    }

    #[test]
    fn loaded_stores_items_and_clears_loading() {
        ReducerTest::new(ReservationsReducer)
            .with_env(env())
            .given_state(ReservationsState::default())
            .when_action(ReservationsAction::Mounted)
            .when_action(ReservationsAction::Loaded {
                result: Ok(vec![record(1, "2024-06-01")]),
            })
            .then_state(|state| {
                assert!(!state.loading);
                assert_eq!(state.items.len(), 1);
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn load_failure_is_recorded() {
        ReducerTest::new(ReservationsReducer)
            .with_env(env())
            .given_state(ReservationsState::default())
            .when_action(ReservationsAction::Loaded {
                result: Err("HTTP 500".to_string()),
            })
            .then_state(|state| {
                assert_eq!(state.error.as_deref(), Some("HTTP 500"));
                assert!(state.items.is_empty());
            })
            .run();
    }

    #[test]
    fn ordered_is_newest_first_with_id_tiebreak() {
        let state = ReservationsState {
            loading: false,
            error: None,
            items: vec![
                record(1, "2024-06-01"),
                record(3, "2024-06-02"),
                record(2, "2024-06-02"),
            ],
        };
        let ids: Vec<i64> = state.ordered().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn slot_lines_sort_by_slot_id_with_unknowns_last() {
        let mut rec = record(1, "2024-06-01");
        rec.slots = vec![
            ReservationSlot {
                slot_id: None,
                line_id: Some(7),
                label: None,
                period: None,
                price: None,
            },
            ReservationSlot {
                slot_id: Some(SlotId::new(3)),
                line_id: Some(8),
                label: None,
                period: None,
                price: None,
            },
            ReservationSlot {
                slot_id: Some(SlotId::new(1)),
                line_id: Some(9),
                label: None,
                period: None,
                price: None,
            },
        ];
        let lines: Vec<Option<SlotId>> = sorted_slots(&rec).iter().map(|s| s.slot_id).collect();
        assert_eq!(
            lines,
            vec![Some(SlotId::new(1)), Some(SlotId::new(3)), None]
        );
    }
}
