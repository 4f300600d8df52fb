//! The reservation-building reducer.
//!
//! All state transitions are synchronous; gateway calls run as effects that
//! feed completion actions back in. Two staleness disciplines keep the UI
//! consistent under races:
//!
//! - availability reloads carry a sequence number; only the completion
//!   matching the latest issued reload is applied
//! - price quotes are debounced on a per-court cancellable effect channel
//!   and carry their own sequence number; a completion is applied only if
//!   it matches the court's latest schedule and a quote is still pending

use crate::environment::BookingEnvironment;
use crate::types::{
    BookingAction, BookingState, Catalog, CatalogState, QuoteState, ReservationSummary,
    SubmissionState,
};
use courtside_core::effect::{Effect, EffectId};
use courtside_core::reducer::{Effects, Reducer};
use courtside_gateway::{CourtAvailability, CourtId, PriceQuote, SlotId};
use smallvec::smallvec;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

/// Reducer for the reservation-building workflow.
#[derive(Clone, Copy, Debug, Default)]
pub struct BookingReducer;

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> Effects<Self::Action> {
        match action {
            BookingAction::WorkflowMounted => Self::on_mounted(state, env),
            BookingAction::DateChanged(date) => Self::on_date_changed(state, env, date),
            BookingAction::ToggleSlot { court, slot } => Self::on_toggle(state, env, court, slot),
            BookingAction::ClearSelection { court } => Self::on_clear(state, court),
            BookingAction::SubmitPressed { court } => Self::on_submit_pressed(state, env, court),
            BookingAction::SubmitConfirmed { court } => {
                Self::on_submit_confirmed(state, env, court)
            },
            BookingAction::CatalogLoaded { result } => Self::on_catalog_loaded(state, result),
            BookingAction::AvailabilityLoaded { seq, result } => {
                Self::on_availability_loaded(state, seq, result)
            },
            BookingAction::QuoteResolved { court, seq, result } => {
                Self::on_quote_resolved(state, court, seq, result)
            },
            BookingAction::SubmissionResolved { court, result } => {
                Self::on_submission_resolved(state, env, court, result)
            },
        }
    }
}

impl BookingReducer {
    /// Cancellable-effect channel for one court's debounced quote.
    fn quote_channel(court: CourtId) -> EffectId {
        EffectId::new(format!("quote-{court}"))
    }

    fn on_mounted(
        state: &mut BookingState,
        env: &BookingEnvironment,
    ) -> Effects<BookingAction> {
        state.date = env.clock.today();
        state.catalog = CatalogState::Loading;
        state.panels.clear();

        let gateway = Arc::clone(&env.gateway);
        let catalog = Effect::future(async move {
            // Both catalogs load together; either failure fails the load.
            let result = match tokio::join!(gateway.list_courts(), gateway.list_slots()) {
                (Ok(courts), Ok(slots)) => Ok(Catalog { courts, slots }),
                (Err(e), _) | (_, Err(e)) => Err(e.to_string()),
            };
            Some(BookingAction::CatalogLoaded { result })
        });

        smallvec![catalog, Self::reload_availability(state, env)]
    }

    fn on_date_changed(
        state: &mut BookingState,
        env: &BookingEnvironment,
        date: chrono::NaiveDate,
    ) -> Effects<BookingAction> {
        state.date = date;

        // Panels reset at issuance so a slow reload cannot resurrect
        // selections that belong to the old date.
        let mut effects: Effects<BookingAction> = state
            .panels
            .iter()
            .filter(|(_, panel)| matches!(panel.quote, QuoteState::Pending))
            .map(|(court, _)| Effect::Cancel {
                id: Self::quote_channel(*court),
            })
            .collect();
        state.panels.clear();

        effects.push(Self::reload_availability(state, env));
        effects
    }

    fn on_toggle(
        state: &mut BookingState,
        env: &BookingEnvironment,
        court: CourtId,
        slot: SlotId,
    ) -> Effects<BookingAction> {
        if !state.availability.is_free(court, slot) {
            tracing::debug!(%court, %slot, "Ignored toggle of unavailable slot");
            return smallvec![];
        }

        let date = state.date;
        let now_empty = {
            let panel = state.panel_mut(court);
            if !panel.selection.remove(&slot) {
                panel.selection.insert(slot);
            }
            // Any edit invalidates a previous submission outcome.
            panel.submission = SubmissionState::Idle;
            panel.selection.is_empty()
        };

        if now_empty {
            let panel = state.panel_mut(court);
            panel.quote = QuoteState::Idle;
            // Abort a quote still sleeping in its debounce window.
            return smallvec![Effect::Cancel {
                id: Self::quote_channel(court),
            }];
        }

        let seq = state.next_quote_seq();
        let panel = state.panel_mut(court);
        panel.quote = QuoteState::Pending;
        panel.quote_seq = seq;
        let slots: Vec<SlotId> = panel.selection.iter().copied().collect();

        let gateway = Arc::clone(&env.gateway);
        let debounce = env.quote_debounce;
        smallvec![Effect::cancellable(Self::quote_channel(court), async move {
            tokio::time::sleep(debounce).await;
            let result = gateway
                .calculate_price(court, date, &slots)
                .await
                .map_err(|e| e.to_string());
            Some(BookingAction::QuoteResolved { court, seq, result })
        })]
    }

    fn on_clear(state: &mut BookingState, court: CourtId) -> Effects<BookingAction> {
        let pending = state
            .panels
            .get(&court)
            .is_some_and(|panel| matches!(panel.quote, QuoteState::Pending));

        if state.panels.remove(&court).is_none() {
            return smallvec![];
        }
        if pending {
            return smallvec![Effect::Cancel {
                id: Self::quote_channel(court),
            }];
        }
        smallvec![]
    }

    fn on_submit_pressed(
        state: &mut BookingState,
        env: &BookingEnvironment,
        court: CourtId,
    ) -> Effects<BookingAction> {
        let Some(panel) = state.panels.get(&court) else {
            return smallvec![];
        };
        if panel.selection.is_empty() || matches!(panel.submission, SubmissionState::Submitting) {
            return smallvec![];
        }

        let summary = Self::summary_for(state, court);
        let confirmer = Arc::clone(&env.confirmer);
        smallvec![Effect::future(async move {
            confirmer
                .confirm(summary)
                .await
                .then_some(BookingAction::SubmitConfirmed { court })
        })]
    }

    fn on_submit_confirmed(
        state: &mut BookingState,
        env: &BookingEnvironment,
        court: CourtId,
    ) -> Effects<BookingAction> {
        let date = state.date;
        // Re-validate: the selection may have changed while the prompt was up.
        let Some(panel) = state.panels.get_mut(&court) else {
            return smallvec![];
        };
        if panel.selection.is_empty() || matches!(panel.submission, SubmissionState::Submitting) {
            return smallvec![];
        }

        panel.submission = SubmissionState::Submitting;
        let slots: Vec<SlotId> = panel.selection.iter().copied().collect();

        let gateway = Arc::clone(&env.gateway);
        smallvec![Effect::future(async move {
            let result = gateway
                .reserve(court, date, &slots)
                .await
                .map_err(|e| e.to_string());
            Some(BookingAction::SubmissionResolved { court, result })
        })]
    }

    fn on_catalog_loaded(
        state: &mut BookingState,
        result: Result<Catalog, String>,
    ) -> Effects<BookingAction> {
        state.catalog = match result {
            Ok(catalog) => CatalogState::Ready(catalog),
            Err(error) => {
                tracing::warn!(%error, "Catalog load failed");
                CatalogState::Failed { error }
            },
        };
        smallvec![]
    }

    fn on_availability_loaded(
        state: &mut BookingState,
        seq: u64,
        result: Result<HashMap<CourtId, BTreeSet<SlotId>>, String>,
    ) -> Effects<BookingAction> {
        if !state.availability.apply(seq, result) {
            tracing::debug!(seq, "Discarded stale availability");
        }
        smallvec![]
    }

    fn on_quote_resolved(
        state: &mut BookingState,
        court: CourtId,
        seq: u64,
        result: Result<PriceQuote, String>,
    ) -> Effects<BookingAction> {
        let Some(panel) = state.panels.get_mut(&court) else {
            return smallvec![];
        };
        if seq != panel.quote_seq || !matches!(panel.quote, QuoteState::Pending) {
            tracing::debug!(%court, seq, "Discarded stale quote");
            return smallvec![];
        }

        panel.quote = match result {
            Ok(quote) => QuoteState::Ready(quote),
            Err(error) => QuoteState::Failed { error },
        };
        smallvec![]
    }

    fn on_submission_resolved(
        state: &mut BookingState,
        env: &BookingEnvironment,
        court: CourtId,
        result: Result<(), String>,
    ) -> Effects<BookingAction> {
        match result {
            Ok(()) => {
                tracing::info!(%court, "Reservation accepted");
                if let Some(panel) = state.panels.get_mut(&court) {
                    panel.selection.clear();
                    panel.quote = QuoteState::Idle;
                    panel.submission = SubmissionState::Succeeded {
                        message: "Reserva creada".to_string(),
                    };
                }

                let navigator = Arc::clone(&env.navigator);
                smallvec![
                    Self::reload_availability(state, env),
                    Effect::future(async move {
                        navigator.go_to_reservations();
                        None
                    }),
                ]
            },
            Err(error) => {
                tracing::warn!(%court, %error, "Reservation rejected");
                // Selection and quote are kept so the user can retry.
                if let Some(panel) = state.panels.get_mut(&court) {
                    panel.submission = SubmissionState::Failed { error };
                }
                smallvec![]
            },
        }
    }

    /// Issue an availability reload for the current date.
    fn reload_availability(
        state: &mut BookingState,
        env: &BookingEnvironment,
    ) -> Effect<BookingAction> {
        let seq = state.availability.begin_reload();
        let date = state.date;
        let gateway = Arc::clone(&env.gateway);
        Effect::future(async move {
            let result = gateway
                .availability(date)
                .await
                .map(collect_free)
                .map_err(|e| e.to_string());
            Some(BookingAction::AvailabilityLoaded { seq, result })
        })
    }

    /// Build the confirmation summary for one court's current selection.
    ///
    /// Falls back to raw ids when the catalog has no name or label, so the
    /// prompt is still meaningful while the catalog loads.
    pub(crate) fn summary_for(state: &BookingState, court: CourtId) -> ReservationSummary {
        let catalog = state.catalog.ready();
        let panel = state.panels.get(&court);

        let court_name = catalog
            .and_then(|c| c.court_name(court))
            .map_or_else(|| format!("Pista {court}"), ToString::to_string);

        let slot_labels = panel
            .map(|p| {
                p.selection
                    .iter()
                    .map(|&slot| {
                        catalog
                            .and_then(|c| c.slot_label(slot))
                            .map_or_else(|| slot.to_string(), ToString::to_string)
                    })
                    .collect()
            })
            .unwrap_or_default();

        let total = panel.and_then(|p| match &p.quote {
            QuoteState::Ready(quote) => quote.total.clone(),
            _ => None,
        });

        ReservationSummary {
            court_name,
            date: state.date,
            slot_labels,
            total,
        }
    }
}

fn collect_free(rows: Vec<CourtAvailability>) -> HashMap<CourtId, BTreeSet<SlotId>> {
    rows.into_iter()
        .map(|row| {
            let slots: BTreeSet<SlotId> = row.slots.into_iter().map(|s| s.id).collect();
            (row.court_id, slots)
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::environment::{ConfirmationPrompt, Navigator};
    use crate::types::CourtPanel;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use courtside_core::environment::FixedClock;
    use courtside_gateway::{
        BookingGateway, Court, GatewayError, Period, PriceQuote, PriceValue, ReservationRecord,
        SlotDefinition,
    };
    use courtside_testing::ReducerTest;
    use courtside_testing::assertions::{
        assert_has_cancel_effect, assert_has_cancellable_effect, assert_has_future_effect,
        assert_no_effects,
    };

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
            Arc::new(StubGateway),
            Arc::new(DeclinePrompt),
            Arc::new(NoopNavigator),
            Arc::new(FixedClock::new("2024-06-01T10:00:00Z".parse().unwrap())),
        )
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn court() -> CourtId {
        CourtId::new(1)
    }

    fn catalog() -> Catalog {
        Catalog {
            courts: vec![Court {
                id: court(),
                name: "Pista Central".to_string(),
                covered: true,
                capacity: 4,
                base_price: PriceValue::from(10.0),
            }],
            slots: vec![
                SlotDefinition {
                    id: SlotId::new(1),
                    label: "09:00-10:00".to_string(),
                    period: Period::Morning,
                },
                SlotDefinition {
                    id: SlotId::new(2),
                    label: "10:00-11:00".to_string(),
                    period: Period::Morning,
                },
                SlotDefinition {
                    id: SlotId::new(3),
                    label: "22:00-23:00".to_string(),
                    period: Period::Night,
                },
            ],
        }
    }

    /// Catalog ready and slots 1-3 free on court 1.
    fn ready_state() -> BookingState {
        let mut state = BookingState::new(date());
        state.catalog = CatalogState::Ready(catalog());
        let seq = state.availability.begin_reload();
        let free = HashMap::from([(
            court(),
            BTreeSet::from([SlotId::new(1), SlotId::new(2), SlotId::new(3)]),
        )]);
        assert!(state.availability.apply(seq, Ok(free)));
        state
    }

    fn quote(total: f64) -> PriceQuote {
        PriceQuote {
            total: Some(PriceValue::from(total)),
            per_slot: None,
            surcharge: None,
        }
    }

    #[test]
    fn mounted_sets_today_and_starts_both_loads() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(BookingState::default())
            .when_action(BookingAction::WorkflowMounted)
            .then_state(|state| {
                assert_eq!(state.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
                assert_eq!(state.catalog, CatalogState::Loading);
                assert!(state.availability.loading);
            })
            .then_effects(|effects| {
                assert_eq!(effects.len(), 2);
                assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn toggle_selects_and_schedules_a_debounced_quote() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(2),
            })
            .then_state(|state| {
                let panel = state.panel(court());
                assert!(panel.selection.contains(&SlotId::new(2)));
                assert_eq!(panel.quote, QuoteState::Pending);
            })
            .then_effects(|effects| {
                assert_has_cancellable_effect(effects, &EffectId::new("quote-1"));
            })
            .run();
    }

    #[test]
    fn toggle_twice_deselects_and_cancels_the_quote() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(2),
            })
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(2),
            })
            .then_state(|state| {
                let panel = state.panel(court());
                assert!(panel.selection.is_empty());
                assert_eq!(panel.quote, QuoteState::Idle);
            })
            .then_effects(|effects| {
                assert_has_cancel_effect(effects, &EffectId::new("quote-1"));
            })
            .run();
    }

    #[test]
    fn toggling_an_unavailable_slot_is_ignored() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(99),
            })
            .then_state(|state| {
                assert!(state.panel(court()).selection.is_empty());
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn toggling_on_an_unknown_court_is_ignored() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: CourtId::new(42),
                slot: SlotId::new(1),
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn only_the_latest_scheduled_quote_is_applied() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(2),
            })
            // Completion of the superseded first schedule.
            .when_action(BookingAction::QuoteResolved {
                court: court(),
                seq: 1,
                result: Ok(quote(10.0)),
            })
            .then_state(|state| {
                assert_eq!(state.panel(court()).quote, QuoteState::Pending);
            })
            // Completion of the current schedule.
            .when_action(BookingAction::QuoteResolved {
                court: court(),
                seq: 2,
                result: Ok(quote(20.0)),
            })
            .then_state(|state| {
                assert_eq!(state.panel(court()).quote, QuoteState::Ready(quote(20.0)));
            })
            .run();
    }

    #[test]
    fn quote_failure_is_recorded_without_a_total() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            .when_action(BookingAction::QuoteResolved {
                court: court(),
                seq: 1,
                result: Err("HTTP 500".to_string()),
            })
            .then_state(|state| {
                assert_eq!(
                    state.panel(court()).quote,
                    QuoteState::Failed {
                        error: "HTTP 500".to_string()
                    }
                );
            })
            .run();
    }

    #[test]
    fn late_quote_after_deselection_is_discarded() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            // Same seq, but no quote is pending anymore.
            .when_action(BookingAction::QuoteResolved {
                court: court(),
                seq: 1,
                result: Ok(quote(10.0)),
            })
            .then_state(|state| {
                assert_eq!(state.panel(court()).quote, QuoteState::Idle);
            })
            .run();
    }

    #[test]
    fn date_change_resets_panels_and_reloads() {
        let new_date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            .when_action(BookingAction::DateChanged(new_date))
            .then_state(move |state| {
                assert_eq!(state.date, new_date);
                assert!(state.panel(court()).selection.is_empty());
                assert!(state.availability.loading);
            })
            .then_effects(|effects| {
                // Cancel for the pending quote plus the reload.
                assert_has_cancel_effect(effects, &EffectId::new("quote-1"));
                assert_has_future_effect(effects);
            })
            .run();
    }

    #[test]
    fn stale_availability_from_the_old_date_is_discarded() {
        let new_date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::DateChanged(new_date))
            // seq 1 belongs to the ready_state() reload, not the new one.
            .when_action(BookingAction::AvailabilityLoaded {
                seq: 1,
                result: Ok(HashMap::from([(
                    CourtId::new(9),
                    BTreeSet::from([SlotId::new(9)]),
                )])),
            })
            .then_state(|state| {
                assert!(state.availability.loading);
                assert!(!state.availability.is_free(CourtId::new(9), SlotId::new(9)));
            })
            .run();
    }

    #[test]
    fn clear_selection_drops_the_panel_and_cancels() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            .when_action(BookingAction::ClearSelection { court: court() })
            .then_state(|state| {
                assert_eq!(state.panel(court()), CourtPanel::default());
            })
            .then_effects(|effects| {
                assert_has_cancel_effect(effects, &EffectId::new("quote-1"));
            })
            .run();
    }

    #[test]
    fn submit_with_empty_selection_is_a_noop() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::SubmitPressed { court: court() })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn submit_pressed_asks_for_confirmation() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            .when_action(BookingAction::SubmitPressed { court: court() })
            .then_state(|state| {
                // Pressing submit does not change state until confirmed.
                assert_eq!(state.panel(court()).submission, SubmissionState::Idle);
            })
            .then_effects(assert_has_future_effect)
            .run();
    }

    #[test]
    fn confirmed_submission_marks_submitting() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            .when_action(BookingAction::SubmitConfirmed { court: court() })
            .then_state(|state| {
                assert_eq!(state.panel(court()).submission, SubmissionState::Submitting);
            })
            .then_effects(assert_has_future_effect)
            .run();
    }

    #[test]
    fn double_confirmation_does_not_submit_twice() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            .when_action(BookingAction::SubmitConfirmed { court: court() })
            .when_action(BookingAction::SubmitConfirmed { court: court() })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn successful_submission_resets_the_panel_and_reloads() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            .when_action(BookingAction::SubmissionResolved {
                court: court(),
                result: Ok(()),
            })
            .then_state(|state| {
                let panel = state.panel(court());
                assert!(panel.selection.is_empty());
                assert_eq!(panel.quote, QuoteState::Idle);
                assert_eq!(
                    panel.submission,
                    SubmissionState::Succeeded {
                        message: "Reserva creada".to_string()
                    }
                );
                assert!(state.availability.loading);
            })
            .then_effects(|effects| {
                // Availability reload plus navigation.
                assert_eq!(effects.len(), 2);
            })
            .run();
    }

    #[test]
    fn failed_submission_keeps_the_selection_for_retry() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(ready_state())
            .when_action(BookingAction::ToggleSlot {
                court: court(),
                slot: SlotId::new(1),
            })
            .when_action(BookingAction::SubmissionResolved {
                court: court(),
                result: Err("Franja ya reservada".to_string()),
            })
            .then_state(|state| {
                let panel = state.panel(court());
                assert!(panel.selection.contains(&SlotId::new(1)));
                assert_eq!(
                    panel.submission,
                    SubmissionState::Failed {
                        error: "Franja ya reservada".to_string()
                    }
                );
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn catalog_failure_is_recorded() {
        ReducerTest::new(BookingReducer)
            .with_env(env())
            .given_state(BookingState::new(date()))
            .when_action(BookingAction::CatalogLoaded {
                result: Err("HTTP 503".to_string()),
            })
            .then_state(|state| {
                assert_eq!(
                    state.catalog,
                    CatalogState::Failed {
                        error: "HTTP 503".to_string()
                    }
                );
            })
            .run();
    }

    #[test]
    fn summary_uses_labels_and_quoted_total() {
        let mut state = ready_state();
        {
            let panel = state.panel_mut(court());
            panel.selection.insert(SlotId::new(2));
            panel.selection.insert(SlotId::new(1));
            panel.quote = QuoteState::Ready(quote(30.0));
        }

        let summary = BookingReducer::summary_for(&state, court());
        assert_eq!(summary.court_name, "Pista Central");
        assert_eq!(
            summary.slot_labels,
            vec!["09:00-10:00".to_string(), "10:00-11:00".to_string()]
        );
        assert_eq!(summary.total, Some(PriceValue::from(30.0)));
    }

    #[test]
    fn summary_falls_back_to_ids_without_a_catalog() {
        let mut state = ready_state();
        state.catalog = CatalogState::Loading;
        state.panel_mut(court()).selection.insert(SlotId::new(1));

        let summary = BookingReducer::summary_for(&state, court());
        assert_eq!(summary.court_name, "Pista 1");
        assert_eq!(summary.slot_labels, vec!["1".to_string()]);
        assert_eq!(summary.total, None);
    }
}
