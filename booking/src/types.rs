//! State and action types for the reservation-building workflow.
//!
//! The whole workflow is one state value reduced over actions. Commands come
//! from the user (mount, date change, slot toggles, submit); completions are
//! fed back by effects when gateway calls resolve. Per-court interactive
//! state lives in [`CourtPanel`] so courts never interfere with each other.

use chrono::NaiveDate;
use courtside_gateway::{Court, CourtId, Period, PriceQuote, PriceValue, SlotDefinition, SlotId};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// The court and slot catalogs, loaded together.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    /// All courts the club exposes
    pub courts: Vec<Court>,
    /// All slot definitions, shared by every court
    pub slots: Vec<SlotDefinition>,
}

impl Catalog {
    /// Courts in ascending id order for stable display.
    #[must_use]
    pub fn ordered_courts(&self) -> Vec<&Court> {
        let mut courts: Vec<&Court> = self.courts.iter().collect();
        courts.sort_by_key(|c| c.id);
        courts
    }

    /// Slots grouped by period: morning, afternoon, night, then any other
    /// periods alphabetically. Slots within a group are in id order.
    #[must_use]
    pub fn slots_by_period(&self) -> Vec<(Period, Vec<&SlotDefinition>)> {
        let mut groups: BTreeMap<Period, Vec<&SlotDefinition>> = BTreeMap::new();
        for slot in &self.slots {
            groups.entry(slot.period.clone()).or_default().push(slot);
        }
        groups
            .into_iter()
            .map(|(period, mut slots)| {
                slots.sort_by_key(|s| s.id);
                (period, slots)
            })
            .collect()
    }

    /// Display name of a court, if it exists in the catalog.
    #[must_use]
    pub fn court_name(&self, id: CourtId) -> Option<&str> {
        self.courts
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    /// Time-window label of a slot, if it exists in the catalog.
    #[must_use]
    pub fn slot_label(&self, id: SlotId) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.label.as_str())
    }
}

/// Lifecycle of the catalog fetch.
///
/// Courts and slots are fetched together and land atomically: either both
/// are present in `Ready` or the whole load is `Failed`.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CatalogState {
    /// Fetch in flight
    #[default]
    Loading,
    /// Both catalogs loaded
    Ready(Catalog),
    /// Either fetch failed
    Failed {
        /// User-facing error message
        error: String,
    },
}

impl CatalogState {
    /// The loaded catalog, when ready.
    #[must_use]
    pub const fn ready(&self) -> Option<&Catalog> {
        match self {
            Self::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }
}

/// Free slots per court for the currently selected date.
///
/// Every reload bumps a monotonically increasing sequence number; a reload
/// completion carrying any other number is stale and discarded. The counter
/// is never reset, so responses from before a date change can never be
/// mistaken for current data.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AvailabilityState {
    /// Whether a reload is in flight
    pub loading: bool,
    /// Error from the most recent reload, if it failed
    pub error: Option<String>,
    free: HashMap<CourtId, BTreeSet<SlotId>>,
    seq: u64,
}

impl AvailabilityState {
    /// Free slots for one court, if the court appeared in the last reload.
    #[must_use]
    pub fn free_for(&self, court: CourtId) -> Option<&BTreeSet<SlotId>> {
        self.free.get(&court)
    }

    /// Whether a slot is currently bookable on a court.
    #[must_use]
    pub fn is_free(&self, court: CourtId, slot: SlotId) -> bool {
        self.free.get(&court).is_some_and(|s| s.contains(&slot))
    }

    /// The sequence number of the most recently issued reload.
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    /// Start a new reload: bump the sequence, mark loading, clear the error.
    pub(crate) fn begin_reload(&mut self) -> u64 {
        self.seq += 1;
        self.loading = true;
        self.error = None;
        self.seq
    }

    /// Apply a reload completion. Returns `false` when it was stale.
    pub(crate) fn apply(
        &mut self,
        seq: u64,
        result: Result<HashMap<CourtId, BTreeSet<SlotId>>, String>,
    ) -> bool {
        if seq != self.seq {
            return false;
        }
        self.loading = false;
        match result {
            Ok(free) => {
                self.free = free;
                self.error = None;
            },
            Err(error) => {
                self.free.clear();
                self.error = Some(error);
            },
        }
        true
    }
}

/// Lifecycle of the debounced price quote for one court.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum QuoteState {
    /// No selection, nothing to price
    #[default]
    Idle,
    /// A quote has been scheduled or is in flight
    Pending,
    /// The latest quote for the current selection
    Ready(PriceQuote),
    /// The quote request failed
    Failed {
        /// User-facing error message
        error: String,
    },
}

/// Lifecycle of the reservation submission for one court.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SubmissionState {
    /// Nothing submitted
    #[default]
    Idle,
    /// A reservation request is in flight
    Submitting,
    /// The reservation was accepted
    Succeeded {
        /// Confirmation message to show inline
        message: String,
    },
    /// The reservation was rejected; selection and quote are retained
    Failed {
        /// Server-provided error message
        error: String,
    },
}

/// Interactive state for one court: selection, quote and submission.
///
/// Panels are created lazily on first interaction and dropped wholesale
/// when the date changes or a selection is cleared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CourtPanel {
    /// Selected slot ids, kept in ascending order
    pub selection: BTreeSet<SlotId>,
    /// Price quote for the current selection
    pub quote: QuoteState,
    /// Submission status
    pub submission: SubmissionState,
    /// Sequence number of the most recently scheduled quote for this court.
    /// Quote completions carrying any other number are stale.
    pub(crate) quote_seq: u64,
}

/// Complete state of the reservation-building workflow.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BookingState {
    /// The date being booked
    pub date: NaiveDate,
    /// Court and slot catalogs
    pub catalog: CatalogState,
    /// Free slots for the selected date
    pub availability: AvailabilityState,
    pub(crate) panels: HashMap<CourtId, CourtPanel>,
    /// Workflow-wide quote sequence counter. Never reset, so a stale quote
    /// completion can never collide with a later panel's sequence.
    pub(crate) quote_counter: u64,
}

impl BookingState {
    /// Create the state for a given initial date.
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    /// Snapshot of one court's panel. Courts without interaction yet read
    /// as an empty default panel.
    #[must_use]
    pub fn panel(&self, court: CourtId) -> CourtPanel {
        self.panels.get(&court).cloned().unwrap_or_default()
    }

    pub(crate) fn panel_mut(&mut self, court: CourtId) -> &mut CourtPanel {
        self.panels.entry(court).or_default()
    }

    pub(crate) const fn next_quote_seq(&mut self) -> u64 {
        self.quote_counter += 1;
        self.quote_counter
    }
}

/// Everything the confirmation prompt needs to describe a reservation.
#[derive(Clone, Debug, PartialEq)]
pub struct ReservationSummary {
    /// Court display name
    pub court_name: String,
    /// Reservation date
    pub date: NaiveDate,
    /// Time-window labels of the selected slots, in ascending slot order
    pub slot_labels: Vec<String>,
    /// Quoted total, when one is available
    pub total: Option<PriceValue>,
}

impl ReservationSummary {
    /// The confirmation text shown to the user.
    #[must_use]
    pub fn to_message(&self) -> String {
        format!(
            "Confirmar reserva\n\nPista: {}\nFecha: {}\nFranjas: {}\nTotal: {}",
            self.court_name,
            self.date.format("%Y-%m-%d"),
            self.slot_labels.join(", "),
            crate::format::euro_or_dash(self.total.as_ref()),
        )
    }
}

/// Actions driving the reservation-building workflow.
///
/// Commands come from the UI; the `*Loaded`/`*Resolved` completions are
/// produced by effects when gateway calls finish.
#[derive(Clone, Debug)]
pub enum BookingAction {
    /// The workflow screen was opened
    WorkflowMounted,
    /// The user picked a different date
    DateChanged(NaiveDate),
    /// The user tapped a slot on a court
    ToggleSlot {
        /// Court the slot belongs to
        court: CourtId,
        /// The tapped slot
        slot: SlotId,
    },
    /// The user cleared a court's selection
    ClearSelection {
        /// Court whose panel is discarded
        court: CourtId,
    },
    /// The user pressed the reserve button on a court
    SubmitPressed {
        /// Court to reserve
        court: CourtId,
    },
    /// The user accepted the confirmation prompt
    SubmitConfirmed {
        /// Court to reserve
        court: CourtId,
    },
    /// Both catalog fetches completed
    CatalogLoaded {
        /// Loaded catalog, or the first error
        result: Result<Catalog, String>,
    },
    /// An availability reload completed
    AvailabilityLoaded {
        /// Sequence number the reload was issued with
        seq: u64,
        /// Free slots per court, or the error
        result: Result<HashMap<CourtId, BTreeSet<SlotId>>, String>,
    },
    /// A debounced price quote resolved
    QuoteResolved {
        /// Court the quote was requested for
        court: CourtId,
        /// Sequence number the quote was scheduled with
        seq: u64,
        /// The quote, or the error
        result: Result<PriceQuote, String>,
    },
    /// The reservation request resolved
    SubmissionResolved {
        /// Court the reservation was for
        court: CourtId,
        /// Success, or the server's error message
        result: Result<(), String>,
    },
}
