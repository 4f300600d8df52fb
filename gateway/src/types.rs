//! Wire types for the club API.
//!
//! Field names on the wire are the API's Spanish names (`pista`, `horario`,
//! `franja`, `turno`); the Rust side uses domain names and maps with serde
//! renames. Unknown fields are ignored so the client tolerates additive
//! server changes.

use serde::{Deserialize, Serialize};

/// Unique identifier of a court (pista).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourtId(i64);

impl CourtId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CourtId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a time-slot definition (horario).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(i64);

impl SlotId {
    /// Wrap a raw id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Period of day a slot belongs to (turno).
///
/// Ordering follows the display convention: morning, afternoon, night, then
/// any other periods alphabetically.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Period {
    /// `mañana`
    Morning,
    /// `tarde`
    Afternoon,
    /// `noche`
    Night,
    /// Any other period label the server may introduce
    Other(String),
}

impl Period {
    const fn rank(&self) -> u8 {
        match self {
            Self::Morning => 0,
            Self::Afternoon => 1,
            Self::Night => 2,
            Self::Other(_) => 3,
        }
    }

    /// The wire label for this period.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Morning => "mañana",
            Self::Afternoon => "tarde",
            Self::Night => "noche",
            Self::Other(label) => label,
        }
    }
}

impl Default for Period {
    fn default() -> Self {
        Self::Other("otros".to_string())
    }
}

impl From<String> for Period {
    fn from(value: String) -> Self {
        match value.as_str() {
            "mañana" => Self::Morning,
            "tarde" => Self::Afternoon,
            "noche" => Self::Night,
            // Empty or missing labels fall into the catch-all bucket
            "" => Self::default(),
            _ => Self::Other(value),
        }
    }
}

impl From<Period> for String {
    fn from(period: Period) -> Self {
        period.as_str().to_string()
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match (self, other) {
            (Self::Other(a), Self::Other(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A monetary value as the API sent it.
///
/// The API is loose here: prices arrive as JSON numbers or as numeric
/// strings, and occasionally as something else entirely. The raw value is
/// kept and interpreted on demand, mirroring how the reference UI ran
/// everything through `Number(value)` before rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceValue(serde_json::Value);

impl PriceValue {
    /// The numeric interpretation, if there is one.
    ///
    /// Numbers pass through; strings are parsed; anything else (and
    /// non-finite parses) yields `None`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match &self.0 {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => {
                s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
            },
            _ => None,
        }
    }

    /// The raw JSON value.
    #[must_use]
    pub const fn raw(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<f64> for PriceValue {
    fn from(value: f64) -> Self {
        Self(serde_json::Number::from_f64(value).map_or(serde_json::Value::Null, Into::into))
    }
}

impl From<&str> for PriceValue {
    fn from(value: &str) -> Self {
        Self(serde_json::Value::String(value.to_string()))
    }
}

impl std::fmt::Display for PriceValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => write!(f, "{s}"),
            other => write!(f, "{other}"),
        }
    }
}

/// A bookable court.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Court {
    /// Court id
    pub id: CourtId,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Whether the court is covered
    #[serde(rename = "cubierta", default)]
    pub covered: bool,
    /// Player capacity
    #[serde(rename = "plazas", default)]
    pub capacity: u32,
    /// Base price per slot
    #[serde(rename = "precio_base")]
    pub base_price: PriceValue,
}

/// A fixed daily time window.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SlotDefinition {
    /// Slot id
    pub id: SlotId,
    /// Human-readable window, e.g. `09:00-10:00`
    #[serde(rename = "franja")]
    pub label: String,
    /// Period of day
    #[serde(rename = "turno", default)]
    pub period: Period,
}

/// One bookable slot inside an availability response.
///
/// The server sends richer objects; only the slot id is consumed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlot {
    /// Slot id that is currently free
    pub id: SlotId,
}

/// Free slots for one court on the requested date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CourtAvailability {
    /// Court id
    #[serde(rename = "pista_id")]
    pub court_id: CourtId,
    /// Slots currently free on that court
    #[serde(rename = "disponibilidades", default)]
    pub slots: Vec<AvailableSlot>,
}

/// A surcharge the pricing engine applied to a quote.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedSurcharge {
    /// Surcharge name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Surcharge amount
    #[serde(rename = "precio_extra")]
    pub amount: PriceValue,
}

/// A computed price for a tentative slot selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuote {
    /// Total price for the selection
    #[serde(rename = "total_precio", default)]
    pub total: Option<PriceValue>,
    /// Per-slot price breakdown, passed through opaquely
    #[serde(rename = "precio_por_franja", default)]
    pub per_slot: Option<serde_json::Value>,
    /// Surcharge applied on top of the base prices, if any
    #[serde(rename = "extra_aplicado", default)]
    pub surcharge: Option<AppliedSurcharge>,
}

/// One slot line inside a confirmed reservation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReservationSlot {
    /// Slot definition id
    #[serde(rename = "horario_id", default)]
    pub slot_id: Option<SlotId>,
    /// Id of this reservation line
    #[serde(rename = "horario_reserva_id", default)]
    pub line_id: Option<i64>,
    /// Time window label
    #[serde(rename = "franja", default)]
    pub label: Option<String>,
    /// Period of day
    #[serde(rename = "turno", default)]
    pub period: Option<Period>,
    /// Price of this slot line
    #[serde(rename = "precio", default)]
    pub price: Option<PriceValue>,
}

/// A confirmed reservation belonging to the authenticated user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReservationRecord {
    /// Reservation id
    pub id: i64,
    /// Court id
    #[serde(rename = "pista_id", default)]
    pub court_id: Option<CourtId>,
    /// Court display name, when the server includes it
    #[serde(rename = "pista_nombre", default)]
    pub court_name: Option<String>,
    /// Reservation date as sent by the server (`YYYY-MM-DD`)
    #[serde(rename = "fecha", default)]
    pub date: String,
    /// Total price of the reservation
    #[serde(rename = "total_precio", default)]
    pub total: Option<PriceValue>,
    /// Reserved slot lines
    #[serde(rename = "horarios", default)]
    pub slots: Vec<ReservationSlot>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn period_parses_known_labels() {
        assert_eq!(Period::from("mañana".to_string()), Period::Morning);
        assert_eq!(Period::from("tarde".to_string()), Period::Afternoon);
        assert_eq!(Period::from("noche".to_string()), Period::Night);
        assert_eq!(
            Period::from("madrugada".to_string()),
            Period::Other("madrugada".to_string())
        );
        assert_eq!(Period::from(String::new()), Period::default());
    }

    #[test]
    fn period_ordering_prefers_day_parts_then_alphabetical() {
        let mut periods = vec![
            Period::Other("b".to_string()),
            Period::Night,
            Period::Other("a".to_string()),
            Period::Morning,
            Period::Afternoon,
        ];
        periods.sort();
        assert_eq!(
            periods,
            vec![
                Period::Morning,
                Period::Afternoon,
                Period::Night,
                Period::Other("a".to_string()),
                Period::Other("b".to_string()),
            ]
        );
    }

    #[test]
    fn period_roundtrips_through_serde() {
        let slot: SlotDefinition =
            serde_json::from_str(r#"{"id": 3, "franja": "09:00-10:00", "turno": "mañana"}"#)
                .unwrap();
        assert_eq!(slot.period, Period::Morning);
        let json = serde_json::to_value(&slot).unwrap();
        assert_eq!(json["turno"], "mañana");
    }

    #[test]
    fn slot_without_period_falls_into_catch_all() {
        let slot: SlotDefinition =
            serde_json::from_str(r#"{"id": 7, "franja": "23:00-00:00"}"#).unwrap();
        assert_eq!(slot.period, Period::Other("otros".to_string()));
    }

    #[test]
    fn price_value_reads_numbers_and_numeric_strings() {
        assert_eq!(PriceValue::from(15.0).as_f64(), Some(15.0));
        assert_eq!(PriceValue::from("12.50").as_f64(), Some(12.5));
        assert_eq!(PriceValue::from(" 8 ").as_f64(), Some(8.0));
        assert_eq!(PriceValue::from("gratis").as_f64(), None);
    }

    #[test]
    fn court_maps_wire_names() {
        let court: Court = serde_json::from_str(
            r#"{"id": 1, "nombre": "Pista Central", "cubierta": true, "plazas": 4, "precio_base": 10.0}"#,
        )
        .unwrap();
        assert_eq!(court.id, CourtId::new(1));
        assert_eq!(court.name, "Pista Central");
        assert!(court.covered);
        assert_eq!(court.capacity, 4);
        assert_eq!(court.base_price.as_f64(), Some(10.0));
    }

    #[test]
    fn availability_tolerates_extra_slot_fields() {
        let avail: CourtAvailability = serde_json::from_str(
            r#"{"pista_id": 2, "disponibilidades": [{"id": 5, "estado": "libre"}]}"#,
        )
        .unwrap();
        assert_eq!(avail.court_id, CourtId::new(2));
        assert_eq!(avail.slots, vec![AvailableSlot { id: SlotId::new(5) }]);
    }

    #[test]
    fn quote_fields_are_all_optional() {
        let quote: PriceQuote = serde_json::from_str(r#"{"total_precio": "15.00"}"#).unwrap();
        assert_eq!(quote.total.as_ref().and_then(PriceValue::as_f64), Some(15.0));
        assert!(quote.per_slot.is_none());
        assert!(quote.surcharge.is_none());
    }

    #[test]
    fn reservation_record_maps_nested_slots() {
        let record: ReservationRecord = serde_json::from_str(
            r#"{
                "id": 9,
                "pista_id": 1,
                "pista_nombre": "Pista Central",
                "fecha": "2024-06-01",
                "total_precio": 30,
                "horarios": [
                    {"horario_id": 2, "horario_reserva_id": 14, "franja": "10:00-11:00", "turno": "mañana", "precio": 15}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(record.court_name.as_deref(), Some("Pista Central"));
        assert_eq!(record.slots.len(), 1);
        assert_eq!(record.slots[0].slot_id, Some(SlotId::new(2)));
        assert_eq!(record.slots[0].period, Some(Period::Morning));
    }
}
