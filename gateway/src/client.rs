//! Club API client implementation.

use crate::{
    credentials::CredentialStore,
    error::GatewayError,
    types::{
        Court, CourtAvailability, CourtId, PriceQuote, ReservationRecord, SlotDefinition, SlotId,
    },
};
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// The remote operations the booking workflow depends on.
///
/// `ClubApiClient` is the production implementation; tests substitute mocks.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Fetch the court catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] for transport, server or decoding failures.
    async fn list_courts(&self) -> Result<Vec<Court>, GatewayError>;

    /// Fetch the time-slot catalog.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] for transport, server or decoding failures.
    async fn list_slots(&self) -> Result<Vec<SlotDefinition>, GatewayError>;

    /// Fetch per-court availability for a date.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] for transport, server or decoding failures.
    async fn availability(&self, date: NaiveDate)
    -> Result<Vec<CourtAvailability>, GatewayError>;

    /// Compute the price of a tentative slot selection on one court.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] for transport, server or decoding failures.
    async fn calculate_price(
        &self,
        court: CourtId,
        date: NaiveDate,
        slots: &[SlotId],
    ) -> Result<PriceQuote, GatewayError>;

    /// Confirm a reservation. The success body is not consumed.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] for transport or server failures.
    async fn reserve(
        &self,
        court: CourtId,
        date: NaiveDate,
        slots: &[SlotId],
    ) -> Result<(), GatewayError>;

    /// Fetch the authenticated user's reservations.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] for transport, server or decoding failures.
    async fn my_reservations(&self) -> Result<Vec<ReservationRecord>, GatewayError>;
}

#[derive(Deserialize)]
struct CourtsResponse {
    #[serde(default)]
    pistas: Vec<Court>,
}

#[derive(Deserialize)]
struct SlotsResponse {
    #[serde(default)]
    horarios: Vec<SlotDefinition>,
}

#[derive(Deserialize)]
struct AvailabilityResponse {
    #[serde(default)]
    disponibilidades_por_pista: Vec<CourtAvailability>,
}

#[derive(Deserialize)]
struct ReservationsResponse {
    #[serde(default)]
    reservas: Vec<ReservationRecord>,
}

#[derive(Serialize)]
struct AvailabilityRequest {
    fecha: NaiveDate,
}

#[derive(Serialize)]
struct CourtSelectionRequest<'a> {
    pista_id: CourtId,
    fecha: NaiveDate,
    horario_ids: &'a [SlotId],
}

/// Best-effort error message from the known server fields.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Typed HTTP client for the club API.
///
/// Attaches the stored bearer credential to every request when one is
/// present. No retries are performed at this layer.
#[derive(Clone)]
pub struct ClubApiClient {
    http: Client,
    base_url: String,
    credentials: CredentialStore,
}

impl ClubApiClient {
    /// Create a client for the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>, credentials: CredentialStore) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            http: Client::new(),
            base_url,
            credentials,
        }
    }

    /// Create a client from `COURTSIDE_API_URL`, seeding the credential store
    /// from `COURTSIDE_ACCESS_TOKEN` when that is set.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::MissingBaseUrl`] if `COURTSIDE_API_URL` is not set.
    pub fn from_env() -> Result<Self, GatewayError> {
        let base_url =
            std::env::var("COURTSIDE_API_URL").map_err(|_| GatewayError::MissingBaseUrl)?;
        let credentials =
            CredentialStore::with_token(std::env::var("COURTSIDE_ACCESS_TOKEN").ok());

        Ok(Self::new(base_url, credentials))
    }

    /// The credential store this client reads from.
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = self.credentials.get() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn execute(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GatewayError> {
        let response = builder
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Non-2xx: extract a message from the known fields, best effort.
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .filter(|m| !m.is_empty());

        Err(match message {
            Some(message) => GatewayError::Http {
                status: status.as_u16(),
                message,
            },
            None => GatewayError::http_fallback(status.as_u16()),
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, GatewayError> {
        tracing::debug!(path, "GET");
        let response = self.execute(self.request(reqwest::Method::GET, path)).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        tracing::debug!(path, "POST");
        let response = self
            .execute(self.request(reqwest::Method::POST, path).json(body))
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BookingGateway for ClubApiClient {
    async fn list_courts(&self) -> Result<Vec<Court>, GatewayError> {
        let response: CourtsResponse = self.get_json("/api/pistas").await?;
        Ok(response.pistas)
    }

    async fn list_slots(&self) -> Result<Vec<SlotDefinition>, GatewayError> {
        let response: SlotsResponse = self.get_json("/api/horarios").await?;
        Ok(response.horarios)
    }

    async fn availability(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<CourtAvailability>, GatewayError> {
        let response: AvailabilityResponse = self
            .post_json("/api/disponibilidad", &AvailabilityRequest { fecha: date })
            .await?;
        Ok(response.disponibilidades_por_pista)
    }

    async fn calculate_price(
        &self,
        court: CourtId,
        date: NaiveDate,
        slots: &[SlotId],
    ) -> Result<PriceQuote, GatewayError> {
        self.post_json(
            "/api/calcular_precio",
            &CourtSelectionRequest {
                pista_id: court,
                fecha: date,
                horario_ids: slots,
            },
        )
        .await
    }

    async fn reserve(
        &self,
        court: CourtId,
        date: NaiveDate,
        slots: &[SlotId],
    ) -> Result<(), GatewayError> {
        // Only success/failure matters; the body is not consumed.
        self.execute(
            self.request(reqwest::Method::POST, "/api/reservar")
                .json(&CourtSelectionRequest {
                    pista_id: court,
                    fecha: date,
                    horario_ids: slots,
                }),
        )
        .await?;
        Ok(())
    }

    async fn my_reservations(&self) -> Result<Vec<ReservationRecord>, GatewayError> {
        let response: ReservationsResponse = self.get_json("/api/mis_reservas").await?;
        Ok(response.reservas)
    }
}
