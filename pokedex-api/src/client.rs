use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::error::ApiError;

pub const DEFAULT_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_REQUEST_INTERVAL: Duration = Duration::from_millis(100);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and (when successful) parsed JSON body of one GET request.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl FetchResponse {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body: Some(body),
        }
    }

    pub fn with_status(status: u16) -> Self {
        Self { status, body: None }
    }

    /// Only HTTP 200 counts as success; every other status means "absent".
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// The single network capability the export pipeline depends on.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, ApiError>;
}

/// Fetch `url` and deserialize a successful body into `T`.
///
/// A non-200 status comes back as [`ApiError::Status`] so callers can
/// choose between skipping and degrading.
pub async fn fetch_typed<F, T>(fetcher: &F, url: &str) -> Result<T, ApiError>
where
    F: Fetch,
    T: DeserializeOwned,
{
    let resp = fetcher.fetch(url).await?;
    match resp.body {
        Some(body) if resp.is_success() => serde_json::from_value(body)
            .map_err(|e| ApiError::invalid_payload(format!("{url}: {e}"))),
        _ => Err(ApiError::status(resp.status, url)),
    }
}

/// URL of the main payload for a Pokémon ID.
pub fn pokemon_url(base_url: &str, id: u32) -> String {
    format!("{}/pokemon/{}", base_url.trim_end_matches('/'), id)
}

/// URL of the encounter list for a Pokémon ID.
pub fn encounters_url(base_url: &str, id: u32) -> String {
    format!("{}/pokemon/{}/encounters", base_url.trim_end_matches('/'), id)
}

/// HTTP client for PokeAPI with a minimum spacing between requests.
///
/// The spacing is shared by every caller holding the client, so running
/// several Pokémon concurrently never exceeds one request per interval.
pub struct PokeApiClient {
    http: reqwest::Client,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl PokeApiClient {
    pub fn new(min_interval: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("pokedex-export/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            min_interval,
            last_request: Mutex::new(None),
        })
    }

    /// Wait until at least `min_interval` has passed since the last request.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl Fetch for PokeApiClient {
    async fn fetch(&self, url: &str) -> Result<FetchResponse, ApiError> {
        self.rate_limit().await;

        let resp = self.http.get(url).send().await?;
        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            log::debug!("GET {url} -> HTTP {status}");
            return Ok(FetchResponse::with_status(status));
        }

        let body: Value = resp.json().await?;
        Ok(FetchResponse {
            status,
            body: Some(body),
        })
    }
}
