use crate::router::create_router;
use crate::schemas::AppState;
use crate::services::{FlightOffersSource, ProviderError, SummaryGenerator};
use async_trait::async_trait;
use axum::Router;
use common::DemandInsights;
use compute::offers::{Dictionaries, FlightOffer, FlightOffersResponse, Itinerary, OfferPrice, Segment};
use moka::future::Cache;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// What the fake flight provider answers with
#[derive(Debug, Clone)]
pub enum FlightsBehaviour {
    Offers(FlightOffersResponse),
    AuthFailure,
    SearchFailure,
}

/// Flight provider double recording every search
pub struct FakeFlights {
    behaviour: FlightsBehaviour,
    calls: AtomicUsize,
    destinations: Mutex<Vec<String>>,
}

impl FakeFlights {
    pub fn new(behaviour: FlightsBehaviour) -> Arc<Self> {
        Arc::new(Self {
            behaviour,
            calls: AtomicUsize::new(0),
            destinations: Mutex::new(Vec::new()),
        })
    }

    pub fn with_offers(offers: FlightOffersResponse) -> Arc<Self> {
        Self::new(FlightsBehaviour::Offers(offers))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn destinations(&self) -> Vec<String> {
        self.destinations.lock().unwrap().clone()
    }
}

#[async_trait]
impl FlightOffersSource for FakeFlights {
    async fn search_offers(&self, destination: &str) -> Result<FlightOffersResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.destinations.lock().unwrap().push(destination.to_string());
        match &self.behaviour {
            FlightsBehaviour::Offers(offers) => Ok(offers.clone()),
            FlightsBehaviour::AuthFailure => Err(ProviderError::Authentication("invalid client".into())),
            FlightsBehaviour::SearchFailure => Err(ProviderError::Status {
                status: 400,
                body: "unknown location".into(),
            }),
        }
    }

    fn provider_name(&self) -> String {
        "fake-flights".to_string()
    }
}

/// Summary provider double; `None` makes every call fail
pub struct FakeSummarizer {
    reply: Option<String>,
    calls: AtomicUsize,
}

impl FakeSummarizer {
    pub fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Some(reply.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SummaryGenerator for FakeSummarizer {
    async fn summarize(&self, _insights: &DemandInsights) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.reply.clone().ok_or(ProviderError::EmptyReply)
    }

    fn provider_name(&self) -> String {
        "fake-summarizer".to_string()
    }
}

pub fn offer(carrier: &str, total: &str) -> FlightOffer {
    FlightOffer {
        price: OfferPrice {
            total: total.to_string(),
            currency: Some("EUR".to_string()),
        },
        itineraries: vec![Itinerary {
            segments: vec![Segment {
                carrier_code: carrier.to_string(),
            }],
        }],
    }
}

pub fn offers_response(offers: Vec<FlightOffer>) -> FlightOffersResponse {
    let carriers = HashMap::from([
        ("IB".to_string(), "IBERIA".to_string()),
        ("TP".to_string(), "TAP PORTUGAL".to_string()),
        ("UX".to_string(), "AIR EUROPA".to_string()),
    ]);
    FlightOffersResponse {
        data: offers,
        dictionaries: Some(Dictionaries { carriers }),
    }
}

/// Six offers over three airlines: TAP 3, IBERIA 2, AIR EUROPA 1
pub fn sample_offers() -> FlightOffersResponse {
    offers_response(vec![
        offer("TP", "100.00"),
        offer("IB", "80.00"),
        offer("TP", "120.00"),
        offer("UX", "70.00"),
        offer("TP", "110.00"),
        offer("IB", "90.50"),
    ])
}

/// Create AppState for testing
pub fn setup_test_app_state(flights: Arc<FakeFlights>, summarizer: Arc<FakeSummarizer>) -> AppState {
    let cache = Cache::new(100);
    AppState::new(flights, summarizer, compute::default_compute("EUR"), cache)
}

/// Create axum app for testing
pub fn setup_test_app(flights: Arc<FakeFlights>, summarizer: Arc<FakeSummarizer>) -> Router {
    create_router(setup_test_app_state(flights, summarizer), None)
}

/// Serves `router` on an ephemeral local port and returns its base URL.
///
/// Stands in for an external provider when exercising the real HTTP clients.
pub async fn spawn_provider_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", address)
}

/// Initialize tracing for tests with output to STDERR.
///
/// The log level is taken from RUST_LOG, defaulting to WARN.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| match level.to_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        })
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}
