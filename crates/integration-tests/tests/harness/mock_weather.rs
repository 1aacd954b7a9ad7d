//! Mock OpenWeather current conditions backend

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Query, State};
use axum::{Json, Router, routing};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

/// Temperature reported for every city
pub const TEMP_C: f64 = 21.5;

/// Mock weather provider
pub struct MockWeather {
    addr: SocketAddr,
    shutdown: CancellationToken,
    cities: Arc<Mutex<Vec<String>>>,
}

impl MockWeather {
    pub async fn start() -> anyhow::Result<Self> {
        let cities = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .route("/data/2.5/weather", routing::get(handle_weather))
            .with_state(Arc::clone(&cities));

        let (addr, shutdown) = super::spawn_mock(app).await?;

        Ok(Self { addr, shutdown, cities })
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Cities requested so far
    pub fn cities(&self) -> Vec<String> {
        self.cities.lock().unwrap().clone()
    }
}

impl Drop for MockWeather {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_weather(
    State(cities): State<Arc<Mutex<Vec<String>>>>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let city = params.get("q").cloned().unwrap_or_default();
    cities.lock().unwrap().push(city.clone());

    Json(json!({
        "name": city,
        "main": {"temp": TEMP_C, "humidity": 60},
        "weather": [{"description": "clear sky"}],
        "wind": {"speed": 3.2}
    }))
}
