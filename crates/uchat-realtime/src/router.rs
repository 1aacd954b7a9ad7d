use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::{
    error::{RealtimeError, Result},
    provider::OrganicResult,
    service::{RealtimeService, WeatherLookup},
};

/// Routes for direct realtime lookups
pub fn endpoint_router() -> Router<Arc<RealtimeService>> {
    Router::new()
        .route("/realtime/search", get(realtime_search))
        .route("/news", get(news))
        .route("/fuel/petrol", get(fuel_petrol))
        .route("/weather", get(weather))
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    query: String,
    answer: Option<String>,
    results: Vec<OrganicResult>,
}

async fn realtime_search(
    State(service): State<Arc<RealtimeService>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    let query = params.q.trim();
    if query.is_empty() {
        return Err(RealtimeError::InvalidRequest("query (q) is required".to_owned()));
    }

    let results = service.search(query, RealtimeService::endpoint_results()).await?;

    Ok(Json(SearchResponse {
        query: query.to_owned(),
        answer: results.answer,
        results: results.organic,
    }))
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    #[serde(default)]
    q: String,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Serialize)]
struct NewsResponse {
    query: String,
    results: Vec<OrganicResult>,
}

async fn news(
    State(service): State<Arc<RealtimeService>>,
    Query(params): Query<NewsParams>,
) -> Result<Json<NewsResponse>> {
    let query = RealtimeService::news_query(&params.q, &params.category);
    let results = service.search(&query, RealtimeService::endpoint_results()).await?;

    Ok(Json(NewsResponse {
        query,
        results: results.organic,
    }))
}

#[derive(Debug, Deserialize)]
struct FuelParams {
    #[serde(default)]
    state: String,
    #[serde(default)]
    city: String,
}

#[derive(Debug, Serialize)]
struct FuelResponse {
    location: String,
    query: String,
    answer: Option<String>,
}

async fn fuel_petrol(
    State(service): State<Arc<RealtimeService>>,
    Query(params): Query<FuelParams>,
) -> Result<Json<FuelResponse>> {
    let location = [params.city.trim(), params.state.trim()]
        .into_iter()
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| service.fallback_location())
        .to_owned();

    let query = format!("petrol price in {location} today");
    let results = service.search(&query, 5).await?;
    let answer = results.best_answer().map(str::to_owned);

    Ok(Json(FuelResponse { location, query, answer }))
}

#[derive(Debug, Deserialize)]
struct WeatherParams {
    #[serde(default)]
    city: String,
}

async fn weather(
    State(service): State<Arc<RealtimeService>>,
    Query(params): Query<WeatherParams>,
) -> Result<Json<WeatherLookup>> {
    let city = params.city.trim();
    if city.is_empty() {
        return Err(RealtimeError::InvalidRequest("city is required".to_owned()));
    }

    Ok(Json(service.weather(city).await?))
}
