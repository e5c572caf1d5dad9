use crate::services::price_service;
use crate::state::AppState;
use axum::{extract::{Query, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Deserialize)]
pub struct PricesQuery {
    pub tickers: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub async fn get_prices(
    State(state): State<AppState>,
    Query(query): Query<PricesQuery>,
) -> Result<Json<HashMap<String, Option<f64>>>, (StatusCode, Json<ErrorResponse>)> {
    match price_service::get_prices(&state.api, &query.tickers).await {
        Ok(prices) => Ok(Json(prices)),
        Err(err) => {
            tracing::error!("get_prices failed for {}: {}", query.tickers, err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    detail: format!("Failed to fetch prices: {}", err),
                }),
            ))
        }
    }
}
