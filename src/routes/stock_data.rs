use crate::models::StockSnapshot;
use crate::services::stock_service::{self, StockDataError};
use crate::state::AppState;
use axum::{extract::{Query, State}, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct StockDataQuery {
    pub ticker: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub async fn get_stock_data(
    State(state): State<AppState>,
    Query(query): Query<StockDataQuery>,
) -> Result<Json<StockSnapshot>, (StatusCode, Json<ErrorResponse>)> {
    match stock_service::get_stock_data(&state.api, &query.ticker).await {
        Ok(snapshot) => Ok(Json(snapshot)),
        Err(err) => {
            let status = match &err {
                StockDataError::NotFound => StatusCode::NOT_FOUND,
                StockDataError::InsufficientData | StockDataError::InvalidComputation => {
                    StatusCode::BAD_REQUEST
                }
                StockDataError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            if status == StatusCode::INTERNAL_SERVER_ERROR {
                tracing::error!("get_stock_data failed for {}: {}", query.ticker, err);
            }
            Err((
                status,
                Json(ErrorResponse {
                    detail: err.to_string(),
                }),
            ))
        }
    }
}
