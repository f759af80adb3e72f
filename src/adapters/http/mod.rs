//! HTTP adapter: axum REST surface over the prediction service.
//!
//! A thin front end: every handler deserializes, delegates to the
//! `PredictionService`, and serializes. No computation happens here.
//!
//! Routes:
//! - `GET /health`: liveness and model status
//! - `POST /predict`: single prediction
//! - `POST /predict-batch`: up to 100 records, per-item results
//! - `GET /model-info`: loaded artifact metadata

use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};

use crate::application::PredictionService;
use crate::domain::{FieldError, PatientFeatures, PredictionResult, ValidationError};
use crate::ports::{Classifier, ModelInfo};
use crate::DiabriskError;

/// Build the application router over a loaded prediction service.
pub fn router<C>(service: Arc<PredictionService<C>>) -> Router
where
    C: Classifier + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::<C>))
        .route("/predict", post(predict::<C>))
        .route("/predict-batch", post(predict_batch::<C>))
        .route("/model-info", get(model_info::<C>))
        .layer(cors)
        .with_state(service)
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    model_loaded: bool,
    service: &'static str,
}

#[derive(Debug, Serialize)]
struct BatchItem {
    /// 1-based position of the record in the request
    patient_id: usize,
    #[serde(flatten)]
    result: Option<PredictionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ValidationError>,
}

#[derive(Debug, Serialize)]
struct BatchResponse {
    total_patients: usize,
    predictions: Vec<BatchItem>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<Vec<FieldError>>,
}

/// HTTP-facing error: status code plus structured reason.
struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl From<DiabriskError> for ApiError {
    fn from(err: DiabriskError) -> Self {
        match err {
            DiabriskError::Validation(e) => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                body: ErrorBody {
                    error: "validation failed".into(),
                    fields: Some(e.fields),
                },
            },
            DiabriskError::Batch(reason) => Self {
                status: StatusCode::BAD_REQUEST,
                body: ErrorBody {
                    error: reason,
                    fields: None,
                },
            },
            other => {
                tracing::error!("Prediction failed: {other}");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: ErrorBody {
                        error: "internal prediction error".into(),
                        fields: None,
                    },
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

async fn health<C: Classifier>(
    State(_service): State<Arc<PredictionService<C>>>,
) -> Json<HealthResponse> {
    // The process refuses to start without a loaded model, so reaching this
    // handler implies the artifact is resident.
    Json(HealthResponse {
        status: "healthy",
        model_loaded: true,
        service: "Diabetes Prediction API",
    })
}

async fn predict<C: Classifier>(
    State(service): State<Arc<PredictionService<C>>>,
    Json(patient): Json<PatientFeatures>,
) -> Result<Json<PredictionResult>, ApiError> {
    let result = service.predict_one(&patient)?;
    Ok(Json(result))
}

async fn predict_batch<C: Classifier>(
    State(service): State<Arc<PredictionService<C>>>,
    Json(patients): Json<Vec<PatientFeatures>>,
) -> Result<Json<BatchResponse>, ApiError> {
    let outcomes = service.predict_many(&patients)?;

    let predictions = outcomes
        .into_iter()
        .enumerate()
        .map(|(i, outcome)| match outcome {
            Ok(result) => BatchItem {
                patient_id: i + 1,
                result: Some(result),
                error: None,
            },
            Err(e) => BatchItem {
                patient_id: i + 1,
                result: None,
                error: Some(e),
            },
        })
        .collect::<Vec<_>>();

    Ok(Json(BatchResponse {
        total_patients: predictions.len(),
        predictions,
    }))
}

async fn model_info<C: Classifier>(
    State(service): State<Arc<PredictionService<C>>>,
) -> Json<ModelInfo> {
    Json(service.model_info())
}
