use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;

use super::domain::{AssessmentRequest, TopicContribution};
use super::repository::TopicStore;
use super::service::IccService;

/// Router builder exposing scoring, suggestion and topic-bank endpoints.
pub fn icc_router<S>(service: Arc<IccService<S>>) -> Router
where
    S: TopicStore + 'static,
{
    Router::new()
        .route("/api/v1/icc/assessments", post(assess_handler::<S>))
        .route("/api/v1/icc/suggestions", get(suggestions_handler::<S>))
        .route(
            "/api/v1/icc/topics",
            get(list_topics_handler::<S>).post(contribute_handler::<S>),
        )
        .route("/api/v1/icc/rubric", get(rubric_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestionQuery {
    #[serde(default)]
    topic: String,
}

pub(crate) async fn assess_handler<S>(
    State(service): State<Arc<IccService<S>>>,
    axum::Json(request): axum::Json<AssessmentRequest>,
) -> Result<Response, AppError>
where
    S: TopicStore + 'static,
{
    let report = service.assess(request)?;
    Ok((StatusCode::OK, axum::Json(report)).into_response())
}

pub(crate) async fn suggestions_handler<S>(
    State(service): State<Arc<IccService<S>>>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Response, AppError>
where
    S: TopicStore + 'static,
{
    let suggestions = service.suggest(&query.topic)?;
    let payload = json!({
        "topic": query.topic,
        "suggestions": suggestions,
    });
    Ok((StatusCode::OK, axum::Json(payload)).into_response())
}

pub(crate) async fn list_topics_handler<S>(
    State(service): State<Arc<IccService<S>>>,
) -> Result<Response, AppError>
where
    S: TopicStore + 'static,
{
    let topics = service.topics()?;
    Ok((StatusCode::OK, axum::Json(topics)).into_response())
}

pub(crate) async fn contribute_handler<S>(
    State(service): State<Arc<IccService<S>>>,
    axum::Json(contribution): axum::Json<TopicContribution>,
) -> Result<Response, AppError>
where
    S: TopicStore + 'static,
{
    let outcome = service.contribute(contribution)?;
    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, axum::Json(outcome)).into_response())
}

pub(crate) async fn rubric_handler<S>(State(service): State<Arc<IccService<S>>>) -> Response
where
    S: TopicStore + 'static,
{
    let engine = service.engine();
    let payload = json!({
        "criteria": engine.rubric().criteria(),
        "weight_policy": engine.weight_policy(),
        "rating_policy": engine.rating_policy(),
        "curation_candidates": service.curation_candidates(),
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}
