use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{
    ActorId, JobId, Shortlist, ShortlistId, ShortlistItemStatus, WorkerId,
};
use super::registry::{JobRegistry, WorkerRegistry};
use super::repository::ShortlistRepository;
use super::service::{ShortlistService, ShortlistServiceError};

type SharedService<J, W, S> = Arc<ShortlistService<J, W, S>>;

/// Router builder exposing shortlist generation and the recruiter workflow over HTTP.
pub fn shortlist_router<J, W, S>(service: SharedService<J, W, S>) -> Router
where
    J: JobRegistry + 'static,
    W: WorkerRegistry + 'static,
    S: ShortlistRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs/:job_id/shortlist",
            post(generate_handler::<J, W, S>).get(active_handler::<J, W, S>),
        )
        .route(
            "/api/v1/jobs/:job_id/shortlists",
            get(history_handler::<J, W, S>),
        )
        .route(
            "/api/v1/shortlists/:shortlist_id/items/:worker_id/status",
            put(status_handler::<J, W, S>),
        )
        .route(
            "/api/v1/workers/:worker_id/promotion",
            post(promotion_handler::<J, W, S>),
        )
        .with_state(service)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ActorRequest {
    pub actor: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StatusRequest {
    pub status: String,
    pub actor: String,
}

/// Wire view of a shortlist with status counts for list screens.
#[derive(Debug, Clone, Serialize)]
pub struct ShortlistView {
    #[serde(flatten)]
    pub shortlist: Shortlist,
    pub active: bool,
    pub suggested: usize,
    pub contacted: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl From<Shortlist> for ShortlistView {
    fn from(shortlist: Shortlist) -> Self {
        Self {
            active: shortlist.is_active(),
            suggested: shortlist.count_by_status(ShortlistItemStatus::Suggested),
            contacted: shortlist.count_by_status(ShortlistItemStatus::Contacted),
            approved: shortlist.count_by_status(ShortlistItemStatus::Approved),
            rejected: shortlist.count_by_status(ShortlistItemStatus::Rejected),
            shortlist,
        }
    }
}

pub(crate) async fn generate_handler<J, W, S>(
    State(service): State<SharedService<J, W, S>>,
    Path(job_id): Path<String>,
    Json(request): Json<ActorRequest>,
) -> Response
where
    J: JobRegistry + 'static,
    W: WorkerRegistry + 'static,
    S: ShortlistRepository + 'static,
{
    match service.generate_shortlist(&JobId(job_id), &ActorId(request.actor)) {
        Ok(shortlist) => {
            (StatusCode::CREATED, Json(ShortlistView::from(shortlist))).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn active_handler<J, W, S>(
    State(service): State<SharedService<J, W, S>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRegistry + 'static,
    W: WorkerRegistry + 'static,
    S: ShortlistRepository + 'static,
{
    let job_id = JobId(job_id);
    match service.get_shortlist(&job_id) {
        Ok(Some(shortlist)) => {
            (StatusCode::OK, Json(ShortlistView::from(shortlist))).into_response()
        }
        Ok(None) => {
            let payload = json!({
                "error": format!("no shortlist generated for job {job_id}"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn history_handler<J, W, S>(
    State(service): State<SharedService<J, W, S>>,
    Path(job_id): Path<String>,
) -> Response
where
    J: JobRegistry + 'static,
    W: WorkerRegistry + 'static,
    S: ShortlistRepository + 'static,
{
    match service.shortlist_history(&JobId(job_id)) {
        Ok(history) => {
            let views: Vec<ShortlistView> = history.into_iter().map(ShortlistView::from).collect();
            (StatusCode::OK, Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<J, W, S>(
    State(service): State<SharedService<J, W, S>>,
    Path((shortlist_id, worker_id)): Path<(String, String)>,
    Json(request): Json<StatusRequest>,
) -> Response
where
    J: JobRegistry + 'static,
    W: WorkerRegistry + 'static,
    S: ShortlistRepository + 'static,
{
    let Some(status) = ShortlistItemStatus::parse(&request.status) else {
        let payload = json!({
            "error": format!("unknown shortlist status '{}'", request.status),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
    };

    match service.set_item_status(
        &ShortlistId(shortlist_id),
        &WorkerId(worker_id),
        status,
        &ActorId(request.actor),
    ) {
        Ok(change) => (StatusCode::OK, Json(change)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn promotion_handler<J, W, S>(
    State(service): State<SharedService<J, W, S>>,
    Path(worker_id): Path<String>,
    Json(request): Json<ActorRequest>,
) -> Response
where
    J: JobRegistry + 'static,
    W: WorkerRegistry + 'static,
    S: ShortlistRepository + 'static,
{
    let worker_id = WorkerId(worker_id);
    match service.confirm_promotion(&worker_id, &ActorId(request.actor)) {
        Ok(promoted) => {
            let payload = json!({
                "worker_id": worker_id.0,
                "promoted": promoted,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) fn error_status(error: &ShortlistServiceError) -> StatusCode {
    match error {
        ShortlistServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ShortlistServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ShortlistServiceError::Conflict(_) => StatusCode::CONFLICT,
        ShortlistServiceError::Infrastructure(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn error_response(error: ShortlistServiceError) -> Response {
    let status = error_status(&error);
    let payload = json!({
        "error": error.to_string(),
    });
    (status, Json(payload)).into_response()
}
