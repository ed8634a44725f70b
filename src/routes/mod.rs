pub mod health;
pub mod status;
pub mod vacancy;

use axum::{
    extract::FromRequest,
    routing::{get, patch, post},
    Json, Router,
};
use utoipa::OpenApi;

use crate::dto::status_dto::{StatusPayload, StatusResponse};
use crate::dto::vacancy_dto::{
    CreateVacancyPayload, MessageResponse, UpdateVacancyPayload, VacancyListResponse,
    VacancyResponse,
};
use crate::error::Error;
use crate::middleware::auth::require_bearer_auth;
use crate::models::vacancy::WorkType;
use crate::models::vacancy_status::{RejectReason, StatusName};
use crate::AppState;

/// `Json` extractor whose rejections render through `Error` (400 + JSON body).
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

#[derive(OpenApi)]
#[openapi(
    paths(
        vacancy::create_vacancy,
        vacancy::list_vacancies,
        vacancy::get_vacancy,
        vacancy::update_vacancy,
        vacancy::archive_vacancy,
        vacancy::delete_vacancy,
        status::add_status,
        status::update_status,
        status::delete_status,
    ),
    components(schemas(
        CreateVacancyPayload,
        UpdateVacancyPayload,
        VacancyResponse,
        VacancyListResponse,
        MessageResponse,
        StatusPayload,
        StatusResponse,
        WorkType,
        StatusName,
        RejectReason,
    )),
    tags((name = "vacancies", description = "Vacancy tracking and status history"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Full application router. Everything under `/api/vacancies` requires a
/// bearer token; health and docs are public.
pub fn router(state: AppState) -> Router {
    let vacancies = Router::new()
        .route(
            "/api/vacancies",
            get(vacancy::list_vacancies).post(vacancy::create_vacancy),
        )
        .route(
            "/api/vacancies/:id",
            get(vacancy::get_vacancy)
                .patch(vacancy::update_vacancy)
                .delete(vacancy::delete_vacancy),
        )
        .route(
            "/api/vacancies/:id/archive",
            patch(vacancy::archive_vacancy),
        )
        .route("/api/vacancies/:id/statuses", post(status::add_status))
        .route(
            "/api/vacancies/:id/statuses/:status_id",
            patch(status::update_status).delete(status::delete_status),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.verifier.clone(),
            require_bearer_auth,
        ));

    Router::new()
        .route("/health", get(health::health))
        .route("/api/openapi.json", get(openapi_json))
        .merge(vacancies)
        .with_state(state)
}
