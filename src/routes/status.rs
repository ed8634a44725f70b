use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::status_dto::StatusPayload,
    dto::vacancy_dto::{MessageResponse, VacancyResponse},
    error::Result,
    middleware::auth::AuthUser,
    routes::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/vacancies/{id}/statuses",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = StatusPayload,
    responses(
        (status = 201, description = "Status appended; vacancy returned with refreshed history", body = VacancyResponse),
        (status = 400, description = "Status rules violated"),
        (status = 403, description = "Vacancy belongs to another user"),
        (status = 404, description = "Vacancy or referenced resume not found")
    )
)]
#[axum::debug_handler]
pub async fn add_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<StatusPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.add_status(id, user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::from(vacancy))))
}

#[utoipa::path(
    patch,
    path = "/api/vacancies/{id}/statuses/{status_id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID"),
        ("status_id" = Uuid, Path, description = "Status record ID")
    ),
    request_body = StatusPayload,
    responses(
        (status = 200, description = "Status updated", body = VacancyResponse),
        (status = 400, description = "Status rules violated"),
        (status = 403, description = "Vacancy belongs to another user"),
        (status = 404, description = "Vacancy, status or resume not found")
    )
)]
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, status_id)): Path<(Uuid, Uuid)>,
    ApiJson(payload): ApiJson<StatusPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state
        .vacancy_service
        .update_status(id, status_id, user.id, payload)
        .await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    delete,
    path = "/api/vacancies/{id}/statuses/{status_id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID"),
        ("status_id" = Uuid, Path, description = "Status record ID")
    ),
    responses(
        (status = 200, description = "Status deleted", body = MessageResponse),
        (status = 400, description = "Status is the last one left on the vacancy"),
        (status = 403, description = "Vacancy belongs to another user"),
        (status = 404, description = "Vacancy or status not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path((id, status_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse> {
    state
        .vacancy_service
        .delete_status(id, status_id, user.id)
        .await?;
    Ok(Json(MessageResponse::new("Status successfully deleted")))
}
