use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use uuid::Uuid;

use crate::{
    dto::vacancy_dto::{
        CreateVacancyPayload, MessageResponse, UpdateVacancyPayload, VacancyListResponse,
        VacancyResponse,
    },
    error::Result,
    middleware::auth::AuthUser,
    routes::ApiJson,
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/vacancies",
    request_body = CreateVacancyPayload,
    responses(
        (status = 201, description = "Vacancy created with its initial saved status", body = VacancyResponse),
        (status = 400, description = "Invalid payload or link"),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<CreateVacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.create(user.id, payload).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::from(vacancy))))
}

#[utoipa::path(
    get,
    path = "/api/vacancies",
    responses(
        (status = 200, description = "Vacancies owned by the caller", body = VacancyListResponse),
        (status = 401, description = "Missing or invalid bearer token")
    )
)]
#[axum::debug_handler]
pub async fn list_vacancies(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<impl IntoResponse> {
    let items = state.vacancy_service.find_all(user.id).await?;
    Ok(Json(VacancyListResponse::from(items)))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy found", body = VacancyResponse),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn get_vacancy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.find_one(id, user.id).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    patch,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = UpdateVacancyPayload,
    responses(
        (status = 200, description = "Vacancy updated successfully", body = VacancyResponse),
        (status = 400, description = "Empty or invalid payload"),
        (status = 403, description = "Vacancy belongs to another user"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
    ApiJson(payload): ApiJson<UpdateVacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.update(id, user.id, payload).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    patch,
    path = "/api/vacancies/{id}/archive",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Archived flag toggled", body = VacancyResponse),
        (status = 403, description = "Vacancy belongs to another user"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn archive_vacancy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.archive(id, user.id).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    delete,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy and its statuses deleted", body = MessageResponse),
        (status = 403, description = "Vacancy belongs to another user"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    state.vacancy_service.remove(id, user.id).await?;
    Ok(Json(MessageResponse::new("Vacancy successfully deleted")))
}
