// src/handlers/agregados.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::{
        agregado::{AgregadoComStatus, CreateAgregadoPayload, FiltroAgregados, UpdateAgregadoPayload},
        historico::AgregadoHistorico,
    },
};

// POST /api/agregados
#[utoipa::path(
    post,
    path = "/api/agregados",
    tag = "Agregados",
    request_body = CreateAgregadoPayload,
    responses(
        (status = 201, description = "Agregado cadastrado, com status e alertas já calculados", body = AgregadoComStatus),
        (status = 400, description = "Payload inválido ou campo configurável fora das regras")
    )
)]
pub async fn create_agregado(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAgregadoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let agregado = app_state
        .frota_service
        .create_agregado(&app_state.db_pool, payload)
        .await?;

    tracing::info!(
        "Agregado {} cadastrado (motorista: {})",
        agregado.agregado.id,
        agregado.agregado.nome_motorista
    );

    Ok((StatusCode::CREATED, Json(agregado)))
}

// GET /api/agregados
#[utoipa::path(
    get,
    path = "/api/agregados",
    tag = "Agregados",
    params(FiltroAgregados),
    responses(
        (status = 200, description = "Agregados com status derivado, filtrados", body = Vec<AgregadoComStatus>)
    )
)]
pub async fn list_agregados(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroAgregados>,
) -> Result<impl IntoResponse, AppError> {
    let agregados = app_state
        .frota_service
        .list_agregados(&app_state.db_pool, &filtro)
        .await?;

    Ok((StatusCode::OK, Json(agregados)))
}

// GET /api/agregados/alertas
#[utoipa::path(
    get,
    path = "/api/agregados/alertas",
    tag = "Agregados",
    responses(
        (status = 200, description = "Somente os agregados com algum documento vencido ou vencendo", body = Vec<AgregadoComStatus>)
    )
)]
pub async fn list_agregados_com_alerta(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let agregados = app_state
        .frota_service
        .list_com_alerta(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(agregados)))
}

// GET /api/agregados/{id}
#[utoipa::path(
    get,
    path = "/api/agregados/{id}",
    tag = "Agregados",
    params(("id" = Uuid, Path, description = "Id do agregado")),
    responses(
        (status = 200, description = "Agregado encontrado", body = AgregadoComStatus),
        (status = 404, description = "Agregado não encontrado")
    )
)]
pub async fn get_agregado(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let agregado = app_state
        .frota_service
        .get_agregado(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(agregado)))
}

// PUT /api/agregados/{id}
#[utoipa::path(
    put,
    path = "/api/agregados/{id}",
    tag = "Agregados",
    params(("id" = Uuid, Path, description = "Id do agregado")),
    request_body = UpdateAgregadoPayload,
    responses(
        (status = 200, description = "Agregado atualizado, com as alterações gravadas no histórico", body = AgregadoComStatus),
        (status = 400, description = "Payload inválido ou campo configurável fora das regras"),
        (status = 404, description = "Agregado não encontrado")
    )
)]
pub async fn update_agregado(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAgregadoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let agregado = app_state
        .frota_service
        .update_agregado(&app_state.db_pool, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(agregado)))
}

// DELETE /api/agregados/{id}
#[utoipa::path(
    delete,
    path = "/api/agregados/{id}",
    tag = "Agregados",
    params(("id" = Uuid, Path, description = "Id do agregado")),
    responses(
        (status = 204, description = "Agregado removido"),
        (status = 404, description = "Agregado não encontrado")
    )
)]
pub async fn delete_agregado(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .frota_service
        .delete_agregado(&app_state.db_pool, id)
        .await?;

    tracing::info!("Agregado {} removido", id);

    Ok(StatusCode::NO_CONTENT)
}

// GET /api/agregados/{id}/historico
#[utoipa::path(
    get,
    path = "/api/agregados/{id}/historico",
    tag = "Agregados",
    params(("id" = Uuid, Path, description = "Id do agregado")),
    responses(
        (status = 200, description = "Alterações do agregado, da mais recente para a mais antiga", body = Vec<AgregadoHistorico>),
        (status = 404, description = "Agregado não encontrado")
    )
)]
pub async fn list_historico(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let historico = app_state
        .frota_service
        .list_historico(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(historico)))
}
