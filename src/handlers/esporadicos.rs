// src/handlers/esporadicos.rs

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
        agregado::FiltroAgregados,
        esporadico::{CreateEsporadicoPayload, EsporadicoComStatus, UpdateEsporadicoPayload},
    },
};

// POST /api/esporadicos
#[utoipa::path(
    post,
    path = "/api/esporadicos",
    tag = "Esporádicos",
    request_body = CreateEsporadicoPayload,
    responses(
        (status = 201, description = "Esporádico cadastrado, com status e alertas já calculados", body = EsporadicoComStatus),
        (status = 400, description = "Payload inválido ou campo configurável fora das regras")
    )
)]
pub async fn create_esporadico(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateEsporadicoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let esporadico = app_state
        .esporadico_service
        .create_esporadico(&app_state.db_pool, payload)
        .await?;

    tracing::info!(
        "Esporádico {} cadastrado (motorista: {})",
        esporadico.esporadico.id,
        esporadico.esporadico.nome_motorista
    );

    Ok((StatusCode::CREATED, Json(esporadico)))
}

// GET /api/esporadicos
#[utoipa::path(
    get,
    path = "/api/esporadicos",
    tag = "Esporádicos",
    params(FiltroAgregados),
    responses(
        (status = 200, description = "Esporádicos com status derivado, filtrados", body = Vec<EsporadicoComStatus>)
    )
)]
pub async fn list_esporadicos(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroAgregados>,
) -> Result<impl IntoResponse, AppError> {
    let esporadicos = app_state
        .esporadico_service
        .list_esporadicos(&app_state.db_pool, &filtro)
        .await?;

    Ok((StatusCode::OK, Json(esporadicos)))
}

// GET /api/esporadicos/alertas
#[utoipa::path(
    get,
    path = "/api/esporadicos/alertas",
    tag = "Esporádicos",
    responses(
        (status = 200, description = "Somente os esporádicos com algum documento vencido ou vencendo", body = Vec<EsporadicoComStatus>)
    )
)]
pub async fn list_esporadicos_com_alerta(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let esporadicos = app_state
        .esporadico_service
        .list_com_alerta(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(esporadicos)))
}

// GET /api/esporadicos/{id}
#[utoipa::path(
    get,
    path = "/api/esporadicos/{id}",
    tag = "Esporádicos",
    params(("id" = Uuid, Path, description = "Id do esporádico")),
    responses(
        (status = 200, description = "Esporádico encontrado", body = EsporadicoComStatus),
        (status = 404, description = "Esporádico não encontrado")
    )
)]
pub async fn get_esporadico(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let esporadico = app_state
        .esporadico_service
        .get_esporadico(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(esporadico)))
}

// PUT /api/esporadicos/{id}
#[utoipa::path(
    put,
    path = "/api/esporadicos/{id}",
    tag = "Esporádicos",
    params(("id" = Uuid, Path, description = "Id do esporádico")),
    request_body = UpdateEsporadicoPayload,
    responses(
        (status = 200, description = "Esporádico atualizado", body = EsporadicoComStatus),
        (status = 400, description = "Payload inválido ou campo configurável fora das regras"),
        (status = 404, description = "Esporádico não encontrado")
    )
)]
pub async fn update_esporadico(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEsporadicoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let esporadico = app_state
        .esporadico_service
        .update_esporadico(&app_state.db_pool, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(esporadico)))
}

// DELETE /api/esporadicos/{id}
#[utoipa::path(
    delete,
    path = "/api/esporadicos/{id}",
    tag = "Esporádicos",
    params(("id" = Uuid, Path, description = "Id do esporádico")),
    responses(
        (status = 204, description = "Esporádico removido"),
        (status = 404, description = "Esporádico não encontrado")
    )
)]
pub async fn delete_esporadico(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .esporadico_service
        .delete_esporadico(&app_state.db_pool, id)
        .await?;

    tracing::info!("Esporádico {} removido", id);

    Ok(StatusCode::NO_CONTENT)
}
