// src/handlers/campos.rs

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
    models::campo::{
        CampoConfiguracao, CreateCampoPayload, FiltroCampos, FiltroCategorias,
        ReordenarCamposPayload, UpdateCampoPayload,
    },
};

// POST /api/campos
#[utoipa::path(
    post,
    path = "/api/campos",
    tag = "Campos",
    request_body = CreateCampoPayload,
    responses(
        (status = 201, description = "Campo criado no fim da ordem da tabela", body = CampoConfiguracao),
        (status = 400, description = "Payload inválido"),
        (status = 409, description = "Já existe campo com esse nome na tabela")
    )
)]
pub async fn create_campo(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCampoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let campo = app_state
        .campo_service
        .create_campo(&app_state.db_pool, payload)
        .await?;

    tracing::info!(
        "Campo '{}' criado para a tabela {}",
        campo.campo_nome,
        campo.tabela_nome
    );

    Ok((StatusCode::CREATED, Json(campo)))
}

// GET /api/campos
#[utoipa::path(
    get,
    path = "/api/campos",
    tag = "Campos",
    params(FiltroCampos),
    responses(
        (status = 200, description = "Campos da tabela na ordem de exibição", body = Vec<CampoConfiguracao>)
    )
)]
pub async fn list_campos(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroCampos>,
) -> Result<impl IntoResponse, AppError> {
    let campos = app_state
        .campo_service
        .list_campos(
            &app_state.db_pool,
            &filtro.tabela,
            filtro.categoria.as_deref(),
            filtro.incluir_inativos.unwrap_or(false),
        )
        .await?;

    Ok((StatusCode::OK, Json(campos)))
}

// GET /api/campos/categorias
#[utoipa::path(
    get,
    path = "/api/campos/categorias",
    tag = "Campos",
    params(FiltroCategorias),
    responses(
        (status = 200, description = "Categorias em uso pelos campos ativos da tabela", body = Vec<String>)
    )
)]
pub async fn list_categorias(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroCategorias>,
) -> Result<impl IntoResponse, AppError> {
    let categorias = app_state
        .campo_service
        .list_categorias(&app_state.db_pool, &filtro.tabela)
        .await?;

    Ok((StatusCode::OK, Json(categorias)))
}

// PUT /api/campos/reordenar
#[utoipa::path(
    put,
    path = "/api/campos/reordenar",
    tag = "Campos",
    request_body = ReordenarCamposPayload,
    responses(
        (status = 200, description = "Campos na nova ordem", body = Vec<CampoConfiguracao>),
        (status = 400, description = "A lista de ids não bate com os campos ativos da tabela")
    )
)]
pub async fn reordenar_campos(
    State(app_state): State<AppState>,
    Json(payload): Json<ReordenarCamposPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let campos = app_state
        .campo_service
        .reordenar_campos(&app_state.db_pool, &payload)
        .await?;

    Ok((StatusCode::OK, Json(campos)))
}

// PUT /api/campos/{id}
#[utoipa::path(
    put,
    path = "/api/campos/{id}",
    tag = "Campos",
    params(("id" = Uuid, Path, description = "Id do campo")),
    request_body = UpdateCampoPayload,
    responses(
        (status = 200, description = "Campo atualizado", body = CampoConfiguracao),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Campo não encontrado")
    )
)]
pub async fn update_campo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCampoPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let campo = app_state
        .campo_service
        .update_campo(&app_state.db_pool, id, payload)
        .await?;

    Ok((StatusCode::OK, Json(campo)))
}

// DELETE /api/campos/{id}
#[utoipa::path(
    delete,
    path = "/api/campos/{id}",
    tag = "Campos",
    params(("id" = Uuid, Path, description = "Id do campo")),
    responses(
        (status = 204, description = "Campo removido; os valores já gravados nos registros permanecem"),
        (status = 404, description = "Campo não encontrado")
    )
)]
pub async fn delete_campo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .campo_service
        .delete_campo(&app_state.db_pool, id)
        .await?;

    tracing::info!("Campo {} removido", id);

    Ok(StatusCode::NO_CONTENT)
}

// PUT /api/campos/{id}/ativo
#[utoipa::path(
    put,
    path = "/api/campos/{id}/ativo",
    tag = "Campos",
    params(("id" = Uuid, Path, description = "Id do campo")),
    responses(
        (status = 200, description = "Campo com o flag ativo invertido", body = CampoConfiguracao),
        (status = 404, description = "Campo não encontrado")
    )
)]
pub async fn alternar_campo_ativo(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let campo = app_state
        .campo_service
        .alternar_ativo(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(campo)))
}
