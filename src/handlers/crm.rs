// src/handlers/crm.rs

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
    models::crm::{
        CreateLeadPayload, CreateLembretePayload, CrmLead, CrmLembrete, FiltroLeads,
        LembreteAgenda, UpdateLeadPayload, UpdateLembretePayload,
    },
};

// =============================================================================
//  ÁREA 1: LEADS
// =============================================================================

// POST /api/crm/leads
#[utoipa::path(
    post,
    path = "/api/crm/leads",
    tag = "CRM",
    request_body = CreateLeadPayload,
    responses(
        (status = 201, description = "Lead criado", body = CrmLead),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn create_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state.crm_service.create_lead(payload).await?;

    tracing::info!("Lead {} criado ({})", lead.id, lead.nome);

    Ok((StatusCode::CREATED, Json(lead)))
}

// GET /api/crm/leads
#[utoipa::path(
    get,
    path = "/api/crm/leads",
    tag = "CRM",
    params(FiltroLeads),
    responses(
        (status = 200, description = "Leads cadastrados, opcionalmente filtrados por status", body = Vec<CrmLead>)
    )
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    Query(filtro): Query<FiltroLeads>,
) -> Result<impl IntoResponse, AppError> {
    let leads = app_state.crm_service.list_leads(filtro.status).await?;

    Ok((StatusCode::OK, Json(leads)))
}

// GET /api/crm/leads/pendentes
#[utoipa::path(
    get,
    path = "/api/crm/leads/pendentes",
    tag = "CRM",
    responses(
        (status = 200, description = "Leads abertos com contato previsto para hoje ou atrasado", body = Vec<CrmLead>)
    )
)]
pub async fn list_leads_pendentes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let leads = app_state.crm_service.list_leads_pendentes().await?;

    Ok((StatusCode::OK, Json(leads)))
}

// PUT /api/crm/leads/{id}
#[utoipa::path(
    put,
    path = "/api/crm/leads/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "Id do lead")),
    request_body = UpdateLeadPayload,
    responses(
        (status = 200, description = "Lead atualizado, com o último contato renovado", body = CrmLead),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLeadPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lead = app_state.crm_service.update_lead(id, payload).await?;

    Ok((StatusCode::OK, Json(lead)))
}

// DELETE /api/crm/leads/{id}
#[utoipa::path(
    delete,
    path = "/api/crm/leads/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "Id do lead")),
    responses(
        (status = 204, description = "Lead removido"),
        (status = 404, description = "Lead não encontrado")
    )
)]
pub async fn delete_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_service.delete_lead(id).await?;

    tracing::info!("Lead {} removido", id);

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ÁREA 2: LEMBRETES
// =============================================================================

// POST /api/crm/lembretes
#[utoipa::path(
    post,
    path = "/api/crm/lembretes",
    tag = "CRM",
    request_body = CreateLembretePayload,
    responses(
        (status = 201, description = "Lembrete criado", body = CrmLembrete),
        (status = 400, description = "Payload inválido")
    )
)]
pub async fn create_lembrete(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateLembretePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lembrete = app_state.crm_service.create_lembrete(payload).await?;

    tracing::info!("Lembrete {} criado ({})", lembrete.id, lembrete.titulo);

    Ok((StatusCode::CREATED, Json(lembrete)))
}

// GET /api/crm/lembretes
#[utoipa::path(
    get,
    path = "/api/crm/lembretes",
    tag = "CRM",
    responses(
        (status = 200, description = "Todos os lembretes", body = Vec<CrmLembrete>)
    )
)]
pub async fn list_lembretes(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let lembretes = app_state.crm_service.list_lembretes().await?;

    Ok((StatusCode::OK, Json(lembretes)))
}

// GET /api/crm/lembretes/agenda
#[utoipa::path(
    get,
    path = "/api/crm/lembretes/agenda",
    tag = "CRM",
    responses(
        (status = 200, description = "Lembretes abertos agrupados em hoje, próximos sete dias e atrasados", body = LembreteAgenda)
    )
)]
pub async fn get_agenda(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let agenda = app_state.crm_service.agenda().await?;

    Ok((StatusCode::OK, Json(agenda)))
}

// PUT /api/crm/lembretes/{id}
#[utoipa::path(
    put,
    path = "/api/crm/lembretes/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "Id do lembrete")),
    request_body = UpdateLembretePayload,
    responses(
        (status = 200, description = "Lembrete atualizado", body = CrmLembrete),
        (status = 400, description = "Payload inválido"),
        (status = 404, description = "Lembrete não encontrado")
    )
)]
pub async fn update_lembrete(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLembretePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let lembrete = app_state.crm_service.update_lembrete(id, payload).await?;

    Ok((StatusCode::OK, Json(lembrete)))
}

// DELETE /api/crm/lembretes/{id}
#[utoipa::path(
    delete,
    path = "/api/crm/lembretes/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "Id do lembrete")),
    responses(
        (status = 204, description = "Lembrete removido"),
        (status = 404, description = "Lembrete não encontrado")
    )
)]
pub async fn delete_lembrete(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.crm_service.delete_lembrete(id).await?;

    tracing::info!("Lembrete {} removido", id);

    Ok(StatusCode::NO_CONTENT)
}

// PUT /api/crm/lembretes/{id}/concluido
#[utoipa::path(
    put,
    path = "/api/crm/lembretes/{id}/concluido",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "Id do lembrete")),
    responses(
        (status = 200, description = "Lembrete com o flag concluído invertido", body = CrmLembrete),
        (status = 404, description = "Lembrete não encontrado")
    )
)]
pub async fn alternar_lembrete_concluido(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let lembrete = app_state.crm_service.toggle_concluido(id).await?;

    Ok((StatusCode::OK, Json(lembrete)))
}
