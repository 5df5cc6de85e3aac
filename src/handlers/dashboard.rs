// src/handlers/dashboard.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::dashboard::{AlertaDocumento, DashboardResumo},
};

// GET /api/dashboard/resumo
#[utoipa::path(
    get,
    path = "/api/dashboard/resumo",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Contadores da frota e dos esporádicos", body = DashboardResumo)
    )
)]
pub async fn get_resumo(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let resumo = app_state.dashboard_service.resumo(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(resumo)))
}

// GET /api/dashboard/alertas
#[utoipa::path(
    get,
    path = "/api/dashboard/alertas",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Documentos vencidos ou vencendo, do mais urgente ao mais folgado", body = Vec<AlertaDocumento>)
    )
)]
pub async fn get_alertas(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let alertas = app_state.dashboard_service.alertas(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(alertas)))
}
