// src/handlers/relatorios.rs

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::i18n::Locale,
    models::relatorio::ExportarAgregadosPayload,
};

// POST /api/relatorios/agregados
#[utoipa::path(
    post,
    path = "/api/relatorios/agregados",
    tag = "Relatórios",
    request_body = ExportarAgregadosPayload,
    responses(
        (status = 200, description = "Arquivo CSV com as colunas selecionadas, no idioma do Accept-Language", content_type = "text/csv", body = String),
        (status = 400, description = "Nenhum campo selecionado")
    )
)]
pub async fn exportar_agregados(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(payload): Json<ExportarAgregadosPayload>,
) -> Result<Response, AppError> {
    let relatorio = app_state
        .relatorio_service
        .exportar_agregados(&app_state.db_pool, &payload, &locale.0)
        .await?;

    tracing::info!("Relatório {} gerado", relatorio.nome_arquivo);

    // Configura os headers para o navegador baixar o arquivo
    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
        (
            header::CONTENT_DISPOSITION,
            &format!("attachment; filename=\"{}\"", relatorio.nome_arquivo),
        ),
    ];

    Ok((headers, relatorio.conteudo).into_response())
}
