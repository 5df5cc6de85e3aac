//src/main.rs

use axum::{
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

// Importações principais
use crate::config::AppState;
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // Inicializa o logger, que movemos para o main.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Lida com o Result retornado por AppState::new()
    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Faz o app rodar as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Cadastro da frota fixa
    let agregado_routes = Router::new()
        .route(
            "/",
            post(handlers::agregados::create_agregado).get(handlers::agregados::list_agregados),
        )
        .route("/alertas", get(handlers::agregados::list_agregados_com_alerta))
        .route(
            "/{id}",
            get(handlers::agregados::get_agregado)
                .put(handlers::agregados::update_agregado)
                .delete(handlers::agregados::delete_agregado),
        )
        .route("/{id}/historico", get(handlers::agregados::list_historico));

    // Contratações de curta duração
    let esporadico_routes = Router::new()
        .route(
            "/",
            post(handlers::esporadicos::create_esporadico)
                .get(handlers::esporadicos::list_esporadicos),
        )
        .route(
            "/alertas",
            get(handlers::esporadicos::list_esporadicos_com_alerta),
        )
        .route(
            "/{id}",
            get(handlers::esporadicos::get_esporadico)
                .put(handlers::esporadicos::update_esporadico)
                .delete(handlers::esporadicos::delete_esporadico),
        );

    // Campos configuráveis dos cadastros
    let campo_routes = Router::new()
        .route(
            "/",
            post(handlers::campos::create_campo).get(handlers::campos::list_campos),
        )
        .route("/categorias", get(handlers::campos::list_categorias))
        .route("/reordenar", put(handlers::campos::reordenar_campos))
        .route(
            "/{id}",
            put(handlers::campos::update_campo).delete(handlers::campos::delete_campo),
        )
        .route("/{id}/ativo", put(handlers::campos::alternar_campo_ativo));

    // Leads e lembretes
    let crm_routes = Router::new()
        .route(
            "/leads",
            post(handlers::crm::create_lead).get(handlers::crm::list_leads),
        )
        .route("/leads/pendentes", get(handlers::crm::list_leads_pendentes))
        .route(
            "/leads/{id}",
            put(handlers::crm::update_lead).delete(handlers::crm::delete_lead),
        )
        .route(
            "/lembretes",
            post(handlers::crm::create_lembrete).get(handlers::crm::list_lembretes),
        )
        .route("/lembretes/agenda", get(handlers::crm::get_agenda))
        .route(
            "/lembretes/{id}",
            put(handlers::crm::update_lembrete).delete(handlers::crm::delete_lembrete),
        )
        .route(
            "/lembretes/{id}/concluido",
            put(handlers::crm::alternar_lembrete_concluido),
        );

    let relatorio_routes =
        Router::new().route("/agregados", post(handlers::relatorios::exportar_agregados));

    let dashboard_routes = Router::new()
        .route("/resumo", get(handlers::dashboard::get_resumo))
        .route("/alertas", get(handlers::dashboard::get_alertas));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/agregados", agregado_routes)
        .nest("/api/esporadicos", esporadico_routes)
        .nest("/api/campos", campo_routes)
        .nest("/api/crm", crm_routes)
        .nest("/api/relatorios", relatorio_routes)
        .nest("/api/dashboard", dashboard_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app) // .into_make_service() não é mais necessário nas versões recentes de Axum
        .await
        .expect("Erro no servidor Axum");
}
