// src/config.rs

use crate::{
    db::{
        AgregadoRepository, CampoRepository, EsporadicoRepository, HistoricoRepository, LocalStore,
    },
    services::{
        CampoService, CrmService, DashboardService, EsporadicoService, FrotaService,
        RelatorioService,
    },
};
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub frota_service: FrotaService,
    pub esporadico_service: EsporadicoService,
    pub campo_service: CampoService,
    pub crm_service: CrmService,
    pub relatorio_service: RelatorioService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    // A assinatura retorna um Result!
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        // Leads e lembretes do CRM vivem em arquivos JSON neste diretório.
        let local_store_dir =
            env::var("LOCAL_STORE_DIR").unwrap_or_else(|_| "./dados".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?; // <-- Se falhar, retorna um Err em vez de dar panic ou exit

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let agregado_repo = AgregadoRepository::new();
        let esporadico_repo = EsporadicoRepository::new();
        let campo_repo = CampoRepository::new();
        let historico_repo = HistoricoRepository::new();
        let local_store = LocalStore::new(local_store_dir);

        let frota_service =
            FrotaService::new(agregado_repo.clone(), campo_repo.clone(), historico_repo);
        let esporadico_service =
            EsporadicoService::new(esporadico_repo.clone(), campo_repo.clone());
        let campo_service = CampoService::new(campo_repo.clone());
        let crm_service = CrmService::new(local_store);
        let relatorio_service = RelatorioService::new(agregado_repo.clone(), campo_repo);
        let dashboard_service = DashboardService::new(agregado_repo, esporadico_repo);

        // Retorna Ok com o estado montado
        Ok(Self {
            db_pool,
            frota_service,
            esporadico_service,
            campo_service,
            crm_service,
            relatorio_service,
            dashboard_service,
        })
    }
}
