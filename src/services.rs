pub mod situacao;
pub mod campo_service;
pub use campo_service::CampoService;
pub mod frota_service;
pub use frota_service::FrotaService;
pub mod esporadico_service;
pub use esporadico_service::EsporadicoService;
pub mod crm_service;
pub use crm_service::CrmService;
pub mod relatorio_service;
pub use relatorio_service::RelatorioService;
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
