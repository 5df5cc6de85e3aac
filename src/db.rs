pub mod agregado_repo;
pub use agregado_repo::AgregadoRepository;
pub mod esporadico_repo;
pub use esporadico_repo::EsporadicoRepository;
pub mod campo_repo;
pub use campo_repo::CampoRepository;
pub mod historico_repo;
pub use historico_repo::HistoricoRepository;
pub mod local_store;
pub use local_store::LocalStore;
