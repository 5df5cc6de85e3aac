pub mod agregado;
pub mod campo;
pub mod crm;
pub mod dashboard;
pub mod esporadico;
pub mod historico;
pub mod relatorio;
