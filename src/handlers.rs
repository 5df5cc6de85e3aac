pub mod agregados;
pub mod campos;
pub mod crm;
pub mod dashboard;
pub mod esporadicos;
pub mod relatorios;
