// src/models/dashboard.rs

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

// Cards do topo do painel.
#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResumo {
    pub total_agregados: i64,
    pub agregados_ativos: i64,
    pub agregados_inativos: i64,

    /// Registros (agregados e esporádicos) com algum documento vencido ou vencendo
    pub documentos_vencendo: i64,

    /// Placas distintas somando agregados e esporádicos
    pub total_veiculos: i64,

    pub total_esporadicos: i64,
    /// Esporádicos incluídos no mês corrente
    pub esporadicos_no_mes: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SeveridadeAlerta {
    Destructive,
    Warning,
}

// Uma entrada do feed de alertas de documentos.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertaDocumento {
    /// "CNH", "CRLV", "Vigilância" ou "Detetização"
    pub tipo: String,
    #[schema(example = "CNH de João Silva vence em 15 dias")]
    pub mensagem: String,
    pub severidade: SeveridadeAlerta,
    #[schema(value_type = String, format = Date)]
    pub data: NaiveDate,
}
