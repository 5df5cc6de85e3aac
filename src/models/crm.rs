// src/models/crm.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    Novo,
    EmContato,
    Qualificado,
    Perdido,
    Convertido,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TipoLembrete {
    Ligacao,
    Reuniao,
    Email,
    Visita,
    Outro,
}

// --- LEAD ---

// Vive no armazenamento local, não no Postgres. O blob gravado usa camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrmLead {
    pub id: Uuid,

    pub nome: String,
    pub contato: String,
    pub email: Option<String>,
    pub tipo_veiculo: Option<String>,

    pub status: LeadStatus,
    pub origem: Option<String>,
    pub observacoes: Option<String>,

    pub data_inclusao: DateTime<Utc>,
    pub ultimo_contato: Option<DateTime<Utc>>,
    pub proximo_contato: Option<NaiveDate>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- LEMBRETE ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CrmLembrete {
    pub id: Uuid,

    pub titulo: String,
    pub descricao: Option<String>,
    pub data_hora: DateTime<Utc>,

    pub lead_id: Option<Uuid>,
    pub lead_nome: Option<String>,

    pub concluido: bool,
    pub tipo: TipoLembrete,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Agrupamento devolvido por /api/crm/lembretes/agenda
#[derive(Debug, Serialize, ToSchema)]
pub struct LembreteAgenda {
    pub hoje: Vec<CrmLembrete>,
    pub proximos: Vec<CrmLembrete>,
    pub atrasados: Vec<CrmLembrete>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadPayload {
    #[validate(length(min = 1, message = "O nome do lead é obrigatório."))]
    #[schema(example = "Marcos Andrade")]
    pub nome: String,

    #[validate(length(min = 1, message = "O contato do lead é obrigatório."))]
    #[schema(example = "11 98888-7777")]
    pub contato: String,

    #[validate(email(message = "E-mail inválido."))]
    #[schema(example = "marcos@email.com")]
    pub email: Option<String>,

    #[schema(example = "Toco")]
    pub tipo_veiculo: Option<String>,

    pub status: Option<LeadStatus>,

    #[schema(example = "Indicação")]
    pub origem: Option<String>,
    pub observacoes: Option<String>,

    #[schema(value_type = Option<String>, format = Date, example = "2024-09-01")]
    pub proximo_contato: Option<NaiveDate>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadPayload {
    #[validate(length(min = 1, message = "O nome do lead não pode ficar vazio."))]
    pub nome: Option<String>,
    #[validate(length(min = 1, message = "O contato do lead não pode ficar vazio."))]
    pub contato: Option<String>,
    #[validate(email(message = "E-mail inválido."))]
    pub email: Option<String>,
    pub tipo_veiculo: Option<String>,
    pub status: Option<LeadStatus>,
    pub origem: Option<String>,
    pub observacoes: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub proximo_contato: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLembretePayload {
    #[validate(length(min = 1, message = "O título do lembrete é obrigatório."))]
    #[schema(example = "Ligar para negociar tabela de frete")]
    pub titulo: String,

    pub descricao: Option<String>,

    #[schema(example = "2024-09-01T14:30:00Z")]
    pub data_hora: DateTime<Utc>,

    pub lead_id: Option<Uuid>,
    pub lead_nome: Option<String>,

    pub tipo: Option<TipoLembrete>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLembretePayload {
    #[validate(length(min = 1, message = "O título do lembrete não pode ficar vazio."))]
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub data_hora: Option<DateTime<Utc>>,
    pub lead_id: Option<Uuid>,
    pub lead_nome: Option<String>,
    pub concluido: Option<bool>,
    pub tipo: Option<TipoLembrete>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FiltroLeads {
    pub status: Option<LeadStatus>,
}

#[cfg(test)]
pub(crate) fn lead_exemplo(status: LeadStatus, proximo_contato: Option<NaiveDate>) -> CrmLead {
    CrmLead {
        id: Uuid::new_v4(),
        nome: "Marcos Andrade".to_string(),
        contato: "11 98888-7777".to_string(),
        email: None,
        tipo_veiculo: Some("Toco".to_string()),
        status,
        origem: None,
        observacoes: None,
        data_inclusao: Utc::now(),
        ultimo_contato: None,
        proximo_contato,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[cfg(test)]
pub(crate) fn lembrete_exemplo(data_hora: DateTime<Utc>, concluido: bool) -> CrmLembrete {
    CrmLembrete {
        id: Uuid::new_v4(),
        titulo: "Ligar para negociar tabela de frete".to_string(),
        descricao: None,
        data_hora,
        lead_id: None,
        lead_nome: None,
        concluido,
        tipo: TipoLembrete::Ligacao,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
