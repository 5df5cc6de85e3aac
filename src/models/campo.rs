// src/models/campo.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// --- ENUMS ---

// Mapeia o CREATE TYPE campo_tipo do banco
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "campo_tipo", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CampoTipo {
    Text,
    Number,
    Date,
    Select,
    Boolean,
    Textarea,
}

// --- DEFINIÇÃO DE CAMPO (O Molde) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct CampoConfiguracao {
    pub id: Uuid,

    pub tabela_nome: String,
    pub campo_nome: String,   // Ex: "telefone_emergencia"
    pub campo_label: String,  // Ex: "Telefone de Emergência"
    pub campo_tipo: CampoTipo,
    pub campo_obrigatorio: bool,

    // Opções para selects. No Postgres é TEXT[], no Rust é Vec<String>.
    pub campo_opcoes: Vec<String>,

    pub campo_categoria: String,
    pub campo_ordem: i32,
    pub campo_ativo: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCampoPayload {
    #[validate(length(min = 1, message = "A tabela do campo é obrigatória."))]
    #[schema(example = "agregados")]
    pub tabela_nome: String,

    #[validate(length(min = 1, message = "O nome do campo é obrigatório."))]
    #[schema(example = "Telefone de Emergência")]
    pub campo_nome: String,

    #[validate(length(min = 1, message = "O label do campo é obrigatório."))]
    #[schema(example = "Telefone de Emergência")]
    pub campo_label: String,

    #[schema(example = "text")]
    pub campo_tipo: CampoTipo,

    #[serde(default)]
    pub campo_obrigatorio: bool,

    #[serde(default)]
    #[schema(example = json!(["Sim", "Não"]))]
    pub campo_opcoes: Vec<String>,

    #[schema(example = "contato")]
    pub campo_categoria: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateCampoPayload {
    #[validate(length(min = 1, message = "O nome do campo não pode ficar vazio."))]
    pub campo_nome: Option<String>,
    #[validate(length(min = 1, message = "O label do campo não pode ficar vazio."))]
    pub campo_label: Option<String>,
    pub campo_tipo: Option<CampoTipo>,
    pub campo_obrigatorio: Option<bool>,
    pub campo_opcoes: Option<Vec<String>>,
    pub campo_categoria: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ReordenarCamposPayload {
    #[validate(length(min = 1, message = "A tabela do campo é obrigatória."))]
    #[schema(example = "agregados")]
    pub tabela_nome: String,

    /// Ids dos campos ativos da tabela, na nova ordem
    #[validate(length(min = 1, message = "Informe ao menos um campo para reordenar."))]
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FiltroCampos {
    /// Tabela lógica dona dos campos (ex: "agregados", "agregados_esporadicos")
    pub tabela: String,
    pub categoria: Option<String>,
    /// Inclui campos desativados na resposta
    pub incluir_inativos: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FiltroCategorias {
    pub tabela: String,
}

#[cfg(test)]
pub(crate) fn campo_exemplo(nome: &str, categoria: &str, ordem: i32) -> CampoConfiguracao {
    CampoConfiguracao {
        id: Uuid::new_v4(),
        tabela_nome: "agregados".to_string(),
        campo_nome: nome.to_string(),
        campo_label: nome.to_string(),
        campo_tipo: CampoTipo::Text,
        campo_obrigatorio: false,
        campo_opcoes: Vec::new(),
        campo_categoria: categoria.to_string(),
        campo_ordem: ordem,
        campo_ativo: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
