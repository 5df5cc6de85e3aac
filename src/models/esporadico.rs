// src/models/esporadico.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::agregado::{dados_extras_padrao, StatusAgregado};

// --- ESPORÁDICO (O Dado) ---

// Mesma estrutura do agregado, com data de saída obrigatória.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct EsporadicoAgregado {
    pub id: Uuid,

    pub data_inclusao: NaiveDate,
    pub data_saida: NaiveDate,

    // Veículo
    pub placa_veiculo: String,
    pub tipo_veiculo: String,
    pub cor_veiculo: Option<String>,

    // Motorista
    pub nome_motorista: String,
    pub contato_motorista: Option<String>,
    pub numero_cnh: String,
    pub categoria_cnh: String,
    pub validade_cnh: NaiveDate,
    pub pontos_cnh: Option<i32>,
    pub escolaridade: Option<String>,
    pub estado_civil: Option<String>,
    pub nome_pai: Option<String>,

    pub numero_antt: Option<String>,

    // Proprietário do veículo
    pub proprietario_veiculo: String,
    pub contato_proprietario: Option<String>,
    pub cpf_proprietario: Option<String>,
    pub rg_proprietario: Option<String>,
    pub endereco_proprietario: Option<String>,
    pub escolaridade_proprietario: Option<String>,
    pub estado_civil_proprietario: Option<String>,
    pub nome_pai_proprietario: Option<String>,

    // Operação
    pub restricoes_rota: Option<String>,
    pub capacidade_carga_toneladas: Option<Decimal>,
    pub capacidade_carga_m3: Option<Decimal>,
    pub porta_lateral: Option<bool>,
    pub quantidade_pallets: Option<i32>,
    pub pernoite: Option<bool>,
    pub local_pernoite: Option<String>,
    pub boa_conduta: Option<bool>,
    pub rastreador: Option<bool>,

    // Documentos com vencimento próprio
    pub data_detizacao: Option<NaiveDate>,
    pub data_vigilancia_sanitaria: Option<NaiveDate>,
    pub data_crlv: Option<NaiveDate>,

    pub observacoes: Option<String>,

    pub dados_extras: Value,

    pub ativo: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EsporadicoComStatus {
    #[serde(flatten)]
    pub esporadico: EsporadicoAgregado,
    pub status: StatusAgregado,
    pub alertas: Vec<String>,
}

// --- PAYLOADS ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEsporadicoPayload {
    #[schema(value_type = Option<String>, format = Date)]
    pub data_inclusao: Option<NaiveDate>,

    #[schema(value_type = String, format = Date, example = "2024-09-30")]
    pub data_saida: NaiveDate,

    #[validate(length(min = 1, message = "A placa do veículo é obrigatória."))]
    #[schema(example = "XYZ-5678")]
    pub placa_veiculo: String,

    #[validate(length(min = 1, message = "O tipo do veículo é obrigatório."))]
    #[schema(example = "Carreta")]
    pub tipo_veiculo: String,
    pub cor_veiculo: Option<String>,

    #[validate(length(min = 1, message = "O nome do motorista é obrigatório."))]
    pub nome_motorista: String,
    pub contato_motorista: Option<String>,

    #[validate(length(min = 1, message = "O número da CNH é obrigatório."))]
    pub numero_cnh: String,

    #[validate(length(min = 1, message = "A categoria da CNH é obrigatória."))]
    pub categoria_cnh: String,

    #[schema(value_type = String, format = Date)]
    pub validade_cnh: NaiveDate,
    pub pontos_cnh: Option<i32>,
    pub escolaridade: Option<String>,
    pub estado_civil: Option<String>,
    pub nome_pai: Option<String>,

    pub numero_antt: Option<String>,

    #[validate(length(min = 1, message = "O proprietário do veículo é obrigatório."))]
    pub proprietario_veiculo: String,
    pub contato_proprietario: Option<String>,
    pub cpf_proprietario: Option<String>,
    pub rg_proprietario: Option<String>,
    pub endereco_proprietario: Option<String>,
    pub escolaridade_proprietario: Option<String>,
    pub estado_civil_proprietario: Option<String>,
    pub nome_pai_proprietario: Option<String>,

    pub restricoes_rota: Option<String>,
    pub capacidade_carga_toneladas: Option<Decimal>,
    pub capacidade_carga_m3: Option<Decimal>,
    pub porta_lateral: Option<bool>,
    pub quantidade_pallets: Option<i32>,
    pub pernoite: Option<bool>,
    pub local_pernoite: Option<String>,
    pub boa_conduta: Option<bool>,
    pub rastreador: Option<bool>,

    #[schema(value_type = Option<String>, format = Date)]
    pub data_detizacao: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub data_vigilancia_sanitaria: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub data_crlv: Option<NaiveDate>,

    pub observacoes: Option<String>,

    #[serde(default = "dados_extras_padrao")]
    pub dados_extras: Value,

    pub ativo: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEsporadicoPayload {
    #[schema(value_type = Option<String>, format = Date)]
    pub data_inclusao: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub data_saida: Option<NaiveDate>,

    #[validate(length(min = 1, message = "A placa do veículo não pode ficar vazia."))]
    pub placa_veiculo: Option<String>,
    #[validate(length(min = 1, message = "O tipo do veículo não pode ficar vazio."))]
    pub tipo_veiculo: Option<String>,
    pub cor_veiculo: Option<String>,

    #[validate(length(min = 1, message = "O nome do motorista não pode ficar vazio."))]
    pub nome_motorista: Option<String>,
    pub contato_motorista: Option<String>,
    pub numero_cnh: Option<String>,
    pub categoria_cnh: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub validade_cnh: Option<NaiveDate>,
    pub pontos_cnh: Option<i32>,
    pub escolaridade: Option<String>,
    pub estado_civil: Option<String>,
    pub nome_pai: Option<String>,

    pub numero_antt: Option<String>,

    pub proprietario_veiculo: Option<String>,
    pub contato_proprietario: Option<String>,
    pub cpf_proprietario: Option<String>,
    pub rg_proprietario: Option<String>,
    pub endereco_proprietario: Option<String>,
    pub escolaridade_proprietario: Option<String>,
    pub estado_civil_proprietario: Option<String>,
    pub nome_pai_proprietario: Option<String>,

    pub restricoes_rota: Option<String>,
    pub capacidade_carga_toneladas: Option<Decimal>,
    pub capacidade_carga_m3: Option<Decimal>,
    pub porta_lateral: Option<bool>,
    pub quantidade_pallets: Option<i32>,
    pub pernoite: Option<bool>,
    pub local_pernoite: Option<String>,
    pub boa_conduta: Option<bool>,
    pub rastreador: Option<bool>,

    #[schema(value_type = Option<String>, format = Date)]
    pub data_detizacao: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub data_vigilancia_sanitaria: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub data_crlv: Option<NaiveDate>,

    pub observacoes: Option<String>,

    pub dados_extras: Option<Value>,

    pub ativo: Option<bool>,
}

#[cfg(test)]
pub(crate) fn esporadico_exemplo() -> EsporadicoAgregado {
    use serde_json::json;

    EsporadicoAgregado {
        id: Uuid::new_v4(),
        data_inclusao: NaiveDate::from_ymd_opt(2024, 8, 5).unwrap(),
        data_saida: NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
        placa_veiculo: "XYZ-5678".to_string(),
        tipo_veiculo: "Carreta".to_string(),
        cor_veiculo: None,
        nome_motorista: "Carlos Pereira".to_string(),
        contato_motorista: None,
        numero_cnh: "98765432100".to_string(),
        categoria_cnh: "E".to_string(),
        validade_cnh: NaiveDate::from_ymd_opt(2027, 3, 10).unwrap(),
        pontos_cnh: None,
        escolaridade: None,
        estado_civil: None,
        nome_pai: None,
        numero_antt: None,
        proprietario_veiculo: "Carlos Pereira".to_string(),
        contato_proprietario: None,
        cpf_proprietario: None,
        rg_proprietario: None,
        endereco_proprietario: None,
        escolaridade_proprietario: None,
        estado_civil_proprietario: None,
        nome_pai_proprietario: None,
        restricoes_rota: None,
        capacidade_carga_toneladas: None,
        capacidade_carga_m3: None,
        porta_lateral: None,
        quantidade_pallets: None,
        pernoite: None,
        local_pernoite: None,
        boa_conduta: None,
        rastreador: None,
        data_detizacao: None,
        data_vigilancia_sanitaria: None,
        data_crlv: None,
        observacoes: None,
        dados_extras: json!({}),
        ativo: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
