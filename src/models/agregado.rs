// src/models/agregado.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// --- STATUS DERIVADO ---

// Nunca é persistido: calculado a partir do flag ativo e das datas de vencimento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusAgregado {
    Ativo,
    Inativo,
    Pendente,
}

// --- AGREGADO (O Dado) ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Agregado {
    pub id: Uuid,

    pub data_inclusao: NaiveDate,
    pub data_saida: Option<NaiveDate>,

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

    // Valores dos campos configuráveis { "nome_do_campo": valor }
    pub dados_extras: Value,

    pub ativo: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resposta de listagem/consulta: o registro mais o que é derivado dele.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AgregadoComStatus {
    #[serde(flatten)]
    pub agregado: Agregado,
    pub status: StatusAgregado,
    pub alertas: Vec<String>,
}

// --- PAYLOADS ---

// Default do serde para Value é null; campos dinâmicos ausentes são um objeto vazio.
pub(crate) fn dados_extras_padrao() -> Value {
    Value::Object(serde_json::Map::new())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAgregadoPayload {
    #[schema(value_type = Option<String>, format = Date, example = "2024-08-01")]
    pub data_inclusao: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Date)]
    pub data_saida: Option<NaiveDate>,

    #[validate(length(min = 1, message = "A placa do veículo é obrigatória."))]
    #[schema(example = "ABC-1234")]
    pub placa_veiculo: String,

    #[validate(length(min = 1, message = "O tipo do veículo é obrigatório."))]
    #[schema(example = "Truck")]
    pub tipo_veiculo: String,
    pub cor_veiculo: Option<String>,

    #[validate(length(min = 1, message = "O nome do motorista é obrigatório."))]
    #[schema(example = "João Silva")]
    pub nome_motorista: String,
    pub contato_motorista: Option<String>,

    #[validate(length(min = 1, message = "O número da CNH é obrigatório."))]
    #[schema(example = "12345678900")]
    pub numero_cnh: String,

    #[validate(length(min = 1, message = "A categoria da CNH é obrigatória."))]
    #[schema(example = "E")]
    pub categoria_cnh: String,

    #[schema(value_type = String, format = Date, example = "2026-05-20")]
    pub validade_cnh: NaiveDate,
    pub pontos_cnh: Option<i32>,
    pub escolaridade: Option<String>,
    pub estado_civil: Option<String>,
    pub nome_pai: Option<String>,

    pub numero_antt: Option<String>,

    #[validate(length(min = 1, message = "O proprietário do veículo é obrigatório."))]
    #[schema(example = "Transportes Lima ME")]
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
    #[schema(value_type = Option<String>, format = Date, example = "2025-12-31")]
    pub data_crlv: Option<NaiveDate>,

    pub observacoes: Option<String>,

    #[serde(default = "dados_extras_padrao")]
    #[schema(example = json!({"telefone_emergencia": "11 98888-7777"}))]
    pub dados_extras: Value,

    pub ativo: Option<bool>,
}

// Patch parcial: só o que vier preenchido é alterado.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAgregadoPayload {
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

    // Quando presente, substitui o objeto inteiro.
    pub dados_extras: Option<Value>,

    pub ativo: Option<bool>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FiltroAgregados {
    /// Trecho do nome do motorista, da placa ou do proprietário
    pub busca: Option<String>,
    pub status: Option<StatusAgregado>,
    pub tipo_veiculo: Option<String>,
}

#[cfg(test)]
pub(crate) fn agregado_exemplo() -> Agregado {
    Agregado {
        id: Uuid::new_v4(),
        data_inclusao: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        data_saida: None,
        placa_veiculo: "ABC-1234".to_string(),
        tipo_veiculo: "Truck".to_string(),
        cor_veiculo: Some("Branco".to_string()),
        nome_motorista: "João Silva".to_string(),
        contato_motorista: Some("11 99999-0000".to_string()),
        numero_cnh: "12345678900".to_string(),
        categoria_cnh: "E".to_string(),
        validade_cnh: NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(),
        pontos_cnh: Some(3),
        escolaridade: None,
        estado_civil: None,
        nome_pai: None,
        numero_antt: Some("123456".to_string()),
        proprietario_veiculo: "Transportes Lima ME".to_string(),
        contato_proprietario: None,
        cpf_proprietario: None,
        rg_proprietario: None,
        endereco_proprietario: None,
        escolaridade_proprietario: None,
        estado_civil_proprietario: None,
        nome_pai_proprietario: None,
        restricoes_rota: None,
        capacidade_carga_toneladas: Some(Decimal::new(145, 1)),
        capacidade_carga_m3: None,
        porta_lateral: Some(true),
        quantidade_pallets: Some(28),
        pernoite: Some(false),
        local_pernoite: None,
        boa_conduta: Some(true),
        rastreador: Some(true),
        data_detizacao: None,
        data_vigilancia_sanitaria: None,
        data_crlv: Some(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()),
        observacoes: None,
        dados_extras: json!({}),
        ativo: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
