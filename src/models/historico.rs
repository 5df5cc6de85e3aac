// src/models/historico.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Uma linha por campo alterado em cada atualização de agregado.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct AgregadoHistorico {
    pub id: Uuid,
    pub agregado_id: Uuid,

    #[schema(example = "placa_veiculo")]
    pub campo_alterado: String,
    pub valor_anterior: Option<String>,
    pub valor_novo: Option<String>,
    pub usuario_alteracao: Option<String>,

    pub data_alteracao: DateTime<Utc>,
}
