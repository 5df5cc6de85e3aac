// src/models/relatorio.rs

use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;

use super::agregado::StatusAgregado;

// Pedido de exportação: subconjunto ordenado de colunas + filtros aplicados.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportarAgregadosPayload {
    /// Chaves das colunas, na ordem em que devem sair no arquivo
    #[schema(example = json!(["nome_motorista", "placa_veiculo", "validade_cnh", "ativo"]))]
    pub campos: Vec<String>,

    /// Filtra pelo status derivado antes de exportar
    pub status: Option<StatusAgregado>,
    pub tipo_veiculo: Option<String>,
}

// Arquivo pronto para download.
#[derive(Debug)]
pub struct RelatorioCsv {
    pub nome_arquivo: String,
    pub conteudo: String,
}
