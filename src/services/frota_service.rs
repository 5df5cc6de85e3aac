// src/services/frota_service.rs

use chrono::Utc;
use serde_json::Value;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AgregadoRepository, CampoRepository, HistoricoRepository},
    models::{
        agregado::{
            Agregado, AgregadoComStatus, CreateAgregadoPayload, FiltroAgregados,
            UpdateAgregadoPayload,
        },
        historico::AgregadoHistorico,
    },
    services::{campo_service, situacao},
};

// (campo, valor anterior, valor novo)
type Alteracao = (String, Option<String>, Option<String>);

fn valor_como_texto(valor: &Value) -> Option<String> {
    match valor {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        outro => Some(outro.to_string()),
    }
}

/// Compara o registro antes e depois da atualização, campo a campo.
/// `updated_at` muda em toda atualização e fica de fora da trilha.
pub(crate) fn diff_campos(
    antes: &Agregado,
    depois: &Agregado,
) -> Result<Vec<Alteracao>, AppError> {
    let (Value::Object(antes), Value::Object(depois)) =
        (serde_json::to_value(antes)?, serde_json::to_value(depois)?)
    else {
        return Ok(Vec::new());
    };

    let nulo = Value::Null;
    let mut alteracoes = Vec::new();

    for (campo, valor_novo) in &depois {
        if campo == "updated_at" {
            continue;
        }

        let valor_anterior = antes.get(campo).unwrap_or(&nulo);
        if valor_anterior != valor_novo {
            alteracoes.push((
                campo.clone(),
                valor_como_texto(valor_anterior),
                valor_como_texto(valor_novo),
            ));
        }
    }

    Ok(alteracoes)
}

#[derive(Clone)]
pub struct FrotaService {
    repo: AgregadoRepository,
    campo_repo: CampoRepository,
    historico_repo: HistoricoRepository,
}

impl FrotaService {
    pub fn new(
        repo: AgregadoRepository,
        campo_repo: CampoRepository,
        historico_repo: HistoricoRepository,
    ) -> Self {
        Self {
            repo,
            campo_repo,
            historico_repo,
        }
    }

    pub async fn create_agregado<'e, E>(
        &self,
        executor: E,
        payload: CreateAgregadoPayload,
    ) -> Result<AgregadoComStatus, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        // Valida os dados customizados contra as definições da tabela
        let definicoes = self
            .campo_repo
            .list_campos(&mut *tx, "agregados", None, false)
            .await?;
        campo_service::validar_dados_extras(&definicoes, &payload.dados_extras)?;

        let criado = self.repo.create_agregado(&mut *tx, &payload).await?;

        tx.commit().await?;

        Ok(situacao::com_status(criado, Utc::now().date_naive()))
    }

    pub async fn list_agregados<'e, E>(
        &self,
        executor: E,
        filtro: &FiltroAgregados,
    ) -> Result<Vec<AgregadoComStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agregados = self
            .repo
            .list_agregados(executor, filtro.busca.as_deref(), filtro.tipo_veiculo.as_deref())
            .await?;

        let hoje = Utc::now().date_naive();
        let mut enriquecidos: Vec<AgregadoComStatus> = agregados
            .into_iter()
            .map(|agregado| situacao::com_status(agregado, hoje))
            .collect();

        // O status é derivado, então o filtro roda depois do cálculo.
        if let Some(status) = filtro.status {
            enriquecidos.retain(|a| a.status == status);
        }

        Ok(enriquecidos)
    }

    pub async fn get_agregado<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<AgregadoComStatus, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agregado = self
            .repo
            .find_agregado_by_id(executor, id)
            .await?
            .ok_or(AppError::AgregadoNotFound)?;

        Ok(situacao::com_status(agregado, Utc::now().date_naive()))
    }

    /// Atualiza e grava na mesma transação uma linha de histórico
    /// para cada campo que de fato mudou.
    pub async fn update_agregado<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: UpdateAgregadoPayload,
    ) -> Result<AgregadoComStatus, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let antes = self
            .repo
            .find_agregado_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::AgregadoNotFound)?;

        if let Some(dados) = &payload.dados_extras {
            let definicoes = self
                .campo_repo
                .list_campos(&mut *tx, "agregados", None, false)
                .await?;
            campo_service::validar_dados_extras(&definicoes, dados)?;
        }

        let depois = self
            .repo
            .update_agregado(&mut *tx, id, &payload)
            .await?
            .ok_or(AppError::AgregadoNotFound)?;

        for (campo, valor_anterior, valor_novo) in diff_campos(&antes, &depois)? {
            self.historico_repo
                .insert_alteracao(
                    &mut *tx,
                    id,
                    &campo,
                    valor_anterior.as_deref(),
                    valor_novo.as_deref(),
                    None,
                )
                .await?;
        }

        tx.commit().await?;

        Ok(situacao::com_status(depois, Utc::now().date_naive()))
    }

    pub async fn delete_agregado<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let removidos = self.repo.delete_agregado(executor, id).await?;
        if removidos == 0 {
            return Err(AppError::AgregadoNotFound);
        }
        Ok(())
    }

    /// Só quem tem documento vencido ou vencendo entra aqui.
    pub async fn list_com_alerta<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<AgregadoComStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agregados = self.repo.list_agregados(executor, None, None).await?;

        let hoje = Utc::now().date_naive();
        let mut enriquecidos: Vec<AgregadoComStatus> = agregados
            .into_iter()
            .map(|agregado| situacao::com_status(agregado, hoje))
            .collect();
        enriquecidos.retain(|a| !a.alertas.is_empty());

        Ok(enriquecidos)
    }

    pub async fn list_historico<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Vec<AgregadoHistorico>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        self.repo
            .find_agregado_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::AgregadoNotFound)?;

        let alteracoes = self.historico_repo.list_alteracoes(&mut *tx, id).await?;

        tx.commit().await?;

        Ok(alteracoes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::agregado::agregado_exemplo;
    use serde_json::json;

    #[test]
    fn diff_gera_uma_linha_por_campo_alterado() {
        let antes = agregado_exemplo();
        let mut depois = antes.clone();
        depois.placa_veiculo = "DEF-5678".to_string();
        depois.pontos_cnh = Some(7);

        let mut alteracoes = diff_campos(&antes, &depois).unwrap();
        alteracoes.sort();

        assert_eq!(
            alteracoes,
            vec![
                (
                    "placa_veiculo".to_string(),
                    Some("ABC-1234".to_string()),
                    Some("DEF-5678".to_string()),
                ),
                ("pontos_cnh".to_string(), Some("3".to_string()), Some("7".to_string())),
            ]
        );
    }

    #[test]
    fn diff_ignora_o_updated_at() {
        let antes = agregado_exemplo();
        let mut depois = antes.clone();
        depois.updated_at = Utc::now() + chrono::Duration::seconds(90);

        assert!(diff_campos(&antes, &depois).unwrap().is_empty());
    }

    #[test]
    fn diff_registra_limpeza_de_campo_preenchido() {
        let antes = agregado_exemplo();
        let mut depois = antes.clone();
        depois.cor_veiculo = None;

        let alteracoes = diff_campos(&antes, &depois).unwrap();

        assert_eq!(
            alteracoes,
            vec![(
                "cor_veiculo".to_string(),
                Some("Branco".to_string()),
                None,
            )]
        );
    }

    #[test]
    fn diff_trata_dados_extras_como_um_campo_so() {
        let antes = agregado_exemplo();
        let mut depois = antes.clone();
        depois.dados_extras = json!({"telefone_emergencia": "11 98888-7777"});

        let alteracoes = diff_campos(&antes, &depois).unwrap();

        assert_eq!(alteracoes.len(), 1);
        assert_eq!(alteracoes[0].0, "dados_extras");
        assert_eq!(alteracoes[0].1, Some("{}".to_string()));
        assert_eq!(
            alteracoes[0].2,
            Some(r#"{"telefone_emergencia":"11 98888-7777"}"#.to_string())
        );
    }
}
