// src/db/historico_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::historico::AgregadoHistorico};

#[derive(Clone)]
pub struct HistoricoRepository;

impl HistoricoRepository {
    pub fn new() -> Self {
        Self
    }

    /// Grava a alteração de um único campo.
    pub async fn insert_alteracao<'e, E>(
        &self,
        executor: E,
        agregado_id: Uuid,
        campo_alterado: &str,
        valor_anterior: Option<&str>,
        valor_novo: Option<&str>,
        usuario_alteracao: Option<&str>,
    ) -> Result<AgregadoHistorico, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let alteracao = sqlx::query_as::<_, AgregadoHistorico>(
            r#"
            INSERT INTO agregados_historico (
                agregado_id, campo_alterado, valor_anterior, valor_novo, usuario_alteracao
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(agregado_id)
        .bind(campo_alterado)
        .bind(valor_anterior)
        .bind(valor_novo)
        .bind(usuario_alteracao)
        .fetch_one(executor)
        .await?;

        Ok(alteracao)
    }

    /// Trilha completa de um agregado, da alteração mais recente para a mais antiga.
    pub async fn list_alteracoes<'e, E>(
        &self,
        executor: E,
        agregado_id: Uuid,
    ) -> Result<Vec<AgregadoHistorico>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let alteracoes = sqlx::query_as::<_, AgregadoHistorico>(
            r#"
            SELECT * FROM agregados_historico
            WHERE agregado_id = $1
            ORDER BY data_alteracao DESC
            "#,
        )
        .bind(agregado_id)
        .fetch_all(executor)
        .await?;

        Ok(alteracoes)
    }
}
