// src/db/campo_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::campo::{CampoConfiguracao, CampoTipo, UpdateCampoPayload},
};

#[derive(Clone)]
pub struct CampoRepository;

impl CampoRepository {
    pub fn new() -> Self {
        Self
    }

    /// Cria uma nova definição de campo (Ex: "Telefone de Emergência")
    pub async fn create_campo<'e, E>(
        &self,
        executor: E,
        tabela_nome: &str,
        campo_nome: &str,
        campo_label: &str,
        campo_tipo: CampoTipo,
        campo_obrigatorio: bool,
        campo_opcoes: &[String],
        campo_categoria: &str,
        campo_ordem: i32,
    ) -> Result<CampoConfiguracao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campo = sqlx::query_as::<_, CampoConfiguracao>(
            r#"
            INSERT INTO campos_configuracao (
                tabela_nome, campo_nome, campo_label, campo_tipo,
                campo_obrigatorio, campo_opcoes, campo_categoria, campo_ordem
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(tabela_nome)
        .bind(campo_nome)
        .bind(campo_label)
        .bind(campo_tipo)
        .bind(campo_obrigatorio)
        .bind(campo_opcoes)
        .bind(campo_categoria)
        .bind(campo_ordem)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Tratamento de erro de chave duplicada (tabela_nome, campo_nome)
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::UniqueConstraintViolation(format!(
                        "O campo '{}' já existe para esta tabela.",
                        campo_nome
                    ));
                }
            }
            e.into()
        })?;

        Ok(campo)
    }

    /// Lista as definições de uma tabela na ordem de exibição
    pub async fn list_campos<'e, E>(
        &self,
        executor: E,
        tabela_nome: &str,
        categoria: Option<&str>,
        incluir_inativos: bool,
    ) -> Result<Vec<CampoConfiguracao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campos = sqlx::query_as::<_, CampoConfiguracao>(
            r#"
            SELECT * FROM campos_configuracao
            WHERE tabela_nome = $1
              AND ($2::text IS NULL OR campo_categoria = $2)
              AND (campo_ativo OR $3)
            ORDER BY campo_ordem ASC
            "#,
        )
        .bind(tabela_nome)
        .bind(categoria)
        .bind(incluir_inativos)
        .fetch_all(executor)
        .await?;

        Ok(campos)
    }

    /// Quantos campos ativos a tabela tem hoje. Usado para dar a posição
    /// do próximo campo criado.
    pub async fn count_campos_ativos<'e, E>(
        &self,
        executor: E,
        tabela_nome: &str,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let (total,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM campos_configuracao WHERE tabela_nome = $1 AND campo_ativo",
        )
        .bind(tabela_nome)
        .fetch_one(executor)
        .await?;

        Ok(total)
    }

    pub async fn update_campo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateCampoPayload,
    ) -> Result<Option<CampoConfiguracao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campo = sqlx::query_as::<_, CampoConfiguracao>(
            r#"
            UPDATE campos_configuracao SET
                campo_nome        = COALESCE($2, campo_nome),
                campo_label       = COALESCE($3, campo_label),
                campo_tipo        = COALESCE($4, campo_tipo),
                campo_obrigatorio = COALESCE($5, campo_obrigatorio),
                campo_opcoes      = COALESCE($6, campo_opcoes),
                campo_categoria   = COALESCE($7, campo_categoria),
                updated_at        = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.campo_nome)
        .bind(&payload.campo_label)
        .bind(payload.campo_tipo)
        .bind(payload.campo_obrigatorio)
        .bind(&payload.campo_opcoes)
        .bind(&payload.campo_categoria)
        .fetch_optional(executor)
        .await?;

        Ok(campo)
    }

    /// Inverte o flag num único UPDATE; a ordem antiga não é mexida.
    pub async fn toggle_campo_ativo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<CampoConfiguracao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campo = sqlx::query_as::<_, CampoConfiguracao>(
            r#"
            UPDATE campos_configuracao
            SET campo_ativo = NOT campo_ativo, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(campo)
    }

    pub async fn set_campo_ordem<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        ordem: i32,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE campos_configuracao SET campo_ordem = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(ordem)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn delete_campo<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM campos_configuracao WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
