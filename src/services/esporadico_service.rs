// src/services/esporadico_service.rs

use chrono::Utc;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CampoRepository, EsporadicoRepository},
    models::{
        agregado::FiltroAgregados,
        esporadico::{CreateEsporadicoPayload, EsporadicoComStatus, UpdateEsporadicoPayload},
    },
    services::{campo_service, situacao},
};

// Esporádicos são contratações avulsas: mesmo cadastro dos agregados,
// sem trilha de histórico.
#[derive(Clone)]
pub struct EsporadicoService {
    repo: EsporadicoRepository,
    campo_repo: CampoRepository,
}

impl EsporadicoService {
    pub fn new(repo: EsporadicoRepository, campo_repo: CampoRepository) -> Self {
        Self { repo, campo_repo }
    }

    pub async fn create_esporadico<'e, E>(
        &self,
        executor: E,
        payload: CreateEsporadicoPayload,
    ) -> Result<EsporadicoComStatus, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let definicoes = self
            .campo_repo
            .list_campos(&mut *tx, "agregados_esporadicos", None, false)
            .await?;
        campo_service::validar_dados_extras(&definicoes, &payload.dados_extras)?;

        let criado = self.repo.create_esporadico(&mut *tx, &payload).await?;

        tx.commit().await?;

        Ok(situacao::esporadico_com_status(criado, Utc::now().date_naive()))
    }

    pub async fn list_esporadicos<'e, E>(
        &self,
        executor: E,
        filtro: &FiltroAgregados,
    ) -> Result<Vec<EsporadicoComStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let esporadicos = self
            .repo
            .list_esporadicos(executor, filtro.busca.as_deref(), filtro.tipo_veiculo.as_deref())
            .await?;

        let hoje = Utc::now().date_naive();
        let mut enriquecidos: Vec<EsporadicoComStatus> = esporadicos
            .into_iter()
            .map(|esporadico| situacao::esporadico_com_status(esporadico, hoje))
            .collect();

        if let Some(status) = filtro.status {
            enriquecidos.retain(|e| e.status == status);
        }

        Ok(enriquecidos)
    }

    pub async fn get_esporadico<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<EsporadicoComStatus, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let esporadico = self
            .repo
            .find_esporadico_by_id(executor, id)
            .await?
            .ok_or(AppError::EsporadicoNotFound)?;

        Ok(situacao::esporadico_com_status(esporadico, Utc::now().date_naive()))
    }

    pub async fn update_esporadico<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: UpdateEsporadicoPayload,
    ) -> Result<EsporadicoComStatus, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        if let Some(dados) = &payload.dados_extras {
            let definicoes = self
                .campo_repo
                .list_campos(&mut *tx, "agregados_esporadicos", None, false)
                .await?;
            campo_service::validar_dados_extras(&definicoes, dados)?;
        }

        let atualizado = self
            .repo
            .update_esporadico(&mut *tx, id, &payload)
            .await?
            .ok_or(AppError::EsporadicoNotFound)?;

        tx.commit().await?;

        Ok(situacao::esporadico_com_status(atualizado, Utc::now().date_naive()))
    }

    pub async fn delete_esporadico<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let removidos = self.repo.delete_esporadico(executor, id).await?;
        if removidos == 0 {
            return Err(AppError::EsporadicoNotFound);
        }
        Ok(())
    }

    pub async fn list_com_alerta<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<EsporadicoComStatus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let esporadicos = self.repo.list_esporadicos(executor, None, None).await?;

        let hoje = Utc::now().date_naive();
        let mut enriquecidos: Vec<EsporadicoComStatus> = esporadicos
            .into_iter()
            .map(|esporadico| situacao::esporadico_com_status(esporadico, hoje))
            .collect();
        enriquecidos.retain(|e| !e.alertas.is_empty());

        Ok(enriquecidos)
    }
}
