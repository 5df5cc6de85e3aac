// src/db/agregado_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::agregado::{Agregado, CreateAgregadoPayload, UpdateAgregadoPayload},
};

#[derive(Clone)]
pub struct AgregadoRepository;

impl AgregadoRepository {
    pub fn new() -> Self {
        Self
    }

    pub async fn create_agregado<'e, E>(
        &self,
        executor: E,
        payload: &CreateAgregadoPayload,
    ) -> Result<Agregado, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agregado = sqlx::query_as::<_, Agregado>(
            r#"
            INSERT INTO agregados (
                data_inclusao, data_saida,
                placa_veiculo, tipo_veiculo, cor_veiculo,
                nome_motorista, contato_motorista, numero_cnh, categoria_cnh,
                validade_cnh, pontos_cnh, escolaridade, estado_civil, nome_pai,
                numero_antt,
                proprietario_veiculo, contato_proprietario, cpf_proprietario,
                rg_proprietario, endereco_proprietario, escolaridade_proprietario,
                estado_civil_proprietario, nome_pai_proprietario,
                restricoes_rota, capacidade_carga_toneladas, capacidade_carga_m3,
                porta_lateral, quantidade_pallets, pernoite, local_pernoite,
                boa_conduta, rastreador,
                data_detizacao, data_vigilancia_sanitaria, data_crlv,
                observacoes, dados_extras, ativo
            )
            VALUES (
                COALESCE($1, CURRENT_DATE), $2,
                $3, $4, $5,
                $6, $7, $8, $9,
                $10, $11, $12, $13, $14,
                $15,
                $16, $17, $18,
                $19, $20, $21,
                $22, $23,
                $24, $25, $26,
                $27, $28, $29, $30,
                $31, $32,
                $33, $34, $35,
                $36, $37, COALESCE($38, TRUE)
            )
            RETURNING *
            "#,
        )
        .bind(payload.data_inclusao)
        .bind(payload.data_saida)
        .bind(&payload.placa_veiculo)
        .bind(&payload.tipo_veiculo)
        .bind(&payload.cor_veiculo)
        .bind(&payload.nome_motorista)
        .bind(&payload.contato_motorista)
        .bind(&payload.numero_cnh)
        .bind(&payload.categoria_cnh)
        .bind(payload.validade_cnh)
        .bind(payload.pontos_cnh)
        .bind(&payload.escolaridade)
        .bind(&payload.estado_civil)
        .bind(&payload.nome_pai)
        .bind(&payload.numero_antt)
        .bind(&payload.proprietario_veiculo)
        .bind(&payload.contato_proprietario)
        .bind(&payload.cpf_proprietario)
        .bind(&payload.rg_proprietario)
        .bind(&payload.endereco_proprietario)
        .bind(&payload.escolaridade_proprietario)
        .bind(&payload.estado_civil_proprietario)
        .bind(&payload.nome_pai_proprietario)
        .bind(&payload.restricoes_rota)
        .bind(payload.capacidade_carga_toneladas)
        .bind(payload.capacidade_carga_m3)
        .bind(payload.porta_lateral)
        .bind(payload.quantidade_pallets)
        .bind(payload.pernoite)
        .bind(&payload.local_pernoite)
        .bind(payload.boa_conduta)
        .bind(payload.rastreador)
        .bind(payload.data_detizacao)
        .bind(payload.data_vigilancia_sanitaria)
        .bind(payload.data_crlv)
        .bind(&payload.observacoes)
        .bind(&payload.dados_extras)
        .bind(payload.ativo)
        .fetch_one(executor)
        .await?;

        Ok(agregado)
    }

    /// Lista com filtros de texto e de tipo. O filtro por status derivado
    /// acontece na camada de serviço, depois do cálculo.
    pub async fn list_agregados<'e, E>(
        &self,
        executor: E,
        busca: Option<&str>,
        tipo_veiculo: Option<&str>,
    ) -> Result<Vec<Agregado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let busca_like = busca.map(|b| format!("%{}%", b));

        let agregados = sqlx::query_as::<_, Agregado>(
            r#"
            SELECT * FROM agregados
            WHERE ($1::text IS NULL
               OR nome_motorista ILIKE $1
               OR placa_veiculo ILIKE $1
               OR proprietario_veiculo ILIKE $1)
              AND ($2::text IS NULL OR tipo_veiculo = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(busca_like)
        .bind(tipo_veiculo)
        .fetch_all(executor)
        .await?;

        Ok(agregados)
    }

    pub async fn find_agregado_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Agregado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agregado = sqlx::query_as::<_, Agregado>("SELECT * FROM agregados WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;

        Ok(agregado)
    }

    /// Patch parcial: colunas com bind nulo ficam como estão (COALESCE).
    pub async fn update_agregado<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        payload: &UpdateAgregadoPayload,
    ) -> Result<Option<Agregado>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let agregado = sqlx::query_as::<_, Agregado>(
            r#"
            UPDATE agregados SET
                data_inclusao             = COALESCE($2, data_inclusao),
                data_saida                = COALESCE($3, data_saida),
                placa_veiculo             = COALESCE($4, placa_veiculo),
                tipo_veiculo              = COALESCE($5, tipo_veiculo),
                cor_veiculo               = COALESCE($6, cor_veiculo),
                nome_motorista            = COALESCE($7, nome_motorista),
                contato_motorista         = COALESCE($8, contato_motorista),
                numero_cnh                = COALESCE($9, numero_cnh),
                categoria_cnh             = COALESCE($10, categoria_cnh),
                validade_cnh              = COALESCE($11, validade_cnh),
                pontos_cnh                = COALESCE($12, pontos_cnh),
                escolaridade              = COALESCE($13, escolaridade),
                estado_civil              = COALESCE($14, estado_civil),
                nome_pai                  = COALESCE($15, nome_pai),
                numero_antt               = COALESCE($16, numero_antt),
                proprietario_veiculo      = COALESCE($17, proprietario_veiculo),
                contato_proprietario      = COALESCE($18, contato_proprietario),
                cpf_proprietario          = COALESCE($19, cpf_proprietario),
                rg_proprietario           = COALESCE($20, rg_proprietario),
                endereco_proprietario     = COALESCE($21, endereco_proprietario),
                escolaridade_proprietario = COALESCE($22, escolaridade_proprietario),
                estado_civil_proprietario = COALESCE($23, estado_civil_proprietario),
                nome_pai_proprietario     = COALESCE($24, nome_pai_proprietario),
                restricoes_rota           = COALESCE($25, restricoes_rota),
                capacidade_carga_toneladas = COALESCE($26, capacidade_carga_toneladas),
                capacidade_carga_m3       = COALESCE($27, capacidade_carga_m3),
                porta_lateral             = COALESCE($28, porta_lateral),
                quantidade_pallets        = COALESCE($29, quantidade_pallets),
                pernoite                  = COALESCE($30, pernoite),
                local_pernoite            = COALESCE($31, local_pernoite),
                boa_conduta               = COALESCE($32, boa_conduta),
                rastreador                = COALESCE($33, rastreador),
                data_detizacao            = COALESCE($34, data_detizacao),
                data_vigilancia_sanitaria = COALESCE($35, data_vigilancia_sanitaria),
                data_crlv                 = COALESCE($36, data_crlv),
                observacoes               = COALESCE($37, observacoes),
                dados_extras              = COALESCE($38, dados_extras),
                ativo                     = COALESCE($39, ativo),
                updated_at                = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.data_inclusao)
        .bind(payload.data_saida)
        .bind(&payload.placa_veiculo)
        .bind(&payload.tipo_veiculo)
        .bind(&payload.cor_veiculo)
        .bind(&payload.nome_motorista)
        .bind(&payload.contato_motorista)
        .bind(&payload.numero_cnh)
        .bind(&payload.categoria_cnh)
        .bind(payload.validade_cnh)
        .bind(payload.pontos_cnh)
        .bind(&payload.escolaridade)
        .bind(&payload.estado_civil)
        .bind(&payload.nome_pai)
        .bind(&payload.numero_antt)
        .bind(&payload.proprietario_veiculo)
        .bind(&payload.contato_proprietario)
        .bind(&payload.cpf_proprietario)
        .bind(&payload.rg_proprietario)
        .bind(&payload.endereco_proprietario)
        .bind(&payload.escolaridade_proprietario)
        .bind(&payload.estado_civil_proprietario)
        .bind(&payload.nome_pai_proprietario)
        .bind(&payload.restricoes_rota)
        .bind(payload.capacidade_carga_toneladas)
        .bind(payload.capacidade_carga_m3)
        .bind(payload.porta_lateral)
        .bind(payload.quantidade_pallets)
        .bind(payload.pernoite)
        .bind(&payload.local_pernoite)
        .bind(payload.boa_conduta)
        .bind(payload.rastreador)
        .bind(payload.data_detizacao)
        .bind(payload.data_vigilancia_sanitaria)
        .bind(payload.data_crlv)
        .bind(&payload.observacoes)
        .bind(&payload.dados_extras)
        .bind(payload.ativo)
        .fetch_optional(executor)
        .await?;

        Ok(agregado)
    }

    pub async fn delete_agregado<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM agregados WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }
}
