// src/services/dashboard_service.rs

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{AgregadoRepository, EsporadicoRepository},
    models::{
        agregado::Agregado,
        dashboard::{AlertaDocumento, DashboardResumo, SeveridadeAlerta},
        esporadico::EsporadicoAgregado,
    },
    services::situacao,
};

// Visão uniforme dos documentos de um registro, seja agregado ou esporádico.
struct DocumentosDoRegistro<'a> {
    nome_motorista: &'a str,
    placa_veiculo: &'a str,
    ativo: bool,
    validade_cnh: NaiveDate,
    data_crlv: Option<NaiveDate>,
    data_vigilancia_sanitaria: Option<NaiveDate>,
    data_detizacao: Option<NaiveDate>,
}

impl<'a> From<&'a Agregado> for DocumentosDoRegistro<'a> {
    fn from(agregado: &'a Agregado) -> Self {
        Self {
            nome_motorista: &agregado.nome_motorista,
            placa_veiculo: &agregado.placa_veiculo,
            ativo: agregado.ativo,
            validade_cnh: agregado.validade_cnh,
            data_crlv: agregado.data_crlv,
            data_vigilancia_sanitaria: agregado.data_vigilancia_sanitaria,
            data_detizacao: agregado.data_detizacao,
        }
    }
}

impl<'a> From<&'a EsporadicoAgregado> for DocumentosDoRegistro<'a> {
    fn from(esporadico: &'a EsporadicoAgregado) -> Self {
        Self {
            nome_motorista: &esporadico.nome_motorista,
            placa_veiculo: &esporadico.placa_veiculo,
            ativo: esporadico.ativo,
            validade_cnh: esporadico.validade_cnh,
            data_crlv: esporadico.data_crlv,
            data_vigilancia_sanitaria: esporadico.data_vigilancia_sanitaria,
            data_detizacao: esporadico.data_detizacao,
        }
    }
}

// Vencido ou vencendo em até sete dias pede ação imediata.
fn severidade(vencimento: NaiveDate, hoje: NaiveDate) -> SeveridadeAlerta {
    if vencimento <= hoje + Duration::days(7) {
        SeveridadeAlerta::Destructive
    } else {
        SeveridadeAlerta::Warning
    }
}

fn mensagem(prefixo: &str, vencido: &str, vencimento: NaiveDate, hoje: NaiveDate) -> String {
    if vencimento < hoje {
        format!("{} {}", prefixo, vencido)
    } else {
        format!("{} vence em {} dias", prefixo, (vencimento - hoje).num_days())
    }
}

fn alerta(tipo: &str, mensagem: String, vencimento: NaiveDate, hoje: NaiveDate) -> AlertaDocumento {
    AlertaDocumento {
        tipo: tipo.to_string(),
        mensagem,
        severidade: severidade(vencimento, hoje),
        data: vencimento,
    }
}

/// Alertas de um registro: CNH, CRLV, vigilância sanitária e detetização,
/// dentro do horizonte de aviso. Registro desativado não alerta.
fn alertas_do_registro(docs: &DocumentosDoRegistro, hoje: NaiveDate) -> Vec<AlertaDocumento> {
    let mut alertas = Vec::new();

    if !docs.ativo {
        return alertas;
    }

    let limite = hoje + Duration::days(situacao::HORIZONTE_ALERTA_DIAS);

    if docs.validade_cnh <= limite {
        let prefixo = format!("CNH de {}", docs.nome_motorista);
        alertas.push(alerta(
            "CNH",
            mensagem(&prefixo, "vencida", docs.validade_cnh, hoje),
            docs.validade_cnh,
            hoje,
        ));
    }

    if let Some(crlv) = docs.data_crlv {
        if crlv <= limite {
            let prefixo = format!("CRLV do veículo {}", docs.placa_veiculo);
            alertas.push(alerta("CRLV", mensagem(&prefixo, "vencido", crlv, hoje), crlv, hoje));
        }
    }

    if let Some(vigilancia) = docs.data_vigilancia_sanitaria {
        if vigilancia <= limite {
            let prefixo = format!("Vigilância sanitária do veículo {}", docs.placa_veiculo);
            alertas.push(alerta(
                "Vigilância",
                mensagem(&prefixo, "vencida", vigilancia, hoje),
                vigilancia,
                hoje,
            ));
        }
    }

    if let Some(detizacao) = docs.data_detizacao {
        if detizacao <= limite {
            let prefixo = format!("Detetização do veículo {}", docs.placa_veiculo);
            alertas.push(alerta(
                "Detetização",
                mensagem(&prefixo, "vencida", detizacao, hoje),
                detizacao,
                hoje,
            ));
        }
    }

    alertas
}

pub(crate) fn montar_resumo(
    agregados: &[Agregado],
    esporadicos: &[EsporadicoAgregado],
    hoje: NaiveDate,
) -> DashboardResumo {
    let agregados_ativos = agregados.iter().filter(|a| a.ativo).count() as i64;

    let documentos_vencendo = agregados
        .iter()
        .filter(|a| !situacao::alertas_documentos(a.ativo, a.validade_cnh, a.data_crlv, hoje).is_empty())
        .count()
        + esporadicos
            .iter()
            .filter(|e| {
                !situacao::alertas_documentos(e.ativo, e.validade_cnh, e.data_crlv, hoje).is_empty()
            })
            .count();

    // Um mesmo veículo pode rodar como agregado e como esporádico; conta uma vez.
    let placas: HashSet<&str> = agregados
        .iter()
        .map(|a| a.placa_veiculo.as_str())
        .chain(esporadicos.iter().map(|e| e.placa_veiculo.as_str()))
        .collect();

    let esporadicos_no_mes = esporadicos
        .iter()
        .filter(|e| e.data_inclusao.year() == hoje.year() && e.data_inclusao.month() == hoje.month())
        .count() as i64;

    DashboardResumo {
        total_agregados: agregados.len() as i64,
        agregados_ativos,
        agregados_inativos: agregados.len() as i64 - agregados_ativos,
        documentos_vencendo: documentos_vencendo as i64,
        total_veiculos: placas.len() as i64,
        total_esporadicos: esporadicos.len() as i64,
        esporadicos_no_mes,
    }
}

pub(crate) fn montar_alertas(
    agregados: &[Agregado],
    esporadicos: &[EsporadicoAgregado],
    hoje: NaiveDate,
) -> Vec<AlertaDocumento> {
    let mut alertas: Vec<AlertaDocumento> = agregados
        .iter()
        .map(DocumentosDoRegistro::from)
        .chain(esporadicos.iter().map(DocumentosDoRegistro::from))
        .flat_map(|docs| alertas_do_registro(&docs, hoje))
        .collect();

    // O vencimento mais próximo aparece primeiro.
    alertas.sort_by_key(|a| a.data);
    alertas
}

#[derive(Clone)]
pub struct DashboardService {
    agregado_repo: AgregadoRepository,
    esporadico_repo: EsporadicoRepository,
}

impl DashboardService {
    pub fn new(agregado_repo: AgregadoRepository, esporadico_repo: EsporadicoRepository) -> Self {
        Self {
            agregado_repo,
            esporadico_repo,
        }
    }

    pub async fn resumo<'e, E>(&self, executor: E) -> Result<DashboardResumo, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let agregados = self.agregado_repo.list_agregados(&mut *tx, None, None).await?;
        let esporadicos = self
            .esporadico_repo
            .list_esporadicos(&mut *tx, None, None)
            .await?;

        tx.commit().await?;

        Ok(montar_resumo(&agregados, &esporadicos, Utc::now().date_naive()))
    }

    pub async fn alertas<'e, E>(&self, executor: E) -> Result<Vec<AlertaDocumento>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let agregados = self.agregado_repo.list_agregados(&mut *tx, None, None).await?;
        let esporadicos = self
            .esporadico_repo
            .list_esporadicos(&mut *tx, None, None)
            .await?;

        tx.commit().await?;

        Ok(montar_alertas(&agregados, &esporadicos, Utc::now().date_naive()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{agregado::agregado_exemplo, esporadico::esporadico_exemplo};

    fn dia(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    #[test]
    fn resumo_conta_ativos_inativos_e_placas_distintas() {
        let hoje = dia(2024, 8, 25);

        let mut inativo = agregado_exemplo();
        inativo.ativo = false;
        inativo.placa_veiculo = "DEF-9999".to_string();

        // Mesma placa do agregado_exemplo: não pode contar duas vezes.
        let mut esporadico = esporadico_exemplo();
        esporadico.placa_veiculo = "ABC-1234".to_string();

        let resumo = montar_resumo(&[agregado_exemplo(), inativo], &[esporadico], hoje);

        assert_eq!(resumo.total_agregados, 2);
        assert_eq!(resumo.agregados_ativos, 1);
        assert_eq!(resumo.agregados_inativos, 1);
        assert_eq!(resumo.total_veiculos, 2);
        assert_eq!(resumo.total_esporadicos, 1);
    }

    #[test]
    fn resumo_conta_esporadicos_do_mes_corrente() {
        let hoje = dia(2024, 8, 25);

        let deste_mes = esporadico_exemplo();
        let mut antigo = esporadico_exemplo();
        antigo.data_inclusao = dia(2024, 7, 2);

        let resumo = montar_resumo(&[], &[deste_mes, antigo], hoje);

        assert_eq!(resumo.total_esporadicos, 2);
        assert_eq!(resumo.esporadicos_no_mes, 1);
    }

    #[test]
    fn resumo_conta_registros_com_documento_vencendo() {
        let hoje = dia(2024, 8, 25);

        let em_dia = agregado_exemplo();
        let mut cnh_vencendo = agregado_exemplo();
        cnh_vencendo.validade_cnh = dia(2024, 9, 10);

        let mut esporadico_vencido = esporadico_exemplo();
        esporadico_vencido.data_crlv = Some(dia(2024, 8, 1));

        let resumo = montar_resumo(&[em_dia, cnh_vencendo], &[esporadico_vencido], hoje);

        assert_eq!(resumo.documentos_vencendo, 2);
    }

    #[test]
    fn feed_descreve_cnh_pelo_motorista_e_crlv_pela_placa() {
        let hoje = dia(2024, 8, 25);

        let mut agregado = agregado_exemplo();
        agregado.validade_cnh = dia(2024, 9, 9);
        agregado.data_crlv = Some(dia(2024, 8, 1));

        let alertas = montar_alertas(&[agregado], &[], hoje);

        assert_eq!(alertas.len(), 2);
        // Ordenado pela data: o CRLV vencido vem antes da CNH.
        assert_eq!(alertas[0].tipo, "CRLV");
        assert_eq!(alertas[0].mensagem, "CRLV do veículo ABC-1234 vencido");
        assert_eq!(alertas[0].severidade, SeveridadeAlerta::Destructive);

        assert_eq!(alertas[1].tipo, "CNH");
        assert_eq!(alertas[1].mensagem, "CNH de João Silva vence em 15 dias");
        assert_eq!(alertas[1].severidade, SeveridadeAlerta::Warning);
    }

    #[test]
    fn vencimento_em_sete_dias_ou_menos_e_destructive() {
        let hoje = dia(2024, 8, 25);

        let mut no_limite = agregado_exemplo();
        no_limite.validade_cnh = dia(2024, 9, 1); // 7 dias

        let mut folgado = agregado_exemplo();
        folgado.validade_cnh = dia(2024, 9, 2); // 8 dias

        let alertas = montar_alertas(&[no_limite, folgado], &[], hoje);

        assert_eq!(alertas[0].severidade, SeveridadeAlerta::Destructive);
        assert_eq!(alertas[1].severidade, SeveridadeAlerta::Warning);
    }

    #[test]
    fn vigilancia_e_detetizacao_entram_no_feed() {
        let hoje = dia(2024, 8, 25);

        let mut esporadico = esporadico_exemplo();
        esporadico.data_vigilancia_sanitaria = Some(dia(2024, 8, 20));
        esporadico.data_detizacao = Some(dia(2024, 9, 20));

        let alertas = montar_alertas(&[], &[esporadico], hoje);

        assert_eq!(alertas.len(), 2);
        assert_eq!(
            alertas[0].mensagem,
            "Vigilância sanitária do veículo XYZ-5678 vencida"
        );
        assert_eq!(
            alertas[1].mensagem,
            "Detetização do veículo XYZ-5678 vence em 26 dias"
        );
    }

    #[test]
    fn registro_desativado_fica_fora_do_feed() {
        let hoje = dia(2024, 8, 25);

        let mut inativo = agregado_exemplo();
        inativo.ativo = false;
        inativo.validade_cnh = dia(2024, 8, 1);

        assert!(montar_alertas(&[inativo], &[], hoje).is_empty());
    }

    #[test]
    fn documento_fora_do_horizonte_nao_alerta() {
        let hoje = dia(2024, 8, 25);

        // CNH em 2026, CRLV em dezembro de 2025: nada no feed.
        assert!(montar_alertas(&[agregado_exemplo()], &[], hoje).is_empty());
    }
}
