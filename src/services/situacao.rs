// src/services/situacao.rs

use chrono::{Duration, NaiveDate};

use crate::models::{
    agregado::{Agregado, AgregadoComStatus, StatusAgregado},
    esporadico::{EsporadicoAgregado, EsporadicoComStatus},
};

/// Documentos que vencem até aqui geram o aviso "vence em breve".
pub const HORIZONTE_ALERTA_DIAS: i64 = 30;

// Nada disso é persistido: o status e os alertas são recalculados a cada
// leitura a partir do flag ativo e das datas de vencimento.

pub fn avaliar_status(
    ativo: bool,
    validade_cnh: NaiveDate,
    data_crlv: Option<NaiveDate>,
    hoje: NaiveDate,
) -> StatusAgregado {
    if !ativo {
        return StatusAgregado::Inativo;
    }

    if validade_cnh < hoje {
        return StatusAgregado::Pendente;
    }

    if let Some(crlv) = data_crlv {
        if crlv < hoje {
            return StatusAgregado::Pendente;
        }
    }

    StatusAgregado::Ativo
}

// Registros inativos não alertam, mesmo com documento vencido.
pub fn alertas_documentos(
    ativo: bool,
    validade_cnh: NaiveDate,
    data_crlv: Option<NaiveDate>,
    hoje: NaiveDate,
) -> Vec<String> {
    let mut alertas = Vec::new();

    if !ativo {
        return alertas;
    }

    let limite = hoje + Duration::days(HORIZONTE_ALERTA_DIAS);

    if validade_cnh < hoje {
        alertas.push("CNH vencida".to_string());
    } else if validade_cnh <= limite {
        alertas.push("CNH vence em breve".to_string());
    }

    if let Some(crlv) = data_crlv {
        if crlv < hoje {
            alertas.push("CRLV vencido".to_string());
        } else if crlv <= limite {
            alertas.push("CRLV vence em breve".to_string());
        }
    }

    alertas
}

pub fn com_status(agregado: Agregado, hoje: NaiveDate) -> AgregadoComStatus {
    let status = avaliar_status(agregado.ativo, agregado.validade_cnh, agregado.data_crlv, hoje);
    let alertas =
        alertas_documentos(agregado.ativo, agregado.validade_cnh, agregado.data_crlv, hoje);

    AgregadoComStatus {
        agregado,
        status,
        alertas,
    }
}

pub fn esporadico_com_status(esporadico: EsporadicoAgregado, hoje: NaiveDate) -> EsporadicoComStatus {
    let status = avaliar_status(
        esporadico.ativo,
        esporadico.validade_cnh,
        esporadico.data_crlv,
        hoje,
    );
    let alertas = alertas_documentos(
        esporadico.ativo,
        esporadico.validade_cnh,
        esporadico.data_crlv,
        hoje,
    );

    EsporadicoComStatus {
        esporadico,
        status,
        alertas,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dia(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    #[test]
    fn inativo_ignora_vencimentos() {
        let hoje = dia(2024, 8, 25);
        let cnh_vencida = dia(2024, 8, 10);

        assert_eq!(
            avaliar_status(false, cnh_vencida, None, hoje),
            StatusAgregado::Inativo
        );
        assert!(alertas_documentos(false, cnh_vencida, None, hoje).is_empty());
    }

    #[test]
    fn cnh_vencida_deixa_pendente_com_alerta() {
        let hoje = dia(2024, 8, 25);
        let validade_cnh = dia(2024, 8, 10);

        assert_eq!(
            avaliar_status(true, validade_cnh, None, hoje),
            StatusAgregado::Pendente
        );
        assert_eq!(
            alertas_documentos(true, validade_cnh, None, hoje),
            vec!["CNH vencida"]
        );
    }

    #[test]
    fn crlv_vencido_tambem_deixa_pendente() {
        let hoje = dia(2024, 8, 25);
        let validade_cnh = dia(2026, 5, 20);
        let data_crlv = Some(dia(2024, 7, 1));

        assert_eq!(
            avaliar_status(true, validade_cnh, data_crlv, hoje),
            StatusAgregado::Pendente
        );
        assert_eq!(
            alertas_documentos(true, validade_cnh, data_crlv, hoje),
            vec!["CRLV vencido"]
        );
    }

    #[test]
    fn documentos_em_dia_ficam_sem_alerta() {
        let hoje = dia(2024, 8, 25);
        let validade_cnh = dia(2026, 5, 20);
        let data_crlv = Some(dia(2025, 12, 31));

        assert_eq!(
            avaliar_status(true, validade_cnh, data_crlv, hoje),
            StatusAgregado::Ativo
        );
        assert!(alertas_documentos(true, validade_cnh, data_crlv, hoje).is_empty());
    }

    #[test]
    fn horizonte_de_30_dias_e_inclusivo() {
        let hoje = dia(2024, 8, 10);

        // 30 dias à frente ainda alerta; 31 não.
        let no_limite = dia(2024, 9, 9);
        let fora_do_limite = dia(2024, 9, 10);

        assert_eq!(
            alertas_documentos(true, no_limite, None, hoje),
            vec!["CNH vence em breve"]
        );
        assert!(alertas_documentos(true, fora_do_limite, None, hoje).is_empty());
    }

    #[test]
    fn vencimento_hoje_ainda_nao_e_pendencia() {
        let hoje = dia(2024, 8, 25);

        // O dia do vencimento conta como "vence em breve", não como vencido.
        assert_eq!(avaliar_status(true, hoje, None, hoje), StatusAgregado::Ativo);
        assert_eq!(
            alertas_documentos(true, hoje, None, hoje),
            vec!["CNH vence em breve"]
        );
    }

    #[test]
    fn cnh_e_crlv_alertam_juntos() {
        let hoje = dia(2024, 8, 25);
        let validade_cnh = dia(2024, 8, 1);
        let data_crlv = Some(dia(2024, 9, 5));

        assert_eq!(
            alertas_documentos(true, validade_cnh, data_crlv, hoje),
            vec!["CNH vencida", "CRLV vence em breve"]
        );
    }
}
