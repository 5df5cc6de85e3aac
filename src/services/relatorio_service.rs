// src/services/relatorio_service.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use sqlx::{Acquire, Executor, Postgres};

use crate::{
    common::error::AppError,
    db::{AgregadoRepository, CampoRepository},
    models::{
        agregado::{Agregado, StatusAgregado},
        campo::CampoConfiguracao,
        relatorio::{ExportarAgregadosPayload, RelatorioCsv},
    },
    services::situacao,
};

// Colunas fixas do cadastro e seus nomes de exibição. Campos configuráveis
// usam o campo_label cadastrado; chave desconhecida sai como veio.
const ROTULOS_FIXOS: &[(&str, &str)] = &[
    ("nome_motorista", "Nome do Motorista"),
    ("placa_veiculo", "Placa do Veículo"),
    ("tipo_veiculo", "Tipo do Veículo"),
    ("proprietario_veiculo", "Proprietário do Veículo"),
    ("contato_motorista", "Contato do Motorista"),
    ("contato_proprietario", "Contato do Proprietário"),
    ("numero_cnh", "Número da CNH"),
    ("categoria_cnh", "Categoria da CNH"),
    ("validade_cnh", "Validade da CNH"),
    ("numero_antt", "Número ANTT"),
    ("data_inclusao", "Data de Inclusão"),
    ("data_saida", "Data de Saída"),
    ("cor_veiculo", "Cor do Veículo"),
    ("capacidade_carga_toneladas", "Capacidade de Carga (ton)"),
    ("capacidade_carga_m3", "Capacidade de Carga (m³)"),
    ("porta_lateral", "Porta Lateral"),
    ("quantidade_pallets", "Quantidade de Pallets"),
    ("pernoite", "Pernoite"),
    ("local_pernoite", "Local de Pernoite"),
    ("boa_conduta", "Boa Conduta"),
    ("rastreador", "Rastreador"),
    ("pontos_cnh", "Pontos na CNH"),
    ("escolaridade", "Escolaridade do Motorista"),
    ("estado_civil", "Estado Civil do Motorista"),
    ("nome_pai", "Nome do Pai do Motorista"),
    ("cpf_proprietario", "CPF do Proprietário"),
    ("rg_proprietario", "RG do Proprietário"),
    ("endereco_proprietario", "Endereço do Proprietário"),
    ("escolaridade_proprietario", "Escolaridade do Proprietário"),
    ("estado_civil_proprietario", "Estado Civil do Proprietário"),
    ("nome_pai_proprietario", "Nome do Pai do Proprietário"),
    ("data_detizacao", "Data da Detetização"),
    ("data_vigilancia_sanitaria", "Data da Vigilância Sanitária"),
    ("data_crlv", "Data do CRLV"),
    ("restricoes_rota", "Restrições de Rota"),
    ("observacoes", "Observações"),
    ("ativo", "Status (Ativo/Inativo)"),
    ("created_at", "Data de Criação"),
    ("updated_at", "Última Atualização"),
];

// Textos que dependem do idioma pedido no Accept-Language.
struct Idioma {
    formato_data: &'static str,
    sim: &'static str,
    nao: &'static str,
    ativo: &'static str,
    inativo: &'static str,
}

const PT: Idioma = Idioma {
    formato_data: "%d/%m/%Y",
    sim: "Sim",
    nao: "Não",
    ativo: "Ativo",
    inativo: "Inativo",
};

const EN: Idioma = Idioma {
    formato_data: "%m/%d/%Y",
    sim: "Yes",
    nao: "No",
    ativo: "Active",
    inativo: "Inactive",
};

fn idioma(locale: &str) -> &'static Idioma {
    if locale == "en" {
        &EN
    } else {
        &PT
    }
}

fn rotulo(chave: &str, definicoes: &[CampoConfiguracao]) -> String {
    if let Some((_, rotulo)) = ROTULOS_FIXOS.iter().find(|(k, _)| *k == chave) {
        return (*rotulo).to_string();
    }

    definicoes
        .iter()
        .find(|def| def.campo_nome == chave)
        .map(|def| def.campo_label.clone())
        .unwrap_or_else(|| chave.to_string())
}

/// Regras de exibição de uma célula, na ordem em que são testadas:
/// nulo, data (chave com "data_"), o flag ativo, booleano, texto puro.
pub(crate) fn formatar_valor(valor: &Value, chave: &str, locale: &str) -> String {
    let idioma = idioma(locale);

    if valor.is_null() {
        return String::new();
    }

    if chave.contains("data_") {
        if let Some(texto) = valor.as_str() {
            if let Ok(data) = NaiveDate::parse_from_str(texto, "%Y-%m-%d") {
                return data.format(idioma.formato_data).to_string();
            }
        }
    }

    // O flag ativo tem rótulo próprio; vem antes da regra de booleanos.
    if chave == "ativo" {
        if let Some(flag) = valor.as_bool() {
            return if flag { idioma.ativo } else { idioma.inativo }.to_string();
        }
    }

    if let Some(flag) = valor.as_bool() {
        return if flag { idioma.sim } else { idioma.nao }.to_string();
    }

    match valor {
        Value::String(texto) => texto.clone(),
        outro => outro.to_string(),
    }
}

// Planilhas executam células iniciadas em =, +, - ou @ como fórmula;
// um apóstrofo na frente desarma a interpretação.
fn neutralizar_formula(valor: &str) -> String {
    let inicio = valor.trim_start();
    let perigoso = matches!(
        inicio.chars().next(),
        Some('=') | Some('+') | Some('-') | Some('@')
    );

    if perigoso {
        format!("'{}", valor)
    } else {
        valor.to_string()
    }
}

pub(crate) fn escapar_csv(valor: &str) -> String {
    let seguro = neutralizar_formula(valor);

    if seguro.contains(',') || seguro.contains('"') || seguro.contains('\n') || seguro.contains('\r')
    {
        format!("\"{}\"", seguro.replace('"', "\"\""))
    } else {
        seguro
    }
}

/// Monta o CSV em memória: cabeçalho com os rótulos na ordem da seleção,
/// uma linha por agregado que passar no filtro de status.
pub(crate) fn gerar_csv(
    agregados: &[Agregado],
    definicoes: &[CampoConfiguracao],
    campos: &[String],
    status: Option<StatusAgregado>,
    locale: &str,
    hoje: NaiveDate,
) -> Result<String, AppError> {
    if campos.is_empty() {
        return Err(AppError::ExportSemCampos);
    }

    let mut linhas = Vec::with_capacity(agregados.len() + 1);

    let cabecalho = campos
        .iter()
        .map(|chave| escapar_csv(&rotulo(chave, definicoes)))
        .collect::<Vec<_>>()
        .join(",");
    linhas.push(cabecalho);

    for agregado in agregados {
        // O status é derivado, então o filtro só pode rodar aqui.
        if let Some(status) = status {
            let derivado = situacao::avaliar_status(
                agregado.ativo,
                agregado.validade_cnh,
                agregado.data_crlv,
                hoje,
            );
            if derivado != status {
                continue;
            }
        }

        let Value::Object(objeto) = serde_json::to_value(agregado)? else {
            continue;
        };
        let extras = agregado.dados_extras.as_object();

        let linha = campos
            .iter()
            .map(|chave| {
                // Campos configuráveis saem lado a lado com os fixos.
                let valor = objeto
                    .get(chave.as_str())
                    .or_else(|| extras.and_then(|e| e.get(chave.as_str())))
                    .unwrap_or(&Value::Null);
                escapar_csv(&formatar_valor(valor, chave, locale))
            })
            .collect::<Vec<_>>()
            .join(",");
        linhas.push(linha);
    }

    Ok(linhas.join("\n"))
}

// agregados_2024-08-25T14-30-00.csv
fn nome_do_arquivo(agora: DateTime<Utc>) -> String {
    format!("agregados_{}.csv", agora.format("%Y-%m-%dT%H-%M-%S"))
}

#[derive(Clone)]
pub struct RelatorioService {
    repo: AgregadoRepository,
    campo_repo: CampoRepository,
}

impl RelatorioService {
    pub fn new(repo: AgregadoRepository, campo_repo: CampoRepository) -> Self {
        Self { repo, campo_repo }
    }

    /// Gera o arquivo de agregados com as colunas pedidas, já filtrado e com
    /// os valores no idioma do chamador.
    pub async fn exportar_agregados<'e, E>(
        &self,
        executor: E,
        payload: &ExportarAgregadosPayload,
        locale: &str,
    ) -> Result<RelatorioCsv, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        // Sem coluna selecionada não se toca no banco.
        if payload.campos.is_empty() {
            return Err(AppError::ExportSemCampos);
        }

        let mut tx = executor.begin().await?;

        let agregados = self
            .repo
            .list_agregados(&mut *tx, None, payload.tipo_veiculo.as_deref())
            .await?;
        let definicoes = self
            .campo_repo
            .list_campos(&mut *tx, "agregados", None, false)
            .await?;

        tx.commit().await?;

        let agora = Utc::now();
        let conteudo = gerar_csv(
            &agregados,
            &definicoes,
            &payload.campos,
            payload.status,
            locale,
            agora.date_naive(),
        )?;

        Ok(RelatorioCsv {
            nome_arquivo: nome_do_arquivo(agora),
            conteudo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{agregado::agregado_exemplo, campo::campo_exemplo};
    use chrono::TimeZone;
    use serde_json::json;

    fn dia(ano: i32, mes: u32, dia: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(ano, mes, dia).unwrap()
    }

    #[test]
    fn valores_nulos_viram_celula_vazia() {
        assert_eq!(formatar_valor(&Value::Null, "cor_veiculo", "pt"), "");
    }

    #[test]
    fn chave_com_data_formata_no_idioma() {
        let valor = json!("2025-12-31");

        assert_eq!(formatar_valor(&valor, "data_crlv", "pt"), "31/12/2025");
        assert_eq!(formatar_valor(&valor, "data_crlv", "en"), "12/31/2025");
    }

    #[test]
    fn ativo_tem_rotulo_proprio_antes_da_regra_de_booleano() {
        assert_eq!(formatar_valor(&json!(true), "ativo", "pt"), "Ativo");
        assert_eq!(formatar_valor(&json!(false), "ativo", "pt"), "Inativo");
        assert_eq!(formatar_valor(&json!(true), "ativo", "en"), "Active");
    }

    #[test]
    fn booleano_comum_vira_sim_ou_nao() {
        assert_eq!(formatar_valor(&json!(true), "porta_lateral", "pt"), "Sim");
        assert_eq!(formatar_valor(&json!(false), "pernoite", "pt"), "Não");
        assert_eq!(formatar_valor(&json!(true), "porta_lateral", "en"), "Yes");
    }

    #[test]
    fn demais_valores_viram_texto() {
        assert_eq!(formatar_valor(&json!("ABC-1234"), "placa_veiculo", "pt"), "ABC-1234");
        assert_eq!(formatar_valor(&json!(28), "quantidade_pallets", "pt"), "28");
    }

    #[test]
    fn escapa_separador_e_aspas() {
        assert_eq!(escapar_csv("Silva, João"), "\"Silva, João\"");
        assert_eq!(escapar_csv("dizia \"urgente\""), "\"dizia \"\"urgente\"\"\"");
        assert_eq!(escapar_csv("sem nada"), "sem nada");
    }

    #[test]
    fn neutraliza_celula_que_vira_formula() {
        assert_eq!(escapar_csv("=SOMA(A1:A9)"), "'=SOMA(A1:A9)");
        assert_eq!(escapar_csv("@importar"), "'@importar");
    }

    #[test]
    fn exportacao_sem_campos_e_rejeitada() {
        let resultado = gerar_csv(&[agregado_exemplo()], &[], &[], None, "pt", dia(2024, 8, 25));

        assert!(matches!(resultado, Err(AppError::ExportSemCampos)));
    }

    #[test]
    fn cabecalho_usa_rotulos_na_ordem_da_selecao() {
        let campos = vec![
            "placa_veiculo".to_string(),
            "nome_motorista".to_string(),
            "ativo".to_string(),
        ];

        let csv = gerar_csv(
            &[agregado_exemplo()],
            &[],
            &campos,
            None,
            "pt",
            dia(2024, 8, 25),
        )
        .unwrap();

        let mut linhas = csv.lines();
        assert_eq!(
            linhas.next().unwrap(),
            "Placa do Veículo,Nome do Motorista,Status (Ativo/Inativo)"
        );
        assert_eq!(linhas.next().unwrap(), "ABC-1234,João Silva,Ativo");
    }

    #[test]
    fn data_e_booleano_saem_localizados_na_linha() {
        let campos = vec!["data_crlv".to_string(), "porta_lateral".to_string()];

        let csv = gerar_csv(
            &[agregado_exemplo()],
            &[],
            &campos,
            None,
            "pt",
            dia(2024, 8, 25),
        )
        .unwrap();

        assert_eq!(csv.lines().nth(1).unwrap(), "31/12/2025,Sim");
    }

    #[test]
    fn filtro_de_status_derivado_exclui_linhas() {
        let em_dia = agregado_exemplo();
        let mut vencido = agregado_exemplo();
        vencido.nome_motorista = "Carlos Pereira".to_string();
        vencido.validade_cnh = dia(2024, 8, 1);

        let campos = vec!["nome_motorista".to_string()];
        let csv = gerar_csv(
            &[em_dia, vencido],
            &[],
            &campos,
            Some(StatusAgregado::Pendente),
            "pt",
            dia(2024, 8, 25),
        )
        .unwrap();

        let linhas: Vec<&str> = csv.lines().collect();
        assert_eq!(linhas, vec!["Nome do Motorista", "Carlos Pereira"]);
    }

    #[test]
    fn campo_configuravel_usa_label_e_valor_dos_dados_extras() {
        let mut agregado = agregado_exemplo();
        agregado.dados_extras = json!({"telefone_emergencia": "11 98888-7777"});

        let mut def = campo_exemplo("telefone_emergencia", "contato", 1);
        def.campo_label = "Telefone de Emergência".to_string();

        let campos = vec!["telefone_emergencia".to_string(), "inexistente".to_string()];
        let csv = gerar_csv(
            &[agregado],
            &[def],
            &campos,
            None,
            "pt",
            dia(2024, 8, 25),
        )
        .unwrap();

        let mut linhas = csv.lines();
        // Chave sem rótulo conhecido sai como veio.
        assert_eq!(linhas.next().unwrap(), "Telefone de Emergência,inexistente");
        assert_eq!(linhas.next().unwrap(), "11 98888-7777,");
    }

    #[test]
    fn nome_do_arquivo_carrega_o_instante_da_geracao() {
        let agora = Utc.with_ymd_and_hms(2024, 8, 25, 14, 30, 0).unwrap();

        assert_eq!(nome_do_arquivo(agora), "agregados_2024-08-25T14-30-00.csv");
    }
}
