// src/services/campo_service.rs

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde_json::Value;
use sqlx::{Acquire, Executor, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CampoRepository,
    models::campo::{
        CampoConfiguracao, CampoTipo, CreateCampoPayload, ReordenarCamposPayload,
        UpdateCampoPayload,
    },
};

/// Nome técnico do campo: minúsculas, espaços viram um único underscore.
/// Ex: "Telefone de Emergência" -> "telefone_de_emergência"
pub fn normalizar_campo_nome(nome: &str) -> String {
    nome.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Categoria informada, ou "geral" quando vier ausente ou em branco.
pub fn categoria_ou_padrao(categoria: Option<&str>) -> &str {
    categoria
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("geral")
}

/// Categorias na ordem em que aparecem pela primeira vez na lista ordenada.
pub fn categorias_distintas(campos: &[CampoConfiguracao]) -> Vec<String> {
    let mut vistas = HashSet::new();
    campos
        .iter()
        .filter(|c| vistas.insert(c.campo_categoria.clone()))
        .map(|c| c.campo_categoria.clone())
        .collect()
}

// A posição na lista recebida vira a ordem persistida, começando em 1.
fn ordens_reatribuidas(ids: &[Uuid]) -> Vec<(Uuid, i32)> {
    ids.iter()
        .enumerate()
        .map(|(indice, id)| (*id, indice as i32 + 1))
        .collect()
}

fn mesmo_conjunto_de_ids(atuais: &[CampoConfiguracao], novos: &[Uuid]) -> bool {
    if atuais.len() != novos.len() {
        return false;
    }

    let esperados: HashSet<Uuid> = atuais.iter().map(|c| c.id).collect();
    let recebidos: HashSet<Uuid> = novos.iter().copied().collect();
    esperados == recebidos
}

// =========================================================================
//  MOTOR DE VALIDAÇÃO DOS CAMPOS CONFIGURÁVEIS
// =========================================================================

/// Confere `dados_extras` contra as definições da tabela.
/// Os erros saem como códigos ("required", "invalid_number", ...), não frases.
pub fn validar_dados_extras(
    definicoes: &[CampoConfiguracao],
    dados: &Value,
) -> Result<(), AppError> {
    let obj = dados.as_object().ok_or(AppError::CustomDataJson)?;

    // Mapa de erros: chave do campo -> código do erro
    let mut erros: HashMap<String, String> = HashMap::new();

    for def in definicoes {
        // Campos desativados não participam nem como obrigatórios.
        if !def.campo_ativo {
            continue;
        }

        let valor = obj.get(&def.campo_nome);

        // Obrigatoriedade: ausente, null ou string em branco contam como vazio.
        let vazio = match valor {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            Some(_) => false,
        };

        if vazio {
            if def.campo_obrigatorio {
                erros.insert(def.campo_nome.clone(), "required".to_string());
            }
            continue;
        }

        if let Some(val) = valor {
            let valido = match def.campo_tipo {
                CampoTipo::Number => val.is_number(),
                CampoTipo::Boolean => val.is_boolean(),
                CampoTipo::Text | CampoTipo::Textarea => val.is_string(),
                CampoTipo::Date => val
                    .as_str()
                    .is_some_and(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()),
                // Sem opções cadastradas, qualquer texto serve.
                CampoTipo::Select => val.as_str().is_some_and(|escolha| {
                    def.campo_opcoes.is_empty()
                        || def.campo_opcoes.iter().any(|opcao| opcao == escolha)
                }),
            };

            if !valido {
                let codigo = match def.campo_tipo {
                    CampoTipo::Number => "invalid_number",
                    CampoTipo::Date => "invalid_date_format", // Espera YYYY-MM-DD
                    CampoTipo::Boolean => "invalid_boolean",
                    CampoTipo::Select => "invalid_option",
                    _ => "invalid_text",
                };
                erros.insert(def.campo_nome.clone(), codigo.to_string());
            }
        }
    }

    if !erros.is_empty() {
        return Err(AppError::CustomDataValidationError(erros));
    }

    Ok(())
}

// =========================================================================
//  SERVIÇO
// =========================================================================

#[derive(Clone)]
pub struct CampoService {
    repo: CampoRepository,
}

impl CampoService {
    pub fn new(repo: CampoRepository) -> Self {
        Self { repo }
    }

    pub async fn create_campo<'e, E>(
        &self,
        executor: E,
        payload: CreateCampoPayload,
    ) -> Result<CampoConfiguracao, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let campo_nome = normalizar_campo_nome(&payload.campo_nome);
        let categoria = categoria_ou_padrao(payload.campo_categoria.as_deref());

        // Só selects carregam opções.
        let opcoes: &[String] = if payload.campo_tipo == CampoTipo::Select {
            &payload.campo_opcoes
        } else {
            &[]
        };

        // O campo novo entra no fim da lista ativa.
        let ordem = self
            .repo
            .count_campos_ativos(&mut *tx, &payload.tabela_nome)
            .await? as i32
            + 1;

        let campo = self
            .repo
            .create_campo(
                &mut *tx,
                &payload.tabela_nome,
                &campo_nome,
                &payload.campo_label,
                payload.campo_tipo,
                payload.campo_obrigatorio,
                opcoes,
                categoria,
                ordem,
            )
            .await?;

        tx.commit().await?;

        Ok(campo)
    }

    pub async fn list_campos<'e, E>(
        &self,
        executor: E,
        tabela: &str,
        categoria: Option<&str>,
        incluir_inativos: bool,
    ) -> Result<Vec<CampoConfiguracao>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .list_campos(executor, tabela, categoria, incluir_inativos)
            .await
    }

    pub async fn list_categorias<'e, E>(
        &self,
        executor: E,
        tabela: &str,
    ) -> Result<Vec<String>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campos = self.repo.list_campos(executor, tabela, None, false).await?;
        Ok(categorias_distintas(&campos))
    }

    pub async fn update_campo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        mut payload: UpdateCampoPayload,
    ) -> Result<CampoConfiguracao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        if let Some(nome) = payload.campo_nome.take() {
            payload.campo_nome = Some(normalizar_campo_nome(&nome));
        }

        self.repo
            .update_campo(executor, id, &payload)
            .await?
            .ok_or(AppError::CampoNotFound)
    }

    pub async fn delete_campo<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let removidos = self.repo.delete_campo(executor, id).await?;
        if removidos == 0 {
            return Err(AppError::CampoNotFound);
        }
        Ok(())
    }

    /// Liga/desliga o campo. A ordem antiga fica guardada para o caso de reativação.
    pub async fn alternar_ativo<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<CampoConfiguracao, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .toggle_campo_ativo(executor, id)
            .await?
            .ok_or(AppError::CampoNotFound)
    }

    /// Regrava a ordem de TODOS os campos ativos da tabela de uma vez,
    /// na mesma transação. A lista precisa bater exatamente com os ativos.
    pub async fn reordenar_campos<'e, E>(
        &self,
        executor: E,
        payload: &ReordenarCamposPayload,
    ) -> Result<Vec<CampoConfiguracao>, AppError>
    where
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let atuais = self
            .repo
            .list_campos(&mut *tx, &payload.tabela_nome, None, false)
            .await?;

        if !mesmo_conjunto_de_ids(&atuais, &payload.ids) {
            return Err(AppError::ReordenacaoInvalida(
                "A lista deve conter exatamente os ids dos campos ativos da tabela.".to_string(),
            ));
        }

        for (id, ordem) in ordens_reatribuidas(&payload.ids) {
            self.repo.set_campo_ordem(&mut *tx, id, ordem).await?;
        }

        let reordenados = self
            .repo
            .list_campos(&mut *tx, &payload.tabela_nome, None, false)
            .await?;

        tx.commit().await?;

        Ok(reordenados)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::campo::campo_exemplo;
    use serde_json::json;

    #[test]
    fn normaliza_nome_para_minusculas_com_underscore() {
        assert_eq!(
            normalizar_campo_nome("Telefone de Emergência"),
            "telefone_de_emergência"
        );
        assert_eq!(normalizar_campo_nome("Nome  do   Pai"), "nome_do_pai");
        assert_eq!(normalizar_campo_nome(" Peso "), "peso");
    }

    #[test]
    fn categoria_ausente_ou_em_branco_cai_em_geral() {
        assert_eq!(categoria_ou_padrao(None), "geral");
        assert_eq!(categoria_ou_padrao(Some("")), "geral");
        assert_eq!(categoria_ou_padrao(Some("   ")), "geral");
        assert_eq!(categoria_ou_padrao(Some(" contato ")), "contato");
    }

    #[test]
    fn categorias_saem_na_ordem_da_primeira_ocorrencia() {
        let campos = vec![
            campo_exemplo("a", "geral", 1),
            campo_exemplo("b", "contato", 2),
            campo_exemplo("c", "geral", 3),
            campo_exemplo("d", "operacao", 4),
        ];

        assert_eq!(
            categorias_distintas(&campos),
            vec!["geral", "contato", "operacao"]
        );
    }

    #[test]
    fn reordenacao_numera_pela_posicao_recebida() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        // [a, b, c] reordenado para [c, a, b]
        let ordens = ordens_reatribuidas(&[c, a, b]);

        assert_eq!(ordens, vec![(c, 1), (a, 2), (b, 3)]);
    }

    #[test]
    fn conjunto_de_ids_precisa_bater_exatamente() {
        let campos = vec![
            campo_exemplo("a", "geral", 1),
            campo_exemplo("b", "geral", 2),
        ];
        let a = campos[0].id;
        let b = campos[1].id;

        assert!(mesmo_conjunto_de_ids(&campos, &[b, a]));

        // Id estranho, id repetido e lista incompleta são rejeitados.
        assert!(!mesmo_conjunto_de_ids(&campos, &[a, Uuid::new_v4()]));
        assert!(!mesmo_conjunto_de_ids(&campos, &[a, a]));
        assert!(!mesmo_conjunto_de_ids(&campos, &[a]));
    }

    #[test]
    fn dados_extras_precisa_ser_objeto() {
        let definicoes = vec![campo_exemplo("peso", "geral", 1)];

        let resultado = validar_dados_extras(&definicoes, &json!([1, 2, 3]));

        assert!(matches!(resultado, Err(AppError::CustomDataJson)));
    }

    #[test]
    fn obrigatorio_ausente_ou_em_branco_reprova() {
        let mut def = campo_exemplo("contato_emergencia", "contato", 1);
        def.campo_obrigatorio = true;
        let definicoes = vec![def];

        for dados in [json!({}), json!({"contato_emergencia": null}), json!({"contato_emergencia": "   "})] {
            let erro = validar_dados_extras(&definicoes, &dados).unwrap_err();
            match erro {
                AppError::CustomDataValidationError(erros) => {
                    assert_eq!(erros.get("contato_emergencia").unwrap(), "required");
                }
                outro => panic!("erro inesperado: {:?}", outro),
            }
        }
    }

    #[test]
    fn opcional_ausente_passa_sem_erro() {
        let definicoes = vec![campo_exemplo("peso", "geral", 1)];

        assert!(validar_dados_extras(&definicoes, &json!({})).is_ok());
    }

    #[test]
    fn tipos_numericos_e_booleanos_sao_conferidos() {
        let mut numero = campo_exemplo("peso", "geral", 1);
        numero.campo_tipo = CampoTipo::Number;
        let mut booleano = campo_exemplo("tem_ajudante", "operacao", 2);
        booleano.campo_tipo = CampoTipo::Boolean;
        let definicoes = vec![numero, booleano];

        assert!(validar_dados_extras(
            &definicoes,
            &json!({"peso": 14.5, "tem_ajudante": true})
        )
        .is_ok());

        let erro = validar_dados_extras(
            &definicoes,
            &json!({"peso": "quatorze", "tem_ajudante": "sim"}),
        )
        .unwrap_err();

        match erro {
            AppError::CustomDataValidationError(erros) => {
                assert_eq!(erros.get("peso").unwrap(), "invalid_number");
                assert_eq!(erros.get("tem_ajudante").unwrap(), "invalid_boolean");
            }
            outro => panic!("erro inesperado: {:?}", outro),
        }
    }

    #[test]
    fn data_exige_formato_iso() {
        let mut def = campo_exemplo("data_renovacao", "documentos", 1);
        def.campo_tipo = CampoTipo::Date;
        let definicoes = vec![def];

        assert!(validar_dados_extras(&definicoes, &json!({"data_renovacao": "2026-05-20"})).is_ok());

        let erro =
            validar_dados_extras(&definicoes, &json!({"data_renovacao": "20/05/2026"})).unwrap_err();
        match erro {
            AppError::CustomDataValidationError(erros) => {
                assert_eq!(erros.get("data_renovacao").unwrap(), "invalid_date_format");
            }
            outro => panic!("erro inesperado: {:?}", outro),
        }
    }

    #[test]
    fn select_exige_uma_das_opcoes_cadastradas() {
        let mut def = campo_exemplo("turno", "operacao", 1);
        def.campo_tipo = CampoTipo::Select;
        def.campo_opcoes = vec!["Diurno".to_string(), "Noturno".to_string()];
        let definicoes = vec![def];

        assert!(validar_dados_extras(&definicoes, &json!({"turno": "Diurno"})).is_ok());

        let erro = validar_dados_extras(&definicoes, &json!({"turno": "Madrugada"})).unwrap_err();
        match erro {
            AppError::CustomDataValidationError(erros) => {
                assert_eq!(erros.get("turno").unwrap(), "invalid_option");
            }
            outro => panic!("erro inesperado: {:?}", outro),
        }
    }

    #[test]
    fn select_sem_opcoes_aceita_qualquer_texto() {
        let mut def = campo_exemplo("rota_preferida", "operacao", 1);
        def.campo_tipo = CampoTipo::Select;
        let definicoes = vec![def];

        assert!(
            validar_dados_extras(&definicoes, &json!({"rota_preferida": "Litoral"})).is_ok()
        );
    }

    #[test]
    fn campo_desativado_nao_valida_nada() {
        let mut def = campo_exemplo("peso", "geral", 1);
        def.campo_tipo = CampoTipo::Number;
        def.campo_obrigatorio = true;
        def.campo_ativo = false;
        let definicoes = vec![def];

        // Nem a obrigatoriedade nem o tipo são cobrados.
        assert!(validar_dados_extras(&definicoes, &json!({})).is_ok());
        assert!(validar_dados_extras(&definicoes, &json!({"peso": "texto"})).is_ok());
    }
}
