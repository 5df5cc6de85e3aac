// src/services/crm_service.rs

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::LocalStore,
    models::crm::{
        CreateLeadPayload, CreateLembretePayload, CrmLead, CrmLembrete, LeadStatus,
        LembreteAgenda, TipoLembrete, UpdateLeadPayload, UpdateLembretePayload,
    },
};

// Chaves dos blobs no armazenamento local.
const CHAVE_LEADS: &str = "crm_leads";
const CHAVE_LEMBRETES: &str = "crm_lembretes";

// =========================================================================
//  DERIVAÇÕES DE PRAZO
// =========================================================================

/// Leads que precisam de contato: próximo contato marcado para hoje ou antes,
/// fora os já perdidos ou convertidos.
pub fn leads_para_contato(leads: &[CrmLead], hoje: NaiveDate) -> Vec<CrmLead> {
    leads
        .iter()
        .filter(|lead| {
            lead.status != LeadStatus::Perdido
                && lead.status != LeadStatus::Convertido
                && lead.proximo_contato.is_some_and(|data| data <= hoje)
        })
        .cloned()
        .collect()
}

/// Lembretes pendentes do dia corrente, da meia-noite até antes da próxima.
pub fn lembretes_hoje(lembretes: &[CrmLembrete], agora: DateTime<Utc>) -> Vec<CrmLembrete> {
    let inicio = agora.date_naive().and_time(NaiveTime::MIN).and_utc();
    let fim = inicio + Duration::days(1);

    lembretes
        .iter()
        .filter(|l| !l.concluido && l.data_hora >= inicio && l.data_hora < fim)
        .cloned()
        .collect()
}

/// Lembretes pendentes dos próximos 7 dias (limites inclusos), do mais
/// próximo para o mais distante.
pub fn lembretes_proximos(lembretes: &[CrmLembrete], agora: DateTime<Utc>) -> Vec<CrmLembrete> {
    let limite = agora + Duration::days(7);

    let mut proximos: Vec<CrmLembrete> = lembretes
        .iter()
        .filter(|l| !l.concluido && l.data_hora >= agora && l.data_hora <= limite)
        .cloned()
        .collect();
    proximos.sort_by_key(|l| l.data_hora);

    proximos
}

/// Lembretes pendentes cujo horário já passou.
pub fn lembretes_atrasados(lembretes: &[CrmLembrete], agora: DateTime<Utc>) -> Vec<CrmLembrete> {
    lembretes
        .iter()
        .filter(|l| !l.concluido && l.data_hora < agora)
        .cloned()
        .collect()
}

// =========================================================================
//  SERVIÇO
// =========================================================================

// O CRM vive em blobs JSON locais, não no Postgres: cada operação lê a
// coleção inteira e a regrava.
#[derive(Clone)]
pub struct CrmService {
    store: LocalStore,
}

impl CrmService {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    // --- LEADS ---

    pub async fn create_lead(&self, payload: CreateLeadPayload) -> Result<CrmLead, AppError> {
        let mut leads: Vec<CrmLead> = self.store.read(CHAVE_LEADS).await?;

        let agora = Utc::now();
        let lead = CrmLead {
            id: Uuid::new_v4(),
            nome: payload.nome,
            contato: payload.contato,
            email: payload.email,
            tipo_veiculo: payload.tipo_veiculo,
            status: payload.status.unwrap_or(LeadStatus::Novo),
            origem: payload.origem,
            observacoes: payload.observacoes,
            data_inclusao: agora,
            ultimo_contato: None,
            proximo_contato: payload.proximo_contato,
            created_at: agora,
            updated_at: agora,
        };

        leads.push(lead.clone());
        self.store.write(CHAVE_LEADS, &leads).await?;

        Ok(lead)
    }

    pub async fn list_leads(&self, status: Option<LeadStatus>) -> Result<Vec<CrmLead>, AppError> {
        let mut leads: Vec<CrmLead> = self.store.read(CHAVE_LEADS).await?;

        if let Some(status) = status {
            leads.retain(|l| l.status == status);
        }

        Ok(leads)
    }

    pub async fn update_lead(
        &self,
        id: Uuid,
        payload: UpdateLeadPayload,
    ) -> Result<CrmLead, AppError> {
        let mut leads: Vec<CrmLead> = self.store.read(CHAVE_LEADS).await?;

        let lead = leads
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AppError::LeadNotFound)?;

        let agora = Utc::now();

        if let Some(nome) = payload.nome {
            lead.nome = nome;
        }
        if let Some(contato) = payload.contato {
            lead.contato = contato;
        }
        if let Some(email) = payload.email {
            lead.email = Some(email);
        }
        if let Some(tipo_veiculo) = payload.tipo_veiculo {
            lead.tipo_veiculo = Some(tipo_veiculo);
        }
        if let Some(status) = payload.status {
            lead.status = status;
        }
        if let Some(origem) = payload.origem {
            lead.origem = Some(origem);
        }
        if let Some(observacoes) = payload.observacoes {
            lead.observacoes = Some(observacoes);
        }
        if let Some(proximo_contato) = payload.proximo_contato {
            lead.proximo_contato = Some(proximo_contato);
        }

        // Mexeu no lead, conversou com ele.
        lead.ultimo_contato = Some(agora);
        lead.updated_at = agora;

        let atualizado = lead.clone();
        self.store.write(CHAVE_LEADS, &leads).await?;

        Ok(atualizado)
    }

    pub async fn delete_lead(&self, id: Uuid) -> Result<(), AppError> {
        let mut leads: Vec<CrmLead> = self.store.read(CHAVE_LEADS).await?;

        let antes = leads.len();
        leads.retain(|l| l.id != id);
        if leads.len() == antes {
            return Err(AppError::LeadNotFound);
        }

        self.store.write(CHAVE_LEADS, &leads).await?;

        Ok(())
    }

    pub async fn list_leads_pendentes(&self) -> Result<Vec<CrmLead>, AppError> {
        let leads: Vec<CrmLead> = self.store.read(CHAVE_LEADS).await?;
        Ok(leads_para_contato(&leads, Utc::now().date_naive()))
    }

    // --- LEMBRETES ---

    pub async fn create_lembrete(
        &self,
        payload: CreateLembretePayload,
    ) -> Result<CrmLembrete, AppError> {
        let mut lembretes: Vec<CrmLembrete> = self.store.read(CHAVE_LEMBRETES).await?;

        let agora = Utc::now();
        let lembrete = CrmLembrete {
            id: Uuid::new_v4(),
            titulo: payload.titulo,
            descricao: payload.descricao,
            data_hora: payload.data_hora,
            lead_id: payload.lead_id,
            lead_nome: payload.lead_nome,
            concluido: false,
            tipo: payload.tipo.unwrap_or(TipoLembrete::Outro),
            created_at: agora,
            updated_at: agora,
        };

        lembretes.push(lembrete.clone());
        self.store.write(CHAVE_LEMBRETES, &lembretes).await?;

        Ok(lembrete)
    }

    pub async fn list_lembretes(&self) -> Result<Vec<CrmLembrete>, AppError> {
        self.store.read(CHAVE_LEMBRETES).await
    }

    pub async fn update_lembrete(
        &self,
        id: Uuid,
        payload: UpdateLembretePayload,
    ) -> Result<CrmLembrete, AppError> {
        let mut lembretes: Vec<CrmLembrete> = self.store.read(CHAVE_LEMBRETES).await?;

        let lembrete = lembretes
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AppError::LembreteNotFound)?;

        if let Some(titulo) = payload.titulo {
            lembrete.titulo = titulo;
        }
        if let Some(descricao) = payload.descricao {
            lembrete.descricao = Some(descricao);
        }
        if let Some(data_hora) = payload.data_hora {
            lembrete.data_hora = data_hora;
        }
        if let Some(lead_id) = payload.lead_id {
            lembrete.lead_id = Some(lead_id);
        }
        if let Some(lead_nome) = payload.lead_nome {
            lembrete.lead_nome = Some(lead_nome);
        }
        if let Some(concluido) = payload.concluido {
            lembrete.concluido = concluido;
        }
        if let Some(tipo) = payload.tipo {
            lembrete.tipo = tipo;
        }
        lembrete.updated_at = Utc::now();

        let atualizado = lembrete.clone();
        self.store.write(CHAVE_LEMBRETES, &lembretes).await?;

        Ok(atualizado)
    }

    pub async fn delete_lembrete(&self, id: Uuid) -> Result<(), AppError> {
        let mut lembretes: Vec<CrmLembrete> = self.store.read(CHAVE_LEMBRETES).await?;

        let antes = lembretes.len();
        lembretes.retain(|l| l.id != id);
        if lembretes.len() == antes {
            return Err(AppError::LembreteNotFound);
        }

        self.store.write(CHAVE_LEMBRETES, &lembretes).await?;

        Ok(())
    }

    pub async fn toggle_concluido(&self, id: Uuid) -> Result<CrmLembrete, AppError> {
        let mut lembretes: Vec<CrmLembrete> = self.store.read(CHAVE_LEMBRETES).await?;

        let lembrete = lembretes
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(AppError::LembreteNotFound)?;

        lembrete.concluido = !lembrete.concluido;
        lembrete.updated_at = Utc::now();

        let atualizado = lembrete.clone();
        self.store.write(CHAVE_LEMBRETES, &lembretes).await?;

        Ok(atualizado)
    }

    pub async fn agenda(&self) -> Result<LembreteAgenda, AppError> {
        let lembretes: Vec<CrmLembrete> = self.store.read(CHAVE_LEMBRETES).await?;
        let agora = Utc::now();

        Ok(LembreteAgenda {
            hoje: lembretes_hoje(&lembretes, agora),
            proximos: lembretes_proximos(&lembretes, agora),
            atrasados: lembretes_atrasados(&lembretes, agora),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::crm::{lead_exemplo, lembrete_exemplo};
    use chrono::TimeZone;

    fn agora_fixa() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 25, 10, 0, 0).unwrap()
    }

    fn servico_temporario() -> (tempfile::TempDir, CrmService) {
        let dir = tempfile::tempdir().unwrap();
        let service = CrmService::new(LocalStore::new(dir.path()));
        (dir, service)
    }

    // --- derivações puras ---

    #[test]
    fn pendentes_ignoram_perdidos_e_convertidos() {
        let hoje = agora_fixa().date_naive();
        let ontem = hoje - Duration::days(1);

        let leads = vec![
            lead_exemplo(LeadStatus::Novo, Some(ontem)),
            lead_exemplo(LeadStatus::Perdido, Some(ontem)),
            lead_exemplo(LeadStatus::Convertido, Some(hoje)),
            lead_exemplo(LeadStatus::EmContato, Some(hoje)),
        ];

        let pendentes = leads_para_contato(&leads, hoje);

        assert_eq!(pendentes.len(), 2);
        assert!(pendentes
            .iter()
            .all(|l| l.status == LeadStatus::Novo || l.status == LeadStatus::EmContato));
    }

    #[test]
    fn pendentes_exigem_proximo_contato_vencido() {
        let hoje = agora_fixa().date_naive();

        let leads = vec![
            lead_exemplo(LeadStatus::Novo, Some(hoje + Duration::days(1))),
            lead_exemplo(LeadStatus::Novo, None),
        ];

        assert!(leads_para_contato(&leads, hoje).is_empty());
    }

    #[test]
    fn lembrete_daqui_tres_dias_fica_em_proximos_e_nao_em_hoje() {
        let agora = agora_fixa();
        let lembretes = vec![lembrete_exemplo(agora + Duration::days(3), false)];

        assert!(lembretes_hoje(&lembretes, agora).is_empty());
        assert_eq!(lembretes_proximos(&lembretes, agora).len(), 1);
        assert!(lembretes_atrasados(&lembretes, agora).is_empty());
    }

    #[test]
    fn lembrete_de_ontem_fica_apenas_em_atrasados() {
        let agora = agora_fixa();
        let lembretes = vec![lembrete_exemplo(agora - Duration::days(1), false)];

        assert!(lembretes_hoje(&lembretes, agora).is_empty());
        assert!(lembretes_proximos(&lembretes, agora).is_empty());
        assert_eq!(lembretes_atrasados(&lembretes, agora).len(), 1);
    }

    #[test]
    fn lembrete_de_logo_mais_aparece_em_hoje_e_em_proximos() {
        let agora = agora_fixa();
        let lembretes = vec![lembrete_exemplo(agora + Duration::hours(2), false)];

        assert_eq!(lembretes_hoje(&lembretes, agora).len(), 1);
        assert_eq!(lembretes_proximos(&lembretes, agora).len(), 1);
    }

    #[test]
    fn concluidos_nao_aparecem_em_nenhum_grupo() {
        let agora = agora_fixa();
        let lembretes = vec![
            lembrete_exemplo(agora - Duration::days(1), true),
            lembrete_exemplo(agora + Duration::hours(2), true),
        ];

        assert!(lembretes_hoje(&lembretes, agora).is_empty());
        assert!(lembretes_proximos(&lembretes, agora).is_empty());
        assert!(lembretes_atrasados(&lembretes, agora).is_empty());
    }

    #[test]
    fn proximos_saem_em_ordem_crescente_de_horario() {
        let agora = agora_fixa();
        let em_cinco_dias = lembrete_exemplo(agora + Duration::days(5), false);
        let em_uma_hora = lembrete_exemplo(agora + Duration::hours(1), false);
        let em_dois_dias = lembrete_exemplo(agora + Duration::days(2), false);

        let lembretes = vec![
            em_cinco_dias.clone(),
            em_uma_hora.clone(),
            em_dois_dias.clone(),
        ];
        let proximos = lembretes_proximos(&lembretes, agora);

        let ids: Vec<Uuid> = proximos.iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![em_uma_hora.id, em_dois_dias.id, em_cinco_dias.id]);
    }

    #[test]
    fn horizonte_de_sete_dias_e_inclusivo() {
        let agora = agora_fixa();
        let lembretes = vec![
            lembrete_exemplo(agora + Duration::days(7), false),
            lembrete_exemplo(agora + Duration::days(7) + Duration::seconds(1), false),
        ];

        assert_eq!(lembretes_proximos(&lembretes, agora).len(), 1);
    }

    // --- CRUD sobre o armazenamento local ---

    #[tokio::test]
    async fn atualizar_lead_marca_o_ultimo_contato() {
        let (_dir, service) = servico_temporario();

        let payload = CreateLeadPayload {
            nome: "Marcos Andrade".to_string(),
            contato: "11 98888-7777".to_string(),
            email: None,
            tipo_veiculo: None,
            status: None,
            origem: None,
            observacoes: None,
            proximo_contato: None,
        };
        let lead = service.create_lead(payload).await.unwrap();
        assert_eq!(lead.status, LeadStatus::Novo);
        assert!(lead.ultimo_contato.is_none());

        let atualizado = service
            .update_lead(
                lead.id,
                UpdateLeadPayload {
                    status: Some(LeadStatus::EmContato),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(atualizado.status, LeadStatus::EmContato);
        assert!(atualizado.ultimo_contato.is_some());

        // E a mudança sobrevive a uma releitura do blob.
        let relidos = service.list_leads(None).await.unwrap();
        assert_eq!(relidos.len(), 1);
        assert_eq!(relidos[0].status, LeadStatus::EmContato);
    }

    #[tokio::test]
    async fn excluir_lead_inexistente_da_nao_encontrado() {
        let (_dir, service) = servico_temporario();

        let resultado = service.delete_lead(Uuid::new_v4()).await;

        assert!(matches!(resultado, Err(AppError::LeadNotFound)));
    }

    #[tokio::test]
    async fn alternar_concluido_vai_e_volta() {
        let (_dir, service) = servico_temporario();

        let payload = CreateLembretePayload {
            titulo: "Ligar para negociar tabela de frete".to_string(),
            descricao: None,
            data_hora: Utc::now(),
            lead_id: None,
            lead_nome: None,
            tipo: None,
        };
        let lembrete = service.create_lembrete(payload).await.unwrap();
        assert!(!lembrete.concluido);
        assert_eq!(lembrete.tipo, TipoLembrete::Outro);

        let marcado = service.toggle_concluido(lembrete.id).await.unwrap();
        assert!(marcado.concluido);

        let desmarcado = service.toggle_concluido(lembrete.id).await.unwrap();
        assert!(!desmarcado.concluido);
    }
}
