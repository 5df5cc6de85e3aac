// src/docs.rs

use crate::handlers;
use crate::models;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Agregados ---
        handlers::agregados::create_agregado,
        handlers::agregados::list_agregados,
        handlers::agregados::list_agregados_com_alerta,
        handlers::agregados::get_agregado,
        handlers::agregados::update_agregado,
        handlers::agregados::delete_agregado,
        handlers::agregados::list_historico,

        // --- Esporádicos ---
        handlers::esporadicos::create_esporadico,
        handlers::esporadicos::list_esporadicos,
        handlers::esporadicos::list_esporadicos_com_alerta,
        handlers::esporadicos::get_esporadico,
        handlers::esporadicos::update_esporadico,
        handlers::esporadicos::delete_esporadico,

        // --- Campos ---
        handlers::campos::create_campo,
        handlers::campos::list_campos,
        handlers::campos::list_categorias,
        handlers::campos::reordenar_campos,
        handlers::campos::update_campo,
        handlers::campos::delete_campo,
        handlers::campos::alternar_campo_ativo,

        // --- CRM ---
        handlers::crm::create_lead,
        handlers::crm::list_leads,
        handlers::crm::list_leads_pendentes,
        handlers::crm::update_lead,
        handlers::crm::delete_lead,
        handlers::crm::create_lembrete,
        handlers::crm::list_lembretes,
        handlers::crm::get_agenda,
        handlers::crm::update_lembrete,
        handlers::crm::delete_lembrete,
        handlers::crm::alternar_lembrete_concluido,

        // --- Relatórios ---
        handlers::relatorios::exportar_agregados,

        // --- Dashboard ---
        handlers::dashboard::get_resumo,
        handlers::dashboard::get_alertas,
    ),
    components(
        schemas(

            // --- Agregados ---
            models::agregado::StatusAgregado,
            models::agregado::Agregado,
            models::agregado::AgregadoComStatus,
            models::agregado::CreateAgregadoPayload,
            models::agregado::UpdateAgregadoPayload,
            models::historico::AgregadoHistorico,

            // --- Esporádicos ---
            models::esporadico::EsporadicoAgregado,
            models::esporadico::EsporadicoComStatus,
            models::esporadico::CreateEsporadicoPayload,
            models::esporadico::UpdateEsporadicoPayload,

            // --- Campos ---
            models::campo::CampoTipo,
            models::campo::CampoConfiguracao,
            models::campo::CreateCampoPayload,
            models::campo::UpdateCampoPayload,
            models::campo::ReordenarCamposPayload,

            // --- CRM ---
            models::crm::LeadStatus,
            models::crm::TipoLembrete,
            models::crm::CrmLead,
            models::crm::CrmLembrete,
            models::crm::LembreteAgenda,
            models::crm::CreateLeadPayload,
            models::crm::UpdateLeadPayload,
            models::crm::CreateLembretePayload,
            models::crm::UpdateLembretePayload,

            // --- Relatórios ---
            models::relatorio::ExportarAgregadosPayload,

            // --- Dashboard ---
            models::dashboard::DashboardResumo,
            models::dashboard::SeveridadeAlerta,
            models::dashboard::AlertaDocumento,
        )
    ),
    tags(
        (name = "Agregados", description = "Cadastro de motoristas e veículos agregados"),
        (name = "Esporádicos", description = "Contratações de curta duração"),
        (name = "Campos", description = "Campos configuráveis dos cadastros"),
        (name = "CRM", description = "Leads e lembretes de contato"),
        (name = "Relatórios", description = "Exportação de cadastros em CSV"),
        (name = "Dashboard", description = "Contadores e alertas de documentos")
    )
)]
pub struct ApiDoc;
