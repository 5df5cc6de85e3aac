// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

// Extrator de idioma a partir do cabeçalho Accept-Language.
// Só usamos a parte primária da tag ("pt-BR" -> "pt").
pub struct Locale(pub String);

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Português é o idioma padrão da transportadora.
        let default_lang = "pt".to_string();

        let lang = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .and_then(|header_str| {
                accept_language::parse(header_str)
                    .first()
                    .map(|tag_string| {
                        tag_string.split('-').next().unwrap_or(tag_string).to_string()
                    })
            })
            .unwrap_or(default_lang);

        Ok(Locale(lang))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn locale_de(accept_language: Option<&str>) -> String {
        let mut builder = Request::builder().uri("/");
        if let Some(valor) = accept_language {
            builder = builder.header(header::ACCEPT_LANGUAGE, valor);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        let Locale(lang) = Locale::from_request_parts(&mut parts, &()).await.unwrap();
        lang
    }

    #[tokio::test]
    async fn usa_portugues_quando_cabecalho_ausente() {
        assert_eq!(locale_de(None).await, "pt");
    }

    #[tokio::test]
    async fn reduz_tag_regional_para_idioma_primario() {
        assert_eq!(locale_de(Some("en-US,en;q=0.9")).await, "en");
        assert_eq!(locale_de(Some("pt-BR")).await, "pt");
    }
}
