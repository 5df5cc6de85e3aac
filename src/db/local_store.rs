// src/db/local_store.rs

use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;

use crate::common::error::AppError;

// Armazenamento chave -> arquivo JSON, usado pelo CRM.
// Cada chave vira um arquivo `<dir>/<chave>.json` com a coleção inteira.
#[derive(Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn caminho(&self, chave: &str) -> PathBuf {
        self.dir.join(format!("{}.json", chave))
    }

    /// Lê a coleção inteira. Chave nunca gravada é uma coleção vazia;
    /// arquivo ilegível é erro, e o conteúdo fica no disco para inspeção.
    pub async fn read<T: DeserializeOwned>(&self, chave: &str) -> Result<Vec<T>, AppError> {
        let caminho = self.caminho(chave);

        let conteudo = match tokio::fs::read_to_string(&caminho).await {
            Ok(conteudo) => conteudo,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&conteudo)
            .map_err(|e| AppError::LocalStoreCorrupted(format!("{}: {}", chave, e)))
    }

    /// Regrava a coleção inteira.
    pub async fn write<T: Serialize>(&self, chave: &str, dados: &[T]) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let conteudo = serde_json::to_string_pretty(dados)?;
        tokio::fs::write(self.caminho(chave), conteudo).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Registro {
        nome: String,
    }

    #[tokio::test]
    async fn chave_nunca_gravada_retorna_colecao_vazia() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let registros: Vec<Registro> = store.read("inexistente").await.unwrap();

        assert!(registros.is_empty());
    }

    #[tokio::test]
    async fn write_substitui_a_colecao_inteira() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        store
            .write("registros", &[Registro { nome: "a".into() }])
            .await
            .unwrap();
        store
            .write(
                "registros",
                &[Registro { nome: "b".into() }, Registro { nome: "c".into() }],
            )
            .await
            .unwrap();

        let registros: Vec<Registro> = store.read("registros").await.unwrap();

        assert_eq!(
            registros,
            vec![Registro { nome: "b".into() }, Registro { nome: "c".into() }]
        );
    }

    #[tokio::test]
    async fn arquivo_corrompido_vira_erro_e_fica_intacto() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::new(dir.path());

        let caminho = dir.path().join("registros.json");
        tokio::fs::write(&caminho, "{ nao e json valido").await.unwrap();

        let resultado: Result<Vec<Registro>, _> = store.read("registros").await;
        assert!(matches!(resultado, Err(AppError::LocalStoreCorrupted(_))));

        let conteudo = tokio::fs::read_to_string(&caminho).await.unwrap();
        assert_eq!(conteudo, "{ nao e json valido");
    }
}
