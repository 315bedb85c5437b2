//! Venture repository
//!
//! `empreendimentos.json`: the full list of registered ventures, newest
//! first. Reads load the whole document; mutations rewrite it whole.
//! Mutating request handlers must hold the writer lock across their
//! read-modify-write so concurrent updates cannot overwrite each other.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};

use super::{StoreError, ensure_file, write_atomic};
use crate::domain::Venture;

const VENTURES_FILE: &str = "empreendimentos.json";

#[derive(Clone)]
pub struct VentureStore {
    path: PathBuf,
    writer: Arc<Mutex<()>>,
}

impl VentureStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(VENTURES_FILE),
            writer: Arc::new(Mutex::new(())),
        }
    }

    /// Serializes mutating read-modify-write cycles. Hold the guard from the
    /// `list` that reads the current state until `replace_all` lands.
    pub async fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().await
    }

    pub async fn list(&self) -> Result<Vec<Venture>, StoreError> {
        ensure_file(&self.path, b"[]").await?;
        let raw = fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&raw)?)
    }

    /// Replace the whole document. The new content is written to a temp file
    /// and renamed into place, so a crash mid-write leaves the previous
    /// document intact.
    pub async fn replace_all(&self, items: &[Venture]) -> Result<(), StoreError> {
        ensure_file(&self.path, b"[]").await?;
        write_atomic(&self.path, &serde_json::to_vec_pretty(items)?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Segmento, VentureFields, VentureStatus};
    use temp_dir::TempDir;

    fn sample(nome: &str) -> Venture {
        Venture::create(VentureFields {
            nome_empreendimento: nome.to_string(),
            nome_empreendedor: "João Souza".to_string(),
            municipio: "Blumenau".to_string(),
            segmento: Segmento::Tecnologia,
            contato: "joao@exemplo.com.br".to_string(),
            status: VentureStatus::Ativo,
        })
    }

    #[tokio::test]
    async fn test_list_bootstraps_empty_document() {
        let dir = TempDir::new().unwrap();
        let store = VentureStore::new(dir.path());

        assert!(store.list().await.unwrap().is_empty());
        assert!(dir.path().join(VENTURES_FILE).exists());
    }

    #[tokio::test]
    async fn test_replace_all_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = VentureStore::new(dir.path());

        let ventures = vec![sample("Fábrica de Software"), sample("Consultoria Sul")];
        store.replace_all(&ventures).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, ventures[0].id);
        assert_eq!(listed[1].nome_empreendimento, "Consultoria Sul");
    }

    #[tokio::test]
    async fn test_replace_leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let store = VentureStore::new(dir.path());

        store.replace_all(&[sample("Padaria Central")]).await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .filter(|name| name.to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_document_is_readable_json_on_disk() {
        let dir = TempDir::new().unwrap();
        let store = VentureStore::new(dir.path());
        store.replace_all(&[sample("Agro Vale")]).await.unwrap();

        let raw = std::fs::read_to_string(dir.path().join(VENTURES_FILE)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed[0]["nomeEmpreendimento"], "Agro Vale");
    }
}
