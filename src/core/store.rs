use crate::error::Result;
use std::{
    collections::HashMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

/// Account id -> bearer token map persisted as a single JSON object,
/// rewritten wholesale on every replacement.
#[derive(Debug)]
pub struct TokenStore {
    path: PathBuf,
    tokens: HashMap<u64, String>,
}

impl TokenStore {
    pub const PATH: &str = "data/tokens.json";

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let tokens = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, tokens })
    }

    pub fn get(&self, id: u64) -> Option<&str> {
        self.tokens.get(&id).map(String::as_str)
    }

    pub async fn put(&mut self, id: u64, token: String) -> Result<()> {
        self.tokens.insert(id, token);
        let raw = serde_json::to_string_pretty(&self.tokens)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_loads_as_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::load(dir.path().join("tokens.json"))
            .await
            .unwrap();
        assert!(store.get(1).is_none());
    }

    #[tokio::test]
    async fn put_persists_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let mut store = TokenStore::load(&path).await.unwrap();
        store.put(7211111111, "a.b.c".to_string()).await.unwrap();

        let reloaded = TokenStore::load(&path).await.unwrap();
        assert_eq!(reloaded.get(7211111111), Some("a.b.c"));

        let raw = tokio::fs::read_to_string(&path).await.unwrap();
        let parsed: HashMap<u64, String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.get(&7211111111).map(String::as_str), Some("a.b.c"));
    }

    #[tokio::test]
    async fn put_replaces_previous_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");

        let mut store = TokenStore::load(&path).await.unwrap();
        store.put(1, "old.token.sig".to_string()).await.unwrap();
        store.put(1, "new.token.sig".to_string()).await.unwrap();

        let reloaded = TokenStore::load(&path).await.unwrap();
        assert_eq!(reloaded.get(1), Some("new.token.sig"));
    }
}
