use crate::error::Result;
use rand::Rng;
use serde::Deserialize;
use std::{path::Path, time::Duration};

/// Runtime knobs read once at startup. `sleep_range` is the inclusive
/// `[lo, hi]` window (seconds) for the pause between accounts.
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    pub sleep_range: [u64; 2],
    pub use_proxy: bool,
}

impl Config {
    pub const PATH: &str = "data/config.toml";

    pub async fn read_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let cfg_str = tokio::fs::read_to_string(path).await?;
        Ok(toml::from_str(&cfg_str)?)
    }

    pub async fn read_default() -> Result<Self> {
        Self::read_from_file(Self::PATH).await
    }

    pub fn pause_between_accounts(&self) -> Duration {
        let [lo, hi] = self.sleep_range;
        Duration::from_secs(rand::rng().random_range(lo..=hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_config_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "sleep_range = [5, 10]\nuse_proxy = false\n")
            .await
            .unwrap();

        let config = Config::read_from_file(&path).await.unwrap();
        assert_eq!(config.sleep_range, [5, 10]);
        assert!(!config.use_proxy);
    }

    #[test]
    fn pause_stays_inside_range() {
        let config = Config {
            sleep_range: [2, 4],
            use_proxy: false,
        };
        for _ in 0..50 {
            let pause = config.pause_between_accounts();
            assert!(pause >= Duration::from_secs(2));
            assert!(pause <= Duration::from_secs(4));
        }
    }
}
