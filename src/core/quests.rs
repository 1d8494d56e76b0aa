use super::{
    client::ApiClient,
    paws::{self, CompletionOutcome, Quest},
};
use crate::error::Result;
use log::{debug, info, warn};
use std::time::Duration;
use strum::Display;
use tokio::time::sleep;

pub const SEASONAL_PREFIX: &str = "christmas_";
const SEASONAL_MAX_SUFFIX: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum QuestBatch {
    Daily,
    Seasonal,
}

impl QuestBatch {
    /// Fixed throttle between quests; the seasonal endpoint rate-limits
    /// harder than the ordinary one.
    pub const fn pause(&self) -> Duration {
        match self {
            QuestBatch::Daily => Duration::from_secs(2),
            QuestBatch::Seasonal => Duration::from_secs(3),
        }
    }

    pub const fn list_type(&self) -> Option<&'static str> {
        match self {
            QuestBatch::Daily => None,
            QuestBatch::Seasonal => Some("christmas"),
        }
    }

    pub fn wants(&self, quest: &Quest) -> bool {
        match self {
            QuestBatch::Daily => !quest.progress.claimed,
            QuestBatch::Seasonal => is_open_seasonal(quest),
        }
    }
}

fn is_open_seasonal(quest: &Quest) -> bool {
    if quest.progress.claimed {
        return false;
    }
    if quest.progress.status.as_deref() == Some("finished") {
        return false;
    }
    let Some(code) = quest.code.as_deref() else {
        return false;
    };
    let Some(suffix) = code.strip_prefix(SEASONAL_PREFIX) else {
        return false;
    };
    matches!(suffix.parse::<u32>(), Ok(n) if n <= SEASONAL_MAX_SUFFIX)
}

/// Drives every matching quest through complete and claim. Failures are
/// logged per quest and never abort the batch.
pub async fn process_quests(client: &ApiClient, token: &str, batch: QuestBatch) {
    let quests = match paws::list_quests(client, token, batch.list_type()).await {
        Ok(quests) => quests,
        Err(err) => {
            warn!("failed to fetch {batch} quests: {err}");
            return;
        }
    };

    let pending: Vec<Quest> = quests
        .into_iter()
        .filter(|quest| batch.wants(quest))
        .collect();
    info!("{} {batch} quests to process", pending.len());

    for quest in &pending {
        if let Err(err) = run_quest(client, token, quest).await {
            warn!("quest '{}' failed: {err}", quest.title);
        }
        sleep(batch.pause()).await;
    }
}

async fn run_quest(client: &ApiClient, token: &str, quest: &Quest) -> Result<()> {
    match paws::complete_quest(client, token, &quest.id).await? {
        CompletionOutcome::Completed => claim(client, token, quest).await,
        CompletionOutcome::AlreadyCompleted => {
            // completed in an earlier pass; only the id is trustworthy here,
            // so the claim is logged against a zero-reward stand-in
            claim(client, token, &Quest::placeholder(&quest.id)).await
        }
        CompletionOutcome::NotEligible => {
            debug!("'{}' requirements not met yet, skipping", quest.title);
            Ok(())
        }
    }
}

async fn claim(client: &ApiClient, token: &str, quest: &Quest) -> Result<()> {
    paws::claim_quest(client, token, &quest.id).await?;
    info!("claimed '{}' for {} points", quest.title, quest.reward());
    Ok(())
}
