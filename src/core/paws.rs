use super::client::ApiClient;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Value, json};

/// Every endpoint answers with the same `{ success, data, error }` wrapper.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    fn into_data(self, context: &str) -> Result<T> {
        if !self.success {
            return Err(Error::Api(format!(
                "{context}: {}",
                self.error.as_deref().unwrap_or("no error detail")
            )));
        }
        self.data
            .ok_or_else(|| Error::Api(format!("{context}: success without data")))
    }
}

#[derive(Debug, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "userData", default)]
    pub user_data: UserProfile,
    #[serde(rename = "gameData", default)]
    pub game_data: GameData,
}

#[derive(Debug, Default, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub wallet: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GameData {
    #[serde(default)]
    pub balance: f64,
}

impl UserRecord {
    pub fn wallet_linked(&self) -> bool {
        self.user_data
            .wallet
            .as_deref()
            .is_some_and(|wallet| !wallet.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Quest {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub rewards: Vec<QuestReward>,
    #[serde(default)]
    pub progress: QuestProgress,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestReward {
    #[serde(default)]
    pub amount: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestProgress {
    #[serde(default)]
    pub claimed: bool,
    #[serde(default)]
    pub status: Option<String>,
}

impl Quest {
    pub fn reward(&self) -> u64 {
        self.rewards.first().map(|reward| reward.amount).unwrap_or(0)
    }

    /// Stand-in for a quest the server reports as completed but for which
    /// no listing detail is at hand; carries a zero reward.
    pub fn placeholder(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: "unclaimed quest".to_string(),
            code: None,
            rewards: Vec::new(),
            progress: QuestProgress::default(),
        }
    }
}

/// How the server answered a completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// Accepted now; the claim step may follow.
    Completed,
    /// Satisfied server-side some time earlier but never claimed.
    AlreadyCompleted,
    /// Prerequisites not met; nothing to do this pass.
    NotEligible,
}

impl CompletionOutcome {
    pub fn from_envelope(envelope: &Envelope<Value>) -> Result<Self> {
        match (envelope.success, &envelope.data) {
            (true, Some(_)) => Ok(Self::Completed),
            (false, Some(Value::Bool(true))) => Ok(Self::AlreadyCompleted),
            (false, Some(Value::Bool(false))) => Ok(Self::NotEligible),
            _ => Err(Error::Api(format!(
                "completion: {}",
                envelope.error.as_deref().unwrap_or("no error detail")
            ))),
        }
    }
}

pub async fn authenticate(client: &ApiClient, init_data: &str) -> Result<(String, UserRecord)> {
    let body = json!({ "data": init_data, "referralCode": "" });
    let envelope: Envelope<(String, UserRecord)> = client
        .execute(|| {
            let req = client.post("/user/auth").json(&body);
            async move { Ok(req.send().await?.error_for_status()?.json().await?) }
        })
        .await?;

    if !envelope.success {
        return Err(Error::Auth(
            envelope
                .error
                .unwrap_or_else(|| "server rejected init data".to_string()),
        ));
    }
    envelope
        .data
        .ok_or_else(|| Error::Auth("auth response carried no token".to_string()))
}

pub async fn current_user(client: &ApiClient, token: &str) -> Result<UserRecord> {
    let envelope: Envelope<UserRecord> = client
        .execute(|| {
            let req = client.get("/user").bearer_auth(token);
            async move { Ok(req.send().await?.error_for_status()?.json().await?) }
        })
        .await?;
    envelope.into_data("current user")
}

pub async fn link_wallet(client: &ApiClient, token: &str, wallet: &str) -> Result<()> {
    let body = json!({ "wallet": wallet });
    let envelope: Envelope<Value> = client
        .execute(|| {
            let req = client.post("/user/wallet").bearer_auth(token).json(&body);
            async move { Ok(req.send().await?.error_for_status()?.json().await?) }
        })
        .await?;
    envelope.into_data("wallet link").map(|_| ())
}

pub async fn list_quests(
    client: &ApiClient,
    token: &str,
    list_type: Option<&str>,
) -> Result<Vec<Quest>> {
    let envelope: Envelope<Vec<Quest>> = client
        .execute(|| {
            let mut req = client.get("/quests/list").bearer_auth(token);
            if let Some(kind) = list_type {
                req = req.query(&[("type", kind)]);
            }
            async move { Ok(req.send().await?.error_for_status()?.json().await?) }
        })
        .await?;
    envelope.into_data("quest list")
}

pub async fn complete_quest(
    client: &ApiClient,
    token: &str,
    quest_id: &str,
) -> Result<CompletionOutcome> {
    let body = json!({ "questId": quest_id });
    let envelope: Envelope<Value> = client
        .execute(|| {
            let req = client
                .post("/quests/completed")
                .bearer_auth(token)
                .json(&body);
            async move { Ok(req.send().await?.error_for_status()?.json().await?) }
        })
        .await?;
    CompletionOutcome::from_envelope(&envelope)
}

/// Getting any answer back counts as a successful claim; the server does
/// not return a meaningful body here.
pub async fn claim_quest(client: &ApiClient, token: &str, quest_id: &str) -> Result<()> {
    let body = json!({ "questId": quest_id });
    client
        .execute(|| {
            let req = client.post("/quests/claim").bearer_auth(token).json(&body);
            async move {
                req.send().await?;
                Ok(())
            }
        })
        .await
}
