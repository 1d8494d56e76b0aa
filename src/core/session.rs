use super::{account::Account, client::ApiClient, paws, store::TokenStore, token};
use crate::error::Result;
use log::{info, warn};

/// Ephemeral per-pass pairing of an account with its live token. Dropped
/// at the end of the account's turn; only the token string outlives it,
/// inside the store.
#[derive(Debug)]
pub struct Session {
    pub token: String,
    pub balance: f64,
    pub wallet_linked: bool,
}

/// Reuses the stored token when it still decodes as unexpired, otherwise
/// re-authenticates with the raw init payload and persists the
/// replacement before anything else runs for this account.
pub async fn ensure_session(
    client: &ApiClient,
    account: &Account,
    store: &mut TokenStore,
) -> Result<Session> {
    let (token, user) = match store.get(account.id) {
        Some(stored) if !token::is_expired(stored) => {
            let token = stored.to_string();
            let user = paws::current_user(client, &token).await?;
            info!("[{}] resumed session", account.first_name);
            (token, user)
        }
        _ => {
            let (token, user) = paws::authenticate(client, &account.init_data).await?;
            store.put(account.id, token.clone()).await?;
            info!("[{}] authenticated", account.first_name);
            (token, user)
        }
    };

    let mut wallet_linked = user.wallet_linked();
    if !wallet_linked {
        match paws::link_wallet(client, &token, &account.wallet).await {
            Ok(()) => {
                info!("[{}] linked wallet {}", account.first_name, account.wallet);
                wallet_linked = true;
            }
            // quests still run for this account; the link retries next cycle
            Err(err) => warn!("[{}] wallet link failed: {err}", account.first_name),
        }
    }

    Ok(Session {
        token,
        balance: user.game_data.balance,
        wallet_linked,
    })
}
