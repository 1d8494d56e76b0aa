use crate::{
    config::Config,
    core::{
        account,
        client::ApiClient,
        quests::{self, QuestBatch},
        session,
        store::TokenStore,
        utils,
    },
    error::Result,
};
use log::{error, info};
use std::time::Duration;
use tokio::time::sleep;

mod config;
mod core;
mod error;

const CYCLE_PAUSE: Duration = Duration::from_secs(24 * 60 * 60);

fn init_logger() {
    let mut builder = pretty_env_logger::formatted_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.filter_level(log::LevelFilter::Info),
    };
    builder.init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    let config = Config::read_default().await?;
    let init_lines = utils::read_lines("data/accounts.txt").await?;
    let wallets = utils::read_lines("data/wallets.txt").await?;
    let proxies = match config.use_proxy {
        true => Some(utils::read_lines("data/proxies.txt").await?),
        false => None,
    };

    let accounts = account::build_accounts(init_lines, wallets, proxies)?;
    let mut store = TokenStore::load(TokenStore::PATH).await?;

    let run_daily = utils::ask_yes_no("Process daily quests?")?;
    let run_seasonal = utils::ask_yes_no("Process seasonal quests?")?;

    info!("starting with {} accounts", accounts.len());

    loop {
        for account in &accounts {
            let client = match ApiClient::new(account.proxy.as_deref()) {
                Ok(client) => client,
                Err(err) => {
                    error!("[{}] cannot build client: {err}", account.first_name);
                    continue;
                }
            };

            let session = match session::ensure_session(&client, account, &mut store).await {
                Ok(session) => session,
                Err(err) => {
                    error!("[{}] session failed: {err}", account.first_name);
                    continue;
                }
            };

            info!("[{}] balance {}", account.first_name, session.balance);
            if !session.wallet_linked {
                info!(
                    "[{}] wallet still unlinked, retrying next cycle",
                    account.first_name
                );
            }

            if run_daily {
                quests::process_quests(&client, &session.token, QuestBatch::Daily).await;
            }
            if run_seasonal {
                quests::process_quests(&client, &session.token, QuestBatch::Seasonal).await;
            }

            sleep(config.pause_between_accounts()).await;
        }

        info!("cycle finished, next pass in 24h");
        sleep(CYCLE_PAUSE).await;
    }
}
