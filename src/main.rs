mod config;
mod handler;
mod ledger;
mod messaging;
mod sheets;
mod types;
mod webhook;

use env_logger::Env;
use log::{error, info};
use tokio::sync::mpsc::channel;

#[macro_use]
extern crate failure;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    info!("Starting motorpool-bot");

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let executor = handler::CommandExecutor::new(sheets::SheetsLedger::new(&config));
    let replies = messaging::ReplyClient::new(config.channel_access_token.clone());

    let (tx, rx) = channel(8);
    let handler_task = tokio::spawn(handler::run(rx, executor, replies));
    let webhook_task = tokio::spawn(webhook::run(tx, config.channel_secret.clone()));
    tokio::select! {
        result = handler_task => {
            if let Err(e) = result {
                error!("Handler task failed: {}", e);
            }
        }
        result = webhook_task => {
            if let Err(e) = result {
                error!("Webhook task failed: {}", e);
            }
        }
    }
    info!("Exiting main");
}
