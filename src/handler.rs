use crate::config::ALLOWED_PLATES;
use crate::ledger::{
    find_active_loan, find_free_slot, Column, LedgerStore, RowPatch, STATUS_BORROWED,
};
use crate::messaging::ReplyClient;
use crate::types::{self, Command, InboundMessage, ParseOutcome};
use chrono::Local;
use failure::Error;
use log::{debug, error, info};
use tokio::sync::mpsc::Receiver;

/// Runs ledger commands and produces the user-facing reply text.
pub struct CommandExecutor<S> {
    store: S,
}

impl<S: LedgerStore> CommandExecutor<S> {
    pub fn new(store: S) -> CommandExecutor<S> {
        CommandExecutor { store }
    }

    pub async fn execute(&self, command: &Command) -> Result<String, Error> {
        match command {
            Command::Borrow { name, plate } => self.borrow(name, plate).await,
            Command::Return { name, plate } => self.return_car(name, plate).await,
            Command::Status { plate } => self.status(plate).await,
        }
    }

    async fn borrow(&self, name: &str, plate: &str) -> Result<String, Error> {
        if !ALLOWED_PLATES.contains(&plate) {
            return Ok(format!("{} is not in the allowed plate list", plate));
        }
        let rows = self.store.rows().await?;
        if find_active_loan(&rows, plate).is_some() {
            return Ok(format!("{} is already borrowed", plate));
        }
        match find_free_slot(&rows) {
            Some(index) => {
                let patch = RowPatch::new()
                    .set(Column::Plate, plate)
                    .set(Column::BorrowerName, name)
                    .set(Column::BorrowTimestamp, now_timestamp())
                    .set(Column::Status, STATUS_BORROWED);
                self.store.update_row(index, patch).await?;
                Ok("borrow success".to_string())
            }
            None => Ok("no cars available".to_string()),
        }
    }

    async fn return_car(&self, name: &str, plate: &str) -> Result<String, Error> {
        let rows = self.store.rows().await?;
        match find_active_loan(&rows, plate) {
            Some((index, _)) => {
                // Borrow-time cells stay as-is; only the return side of the
                // row and the status change.
                let patch = RowPatch::new()
                    .set(Column::ReturnerName, name)
                    .set(Column::ReturnTimestamp, now_timestamp())
                    .set(Column::Status, "");
                self.store.update_row(index, patch).await?;
                Ok("return success".to_string())
            }
            None => Ok("return failed, check the plate and borrowed state".to_string()),
        }
    }

    async fn status(&self, plate: &str) -> Result<String, Error> {
        let rows = self.store.rows().await?;
        match find_active_loan(&rows, plate) {
            Some((_, row)) => Ok(format!(
                "{} status: {} (borrower: {}, borrowed at: {})",
                plate, row.status, row.borrower_name, row.borrow_timestamp
            )),
            None => Ok(format!("{} currently not borrowed", plate)),
        }
    }
}

fn now_timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Consumes webhook messages and answers them. Commands run one at a time
/// here, so a borrow's scan and write never interleave with another command's
/// read-modify-write against the sheet.
pub async fn run<S: LedgerStore>(
    mut rx: Receiver<InboundMessage>,
    executor: CommandExecutor<S>,
    replies: ReplyClient,
) {
    while let Some(message) = rx.recv().await {
        let reply_text = match types::parse(&message.text) {
            ParseOutcome::Ignored => {
                debug!("Ignoring message: {:?}", message.text);
                continue;
            }
            ParseOutcome::Malformed(usage) => usage.to_string(),
            ParseOutcome::Command(command) => {
                info!("Executing command {:?}", command);
                match executor.execute(&command).await {
                    Ok(text) => text,
                    Err(e) => {
                        error!("Error executing command {:?}: {:?}", command, e);
                        continue;
                    }
                }
            }
        };
        if let Err(e) = replies.reply(&message.reply_token, &reply_text).await {
            error!("Error sending reply: {:?}", e);
        }
    }
}
