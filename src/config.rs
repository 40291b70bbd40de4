use failure::Error;
use std::env;

/// Plates eligible for borrowing. A borrow request for any other plate is
/// rejected before the ledger is touched.
pub const ALLOWED_PLATES: &[&str] = &["ABC-123", "XYZ-456"];

/// Everything the bot needs from the environment, loaded once at startup and
/// passed down explicitly; no module reads env vars on its own after this.
#[derive(Debug, Clone)]
pub struct Config {
    pub channel_access_token: String,
    pub channel_secret: String,
    pub spreadsheet_id: String,
    pub sheets_credentials: String,
    pub worksheet_name: String,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        Ok(Config {
            channel_access_token: required("LINE_BOT_CHANNEL_ACCESS_TOKEN")?,
            channel_secret: required("LINE_CHANNEL_SECRET")?,
            spreadsheet_id: required("GOOGLE_SHEET_ID")?,
            sheets_credentials: required("GOOGLE_SHEET_CREDENTIALS")?,
            worksheet_name: env::var("WORKSHEET_NAME").unwrap_or_else(|_| "cars".to_string()),
        })
    }
}

fn required(name: &str) -> Result<String, Error> {
    env::var(name).map_err(|_| format_err!("{} environment variable unset", name))
}
