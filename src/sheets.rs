use crate::config::Config;
use crate::ledger::{LedgerRow, LedgerStore, RowPatch};
use async_trait::async_trait;
use failure::Error;
use serde_json::{json, Value};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// `LedgerStore` backed by a Google Sheets worksheet via the v4 values API.
pub struct SheetsLedger {
    http: reqwest::Client,
    spreadsheet_id: String,
    credentials: String,
    worksheet: String,
}

impl SheetsLedger {
    pub fn new(config: &Config) -> SheetsLedger {
        SheetsLedger {
            http: reqwest::Client::new(),
            spreadsheet_id: config.spreadsheet_id.clone(),
            credentials: config.sheets_credentials.clone(),
            worksheet: config.worksheet_name.clone(),
        }
    }

    fn bearer(&self) -> String {
        "Bearer ".to_string() + &self.credentials
    }
}

#[async_trait]
impl LedgerStore for SheetsLedger {
    async fn rows(&self) -> Result<Vec<LedgerRow>, Error> {
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}",
            SHEETS_API_BASE, self.spreadsheet_id, self.worksheet
        );
        let response: Value = self
            .http
            .get(&url)
            .header("Authorization", self.bearer())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let values = response["values"]
            .as_array()
            .ok_or_else(|| format_err!("Missing values in sheet response"))?;
        // First row is the header.
        Ok(values.iter().skip(1).map(row_from_cells).collect())
    }

    async fn update_row(&self, index: usize, patch: RowPatch) -> Result<(), Error> {
        // Data row 0 lives at sheet row 2, below the header.
        let sheet_row = index + 2;
        let data: Vec<Value> = patch
            .cells
            .iter()
            .map(|(column, value)| {
                json!({
                    "range": format!("{}!{}{}", self.worksheet, column.letter(), sheet_row),
                    "values": [[value]],
                })
            })
            .collect();
        let url = format!(
            "{}/v4/spreadsheets/{}/values:batchUpdate",
            SHEETS_API_BASE, self.spreadsheet_id
        );
        self.http
            .post(&url)
            .header("Authorization", self.bearer())
            .json(&json!({ "valueInputOption": "RAW", "data": data }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// The API trims trailing blank cells, so short rows pad out with empties.
fn row_from_cells(cells: &Value) -> LedgerRow {
    let cell = |i: usize| {
        cells
            .get(i)
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    };
    LedgerRow {
        plate: cell(0),
        borrower_name: cell(1),
        borrow_timestamp: cell(2),
        returner_name: cell(3),
        return_timestamp: cell(4),
        status: cell(5),
    }
}
