use async_trait::async_trait;
use failure::Error;

pub const STATUS_BORROWED: &str = "borrowed";

/// One worksheet row. Every field is a string cell; empty string means the
/// cell is blank.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerRow {
    pub plate: String,
    pub borrower_name: String,
    pub borrow_timestamp: String,
    pub returner_name: String,
    pub return_timestamp: String,
    pub status: String,
}

impl LedgerRow {
    pub fn is_free_slot(&self) -> bool {
        self.plate.is_empty() && self.borrower_name.is_empty()
    }

    pub fn is_active_loan(&self, plate: &str) -> bool {
        self.plate == plate && self.status == STATUS_BORROWED
    }
}

/// Worksheet columns, in sheet order starting at A.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Column {
    Plate,
    BorrowerName,
    BorrowTimestamp,
    ReturnerName,
    ReturnTimestamp,
    Status,
}

impl Column {
    pub fn letter(self) -> &'static str {
        match self {
            Column::Plate => "A",
            Column::BorrowerName => "B",
            Column::BorrowTimestamp => "C",
            Column::ReturnerName => "D",
            Column::ReturnTimestamp => "E",
            Column::Status => "F",
        }
    }
}

/// A set of targeted cell writes for one row. Cells not named here are left
/// untouched by `LedgerStore::update_row`.
#[derive(Debug, Default)]
pub struct RowPatch {
    pub cells: Vec<(Column, String)>,
}

impl RowPatch {
    pub fn new() -> RowPatch {
        RowPatch::default()
    }

    pub fn set(mut self, column: Column, value: impl Into<String>) -> RowPatch {
        self.cells.push((column, value.into()));
        self
    }
}

/// The loan ledger, addressed by data-row index (0 = first row below the
/// header). Rows are only ever read in full and patched in place; nothing
/// appends or deletes rows.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn rows(&self) -> Result<Vec<LedgerRow>, Error>;
    async fn update_row(&self, index: usize, patch: RowPatch) -> Result<(), Error>;
}

/// First row recording an active loan for `plate`, if any.
pub fn find_active_loan<'a>(rows: &'a [LedgerRow], plate: &str) -> Option<(usize, &'a LedgerRow)> {
    rows.iter()
        .enumerate()
        .find(|(_, row)| row.is_active_loan(plate))
}

/// First row with blank plate and borrower cells. Returned rows keep their
/// plate and borrower for history, so they never match again; recording new
/// loans relies on blank rows below the ones already used.
pub fn find_free_slot(rows: &[LedgerRow]) -> Option<usize> {
    rows.iter().position(LedgerRow::is_free_slot)
}
