//! Google Sheets implementation of the row store.

mod config;
mod error;
mod models;
mod store;

pub use config::SheetsConfig;
pub use error::{SheetsDaoError, SheetsResult};
pub use store::SheetsRowStore;
