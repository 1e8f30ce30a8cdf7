pub mod settings;

pub use settings::{AppSettings, ReceiptSettings, Settings, StoreSettings, Theme};
