mod expiry;
mod stock;

pub use expiry::ExpiryFlag;
pub use stock::{StockModel, StockTuning, DECAY_INTERVAL};
