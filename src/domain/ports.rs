use crate::domain::model::{AngleMode, LedgerState};
use crate::utils::error::Result;

/// Durable home of the GPA ledger.
pub trait LedgerStore {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<LedgerState>>;
    fn save(&self, state: &LedgerState) -> Result<()>;
    /// Human readable location, used in logs and error messages.
    fn describe(&self) -> String;
}

pub trait ConfigProvider {
    fn data_file(&self) -> &str;
    fn angle_mode(&self) -> AngleMode;
    fn json_logging(&self) -> bool;
}
