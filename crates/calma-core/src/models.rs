pub mod assessment;
pub mod mindfulness;

use crate::error::CoreError;

/// A persisted record that can check its own shape after being read back.
///
/// Stored data is never trusted blindly: collections are validated record by
/// record at the load boundary.
pub trait Record {
    /// Short name used in logs and error messages.
    const KIND: &'static str;

    fn validate(&self) -> Result<(), CoreError>;
}
