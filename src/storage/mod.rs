//! Persistent home of the session token.
//!
//! A store holds at most one token under a single named slot. Absence of a
//! token means the user is logged out.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use crate::utils::error::ClientError;

pub trait TokenStore: Send + Sync {
    fn load(&self) -> Result<Option<String>, ClientError>;

    fn save(&self, token: &str) -> Result<(), ClientError>;

    /// Removing a token that is not there is not an error.
    fn remove(&self) -> Result<(), ClientError>;

    fn has_token(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }
}
