use parking_lot::RwLock;

use super::TokenStore;
use crate::utils::error::ClientError;

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, ClientError> {
        Ok(self.token.read().clone())
    }

    fn save(&self, token: &str) -> Result<(), ClientError> {
        *self.token.write() = Some(token.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), ClientError> {
        self.token.write().take();
        Ok(())
    }
}
