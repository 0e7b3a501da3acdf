use serde::Deserialize;

/// The `{success, data, error}` wrapper every API response uses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    /// The payload regardless of the `success` flag.
    pub fn into_optional(self) -> Option<T> {
        self.data
    }

    /// The payload when the envelope reports success and carries data;
    /// otherwise the API's error message, or `fallback` when it sent none.
    pub fn into_required(self, fallback: &str) -> Result<T, String> {
        match self {
            Envelope {
                success: true,
                data: Some(data),
                ..
            } => Ok(data),
            Envelope { error, .. } => Err(error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| fallback.to_string())),
        }
    }
}
