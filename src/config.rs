use secrecy::{ExposeSecret, Secret};
use tracing::debug;

use crate::error::InvoiceError;

pub const API_KEY_VAR: &str = "INVOICE_GENERATOR_API_KEY";
pub const ENDPOINT_VAR: &str = "INVOICE_GENERATOR_URL";
pub const DEFAULT_ENDPOINT: &str = "https://invoice-generator.com";

/// Fill the process environment from a `.env` file in the working
/// directory. Variables that are already set are left alone.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!(path = %path.display(), "loaded .env"),
        Err(error) => debug!(%error, "no .env loaded"),
    }
}

pub struct Settings {
    pub api_key: Secret<String>,
    pub endpoint: String,
}

impl Settings {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvoiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .map(Secret::new)
            .ok_or(InvoiceError::MissingApiKey { var: API_KEY_VAR })?;
        let endpoint = lookup(ENDPOINT_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        debug!(%endpoint, "resolved settings");
        Ok(Self { api_key, endpoint })
    }

    pub fn bearer(&self) -> &str {
        self.api_key.expose_secret()
    }
}
