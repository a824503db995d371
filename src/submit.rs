use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::error::InvoiceError;
use crate::invoice::InvoiceRequest;

pub struct InvoiceClient {
    http: Client,
    settings: Settings,
}

impl InvoiceClient {
    pub fn new(settings: Settings) -> Result<Self, InvoiceError> {
        let http = Client::builder()
            .user_agent(concat!("invoicegen/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, settings })
    }

    /// POST the invoice once and return the PDF the service renders.
    pub fn submit(
        &self,
        request: &InvoiceRequest,
    ) -> Result<Vec<u8>, InvoiceError> {
        info!(
            endpoint = %self.settings.endpoint,
            recipient = request.recipient_name(),
            items = request.items.len(),
            "submitting invoice"
        );

        let response = self
            .http
            .post(&self.settings.endpoint)
            .bearer_auth(self.settings.bearer())
            .json(request)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            warn!(%status, "invoice service rejected the request");
            return Err(InvoiceError::Rejected { status, body });
        }

        let pdf = response.bytes()?;
        debug!(%status, bytes = pdf.len(), "received invoice");
        Ok(pdf.to_vec())
    }
}

/// `invoice_<name>.pdf` where name is the first line of the recipient
/// reduced to alphanumerics, spaces and underscores, lower cased, with
/// spaces turned into underscores.
pub fn output_filename(recipient: &str) -> String {
    let first_line = recipient.split('\n').next().unwrap_or_default();
    let safe: String = first_line
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '_')
        .collect();
    format!(
        "invoice_{}.pdf",
        safe.trim_end().replace(' ', "_").to_lowercase()
    )
}

/// Write the PDF into `dir`, replacing any earlier invoice of that name.
pub fn save_pdf(
    dir: &Path,
    recipient: &str,
    pdf: &[u8],
) -> Result<PathBuf, InvoiceError> {
    let path = dir.join(output_filename(recipient));
    fs::write(&path, pdf)?;
    debug!(path = %path.display(), "wrote invoice");
    Ok(path)
}
