use std::env;
use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::calendar;
use crate::cli::Opts;
use crate::config::{self, Settings};
use crate::error::InvoiceError;
use crate::input;
use crate::invoice::InvoiceRequest;
use crate::submit::{self, InvoiceClient};

pub fn run(opts: &Opts) -> Result<PathBuf, InvoiceError> {
    config::load_dotenv();
    run_with(opts, calendar::today(), |var| env::var(var).ok())
}

/// Build, submit and save one invoice. Every input and credential check
/// happens before the request is sent.
pub fn run_with<F>(
    opts: &Opts,
    today: NaiveDate,
    lookup: F,
) -> Result<PathBuf, InvoiceError>
where
    F: Fn(&str) -> Option<String>,
{
    let input = input::resolve(opts)?;
    let request = InvoiceRequest::build(input, today)?;
    let settings = Settings::from_lookup(lookup)?;

    match request.calculate() {
        Some(total) => info!(
            subtotal = %total.subtotal,
            discount = %total.discount,
            total = %total.total,
            balance_due = %total.balance_due,
            "invoice totals"
        ),
        None => warn!("invoice totals are too large to add up locally"),
    }

    let client = InvoiceClient::new(settings)?;
    let pdf = client.submit(&request)?;
    let path = submit::save_pdf(&opts.out_dir, &request.recipient, &pdf)?;

    println!(
        "Invoice for {} created successfully as {}",
        request.recipient_name(),
        path.file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{API_KEY_VAR, ENDPOINT_VAR};
    use const_format::formatcp;
    use serde_json::json;
    use std::fs;
    use std::path::Path;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PDF: &[u8] = b"%PDF-1.7 fake";

    const ITEMS: &str =
        r#"[{"name":"john doe shirt","quantity":2,"unit_cost":15}]"#;

    const INVOICE_FILE: &str = formatcp!(
        r#"{{"to": "Jane Smith\\n1 Oak St", "items": {}, "date": "Jan 2, 2025"}}"#,
        ITEMS
    );

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn env_for(
        endpoint: String,
        api_key: Option<&'static str>,
    ) -> impl Fn(&str) -> Option<String> {
        move |var: &str| match var {
            API_KEY_VAR => api_key.map(str::to_string),
            ENDPOINT_VAR => Some(endpoint.clone()),
            _ => None,
        }
    }

    fn cli_opts(out_dir: &Path) -> Opts {
        Opts {
            to: Some("Jane Smith\\n1 Oak St".to_string()),
            items: Some(ITEMS.to_string()),
            out_dir: out_dir.to_path_buf(),
            ..Opts::default()
        }
    }

    async fn pdf_server(expected_calls: u64) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF))
            .expect(expected_calls)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn writes_pdf_named_after_recipient() {
        let server = pdf_server(1).await;
        let dir = tempfile::tempdir().unwrap();
        let opts = cli_opts(dir.path());
        let lookup = env_for(server.uri(), Some("sk_test"));

        let path = tokio::task::spawn_blocking(move || {
            run_with(&opts, ymd(2025, 8, 7), lookup)
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(path, dir.path().join("invoice_jane_smith.pdf"));
        assert_eq!(fs::read(&path).unwrap(), PDF);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn oversized_amounts_are_still_submitted() {
        let server = pdf_server(1).await;
        let dir = tempfile::tempdir().unwrap();
        let opts = Opts {
            items: Some(
                r#"[{"name":"bulk","quantity":1000000000000000,"unit_cost":1000000000000000}]"#
                    .to_string(),
            ),
            ..cli_opts(dir.path())
        };
        let lookup = env_for(server.uri(), Some("sk_test"));

        let result = tokio::task::spawn_blocking(move || {
            run_with(&opts, ymd(2025, 8, 7), lookup)
        })
        .await
        .unwrap();

        assert!(result.is_ok());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn file_with_date_override() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "to": "Jane Smith\n1 Oak St",
                "date": "Aug 07, 2025",
            })))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(PDF))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("invoice.json");
        fs::write(&file, INVOICE_FILE).unwrap();
        let opts = Opts {
            json_file: Some(file),
            date: Some("Aug 7, 2025".to_string()),
            out_dir: dir.path().to_path_buf(),
            ..Opts::default()
        };
        let lookup = env_for(server.uri(), Some("sk_test"));

        let result = tokio::task::spawn_blocking(move || {
            run_with(&opts, ymd(2030, 1, 1), lookup)
        })
        .await
        .unwrap();

        assert!(result.is_ok());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn missing_api_key_sends_nothing() {
        let server = pdf_server(0).await;
        let dir = tempfile::tempdir().unwrap();
        let opts = cli_opts(dir.path());
        let lookup = env_for(server.uri(), None);

        let result = tokio::task::spawn_blocking(move || {
            run_with(&opts, ymd(2025, 8, 7), lookup)
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(InvoiceError::MissingApiKey { .. })));
        assert!(!dir.path().join("invoice_jane_smith.pdf").exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn malformed_items_send_nothing() {
        let server = pdf_server(0).await;
        let dir = tempfile::tempdir().unwrap();
        let opts = Opts {
            items: Some(r#"[{"name":"shirt","quantity":2,}]"#.to_string()),
            ..cli_opts(dir.path())
        };
        let lookup = env_for(server.uri(), Some("sk_test"));

        let result = tokio::task::spawn_blocking(move || {
            run_with(&opts, ymd(2025, 8, 7), lookup)
        })
        .await
        .unwrap();

        assert!(matches!(result, Err(InvoiceError::MalformedItems { .. })));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn rejected_request_writes_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(500).set_body_string("upstream down"),
            )
            .expect(1)
            .mount(&server)
            .await;
        let dir = tempfile::tempdir().unwrap();
        let opts = cli_opts(dir.path());
        let lookup = env_for(server.uri(), Some("sk_test"));

        let result = tokio::task::spawn_blocking(move || {
            run_with(&opts, ymd(2025, 8, 7), lookup)
        })
        .await
        .unwrap();

        let error = result.unwrap_err();
        assert!(error.to_string().contains("Response content: upstream down"));
        assert!(!dir.path().join("invoice_jane_smith.pdf").exists());
    }
}
