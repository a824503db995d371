use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::cli::Opts;
use crate::error::InvoiceError;
use crate::invoice::LineItem;

type InputResult<T> = Result<T, InvoiceError>;

/// Invoice values gathered from the command line and/or a JSON file,
/// before any normalization.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct InvoiceInput {
    pub to: Option<String>,
    pub items: Option<Vec<LineItem>>,
    pub date: Option<String>,
    pub amount_paid: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
    pub notes: Option<String>,
}

/// Layout of a `--json-file`, every key is optional.
#[derive(Deserialize, Debug, Default, PartialEq)]
pub struct InvoiceFile {
    pub to: Option<String>,
    pub items: Option<Vec<LineItem>>,
    pub date: Option<String>,
    pub amount_paid: Option<Decimal>,
    pub discount_percentage: Option<Decimal>,
    pub discount: Option<Decimal>,
    pub notes: Option<String>,
}

pub fn parse_items(raw: &str) -> InputResult<Vec<LineItem>> {
    serde_json::from_str(raw)
        .map_err(|source| InvoiceError::MalformedItems { source })
}

pub fn load_file(path: &Path) -> InputResult<InvoiceFile> {
    let contents =
        fs::read_to_string(path).map_err(|source| InvoiceError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
    serde_json::from_str(&contents).map_err(|source| InvoiceError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

fn given(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// Collect the invoice input for a run. Command line values win over the
/// JSON file field by field, items and discount are replaced rather than
/// merged.
pub fn resolve(opts: &Opts) -> InputResult<InvoiceInput> {
    let cli_items = given(&opts.items)
        .map(|raw| parse_items(&raw))
        .transpose()?;

    let file = match &opts.json_file {
        Some(path) => {
            debug!(path = %path.display(), "loading invoice file");
            load_file(path)?
        }
        None => {
            if given(&opts.to).is_none() || cli_items.is_none() {
                return Err(InvoiceError::missing(
                    "Either --json-file or both --to and --items must be provided.",
                ));
            }
            InvoiceFile::default()
        }
    };

    Ok(InvoiceInput {
        to: given(&opts.to).or(file.to),
        items: cli_items.or(file.items),
        date: given(&opts.date).or(file.date),
        amount_paid: opts.amount_paid.or(file.amount_paid),
        discount_percentage: opts
            .discount_percentage
            .or(file.discount_percentage)
            .or(file.discount),
        notes: given(&opts.notes).or(file.notes),
    })
}
