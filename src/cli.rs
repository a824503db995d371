use clap::{ArgAction, Parser, ValueHint};
use rust_decimal::Decimal;
use std::path::PathBuf;

/* Argument Stucture
 *
 * invoicegen (--json-file <path> | --to <recipient> --items <json>)
 *      [--date <date>] [--amount_paid <n>] [--discount-percentage <n>]
 *      [--notes <text>] [--out-dir <dir>] [-v...]
 *
 * Values given on the command line override the ones in --json-file.
 */

/// Create an invoice PDF with the invoice-generator.com API
#[derive(Parser, Debug, Default)]
#[clap(
    name = "invoicegen",
    version,
    after_help = "Exit status is 1 on any failure, including a request the \
                  invoice service rejects or that never reaches it."
)]
pub struct Opts {
    /// Recipient's details (e.g., 'John Doe\n123 Main St')
    #[clap(long)]
    pub to: Option<String>,

    /// Invoice items in JSON format
    /// (e.g., '[{"name":"Item 1","quantity":1,"unit_cost":10}]')
    #[clap(long)]
    pub items: Option<String>,

    /// Invoice date (e.g., 'Aug 7, 2025' or '2025-08-07'), defaults to today
    #[clap(long)]
    pub date: Option<String>,

    /// Amount already paid
    #[clap(long = "amount_paid", visible_alias = "amount-paid")]
    pub amount_paid: Option<Decimal>,

    /// Discount percentage applied to the subtotal (e.g., 10 for 10%)
    #[clap(long = "discount-percentage")]
    pub discount_percentage: Option<Decimal>,

    /// Notes printed on the invoice
    #[clap(long)]
    pub notes: Option<String>,

    /// Path to a JSON file containing invoice data
    #[clap(long = "json-file", value_hint = ValueHint::FilePath)]
    pub json_file: Option<PathBuf>,

    /// Directory the PDF is written to
    #[clap(long = "out-dir", default_value = ".",
        value_hint = ValueHint::DirPath)]
    pub out_dir: PathBuf,

    /// Increase logging output, repeat for more
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}
