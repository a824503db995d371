/*
 * Submit an invoice to invoice-generator.com and keep the PDF
 *
 * - Recipient and items come from --to/--items, a --json-file, or both
 *   with the command line taking precedence
 * - Item names are title cased, "\n" in the recipient becomes a line break
 * - Date defaults to today, discount and amount paid are optional
 * - INVOICE_GENERATOR_API_KEY is read from the environment or a .env file
 * - The PDF is saved as invoice_<recipient>.pdf
 * - Any failure exits with status 1, a rejected or unreachable invoice
 *   service included, nothing is retried
 */

mod calendar;
mod cli;
mod config;
mod error;
mod input;
mod invoice;
mod logging;
mod run;
mod submit;

use clap::Parser;
use std::process::ExitCode;

use crate::cli::Opts;

fn main() -> ExitCode {
    let opts = Opts::parse();
    logging::init(opts.verbose);

    match run::run(&opts) {
        Ok(_) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        }
    }
}
