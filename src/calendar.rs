use chrono::{Local, NaiveDate};

/// Format every invoice date is sent in, e.g. "Aug 07, 2025".
pub const INVOICE_DATE_FMT: &str = "%b %d, %Y";

// Only layouts where day and month can't be mistaken for each other.
const ACCEPTED_FMTS: [&str; 4] =
    [INVOICE_DATE_FMT, "%B %d, %Y", "%Y-%m-%d", "%d %B %Y"];

pub trait InvoiceDate {
    fn invoice_fmt(&self) -> String;
}

impl InvoiceDate for NaiveDate {
    fn invoice_fmt(&self) -> String {
        self.format(INVOICE_DATE_FMT).to_string()
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    ACCEPTED_FMTS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// The date to print on an invoice. A recognized date is rewritten in
/// `INVOICE_DATE_FMT`, anything else is sent as given, and `today` is used
/// when there is no date at all.
pub fn invoice_date(given: Option<&str>, today: NaiveDate) -> String {
    match given {
        None => today.invoice_fmt(),
        Some(raw) => match parse_date(raw) {
            Some(date) => date.invoice_fmt(),
            None => raw.to_string(),
        },
    }
}
