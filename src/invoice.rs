use std::fmt;

use chrono::NaiveDate;
use const_format::formatcp;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tracing::debug;

use crate::calendar;
use crate::error::InvoiceError;
use crate::input::InvoiceInput;

const COMPANY: &str = "Cimantikós Clothing Company";
const PHONE: &str = "+233208467699";

pub const SENDER: &str =
    formatcp!("{}\nWestlands Boulevard Rd,190\n{}", COMPANY, PHONE);

pub const LOGO_URL: &str = "https://res.cloudinary.com/dk4b0brc0/image/upload/v1754602556/Logo-6_ykuaue.jpg";

pub const TERMS: &str =
    "Customers are required to make full payment before work commences.\n\n\
     Payment options are as stated below:\n\n\
     MTN MOMO: 0558413199\n\
     Cimantikos Clothing Company (Edward Osei-Agyeman)\n\n\
     CAL Bank account no: 1400009095472\n\
     Branch: Madina";

#[derive(Display, Serialize, Deserialize, Debug, PartialEq, Clone, Copy, Default)]
pub enum Currency {
    #[default]
    #[strum(serialize = "GH₵")]
    #[serde(rename = "GHS")]
    Ghs,
}

/// An amount in a currency, rounded to cents. Arithmetic is checked, `None`
/// means the result no longer fits a `Decimal`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Money(Currency, Decimal);

impl Money {
    pub fn new(currency: Currency, amount: Decimal) -> Self {
        Self(currency, amount)
    }

    pub fn zero(currency: Currency) -> Self {
        Self(currency, Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.1
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.1.checked_add(other.1).map(|sum| Self(self.0, sum))
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.1.checked_sub(other.1).map(|diff| Self(self.0, diff))
    }

    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.1.checked_mul(factor).map(|product| {
            Self(
                self.0,
                product.round_dp_with_strategy(
                    2,
                    RoundingStrategy::MidpointNearestEven,
                ),
            )
        })
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{:.2}", self.0, self.1)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct LineItem {
    pub name: String,
    pub quantity: Decimal,
    pub unit_cost: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LineItem {
    pub fn new(name: &str, quantity: Decimal, unit_cost: Decimal) -> Self {
        Self {
            name: name.to_string(),
            quantity,
            unit_cost,
            description: None,
        }
    }

    pub fn amount(&self, currency: Currency) -> Option<Money> {
        Money::new(currency, self.unit_cost).checked_mul(self.quantity)
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} x {} @ {}", self.quantity, self.name, self.unit_cost)
    }
}

/// Unit the remote service applies to a field, sent under `fields`.
#[derive(Serialize, Debug, PartialEq, Clone, Copy)]
pub enum FieldUnit {
    #[serde(rename = "%")]
    Percent,
}

#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct Fields {
    pub discounts: FieldUnit,
}

/// Payload of a single invoice-generator.com request.
#[derive(Serialize, Debug, PartialEq, Clone)]
pub struct InvoiceRequest {
    #[serde(rename = "from")]
    pub sender: &'static str,
    #[serde(rename = "to")]
    pub recipient: String,
    #[serde(rename = "logo")]
    pub logo_url: &'static str,
    pub date: String,
    pub currency: Currency,
    pub items: Vec<LineItem>,
    pub terms: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Fields>,
    #[serde(rename = "discounts", skip_serializing_if = "Option::is_none")]
    pub discount_percentage: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_paid: Option<Decimal>,
}

impl InvoiceRequest {
    /// Shape merged input into the payload, `today` is used when the
    /// input carries no date.
    pub fn build(
        input: InvoiceInput,
        today: NaiveDate,
    ) -> Result<Self, InvoiceError> {
        let recipient = input
            .to
            .as_deref()
            .map(normalize_recipient)
            .ok_or_else(|| InvoiceError::missing("No recipient given"))?;
        if recipient.trim().is_empty() {
            return Err(InvoiceError::missing("Recipient is empty"));
        }

        let items: Vec<LineItem> = input
            .items
            .unwrap_or_default()
            .into_iter()
            .map(|item| LineItem {
                name: title_case(&item.name),
                ..item
            })
            .collect();
        if items.is_empty() {
            return Err(InvoiceError::missing(
                "An invoice needs at least one item",
            ));
        }

        let date = calendar::invoice_date(input.date.as_deref(), today);
        let fields = input.discount_percentage.map(|_| Fields {
            discounts: FieldUnit::Percent,
        });

        for item in items.iter() {
            debug!(%item, "line item");
        }
        debug!(%date, items = items.len(), "built invoice request");

        Ok(Self {
            sender: SENDER,
            recipient,
            logo_url: LOGO_URL,
            date,
            currency: Currency::default(),
            items,
            terms: TERMS,
            notes: input.notes,
            fields,
            discount_percentage: input.discount_percentage,
            amount_paid: input.amount_paid,
        })
    }

    /// Recipient up to the first line break.
    pub fn recipient_name(&self) -> &str {
        self.recipient.split('\n').next().unwrap_or_default()
    }

    /// Totals as the service will print them, `None` when the amounts are
    /// too large to add up.
    pub fn calculate(&self) -> Option<InvoiceTotal> {
        let zero = Money::zero(self.currency);
        let subtotal = self.items.iter().try_fold(zero, |acc, item| {
            acc.checked_add(item.amount(self.currency)?)
        })?;
        let discount = match self.discount_percentage {
            Some(pct) => subtotal
                .checked_mul(pct.checked_div(Decimal::ONE_HUNDRED)?)?,
            None => zero,
        };
        let total = subtotal.checked_sub(discount)?;
        let paid = Money::new(
            self.currency,
            self.amount_paid.unwrap_or(Decimal::ZERO),
        );

        Some(InvoiceTotal {
            subtotal,
            discount,
            total,
            paid,
            balance_due: total.checked_sub(paid)?,
        })
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct InvoiceTotal {
    pub subtotal: Money,
    pub discount: Money,
    pub total: Money,
    pub paid: Money,
    pub balance_due: Money,
}

impl fmt::Display for InvoiceTotal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtotal: {}", self.subtotal)?;
        writeln!(f, "Discount: {}", self.discount)?;
        writeln!(f, "Total: {}", self.total)?;
        writeln!(f, "Amount Paid: {}", self.paid)?;
        write!(f, "Balance Due: {}", self.balance_due)
    }
}

/// Turn literal `\n` escapes, as typed on a shell, into line breaks.
pub fn normalize_recipient(raw: &str) -> String {
    raw.replace("\\n", "\n")
}

/// Upper case the first letter of every run of letters and lower case the
/// rest. Anything that is not a letter ends a run.
pub fn title_case(name: &str) -> String {
    let mut titled = String::with_capacity(name.len());
    let mut in_word = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if in_word {
                titled.extend(c.to_lowercase());
            } else {
                titled.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            titled.push(c);
            in_word = false;
        }
    }
    titled
}
