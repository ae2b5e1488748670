use std::fmt;

/// Card fields as supplied by the caller.
///
/// Nothing is validated locally, the provider decides whether the number,
/// expiration date and CVV are acceptable.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    /// Expiration date as "MM/YY"
    pub expiration_date: String,
    pub cvv: String,
}

impl CardDetails {
    pub fn new(number: &str, expiration_date: &str, cvv: &str) -> Self {
        Self {
            number: number.to_string(),
            expiration_date: expiration_date.to_string(),
            cvv: cvv.to_string(),
        }
    }

    /// Splits "MM/YY" into month and year, text without a slash is all month
    pub fn expiration_parts(&self) -> (String, Option<String>) {
        match self.expiration_date.split_once('/') {
            Some((month, year)) => (month.trim().to_string(), Some(year.trim().to_string())),
            None => (self.expiration_date.trim().to_string(), None),
        }
    }

    /// Card number with everything but the last four digits hidden
    pub fn masked_number(&self) -> String {
        let digits = self.number.chars().count();
        let last_four: String = self.number.chars().skip(digits.saturating_sub(4)).collect();

        format!("{}{}", "*".repeat(digits.saturating_sub(4)), last_four)
    }
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &self.masked_number())
            .field("expiration_date", &self.expiration_date)
            .field("cvv", &"***")
            .finish()
    }
}
