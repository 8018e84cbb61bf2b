use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AmortizationError;

/// How often repayments fall due within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RepaymentFrequency {
    Monthly,
    Fortnightly,
    Weekly,
}

impl RepaymentFrequency {
    pub const ALL: [RepaymentFrequency; 3] = [
        RepaymentFrequency::Monthly,
        RepaymentFrequency::Fortnightly,
        RepaymentFrequency::Weekly,
    ];

    pub const fn periods_per_year(self) -> u32 {
        match self {
            RepaymentFrequency::Monthly => 12,
            RepaymentFrequency::Fortnightly => 26,
            RepaymentFrequency::Weekly => 52,
        }
    }

    /// The display key used by input forms and chart labels.
    pub const fn as_str(self) -> &'static str {
        match self {
            RepaymentFrequency::Monthly => "Monthly",
            RepaymentFrequency::Fortnightly => "Fortnightly",
            RepaymentFrequency::Weekly => "Weekly",
        }
    }
}

impl fmt::Display for RepaymentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepaymentFrequency {
    type Err = AmortizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        RepaymentFrequency::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(key))
            .ok_or_else(|| {
                AmortizationError::invalid(
                    "frequency",
                    format!("Unknown repayment frequency '{key}'. Use: Monthly, Fortnightly, Weekly"),
                )
            })
    }
}

impl TryFrom<String> for RepaymentFrequency {
    type Error = AmortizationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RepaymentFrequency> for String {
    fn from(value: RepaymentFrequency) -> Self {
        value.as_str().to_string()
    }
}
