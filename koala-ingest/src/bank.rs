use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Supported statement layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    C6,
    Nubank,
}

impl Bank {
    pub const ALL: [Bank; 2] = [Bank::C6, Bank::Nubank];

    pub fn name(&self) -> &'static str {
        match self {
            Bank::C6 => "C6",
            Bank::Nubank => "Nubank",
        }
    }

    /// First page with transaction tables; earlier pages are cover and summary.
    pub fn default_start_page(&self) -> usize {
        match self {
            Bank::C6 => 2,
            Bank::Nubank => 3,
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Bank {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c6" => Ok(Bank::C6),
            "nubank" | "nu" => Ok(Bank::Nubank),
            other => Err(format!("unknown bank: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bank_names() {
        assert_eq!("C6".parse::<Bank>().unwrap(), Bank::C6);
        assert_eq!(" nubank ".parse::<Bank>().unwrap(), Bank::Nubank);
        assert!("itau".parse::<Bank>().is_err());
    }

    #[test]
    fn test_default_start_pages() {
        assert_eq!(Bank::C6.default_start_page(), 2);
        assert_eq!(Bank::Nubank.default_start_page(), 3);
    }
}
