//! File name construction
//!
//! Combines a base name with an optional date token. The date token comes
//! from a format string in which `MM`, `dd` and `YYYY` are substituted.
//! Only the first occurrence of each token is replaced; a second `MM` in the
//! format is left as literal text.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the date token goes relative to the base name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatePosition {
    #[default]
    None,
    Prefix,
    Suffix,
}

impl DatePosition {
    pub fn as_str(self) -> &'static str {
        match self {
            DatePosition::None => "none",
            DatePosition::Prefix => "prefix",
            DatePosition::Suffix => "suffix",
        }
    }
}

impl fmt::Display for DatePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatePosition {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(DatePosition::None),
            "prefix" => Ok(DatePosition::Prefix),
            "suffix" => Ok(DatePosition::Suffix),
            _ => anyhow::bail!("Invalid date position: {}. Use 'none', 'prefix' or 'suffix'.", s),
        }
    }
}

/// Render `date` through `format`, replacing the first `MM`, `dd` and `YYYY`
pub fn format_date(format: &str, date: NaiveDate) -> String {
    let tokens = [
        ("MM", format!("{:02}", date.month())),
        ("dd", format!("{:02}", date.day())),
        ("YYYY", format!("{:04}", date.year())),
    ];

    tokens
        .iter()
        .fold(format.to_string(), |acc, (token, value)| acc.replacen(token, value, 1))
}

/// Build the final file stem (no extension)
pub fn build_name(base_name: &str, position: DatePosition, date_format: &str, now: NaiveDate) -> String {
    match position {
        DatePosition::None => base_name.to_string(),
        DatePosition::Prefix => format!("{}-{}", format_date(date_format, now), base_name),
        DatePosition::Suffix => format!("{}-{}", base_name, format_date(date_format, now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn march_fifth() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()
    }

    #[test]
    fn test_format_default() {
        assert_eq!(format_date("MMddYYYY", march_fifth()), "03052024");
    }

    #[test]
    fn test_format_keeps_other_characters() {
        assert_eq!(format_date("YYYY-MM-dd", march_fifth()), "2024-03-05");
        assert_eq!(format_date("[dd.MM.YYYY] x", march_fifth()), "[05.03.2024] x");
        assert_eq!(format_date("no tokens", march_fifth()), "no tokens");
    }

    #[test]
    fn test_format_replaces_first_occurrence_only() {
        assert_eq!(format_date("MM-MM", march_fifth()), "03-MM");
        assert_eq!(format_date("YYYY/YYYY", march_fifth()), "2024/YYYY");
    }

    #[test]
    fn test_format_pads_small_years() {
        let date = NaiveDate::from_ymd_opt(987, 12, 31).unwrap();
        assert_eq!(format_date("YYYY-MM-dd", date), "0987-12-31");
    }

    #[test]
    fn test_build_name_positions() {
        let now = march_fifth();
        assert_eq!(build_name("Notes", DatePosition::Prefix, "MMddYYYY", now), "03052024-Notes");
        assert_eq!(build_name("Notes", DatePosition::Suffix, "MMddYYYY", now), "Notes-03052024");
        assert_eq!(build_name("Notes", DatePosition::None, "MMddYYYY", now), "Notes");
    }

    #[test]
    fn test_build_name_none_is_identity() {
        for name in ["", "a", "My Note", "MMddYYYY", "2024-01-01"] {
            assert_eq!(build_name(name, DatePosition::None, "YYYY", march_fifth()), name);
        }
    }

    #[test]
    fn test_build_name_empty_base() {
        assert_eq!(build_name("", DatePosition::Prefix, "YYYY", march_fifth()), "2024-");
        assert_eq!(build_name("", DatePosition::Suffix, "YYYY", march_fifth()), "-2024");
    }

    #[test]
    fn test_parse_position() {
        assert_eq!("Prefix".parse::<DatePosition>().unwrap(), DatePosition::Prefix);
        assert!("middle".parse::<DatePosition>().is_err());
    }
}
