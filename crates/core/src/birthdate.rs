//! Birth-date input normalization.
//!
//! Registration accepts a birth date either as a structured
//! `{ "year": 1995, "month": 8, "day": 30 }` object or as a delimited string
//! like `"1995/08/30"`. Both forms are normalized into a [`NaiveDate`] before
//! persistence; a decomposition that does not denote a real calendar date
//! (e.g. day 31 in a 30-day month) is rejected rather than silently rolled
//! over to the next month.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::CoreError;

/// Raw birth-date input as received from the client.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BirthInput {
    /// Structured year/month/day decomposition.
    Parts { year: i32, month: u32, day: u32 },
    /// Delimited string form, `YYYY/MM/DD` or `YYYY-MM-DD`.
    Text(String),
}

impl BirthInput {
    /// Normalize into a canonical calendar date.
    ///
    /// Fails with [`CoreError::Validation`] when the components do not form a
    /// valid date or the string form is malformed.
    pub fn to_date(&self) -> Result<NaiveDate, CoreError> {
        match self {
            BirthInput::Parts { year, month, day } => make_date(*year, *month, *day),
            BirthInput::Text(text) => parse_delimited(text),
        }
    }
}

fn make_date(year: i32, month: u32, day: u32) -> Result<NaiveDate, CoreError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        CoreError::Validation(format!(
            "'{year}-{month}-{day}' is not a valid calendar date"
        ))
    })
}

fn parse_delimited(text: &str) -> Result<NaiveDate, CoreError> {
    let delimiter = if text.contains('/') { '/' } else { '-' };
    let parts: Vec<&str> = text.split(delimiter).collect();

    if parts.len() != 3 {
        return Err(CoreError::Validation(format!(
            "Birth date '{text}' must have the form YYYY/MM/DD"
        )));
    }

    let parse = |s: &str| -> Result<i64, CoreError> {
        s.trim()
            .parse()
            .map_err(|_| CoreError::Validation(format!("Birth date '{text}' contains a non-numeric component")))
    };

    let year = parse(parts[0])?;
    let month = parse(parts[1])?;
    let day = parse(parts[2])?;

    let year = i32::try_from(year)
        .map_err(|_| CoreError::Validation(format!("Birth year in '{text}' is out of range")))?;
    let month = u32::try_from(month)
        .map_err(|_| CoreError::Validation(format!("Birth month in '{text}' is out of range")))?;
    let day = u32::try_from(day)
        .map_err(|_| CoreError::Validation(format!("Birth day in '{text}' is out of range")))?;

    make_date(year, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_parts_normalize() {
        let input = BirthInput::Parts {
            year: 1995,
            month: 8,
            day: 30,
        };
        let date = input.to_date().expect("valid date should normalize");
        assert_eq!(date, NaiveDate::from_ymd_opt(1995, 8, 30).unwrap());
    }

    #[test]
    fn test_day_overflow_is_rejected_not_rolled_over() {
        // April has 30 days; day 31 must fail instead of becoming May 1.
        let input = BirthInput::Parts {
            year: 2000,
            month: 4,
            day: 31,
        };
        assert!(matches!(input.to_date(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_february_29_non_leap_year_rejected() {
        let input = BirthInput::Parts {
            year: 2001,
            month: 2,
            day: 29,
        };
        assert!(input.to_date().is_err());

        let leap = BirthInput::Parts {
            year: 2000,
            month: 2,
            day: 29,
        };
        assert!(leap.to_date().is_ok());
    }

    #[test]
    fn test_slash_and_dash_delimited_strings() {
        let slash = BirthInput::Text("1995/08/30".to_string());
        let dash = BirthInput::Text("1995-08-30".to_string());
        let expected = NaiveDate::from_ymd_opt(1995, 8, 30).unwrap();

        assert_eq!(slash.to_date().unwrap(), expected);
        assert_eq!(dash.to_date().unwrap(), expected);
    }

    #[test]
    fn test_malformed_strings_rejected() {
        for bad in ["1995/08", "1995/08/30/1", "not-a-date", "1995/4/31", ""] {
            let input = BirthInput::Text(bad.to_string());
            assert!(input.to_date().is_err(), "'{bad}' should be rejected");
        }
    }

    #[test]
    fn test_deserializes_from_both_json_shapes() {
        let parts: BirthInput =
            serde_json::from_str(r#"{ "year": 1990, "month": 1, "day": 2 }"#).unwrap();
        let text: BirthInput = serde_json::from_str(r#""1990/01/02""#).unwrap();

        assert_eq!(parts.to_date().unwrap(), text.to_date().unwrap());
    }
}
