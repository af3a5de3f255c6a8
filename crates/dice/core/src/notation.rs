//! Parsing of `NdF` dice notation.
//!
//! Accepted forms: `2d6`, `d20` (count defaults to 1), `1D8`, `d%` (d100).
//! Surrounding whitespace is ignored. The output of `Display` for [`Die`]
//! always parses back to a matching die.

use std::str::FromStr;

use crate::die::Die;
use crate::error::{DiceError, DieField, Result};

impl FromStr for Die {
    type Err = DiceError;

    fn from_str(text: &str) -> Result<Self> {
        let text = text.trim();
        let (count, faces) = text
            .split_once(['d', 'D'])
            .ok_or_else(|| DiceError::InvalidNotation(text.to_string()))?;

        let count = match count.trim() {
            "" => 1,
            token => parse_field(token, DieField::Count, text)?,
        };
        let faces = match faces.trim() {
            "%" => 100,
            token => parse_field(token, DieField::Faces, text)?,
        };
        Die::new(count, faces)
    }
}

fn parse_field(token: &str, field: DieField, text: &str) -> Result<u32> {
    let value: i64 = token.parse().map_err(|_| DiceError::NotAnInteger {
        field,
        value: token.to_string(),
    })?;
    if value < 1 {
        return Err(match field {
            DieField::Count => DiceError::InvalidCount(value),
            DieField::Faces => DiceError::InvalidFaces(value),
        });
    }
    u32::try_from(value).map_err(|_| DiceError::InvalidNotation(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_forms() {
        let die: Die = "2d6".parse().unwrap();
        assert_eq!((die.count(), die.faces()), (2, 6));

        let die: Die = " d20 ".parse().unwrap();
        assert_eq!((die.count(), die.faces()), (1, 20));

        let die: Die = "3D8".parse().unwrap();
        assert_eq!((die.count(), die.faces()), (3, 8));

        let die: Die = "d%".parse().unwrap();
        assert_eq!(die.faces(), 100);
    }

    #[test]
    fn display_round_trips() {
        let die = Die::new(4, 10).unwrap();
        let parsed: Die = die.to_string().parse().unwrap();
        assert!(parsed.matches(&die));
    }

    #[test]
    fn reports_type_and_range_violations() {
        assert_eq!(
            "twod6".parse::<Die>().unwrap_err(),
            DiceError::NotAnInteger {
                field: DieField::Count,
                value: "two".into(),
            }
        );
        assert_eq!(
            "2d6.5".parse::<Die>().unwrap_err(),
            DiceError::NotAnInteger {
                field: DieField::Faces,
                value: "6.5".into(),
            }
        );
        assert_eq!("0d6".parse::<Die>().unwrap_err(), DiceError::InvalidCount(0));
        assert_eq!("2d-4".parse::<Die>().unwrap_err(), DiceError::InvalidFaces(-4));
        assert_eq!(
            "26".parse::<Die>().unwrap_err(),
            DiceError::InvalidNotation("26".into())
        );
        assert!("2d99999999999".parse::<Die>().is_err());
    }
}
