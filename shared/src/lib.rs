use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use num_traits::Zero;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Format accepted for `expiry_date`, both on input and in storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Postgres `NUMERIC` limits: digits after the point.
pub const MAX_PRICE_SCALE: i64 = 16383;

/// Postgres `NUMERIC` limits: digits before the point.
pub const MAX_PRICE_INTEGER_DIGITS: i64 = 131072;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    NameOfDrink,
    Price,
    Quantity,
    ExpiryDate,
    BatchNo,
    DrinkSubtype,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::NameOfDrink => "name_of_drink",
            Field::Price => "price",
            Field::Quantity => "quantity",
            Field::ExpiryDate => "expiry_date",
            Field::BatchNo => "batch_no",
            Field::DrinkSubtype => "drink_subtype",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::NameOfDrink => "Name",
            Field::Price => "Price",
            Field::Quantity => "Quantity",
            Field::ExpiryDate => "Expiry date",
            Field::BatchNo => "Batch number",
            Field::DrinkSubtype => "Drink subtype",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a submitted drink form is rejected. The `Display` text is the
/// message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name, batch number, and drink subtype cannot be empty.")]
    EmptyField(Field),
    #[error("Price must be a valid number.")]
    InvalidNumber(String),
    #[error("Quantity must be a valid integer.")]
    InvalidInteger(String),
    #[error("Invalid expiry date format. Use YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("{} cannot be negative.", .0.label())]
    NegativeValue(Field),
}

/// Raw drink fields exactly as posted by the HTML form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DrinkForm {
    pub name_of_drink: String,
    pub price: String,
    pub quantity: String,
    pub expiry_date: String,
    pub batch_no: String,
    pub drink_subtype: String,
}

/// A drink whose fields have all passed validation. This is the only shape
/// the record store accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDrink {
    pub name_of_drink: String,
    pub price: BigDecimal,
    pub quantity: i32,
    pub expiry_date: NaiveDate,
    pub batch_no: String,
    pub drink_subtype: String,
}

impl DrinkForm {
    /// Checks the fields in a fixed order and reports the first violation.
    pub fn validate(&self) -> Result<ValidatedDrink, ValidationError> {
        let name_of_drink = required(Field::NameOfDrink, &self.name_of_drink)?;
        let batch_no = required(Field::BatchNo, &self.batch_no)?;
        let drink_subtype = required(Field::DrinkSubtype, &self.drink_subtype)?;

        Ok(ValidatedDrink {
            name_of_drink,
            price: parse_price(&self.price)?,
            quantity: parse_quantity(&self.quantity)?,
            expiry_date: parse_expiry_date(&self.expiry_date)?,
            batch_no,
            drink_subtype,
        })
    }
}

fn required(field: Field, raw: &str) -> Result<String, ValidationError> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(value.to_string())
}

/// Parses a price that a `NUMERIC` column stores exactly. Exponent notation
/// is accepted but the result never carries a negative scale.
pub fn parse_price(raw: &str) -> Result<BigDecimal, ValidationError> {
    let invalid = || ValidationError::InvalidNumber(raw.to_string());

    let price = BigDecimal::from_str(raw.trim()).map_err(|_| invalid())?;
    let (_, scale) = price.as_bigint_and_exponent();
    let integer_digits = price.digits() as i64 - scale;
    if scale > MAX_PRICE_SCALE || integer_digits > MAX_PRICE_INTEGER_DIGITS {
        return Err(invalid());
    }
    if price < BigDecimal::zero() {
        return Err(ValidationError::NegativeValue(Field::Price));
    }

    if scale < 0 {
        return Ok(price.with_scale(0));
    }
    Ok(price)
}

pub fn parse_quantity(raw: &str) -> Result<i32, ValidationError> {
    let quantity = raw
        .trim()
        .parse::<i32>()
        .map_err(|_| ValidationError::InvalidInteger(raw.to_string()))?;
    if quantity < 0 {
        return Err(ValidationError::NegativeValue(Field::Quantity));
    }
    Ok(quantity)
}

/// Requires a four-digit unsigned year before handing the rest to chrono,
/// which on its own also accepts short and signed years.
pub fn parse_expiry_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate(raw.to_string());

    let bytes = raw.as_bytes();
    let shaped = bytes.len() > 5
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(|b| b.is_ascii_digit() || *b == b'-');
    if !shaped {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cola() -> DrinkForm {
        DrinkForm {
            name_of_drink: "Cola".to_string(),
            price: "1.50".to_string(),
            quantity: "10".to_string(),
            expiry_date: "2025-12-31".to_string(),
            batch_no: "B1".to_string(),
            drink_subtype: "Soda".to_string(),
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_typed() {
        let form = DrinkForm {
            name_of_drink: "  Cola ".to_string(),
            batch_no: "\tB1".to_string(),
            price: " 1.50 ".to_string(),
            ..cola()
        };

        let drink = form.validate().unwrap();
        assert_eq!(drink.name_of_drink, "Cola");
        assert_eq!(drink.batch_no, "B1");
        assert_eq!(drink.drink_subtype, "Soda");
        assert_eq!(drink.price, BigDecimal::from_str("1.5").unwrap());
        assert_eq!(drink.quantity, 10);
        assert_eq!(drink.expiry_date, NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn blank_text_fields_are_rejected_in_order() {
        let form = DrinkForm {
            batch_no: "   ".to_string(),
            drink_subtype: String::new(),
            ..cola()
        };
        assert_eq!(form.validate(), Err(ValidationError::EmptyField(Field::BatchNo)));

        let form = DrinkForm {
            drink_subtype: " ".to_string(),
            ..cola()
        };
        assert_eq!(form.validate(), Err(ValidationError::EmptyField(Field::DrinkSubtype)));
    }

    #[test]
    fn empty_field_wins_over_bad_numbers() {
        let form = DrinkForm {
            name_of_drink: String::new(),
            price: "abc".to_string(),
            ..cola()
        };
        assert_eq!(form.validate(), Err(ValidationError::EmptyField(Field::NameOfDrink)));
    }

    #[test]
    fn price_must_be_a_non_negative_number() {
        let form = DrinkForm { price: "abc".to_string(), ..cola() };
        assert_eq!(form.validate(), Err(ValidationError::InvalidNumber("abc".to_string())));

        let form = DrinkForm { price: "-1".to_string(), ..cola() };
        assert_eq!(form.validate(), Err(ValidationError::NegativeValue(Field::Price)));

        let form = DrinkForm { price: "0".to_string(), ..cola() };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn price_must_fit_a_numeric_column() {
        for raw in ["1e-65537", "1e300000", "1e-16384"] {
            assert_eq!(parse_price(raw), Err(ValidationError::InvalidNumber(raw.to_string())));
        }

        let price = parse_price("1E2").unwrap();
        assert_eq!(price, BigDecimal::from(100));
        assert_eq!(price.as_bigint_and_exponent().1, 0);
        assert_eq!(price.to_string(), "100");

        assert!(parse_price("1e-16383").is_ok());
    }

    #[test]
    fn quantity_must_be_a_non_negative_integer() {
        let form = DrinkForm { quantity: "1.5".to_string(), ..cola() };
        assert_eq!(form.validate(), Err(ValidationError::InvalidInteger("1.5".to_string())));

        let form = DrinkForm { quantity: "99999999999".to_string(), ..cola() };
        assert!(matches!(form.validate(), Err(ValidationError::InvalidInteger(_))));

        let form = DrinkForm { quantity: "-3".to_string(), ..cola() };
        assert_eq!(form.validate(), Err(ValidationError::NegativeValue(Field::Quantity)));
    }

    #[test]
    fn expiry_date_must_be_a_real_calendar_date() {
        for raw in [
            "2024-02-30",
            "31/12/2025",
            "2025-13-01",
            "",
            "25-12-31",
            "+2025-12-31",
            "-0044-03-15",
            "2025-+1-01",
        ] {
            let form = DrinkForm { expiry_date: raw.to_string(), ..cola() };
            assert_eq!(form.validate(), Err(ValidationError::InvalidDate(raw.to_string())));
        }

        let form = DrinkForm { expiry_date: "2024-02-29".to_string(), ..cola() };
        assert!(form.validate().is_ok());
    }

    #[test]
    fn messages_match_the_user_facing_text() {
        assert_eq!(
            ValidationError::NegativeValue(Field::Price).to_string(),
            "Price cannot be negative."
        );
        assert_eq!(
            ValidationError::NegativeValue(Field::Quantity).to_string(),
            "Quantity cannot be negative."
        );
        assert_eq!(
            ValidationError::InvalidDate("x".to_string()).to_string(),
            "Invalid expiry date format. Use YYYY-MM-DD."
        );
    }
}
