use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Date format used for birth dates on the wire
pub const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";

/// A family member receiving an allowance.
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub birth_date: NaiveDate,
    pub allowance_value: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Member {
    pub const MIN_NAME_LEN: usize = 3;
    /// Members must be minors
    pub const MAX_AGE_EXCLUSIVE: i32 = 18;

    pub fn validate_name(name: &str) -> Result<(), MemberValidationError> {
        if name.trim().chars().count() < Self::MIN_NAME_LEN {
            return Err(MemberValidationError::NameTooShort);
        }
        Ok(())
    }

    /// Parse a DD/MM/YYYY birth date and check the member is a minor on `today`.
    pub fn parse_birth_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, MemberValidationError> {
        let birth_date = NaiveDate::parse_from_str(raw.trim(), BIRTH_DATE_FORMAT)
            .map_err(|_| MemberValidationError::InvalidBirthDate)?;

        let age = age_on(birth_date, today);
        if !(0..Self::MAX_AGE_EXCLUSIVE).contains(&age) {
            return Err(MemberValidationError::NotAMinor);
        }
        Ok(birth_date)
    }

    pub fn validate_allowance(value: f64) -> Result<(), MemberValidationError> {
        if !value.is_finite() || value < 0.0 {
            return Err(MemberValidationError::InvalidAllowance);
        }
        Ok(())
    }

    pub fn format_birth_date(&self) -> String {
        self.birth_date.format(BIRTH_DATE_FORMAT).to_string()
    }
}

/// Full years between `birth_date` and `today`. Negative for future dates.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum MemberValidationError {
    #[error("Name must have at least 3 characters")]
    NameTooShort,
    #[error("Name is already registered")]
    DuplicateName,
    #[error("Birth date must use the DD/MM/YYYY format")]
    InvalidBirthDate,
    #[error("Member must be under 18 years old")]
    NotAMinor,
    #[error("Allowance must be a non-negative number")]
    InvalidAllowance,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_on_birthday_boundaries() {
        let birth = date(2010, 6, 15);
        assert_eq!(age_on(birth, date(2020, 6, 14)), 9);
        assert_eq!(age_on(birth, date(2020, 6, 15)), 10);
        assert_eq!(age_on(birth, date(2020, 7, 1)), 10);
        assert_eq!(age_on(birth, date(2009, 1, 1)), -2);
    }

    #[test]
    fn test_parse_birth_date() {
        let today = date(2025, 3, 10);
        assert_eq!(Member::parse_birth_date("15/06/2015", today), Ok(date(2015, 6, 15)));
        // Born today is age zero
        assert_eq!(Member::parse_birth_date("10/03/2025", today), Ok(date(2025, 3, 10)));

        assert_eq!(
            Member::parse_birth_date("2015-06-15", today),
            Err(MemberValidationError::InvalidBirthDate)
        );
        assert_eq!(
            Member::parse_birth_date("31/02/2015", today),
            Err(MemberValidationError::InvalidBirthDate)
        );
        // Turned 18 yesterday
        assert_eq!(
            Member::parse_birth_date("09/03/2007", today),
            Err(MemberValidationError::NotAMinor)
        );
        // Not born yet
        assert_eq!(
            Member::parse_birth_date("11/03/2025", today),
            Err(MemberValidationError::NotAMinor)
        );
    }

    #[test]
    fn test_validate_name_and_allowance() {
        assert!(Member::validate_name("Ana").is_ok());
        assert_eq!(Member::validate_name(" Al "), Err(MemberValidationError::NameTooShort));

        assert!(Member::validate_allowance(0.0).is_ok());
        assert!(Member::validate_allowance(25.5).is_ok());
        assert_eq!(Member::validate_allowance(-1.0), Err(MemberValidationError::InvalidAllowance));
        assert_eq!(Member::validate_allowance(f64::NAN), Err(MemberValidationError::InvalidAllowance));
    }
}
