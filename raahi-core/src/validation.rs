use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use raahi_shared::Masked;

pub const MIN_AGE: u16 = 1;
pub const MAX_AGE: u16 = 110;

// Deliberately simple: something@something.something, no whitespace.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// One traveler's details. A freshly appended slot is blank; a slot only
/// counts as complete once every field validates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PassengerInfo {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<u16>,
    pub gender: Option<Gender>,
}

impl PassengerInfo {
    pub fn is_complete(&self) -> bool {
        validate_passenger(self).is_clean()
    }
}

/// Single email/phone pair for the whole booking, not per passenger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Masked<String>,
    pub phone: Masked<String>,
}

impl ContactInfo {
    pub fn new(email: &str, phone: &str) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        validate_contact(self).is_clean()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassengerField {
    FirstName,
    LastName,
    Age,
    Gender,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Email,
    Phone,
}

/// Field-level findings for one passenger form. `None` means the field is fine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PassengerErrors {
    pub first_name: Option<&'static str>,
    pub last_name: Option<&'static str>,
    pub age: Option<&'static str>,
    pub gender: Option<&'static str>,
}

impl PassengerErrors {
    pub fn is_clean(&self) -> bool {
        self.count() == 0
    }

    pub fn count(&self) -> usize {
        [self.first_name, self.last_name, self.age, self.gender]
            .iter()
            .filter(|error| error.is_some())
            .count()
    }

    /// Drop the error for one field, leaving the rest untouched. Editing a
    /// field clears its error immediately, before any re-validation.
    pub fn clear(&mut self, field: PassengerField) {
        match field {
            PassengerField::FirstName => self.first_name = None,
            PassengerField::LastName => self.last_name = None,
            PassengerField::Age => self.age = None,
            PassengerField::Gender => self.gender = None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactErrors {
    pub email: Option<&'static str>,
    pub phone: Option<&'static str>,
}

impl ContactErrors {
    pub fn is_clean(&self) -> bool {
        self.email.is_none() && self.phone.is_none()
    }

    pub fn clear(&mut self, field: ContactField) {
        match field {
            ContactField::Email => self.email = None,
            ContactField::Phone => self.phone = None,
        }
    }
}

pub fn validate_passenger(passenger: &PassengerInfo) -> PassengerErrors {
    let mut errors = PassengerErrors::default();

    if passenger.first_name.trim().is_empty() {
        errors.first_name = Some("First name is required");
    }
    if passenger.last_name.trim().is_empty() {
        errors.last_name = Some("Last name is required");
    }
    match passenger.age {
        Some(age) if (MIN_AGE..=MAX_AGE).contains(&age) => {}
        _ => errors.age = Some("Valid age is required"),
    }
    if passenger.gender.is_none() {
        errors.gender = Some("Gender is required");
    }

    errors
}

pub fn validate_contact(contact: &ContactInfo) -> ContactErrors {
    let mut errors = ContactErrors::default();

    if !is_valid_email(contact.email.inner()) {
        errors.email = Some("Valid email is required");
    }
    if phone_digit_count(contact.phone.inner()) < 10 {
        errors.phone = Some("Valid phone (10 digits) is required");
    }

    errors
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Digits left after stripping formatting like spaces, dashes, "+91".
pub fn phone_digit_count(phone: &str) -> usize {
    phone.chars().filter(char::is_ascii_digit).count()
}
