pub mod dates;
pub mod fare;
pub mod validation;

pub use fare::total_fare;
pub use validation::{
    validate_contact, validate_passenger, ContactErrors, ContactField, ContactInfo, Gender,
    PassengerErrors, PassengerField, PassengerInfo,
};
