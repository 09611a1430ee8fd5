use raahi_core::{
    validate_contact, validate_passenger, ContactErrors, ContactField, ContactInfo, Gender,
    PassengerErrors, PassengerField, PassengerInfo,
};

/// A change to one passenger form field.
#[derive(Debug, Clone)]
pub enum PassengerEdit {
    FirstName(String),
    LastName(String),
    Age(Option<u16>),
    Gender(Option<Gender>),
}

impl PassengerEdit {
    fn field(&self) -> PassengerField {
        match self {
            PassengerEdit::FirstName(_) => PassengerField::FirstName,
            PassengerEdit::LastName(_) => PassengerField::LastName,
            PassengerEdit::Age(_) => PassengerField::Age,
            PassengerEdit::Gender(_) => PassengerField::Gender,
        }
    }
}

#[derive(Debug, Clone)]
pub enum ContactEdit {
    Email(String),
    Phone(String),
}

/// Drafts for the passenger-details screen: one form per selected seat plus
/// the booking contact, each with field-level errors. An edit clears the
/// edited field's error immediately; everything is re-checked only on
/// `validate`.
#[derive(Debug, Default)]
pub struct FormSession {
    passengers: Vec<PassengerInfo>,
    passenger_errors: Vec<PassengerErrors>,
    contact: ContactInfo,
    contact_errors: ContactErrors,
}

impl FormSession {
    /// Size the drafts to the current selection: existing entries are kept,
    /// missing slots start blank, surplus ones are dropped.
    pub fn for_selection(
        seat_count: usize,
        existing: &[PassengerInfo],
        contact: &ContactInfo,
    ) -> Self {
        let passengers: Vec<PassengerInfo> = (0..seat_count)
            .map(|index| existing.get(index).cloned().unwrap_or_default())
            .collect();

        Self {
            passenger_errors: vec![PassengerErrors::default(); passengers.len()],
            passengers,
            contact: contact.clone(),
            contact_errors: ContactErrors::default(),
        }
    }

    pub fn passengers(&self) -> &[PassengerInfo] {
        &self.passengers
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn passenger_errors(&self) -> &[PassengerErrors] {
        &self.passenger_errors
    }

    pub fn contact_errors(&self) -> &ContactErrors {
        &self.contact_errors
    }

    pub fn edit_passenger(&mut self, index: usize, edit: PassengerEdit) {
        let Some(form) = self.passengers.get_mut(index) else {
            return;
        };

        let field = edit.field();
        match edit {
            PassengerEdit::FirstName(value) => form.first_name = value,
            PassengerEdit::LastName(value) => form.last_name = value,
            PassengerEdit::Age(value) => form.age = value,
            PassengerEdit::Gender(value) => form.gender = value,
        }

        if let Some(errors) = self.passenger_errors.get_mut(index) {
            errors.clear(field);
        }
    }

    pub fn edit_contact(&mut self, edit: ContactEdit) {
        match edit {
            ContactEdit::Email(value) => {
                self.contact.email = value.into();
                self.contact_errors.clear(ContactField::Email);
            }
            ContactEdit::Phone(value) => {
                self.contact.phone = value.into();
                self.contact_errors.clear(ContactField::Phone);
            }
        }
    }

    /// Run every rule synchronously; true when the screen is submittable.
    pub fn validate(&mut self) -> bool {
        self.passenger_errors = self.passengers.iter().map(validate_passenger).collect();
        self.contact_errors = validate_contact(&self.contact);

        self.passenger_errors.iter().all(PassengerErrors::is_clean)
            && self.contact_errors.is_clean()
    }
}
