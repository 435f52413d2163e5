//! Validation rules for each form.
//!
//! Every parser checks fields in declaration order and stops at the first
//! violation, returning its message as [`IntakeError::Validation`].

use crate::domain::model::{
    BookingDraft, ContactDraft, IntakeDraft, NewClient, PetType, ServiceType, ValidBooking,
    ValidPet,
};
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{char_len, looks_like_email};
use chrono::{Days, NaiveDate};

pub const MAX_PET_AGE: u8 = 30;

fn min_chars(value: &str, min: usize, message: &str) -> Result<()> {
    if char_len(value) < min {
        return Err(IntakeError::validation(message));
    }
    Ok(())
}

fn email(value: &str) -> Result<()> {
    if !looks_like_email(value) {
        return Err(IntakeError::validation("Invalid email address"));
    }
    Ok(())
}

fn required(label: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IntakeError::validation(format!("{} is required", label)));
    }
    Ok(())
}

fn optional(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Earliest start date a booking may request: the day after `today`.
pub fn earliest_start_date(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

pub fn parse_booking(draft: &BookingDraft, today: NaiveDate) -> Result<ValidBooking> {
    min_chars(&draft.name, 2, "Name must be at least 2 characters")?;
    email(&draft.email)?;
    min_chars(&draft.phone, 10, "Phone number must be at least 10 digits")?;
    let service_type: ServiceType = draft
        .service_type
        .parse()
        .map_err(IntakeError::validation)?;
    let pet_type: PetType = draft.pet_type.parse().map_err(IntakeError::validation)?;

    min_chars(&draft.start_date, 1, "Start date is required")?;
    let start_date = NaiveDate::parse_from_str(&draft.start_date, "%Y-%m-%d")
        .map_err(|_| IntakeError::validation("Start date must be a valid date (YYYY-MM-DD)"))?;
    if start_date < earliest_start_date(today) {
        return Err(IntakeError::validation(
            "Start date must be tomorrow or later",
        ));
    }

    Ok(ValidBooking {
        name: draft.name.clone(),
        email: draft.email.clone(),
        phone: draft.phone.clone(),
        service_type,
        pet_type,
        start_date,
        notes: optional(&draft.notes),
    })
}

/// Parses a pet age string. Only whole numbers from 0 to 30 are accepted, so
/// "abc", "5.5" or "-1" never turn into a plausible-looking age.
pub fn parse_age(value: &str) -> Result<u8> {
    let message = format!("Age must be a whole number between 0 and {}", MAX_PET_AGE);
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::validation("Age is required"));
    }
    let age: u8 = trimmed
        .parse()
        .map_err(|_| IntakeError::validation(message.clone()))?;
    if age > MAX_PET_AGE {
        return Err(IntakeError::validation(message));
    }
    Ok(age)
}

pub fn parse_client(draft: &IntakeDraft) -> Result<NewClient> {
    let client = &draft.client;
    required("Full Name", &client.name)?;
    required("Email", &client.email)?;
    email(&client.email)?;
    required("Phone", &client.phone)?;
    required("Address", &client.address)?;
    required("Emergency Contact", &client.emergency_contact)?;
    required("Emergency Phone", &client.emergency_phone)?;

    Ok(NewClient {
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        address: client.address.clone(),
        emergency_contact: client.emergency_contact.clone(),
        emergency_phone: client.emergency_phone.clone(),
    })
}

pub fn parse_pet(draft: &IntakeDraft) -> Result<ValidPet> {
    let pet = &draft.pet;
    required("Pet Name", &pet.name)?;
    required("Type", &pet.pet_type)?;
    let pet_type: PetType = pet.pet_type.parse().map_err(IntakeError::validation)?;
    let age = parse_age(&pet.age)?;

    Ok(ValidPet {
        name: pet.name.clone(),
        pet_type,
        breed: optional(&pet.breed),
        age,
        medical_info: optional(&pet.medical_info),
        feeding_instructions: optional(&pet.feeding_instructions),
        behavioral_notes: optional(&pet.behavioral_notes),
    })
}

pub fn parse_contact(draft: &ContactDraft) -> Result<ContactDraft> {
    required("Name", &draft.name)?;
    required("Email", &draft.email)?;
    email(&draft.email)?;
    required("Message", &draft.message)?;
    Ok(draft.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BookingField, Draft};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn valid_booking() -> BookingDraft {
        BookingDraft {
            name: "Jamie Rivera".into(),
            email: "jamie@example.com".into(),
            phone: "9044388588".into(),
            service_type: "boarding".into(),
            pet_type: "Cat".into(),
            start_date: "2026-10-19".into(),
            notes: String::new(),
        }
    }

    fn message(err: IntakeError) -> String {
        match err {
            IntakeError::Validation { message } => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_valid_booking() {
        let booking = parse_booking(&valid_booking(), today()).unwrap();
        assert_eq!(booking.service_type, ServiceType::Boarding);
        assert_eq!(booking.pet_type, PetType::Cat);
        assert_eq!(booking.start_date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(booking.notes, None);
    }

    #[test]
    fn reports_first_violation_in_field_order() {
        let mut draft = valid_booking();
        draft.set_field(BookingField::Name, "J".into());
        draft.set_field(BookingField::Email, "not-an-email".into());
        draft.set_field(BookingField::Phone, "123".into());

        assert_eq!(
            message(parse_booking(&draft, today()).unwrap_err()),
            "Name must be at least 2 characters"
        );

        draft.set_field(BookingField::Name, "Jo".into());
        assert_eq!(
            message(parse_booking(&draft, today()).unwrap_err()),
            "Invalid email address"
        );

        draft.set_field(BookingField::Email, "jo@example.com".into());
        assert_eq!(
            message(parse_booking(&draft, today()).unwrap_err()),
            "Phone number must be at least 10 digits"
        );
    }

    #[test]
    fn rejects_unknown_service_and_pet_type() {
        let mut draft = valid_booking();
        draft.set_field(BookingField::ServiceType, "grooming".into());
        assert!(message(parse_booking(&draft, today()).unwrap_err()).starts_with("Invalid service type"));

        let mut draft = valid_booking();
        draft.set_field(BookingField::PetType, "Hamster".into());
        assert!(message(parse_booking(&draft, today()).unwrap_err()).starts_with("Invalid pet type"));
    }

    #[test]
    fn start_date_today_is_rejected() {
        let mut draft = valid_booking();
        draft.set_field(BookingField::StartDate, "2026-10-18".into());
        assert_eq!(
            message(parse_booking(&draft, today()).unwrap_err()),
            "Start date must be tomorrow or later"
        );
    }

    #[test]
    fn start_date_missing_or_malformed() {
        let mut draft = valid_booking();
        draft.set_field(BookingField::StartDate, String::new());
        assert_eq!(message(parse_booking(&draft, today()).unwrap_err()), "Start date is required");

        draft.set_field(BookingField::StartDate, "10/19/2026".into());
        assert!(message(parse_booking(&draft, today()).unwrap_err()).starts_with("Start date must be a valid date"));
    }

    #[test]
    fn earliest_start_date_crosses_month_end() {
        let today = NaiveDate::from_ymd_opt(2026, 12, 31).unwrap();
        assert_eq!(
            earliest_start_date(today),
            NaiveDate::from_ymd_opt(2027, 1, 1).unwrap()
        );
    }

    #[test]
    fn age_parsing_boundaries() {
        assert_eq!(parse_age("5").unwrap(), 5);
        assert_eq!(parse_age(" 0 ").unwrap(), 0);
        assert_eq!(parse_age("30").unwrap(), 30);
        assert!(parse_age("31").is_err());
        assert!(parse_age("-1").is_err());
        assert!(parse_age("5.5").is_err());
        assert!(parse_age("abc").is_err());
        assert!(parse_age("5abc").is_err());
        assert_eq!(message(parse_age("").unwrap_err()), "Age is required");
    }

    #[test]
    fn client_requires_every_field() {
        let mut draft = IntakeDraft::default();
        assert_eq!(message(parse_client(&draft).unwrap_err()), "Full Name is required");

        draft.client.name = "Pat Lee".into();
        draft.client.email = "pat@example.com".into();
        draft.client.phone = "9045550100".into();
        draft.client.address = "1 Riverside Ave".into();
        draft.client.emergency_contact = "Sam Lee".into();
        assert_eq!(message(parse_client(&draft).unwrap_err()), "Emergency Phone is required");

        draft.client.emergency_phone = "9045550101".into();
        assert!(parse_client(&draft).is_ok());
    }

    #[test]
    fn pet_optional_text_becomes_none_when_blank() {
        let mut draft = IntakeDraft::default();
        draft.pet.name = "Biscuit".into();
        draft.pet.pet_type = "Dog".into();
        draft.pet.age = "5".into();
        draft.pet.breed = "  ".into();
        draft.pet.feeding_instructions = "Twice daily".into();

        let pet = parse_pet(&draft).unwrap();
        assert_eq!(pet.age, 5);
        assert_eq!(pet.breed, None);
        assert_eq!(pet.feeding_instructions.as_deref(), Some("Twice daily"));
    }

    #[test]
    fn contact_requires_message() {
        let draft = ContactDraft {
            name: "Jo".into(),
            email: "jo@example.com".into(),
            message: String::new(),
        };
        assert_eq!(message(parse_contact(&draft).unwrap_err()), "Message is required");
    }
}
