use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 表單狀態，只由送出流程變更
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "walking")]
    Walking,
    #[serde(rename = "boarding")]
    Boarding,
    #[serde(rename = "sitting")]
    Sitting,
    #[serde(rename = "daycare")]
    Daycare,
    #[serde(rename = "drop-in-30")]
    DropIn30,
    #[serde(rename = "drop-in-60")]
    DropIn60,
}

impl ServiceType {
    pub const ALL: [ServiceType; 6] = [
        ServiceType::Walking,
        ServiceType::Boarding,
        ServiceType::Sitting,
        ServiceType::Daycare,
        ServiceType::DropIn30,
        ServiceType::DropIn60,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Walking => "walking",
            ServiceType::Boarding => "boarding",
            ServiceType::Sitting => "sitting",
            ServiceType::Daycare => "daycare",
            ServiceType::DropIn30 => "drop-in-30",
            ServiceType::DropIn60 => "drop-in-60",
        }
    }

    /// Label shown next to the option in the booking form.
    pub fn booking_label(&self) -> &'static str {
        match self {
            ServiceType::Walking => "Dog Walking ($19/walk)",
            ServiceType::Boarding => "Pet Boarding ($40/night)",
            ServiceType::Sitting => "House Sitting ($50/night)",
            ServiceType::Daycare => "Pet Day Care ($35/day)",
            ServiceType::DropIn30 => "Drop-in Visit (30min - $22)",
            ServiceType::DropIn60 => "Drop-in Visit (1hr - $35)",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServiceType::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| {
                let expected: Vec<&str> = ServiceType::ALL.iter().map(|s| s.as_str()).collect();
                format!(
                    "Invalid service type. Expected one of: {}, received '{}'",
                    expected.join(", "),
                    s
                )
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetType {
    Dog,
    Cat,
    Bird,
    Other,
}

impl PetType {
    pub const ALL: [PetType; 4] = [PetType::Dog, PetType::Cat, PetType::Bird, PetType::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            PetType::Dog => "Dog",
            PetType::Cat => "Cat",
            PetType::Bird => "Bird",
            PetType::Other => "Other",
        }
    }
}

impl fmt::Display for PetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PetType::ALL
            .into_iter()
            .find(|pet| pet.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid pet type. Expected one of: Dog, Cat, Bird, Other, received '{}'",
                    s
                )
            })
    }
}

/// 草稿：使用者輸入中、尚未寫入的表單資料
pub trait Draft: Default + Clone + Send {
    type Field: Copy + fmt::Debug + Send;

    /// Replaces a single field. Never validates.
    fn set_field(&mut self, field: Self::Field, value: String);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: String,
    pub pet_type: String,
    pub start_date: String,
    pub notes: String,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            service_type: ServiceType::Walking.as_str().to_string(),
            pet_type: PetType::Dog.as_str().to_string(),
            start_date: String::new(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingField {
    Name,
    Email,
    Phone,
    ServiceType,
    PetType,
    StartDate,
    Notes,
}

impl Draft for BookingDraft {
    type Field = BookingField;

    fn set_field(&mut self, field: BookingField, value: String) {
        let slot = match field {
            BookingField::Name => &mut self.name,
            BookingField::Email => &mut self.email,
            BookingField::Phone => &mut self.phone,
            BookingField::ServiceType => &mut self.service_type,
            BookingField::PetType => &mut self.pet_type,
            BookingField::StartDate => &mut self.start_date,
            BookingField::Notes => &mut self.notes,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientField {
    Name,
    Email,
    Phone,
    Address,
    EmergencyContact,
    EmergencyPhone,
}

impl Draft for ClientDraft {
    type Field = ClientField;

    fn set_field(&mut self, field: ClientField, value: String) {
        let slot = match field {
            ClientField::Name => &mut self.name,
            ClientField::Email => &mut self.email,
            ClientField::Phone => &mut self.phone,
            ClientField::Address => &mut self.address,
            ClientField::EmergencyContact => &mut self.emergency_contact,
            ClientField::EmergencyPhone => &mut self.emergency_phone,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetDraft {
    pub name: String,
    pub pet_type: String,
    pub breed: String,
    pub age: String,
    pub medical_info: String,
    pub feeding_instructions: String,
    pub behavioral_notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetField {
    Name,
    Type,
    Breed,
    Age,
    MedicalInfo,
    FeedingInstructions,
    BehavioralNotes,
}

impl Draft for PetDraft {
    type Field = PetField;

    fn set_field(&mut self, field: PetField, value: String) {
        let slot = match field {
            PetField::Name => &mut self.name,
            PetField::Type => &mut self.pet_type,
            PetField::Breed => &mut self.breed,
            PetField::Age => &mut self.age,
            PetField::MedicalInfo => &mut self.medical_info,
            PetField::FeedingInstructions => &mut self.feeding_instructions,
            PetField::BehavioralNotes => &mut self.behavioral_notes,
        };
        *slot = value;
    }
}

/// 新客戶精靈的兩份草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntakeDraft {
    pub client: ClientDraft,
    pub pet: PetDraft,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeField {
    Client(ClientField),
    Pet(PetField),
}

impl Draft for IntakeDraft {
    type Field = IntakeField;

    fn set_field(&mut self, field: IntakeField, value: String) {
        match field {
            IntakeField::Client(field) => self.client.set_field(field, value),
            IntakeField::Pet(field) => self.pet.set_field(field, value),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl Draft for ContactDraft {
    type Field = ContactField;

    fn set_field(&mut self, field: ContactField, value: String) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = value;
    }
}

/// A booking draft that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub service_type: ServiceType,
    pub pet_type: PetType,
    pub start_date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
}

/// Row written to the `bookings` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewBooking {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub service_type: ServiceType,
    pub pet_type: PetType,
    pub start_date: NaiveDate,
    pub notes: Option<String>,
    pub status: BookingStatus,
}

impl From<ValidBooking> for NewBooking {
    fn from(booking: ValidBooking) -> Self {
        Self {
            client_name: booking.name,
            client_email: booking.email,
            client_phone: booking.phone,
            service_type: booking.service_type,
            pet_type: booking.pet_type,
            start_date: booking.start_date,
            notes: booking.notes,
            status: BookingStatus::Pending,
        }
    }
}

/// Row written to the `clients` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
}

/// Row written to the `pets` collection; `client_id` comes from the client write.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPet {
    pub client_id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub pet_type: PetType,
    pub breed: Option<String>,
    pub age: u8,
    pub medical_info: Option<String>,
    pub feeding_instructions: Option<String>,
    pub behavioral_notes: Option<String>,
}

/// Pet fields checked before the client write; the owner id is attached later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPet {
    pub name: String,
    pub pet_type: PetType,
    pub breed: Option<String>,
    pub age: u8,
    pub medical_info: Option<String>,
    pub feeding_instructions: Option<String>,
    pub behavioral_notes: Option<String>,
}

impl ValidPet {
    pub fn owned_by(self, client_id: RecordId) -> NewPet {
        NewPet {
            client_id,
            name: self.name,
            pet_type: self.pet_type,
            breed: self.breed,
            age: self.age,
            medical_info: self.medical_info,
            feeding_instructions: self.feeding_instructions,
            behavioral_notes: self.behavioral_notes,
        }
    }
}

/// 後端產生的識別碼，保留原始 JSON 型別 (整數或 UUID 字串)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub serde_json::Value);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => write!(f, "{}", other),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Bookings,
    Clients,
    Pets,
}

impl Collection {
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Bookings => "bookings",
            Collection::Clients => "clients",
            Collection::Pets => "pets",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedRecord {
    pub id: RecordId,
    pub data: serde_json::Value,
}

/// Body accepted by the notification endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub user: SessionUser,
}
