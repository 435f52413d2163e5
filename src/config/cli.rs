use crate::core::form::{FormController, IntakeWizard};
use crate::domain::model::{BookingDraft, BookingField, ClientField, ContactDraft, ContactField, PetField};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "paws-intake")]
#[command(about = "Bookings, client intake and contact messages for Little Paws pet care")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "paws.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List services, prices and contact details
    Services,
    /// Book a service
    Book(BookArgs),
    /// Add a new client together with their pet
    AddClient(AddClientArgs),
    /// Send a message to the team
    Contact(ContactArgs),
    /// Show the current session
    Session,
    /// Sign the current session out
    SignOut,
    /// Create a confirmed admin user (needs the service role key)
    CreateAdmin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[derive(Debug, Clone, Args)]
pub struct BookArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    /// walking, boarding, sitting, daycare, drop-in-30 or drop-in-60
    #[arg(long, default_value = "walking")]
    pub service: String,
    /// Dog, Cat, Bird or Other
    #[arg(long, default_value = "Dog")]
    pub pet_type: String,
    /// YYYY-MM-DD, tomorrow or later
    #[arg(long)]
    pub start_date: String,
    #[arg(long, default_value = "")]
    pub notes: String,
}

impl BookArgs {
    pub fn fill(&self, form: &mut FormController<BookingDraft>) {
        form.set_field(BookingField::Name, self.name.as_str());
        form.set_field(BookingField::Email, self.email.as_str());
        form.set_field(BookingField::Phone, self.phone.as_str());
        form.set_field(BookingField::ServiceType, self.service.as_str());
        form.set_field(BookingField::PetType, self.pet_type.as_str());
        form.set_field(BookingField::StartDate, self.start_date.as_str());
        form.set_field(BookingField::Notes, self.notes.as_str());
    }
}

#[derive(Debug, Clone, Args)]
pub struct AddClientArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub phone: String,
    #[arg(long)]
    pub address: String,
    #[arg(long)]
    pub emergency_contact: String,
    #[arg(long)]
    pub emergency_phone: String,

    #[arg(long)]
    pub pet_name: String,
    /// Dog, Cat, Bird or Other
    #[arg(long)]
    pub pet_type: String,
    #[arg(long, default_value = "")]
    pub breed: String,
    /// Whole years, 0 to 30
    #[arg(long)]
    pub age: String,
    #[arg(long, default_value = "")]
    pub medical_info: String,
    #[arg(long, default_value = "")]
    pub feeding_instructions: String,
    #[arg(long, default_value = "")]
    pub behavioral_notes: String,
}

impl AddClientArgs {
    pub fn fill_client(&self, wizard: &mut IntakeWizard) {
        wizard.set_client_field(ClientField::Name, self.name.as_str());
        wizard.set_client_field(ClientField::Email, self.email.as_str());
        wizard.set_client_field(ClientField::Phone, self.phone.as_str());
        wizard.set_client_field(ClientField::Address, self.address.as_str());
        wizard.set_client_field(ClientField::EmergencyContact, self.emergency_contact.as_str());
        wizard.set_client_field(ClientField::EmergencyPhone, self.emergency_phone.as_str());
    }

    pub fn fill_pet(&self, wizard: &mut IntakeWizard) {
        wizard.set_pet_field(PetField::Name, self.pet_name.as_str());
        wizard.set_pet_field(PetField::Type, self.pet_type.as_str());
        wizard.set_pet_field(PetField::Breed, self.breed.as_str());
        wizard.set_pet_field(PetField::Age, self.age.as_str());
        wizard.set_pet_field(PetField::MedicalInfo, self.medical_info.as_str());
        wizard.set_pet_field(PetField::FeedingInstructions, self.feeding_instructions.as_str());
        wizard.set_pet_field(PetField::BehavioralNotes, self.behavioral_notes.as_str());
    }
}

#[derive(Debug, Clone, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub email: String,
    #[arg(long)]
    pub message: String,
}

impl ContactArgs {
    pub fn fill(&self, form: &mut FormController<ContactDraft>) {
        form.set_field(ContactField::Name, self.name.as_str());
        form.set_field(ContactField::Email, self.email.as_str());
        form.set_field(ContactField::Message, self.message.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form::WizardStep;

    #[test]
    fn parses_book_with_defaults() {
        let cli = Cli::try_parse_from([
            "paws-intake",
            "book",
            "--name",
            "Jamie Rivera",
            "--email",
            "jamie@example.com",
            "--phone",
            "9044388588",
            "--start-date",
            "2026-10-20",
        ])
        .unwrap();

        assert_eq!(cli.config, "paws.toml");
        let Command::Book(args) = cli.command else {
            panic!("expected book command");
        };
        assert_eq!(args.service, "walking");
        assert_eq!(args.pet_type, "Dog");

        let mut form = FormController::<BookingDraft>::new();
        args.fill(&mut form);
        assert_eq!(form.draft().start_date, "2026-10-20");
        assert_eq!(form.draft().notes, "");
    }

    #[test]
    fn add_client_fills_both_steps() {
        let cli = Cli::try_parse_from([
            "paws-intake",
            "--verbose",
            "add-client",
            "--name",
            "Pat Lee",
            "--email",
            "pat@example.com",
            "--phone",
            "9045550100",
            "--address",
            "1 Riverside Ave",
            "--emergency-contact",
            "Sam Lee",
            "--emergency-phone",
            "9045550101",
            "--pet-name",
            "Biscuit",
            "--pet-type",
            "Dog",
            "--age",
            "5",
        ])
        .unwrap();
        assert!(cli.verbose);

        let Command::AddClient(args) = cli.command else {
            panic!("expected add-client command");
        };
        let mut wizard = IntakeWizard::new();
        args.fill_client(&mut wizard);
        wizard.advance_step();
        args.fill_pet(&mut wizard);

        assert_eq!(wizard.step(), WizardStep::Pet);
        assert_eq!(wizard.form().draft().client.emergency_contact, "Sam Lee");
        assert_eq!(wizard.form().draft().pet.age, "5");
    }

    #[test]
    fn book_requires_start_date() {
        let result = Cli::try_parse_from([
            "paws-intake",
            "book",
            "--name",
            "Jo",
            "--email",
            "jo@example.com",
            "--phone",
            "9044388588",
        ]);
        assert!(result.is_err());
    }
}
