use anyhow::Context;
use clap::Parser;
use paws_intake::config::cli::{AddClientArgs, BookArgs, Command, ContactArgs};
use paws_intake::core::session;
use paws_intake::core::submission::{BOOKING_FAILURE_MESSAGE, CONTACT_FAILURE_MESSAGE};
use paws_intake::domain::catalog;
use paws_intake::domain::model::{BookingDraft, ContactDraft, ServiceType};
use paws_intake::domain::ports::IdentityProvider;
use paws_intake::utils::error::{ErrorSeverity, IntakeError};
use paws_intake::utils::{logger, validation::Validate};
use paws_intake::{
    Cli, FormController, FormSignal, HttpNotifier, IntakeService, IntakeWizard, PawsConfig,
    SupabaseClient,
};

type Service = IntakeService<SupabaseClient, HttpNotifier>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    if let Command::Services = cli.command {
        print_services();
        return Ok(());
    }

    tracing::info!("📁 Loading configuration from: {}", cli.config);
    let config = match PawsConfig::from_file(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", cli.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let service = build_service(&config)?;

    if let Err(e) = run(cli.command, &service).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    Ok(())
}

fn exit_code(e: &IntakeError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 4,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

/// Form submissions already logged the cause; the user only sees the form's message.
fn exit_with_form_error(form_error: Option<&str>, fallback: &str, e: &IntakeError) -> ! {
    eprintln!("❌ {}", form_error.unwrap_or(fallback));
    std::process::exit(exit_code(e));
}

fn build_service(config: &PawsConfig) -> anyhow::Result<Service> {
    let store = SupabaseClient::new(&config.backend).context("building backend client")?;
    let notifier = HttpNotifier::new(
        config.notifications.endpoint.as_deref(),
        config.backend.timeout(),
    )
    .context("building notification client")?;
    Ok(IntakeService::new(store, notifier, config.submission_settings()))
}

async fn run(command: Command, service: &Service) -> Result<(), IntakeError> {
    match command {
        Command::Services => print_services(),
        Command::Book(args) => book(&args, service).await?,
        Command::AddClient(args) => add_client(&args, service).await?,
        Command::Contact(args) => contact(&args, service).await?,
        Command::Session => match session::initialize(service.store()).await {
            Some(session) => println!(
                "Signed in as {} (role: {})",
                session.user.email.as_deref().unwrap_or(&session.user.id),
                session.user.role.as_deref().unwrap_or("none")
            ),
            None => println!("Not signed in"),
        },
        Command::SignOut => {
            service.store().sign_out().await?;
            println!("Signed out");
        }
        Command::CreateAdmin { email, password } => {
            service.store().create_admin_user(&email, &password).await?;
            println!("✅ Admin user {} created", email);
        }
    }
    Ok(())
}

async fn book(args: &BookArgs, service: &Service) -> Result<(), IntakeError> {
    let mut form = FormController::<BookingDraft>::new();
    args.fill(&mut form);

    let receipt = match service.submit_booking(&mut form).await {
        Ok(receipt) => receipt,
        Err(e) => exit_with_form_error(form.error(), BOOKING_FAILURE_MESSAGE, &e),
    };
    println!("✅ Booking Submitted!");
    println!(
        "   {} starting {}",
        receipt.booking.service_type.booking_label(),
        receipt.booking.start_date
    );
    println!("   We'll contact you shortly to confirm your appointment.");

    if form.close_after(service.settings().reset_delay).await == FormSignal::Close {
        tracing::debug!("Booking form closed");
    }
    Ok(())
}

async fn add_client(args: &AddClientArgs, service: &Service) -> Result<(), IntakeError> {
    let mut wizard = IntakeWizard::new();
    tracing::debug!("{}", wizard.step().title());
    args.fill_client(&mut wizard);
    wizard.advance_step();
    tracing::debug!("{}", wizard.step().title());
    args.fill_pet(&mut wizard);

    let receipt = service.submit_intake(&mut wizard).await?;
    println!(
        "✅ Client {} and pet {} added",
        receipt.client_id, receipt.pet_id
    );
    if receipt.signal == FormSignal::Close {
        tracing::debug!("Intake wizard closed");
    }
    Ok(())
}

async fn contact(args: &ContactArgs, service: &Service) -> Result<(), IntakeError> {
    let mut form = FormController::<ContactDraft>::new();
    args.fill(&mut form);

    if let Err(e) = service.submit_contact(&mut form).await {
        exit_with_form_error(form.error(), CONTACT_FAILURE_MESSAGE, &e);
    }
    println!("✅ Message sent successfully!");
    Ok(())
}

fn print_services() {
    println!("Services");
    for service in catalog::SERVICES.iter() {
        println!("  {:<22} {:>12}  {}", service.title, service.price.to_string(), service.description);
    }

    println!();
    println!("Bookable as");
    for service in ServiceType::ALL {
        println!("  {:<12} {}", service.as_str(), service.booking_label());
    }

    println!();
    println!("Email:     {}", catalog::CONTACT_EMAIL);
    println!("Phone:     {}", catalog::CONTACT_PHONE);
    println!("Instagram: {}", catalog::INSTAGRAM_URL);
    println!("TikTok:    {}", catalog::TIKTOK_URL);
}
