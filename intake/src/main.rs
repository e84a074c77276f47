//! Command-line front end for the clinic intake flows.
//!
//! Every subcommand prints one JSON document to stdout. A rejected
//! submission still prints its errors but exits with status 1.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clinic_intake::config::IntakeSettings;
use clinic_intake::domain::calculators::{
    CaloriesInput, FoodCalorieTable, Mobility, RecoveryAnswers, calories_report, recommend_program,
};
use clinic_intake::domain::validators::parse_date;
use clinic_intake::domain::{
    AvailabilityCalendar, CertificateRegistry, DoctorDirectory, FieldSet, FormContext,
    IntakeSession, ServiceCatalogue, SpecializationFilter, SubmissionService,
};
use clinic_intake::outbound::SimulatedEmailRegistry;
use clinic_reference::ReferenceData;
use color_eyre::eyre::{Context, Report, Result, eyre};
use mockable::{Clock, DefaultClock};
use ortho_config::OrthoConfig;
use serde::Serialize;
use serde_json::json;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `clinic-intake` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "clinic-intake",
    about = "Validate clinic website forms and run its calculators",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Submit a newsletter, registration, or booking form.
    Submit {
        /// Form context: newsletter, registration, or booking.
        #[arg(long)]
        context: FormContext,
        /// JSON object of field values. Read from stdin when neither this
        /// nor `--field` is given.
        #[arg(long = "fields", value_name = "path")]
        fields_path: Option<PathBuf>,
        /// Single field as `key=value`; applied over `--fields`.
        #[arg(long = "field", value_name = "key=value", value_parser = parse_field)]
        field: Vec<(String, String)>,
    },
    /// List the bookable services.
    Services,
    /// Compare calories walked off with calories eaten.
    Calories {
        /// Kilometres walked; unparsable values count as zero.
        #[arg(long, allow_hyphen_values = true, default_value = "0")]
        distance: String,
        /// Food key, e.g. `burger` or `chicken-breast`.
        #[arg(long)]
        food: String,
        /// Units eaten; unparsable values count as zero.
        #[arg(long, allow_hyphen_values = true, default_value = "1")]
        quantity: String,
    },
    /// Recommend a rehabilitation programme.
    Recommend {
        /// Pain level on a 1-10 scale; values outside it are clamped.
        #[arg(long, allow_hyphen_values = true)]
        pain: i64,
        /// Mobility: Limited, Moderate, or Good.
        #[arg(long)]
        mobility: Mobility,
    },
    /// Browse the doctor directory.
    Doctors {
        /// Specialization key, or `all`.
        #[arg(long, default_value = "all")]
        specialization: String,
        /// Autocomplete doctor names containing this text instead.
        #[arg(long)]
        search: Option<String>,
    },
    /// Show consultation slots for a day.
    Slots {
        /// Day as `YYYY-MM-DD`.
        #[arg(long)]
        date: String,
    },
    /// Check accreditation certificates.
    Certificates {
        /// Check a single certificate id instead of listing all.
        #[arg(long)]
        id: Option<String>,
    },
}

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::parse();
    let settings = IntakeSettings::load_from_iter([OsString::from("clinic-intake")])
        .map_err(|err| eyre!("failed to load intake settings: {err}"))?;
    let reference = settings
        .load_reference()
        .map_err(|err| Report::new(err).wrap_err("failed to load reference catalogue"))?;
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let today = clock.utc().date_naive();

    match args.command {
        Command::Submit {
            context,
            fields_path,
            field,
        } => {
            let fields = read_fields(fields_path.as_deref(), field)?;
            submit(&settings, &reference, clock, context, &fields)
        }
        Command::Services => {
            let catalogue = catalogue(&reference)?;
            print_json(&catalogue.services())?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Calories {
            distance,
            food,
            quantity,
        } => {
            let table = FoodCalorieTable::from_reference(&reference);
            let input = CaloriesInput::from_form(&distance, food, &quantity);
            print_json(&calories_report(&table, &input))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Recommend { pain, mobility } => {
            let answers = RecoveryAnswers::new(pain, mobility);
            print_json(&recommend_program(&answers))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Doctors {
            specialization,
            search,
        } => {
            let directory = DoctorDirectory::from_reference(&reference);
            match search {
                Some(term) => print_json(&directory.suggest(&term))?,
                None => {
                    let filter: SpecializationFilter = specialization
                        .parse()
                        .unwrap_or(SpecializationFilter::All);
                    print_json(&directory.filter(&filter))?;
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Slots { date } => {
            let date = parse_day(&date)?;
            let calendar = AvailabilityCalendar::new(today)?;
            print_json(&json!({
                "date": date,
                "slots": calendar.slots_for(date)?,
            }))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Certificates { id } => {
            let registry = CertificateRegistry::from_reference(&reference)
                .map_err(|err| eyre!("invalid certificate catalogue: {err}"))?;
            match id {
                Some(id) => {
                    let valid = registry.is_valid(&id, today);
                    print_json(&json!({ "id": id, "valid": valid }))?;
                }
                None => print_json(&registry.statuses(today))?,
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn submit(
    settings: &IntakeSettings,
    reference: &ReferenceData,
    clock: Arc<dyn Clock>,
    context: FormContext,
    fields: &FieldSet,
) -> Result<ExitCode> {
    let registry = Arc::new(SimulatedEmailRegistry::from_reference(
        reference,
        settings.email_check_delay(),
    ));
    let service = SubmissionService::new(
        registry,
        clock,
        Arc::new(catalogue(reference)?),
        settings.policy(),
    );
    let session = IntakeSession::new();

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build intake runtime")?;
    let result = runtime.block_on(service.submit(&session, context, fields));

    match result {
        Ok(outcome) => {
            print_json(&json!({
                "status": "completed",
                "result": outcome,
                "patientsServed": session.completed_submissions(),
            }))?;
            Ok(ExitCode::SUCCESS)
        }
        Err(rejection) => {
            print_json(&json!({
                "status": "rejected",
                "notice": rejection.notice(),
                "errors": rejection.errors(),
            }))?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn catalogue(reference: &ReferenceData) -> Result<ServiceCatalogue> {
    ServiceCatalogue::from_reference(reference)
        .map_err(|err| eyre!("invalid service catalogue: {err}"))
}

fn read_fields(path: Option<&Path>, overrides: Vec<(String, String)>) -> Result<FieldSet> {
    let base: FieldSet = match path {
        Some(path) => {
            let raw = fs::read(path)
                .with_context(|| format!("failed to read fields at {}", path.display()))?;
            serde_json::from_slice(&raw)
                .with_context(|| format!("failed to parse fields at {}", path.display()))?
        }
        None if overrides.is_empty() => {
            let mut raw = Vec::new();
            io::stdin()
                .read_to_end(&mut raw)
                .wrap_err("failed to read fields from stdin")?;
            serde_json::from_slice(&raw).wrap_err("failed to parse fields from stdin")?
        }
        None => FieldSet::new(),
    };

    let mut fields = base;
    fields.extend(overrides);
    Ok(fields)
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.trim().to_owned(), value.to_owned()))
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("field must be key=value, got '{raw}'"))
}

fn parse_day(raw: &str) -> Result<NaiveDate> {
    parse_date(raw).ok_or_else(|| eyre!("'{raw}' is not a YYYY-MM-DD date"))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).wrap_err("failed to render output")?;
    println!("{rendered}");
    Ok(())
}
