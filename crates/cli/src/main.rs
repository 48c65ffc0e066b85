use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use clinic_core::doctors::{DoctorQuery, DoctorSortKey, SortOrder};
use clinic_core::listing::{list_patients, search_patients, PatientSummary};
use clinic_core::{
    data_dir_from_env_value, CoreConfig, JsonFileStore, PatientResolver, PatientStore,
    ResolveError,
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic patient records CLI")]
struct Cli {
    /// Root directory of the document collections
    #[arg(long, env = "CLINIC_DATA_DIR", global = true)]
    data_dir: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortBy {
    Name,
    Experience,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a patient id and print the normalised view as JSON
    Resolve {
        /// User account or registered patient id
        patient_id: String,
    },
    /// List all patients
    List,
    /// Search patients by name, email, phone or uhid
    Search {
        /// Search term
        term: String,
    },
    /// List doctors
    Doctors {
        /// Substring of name or speciality
        #[arg(long)]
        search: Option<String>,
        /// Exact speciality
        #[arg(long)]
        speciality: Option<String>,
        #[arg(long, value_enum, default_value_t = SortBy::Name)]
        sort_by: SortBy,
        /// Sort descending
        #[arg(long)]
        desc: bool,
    },
}

fn print_patients(patients: &[PatientSummary]) {
    if patients.is_empty() {
        println!("No patients found.");
        return;
    }
    for patient in patients {
        let age = patient
            .age
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".into());
        println!(
            "ID: {}, Name: {}, UHID: {}, Age: {}, Source: {}",
            patient.id, patient.name, patient.uhid, age, patient.source
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let cfg = Arc::new(CoreConfig::new(data_dir_from_env_value(cli.data_dir))?);
    let store = Arc::new(JsonFileStore::new(cfg));
    let today = Utc::now().date_naive();

    match cli.command {
        Some(Commands::Resolve { patient_id }) => {
            let resolver = PatientResolver::new(store);
            match resolver.resolve(&patient_id).await {
                Ok(resolved) => println!("{}", serde_json::to_string_pretty(&resolved)?),
                Err(ResolveError::NotFound(id)) => eprintln!("Patient not found: {}", id),
                Err(e) => eprintln!("Error resolving patient: {}", e),
            }
        }
        Some(Commands::List) => match list_patients(store.as_ref(), today).await {
            Ok(patients) => print_patients(&patients),
            Err(e) => eprintln!("Error listing patients: {}", e),
        },
        Some(Commands::Search { term }) => {
            match search_patients(store.as_ref(), &term, today).await {
                Ok(patients) => print_patients(&patients),
                Err(e) => eprintln!("Error searching patients: {}", e),
            }
        }
        Some(Commands::Doctors {
            search,
            speciality,
            sort_by,
            desc,
        }) => {
            let query = DoctorQuery {
                search,
                speciality,
                sort_by: match sort_by {
                    SortBy::Name => DoctorSortKey::Name,
                    SortBy::Experience => DoctorSortKey::Experience,
                },
                order: if desc { SortOrder::Desc } else { SortOrder::Asc },
            };
            match store.list_doctors().await {
                Ok(doctors) => {
                    let doctors = query.filter_and_sort(doctors);
                    if doctors.is_empty() {
                        println!("No doctors found.");
                    }
                    for doctor in doctors {
                        println!(
                            "ID: {}, Name: {}, Speciality: {}, Experience: {}",
                            doctor.id,
                            doctor.name.as_deref().unwrap_or("-"),
                            doctor.speciality.as_deref().unwrap_or("-"),
                            doctor.experience.as_deref().unwrap_or("-")
                        );
                    }
                }
                Err(e) => eprintln!("Error listing doctors: {}", e),
            }
        }
        None => {
            println!("Use 'clinic --help' for available commands.");
        }
    }

    Ok(())
}
