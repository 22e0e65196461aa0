use clap::{Parser, Subcommand};
use core_types::{Gender, NewCandidate};
// Import database types directly from the database crate
use database::connection::{connect, run_migrations};
use database::repository::CandidateRepository;
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Roster candidate service.
#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Parse command-line arguments
    let cli = Cli::parse();

    let config = configuration::load_config().expect("Failed to load config.toml");

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            let port = args.port.unwrap_or(config.server.port);
            let addr = SocketAddr::new(
                config.server.host.parse().expect("Invalid server.host"),
                port,
            );
            if let Err(e) = web_server::run_server(addr).await {
                eprintln!("Error running web server: {}", e);
            }
        }
        Commands::Populate(args) => {
            let db_pool = connect(&config.database)
                .await
                .expect("Failed to connect to the database");
            run_migrations(&db_pool)
                .await
                .expect("Failed to run database migrations");
            if let Err(e) = handle_populate(args, db_pool).await {
                eprintln!("Error during populate: {}", e);
            }
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A small HTTP service for managing and searching candidate records.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the candidate HTTP API.
    Serve(ServeArgs),
    /// Replace the candidates table with synthetic test data.
    Populate(PopulateArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides the port from config.toml.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct PopulateArgs {
    /// Number of candidates to generate.
    #[arg(long, default_value_t = 50)]
    count: usize,
}

// ==============================================================================
// Populate Command Logic
// ==============================================================================

/// First/last name pools the generator samples from. Multi-word names are
/// deliberately common so the search endpoint has something to rank.
const FIRST_NAMES: &[&str] = &[
    "Ajay", "Ramesh", "Maria", "John", "Priya", "Elena", "David", "Sofia", "Rahul", "Anna",
    "Kumar", "Laura", "Peter", "Nina", "Carlos", "Fatima", "Ivan", "Grace", "Omar", "Julia",
];
const LAST_NAMES: &[&str] = &[
    "Yadav", "Singh", "Kumar", "Silva", "Smith", "Garcia", "Ivanov", "Chen", "Patel", "Novak",
    "Brown", "Rossi", "Khan", "Muller", "Santos", "Kim", "Lopez", "Weber", "Ali", "Costa",
];

/// Handles the orchestration of the populate process: clears the table, then
/// bulk-inserts `count` synthetic candidates in chunks.
async fn handle_populate(args: PopulateArgs, db_pool: sqlx::PgPool) -> anyhow::Result<()> {
    println!("Generating {} test candidates...", args.count);

    let repo = CandidateRepository::new(db_pool);

    // Clear existing data so repeated runs stay deterministic in size.
    let removed = repo.delete_all().await?;
    if removed > 0 {
        println!("Removed {} existing candidates.", removed);
    }

    let candidates = generate_candidates(args.count);

    // Set up the progress bar
    let progress_bar = ProgressBar::new(candidates.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    for chunk in candidates.chunks(100) {
        repo.bulk_insert(chunk).await?;
        progress_bar.inc(chunk.len() as u64);
    }
    progress_bar.finish_with_message("done");

    println!("Successfully added {} test candidates", args.count);
    Ok(())
}

/// Builds `count` synthetic candidates. Emails carry the record index, which
/// keeps them unique without tracking what the generator produced before.
fn generate_candidates(count: usize) -> Vec<NewCandidate> {
    let mut rng = rand::thread_rng();

    (0..count)
        .map(|i| {
            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];

            // One, two, or three word names, biased toward multi-word.
            let name = match rng.gen_range(0..3) {
                0 => first.to_string(),
                1 => format!("{} {}", first, last),
                _ => format!(
                    "{} {} {}",
                    first,
                    last,
                    LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())]
                ),
            };

            let gender = match rng.gen_range(0..3) {
                0 => Gender::Male,
                1 => Gender::Female,
                _ => Gender::Other,
            };

            let phone_number: String = (0..10)
                .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
                .collect();

            NewCandidate {
                name,
                age: rng.gen_range(22..=55),
                gender,
                email: format!("{}.{}{}@example.com", first.to_lowercase(), last.to_lowercase(), i),
                phone_number,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_candidates_have_unique_emails() {
        let candidates = generate_candidates(200);
        let emails: HashSet<&str> = candidates.iter().map(|c| c.email.as_str()).collect();
        assert_eq!(emails.len(), candidates.len());
    }

    #[test]
    fn generated_candidates_are_well_formed() {
        use validator::Validate;
        for candidate in generate_candidates(100) {
            assert!(candidate.validate().is_ok());
            assert!((22..=55).contains(&candidate.age));
            assert_eq!(candidate.phone_number.len(), 10);
            assert!(!candidate.name.is_empty());
        }
    }
}
