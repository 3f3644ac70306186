use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use importer::{
    ImporterError, MemoryStore, PgSeedStore, SeedStore, Seeder, SourceData, SourceValidator,
};
use storage::{ConnectionProfile, Database};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "crm-seed")]
#[command(about = "Donor CRM seed importer: wipes donor data and reloads it", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long, env = "DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// `DEV` disables TLS on the database connection
    #[arg(long, env = "DEV_MODE", global = true)]
    dev_mode: Option<String>,

    #[arg(long, default_value = ConnectionProfile::DEFAULT_NAME, global = true)]
    profile: String,

    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reset the donor tables and import donors and donations
    Run(RunArgs),
    /// Parse and check the source data without touching the database
    Validate(SourceArgs),
}

#[derive(Args, Default)]
struct SourceArgs {
    /// Donor JSON array to use instead of the embedded one
    #[arg(long)]
    donors: Option<PathBuf>,

    /// Donation JSON array to use instead of the embedded one
    #[arg(long)]
    donations: Option<PathBuf>,
}

#[derive(Args, Default)]
struct RunArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Apply storage migrations before seeding
    #[arg(long)]
    migrate: bool,

    /// Run every phase against an in-memory store
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "crm_seed={},importer={},storage={}",
                    log_level, log_level, log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match execute(cli).await {
        Ok(()) => {
            tracing::info!("Done!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Seed failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli) -> Result<(), ImporterError> {
    let command = cli
        .command
        .unwrap_or_else(|| Commands::Run(RunArgs::default()));

    match command {
        Commands::Validate(source) => handle_validate(source).await,
        Commands::Run(args) => {
            let profile = ConnectionProfile::from_dev_mode(cli.profile, cli.dev_mode.as_deref());
            handle_run(args, cli.database_url.as_deref(), &profile).await
        }
    }
}

async fn handle_validate(source: SourceArgs) -> Result<(), ImporterError> {
    let data = SourceData::load(source.donors.as_deref(), source.donations.as_deref()).await?;

    tracing::info!("Validating source data...");
    let report = SourceValidator::validate(&data)?;
    report.log_warnings();
    tracing::info!(
        "✓ Validation successful ({} warning(s))",
        report.warnings.len()
    );

    Ok(())
}

async fn handle_run(
    args: RunArgs,
    database_url: Option<&str>,
    profile: &ConnectionProfile,
) -> Result<(), ImporterError> {
    let data = SourceData::load(
        args.source.donors.as_deref(),
        args.source.donations.as_deref(),
    )
    .await?;
    SourceValidator::inspect(&data).log();

    if args.dry_run {
        tracing::info!("Dry run: importing into an in-memory store");
        let store = MemoryStore::new();
        seed(&store, &data).await?;
        return Ok(());
    }

    let database_url = database_url.ok_or_else(|| {
        ImporterError::ConfigError("DATABASE_URL is required unless --dry-run is set".to_string())
    })?;

    tracing::info!("Connecting to database...");
    let db = Database::connect(database_url, profile).await?;

    if args.migrate {
        tracing::info!("Running database migrations");
        db.run_migrations().await?;
    }

    let store = PgSeedStore::new(db.pool());
    let result = seed(&store, &data).await;
    db.close().await;

    result
}

async fn seed(store: &dyn SeedStore, data: &SourceData) -> Result<(), ImporterError> {
    let summary = Seeder::new(store).run(data).await?;

    if summary.donor_errors + summary.donation_errors > 0 {
        tracing::warn!(
            "{} donor(s) and {} donation(s) failed; see errors above",
            summary.donor_errors,
            summary.donation_errors
        );
    }

    Ok(())
}
