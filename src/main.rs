use clap::Parser;
use moodjour::application::{load_pool, run_import, ImportOptions};
use moodjour::cli::{format_import_summary, format_mood_list, Cli, Commands};
use moodjour::error::MoodjourError;
use moodjour::infrastructure::{env, FileConfig, Settings};
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

/// Target of the remote classifier's prompt/reply events
const REMOTE_LOG_TARGET: &str = "moodjour::domain::mood::remote";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.llm_debug());

    let result = run(cli);

    match result {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e.display_with_suggestions());
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(llm_debug: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if llm_debug {
        if let Ok(directive) = format!("{}=debug", REMOTE_LOG_TARGET).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), MoodjourError> {
    let (file_config, config_path) = FileConfig::discover(cli.config.as_deref())?;
    env::load_dotenv(config_path.as_deref());
    let settings = Settings::resolve(file_config, cli.command.overrides())?;

    match cli.command {
        Commands::Import { dry_run, force, .. } => {
            let options = ImportOptions {
                record_time: settings.record_time,
                force,
                dry_run,
                jobs: settings.jobs,
            };

            let report = run_import(&settings, &options, env::api_key())?;
            print!("{}", format_import_summary(&report, dry_run));
            Ok(())
        }
        Commands::Moods { .. } => {
            let pool = load_pool(&settings.csv_path, &settings.moods_file)?;
            let listing = format_mood_list(&pool);
            if pool.is_empty() {
                println!("{}", listing);
            } else {
                print!("{}", listing);
            }
            Ok(())
        }
    }
}
