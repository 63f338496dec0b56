use clap::{Parser, Subcommand, ValueEnum};
use label_verify_lib::commands::{config as config_cmd, health, verify};
use label_verify_lib::utils::logging::init_tracing;
use label_verify_lib::AggregationPolicy;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;

#[derive(Parser)]
#[command(name = "label-verify")]
#[command(about = "Check beverage label text against application form data")]
#[command(version)]
struct Cli {
    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a label image and verify it against form values
    Verify {
        /// Label image (png, jpg, jpeg)
        #[arg(long)]
        image: PathBuf,
        #[command(flatten)]
        form: FormArgs,
        #[arg(long, value_enum, default_value_t = Policy::All)]
        policy: Policy,
    },
    /// Verify already-recognized label text
    VerifyText {
        /// Text file, or "-" for stdin
        #[arg(long)]
        text: String,
        #[command(flatten)]
        form: FormArgs,
        #[arg(long, value_enum, default_value_t = Policy::All)]
        policy: Policy,
    },
    /// Verify a JSON array of {id, form, text} cases
    Batch {
        /// Cases file, or "-" for stdin
        #[arg(long)]
        cases: String,
        #[arg(long, value_enum, default_value_t = Policy::All)]
        policy: Policy,
    },
    /// Check configuration and OCR provider availability
    Check,
    /// Inspect or create the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct FormArgs {
    /// Brand name from the application form
    #[arg(long)]
    brand: String,
    /// Product class/type from the application form
    #[arg(long = "product-type")]
    product_type: String,
    /// Alcohol content (percent ABV) from the application form
    #[arg(long)]
    abv: String,
    /// Net contents, e.g. "750 mL"
    #[arg(long)]
    net: Option<String>,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the config file path
    Path,
    /// Write the default configuration
    Init {
        #[arg(long)]
        force: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    All,
    Required,
    Transport,
}

impl From<Policy> for AggregationPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::All => AggregationPolicy::AllMatch,
            Policy::Required => AggregationPolicy::RequiredFieldsMatch,
            Policy::Transport => AggregationPolicy::TransportSuccess,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<bool, String> {
    let manager = config_cmd::init_config_manager(cli.config)?;
    let config = config_cmd::load_config(&manager)?;
    init_tracing(&config.logging)?;

    match cli.command {
        Commands::Verify { image, form, policy } => {
            let form = verify::build_form(&form.brand, &form.product_type, &form.abv, form.net.as_deref())
                .map_err(|e| e.to_string())?;
            verify::verify_image(&config, &image, &form, policy.into(), cli.json).await
        }
        Commands::VerifyText { text, form, policy } => {
            let form = verify::build_form(&form.brand, &form.product_type, &form.abv, form.net.as_deref())
                .map_err(|e| e.to_string())?;
            verify::verify_text(&config, &text, &form, policy.into(), cli.json)
        }
        Commands::Batch { cases, policy } => {
            verify::verify_batch(&config, &cases, policy.into(), cli.json)
        }
        Commands::Check => {
            let config_for_checks = config.clone();
            let results = tokio::task::spawn_blocking(move || health::run_checks(&manager, &config_for_checks))
                .await
                .map_err(|e| format!("Check task failed: {}", e))?;
            if cli.json {
                let value: Vec<_> = results
                    .iter()
                    .map(|r| serde_json::json!({ "name": r.name, "ok": r.ok, "detail": r.detail }))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&value).map_err(|e| e.to_string())?);
            } else {
                println!("{}", health::render_checks(&results));
            }
            Ok(results.iter().all(|r| r.ok))
        }
        Commands::Config { action } => {
            match action {
                ConfigAction::Show => println!("{}", config_cmd::show_config(&manager)?),
                ConfigAction::Path => println!("{}", config_cmd::get_config_path(&manager)),
                ConfigAction::Init { force } => println!("{}", config_cmd::init_config(&manager, force)?),
            }
            Ok(true)
        }
    }
}
