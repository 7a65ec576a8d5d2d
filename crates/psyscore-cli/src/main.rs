use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use jiff::civil::Date;
use psyscore_cli::auth::AuthGate;
use psyscore_cli::commands::{self, ScoreRequest};
use psyscore_cli::config::{self, PsyscoreConfig};
use psyscore_delivery::submit::SubmissionOutcome;
use psyscore_delivery::transport::transport_for;
use psyscore_export::document::DocxGenerator;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "psyscore",
    version,
    about = "Score clinical questionnaires and deliver the result documents"
)]
struct Cli {
    /// Config file. Defaults to `<config dir>/psyscore/config.json`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log as JSON lines instead of human-readable text.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available instruments.
    List,
    /// Score a form and print the quick result.
    Score {
        #[command(flatten)]
        form: FormArgs,
        /// Print the formatted result (narrative and payload) as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Score a form, generate the result document and email it.
    Submit {
        #[command(flatten)]
        form: FormArgs,
        /// Overrides the configured output directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Write the effective config to disk, creating it if missing.
    InitConfig,
}

#[derive(Args, Debug)]
struct FormArgs {
    /// Instrument id, as shown by `psyscore list`.
    #[arg(long, short)]
    instrument: String,

    /// JSON object of form field values.
    #[arg(long)]
    form: PathBuf,

    /// Evaluation date (yyyy-mm-dd). Defaults to today.
    #[arg(long)]
    evaluated_on: Option<Date>,

    /// The user is a signed-in clinician.
    #[arg(long)]
    authorized: bool,
}

impl FormArgs {
    fn into_request(self) -> Result<ScoreRequest> {
        Ok(ScoreRequest {
            form: commands::read_form(&self.form)?,
            instrument: self.instrument,
            evaluated_on: self
                .evaluated_on
                .unwrap_or_else(|| jiff::Zoned::now().date()),
            authorized: self.authorized,
        })
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let config_path = match cli.config {
        Some(path) => path,
        None => config::config_path()?,
    };

    match cli.command {
        Command::List => {
            let (config, gate) = load(&config_path)?;
            let catalog = config.catalog()?;
            for summary in commands::list_instruments(&catalog, &gate) {
                let lock = if summary.protected { "protected" } else { "" };
                println!(
                    "{:<12} {:<22} {:<12} {lock}",
                    summary.id, summary.name, summary.template
                );
            }
        }
        Command::Score { form, json } => {
            let (config, gate) = load(&config_path)?;
            let catalog = config.catalog()?;
            let result = commands::score_form(&catalog, &gate, &form.into_request()?)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.narrative);
            }
        }
        Command::Submit { form, output_dir } => {
            let (config, gate) = load(&config_path)?;
            submit(&config, &gate, form, output_dir)?;
        }
        Command::InitConfig => {
            config::init_config(&config_path)?;
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Effective config (file plus environment) and the gate built from it.
fn load(path: &Path) -> Result<(PsyscoreConfig, AuthGate)> {
    let config = config::load_config_from(path)?;
    let gate = AuthGate::new(config.protected_instruments.iter().cloned());
    Ok((config, gate))
}

fn submit(
    config: &PsyscoreConfig,
    gate: &AuthGate,
    form: FormArgs,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let catalog = config.catalog()?;
    let generator = DocxGenerator::new(config.template_store(), config.styles.clone());
    let transport = transport_for(config.email.clone());
    let output_dir = output_dir.unwrap_or_else(|| config.output_dir.clone());

    let report = commands::submit_form(
        &catalog,
        gate,
        &form.into_request()?,
        &generator,
        transport.as_ref(),
        &output_dir,
    )?;

    if let Some(path) = &report.saved_to {
        println!("{}", path.display());
    }
    let message = report.outcome.message();
    if let SubmissionOutcome::Failed { .. } = report.outcome {
        return Err(eyre::eyre!(message));
    }
    println!("{message}");
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
