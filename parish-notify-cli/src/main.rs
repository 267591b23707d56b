//! parish-notify CLI tool

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use parish_notify::config::APP_NAME;
use parish_notify::observability::{self, LogFormat, ObservabilityConfig};
use parish_notify_cli::{PlaceholdersCommand, PreviewCommand, RenderCommand, TemplateInput};

#[derive(Parser)]
#[command(name = "parish-notify")]
#[command(version)]
#[command(about = "Preview and debug parish notification templates", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fill a template's placeholders from a context file
    Render {
        /// Template text, e.g. "Hello {{entry.first_name}}"
        template: Option<String>,
        /// Read the template from a file instead
        #[arg(long, short)]
        file: Option<PathBuf>,
        /// JSON context: {"entry": {..}, "form": {..}, "payload": {..}}
        #[arg(long, short)]
        context: Option<PathBuf>,
        /// Present the result as an email body
        #[arg(long)]
        html: bool,
    },
    /// List the placeholders a template uses
    Placeholders {
        /// Template text
        template: Option<String>,
        /// Read the template from a file instead
        #[arg(long, short)]
        file: Option<PathBuf>,
    },
    /// Compose a form's notification for a stored submission
    Preview {
        /// Form slug, as configured under [forms.<slug>]
        #[arg(long)]
        form: String,
        /// Submission JSON file
        #[arg(long)]
        submission: PathBuf,
        /// Configuration file, standard locations when omitted
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    observability::init(
        &ObservabilityConfig::new(APP_NAME)
            .with_format(LogFormat::Compact)
            .with_filter(if cli.verbose { "debug" } else { "warn" }),
    )?;

    match cli.command {
        Commands::Render {
            template,
            file,
            context,
            html,
        } => {
            RenderCommand::new(TemplateInput::from_args(template, file)?, context, html).execute()?;
        }
        Commands::Placeholders { template, file } => {
            PlaceholdersCommand::new(TemplateInput::from_args(template, file)?).execute()?;
        }
        Commands::Preview {
            form,
            submission,
            config,
        } => {
            PreviewCommand::new(form, submission, config).execute().await?;
        }
    }

    Ok(())
}
