//! Content element host CLI
//!
//! Lists registered element types, prints their manifests, and renders
//! content element files to HTML.
//!
//! Usage:
//!   ce-host elements
//!   ce-host manifest FILL_BLANK
//!   ce-host render page.json --readonly

use std::path::PathBuf;

use anyhow::{Context, Result};
use ce_host::{HostConfig, RenderTreeConsumer, builtin_registry, render_elements};
use ce_sdk::{ContentElement, RenderContext, UserState};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List registered element types.
    Elements,

    /// Print the manifest of an element type as JSON.
    Manifest {
        /// Element type tag (e.g. FILL_BLANK).
        element_type: String,
    },

    /// Render a JSON array of content elements to HTML on stdout.
    Render {
        /// Path to the elements file.
        path: PathBuf,

        /// Render without interactive controls.
        #[arg(long)]
        readonly: bool,

        /// Learner responses, applied to every element, in blank order.
        #[arg(long, value_delimiter = ',')]
        responses: Vec<String>,

        /// Treat the responses as submitted and show feedback.
        #[arg(long, requires = "responses")]
        submitted: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = HostConfig::from_env().context("failed to load configuration")?;
    let registry = builtin_registry(&config).context("failed to register element types")?;
    info!(element_types = registry.len(), "element types loaded");

    match args.command {
        Command::Elements => {
            println!("{:<16} {:<24} RENDERER", "TYPE", "NAME");
            println!("{}", "-".repeat(56));
            for type_name in registry.type_names() {
                let manifest = registry.require(&type_name)?;
                println!(
                    "{:<16} {:<24} {}",
                    type_name,
                    manifest.name().unwrap_or("-"),
                    manifest.display().name()
                );
            }
        }
        Command::Manifest { element_type } => {
            let manifest = registry.require(&element_type)?;
            println!("{}", serde_json::to_string_pretty(manifest)?);
        }
        Command::Render {
            path,
            readonly,
            responses,
            submitted,
        } => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let elements: Vec<ContentElement> = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a JSON array of elements", path.display()))?;

            let mut ctx = RenderContext {
                readonly: readonly || config.readonly,
                user_state: None,
            };
            if !responses.is_empty() {
                let mut state = UserState::new(responses);
                state.submitted = submitted;
                ctx = ctx.with_user_state(state);
            }

            let consumer = match &config.templates_dir {
                Some(dir) => RenderTreeConsumer::with_templates(dir)?,
                None => RenderTreeConsumer::new(),
            };
            let html = render_elements(&registry, &consumer, &elements, &ctx)?;
            println!("{html}");
        }
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
