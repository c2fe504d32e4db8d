mod cache;
mod config;
mod errors;
mod fetch;
mod llm_client;
mod loader;
mod pipeline;
mod render;

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::fetch::fetch_job_description;
use crate::llm_client::LlmClient;
use crate::pipeline::Pipeline;

/// Tailors a resume to a job description with a four-stage LLM pipeline,
/// producing a PDF, a markdown copy, and a JSON analysis report.
#[derive(Debug, Parser)]
#[command(name = "tailor", version, about)]
struct Cli {
    /// Path to the resume (PDF or plain text / markdown)
    resume: PathBuf,

    /// Job posting URL to fetch; omit to paste the description on stdin
    #[arg(long)]
    url: Option<String>,

    /// Directory where output artifacts are written
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tailor v{}", env!("CARGO_PKG_VERSION"));

    if !cli.resume.exists() {
        bail!("resume not found: {}", cli.resume.display());
    }
    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating output directory {}", cli.out_dir.display()))?;

    let (job_description, job_source) = match &cli.url {
        Some(url) => (fetch_job_description(url).await?, url.clone()),
        None => {
            eprintln!("Paste the job description, then press Ctrl-D:");
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("reading job description from stdin")?;
            (input.trim().to_string(), "Manual input".to_string())
        }
    };
    if job_description.is_empty() {
        bail!("job description is empty");
    }

    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let mut pipeline = Pipeline::new(Arc::new(llm), cli.out_dir.clone());
    let output = pipeline
        .run(&job_description, &cli.resume, &job_source)
        .await?;

    println!();
    println!("Run complete.");
    println!(
        "  Match:      {}%",
        output.match_analysis.overall_match_percentage
    );
    println!(
        "  Candidacy:  {} ({:?} likelihood to proceed)",
        output.evaluation.candidacy_score, output.evaluation.likelihood_to_proceed
    );
    println!("  PDF:        {}", output.pdf_path.display());
    println!("  Markdown:   {}", output.markdown_path.display());
    println!("  Report:     {}", output.report_path.display());

    Ok(())
}
