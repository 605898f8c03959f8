use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use serde::Serialize;

use college_content::config::SectionSchema;
use college_content::lead::LeadForm;
use college_content::source::from_origin;
use college_content::{AssetResolver, ContentConfig, ContentLoader};

#[derive(Parser)]
#[command(
  name = "college-content",
  about = "Resolve section content and assets for college landing pages"
)]
struct Cli {
  /// Configuration file (defaults to college_content.config.json in the current directory)
  #[arg(long, env = "COLLEGE_CONTENT_CONFIG", global = true)]
  config: Option<PathBuf>,
  /// Static directory or http(s) base URL serving content and assets
  #[arg(long, env = "COLLEGE_CONTENT_ORIGIN", default_value = "public", global = true)]
  origin: String,
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Load one section for a college
  Load { college: String, section: String },
  /// Load every configured section plus name and branding
  Page { college: String },
  /// Parse a local markdown file with a section's rules
  Parse {
    file: PathBuf,
    /// Section whose labels and delimiter apply
    #[arg(short, long)]
    section: Option<String>,
  },
  /// Probe candidate extensions for a base path
  Resolve {
    base_path: String,
    /// Extension to try, in preference order (repeatable)
    #[arg(short, long = "ext", default_values_t = ["png".to_string(), "jpg".to_string(), "jpeg".to_string(), "webp".to_string()])]
    extensions: Vec<String>,
  },
  /// Look up a college display name
  Name { college: String },
  /// Validate a registration lead
  ValidateLead {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    mobile: String,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
    )
    .init();

  let cli = Cli::parse();
  let config = match &cli.config {
    Some(path) => ContentConfig::from_path(path)?,
    None => ContentConfig::discover(&std::env::current_dir()?),
  };
  let source = from_origin(&cli.origin);

  match cli.command {
    Commands::Load { college, section } => {
      let loader = ContentLoader::new(source, config);
      print_json(&loader.load(&college, &section).await)
    }
    Commands::Page { college } => {
      let loader = ContentLoader::new(source, config);
      print_json(&loader.load_page(&college).await)
    }
    Commands::Parse { file, section } => {
      let raw = std::fs::read_to_string(&file)
        .with_context(|| format!("failed to read {}", file.display()))?;
      let schema = match section {
        Some(key) => config
          .section(&key)
          .cloned()
          .unwrap_or_else(|| SectionSchema::bare(key)),
        None => SectionSchema::bare("document"),
      };
      let parsed = schema.parser().parse_document(&raw);
      print_json(&serde_json::json!({
        "meta": parsed.meta,
        "records": parsed.records,
      }))
    }
    Commands::Resolve {
      base_path,
      extensions,
    } => {
      let resolver = AssetResolver::new(source);
      let result = resolver
        .resolve(&base_path, &extensions, config.probe_timeout())
        .await;
      print_json(&result)
    }
    Commands::Name { college } => {
      let loader = ContentLoader::new(source, config);
      println!("{}", loader.display_name(&college).await);
      Ok(())
    }
    Commands::ValidateLead {
      name,
      email,
      mobile,
    } => match LeadForm::new(name, email, mobile).validate() {
      Ok(submission) => print_json(&submission),
      Err(errors) => {
        for error in &errors.0 {
          eprintln!("{}", error);
        }
        bail!("lead form rejected with {} error(s)", errors.0.len())
      }
    },
  }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
  let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
  println!("{}", rendered);
  Ok(())
}
