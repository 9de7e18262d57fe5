use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod protect_http;

use protect_http::HttpProtector;

#[derive(Parser)]
#[command(name = "pdflh", about = "Letterhead text-flow CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a title and body from a source document
    Ingest {
        /// Input file (text, HTML, or PDF)
        #[arg(short, long)]
        input: PathBuf,

        /// Source format (default: from the file extension)
        #[arg(long, value_enum)]
        format: Option<FormatArg>,

        /// Ingestion options JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Flow a title and body onto a letterhead template
    Generate {
        /// Template PDF file
        #[arg(short, long)]
        template: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Source document to ingest for title and body
        #[arg(short, long, conflicts_with_all = ["title", "body"])]
        source: Option<PathBuf>,

        /// Document title
        #[arg(long, required_unless_present = "source")]
        title: Option<String>,

        /// File containing the body text
        #[arg(long, required_unless_present = "source")]
        body: Option<PathBuf>,

        /// Generation options JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Identity used to pick a margin profile
        #[arg(long)]
        template_id: Option<String>,

        /// Maximum number of output pages
        #[arg(long)]
        max_pages: Option<usize>,

        /// Skip "Page i of N" stamps on multi-page output
        #[arg(long)]
        no_page_numbers: bool,

        /// Rights-protection service endpoint to POST the output through
        #[arg(long)]
        protect_url: Option<String>,
    },

    /// Show the placement zones a template declares
    Zones {
        /// Template PDF file
        #[arg(short, long)]
        template: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Html,
    Pdf,
}

impl From<FormatArg> for pdf_ingest::SourceFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Self::Text,
            FormatArg::Html => Self::Html,
            FormatArg::Pdf => Self::Pdf,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ingest {
            input,
            format,
            config,
        } => {
            let options = match config {
                Some(path) => pdf_ingest::IngestOptions::load(path).await?,
                None => pdf_ingest::IngestOptions::default(),
            };

            let document = match format {
                Some(format) => {
                    let bytes = tokio::fs::read(&input).await?;
                    pdf_ingest::ingest(&bytes, format.into(), &options)?
                }
                None => pdf_ingest::ingest_file(&input, &options).await?,
            };

            println!("Title: {}", document.title);
            println!();
            println!("{}", document.body);
        }

        Commands::Generate {
            template,
            output,
            source,
            title,
            body,
            config,
            template_id,
            max_pages,
            no_page_numbers,
            protect_url,
        } => {
            let mut options = match config {
                Some(path) => pdf_letterhead::GenerateOptions::load(path).await?,
                None => pdf_letterhead::GenerateOptions::default(),
            };
            if template_id.is_some() {
                options.template_id = template_id;
            }
            if let Some(limit) = max_pages {
                options.max_pages = limit;
            }
            if no_page_numbers {
                options.stamp_page_numbers = false;
            }

            let (title, body) = match source {
                Some(path) => {
                    let ingest_options = pdf_ingest::IngestOptions::default();
                    let document = pdf_ingest::ingest_file(&path, &ingest_options).await?;
                    (document.title, document.body)
                }
                None => {
                    // clap guarantees both when --source is absent.
                    let (Some(title), Some(body_path)) = (title, body) else {
                        anyhow::bail!("either --source or both --title and --body are required");
                    };
                    let body = tokio::fs::read_to_string(&body_path).await?;
                    (title, body)
                }
            };

            let template = pdf_letterhead::load_template(&template).await?;
            let bytes = match protect_url {
                Some(url) => {
                    let protector = HttpProtector::new(url)?;
                    pdf_letterhead::generate_protected(
                        &title, &body, &template, &options, &protector,
                    )
                    .await?
                }
                None => pdf_letterhead::generate(&title, &body, &template, &options).await?,
            };

            pdf_letterhead::save_document(&bytes, &output).await?;
            println!("Generated {} bytes → {}", bytes.len(), output.display());
        }

        Commands::Zones { template } => {
            let template = pdf_letterhead::load_template(&template).await?;
            let options = pdf_letterhead::GenerateOptions::default();
            let profile = options.margin_profiles.profile_for(None);
            let zones = pdf_letterhead::resolve_zones(&template, profile)?;

            if zones.is_empty() {
                println!("No placement zones; margin-profile layout applies.");
                return Ok(());
            }
            for (kind, zone) in [("title", &zones.title), ("body", &zones.body)] {
                match zone {
                    Some(zone) => println!(
                        "{kind}: {:?} page {} at ({}, {}) {}x{}",
                        zone.name,
                        zone.page_index,
                        zone.rect.x,
                        zone.rect.y,
                        zone.rect.width,
                        zone.rect.height
                    ),
                    None => println!("{kind}: none"),
                }
            }
        }
    }

    Ok(())
}
