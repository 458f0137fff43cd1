//! CLI entry point for inkshelf

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inkshelf::commands::resolve::ResolveArgs;

#[derive(Parser)]
#[command(name = "inkshelf")]
#[command(author = "Rene Wang")]
#[command(version = "0.1.0")]
#[command(about = "Content pipeline for an e-reader themed personal site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new essay, review or project
    New {
        /// Kind of document (essay, review, project)
        #[arg(short, long, default_value = "essay")]
        kind: String,

        /// Title of the new document
        title: String,

        /// Locale to write the document in (defaults to the site default)
        #[arg(short, long)]
        locale: Option<String>,

        /// Slug to use instead of one derived from the title
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// List site content
    List {
        /// Type of content to list (essay, post, project, category, slug)
        #[arg(default_value = "essay")]
        r#type: String,

        /// Only list this locale
        #[arg(short, long)]
        locale: Option<String>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Resolve a slug to its document
    Resolve {
        /// Slug to resolve
        slug: String,

        /// Only look in this locale
        #[arg(short, long)]
        locale: Option<String>,

        /// Pick the locale from an Accept-Language header value
        #[arg(long)]
        accept_language: Option<String>,

        /// Resolve a project instead of an essay
        #[arg(short, long)]
        project: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Generate the sitemap, robots.txt and route list
    #[command(alias = "g")]
    Generate,

    /// Check the content store for duplicate slugs
    Check,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkshelf=debug,info"
    } else {
        "inkshelf=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            inkshelf::commands::init::init_site(&target_dir)?;
            println!("Initialized empty site in {:?}", target_dir);
        }

        Commands::New {
            kind,
            title,
            locale,
            slug,
        } => {
            let shelf = inkshelf::Shelf::new(&base_dir)?;
            tracing::info!("Creating new {} with title: {}", kind, title);
            let path = inkshelf::commands::new::create_document(
                &shelf,
                &title,
                &kind,
                locale.as_deref(),
                slug.as_deref(),
            )?;
            println!("Created: {}", path.display());
        }

        Commands::List {
            r#type,
            locale,
            json,
        } => {
            let shelf = inkshelf::Shelf::new(&base_dir)?;
            inkshelf::commands::list::run(&shelf, &r#type, locale.as_deref(), json)?;
        }

        Commands::Resolve {
            slug,
            locale,
            accept_language,
            project,
            json,
        } => {
            let shelf = inkshelf::Shelf::new(&base_dir)?;
            let args = ResolveArgs {
                locale: locale.as_deref(),
                accept_language: accept_language.as_deref(),
                project,
                json,
            };
            inkshelf::commands::resolve::run(&shelf, &slug, &args)?;
        }

        Commands::Generate => {
            let shelf = inkshelf::Shelf::new(&base_dir)?;
            tracing::info!("Generating...");
            shelf.generate()?;
            println!("Generated successfully!");
        }

        Commands::Check => {
            let shelf = inkshelf::Shelf::new(&base_dir)?;
            inkshelf::commands::check::run(&shelf)?;
        }

        Commands::Clean => {
            let shelf = inkshelf::Shelf::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            shelf.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("inkshelf version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
