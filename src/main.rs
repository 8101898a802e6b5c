// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, warn, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use cutup::app_config::{self, Config};
use cutup::app_controller::Controller;
use cutup::catalog::{BookCatalog, CatalogSource};
use cutup::errors::CatalogError;
use cutup::file_utils::FileManager;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum NumerationAction {
    /// Rename `<name>` to `<number> <name>`
    Add,
    /// Rename `<number> <name>` back to `<name>`
    Remove,
}

#[derive(Subcommand, Debug)]
enum CatalogCommand {
    /// Validate a book catalog JSON file and store it as the language cache
    Import {
        /// JSON object mapping "01".."66" to book names
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the cached catalog for the language
    Show,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print verse markers of a video file or of every video in a directory
    Markers {
        /// Input video file or directory to process
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,

        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Add or remove book number prefixes on directory entries
    Numerate {
        #[arg(value_enum)]
        action: NumerationAction,

        /// Directory holding one entry per book
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },

    /// Manage cached book catalogs
    #[command(subcommand)]
    Catalog(CatalogCommand),

    /// Print the height of the first video stream
    Height {
        #[arg(value_name = "VIDEO")]
        video: PathBuf,
    },

    /// Print general container information as JSON
    Format {
        #[arg(value_name = "VIDEO")]
        video: PathBuf,
    },

    /// Generate shell completions for cutup
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// cutup - verse markers from publication videos
#[derive(Parser, Debug)]
#[command(name = "cutup")]
#[command(version)]
#[command(about = "Verse chapter markers from Bible reading videos")]
#[command(long_about = "cutup reads the chapter markers of Bible reading videos and turns
titles like 'Gén. 1:1' into verse markers named after the book.

EXAMPLES:
    cutup catalog import lang-S.json          # Cache the Spanish book names
    cutup markers nwt_01_Ge_S_01_r720P.mp4    # Markers of one video as JSON
    cutup markers -o markers.json videos/     # Markers of a whole folder
    cutup numerate add books/                 # 'Génesis' -> '01 Génesis'
    cutup numerate remove books/              # '01 Génesis' -> 'Génesis'
    cutup completions bash > cutup.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: PathBuf,

    /// Publication language code (e.g. 'S', 'E')
    #[arg(short = 'L', long, global = true)]
    language: Option<String>,

    /// Use this catalog file instead of the language cache
    #[arg(long, value_name = "FILE", global = true)]
    catalog: Option<PathBuf>,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,
}

/// Catalog source for a CLI that never goes to the network
struct CacheOnly;

impl CatalogSource for CacheOnly {
    fn fetch(&self, language: &str) -> Result<BookCatalog, CatalogError> {
        Err(CatalogError::Source(format!(
            "no cached catalog for language '{}', import one with `cutup catalog import FILE`",
            language
        )))
    }
}

// @struct: Custom logger implementation, filtered by `log::max_level`
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Info until the config is loaded
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "cutup", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level((&level).into());
    }

    let mut config = Config::load_or_create(&cli.config_path)?;
    if let Some(language) = &cli.language {
        config.language = language.clone();
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    } else {
        log::set_max_level((&config.log_level).into());
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Markers { input_path, output } => {
            let catalog = resolve_catalog(&controller, cli.catalog.as_ref())?;
            let batch = controller.markers(&input_path, &catalog).await?;
            let json = serde_json::to_string_pretty(&batch.markers)
                .context("Failed to serialize markers")?;

            match output {
                Some(path) => {
                    FileManager::write_to_file(&path, &json)?;
                    info!("Wrote {} markers to {:?}", batch.markers.len(), path);
                }
                None => println!("{}", json),
            }
        }
        Commands::Numerate { action, dir } => {
            let catalog = resolve_catalog(&controller, cli.catalog.as_ref())?;
            match action {
                NumerationAction::Add => controller.add_numeration(&dir, &catalog)?,
                NumerationAction::Remove => controller.remove_numeration(&dir, &catalog)?,
            };
        }
        Commands::Catalog(CatalogCommand::Import { file }) => {
            let catalog = BookCatalog::load_from_file(&file)?;
            catalog.validate()?;
            let language = &controller.config().language;
            let work_dir = controller.config().work_dir();
            FileManager::ensure_dir(&work_dir)?;
            let path = catalog.save_cached(&work_dir, language)?;
            info!("Cached {} books for language {} at {:?}", catalog.len(), language, path);
        }
        Commands::Catalog(CatalogCommand::Show) => {
            let catalog = resolve_catalog(&controller, cli.catalog.as_ref())?;
            for (number, name) in catalog.iter() {
                println!("{} {}", number, name);
            }
        }
        Commands::Height { video } => {
            match controller.video_height(&video).await? {
                Some(height) => println!("{}", height),
                None => warn!("No video height found in {:?}", video),
            }
        }
        Commands::Format { video } => {
            let format = controller.video_format(&video).await?;
            println!("{}", serde_json::to_string_pretty(&format)?);
        }
        Commands::Completions { .. } => unreachable!("handled before loading the config"),
    }

    Ok(())
}

// Catalog from --catalog when given, otherwise from the language cache
fn resolve_catalog(controller: &Controller, catalog_file: Option<&PathBuf>) -> Result<BookCatalog> {
    let catalog = match catalog_file {
        Some(path) => BookCatalog::load_from_file(path)?,
        None => controller.load_catalog(&CacheOnly)?,
    };
    catalog.validate()?;

    if catalog.is_empty() {
        return Err(anyhow!("Book catalog is empty"));
    }
    Ok(catalog)
}
