mod acquire;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use suitegen_config::{Config, EmitSettings};
use suitegen_engine::{Compare, InputSource, LineNormalization, SpecStyle, io, pipeline};

use acquire::ClonedCorpus;

#[derive(Parser)]
#[command(name = "suitegen")]
#[command(about = "Generate Lua test specs from a YAML test-suite corpus")]
#[command(version)]
struct Cli {
    /// Log every fixture file as it is read
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a spec file for every case in the corpus
    Generate(GenerateArgs),

    /// Create a config file
    Init {
        /// Checkout of the YAML test suite
        #[arg(long)]
        corpus: PathBuf,

        /// Where `generate` writes the spec
        #[arg(long)]
        output: PathBuf,

        /// Config file to write (default: ~/.config/suitegen/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Replace an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Config file to read instead of the default one
    #[arg(long)]
    config: Option<PathBuf>,

    /// Corpus directory (the one holding `src/`)
    #[arg(long, conflicts_with = "clone")]
    corpus: Option<PathBuf>,

    /// Clone the corpus from this git URL into a temporary directory
    #[arg(long)]
    clone: Option<String>,

    /// Spec file to write
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// embedded or file
    #[arg(long)]
    input: Option<InputSource>,

    /// assertions or listing
    #[arg(long)]
    style: Option<SpecStyle>,

    /// leading or trailing
    #[arg(long)]
    normalize: Option<LineNormalization>,

    /// Check tree or json first when a case has both
    #[arg(long)]
    compare: Option<Compare>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::Init {
            corpus,
            output,
            config,
            force,
        } => init(corpus, output, config, force),
    }
}

fn load_config(path: Option<&Path>) -> Result<Option<Config>> {
    match path {
        Some(path) => {
            let config = Config::load_from_path(path)?
                .with_context(|| format!("Config file '{}' not found", path.display()))?;
            Ok(Some(config))
        }
        None => Ok(Config::load()?),
    }
}

fn generate(args: GenerateArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    if let Some(config) = &config {
        log::debug!("Using config for corpus {}", config.corpus_root.display());
    }

    let mut settings: EmitSettings = config
        .as_ref()
        .map(|config| config.emit.clone())
        .unwrap_or_default();
    if let Some(input) = args.input {
        settings.input = input;
    }
    if let Some(style) = args.style {
        settings.style = style;
    }
    if let Some(normalize) = args.normalize {
        settings.normalization = normalize;
    }
    if let Some(compare) = args.compare {
        settings.compare = compare;
    }

    if args.clone.is_some() && settings.input == InputSource::File {
        bail!("--clone cannot be combined with file input: the checkout is removed after the run");
    }

    let output_path = args
        .output
        .or_else(|| config.as_ref().map(|config| config.output_path.clone()))
        .with_context(|| {
            format!(
                "No output path: pass --output or create a config file at {}",
                Config::config_path().display()
            )
        })?;

    let cloned = args
        .clone
        .as_deref()
        .map(ClonedCorpus::fetch)
        .transpose()?;
    let corpus_root = match (&cloned, args.corpus) {
        (Some(cloned), _) => cloned.path().to_path_buf(),
        (None, Some(corpus)) => corpus,
        (None, None) => config
            .as_ref()
            .map(|config| config.corpus_root.clone())
            .with_context(|| {
                format!(
                    "No corpus: pass --corpus or --clone, or create a config file at {}",
                    Config::config_path().display()
                )
            })?,
    };

    io::validate_corpus_dir(&corpus_root)
        .with_context(|| format!("Corpus path '{}' is invalid", corpus_root.display()))?;

    let options = settings.to_options(&corpus_root);
    let generated = pipeline::generate(&options)
        .with_context(|| format!("Failed to load corpus at {}", corpus_root.display()))?;

    io::write_output(&output_path, &generated.emission.spec)?;

    println!(
        "{} test cases written to {}",
        generated.emission.report.emitted,
        output_path.display()
    );
    let diagnostics = &generated.diagnostics;
    if !diagnostics.is_empty() {
        println!(
            "{} diagnostics: {} unrecognized fields, {} skipped cases",
            diagnostics.len(),
            diagnostics.unrecognized_fields().count(),
            diagnostics.skipped_cases().count()
        );
    }
    Ok(())
}

fn init(corpus: PathBuf, output: PathBuf, config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let target = config_path.clone().unwrap_or_else(Config::config_path);
    if target.exists() && !force {
        bail!(
            "Config file '{}' already exists (use --force to replace it)",
            target.display()
        );
    }

    let config = Config {
        corpus_root: corpus,
        output_path: output,
        emit: EmitSettings::default(),
    };
    match config_path {
        Some(path) => config.save_to_path(path)?,
        None => config.save()?,
    }
    println!("Config written to {}", target.display());
    Ok(())
}
