use anyhow::{Context, Result};
use cast_code_chunker::{Chunker, ChunkerConfig, Language, Measure, Segment};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "cast-chunk")]
#[command(about = "Split source code into syntax-aware, size-bounded segments", long_about = None)]
#[command(version)]
struct Cli {
    /// File to chunk; reads stdin when omitted or "-"
    path: Option<PathBuf>,

    /// Language of the input (detected from the file extension when omitted)
    #[arg(short, long)]
    language: Option<Language>,

    /// Maximum segment size, in units of the selected measure
    #[arg(short = 's', long)]
    max_size: Option<usize>,

    /// Overlap between neighbouring segments, as a percentage (0-50)
    #[arg(short, long)]
    overlap: Option<f64>,

    /// Size measure: words, bytes or lines
    #[arg(short, long)]
    measure: Option<Measure>,

    /// TOML file with chunker settings; flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print chunking statistics to stderr
    #[arg(long)]
    stats: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let config = resolve_config(&cli)?;
    let chunker = Chunker::new(config).context("Invalid chunker configuration")?;

    let segments = match cli.path.as_deref() {
        Some(path) if path != Path::new("-") => chunker
            .chunk_file(path)
            .with_context(|| format!("Failed to chunk {}", path.display()))?,
        _ => {
            let mut source = String::new();
            std::io::stdin()
                .read_to_string(&mut source)
                .context("Failed to read stdin")?;
            chunker
                .chunk(&source)
                .context("Failed to chunk stdin (pass --language for piped input)")?
        }
    };
    log::debug!("Produced {} segments", segments.len());

    if cli.stats {
        let stats = chunker.stats(&segments)?;
        eprintln!("{stats}");
    }

    println!("{}", render(&segments, cli.pretty)?);
    Ok(())
}

/// Defaults, then the config file, then command-line flags
fn resolve_config(cli: &Cli) -> Result<ChunkerConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ChunkerConfig::default(),
    };

    if let Some(language) = cli.language {
        config.language = Some(language);
    }
    if let Some(max_size) = cli.max_size {
        config.max_size = max_size;
    }
    if let Some(overlap) = cli.overlap {
        config.overlap_percent = overlap;
    }
    if let Some(measure) = cli.measure.clone() {
        config.measure = measure;
    }

    Ok(config)
}

fn load_config(path: &Path) -> Result<ChunkerConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: ChunkerConfig = toml::from_str(&raw)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

fn render(segments: &[Segment], pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(segments)?
    } else {
        serde_json::to_string(segments)?
    };
    Ok(json)
}
