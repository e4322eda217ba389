mod options;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tonecast_core::catalog;
use tonecast_core::{
    load_config, load_default_config, validate_config, AudioConverter, Config, ConversionRequest,
    FfmpegEngine,
};

use options::collect_raw_options;

/// Command-line arguments for the tonecast tool.
#[derive(Parser, Debug)]
#[command(name = "tonecast")]
#[command(version)]
#[command(about = "Convert audio files with ffmpeg, using only validated settings")]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "TONECAST_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert one audio file
    Convert(ConvertArgs),
    /// List supported target formats and the settings they accept
    Formats {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that ffmpeg can be executed
    Check,
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Input audio file
    input: PathBuf,

    /// Existing directory for the converted file
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Target format (mp3, aac, wav, flac, m4a, wma)
    #[arg(short, long)]
    format: String,

    /// Audio codec
    #[arg(long)]
    codec: Option<String>,

    /// Bitrate, e.g. 192k
    #[arg(long)]
    bit_rate: Option<String>,

    /// Sample rate in Hz
    #[arg(long)]
    sample_rate: Option<String>,

    /// Channel count, or mono/stereo
    #[arg(long)]
    channels: Option<String>,

    /// Volume adjustment in dB, e.g. -3 or +6dB
    #[arg(long, allow_hyphen_values = true)]
    volume: Option<String>,

    /// Raw options as a JSON object; individual flags take precedence
    #[arg(long)]
    options: Option<String>,

    /// Print the ffmpeg command instead of running it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load(cli.config.as_deref())?;

    match cli.command {
        Command::Convert(args) => convert(config, args),
        Command::Formats { json } => {
            print_formats(json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => {
            let engine = FfmpegEngine::new(config.engine);
            engine.validate().context("ffmpeg is not usable")?;
            println!("ffmpeg available at {}", engine.config().ffmpeg_path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load(path: Option<&std::path::Path>) -> Result<Config> {
    let config = match path {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => load_default_config().context("Failed to load default configuration")?,
    };

    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}

fn convert(config: Config, args: ConvertArgs) -> Result<ExitCode> {
    let raw_options = collect_raw_options(
        args.options.as_deref(),
        [
            ("codec", args.codec),
            ("bit_rate", args.bit_rate),
            ("sample_rate", args.sample_rate),
            ("channels", args.channels),
            ("volume", args.volume),
        ],
    )?;

    let request = ConversionRequest::new(args.input, args.output_dir, args.format)
        .with_options(raw_options);
    let converter = AudioConverter::with_config(config.engine);

    if args.dry_run {
        let prepared = converter.prepare(&request)?;
        println!("{}", prepared.command);
        return Ok(ExitCode::SUCCESS);
    }

    let result = converter.convert_with_callbacks(
        &request,
        |message| println!("{}", message),
        |message| eprintln!("{}", message),
    );

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_formats(json: bool) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(catalog::formats())
            .context("Failed to serialize format catalog")?;
        println!("{}", rendered);
        return Ok(());
    }

    for spec in catalog::formats() {
        let sample_rates: Vec<String> = spec.sample_rates.iter().map(u32::to_string).collect();
        let channels: Vec<String> = spec.channels.iter().map(u8::to_string).collect();
        println!(
            "{:<5} codecs: {}  bitrates: {}  sample rates: {}  channels: {}  volume: {}..{} dB",
            spec.name,
            spec.codecs.join(", "),
            spec.bitrates.join(", "),
            sample_rates.join(", "),
            channels.join(", "),
            spec.volume.min_db,
            spec.volume.max_db,
        );
    }
    Ok(())
}
