// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use vttsrt::app_config::{self, Config, MarkupMode};
use vttsrt::Controller;

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

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert every caption file under a directory
    Batch(BatchArgs),

    /// Generate shell completions for vttsrt
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory to scan for caption files
    #[arg(value_name = "DIR")]
    input_dir: PathBuf,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,
}

/// Options shared by every command
#[derive(Args, Debug)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "vttsrt.json", global = true)]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Only strip tags that close on the same line
    #[arg(long, global = true)]
    strict_markup: bool,

    /// Never prompt; accept default filenames
    #[arg(short, long, global = true)]
    yes: bool,
}

/// vttsrt - Convert auto-generated WebVTT captions to SRT
///
/// Strips caption markup, collapses rolling-caption repetition and writes
/// numbered SRT blocks.
#[derive(Parser, Debug)]
#[command(name = "vttsrt")]
#[command(version)]
#[command(about = "Convert auto-generated WebVTT captions to SRT subtitles")]
#[command(long_about = "vttsrt converts auto-transcribed .vtt caption files to .srt subtitles.

EXAMPLES:
    vttsrt                                   # Prompt for input and output names
    vttsrt lecture                           # Convert lecture.vtt, prompt for output (default lecture.srt)
    vttsrt lecture.vtt talk.srt              # Explicit input and output
    vttsrt -y lecture                        # Convert lecture.vtt to lecture.srt without prompting
    vttsrt --strict-markup notes.vtt         # Keep stray '<' characters in captions
    vttsrt batch ./captions -f               # Convert a whole directory, overwriting outputs
    vttsrt completions bash > vttsrt.bash    # Generate bash completions

CONFIGURATION:
    Settings are read from vttsrt.json when it exists. A different file can be
    given with --config-path. Command line flags override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input caption file (.vtt is appended when missing)
    #[arg(value_name = "INPUT")]
    input: Option<String>,

    /// Output subtitle file (.srt is appended when missing)
    #[arg(value_name = "OUTPUT")]
    output: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

// @struct: Custom logger implementation, filtered by the global max level
struct CustomLogger;

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        log::set_boxed_logger(Box::new(CustomLogger))?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI colour code for log level
    fn get_color_for_level(level: Level) -> &'static str {
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
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "vttsrt", &mut std::io::stdout());
        return Ok(());
    }

    eprintln!(
        "vttsrt {}: convert auto-transcribed .vtt captions to .srt subtitles\n\
         Usage: vttsrt [source.vtt] [target.srt]\n\
         Press Ctrl+C to abort.",
        env!("CARGO_PKG_VERSION")
    );

    let config = load_config(&cli.common)?;
    let controller = Controller::with_config(config)?;

    match cli.command {
        Some(Commands::Batch(args)) => {
            let summary = controller.run_folder(&args.input_dir, args.force_overwrite)?;
            if summary.failed > 0 {
                return Err(anyhow::anyhow!("{} file(s) failed to convert", summary.failed));
            }
            Ok(())
        }
        _ => run_convert(&controller, cli.input.as_deref(), cli.output.as_deref()),
    }
}

// Config file first, then command line overrides
fn load_config(options: &CommonArgs) -> Result<Config> {
    let mut config = Config::load(&options.config_path)
        .with_context(|| format!("Failed to load config: {:?}", options.config_path))?;

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    if options.strict_markup {
        config.markup_mode = MarkupMode::Strict;
    }

    if options.yes {
        config.interactive = false;
    }

    log::set_max_level(config.log_level.into());

    Ok(config)
}

fn run_convert(controller: &Controller, input: Option<&str>, output: Option<&str>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut reader = stdin.lock();
    let mut prompt_out = std::io::stderr();

    let (input_file, output_file) = controller
        .resolve_filenames(input, output, &mut reader, &mut prompt_out)
        .context("Failed to resolve filenames")?;

    let summary = controller
        .convert_file(&input_file, &output_file)
        .with_context(|| format!("Failed to convert {}", input_file.display()))?;

    info!("Subtitles exported to {}.", summary.output);
    Ok(())
}
