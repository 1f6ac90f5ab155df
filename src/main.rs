// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, warn, info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};

use gosubtitle::app_config::{Config, LogLevel};
use gosubtitle::file_utils::FileManager;
use gosubtitle::pipeline::{ExtractionStatus, SubtitleProcessor};
use gosubtitle::subtitle_processor::parse_replacement;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for gosubtitle
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ConvertOptions {
    /// Output SRT file path (default: input path with .srt extension)
    #[arg(short, long, value_name = "PATH")]
    srt: Option<PathBuf>,

    /// Offset all subtitles by this many frames (can be negative)
    #[arg(short, long, value_name = "FRAMES", allow_hyphen_values = true)]
    offset: Option<f64>,

    /// Maximum words per subtitle line
    #[arg(short = 'w', long, value_name = "COUNT")]
    max_words: Option<usize>,

    /// Replace a speaker name, "OldName:NewName" (can be repeated)
    #[arg(short, long = "replace", value_name = "OLD:NEW")]
    replace: Vec<String>,

    /// Display statistics about the converted subtitles
    #[arg(short, long)]
    verbose: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "gosubtitle.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// GoSubtitle - Convert Movie XML files to SRT subtitles
#[derive(Parser, Debug)]
#[command(name = "gosubtitle")]
#[command(version)]
#[command(about = "Convert Movie XML timed-text exports to SRT subtitles")]
#[command(long_about = "GoSubtitle reads the text-to-speech cues of a Movie XML export, merges overlapping
cues, splits long ones into readable lines and writes an SRT file.

EXAMPLES:
    gosubtitle movie.xml                        # Writes movie.srt
    gosubtitle movie.xml -s subtitles.srt -o 24 # Custom output, shift by one second
    gosubtitle movie.xml -r John:Jane -r Bob:Robert
    gosubtitle movie.xml --max-words 15 --verbose
    gosubtitle /exports/                        # Convert every .xml in a directory
    gosubtitle completions bash > gosubtitle.bash

CONFIGURATION:
    Settings are read from gosubtitle.json when it exists. Command line values
    override the file.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input Movie XML file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    #[command(flatten)]
    options: ConvertOptions,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour and tag for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (colour, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", colour, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Result of converting one file
#[derive(Debug, PartialEq)]
enum Conversion {
    Written(usize),
    AlreadyExists,
    NoSubtitles,
}

fn main() -> Result<()> {
    // Logger accepts everything, the max level is narrowed after config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "gosubtitle", &mut std::io::stdout());
            Ok(())
        }
        None => {
            let input_path = cli.input_path.ok_or_else(|| {
                anyhow!("INPUT_PATH is required when no subcommand is specified")
            })?;
            run_convert(input_path, cli.options)
        }
    }
}

fn run_convert(input_path: PathBuf, options: ConvertOptions) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&options)?;

    config.validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    if input_path.is_file() {
        let output = options.srt
            .as_ref()
            .map(FileManager::ensure_srt_extension)
            .unwrap_or_else(|| FileManager::default_output_path(&input_path));

        match convert_file(&input_path, &output, &config, options.force_overwrite, options.verbose, None)? {
            Conversion::Written(count) => info!("Saved {} subtitle(s) to {:?}", count, output),
            Conversion::AlreadyExists => warn!("Output file already exists: {:?}. Use -f to force overwrite.", output),
            Conversion::NoSubtitles => warn!("No subtitles found in {:?}, nothing written", input_path),
        }
    } else if input_path.is_dir() {
        if options.srt.is_some() {
            warn!("--srt is ignored when converting a directory");
        }
        convert_folder(&input_path, &config, options.force_overwrite, options.verbose)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

// Config file values first, then command line overrides
fn load_config(options: &ConvertOptions) -> Result<Config> {
    let config_path = Path::new(&options.config_path);
    let mut config = if config_path.exists() {
        Config::load(config_path)?
    } else {
        debug!("Config file not found at '{}', using defaults", options.config_path);
        Config::default()
    };

    if let Some(max_words) = options.max_words {
        config.processing.max_words_per_line = max_words;
    }

    if let Some(offset) = options.offset {
        config.offset_frames = offset;
    }

    for pair in &options.replace {
        match parse_replacement(pair) {
            Ok((old_name, new_name)) => {
                config.speaker_replacements.insert(old_name, new_name);
            }
            Err(e) => warn!("{}", e),
        }
    }

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

fn convert_file(
    input: &Path,
    output: &Path,
    config: &Config,
    force_overwrite: bool,
    verbose: bool,
    progress: Option<&ProgressBar>,
) -> Result<Conversion> {
    if !FileManager::is_movie_xml(input) {
        return Err(anyhow!("Input file must be an existing .xml file: {:?}", input));
    }

    if output.exists() && !force_overwrite {
        return Ok(Conversion::AlreadyExists);
    }

    info!("Loading subtitles from: {:?}", input);
    let content = FileManager::read_to_string(input)?;

    let settings = config.processing_settings();
    let processed = SubtitleProcessor::new(settings.clone())
        .context("Invalid processing settings")?
        .process(&content)
        .with_context(|| format!("Failed to parse Movie XML: {:?}", input))?;

    if processed.report.status == ExtractionStatus::Empty {
        return Ok(Conversion::NoSubtitles);
    }

    let mut document = processed.document;

    if config.offset_frames != 0.0 {
        document.apply_offset(config.offset_frames);
        info!("Applied offset of {} frames to {} subtitle(s)", config.offset_frames, document.len());
        if document.cues.iter().any(|cue| cue.start < 0.0) {
            warn!("Offset moves some subtitles before 00:00:00,000, their timestamps are clamped");
        }
    }

    if !config.speaker_replacements.is_empty() {
        let report = document.replace_speakers(&config.speaker_replacements);
        for (old_name, replacement) in &report.replacements {
            info!("Replaced speaker '{}' with '{}' ({} occurrence(s))", old_name, replacement.new_name, replacement.count);
        }
    }

    if verbose {
        let stats = document.statistics().render(settings.fps);
        // keep the batch progress bar intact while printing
        match progress {
            Some(bar) => bar.suspend(|| print!("{}", stats)),
            None => print!("{}", stats),
        }
    }

    FileManager::write_srt(output, &document, settings.fps)?;

    Ok(Conversion::Written(document.len()))
}

fn convert_folder(input_dir: &Path, config: &Config, force_overwrite: bool, verbose: bool) -> Result<()> {
    info!("Converting Movie XML files in directory: {:?}", input_dir);

    let files = FileManager::find_files(input_dir, "xml")?;
    if files.is_empty() {
        warn!("No .xml files found in {:?}", input_dir);
        return Ok(());
    }

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let mut converted = 0;
    for file in &files {
        progress.set_message(file.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default());
        let output = FileManager::default_output_path(file);

        match convert_file(file, &output, config, force_overwrite, verbose, Some(&progress)) {
            Ok(Conversion::Written(_)) => converted += 1,
            Ok(Conversion::AlreadyExists) => debug!("Skipping {:?}, output already exists", file),
            Ok(Conversion::NoSubtitles) => warn!("No subtitles found in {:?}", file),
            Err(e) => error!("Error processing file {:?}: {:#}", file, e),
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    info!("Finished converting {} of {} file(s)", converted, files.len());

    Ok(())
}
