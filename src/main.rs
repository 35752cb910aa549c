use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use env_logger::Env;
use grayscrub::{
    AutoPrompt, Mode, Options, PRINT_RESOLUTION, Prompt, TerminalPrompt, sanitize_svg,
};

#[derive(Parser)]
#[command(name = "grayscrub")]
#[command(about = "Check and fix SVG artwork for grayscale print", long_about = None)]
struct Cli {
    /// Input file (use - for stdin)
    #[arg(default_value = "-")]
    input: PathBuf,

    /// Output file for --fix (use - for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Fix what can be fixed instead of only reporting
    #[arg(long)]
    fix: bool,

    /// Only handle layers, hidden objects, stray points and filled open paths
    #[arg(long)]
    paths_only: bool,

    /// Keep paths that have neither fill nor stroke
    #[arg(long)]
    no_colorless: bool,

    /// Target raster effects resolution in ppi
    #[arg(long, default_value_t = PRINT_RESOLUTION)]
    resolution: f64,

    /// Decimal places for rewritten path data
    #[arg(short, long)]
    precision: Option<u8>,

    /// Write the output without indentation
    #[arg(long)]
    compact: bool,

    /// Answer yes to every question
    #[arg(short, long, conflicts_with = "no")]
    yes: bool,

    /// Answer no to every question
    #[arg(short, long)]
    no: bool,

    /// Log every decision
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    let from_stdin = cli.input.as_os_str() == "-";
    let input = if from_stdin {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(&cli.input)?
    };

    let mode = if cli.fix { Mode::Fix } else { Mode::Report };
    let mut options = if cli.paths_only {
        Options::paths_only(mode)
    } else {
        Options {
            mode,
            ..Options::default()
        }
    };
    options.remove_colorless &= !cli.no_colorless;
    options.raster_resolution = cli.resolution;
    options.precision = cli.precision;
    options.pretty = !cli.compact;

    let mut prompt: Box<dyn Prompt> = if cli.yes {
        Box::new(AutoPrompt::accept_all())
    } else if cli.no {
        Box::new(AutoPrompt::decline_all())
    } else if from_stdin {
        if mode == Mode::Fix {
            log::warn!("Input was read from stdin, so nobody can be asked; declining every fix");
        }
        Box::new(AutoPrompt::decline_all())
    } else {
        Box::new(TerminalPrompt::new(io::stdin().lock(), io::stderr()))
    };

    let (output, report) = sanitize_svg(&input, &options, prompt.as_mut())?;
    drop(prompt);

    eprint!("{}", report);

    if mode == Mode::Fix {
        if cli.output.as_os_str() == "-" {
            io::stdout().write_all(output.as_bytes())?;
        } else {
            fs::write(&cli.output, &output)?;
        }
    }

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
