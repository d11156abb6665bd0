use ballotpress::{PrinterBuilder, PrinterError, election_count};
use clap::Parser;
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Lays out the ballot styles of an election report as PDFs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Election report JSON, or `-` for stdin
    election: String,

    /// Directory for the generated PDFs
    #[arg(long, default_value = ".")]
    outdir: PathBuf,

    /// File name prefix; defaults to the election name
    #[arg(long)]
    prefix: Option<String>,

    /// Write the bubble report as JSON to this path, or `-` for stdout
    #[arg(long)]
    bubbles: Option<String>,

    /// Layout settings JSON file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Only print ballot styles with this external identifier or image URI
    #[arg(long = "select")]
    select: Vec<String>,

    /// Log at debug level
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn read_report(source: &str) -> Result<Value, PrinterError> {
    let text = if source == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(source)?
    };
    Ok(serde_json::from_str(&text)?)
}

impl Cli {
    /// Written paths go to stderr when stdout carries the bubble JSON.
    fn paths_to_stderr(&self) -> bool {
        self.bubbles.as_deref() == Some("-")
    }
}

fn run(cli: &Cli) -> Result<(), PrinterError> {
    let report = read_report(&cli.election)?;
    let mut builder = PrinterBuilder::new();
    if let Some(path) = &cli.settings {
        builder = builder.with_settings_file(path)?;
    }
    let selectors = (!cli.select.is_empty()).then_some(cli.select.as_slice());

    let count = election_count(&report);
    if count == 0 {
        log::warn!("Report contains no elections");
    }
    let mut reports = Vec::with_capacity(count);
    for election in 0..count {
        let mut printer = builder.build_for(&report, election)?;
        let paths = printer.render_to_dir(&cli.outdir, cli.prefix.as_deref(), selectors)?;
        for path in paths {
            if cli.paths_to_stderr() {
                eprintln!("{}", path.display());
            } else {
                println!("{}", path.display());
            }
        }
        reports.push(printer.bubble_report()?);
    }

    if let Some(target) = &cli.bubbles {
        // one report per election; a single election writes a bare object
        let json = match reports.as_slice() {
            [single] => single.to_json()?,
            many => serde_json::to_string_pretty(many)?,
        };
        if target == "-" {
            println!("{}", json);
        } else {
            fs::write(target, json)?;
        }
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&cli) {
        log::error!("{}", e);
        eprintln!("error: {}", e);
        std::process::exit(if e.is_fatal_input() { 2 } else { 1 });
    }
}
