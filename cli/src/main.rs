//! pdf-outline CLI - title and heading outline extraction

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf_outline::{
    Denylist, DocumentPipeline, ErrorMode, FileOutcome, JsonFormat, PdfParser, PipelineConfig,
};

#[derive(Parser)]
#[command(name = "pdf-outline")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Extract PDF titles and heading outlines to JSON", long_about = None)]
struct Cli {
    /// Directory containing the PDF files
    #[arg(short, long, value_name = "DIR", env = "PDF_OUTLINE_INPUT", default_value = "input")]
    input: PathBuf,

    /// Directory receiving one JSON file per PDF
    #[arg(short, long, value_name = "DIR", env = "PDF_OUTLINE_OUTPUT", default_value = "output")]
    output: PathBuf,

    #[command(flatten)]
    extract: ExtractArgs,

    /// Log failing files and continue instead of aborting
    #[arg(long)]
    lenient: bool,

    /// Process files in parallel
    #[arg(long)]
    parallel: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Args)]
struct ExtractArgs {
    /// File with extra form labels to ignore, one per line
    #[arg(long, value_name = "FILE")]
    stopwords: Option<PathBuf>,

    /// Replace the built-in form labels instead of extending them
    #[arg(long, requires = "stopwords")]
    replace_stopwords: bool,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the outline of a single PDF to stdout
    Show {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show version information
    Version,
}

impl ExtractArgs {
    fn denylist(&self) -> pdf_outline::Result<Denylist> {
        let Some(path) = &self.stopwords else {
            return Ok(Denylist::default());
        };
        let extra = Denylist::from_file(path)?;
        if self.replace_stopwords {
            return Ok(extra);
        }
        let mut denylist = Denylist::default();
        denylist.extend(extra.iter());
        Ok(denylist)
    }

    fn json_format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Show { input, extract }) => cmd_show(input, extract),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_run(&cli),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::new()
        .with_input_dir(&cli.input)
        .with_output_dir(&cli.output)
        .with_denylist(cli.extract.denylist()?)
        .with_json_format(cli.extract.json_format())
        .with_error_mode(if cli.lenient {
            ErrorMode::Lenient
        } else {
            ErrorMode::Strict
        })
        .with_parallel(cli.parallel);
    log::debug!(
        "Reading {} -> {} ({} stop words)",
        config.input_dir.display(),
        config.output_dir.display(),
        config.denylist.len()
    );
    let pipeline = DocumentPipeline::new(config);

    let total = pipeline.discover_inputs()?.len();
    if total == 0 {
        println!(
            "{} {}",
            "No PDF files found in".yellow(),
            cli.input.display()
        );
    }

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let report = pipeline.run_with(|outcome| {
        match outcome {
            FileOutcome::Written { output, headings, .. } => pb.println(format!(
                "{} {} ({} headings)",
                "Output written:".green(),
                output.display(),
                headings
            )),
            FileOutcome::Failed { error, .. } => {
                pb.println(format!("{} {}", "Failed:".red(), error))
            }
        }
        pb.inc(1);
    });
    pb.finish_and_clear();
    let report = report?;

    println!(
        "\n{} {} written, {} failed",
        "Done!".green().bold(),
        report.written.len(),
        report.failed.len()
    );
    for (input, _) in &report.failed {
        println!("  {} {}", "└─".dimmed(), input.display());
    }

    Ok(())
}

fn cmd_show(input: &Path, extract: &ExtractArgs) -> Result<(), Box<dyn std::error::Error>> {
    let parser = PdfParser::open(input)?;
    eprintln!("{} {}", input.display().to_string().cyan(), describe(&parser));

    let config = PipelineConfig::new().with_denylist(extract.denylist()?);
    let pipeline = DocumentPipeline::new(config);
    let result = pipeline.analyze(&parser.parse()?);
    println!(
        "{}",
        pdf_outline::render::to_json(&result, extract.json_format())?
    );
    Ok(())
}

fn describe(parser: &PdfParser) -> String {
    let mut info = format!("PDF {}, {} pages", parser.version(), parser.page_count());
    if parser.is_encrypted() {
        info.push_str(", encrypted");
    }
    info
}

fn cmd_version() {
    println!("{} {}", "pdf-outline".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF title and heading outline extraction tool");
    println!();
    println!("License: MIT");
}
