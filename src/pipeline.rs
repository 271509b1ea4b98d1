//! Directory-level driver: every PDF in an input directory becomes one JSON
//! file in an output directory.
//!
//! ```no_run
//! use pdf_outline::{DocumentPipeline, PipelineConfig};
//!
//! let config = PipelineConfig::new().with_input_dir("input").with_output_dir("output");
//! let report = DocumentPipeline::new(config).run()?;
//! println!("{} written, {} failed", report.written.len(), report.failed.len());
//! # Ok::<(), pdf_outline::Error>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::classify::{Denylist, HeadingClassifier, TitleExtractor};
use crate::detect::has_pdf_extension;
use crate::error::{Error, Result};
use crate::model::{DocumentResult, PageLayout};
use crate::parser::{ErrorMode, LayoutParser, PdfLayoutParser};
use crate::render::{to_json, JsonFormat};

/// Default input directory.
pub const DEFAULT_INPUT_DIR: &str = "input";

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Pipeline configuration.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory scanned for `.pdf` files
    pub input_dir: PathBuf,

    /// Directory receiving one `.json` file per input
    pub output_dir: PathBuf,

    /// Labels never reported as headings
    pub denylist: Denylist,

    /// Output JSON layout
    pub json_format: JsonFormat,

    /// Abort on the first failing file, or log it and continue
    pub error_mode: ErrorMode,

    /// Process files on the rayon thread pool
    pub parallel: bool,
}

impl PipelineConfig {
    /// Create a configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input directory.
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Set the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Replace the denylist.
    pub fn with_denylist(mut self, denylist: Denylist) -> Self {
        self.denylist = denylist;
        self
    }

    /// Set the JSON format.
    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Keep going when a file fails.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            denylist: Denylist::default(),
            json_format: JsonFormat::Pretty,
            error_mode: ErrorMode::Strict,
            parallel: false,
        }
    }
}

/// What happened to one input file.
#[derive(Debug)]
pub enum FileOutcome<'a> {
    /// The result was written
    Written {
        /// Input PDF
        input: &'a Path,
        /// JSON file written
        output: &'a Path,
        /// Number of headings in the outline
        headings: usize,
    },
    /// Processing failed
    Failed {
        /// Input PDF
        input: &'a Path,
        /// The failure
        error: &'a Error,
    },
}

/// Summary of a pipeline run, in input order.
#[derive(Debug, Default)]
pub struct RunReport {
    /// JSON files written
    pub written: Vec<PathBuf>,
    /// Inputs that failed in lenient mode
    pub failed: Vec<(PathBuf, Error)>,
}

impl RunReport {
    /// Number of inputs seen.
    pub fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }

    /// Check if every input succeeded.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Parses, classifies and writes documents.
pub struct DocumentPipeline<P = PdfLayoutParser> {
    config: PipelineConfig,
    parser: P,
    titles: TitleExtractor,
    headings: HeadingClassifier,
}

impl DocumentPipeline<PdfLayoutParser> {
    /// Create a pipeline backed by the lopdf layout parser.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_parser(config, PdfLayoutParser::new())
    }
}

impl<P: LayoutParser> DocumentPipeline<P> {
    /// Create a pipeline with a custom layout parser.
    pub fn with_parser(config: PipelineConfig, parser: P) -> Self {
        let headings = HeadingClassifier::with_denylist(config.denylist.clone());
        Self {
            config,
            parser,
            titles: TitleExtractor::new(),
            headings,
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Title and outline for already parsed pages, with texts trimmed.
    pub fn analyze(&self, pages: &[PageLayout]) -> DocumentResult {
        let title = self.titles.extract(pages);
        let outline = self.headings.extract(pages);
        DocumentResult::new(title, outline).normalized()
    }

    /// Parse and classify one file.
    pub fn process_file(&self, path: &Path) -> Result<DocumentResult> {
        let pages = self.parser.parse_path(path)?;
        log::debug!("{}: {} pages", path.display(), pages.len());
        Ok(self.analyze(&pages))
    }

    /// Where the result for `input` is written: same stem, `.json` extension.
    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or(input.as_os_str());
        let mut name = stem.to_os_string();
        name.push(".json");
        self.config.output_dir.join(name)
    }

    /// Render `result` and write it next to the other outputs.
    pub fn write_result(&self, input: &Path, result: &DocumentResult) -> Result<PathBuf> {
        let output = self.output_path_for(input);
        let json = to_json(result, self.config.json_format)?;
        fs::write(&output, json)?;
        Ok(output)
    }

    /// PDF files in the input directory, sorted by name.
    pub fn discover_inputs(&self) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();
        for entry in fs::read_dir(&self.config.input_dir)? {
            let path = entry?.path();
            if path.is_file() && has_pdf_extension(&path) {
                inputs.push(path);
            }
        }
        inputs.sort();
        Ok(inputs)
    }

    /// Process every input and write its JSON.
    pub fn run(&self) -> Result<RunReport> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `on_file` after each input.
    ///
    /// In strict mode the first failure (in input order) aborts the run.
    /// Sequential runs stop there, so later inputs are not written; parallel
    /// runs convert every input first and then return that failure.
    pub fn run_with<F>(&self, on_file: F) -> Result<RunReport>
    where
        F: Fn(&FileOutcome<'_>) + Sync,
    {
        fs::create_dir_all(&self.config.output_dir)?;
        let inputs = self.discover_inputs()?;
        log::info!(
            "Processing {} PDF files from {}",
            inputs.len(),
            self.config.input_dir.display()
        );

        let handle = |input: &PathBuf| -> Result<PathBuf> {
            let outcome = self.convert(input);
            match &outcome {
                Ok((output, headings)) => on_file(&FileOutcome::Written {
                    input,
                    output,
                    headings: *headings,
                }),
                Err(error) => on_file(&FileOutcome::Failed { input, error }),
            }
            outcome.map(|(output, _)| output)
        };

        let strict = self.config.error_mode == ErrorMode::Strict;
        let mut report = RunReport::default();

        if self.config.parallel {
            let outcomes: Vec<_> = inputs.par_iter().map(|input| handle(input)).collect();
            for (input, outcome) in inputs.into_iter().zip(outcomes) {
                self.record(&mut report, input, outcome, strict)?;
            }
        } else {
            for input in inputs {
                let outcome = handle(&input);
                self.record(&mut report, input, outcome, strict)?;
            }
        }

        Ok(report)
    }

    fn convert(&self, input: &Path) -> Result<(PathBuf, usize)> {
        let result = self
            .process_file(input)
            .map_err(|e| e.in_file(input))?;
        let output = self
            .write_result(input, &result)
            .map_err(|e| e.in_file(input))?;
        log::info!("Output written: {}", output.display());
        Ok((output, result.heading_count()))
    }

    fn record(
        &self,
        report: &mut RunReport,
        input: PathBuf,
        outcome: Result<PathBuf>,
        strict: bool,
    ) -> Result<()> {
        match outcome {
            Ok(output) => report.written.push(output),
            Err(e) if strict => return Err(e),
            Err(e) => {
                log::warn!("Skipping {}", e);
                report.failed.push((input, e));
            }
        }
        Ok(())
    }
}
