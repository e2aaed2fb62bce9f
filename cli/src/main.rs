//! pdf2text CLI - PDF text extraction tool

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdf2text::{DecodeOptions, Document, JsonFormat, Pdf2Text, QuoteMode};

#[derive(Parser)]
#[command(name = "pdf2text")]
#[command(version)]
#[command(about = "Extract plain text from PDF files", long_about = None)]
struct Cli {
    /// Input PDF files
    #[arg(value_name = "FILE", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (single input) or directory (several inputs)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Quote characters decoded from octal escapes
    #[arg(long, value_enum, default_value = "both", env = "PDF2TEXT_QUOTES")]
    quotes: QuoteArg,

    /// Read hex strings as one-byte codes instead of two-byte codes
    #[arg(long)]
    single_byte: bool,

    /// Emit the extracted document as JSON
    #[arg(long)]
    json: bool,

    /// Output compact JSON
    #[arg(long, requires = "json")]
    compact: bool,

    /// Print extraction statistics to stderr
    #[arg(long)]
    stats: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum QuoteArg {
    /// Keep both quote characters as numeric entities
    None,
    /// Decode double quotes only
    Double,
    /// Decode double and single quotes
    Both,
}

impl From<QuoteArg> for QuoteMode {
    fn from(arg: QuoteArg) -> Self {
        match arg {
            QuoteArg::None => QuoteMode::None,
            QuoteArg::Double => QuoteMode::Double,
            QuoteArg::Both => QuoteMode::Both,
        }
    }
}

impl Cli {
    fn decode_options(&self) -> DecodeOptions {
        DecodeOptions::new()
            .with_quote_mode(self.quotes.into())
            .multibyte(!self.single_byte)
    }

    fn json_format(&self) -> Option<JsonFormat> {
        match (self.json, self.compact) {
            (false, _) => None,
            (true, false) => Some(JsonFormat::Pretty),
            (true, true) => Some(JsonFormat::Compact),
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match (cli.inputs.len(), cli.output.as_deref()) {
        (1, output) => cmd_single(&cli, &cli.inputs[0], output),
        (_, Some(dir)) => cmd_batch(&cli, dir),
        (_, None) => cmd_stdout(&cli),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Why an input is unlikely to yield text, if it looks wrong.
fn input_problem(input: &Path) -> Option<&'static str> {
    if !input.exists() {
        Some("does not exist")
    } else if !pdf2text::is_pdf(input) {
        Some("has no PDF header")
    } else {
        None
    }
}

fn extract(cli: &Cli, input: &Path) -> CliResult<Document> {
    if let Some(problem) = input_problem(input) {
        log::warn!("Input {} {}", input.display(), problem);
    }
    let extractor = Pdf2Text::new(Some(input))?.with_options(cli.decode_options());
    let doc = extractor.extract();
    if cli.stats {
        print_stats(input, &doc);
    }
    Ok(doc)
}

fn render(cli: &Cli, doc: &Document) -> CliResult<String> {
    match cli.json_format() {
        Some(format) => Ok(pdf2text::render::to_json(doc, format)?),
        None => Ok(pdf2text::render::to_text(doc)),
    }
}

fn cmd_single(cli: &Cli, input: &Path, output: Option<&Path>) -> CliResult<()> {
    let doc = extract(cli, input)?;
    let rendered = render(cli, &doc)?;

    match output {
        Some(path) => {
            fs::write(path, &rendered)?;
            eprintln!("{} {}", "Saved to".green(), path.display());
        }
        None => io::stdout().write_all(rendered.as_bytes())?,
    }

    Ok(())
}

fn cmd_batch(cli: &Cli, dir: &Path) -> CliResult<()> {
    fs::create_dir_all(dir)?;

    let pb = ProgressBar::new(cli.inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );

    let extension = if cli.json { "json" } else { "txt" };
    for input in &cli.inputs {
        pb.set_message(input.display().to_string());

        let doc = extract(cli, input)?;
        let rendered = render(cli, &doc)?;
        let path = dir.join(output_name(input, extension));
        fs::write(&path, &rendered)?;

        pb.inc(1);
    }

    pb.finish_with_message("Done!");
    eprintln!(
        "{} {} files written to {}",
        "Done!".green().bold(),
        cli.inputs.len(),
        dir.display()
    );

    Ok(())
}

fn cmd_stdout(cli: &Cli) -> CliResult<()> {
    let mut stdout = io::stdout().lock();

    if let Some(format) = cli.json_format() {
        let mut entries = Vec::with_capacity(cli.inputs.len());
        for input in &cli.inputs {
            let doc = extract(cli, input)?;
            entries.push(serde_json::json!({
                "file": input.display().to_string(),
                "document": doc,
            }));
        }
        let json = match format {
            JsonFormat::Pretty => serde_json::to_string_pretty(&entries)?,
            JsonFormat::Compact => serde_json::to_string(&entries)?,
        };
        writeln!(stdout, "{}", json)?;
        return Ok(());
    }

    for input in &cli.inputs {
        let doc = extract(cli, input)?;
        stdout.write_all(pdf2text::render::to_text(&doc).as_bytes())?;
    }

    Ok(())
}

fn output_name(input: &Path, extension: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from(format!("{}.{}", stem, extension))
}

fn print_stats(input: &Path, doc: &Document) {
    let stats = &doc.stats;
    eprintln!("{}", input.display().to_string().cyan().bold());
    eprintln!("{}", "─".repeat(40).dimmed());
    if let Some(ref version) = doc.version {
        eprintln!("{}: PDF {}", "Format".bold(), version);
    }
    eprintln!("{}: {}", "Objects".bold(), stats.object_count);
    eprintln!(
        "{}: {} ({} text, {} cmap, {} skipped, {} failed)",
        "Streams".bold(),
        stats.stream_count,
        stats.text_streams,
        stats.cmap_streams,
        stats.skipped_streams,
        stats.failed_streams
    );
    eprintln!("{}: {}", "Text blocks".bold(), stats.block_count);
    eprintln!("{}: {}", "Mappings".bold(), stats.transformation_count);
}
