//! snipdf CLI - segment styled PDF text into sections

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use snipdf::output::{write_document, write_outcome};
use snipdf::segment::Coalescer;
use snipdf::{
    BatchProcessor, BatchSummary, JsonFormat, RenderOptions, SegmentOptions, Segmenter,
    SourceRegistry,
};

#[derive(Parser)]
#[command(name = "snipdf")]
#[command(version)]
#[command(about = "Segment styled PDF text into heading/content sections", long_about = None)]
struct Cli {
    /// Input fragment file (.html, .htm, .json)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Segment one document
    Segment {
        /// Input fragment file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: Format,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Include YAML frontmatter (Markdown)
        #[arg(long)]
        frontmatter: bool,

        /// Maximum heading level (1-6, Markdown)
        #[arg(long, default_value = "6")]
        max_heading: u8,

        /// Omit sections without content (Markdown, text)
        #[arg(long)]
        skip_empty: bool,

        /// Leading characters probed for a heading marker
        #[arg(long, default_value = "5", env = "SNIPDF_HEADING_PROBE")]
        heading_probe: usize,
    },

    /// Show the coalesced runs of a document
    Runs {
        /// Input fragment file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Segment many documents, writing one JSON file per document
    Batch {
        /// Input fragment files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,

        /// Worker threads (0 = one per CPU)
        #[arg(short, long, default_value = "0", env = "SNIPDF_THREADS")]
        threads: usize,

        /// Log failed documents and continue
        #[arg(long)]
        lenient: bool,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input fragment file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// JSON section records
    Json,
    /// Markdown with one heading per section
    Markdown,
    /// Plain text
    Text,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Segment {
            input,
            output,
            format,
            compact,
            frontmatter,
            max_heading,
            skip_empty,
            heading_probe,
        }) => {
            let render_options = RenderOptions::new()
                .with_frontmatter(frontmatter)
                .with_max_heading(max_heading)
                .with_empty_sections(!skip_empty);
            let options = SegmentOptions::new().with_heading_probe_chars(heading_probe);
            cmd_segment(
                &input,
                output.as_deref(),
                format,
                json_format(compact),
                &options,
                &render_options,
            )
        }
        Some(Commands::Runs { input }) => cmd_runs(&input),
        Some(Commands::Batch {
            inputs,
            output,
            threads,
            lenient,
            compact,
        }) => cmd_batch(inputs, &output, threads, lenient, json_format(compact)),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: segment into an output directory if input is provided
            if let Some(input) = cli.input {
                cmd_default(&input, cli.output.as_deref())
            } else {
                println!("{}", "Usage: snipdf <FILE> [OUTPUT]".yellow());
                println!("       snipdf --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

fn cmd_default(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_sections", stem))
    });

    let doc = snipdf::segment_file(input)?;
    let path = write_document(&output_dir, &doc, JsonFormat::Pretty)?;

    println!(
        "{} {} sections to {}",
        "Saved".green(),
        doc.section_count(),
        path.display()
    );
    Ok(())
}

fn cmd_segment(
    input: &Path,
    output: Option<&Path>,
    format: Format,
    json: JsonFormat,
    options: &SegmentOptions,
    render_options: &RenderOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = SourceRegistry::with_defaults().load(input)?;
    let doc = Segmenter::new(options.clone()).segment(&source)?;

    let rendered = match format {
        Format::Json => snipdf::render::to_json(&doc, json)?,
        Format::Markdown => snipdf::render::to_markdown(&doc, render_options)?,
        Format::Text => snipdf::render::to_text(&doc, render_options)?,
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn cmd_runs(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = SourceRegistry::with_defaults().load(input)?;
    let mut coalescer = Coalescer::default();
    let runs = coalescer.coalesce(&source.fragments);

    for (i, run) in runs.iter().enumerate() {
        let marker = if run.heading_likelihood { "H" } else { " " };
        println!(
            "{:>4} {} {:>3}px {:<28} {}",
            i,
            marker.yellow().bold(),
            run.font_size,
            run.font_family.cyan(),
            preview(&run.text, 60)
        );
    }

    println!();
    println!(
        "{} runs from {} fragments ({} skipped)",
        runs.len(),
        source.fragment_count(),
        coalescer.skipped()
    );
    Ok(())
}

fn cmd_batch(
    inputs: Vec<PathBuf>,
    output: &Path,
    threads: usize,
    lenient: bool,
    json: JsonFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output)?;

    let mut options = SegmentOptions::new().with_threads(threads);
    if lenient {
        options = options.lenient();
    }
    let processor = BatchProcessor::new(options);
    let registry = Arc::new(SourceRegistry::with_defaults());

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let rx = processor.stream_paths(registry, inputs)?;
    let mut summary = BatchSummary::default();

    for outcome in rx {
        let outcome = write_outcome(output, outcome, json);
        summary.add(&outcome);
        pb.set_message(outcome.name.clone());
        pb.inc(1);

        match outcome.result {
            Ok(_) => {}
            Err(e) if lenient => {
                log::warn!("Skipping document '{}': {}", outcome.name, e);
                pb.println(format!("{} {}: {}", "Skipped".yellow(), outcome.name, e));
            }
            Err(e) => {
                pb.abandon_with_message("failed");
                return Err(Box::new(snipdf::Error::for_document(outcome.name, e)));
            }
        }
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} documents, {} sections written to {}",
        "Segmented".green().bold(),
        summary.succeeded,
        summary.sections,
        output.display()
    );
    if summary.failed > 0 {
        println!("{} {} documents failed", "Warning:".yellow(), summary.failed);
    }

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = SourceRegistry::with_defaults().load(input)?;
    let mut coalescer = Coalescer::default();
    let runs = coalescer.coalesce(&source.fragments);
    let doc = Segmenter::default().segment(&source)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Name".bold(), source.name);
    for (key, value) in &source.metadata {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        println!("{}: {}", key.bold(), value);
    }

    println!();
    println!("{}", "Segmentation".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Fragments".bold(), source.fragment_count());
    println!("{}: {}", "Skipped".bold(), coalescer.skipped());
    println!("{}: {}", "Runs".bold(), runs.len());
    println!("{}: {}", "Sections".bold(), doc.section_count());

    let sizes: Vec<String> = doc.heading_sizes().iter().map(|s| format!("{}px", s)).collect();
    if !sizes.is_empty() {
        println!("{}: {}", "Heading sizes".bold(), sizes.join(", "));
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "snipdf".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF text segmentation tool");
    println!();
    println!("License: MIT");
}

fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > max {
        let cut: String = flat.chars().take(max).collect();
        format!("{}…", cut)
    } else {
        flat
    }
}
