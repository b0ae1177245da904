mod echo;

use std::collections::BTreeSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;

use anyhow::Context;
use bkmkorg_core::{
    BkmkError, BookmarkTrie, ExportConfig, ExportFormat, ImportConfig, ImportFormat, Pipeline, QueryResult,
    SubstitutionLoader,
};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Index bookmarks by tag and export them as HTML, org-mode, text or JSON
#[derive(Parser, Debug)]
#[command(name = "bkmkorg")]
#[command(author = "bkmkorg contributors")]
#[command(version)]
#[command(about = "Organize bookmarks by tag", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Merge bookmark files and export them in one format
    Export {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Export only the bookmarks carrying every given tag
    Query {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Tag to match (repeatable)
        #[arg(short, long = "tag", value_name = "TAG", required = true)]
        tags: Vec<String>,
    },

    /// Write a tag count file (`tag : count`)
    Tags {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Report query parameters used across bookmark URLs (org-mode)
    Params {
        #[command(flatten)]
        input: InputArgs,

        /// Output file (default: stdout)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// List bookmarks of OTHER whose URL is missing from BASE
    Diff {
        /// Reference bookmark file
        #[arg(value_name = "BASE")]
        base: PathBuf,

        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Clone)]
struct InputArgs {
    /// Bookmark files, or "-" for stdin
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<String>,

    /// Input format (netscape, firefox, text, lines); detected from the extension by default
    #[arg(short, long, value_name = "FORMAT")]
    input_format: Option<ImportFormat>,

    /// Separator of tag lists in HTML and JSON input
    #[arg(long, default_value = ",", value_name = "SEP")]
    tag_separator: String,

    /// Query parameter to remove from URLs before deduplication (repeatable)
    #[arg(long = "drop-param", value_name = "NAME")]
    drop_params: Vec<String>,

    /// Keep trailing slashes when comparing URLs
    #[arg(long)]
    keep_trailing_slash: bool,

    /// Directory of extra tag substitution files (*.sub)
    #[arg(long, value_name = "DIR")]
    substitutions: Option<PathBuf>,

    /// Skip the standard substitution directory
    #[arg(long)]
    no_standard_substitutions: bool,

    /// Name used for bookmarks without tags
    #[arg(long, default_value = "untagged", value_name = "LABEL")]
    untagged_label: String,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (netscape, org, text, json, lines); detected from the output extension by default
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<ExportFormat>,

    /// Collapse single-child tag chains in JSON output
    #[arg(long)]
    collapse: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Title of HTML output
    #[arg(long, default_value = "Bookmarks", value_name = "TITLE")]
    title: String,
}

impl InputArgs {
    fn import_config(&self) -> anyhow::Result<ImportConfig> {
        let mut builder = ImportConfig::builder()
            .strip_trailing_slash(!self.keep_trailing_slash)
            .drop_query_params(self.drop_params.iter().cloned())
            .tag_separator(self.tag_separator.as_str())
            .untagged_label(self.untagged_label.as_str());

        let standard = if self.no_standard_substitutions { None } else { SubstitutionLoader::standard_dir() };
        let substitutions = SubstitutionLoader::with_dirs(self.substitutions.clone(), standard)
            .load()
            .context("Failed to load tag substitutions")?;
        if !substitutions.is_empty() {
            tracing::debug!(substitutions = substitutions.len(), "Loaded tag substitutions");
            builder = builder.substitutions(substitutions);
        }

        Ok(builder.build())
    }
}

impl OutputArgs {
    fn export_config(&self, untagged_label: &str) -> ExportConfig {
        ExportConfig::builder()
            .untagged_label(untagged_label)
            .title(self.title.as_str())
            .pretty(self.pretty)
            .collapse_chains(self.collapse)
            .build()
    }

    fn resolve_format(&self) -> ExportFormat {
        self.format
            .or_else(|| {
                let ext = self.output.as_deref()?.extension()?.to_str()?;
                ExportFormat::from_str(ext).ok()
            })
            .unwrap_or(ExportFormat::Org)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(false).init();
}

/// Runs every input through one pipeline and returns the finished trie.
fn load(input: &InputArgs, verbose: bool) -> anyhow::Result<BookmarkTrie> {
    let config = input.import_config()?;
    let mut pipeline = Pipeline::new(config);
    let started = Instant::now();

    for (index, source) in input.inputs.iter().enumerate() {
        if verbose {
            echo::print_step(index + 1, input.inputs.len(), &format!("Reading {}", source.bright_white()));
        }

        if source == "-" {
            let format = input.input_format.context("Reading from stdin requires --input-format")?;
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("Failed to read from stdin")?;
            let records = format.importer(pipeline.config())?.import(&buffer).context("Failed to parse stdin")?;
            pipeline.ingest(records);
        } else {
            pipeline
                .ingest_file(Path::new(source), input.input_format)
                .with_context(|| format!("Failed to import {}", source))?;
        }
    }

    let (trie, report) = pipeline.finish();

    if verbose {
        echo::print_report(&report, trie.len());
        echo::print_timing("Import", started.elapsed());
    } else {
        echo::print_info(&report.to_string());
    }
    if report.malformed > 0 {
        echo::print_warning(&format!("Dropped {} malformed records", report.malformed));
    }

    Ok(trie)
}

fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            fs::write(path, content).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            echo::print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => print!("{}", content),
    }
    Ok(())
}

fn export(trie: &BookmarkTrie, output: &OutputArgs, untagged_label: &str, verbose: bool) -> anyhow::Result<()> {
    let format = output.resolve_format();
    let started = Instant::now();

    let entries = trie.get_tuple_list();
    let content = format
        .exporter(&output.export_config(untagged_label))
        .export(&entries)
        .with_context(|| format!("Failed to export as {}", format))?;

    if verbose {
        echo::print_info(&format!("Exported {} bookmarks as {}", entries.len(), format));
        echo::print_timing("Export", started.elapsed());
    }

    write_output(output.output.as_deref(), &content)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let verbose = cli.verbose;

    match cli.command {
        Command::Export { input, output } => {
            let trie = load(&input, verbose)?;
            export(&trie, &output, &input.untagged_label, verbose)
        }
        Command::Query { input, output, tags } => {
            let trie = load(&input, verbose)?;
            let query: BTreeSet<String> = tags.into_iter().collect();

            let result = match trie.filter_queries(&query) {
                Ok(result) => result,
                Err(BkmkError::EmptyQueryResult { tags }) => {
                    echo::print_warning(&format!("None of the queried tags exist: {}", tags.join(", ")));
                    QueryResult::default()
                }
                Err(e) => return Err(anyhow::Error::from(e).context("Query failed")),
            };

            if result.is_empty() {
                echo::print_warning("No bookmark carries all of the queried tags");
            }
            echo::print_frontier(&result.frontier);
            export(&result.trie, &output, &input.untagged_label, verbose)
        }
        Command::Tags { input, output } => {
            let trie = load(&input, verbose)?;
            let counts = trie.tag_counts();
            write_output(output.as_deref(), &format!("{}\n", counts))
        }
        Command::Params { input, output } => {
            let trie = load(&input, verbose)?;
            let params = trie.query_params();
            if params.is_empty() {
                echo::print_info("No query parameters found");
            }
            write_output(output.as_deref(), &format!("{}\n", params.org_report()))
        }
        Command::Diff { base, input, output } => {
            let base_input = InputArgs { inputs: vec![base.display().to_string()], ..input.clone() };
            let reference = load(&base_input, verbose)?;
            let other = load(&input, verbose)?;

            let missing: BookmarkTrie = reference.difference(&other).into_iter().cloned().collect();
            echo::print_info(&format!("{} bookmarks missing from {}", missing.len(), base.display()));
            export(&missing, &output, &input.untagged_label, verbose)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    if let Err(e) = run(cli) {
        echo::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
