//! CLI Tooling
//!
//! Command-line interface for building, checking and browsing tree
//! documents. Every subcommand returns its output as a string; the binary
//! prints it.

use crate::config::{ConfigLoader, TermfolioConfig};
use crate::error::ApiError;
use crate::shell::Interpreter;
use crate::store::{load_document, load_into, DirectorySource, FileSource, HttpSource, TreeSlot, TreeSource};
use crate::tooling::repl::{self, ShellOptions};
use crate::tree::{TreeBuilder, TreeStats};
use crate::views::{ContentTrust, RenderMode, Renderer, TextSink};
use crate::watch::ReloadPlan;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

/// Termfolio CLI - a Unix-like shell over a static virtual filesystem
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(about = "Browse and build terminal-style portfolio file trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

/// Where to load the tree from; overrides the `[tree]` config section
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// Tree document on disk
    #[arg(long, conflicts_with_all = ["url", "source"])]
    pub tree: Option<PathBuf>,

    /// Tree document served over HTTP
    #[arg(long, conflicts_with = "source")]
    pub url: Option<String>,

    /// Directory to build the tree from in-process
    #[arg(long)]
    pub source: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tree document from a directory
    Build {
        /// Directory to walk
        #[arg(long)]
        source: PathBuf,
        /// Where to write the JSON document
        #[arg(long)]
        output: PathBuf,
    },
    /// Validate a tree document and print its statistics
    Check {
        /// Tree document to check
        #[arg(long)]
        tree: PathBuf,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Run command lines against a tree and print the transcript
    Exec {
        #[command(flatten)]
        origin: SourceArgs,
        /// Output rendering
        #[arg(long, value_enum)]
        render: Option<RenderMode>,
        /// Whether tree content is escaped when rendered
        #[arg(long, value_enum)]
        content_trust: Option<ContentTrust>,
        /// Command lines, one per argument
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Start an interactive shell session
    Shell {
        #[command(flatten)]
        origin: SourceArgs,
        /// Reload the tree when its source changes
        #[arg(long)]
        watch: bool,
        /// Output rendering
        #[arg(long, value_enum)]
        render: Option<RenderMode>,
        /// Whether tree content is escaped when rendered
        #[arg(long, value_enum)]
        content_trust: Option<ContentTrust>,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// CLI context holding the effective configuration
pub struct CliContext {
    config: TermfolioConfig,
}

impl CliContext {
    /// Load configuration; `config_path` is layered over the global file.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Ok(Self { config })
    }

    pub fn from_config(config: TermfolioConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TermfolioConfig {
        &self.config
    }

    /// Apply the global `--log-*` flags on top of the loaded logging config.
    pub fn apply_logging_overrides(&mut self, cli: &Cli) {
        let logging = &mut self.config.logging;
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }
        if let Some(format) = &cli.log_format {
            logging.format = format.clone();
        }
        if let Some(output) = &cli.log_output {
            logging.output = output.clone();
        }
        if let Some(file) = &cli.log_file {
            logging.file = Some(file.clone());
        }
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Build { source, output } => self.handle_build(source, output),
            Commands::Check { tree, format } => self.handle_check(tree, format),
            Commands::Exec {
                origin,
                render,
                content_trust,
                lines,
            } => self.handle_exec(origin, self.renderer(*render, *content_trust), lines),
            Commands::Shell {
                origin,
                watch,
                render,
                content_trust,
            } => {
                let options = ShellOptions {
                    renderer: self.renderer(*render, *content_trust),
                    prompt: self.config.shell.prompt.clone(),
                    reload: if *watch {
                        Some(self.reload_plan(origin)?)
                    } else {
                        None
                    },
                };
                repl::run_shell(self.tree_source(origin)?, options)?;
                Ok(String::new())
            }
            Commands::Config => toml::to_string_pretty(&self.config)
                .map_err(|e| ApiError::ConfigError(format!("Failed to serialize config: {}", e))),
        }
    }

    /// Pick the tree source: command-line flags first, then the `[tree]` section.
    pub fn tree_source(&self, args: &SourceArgs) -> Result<Box<dyn TreeSource>, ApiError> {
        if let Some(path) = &args.tree {
            return Ok(Box::new(FileSource::new(path.clone())));
        }
        if let Some(url) = &args.url {
            return Ok(Box::new(HttpSource::new(url.clone(), self.config.tree.timeout())));
        }
        if let Some(dir) = &args.source {
            return Ok(Box::new(DirectorySource::new(self.builder(dir.clone()))));
        }

        let tree = &self.config.tree;
        if let Some(path) = &tree.file {
            return Ok(Box::new(FileSource::new(path.clone())));
        }
        if let Some(url) = tree.document_url() {
            return Ok(Box::new(HttpSource::new(url, tree.timeout())));
        }
        if let Some(dir) = &tree.source_dir {
            return Ok(Box::new(DirectorySource::new(self.builder(dir.clone()))));
        }
        Err(ApiError::ConfigError(
            "No tree source: pass --tree, --url or --source, or set [tree] in the config".to_string(),
        ))
    }

    /// What the watcher should reload; remote documents cannot be watched.
    pub fn reload_plan(&self, args: &SourceArgs) -> Result<ReloadPlan, ApiError> {
        let tree = &self.config.tree;
        let local_document = args
            .tree
            .clone()
            .or_else(|| (args.url.is_none() && args.source.is_none()).then(|| tree.file.clone()).flatten());
        if let Some(path) = local_document {
            return Ok(ReloadPlan::Document(path));
        }
        let directory = args.source.clone().or_else(|| {
            (args.url.is_none() && tree.url.is_none())
                .then(|| tree.source_dir.clone())
                .flatten()
        });
        if let Some(dir) = directory {
            return Ok(ReloadPlan::Directory(self.builder(dir)));
        }
        Err(ApiError::ConfigError(
            "--watch needs a local tree document or source directory".to_string(),
        ))
    }

    pub fn renderer(&self, render: Option<RenderMode>, trust: Option<ContentTrust>) -> Renderer {
        let shell = &self.config.shell;
        Renderer::new(
            render.unwrap_or(shell.render),
            trust.unwrap_or(shell.content_trust),
            shell.prompt.clone(),
        )
    }

    fn builder(&self, source: PathBuf) -> TreeBuilder {
        TreeBuilder::new(source).with_walker_config(self.config.builder.clone())
    }

    fn handle_build(&self, source: &Path, output: &Path) -> Result<String, ApiError> {
        let tree = self.builder(source.to_path_buf()).build_to_file(output)?;
        let stats = tree.stats();
        info!(source = %source.display(), output = %output.display(), "Built tree document");
        Ok(format!(
            "Built tree from {}: {} folders, {} files -> {}",
            source.display(),
            stats.folders,
            stats.files,
            output.display()
        ))
    }

    fn handle_check(&self, tree: &Path, format: &str) -> Result<String, ApiError> {
        let stats = load_document(tree)?.stats();
        match format {
            "json" => serde_json::to_string_pretty(&stats).map_err(ApiError::from),
            "text" => Ok(format_stats_table(&stats)),
            other => Err(ApiError::ConfigError(format!(
                "Invalid format: {} (must be 'text' or 'json')",
                other
            ))),
        }
    }

    fn handle_exec(
        &self,
        origin: &SourceArgs,
        renderer: Renderer,
        lines: &[String],
    ) -> Result<String, ApiError> {
        let source = self.tree_source(origin)?;
        let slot = TreeSlot::new();
        let rt = runtime()?;
        // A failed load leaves the slot unavailable; the transcript reports it per command.
        let _ = rt.block_on(load_into(&slot, source.as_ref()));

        let mut interpreter = Interpreter::new(slot, TextSink::new(Vec::new(), renderer));
        for line in lines {
            interpreter.submit_line(line);
            if interpreter.is_hidden() {
                break;
            }
        }
        let bytes = interpreter.into_sink().into_inner();
        let transcript = String::from_utf8_lossy(&bytes);
        Ok(transcript.trim_end_matches('\n').to_string())
    }
}

/// Multi-threaded runtime for blocking on async loads from sync code.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, ApiError> {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(ApiError::ConfigError(
            "Cannot start a runtime from within an async runtime context".to_string(),
        ));
    }
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(ApiError::Io)
}

fn format_stats_table(stats: &TreeStats) -> String {
    use comfy_table::Table;
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec!["Metric", "Count"]);
    table.add_row(vec!["Folders".to_string(), stats.folders.to_string()]);
    table.add_row(vec!["Files".to_string(), stats.files.to_string()]);
    table.add_row(vec!["Executables".to_string(), stats.executables.to_string()]);
    table.add_row(vec!["Max depth".to_string(), stats.max_depth.to_string()]);
    table.to_string()
}
