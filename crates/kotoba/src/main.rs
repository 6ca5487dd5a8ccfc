//! Command-line front end for the Kotoba word notebook.

mod render;

use anyhow::Context;
use clap::{Parser, Subcommand};
use kotoba::config::{KotobaConfig, LayeredConfigOptions};
use kotoba::core::{
    Category, JsonFileStorage, LogReporter, Persisted, ReviewOptions, WordId, WordStore,
    WordUpdate,
};
use kotoba::init_logging;
use log::{debug, error, info};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

/// Log target for storage warnings.
const STORE_LOG_TARGET: &str = "kotoba::store";

/// Exit code for input the command refused to act on.
const EXIT_INVALID_INPUT: u8 = 2;

/// Command-line options for the Kotoba CLI.
#[derive(Debug, Parser)]
#[command(name = "kotoba", version, about = "Vocabulary notebook with spaced review")]
struct Cli {
    /// Optional path to a kotoba.json5 config file applied last
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Word data file (overrides storage.path)
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every category with its word count
    Categories,
    /// Add a new word
    Add {
        text: String,
        /// Category label (n, vt, adj1, ...) or alias (noun, i-adjective, ...)
        #[arg(long, short)]
        category: Category,
        #[arg(long, short)]
        explanation: String,
    },
    /// List all words, or the words of one category
    List {
        #[arg(long, short)]
        category: Option<Category>,
    },
    /// Case-insensitive search over text and explanation
    Search { keyword: String },
    /// Show every field of one word
    Show { id: String },
    /// Change fields of one word
    Update {
        id: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long, short)]
        category: Option<Category>,
        #[arg(long, short)]
        explanation: Option<String>,
        #[arg(long)]
        remembered: Option<bool>,
    },
    /// Flip the remembered flag of one word
    Toggle { id: String },
    /// Delete one or more words
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Pick the most overdue words and mark them reviewed today
    Review {
        /// Number of words (defaults to review.count)
        #[arg(long, short = 'n')]
        count: Option<usize>,
        #[arg(long, short)]
        category: Option<Category>,
        /// Only show the selection; nothing is marked
        #[arg(long)]
        dry_run: bool,
    },
}

/// Resolved paths and config for one invocation.
struct Session {
    config: KotobaConfig,
    data_path: PathBuf,
    log_path: PathBuf,
}

impl Session {
    fn start(cli: &Cli) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().context("cwd")?;
        let layered = match cli.config.as_ref() {
            Some(path) => KotobaConfig::load_layered_with_options(
                LayeredConfigOptions::new(&cwd).with_runtime_path(path),
            ),
            None => KotobaConfig::load_layered(&cwd),
        }
        .context("failed to load config")?;
        let config = layered.config;
        let data_path = match cli.data.as_ref() {
            Some(path) => cwd.join(path),
            None => config.storage.resolve_path(&cwd),
        };
        let log_path = init_logging(&config.logging, &cwd).context("failed to open log file")?;
        info!(
            "starting kotoba (layers={}, data={})",
            layered.layers.len(),
            data_path.display()
        );
        Ok(Self {
            config,
            data_path,
            log_path,
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let session = match Session::start(&cli) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("kotoba: {err:#}");
            return ExitCode::FAILURE;
        }
    };
    match run(cli.command, &session) {
        Ok(code) => code,
        Err(err) => {
            error!("command failed: {err:?}");
            log::logger().flush();
            eprintln!(
                "unknown error, check the log at {}",
                session.log_path.display()
            );
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, session: &Session) -> anyhow::Result<ExitCode> {
    let mut store = open_store(&session.data_path);
    let mut out = io::stdout().lock();
    debug!("running command: {command:?}");
    match command {
        Command::Categories => {
            writeln!(out, "{}", render::category_table(&store.category_counts()))?;
        }
        Command::Add {
            text,
            category,
            explanation,
        } => {
            let (text, explanation) = (text.trim(), explanation.trim());
            if text.is_empty() || explanation.is_empty() {
                return Ok(invalid_input("text and explanation must not be empty"));
            }
            let added = report(store.add(text, category, explanation));
            writeln!(out, "{}", render::word_row(&added))?;
        }
        Command::List { category } => {
            let words = match category {
                Some(category) => store.by_category(category),
                None => store.words().iter().collect(),
            };
            print_rows(&mut out, words)?;
        }
        Command::Search { keyword } => {
            print_rows(&mut out, store.search(keyword.trim()))?;
        }
        Command::Show { id } => match store.get(&WordId::from(id.as_str())) {
            Some(word) => writeln!(out, "{}", render::word_detail(word))?,
            None => return Ok(not_found(&id)),
        },
        Command::Update {
            id,
            text,
            category,
            explanation,
            remembered,
        } => {
            let update = match build_update(text, category, explanation, remembered) {
                Ok(Some(update)) => update,
                Ok(None) => return Ok(invalid_input("nothing to update")),
                Err(message) => return Ok(invalid_input(message)),
            };
            let id = WordId::from(id);
            if !report(store.update(&id, &update)) {
                return Ok(not_found(id.as_str()));
            }
            if let Some(word) = store.get(&id) {
                writeln!(out, "{}", render::word_row(word))?;
            }
        }
        Command::Toggle { id } => {
            let id = WordId::from(id);
            match report(store.toggle_remembered(&id)) {
                Some(remembered) => {
                    let state = if remembered { "remembered" } else { "not remembered" };
                    writeln!(out, "{id}: {state}")?;
                }
                None => return Ok(not_found(id.as_str())),
            }
        }
        Command::Delete { ids, yes } => {
            let ids: Vec<WordId> = ids.into_iter().map(WordId::from).collect();
            let matched: Vec<_> = ids.iter().filter_map(|id| store.get(id)).collect();
            if matched.is_empty() {
                writeln!(out, "no matching words")?;
                return Ok(ExitCode::SUCCESS);
            }
            if !yes {
                print_rows(&mut out, matched.iter().copied())?;
                let prompt = format!("delete {} word(s)? [y/N] ", matched.len());
                if !confirm(&mut out, &prompt)? {
                    writeln!(out, "cancelled")?;
                    return Ok(ExitCode::SUCCESS);
                }
            }
            let removed = report(store.delete(&ids));
            writeln!(out, "deleted {removed} word(s)")?;
        }
        Command::Review {
            count,
            category,
            dry_run,
        } => {
            let options = ReviewOptions::default()
                .with_count(count.unwrap_or(session.config.review.count))
                .with_category(category);
            let rows: Vec<String> = store
                .ranked(options.category)
                .iter()
                .take(options.count)
                .map(render::review_row)
                .collect();
            if rows.is_empty() {
                writeln!(out, "no words to review")?;
                return Ok(ExitCode::SUCCESS);
            }
            if !dry_run {
                report(store.start_review(&options));
            }
            writeln!(out, "{}", rows.join("\n"))?;
        }
    }
    out.flush()?;
    Ok(ExitCode::SUCCESS)
}

fn open_store(path: &Path) -> WordStore {
    let opened = WordStore::builder(JsonFileStorage::new(path))
        .reporter(Arc::new(LogReporter::with_target(STORE_LOG_TARGET)))
        .open();
    report(opened)
}

/// Surface a storage warning on stderr and hand back the value.
///
/// The store has already logged it through its reporter.
fn report<T>(persisted: Persisted<T>) -> T {
    if let Some(warning) = &persisted.warning {
        eprintln!("warning: {warning}");
    }
    persisted.into_value()
}

fn invalid_input(message: &str) -> ExitCode {
    eprintln!("{message}");
    ExitCode::from(EXIT_INVALID_INPUT)
}

fn not_found(id: &str) -> ExitCode {
    eprintln!("no word with id {id}");
    ExitCode::FAILURE
}

fn print_rows<'a>(
    out: &mut impl Write,
    words: impl IntoIterator<Item = &'a kotoba::core::Word>,
) -> io::Result<()> {
    let rows = render::word_rows(words);
    if rows.is_empty() {
        writeln!(out, "no words")
    } else {
        writeln!(out, "{rows}")
    }
}

/// Turn the update flags into a [`WordUpdate`]; `None` when no flag was given.
fn build_update(
    text: Option<String>,
    category: Option<Category>,
    explanation: Option<String>,
    remembered: Option<bool>,
) -> Result<Option<WordUpdate>, &'static str> {
    let mut update = WordUpdate::new();
    if let Some(text) = text {
        let text = text.trim();
        if text.is_empty() {
            return Err("text must not be empty");
        }
        update = update.text(text);
    }
    if let Some(category) = category {
        update = update.category(category);
    }
    if let Some(explanation) = explanation {
        let explanation = explanation.trim();
        if explanation.is_empty() {
            return Err("explanation must not be empty");
        }
        update = update.explanation(explanation);
    }
    if let Some(remembered) = remembered {
        update = update.remembered(remembered);
    }
    Ok((!update.is_empty()).then_some(update))
}

fn confirm(out: &mut impl Write, prompt: &str) -> io::Result<bool> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
