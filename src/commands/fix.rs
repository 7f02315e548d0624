use clap::Args;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use recase::{
    log_status, CasingSettings, Engine, Error, LanguageRegistry, QuoteCarry, RenamePair,
    RenameReport,
};

use crate::commands::CmdResult;

#[derive(Args)]
pub struct FixArgs {
    /// Files or glob patterns to normalize
    #[arg(required = true)]
    files: Vec<String>,
    /// Target convention: camel, snake, pascal
    #[arg(long)]
    convention: Option<String>,
    /// Language table to use (default: inferred from each file's extension)
    #[arg(short, long)]
    language: Option<String>,
    /// Identifier glob to leave untouched (repeatable)
    #[arg(long, value_name = "GLOB")]
    ignore: Vec<String>,
    /// JSON settings file
    #[arg(long)]
    config: Option<String>,
    /// Whether an unterminated string carries into the next line: line, file
    #[arg(long, value_name = "MODE")]
    quote_carry: Option<String>,
    /// Apply accepted renames to disk (default is dry-run)
    #[arg(long)]
    write: bool,
    /// Exit with status 1 when any rename is proposed
    #[arg(long)]
    check: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixOutput {
    pub command: &'static str,
    pub convention: String,
    pub dry_run: bool,
    pub files: Vec<FileResult>,
    pub summary: FixSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileResult {
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub reports: Vec<RenameReport>,
    pub skipped: Vec<RenamePair>,
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FixSummary {
    pub files: usize,
    pub renames: usize,
    pub skipped: usize,
    pub errors: usize,
}

pub fn run(args: FixArgs, _global: &crate::commands::GlobalArgs) -> CmdResult<FixOutput> {
    let settings = resolve_settings(&args)?;
    let convention = settings.convention()?;
    settings.validate_ignore()?;

    let registry = LanguageRegistry::builtin();
    let files = expand_files(&args.files)?;

    // An explicit language is a run-wide setting: fail now rather than per file.
    let fixed_engine = match settings.language {
        Some(_) => Some(Engine::new(&settings, &registry)?),
        None => None,
    };

    let mut engines: HashMap<String, Engine> = HashMap::new();
    let mut jobs: Vec<(PathBuf, Result<Engine, String>)> = Vec::with_capacity(files.len());
    for path in files {
        let engine = match &fixed_engine {
            Some(engine) => Ok(engine.clone()),
            None => engine_for_path(&path, &settings, &registry, &mut engines),
        };
        jobs.push((path, engine));
    }

    let results = process_all(&jobs, args.write, worker_count());

    let mut summary = FixSummary {
        files: results.len(),
        ..FixSummary::default()
    };
    for result in &results {
        summary.renames += result.reports.len();
        summary.skipped += result.skipped.len();
        if result.error.is_some() {
            summary.errors += 1;
        }
    }

    let exit_code = if summary.errors > 0 || (args.check && summary.renames > 0) {
        1
    } else {
        0
    };

    Ok((
        FixOutput {
            command: "fix",
            convention: convention.to_string(),
            dry_run: !args.write,
            files: results,
            summary,
        },
        exit_code,
    ))
}

fn worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Process files in batches of at most `workers` scoped threads. A thread
/// that cannot be spawned or panics becomes an error entry for its file.
fn process_all(
    jobs: &[(PathBuf, Result<Engine, String>)],
    write: bool,
    workers: usize,
) -> Vec<FileResult> {
    let mut results = Vec::with_capacity(jobs.len());

    for batch in jobs.chunks(workers.max(1)) {
        std::thread::scope(|scope| {
            let handles: Vec<_> = batch
                .iter()
                .map(|(path, engine)| {
                    let handle = std::thread::Builder::new()
                        .name("recase-fix".to_string())
                        .spawn_scoped(scope, move || process_file(path, engine, write));
                    (path, handle)
                })
                .collect();

            for (path, handle) in handles {
                let result = match handle {
                    Ok(handle) => handle.join().unwrap_or_else(|_| {
                        failed(path, None, "File processing thread panicked".to_string())
                    }),
                    Err(e) => failed(path, None, format!("Failed to start worker thread: {}", e)),
                };
                results.push(result);
            }
        });
    }

    results
}

fn resolve_settings(args: &FixArgs) -> recase::Result<CasingSettings> {
    let base = crate::commands::load_settings(args.config.as_deref())?;
    let quote_carry = args.quote_carry.as_deref().map(parse_quote_carry).transpose()?;

    Ok(base.merge(CasingSettings {
        convention: args.convention.clone(),
        language: args.language.clone(),
        ignore: args.ignore.clone(),
        quote_carry,
        ..CasingSettings::default()
    }))
}

fn parse_quote_carry(mode: &str) -> recase::Result<QuoteCarry> {
    match mode {
        "line" => Ok(QuoteCarry::Line),
        "file" => Ok(QuoteCarry::File),
        _ => Err(Error::validation_invalid_argument(
            "quote-carry",
            format!("Unknown quote carry mode '{}'. Use: line, file", mode),
        )),
    }
}

fn has_glob_chars(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}

fn expand_files(patterns: &[String]) -> recase::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        if !has_glob_chars(pattern) {
            files.push(PathBuf::from(pattern));
            continue;
        }

        let entries = glob::glob(pattern).map_err(|e| {
            Error::validation_invalid_argument("files", format!("Invalid glob '{}': {}", pattern, e))
        })?;
        files.extend(entries.flatten().filter(|p| p.is_file()));
    }

    // `a.c` and `./a.c` must become one job, or two workers write the same file.
    let mut files: Vec<PathBuf> = files
        .into_iter()
        .map(|p| std::fs::canonicalize(&p).unwrap_or(p))
        .collect();

    if files.is_empty() {
        return Err(Error::validation_invalid_argument(
            "files",
            "No files matched the given paths",
        ));
    }

    files.sort();
    files.dedup();
    Ok(files)
}

/// Pick an engine by file extension, building each language's engine once.
fn engine_for_path(
    path: &Path,
    settings: &CasingSettings,
    registry: &LanguageRegistry,
    engines: &mut HashMap<String, Engine>,
) -> Result<Engine, String> {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return Err("Cannot infer language: file has no extension (use --language)".to_string());
    };

    if let Some(engine) = engines.get(ext) {
        return Ok(engine.clone());
    }

    let per_file = CasingSettings {
        language: Some(ext.to_string()),
        ..settings.clone()
    };
    let engine = Engine::new(&per_file, registry).map_err(|e| e.message)?;
    engines.insert(ext.to_string(), engine.clone());
    Ok(engine)
}

fn failed(path: &Path, language: Option<String>, error: String) -> FileResult {
    FileResult {
        file: path.to_string_lossy().to_string(),
        language,
        reports: Vec::new(),
        skipped: Vec::new(),
        applied: false,
        error: Some(error),
    }
}

fn process_file(path: &Path, engine: &Result<Engine, String>, write: bool) -> FileResult {
    let engine = match engine {
        Ok(engine) => engine,
        Err(message) => return failed(path, None, message.clone()),
    };
    let language = Some(engine.language().to_string());
    let display = path.to_string_lossy().to_string();

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return failed(path, language, format!("Failed to read file: {}", e)),
    };

    log_status!("fix", "Scanning {} ({})", display, engine.language());
    let outcome = engine.run_content(&content);

    for pair in &outcome.skipped {
        log_status!(
            "fix",
            "{}: skipped '{}' -> '{}' (shares a line with another rename)",
            display,
            pair.original,
            pair.converted
        );
    }

    let mut applied = false;
    if write && outcome.has_changes() {
        if let Err(e) = std::fs::write(path, outcome.content()) {
            return failed(path, language, format!("Failed to write file: {}", e));
        }
        applied = true;
    }

    FileResult {
        file: display,
        language,
        reports: outcome.reports,
        skipped: outcome.skipped,
        applied,
        error: None,
    }
}
