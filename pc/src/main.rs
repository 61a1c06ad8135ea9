//! PromptCraft - prompt template catalog
//!
//! CLI entry point for browsing the catalog and rendering prompts.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use promptcraft::authoring::{self, PromptDraft};
use promptcraft::catalog::{Catalog, Query};
use promptcraft::cli::{Cli, Command, OutputFormat, parse_assignment};
use promptcraft::config::Config;
use promptcraft::domain::PromptTemplate;
use promptcraft::render::{PlaceholderSyntax, RenderState};
use promptcraft::session::FillSession;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptcraft")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("promptcraft.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }
    info!(catalog = %config.catalog.display(), access = ?config.access, "promptcraft starting");

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Categories => cmd_categories(&config),
        Command::List { category, search, all } => cmd_list(&config, category, search, all),
        Command::Show { id } => cmd_show(&config, &id),
        Command::Render {
            id,
            set,
            example,
            format,
        } => cmd_render(&config, &id, &set, example, format),
        Command::Fill { id } => cmd_fill(&config, &id),
        Command::Draft { file, id } => cmd_draft(&config, &file, &id),
        Command::Check { file } => cmd_check(&config, file.as_deref().unwrap_or(config.catalog.as_path())),
    }
}

fn load_catalog(config: &Config) -> Result<Catalog> {
    Catalog::load(&config.catalog).context(format!("Failed to load catalog {}", config.catalog.display()))
}

fn open_prompt<'a>(catalog: &'a Catalog, config: &Config, id: &str) -> Result<&'a PromptTemplate> {
    match catalog.open(id, config.access) {
        Ok(template) => Ok(template),
        Err(e) if e.is_access() => {
            debug!(%id, error = %e, "open_prompt: refused");
            Err(eyre!(
                "{} (run `pc list` to see available prompts; locked prompts need `access: premium`)",
                e
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// The template's own convention wins; the config only fills in for templates that declare none
fn effective_syntax(config: &Config, template: &PromptTemplate) -> PlaceholderSyntax {
    match (template.syntax, config.syntax) {
        (None, Some(forced)) => forced,
        _ => template.resolved_syntax(),
    }
}

fn new_state<'a>(config: &Config, template: &'a PromptTemplate) -> RenderState<'a> {
    RenderState::new(template).with_syntax(effective_syntax(config, template))
}

fn cmd_categories(config: &Config) -> Result<()> {
    let catalog = load_catalog(config)?;
    let summaries = catalog.categories();
    if summaries.is_empty() {
        println!("No categories found");
        return Ok(());
    }
    for summary in summaries {
        let category = summary.category;
        println!(
            "{:<24} {:>4} prompts  {}",
            category.slug.cyan(),
            summary.prompt_count,
            category.name
        );
        if let Some(description) = &category.description {
            println!("    {}", description.dimmed());
        }
    }
    Ok(())
}

fn print_prompt_line(prompt: &PromptTemplate) {
    let category = prompt.category.as_deref().unwrap_or("-");
    let mut line = format!("  {:<24} {}  {}", prompt.id.cyan(), prompt.title, format!("[{}]", category).dimmed());
    if !prompt.variables.is_empty() {
        line.push_str(&format!(" ({} variables)", prompt.variables.len()));
    }
    if !prompt.is_published() {
        line.push_str(&format!(" {}", prompt.status.to_string().yellow()));
    }
    println!("{}", line);
}

fn cmd_list(config: &Config, category: Option<String>, search: Option<String>, all: bool) -> Result<()> {
    let catalog = load_catalog(config)?;
    let query = Query {
        category,
        search,
        include_unpublished: all,
    };
    let listing = catalog.browse(&query);
    if listing.is_empty() {
        println!("No prompts found");
        return Ok(());
    }

    let (free, locked) = listing.partition();
    if !free.is_empty() {
        println!("{} ({})", "Free prompts".bold(), free.len());
        free.iter().for_each(|p| print_prompt_line(p));
    }
    if !locked.is_empty() {
        if !free.is_empty() {
            println!();
        }
        println!("{} ({})", "Premium prompts".bold(), locked.len());
        locked.iter().for_each(|p| print_prompt_line(p));
    }
    Ok(())
}

fn cmd_show(config: &Config, id: &str) -> Result<()> {
    let catalog = load_catalog(config)?;
    let template = open_prompt(&catalog, config, id)?;
    let state = new_state(config, template);

    println!("{} ({})", template.title.bold(), template.id.cyan());
    if let Some(description) = &template.description {
        println!("{}", description);
    }
    println!(
        "category: {}  type: {}  syntax: {}{}",
        template.category.as_deref().unwrap_or("-"),
        template.kind,
        state.syntax(),
        if template.is_locked { "  locked" } else { "" }
    );
    if !template.tags.is_empty() {
        println!("tags: {}", template.tags.join(", "));
    }
    if !template.use_cases.is_empty() {
        println!("use cases: {}", template.use_cases.join(", "));
    }

    println!();
    println!("{}", template.content);
    println!();

    if template.variables.is_empty() {
        println!("No variables");
    } else {
        println!("{}", "Variables".bold());
        for variable in &template.variables {
            let required = if variable.required { " (required)" } else { "" };
            println!(
                "  {} {}{}  {}",
                variable.name.cyan(),
                variable.kind.to_string().dimmed(),
                required,
                variable.display_label()
            );
            if !variable.options.is_empty() {
                println!("      options: {}", variable.options.join(" | "));
            }
            if let Some(description) = &variable.description {
                println!("      {}", description.dimmed());
            }
        }
    }

    let example = if template.has_examples() { "available".green() } else { "none".dimmed() };
    println!("example values: {}", example);

    for warning in authoring::warnings(template, state.syntax()) {
        println!("{} {}", "warning:".yellow(), warning);
    }
    Ok(())
}

fn cmd_render(config: &Config, id: &str, set: &[String], example: bool, format: OutputFormat) -> Result<()> {
    let catalog = load_catalog(config)?;
    let template = open_prompt(&catalog, config, id)?;
    let mut state = new_state(config, template);

    if example && !state.load_example() {
        eprintln!("{} {} has no example values", "warning:".yellow(), id);
    }
    for arg in set {
        let (name, value) = parse_assignment(arg).ok_or_else(|| eyre!("Expected NAME=VALUE, got {:?}", arg))?;
        state.set(name, value)?;
    }

    let rendered = state.rendered();
    let pending = state.pending();
    match format {
        OutputFormat::Text => {
            println!("{}", rendered);
            if !pending.is_empty() {
                eprintln!("{} {}", "pending:".yellow(), pending.join(", "));
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "id": template.id,
                "rendered": rendered,
                "fill_status": state.fill_status(),
                "pending": pending,
                "using_example": state.using_example(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn cmd_fill(config: &Config, id: &str) -> Result<()> {
    let catalog = load_catalog(config)?;
    let template = open_prompt(&catalog, config, id)?;
    let mut session = FillSession::new(new_state(config, template));
    session.run()?;

    let state = session.state();
    println!();
    println!("{}", state.rendered());
    let missing: Vec<&str> = state.missing_required().iter().map(|v| v.name.as_str()).collect();
    if !missing.is_empty() {
        eprintln!("{} {}", "required but empty:".yellow(), missing.join(", "));
    }
    Ok(())
}

fn cmd_draft(config: &Config, file: &Path, id: &str) -> Result<()> {
    let content = fs::read_to_string(file).context(format!("Failed to read draft {}", file.display()))?;
    let draft: PromptDraft = serde_yaml::from_str(&content).context("Failed to parse draft")?;
    let template = draft.validate(id)?;

    for warning in authoring::warnings(&template, effective_syntax(config, &template)) {
        eprintln!("{} {}", "warning:".yellow(), warning);
    }
    print!("{}", serde_yaml::to_string(&template)?);
    Ok(())
}

fn cmd_check(config: &Config, path: &Path) -> Result<()> {
    let catalog = Catalog::load(path).context(format!("Catalog {} is invalid", path.display()))?;

    let mut warning_count = 0;
    for prompt in catalog.prompts() {
        for warning in authoring::warnings(prompt, effective_syntax(config, prompt)) {
            println!("{} {}: {}", "warning:".yellow(), prompt.id, warning);
            warning_count += 1;
        }
    }
    println!(
        "{} {} prompts, {} categories, {} warnings",
        "✓".green(),
        catalog.len(),
        catalog.categories().len(),
        warning_count
    );
    Ok(())
}
