use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use interview::{
    Definition, EngineOptions, FileStore, InterviewEngine, StateStore, restore_share_code,
    run_interview, share_code,
};
use interview_dialoguer_wizard::DialoguerFrontend;
use interview_document::{PageOptions, flowchart, generate_document, html_page_with_options};
use log::LevelFilter;

/// Run an interview definition in the terminal and generate its document.
#[derive(Parser, Debug)]
#[command(name = "interview")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Interview definition file (YAML or JSON)
    definition: PathBuf,

    /// Save progress to this file after every change and resume from it
    #[arg(long)]
    state: Option<PathBuf>,

    /// Discard saved progress before starting
    #[arg(long)]
    reset: bool,

    /// Resume from a share code
    #[arg(long, value_name = "CODE")]
    restore: Option<String>,

    /// Print a share code for the final state
    #[arg(long)]
    share: bool,

    /// Name of the definition template to render (defaults to the first one)
    #[arg(long, value_name = "NAME")]
    template: Option<String>,

    /// Write the Markdown document here instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the document as a standalone HTML page
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,

    /// Print a Mermaid flowchart of the interview
    #[arg(long)]
    diagram: bool,

    /// Disable colors in prompts
    #[arg(long)]
    plain: bool,

    /// Log engine state after every change
    #[arg(long)]
    debug: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match (cli.verbose, cli.debug) {
        (_, true) | (2.., _) => LevelFilter::Debug,
        (1, _) => LevelFilter::Info,
        _ => LevelFilter::Warn,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    let definition = Definition::from_path(&cli.definition)
        .with_context(|| format!("Failed to load {}", cli.definition.display()))?;
    let options = EngineOptions::default().with_debug(cli.debug);
    let mut engine = InterviewEngine::with_options(definition, options)?;

    let mut store = cli.state.as_ref().map(FileStore::new);
    if cli.reset {
        if let Some(store) = store.as_mut() {
            store.clear()?;
        }
    }

    let snapshot = match cli.restore.as_deref() {
        Some(code) => {
            let snapshot = restore_share_code(code);
            if snapshot.is_none() {
                log::warn!("Ignoring invalid share code");
            }
            snapshot
        }
        None => store.as_ref().and_then(|store| store.load()),
    };
    if snapshot.is_some() {
        log::info!("Resuming saved interview");
    }
    engine.initialize(snapshot);

    if let Some(mut store) = store {
        engine.subscribe(move |state| {
            if let Err(err) = store.save(state) {
                log::warn!("Failed to save progress: {err}");
            }
        });
    }

    if cli.diagram {
        println!("{}", flowchart(engine.definition(), Some(engine.state())));
    }

    let mut frontend = if cli.plain {
        DialoguerFrontend::plain()
    } else {
        DialoguerFrontend::new()
    };

    if let Err(err) = run_interview(&mut engine, &mut frontend) {
        if err.is_cancelled() {
            println!("Interview stopped.");
            if cli.share {
                println!("Share code: {}", share_code(engine.state())?);
            }
            return Ok(());
        }
        return Err(err.into());
    }

    let template = select_template(engine.definition(), cli.template.as_deref())?;
    let document = generate_document(engine.definition(), engine.answers(), template)?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &document.markdown)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Document written to {}", path.display());
        }
        None => println!("{}", document.markdown),
    }

    if let Some(path) = &cli.html {
        let title = engine
            .definition()
            .metadata()
            .and_then(|metadata| metadata.get("title"))
            .and_then(|title| title.as_str())
            .unwrap_or("Generated Document");
        let page = html_page_with_options(&document.html, &PageOptions::new().with_title(title));
        fs::write(path, page).with_context(|| format!("Failed to write {}", path.display()))?;
        println!("HTML written to {}", path.display());
    }

    if cli.share {
        println!("Share code: {}", share_code(engine.state())?);
    }

    Ok(())
}

/// The template source to render: the named one, else the first, else the default.
fn select_template<'a>(definition: &'a Definition, name: Option<&str>) -> anyhow::Result<Option<&'a str>> {
    let templates = definition.templates();
    match name {
        Some(name) => templates
            .iter()
            .find(|template| template.name == name)
            .map(|template| Some(template.content.as_str()))
            .with_context(|| format!("No template named {name}")),
        None => Ok(templates.first().map(|template| template.content.as_str())),
    }
}
