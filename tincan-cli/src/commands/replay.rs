//! Replay command: feeds recorded course events through the activity
//! provider and writes the delivered statements as JSON lines.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tincan_core::{
    ActivityProvider, CourseEvent, ErrorsHandler, InMemoryObjectiveRepository, MemoryLocation,
    Objective, Statement,
};
use tincan_queue::{JsonLinesTransport, StatementQueue};
use tokio::io::AsyncWrite;
use tracing::{error, info, warn};

use crate::config::{ConfigLoader, TincanConfig};

/// Arguments for the `replay` command
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// JSON-lines file of course events (reads stdin if omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write statements to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// JSON array of course objectives, e.g. [{"id": "o1", "title": "..."}]
    #[arg(long)]
    pub objectives: Option<PathBuf>,

    /// Learner display name
    #[arg(long, default_value = "Learner")]
    pub name: String,

    /// Learner e-mail address
    #[arg(long)]
    pub email: String,

    /// Course id (overrides `course.id`)
    #[arg(long)]
    pub course_id: Option<String>,

    /// Launch URL (overrides `course.url`)
    #[arg(long)]
    pub url: Option<String>,

    /// Player location fragment used when routing to the error view
    #[arg(long, default_value = "")]
    pub location: String,
}

/// Outcome of a replay run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    /// Events the provider accepted
    pub handled: usize,
    /// Events the provider rejected
    pub rejected: usize,
}

/// Run the replay command
pub async fn run(args: ReplayArgs) -> Result<()> {
    let config = ConfigLoader::load()?;
    let events = read_events(args.input.as_deref())?;
    let objectives = read_objectives(args.objectives.as_deref())?;

    let writer: Box<dyn AsyncWrite + Unpin + Send> = match &args.output {
        Some(path) => Box::new(
            tokio::fs::File::create(path)
                .await
                .with_context(|| format!("Failed to create {}", path.display()))?,
        ),
        None => Box::new(tokio::io::stdout()),
    };
    let transport = Arc::new(JsonLinesTransport::new(writer));
    let (queue, drain) = StatementQueue::<Statement>::spawn(transport, config.queue.clone());

    let errors = Arc::new(ErrorsHandler::new(Arc::new(MemoryLocation::new(
        args.location.clone(),
    ))));
    let mut navigations = errors.subscribe();
    let provider = ActivityProvider::new(queue.clone(), errors, Arc::new(objectives));

    let outcome = replay(&provider, &config, &args, events).await;

    queue.flush()?.await?;
    while let Ok(navigation) = navigations.try_recv() {
        warn!(
            error = %navigation.error,
            navigate_url = %navigation.navigate_url,
            "player would show the error view"
        );
    }
    let failed = queue.failed().await;
    if !failed.is_empty() {
        error!(count = failed.len(), "statements could not be delivered");
    }

    drop(provider);
    queue.shutdown(drain).await?;

    let summary = outcome?;
    info!(
        handled = summary.handled,
        rejected = summary.rejected,
        "replay finished"
    );
    Ok(())
}

/// Activate the provider and hand it every event in order.
///
/// Each `courseFinished` batch is awaited before the next event.
pub async fn replay(
    provider: &ActivityProvider,
    config: &TincanConfig,
    args: &ReplayArgs,
    events: Vec<(usize, CourseEvent)>,
) -> Result<ReplaySummary> {
    let actor = provider.create_actor(&args.name, &args.email)?;
    let course_id = args.course_id.as_deref().unwrap_or(&config.course.id);
    let url = args.url.as_deref().or(config.course.url.as_deref());
    provider.init(&config.xapi, course_id, actor, &config.course.title, url)?;

    let mut summary = ReplaySummary::default();
    for (line, event) in events {
        let name = event.name();
        match provider.handle(event) {
            Ok(Some(flush)) => {
                flush.await?;
                summary.handled += 1;
            }
            Ok(None) => summary.handled += 1,
            Err(e) => {
                warn!(line, event = name, "event rejected: {}", e);
                summary.rejected += 1;
            }
        }
    }

    Ok(summary)
}

/// Read events from a file or stdin, tagged with their line number.
fn read_events(path: Option<&Path>) -> Result<Vec<(usize, CourseEvent)>> {
    let contents = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
    };
    parse_events(&contents)
}

fn parse_events(contents: &str) -> Result<Vec<(usize, CourseEvent)>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            let line_no = index + 1;
            serde_json::from_str(line)
                .map(|event| (line_no, event))
                .with_context(|| format!("Failed to parse event on line {}", line_no))
        })
        .collect()
}

fn read_objectives(path: Option<&Path>) -> Result<InMemoryObjectiveRepository> {
    let Some(path) = path else {
        return Ok(InMemoryObjectiveRepository::new());
    };
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let objectives: Vec<Objective> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse objectives in {}", path.display()))?;
    Ok(objectives.into_iter().collect())
}
