use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use glasnik::kernel::event::{Event, InputEvent};
use glasnik::kernel::executor::{DocumentExecutor, ExecutionError, ExecutionReport};
use glasnik::kernel::outcome::Outcome;
use glasnik::kernel::state::{ActionKind, PendingAction};
use glasnik::nlu::Utterance;
use glasnik::{AppConfig, KnownDocument, Reactor};

/// Console driver: type utterances, optionally suffixed with `| confidence`.
#[derive(Debug, Parser)]
#[command(name = "glasnik", version)]
struct Args {
    /// JSON config file; built-in Croatian defaults when omitted.
    #[arg(long, env = "GLASNIK_CONFIG")]
    config: Option<PathBuf>,

    /// JSON array of known documents.
    #[arg(long, env = "GLASNIK_DOCUMENTS")]
    documents: Option<PathBuf>,
}

/// Stand-in for the host's document service. Documents without a handle
/// are treated as unreadable.
struct ConsoleExecutor;

#[async_trait]
impl DocumentExecutor for ConsoleExecutor {
    async fn execute(&self, action: &PendingAction) -> Result<ExecutionReport, ExecutionError> {
        let doc = &action.target_document;
        let Some(handle) = &doc.handle else {
            return Err(ExecutionError::PermissionDenied(format!(
                "no readable handle for {}",
                doc.id
            )));
        };
        let verb = match action.kind {
            ActionKind::Send => "sent",
            ActionKind::Select => "selected",
        };
        tracing::info!("Document {} {} via {}", doc.id, verb, handle);
        Ok(ExecutionReport {
            message: Some(format!("{} {}", verb, doc.name)),
            reference: Some(handle.clone()),
        })
    }
}

fn parse_line(line: &str) -> Utterance {
    if let Some((text, confidence)) = line.rsplit_once('|') {
        if let Ok(value) = confidence.trim().parse::<f32>() {
            return Utterance::with_confidence(text.trim(), value);
        }
    }
    Utterance::new(line.trim())
}

fn feedback(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Help { examples } => format!("Možete reći: {}", examples.join("; ")),
        Outcome::NotUnderstood { .. } => "Nisam razumio naredbu, ponovite.".to_string(),
        Outcome::LowConfidence { .. } => "Nisam vas dobro čuo, ponovite jasnije.".to_string(),
        Outcome::NotFound { alternatives, .. } if alternatives.is_empty() => {
            "Dokument nije pronađen.".to_string()
        }
        Outcome::NotFound { alternatives, .. } => {
            let names: Vec<&str> = alternatives.iter().map(|d| d.name.as_str()).collect();
            format!("Dokument nije pronađen. Jeste li mislili: {}?", names.join(", "))
        }
        Outcome::AwaitingConfirmation { action } => {
            format!("Potvrdite: {} ? (da / poništi)", action.target_document.name)
        }
        Outcome::PendingReplaced { previous } => {
            format!("Zamijenjena prethodna naredba za {}.", previous.target_document.name)
        }
        Outcome::AlreadyPending { pending, .. } => format!(
            "Već čeka potvrda za {}. Potvrdite ili poništite.",
            pending.target_document.name
        ),
        Outcome::Queued { position, .. } => format!("Naredba je u redu čekanja ({}).", position),
        Outcome::QueueFull { .. } => "Red čekanja je pun.".to_string(),
        Outcome::Cancelled { .. } => "Poništeno.".to_string(),
        Outcome::ConfirmationExpired { .. } => "Potvrda je istekla.".to_string(),
        Outcome::NothingPending { .. } => "Nema naredbe koja čeka potvrdu.".to_string(),
        Outcome::Busy { .. } => "Pričekajte, naredba se izvršava.".to_string(),
        Outcome::Executed { action, .. } => {
            format!("Gotovo: {}.", action.target_document.name)
        }
        Outcome::ExecutionFailed { error, .. } => format!("Greška: {}", error),
        Outcome::PermissionDenied { .. } => "Nema dozvole za čitanje dokumenta.".to_string(),
    }
}

fn load_documents(path: &Path) -> Result<Vec<KnownDocument>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading documents from {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing documents in {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("setting default subscriber failed")?;

    let args = Args::parse();

    // 2. Config + documents
    let config = match &args.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => AppConfig::default(),
    };
    let documents = match &args.documents {
        Some(path) => load_documents(path)?,
        None => Vec::new(),
    };

    // 3. Reactor + channels
    let (tx, rx) = mpsc::channel(100);
    let (outcome_tx, mut outcome_rx) = mpsc::channel::<Outcome>(100);
    let mut reactor = Reactor::new(rx, tx.clone(), config)?;
    tx.send(Event::DocumentsReplaced(documents)).await?;

    let shutdown = CancellationToken::new();

    // 4. Outcome printer
    let printer = tokio::spawn(async move {
        while let Some(outcome) = outcome_rx.recv().await {
            if outcome.is_recoverable_miss() {
                tracing::debug!("Recoverable miss: {:?}", outcome.kind());
            }
            println!("> {}", feedback(&outcome));
        }
    });

    // 5. Input reader (stdin)
    let input_shutdown = shutdown.clone();
    tokio::spawn(async move {
        let reader = BufReader::new(tokio::io::stdin());
        let mut lines = reader.lines();

        println!("Upišite naredbu (npr. 'pošalji ponudu 001 | 0.8'), ':listen' ili ':quit'.");

        while let Ok(Some(line)) = lines.next_line().await {
            let line = line.trim();
            let event = match line {
                "" => continue,
                ":quit" => break,
                ":listen" => InputEvent::listening_started("console"),
                ":abort" => InputEvent::listening_aborted("console"),
                _ => InputEvent::utterance("console", parse_line(line)),
            };
            if let Err(e) = tx.send(event.into()).await {
                tracing::error!("Failed to send input: {}", e);
                break;
            }
        }
        input_shutdown.cancel();
    });

    // `run` consumes the outcome sender, so the printer drains and exits.
    reactor
        .run(Arc::new(ConsoleExecutor), outcome_tx, shutdown)
        .await;
    printer.await.context("outcome printer panicked")?;

    let snapshot = reactor.telemetry.snapshot();
    tracing::info!(
        "Session: {} utterances, {} resolutions ({:.0}% hit), {} confirmations",
        snapshot.recognition_stats.total,
        snapshot.resolution_stats.attempts,
        snapshot.resolution_stats.hit_rate * 100.0,
        snapshot.confirmation_stats.confirmed
    );
    Ok(())
}
