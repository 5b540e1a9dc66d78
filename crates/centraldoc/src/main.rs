mod cli;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use centraldoc_core::{Batch, DocxWriter, Fetcher, FsArtifacts, export_floorplans};

use crate::cli::{Cli, Command, DebugLevel, GlobalOpts};
use crate::error::CliError;

const LOG_FILE: &str = "centraldoc.log";
const CRATES: [&str; 4] = [
    "centraldoc",
    "centraldoc_api",
    "centraldoc_config",
    "centraldoc_core",
];

// The batch is strictly sequential, one request in flight at a time.
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    let code = match run(cli).await {
        Ok(()) => 0,
        Err(err) => {
            let code = err.exit_code();
            eprintln!("{:?}", miette::Report::new(err));
            code
        }
    };
    std::process::exit(code);
}

// ── Tracing ──────────────────────────────────────────────────────────

fn level(global: &GlobalOpts) -> &'static str {
    match global.debug_level {
        Some(DebugLevel::Notset) => "trace",
        Some(DebugLevel::Debug) => "debug",
        Some(DebugLevel::Info) => "info",
        Some(DebugLevel::Warning) => "warn",
        Some(DebugLevel::Error | DebugLevel::Critical) => "error",
        None => match global.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        },
    }
}

/// Console plus `<data dir>/centraldoc.log`. The returned guard flushes
/// the log file on drop.
fn init_tracing(global: &GlobalOpts) -> Option<WorkerGuard> {
    let level = level(global);
    let directives: Vec<String> = CRATES.iter().map(|c| format!("{c}={level}")).collect();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,{}", directives.join(","))));

    let data_dir = config::data_directory(global);
    let appender = std::fs::create_dir_all(&data_dir)
        .ok()
        .and_then(|()| {
            RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(LOG_FILE)
                .build(&data_dir)
                .ok()
        });
    let (file_layer, guard) = match appender {
        Some(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (
                Some(fmt::layer().with_ansi(false).with_writer(writer)),
                Some(guard),
            )
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(file_layer)
        .init();

    if guard.is_none() {
        warn!(dir = %data_dir.display(), "cannot open log file, logging to console only");
    }
    guard
}

// ── Dispatch ─────────────────────────────────────────────────────────

async fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Completions(args) = &cli.command {
        use clap::CommandFactory;
        use clap_complete::generate;

        let mut cmd = Cli::command();
        generate(args.shell, &mut cmd, "centraldoc", &mut std::io::stdout());
        return Ok(());
    }

    let _guard = init_tracing(&cli.global);
    tracing::debug!(command = ?cli.command, "dispatching command");

    match cli.command {
        Command::Generate(args) => generate(&cli.global, args.no_pdf).await,
        Command::Floorplans => floorplans(&cli.global).await,
        Command::Completions(_) => Ok(()),
    }
}

async fn generate(global: &GlobalOpts, no_pdf: bool) -> Result<(), CliError> {
    let batch_config = config::batch(global, no_pdf)?;
    let connection = config::connection(global)?;
    let context = config::report_context(&batch_config);

    let client = connection.connect()?;
    let fetcher = Fetcher::new(client);
    let writer = DocxWriter::with_template(batch_config.documents.template.as_deref())?;
    let artifacts = FsArtifacts::new(
        batch_config.documents.images_dir.clone(),
        batch_config.documents.bom_dir.clone(),
    );

    let batch = Batch::new(fetcher, writer, artifacts, batch_config, context);
    let summary = batch.run().await?;
    info!(
        written = summary.written(),
        failed = summary.failed(),
        devices = summary.registry.len(),
        "documentation run finished"
    );

    let color = output::should_color(&global.color);
    output::print_output(&output::render_summary(&global.output, &summary, color)?);
    Ok(())
}

async fn floorplans(global: &GlobalOpts) -> Result<(), CliError> {
    let batch_config = config::batch(global, true)?;
    let connection = config::connection(global)?;
    let images_dir = batch_config.documents.images_dir;

    let fetcher = Fetcher::new(connection.connect()?);
    let export = export_floorplans(&fetcher, &images_dir).await?;

    output::print_output(&output::render_floorplans(
        &global.output,
        &export,
        &images_dir,
    )?);
    Ok(())
}
