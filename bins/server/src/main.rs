use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "menu-service", version, about = "Restaurant menu management API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Insert the demo menu; existing names are skipped
    Seed,
}

fn init_logging(format: &str) {
    common::utils::logging::init_logging(format);
    info!(service = "menu-service", event = "logger_init", "tracing subscriber initialized");
}

async fn seed(cfg: configs::AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let report = service::seed::seed_demo_menu(&db).await?;
    info!(categories = report.categories_created, items = report.items_created, "seed finished");
    db.close().await?;
    Ok(())
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and the config variables apply
    dotenv().ok();
    let cli = Cli::parse();

    let cfg = match configs::AppConfig::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("invalid configuration: {e:#}");
            return std::process::ExitCode::FAILURE;
        }
    };
    init_logging(&cfg.logging.format);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "menu-service",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let worker_threads = cfg.server.worker_threads;
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    if let Some(w) = worker_threads {
        builder.worker_threads(w);
    }

    let rt = match builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "menu-service", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(
        service = "menu-service",
        event = "start",
        %service_id,
        pid,
        version,
        threads = worker_threads.unwrap_or_default(),
        "menu service starting"
    );

    let result = rt.block_on(async move {
        match cli.command.unwrap_or(Command::Serve) {
            Command::Serve => server::run(cfg).await,
            Command::Seed => seed(cfg).await,
        }
    });

    match result {
        Ok(()) => {
            info!(service = "menu-service", event = "stop", %service_id, pid, "menu service stopped normally");
            std::process::ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "menu-service", event = "run_failed", error = %e, "menu service returned error");
            std::process::ExitCode::FAILURE
        }
    }
}
