use dotenvy::dotenv;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Brings the schema up to date and logs one line per bloc.
async fn run(cfg: configs::AppConfig) -> anyhow::Result<()> {
    let db = service::runtime::connect(&cfg.database).await?;
    let svc = service::runtime::bloc_service(&db);

    let blocs = svc.find_all().await?;
    for b in &blocs {
        info!(
            event = "bloc",
            id_bloc = ?b.id_bloc,
            nom_bloc = %b.nom_bloc,
            capacite_bloc = b.capacite_bloc,
            foyer = b.foyer.as_ref().map(|f| f.nom_foyer.as_str()).unwrap_or("-"),
            chambres = b.chambres.len(),
            "directory entry"
        );
    }
    info!(event = "summary", blocs = blocs.len(), "residence directory loaded");
    Ok(())
}

fn main() -> std::process::ExitCode {
    // .env first so RUST_LOG and DATABASE_URL apply
    dotenv().ok();

    // config.toml when present, otherwise environment only
    let (cfg, cfg_err) = match configs::AppConfig::load_and_validate() {
        Ok(cfg) => (cfg, None),
        Err(e) => (configs::AppConfig::from_env(), Some(e)),
    };
    service::runtime::init_logging(&cfg.logging);
    info!(service = "residence", event = "logger_init", format = %cfg.logging.format, "tracing subscriber initialized");
    if let Some(e) = cfg_err {
        warn!(service = "residence", event = "config_fallback", error = %e, "config.toml unusable, using DATABASE_URL");
    }

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(
            service = "residence",
            event = "panic",
            %service_id,
            pid,
            message = %info,
            "unhandled panic occurred"
        );
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "residence", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return std::process::ExitCode::FAILURE;
        }
    };

    info!(service = "residence", event = "start", %service_id, pid, version, "residence directory starting");

    rt.block_on(async move {
        tokio::select! {
            res = run(cfg) => match res {
                Ok(()) => {
                    info!(service = "residence", event = "stop", %service_id, pid, "finished");
                    std::process::ExitCode::SUCCESS
                }
                Err(e) => {
                    error!(service = "residence", event = "run_failed", error = %e, "residence run returned error");
                    std::process::ExitCode::FAILURE
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!(service = "residence", event = "shutdown_signal", %service_id, pid, "received Ctrl+C, shutting down");
                std::process::ExitCode::SUCCESS
            }
        }
    })
}
