use auth_service::config::TokenConfig;
use auth_service::state::signer::SignerCell;
use auth_service::TokenClass;
use tracing::{error, info};

mod telemetry;

static SIGNER: SignerCell = SignerCell::new();

#[tokio::main]
async fn main() {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - JWT_ACCESS_SECRET / JWT_REFRESH_SECRET (required when APP_ENV=prod)
    // - JWT_ACCESS_TTL_MINUTES / JWT_REFRESH_TTL_DAYS (optional)
    let signer = match SIGNER.get_or_init(|| {
        let config = TokenConfig::from_env()?;
        info!(
            runtime_env = ?config.runtime_env,
            degraded = config.degraded.len(),
            "Token configuration loaded"
        );
        Ok(config)
    }) {
        Ok(signer) => signer,
        Err(e) => {
            error!(error = %e, "Failed to initialize credential signer");
            std::process::exit(1);
        }
    };

    info!(
        access_ttl_secs = signer.ttl_for(TokenClass::Access).as_secs(),
        refresh_ttl_secs = signer.ttl_for(TokenClass::Refresh).as_secs(),
        "Credential signer ready"
    );

    shutdown_signal().await;
    info!("Shutting down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
