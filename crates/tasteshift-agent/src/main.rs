//! Headless tasteshift agent.
//!
//! Loads the host menu fixture, starts a session over it and reads host
//! events as line commands from stdin (see `tasteshift_agent::harness`).
//! Audio and avatar output go to the log.

use std::sync::Arc;

use tasteshift_agent::harness::{parse_command, Command};
use tasteshift_agent::{config, run_enforcement, Session, VoiceParts};
use tasteshift_catalog::ContentBundle;
use tasteshift_page::fixture;
use tasteshift_store::{DbRuntimeSettings, PreferenceStore};
use tasteshift_voice::LogSink;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

fn resolve_config_path() -> (Option<String>, &'static str) {
    if let Some(path) = std::env::args()
        .nth(1)
        .filter(|value| !value.trim().is_empty())
    {
        return (Some(path), "cli-arg");
    }

    if let Ok(path) = std::env::var("TASTESHIFT_CONFIG_PATH") {
        if !path.trim().is_empty() {
            return (Some(path), "env-var");
        }
    }

    (None, "default")
}

#[tokio::main]
async fn main() {
    let (resolved_config_path, config_source) = resolve_config_path();
    let selected_config_path = resolved_config_path.as_deref().or(Some("config.toml"));

    let config = config::load_config(selected_config_path)
        .expect("failed to load configuration, the agent cannot start without valid config");

    let filter =
        EnvFilter::try_new(&config.logging.level).unwrap_or_else(|_| EnvFilter::new("info"));
    if config.logging.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        source = config_source,
        path = selected_config_path.unwrap_or("<none>"),
        "resolved startup configuration path"
    );

    let prefs = PreferenceStore::open(
        &config.store.path,
        DbRuntimeSettings {
            busy_timeout_ms: config.store.busy_timeout_ms,
            ..DbRuntimeSettings::default()
        },
    )
    .expect("failed to open preference store, check store.path in config");

    let bundle = ContentBundle::load(config.content.catalog_path.as_deref())
        .expect("failed to load catalog overrides, check content.catalog_path in config");

    let voice = VoiceParts::remote(&config.voice, &prefs, Arc::new(LogSink));
    let (session, mutations) =
        Session::start(&config, bundle, fixture::host_menu_page(), prefs, voice)
            .expect("failed to start session");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let enforcement = tokio::spawn(run_enforcement(
        Arc::clone(&session),
        mutations,
        config.enforcement,
        shutdown_rx,
    ));
    session.arm_engagement();

    tokio::select! {
        () = read_commands(Arc::clone(&session)) => {}
        () = shutdown_signal() => {}
    }

    let _ = shutdown_tx.send(true);
    match enforcement.await {
        Ok(stats) => tracing::info!(?stats, "tasteshift agent shut down"),
        Err(e) => tracing::error!("enforcement task join error: {}", e),
    }
}

async fn read_commands(session: Arc<Session>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(e) => {
                tracing::error!("failed to read command: {}", e);
                return;
            }
        };
        let parsed = parse_command(&line, &session.page());
        match parsed {
            Ok(Command::Quit) => return,
            Ok(Command::Status) => {
                let machine = session.machine();
                tracing::info!(
                    theme = %session.theme(),
                    phase = ?machine.phase(),
                    fallback = machine.fallback_prompted(),
                    playing = session.arbiter().is_active(),
                    backend = %session.lookup().base_url(),
                    "status"
                );
            }
            Ok(Command::Event(event)) => {
                session.dispatch(event);
            }
            Err(e) => tracing::warn!("{}", e),
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => { tracing::info!("received SIGINT, shutting down"); }
        () = terminate => { tracing::info!("received SIGTERM, shutting down"); }
    }
}
