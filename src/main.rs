use std::{path::Path, process, sync::Arc};

use letterpress::{
    application::{
        error::AppError,
        repos::TemplatesRepo,
        templates::{TemplateService, export_file_name},
    },
    config,
    domain::document::Document,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, HttpState},
        layout::FileLayoutSource,
        memory::InMemoryTemplates,
        telemetry,
    },
};
use letterpress_api_types::TemplatePayload;
use time::format_description::well_known::Rfc3339;
use tokio::{signal, sync::Notify, task::JoinError};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
        config::Command::Render(args) => run_render(settings, args).await,
        config::Command::Save(args) => run_save(settings, args).await,
        config::Command::History(_) => run_history(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let store: Arc<dyn TemplatesRepo> = match init_repositories(&settings).await? {
        Some(repositories) => repositories,
        None => {
            warn!(
                target = "letterpress::serve",
                "database url is not configured; saved templates are kept in memory only"
            );
            Arc::new(InMemoryTemplates::new())
        }
    };

    let templates = TemplateService::new(store, layout_source(&settings));
    serve_http(&settings, HttpState::new(templates)).await
}

async fn run_render(settings: config::Settings, args: config::RenderArgs) -> Result<(), AppError> {
    let document = read_document(&args.file).await?;
    let templates = TemplateService::new(
        Arc::new(InMemoryTemplates::new()),
        layout_source(&settings),
    );

    let export = templates.export(&document).await?;
    let output = args
        .output
        .unwrap_or_else(|| export_file_name(&document.title).into());

    tokio::fs::write(&output, export.html)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "letterpress::render",
        path = %output.display(),
        blocks = document.len(),
        "template rendered"
    );
    Ok(())
}

async fn run_save(settings: config::Settings, args: config::SaveArgs) -> Result<(), AppError> {
    let document = read_document(&args.file).await?;
    let templates = TemplateService::new(
        require_repositories(&settings).await?,
        layout_source(&settings),
    );

    let id = templates.save(&document).await?;
    println!("{id}");
    Ok(())
}

async fn run_history(settings: config::Settings) -> Result<(), AppError> {
    let templates = TemplateService::new(
        require_repositories(&settings).await?,
        layout_source(&settings),
    );

    for stored in templates.history().await? {
        let saved_at = stored
            .saved_at
            .format(&Rfc3339)
            .map_err(|err| AppError::unexpected(err.to_string()))?;
        println!("{}\t{}\t{}", stored.id, saved_at, stored.document.title);
    }
    Ok(())
}

fn layout_source(settings: &config::Settings) -> Arc<FileLayoutSource> {
    Arc::new(FileLayoutSource::new(settings.layout.path.clone()))
}

async fn read_document(path: &Path) -> Result<Document, AppError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    let payload: TemplatePayload = serde_json::from_str(&raw)
        .map_err(|err| AppError::validation(format!("{}: {err}", path.display())))?;
    Ok(Document::from_payload(payload))
}

async fn require_repositories(
    settings: &config::Settings,
) -> Result<Arc<PostgresRepositories>, AppError> {
    init_repositories(settings)
        .await?
        .ok_or_else(|| AppError::from(InfraError::configuration("database url is not configured")))
}

async fn init_repositories(
    settings: &config::Settings,
) -> Result<Option<Arc<PostgresRepositories>>, AppError> {
    let Some(database_url) = settings.database.url.as_ref() else {
        return Ok(None);
    };

    let pool = PostgresRepositories::connect(database_url, settings.database.max_connections.get())
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    PostgresRepositories::run_migrations(&pool)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    Ok(Some(Arc::new(PostgresRepositories::new(pool))))
}

async fn serve_http(settings: &config::Settings, state: HttpState) -> Result<(), AppError> {
    let router = http::build_router(state, &settings.server);
    let addr = settings.server.addr;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| AppError::from(InfraError::bind(addr, err)))?;
    info!(target = "letterpress::serve", addr = %addr, "listening");

    let shutdown = Arc::new(Notify::new());
    let drain = shutdown.clone();
    let server = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { drain.notified().await });
    let mut server = tokio::spawn(async move { server.await });

    tokio::select! {
        result = &mut server => return server_outcome(result),
        () = shutdown_signal() => {}
    }

    info!(
        target = "letterpress::serve",
        grace_seconds = settings.server.graceful_shutdown.as_secs(),
        "shutdown requested; draining connections"
    );
    shutdown.notify_one();

    match tokio::time::timeout(settings.server.graceful_shutdown, &mut server).await {
        Ok(result) => server_outcome(result),
        Err(_) => {
            warn!(
                target = "letterpress::serve",
                "graceful shutdown timed out; aborting open connections"
            );
            server.abort();
            Ok(())
        }
    }
}

fn server_outcome(result: Result<std::io::Result<()>, JoinError>) -> Result<(), AppError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(AppError::unexpected(format!("server error: {err}"))),
        Err(err) => Err(AppError::unexpected(format!("server task failed: {err}"))),
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(target = "letterpress::serve", error = %err, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(target = "letterpress::serve", error = %err, "SIGTERM handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
