#![warn(clippy::all)]

use handle_errors::return_error;
use tracing_subscriber::fmt::format::FmtSpan;
use warp::{Filter, http::Method};

mod config;
mod routes;
mod store;
mod types;
mod views;

fn build_routes(
    store: store::Store,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let store_filter = warp::any().map(move || store.clone());

    let cors = warp::cors()
        .allow_any_origin()
        .allow_header("Content-Type")
        .allow_methods(&[Method::POST, Method::GET]);

    let home = warp::get()
        .and(warp::path::end())
        .and(store_filter.clone())
        .and_then(routes::question::list_questions)
        .with(warp::trace(|info| {
            tracing::info_span!(
                "home request",
                method = %info.method(),
                path = %info.path(),
                id = %uuid::Uuid::new_v4(),
            )
        }));

    let submit_question = warp::post()
        .and(warp::path("submit-question"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::form())
        .and_then(routes::question::submit_question);

    let check_answer = warp::post()
        .and(warp::path("check-answer"))
        .and(warp::path::end())
        .and(store_filter.clone())
        .and(warp::body::form())
        .and_then(routes::answer::check_answer);

    let static_assets = warp::path("static").and(warp::fs::dir("static"));
    let service_worker = warp::path!("sw.js").and(warp::fs::file("static/sw.js"));
    let manifest = warp::path!("manifest.json").and(warp::fs::file("static/manifest.json"));

    home.or(submit_question)
        .or(check_answer)
        .or(static_assets)
        .or(service_worker)
        .or(manifest)
        .with(cors)
        .with(warp::trace::request())
        .recover(return_error)
}

#[tokio::main]
async fn main() -> Result<(), handle_errors::Error> {
    let config = config::Config::new().expect("Config can't be set");

    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        format!(
            "handle_errors={},quiz_web={},warp={}",
            config.log_level, config.log_level, config.log_level
        )
    });

    tracing_subscriber::fmt()
        .with_env_filter(log_filter)
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let store = match config.store {
        config::StoreKind::Memory => store::Store::in_memory(),
        config::StoreKind::Postgres => {
            let store = store::Store::postgres(&config.db_url()).await;
            if let store::Store::Postgres(pg_store) = &store {
                sqlx::migrate!()
                    .run(&pg_store.connection)
                    .await
                    .expect("Cannot migrate DB");
            }
            store
        }
    };

    tracing::info!("Server starting on :{}...", config.port);
    warp::serve(build_routes(store))
        .run(([127, 0, 0, 1], config.port))
        .await;

    Ok(())
}
