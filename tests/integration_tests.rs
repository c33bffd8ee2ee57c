use cucumber::World;

pub mod common;
pub mod steps;

pub use common::world::TermfolioWorld;

/// # termfolio Integration Tests
///
/// Feature files under `features/` drive a real `AppController` through
/// `MockEventStream` / `MockRenderStream`, so no TTY is needed. The fetch
/// scenarios point the site origin at a `wiremock` server.
///
/// ```bash
/// cargo test --test integration_tests
/// TERMFOLIO_TEST_LOG=debug cargo test --test integration_tests -- --nocapture
/// ```
#[tokio::main]
async fn main() {
    init_tracing();
    run_features_sequentially().await;
}

fn init_tracing() {
    #[allow(clippy::disallowed_methods)]
    let log_level = std::env::var("TERMFOLIO_TEST_LOG")
        .unwrap_or_else(|_| "error".to_string())
        .to_lowercase();

    let level = match log_level.as_str() {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        _ => tracing::Level::ERROR,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .ok();
}

/// Features run one after another; each scenario gets its own temp store.
async fn run_features_sequentially() {
    let features = [
        "features/dispatch.feature",
        "features/history.feature",
        "features/output.feature",
        "features/settings.feature",
        "features/boot.feature",
        "features/fetch.feature",
    ];

    for (i, feature) in features.iter().enumerate() {
        tracing::info!("[{}/{}] Starting {}", i + 1, features.len(), feature);
        TermfolioWorld::cucumber()
            .fail_on_skipped()
            .run_and_exit(feature)
            .await;
        tracing::info!("[{}/{}] Completed {}", i + 1, features.len(), feature);
    }
}
