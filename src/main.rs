use std::sync::Arc;

use meetup_server::config::ServerConfig;
use meetup_server::handlers::Dispatcher;
use meetup_server::logging;
use meetup_server::resolver::Resolver;
use meetup_server::server::MeetupServer;
use meetup_server::store::{InMemoryStore, JsonFileStore, MeetupStore};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("meetup-server: configuration error: {e}");
            std::process::exit(1);
        }
    };

    logging::init(config.log_format);

    let store: Arc<dyn MeetupStore> = match &config.store_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "using JSON file store");
            Arc::new(JsonFileStore::new(path.clone()))
        }
        None => {
            tracing::info!("using in-memory store");
            Arc::new(InMemoryStore::new())
        }
    };

    let resolver = Resolver::new(store);
    let dispatcher = Dispatcher::new(&resolver).with_request_timeout(config.request_timeout);

    let server = MeetupServer::new(dispatcher);
    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "fatal error");
        eprintln!("meetup-server: fatal error: {e}");
        std::process::exit(1);
    }
}
