mod application;
mod domain;
mod infrastructure;
mod interfaces;

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::infrastructure::config::ServerConfig;
use crate::interfaces::http::{add_log, start_server};

pub async fn run() -> std::io::Result<()> {
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = ServerConfig::load()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let logs = Arc::new(Mutex::new(Vec::new()));

    let server = start_server(config.clone(), logs.clone())?;

    info!(
        host = %config.host,
        port = config.port,
        output_dir = %config.output_dir.display(),
        "sheetjoin listening"
    );
    add_log(
        &logs,
        "INFO",
        "System",
        &format!("HTTP server started on {}:{}", config.host, config.port),
    );

    server.await
}
