//! Web server implementation using Axum

use tracing::{info, warn};

use crate::config::Config;

/// Start the web server
pub async fn serve(config: Config) -> anyhow::Result<()> {
    if config.uses_default_secret() {
        warn!(
            "session secret is the insecure built-in default; set EMPRE__AUTH__SESSION_SECRET before exposing this service"
        );
    }

    let app = crate::create_app(&config);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
