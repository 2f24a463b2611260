use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use outlook_contacts::{
    AppState, Config, ConfigLocation, MemorySessionStore, SessionContext, TokenResponse, router,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt().try_init();

    // CONTACTS_CONFIG is a JSON file path, or "ENV" / "SECRET"
    let location = match std::env::var("CONTACTS_CONFIG").as_deref() {
        Ok("ENV") => ConfigLocation::Env,
        Ok("SECRET") => ConfigLocation::Secret,
        Ok(path) => ConfigLocation::File(path.to_string()),
        Err(_) => ConfigLocation::File("config.json".to_string()),
    };
    let config = Config::load(location).await?;

    // Sessions normally come from the sign-in flow; seed one so the route can be tried.
    let sessions = MemorySessionStore::new();
    if let Ok(token) = std::env::var("DEMO_ACCESS_TOKEN") {
        let tokens = TokenResponse::new(token, Timestamp::now() + SignedDuration::from_hours(1));
        sessions
            .insert(
                "demo",
                SessionContext::signed_in(tokens, std::env::var("DEMO_USER_EMAIL").ok()),
            )
            .await;
        tracing::info!("seeded session 'demo'; send Cookie: session_id=demo");
    }

    let app = router(AppState::from_config(&config, Arc::new(sessions))?);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(addr = %config.listen_addr, "serving GET /contacts");
    axum::serve(listener, app).await?;
    Ok(())
}
