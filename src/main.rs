//! Service entry point: loads configuration, wires the adapters to the
//! application services, and serves the HTTP API.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use studio_concierge::adapters::ai::{AnthropicConfig, AnthropicProvider};
use studio_concierge::adapters::email::{ResendMailer, WebhookAuditSink};
use studio_concierge::adapters::http::{concierge_router, ConciergeState};
use studio_concierge::adapters::rate_limiter::InMemoryRateLimiter;
use studio_concierge::application::{
    AdmissionGate, ChatService, DialogueDriver, NotificationDispatcher, NotifyService,
    OriginPolicy,
};
use studio_concierge::config::AppConfig;
use studio_concierge::domain::NotifiedLeads;
use studio_concierge::ports::{AiProvider, AuditSink, Mailer, RateLimiter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("fatal: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::new(
        config.gate.rate_limit_max_requests,
        config.gate.rate_limit_window_secs,
    ));

    let provider: Arc<dyn AiProvider> = Arc::new(AnthropicProvider::new(
        AnthropicConfig::new(config.ai.anthropic_api_key.clone())
            .with_model(config.ai.model.clone())
            .with_base_url(config.ai.base_url.clone())
            .with_timeout(Duration::from_secs(config.ai.request_timeout_secs)),
    ));

    let mailer: Arc<dyn Mailer> = Arc::new(ResendMailer::new(config.email.resend_api_key.clone()));

    let audit: Option<Arc<dyn AuditSink>> = config
        .email
        .audit_sink_url
        .as_deref()
        .map(|url| Arc::new(WebhookAuditSink::new(url)) as Arc<dyn AuditSink>);

    let policy = OriginPolicy::new(
        config.server.allowed_origins_list(),
        config.server.preview_origin_suffix.clone(),
    );

    let gate = AdmissionGate::new(
        policy.clone(),
        limiter,
        config.gate.max_turns,
        config.gate.max_turn_chars,
    );
    let driver = DialogueDriver::new(
        provider,
        config.email.owner_email.clone(),
        config.ai.max_completion_tokens,
    );
    let dispatcher = Arc::new(NotificationDispatcher::new(
        mailer,
        audit,
        config.email.from_header(),
        config.email.owner_email.clone(),
    ));

    let chat = Arc::new(ChatService::new(
        gate,
        driver,
        Arc::new(NotifiedLeads::new()),
        Arc::clone(&dispatcher),
    ));
    let notify = Arc::new(NotifyService::new(dispatcher));

    let router = concierge_router(
        ConciergeState::new(chat, notify),
        policy,
        Duration::from_secs(config.server.request_timeout_secs),
    );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, environment = ?config.server.environment, "listening");

    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
