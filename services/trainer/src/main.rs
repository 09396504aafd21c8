mod config;

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::fmt::time::ChronoLocal;

use avatar_session::content;
use avatar_session::scoring::{DemoScores, ScoringProvider};
use avatar_session::training::TrainingSession;
use avatar_session::{DemoDevices, EmbedConfig, ViewRouter};
use avatar_session_types::scenario::ScenarioId;
use avatar_session_types::{ConnectionState, InboundMessage};

use crate::config::{Config, SIMULATED_INIT_DELAY_MS};

#[derive(Parser)]
#[command(about = "Run one simulated avatar training session end to end")]
struct Cli {
    /// Scenario to rehearse: alex, ena, or dat
    #[arg(default_value = "alex")]
    scenario: ScenarioId,
}

#[tokio::main]
async fn main() -> Result<()> {
    // --- 1. Load Configuration ---
    let config = Config::from_env().context("Failed to load application configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(ChronoLocal::rfc_3339())
        .init();

    // --- 3. Parse Command-Line Arguments ---
    let args = Cli::parse();

    // --- 4. Enter the training view ---
    let mut router = ViewRouter::new();
    router.start_training(args.scenario);

    let profile = content::scenario_profile(router.scenario());
    tracing::info!(
        "Training active: {} ({}) - {}",
        profile.doctor_name,
        profile.specialty,
        profile.description
    );

    let embed_config = EmbedConfig::builder()
        .with_api_key(&config.api_key)
        .with_embed_url(&profile.embed_url)
        .build();
    let mut session = TrainingSession::new(embed_config, DemoDevices::granting());
    let intake = session.start().await.context("Failed to start session")?;

    // --- 5. Simulated provider feed ---
    // The hosted embed posts `init` once its player is up; in this demo a
    // task stands in for it. `intake` itself must outlive the walkthrough:
    // closing the channel reads as the provider dropping the session.
    let origin = session.embed_config().trusted_origin().to_string();
    let provider_intake = intake.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(SIMULATED_INIT_DELAY_MS)).await;
        let message = InboundMessage::new(
            origin,
            serde_json::json!({"type": "streaming-embed", "action": "init"}),
        );
        if let Err(e) = provider_intake.send(message).await {
            tracing::warn!("simulated provider feed closed: {}", e);
        }
    });

    wait_for_settled_state(&session).await?;
    tracing::info!(
        "Connected; camera ready: {}, avatar ready: {}",
        session.camera_ready(),
        session.avatar_ready()
    );

    // --- 6. Walk the script ---
    let script = content::training_script(router.scenario());
    tracing::info!("Script: {}", script.title);

    session.start_voice_chat();
    for section in &script.sections {
        tracing::info!("> {}", section.title);
        session.send_message(&section.content);
        tokio::time::sleep(Duration::from_millis(400)).await;
        // Cut the simulated response short so the walkthrough stays brisk.
        session.interrupt_avatar();
    }
    session.toggle_mute();
    session.stop_voice_chat();

    // --- 7. End the session and review ---
    let metrics = session.metrics();
    session.end();
    router.end_training();

    let report = DemoScores.review(&metrics);
    tracing::info!(
        "Session complete: {}s, {} messages exchanged",
        metrics.duration_secs,
        metrics.messages_exchanged
    );
    tracing::info!(
        "Scores: overall {}, scientific {}, behavioral {}",
        report.overall_score,
        report.scientific_score,
        report.behavioral_score
    );
    for skill in &report.skills {
        tracing::info!("  {}: {} (target {})", skill.skill, skill.score, skill.target);
    }
    for insight in &report.key_insights {
        tracing::info!("  [{:?}] {}: {}", insight.kind, insight.title, insight.description);
    }

    router.return_home();
    Ok(())
}

async fn wait_for_settled_state(session: &TrainingSession<DemoDevices>) -> Result<()> {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(20);
    loop {
        match session.state() {
            ConnectionState::Connected => return Ok(()),
            ConnectionState::Error => bail!("avatar embed failed to load"),
            _ => {}
        }
        if tokio::time::Instant::now() >= deadline {
            bail!("session did not settle in time");
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
}
