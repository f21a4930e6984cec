//! OS signal handling.
//!
//! # Responsibilities
//! - Wait for SIGTERM or SIGINT (Ctrl+C elsewhere)
//! - Report which signal arrived so startup can trigger shutdown
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)

/// Resolve once a termination signal arrives, returning its name.
#[cfg(unix)]
pub async fn wait_for_termination() -> Result<&'static str, std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    let mut interrupt = signal(SignalKind::interrupt())?;

    tokio::select! {
        _ = terminate.recv() => Ok("SIGTERM"),
        _ = interrupt.recv() => Ok("SIGINT"),
    }
}

/// Resolve once a termination signal arrives, returning its name.
#[cfg(not(unix))]
pub async fn wait_for_termination() -> Result<&'static str, std::io::Error> {
    tokio::signal::ctrl_c().await?;
    Ok("CTRL_C")
}
