//! Connection lifecycle.
//!
//! The transport reports connection changes as [`TransportEvent`]s. Each
//! event goes through [`next_status`], a pure transition table, and the
//! resulting [`Effect`] is then applied by [`NewsBot::handle_event`].

use std::sync::atomic::Ordering;

use news_core::{CloseReason, TransportEvent};
use tracing::{debug, info, warn};

use crate::pairing::render_pairing_image;
use crate::state::{ConnectionStatus, SessionId};
use crate::NewsBot;

/// Side effect of a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Render and store the pairing payload.
    ShowPairing(String),
    /// Start a session: new id, one scan, then arm the timers.
    OpenSession,
    /// End the session and stop the timers.
    CloseSession(CloseReason),
    /// Persist updated credentials.
    SaveCredentials,
    None,
}

/// New status plus the effect to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub status: ConnectionStatus,
    pub effect: Effect,
}

impl Transition {
    fn to(status: ConnectionStatus, effect: Effect) -> Self {
        Self { status, effect }
    }
}

/// Transition table for connection events.
pub fn next_status(current: ConnectionStatus, event: &TransportEvent) -> Transition {
    use crate::state::ConnectionStatus::*;

    match (current, event) {
        // A stale pairing code cannot replace an open session.
        (Active, TransportEvent::PairingIssued(_)) => Transition::to(Active, Effect::None),
        (_, TransportEvent::PairingIssued(code)) => {
            Transition::to(QrReady, Effect::ShowPairing(code.clone()))
        }
        (Active, TransportEvent::Opened) => Transition::to(Active, Effect::None),
        (_, TransportEvent::Opened) => Transition::to(Active, Effect::OpenSession),
        (_, TransportEvent::Closed(reason)) => {
            Transition::to(Disconnected, Effect::CloseSession(reason.clone()))
        }
        (status, TransportEvent::CredentialsUpdated) => {
            Transition::to(status, Effect::SaveCredentials)
        }
    }
}

impl NewsBot {
    /// Run sessions forever, pausing `reconnect_delay` between them.
    pub async fn run(&self) {
        loop {
            let reason = self.run_session().await;
            let delay = self.inner.config.reconnect_delay;
            info!(
                status_code = ?reason.status_code,
                delay = ?delay,
                "Session closed, reconnecting"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Start one session and process its events until it closes.
    ///
    /// A failed start or an event stream that ends without a close event
    /// counts as a transient close.
    pub async fn run_session(&self) -> CloseReason {
        self.begin_connect().await;

        let mut events = match self.inner.transport.start().await {
            Ok(events) => events,
            Err(e) => {
                warn!(transport = self.inner.transport.name(), error = %e, "Transport start failed");
                return self.close_with(CloseReason::transient(e.to_string())).await;
            }
        };

        while let Some(event) = events.recv().await {
            if let TransportEvent::Closed(reason) = event {
                return self.close_with(reason).await;
            }
            self.handle_event(event).await;
        }

        self.close_with(CloseReason::transient("event stream ended")).await
    }

    /// Apply one transport event.
    pub async fn handle_event(&self, event: TransportEvent) -> Transition {
        let transition = {
            let mut state = self.inner.state.write().await;
            let transition = next_status(state.status, &event);
            state.status = transition.status;

            match &transition.effect {
                Effect::ShowPairing(code) => {
                    state.pairing_image = match render_pairing_image(code) {
                        Ok(image) => Some(image),
                        Err(e) => {
                            warn!(error = %e, "Failed to render pairing code");
                            None
                        }
                    };
                }
                Effect::OpenSession => {
                    let id = self.inner.sessions.fetch_add(1, Ordering::SeqCst) + 1;
                    state.pairing_image = None;
                    state.session = Some(SessionId(id));
                }
                Effect::CloseSession(_) => {
                    state.pairing_image = None;
                    state.session = None;
                }
                Effect::SaveCredentials | Effect::None => {}
            }
            transition
        };

        match &transition.effect {
            Effect::ShowPairing(_) => {
                info!("Pairing code issued, scan it from the dashboard");
            }
            Effect::OpenSession => {
                info!("Session open");
                let outcome = self.scan().await;
                debug!(outcome = ?outcome, "Initial scan finished");
                self.arm_timers().await;
            }
            Effect::CloseSession(reason) => {
                self.cancel_timers().await;
                if reason.is_logged_out(self.inner.config.logout_status) {
                    warn!("Logged out, discarding credentials");
                    if let Err(e) = self.inner.transport.clear_credentials().await {
                        warn!(error = %e, "Failed to clear credentials");
                    }
                } else {
                    info!(
                        status_code = ?reason.status_code,
                        message = reason.message.as_deref().unwrap_or(""),
                        "Connection closed"
                    );
                }
            }
            Effect::SaveCredentials => {
                if let Err(e) = self.inner.transport.save_credentials().await {
                    warn!(error = %e, "Failed to save credentials");
                }
            }
            Effect::None => {
                debug!(status = %transition.status, "Event ignored");
            }
        }

        transition
    }

    async fn begin_connect(&self) {
        let mut state = self.inner.state.write().await;
        state.status = ConnectionStatus::Connecting;
        state.pairing_image = None;
        debug!("Connecting");
    }

    async fn close_with(&self, reason: CloseReason) -> CloseReason {
        self.handle_event(TransportEvent::Closed(reason.clone())).await;
        reason
    }
}
