use super::super::Model;
use vision_shared::{DispatchError, ServiceHealth};
use yew::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceStatus {
    Checking,
    Online,
    /// Reachable, but the models are not loaded.
    Degraded,
    Offline,
}

impl From<Result<ServiceHealth, DispatchError>> for ServiceStatus {
    fn from(outcome: Result<ServiceHealth, DispatchError>) -> Self {
        match outcome {
            Ok(health) if health.is_ready() => ServiceStatus::Online,
            Ok(_) => ServiceStatus::Degraded,
            Err(_) => ServiceStatus::Offline,
        }
    }
}

impl ServiceStatus {
    fn class(self) -> &'static str {
        match self {
            ServiceStatus::Checking => "status-checking",
            ServiceStatus::Online => "status-online",
            ServiceStatus::Degraded => "status-degraded",
            ServiceStatus::Offline => "status-offline",
        }
    }

    fn label(self) -> &'static str {
        match self {
            ServiceStatus::Checking => "Connecting...",
            ServiceStatus::Online => "Service online",
            ServiceStatus::Degraded => "Models not loaded",
            ServiceStatus::Offline => "Service offline",
        }
    }
}

/// Renders the application header
pub fn render_header(model: &Model) -> Html {
    let status = model.health;
    let base_url = model.controller.dispatcher().config().api_base_url.clone();

    html! {
        <header class="app-header">
            <h1><i class="fa-solid fa-eye"></i> {" VisionAI"}</h1>
            <p class="subtitle">{"Emotion, finger and object analysis from your camera or files"}</p>
            <div class={classes!("service-status", status.class())} title={base_url}>
                <span class="status-dot"></span>
                { status.label() }
            </div>
        </header>
    }
}
