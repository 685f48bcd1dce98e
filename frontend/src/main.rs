mod api;
mod camera;
mod components;
mod config;
mod media;

use api::GlooTransport;
use camera::CameraFeed;
use components::handlers;
use components::header::ServiceStatus;
use gloo_events::EventListener;
use gloo_file::File as GlooFile;
use gloo_timers::callback::Interval;
use vision_shared::{
    AnalysisKind, AnalysisResult, DispatchError, Generation, InputMode, ServiceHealth, UiController,
};
use wasm_bindgen::JsCast;
use web_sys::{ClipboardEvent, DragEvent, MediaStream};
use yew::prelude::*;

const HEALTH_POLL_MS: u32 = 30_000;

// Yew msg components
pub enum Msg {
    // Selection
    SelectMode(InputMode),
    SelectAnalysisKind(AnalysisKind),

    // Input operations
    FilePicked(GlooFile),
    CameraOpened(Result<MediaStream, String>),

    // Analysis operations
    RunAnalysis,
    AnalysisFinished(Generation, Result<AnalysisResult, DispatchError>),
    Clear,

    // Service status
    CheckHealth,
    HealthChecked(Result<ServiceHealth, DispatchError>),

    // Input events
    SetDragging(bool),
    HandleDrop(DragEvent),
    HandlePaste(ClipboardEvent),
}

// Main component
pub struct Model {
    pub controller: UiController<media::PickedMedia>,
    pub transport: GlooTransport,
    pub camera: CameraFeed,
    pub camera_error: Option<String>,
    pub health: ServiceStatus,
    pub is_dragging: bool,
    paste_listener: Option<EventListener>,
    health_poll: Option<Interval>,
}

impl Component for Model {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let controller = UiController::with_selection(
            config::load_config(),
            InputMode::Camera,
            config::load_analysis_kind(),
        );

        let mut model = Self {
            controller,
            transport: GlooTransport,
            camera: CameraFeed::default(),
            camera_error: None,
            health: ServiceStatus::Checking,
            is_dragging: false,
            paste_listener: None,
            health_poll: None,
        };

        if let Some(window) = web_sys::window() {
            let link = ctx.link().clone();
            let listener = EventListener::new(&window, "paste", move |event| {
                if let Some(clipboard_event) = event.dyn_ref::<ClipboardEvent>() {
                    link.send_message(Msg::HandlePaste(clipboard_event.clone()));
                }
            });
            model.paste_listener = Some(listener);
        }

        let link = ctx.link().clone();
        model.health_poll = Some(Interval::new(HEALTH_POLL_MS, move || {
            link.send_message(Msg::CheckHealth);
        }));
        ctx.link().send_message(Msg::CheckHealth);

        handlers::open_camera(ctx);
        model
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            // Selection
            Msg::SelectMode(mode) => handlers::handle_select_mode(self, ctx, mode),
            Msg::SelectAnalysisKind(kind) => handlers::handle_select_analysis_kind(self, kind),

            // Input operations
            Msg::FilePicked(file) => handlers::handle_file_picked(self, file),
            Msg::CameraOpened(stream) => handlers::handle_camera_opened(self, stream),

            // Analysis operations
            Msg::RunAnalysis => handlers::handle_run_analysis(self, ctx),
            Msg::AnalysisFinished(generation, outcome) => {
                self.controller.finish(generation, outcome)
            }
            Msg::Clear => {
                self.controller.clear();
                true
            }

            // Service status
            Msg::CheckHealth => {
                handlers::check_health(self, ctx);
                false
            }
            Msg::HealthChecked(outcome) => {
                let status = ServiceStatus::from(outcome);
                let changed = status != self.health;
                self.health = status;
                changed
            }

            // Input events
            Msg::SetDragging(is_dragging) => {
                self.is_dragging = is_dragging;
                true
            }
            Msg::HandleDrop(event) => handlers::handle_drop(self, ctx, event),
            Msg::HandlePaste(event) => handlers::handle_paste(self, ctx, event),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let view = self.controller.view();

        html! {
            <div class="container">
                { components::header::render_header(self) }

                <main class="main-content">
                    <div class="controls">
                        { components::selectors::render_mode_selector(&view, ctx) }
                        { components::selectors::render_analysis_selector(&view, ctx) }
                    </div>
                    { components::input_feed::render_input_feed(self, &view, ctx) }
                    { components::actions::render_actions(&view, ctx) }
                    { components::utils::render_error_message(&view) }
                    { components::results::render_results(&view) }
                </main>

                <footer class="app-footer">
                    <p>{"VisionAI | Emotion, finger and object analysis"}</p>
                </footer>
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, _first_render: bool) {
        self.camera.bind();
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("App starting...");
    yew::Renderer::<Model>::new().render();
}
