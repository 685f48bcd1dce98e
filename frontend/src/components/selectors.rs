use super::super::Model;
use super::super::Msg;
use strum::IntoEnumIterator;
use vision_shared::{AnalysisKind, InputMode, ViewModel};
use yew::prelude::*;

fn mode_label(mode: InputMode) -> (&'static str, &'static str) {
    match mode {
        InputMode::Camera => ("fa-solid fa-camera", "Camera"),
        InputMode::Image => ("fa-solid fa-image", "Image"),
        InputMode::Video => ("fa-solid fa-film", "Video"),
    }
}

fn kind_label(kind: AnalysisKind) -> (&'static str, &'static str) {
    match kind {
        AnalysisKind::All => ("fa-solid fa-layer-group", "All"),
        AnalysisKind::Emotion => ("fa-solid fa-face-smile", "Emotion"),
        AnalysisKind::Fingers => ("fa-solid fa-hand", "Fingers"),
        AnalysisKind::Objects => ("fa-solid fa-shapes", "Objects"),
    }
}

pub fn render_mode_selector(view: &ViewModel, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <div class="mode-selector" role="tablist">
            { for InputMode::iter().map(|mode| {
                let (icon, label) = mode_label(mode);
                let active = view.mode == mode;
                html! {
                    <button
                        key={mode.as_ref()}
                        class={classes!("mode-btn", active.then_some("active"))}
                        role="tab"
                        aria-selected={active.to_string()}
                        onclick={link.callback(move |_| Msg::SelectMode(mode))}
                    >
                        <i class={icon}></i>{ format!(" {}", label) }
                    </button>
                }
            })}
        </div>
    }
}

pub fn render_analysis_selector(view: &ViewModel, ctx: &Context<Model>) -> Html {
    let link = ctx.link();

    html! {
        <div class="analysis-selector">
            <span class="selector-label">{"Analyze:"}</span>
            { for AnalysisKind::iter().map(|kind| {
                let (icon, label) = kind_label(kind);
                let active = view.analysis_kind == kind;
                html! {
                    <button
                        key={kind.as_ref()}
                        class={classes!("kind-btn", active.then_some("active"))}
                        disabled={view.processing}
                        onclick={link.callback(move |_| Msg::SelectAnalysisKind(kind))}
                    >
                        <i class={icon}></i>{ format!(" {}", label) }
                    </button>
                }
            })}
        </div>
    }
}
