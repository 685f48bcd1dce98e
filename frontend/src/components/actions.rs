use super::super::Model;
use super::super::Msg;
use super::utils::debounce;
use vision_shared::ViewModel;
use yew::prelude::*;

pub fn render_actions(view: &ViewModel, ctx: &Context<Model>) -> Html {
    let link = ctx.link().clone();

    html! {
        <div class="button-container">
            <button
                class="analyze-btn"
                disabled={!view.can_run}
                onclick={debounce(300, {
                    let link = link.clone();
                    move || link.send_message(Msg::RunAnalysis)
                })}
            >
                { render_run_button_content(view) }
            </button>
            <button
                class="analyze-btn"
                style="background-color: var(--danger-color);"
                disabled={!view.can_clear}
                onclick={link.callback(|_| Msg::Clear)}
            >
                <i class="fa-solid fa-trash"></i>{" Clear"}
            </button>
        </div>
    }
}

fn render_run_button_content(view: &ViewModel) -> Html {
    if view.processing {
        html! { <><i class="fa-solid fa-spinner fa-spin"></i>{" Analyzing..."}</> }
    } else if view.mode.is_camera() {
        html! { <><i class="fa-solid fa-camera"></i>{" Capture & Analyze"}</> }
    } else {
        let name = view
            .preview
            .as_ref()
            .map(|preview| preview.name.clone())
            .unwrap_or_else(|| "Selected File".to_string());

        let display_name = if name.chars().count() > 20 {
            format!("{}...", name.chars().take(17).collect::<String>())
        } else {
            name
        };

        html! { <><i class="fa-solid fa-magnifying-glass"></i>{ format!(" Analyze \"{}\"", display_name) }</> }
    }
}
