use super::super::Model;
use super::super::Msg;
use super::utils::{FILE_INPUT_ID, debounce, first_file, open_file_dialog};
use vision_shared::{InputMode, MediaKind, ViewModel};
use vision_shared::view::PreviewView;
use web_sys::{DragEvent, HtmlInputElement};
use yew::prelude::*;

pub fn render_input_feed(model: &Model, view: &ViewModel, ctx: &Context<Model>) -> Html {
    html! {
        <div class="input-feed">
            {
                match view.mode.media_kind() {
                    None => render_camera(model, view),
                    Some(kind) => render_file_area(model, view, ctx, kind),
                }
            }
        </div>
    }
}

fn render_camera(model: &Model, view: &ViewModel) -> Html {
    html! {
        <div class={classes!("camera-frame", view.processing.then_some("scanning"))}>
            <video
                ref={model.camera.node_ref()}
                class="camera-video"
                autoplay=true
                playsinline=true
                muted=true
            />
            {
                if let Some(error) = &model.camera_error {
                    html! {
                        <div class="camera-error">
                            <i class="fa-solid fa-video-slash"></i>
                            <p>{ format!("Camera unavailable: {}", error) }</p>
                            <p class="hint">{"Allow camera access or switch to image or video mode."}</p>
                        </div>
                    }
                } else if !model.camera.is_live() {
                    html! {
                        <div class="camera-placeholder">
                            <i class="fa-solid fa-spinner fa-spin"></i>
                            <p>{"Starting camera..."}</p>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

fn render_file_area(model: &Model, view: &ViewModel, ctx: &Context<Model>, kind: MediaKind) -> Html {
    let link = ctx.link();

    let handle_change = link.batch_callback(|e: Event| {
        let input: HtmlInputElement = e.target_unchecked_into();
        let file = input.files().as_ref().and_then(first_file);
        input.set_value("");
        file.map(Msg::FilePicked)
    });

    let handle_drag_over = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(true)
    });

    let handle_drag_leave = link.callback(|e: DragEvent| {
        e.prevent_default();
        Msg::SetDragging(false)
    });

    let handle_drop = link.callback(Msg::HandleDrop);
    let noun = if view.mode == InputMode::Video { "video" } else { "image" };

    html! {
        <>
            <input
                type="file"
                id={FILE_INPUT_ID}
                accept={format!("{}*", kind.mime_prefix())}
                style="display: none;"
                onchange={handle_change}
            />

            <div
                id="drop-zone"
                class={classes!("upload-area", model.is_dragging.then_some("drag-over"))}
                ondragover={handle_drag_over}
                ondragleave={handle_drag_leave}
                ondrop={handle_drop}
                onclick={debounce(300, open_file_dialog)}
            >
                {
                    match &view.preview {
                        Some(preview) => render_preview(preview),
                        None => html! {
                            <div class="upload-placeholder">
                                <i class="fa-solid fa-cloud-arrow-up"></i>
                                <p>{ format!("Drag & drop an {} here, paste, or click", noun) }</p>
                                <p class="file-types">{ supported_formats(kind) }</p>
                            </div>
                        },
                    }
                }
            </div>
        </>
    }
}

fn render_preview(preview: &PreviewView) -> Html {
    match preview.kind {
        MediaKind::Image => html! {
            <img id="input-preview" src={preview.uri.clone()} alt={preview.name.clone()} />
        },
        MediaKind::Video => html! {
            <video id="input-preview" src={preview.uri.clone()} controls=true muted=true />
        },
    }
}

fn supported_formats(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "Supported formats: JPG, PNG, WEBP",
        MediaKind::Video => "Supported formats: MP4, WEBM, MOV",
    }
}
