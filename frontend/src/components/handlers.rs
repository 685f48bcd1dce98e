use super::super::Msg;
use super::super::Model;
use super::utils::first_file;
use crate::camera::{CameraFeed, stop_tracks};
use crate::config::store_analysis_kind;
use crate::media::PickedMedia;
use gloo_file::File as GlooFile;
use vision_shared::{AnalysisKind, InputMode};
use wasm_bindgen_futures::spawn_local;
use web_sys::{ClipboardEvent, DragEvent, FileList, MediaStream};
use yew::prelude::*;

pub fn handle_select_mode(model: &mut Model, ctx: &Context<Model>, mode: InputMode) -> bool {
    model.controller.select_mode(mode);
    model.is_dragging = false;
    if mode.is_camera() {
        if !model.camera.is_live() {
            open_camera(ctx);
        }
    } else {
        model.camera.stop();
        model.camera_error = None;
    }
    true
}

pub fn handle_select_analysis_kind(model: &mut Model, kind: AnalysisKind) -> bool {
    if model.controller.state().analysis_kind() == kind {
        return false;
    }
    model.controller.select_analysis_kind(kind);
    store_analysis_kind(kind);
    true
}

pub fn handle_file_picked(model: &mut Model, file: GlooFile) -> bool {
    log::info!("Picked {} ({})", file.name(), file.raw_mime_type());
    if let Err(e) = model.controller.pick_file(PickedMedia::from(file)) {
        log::debug!("Pick rejected: {}", e);
    }
    true
}

pub fn open_camera(ctx: &Context<Model>) {
    let link = ctx.link().clone();
    spawn_local(async move {
        link.send_message(Msg::CameraOpened(CameraFeed::open().await));
    });
}

pub fn handle_camera_opened(model: &mut Model, stream: Result<MediaStream, String>) -> bool {
    match stream {
        // The user left camera mode while the permission prompt was open.
        Ok(stream) if !model.controller.state().mode().is_camera() => {
            stop_tracks(&stream);
            false
        }
        Ok(stream) => {
            model.camera_error = None;
            model.camera.attach(stream);
            true
        }
        Err(e) => {
            log::error!("Could not open camera: {}", e);
            model.camera_error = Some(e);
            true
        }
    }
}

pub fn handle_run_analysis(model: &mut Model, ctx: &Context<Model>) -> bool {
    let Some(ticket) = model.controller.run_analysis(&model.camera) else {
        return true;
    };

    let dispatcher = model.controller.dispatcher().clone();
    let transport = model.transport;
    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = dispatcher.send(&transport, ticket.request).await;
        link.send_message(Msg::AnalysisFinished(ticket.generation, outcome));
    });
    true
}

pub fn check_health(model: &Model, ctx: &Context<Model>) {
    let dispatcher = model.controller.dispatcher().clone();
    let transport = model.transport;
    let link = ctx.link().clone();
    spawn_local(async move {
        let outcome = dispatcher.check_health(&transport).await;
        if let Err(e) = &outcome {
            log::warn!("Health check failed: {}", e);
        }
        link.send_message(Msg::HealthChecked(outcome));
    });
}

pub fn handle_drop(model: &mut Model, ctx: &Context<Model>, event: DragEvent) -> bool {
    event.prevent_default();
    model.is_dragging = false;

    if let Some(file_list) = event.data_transfer().and_then(|data| data.files()) {
        process_file_list(model, ctx, file_list);
    }

    true
}

pub fn handle_paste(model: &mut Model, ctx: &Context<Model>, event: ClipboardEvent) -> bool {
    if model.controller.state().mode().is_camera() {
        return false;
    }
    if let Some(file_list) = event.clipboard_data().and_then(|data| data.files()) {
        if file_list.length() > 0 {
            event.prevent_default();
            process_file_list(model, ctx, file_list);
            return true;
        }
    }
    false
}

pub fn process_file_list(model: &Model, ctx: &Context<Model>, file_list: FileList) {
    if model.controller.state().mode().is_camera() {
        log::warn!("Ignoring {} file(s) in camera mode", file_list.length());
        return;
    }
    if file_list.length() > 1 {
        log::warn!("Only the first of {} files is used", file_list.length());
    }
    if let Some(file) = first_file(&file_list) {
        ctx.link().send_message(Msg::FilePicked(file));
    }
}
