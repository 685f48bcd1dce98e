//! The live camera: one `getUserMedia` stream shown in a `<video>` element,
//! with frames grabbed through an off-screen canvas.

use js_sys::{Array, Object, Reflect};
use vision_shared::FrameSource;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CanvasRenderingContext2d, HtmlCanvasElement, HtmlVideoElement, MediaStream,
    MediaStreamConstraints, MediaStreamTrack,
};
use yew::NodeRef;

const FRAME_MIME: &str = "image/jpeg";
const FRAME_QUALITY: f64 = 0.92;
const IDEAL_WIDTH: f64 = 1280.0;
const IDEAL_HEIGHT: f64 = 720.0;

#[derive(Default)]
pub struct CameraFeed {
    video: NodeRef,
    stream: Option<MediaStream>,
}

impl CameraFeed {
    pub fn node_ref(&self) -> NodeRef {
        self.video.clone()
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_some()
    }

    /// Asks the browser for the front-facing camera.
    pub async fn open() -> Result<MediaStream, String> {
        let devices = web_sys::window()
            .ok_or("No window available")?
            .navigator()
            .media_devices()
            .map_err(describe)?;

        let video = Object::new();
        set(&video, "width", &JsValue::from_f64(IDEAL_WIDTH))?;
        set(&video, "height", &JsValue::from_f64(IDEAL_HEIGHT))?;
        set(&video, "facingMode", &JsValue::from_str("user"))?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::FALSE);
        constraints.set_video(&video);

        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(describe)?;
        let stream = JsFuture::from(promise).await.map_err(describe)?;
        stream.dyn_into::<MediaStream>().map_err(describe)
    }

    /// Takes ownership of `stream`, stopping any stream held before.
    pub fn attach(&mut self, stream: MediaStream) {
        self.stop();
        self.stream = Some(stream);
        self.bind();
    }

    /// Points the `<video>` element at the stream once it is mounted.
    pub fn bind(&self) {
        let (Some(stream), Some(video)) = (&self.stream, self.video.cast::<HtmlVideoElement>()) else {
            return;
        };
        if video.src_object().is_some() {
            return;
        }
        video.set_src_object(Some(stream));
        if let Err(e) = video.play() {
            gloo_console::error!("Camera playback failed:", e);
        }
    }

    pub fn stop(&mut self) {
        if let Some(stream) = self.stream.take() {
            stop_tracks(&stream);
            log::debug!("Camera stream stopped");
        }
        if let Some(video) = self.video.cast::<HtmlVideoElement>() {
            video.set_src_object(None);
        }
    }
}

impl FrameSource for CameraFeed {
    fn capture_frame(&self) -> Option<String> {
        let video = self.video.cast::<HtmlVideoElement>()?;
        let (width, height) = (video.video_width(), video.video_height());
        if self.stream.is_none() || width == 0 || height == 0 {
            return None;
        }

        let canvas = web_sys::window()?
            .document()?
            .create_element("canvas")
            .ok()?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        context
            .draw_image_with_html_video_element(&video, 0.0, 0.0)
            .ok()?;

        canvas
            .to_data_url_with_type_and_encoder_options(FRAME_MIME, &JsValue::from_f64(FRAME_QUALITY))
            .ok()
    }
}

impl Drop for CameraFeed {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Stops every track of a stream nobody will display.
pub fn stop_tracks(stream: &MediaStream) {
    let tracks: Array = stream.get_tracks();
    for track in tracks.iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), String> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(describe)
}

fn describe(err: JsValue) -> String {
    gloo_console::error!("Camera error:", err.clone());
    err.as_string()
        .or_else(|| {
            Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| "Camera unavailable".to_string())
}
