use gloo_file::File as GlooFile;
use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use vision_shared::ViewModel;
use wasm_bindgen::JsCast;
use web_sys::{FileList, HtmlElement};
use yew::prelude::*;

pub const FILE_INPUT_ID: &str = "file-input";

// Debounce function to limit button events
pub fn debounce<F>(duration: u32, callback: F) -> Callback<MouseEvent>
where
    F: Fn() + Clone + 'static,
{
    let timeout = Rc::new(RefCell::new(None::<Timeout>));

    Callback::from(move |_| {
        let mut timeout_ref = timeout.borrow_mut();

        if let Some(old_timeout) = timeout_ref.take() {
            old_timeout.cancel();
        }

        let inner_callback = callback.clone();
        *timeout_ref = Some(Timeout::new(duration, move || inner_callback()));
    })
}

pub fn first_file(file_list: &FileList) -> Option<GlooFile> {
    file_list.item(0).map(GlooFile::from)
}

pub fn open_file_dialog() {
    let input = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(FILE_INPUT_ID));
    if let Some(input) = input.and_then(|element| element.dyn_into::<HtmlElement>().ok()) {
        input.click();
    }
}

pub fn render_error_message(view: &ViewModel) -> Html {
    if let Some(error_msg) = &view.error {
        html! {
            <div class="error-message">
                <i class="fa-solid fa-circle-exclamation"></i>
                <p>{ error_msg }</p>
            </div>
        }
    } else {
        html! {}
    }
}
