use crate::models::{is_uploadable_mime, MediaUpload};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// One-shot browser timer. Returns the handle for `clearTimeout`, or `None`
/// when there is no window (tests outside a browser).
pub(crate) fn set_timeout(delay_ms: u32, f: impl FnOnce() + 'static) -> Option<i32> {
    let win = web_sys::window()?;
    let cb = Closure::once_into_js(f);
    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        delay_ms.min(i32::MAX as u32) as i32,
    )
    .ok()
}

pub(crate) fn focus_element<E: AsRef<web_sys::HtmlElement>>(el: Option<E>) {
    if let Some(el) = el {
        let _ = el.as_ref().focus();
    }
}

pub(crate) fn alert(message: &str) {
    if let Some(win) = web_sys::window() {
        let _ = win.alert_with_message(message);
    }
}

type MediaCallback = Box<dyn FnOnce(Result<MediaUpload, String>)>;

/// Reads a user-selected file fully into memory. `on_done` runs exactly once.
pub(crate) fn read_media_file(
    file: web_sys::File,
    on_done: impl FnOnce(Result<MediaUpload, String>) + 'static,
) {
    let file_name = file.name();
    let mime_type = file.type_();
    if !is_uploadable_mime(&mime_type) {
        on_done(Err(format!("Unsupported file type: {file_name}")));
        return;
    }

    let reader = match web_sys::FileReader::new() {
        Ok(r) => r,
        Err(_) => {
            on_done(Err("Could not read the selected file".to_string()));
            return;
        }
    };

    let done: Rc<RefCell<Option<MediaCallback>>> = Rc::new(RefCell::new(Some(Box::new(on_done))));

    let reader2 = reader.clone();
    let done2 = done.clone();
    let onloadend = Closure::once_into_js(move || {
        let result = match reader2.result() {
            Ok(buf) if !buf.is_null() && !buf.is_undefined() => Ok(MediaUpload {
                file_name,
                mime_type,
                bytes: js_sys::Uint8Array::new(&buf).to_vec(),
            }),
            _ => Err("Could not read the selected file".to_string()),
        };
        let cb = done2.borrow_mut().take();
        if let Some(cb) = cb {
            cb(result);
        }
    });
    reader.set_onloadend(Some(onloadend.unchecked_ref()));

    if reader.read_as_array_buffer(&file).is_err() {
        let cb = done.borrow_mut().take();
        if let Some(cb) = cb {
            cb(Err("Could not read the selected file".to_string()));
        }
    }
}
