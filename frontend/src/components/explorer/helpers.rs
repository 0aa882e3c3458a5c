//! Browser utilities for the explorer: transient toasts, file downloads and
//! timestamps.

use chrono::{DateTime, Utc};
use common::config::TOAST_DURATION_MS;
use gloo_file::{Blob, ObjectUrl};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlAnchorElement};

/// Shows `message` at the bottom of the page for a few seconds. Toasts
/// stack in the `.toast-area` container, created on first use.
pub fn show_toast(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(area) = toast_area(&document) else {
        return;
    };
    let Ok(toast) = document.create_element("div") else {
        return;
    };
    toast.set_class_name("toast");
    toast.set_text_content(Some(message));
    if area.append_child(&toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(TOAST_DURATION_MS).await;
            toast.remove();
        });
    }
}

fn toast_area(document: &Document) -> Option<Element> {
    if let Some(existing) = document.query_selector(".toast-area").ok().flatten() {
        return Some(existing);
    }
    let area = document.create_element("div").ok()?;
    area.set_class_name("toast-area");
    document.body()?.append_child(&area).ok()?;
    Some(area)
}

/// Offers `contents` to the user as a file download.
pub fn download_text(file_name: &str, contents: &str, mime_type: &str) -> Result<(), String> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|e| format!("{:?}", e))?
        .dyn_into()
        .map_err(|_| "not an anchor".to_string())?;

    let url = ObjectUrl::from(Blob::new_with_options(contents, Some(mime_type)));
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();
    // Dropping the ObjectUrl revokes it; keep it until the download has started.
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(1000).await;
        drop(url);
    });
    Ok(())
}

pub fn now() -> DateTime<Utc> {
    DateTime::from_timestamp_millis(js_sys::Date::now() as i64).unwrap_or_default()
}

/// Clears a file input so picking the same file again fires `change`.
pub fn reset_file_input(input: &web_sys::HtmlInputElement) {
    input.set_value("");
}
