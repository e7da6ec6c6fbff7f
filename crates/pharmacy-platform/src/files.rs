//! Browser file selection for prescription uploads.
//!
//! `FilePicker` owns a hidden `<input type="file">` appended to the page.
//! Picked (or dropped) files are classified, given an object-URL preview and
//! parked in a slot the UI polls every frame.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, File, HtmlInputElement, Url};

use pharmacy_core::ports::PreviewPort;
use pharmacy_types::{
    PharmacyError, Result,
    upload::{classify, PrescriptionFile, PreviewRef, ACCEPTED_FILE_TYPES},
};

type Slot = Rc<RefCell<Option<Result<PrescriptionFile>>>>;

pub struct FilePicker {
    input: HtmlInputElement,
    picked: Slot,
    _on_change: Closure<dyn FnMut()>,
}

impl FilePicker {
    pub fn new() -> Result<Self> {
        let document = gloo_utils::document();
        let input: HtmlInputElement = document
            .create_element("input")
            .map_err(js_err)?
            .dyn_into()
            .map_err(|_| PharmacyError::JsInterop("created element is not an input".to_string()))?;
        input.set_type("file");
        input.set_accept(ACCEPTED_FILE_TYPES);
        input.set_hidden(true);
        gloo_utils::body().append_child(&input).map_err(js_err)?;

        let picked: Slot = Rc::new(RefCell::new(None));
        let slot = picked.clone();
        let input_clone = input.clone();
        let on_change = Closure::wrap(Box::new(move || {
            if let Some(file) = input_clone.files().and_then(|list| list.get(0)) {
                *slot.borrow_mut() = Some(prescription_from_file(&file));
            }
            // so picking the same file again still fires `change`
            input_clone.set_value("");
        }) as Box<dyn FnMut()>);
        input.set_onchange(Some(on_change.as_ref().unchecked_ref()));

        Ok(Self {
            input,
            picked,
            _on_change: on_change,
        })
    }

    /// Open the browser's file dialog.
    pub fn open(&self) {
        self.input.click();
    }

    /// Accept a file dropped onto the page (egui hands over the bytes).
    pub fn accept_dropped(&self, name: &str, mime: &str, bytes: &[u8]) {
        let result = classify(name, mime).and_then(|kind| {
            let preview = blob_url(bytes, mime)?;
            Ok(PrescriptionFile::new(name, kind, bytes.len() as u64, preview))
        });
        *self.picked.borrow_mut() = Some(result);
    }

    /// Take the most recent pick, if any arrived since the last call.
    pub fn take_picked(&self) -> Option<Result<PrescriptionFile>> {
        self.picked.borrow_mut().take()
    }
}

impl Drop for FilePicker {
    fn drop(&mut self) {
        self.input.set_onchange(None);
        self.input.remove();
    }
}

fn prescription_from_file(file: &File) -> Result<PrescriptionFile> {
    let name = file.name();
    let kind = classify(&name, &file.type_())?;
    let preview = Url::create_object_url_with_blob(file).map_err(js_err)?;
    log::debug!("Picked {} ({} bytes)", name, file.size());
    Ok(PrescriptionFile::new(
        name,
        kind,
        file.size() as u64,
        PreviewRef(preview),
    ))
}

fn blob_url(bytes: &[u8], mime: &str) -> Result<PreviewRef> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;
    Ok(PreviewRef(url))
}

fn js_err(e: JsValue) -> PharmacyError {
    PharmacyError::JsInterop(format!("{:?}", e))
}

/// Revokes object URLs once their file leaves the upload slot.
pub struct ObjectUrlPreviews;

impl PreviewPort for ObjectUrlPreviews {
    fn release(&self, preview: &PreviewRef) {
        if !preview.as_str().starts_with("blob:") {
            return;
        }
        if let Err(e) = Url::revoke_object_url(preview.as_str()) {
            log::warn!("Failed to revoke preview {}: {:?}", preview.as_str(), e);
        }
    }
}
