//! Small DOM helpers shared by the page bindings

use gravity_search_core::{Error, Result};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Window};

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| Error::Host("no global `window` exists".to_string()))
}

pub fn document(window: &Window) -> Result<Document> {
    window
        .document()
        .ok_or_else(|| Error::Host("window has no document".to_string()))
}

/// Look up an element by id and cast it to the expected type
pub fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| Error::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| Error::Host(format!("#{} has an unexpected element type", id)))
}

/// Describe a thrown JS value
pub fn js_err(error: JsValue) -> Error {
    if let Some(err) = error.dyn_ref::<js_sys::Error>() {
        return Error::Host(String::from(err.message()));
    }
    if let Some(value) = error.as_string() {
        return Error::Host(value);
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return Error::Host(value);
        }
    }
    Error::Host("js error".to_string())
}

/// Hand an error back across the JS boundary
pub fn to_js(error: Error) -> JsValue {
    JsValue::from_str(&error.to_string())
}
