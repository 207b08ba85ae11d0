//! `requestAnimationFrame` loops

use crate::dom::{js_err, window};
use gravity_search_core::{LoopFlag, Result};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

type FrameCallback = Closure<dyn FnMut(f64)>;

fn request_animation_frame(callback: &FrameCallback) -> Result<()> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map(|_| ())
        .map_err(js_err)
}

/// Run `frame` on every animation frame until `flag` is stopped
pub fn animation_loop<F>(flag: LoopFlag, mut frame: F) -> Result<()>
where
    F: FnMut(f64) + 'static,
{
    let f: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        if !flag.is_running() {
            return;
        }
        frame(timestamp);

        // Request next frame
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(e) = request_animation_frame(callback) {
                log::error!("Animation loop halted: {}", e);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    let result = match g.borrow().as_ref() {
        Some(callback) => request_animation_frame(callback),
        None => Ok(()),
    };
    result
}
