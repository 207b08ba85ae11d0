//! Page wiring: event handlers and the two animation loops

use crate::dom::{self, element_by_id, js_err};
use crate::frames::animation_loop;
use crate::host::DomHost;
use crate::storage::open_store;
use crate::view::DomList;
use gravity_search_core::{
    HistoryManager, KeyValueStore, LoopFlag, PageConfig, PhysicsOverlay, Result, Submission,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, HtmlElement, HtmlInputElement, MouseEvent};

type History = HistoryManager<Box<dyn KeyValueStore>, DomList>;

/// Keeps a mounted page controllable from JS
pub struct PageHandle {
    flag: LoopFlag,
}

impl PageHandle {
    /// Halt the simulation and frame sync loops
    pub fn stop(&self) {
        self.flag.stop();
    }

    pub fn is_running(&self) -> bool {
        self.flag.is_running()
    }
}

/// Wire the search history and start the physics overlay
pub fn mount(config: PageConfig) -> Result<PageHandle> {
    config.validate()?;
    let window = dom::window()?;
    let document = dom::document(&window)?;

    // Search history
    let controls = &config.controls;
    let input: HtmlInputElement = element_by_id(&document, &controls.search_input)?;
    let search_button: HtmlElement = element_by_id(&document, &controls.search_button)?;
    let list: HtmlElement = element_by_id(&document, &controls.history_list)?;
    let clear_button: HtmlElement = element_by_id(&document, &controls.clear_button)?;

    let history: Rc<RefCell<History>> = Rc::new(RefCell::new(HistoryManager::load(
        open_store(&window),
        DomList::new(document.clone(), list),
        config.storage_key.clone(),
    )));

    {
        let history = history.clone();
        on_click(&search_button, move || {
            let raw = input.value();
            match history.borrow_mut().submit(&raw) {
                Ok(Submission::Added(_)) => input.set_value(""),
                Ok(Submission::Ignored) => {}
                Err(e) => log::error!("Failed to save search term: {}", e),
            }
        })?;
    }
    {
        let history = history.clone();
        on_click(&clear_button, move || {
            if let Err(e) = history.borrow_mut().clear() {
                log::error!("Failed to clear search history: {}", e);
            }
        })?;
    }
    history.borrow_mut().render()?;

    // Physics overlay
    let host = DomHost::new(window.clone(), &document, &config.tracked.ids())?;
    let overlay = Rc::new(RefCell::new(PhysicsOverlay::init(&host, &config)?));
    let host = Rc::new(RefCell::new(host));

    listen_pointer(&window, overlay.clone())?;

    let flag = LoopFlag::new();
    {
        let overlay = overlay.clone();
        animation_loop(flag.clone(), move |timestamp| {
            overlay.borrow_mut().advance(timestamp);
        })?;
    }
    {
        let overlay = overlay.clone();
        animation_loop(flag.clone(), move |_| {
            if let Err(e) = overlay.borrow().sync(&mut *host.borrow_mut()) {
                log::warn!("Frame sync failed: {}", e);
            }
        })?;
    }

    log::info!("Gravity search mounted");
    Ok(PageHandle { flag })
}

fn on_click<F>(target: &EventTarget, mut handler: F) -> Result<()>
where
    F: FnMut() + 'static,
{
    let closure = Closure::wrap(Box::new(move |_event: MouseEvent| handler()) as Box<dyn FnMut(_)>);
    target
        .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

/// Route pointer input to the overlay's drag constraint
fn listen_pointer(target: &EventTarget, overlay: Rc<RefCell<PhysicsOverlay>>) -> Result<()> {
    // Pointer down
    {
        let overlay = overlay.clone();
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            let (x, y) = (event.client_x() as f32, event.client_y() as f32);
            if let Some(id) = overlay.borrow_mut().pointer_down(x, y) {
                log::debug!("Dragging #{}", id);
            }
        }) as Box<dyn FnMut(_)>);
        target
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
    }

    // Pointer move
    {
        let overlay = overlay.clone();
        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            overlay
                .borrow_mut()
                .pointer_move(event.client_x() as f32, event.client_y() as f32);
        }) as Box<dyn FnMut(_)>);
        target
            .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
    }

    // Pointer up, or the browser taking the pointer away
    for event_name in ["pointerup", "pointercancel"] {
        let overlay = overlay.clone();
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            overlay.borrow_mut().pointer_up();
        }) as Box<dyn FnMut(_)>);
        target
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            .map_err(js_err)?;
        closure.forget();
    }

    Ok(())
}
