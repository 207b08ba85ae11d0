//! Gravity Search for the browser
//!
//! Boots the page on load: wires the search history to `localStorage` and
//! the list element, then drops the title, search bar and history section
//! into a physics world and keeps their styles in sync with it.

#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub mod frames;

#[cfg(target_arch = "wasm32")]
pub mod host;

#[cfg(target_arch = "wasm32")]
pub mod page;

#[cfg(target_arch = "wasm32")]
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub mod view;

#[cfg(target_arch = "wasm32")]
pub use page::{mount, PageHandle};

#[cfg(target_arch = "wasm32")]
mod bindings {
    use crate::dom;
    use crate::page::{self, PageHandle};
    use gravity_search_core::PageConfig;
    use std::cell::RefCell;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use web_sys::Event;

    /// Attribute on `<body>` that may carry a JSON page configuration
    const CONFIG_ATTRIBUTE: &str = "data-gravity-config";

    thread_local! {
        static PAGE: RefCell<Option<PageHandle>> = RefCell::new(None);
    }

    /// Initialize the module and boot the page once the DOM is ready
    #[wasm_bindgen(start)]
    pub fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        let window = dom::window().map_err(dom::to_js)?;
        let document = dom::document(&window).map_err(dom::to_js)?;

        if document.ready_state() == "loading" {
            let closure = Closure::once(move |_event: Event| boot());
            document.add_event_listener_with_callback(
                "DOMContentLoaded",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        } else {
            boot();
        }
        Ok(())
    }

    /// Stop the simulation and frame sync loops
    #[wasm_bindgen]
    pub fn stop() {
        PAGE.with(|slot| {
            if let Some(handle) = slot.borrow_mut().take() {
                handle.stop();
                log::info!("Gravity search stopped");
            }
        });
    }

    /// Whether the page loops are still running
    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running() -> bool {
        PAGE.with(|slot| slot.borrow().as_ref().map_or(false, PageHandle::is_running))
    }

    fn boot() {
        let config = match read_config() {
            Ok(config) => config,
            Err(e) => {
                log::error!("Ignoring page configuration: {}", e);
                PageConfig::default()
            }
        };

        match page::mount(config) {
            Ok(handle) => PAGE.with(|slot| *slot.borrow_mut() = Some(handle)),
            Err(e) => log::error!("Gravity search failed to start: {}", e),
        }
    }

    fn read_config() -> gravity_search_core::Result<PageConfig> {
        let window = dom::window()?;
        let document = dom::document(&window)?;
        let raw = document
            .body()
            .and_then(|body| body.get_attribute(CONFIG_ATTRIBUTE));
        match raw {
            Some(raw) => PageConfig::from_json(&raw),
            None => Ok(PageConfig::default()),
        }
    }
}
