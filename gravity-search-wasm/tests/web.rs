//! Browser tests for the DOM bindings
#![cfg(target_arch = "wasm32")]

use gravity_search_core::{
    ElementHost, ElementTransform, HistoryManager, HistoryView, KeyValueStore, LoopFlag,
    PageConfig, Rect,
};
use gravity_search_wasm::dom;
use gravity_search_wasm::frames::animation_loop;
use gravity_search_wasm::host::DomHost;
use gravity_search_wasm::storage::LocalStore;
use gravity_search_wasm::view::DomList;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, HtmlInputElement};

wasm_bindgen_test_configure!(run_in_browser);

fn fixture(id: &str, tag: &str) -> HtmlElement {
    let window = dom::window().unwrap();
    let document = dom::document(&window).unwrap();
    if let Some(old) = document.get_element_by_id(id) {
        old.remove();
    }
    let element: HtmlElement = document.create_element(tag).unwrap().dyn_into().unwrap();
    element.set_id(id);
    document.body().unwrap().append_child(&element).unwrap();
    element
}

/// Resolve after `count` animation frames have gone by
async fn next_frames(count: u32) {
    for _ in 0..count {
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            dom::window()
                .unwrap()
                .request_animation_frame(&resolve)
                .unwrap();
        });
        JsFuture::from(promise).await.unwrap();
    }
}

/// Build every element the page expects, replacing leftovers
fn page_fixtures(config: &PageConfig) -> (HtmlInputElement, HtmlElement, HtmlElement, HtmlElement) {
    for (i, id) in config.tracked.ids().iter().enumerate() {
        let element = fixture(id, "div");
        element.style().set_css_text(&format!(
            "position:fixed;left:{}px;top:10px;width:120px;height:40px",
            20 + i * 150
        ));
    }
    let controls = &config.controls;
    let input: HtmlInputElement = fixture(&controls.search_input, "input").dyn_into().unwrap();
    let search_button = fixture(&controls.search_button, "button");
    let list = fixture(&controls.history_list, "ul");
    let clear_button = fixture(&controls.clear_button, "button");
    (input, search_button, list, clear_button)
}

fn list_texts(list: &HtmlElement) -> Vec<String> {
    let items = list.children();
    (0..items.length())
        .filter_map(|i| items.item(i))
        .filter_map(|item| item.text_content())
        .collect()
}

#[wasm_bindgen_test]
fn local_store_roundtrip() {
    let window = dom::window().unwrap();
    let mut store = LocalStore::new(&window).unwrap();
    let key = "gravity-search-test";

    store.set(key, r#"["a"]"#).unwrap();
    assert_eq!(store.get(key).unwrap().as_deref(), Some(r#"["a"]"#));

    store.remove(key).unwrap();
    assert_eq!(store.get(key).unwrap(), None);
}

#[wasm_bindgen_test]
fn list_render_replaces_children() {
    let window = dom::window().unwrap();
    let document = dom::document(&window).unwrap();
    let list = fixture("historyTestList", "ul");
    list.set_inner_html("<li>stale</li><li>entries</li>");

    let mut view = DomList::new(document, list.clone());
    view.render(&["cats".to_string(), "<b>dogs</b>".to_string()]).unwrap();

    assert_eq!(list.child_element_count(), 2);
    let items = list.children();
    assert_eq!(items.item(0).unwrap().text_content().unwrap(), "cats");
    // Terms are shown verbatim, never parsed as markup
    assert_eq!(items.item(1).unwrap().text_content().unwrap(), "<b>dogs</b>");

    view.render(&[]).unwrap();
    assert_eq!(list.child_element_count(), 0);
}

#[wasm_bindgen_test]
fn history_scenario_against_local_storage() {
    let window = dom::window().unwrap();
    let document = dom::document(&window).unwrap();
    let list = fixture("historyScenarioList", "ul");
    let key = "gravity-search-scenario";

    let mut store = LocalStore::new(&window).unwrap();
    store.remove(key).unwrap();

    let mut history = HistoryManager::load(store, DomList::new(document, list.clone()), key);
    history.submit("cats").unwrap();
    history.submit("dogs").unwrap();
    history.clear().unwrap();
    history.submit("birds").unwrap();

    assert_eq!(list.child_element_count(), 1);
    assert_eq!(list.text_content().unwrap(), "birds");
    assert_eq!(history.store().get(key).unwrap().as_deref(), Some(r#"["birds"]"#));

    let mut store = history.into_store();
    store.remove(key).unwrap();
}

#[wasm_bindgen_test]
fn host_measures_and_moves_elements() {
    let window = dom::window().unwrap();
    let document = dom::document(&window).unwrap();
    let element = fixture("hostTestBox", "div");
    element
        .style()
        .set_css_text("position:fixed;left:10px;top:20px;width:100px;height:50px");

    let mut host = DomHost::new(window, &document, &["hostTestBox"]).unwrap();
    assert_eq!(element.style().get_property_value("touch-action").unwrap(), "none");
    assert_eq!(host.measure("hostTestBox").unwrap(), Rect::new(10.0, 20.0, 100.0, 50.0));
    assert!(host.viewport().unwrap().width > 0.0);

    let transform = ElementTransform { left: 5.0, top: 7.5, angle: 0.25 };
    host.apply_transform("hostTestBox", &transform).unwrap();

    let style = element.style();
    assert_eq!(style.get_property_value("position").unwrap(), "absolute");
    assert_eq!(style.get_property_value("left").unwrap(), "5px");
    assert_eq!(style.get_property_value("top").unwrap(), "7.5px");
    assert_eq!(style.get_property_value("transform").unwrap(), "rotate(0.25rad)");
}

#[wasm_bindgen_test]
fn host_rejects_missing_element() {
    let window = dom::window().unwrap();
    let document = dom::document(&window).unwrap();
    assert!(DomHost::new(window, &document, &["noSuchElement"]).is_err());
}

#[wasm_bindgen_test]
async fn mounted_page_handles_clicks() {
    let config = PageConfig::default();
    let window = dom::window().unwrap();
    let mut store = LocalStore::new(&window).unwrap();
    store.remove(&config.storage_key).unwrap();

    let (input, search_button, list, clear_button) = page_fixtures(&config);
    let handle = gravity_search_wasm::mount(config.clone()).unwrap();
    assert!(handle.is_running());

    input.set_value("  cats ");
    search_button.click();
    assert_eq!(input.value(), "");
    assert_eq!(list_texts(&list), ["cats"]);
    assert_eq!(store.get(&config.storage_key).unwrap().as_deref(), Some(r#"["cats"]"#));

    // Whitespace is ignored and left in the field
    input.set_value("   ");
    search_button.click();
    assert_eq!(input.value(), "   ");
    assert_eq!(list_texts(&list), ["cats"]);
    assert_eq!(store.get(&config.storage_key).unwrap().as_deref(), Some(r#"["cats"]"#));

    clear_button.click();
    assert_eq!(list.child_element_count(), 0);
    assert_eq!(store.get(&config.storage_key).unwrap(), None);

    // Frame sync has taken over the tracked elements
    next_frames(3).await;
    let document = dom::document(&window).unwrap();
    let title: HtmlElement = dom::element_by_id(&document, &config.tracked.title).unwrap();
    assert_eq!(title.style().get_property_value("position").unwrap(), "absolute");

    handle.stop();
    assert!(!handle.is_running());
    next_frames(1).await;
    let frozen = title.style().get_property_value("top").unwrap();
    next_frames(5).await;
    assert_eq!(title.style().get_property_value("top").unwrap(), frozen);
}

#[wasm_bindgen_test]
async fn stopped_loop_is_not_rescheduled() {
    let flag = LoopFlag::new();
    let frames = Rc::new(Cell::new(0u32));
    {
        let frames = frames.clone();
        animation_loop(flag.clone(), move |_| frames.set(frames.get() + 1)).unwrap();
    }

    next_frames(5).await;
    let before_stop = frames.get();
    assert!(before_stop > 0);

    flag.stop();
    next_frames(5).await;
    assert_eq!(frames.get(), before_stop);
}
