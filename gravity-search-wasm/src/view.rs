//! Search history list rendering

use crate::dom::js_err;
use gravity_search_core::{HistoryView, Result};
use web_sys::{Document, HtmlElement};

/// `<ul>`/`<ol>` showing one `<li>` per search term
pub struct DomList {
    document: Document,
    list: HtmlElement,
}

impl DomList {
    pub fn new(document: Document, list: HtmlElement) -> Self {
        Self { document, list }
    }
}

impl HistoryView for DomList {
    fn render(&mut self, terms: &[String]) -> Result<()> {
        while let Some(child) = self.list.first_child() {
            self.list.remove_child(&child).map_err(js_err)?;
        }
        for term in terms {
            let item = self.document.create_element("li").map_err(js_err)?;
            item.set_text_content(Some(term.as_str()));
            self.list.append_child(&item).map_err(js_err)?;
        }
        Ok(())
    }
}
