//! The live page as an element host for the physics overlay

use crate::dom::{element_by_id, js_err};
use gravity_search_core::{ElementHost, ElementTransform, Error, Rect, Result, Viewport};
use web_sys::{Document, HtmlElement, Window};

/// Tracked elements resolved once from the document
pub struct DomHost {
    window: Window,
    elements: Vec<(String, HtmlElement)>,
}

impl DomHost {
    /// Resolve every id up front and hand touch gestures on them to the
    /// pointer handlers
    pub fn new(window: Window, document: &Document, ids: &[&str]) -> Result<Self> {
        let elements = ids
            .iter()
            .map(|id| element_by_id::<HtmlElement>(document, id).map(|el| (id.to_string(), el)))
            .collect::<Result<Vec<_>>>()?;
        for (_, element) in &elements {
            // Otherwise a pan gesture cancels the pointer mid-drag
            element
                .style()
                .set_property("touch-action", "none")
                .map_err(js_err)?;
        }
        Ok(Self { window, elements })
    }

    fn element(&self, id: &str) -> Result<&HtmlElement> {
        self.elements
            .iter()
            .find(|(tracked, _)| tracked == id)
            .map(|(_, el)| el)
            .ok_or_else(|| Error::MissingElement(id.to_string()))
    }
}

impl ElementHost for DomHost {
    fn measure(&self, id: &str) -> Result<Rect> {
        let rect = self.element(id)?.get_bounding_client_rect();
        Ok(Rect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }

    fn viewport(&self) -> Result<Viewport> {
        let width = self.window.inner_width().map_err(js_err)?.as_f64();
        let height = self.window.inner_height().map_err(js_err)?.as_f64();
        match (width, height) {
            (Some(width), Some(height)) => Ok(Viewport::new(width as f32, height as f32)),
            _ => Err(Error::Host("viewport size is not a number".to_string())),
        }
    }

    fn apply_transform(&mut self, id: &str, transform: &ElementTransform) -> Result<()> {
        let style = self.element(id)?.style();
        style
            .set_property("position", ElementTransform::POSITION)
            .map_err(js_err)?;
        style.set_property("left", &transform.css_left()).map_err(js_err)?;
        style.set_property("top", &transform.css_top()).map_err(js_err)?;
        style
            .set_property("transform", &transform.css_transform())
            .map_err(js_err)?;
        Ok(())
    }
}
