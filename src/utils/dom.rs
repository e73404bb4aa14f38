//! Host page access
//!
//! Writes the loader output into elements that already exist in the
//! served HTML.

use web_sys::Document;

use crate::services::profile_loader::ProfileTarget;

pub struct DocumentTarget {
    document: Document,
}

impl DocumentTarget {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Target for the document of the current window, if there is one
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl ProfileTarget for DocumentTarget {
    fn has_element(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn set_link(&mut self, id: &str, href: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(element) => {
                if let Err(e) = element.set_attribute("href", href) {
                    log::warn!("Could not set href on #{}: {:?}", id, e);
                    return false;
                }
                true
            }
            None => false,
        }
    }

    fn set_markup(&mut self, id: &str, html: &str) -> bool {
        match self.document.get_element_by_id(id) {
            Some(element) => {
                element.set_inner_html(html);
                true
            }
            None => false,
        }
    }
}
