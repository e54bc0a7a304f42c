// src/core/page.rs
//
// DOM snapshot the classifier inspects. Built from the serialized HTML a
// rendering session hands back, so tests can fabricate pages from strings
// without a browser.

use scraper::{ElementRef, Html};

pub struct PageSnapshot {
    doc: Html,
}

impl PageSnapshot {
    pub fn parse(html: &str) -> Self {
        Self {
            doc: Html::parse_document(html),
        }
    }

    /// Case-insensitive substring search over the whole serialized document.
    pub fn contains_ci(&self, needle: &str) -> bool {
        self.doc
            .root_element()
            .html()
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// Elements whose own text nodes contain `label` (case-insensitive),
    /// in document order. Descendant text does not count: the control that
    /// carries the label is the element we want, its wrappers are reached
    /// through ancestor traversal.
    pub fn elements_with_text(&self, label: &str) -> Vec<PageElement<'_>> {
        let label = label.to_lowercase();
        self.doc
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|el| {
                el.children()
                    .filter_map(|c| c.value().as_text())
                    .any(|t| t.to_lowercase().contains(&label))
            })
            .map(|el| PageElement { el })
            .collect()
    }
}

pub struct PageElement<'a> {
    el: ElementRef<'a>,
}

impl<'a> PageElement<'a> {
    pub fn outer_html(&self) -> String {
        self.el.html()
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.el.value().attr(name)
    }

    pub fn class_attr(&self) -> &'a str {
        self.attr("class").unwrap_or("")
    }

    /// Serialized markup of up to `depth` ancestor elements, concatenated
    /// outward. Stops early at the document root.
    pub fn ancestor_context(&self, depth: usize) -> String {
        let mut out = s!();
        for node in self.el.ancestors().take(depth) {
            if let Some(el) = ElementRef::wrap(node) {
                out.push_str(&el.html());
            }
        }
        out
    }
}
