use std::fmt;

use scraper::{ElementRef, Html, Selector};

use crate::{Error, Result, GRID_CLASS_FRAGMENTS, RESULTS_HEADING_MARKER};

/// Why a search page didn't yield a product link. Only used for logging,
/// every miss maps to the same "not found" result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMiss {
    NoResultsHeading,
    NoProductLink,
}

impl fmt::Display for PageMiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMiss::NoResultsHeading => f.write_str("no results header"),
            PageMiss::NoProductLink => f.write_str("no product link"),
        }
    }
}

/// Site specific extraction rule. Swap the implementation when the search page
/// markup changes; the rest of the pipeline only sees the raw href.
pub trait PageParser: Send + Sync {
    fn product_href(&self, html: &str) -> std::result::Result<String, PageMiss>;
}

/// Reads a `/catalogsearch/result/` page:
/// the first `<h1>` must contain the "results found" phrase, then the first link
/// inside the first results grid `<div>` is the product.
#[derive(Debug, Clone)]
pub struct CatalogSearchParser {
    heading_marker: String,
    heading_selector: Selector,
    grid_selector: Selector,
    link_selector: Selector,
}

impl CatalogSearchParser {
    pub fn new(heading_marker: &str, grid_class_fragments: &[&str]) -> Result<Self> {
        let grid_sel_str = grid_class_fragments
            .iter()
            .fold(String::from("div"), |mut sel, fragment| {
                sel.push_str(&format!(r#"[class*="{fragment}"]"#));
                sel
            });

        Ok(Self {
            heading_marker: heading_marker.to_string(),
            heading_selector: create_selector("h1")?,
            grid_selector: create_selector(&grid_sel_str)?,
            link_selector: create_selector("a[href]")?,
        })
    }

    /// Parser for the praktis.bg search page layout.
    pub fn praktis() -> Result<Self> {
        Self::new(RESULTS_HEADING_MARKER, &GRID_CLASS_FRAGMENTS)
    }

    fn has_results_heading(&self, doc: &Html) -> bool {
        doc.select(&self.heading_selector)
            .next()
            .map(|h1| element_text(h1).contains(&self.heading_marker))
            .unwrap_or(false)
    }
}

impl PageParser for CatalogSearchParser {
    fn product_href(&self, html: &str) -> std::result::Result<String, PageMiss> {
        let doc = Html::parse_document(html);

        if !self.has_results_heading(&doc) {
            return Err(PageMiss::NoResultsHeading);
        }

        // Only the first grid is inspected.
        doc.select(&self.grid_selector)
            .next()
            .and_then(|grid| grid.select(&self.link_selector).next())
            .and_then(|link| link.value().attr("href"))
            .map(|href| href.trim().to_string())
            .ok_or(PageMiss::NoProductLink)
    }
}

#[inline]
fn create_selector(sel_str: &str) -> Result<Selector> {
    Selector::parse(sel_str).map_err(|_| Error::ParseMissingSelector(sel_str.into()))
}

#[inline]
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
