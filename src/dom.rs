// src/dom.rs
use scraper::{ElementRef, Selector};
use thiserror::Error;
use tracing::error;

/// Structural extraction failure: a fetched page no longer matches the shape
/// the extractor expects. Distinct from a fetch failure, which surfaces as an
/// absent value at the fetch layer and never as this error.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },
    #[error("invalid selector: {selector}")]
    InvalidSelector { selector: String },
}

pub fn selector(css: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(css).map_err(|_| ScrapeError::InvalidSelector {
        selector: css.to_string(),
    })
}

/// First descendant of `scope` matching `css`. Absence is a structural
/// failure; callers propagate it to the invocation boundary instead of
/// catching locally.
pub fn find_tag<'a>(scope: ElementRef<'a>, css: &str) -> Result<ElementRef<'a>, ScrapeError> {
    scope.select(&selector(css)?).next().ok_or_else(|| not_found(css))
}

/// Build (and log) the not-found condition for locators that cannot be
/// expressed as a single CSS selector, e.g. "ul containing 'All versions'".
pub fn not_found(what: &str) -> ScrapeError {
    error!(selector = what, "element not found");
    ScrapeError::ElementNotFound {
        selector: what.to_string(),
    }
}

pub fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}
