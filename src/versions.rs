// src/versions.rs
use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;
use scraper::Html;

use crate::config::Config;
use crate::dom::{self, ScrapeError, find_tag};
use crate::fetch::CachedClient;
use crate::output::ResultTable;
use crate::telemetry::{self, ops::versions::Phase};

/// The sidebar list holding the version links carries this marker text.
const ALL_VERSIONS_MARKER: &str = "All versions";

pub async fn run(client: &CachedClient, config: &Config) -> Result<Option<ResultTable>> {
    let log = telemetry::versions();
    let _g = log.root_span_kv([("url", config.docs_url.clone())]).entered();

    let fetched = {
        let _s = log.span(&Phase::FetchIndex).entered();
        client.page_text(&config.docs_url).await
    };
    let Some(body) = fetched else {
        return Ok(None);
    };

    let _s = log.span(&Phase::ParseSidebar).entered();
    let doc = Html::parse_document(&body);
    let results = versions_table(&doc)?;
    log.info_kv("versions listed", [("rows", results.rows.len().to_string())]);
    Ok(Some(results))
}

fn versions_table(doc: &Html) -> Result<ResultTable, ScrapeError> {
    let sidebar = find_tag(doc.root_element(), "div.sphinxsidebarwrapper")?;

    let ul_sel = dom::selector("ul")?;
    let version_list = sidebar
        .select(&ul_sel)
        .find(|ul| dom::text_of(*ul).contains(ALL_VERSIONS_MARKER))
        .ok_or_else(|| dom::not_found("ul containing 'All versions'"))?;

    let a_sel = dom::selector("a")?;
    let mut results = ResultTable::new(["Documentation link", "Version", "Status"]);
    for anchor in version_list.select(&a_sel) {
        let link = anchor.value().attr("href").unwrap_or_default().to_string();
        let (version, status) = split_version_text(&dom::text_of(anchor));
        results.push_row(vec![link, version, status]);
    }
    Ok(results)
}

fn version_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Python (?P<version>\d\.\d+) \((?P<status>.*)\)").expect("version pattern")
    })
}

/// `"Python 3.11 (stable)"` splits into `("3.11", "stable")`; anything that
/// does not match keeps its whole text as the version with an empty status.
fn split_version_text(text: &str) -> (String, String) {
    match version_pattern().captures(text) {
        Some(caps) => (caps["version"].to_string(), caps["status"].to_string()),
        None => (text.to_string(), String::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_matches_version_and_status() {
        assert_eq!(
            split_version_text("Python 3.11 (stable)"),
            ("3.11".to_string(), "stable".to_string())
        );
        assert_eq!(
            split_version_text("Python 3.14 (in development)"),
            ("3.14".to_string(), "in development".to_string())
        );
    }

    #[test]
    fn split_falls_back_to_whole_text() {
        assert_eq!(
            split_version_text("Some Other Link"),
            ("Some Other Link".to_string(), String::new())
        );
    }

    #[test]
    fn versions_table_reads_the_marked_list() {
        let page = r#"
            <html><body>
              <div class="sphinxsidebarwrapper">
                <ul><li><a href="https://docs.python.org/3.13/">Python 3.13 (stable)</a></li></ul>
                <ul>
                  <li><a href="https://docs.python.org/3.12/">Python 3.12 (security-fixes)</a></li>
                  <li><a href="https://www.python.org/doc/versions/">All versions</a></li>
                </ul>
              </div>
            </body></html>
        "#;
        let doc = Html::parse_document(page);
        let table = versions_table(&doc).unwrap();
        assert_eq!(table.headers, vec!["Documentation link", "Version", "Status"]);
        assert_eq!(
            table.rows,
            vec![
                vec![
                    "https://docs.python.org/3.12/".to_string(),
                    "3.12".to_string(),
                    "security-fixes".to_string()
                ],
                vec![
                    "https://www.python.org/doc/versions/".to_string(),
                    "All versions".to_string(),
                    String::new()
                ],
            ]
        );
    }

    #[test]
    fn versions_table_without_marker_is_structural() {
        let page = r##"
            <html><body>
              <div class="sphinxsidebarwrapper"><ul><li><a href="#">Docs</a></li></ul></div>
            </body></html>
        "##;
        let doc = Html::parse_document(page);
        assert!(matches!(
            versions_table(&doc),
            Err(ScrapeError::ElementNotFound { .. })
        ));
    }
}
