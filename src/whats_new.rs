// src/whats_new.rs
use anyhow::Result;
use scraper::Html;
use url::Url;

use crate::config::Config;
use crate::dom::{self, ScrapeError, find_tag};
use crate::fetch::CachedClient;
use crate::output::ResultTable;
use crate::telemetry::{self, ops::whats_new::Phase};

/// Scrape the "What's New in Python" index: one row per release-notes page,
/// carrying its link, heading, and editor/author line.
pub async fn run(client: &CachedClient, config: &Config) -> Result<Option<ResultTable>> {
    let log = telemetry::whats_new();
    let whats_new_url = Url::parse(&config.docs_url)?.join("whatsnew/")?;
    let _g = log.root_span_kv([("url", whats_new_url.to_string())]).entered();

    let fetched = {
        let _s = log.span(&Phase::FetchIndex).entered();
        client.page_text(whats_new_url.as_str()).await
    };
    let Some(body) = fetched else {
        return Ok(None);
    };

    let links = {
        let _s = log.span(&Phase::ParseIndex).entered();
        let doc = Html::parse_document(&body);
        entry_links(&doc, &whats_new_url)?
    };
    log.info_kv("release-notes entries found", [("entries", links.len().to_string())]);

    let mut results = ResultTable::new(["Article link", "Title", "Editor, author"]);
    for link in links {
        let _s = log.span_kv(&Phase::FetchEntry, [("url", link.clone())]).entered();
        let Some(page) = client.page_text(&link).await else {
            // fetch failure skips this entry only
            log.debug("entry page fetch failed, skipping");
            continue;
        };
        let (title, editors) = {
            let _s = log.span(&Phase::Extract).entered();
            let doc = Html::parse_document(&page);
            entry_row(&doc)?
        };
        results.push_row(vec![link, title, editors]);
    }

    Ok(Some(results))
}

/// Absolute links of every `li.toctree-l1` entry under the index's toctree.
fn entry_links(doc: &Html, base: &Url) -> Result<Vec<String>> {
    let main_section = find_tag(doc.root_element(), "section#what-s-new-in-python")?;
    let toctree = find_tag(main_section, "div.toctree-wrapper")?;

    let entry_sel = dom::selector("li.toctree-l1")?;
    let mut links = Vec::new();
    for entry in toctree.select(&entry_sel) {
        let anchor = find_tag(entry, "a")?;
        let href = anchor.value().attr("href").unwrap_or_default();
        links.push(base.join(href)?.to_string());
    }
    Ok(links)
}

/// Heading and flattened definition-list text of one release-notes page.
fn entry_row(doc: &Html) -> Result<(String, String), ScrapeError> {
    let root = doc.root_element();
    let h1 = find_tag(root, "h1")?;
    let dl = find_tag(root, "dl")?;
    let title = dom::text_of(h1);
    let editors = dom::text_of(dl).replace('\n', " ");
    Ok((title, editors))
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
        <html><body>
          <section id="what-s-new-in-python">
            <div class="toctree-wrapper">
              <ul>
                <li class="toctree-l1"><a href="3.13.html">What's New In Python 3.13</a></li>
                <li class="toctree-l1"><a href="3.12.html">What's New In Python 3.12</a></li>
                <li class="toctree-l2"><a href="3.12.html#summary">Summary</a></li>
              </ul>
            </div>
          </section>
        </body></html>
    "#;

    #[test]
    fn entry_links_resolve_against_base() {
        let doc = Html::parse_document(INDEX);
        let base = Url::parse("https://docs.python.org/3/whatsnew/").unwrap();
        let links = entry_links(&doc, &base).unwrap();
        assert_eq!(
            links,
            vec![
                "https://docs.python.org/3/whatsnew/3.13.html",
                "https://docs.python.org/3/whatsnew/3.12.html",
            ]
        );
    }

    #[test]
    fn entry_links_missing_section_aborts() {
        let doc = Html::parse_document("<html><body><p>moved</p></body></html>");
        let base = Url::parse("https://docs.python.org/3/whatsnew/").unwrap();
        assert!(entry_links(&doc, &base).is_err());
    }

    #[test]
    fn entry_row_flattens_definition_list() {
        let page = r#"
            <html><body>
              <h1>What's New In Python 3.12</h1>
              <dl><dt>Editor</dt>
<dd>Adam Turner</dd></dl>
            </body></html>
        "#;
        let doc = Html::parse_document(page);
        let (title, editors) = entry_row(&doc).unwrap();
        assert_eq!(title, "What's New In Python 3.12");
        assert!(!editors.contains('\n'));
        assert!(editors.contains("Adam Turner"));
    }

    #[test]
    fn entry_row_missing_heading_is_structural() {
        let doc = Html::parse_document("<html><body><dl></dl></body></html>");
        assert!(matches!(entry_row(&doc), Err(ScrapeError::ElementNotFound { .. })));
    }
}
