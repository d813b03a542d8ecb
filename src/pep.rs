// src/pep.rs
use std::collections::BTreeMap;
use std::sync::OnceLock;

use anyhow::Result;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::config::{self, Config};
use crate::fetch::CachedClient;
use crate::output::ResultTable;
use crate::telemetry::{self, ops::pep::Phase};

/// One data row lifted out of the index tables: the preview status letter
/// from the type/status cell and the relative link to the PEP's own page.
#[derive(Debug, Clone, PartialEq, Eq)]
struct IndexEntry {
    preview: String,
    href: String,
}

/// Walk the specification index, verify each entry's preview status against
/// the authoritative status on its detail page, and count the authoritative
/// statuses. Mismatches are warnings only; the tally always uses the detail
/// page's text.
pub async fn run(client: &CachedClient, config: &Config) -> Result<Option<ResultTable>> {
    let log = telemetry::pep();
    let _g = log.root_span_kv([("url", config.pep_url.clone())]).entered();

    let fetched = {
        let _s = log.span(&Phase::FetchIndex).entered();
        client.page_text(&config.pep_url).await
    };
    let Some(body) = fetched else {
        return Ok(None);
    };

    let entries = {
        let _s = log.span(&Phase::CollectRows).entered();
        let doc = Html::parse_document(&body);
        collect_entries(&doc)
    };
    log.info_kv("index rows collected", [("entries", entries.len().to_string())]);

    let base = Url::parse(&config.pep_url)?;
    let mut tally: BTreeMap<String, u64> = BTreeMap::new();
    let mut skipped = 0usize;
    let mut mismatched = 0usize;

    let _r = log.span(&Phase::Reconcile).entered();
    for entry in &entries {
        let detail_url = base.join(&entry.href)?;
        let _s = log
            .span_kv(&Phase::FetchDetail, [("url", detail_url.to_string())])
            .entered();

        // an absent detail page skips this row, never the scan
        let Some(page) = client.page_text(detail_url.as_str()).await else {
            skipped += 1;
            continue;
        };

        let status = {
            let doc = Html::parse_document(&page);
            detail_status(&doc)
        };
        let Some(status) = status else {
            log.debug_kv("no status on detail page", [("url", detail_url.to_string())]);
            skipped += 1;
            continue;
        };

        let expected = config::expected_statuses(&entry.preview);
        if !expected.contains(&status.as_str()) {
            mismatched += 1;
            log.warn(format!(
                "mismatched statuses:\n{detail_url}\ncard status: {status}\nexpected: {expected:?}"
            ));
        }
        *tally.entry(status).or_insert(0) += 1;
    }

    let counted: u64 = tally.values().sum();
    log.totals(counted, skipped, mismatched);

    Ok(Some(tally_table(&tally)))
}

fn index_selectors() -> &'static (Selector, Selector, Selector, Selector) {
    static SEL: OnceLock<(Selector, Selector, Selector, Selector)> = OnceLock::new();
    SEL.get_or_init(|| {
        (
            Selector::parse("table tr").expect("static selector"),
            Selector::parse("th").expect("static selector"),
            Selector::parse("td").expect("static selector"),
            Selector::parse("a").expect("static selector"),
        )
    })
}

/// Data rows across all tables on the index page: rows with no header cell,
/// at least two data cells, an embedded link, and a link shape that is not
/// the aggregate zero entry.
fn collect_entries(doc: &Html) -> Vec<IndexEntry> {
    let (row_sel, th_sel, td_sel, a_sel) = index_selectors();

    let mut entries = Vec::new();
    for row in doc.select(row_sel) {
        if row.select(th_sel).next().is_some() {
            continue;
        }
        let cells: Vec<ElementRef> = row.select(td_sel).collect();
        if cells.len() < config::MIN_PEP_TABLE_COLUMNS {
            continue;
        }

        let status_cell: String = cells[config::PEP_TYPE_STATUS_COLUMN]
            .text()
            .collect::<String>()
            .trim()
            .to_string();
        let preview = preview_letter(&status_cell);

        let Some(link) = cells[config::PEP_NUMBER_COLUMN].select(a_sel).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if is_zero_entry(href) {
            continue;
        }

        entries.push(IndexEntry {
            preview,
            href: href.to_string(),
        });
    }
    entries
}

/// Second character of the type/status cell, empty when the cell is shorter.
fn preview_letter(status_cell: &str) -> String {
    status_cell
        .chars()
        .nth(config::PEP_STATUS_CHAR_INDEX)
        .map(String::from)
        .unwrap_or_default()
}

fn is_zero_entry(href: &str) -> bool {
    config::PEP_ZERO_PATTERNS.iter().any(|p| href.contains(p))
}

/// Authoritative status from a detail page: the `dd` immediately following
/// the `dt` labelled "Status". Either part missing means the row cannot be
/// verified and stays out of the tally.
fn detail_status(doc: &Html) -> Option<String> {
    let dt_sel = Selector::parse("dt").expect("static selector");
    for dt in doc.select(&dt_sel) {
        let label: String = dt.text().collect();
        if label.trim().trim_end_matches(':').trim_end() != "Status" {
            continue;
        }
        let sibling = dt.next_siblings().find_map(ElementRef::wrap)?;
        if sibling.value().name() != "dd" {
            return None;
        }
        let status: String = sibling.text().collect::<String>().trim().to_string();
        return if status.is_empty() { None } else { Some(status) };
    }
    None
}

/// One row per distinct status, ascending by label, then the Total row.
fn tally_table(tally: &BTreeMap<String, u64>) -> ResultTable {
    let mut results = ResultTable::new(["Status", "Count"]);
    let mut total: u64 = 0;
    for (status, count) in tally {
        total += count;
        results.push_row(vec![status.clone(), count.to_string()]);
    }
    results.push_row(vec!["Total".to_string(), total.to_string()]);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX: &str = r#"
        <html><body>
          <table>
            <tr><th>Type</th><th>PEP</th><th>Title</th></tr>
            <tr><td>PF</td><td><a href="pep-0008/">8</a></td><td>Style Guide</td></tr>
            <tr><td></td><td><a href="pep-0012/">12</a></td><td>Sample reST</td></tr>
            <tr><td>I</td><td><a href="pep-0000/">0</a></td><td>Index of PEPs</td></tr>
            <tr><td>PD</td><td>no link here</td><td>Unlinked</td></tr>
            <tr><td>short</td></tr>
          </table>
          <table>
            <tr><td>SA</td><td><a href="pep-0484/">484</a></td><td>Type Hints</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn collect_entries_filters_rows() {
        let doc = Html::parse_document(INDEX);
        let entries = collect_entries(&doc);
        // header row, zero entry, linkless row, and short row are all gone
        assert_eq!(
            entries,
            vec![
                IndexEntry { preview: "F".into(), href: "pep-0008/".into() },
                IndexEntry { preview: "".into(), href: "pep-0012/".into() },
                IndexEntry { preview: "A".into(), href: "pep-0484/".into() },
            ]
        );
    }

    #[test]
    fn preview_letter_is_second_char_or_empty() {
        assert_eq!(preview_letter("PD"), "D");
        assert_eq!(preview_letter("P"), "");
        assert_eq!(preview_letter(""), "");
        assert_eq!(preview_letter("SA extra"), "A");
    }

    #[test]
    fn zero_entry_shapes_are_excluded() {
        assert!(is_zero_entry("pep-0000/"));
        assert!(is_zero_entry("https://peps.python.org/pep-0/"));
        assert!(!is_zero_entry("pep-0008/"));
        assert!(!is_zero_entry("pep-3333/"));
    }

    #[test]
    fn detail_status_reads_following_dd() {
        let page = r#"
            <html><body><dl class="rfc2822 field-list">
              <dt>Author<span class="colon">:</span></dt><dd>Somebody</dd>
              <dt>Status<span class="colon">:</span></dt><dd><abbr>Final</abbr></dd>
            </dl></body></html>
        "#;
        let doc = Html::parse_document(page);
        assert_eq!(detail_status(&doc), Some("Final".to_string()));
    }

    #[test]
    fn detail_status_missing_label_or_sibling() {
        let no_label = Html::parse_document("<html><body><dl><dt>Author</dt><dd>X</dd></dl></body></html>");
        assert_eq!(detail_status(&no_label), None);

        let no_dd = Html::parse_document("<html><body><dl><dt>Status</dt></dl></body></html>");
        assert_eq!(detail_status(&no_dd), None);

        let wrong_sibling =
            Html::parse_document("<html><body><dl><dt>Status</dt><dt>Type</dt><dd>X</dd></dl></body></html>");
        assert_eq!(detail_status(&wrong_sibling), None);
    }

    #[test]
    fn mismatch_still_tallies_authoritative_status() {
        // preview letter D only expects Deferred, so an authoritative
        // "Accepted" must warn, yet the tally key is still "Accepted"
        let expected = config::expected_statuses("D");
        assert!(!expected.contains(&"Accepted"));

        let mut tally: BTreeMap<String, u64> = BTreeMap::new();
        *tally.entry("Accepted".to_string()).or_insert(0) += 1;
        let table = tally_table(&tally);
        assert_eq!(table.rows[0], vec!["Accepted".to_string(), "1".to_string()]);
    }

    #[test]
    fn tally_table_sorts_and_totals() {
        let mut tally: BTreeMap<String, u64> = BTreeMap::new();
        for (status, count) in [("Withdrawn", 3), ("Active", 31), ("Final", 120)] {
            tally.insert(status.to_string(), count);
        }
        let table = tally_table(&tally);
        assert_eq!(table.headers, vec!["Status", "Count"]);
        assert_eq!(
            table.rows,
            vec![
                vec!["Active".to_string(), "31".to_string()],
                vec!["Final".to_string(), "120".to_string()],
                vec!["Withdrawn".to_string(), "3".to_string()],
                vec!["Total".to_string(), "154".to_string()],
            ]
        );
    }

    #[test]
    fn empty_tally_still_ends_with_total() {
        let table = tally_table(&BTreeMap::new());
        assert_eq!(table.rows, vec![vec!["Total".to_string(), "0".to_string()]]);
    }
}
