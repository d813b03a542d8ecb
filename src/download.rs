// src/download.rs
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;
use scraper::Html;
use url::Url;

use crate::config::Config;
use crate::dom::{self, ScrapeError, find_tag};
use crate::fetch::CachedClient;
use crate::telemetry::{self, ops::download::Phase};

/// Fetch the downloads page, locate the packed-HTML archive link, and save
/// the archive into the downloads directory.
pub async fn run(client: &CachedClient, config: &Config) -> Result<()> {
    let log = telemetry::download();
    let downloads_url = Url::parse(&config.docs_url)?.join("download.html")?;
    let _g = log.root_span_kv([("url", downloads_url.to_string())]).entered();

    let fetched = {
        let _s = log.span(&Phase::FetchIndex).entered();
        client.page_text(downloads_url.as_str()).await
    };
    let Some(body) = fetched else {
        return Ok(());
    };

    let href = {
        let _s = log.span(&Phase::LocateArchive).entered();
        let doc = Html::parse_document(&body);
        archive_href(&doc)?
    };
    let Some(href) = href else {
        // a missing archive link is not a structural failure, just nothing to do
        log.warn("archive link not found");
        return Ok(());
    };

    let archive_url = downloads_url.join(&href)?;
    let filename = archive_filename(&archive_url);

    let content = {
        let _s = log.span_kv(&Phase::FetchArchive, [("url", archive_url.to_string())]).entered();
        client.page_bytes(archive_url.as_str()).await
    };
    let Some(content) = content else {
        log.warn_kv("archive fetch failed", [("url", archive_url.to_string())]);
        return Ok(());
    };

    let _s = log.span(&Phase::WriteFile).entered();
    let dir = Path::new(&config.downloads_dir);
    fs::create_dir_all(dir)?;
    let path = dir.join(filename);
    fs::write(&path, &content)?;
    log.info(format!("archive saved: {}", path.display()));
    Ok(())
}

/// First link in the docutils table pointing at a packed-HTML archive.
fn archive_href(doc: &Html) -> Result<Option<String>, ScrapeError> {
    let main_tag = find_tag(doc.root_element(), "div[role=main]")?;
    let table = find_tag(main_tag, "table.docutils")?;

    let a_sel = dom::selector("a")?;
    Ok(table
        .select(&a_sel)
        .filter_map(|a| a.value().attr("href"))
        .find(|href| is_archive_href(href))
        .map(str::to_string))
}

fn archive_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r".+html\.zip$").expect("archive pattern"))
}

fn is_archive_href(href: &str) -> bool {
    archive_pattern().is_match(href)
}

fn archive_filename(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .unwrap_or("archive.html.zip")
        .to_string()
}
