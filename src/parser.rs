//! HTML parsing for the scrape stages: the homepage listing, the
//! description block of a problem page, and the solution link on the
//! per-problem hub page. Pure functions over fetched documents.

use std::sync::LazyLock;

use anyhow::{bail, Result};
use scraper::{ElementRef, Html, Selector};

use crate::model::ProblemSummary;

static POSTS_LIST: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.posts-list").unwrap());
static ARTICLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("article").unwrap());
static ANY_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());
static POST_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h2.post-title").unwrap());
static H2: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h2").unwrap());

/// Parse the homepage listing into problem summaries. The listing lives in
/// `div.posts-list` as a run of `<article>` elements; the first article is
/// the site banner, not a problem. Titles of the form "1. Two Sum" split
/// into id and title on the first dot.
pub fn parse_listing(html: &str, base_url: &str) -> Result<Vec<ProblemSummary>> {
    let doc = Html::parse_document(html);
    let Some(posts) = doc.select(&POSTS_LIST).next() else {
        bail!("no <div class=\"posts-list\"> on listing page");
    };

    let articles: Vec<_> = posts.select(&ARTICLE).collect();
    if articles.len() <= 1 {
        bail!("no problem articles on listing page");
    }

    let mut problems = Vec::new();
    for art in &articles[1..] {
        let href = art.select(&ANY_LINK).next().and_then(|a| a.value().attr("href"));
        let title_el = art.select(&POST_TITLE).next();
        let (Some(href), Some(title_el)) = (href, title_el) else {
            continue;
        };

        let title_text: String = title_el.text().map(str::trim).collect();
        let (id, title) = split_title(&title_text);
        problems.push(ProblemSummary {
            id,
            title,
            url: absolutize(base_url, href),
        });
    }
    Ok(problems)
}

/// Extract the description block of a problem page: the text of every
/// sibling element between the article's first `<h2>` and the next one.
/// Each element's text is joined with single spaces, elements with
/// newlines. Returns None when the page has no such block.
pub fn extract_description(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let article = doc.select(&ARTICLE).next()?;
    let first_h2 = article.select(&H2).next()?;

    let mut parts = Vec::new();
    for node in first_h2.next_siblings() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if el.value().name() == "h2" {
            break;
        }
        parts.push(element_text(el));
    }

    let description = parts.join("\n").trim().to_string();
    if description.is_empty() {
        None
    } else {
        Some(description)
    }
}

/// Pick the solution link off a `/all/<id>.html` hub page: the
/// second-to-last `<a href>` on the page points at the problem writeup.
pub fn solution_link(html: &str, base_url: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let hrefs: Vec<&str> = doc
        .select(&ANY_LINK)
        .filter_map(|a| a.value().attr("href"))
        .collect();
    if hrefs.len() < 2 {
        return None;
    }
    Some(absolutize(base_url, hrefs[hrefs.len() - 2].trim()))
}

fn element_text(el: ElementRef) -> String {
    el.text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_title(text: &str) -> (Option<i64>, String) {
    match text.split_once('.') {
        Some((pid, rest)) => (pid.trim().parse().ok(), rest.trim().to_string()),
        None => (None, text.trim().to_string()),
    }
}

fn absolutize(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    }
}

// ── Tests ──
