//! Field extraction for the go2senkyo election pages.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::normalize::{to_hiragana, unify_party};
use crate::types::Candidate;

const PROPORTIONAL_LABEL: &str = "比例";

static RE_AGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)").expect("invalid regex: age"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Sub-page paths from the election top page: single-member district pages
/// and proportional party pages, deduplicated and sorted for a stable order.
pub fn parse_index_paths(html: &str) -> (Vec<String>, Vec<String>) {
    let document = Html::parse_document(html);
    let anchor_selector = Selector::parse("a[href]").unwrap();

    let mut prefecture_paths = BTreeSet::new();
    let mut hirei_paths = BTreeSet::new();
    for element in document.select(&anchor_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if href.contains("/prefecture/") {
            prefecture_paths.insert(href.to_string());
        } else if href.contains("/hirei_party/") {
            hirei_paths.insert(href.to_string());
        }
    }
    (
        prefecture_paths.into_iter().collect(),
        hirei_paths.into_iter().collect(),
    )
}

/// District name from the page's meta description (or title), e.g.
/// "東京都選挙区の立候補者一覧…" → "東京都".
pub fn extract_district(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let meta_selector = Selector::parse(r#"meta[name="description"]"#).unwrap();
    let title_selector = Selector::parse("title").unwrap();

    let text = document
        .select(&meta_selector)
        .next()
        .and_then(|e| e.value().attr("content").map(str::to_string))
        .or_else(|| {
            document
                .select(&title_selector)
                .next()
                .map(|e| elem_text(e))
        })?;

    let district = match text.split_once("選挙区") {
        Some((before, _)) => before.trim(),
        None => text.trim(),
    };
    (!district.is_empty()).then(|| district.to_string())
}

pub fn parse_candidates(html: &str, district: &str, proportional: bool) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let section_selector = Selector::parse("section.m_senkyo_result_data").unwrap();
    let name_selector = Selector::parse("h2.m_senkyo_result_data_ttl a").unwrap();
    let kana_selector = Selector::parse("span.m_senkyo_result_data_kana").unwrap();
    let party_selector = Selector::parse("p.m_senkyo_result_data_circle").unwrap();
    let age_selector = Selector::parse("p.m_senkyo_result_data_para span").unwrap();

    let district = if proportional {
        PROPORTIONAL_LABEL
    } else {
        district
    };
    let prefecture = if proportional { "" } else { district };

    let mut candidates = Vec::new();
    for section in document.select(&section_selector) {
        let Some(anchor) = section.select(&name_selector).next() else {
            continue;
        };
        // The name is the anchor's own text; the kana span nested inside it
        // must not bleed into it, so only direct text children count.
        let Some(name) = anchor
            .children()
            .filter_map(|child| child.value().as_text().map(|t| t.trim().to_string()))
            .find(|t| !t.is_empty())
        else {
            log::debug!("Skipping candidate section without a name");
            continue;
        };

        let kana = section
            .select(&kana_selector)
            .next()
            .map(|e| normalize_whitespace(&elem_text(e)))
            .unwrap_or_default();
        let yomi = if kana.is_empty() {
            // Weak fallback: reading of the first name token only.
            name.split_whitespace()
                .next()
                .map(to_hiragana)
                .unwrap_or_default()
        } else {
            to_hiragana(&kana.replace(' ', ""))
        };

        let party = section
            .select(&party_selector)
            .next()
            .map(|e| unify_party(normalize_whitespace(&elem_text(e)).as_str()))
            .unwrap_or_default();

        let age = section
            .select(&age_selector)
            .next()
            .and_then(|e| {
                RE_AGE
                    .captures(&elem_text(e))
                    .map(|caps| caps[1].to_string())
            })
            .unwrap_or_default();

        candidates.push(Candidate::new(prefecture, district, &party, &name, yomi, &age));
    }
    candidates
}
