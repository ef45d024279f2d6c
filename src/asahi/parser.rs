//! Field extraction for the asahi candidate pages.
//!
//! Two page generations exist. The current one wraps the list in a container
//! tagged `data-type="yoteisha"`; older pages only mark it with a heading,
//! after which the entries follow as loose list/paragraph elements. Both are
//! tried in order, each strategy returning `None` when its structure is
//! absent.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::normalize::{is_party_name, unify_party};
use crate::types::Candidate;

const CANDIDATE_LIST_HEADING: &str = "立候補予定者一覧";
const LEGEND_PHRASE: &str = "顔ぶれの見方";
const FOOTNOTE_PREFIX: char = '＊';
const BULLETS: [char; 4] = ['●', '*', '◇', '・'];
const SCAN_LIMIT: usize = 200;

/// Party abbreviation: longest leading run excluding digits and the
/// incumbent/new/former/open-seat status markers.
static RE_PARTY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\d現新前元]+)").expect("invalid regex: party"));

fn elem_text(element: ElementRef) -> String {
    element.text().collect::<String>()
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One collected entry line, with the party named by the nearest grouping
/// sub-heading when the page organizes candidates per party.
struct Line {
    text: String,
    party_heading: Option<String>,
}

type Strategy = fn(&Html) -> Option<Vec<Line>>;

const STRATEGIES: [Strategy; 2] = [lines_from_container, lines_after_heading];

pub fn parse_candidates(html: &str, default_district: &str, proportional: bool) -> Vec<Candidate> {
    let document = Html::parse_document(html);
    let district = extract_district(&document).unwrap_or_else(|| default_district.to_string());

    let lines = STRATEGIES
        .iter()
        .find_map(|strategy| strategy(&document))
        .unwrap_or_default();

    let mut candidates = Vec::new();
    for line in lines {
        let Some((name, age, token_party)) = parse_entry(&line.text) else {
            log::debug!("Skipping unparsable entry: {:?}", line.text);
            continue;
        };
        // A party grouping heading wins over the per-entry token.
        let party = unify_party(line.party_heading.as_deref().unwrap_or(&token_party));
        let prefecture = if proportional { "" } else { district.as_str() };
        candidates.push(Candidate::new(
            prefecture,
            &district,
            &party,
            &name,
            String::new(),
            &age,
        ));
    }
    candidates
}

/// District name from the page title, e.g. "参院選東京 候補者一覧" → "東京".
fn extract_district(document: &Html) -> Option<String> {
    let h1_selector = Selector::parse("h1").unwrap();
    document.select(&h1_selector).find_map(|e| {
        let text = normalize_whitespace(&elem_text(e));
        let after = text.split("参院選").nth(1)?;
        let district = after.split("候補者一覧").next().unwrap_or(after).trim();
        (!district.is_empty()).then(|| district.to_string())
    })
}

fn lines_from_container(document: &Html) -> Option<Vec<Line>> {
    let container_selector = Selector::parse(r#"[data-type="yoteisha"]"#).unwrap();
    let entry_selector = Selector::parse("h3, li, p").unwrap();

    let container = document.select(&container_selector).next()?;
    let mut lines = Vec::new();
    let mut party_heading: Option<String> = None;
    for element in container.select(&entry_selector) {
        let text = normalize_whitespace(&elem_text(element));
        if element.value().name() == "h3" {
            if is_party_name(&text) {
                party_heading = Some(text);
            }
            continue;
        }
        if text.is_empty() {
            continue;
        }
        lines.push(Line {
            text,
            party_heading: party_heading.clone(),
        });
    }
    (!lines.is_empty()).then_some(lines)
}

fn lines_after_heading(document: &Html) -> Option<Vec<Line>> {
    let walk_selector = Selector::parse("h2, h3, li, p").unwrap();

    let mut seen_heading = false;
    let mut lines = Vec::new();
    let mut party_heading: Option<String> = None;
    for element in document.select(&walk_selector) {
        let tag = element.value().name();
        let text = normalize_whitespace(&elem_text(element));

        if !seen_heading {
            seen_heading = tag == "h2" && text.contains(CANDIDATE_LIST_HEADING);
            continue;
        }
        match tag {
            "h2" => continue,
            "h3" => {
                if is_party_name(&text) {
                    party_heading = Some(text);
                }
                continue;
            }
            _ => {}
        }
        if text.is_empty() || text.starts_with(FOOTNOTE_PREFIX) || text.contains(LEGEND_PHRASE) {
            break;
        }
        lines.push(Line {
            text,
            party_heading: party_heading.clone(),
        });
        if lines.len() >= SCAN_LIMIT {
            break;
        }
    }
    seen_heading.then_some(lines)
}

/// Tokenize one entry line into whitespace-separated parts, splitting an
/// unspaced row at its first interior digit run.
fn split_tokens(text: &str) -> Vec<String> {
    let stripped = text.trim_start_matches(BULLETS);
    let parts: Vec<String> = stripped.split_whitespace().map(str::to_string).collect();
    if parts.len() != 1 {
        return parts;
    }

    let chars: Vec<char> = parts[0].chars().collect();
    let Some(start) = chars.iter().position(|c| c.is_numeric()) else {
        return parts;
    };
    let end = start + chars[start..].iter().take_while(|c| c.is_numeric()).count();
    if start == 0 || end == chars.len() {
        return parts;
    }
    vec![
        chars[..start].iter().collect(),
        chars[start..end].iter().collect(),
        chars[end..].iter().collect(),
    ]
}

/// Extract (name, age, party) from one entry line. The first purely numeric
/// token is the age; everything before it is the name; the token after it
/// encodes party + candidacy status. Rows without that shape are noise.
fn parse_entry(text: &str) -> Option<(String, String, String)> {
    let parts = split_tokens(text);
    let age_idx = parts
        .iter()
        .position(|t| !t.is_empty() && t.chars().all(char::is_numeric))?;
    if age_idx == 0 || age_idx + 1 >= parts.len() {
        return None;
    }

    let name = parts[..age_idx].concat();
    let age = parts[age_idx].clone();
    let status_token = &parts[age_idx + 1];
    let party = RE_PARTY
        .find(status_token)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| status_token.clone());

    Some((name, age, party))
}
