//! Normalizes news-search JSON into [`Article`] records.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::core::models::Article;
use crate::errors::BotError;

/// Text the provider substitutes for fields hidden behind a paid plan.
const PAID_PLAN_PLACEHOLDERS: &[&str] = &[
    "ONLY AVAILABLE IN PAID PLANS",
    "ONLY AVAILABLE IN PROFESSIONAL AND CORPORATE PLANS",
];

/// Body candidates, in order of preference.
const BODY_FIELDS: &[&str] = &["content", "description", "title"];

/// Returns the result entries of a successful search response.
///
/// # Errors
///
/// Returns `NewsApiError` when the status flag is not `"success"` and
/// `ParseError` when a successful body carries no result list.
pub fn result_entries(body: &Value) -> Result<&[Value], BotError> {
    let status = body.get("status").and_then(Value::as_str).unwrap_or("");
    if status != "success" {
        let message = body
            .get("results")
            .and_then(|r| r.get("message"))
            .and_then(Value::as_str)
            .or_else(|| body.get("message").and_then(Value::as_str))
            .unwrap_or("no message");
        return Err(BotError::NewsApiError(format!(
            "status={}: {}",
            if status.is_empty() { "missing" } else { status },
            message
        )));
    }

    body.get("results")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| BotError::ParseError("results is not a list".to_string()))
}

/// Builds an article from one result entry.
///
/// Missing fields stay empty: the title may be blank and the body `None`
/// when no candidate field carried text.
#[must_use]
pub fn article_from_entry(entry: &Value) -> Article {
    let title = entry
        .get("title")
        .and_then(Value::as_str)
        .map(clean_text)
        .unwrap_or_default();

    let body_text = BODY_FIELDS.iter().find_map(|field| {
        entry
            .get(*field)
            .and_then(Value::as_str)
            .map(clean_text)
            .filter(|text| !text.is_empty() && !is_placeholder(text))
    });

    let url = ["link", "url"]
        .iter()
        .find_map(|field| {
            entry
                .get(*field)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|u| !u.is_empty())
        })
        .unwrap_or_default()
        .to_string();

    Article {
        title,
        body_text,
        url,
    }
}

fn is_placeholder(text: &str) -> bool {
    PAID_PLAN_PLACEHOLDERS
        .iter()
        .any(|p| text.eq_ignore_ascii_case(p))
}

/// Strips HTML tags, decodes entities and collapses runs of whitespace.
///
/// Only `<` followed by a tag name, `/`, `!` or `?` opens a tag, so a bare
/// comparison like `a < b` survives as text.
fn clean_text(raw: &str) -> String {
    static TAG_RE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"<(?:[A-Za-z][A-Za-z0-9-]*|/[A-Za-z][A-Za-z0-9-]*|!|\?)[^<>]*>")
            .expect("static regex compile")
    });

    let stripped = TAG_RE.replace_all(raw, " ");
    html_escape::decode_html_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
