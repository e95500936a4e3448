use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::warn;
use url::Url;

use crate::core::models::Article;
use crate::telegram::client::MAX_MESSAGE_UNITS;

/// Most of the message a headline may take.
const MAX_TITLE_UNITS: usize = 512;

const ELLIPSIS: char = '…';

/// Length as Telegram counts it, in UTF-16 code units.
#[must_use]
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Escapes text for Telegram's HTML parse mode.
#[must_use]
pub fn escape_html(text: &str) -> String {
    encode_text(text).into_owned()
}

/// Escapes `text`, cutting it short with an ellipsis when the escaped form
/// would exceed `budget` UTF-16 units. Cuts never split an entity.
fn escape_within(text: &str, budget: usize) -> String {
    let escaped = escape_html(text);
    if utf16_len(&escaped) <= budget {
        return escaped;
    }
    if budget == 0 {
        return String::new();
    }

    let limit = budget - ELLIPSIS.len_utf16();
    let mut out = String::new();
    let mut used = 0;
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let piece = encode_text(&*c.encode_utf8(&mut buf));
        let units = utf16_len(&piece);
        if used + units > limit {
            break;
        }
        used += units;
        out.push_str(&piece);
    }

    let mut out = out.trim_end().to_string();
    out.push(ELLIPSIS);
    out
}

/// Only absolute http(s) links are rendered.
fn usable_link(raw: &str) -> Option<Url> {
    Url::parse(raw)
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
}

fn render(article: &Article, summary: &str, budget: usize) -> String {
    let title = article.title.trim();
    let header = if title.is_empty() {
        "📰 ".to_string()
    } else {
        format!(
            "📰 <b>{}</b>\n\n",
            escape_within(title, MAX_TITLE_UNITS.min(budget / 4))
        )
    };

    let footer = usable_link(&article.url)
        .map(|link| {
            format!(
                "\n\n🔗 <a href=\"{}\">Read more</a>",
                encode_double_quoted_attribute(link.as_str())
            )
        })
        .filter(|footer| {
            let fits = utf16_len(footer) <= budget / 2;
            if !fits {
                warn!("Article link too long to render: {} units", utf16_len(footer));
            }
            fits
        })
        .unwrap_or_default();

    let room = budget.saturating_sub(utf16_len(&header) + utf16_len(&footer));
    format!("{header}{}{footer}", escape_within(summary, room))
}

/// Formats one article and its summary as a Telegram HTML message.
///
/// The summary is shortened when needed so the whole message, headline and
/// link included, fits in one Telegram message.
#[must_use]
pub fn format_reply(article: &Article, summary: &str) -> String {
    render(article, summary, MAX_MESSAGE_UNITS)
}

/// Joins several formatted articles into one message, each given an equal
/// share of the length limit.
#[must_use]
pub fn format_digest(items: &[(Article, String)]) -> String {
    const SEPARATOR: &str = "\n\n";

    if items.is_empty() {
        return String::new();
    }
    let separators = SEPARATOR.len() * (items.len() - 1);
    let share = MAX_MESSAGE_UNITS.saturating_sub(separators) / items.len();

    items
        .iter()
        .map(|(article, summary)| render(article, summary, share))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}
