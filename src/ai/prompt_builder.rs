/// Max length kept from a user-supplied topic before it is embedded in a prompt
pub const MAX_TOPIC_LEN: usize = 200;

/// Budget for article text in the summary prompt, in estimated tokens
pub const MAX_ARTICLE_TOKENS: usize = 3_000;

/// Target summary length, in words
pub const SUMMARY_MIN_WORDS: usize = 50;
pub const SUMMARY_MAX_WORDS: usize = 60;

#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4 + 1
}

/// Remove control characters and hard-truncate a topic for prompt use
#[must_use]
pub fn sanitize_topic(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_control())
        .take(MAX_TOPIC_LEN)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Truncate article text so its token estimate stays within `MAX_ARTICLE_TOKENS`.
#[must_use]
pub fn truncate_article(text: &str) -> &str {
    if estimate_tokens(text) <= MAX_ARTICLE_TOKENS {
        return text;
    }
    let max_chars = (MAX_ARTICLE_TOKENS - 1) * 4;
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Builds the user prompt asking for a short, emoji-led summary of one article.
#[must_use]
pub fn build_summary_prompt(article_text: &str, topic: &str) -> String {
    let topic = sanitize_topic(topic);
    let article = truncate_article(article_text);
    format!(
        "Summarize the following news article about \"{topic}\" in {SUMMARY_MIN_WORDS}-{SUMMARY_MAX_WORDS} words. \
         Start the summary with one emoji that fits the story. \
         Use plain sentences, no headings or bullet points.\n\n\
         ARTICLE:\n{article}"
    )
}
