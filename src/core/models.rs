use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// A chat message as delivered by the transport, before command parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub user_id: Option<i64>,
    pub text: String,
}

/// A parsed `/command args` invocation. Lives for the duration of one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub name: String,
    pub raw_arguments: String,
}

impl Command {
    /// Splits message text into a command name and the remaining argument text.
    ///
    /// Returns `None` for text that is not a command, or for `/cmd@OtherBot`
    /// addressed to a different bot than `bot_username`.
    #[must_use]
    pub fn parse(text: &str, bot_username: Option<&str>) -> Option<Self> {
        static COMMAND_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"^/([A-Za-z0-9_]+)(?:@([A-Za-z0-9_]+))?(?:\s+([\s\S]*))?$")
                .expect("static regex compile")
        });

        let caps = COMMAND_RE.captures(text.trim())?;

        if let (Some(addressed), Some(ours)) = (caps.get(2), bot_username)
            && !addressed.as_str().eq_ignore_ascii_case(ours)
        {
            return None;
        }

        Some(Self {
            name: caps[1].to_lowercase(),
            raw_arguments: caps
                .get(3)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default(),
        })
    }

    /// The search topic: argument tokens joined by single spaces.
    #[must_use]
    pub fn topic(&self) -> Option<String> {
        let topic = self
            .raw_arguments
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if topic.is_empty() { None } else { Some(topic) }
    }
}

/// A normalized news article taken from the first search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub body_text: Option<String>,
    pub url: String,
}

impl Article {
    /// Body text to summarize, empty when every candidate field was missing.
    #[must_use]
    pub fn body(&self) -> &str {
        self.body_text.as_deref().unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command_with_arguments() {
        let cmd = Command::parse("/news  ISRO   moon mission ", None).unwrap();
        assert_eq!(cmd.name, "news");
        assert_eq!(cmd.topic().as_deref(), Some("ISRO moon mission"));
    }

    #[test]
    fn test_parse_command_without_arguments() {
        let cmd = Command::parse("/start", None).unwrap();
        assert_eq!(cmd.name, "start");
        assert_eq!(cmd.raw_arguments, "");
        assert!(cmd.topic().is_none());
    }

    #[test]
    fn test_parse_command_is_case_insensitive() {
        let cmd = Command::parse("/NEWS cricket", None).unwrap();
        assert_eq!(cmd.name, "news");
    }

    #[test]
    fn test_parse_command_with_bot_suffix() {
        let cmd = Command::parse("/news@NewsyBot ISRO", Some("newsybot")).unwrap();
        assert_eq!(cmd.name, "news");
        assert_eq!(cmd.topic().as_deref(), Some("ISRO"));

        assert!(Command::parse("/news@OtherBot ISRO", Some("NewsyBot")).is_none());
        assert!(Command::parse("/news@OtherBot ISRO", None).is_some());
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert!(Command::parse("hello there", None).is_none());
        assert!(Command::parse("", None).is_none());
        assert!(Command::parse("/", None).is_none());
    }

    #[test]
    fn test_multiline_arguments_join_into_topic() {
        let cmd = Command::parse("/news space\nexploration", None).unwrap();
        assert_eq!(cmd.topic().as_deref(), Some("space exploration"));
    }
}
