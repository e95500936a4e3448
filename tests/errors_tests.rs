use std::error::Error;
use newsbot::errors::BotError;

#[test]
fn test_bot_error_implements_error_trait() {
    // Verify BotError implements the Error trait
    fn assert_error<T: Error>(_: &T) {}

    let error = BotError::ParseError("test error".to_string());
    assert_error(&error);
}

#[test]
fn test_bot_error_display() {
    let error = BotError::NewsApiError("status=error: rate limited".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access news API: status=error: rate limited"
    );

    let error = BotError::LlmError("Model unavailable".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to access OpenAI API: Model unavailable"
    );

    let error = BotError::HttpError("Connection error".to_string());
    assert_eq!(
        format!("{error}"),
        "Failed to send HTTP request: Connection error"
    );
}

#[test]
fn test_bot_error_kind_names() {
    assert_eq!(BotError::ConfigError(String::new()).kind(), "config");
    assert_eq!(BotError::NewsApiError(String::new()).kind(), "news_api");
    assert_eq!(BotError::LlmError(String::new()).kind(), "llm");
    assert_eq!(BotError::TelegramError(String::new()).kind(), "telegram");
}

#[test]
fn test_bot_error_from_conversions() {
    let err = anyhow::anyhow!("test error");
    let bot_err: BotError = err.into();
    match bot_err {
        BotError::HttpError(msg) => assert!(msg.contains("test error")),
        _ => panic!("Unexpected error type"),
    }

    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    assert!(matches!(BotError::from(json_err), BotError::ParseError(_)));

    // Compile-time check that the reqwest conversion exists
    #[allow(unused)]
    #[allow(clippy::items_after_statements)]
    fn _check_reqwest_conversion(err: reqwest::Error) -> BotError {
        BotError::from(err)
    }
}
