//! Web search with local instant-answer lookup
//!
//! One attempt against the DuckDuckGo Instant Answer API with a short
//! timeout; a miss (empty payload, network error, parse error) falls
//! through to opening a browser search.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const INSTANT_ANSWER_URL: &str = "https://api.duckduckgo.com/";
const SEARCH_URL: &str = "https://www.google.com/search?q=";

#[derive(Debug, Deserialize)]
struct InstantAnswer {
    #[serde(default, rename = "AbstractText")]
    abstract_text: String,
    #[serde(default, rename = "Answer")]
    answer: String,
    #[serde(default, rename = "Definition")]
    definition: String,
    #[serde(default, rename = "RelatedTopics")]
    related_topics: Vec<RelatedTopic>,
}

#[derive(Debug, Deserialize)]
struct RelatedTopic {
    #[serde(default, rename = "Text")]
    text: String,
}

/// Query the instant-answer API. None means "no concise answer", whether
/// from an empty payload, a timeout, or a parse failure; the caller treats
/// all three as a miss.
pub async fn instant_answer(client: &Client, query: &str, timeout_secs: u64) -> Option<String> {
    let response = client
        .get(INSTANT_ANSWER_URL)
        .query(&[
            ("q", query),
            ("format", "json"),
            ("no_html", "1"),
            ("skip_disambig", "1"),
        ])
        .timeout(Duration::from_secs(timeout_secs))
        .send()
        .await
        .ok()?;

    let data: InstantAnswer = match response.json().await {
        Ok(data) => data,
        Err(e) => {
            debug!("Instant answer parse miss: {}", e);
            return None;
        }
    };

    pick_answer(&data)
}

fn pick_answer(data: &InstantAnswer) -> Option<String> {
    for field in [&data.abstract_text, &data.answer, &data.definition] {
        let trimmed = field.trim();
        if !trimmed.is_empty() {
            return Some(trimmed.to_string());
        }
    }

    data.related_topics
        .iter()
        .map(|topic| topic.text.trim())
        .find(|text| !text.is_empty())
        .map(|text| text.to_string())
}

/// Build the browser search URL for a query.
pub fn web_search_url(query: &str) -> String {
    format!("{}{}", SEARCH_URL, urlencoding::encode(query))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> InstantAnswer {
        serde_json::from_str(json).expect("test payload should parse")
    }

    #[test]
    fn test_pick_abstract_first() {
        let data = parse(
            r#"{"AbstractText": "Rust is a systems language.", "Answer": "42", "Definition": ""}"#,
        );
        assert_eq!(
            pick_answer(&data),
            Some("Rust is a systems language.".to_string())
        );
    }

    #[test]
    fn test_pick_answer_then_definition() {
        let data = parse(r#"{"AbstractText": "", "Answer": "42", "Definition": "a number"}"#);
        assert_eq!(pick_answer(&data), Some("42".to_string()));

        let data = parse(r#"{"AbstractText": " ", "Answer": "", "Definition": "a number"}"#);
        assert_eq!(pick_answer(&data), Some("a number".to_string()));
    }

    #[test]
    fn test_pick_related_topic_fallback() {
        let data = parse(
            r#"{"AbstractText": "", "RelatedTopics": [{"Name": "group"}, {"Text": "First topic."}]}"#,
        );
        assert_eq!(pick_answer(&data), Some("First topic.".to_string()));
    }

    #[test]
    fn test_pick_none_when_empty() {
        let data = parse(r#"{"AbstractText": "", "Answer": "", "RelatedTopics": []}"#);
        assert_eq!(pick_answer(&data), None);
    }

    #[test]
    fn test_web_search_url() {
        assert_eq!(
            web_search_url("what is rust"),
            "https://www.google.com/search?q=what%20is%20rust"
        );
    }
}
