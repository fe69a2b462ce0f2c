//! Reply suggestions for an extracted message.
//!
//! Covers the pure parts of the flow: building the prompt, the request body
//! for a `generateContent` call, reading the response and splitting the
//! generated text into individual replies. The HTTP call itself belongs to
//! the embedding application.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::patterns::{
    NUMBER_MARKER, PARAGRAPH_BREAK, REPLY_BULLET_PREFIX, REPLY_HEADING, REPLY_LABEL_PREFIX,
    REPLY_LABEL_START, REPLY_LEAD_IN, REPLY_NUMBER_PREFIX, REPLY_SEPARATOR, SENTENCE,
};
use crate::{Error, Result};

/// Most replies returned by [`parse_replies`].
pub const MAX_REPLIES: usize = 5;

/// Prompt asking for five numbered reply suggestions to `last_message`.
#[must_use]
pub fn build_prompt(last_message: &str) -> String {
    format!(
        "You received this LinkedIn message:\n\"{last_message}\"\n\n\
         Provide exactly 5 polite and professional reply suggestions for this message. \
         Format each suggestion on a separate line, numbered 1-5. \
         Each reply should be complete and ready to send. \
         Do not include any explanations or additional text, just the 5 reply suggestions."
    )
}

/// One text fragment of a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Fragment text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// A message made of parts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Author role, absent in requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Message fragments.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature.
    pub temperature: f32,
    /// Number of highest-probability tokens considered.
    pub top_k: u32,
    /// Cumulative probability cut-off for nucleus sampling.
    pub top_p: f32,
    /// Upper bound on generated tokens.
    pub max_output_tokens: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_k: 40,
            top_p: 0.95,
            max_output_tokens: 300,
        }
    }
}

/// Body of a `generateContent` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation turns; a single user turn here.
    pub contents: Vec<Content>,
    /// Sampling parameters.
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Single-turn request for `prompt` with the default sampling parameters.
    #[must_use]
    pub fn for_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: None,
                parts: vec![Part {
                    text: Some(prompt.into()),
                }],
            }],
            generation_config: GenerationConfig::default(),
        }
    }
}

/// One generated answer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Expected location of the generated parts.
    #[serde(default)]
    pub content: Option<Content>,
    /// Parts placed directly on the candidate, seen from some API versions.
    #[serde(default)]
    pub parts: Vec<Part>,
    /// Why generation stopped, e.g. `STOP` or `SAFETY`.
    #[serde(default)]
    pub finish_reason: Option<String>,
}

impl Candidate {
    fn first_text(&self) -> Option<&str> {
        let nested = self.content.as_ref().and_then(|c| c.parts.first());
        nested
            .and_then(|p| p.text.as_deref())
            .filter(|t| !t.trim().is_empty())
            .or_else(|| {
                self.parts
                    .first()
                    .and_then(|p| p.text.as_deref())
                    .filter(|t| !t.trim().is_empty())
            })
    }
}

/// Body of a `generateContent` response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerateContentResponse {
    /// Generated answers, best first.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Parse a response body.
    ///
    /// # Errors
    ///
    /// Returns `Error::ResponseShape` when the body is not valid JSON of the
    /// expected shape.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|err| Error::ResponseShape(err.to_string()))
    }

    /// Generated text of the first candidate.
    ///
    /// # Errors
    ///
    /// Returns `Error::SafetyBlocked` when generation was stopped for safety
    /// or recitation without producing text, `Error::ResponseShape` when no
    /// text is found otherwise.
    pub fn text(&self) -> Result<&str> {
        let candidate = self
            .candidates
            .first()
            .ok_or_else(|| Error::ResponseShape("no candidates".into()))?;

        if let Some(text) = candidate.first_text() {
            return Ok(text);
        }
        match candidate.finish_reason.as_deref() {
            Some(reason @ ("SAFETY" | "RECITATION")) => Err(Error::SafetyBlocked(reason.to_string())),
            _ => Err(Error::ResponseShape("candidate has no text part".into())),
        }
    }
}

/// Split generated text into at most [`MAX_REPLIES`] reply suggestions.
///
/// Tries line and bullet splitting first, then sentence splitting when that
/// yields fewer than three replies, then number markers when still fewer
/// than two, and finally paragraphs or the whole text. Numbering, "Reply
/// n:" labels and bullets are stripped; replies of five characters or less
/// are dropped.
///
/// # Errors
///
/// Returns `Error::NoReplies` when nothing usable remains.
pub fn parse_replies(text: &str) -> Result<Vec<String>> {
    let mut replies = split_lines(text);
    debug!(count = replies.len(), "replies from line splitting");

    if replies.len() < 3 {
        let sentences = split_sentences(text);
        if sentences.len() > replies.len() {
            debug!(count = sentences.len(), "using sentence splitting");
            replies = sentences;
        }
    }

    if replies.len() < 2 {
        let numbered = split_numbered(text);
        if !numbered.is_empty() {
            debug!(count = numbered.len(), "using number markers");
            replies = numbered;
        }
    }

    if replies.is_empty() {
        replies = split_paragraphs(text);
        if replies.is_empty() {
            replies.push(text.trim().to_string());
        }
    }

    let replies: Vec<String> = replies
        .iter()
        .map(|r| strip_prefixes(r))
        .filter(|r| char_len(r) > 5)
        .take(MAX_REPLIES)
        .collect();

    if replies.is_empty() {
        return Err(Error::NoReplies);
    }
    Ok(replies)
}

fn split_lines(text: &str) -> Vec<String> {
    REPLY_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|line| {
            let len = char_len(line);
            len >= 10 && !REPLY_HEADING.is_match(line) && !(REPLY_LEAD_IN.is_match(line) && len < 30)
        })
        .map(str::to_string)
        .collect()
}

fn split_sentences(text: &str) -> Vec<String> {
    SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| char_len(s) > 15 && !REPLY_LABEL_START.is_match(s))
        .map(str::to_string)
        .collect()
}

fn split_numbered(text: &str) -> Vec<String> {
    NUMBER_MARKER
        .split(text)
        .map(str::trim)
        .filter(|s| char_len(s) > 10)
        .skip(1)
        .map(str::to_string)
        .collect()
}

fn split_paragraphs(text: &str) -> Vec<String> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|s| char_len(s) > 10)
        .map(str::to_string)
        .collect()
}

fn strip_prefixes(reply: &str) -> String {
    let reply = REPLY_NUMBER_PREFIX.replace(reply, "");
    let reply = REPLY_LABEL_PREFIX.replace(&reply, "");
    let reply = REPLY_BULLET_PREFIX.replace(&reply, "");
    reply.trim().to_string()
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}
