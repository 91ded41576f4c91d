//! Command parsing for chat messages
//!
//! Rules are tried in a fixed order and the first match wins, so
//! `company topic` is a company lookup and not a topic lookup.

use std::fmt;

use crate::catalog::{Difficulty, QuestionId};

/// A classified chat command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Random question from the whole catalog: `question`
    RandomQuestion,
    /// Questions asked by a company (lower-cased): `company <name>`
    Company(String),
    /// Questions on a topic: `topic <name>`
    Topic(String),
    /// Record a solve: `mark solved <id>`
    MarkSolved(QuestionId),
    /// Progress summary: `progress`
    Progress,
    /// Command list: `help`
    Help,
    /// Questions of one tier: `easy`, `medium` or `hard`
    Difficulty(Difficulty),
    /// One random question per tier: `3 questions`
    ThreeTier,
    /// Random warm-up set: `interview`
    Interview,
}

/// Argument problems reported back as a usage hint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    /// `company` without a name
    CompanyName,
    /// `topic` without a name
    TopicName,
    /// `mark solved` without an id
    MissingId,
    /// `mark solved` with a non-numeric id
    NumericId,
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hint = match self {
            Usage::CompanyName => "Usage: company Amazon  or  company Google",
            Usage::TopicName => "Usage: topic Arrays  or  topic Graphs",
            Usage::MissingId => "Usage: mark solved 1  (where 1 is question id)",
            Usage::NumericId => "Please give a valid numeric question id.",
        };
        f.write_str(hint)
    }
}

/// Result of classifying a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    /// Successfully parsed command
    Ok(Command),
    /// Blank message
    Empty,
    /// Recognized command with a bad or missing argument
    InvalidArgument(Usage),
    /// Nothing matched
    UnknownCommand,
}

/// Strip `prefix` from the start of `input`, ignoring ASCII case
fn strip_prefix_ignore_case<'a>(input: &'a str, prefix: &str) -> Option<&'a str> {
    let head = input.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &input[prefix.len()..])
}

/// Classify a raw chat message
pub fn parse_command(input: &str) -> ParseResult {
    let input = input.trim();

    if input.is_empty() {
        return ParseResult::Empty;
    }

    if input.eq_ignore_ascii_case("question") {
        return ParseResult::Ok(Command::RandomQuestion);
    }

    if let Some(rest) = strip_prefix_ignore_case(input, "company ") {
        let name = rest.trim().to_lowercase();
        return if name.is_empty() {
            ParseResult::InvalidArgument(Usage::CompanyName)
        } else {
            ParseResult::Ok(Command::Company(name))
        };
    }

    if let Some(rest) = strip_prefix_ignore_case(input, "topic ") {
        let topic = rest.trim();
        return if topic.is_empty() {
            ParseResult::InvalidArgument(Usage::TopicName)
        } else {
            ParseResult::Ok(Command::Topic(topic.to_string()))
        };
    }

    // Trimming eats the separator, so a bare keyword never reaches the prefixes.
    if input.eq_ignore_ascii_case("company") {
        return ParseResult::InvalidArgument(Usage::CompanyName);
    }
    if input.eq_ignore_ascii_case("topic") {
        return ParseResult::InvalidArgument(Usage::TopicName);
    }

    if strip_prefix_ignore_case(input, "mark solved").is_some() {
        // The id is the third whitespace-separated token.
        return match input.split_whitespace().nth(2) {
            None => ParseResult::InvalidArgument(Usage::MissingId),
            Some(token) => match token.parse::<QuestionId>() {
                Ok(id) => ParseResult::Ok(Command::MarkSolved(id)),
                Err(_) => ParseResult::InvalidArgument(Usage::NumericId),
            },
        };
    }

    if input.eq_ignore_ascii_case("progress") {
        return ParseResult::Ok(Command::Progress);
    }

    if input.eq_ignore_ascii_case("help") {
        return ParseResult::Ok(Command::Help);
    }

    if let Ok(level) = input.parse::<Difficulty>() {
        return ParseResult::Ok(Command::Difficulty(level));
    }

    if input.eq_ignore_ascii_case("3 questions") {
        return ParseResult::Ok(Command::ThreeTier);
    }

    if input.eq_ignore_ascii_case("interview") {
        return ParseResult::Ok(Command::Interview);
    }

    ParseResult::UnknownCommand
}
