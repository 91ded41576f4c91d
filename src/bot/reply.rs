//! Reply rendering
//!
//! Turns a command outcome into the text sent back to the user. Only the
//! random-question reply can carry markup, and it is built purely from
//! catalog fields, never from the user's message.

use std::fmt::Write as _;

use super::error::CommandError;
use crate::catalog::{Difficulty, Question};
use crate::query::ProgressSummary;

/// Text returned for one message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Newline-separated reply body
    pub text: String,
    /// Whether `text` is safe markup rather than plain text
    pub markup: bool,
}

impl Reply {
    /// A plain-text reply
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), markup: false }
    }

    /// A reply already rendered as safe markup
    pub fn markup(text: impl Into<String>) -> Self {
        Self { text: text.into(), markup: true }
    }
}

/// Structured result of a successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// One question drawn from the whole catalog
    RandomQuestion(Question),
    /// Questions asked by `company`
    CompanyList { company: String, questions: Vec<Question> },
    /// Questions on `topic`
    TopicList { topic: String, questions: Vec<Question> },
    /// Questions of one tier
    DifficultyList { level: Difficulty, questions: Vec<Question> },
    /// A solve that was recorded and saved
    MarkedSolved(Question),
    /// Solve counts over the catalog
    Progress(ProgressSummary),
    /// Command list
    Help,
    /// One question per tier, easiest first
    ThreeTier(Vec<Question>),
    /// Distinct warm-up questions
    Interview(Vec<Question>),
    /// Message matched no command
    Unknown,
}

/// How links are rendered in the random-question reply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkStyle {
    /// `Link: <url>` as inert text
    #[default]
    Plain,
    /// An escaped HTML anchor
    Html,
}

const TIP: &str = "Tip: use  mark solved <id>  to track your progress.";

const COMMANDS: &[(&str, &str)] = &[
    ("question", "Get a random DSA question"),
    ("company <name>", "Questions asked by a company (example: company Amazon)"),
    ("topic <name>", "Questions on a topic (example: topic Arrays)"),
    ("easy | medium | hard", "Questions of one difficulty"),
    ("3 questions", "One easy, one medium and one hard question"),
    ("interview", "A random set of interview warm-up questions"),
    ("mark solved <id>", "Mark a question as solved (example: mark solved 5)"),
    ("progress", "Check how many questions you've solved"),
    ("help", "Show all commands again"),
];

/// Escape text for inclusion in HTML
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// One `• #id - title (Difficulty) [Topic]` line
fn question_line(q: &Question) -> String {
    format!("• #{} - {} ({}) [{}]", q.id, q.title, q.difficulty, q.topic)
}

fn command_list(out: &mut String) {
    for (usage, what) in COMMANDS {
        let _ = writeln!(out, "• {usage} - {what}");
    }
}

/// Whether `link` may become a clickable anchor
fn is_web_link(link: &str) -> bool {
    let link = link.trim_start();
    ["http://", "https://"]
        .iter()
        .any(|scheme| link.get(..scheme.len()).is_some_and(|head| head.eq_ignore_ascii_case(scheme)))
}

fn render_question(q: &Question, style: LinkStyle) -> Reply {
    match style {
        LinkStyle::Plain => Reply::plain(format!(
            "Question\n#{} - {}\nTopic: {}\nDifficulty: {}\nCompanies: {}\nLink: {}",
            q.id,
            q.title,
            q.topic,
            q.difficulty,
            q.companies.join(", "),
            q.link
        )),
        LinkStyle::Html => {
            let escaped = escape_html(&q.link);
            let link = if is_web_link(&q.link) {
                format!(
                    "<a href=\"{escaped}\" target=\"_blank\" rel=\"noopener noreferrer\">{escaped}</a>"
                )
            } else {
                escaped
            };
            Reply::markup(format!(
                "Question\n#{} - {}\nTopic: {}\nDifficulty: {}\nCompanies: {}\nLink: {link}",
                q.id,
                escape_html(&q.title),
                escape_html(&q.topic),
                q.difficulty,
                escape_html(&q.companies.join(", ")),
            ))
        }
    }
}

fn render_list(header: String, questions: &[Question]) -> Reply {
    let mut text = header;
    for q in questions {
        text.push('\n');
        text.push_str(&question_line(q));
    }
    text.push_str("\n\n");
    text.push_str(TIP);
    Reply::plain(text)
}

fn render_progress(summary: &ProgressSummary) -> Reply {
    let counts = format!(
        "Solved: {}\nPending: {}\nTotal: {}",
        summary.solved, summary.pending, summary.total
    );

    if summary.is_complete() {
        return Reply::plain(format!(
            "🎉 Congratulations! 🎉\nYou've completed ALL {total} DSA questions ({total}/{total})!\n{counts}\n\nAmazing dedication and consistency! Keep practicing to stay sharp.",
            total = summary.total
        ));
    }

    let mut text = format!("Your Progress\n{counts}\n\nTopic-wise:");
    if summary.per_topic.is_empty() {
        text.push_str("\nNo data yet.");
    }
    for tally in &summary.per_topic {
        let _ = write!(text, "\n• {}: {}/{}", tally.topic, tally.solved, tally.total);
    }
    Reply::plain(text)
}

/// Render a successful outcome
pub fn render(outcome: &Outcome, style: LinkStyle) -> Reply {
    match outcome {
        Outcome::RandomQuestion(q) => render_question(q, style),
        Outcome::CompanyList { company, questions } => {
            render_list(format!("Questions for {company}:"), questions)
        }
        Outcome::TopicList { topic, questions } => {
            render_list(format!("Questions on {topic}:"), questions)
        }
        Outcome::DifficultyList { level, questions } => {
            render_list(format!("{level} questions:"), questions)
        }
        Outcome::MarkedSolved(q) => {
            Reply::plain(format!("Nice! Marked question #{} - \"{}\" as solved.", q.id, q.title))
        }
        Outcome::Progress(summary) => render_progress(summary),
        Outcome::Help => {
            let mut text =
                String::from("Hi! I'm your Placement Prep Bot 🤖\n\nYou can use these commands:\n");
            command_list(&mut text);
            Reply::plain(text.trim_end())
        }
        Outcome::ThreeTier(questions) => {
            let mut text = String::from("Your 3-question set:");
            for q in questions {
                let _ = write!(text, "\n• {}: #{} - {} [{}]", q.difficulty, q.id, q.title, q.topic);
            }
            text.push_str("\n\n");
            text.push_str(TIP);
            Reply::plain(text)
        }
        Outcome::Interview(questions) => render_list(
            format!("Interview warm-up ({} questions):", questions.len()),
            questions,
        ),
        Outcome::Unknown => {
            let mut text =
                String::from("I didn't understand that.\n\nHere's what you can ask me:\n\n");
            command_list(&mut text);
            Reply::plain(text.trim_end())
        }
    }
}

/// Render a failed command; always plain text
pub fn render_error(err: &CommandError) -> Reply {
    Reply::plain(err.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::QuestionId;
    use crate::query::TopicTally;

    fn two_sum() -> Question {
        Question {
            id: QuestionId::new(1),
            title: "Two Sum".into(),
            topic: "Array".into(),
            difficulty: Difficulty::Easy,
            companies: vec!["Amazon".into(), "Google".into()],
            link: "https://leetcode.com/problems/two-sum".into(),
        }
    }

    #[test]
    fn plain_question_reply() {
        let reply = render(&Outcome::RandomQuestion(two_sum()), LinkStyle::Plain);
        assert!(!reply.markup);
        assert_eq!(
            reply.text,
            "Question\n#1 - Two Sum\nTopic: Array\nDifficulty: Easy\nCompanies: Amazon, Google\nLink: https://leetcode.com/problems/two-sum"
        );
    }

    #[test]
    fn html_question_reply_escapes_catalog_fields() {
        let mut q = two_sum();
        q.title = "<script>alert(1)</script>".into();
        q.link = "https://x.test/?a=1&b=\"2\"".into();

        let reply = render(&Outcome::RandomQuestion(q), LinkStyle::Html);
        assert!(reply.markup);
        assert!(reply.text.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(reply.text.contains(
            "<a href=\"https://x.test/?a=1&amp;b=&quot;2&quot;\" target=\"_blank\" rel=\"noopener noreferrer\">"
        ));
        assert!(!reply.text.contains("<script>"));
    }

    #[test]
    fn html_reply_links_only_web_urls() {
        let mut q = two_sum();
        q.link = "javascript:alert(1)".into();
        let reply = render(&Outcome::RandomQuestion(q.clone()), LinkStyle::Html);
        assert!(reply.text.ends_with("\nLink: javascript:alert(1)"));
        assert!(!reply.text.contains("<a "));

        q.link = "HTTPS://leetcode.com/problems/two-sum".into();
        let reply = render(&Outcome::RandomQuestion(q), LinkStyle::Html);
        assert!(reply.text.contains("<a href=\"HTTPS://leetcode.com/problems/two-sum\""));
    }

    #[test]
    fn company_list_reply() {
        let outcome = Outcome::CompanyList { company: "amazon".into(), questions: vec![two_sum()] };
        assert_eq!(
            render(&outcome, LinkStyle::Html),
            Reply::plain(format!("Questions for amazon:\n• #1 - Two Sum (Easy) [Array]\n\n{TIP}"))
        );
    }

    #[test]
    fn progress_reply_lists_topics() {
        let summary = ProgressSummary {
            total: 3,
            solved: 1,
            pending: 2,
            per_topic: vec![
                TopicTally { topic: "Array".into(), solved: 1, total: 2 },
                TopicTally { topic: "Graph".into(), solved: 0, total: 1 },
            ],
        };
        assert_eq!(
            render(&Outcome::Progress(summary), LinkStyle::Plain).text,
            "Your Progress\nSolved: 1\nPending: 2\nTotal: 3\n\nTopic-wise:\n• Array: 1/2\n• Graph: 0/1"
        );
    }

    #[test]
    fn progress_reply_for_empty_catalog() {
        let text = render(&Outcome::Progress(ProgressSummary::default()), LinkStyle::Plain).text;
        assert!(text.ends_with("Topic-wise:\nNo data yet."));
        assert!(!text.contains("Congratulations"));
    }

    #[test]
    fn completed_progress_celebrates() {
        let summary = ProgressSummary {
            total: 1,
            solved: 1,
            pending: 0,
            per_topic: vec![TopicTally { topic: "Array".into(), solved: 1, total: 1 }],
        };
        let text = render(&Outcome::Progress(summary), LinkStyle::Plain).text;
        assert!(text.starts_with("🎉 Congratulations! 🎉"));
        assert!(text.contains("Solved: 1\nPending: 0"));
        assert!(!text.contains("Topic-wise"));
    }

    #[test]
    fn help_and_unknown_list_every_command() {
        let help = render(&Outcome::Help, LinkStyle::Plain).text;
        let unknown = render(&Outcome::Unknown, LinkStyle::Plain).text;
        for (usage, _) in COMMANDS {
            assert!(help.contains(&format!("• {usage} - ")));
            assert!(unknown.contains(&format!("• {usage} - ")));
        }
        assert!(unknown.starts_with("I didn't understand that."));
    }

    #[test]
    fn errors_render_as_plain_text() {
        let reply = render_error(&CommandError::EmptyInput);
        assert_eq!(reply, Reply::plain("Please type something"));
    }

    #[test]
    fn escape_html_handles_all_specials() {
        assert_eq!(escape_html(r#"<a href='x'>&"#), "&lt;a href=&#039;x&#039;&gt;&amp;");
    }
}
