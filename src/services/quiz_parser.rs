//! Tolerant extraction of structured quiz data from LLM-generated markdown.
//!
//! The generator is asked to follow a fixed template, but its output is
//! untrusted prose. Every function here is a pure text transform that never
//! fails on malformed input: extraction degrades to empty results, question
//! parsing drops blocks it cannot recover, and it is the validator's job to
//! decide whether the degraded result warrants regeneration.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{AnswerKey, OptionLetter, ParsedQuestion};

/// Fills explanation slots the model left empty so the parallel arrays stay
/// index-aligned.
pub const FALLBACK_EXPLANATION: &str =
    "Great effort! Keep learning and you'll master this topic.";

static ANSWER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)✅\s*\*\*Correct Answer:\s*([A-Da-d])\s*\*\*")
        .expect("answer marker pattern is valid")
});

// The regex crate has no lookahead, so the span terminator is consumed as a
// non-capturing group instead of asserted.
static EXPLANATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)>\s*💡\s*\*\*Explanation:\*\*\s*(.+?)(?:\n\n|---|\n###|\z)")
        .expect("explanation pattern is valid")
});

static STRIP_ANSWER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)✅\s*\*\*Correct Answer:.*?\*\*\s*\n?")
        .expect("answer strip pattern is valid")
});

// Same span rule as EXPLANATION_RE, but the terminator is captured so the
// replacement can put it back.
static STRIP_EXPLANATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)>\s*💡\s*\*\*Explanation:\*\*.*?(\n\n|---|\n###|\z)")
        .expect("explanation strip pattern is valid")
});

static STRIP_COMPLETE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)##\s*🎊\s*Quiz Complete!.*").expect("quiz complete pattern is valid")
});

static BLANK_LINES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("blank line pattern is valid"));

static QUESTION_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"###\s*Question\s*").expect("question split pattern is valid"));

static FIRST_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)\s*([^\n]*)").expect("first line pattern is valid"));

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").expect("bold pattern is valid"));

// The model emits options in one of three equivalent line-prefix conventions.
static OPTION_RES: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?m)^\s*-\s*([A-Da-d])\)\s*(.+)").expect("dash option pattern is valid"),
        Regex::new(r"(?m)^\s*\*\s*([A-Da-d])\)\s*(.+)").expect("star option pattern is valid"),
        Regex::new(r"(?m)^\s*([A-Da-d])\)\s*(.+)").expect("bare option pattern is valid"),
    ]
});

static IMAGE_TOPIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*\*📸 Image Topic:\s*(.+?)\*\*").expect("image topic pattern is valid")
});

/// Bold runs containing these phrases are template boilerplate, never the
/// question sentence.
const SKIP_PHRASES: [&str; 11] = [
    "correct answer",
    "explanation",
    "great job",
    "quiz complete",
    "good job",
    "well done",
    "keep learning",
    "keep going",
    "congratulations",
    "awesome work",
    "nice work",
];

/// Raw answer/explanation sequences scraped from the document, prior to
/// validation. The two extraction paths (markers here, blocks in
/// [`parse_individual_questions`]) are independent and may disagree in count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawQuizData {
    pub correct_answers: Vec<String>,
    pub explanations: Vec<String>,
}

/// Scans for correct-answer markers and explanation blocks in document order.
/// Zero matches is a valid result; the validator decides what to do with it.
pub fn extract_answers(quiz_text: &str) -> RawQuizData {
    let correct_answers = ANSWER_RE
        .captures_iter(quiz_text)
        .map(|cap| cap[1].to_uppercase())
        .collect();

    let explanations = EXPLANATION_RE
        .captures_iter(quiz_text)
        .map(|cap| cap[1].trim().to_string())
        .collect();

    RawQuizData {
        correct_answers,
        explanations,
    }
}

/// Decides whether a parse is usable for an `expected_count`-question quiz.
///
/// Too few answers means the template was not followed and the quiz must be
/// regenerated. A short explanation list is cosmetic and is healed in place by
/// padding with [`FALLBACK_EXPLANATION`].
pub fn validate_quiz_data(data: &mut RawQuizData, expected_count: usize) -> bool {
    if data.correct_answers.len() < expected_count {
        return false;
    }
    while data.explanations.len() < expected_count {
        data.explanations.push(FALLBACK_EXPLANATION.to_string());
    }
    data.correct_answers
        .iter()
        .take(expected_count)
        .all(|ans| OptionLetter::parse(ans).is_some())
}

/// Converts validated raw data into a typed answer key. Letters that fail to
/// parse (possible only past the validated prefix) are skipped.
pub fn build_answer_key(data: &RawQuizData) -> AnswerKey {
    AnswerKey {
        correct_answers: data
            .correct_answers
            .iter()
            .filter_map(|s| OptionLetter::parse(s))
            .collect(),
        explanations: data.explanations.clone(),
    }
}

/// Splits the document into `### Question` blocks and recovers each question's
/// ordinal, decorative emoji, sentence text and four options.
///
/// The question text is found by a layered fallback chain: a qualifying bold
/// run, then the first sufficiently long plain line, then a synthetic
/// placeholder. Blocks that do not yield exactly four options are dropped --
/// the question simply does not appear, a lossy but safe degradation.
pub fn parse_individual_questions(quiz_text: &str) -> Vec<ParsedQuestion> {
    let mut questions = Vec::new();

    for block in QUESTION_SPLIT_RE.split(quiz_text).skip(1) {
        let Some(first_line) = FIRST_LINE_RE.captures(block) else {
            continue;
        };
        let Ok(number) = first_line[1].parse::<u32>() else {
            continue;
        };
        let emoji = first_line[2].trim().to_string();

        let text = question_text_for_block(block)
            .unwrap_or_else(|| format!("Question {}", number));

        let options = parse_options(block);
        if options.len() == 4 {
            questions.push(ParsedQuestion {
                number,
                emoji,
                text,
                options,
            });
        }
    }

    questions
}

fn question_text_for_block(block: &str) -> Option<String> {
    for cap in BOLD_RE.captures_iter(block) {
        let candidate = cap[1].trim().to_string();
        let lowered = candidate.to_lowercase();
        if SKIP_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
            continue;
        }
        if candidate.chars().count() > 10 && candidate.contains('?') {
            return Some(candidate);
        }
    }

    // No qualifying bold run; fall back to the first plain line of substance
    // in the lines right after the heading.
    for line in block.lines().skip(1).take(5) {
        let line = line.trim();
        if line.is_empty()
            || line.starts_with('-')
            || line.starts_with('*')
            || line.contains('✅')
            || line.contains('💡')
        {
            continue;
        }
        if line.chars().count() > 10 {
            return Some(line.replace("**", "").trim().to_string());
        }
    }

    None
}

fn parse_options(block: &str) -> BTreeMap<OptionLetter, String> {
    for pattern in OPTION_RES.iter() {
        let matches: Vec<(OptionLetter, String)> = pattern
            .captures_iter(block)
            .filter_map(|cap| {
                let letter = OptionLetter::from_char(cap[1].chars().next()?)?;
                Some((letter, cap[2].trim().to_string()))
            })
            .collect();

        if matches.len() >= 4 {
            // First convention with enough matches wins; only the first four
            // count, later duplicates of a letter overwrite earlier ones the
            // same way the source dictionary did.
            let mut options = BTreeMap::new();
            for (letter, text) in matches.into_iter().take(4) {
                options.insert(letter, text);
            }
            return options;
        }
    }

    BTreeMap::new()
}

/// Produces the pre-grading rendition of the document: every answer marker,
/// every explanation block and the trailing congratulatory section removed,
/// runs of blank lines collapsed. Safe to show before the learner answers.
pub fn strip_answers(quiz_text: &str) -> String {
    let stripped = STRIP_ANSWER_RE.replace_all(quiz_text, "");
    let stripped = STRIP_EXPLANATION_RE.replace_all(&stripped, "$1");
    let stripped = STRIP_COMPLETE_RE.replace_all(&stripped, "");
    let stripped = BLANK_LINES_RE.replace_all(&stripped, "\n\n");
    stripped.trim().to_string()
}

/// Recovers the detected subject line of an image-generated quiz.
pub fn extract_image_topic(quiz_text: &str) -> Option<String> {
    IMAGE_TOPIC_RE
        .captures(quiz_text)
        .map(|cap| cap[1].trim().to_string())
}
