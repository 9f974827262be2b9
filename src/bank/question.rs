use anyhow::{anyhow, Context, Error, Result};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::convert::TryFrom;
use strsim::normalized_damerau_levenshtein;
use unidecode::unidecode;

lazy_static! {
    static ref FORBIDDEN_ANSWER_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9]").unwrap();
    static ref FORBIDDEN_WORD_CHARACTERS_REGEX: Regex = Regex::new("[^a-z0-9\\s]").unwrap();
    static ref WHITESPACE_REGEX: Regex = Regex::new("\\s+").unwrap();
    static ref OPTION_TOKEN_REGEX: Regex = Regex::new("^([a-z0-9])$").unwrap();
}

// Conservative similarity floor for typo tolerance on short answers.
const FUZZY_MATCH_THRESHOLD: f64 = 0.88;

/// Strips everything but letters and digits, so "Ampère's law" and
/// "amperes law" compare equal.
pub fn sanitize(answer: &str) -> String {
    let answer = unidecode(answer);
    FORBIDDEN_ANSWER_CHARACTERS_REGEX
        .replace_all(&answer.to_lowercase(), "")
        .into()
}

/// Like `sanitize` but keeps word boundaries, for the rules that work on
/// whole tokens.
fn normalize(answer: &str) -> String {
    let answer = unidecode(answer);
    let answer: String = FORBIDDEN_WORD_CHARACTERS_REGEX
        .replace_all(&answer.to_lowercase(), " ")
        .into();
    WHITESPACE_REGEX.replace_all(answer.trim(), " ").into()
}

/// Extracts a canonical token from option-style input ("A.", "b)" → "a", "b").
fn option_token(answer: &str) -> Option<String> {
    let normalized = normalize(answer);
    let first = normalized.split_whitespace().next()?;
    OPTION_TOKEN_REGEX
        .captures(first)
        .map(|captures| captures[1].to_owned())
}

fn unit_value(word: &str) -> Option<u32> {
    let value = match word {
        "zero" => 0,
        "one" => 1,
        "two" => 2,
        "three" => 3,
        "four" => 4,
        "five" => 5,
        "six" => 6,
        "seven" => 7,
        "eight" => 8,
        "nine" => 9,
        "ten" => 10,
        "eleven" => 11,
        "twelve" => 12,
        "thirteen" => 13,
        "fourteen" => 14,
        "fifteen" => 15,
        "sixteen" => 16,
        "seventeen" => 17,
        "eighteen" => 18,
        "nineteen" => 19,
        _ => return None,
    };
    Some(value)
}

fn tens_value(word: &str) -> Option<u32> {
    let value = match word {
        "twenty" => 20,
        "thirty" => 30,
        "forty" => 40,
        "fifty" => 50,
        "sixty" => 60,
        "seventy" => 70,
        "eighty" => 80,
        "ninety" => 90,
        _ => return None,
    };
    Some(value)
}

/// Parses small spelled-out numbers ("twenty one" → 21).
fn word_number(text: &str) -> Option<u32> {
    let mut total = 0;
    let mut words = text.split_whitespace().peekable();
    words.peek()?;
    while let Some(word) = words.next() {
        if let Some(tens) = tens_value(word) {
            total += tens;
            if let Some(unit) = words.peek().and_then(|w| unit_value(w)) {
                if unit < 10 {
                    total += unit;
                    words.next();
                }
            }
        } else if let Some(unit) = unit_value(word) {
            total += unit;
        } else {
            return None;
        }
    }
    Some(total)
}

fn numeric_value(answer: &str) -> Option<f64> {
    let trimmed = answer.trim();
    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value);
    }
    word_number(&normalize(trimmed)).map(|n| n as f64)
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawAnswer {
    One(String),
    Many(Vec<String>),
}

impl RawAnswer {
    fn into_answers(self) -> Vec<String> {
        match self {
            RawAnswer::One(answer) => vec![answer],
            RawAnswer::Many(answers) => answers,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RawQuestion {
    pub id: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(rename = "question")]
    pub prompt: String,
    pub answer: RawAnswer,
    #[serde(default)]
    pub choices: Option<Vec<String>>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Clone, Debug)]
pub enum QuestionKind {
    FreeText {
        answer: String,
        acceptable_answers: Vec<String>,
        matcher: Regex,
    },
    MultipleChoice {
        choices: Vec<String>,
        answer_index: usize,
    },
}

#[derive(Clone, Debug)]
pub struct Question {
    pub id: String,
    pub topic: String,
    pub prompt: String,
    pub kind: QuestionKind,
    pub explanation: Option<String>,
}

impl Question {
    pub fn is_answer_correct(&self, answer: &str) -> bool {
        match &self.kind {
            QuestionKind::FreeText {
                acceptable_answers,
                matcher,
                ..
            } => {
                let sanitized = sanitize(answer);
                if !sanitized.is_empty() && matcher.is_match(&sanitized) {
                    return true;
                }
                if let Some(value) = numeric_value(answer) {
                    let numeric_match = acceptable_answers
                        .iter()
                        .filter_map(|a| numeric_value(a))
                        .any(|expected| (value - expected).abs() < 1e-9);
                    if numeric_match {
                        return true;
                    }
                }
                // A canonical answer buried in a longer reply counts, but only
                // as whole words ("N" must not match inside "kelvin").
                let normalized = normalize(answer);
                let padded = format!(" {} ", normalized);
                let contained = acceptable_answers
                    .iter()
                    .map(|a| normalize(a))
                    .any(|a| !a.is_empty() && padded.contains(&format!(" {} ", a)));
                if contained {
                    return true;
                }
                // Minor typos and spelling differences still pass.
                !normalized.is_empty()
                    && acceptable_answers
                        .iter()
                        .map(|a| normalize(a))
                        .any(|a| {
                            !a.is_empty()
                                && normalized_damerau_levenshtein(&normalized, &a)
                                    >= FUZZY_MATCH_THRESHOLD
                        })
            }
            QuestionKind::MultipleChoice {
                choices,
                answer_index,
            } => {
                let sanitized = sanitize(answer);
                if sanitized == sanitize(&choices[*answer_index]) {
                    return true;
                }
                match option_token(answer) {
                    Some(token) => Self::option_index(&token) == Some(*answer_index),
                    None => false,
                }
            }
        }
    }

    /// The canonical answer to display when marking an incorrect reply.
    pub fn correct_answer(&self) -> String {
        match &self.kind {
            QuestionKind::FreeText { answer, .. } => answer.clone(),
            QuestionKind::MultipleChoice {
                choices,
                answer_index,
            } => choices[*answer_index].clone(),
        }
    }

    // Option tokens map "a"/"b"/… or 1-based digits onto choice indices.
    fn option_index(token: &str) -> Option<usize> {
        let c = token.chars().next()?;
        if c.is_ascii_digit() {
            let digit = c.to_digit(10)?;
            if digit == 0 {
                return None;
            }
            return Some((digit - 1) as usize);
        }
        if c.is_ascii_lowercase() {
            return Some((c as usize) - ('a' as usize));
        }
        None
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = Error;

    fn try_from(raw: RawQuestion) -> Result<Question> {
        let RawQuestion {
            id,
            topic,
            prompt,
            answer,
            choices,
            explanation,
        } = raw;

        let answers = answer.into_answers();
        let canonical = answers
            .first()
            .cloned()
            .with_context(|| format!("Question '{}' has no answer", id))?;

        let kind = match choices {
            Some(choices) => {
                if choices.len() < 2 {
                    return Err(anyhow!(
                        "Question '{}' needs at least two choices",
                        id
                    ));
                }
                let sanitized_answer = sanitize(&canonical);
                let answer_index = choices
                    .iter()
                    .position(|c| sanitize(c) == sanitized_answer)
                    .with_context(|| {
                        format!("Question '{}' lists an answer that is not a choice", id)
                    })?;
                QuestionKind::MultipleChoice {
                    choices,
                    answer_index,
                }
            }
            None => {
                let sanitized: Vec<String> = answers
                    .iter()
                    .filter_map(|answer| {
                        let sanitized = sanitize(answer);
                        if sanitized.is_empty() {
                            None
                        } else {
                            Some(sanitized)
                        }
                    })
                    .collect();
                if sanitized.is_empty() {
                    return Err(anyhow!("Question '{}' has no usable answer", id));
                }
                let matcher = Regex::new(&format!("^({})$", sanitized.join("|")))?;
                QuestionKind::FreeText {
                    answer: canonical,
                    acceptable_answers: answers,
                    matcher,
                }
            }
        };

        Ok(Question {
            id,
            topic: topic.unwrap_or_default(),
            prompt,
            kind,
            explanation,
        })
    }
}
