use log::warn;
use std::collections::HashMap;
use std::convert::TryInto;
use std::fs;
use std::path::Path;

pub mod question;

pub use question::{Question, QuestionKind, RawQuestion};

/// Read-only store of questions, one JSON file per topic.
#[derive(Debug, Default)]
pub struct QuestionBank {
    topics: HashMap<String, Vec<Question>>,
}

impl QuestionBank {
    /// Loads every `*.json` file in `dir`. Missing directories, unreadable
    /// files and malformed entries are logged and skipped rather than
    /// aborting the load.
    pub fn open(dir: &Path) -> QuestionBank {
        let mut topics = HashMap::new();

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Could not read questions directory {}: {}", dir.display(), e);
                return QuestionBank { topics };
            }
        };

        for entry in entries.filter_map(|e| e.ok()) {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let topic = match path.file_stem().and_then(|s| s.to_str()) {
                Some(stem) => stem.to_owned(),
                None => continue,
            };
            let questions = Self::load_topic_file(&path, &topic);
            if !questions.is_empty() {
                topics.insert(topic, questions);
            }
        }

        QuestionBank { topics }
    }

    fn load_topic_file(path: &Path, topic: &str) -> Vec<Question> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Could not read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Malformed question file {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        // One bad entry should not take the rest of the topic down with it.
        let mut questions = Vec::new();
        for entry in entries {
            let mut raw: RawQuestion = match serde_json::from_value(entry) {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Skipping malformed question in {}: {}", path.display(), e);
                    continue;
                }
            };
            if raw.topic.is_none() {
                raw.topic = Some(topic.to_owned());
            }
            match raw.try_into() {
                Ok(question) => questions.push(question),
                Err(e) => {
                    warn!("Skipping invalid question in {}: {:#}", path.display(), e);
                }
            }
        }
        questions
    }

    /// Topic names with at least one question, sorted for stable menus.
    pub fn topics(&self) -> Vec<&str> {
        let mut topics: Vec<&str> = self.topics.keys().map(|t| t.as_str()).collect();
        topics.sort_unstable();
        topics
    }

    pub fn questions(&self, topic: &str) -> &[Question] {
        self.topics.get(topic).map(|q| q.as_slice()).unwrap_or(&[])
    }
}
