use anyhow::Result;
use chrono::{DateTime, Utc};
use log::warn;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::PathBuf;

#[cfg(test)]
mod tests;

/// One completed session for one user. Never mutated after it is written.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PerformanceRecord {
    pub user: String,
    pub topic: String,
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    pub total: u32,
}

impl PerformanceRecord {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        f64::from(self.score) / f64::from(self.total)
    }
}

/// Append-only log of quiz results backed by a single JSON file. The file is
/// read fully and rewritten fully on each append.
pub struct PerformanceLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PerformanceLog {
    pub fn new(path: PathBuf) -> PerformanceLog {
        PerformanceLog {
            path,
            write_lock: Mutex::new(()),
        }
    }

    /// Appends a timestamped record. A missing or corrupted log file starts
    /// over from an empty record set instead of failing the session.
    pub fn record(&self, user: &str, topic: &str, score: u32, total: u32) -> Result<()> {
        let _guard = self.write_lock.lock();

        let mut records = self.load();
        records.push(PerformanceRecord {
            user: user.to_owned(),
            topic: topic.to_owned(),
            timestamp: Utc::now(),
            score,
            total,
        });

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&self.path)?;
        serde_json::to_writer_pretty(file, &records)?;
        Ok(())
    }

    /// Records for one user and topic, most recent first.
    pub fn history(&self, user: &str, topic: &str) -> impl Iterator<Item = PerformanceRecord> {
        let user = user.to_owned();
        let topic = topic.to_owned();
        self.all()
            .filter(move |r| r.user == user && r.topic == topic)
    }

    /// Every record, most recent first.
    pub fn all(&self) -> impl Iterator<Item = PerformanceRecord> {
        // The file is append-ordered, so reverse iteration is newest-first.
        self.load().into_iter().rev()
    }

    fn load(&self) -> Vec<PerformanceRecord> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        if content.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Performance file {} is corrupted, starting fresh: {}",
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }
}
