use crate::exam::ExamConfig;
use crate::logger;
use crate::models::Subject;
use crate::store::list_question_files;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "questions";
pub const DEFAULT_LOG_FILE: &str = "exam_drill.log";
pub const DEFAULT_SUBJECT_QUOTA: usize = 40;
pub const DEFAULT_TICK_MS: u64 = 1000;

const ENV_DATA_DIR: &str = "EXAM_DRILL_DATA_DIR";
const ENV_QUOTA: &str = "EXAM_DRILL_QUOTA";
const ENV_TICK_MS: &str = "EXAM_DRILL_TICK_MS";
const ENV_LOG: &str = "EXAM_DRILL_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub subject_quota: usize,
    pub tick: Duration,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            subject_quota: DEFAULT_SUBJECT_QUOTA,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup so tests don't have
    /// to touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let data_dir = lookup(ENV_DATA_DIR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);
        let log_file = lookup(ENV_LOG)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);
        let subject_quota =
            parse_number(ENV_QUOTA, lookup(ENV_QUOTA)).unwrap_or(defaults.subject_quota);
        let tick = parse_number::<u64>(ENV_TICK_MS, lookup(ENV_TICK_MS))
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .unwrap_or(defaults.tick);

        Self {
            data_dir,
            subject_quota,
            tick,
            log_file,
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: Option<String>) -> Option<T> {
    let value = value?;
    match value.trim().parse() {
        Ok(n) => Some(n),
        Err(_) => {
            logger::log(&format!(
                "Ignoring {}={:?}: not a number, using default",
                key, value
            ));
            None
        }
    }
}

/// The practice subjects and mock exam presets offered in the menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    pub subjects: Vec<Subject>,
    pub exams: Vec<ExamConfig>,
}

impl Catalog {
    pub fn with_quota(quota: usize) -> Self {
        Self {
            subjects: vec![
                Subject::new("Public Finance", "questions_finance.json"),
                Subject::new("Tax Law", "questions_taxlaw.json"),
                Subject::new("Accounting", "questions_accounting.json"),
                Subject::new("Commercial Law", "questions_commerciallaw.json"),
            ],
            exams: vec![
                ExamConfig::period_one().with_quota(quota),
                ExamConfig::period_two().with_quota(quota),
            ],
        }
    }

    /// Adds any question file in `dir` that no catalog subject already uses.
    pub fn with_discovered(mut self, dir: &Path) -> Self {
        for path in list_question_files(dir) {
            let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().to_string())
            else {
                continue;
            };
            if self.subjects.iter().any(|s| s.source == file_name) {
                continue;
            }
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| file_name.clone());
            self.subjects.push(Subject::new(name, file_name));
        }
        self
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_quota(DEFAULT_SUBJECT_QUOTA)
    }
}
