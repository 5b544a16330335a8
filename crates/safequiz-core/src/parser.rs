//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, and lints them for
//! problems that do not make a bank unusable.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::bank::QuestionBank;
use crate::model::{AnswerOption, Question};
use crate::tier::Tier;

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: u32,
    prompt: String,
    #[serde(default)]
    options: Vec<TomlOption>,
}

#[derive(Debug, Deserialize)]
struct TomlOption {
    text: String,
    points: u32,
    #[serde(default)]
    correct: bool,
    #[serde(default)]
    explanation: String,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank`.
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed
        .questions
        .into_iter()
        .map(|q| {
            let options = q
                .options
                .into_iter()
                .map(|o| AnswerOption {
                    text: o.text,
                    points: o.points,
                    correct: o.correct,
                    explanation: o.explanation,
                })
                .collect();
            Question {
                id: q.id,
                prompt: q.prompt,
                options,
            }
        })
        .collect();

    let bank = QuestionBank::new(
        parsed.bank.id,
        parsed.bank.name,
        parsed.bank.description,
        questions,
    )
    .with_context(|| format!("invalid question bank: {}", source_path.display()))?;

    Ok(bank)
}

/// Recursively collect all `.toml` files under a directory, sorted by path.
pub fn bank_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            files.extend(bank_files(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Recursively load all `.toml` bank files from a directory.
///
/// Files that fail to parse or validate are skipped with a warning.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    for path in bank_files(dir)? {
        match parse_bank(&path) {
            Ok(bank) => banks.push(bank),
            Err(e) => {
                tracing::warn!("skipping {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(banks)
}

/// A non-fatal finding from bank linting.
#[derive(Debug, Clone)]
pub struct LintWarning {
    /// The question ID (if applicable).
    pub question_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Lint a bank for issues that are legal but probably mistakes.
pub fn lint_bank(bank: &QuestionBank) -> Vec<LintWarning> {
    let mut warnings = Vec::new();

    for q in bank.questions() {
        for (i, opt) in q.options.iter().enumerate() {
            if opt.explanation.trim().is_empty() {
                warnings.push(LintWarning {
                    question_id: Some(q.id),
                    message: format!("option {} has no explanation", i + 1),
                });
            }
        }

        let mut seen_text = HashSet::new();
        for opt in &q.options {
            if !seen_text.insert(opt.text.trim()) {
                warnings.push(LintWarning {
                    question_id: Some(q.id),
                    message: format!("duplicate option text: {}", opt.text.trim()),
                });
            }
        }

        if let Some(correct) = q.correct_option() {
            if correct.points < q.max_points() {
                warnings.push(LintWarning {
                    question_id: Some(q.id),
                    message: format!(
                        "correct option is worth {} points but another option is worth {}",
                        correct.points,
                        q.max_points()
                    ),
                });
            }
        }
    }

    let max = i64::from(bank.max_score());
    for tier in Tier::ALL {
        if let Some(min) = tier.threshold() {
            if max < min {
                warnings.push(LintWarning {
                    question_id: None,
                    message: format!(
                        "{tier} tier is unreachable: needs {min} points, bank maximum is {max}"
                    ),
                });
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_TOML: &str = r#"
[bank]
id = "mini"
name = "Mini Bank"
description = "Two questions"

[[questions]]
id = 1
prompt = "Someone asks for your security code. What do you do?"

[[questions.options]]
text = "Share it"
points = 1
explanation = "The code is personal."

[[questions.options]]
text = "Refuse"
points = 20
correct = true
explanation = "Never share the code."

[[questions]]
id = 2
prompt = "Where do you install apps from?"

[[questions.options]]
text = "Official store"
points = 20
correct = true
explanation = "Stores verify apps."

[[questions.options]]
text = "A forwarded link"
points = 1
explanation = "Links can be fake."
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("mini.toml")).unwrap();
        assert_eq!(bank.id(), "mini");
        assert_eq!(bank.name(), "Mini Bank");
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.questions()[0].options.len(), 2);
        assert!(bank.questions()[0].options[1].correct);
        assert_eq!(bank.max_score(), 40);
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[bank]
id = "minimal"
name = "Minimal"

[[questions]]
id = 1
prompt = "Pick one"

[[questions.options]]
text = "This"
points = 3
correct = true
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("minimal.toml")).unwrap();
        assert!(bank.description().is_empty());
        assert!(bank.questions()[0].options[0].explanation.is_empty());
    }

    #[test]
    fn parse_rejects_invariant_violation() {
        let toml = r#"
[bank]
id = "broken"
name = "Broken"

[[questions]]
id = 1
prompt = "Nothing is correct here"

[[questions.options]]
text = "A"
points = 1
"#;
        let err = parse_bank_str(toml, &PathBuf::from("broken.toml")).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("invalid question bank"), "got: {msg}");
        assert!(msg.contains("0 correct options"), "got: {msg}");
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_bank_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn lint_flags_missing_explanation_and_unreachable_gold() {
        let toml = r#"
[bank]
id = "lint"
name = "Lint"

[[questions]]
id = 1
prompt = "Pick one"

[[questions.options]]
text = "This"
points = 5
correct = true

[[questions.options]]
text = "This"
points = 1
explanation = "Duplicate text on purpose."
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("lint.toml")).unwrap();
        let warnings = lint_bank(&bank);
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("no explanation")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate option text")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("Gold tier is unreachable")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("Silver tier is unreachable")));
    }

    #[test]
    fn lint_flags_underweighted_correct_option() {
        let toml = r#"
[bank]
id = "weights"
name = "Weights"

[[questions]]
id = 9
prompt = "Pick one"

[[questions.options]]
text = "Right"
points = 2
correct = true
explanation = "ok"

[[questions.options]]
text = "Wrong"
points = 40
explanation = "ok"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("weights.toml")).unwrap();
        let warnings = lint_bank(&bank);
        assert!(warnings
            .iter()
            .any(|w| w.question_id == Some(9) && w.message.contains("correct option is worth 2")));
    }

    #[test]
    fn builtin_bank_lints_clean() {
        let bank = QuestionBank::builtin().unwrap();
        let warnings = lint_bank(&bank);
        assert!(warnings.is_empty(), "unexpected warnings: {warnings:?}");
    }

    #[test]
    fn load_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mini.toml"), VALID_TOML).unwrap();
        std::fs::create_dir(dir.path().join("nested")).unwrap();
        std::fs::write(dir.path().join("nested/broken.toml"), "not [toml").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id(), "mini");
    }

    #[test]
    fn bank_files_are_sorted_and_recursive() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("b")).unwrap();
        std::fs::write(dir.path().join("b/two.toml"), "").unwrap();
        std::fs::write(dir.path().join("a.toml"), "").unwrap();
        std::fs::write(dir.path().join("c.md"), "").unwrap();

        let files = bank_files(dir.path()).unwrap();
        assert_eq!(
            files,
            vec![dir.path().join("a.toml"), dir.path().join("b/two.toml")]
        );
    }

    #[test]
    fn load_directory_rejects_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("mini.toml");
        std::fs::write(&file, VALID_TOML).unwrap();
        assert!(load_bank_directory(&file).is_err());
    }

    #[test]
    fn lint_survives_huge_point_values() {
        let toml = r#"
[bank]
id = "big"
name = "Big"

[[questions]]
id = 1
prompt = "Pick one"

[[questions.options]]
text = "Right"
points = 3000000000
correct = true
explanation = "ok"

[[questions]]
id = 2
prompt = "Pick another"

[[questions.options]]
text = "Right"
points = 3000000000
correct = true
explanation = "ok"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("big.toml")).unwrap();
        assert_eq!(bank.max_score(), u32::MAX);
        assert!(lint_bank(&bank).is_empty());
    }
}
