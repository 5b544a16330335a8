//! The `safequiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

use safequiz_core::parser;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let files = if bank_path.is_dir() {
        parser::bank_files(&bank_path)?
    } else {
        vec![bank_path]
    };
    anyhow::ensure!(!files.is_empty(), "no .toml question banks found");

    let mut total_warnings = 0;
    let mut invalid = 0;

    for path in &files {
        let bank = match parser::parse_bank(path) {
            Ok(bank) => bank,
            Err(e) => {
                println!("{}: INVALID: {e:#}", path.display());
                invalid += 1;
                continue;
            }
        };

        println!(
            "Bank: {} ({} questions, max score {})",
            bank.name(),
            bank.len(),
            bank.max_score()
        );

        let warnings = parser::lint_bank(&bank);
        for w in &warnings {
            let prefix = w
                .question_id
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if invalid > 0 {
        anyhow::bail!("{invalid} invalid question bank(s)");
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
