//! The `safequiz questions` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use safequiz_core::config::QuizConfig;

pub fn execute(bank_path: Option<PathBuf>) -> Result<()> {
    let config = QuizConfig {
        bank: bank_path,
        ..QuizConfig::default()
    };
    let bank = config.load_bank()?;

    println!("{} ({} questions)", bank.name(), bank.len());
    if !bank.description().is_empty() {
        println!("{}", bank.description());
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Id", "Question", "Options", "Max points"]);
    for (i, q) in bank.questions().iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(q.id),
            Cell::new(&q.prompt),
            Cell::new(q.options.len()),
            Cell::new(q.max_points()),
        ]);
    }

    println!("{table}");
    println!(
        "Score range: {}-{} points",
        bank.min_score(),
        bank.max_score()
    );
    Ok(())
}
