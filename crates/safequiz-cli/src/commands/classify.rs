//! The `safequiz classify` command.

use anyhow::{Context, Result};
use serde::Serialize;

use safequiz_core::tier::{classify, TierResult};

#[derive(Serialize)]
struct Classification {
    score: i64,
    #[serde(flatten)]
    result: TierResult,
}

pub fn execute(score: i64, json: bool) -> Result<()> {
    let result = classify(score);

    if json {
        let out = serde_json::to_string(&Classification { score, result })
            .context("failed to serialize classification")?;
        println!("{out}");
    } else {
        println!("Score {score}: {} ({})", result.tier, result.color);
        println!("{}", result.message);
        println!("Badge: {}", result.badge);
    }

    Ok(())
}
