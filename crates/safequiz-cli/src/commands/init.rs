//! Scaffolding for a new quiz directory.

use std::path::Path;

use anyhow::{Context, Result};

/// Files written by `init`, relative to the working directory.
const SCAFFOLD: [(&str, &str); 2] = [
    ("safequiz.toml", SAMPLE_CONFIG),
    ("banks/example.toml", EXAMPLE_BANK),
];

pub fn execute() -> Result<()> {
    for (name, created) in scaffold(Path::new("."))? {
        if created {
            println!("Created {name}");
        } else {
            println!("{name} already exists, skipping.");
        }
    }

    println!("\nNext steps:");
    println!("  1. Edit banks/example.toml with your own questions");
    println!("  2. Run: safequiz validate --bank banks/example.toml");
    println!("  3. Run: safequiz play --bank banks/example.toml");

    Ok(())
}

/// Write every scaffold file under `root`, never overwriting.
///
/// Returns each relative name with whether it was created.
fn scaffold(root: &Path) -> Result<Vec<(&'static str, bool)>> {
    let mut written = Vec::with_capacity(SCAFFOLD.len());
    for (name, contents) in SCAFFOLD {
        let path = root.join(name);
        if path.exists() {
            tracing::debug!("keeping existing {}", path.display());
            written.push((name, false));
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        written.push((name, true));
    }
    Ok(written)
}

const SAMPLE_CONFIG: &str = r#"# safequiz configuration

# Custom question bank; leave unset to use the built-in gov.br bank.
# bank = "banks/example.toml"

# Fixed seed for a reproducible option order.
# seed = 42

shuffle = true
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "A small bank to get started"

[[questions]]
id = 1
prompt = "A stranger calls asking for the code that just arrived by SMS. What do you do?"

[[questions.options]]
text = "Read the code to them."
points = 1
explanation = "Whoever has the code can take over your account."

[[questions.options]]
text = "Hang up and never share the code."
points = 5
correct = true
explanation = "Security codes are personal. No real service asks for them by phone."

[[questions]]
id = 2
prompt = "Which password is the strongest?"

[[questions.options]]
text = "Your birthday."
points = 1
explanation = "Personal dates are easy to guess."

[[questions.options]]
text = "A long passphrase unique to this site."
points = 5
correct = true
explanation = "Length and uniqueness matter most."

[[questions.options]]
text = "The same password you use everywhere."
points = 1
explanation = "One leak exposes every account."
"#;
