use anyhow::{Context, Result};
use clap_complete::{generate, Shell};
use ll97_cli::cli::build_cli_command;
use std::{fs, io, path::Path};

/// Print the completion script for `shell`, or write it to `out`.
pub fn handle(shell: Shell, out: Option<&Path>) -> Result<()> {
    let mut cmd = build_cli_command();
    let bin = cmd.get_name().to_string();
    match out {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut file = fs::File::create(path)
                .with_context(|| format!("creating '{}'", path.display()))?;
            generate(shell, &mut cmd, bin, &mut file);
            println!("Wrote {shell} completions to {}", path.display());
        }
        None => generate(shell, &mut cmd, bin, &mut io::stdout()),
    }
    Ok(())
}
