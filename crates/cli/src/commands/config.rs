use eyre::{Result, WrapErr};
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub async fn handle_config_command(cmd: ConfigCommands, path: &Path) -> Result<()> {
    match cmd {
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_from(path).await?;
            config
                .set_value(&key, &value)
                .wrap_err_with(|| format!("Cannot set {} to '{}'", key, value))?;
            config
                .save_to(path)
                .await
                .wrap_err_with(|| format!("Cannot write {}", path.display()))?;
            println!("✅ {} = {}", key, value);
        }
        ConfigCommands::Get { key } => {
            let value = Config::load_from(path)
                .await?
                .get_value(&key)
                .wrap_err_with(|| format!("Cannot read {}", key))?;
            println!("{}", value);
        }
        ConfigCommands::Show => {
            let config = Config::load_from(path).await?;
            println!("{}\n\nFile: {}", config.show_all(), path.display());
        }
        ConfigCommands::Reset { force } => {
            if !force && !confirm_reset(io::stdin().lock(), io::stdout())? {
                println!("Configuration left unchanged");
                return Ok(());
            }
            Config::reset_at(path).await?;
            println!("✅ Configuration reset to defaults");
        }
    }

    Ok(())
}

fn confirm_reset(mut input: impl BufRead, mut output: impl Write) -> Result<bool> {
    write!(output, "Reset every setting to its default? (y/N): ")?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
