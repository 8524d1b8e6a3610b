use crate::cli::parser::Commands;
use crate::cli::prompt::ask_confirmation;
use crate::config::Config;
use crate::core::backup::BackupLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use std::path::Path;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Backup {
        file,
        compress,
        force,
    } = cmd
    {
        let mut overwrite = *force;
        if !overwrite && Path::new(file).exists() {
            if !ask_confirmation(&format!("The file '{}' already exists. Overwrite it?", file)) {
                info("Backup cancelled by user.");
                return Ok(());
            }
            overwrite = true;
        }

        let pool = DbPool::open(&cfg.database)?;
        BackupLogic::backup(&pool, cfg, file, *compress, overwrite)?;
    }

    Ok(())
}
