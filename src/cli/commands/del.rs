use crate::cli::parser::Commands;
use crate::cli::prompt::ask_confirmation;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, force } = cmd {
        if !*force
            && !ask_confirmation(&format!(
                "Delete worklog #{}? This action is irreversible.",
                id
            ))
        {
            info("Operation cancelled.");
            return Ok(());
        }

        let mut pool = DbPool::open(&cfg.database)?;
        let removed = DeleteLogic::apply(&mut pool, *id)?;

        success(format!(
            "Worklog #{} ({} → {}, {}) has been deleted.",
            id,
            removed.start_str(),
            removed.end_str(),
            removed.project
        ));
    }

    Ok(())
}
