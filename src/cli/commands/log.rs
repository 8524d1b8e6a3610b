use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Log { print: true } => {
            let pool = DbPool::open(&cfg.database)?;
            LogLogic::print_log(&pool)?;
        }
        Commands::Log { print: false } => info("Nothing to do: use --print."),
        _ => {}
    }

    Ok(())
}
