use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::period::parse_period;
use chrono::Local;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period } = cmd {
        // Default: the current month.
        let period = period
            .clone()
            .unwrap_or_else(|| Local::now().format("%Y-%m").to_string());
        let bounds = parse_period(Some(&period))?;

        let pool = DbPool::open(&cfg.database)?;
        ListLogic::print(&pool, bounds, &cfg.separator_char)?;
    }
    Ok(())
}
