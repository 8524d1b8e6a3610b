use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let pool = DbPool::open(&cfg.database)?;
        let rows = ExportLogic::export(&pool, *format, file, range.as_deref(), *force)?;
        if rows > 0 {
            info(format!("{} rows written as {}", rows, format.as_str()));
        }
    }
    Ok(())
}
