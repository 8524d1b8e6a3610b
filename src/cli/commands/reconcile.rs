use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::reconcile::ReconcileLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::period::parse_period;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reconcile { period, dry_run } = cmd {
        let bounds = parse_period(period.as_deref())?;

        let mut pool = DbPool::open(&cfg.database)?;
        ReconcileLogic::apply(
            &mut pool,
            &cfg.reconcile,
            bounds,
            *dry_run,
            &cfg.separator_char,
        )?;
    }
    Ok(())
}
