use crate::cli::parser::Commands;
use crate::cli::prompt::TerminalPrompter;
use crate::config::Config;
use crate::core::submit::{SubmitLogic, SubmitOptions, SubmitSummary};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::remote::http::HttpWorklogApi;
use crate::utils::period::parse_period;
use crate::utils::table::{Column, Table};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Submit {
        period,
        dry_run,
        json,
    } = cmd
    {
        let bounds = parse_period(period.as_deref())?;

        let api = HttpWorklogApi::from_config(&cfg.remote)?;
        let pool = DbPool::open(&cfg.database)?;
        let mut prompter = TerminalPrompter::stdio();

        let options = SubmitOptions {
            dry_run: *dry_run,
            cancel: None,
        };

        let summary = SubmitLogic::run(&pool, cfg, &api, &mut prompter, bounds, options)?;

        if *json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            print!("{}", render_summary(&summary, &cfg.separator_char));
        }
    }
    Ok(())
}

fn render_summary(s: &SubmitSummary, separator_char: &str) -> String {
    let locked = if s.locked_days.is_empty() {
        "-".to_string()
    } else {
        s.locked_days
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut table = Table::new(vec![Column::new("Summary", 24), Column::new("Value", 5)]);
    let mut row = |k: &str, v: String| table.add_row(vec![k.to_string(), v]);

    row("Mode", if s.dry_run { "dry run" } else { "submit" }.to_string());
    row("Days processed", s.days_processed.to_string());
    row("Locked days", locked);
    row("Local entries prepared", s.local_entries_prepared.to_string());
    row("Duplicates skipped", s.duplicates_skipped.to_string());
    row("Overlaps seen", s.overlaps_seen.to_string());
    row("Overlaps written", s.overlaps_written.to_string());
    row("Overlaps skipped", s.overlaps_skipped.to_string());
    if !s.dry_run {
        row("Entries submitted", s.entries_submitted.to_string());
        row("Persist calls", s.persist_calls.to_string());
        row("Persist responses", s.persist_responses.to_string());
    }

    format!("\n{}", table.render(separator_char))
}
