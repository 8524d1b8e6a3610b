//! Submission orchestrator.
//!
//! One run walks `ResolveIdentifiers → BuildBatches → per day
//! {FetchRemote → LockCheck → Classify → ResolveOverlaps → Persist}`,
//! strictly one day at a time in chronological order. The overlap policy
//! chosen on one day (write all / skip all) applies to every later day of
//! the same run, so days are never processed concurrently.

use crate::config::Config;
use crate::core::batch::{build_day_batches, validate_entry};
use crate::core::classify::classify;
use crate::core::resolve::IdentifierResolver;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::queries::{load_all_worklogs, load_worklogs_between};
use crate::errors::{AppError, AppResult};
use crate::models::day_batch::{DayBatch, OverlapPair};
use crate::models::line_item::RemoteLineItem;
use crate::models::worklog::WorklogEntry;
use crate::remote::WorklogApi;
use crate::ui::messages::{header, info, overlap_line, success, warning};
use crate::utils::period::DayBounds;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Operator answer for a day with pending overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapChoice {
    WriteThis,
    SkipThis,
    WriteAllRemaining,
    SkipAllRemaining,
    Abort,
}

impl OverlapChoice {
    /// `w`, `s`, `W`, `S`, `a`; anything else is rejected.
    pub fn from_key(input: &str) -> Option<Self> {
        match input.trim() {
            "w" => Some(Self::WriteThis),
            "s" => Some(Self::SkipThis),
            "W" => Some(Self::WriteAllRemaining),
            "S" => Some(Self::SkipAllRemaining),
            "a" => Some(Self::Abort),
            _ => None,
        }
    }

    pub fn key(&self) -> char {
        match self {
            Self::WriteThis => 'w',
            Self::SkipThis => 's',
            Self::WriteAllRemaining => 'W',
            Self::SkipAllRemaining => 'S',
            Self::Abort => 'a',
        }
    }
}

/// Presentation side of overlap resolution: shows a day's overlaps and
/// returns exactly one choice.
pub trait OverlapPrompter {
    fn choose(&mut self, day_label: &str, overlaps: &[OverlapPair]) -> AppResult<OverlapChoice>;
}

/// Answers every prompt with the same choice. For callers without a
/// terminal (scripts, APIs).
pub struct FixedChoice(pub OverlapChoice);

impl OverlapPrompter for FixedChoice {
    fn choose(&mut self, _day_label: &str, _overlaps: &[OverlapPair]) -> AppResult<OverlapChoice> {
        Ok(self.0)
    }
}

/// What happens to one day's overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapResolution {
    Write,
    Skip,
}

/// Run-level figures, rendered as-is by the CLI (table or JSON).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmitSummary {
    pub dry_run: bool,
    pub days_processed: usize,
    pub locked_days: Vec<NaiveDate>,
    pub local_entries_prepared: usize,
    pub duplicates_skipped: usize,
    pub overlaps_seen: usize,
    pub overlaps_written: usize,
    pub overlaps_skipped: usize,
    pub entries_submitted: usize,
    pub persisted_days: Vec<NaiveDate>,
    pub persist_calls: usize,
    pub persist_responses: usize,
}

/// Mutable state owned by one run.
#[derive(Debug, Default)]
pub struct RunContext {
    pub skip_all: bool,
    pub write_all: bool,
    pub summary: SubmitSummary,
}

#[derive(Debug, Clone, Default)]
pub struct SubmitOptions {
    pub dry_run: bool,
    /// Checked before each day and again right before its persist; once
    /// set nothing more is written.
    pub cancel: Option<Arc<AtomicBool>>,
}

impl SubmitOptions {
    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::SeqCst))
    }
}

/// Decide the fate of `overlaps` for `day`.
///
/// A standing write-all / skip-all decision wins. Otherwise a dry run warns
/// and drops them without prompting, and an interactive run asks
/// `prompter`; `Abort` becomes [`AppError::UserAbort`].
pub fn resolve_overlaps<P: OverlapPrompter + ?Sized>(
    ctx: &mut RunContext,
    dry_run: bool,
    day: NaiveDate,
    day_label: &str,
    overlaps: &[OverlapPair],
    prompter: &mut P,
) -> AppResult<OverlapResolution> {
    if overlaps.is_empty() {
        return Ok(OverlapResolution::Skip);
    }
    if ctx.write_all {
        return Ok(OverlapResolution::Write);
    }
    if ctx.skip_all {
        return Ok(OverlapResolution::Skip);
    }

    if dry_run {
        for pair in overlaps {
            warning(format!("{day_label}: overlap dropped: {}", overlap_line(pair)));
        }
        return Ok(OverlapResolution::Skip);
    }

    match prompter.choose(day_label, overlaps)? {
        OverlapChoice::WriteThis => Ok(OverlapResolution::Write),
        OverlapChoice::SkipThis => Ok(OverlapResolution::Skip),
        OverlapChoice::WriteAllRemaining => {
            ctx.write_all = true;
            Ok(OverlapResolution::Write)
        }
        OverlapChoice::SkipAllRemaining => {
            ctx.skip_all = true;
            Ok(OverlapResolution::Skip)
        }
        OverlapChoice::Abort => Err(AppError::UserAbort(day)),
    }
}

pub struct SubmissionOrchestrator<'a, A: WorklogApi + ?Sized, P: OverlapPrompter + ?Sized> {
    api: &'a A,
    resolver: &'a mut IdentifierResolver,
    prompter: &'a mut P,
    options: SubmitOptions,
    ctx: RunContext,
}

impl<'a, A: WorklogApi + ?Sized, P: OverlapPrompter + ?Sized> SubmissionOrchestrator<'a, A, P> {
    pub fn new(
        api: &'a A,
        resolver: &'a mut IdentifierResolver,
        prompter: &'a mut P,
        options: SubmitOptions,
    ) -> Self {
        let ctx = RunContext {
            summary: SubmitSummary {
                dry_run: options.dry_run,
                ..SubmitSummary::default()
            },
            ..RunContext::default()
        };
        Self {
            api,
            resolver,
            prompter,
            options,
            ctx,
        }
    }

    /// Figures so far. Still meaningful after `run` failed: days persisted
    /// before the failure stay persisted and are listed here.
    pub fn summary(&self) -> &SubmitSummary {
        &self.ctx.summary
    }

    pub fn into_summary(self) -> SubmitSummary {
        self.ctx.summary
    }

    pub fn run(&mut self, entries: &[WorklogEntry]) -> AppResult<()> {
        // Nothing reaches the network while any entry is invalid.
        for entry in entries {
            validate_entry(entry)?;
        }
        self.ctx.summary.local_entries_prepared = entries.len();

        let resolved = self.resolver.resolve_all(entries, self.api)?;
        let batches = build_day_batches(entries, &resolved)?;

        for batch in &batches {
            if self.options.is_cancelled() {
                return Err(AppError::Cancelled(batch.day));
            }
            self.process_day(batch)?;
        }

        Ok(())
    }

    fn process_day(&mut self, batch: &DayBatch) -> AppResult<()> {
        let label = batch.label();
        header(&label);

        let existing = self.api.fetch_day(batch.day)?;
        self.ctx.summary.days_processed += 1;

        let locked = existing.iter().filter(|item| item.locked).count();
        if locked > 0 {
            warning(format!(
                "{label}: {locked} locked remote item(s), day skipped ({} local entries not sent)",
                batch.items.len()
            ));
            self.ctx.summary.locked_days.push(batch.day);
            return Ok(());
        }

        let classification = classify(&batch.items, &existing);
        self.ctx.summary.duplicates_skipped += classification.duplicates;
        self.ctx.summary.overlaps_seen += classification.overlaps.len();

        if classification.duplicates > 0 {
            info(format!(
                "{label}: {} duplicate(s) already on the remote day",
                classification.duplicates
            ));
        }

        let mut accepted: Vec<RemoteLineItem> = classification.to_add;

        let resolution = resolve_overlaps(
            &mut self.ctx,
            self.options.dry_run,
            batch.day,
            &label,
            &classification.overlaps,
            &mut *self.prompter,
        )?;

        if !classification.overlaps.is_empty() {
            match resolution {
                OverlapResolution::Write => {
                    self.ctx.summary.overlaps_written += classification.overlaps.len();
                    accepted.extend(classification.overlaps.iter().map(|p| p.local.clone()));
                }
                OverlapResolution::Skip => {
                    self.ctx.summary.overlaps_skipped += classification.overlaps.len();
                }
            }
        }

        if accepted.is_empty() {
            info(format!("{label}: nothing to submit"));
            return Ok(());
        }

        if self.options.dry_run {
            info(format!("{label}: {} entr(y/ies) would be submitted", accepted.len()));
            return Ok(());
        }

        // Cancelled while this day was being resolved: do not write it.
        if self.options.is_cancelled() {
            return Err(AppError::Cancelled(batch.day));
        }

        // The remote day is replaced wholesale: resend what is there.
        let mut payload = existing;
        payload.extend(accepted.iter().cloned());

        let acks = self.api.persist_day(batch.day, &payload)?;

        self.ctx.summary.persist_calls += 1;
        self.ctx.summary.persist_responses += acks.len();
        self.ctx.summary.entries_submitted += accepted.len();
        self.ctx.summary.persisted_days.push(batch.day);

        success(format!(
            "{label}: submitted {} entr(y/ies), {} item(s) acknowledged",
            accepted.len(),
            acks.len()
        ));

        Ok(())
    }
}

/// The `submit` command: load the selected worklogs and push them day by day.
pub struct SubmitLogic;

impl SubmitLogic {
    pub fn run<A: WorklogApi + ?Sized, P: OverlapPrompter + ?Sized>(
        pool: &DbPool,
        cfg: &Config,
        api: &A,
        prompter: &mut P,
        bounds: DayBounds,
        options: SubmitOptions,
    ) -> AppResult<SubmitSummary> {
        let entries = match bounds {
            None => load_all_worklogs(pool)?,
            Some((from, to)) => load_worklogs_between(pool, from, to)?,
        };

        if entries.is_empty() {
            info("No worklogs for the selected period.");
            return Ok(SubmitSummary {
                dry_run: options.dry_run,
                ..SubmitSummary::default()
            });
        }

        let mut resolver = IdentifierResolver::new(&cfg.mapping_rules);
        let mut orchestrator = SubmissionOrchestrator::new(api, &mut resolver, prompter, options);

        let result = orchestrator.run(&entries);
        let summary = orchestrator.into_summary();

        // Days already persisted stay persisted whatever happened next.
        for day in &summary.persisted_days {
            if let Err(e) = ttlog(
                &pool.conn,
                "submit",
                &day.to_string(),
                "Day persisted to remote",
            ) {
                warning(format!("Failed to write internal log: {e}"));
            }
        }

        result?;
        Ok(summary)
    }
}
