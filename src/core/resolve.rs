//! Turns (mapper, project, activity, skill) names into remote identifiers.
//!
//! Configured mapping rules win; anything else is looked up by name in the
//! remote lookup snapshot, fetched at most once per resolver. Results are
//! cached per normalized NameTuple.

use crate::config::MappingRule;
use crate::errors::{AppError, AppResult, EntryRef, ResolveFailure};
use crate::models::line_item::{LookupRecord, LookupSnapshot};
use crate::models::name_tuple::{NameTuple, ResolvedIds, normalize_name};
use crate::models::worklog::WorklogEntry;
use crate::remote::WorklogApi;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct IdentifierResolver {
    rules: HashMap<NameTuple, ResolvedIds>,
    snapshot: Option<LookupSnapshot>,
    cache: HashMap<NameTuple, ResolvedIds>,
    snapshot_fetches: usize,
}

impl IdentifierResolver {
    pub fn new(rules: &[MappingRule]) -> Self {
        let rules = rules
            .iter()
            .map(|r| {
                let tuple = NameTuple::new(
                    r.mapper.as_deref().unwrap_or(""),
                    &r.project,
                    &r.activity,
                    &r.skill,
                );
                let ids = ResolvedIds {
                    project_id: r.project_id,
                    activity_id: r.activity_id,
                    skill_id: r.skill_id,
                };
                (tuple, ids)
            })
            .collect();

        Self {
            rules,
            ..Self::default()
        }
    }

    /// Pre-load a snapshot (skips the remote fetch).
    pub fn with_snapshot(mut self, snapshot: LookupSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// How many times the remote lookup snapshot was fetched.
    pub fn snapshot_fetches(&self) -> usize {
        self.snapshot_fetches
    }

    /// Exact rule for this mapper, then a mapper-less rule.
    fn rule_for(&self, tuple: &NameTuple) -> Option<ResolvedIds> {
        if let Some(ids) = self.rules.get(tuple) {
            return Some(*ids);
        }
        let any_mapper = NameTuple {
            mapper: String::new(),
            ..tuple.clone()
        };
        self.rules.get(&any_mapper).copied()
    }

    pub fn resolve<A: WorklogApi + ?Sized>(
        &mut self,
        tuple: &NameTuple,
        api: &A,
    ) -> AppResult<ResolvedIds> {
        if let Some(ids) = self.cache.get(tuple) {
            return Ok(*ids);
        }

        let ids = match self.rule_for(tuple) {
            Some(ids) => ids,
            None => {
                if self.snapshot.is_none() {
                    self.snapshot = Some(api.fetch_lookups()?);
                    self.snapshot_fetches += 1;
                }
                let snapshot = self.snapshot.as_ref().ok_or_else(|| {
                    AppError::Other("lookup snapshot unavailable".into())
                })?;
                resolve_from_snapshot(tuple, snapshot)?
            }
        };

        self.cache.insert(tuple.clone(), ids);
        Ok(ids)
    }

    /// Resolve the tuples of every entry, each distinct tuple once.
    ///
    /// A failure names the first entry carrying the offending tuple.
    pub fn resolve_all<A: WorklogApi + ?Sized>(
        &mut self,
        entries: &[WorklogEntry],
        api: &A,
    ) -> AppResult<HashMap<NameTuple, ResolvedIds>> {
        let mut out = HashMap::new();
        for entry in entries {
            let tuple = entry.name_tuple();
            if out.contains_key(&tuple) {
                continue;
            }
            let ids = self.resolve(&tuple, api).map_err(|err| match err {
                AppError::Resolution { tuple, reason, .. } => AppError::Resolution {
                    entry: EntryRef(entry.id),
                    tuple,
                    reason,
                },
                other => other,
            })?;
            out.insert(tuple, ids);
        }
        Ok(out)
    }
}

fn resolve_from_snapshot(tuple: &NameTuple, snapshot: &LookupSnapshot) -> AppResult<ResolvedIds> {
    let fail = |reason| AppError::Resolution {
        entry: EntryRef(None),
        tuple: tuple.to_string(),
        reason,
    };

    let project_id = find_unique("project", &snapshot.projects, &tuple.project).map_err(fail)?;
    let activity_id =
        find_unique("activity", &snapshot.activities, &tuple.activity).map_err(fail)?;
    let skill_id = find_unique("skill", &snapshot.skills, &tuple.skill).map_err(fail)?;

    Ok(ResolvedIds {
        project_id,
        activity_id,
        skill_id,
    })
}

/// The single usable record named `name` (already normalized).
fn find_unique(
    kind: &'static str,
    records: &[LookupRecord],
    name: &str,
) -> Result<i64, ResolveFailure> {
    let matches: Vec<&LookupRecord> = records
        .iter()
        .filter(|r| normalize_name(&r.name) == name)
        .collect();

    let active: Vec<&&LookupRecord> = matches.iter().filter(|r| !r.archived && !r.locked).collect();

    match (active.as_slice(), matches.first()) {
        ([only], _) => Ok(only.id),
        ([_, _, ..], _) => Err(ResolveFailure::Ambiguous {
            kind,
            name: name.to_string(),
            count: active.len(),
        }),
        ([], None) => Err(ResolveFailure::Unmatched {
            kind,
            name: name.to_string(),
        }),
        ([], Some(_)) if matches.iter().any(|r| r.locked) => Err(ResolveFailure::Locked {
            kind,
            name: name.to_string(),
        }),
        ([], Some(_)) => Err(ResolveFailure::Archived {
            kind,
            name: name.to_string(),
        }),
    }
}
