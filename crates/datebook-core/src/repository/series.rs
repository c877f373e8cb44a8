use crate::error::CoreError;
use crate::models::{EditOutcome, EditRequest, EditScope, Event, PropertyChange};
use crate::repository::{EventRepository, EventStore};
use tracing::{debug, warn};
use uuid::Uuid;

/// Applies an edit to a target event and, depending on the scope, to the
/// rest of its series.
///
/// Structural failures (missing target, unusable value) abort before any
/// event is touched. In the batch scopes an occurrence whose edited form
/// would collide with an existing event is left alone and counted as
/// skipped; a single-occurrence edit reports the collision as an error.
pub struct EditPropagator<'a> {
    store: &'a mut EventStore,
}

impl<'a> EditPropagator<'a> {
    pub fn new(store: &'a mut EventStore) -> Self {
        Self { store }
    }

    pub fn apply(&mut self, request: &EditRequest) -> Result<EditOutcome, CoreError> {
        let target = self.locate(request)?.clone();

        match (request.scope, target.series_id()) {
            (EditScope::ThisOccurrence, _) | (_, None) => {
                self.apply_single(&target, &request.change)
            }
            (EditScope::ThisAndFuture, Some(series_id)) => {
                let members = self.members(series_id, |e| e.start() >= target.start());
                self.apply_batch(members, &request.change)
            }
            (EditScope::EntireSeries, Some(series_id)) => {
                let members = self.members(series_id, |_| true);
                self.apply_batch(members, &request.change)
            }
        }
    }

    fn locate(&self, request: &EditRequest) -> Result<&Event, CoreError> {
        match request.end {
            Some(end) => self.store.find_exact(&request.subject, request.start, end),
            None => self.store.find(&request.subject, request.start),
        }
    }

    // Snapshot taken before any mutation, so each occurrence is edited once.
    fn members(&self, series_id: Uuid, include: impl Fn(&Event) -> bool) -> Vec<Event> {
        self.store
            .events_in_series(series_id)
            .into_iter()
            .filter(|e| include(e))
            .cloned()
            .collect()
    }

    fn apply_single(
        &mut self,
        target: &Event,
        change: &PropertyChange,
    ) -> Result<EditOutcome, CoreError> {
        let modified = target.with_change(change)?;
        let new_key = modified.key();
        if new_key != target.key() && self.store.contains_key(&new_key) {
            return Err(CoreError::DuplicateEvent(new_key.to_string()));
        }

        debug!(from = %target.key(), to = %new_key, "Edited single event");
        self.store.replace(&target.key(), modified);
        Ok(EditOutcome {
            modified: 1,
            skipped: 0,
        })
    }

    fn apply_batch(
        &mut self,
        members: Vec<Event>,
        change: &PropertyChange,
    ) -> Result<EditOutcome, CoreError> {
        let edits = members
            .iter()
            .map(|old| old.with_change(change).map(|new| (old.key(), new)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut outcome = EditOutcome::default();
        for (old_key, modified) in edits {
            let new_key = modified.key();
            if new_key != old_key && self.store.contains_key(&new_key) {
                warn!(occurrence = %old_key, conflict = %new_key, "Skipping edit that collides with an existing event");
                outcome.skipped += 1;
                continue;
            }
            self.store.replace(&old_key, modified);
            outcome.modified += 1;
        }

        debug!(
            property = %change.property(),
            modified = outcome.modified,
            skipped = outcome.skipped,
            "Edited series occurrences"
        );
        Ok(outcome)
    }
}
