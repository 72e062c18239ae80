use crate::config::{GridConfig, HeaderInfo};
use crate::entry::{Entry, EntryDraft, EntryId};

/// The in-memory timetable: header labels plus entries in insertion order.
///
/// Renders take a snapshot through [`Schedule::entries`]; nothing here caches layout state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub header: HeaderInfo,
    entries: Vec<Entry>,
}

impl Schedule {
    pub fn new(header: HeaderInfo) -> Self {
        Self {
            header,
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a new entry with a fresh id.
    ///
    /// Incomplete drafts (empty name, day or time, or zero duration) are ignored and leave the
    /// list unchanged.
    pub fn add_entry(&mut self, draft: EntryDraft) -> Option<EntryId> {
        if !draft.is_complete() {
            return None;
        }
        let id = EntryId::new();
        self.entries.push(draft.into_entry(id.clone()));
        Some(id)
    }

    /// Removes the entry with the given id, if any.
    pub fn remove_entry(&mut self, id: &EntryId) -> Option<Entry> {
        let idx = self.entries.iter().position(|e| &e.id == id)?;
        Some(self.entries.remove(idx))
    }

    pub fn get(&self, id: &EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| &e.id == id)
    }

    /// Entries whose day or time does not resolve against `grid`; layout skips these.
    pub fn unplaced_entries<'a>(&'a self, grid: &'a GridConfig) -> impl Iterator<Item = &'a Entry> {
        self.entries
            .iter()
            .filter(|e| grid.day_index(&e.day).is_none() || grid.time_index(&e.time).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incomplete_drafts_are_rejected() {
        let mut schedule = Schedule::default();
        assert_eq!(schedule.add_entry(EntryDraft::new("", "Monday", "10:00")), None);
        assert_eq!(schedule.add_entry(EntryDraft::new("OS", "", "10:00")), None);
        assert_eq!(schedule.add_entry(EntryDraft::new("OS", "Monday", "")), None);
        assert_eq!(
            schedule.add_entry(EntryDraft::new("OS", "Monday", "10:00").duration(0)),
            None
        );
        assert!(schedule.is_empty());
    }

    #[test]
    fn entries_keep_insertion_order() {
        let mut schedule = Schedule::default();
        schedule.add_entry(EntryDraft::new("B", "Friday", "10:00"));
        schedule.add_entry(EntryDraft::new("A", "Monday", "10:00"));
        let names = schedule
            .entries()
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["B", "A"]);
    }

    #[test]
    fn add_then_remove_restores_the_list() {
        let mut schedule = Schedule::default();
        schedule.add_entry(EntryDraft::new("Compilers", "Monday", "10:00"));
        let before = schedule.clone();

        let id = schedule
            .add_entry(EntryDraft::new("Algorithms", "Tuesday", "11:00").duration(2))
            .expect("complete draft");
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.get(&id).map(|e| e.duration_slots), Some(2));

        let removed = schedule.remove_entry(&id).expect("entry present");
        assert_eq!(removed.name, "Algorithms");
        assert_eq!(schedule, before);
    }

    #[test]
    fn removing_an_unknown_id_is_a_no_op() {
        let mut schedule = Schedule::default();
        schedule.add_entry(EntryDraft::new("Compilers", "Monday", "10:00"));
        let before = schedule.clone();
        assert!(schedule.remove_entry(&EntryId::from("missing")).is_none());
        assert_eq!(schedule, before);
    }

    #[test]
    fn unplaced_entries_reports_unknown_labels() {
        let mut schedule = Schedule::default();
        schedule.add_entry(EntryDraft::new("Ok", "Monday", "10:00"));
        schedule.add_entry(EntryDraft::new("Weekend", "Sunday", "10:00"));
        schedule.add_entry(EntryDraft::new("Late", "Monday", "21:00"));

        let grid = GridConfig::default();
        let names = schedule
            .unplaced_entries(&grid)
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(names, ["Weekend", "Late"]);
    }
}
