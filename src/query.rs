// src/query.rs
use crate::process::NormalizedRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The flattened sheet, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet {
    records: Vec<NormalizedRecord>,
}

/// What a viewer has picked. Both fields are exact-match filters; `None` means "any".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub region: Option<String>,
    pub identifier: Option<String>,
}

impl RecordSet {
    pub fn new(records: Vec<NormalizedRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NormalizedRecord> {
        self.records.iter()
    }

    /// Append another set, keeping both orders.
    pub fn extend(&mut self, other: RecordSet) {
        self.records.extend(other.records);
    }

    /// Distinct regions, sorted.
    pub fn regions(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.region.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct non-empty identifiers, sorted, optionally limited to one region.
    pub fn identifiers(&self, region: Option<&str>) -> Vec<&str> {
        self.records
            .iter()
            .filter(|r| region.map_or(true, |reg| r.region == reg))
            .map(|r| r.identifier.as_str())
            .filter(|id| !id.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Records whose region equals `region` exactly.
    pub fn by_region(&self, region: &str) -> RecordSet {
        self.filtered(|r| r.region == region)
    }

    /// Records whose identifier equals `identifier` exactly, across every region.
    pub fn by_identifier(&self, identifier: &str) -> RecordSet {
        self.filtered(|r| r.identifier == identifier)
    }

    /// Resolve a viewer selection. An identifier wins over a region: picking a
    /// plate shows every region it appears in.
    pub fn select(&self, selection: &Selection) -> RecordSet {
        match (&selection.identifier, &selection.region) {
            (Some(id), _) => self.by_identifier(id),
            (None, Some(region)) => self.by_region(region),
            (None, None) => self.clone(),
        }
    }

    fn filtered<F>(&self, keep: F) -> RecordSet
    where
        F: Fn(&NormalizedRecord) -> bool,
    {
        RecordSet::new(self.records.iter().filter(|&r| keep(r)).cloned().collect())
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a NormalizedRecord;
    type IntoIter = std::slice::Iter<'a, NormalizedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(id: &str, region: &str, m: &str) -> NormalizedRecord {
        NormalizedRecord {
            identifier: id.into(),
            region: region.into(),
            measurement: m.into(),
        }
    }

    fn sample() -> RecordSet {
        RecordSet::new(vec![
            rec("KBA 123A", "Nairobi", "5"),
            rec("KBB 456B", "Nairobi", "7"),
            rec("", "Mombasa", "3"),
            rec("KBA 123A", "Mombasa", "5"),
            rec("KCC 789C", "Kisumu", ""),
        ])
    }

    #[test]
    fn regions_sorted_distinct() {
        assert_eq!(sample().regions(), vec!["Kisumu", "Mombasa", "Nairobi"]);
    }

    #[test]
    fn identifiers_skip_blanks() {
        let set = sample();
        assert_eq!(set.identifiers(None), vec!["KBA 123A", "KBB 456B", "KCC 789C"]);
        assert_eq!(set.identifiers(Some("Mombasa")), vec!["KBA 123A"]);
        assert!(set.identifiers(Some("Nowhere")).is_empty());
    }

    #[test]
    fn identifier_selection_ignores_region() {
        let set = sample();
        let got = set.select(&Selection {
            region: Some("Nairobi".into()),
            identifier: Some("KBA 123A".into()),
        });
        let regions: Vec<_> = got.iter().map(|r| r.region.as_str()).collect();
        assert_eq!(regions, vec!["Nairobi", "Mombasa"]);
    }

    #[test]
    fn region_selection_is_exact() {
        let set = sample();
        assert_eq!(set.select(&Selection { region: Some("Nairobi".into()), identifier: None }).len(), 2);
        assert!(set.by_region("nairobi").is_empty());
        assert_eq!(set.select(&Selection::default()), set);
    }
}
