//! Partitioning of transaction logs by store.

use indexmap::IndexMap;

use super::types::TransactionLog;

/// Partition a flat sequence of logs into per-store sub-sequences.
///
/// Single left-to-right pass: the first log seen for a store fixes that
/// store's position in the map's iteration order, and each store's logs keep
/// the relative order they had in the input. No sorting happens here — when
/// a record type needs a sorted ordering it gets it from its source's
/// aggregation stage instead.
pub fn group_by_store(logs: Vec<TransactionLog>) -> IndexMap<String, Vec<TransactionLog>> {
    let mut by_store: IndexMap<String, Vec<TransactionLog>> = IndexMap::new();
    for log in logs {
        by_store
            .entry(log.site_info.id.clone())
            .or_default()
            .push(log);
    }
    by_store
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::SiteInfo;

    fn log(store: &str, id: &str) -> TransactionLog {
        TransactionLog {
            id: id.into(),
            site_info: SiteInfo {
                id: store.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn first_encounter_fixes_store_order() {
        let grouped = group_by_store(vec![
            log("0042", "a"),
            log("0007", "b"),
            log("0042", "c"),
            log("0100", "d"),
            log("0007", "e"),
        ]);
        let stores: Vec<_> = grouped.keys().cloned().collect();
        assert_eq!(stores, ["0042", "0007", "0100"]);
    }

    #[test]
    fn per_store_order_is_preserved() {
        let grouped = group_by_store(vec![
            log("0042", "a"),
            log("0007", "b"),
            log("0042", "c"),
        ]);
        let ids: Vec<_> = grouped["0042"].iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids, ["a", "c"]);
        assert_eq!(grouped["0007"].len(), 1);
    }

    #[test]
    fn empty_input_yields_empty_map() {
        assert!(group_by_store(Vec::new()).is_empty());
    }
}
