//! Cross-source deduplication
//!
//! Identity is the exact resolved link. Tracking-parameter variants of one
//! posting are distinct keys.

use std::collections::HashMap;

use crate::normalize::JobRecord;

/// Collapse records sharing a link; the later record wins.
///
/// A replaced record keeps the slot of the first occurrence, so the output
/// order is deterministic for a given input order.
pub fn dedupe(records: Vec<JobRecord>) -> Vec<JobRecord> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(records.len());
    let mut unique: Vec<JobRecord> = Vec::with_capacity(records.len());

    for record in records {
        match slots.get(&record.link) {
            Some(&slot) => unique[slot] = record,
            None => {
                slots.insert(record.link.clone(), unique.len());
                unique.push(record);
            }
        }
    }

    unique
}
