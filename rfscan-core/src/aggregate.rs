//! Tag aggregation
//!
//! Flattens every record across a scan attempt's batches, drops weak
//! observations, and dedups by TID with a repeat counter.

use rfscan_types::{AggregatedTag, TagBatch};

use crate::constants::RSSI_THRESHOLD;

/// Deduplicate tag observations across batches
///
/// Records with `rssi < 60` are treated as noise and dropped before
/// grouping, so they neither create a tag nor bump its count. Result order
/// is first-seen order.
///
/// Compatibility quirk, preserved deliberately: the reported `rssi` is the
/// value of the first admitted observation for that TID; later repeats only
/// increment `count`.
pub fn aggregate(batches: &[TagBatch]) -> Vec<AggregatedTag> {
    let mut tags: Vec<AggregatedTag> = Vec::new();

    for batch in batches {
        for record in &batch.records {
            if record.rssi < RSSI_THRESHOLD {
                continue;
            }

            match tags.iter_mut().find(|t| t.tid == record.tid) {
                Some(tag) => tag.count += 1,
                None => tags.push(AggregatedTag {
                    tid: record.tid.clone(),
                    rssi: record.rssi,
                    count: 1,
                }),
            }
        }
    }

    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;
    use rfscan_types::TagRecord;

    fn batch(records: Vec<TagRecord>) -> TagBatch {
        TagBatch::with_records(Bytes::new(), records)
    }

    #[test]
    fn test_threshold_drops_weak_records_entirely() {
        let batches = vec![batch(vec![
            TagRecord::new("A".into(), 70),
            TagRecord::new("A".into(), 40),
            TagRecord::new("B".into(), 65),
        ])];

        let tags = aggregate(&batches);

        // The rssi=40 observation is dropped, not counted
        assert_eq!(
            tags,
            vec![
                AggregatedTag {
                    tid: "A".into(),
                    rssi: 70,
                    count: 1
                },
                AggregatedTag {
                    tid: "B".into(),
                    rssi: 65,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_repeats_counted_across_batches() {
        let batches = vec![
            batch(vec![TagRecord::new("A".into(), 70)]),
            batch(vec![
                TagRecord::new("A".into(), 80),
                TagRecord::new("A".into(), 75),
            ]),
        ];

        let tags = aggregate(&batches);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].count, 3);
    }

    #[test]
    fn test_first_rssi_kept_on_repeat() {
        // Documented quirk: the first admitted rssi survives, later (even
        // stronger) observations do not replace it.
        let batches = vec![batch(vec![
            TagRecord::new("A".into(), 61),
            TagRecord::new("A".into(), 99),
        ])];

        let tags = aggregate(&batches);
        assert_eq!(tags[0].rssi, 61);
        assert_eq!(tags[0].count, 2);
    }

    #[test]
    fn test_threshold_boundary() {
        let batches = vec![batch(vec![
            TagRecord::new("A".into(), 60),
            TagRecord::new("B".into(), 59),
        ])];

        let tags = aggregate(&batches);
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].tid, "A");
    }

    #[test]
    fn test_empty_and_terminal_batches() {
        let batches = vec![batch(vec![]), TagBatch::terminal(Bytes::new())];
        assert!(aggregate(&batches).is_empty());
    }

    #[test]
    fn test_first_seen_order() {
        let batches = vec![batch(vec![
            TagRecord::new("C".into(), 70),
            TagRecord::new("A".into(), 70),
            TagRecord::new("B".into(), 70),
            TagRecord::new("A".into(), 70),
        ])];

        let tags = aggregate(&batches);
        let order: Vec<&str> = tags.iter().map(|t| t.tid.as_str()).collect();
        assert_eq!(order, vec!["C", "A", "B"]);
    }
}
