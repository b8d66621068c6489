//! Property-based tests for the rescaling engine

use fast_g3d::core::{G3dRecord, Haplotype, ScaleEngine, ScaleError, SpatialIndex};
use proptest::prelude::*;

const STEP: u64 = 20000;

fn rec(chrom: &str, start: u64, x: f64, haplotype: Haplotype) -> G3dRecord {
    G3dRecord {
        chrom: chrom.to_string(),
        start,
        end: start + STEP,
        x,
        y: x + 1.0,
        z: x + 2.0,
        haplotype,
    }
}

/// Build an index from consecutive runs separated by clear gaps
///
/// `runs` holds run lengths; each run is contiguous at STEP spacing and the
/// next run starts a whole number of folds further along, so grouping can
/// never be ambiguous.
fn index_from_runs(runs: &[usize], fold: u64) -> (SpatialIndex, Vec<Vec<u64>>) {
    let mut index = SpatialIndex::new(STEP);
    let mut starts_per_run = Vec::new();
    let mut cursor = 0u64;
    for &len in runs {
        let mut starts = Vec::new();
        for _ in 0..len {
            index.insert(rec("chr1", cursor, cursor as f64, Haplotype::Shared));
            starts.push(cursor);
            cursor += STEP;
        }
        starts_per_run.push(starts);
        cursor += STEP * fold; // gap: distance from last start >= STEP * (fold + 1)
    }
    (index, starts_per_run)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Output resolution is always input resolution times fold
    #[test]
    fn prop_resolution_multiplies(
        run_len in 1usize..40,
        fold in 1u64..=8,
    ) {
        let (index, _) = index_from_runs(&[run_len], fold);
        let scaled = ScaleEngine::new(fold).unwrap().scale(&index).unwrap();
        prop_assert_eq!(scaled.resolution(), STEP * fold);
    }

    /// Contiguous runs shrink to ceil(len / fold) summaries; tails are kept
    #[test]
    fn prop_group_count_is_ceil_division(
        run_len in 1usize..60,
        fold in 1u64..=8,
    ) {
        let (index, _) = index_from_runs(&[run_len], fold);
        let scaled = ScaleEngine::new(fold).unwrap().scale(&index).unwrap();
        let expected = (run_len + fold as usize - 1) / fold as usize;
        prop_assert_eq!(scaled.len(), expected);
    }

    /// No summary record ever spans a coverage gap
    #[test]
    fn prop_no_summary_spans_gap(
        runs in prop::collection::vec(1usize..10, 1..5),
        fold in 2u64..=4,
    ) {
        let (index, starts_per_run) = index_from_runs(&runs, fold);
        let scaled = ScaleEngine::new(fold).unwrap().scale(&index).unwrap();

        for record in scaled.query_all() {
            // every summary must lie entirely within one input run
            let contained = starts_per_run.iter().any(|starts| {
                let run_start = *starts.first().unwrap();
                let run_end = *starts.last().unwrap() + STEP;
                record.start >= run_start && record.end <= run_end
            });
            prop_assert!(
                contained,
                "summary [{}, {}) crosses a gap",
                record.start, record.end
            );
        }
    }

    /// Summaries preserve total coverage of the input
    #[test]
    fn prop_coverage_preserved(
        runs in prop::collection::vec(1usize..10, 1..5),
        fold in 1u64..=4,
    ) {
        let (index, _) = index_from_runs(&runs, fold);
        let scaled = ScaleEngine::new(fold).unwrap().scale(&index).unwrap();

        let input_coverage: u64 = index.query_all().iter().map(|r| r.length()).sum();
        let output_coverage: u64 = scaled.query_all().iter().map(|r| r.length()).sum();
        prop_assert_eq!(input_coverage, output_coverage);
    }

    /// fold = 1 reproduces every input record
    #[test]
    fn prop_fold_one_identity(run_len in 1usize..40) {
        let (index, _) = index_from_runs(&[run_len], 1);
        let scaled = ScaleEngine::new(1).unwrap().scale(&index).unwrap();

        let mut input: Vec<G3dRecord> = index.query_all().into_iter().cloned().collect();
        let mut output: Vec<G3dRecord> = scaled.query_all().into_iter().cloned().collect();
        input.sort_by_key(|r| r.start);
        output.sort_by_key(|r| r.start);
        prop_assert_eq!(input, output);
    }

    /// Summary coordinates are the unweighted means of their group
    #[test]
    fn prop_summary_means(
        run_len in 1usize..30,
        fold in 1u64..=4,
    ) {
        let (index, starts_per_run) = index_from_runs(&[run_len], fold);
        let scaled = ScaleEngine::new(fold).unwrap().scale(&index).unwrap();

        let starts = &starts_per_run[0];
        let mut summaries: Vec<G3dRecord> = scaled.query_all().into_iter().cloned().collect();
        summaries.sort_by_key(|r| r.start);

        for summary in &summaries {
            let members: Vec<f64> = starts
                .iter()
                .filter(|&&s| s >= summary.start && s + STEP <= summary.end)
                .map(|&s| s as f64)
                .collect();
            let mean = members.iter().sum::<f64>() / members.len() as f64;
            prop_assert!((summary.x - mean).abs() < 1e-9);
            prop_assert!((summary.y - (mean + 1.0)).abs() < 1e-9);
            prop_assert!((summary.z - (mean + 2.0)).abs() < 1e-9);
        }
    }
}

#[test]
fn test_concrete_four_record_scenario() {
    // four contiguous 20 kb bins merged pairwise
    let mut index = SpatialIndex::new(STEP);
    for (start, x) in [(0u64, 1.0f64), (20000, 3.0), (40000, 5.0), (60000, 7.0)] {
        index.insert(rec("chr1", start, x, Haplotype::Shared));
    }

    let scaled = ScaleEngine::new(2).unwrap().scale(&index).unwrap();
    assert_eq!(scaled.resolution(), 40000);
    assert_eq!(scaled.len(), 2);

    let mut records: Vec<G3dRecord> = scaled.query_all().into_iter().cloned().collect();
    records.sort_by_key(|r| r.start);
    assert_eq!((records[0].start, records[0].end), (0, 40000));
    assert_eq!(records[0].x, 2.0);
    assert_eq!((records[1].start, records[1].end), (40000, 80000));
    assert_eq!(records[1].x, 6.0);
}

#[test]
fn test_concrete_gap_scenario() {
    // gap between the second and third record
    let mut index = SpatialIndex::new(STEP);
    for start in [0u64, 20000, 200000, 220000] {
        index.insert(rec("chr1", start, 0.0, Haplotype::Shared));
    }

    let scaled = ScaleEngine::new(2).unwrap().scale(&index).unwrap();
    let mut records: Vec<G3dRecord> = scaled.query_all().into_iter().cloned().collect();
    records.sort_by_key(|r| r.start);

    assert_eq!(records.len(), 2);
    assert_eq!((records[0].start, records[0].end), (0, 40000));
    assert_eq!((records[1].start, records[1].end), (200000, 240000));
}

#[test]
fn test_concrete_inconsistent_spacing() {
    // 30000 sits strictly between one step and a clear two-step gap
    let mut index = SpatialIndex::new(STEP);
    index.insert(rec("chr1", 0, 0.0, Haplotype::Shared));
    index.insert(rec("chr1", 30000, 0.0, Haplotype::Shared));

    let result = ScaleEngine::new(2).unwrap().scale(&index);
    match result {
        Err(ScaleError::InconsistentSpacing { distance, resolution, .. }) => {
            assert_eq!(distance, 30000);
            assert_eq!(resolution, STEP);
        }
        other => panic!("expected InconsistentSpacing, got {:?}", other),
    }
}

#[test]
fn test_haplotypes_never_mix() {
    let mut index = SpatialIndex::new(STEP);
    for start in [0u64, 20000] {
        index.insert(rec("chr1", start, 0.0, Haplotype::Paternal));
        index.insert(rec("chr1", start, 10.0, Haplotype::Maternal));
        index.insert(rec("chr1", start, 20.0, Haplotype::Shared));
    }

    let scaled = ScaleEngine::new(2).unwrap().scale(&index).unwrap();
    assert_eq!(scaled.len(), 3);
    for record in scaled.query_all() {
        let expected = match record.haplotype {
            Haplotype::Paternal => 0.0,
            Haplotype::Maternal => 10.0,
            Haplotype::Shared => 20.0,
        };
        assert_eq!(record.x, expected);
    }
}

#[test]
fn test_multi_chromosome_scaling() {
    let mut index = SpatialIndex::new(STEP);
    for start in [0u64, 20000] {
        index.insert(rec("chr1", start, 0.0, Haplotype::Shared));
        index.insert(rec("chr2", start, 0.0, Haplotype::Shared));
    }

    let scaled = ScaleEngine::new(2).unwrap().scale(&index).unwrap();
    assert_eq!(scaled.len(), 2);
    assert_eq!(scaled.query_chrom("chr1").len(), 1);
    assert_eq!(scaled.query_chrom("chr2").len(), 1);
}
