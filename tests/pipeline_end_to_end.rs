//! End-to-end comparison runs over an on-disk corpus.

mod fixtures;

use bench_compare::{
    compare_file, AlgorithmVariant, BenchType, ExitCode, Group, NormalizeError, PipelineError,
};
use fixtures::{systems, Corpus};

#[test]
fn test_mean_and_join_over_two_systems() {
    let corpus = Corpus::new();
    corpus.file("b/x-inc.txt", "a = b\nc ≠ d\n");
    let input = corpus.measurements(&[
        ("A", "b/x-inc.txt", "1.0"),
        ("A", "b/x-inc.txt", "3.0"),
        ("B", "b/x-inc.txt", "2.0"),
    ]);

    let (comparison, _) = compare_file(&input, &systems(&["A", "B"]), corpus.root()).unwrap();

    let a = comparison.aggregates.for_system("A");
    let b = comparison.aggregates.for_system("B");
    assert_eq!((a.len(), b.len()), (1, 1));
    assert_eq!((a[0].size, a[0].time), (2, 2.0));
    assert_eq!((b[0].size, b[0].time), (2, 2.0));

    let rows = comparison.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].time("A"), Some(2.0));
    assert_eq!(rows[0].time("B"), Some(2.0));
    assert_eq!(rows[0].group, Group::Inc);
}

#[test]
fn test_inconsistent_timeouts_abort_run() {
    let corpus = Corpus::new();
    let input = corpus.measurements(&[
        ("C", "p", "timeout (600s)"),
        ("C", "q", "timeout (900s)"),
    ]);

    let err = compare_file(&input, &systems(&["C"]), corpus.root()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Normalize(NormalizeError::InconsistentTimeout { .. })
    ));
    assert_eq!(err.exit_code(), ExitCode::InconsistentTimeout);
}

#[test]
fn test_three_systems_with_linear_variant() {
    let corpus = Corpus::new();
    corpus.file("bench/topo/zoo.nkpl", "δ ← δ\n= =\n");
    corpus.file(
        "bench/naive-reachability/net-reachability.nkpl",
        "import \"../topo/zoo.nkpl\"\n",
    );
    corpus.file(
        "bench/linear-reachability/net-reachability.nkpl",
        "import \"../topo/zoo.nkpl\"\n",
    );
    let input = corpus.measurements(&[
        ("frenetic", "bench/naive-reachability/net-reachability.nkpl", "timeout (600s)"),
        ("apkeep", "bench/naive-reachability/net-reachability.nkpl", "3.5"),
        ("katch", "bench/naive-reachability/net-reachability.nkpl", "700"),
        ("katch", "bench/linear-reachability/net-reachability.nkpl", "0.5"),
    ]);

    let names = systems(&["frenetic", "katch", "apkeep"]);
    let (comparison, _) = compare_file(&input, &names, corpus.root()).unwrap();
    assert_eq!(comparison.timeout_seconds(), Some(600));

    // katch ran both variants, so the identity yields two rows
    let rows = comparison.rows();
    assert_eq!(rows.len(), 2);
    for row in rows {
        assert_eq!(row.group, Group::FullReachability);
        assert_eq!(row.bench_type, BenchType::Reachability);
        assert_eq!(row.size, 5);
        assert_eq!(row.time("frenetic"), Some(600.0));
    }
    assert_eq!(
        rows[1].cell("katch").unwrap().algorithm_variant,
        AlgorithmVariant::Linear
    );

    let policy = bench_compare::LabelPolicy {
        timeout_seconds: comparison.timeout_seconds(),
        variant_labeled_systems: systems(&["katch"]),
    };
    let labels: Vec<String> = comparison
        .plot_points(&policy)
        .into_iter()
        .map(|p| p.label)
        .collect();
    assert_eq!(
        labels,
        vec![
            "frenetic (timeout)",
            "katch-naive (timeout)",
            "apkeep",
            "frenetic (timeout)",
            "katch",
            "apkeep",
        ]
    );
}

#[test]
fn test_unreadable_files_degrade_to_zero() {
    let corpus = Corpus::new();
    let input = corpus.measurements(&[
        ("A", "missing/fig10-as-1755.inc", "0.042"),
        ("B", "missing/fig10-as-1755.inc", "0.5"),
    ]);

    let (comparison, _) = compare_file(&input, &systems(&["A", "B"]), corpus.root()).unwrap();
    assert_eq!(comparison.rows().len(), 1);
    assert_eq!(comparison.rows()[0].size, 0);
    assert_eq!(comparison.rows()[0].group, Group::TopologyZoo);
}

#[test]
fn test_join_keeps_only_fully_measured_identities() {
    let corpus = Corpus::new();
    let input = corpus.measurements(&[
        ("A", "flip/one.txt", "1"),
        ("B", "flip/one.txt", "1"),
        ("A", "flip/two.txt", "1"),
        ("B", "nondet/three.txt", "1"),
    ]);

    let (comparison, _) = compare_file(&input, &systems(&["A", "B"]), corpus.root()).unwrap();
    let names: Vec<&str> = comparison.rows().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["one"]);
    assert_eq!(comparison.joined.dropped, 2);
}

#[test]
fn test_malformed_line_aborts() {
    let corpus = Corpus::new();
    let input = corpus.file("results/comparison.csv", "A,b/x-inc.txt,1.0\nA,b/x-inc.txt\n");
    let err = compare_file(&input, &systems(&["A"]), corpus.root()).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Normalize(NormalizeError::MalformedLine { line_number: 2, .. })
    ));
}

#[test]
fn test_corpus_location_does_not_affect_identity_or_size() {
    let corpus = Corpus::new();
    assert!(corpus.root().to_string_lossy().contains("fig10"));
    corpus.file("bench/topo/ring.nkpl", "δ ← δ\n");
    corpus.file(
        "bench/naive-reachability/ring-reachability.nkpl",
        "a = b\nimport \"../topo/ring.nkpl\"\n",
    );
    let input = corpus.measurements(&[
        ("A", "bench/naive-reachability/ring-reachability.nkpl", "1"),
        ("B", "bench/naive-reachability/ring-reachability.nkpl", "2"),
    ]);

    let (comparison, _) = compare_file(&input, &systems(&["A", "B"]), corpus.root()).unwrap();
    let row = &comparison.rows()[0];
    assert_eq!(row.group, Group::FullReachability);
    assert_eq!(row.bench_type, BenchType::Reachability);
    // own text is not counted for reachability instances, only the import
    assert_eq!(row.size, 3);
}

#[test]
fn test_non_utf8_measurements_are_malformed_input() {
    let corpus = Corpus::new();
    let input = corpus.root().join("comparison.csv");
    std::fs::write(&input, b"A,b/x-inc.txt,1.0\nA,b/\xfe\xff-inc.txt,2.0\n").unwrap();

    let err = compare_file(&input, &systems(&["A"]), corpus.root()).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidUtf8 { .. }));
    assert_eq!(err.exit_code(), ExitCode::MalformedInput);
}
