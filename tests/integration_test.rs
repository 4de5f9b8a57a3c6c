// Integration tests for ClusterX
use clusterx::prelude::*;
use clusterx::{into_shared, LinkageSearch};
use std::io::{Cursor, Write};
use std::sync::Arc;

const MIXED: &str = "2,MIT\n4,NUC\n10,NIV\n";

fn texts(cluster: &Cluster) -> Vec<&str> {
    cluster.iter().map(|r| r.original_text()).collect()
}

#[test]
fn test_normalized_distances() {
    let dataset = DelimitedParser::new().read(Cursor::new(MIXED)).unwrap();
    let records = MeanNormalizer::new().normalize(dataset.into_records());

    assert!((records[0].numeric_at(0) - (-0.41667)).abs() < 1e-4);
    assert!((records[1].numeric_at(0) - (-0.16667)).abs() < 1e-4);
    assert!((records[2].numeric_at(0) - 0.58333).abs() < 1e-4);

    // Categorical edit distances dominate the normalized numeric gap
    let d01 = EuclideanDistance.measure(&records[0], &records[1]);
    let d02 = EuclideanDistance.measure(&records[0], &records[2]);
    let d12 = EuclideanDistance.measure(&records[1], &records[2]);
    assert!((d01 - (0.0625f64 + 9.0).sqrt()).abs() < 1e-9);
    assert!((d02 - (1.0f64 + 4.0).sqrt()).abs() < 1e-9);
    assert!((d12 - (0.5625f64 + 4.0).sqrt()).abs() < 1e-9);
}

#[test]
fn test_agglomerative_end_to_end() {
    let dataset = DelimitedParser::new().read(Cursor::new("2\n4\n10\n")).unwrap();
    let pipeline = ClusteringPipeline::new(Arc::new(Agglomerative::new(1)), Arc::new(EuclideanDistance));
    let outcome = pipeline.run(dataset.into_records()).unwrap();

    assert_eq!(outcome.clusters.len(), 2);
    assert_eq!(texts(&outcome.clusters[0]), vec!["2", "4"]);
    assert_eq!(texts(&outcome.clusters[1]), vec!["10"]);
}

#[test]
fn test_agglomerative_mixed_features() {
    // NUC/NIV share a letter, which outweighs the 4..10 numeric gap
    let dataset = DelimitedParser::new().read(Cursor::new(MIXED)).unwrap();
    let pipeline = ClusteringPipeline::new(Arc::new(Agglomerative::new(1)), Arc::new(EuclideanDistance));
    let outcome = pipeline.run(dataset.into_records()).unwrap();

    assert_eq!(texts(&outcome.clusters[0]), vec!["2,MIT"]);
    assert_eq!(texts(&outcome.clusters[1]), vec!["4,NUC", "10,NIV"]);
}

#[test]
fn test_agglomerative_cluster_count_invariant() {
    let values: Vec<Record> = (0..20)
        .map(|i| Record::numeric_only(vec![(i * 7 % 13) as f64, (i % 5) as f64]))
        .collect();
    let records = into_shared(values);

    for rounds in 1..records.len() {
        for search in [LinkageSearch::Cached, LinkageSearch::Naive] {
            let clusters = Agglomerative::new(rounds)
                .with_search(search)
                .cluster(&records, &EuclideanDistance)
                .unwrap();
            assert_eq!(clusters.len(), records.len() - rounds);
            let total: usize = clusters.iter().map(Cluster::len).sum();
            assert_eq!(total, records.len());
        }
    }
}

#[test]
fn test_kmeans_separates_groups() {
    let input = "1.0,1.0\n1.2,0.8\n0.9,1.1\n9.0,9.0\n9.2,8.8\n8.9,9.1\n";
    let dataset = DelimitedParser::new().read(Cursor::new(input)).unwrap();
    let records = into_shared(dataset.into_records());

    let fit = KMeans::new(2, 50)
        .with_seed(17)
        .fit_with_cancel(&records, &EuclideanDistance, &CancelFlag::new())
        .unwrap();

    assert!(fit.converged);
    let mut sizes: Vec<usize> = fit.clusters.iter().map(Cluster::len).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![3, 3]);
    for cluster in &fit.clusters {
        let low = cluster.iter().filter(|r| r.numeric_at(0) < 5.0).count();
        assert!(low == 0 || low == cluster.len());
    }
}

#[test]
fn test_kmeans_seed_is_reproducible() {
    let records = into_shared(
        (0..30)
            .map(|i| Record::numeric_only(vec![(i * 31 % 17) as f64, (i * 11 % 7) as f64]))
            .collect(),
    );
    let run = |seed| {
        KMeans::new(3, 25)
            .with_seed(seed)
            .fit_with_cancel(&records, &EuclideanDistance, &CancelFlag::new())
            .map(|fit| fit.centroids)
    };

    match (run(99), run(99)) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(a), Err(b)) => assert_eq!(a.to_string(), b.to_string()),
        _ => panic!("same seed produced different outcomes"),
    }
}

#[test]
fn test_config_driven_run_on_worker() {
    let config = RunConfig::from_json(
        r#"{"algorithm": "agglomerative", "normalize": false, "params": {"round_limit": 2}}"#,
    )
    .unwrap();
    let pipeline = ClusteringPipeline::from_config(
        &config,
        &AlgorithmRegistry::with_defaults(),
        &MetricRegistry::with_defaults(),
    )
    .unwrap();

    let dataset = DelimitedParser::new().read(Cursor::new(MIXED)).unwrap();
    let worker = ClusteringWorker::spawn().unwrap();
    let outcome = worker
        .submit(pipeline.clone(), dataset.into_records())
        .unwrap()
        .wait()
        .unwrap();

    assert_eq!(outcome.clusters.len(), 1);
    let report = ClusterReport::new(
        pipeline.algorithm().name(),
        pipeline.metric().name(),
        &outcome.clusters,
    );
    assert_eq!(report.records, 3);
    assert!(report.to_string().contains("Algorithm: Agglomerative"));
}

#[test]
fn test_invalid_parameters() {
    let records = into_shared(vec![
        Record::numeric_only(vec![1.0]),
        Record::numeric_only(vec![2.0]),
    ]);

    let err = Agglomerative::new(2).cluster(&records, &EuclideanDistance).unwrap_err();
    assert!(matches!(err, Error::InvalidRoundLimit { .. }));

    let err = KMeans::new(3, 10).cluster(&records, &EuclideanDistance).unwrap_err();
    assert!(matches!(err, Error::InvalidClusterCount { .. }));
}

#[test]
fn test_parse_file_and_report_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mixed.data");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(MIXED.as_bytes()).unwrap();
    file.write_all(b"bad,row,here\n").unwrap();
    drop(file);

    let dataset = DelimitedParser::new().read_path(&path).unwrap();
    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.skipped, 1);

    let source = dataset.source_name.clone().unwrap();
    let outcome = ClusteringPipeline::new(Arc::new(Agglomerative::new(1)), Arc::new(EuclideanDistance))
        .run(dataset.into_records())
        .unwrap();
    let report = ClusterReport::new("Agglomerative", "Euclidean Distance", &outcome.clusters)
        .with_source(source)
        .with_feature_stats(outcome.feature_stats);

    let json = report.to_json().unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["source"], "mixed.data");
    assert_eq!(parsed["clusters"][0]["members"][0]["numeric"][0], 2.0);
    assert_eq!(parsed["feature_stats"][0]["max"], 10.0);
}
