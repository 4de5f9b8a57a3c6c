use clap::{Parser, ValueEnum};
use clusterx::{
    AlgorithmRegistry, ClusterReport, ClusteringPipeline, ClusteringWorker, DelimitedParser,
    MetricRegistry, RunConfig,
};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Cluster a delimited text dataset
#[derive(Parser, Debug)]
#[command(name = "clusterx")]
#[command(about = "Agglomerative and k-means clustering for mixed datasets", long_about = None)]
struct Args {
    /// Dataset file, one record per line
    file: PathBuf,

    /// JSON run configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Clustering algorithm (agglomerative, kmeans)
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Distance metric (euclidean)
    #[arg(short, long)]
    metric: Option<String>,

    /// Number of agglomerative merge rounds
    #[arg(long)]
    round_limit: Option<usize>,

    /// Number of k-means clusters
    #[arg(short)]
    k: Option<usize>,

    /// Maximum k-means rounds
    #[arg(long)]
    max_rounds: Option<usize>,

    /// Seed for k-means initialization
    #[arg(long)]
    seed: Option<u64>,

    /// Cluster the raw numeric values
    #[arg(long)]
    no_normalize: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(algorithm) = &self.algorithm {
            config.algorithm = algorithm.clone();
        }
        if let Some(metric) = &self.metric {
            config.metric = metric.clone();
        }
        if self.no_normalize {
            config.normalize = false;
        }

        let params = &mut config.params;
        params.round_limit = self.round_limit.or(params.round_limit);
        params.k = self.k.or(params.k);
        params.max_rounds = self.max_rounds.or(params.max_rounds);
        params.seed = self.seed.or(params.seed);

        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr so the report on stdout stays parseable
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting ClusterX v{}", env!("CARGO_PKG_VERSION"));

    let config = args.run_config()?;
    info!("Algorithm: {}, metric: {}", config.algorithm, config.metric);

    let pipeline = ClusteringPipeline::from_config(
        &config,
        &AlgorithmRegistry::with_defaults(),
        &MetricRegistry::with_defaults(),
    )?;

    let dataset = DelimitedParser::new().read_path(&args.file)?;
    info!(
        "Loaded {} records with {} features from {:?} ({} skipped)",
        dataset.len(),
        dataset.feature_count,
        args.file,
        dataset.skipped
    );
    let source = dataset.source_name.clone();

    let mut worker = ClusteringWorker::spawn()?;
    let handle = worker.submit(pipeline.clone(), dataset.into_records())?;
    let outcome = handle.wait()?;
    worker.shutdown();

    let mut report = ClusterReport::new(
        pipeline.algorithm().name(),
        pipeline.metric().name(),
        &outcome.clusters,
    )
    .with_feature_stats(outcome.feature_stats);
    if let Some(source) = source {
        report = report.with_source(source);
    }

    match args.format {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }

    info!("Done: {} clusters", report.clusters.len());
    Ok(())
}
