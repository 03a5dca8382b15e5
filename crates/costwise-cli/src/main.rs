//! costwise CLI: estimate storage footprint and per-query costs for a
//! denormalized document database, from a JSON schema + statistics file.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

use costwise_core::sizes;
use costwise_io::load_environment;
use costwise_model::{parse_workload, placement, CostEngine, CostResult};

#[derive(Parser)]
#[command(name = "costwise")]
#[command(about = "Storage and query cost estimator for sharded document databases", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Per-document and per-collection sizes, plus the total database size
    Sizes {
        /// Path to the JSON schema file
        #[arg(short = 's', long)]
        schema: PathBuf,

        /// Path to the statistics JSON file
        #[arg(short = 't', long)]
        stats: PathBuf,
    },

    /// Average docs/server and keys/server for every field with a
    /// distinct-value statistic
    Sharding {
        /// Path to the JSON schema file
        #[arg(short = 's', long)]
        schema: PathBuf,

        /// Path to the statistics JSON file
        #[arg(short = 't', long)]
        stats: PathBuf,
    },

    /// Run a YAML workload of query descriptions and print each cost
    Cost {
        /// Path to the JSON schema file
        #[arg(short = 's', long)]
        schema: PathBuf,

        /// Path to the statistics JSON file
        #[arg(short = 't', long)]
        stats: PathBuf,

        /// Path to the workload YAML file
        #[arg(short = 'w', long)]
        workload: PathBuf,

        /// Override the server count from the statistics file
        #[arg(long)]
        servers: Option<u64>,
    },

    /// Parse schema, statistics, and optionally a workload (syntax check)
    Validate {
        /// Path to the JSON schema file
        #[arg(short = 's', long)]
        schema: PathBuf,

        /// Path to the statistics JSON file
        #[arg(short = 't', long)]
        stats: PathBuf,

        /// Path to the workload YAML file
        #[arg(short = 'w', long)]
        workload: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sizes { schema, stats } => {
            if let Err(e) = report_sizes(&schema, &stats) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Sharding { schema, stats } => {
            if let Err(e) = report_sharding(&schema, &stats) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Cost {
            schema,
            stats,
            workload,
            servers,
        } => {
            if let Err(e) = report_costs(&schema, &stats, &workload, servers) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Validate {
            schema,
            stats,
            workload,
        } => {
            if let Err(e) = validate(&schema, &stats, workload.as_deref()) {
                eprintln!("Validation failed: {}", e);
                std::process::exit(1);
            }
            println!("✓ Inputs are valid");
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn report_sizes(schema_path: &PathBuf, stats_path: &PathBuf) -> CliResult {
    let (db, _) = load_files(schema_path, stats_path)?;

    println!("Database: {}", db.name);
    for coll in &db.collections {
        println!(
            "{:<12} | doc_size = {:8.0} B | collection = {:10.3} GB",
            coll.name,
            sizes::doc_size(coll),
            sizes::bytes_to_gb(sizes::collection_size(coll)),
        );
    }
    println!("Total DB size: {:.3} GB", sizes::bytes_to_gb(sizes::db_size(&db)));
    Ok(())
}

fn report_sharding(schema_path: &PathBuf, stats_path: &PathBuf) -> CliResult {
    let (db, stats) = load_files(schema_path, stats_path)?;

    println!("Servers: {}", stats.servers());
    for (coll_name, field, distinct) in stats.distinct_entries() {
        let coll = db.collection(coll_name)?;
        let p = placement(coll.doc_count, distinct, stats.servers());
        println!(
            "{:<12} #{:<10} | docs/server = {:12.2} | keys/server = {:12.2}",
            coll_name, field, p.docs_per_server, p.keys_per_server,
        );
    }
    Ok(())
}

fn report_costs(
    schema_path: &PathBuf,
    stats_path: &PathBuf,
    workload_path: &PathBuf,
    servers: Option<u64>,
) -> CliResult {
    let (db, mut stats) = load_files(schema_path, stats_path)?;
    if let Some(n) = servers {
        stats = stats.with_servers(n)?;
    }
    let workload = parse_workload(&fs::read_to_string(workload_path)?)?;
    let engine = CostEngine::new(&db, &stats);

    for query in &workload.queries {
        tracing::info!(query = query.label(), "evaluating");
        let cost = query.evaluate(&engine)?;
        print_cost(query.label(), &cost);
    }
    Ok(())
}

fn validate(
    schema_path: &PathBuf,
    stats_path: &PathBuf,
    workload_path: Option<&std::path::Path>,
) -> CliResult {
    let (db, stats) = load_files(schema_path, stats_path)?;
    if let Some(path) = workload_path {
        let workload = parse_workload(&fs::read_to_string(path)?)?;
        // evaluating is cheap and catches unknown fields/collections too
        let engine = CostEngine::new(&db, &stats);
        for query in &workload.queries {
            query.evaluate(&engine)?;
        }
    }
    Ok(())
}

fn load_files(
    schema_path: &PathBuf,
    stats_path: &PathBuf,
) -> Result<(costwise_core::Database, costwise_core::Statistics), Box<dyn std::error::Error>> {
    let schema_json = fs::read_to_string(schema_path)?;
    let stats_json = fs::read_to_string(stats_path)?;
    Ok(load_environment(&schema_json, &stats_json)?)
}

fn print_cost(label: &str, cost: &CostResult) {
    println!(">> {}", label);
    println!("  servers contacted = {}", cost.servers_contacted);
    println!("  result docs       = {:.2}", cost.result_docs);
    println!("  size_query        = {:.0} B", cost.size_query);
    println!("  size_msg          = {:.0} B", cost.size_msg);
    println!("  vol_network       = {:.0} B", cost.vol_network);
    println!("  time_network      = {:.9} s", cost.time_network);
    println!("  time_cpu          = {:.9} s", cost.time_cpu);
    println!("  time_total        = {:.9} s", cost.time_total);
    println!("  co2               = {:.9} kg", cost.co2);
    println!("  price             = {:.9} EUR", cost.price);
}
