use clap::{Args as ClapArgs, Parser, Subcommand};
use schemagraph_api::RestApi;
use schemagraph_core::{BuilderConfig, RefEncoding, SchemaGraphBuilder, SequentialIds};
use schemagraph_storage::{load_document, write_graph, GraphStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Turn JSON Schema definitions into a node/edge graph
#[derive(Parser, Debug)]
#[command(name = "schemagraph")]
#[command(about = "Turn JSON Schema definitions into a node/edge graph", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a graph from a schema document and print or write it as JSON
    Build {
        /// Input JSON document with a `definitions` (or `schema`) field
        input: PathBuf,

        /// Write the graph here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Drop blank and root-marker ids, as a renderer would
        #[arg(long)]
        render: bool,

        /// Number placeholder nodes instead of using random ids
        #[arg(long)]
        deterministic_ids: bool,

        #[command(flatten)]
        builder: BuilderArgs,
    },

    /// Serve the REST API
    Serve {
        /// Directory for stored graphs
        #[arg(short, long, default_value = "./data")]
        data_dir: PathBuf,

        /// HTTP API port
        #[arg(long, default_value_t = 6340)]
        http_port: u16,

        #[command(flatten)]
        builder: BuilderArgs,
    },
}

#[derive(ClapArgs, Debug)]
struct BuilderArgs {
    /// Definition keys are readable names, not base64
    #[arg(long)]
    plain_refs: bool,

    /// Maximum schema nesting depth
    #[arg(long, default_value_t = 256)]
    max_depth: usize,
}

impl BuilderArgs {
    fn config(&self) -> BuilderConfig {
        let encoding = if self.plain_refs {
            RefEncoding::Plain
        } else {
            RefEncoding::Base64
        };
        BuilderConfig::default()
            .with_ref_encoding(encoding)
            .with_max_depth(self.max_depth)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Build {
            input,
            output,
            render,
            deterministic_ids,
            builder,
        } => {
            let document = load_document(&input)?;
            let config = builder.config();

            let graph = if deterministic_ids {
                SchemaGraphBuilder::new()
                    .with_config(config)
                    .with_id_generator(SequentialIds::default())
                    .build_document(&document)?
            } else {
                SchemaGraphBuilder::new()
                    .with_config(config)
                    .build_document(&document)?
            };
            let graph = if render { graph.renderable() } else { graph };

            let stats = graph.stats();
            info!(
                "Built graph from {:?}: {} nodes, {} edges ({} refs, {} properties)",
                input, stats.nodes, stats.edges, stats.refs, stats.properties
            );

            match output {
                Some(path) => {
                    write_graph(&path, &graph)?;
                    info!("Graph written to {:?}", path);
                }
                None => println!("{}", serde_json::to_string_pretty(&graph)?),
            }
        }
        Command::Serve {
            data_dir,
            http_port,
            builder,
        } => {
            info!("Starting schemagraph v{}", env!("CARGO_PKG_VERSION"));
            info!("Data directory: {:?}", data_dir);

            let store = Arc::new(GraphStore::open(&data_dir)?);
            let config = builder.config();

            let http_handle = std::thread::spawn(move || {
                let sys = actix_web::rt::System::new();
                sys.block_on(async {
                    if let Err(e) = RestApi::start(store, config, http_port).await {
                        tracing::error!("HTTP server error: {}", e);
                    }
                })
            });

            info!("HTTP API: http://localhost:{}/", http_port);

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("Shutdown signal received");
                }
                _ = tokio::task::spawn_blocking(move || {
                    http_handle.join().ok();
                }) => {
                    info!("HTTP server stopped");
                }
            }

            info!("Shutting down...");
        }
    }

    Ok(())
}
