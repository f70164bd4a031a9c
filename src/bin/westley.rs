use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "westley", version)]
struct Cli {
    /// Log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serialize a graph JSON file into a westley document.
    Serialize(SerializeArgs),
    /// Check a graph JSON file for dangling links and cycles.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct SerializeArgs {
    /// Input graph JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Document title.
    #[arg(long)]
    title: Option<String>,

    /// Base directory that resource paths are rebased against.
    #[arg(long)]
    root: Option<String>,

    /// Key prefix copied onto entries and tracks alongside `meta.` keys.
    #[arg(long)]
    store: Option<String>,

    /// Node to serialize from instead of the graph's root.
    #[arg(long)]
    node: Option<u32>,

    /// Output layout.
    #[arg(long, value_enum, default_value_t = FormatChoice::Pretty)]
    format: FormatChoice,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input graph JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Pretty,
    Compact,
}

impl From<FormatChoice> for westley::Format {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Pretty => westley::Format::Pretty,
            FormatChoice::Compact => westley::Format::Compact,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Serialize(args) => cmd_serialize(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_graph_json(path: &Path) -> anyhow::Result<westley::Graph> {
    let f = File::open(path).with_context(|| format!("open graph '{}'", path.display()))?;
    let r = BufReader::new(f);
    let graph: westley::Graph =
        serde_json::from_reader(r).with_context(|| "parse graph JSON")?;
    Ok(graph)
}

fn cmd_serialize(args: SerializeArgs) -> anyhow::Result<()> {
    let graph = read_graph_json(&args.in_path)?;
    graph.validate()?;

    let root = match args.node {
        Some(n) => westley::NodeId(n),
        None => graph
            .root()
            .ok_or_else(|| anyhow::anyhow!("graph '{}' has no nodes", args.in_path.display()))?,
    };

    let mut config = westley::ConsumerConfig::new().format(args.format.into());
    if let Some(title) = args.title {
        config = config.title(title);
    }
    if let Some(base) = args.root {
        config = config.root(base);
    }
    if let Some(store) = args.store {
        config = config.store(store);
    }
    if let Some(out) = &args.out {
        config = config.output(out);
    }

    let mut consumer = westley::Consumer::new(config);
    consumer.start_at(&graph, root)?;
    if let Some(out) = &args.out {
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let graph = read_graph_json(&args.in_path)?;
    graph.validate()?;
    eprintln!("{}: {} nodes, ok", args.in_path.display(), graph.len());
    Ok(())
}
