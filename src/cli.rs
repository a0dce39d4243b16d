use crate::bundle::{write_bundle, RenderBundle};
use crate::config::load_config;
use crate::pipeline::{DisplayOptions, Pipeline};
use crate::snapshot::load_snapshot;
use anyhow::Result;
use clap::Parser;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "fgr",
    version,
    about = "Follow-network graph analytics and layout preparation"
)]
pub struct Args {
    /// Input snapshot (network.json or flattened nodes/edges), '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output bundle JSON. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Root account id (defaults to the snapshot's first account)
    #[arg(short = 'r', long = "root")]
    pub root: Option<String>,

    /// Collapse degree <= 1 nodes into one placeholder
    #[arg(long = "hide-leaves")]
    pub hide_leaves: bool,

    /// Enumerate cliques, cluster the layout by them, and color them
    #[arg(long = "show-cliques")]
    pub show_cliques: bool,

    /// Config JSON/JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f64,

    /// Canvas height
    #[arg(short = 'H', long = "height", default_value_t = 800.0)]
    pub height: f64,

    /// Pretty-print the output JSON
    #[arg(long = "pretty")]
    pub pretty: bool,

    /// Suppress the processing summary on stderr
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.layout.width = args.width;
    config.layout.height = args.height;

    let (input, source) = read_input(args.input.as_deref())?;
    let graph = load_snapshot(&input, args.root.as_deref())?;

    let mut pipeline = Pipeline::new(graph, config);
    if let Some(source) = source.clone() {
        pipeline = pipeline.with_source(source);
    }
    let bundle = pipeline.recompute(DisplayOptions {
        hide_leaves: args.hide_leaves,
        show_cliques: args.show_cliques,
    });

    if !args.quiet {
        print_summary(&bundle);
    }

    match args.output.as_deref() {
        Some(path) => write_bundle(path, &bundle, args.pretty)?,
        None => {
            let json = bundle.to_json(args.pretty)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(json.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<(String, Option<String>)> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok((buf, None));
        }
        let content = std::fs::read_to_string(path)?;
        return Ok((content, Some(path.display().to_string())));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok((buf, None))
}

fn print_summary(bundle: &RenderBundle) {
    let meta = &bundle.metadata;
    eprintln!(
        "Processed {} users, {} connections:",
        meta.total_users, meta.total_connections
    );
    eprintln!("  - {} mutual relationships", meta.mutual_connections);
    eprintln!("  - {} following relationships", meta.following_connections);
    eprintln!("  - {} follower relationships", meta.follower_connections);
    if meta.show_cliques {
        eprintln!("  - {} cliques", meta.clique_count);
    }
}
