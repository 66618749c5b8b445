use std::{io::Read as _, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use formuloid::{EaseKind, PrettyOpts};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fmd", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Pretty-print a formula dump.
    Pretty(PrettyArgs),
    /// Sample a named easing curve over [0, 1].
    Ease(EaseArgs),
}

#[derive(Parser, Debug)]
struct PrettyArgs {
    /// Input formula (stdin when omitted).
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Pretty-printer options JSON.
    #[arg(long)]
    opts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct EaseArgs {
    /// Catalog name, e.g. `in-out-quad`.
    #[arg(long, value_parser = parse_curve)]
    curve: EaseKind,

    /// Number of evenly spaced samples, end points included.
    #[arg(long, default_value_t = 11)]
    samples: usize,

    /// Also print the pretty formula of the curve (on stderr).
    #[arg(long, default_value_t = false)]
    formula: bool,
}

#[derive(serde::Serialize)]
struct Sample {
    u: f64,
    value: f64,
}

fn parse_curve(name: &str) -> Result<EaseKind, String> {
    serde_json::from_value(serde_json::Value::String(name.to_owned())).map_err(|_| {
        let known: Vec<String> = EaseKind::ALL
            .iter()
            .filter_map(|k| serde_json::to_value(k).ok())
            .filter_map(|v| v.as_str().map(str::to_owned))
            .collect();
        format!("unknown curve '{name}' (expected one of: {})", known.join(", "))
    })
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Pretty(args) => cmd_pretty(args),
        Command::Ease(args) => cmd_ease(args),
    }
}

fn cmd_pretty(args: PrettyArgs) -> anyhow::Result<()> {
    let opts = match &args.opts {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("read options '{}'", path.display()))?;
            serde_json::from_str::<PrettyOpts>(&text)
                .with_context(|| format!("parse options '{}'", path.display()))?
        }
        None => PrettyOpts::default(),
    };

    let input = match &args.in_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read formula '{}'", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read formula from stdin")?;
            buf
        }
    };

    println!("{}", formuloid::pretty_with(input.trim(), &opts));
    Ok(())
}

fn cmd_ease(args: EaseArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.samples >= 2, "--samples must be at least 2");

    let f = args.curve.function();
    let last = (args.samples - 1) as f64;
    let samples = (0..args.samples)
        .map(|i| {
            let u = i as f64 / last;
            let value = formuloid::evaluate(&f, u)
                .with_context(|| format!("evaluate {:?} at {u}", args.curve))?;
            Ok::<_, anyhow::Error>(Sample { u, value })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    println!("{}", serde_json::to_string_pretty(&samples)?);
    if args.formula {
        eprintln!("{}", f.pretty());
    }
    Ok(())
}
