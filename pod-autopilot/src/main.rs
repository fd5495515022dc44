//! Pod racing agent: plays live over stdin/stdout, or replays recorded
//! transcripts offline.
//!
//! Usage:
//!   pod-autopilot                       # live, same as `run`
//!   pod-autopilot replay --input race.txt
//!   RUST_LOG=pod_core=debug pod-autopilot run < race.txt

use anyhow::Result;
use clap::{Parser, Subcommand};
use pod_autopilot::channel::LineChannel;
use pod_autopilot::replay::{replay_file, run_batch, BatchConfig};
use pod_autopilot::settings::load_policy;
use pod_autopilot::util::{parse_path_csv, write_output};
use pod_core::TurnLoop;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pod-autopilot")]
#[command(about = "Two-pod racing agent with momentum-compensated steering")]
struct Cli {
    /// JSON file overriding policy tunables
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play a live race over stdin/stdout
    Run,
    /// Replay one recorded input transcript and print its summary
    Replay {
        #[arg(long)]
        input: PathBuf,
        /// Where to write the emitted command lines (stdout if omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replay many transcripts in parallel and write an aggregate report
    Batch {
        /// Comma-separated transcript paths
        #[arg(long)]
        inputs: String,
        #[arg(long)]
        jobs: Option<usize>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the effective policy configuration
    PrintConfig,
}

fn main() -> Result<()> {
    // stdout carries commands, so diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let Cli { config, command } = Cli::parse();
    let policy = load_policy(config.as_deref())?;

    match command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut channel = LineChannel::new(stdin.lock(), stdout.lock());
            let setup = channel.read_setup()?;
            let mut race = TurnLoop::new(setup.course, setup.initial, policy)?;
            let summary = race.run(&mut channel)?;
            tracing::info!(
                turns = summary.turns,
                lines = channel.lines_read(),
                "race finished"
            );
        }
        Commands::Replay { input, output } => {
            let outcome = replay_file(&input, &policy)?;
            let mut rendered = outcome.commands.join("\n");
            rendered.push('\n');
            let summary = serde_json::to_string_pretty(&outcome.summary)?;
            match output {
                Some(path) => {
                    write_output(&path, rendered.as_bytes())?;
                    println!("output={}", path.display());
                    println!("{summary}");
                }
                None => {
                    print!("{rendered}");
                    eprintln!("{summary}");
                }
            }
        }
        Commands::Batch { inputs, jobs, out } => {
            let report = run_batch(BatchConfig {
                inputs: parse_path_csv(&inputs)?,
                policy,
                jobs,
            })?;
            let encoded = serde_json::to_vec_pretty(&report)?;
            println!("transcripts={}", report.transcripts);
            println!("failures={}", report.failures);
            println!("total_turns={}", report.total_turns);
            println!("boosts={}", report.boosts);
            println!("shield_turns={}", report.shield_turns);
            match out {
                Some(path) => {
                    write_output(&path, &encoded)?;
                    println!("report={}", path.display());
                }
                None => println!("{}", String::from_utf8_lossy(&encoded)),
            }
        }
        Commands::PrintConfig => {
            println!("{}", serde_json::to_string_pretty(&policy)?);
        }
    }

    Ok(())
}
