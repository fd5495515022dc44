//! Offline replay of recorded input transcripts.

use crate::channel::LineChannel;
use crate::util::unix_now;
use anyhow::{Context, Result};
use pod_core::{PolicyConfig, RaceSummary, TurnLoop};
use rayon::prelude::*;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Clone, Debug)]
pub struct ReplayOutcome {
    pub summary: RaceSummary,
    /// Emitted command lines, the two opening placeholders first.
    pub commands: Vec<String>,
}

pub fn replay_reader<R: BufRead>(reader: R, policy: &PolicyConfig) -> Result<ReplayOutcome> {
    let mut channel = LineChannel::new(reader, Vec::<u8>::new());
    let setup = channel.read_setup()?;
    let mut race = TurnLoop::new(setup.course, setup.initial, policy.clone())?;
    let summary = race.run(&mut channel)?;

    let written = String::from_utf8(channel.into_writer()).context("commands were not utf-8")?;
    Ok(ReplayOutcome {
        summary,
        commands: written.lines().map(str::to_string).collect(),
    })
}

pub fn replay_file(path: &Path, policy: &PolicyConfig) -> Result<ReplayOutcome> {
    let file = File::open(path).with_context(|| format!("failed opening {}", path.display()))?;
    replay_reader(BufReader::new(file), policy)
        .with_context(|| format!("replay of {} failed", path.display()))
}

#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub inputs: Vec<PathBuf>,
    pub policy: PolicyConfig,
    pub jobs: Option<usize>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BatchEntry {
    pub input: String,
    pub summary: Option<RaceSummary>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct BatchReport {
    pub generated_unix_s: u64,
    pub jobs: Option<usize>,
    pub policy: PolicyConfig,
    pub transcripts: usize,
    pub failures: usize,
    pub total_turns: u64,
    pub boosts: usize,
    pub shield_turns: u64,
    pub entries: Vec<BatchEntry>,
}

/// Replays every transcript, in parallel, keeping failures in the report.
pub fn run_batch(config: BatchConfig) -> Result<BatchReport> {
    let run_one = |path: &PathBuf| -> BatchEntry {
        let input = path.display().to_string();
        match replay_file(path, &config.policy) {
            Ok(outcome) => BatchEntry {
                input,
                summary: Some(outcome.summary),
                error: None,
            },
            Err(err) => {
                tracing::warn!(input = %input, "replay failed: {err:#}");
                BatchEntry {
                    input,
                    summary: None,
                    error: Some(format!("{err:#}")),
                }
            }
        }
    };

    let entries: Vec<BatchEntry> = if let Some(jobs) = config.jobs {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(jobs.max(1))
            .build()
            .context("failed to build rayon threadpool")?;
        pool.install(|| config.inputs.par_iter().map(run_one).collect())
    } else {
        config.inputs.par_iter().map(run_one).collect()
    };

    let summaries = || entries.iter().filter_map(|entry| entry.summary.as_ref());
    let total_turns = summaries().map(|s| s.turns as u64).sum();
    let boosts = summaries()
        .flat_map(|s| s.vehicles.iter())
        .filter(|v| v.boost_turn.is_some())
        .count();
    let shield_turns = summaries()
        .flat_map(|s| s.vehicles.iter())
        .map(|v| v.shield_turns as u64)
        .sum();
    let failures = entries.iter().filter(|entry| entry.error.is_some()).count();

    Ok(BatchReport {
        generated_unix_s: unix_now(),
        jobs: config.jobs,
        transcripts: entries.len(),
        failures,
        total_turns,
        boosts,
        shield_turns,
        policy: config.policy,
        entries,
    })
}
