//! Offline driver: feed a JSON-lines script of glints and ticks through a graph.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use rand::Rng;
use rce_core::{ConstellationGraph, EventRecord, Snapshot, Timestamp};
use serde::Deserialize;

/// One script line: `{"at": ms, "glint": {...}}` or `{"tick": ms}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ReplayLine {
    Glint { at: Timestamp, glint: EventRecord },
    Tick { tick: Timestamp },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReplayStats {
    pub ingested: usize,
    pub rejected: usize,
    pub ticks: usize,
}

/// Run every line through `graph`. Bad lines are logged and counted, never fatal.
pub fn replay<R: Rng>(
    graph: &mut ConstellationGraph<R>,
    input: impl BufRead,
    mut out: impl Write,
    summary: bool,
) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();

    for (idx, line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.context("failed to read replay input")?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parsed: ReplayLine = match serde_json::from_str(trimmed) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("line {line_no}: unparseable entry: {e}");
                stats.rejected += 1;
                continue;
            }
        };

        match parsed {
            ReplayLine::Glint { at, glint } => match graph.ingest(glint, at) {
                Ok(_) => stats.ingested += 1,
                Err(e) => {
                    tracing::warn!("line {line_no}: glint rejected: {e}");
                    stats.rejected += 1;
                }
            },
            ReplayLine::Tick { tick } => match graph.tick(tick) {
                Ok(snapshot) => {
                    stats.ticks += 1;
                    write_snapshot(&mut out, &snapshot, summary)?;
                }
                Err(e) => {
                    tracing::warn!("line {line_no}: tick rejected: {e}");
                    stats.rejected += 1;
                }
            },
        }
    }

    out.flush().context("failed to flush output")?;
    Ok(stats)
}

pub fn write_snapshot(out: &mut impl Write, snapshot: &Snapshot, summary: bool) -> Result<()> {
    if summary {
        writeln!(
            out,
            "tick={} nodes={} edges={}",
            snapshot.at.as_millis(),
            snapshot.nodes.len(),
            snapshot.edges.len()
        )?;
    } else {
        let json = serde_json::to_string(snapshot).context("failed to serialize snapshot")?;
        writeln!(out, "{json}")?;
    }
    Ok(())
}
