//! Live driver: glints on stdin, snapshots on stdout, one owning task.
//!
//! The graph is never shared. Input lines and timer ticks are multiplexed
//! with `tokio::select!` inside the single task that owns it.

use std::time::Duration;

use anyhow::{Context, Result};
use rand::Rng;
use rce_core::{ConstellationGraph, EventRecord, Timestamp};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};

use crate::replay::write_snapshot;

pub async fn run<R: Rng>(mut graph: ConstellationGraph<R>, interval: Duration) -> Result<()> {
    let start = Instant::now();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    tracing::info!("live mode: ticking every {}ms", interval.as_millis());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("failed to read stdin")? {
                    Some(line) => ingest_line(&mut graph, &line, elapsed(start)),
                    None => {
                        tracing::info!("stdin closed");
                        break;
                    }
                }
            }
            _ = ticker.tick() => {
                emit_tick(&mut graph, &mut stdout, elapsed(start)).await?;
            }
            _ = &mut shutdown => {
                tracing::info!("interrupted");
                break;
            }
        }
    }

    emit_tick(&mut graph, &mut stdout, elapsed(start)).await
}

fn elapsed(start: Instant) -> Timestamp {
    let ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    Timestamp::from_millis(ms)
}

fn ingest_line<R: Rng>(graph: &mut ConstellationGraph<R>, line: &str, now: Timestamp) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }
    let record: EventRecord = match serde_json::from_str(line) {
        Ok(record) => record,
        Err(e) => {
            tracing::warn!("unparseable glint: {e}");
            return;
        }
    };
    if let Err(e) = graph.ingest(record, now) {
        tracing::warn!("glint rejected: {e}");
    }
}

async fn emit_tick<R: Rng>(
    graph: &mut ConstellationGraph<R>,
    stdout: &mut tokio::io::Stdout,
    now: Timestamp,
) -> Result<()> {
    let snapshot = graph.tick(now)?;
    let mut buf = Vec::new();
    write_snapshot(&mut buf, &snapshot, false)?;
    stdout
        .write_all(&buf)
        .await
        .context("failed to write snapshot")?;
    stdout.flush().await.context("failed to flush stdout")?;
    Ok(())
}
