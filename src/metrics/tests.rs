use super::*;
use crate::error::{AppError, AppResult};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn snapshot(success: u64, failure: u64, elapsed: Duration) -> StatsSnapshot {
    StatsSnapshot {
        success_count: success,
        failure_count: failure,
        total_processed: success.saturating_add(failure),
        elapsed,
    }
}

#[test]
fn record_updates_counts_and_returns_total() -> AppResult<()> {
    let stats = RunStats::new();
    let totals = [
        stats.record(true),
        stats.record(false),
        stats.record(true),
    ];
    if totals != [1, 2, 3] {
        return Err(AppError::validation(format!("Unexpected totals: {:?}", totals)));
    }
    let snap = stats.snapshot();
    if snap.success_count != 2 || snap.failure_count != 1 || snap.total_processed != 3 {
        return Err(AppError::validation(format!("Unexpected snapshot: {:?}", snap)));
    }
    Ok(())
}

#[test]
fn new_stats_start_at_zero() -> AppResult<()> {
    let snap = RunStats::new().snapshot();
    if snap.total_processed != 0 || snap.success_rate_x100() != 0 {
        return Err(AppError::validation("Expected empty stats"));
    }
    Ok(())
}

#[test]
fn concurrent_records_are_not_lost() -> AppResult<()> {
    const WORKERS: u64 = 16;
    const RECORDS: u64 = 5_000;

    let stats = Arc::new(RunStats::new());
    let mut handles = Vec::new();
    for worker in 0..WORKERS {
        let stats = Arc::clone(&stats);
        handles.push(std::thread::spawn(move || {
            for record in 0..RECORDS {
                let success = (worker ^ record) % 3 != 0;
                stats.record(success);
                let snap = stats.snapshot();
                if snap.total_processed != snap.success_count.saturating_add(snap.failure_count)
                {
                    return false;
                }
            }
            true
        }));
    }
    for handle in handles {
        let consistent = handle
            .join()
            .map_err(|_panic| AppError::validation("Worker thread panicked"))?;
        if !consistent {
            return Err(AppError::validation("Observed inconsistent snapshot"));
        }
    }

    let snap = stats.snapshot();
    if snap.total_processed != WORKERS * RECORDS {
        return Err(AppError::validation(format!(
            "Expected {} records, got {}",
            WORKERS * RECORDS,
            snap.total_processed
        )));
    }
    if snap.success_count + snap.failure_count != snap.total_processed {
        return Err(AppError::validation("Counts do not sum to total"));
    }
    Ok(())
}

#[test]
fn throughput_is_zero_without_elapsed_time() -> AppResult<()> {
    if snapshot(10, 0, Duration::ZERO).throughput_x100() != 0 {
        return Err(AppError::validation("Expected zero throughput"));
    }
    Ok(())
}

#[test]
fn throughput_uses_fixed_point() -> AppResult<()> {
    let value = snapshot(45, 5, Duration::from_secs(4)).throughput_x100();
    if value != 1_250 {
        return Err(AppError::validation(format!("Unexpected throughput: {}", value)));
    }
    Ok(())
}

#[test]
fn success_rate_uses_fixed_point() -> AppResult<()> {
    let value = snapshot(2, 1, Duration::from_secs(1)).success_rate_x100();
    if value != 6_666 {
        return Err(AppError::validation(format!("Unexpected success rate: {}", value)));
    }
    Ok(())
}

#[test]
fn elapsed_tracks_start_time() -> AppResult<()> {
    let started = Instant::now()
        .checked_sub(Duration::from_millis(250))
        .ok_or_else(|| AppError::validation("Clock too close to boot"))?;
    let snap = RunStats::started_at(started).snapshot();
    if snap.elapsed < Duration::from_millis(250) {
        return Err(AppError::validation(format!("Unexpected elapsed: {:?}", snap.elapsed)));
    }
    Ok(())
}

#[test]
fn snapshot_serializes_elapsed_in_millis() -> AppResult<()> {
    let value = serde_json::to_value(snapshot(3, 1, Duration::from_millis(1_500)))?;
    if value.get("elapsed_ms").and_then(serde_json::Value::as_u64) != Some(1_500) {
        return Err(AppError::validation(format!("Unexpected json: {}", value)));
    }
    if value.get("total_processed").and_then(serde_json::Value::as_u64) != Some(4) {
        return Err(AppError::validation(format!("Unexpected json: {}", value)));
    }
    Ok(())
}
