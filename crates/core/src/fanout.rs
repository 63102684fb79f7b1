//! Fan-out of a name list across a fixed set of worker threads.
//!
//! The list is split into contiguous chunks, one per worker. Each worker
//! emits its names into a shared sink, either through a channel (no
//! ordering across workers) or through a single mutex that serializes
//! every emission.

use std::sync::mpsc;
use std::sync::{Mutex, PoisonError};
use std::thread;

/// Worker count used when none is configured.
pub const DEFAULT_WORKERS: usize = 3;

/// How workers publish into the shared sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitMode {
    /// Workers send over a channel; cross-worker interleaving is arbitrary.
    Unsynchronized,
    /// Every emission (callback + append) runs under one shared lock.
    Synchronized,
}

/// Split `items` into at most `workers` contiguous chunks of
/// `ceil(len / workers)` items. A `workers` of zero is treated as one.
pub fn partition<T>(items: &[T], workers: usize) -> Vec<&[T]> {
    if items.is_empty() {
        return Vec::new();
    }
    let chunk_size = items.len().div_ceil(workers.max(1));
    items.chunks(chunk_size).collect()
}

/// Emit every name from a pool of worker threads and return the names in
/// the order they reached the sink.
///
/// `on_emit` receives the worker index and the name; it runs on the worker
/// thread and, in [`EmitMode::Synchronized`], inside the sink lock.
pub fn emit_names<F>(names: &[String], workers: usize, mode: EmitMode, on_emit: F) -> Vec<String>
where
    F: Fn(usize, &str) + Sync,
{
    match mode {
        EmitMode::Unsynchronized => emit_over_channel(names, workers, &on_emit),
        EmitMode::Synchronized => emit_under_lock(names, workers, &on_emit),
    }
}

fn emit_over_channel<F>(names: &[String], workers: usize, on_emit: &F) -> Vec<String>
where
    F: Fn(usize, &str) + Sync,
{
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for (worker, chunk) in partition(names, workers).into_iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move || {
                for name in chunk {
                    on_emit(worker, name);
                    if tx.send(name.clone()).is_err() {
                        break;
                    }
                }
            });
        }
    });

    drop(tx);
    rx.into_iter().collect()
}

fn emit_under_lock<F>(names: &[String], workers: usize, on_emit: &F) -> Vec<String>
where
    F: Fn(usize, &str) + Sync,
{
    let sink = Mutex::new(Vec::with_capacity(names.len()));

    thread::scope(|scope| {
        for (worker, chunk) in partition(names, workers).into_iter().enumerate() {
            let sink = &sink;
            scope.spawn(move || {
                for name in chunk {
                    let mut out = sink.lock().unwrap_or_else(PoisonError::into_inner);
                    on_emit(worker, name);
                    out.push(name.clone());
                }
            });
        }
    });

    sink.into_inner().unwrap_or_else(PoisonError::into_inner)
}
