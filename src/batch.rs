//! Parallel transcription of many requests.
//!
//! A feeder thread pushes indexed requests into a bounded crossbeam channel,
//! a pool of workers routes them, and results are reassembled in request
//! order. The router is shared read-only, so workers need no locking.

use crate::defaults;
use crate::error::{PhonoscribeError, Result};
use crate::router::{TranscriptionRequest, TranscriptionResult, TranscriptionRouter};
use crossbeam_channel::bounded;
use std::thread;

/// Route every request on up to `workers` threads.
///
/// Returns one result per request, in the same order as `requests`. A
/// request that fails does not stop the others. `workers` is clamped to
/// `1..=requests.len()`.
pub fn transcribe_batch(
    router: &TranscriptionRouter,
    requests: Vec<TranscriptionRequest>,
    workers: usize,
) -> Vec<Result<TranscriptionResult>> {
    let total = requests.len();
    if total == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, total);
    tracing::debug!(requests = total, workers, "starting batch transcription");

    let (job_tx, job_rx) =
        bounded::<(usize, TranscriptionRequest)>(defaults::BATCH_QUEUE_CAPACITY);
    let (result_tx, result_rx) =
        bounded::<(usize, Result<TranscriptionResult>)>(defaults::BATCH_QUEUE_CAPACITY);

    let mut slots: Vec<Option<Result<TranscriptionResult>>> = (0..total).map(|_| None).collect();

    thread::scope(|scope| {
        scope.spawn(move || {
            for job in requests.into_iter().enumerate() {
                if job_tx.send(job).is_err() {
                    // All workers gone
                    break;
                }
            }
        });

        for _ in 0..workers {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();
            scope.spawn(move || {
                while let Ok((index, request)) = job_rx.recv() {
                    let result = router.route(&request);
                    if result_tx.send((index, result)).is_err() {
                        break;
                    }
                }
            });
        }
        // Workers hold the remaining handles; the result loop ends when they exit.
        drop(job_rx);
        drop(result_tx);

        for (index, result) in result_rx.iter() {
            slots[index] = Some(result);
        }
    });

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| {
            slot.unwrap_or_else(|| {
                Err(PhonoscribeError::Other(format!(
                    "batch worker produced no result for request {}",
                    index
                )))
            })
        })
        .collect()
}
