use crossbeam_channel::RecvError;
use log::trace;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

/// Number of jobs handed out per thread before their results are folded.
const JOBS_IN_FLIGHT_PER_THREAD: u64 = 2;

/// Run `runner` for jobs `0..jobs` on all CPUs and pass the results to `fold`.
///
/// `fold` sees the results in job order, regardless of which thread
/// happened to compute them. New jobs are only handed out as earlier
/// results are folded, so at most a few results per thread are held at
/// any time.
pub fn compute_parallel<T, TRunner, TFold>(runner: TRunner, jobs: u64, mut fold: TFold)
where
    T: Send,
    TRunner: Fn(u64) -> T + Send + Copy,
    TFold: FnMut(T),
{
    let nthreads = num_cpus::get().min(jobs.max(1) as usize);
    let window = JOBS_IN_FLIGHT_PER_THREAD * nthreads as u64;
    trace!(target: "croc", "randomized, {jobs} jobs, {nthreads} threads");
    thread::scope(|scope| {
        let (s1, r1) = crossbeam_channel::unbounded::<u64>();
        let (s2, r2) = crossbeam_channel::unbounded();
        for _ in 0..nthreads {
            let r1 = r1.clone();
            let s2 = s2.clone();
            scope.spawn(move || {
                loop {
                    match r1.recv() {
                        Ok(job) => {
                            // a panic is passed on to the folding thread so that it stops waiting
                            let result = panic::catch_unwind(AssertUnwindSafe(|| runner(job)));
                            if s2.send((job, result)).is_err() {
                                break;
                            }
                        }
                        Err(RecvError) => break,
                    }
                }
            });
        }
        drop(s2);
        let mut sent = 0;
        while sent < jobs.min(window) {
            s1.send(sent).expect("workers are alive");
            sent += 1;
        }
        let mut pending = HashMap::new();
        let mut next = 0;
        while next < jobs {
            let (job, result) = r2.recv().expect("every job produces a result");
            pending.insert(job, result);
            while let Some(result) = pending.remove(&next) {
                fold(result.unwrap_or_else(|e| panic::resume_unwind(e)));
                next += 1;
                if sent < jobs {
                    s1.send(sent).expect("workers are alive");
                    sent += 1;
                }
            }
        }
        drop(s1);
    });
}
