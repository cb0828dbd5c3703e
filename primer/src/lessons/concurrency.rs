//! 스레드, 채널, 공유 상태
//!
//! 데이터 레이스는 컴파일 에러다. 값은 `Send` 일 때만 스레드를 건너가고
//! `Sync` 일 때만 공유된다. 락은 drop 될 때 풀린다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use std::collections::HashMap;
use std::sync::mpsc;
use std::sync::{Arc, Mutex, RwLock};
use std::thread;

pub struct Concurrency;

const CHAPTER: u32 = 13;

fn worker_panicked() -> PrimerError {
    PrimerError::Lesson {
        chapter: CHAPTER,
        message: "worker thread panicked".to_string(),
    }
}

fn lock_poisoned() -> PrimerError {
    PrimerError::Lesson {
        chapter: CHAPTER,
        message: "lock poisoned by a panicking thread".to_string(),
    }
}

/// `values` 를 `workers` 개의 스코프 스레드로 나눠 더한다
pub fn parallel_sum(values: &[u64], workers: usize) -> Result<u64, PrimerError> {
    if values.is_empty() {
        return Ok(0);
    }
    let chunk = values.len().div_ceil(workers.max(1));
    thread::scope(|scope| {
        let handles: Vec<_> = values
            .chunks(chunk)
            .map(|part| scope.spawn(move || part.iter().sum::<u64>()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().map_err(|_| worker_panicked()))
            .sum()
    })
}

/// `Arc<Mutex<_>>` 로 여러 스레드가 카운터 하나를 올린다
pub fn shared_counter(threads: usize, increments: usize) -> Result<usize, PrimerError> {
    let counter = Arc::new(Mutex::new(0));
    let mut handles = Vec::with_capacity(threads);

    for _ in 0..threads {
        let counter = Arc::clone(&counter);
        handles.push(thread::spawn(move || -> Result<(), PrimerError> {
            for _ in 0..increments {
                let mut value = counter.lock().map_err(|_| lock_poisoned())?;
                *value += 1;
            }
            Ok(())
        }));
    }
    for handle in handles {
        handle.join().map_err(|_| worker_panicked())??;
    }

    counter.lock().map(|v| *v).map_err(|_| lock_poisoned())
}

/// 여러 생산자가 채널 하나로 이벤트를 보낸다
pub fn collect_events(producers: u32, events_each: u32) -> Vec<String> {
    let (tx, rx) = mpsc::channel();

    for id in 0..producers {
        let tx = tx.clone();
        thread::spawn(move || {
            for n in 0..events_each {
                if tx.send(format!("worker {} event {}", id, n)).is_err() {
                    break;
                }
            }
        });
    }
    // 송신자가 모두 사라지면 수신 루프가 끝난다
    drop(tx);

    let mut events: Vec<String> = rx.iter().collect();
    events.sort();
    events
}

/// 읽기는 많고 쓰기는 가끔
pub fn read_heavy_config(readers: usize) -> Result<Vec<u32>, PrimerError> {
    let config = Arc::new(RwLock::new(HashMap::from([("tick_rate", 30u32)])));

    config
        .write()
        .map_err(|_| lock_poisoned())?
        .insert("tick_rate", 60);

    let handles: Vec<_> = (0..readers)
        .map(|_| {
            let config = Arc::clone(&config);
            thread::spawn(move || -> Result<u32, PrimerError> {
                let guard = config.read().map_err(|_| lock_poisoned())?;
                Ok(guard.get("tick_rate").copied().unwrap_or(0))
            })
        })
        .collect();

    handles
        .into_iter()
        .map(|h| h.join().map_err(|_| worker_panicked())?)
        .collect()
}

impl Lesson for Concurrency {
    fn number(&self) -> u32 {
        CHAPTER
    }

    fn slug(&self) -> &'static str {
        "concurrency"
    }

    fn title(&self) -> &'static str {
        "Concurrency"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "std::thread t([] { ... }); t.join();",
                "thread::spawn(move || ...).join() returns the result",
            ),
            (
                "data races are undefined behaviour",
                "Send and Sync turn data races into compile errors",
            ),
            (
                "std::shared_ptr plus a separate std::mutex",
                "Arc<Mutex<T>>, where the lock owns the data",
            ),
            ("std::lock_guard<std::mutex>", "MutexGuard, released on drop"),
            ("std::shared_mutex", "RwLock"),
            ("no standard channel", "std::sync::mpsc channels"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Spawning threads");
        let handle = thread::spawn(|| (1..=10).sum::<u32>());
        let result = handle.join().map_err(|_| worker_panicked())?;
        out.line(format!("join() returns the thread's result: {}", result));

        out.heading("move closures");
        let roster = vec!["ann", "bo"];
        let handle = thread::spawn(move || roster.len());
        let players = handle.join().map_err(|_| worker_panicked())?;
        out.line(format!("the thread owns the roster it moved in: {} players", players));
        out.line("without `move`, borrowing roster fails with error[E0373]");

        out.heading("Scoped threads");
        let values: Vec<u64> = (1..=100).collect();
        out.line(format!(
            "thread::scope may borrow locals: parallel sum {}",
            parallel_sum(&values, 4)?
        ));

        out.heading("Channels");
        let events = collect_events(3, 2);
        out.line(format!("{} events from 3 producers, first {:?}", events.len(), events.first()));

        out.heading("Shared state");
        out.line(format!(
            "Arc<Mutex<usize>> across 8 threads x 1000: {}",
            shared_counter(8, 1000)?
        ));

        out.heading("RwLock");
        let seen = read_heavy_config(4)?;
        out.line(format!("readers all see the write: {:?}", seen));

        out.heading("Send and Sync");
        out.line("Rc<T> is neither Send nor Sync; moving it into thread::spawn is a compile error");
        out.line("Arc<T> is Send + Sync when T is; Mutex<T> makes T: Send shareable");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_sum() {
        let values: Vec<u64> = (1..=1000).collect();
        assert_eq!(parallel_sum(&values, 4).unwrap(), 500500);
        assert_eq!(parallel_sum(&values, 0).unwrap(), 500500);
        assert_eq!(parallel_sum(&[], 3).unwrap(), 0);
        assert_eq!(parallel_sum(&[7], 16).unwrap(), 7);
    }

    #[test]
    fn test_shared_counter() {
        assert_eq!(shared_counter(4, 250).unwrap(), 1000);
        assert_eq!(shared_counter(0, 10).unwrap(), 0);
    }

    #[test]
    fn test_worker_panic_is_an_error() {
        let err = thread::spawn(|| -> u32 { panic!("tick overrun") })
            .join()
            .map_err(|_| worker_panicked())
            .unwrap_err();
        assert!(matches!(err, PrimerError::Lesson { chapter: 13, .. }));
    }

    #[test]
    fn test_poisoned_lock_is_an_error() {
        let counter = Arc::new(Mutex::new(0u32));
        let poisoner = Arc::clone(&counter);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("holding the lock");
        })
        .join();

        let result = counter.lock().map(|v| *v).map_err(|_| lock_poisoned());
        assert!(matches!(
            result,
            Err(PrimerError::Lesson { ref message, .. }) if message.contains("poisoned")
        ));
    }

    #[test]
    fn test_collect_events() {
        let events = collect_events(2, 3);
        assert_eq!(events.len(), 6);
        assert_eq!(events[0], "worker 0 event 0");
    }

    #[test]
    fn test_read_heavy_config() {
        assert_eq!(read_heavy_config(3).unwrap(), vec![60, 60, 60]);
    }
}
