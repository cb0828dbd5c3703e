//! `async fn` 은 poll 되기 전에는 아무것도 하지 않는 future 를 돌려준다.
//! 런타임 (여기서는 tokio) 이 future 를 poll 하고, 타이머와 소켓에 걸어 두었다가
//! 진행할 수 있을 때 깨운다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use rand::Rng;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinError;
use tokio::time::{self, error::Elapsed};

pub struct AsyncAwait;

pub async fn add_async(a: i32, b: i32) -> i32 {
    a + b
}

/// 저장소에서 플레이어 프로필을 읽는 척한다
pub async fn fetch_player(id: u32, delay_ms: u64) -> String {
    time::sleep(Duration::from_millis(delay_ms)).await;
    format!("player-{}", id)
}

/// 두 조회를 동시에 기다린다. 걸리는 시간은 느린 쪽이다.
pub async fn fetch_pair(first: u32, second: u32) -> (String, String) {
    tokio::join!(fetch_player(first, 5), fetch_player(second, 5))
}

/// 작업자마다 태스크 하나를 띄우고 띄운 순서대로 결과를 모은다
pub async fn spawn_workers(workers: u32) -> Result<Vec<u32>, JoinError> {
    let handles: Vec<_> = (0..workers)
        .map(|id| {
            tokio::spawn(async move {
                time::sleep(Duration::from_millis(1)).await;
                id * id
            })
        })
        .collect();

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await?);
    }
    Ok(results)
}

/// 생산자 태스크가 drop 될 때까지 크기 제한 채널을 채운다
pub async fn pipeline(count: u32) -> Vec<u32> {
    let (tx, mut rx) = mpsc::channel(4);
    tokio::spawn(async move {
        for tick in 1..=count {
            if tx.send(tick).await.is_err() {
                break;
            }
        }
    });

    let mut received = Vec::new();
    while let Some(tick) = rx.recv().await {
        received.push(tick);
    }
    received
}

/// 먼저 끝난 갈래가 이기고 다른 future 는 drop 된다
pub async fn first_response(fast_ms: u64, slow_ms: u64) -> &'static str {
    tokio::select! {
        _ = time::sleep(Duration::from_millis(fast_ms)) => "fast",
        _ = time::sleep(Duration::from_millis(slow_ms)) => "slow",
    }
}

pub async fn with_deadline(work_ms: u64, limit_ms: u64) -> Result<u64, Elapsed> {
    time::timeout(Duration::from_millis(limit_ms), async {
        time::sleep(Duration::from_millis(work_ms)).await;
        work_ms
    })
    .await
}

/// 작은 무작위 지연만큼 자고 걸린 시간을 알려 준다
pub async fn simulate_latency() -> Duration {
    let jitter = rand::thread_rng().gen_range(1..=3);
    let started = Instant::now();
    time::sleep(Duration::from_millis(jitter)).await;
    started.elapsed()
}

pub async fn might_fail(fail: bool) -> Result<u32, String> {
    if fail {
        Err("match server unavailable".to_string())
    } else {
        Ok(7)
    }
}

async fn demo(out: &mut Transcript) -> Result<(), PrimerError> {
    out.heading("async fn");
    out.line(format!("add_async(2, 3).await = {}", add_async(2, 3).await));
    let lazy = add_async(1, 1);
    out.line("a future created without .await has not run yet");
    out.line(format!("awaiting it later yields {}", lazy.await));

    out.heading("Concurrent awaits");
    let started = Instant::now();
    let (a, b) = fetch_pair(1, 2).await;
    out.line(format!(
        "join! fetched {} and {} in about one delay ({}ms)",
        a,
        b,
        started.elapsed().as_millis()
    ));

    out.heading("Tasks");
    let squares = spawn_workers(4).await.map_err(|e| PrimerError::Lesson {
        chapter: 17,
        message: e.to_string(),
    })?;
    out.line(format!("tokio::spawn workers returned {:?}", squares));
    out.line(format!("mpsc pipeline delivered {:?}", pipeline(5).await));

    out.heading("select! and timeouts");
    out.line(format!("select! picked the {} branch", first_response(1, 50).await));
    match with_deadline(50, 5).await {
        Ok(ms) => out.line(format!("finished in {}ms", ms)),
        Err(_) => out.line("timeout(5ms) cancelled the 50ms job"),
    }
    if let Ok(ms) = with_deadline(1, 50).await {
        out.line(format!("timeout(50ms) let the {}ms job finish", ms));
    }

    out.heading("Errors");
    match might_fail(true).await {
        Ok(value) => out.line(format!("got {}", value)),
        Err(e) => out.line(format!("async errors use Result as usual: {}", e)),
    }
    let latency = simulate_latency().await;
    out.line(format!("simulated latency at least 1ms: {}", latency >= Duration::from_millis(1)));
    Ok(())
}

impl Lesson for AsyncAwait {
    fn number(&self) -> u32 {
        17
    }

    fn slug(&self) -> &'static str {
        "async_await"
    }

    fn title(&self) -> &'static str {
        "Async/Await"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "C++20 coroutines with co_await",
                "async fn returns impl Future and is driven by .await",
            ),
            (
                "the coroutine runtime comes from a library",
                "no built-in runtime; tokio drives the futures",
            ),
            ("std::async starts work eagerly", "futures are lazy until polled"),
            ("std::future::get blocks the thread", ".await yields the task back to the executor"),
            ("no standard select over futures", "tokio::select! and join!"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        // 다른 런타임 안에서 부르면 안 된다
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        runtime.block_on(demo(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_async_with_block_on() {
        assert_eq!(tokio_test::block_on(add_async(20, 22)), 42);
    }

    #[test]
    fn test_might_fail() {
        assert_eq!(tokio_test::block_on(might_fail(false)), Ok(7));
        assert!(tokio_test::block_on(might_fail(true)).is_err());
    }

    #[tokio::test]
    async fn test_fetch_pair() {
        let (a, b) = fetch_pair(3, 4).await;
        assert_eq!(a, "player-3");
        assert_eq!(b, "player-4");
    }

    #[tokio::test]
    async fn test_spawn_workers_keeps_order() {
        assert_eq!(spawn_workers(4).await.unwrap(), vec![0, 1, 4, 9]);
    }

    #[tokio::test]
    async fn test_pipeline_delivers_everything() {
        assert_eq!(pipeline(10).await, (1..=10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_select_and_timeout() {
        assert_eq!(first_response(1, 200).await, "fast");
        assert!(with_deadline(200, 5).await.is_err());
        assert_eq!(with_deadline(1, 200).await.unwrap(), 1);
    }

    #[test]
    fn test_run_builds_its_own_runtime() {
        let mut out = Transcript::new(17, "Async/Await");
        AsyncAwait.run(&mut out).unwrap();
        assert!(out.contains("mpsc pipeline delivered [1, 2, 3, 4, 5]"));
        assert!(out.contains("select! picked the fast branch"));
    }
}
