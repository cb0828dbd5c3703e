//! 클로저와 이터레이터. 어댑터는 게으르다. `collect`, `sum`, `for` 같은
//! 소비자가 값을 끌어당기기 전에는 아무것도 실행되지 않는다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;

pub struct Iterators;

#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    pub player: String,
    pub points: u32,
    pub online: bool,
}

impl Score {
    pub fn new(player: &str, points: u32, online: bool) -> Self {
        Self {
            player: player.to_string(),
            points,
            online,
        }
    }
}

/// `bonus` 를 값으로 캡처하는 클로저를 돌려준다
pub fn make_bonus(bonus: u32) -> impl Fn(u32) -> u32 {
    move |points| points + bonus
}

/// `FnMut`: 부를 때마다 캡처한 상태를 바꾼다
pub fn call_n_times<F: FnMut()>(n: usize, mut f: F) {
    for _ in 0..n {
        f();
    }
}

/// `FnOnce`: 캡처한 값을 밖으로 옮길 수 있어 한 번만 실행된다
pub fn consume<F: FnOnce() -> String>(f: F) -> String {
    f()
}

/// 점수가 `min` 이상인 접속 중 플레이어 이름. 높은 순.
pub fn online_leaders(scores: &[Score], min: u32) -> Vec<String> {
    let mut leaders: Vec<&Score> = scores
        .iter()
        .filter(|s| s.online && s.points >= min)
        .collect();
    leaders.sort_by(|a, b| b.points.cmp(&a.points));
    leaders.into_iter().map(|s| s.player.clone()).collect()
}

pub fn total_points(scores: &[Score]) -> u32 {
    scores.iter().map(|s| s.points).sum()
}

/// 0 까지 틱을 거꾸로 센다. 예: 라운드 시작 카운트다운
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: u32,
}

impl Countdown {
    pub fn new(from: u32) -> Self {
        Self { remaining: from }
    }
}

impl Iterator for Countdown {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.remaining;
        self.remaining -= 1;
        Some(current)
    }
}

impl Lesson for Iterators {
    fn number(&self) -> u32 {
        11
    }

    fn slug(&self) -> &'static str {
        "iterators"
    }

    fn title(&self) -> &'static str {
        "Iterators and closures"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("C++20 ranges views are lazy", "iterator adapters are lazy until consumed"),
            ("v | std::views::transform(f) | std::views::filter(p)", "v.iter().map(f).filter(p)"),
            (
                "lambda capture lists [=] and [&]",
                "closures borrow by default and `move` takes ownership",
            ),
            ("std::function for any callable", "the Fn, FnMut and FnOnce traits"),
            ("std::accumulate", "fold and sum"),
            ("std::views::zip (C++23)", "zip and enumerate"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Closures");
        let double = |x: u32| x * 2;
        let threshold = 50;
        let is_high = |points: u32| points > threshold;
        out.line(format!(
            "double(21) = {}, is_high(60) = {} (captures threshold = {})",
            double(21),
            is_high(60),
            threshold
        ));
        let with_bonus = make_bonus(10);
        out.line(format!("make_bonus(10)(5) = {}", with_bonus(5)));

        out.heading("Fn, FnMut, FnOnce");
        let mut ticks = 0;
        call_n_times(3, || ticks += 1);
        out.line(format!("FnMut closure counted {} ticks", ticks));
        let farewell = String::from("server shutting down");
        let message = consume(move || farewell);
        out.line(format!("FnOnce moved its capture out: {}", message));

        out.heading("Iterator basics");
        let pings = vec![40, 80, 120];
        let mut iter = pings.iter();
        out.line(format!(
            "next() = {:?}, {:?}, {:?}, {:?}",
            iter.next(),
            iter.next(),
            iter.next(),
            iter.next()
        ));

        out.heading("Adaptors");
        let scores = vec![
            Score::new("ferris", 120, true),
            Score::new("corro", 90, false),
            Score::new("crab", 75, true),
            Score::new("shell", 20, true),
        ];
        out.line(format!("online leaders >= 50: {:?}", online_leaders(&scores, 50)));
        let ranked: Vec<String> = scores
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}:{}", i + 1, s.player))
            .take(2)
            .collect();
        out.line(format!("enumerate + map + take: {:?}", ranked));

        out.heading("Consumers");
        out.line(format!("sum {}", total_points(&scores)));
        out.line(format!(
            "fold average {:.1}",
            scores.iter().fold(0.0, |acc, s| acc + s.points as f32) / scores.len() as f32
        ));
        out.line(format!(
            "any offline {}, all positive {}",
            scores.iter().any(|s| !s.online),
            scores.iter().all(|s| s.points > 0)
        ));
        out.line(format!(
            "max_by_key {:?}",
            scores.iter().max_by_key(|s| s.points).map(|s| &s.player)
        ));

        out.heading("Custom iterator");
        let countdown: Vec<u32> = Countdown::new(3).collect();
        out.line(format!("Countdown::new(3) yields {:?}", countdown));
        let even_sum: u32 = Countdown::new(10).filter(|n| n % 2 == 0).sum();
        out.line(format!("adaptors work on it too: even sum {}", even_sum));
        Ok(())
    }
}
