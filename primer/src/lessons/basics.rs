//! 바인딩, 스칼라 타입, 식 중심의 제어 흐름

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;

pub struct Basics;

/// Hz 단위 틱 속도에서 틱 사이의 밀리초
pub fn tick_interval_ms(tick_rate: u32) -> u64 {
    if tick_rate == 0 {
        return 0;
    }
    1000 / tick_rate as u64
}

/// `match` 는 식이다. 범위 패턴 덕에 갈래가 표처럼 읽힌다.
pub fn classify_latency(ms: u32) -> &'static str {
    match ms {
        0..=30 => "excellent",
        31..=80 => "good",
        81..=150 => "playable",
        _ => "lagging",
    }
}

/// 섀도잉으로 다듬은 값과 파싱한 값이 이름 하나를 다시 쓴다
pub fn parse_port(input: &str) -> u16 {
    let input = input.trim();
    let input = input.strip_prefix(':').unwrap_or(input);
    input.parse().unwrap_or(8080)
}

pub fn total_score(scores: &[u32]) -> u32 {
    let mut total = 0;
    for score in scores {
        total += score;
    }
    total
}

/// `target` 이 든 첫 칸을 찾고 두 루프를 한 번에 빠져나간다
pub fn find_in_grid(grid: &[Vec<u8>], target: u8) -> Option<(usize, usize)> {
    let mut found = None;
    'rows: for (y, row) in grid.iter().enumerate() {
        for (x, cell) in row.iter().enumerate() {
            if *cell == target {
                found = Some((x, y));
                break 'rows;
            }
        }
    }
    found
}

impl Lesson for Basics {
    fn number(&self) -> u32 {
        1
    }

    fn slug(&self) -> &'static str {
        "basics"
    }

    fn title(&self) -> &'static str {
        "Basics"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "auto x = 5; is mutable unless declared const",
                "let x = 5; is immutable unless declared `let mut`",
            ),
            (
                "implicit narrowing from int to char or short",
                "no implicit numeric conversion; `as` or TryFrom is spelled out",
            ),
            (
                "signed overflow is undefined behaviour",
                "overflow panics in debug builds; wrapping_ and checked_ ops are explicit",
            ),
            (
                "if and switch are statements",
                "if, match and blocks are expressions that yield values",
            ),
            ("constexpr for compile-time values", "const is always evaluated at compile time"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Bindings");
        let max_players = 16;
        let mut connected = 3;
        connected += 1;
        out.line(format!(
            "immutable max_players = {}, mutable connected = {}",
            max_players, connected
        ));
        let port = parse_port(" :7777 ");
        out.line(format!("shadowed input parsed to port {}", port));

        out.heading("Scalar types");
        let tick: u32 = 60;
        let gravity: f32 = 980.0;
        let alive: bool = true;
        let marker: char = '★';
        out.line(format!(
            "u32 {}, f32 {}, bool {}, char {} ({} bytes in UTF-8)",
            tick,
            gravity,
            alive,
            marker,
            marker.len_utf8()
        ));
        out.line(format!(
            "u8 overflow is explicit: 250u8.checked_add(10) = {:?}, wrapping_add = {}",
            250u8.checked_add(10),
            250u8.wrapping_add(10)
        ));

        out.heading("Control flow as expressions");
        let interval = tick_interval_ms(tick);
        out.line(format!("{} Hz means a tick every {} ms", tick, interval));
        let status = if connected >= max_players { "full" } else { "open" };
        out.line(format!("lobby is {}", status));
        for ms in [12, 95, 300] {
            out.line(format!("{} ms ping is {}", ms, classify_latency(ms)));
        }
        out.line(format!("total score {}", total_score(&[120, 80, 45])));

        let grid = vec![vec![0, 0, 0], vec![0, 7, 0]];
        out.line(format!("labeled break finds 7 at {:?}", find_in_grid(&grid, 7)));

        let mut countdown = 3;
        let launched = loop {
            countdown -= 1;
            if countdown == 0 {
                break "match started";
            }
        };
        out.line(format!("loop returns a value: {}", launched));
        Ok(())
    }
}
