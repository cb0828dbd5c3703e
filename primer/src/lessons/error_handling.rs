//! 에러는 값이다. 복구할 수 있는 실패는 `Result` 로 돌려주고 `?` 가 전파하며,
//! `panic!` 은 처리할 수 없는 버그에만 쓴다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use std::collections::HashMap;
use std::num::ParseIntError;
use thiserror::Error;

pub struct ErrorHandling;

pub fn parse_port(text: &str) -> Result<u16, ParseIntError> {
    text.trim().parse::<u16>()
}

pub fn checked_divide(a: i32, b: i32) -> Result<i32, String> {
    if b == 0 {
        Err("division by zero".to_string())
    } else {
        Ok(a / b)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("line {line}: expected `key = value`")]
    Syntax { line: usize },

    #[error("missing required key `{0}`")]
    Missing(&'static str),

    #[error("invalid port: {0}")]
    Port(#[from] ParseIntError),

    #[error("max_players must be between 1 and {max}, got {got}")]
    OutOfRange { got: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub max_players: u32,
    pub name: String,
}

/// `key = value` 줄을 읽는다. 모든 실패는 `?` 로 전파된다.
pub fn load_config(text: &str) -> Result<ServerConfig, ConfigError> {
    let mut values = HashMap::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .ok_or(ConfigError::Syntax { line: idx + 1 })?;
        values.insert(key.trim().to_string(), value.trim().to_string());
    }

    let port = values.get("port").ok_or(ConfigError::Missing("port"))?;
    let port = parse_port(port)?;

    let max_players = match values.get("max_players") {
        Some(v) => v
            .parse::<u32>()
            .map_err(|_| ConfigError::OutOfRange { got: 0, max: 64 })?,
        None => 16,
    };
    if max_players == 0 || max_players > 64 {
        return Err(ConfigError::OutOfRange {
            got: max_players,
            max: 64,
        });
    }

    let name = values
        .get("name")
        .cloned()
        .unwrap_or_else(|| "arena".to_string());

    Ok(ServerConfig {
        port,
        max_players,
        name,
    })
}

/// `Option` 과 `Result` 사이를 오간다
pub fn lookup_score(scores: &HashMap<String, u32>, player: &str) -> Result<u32, String> {
    scores
        .get(player)
        .copied()
        .ok_or_else(|| format!("no score for {}", player))
}

impl Lesson for ErrorHandling {
    fn number(&self) -> u32 {
        9
    }

    fn slug(&self) -> &'static str {
        "error_handling"
    }

    fn title(&self) -> &'static str {
        "Error handling"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "exceptions unwind through any caller",
                "Result<T, E> appears in the signature; there are no exceptions",
            ),
            ("std::expected<T, E> (C++23) or error codes", "Result with ? propagation"),
            ("abort() or an uncaught throw", "panic! for unrecoverable bugs"),
            ("nullptr for a missing value", "Option<T>"),
            ("custom exception hierarchies", "error enums converted by From for ?"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("panic!");
        let slots = [1, 2, 3];
        out.line(format!(
            "slots[99] would panic; slots.get(99) returns {:?}",
            slots.get(99)
        ));
        out.line("panics unwind the thread and are meant for broken invariants, not bad input");

        out.heading("Result basics");
        match parse_port("7777") {
            Ok(port) => out.line(format!("parsed port {}", port)),
            Err(e) => out.line(format!("parse failed: {}", e)),
        }
        match parse_port("seventy") {
            Ok(port) => out.line(format!("parsed port {}", port)),
            Err(e) => out.line(format!("parse failed: {}", e)),
        }

        out.heading("Result combinators");
        out.line(format!(
            "checked_divide(10, 2).map(|v| v * 3) = {:?}",
            checked_divide(10, 2).map(|v| v * 3)
        ));
        out.line(format!(
            "checked_divide(1, 0).unwrap_or(-1) = {}",
            checked_divide(1, 0).unwrap_or(-1)
        ));
        out.line(format!(
            "and_then chains fallible steps: {:?}",
            checked_divide(100, 5).and_then(|v| checked_divide(v, 0))
        ));

        out.heading("The ? operator");
        let config = load_config("port = 9000\nmax_players = 8\n");
        out.line(format!("valid config: {:?}", config));
        for broken in ["max_players = 8", "port = 70000", "port 9000", "port = 1\nmax_players = 100"] {
            match load_config(broken) {
                Ok(config) => out.line(format!("unexpectedly valid: {:?}", config)),
                Err(e) => out.line(format!("rejected: {}", e)),
            }
        }

        out.heading("Option and Result conversion");
        let mut scores = HashMap::new();
        scores.insert("ferris".to_string(), 42);
        out.line(format!("ok_or_else: {:?}", lookup_score(&scores, "ghost")));
        out.line(format!(
            ".ok() drops the error: {:?}",
            lookup_score(&scores, "ferris").ok()
        ));
        Ok(())
    }
}
