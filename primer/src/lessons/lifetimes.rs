//! 수명: 컴파일러가 모든 참조가 얼마나 오래 유효한지 추적한다.
//!
//! 대부분의 수명은 생략 규칙으로 추론된다:
//! 1. 참조 매개변수마다 자기 수명을 받는다
//! 2. 입력 수명이 하나면 모든 출력에 그 수명이 붙는다
//! 3. `&self` 가 있으면 출력은 `self` 에서 빌린다

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;

pub struct Lifetimes;

pub static SERVER_BANNER: &str = "arena-server v0.1";

/// 결과는 두 입력 중 짧은 쪽만큼 산다
pub fn longest<'a>(x: &'a str, y: &'a str) -> &'a str {
    if x.len() >= y.len() {
        x
    } else {
        y
    }
}

/// 결과로 흘러가는 것은 `x` 뿐이라 `y` 는 같은 수명이 필요 없다
pub fn first<'a>(x: &'a str, _y: &str) -> &'a str {
    x
}

/// `/kick bob` 같은 채팅 명령을 이름과 인자로 나눈다
pub fn split_command(line: &str) -> Option<(&str, &str)> {
    let body = line.strip_prefix('/')?;
    match body.split_once(' ') {
        Some((name, rest)) => Some((name, rest.trim())),
        None => Some((body, "")),
    }
}

/// 채팅 기록 일부를 빌려 쓰는 구조체
#[derive(Debug)]
pub struct Excerpt<'a> {
    pub part: &'a str,
}

impl<'a> Excerpt<'a> {
    pub fn from_log(log: &'a str) -> Option<Self> {
        log.split('.').next().map(|part| Excerpt { part: part.trim() })
    }

    pub fn level(&self) -> i32 {
        3
    }

    /// 생략 규칙 3: 출력은 `announcement` 가 아니라 `self` 에서 빌린다
    pub fn announce_and_return_part(&self, announcement: &str) -> &str {
        let _ = announcement;
        self.part
    }
}

impl Lesson for Lifetimes {
    fn number(&self) -> u32 {
        4
    }

    fn slug(&self) -> &'static str {
        "lifetimes"
    }

    fn title(&self) -> &'static str {
        "Lifetimes"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "no lifetime concept; dangling references compile",
                "the borrow checker tracks the lifetime of every reference",
            ),
            (
                "returning a reference to a local is undefined behaviour",
                "returning a reference to a local is a compile error",
            ),
            (
                "a std::string_view member may outlive its buffer",
                "a struct holding &'a str cannot outlive 'a",
            ),
            (
                "lifetime rules live in documentation",
                "elision infers most lifetimes and annotations state the rest",
            ),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Why lifetimes exist");
        let r;
        {
            let x = 5;
            r = x;
        }
        out.line(format!(
            "copying out of an inner scope is fine ({}); borrowing `&x` there is error[E0597]",
            r
        ));

        out.heading("Annotations");
        let a = String::from("long player name");
        let result;
        {
            let b = String::from("short");
            result = longest(a.as_str(), b.as_str()).to_string();
        }
        out.line(format!("longest = {}", result));
        out.line(format!("first ignores its second argument: {}", first("kept", "ignored")));
        if let Some((name, arg)) = split_command("/kick bob") {
            out.line(format!("split_command(\"/kick bob\") = ({}, {})", name, arg));
        }

        out.heading("Lifetimes in structs");
        let log = String::from("Player joined. Player left.");
        if let Some(excerpt) = Excerpt::from_log(&log) {
            out.line(format!(
                "Excerpt borrows \"{}\" (level {}) and cannot outlive `log`",
                excerpt.announce_and_return_part("note"),
                excerpt.level()
            ));
        }

        out.heading("'static");
        out.line(format!(
            "string literals live for the whole program: {}",
            SERVER_BANNER
        ));
        Ok(())
    }
}
