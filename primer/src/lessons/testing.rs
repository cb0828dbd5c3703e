//! 테스트는 코드 옆의 `#[cfg(test)]` 모듈에 두고 통합 테스트는 `tests/` 에
//! 둔다. `cargo test` 는 둘 다 돌리고 문서 테스트도 돌린다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;

pub struct Testing;

pub fn add(a: i32, b: i32) -> i32 {
    a + b
}

pub fn subtract(a: i32, b: i32) -> i32 {
    a - b
}

/// ```
/// assert_eq!(primer::lessons::testing::divide(9, 3), 3);
/// ```
///
/// # Panics
///
/// `divisor` 가 0 이면 패닉한다.
pub fn divide(dividend: i32, divisor: i32) -> i32 {
    if divisor == 0 {
        panic!("division by zero");
    }
    dividend / divisor
}

pub fn is_even(value: i32) -> bool {
    value % 2 == 0
}

impl Lesson for Testing {
    fn number(&self) -> u32 {
        19
    }

    fn slug(&self) -> &'static str {
        "testing"
    }

    fn title(&self) -> &'static str {
        "Testing"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "GoogleTest or Catch2 as external frameworks",
                "#[test] is built into the language and cargo",
            ),
            (
                "separate test executables per framework",
                "cargo test runs unit, integration and doc tests",
            ),
            ("EXPECT_DEATH or EXPECT_THROW", "#[should_panic(expected = ...)]"),
            (
                "tests in a separate source tree",
                "unit tests in a #[cfg(test)] module, integration tests in tests/",
            ),
            ("the DISABLED_ name prefix", "#[ignore]"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Functions under test");
        out.line(format!("add(2, 3) = {}", add(2, 3)));
        out.line(format!("subtract(10, 4) = {}", subtract(10, 4)));
        out.line(format!("divide(9, 3) = {}", divide(9, 3)));
        out.line(format!("is_even(4) = {}", is_even(4)));

        out.heading("Attributes");
        out.line("#[test] marks a test function");
        out.line("#[should_panic(expected = \"...\")] passes only if the body panics with that message");
        out.line("#[ignore] skips a slow test unless run with `cargo test -- --ignored`");
        out.line("a test returning Result<(), E> fails when it returns Err");

        out.heading("Running");
        out.line("cargo test                 runs every test in the workspace");
        out.line("cargo test <test_name>     runs tests whose name contains the filter");
        out.line("cargo test -- --nocapture  shows println! output from passing tests");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        assert_eq!(add(2, 2), 4);
        assert_eq!(add(-1, 1), 0);
    }

    #[test]
    fn test_subtract() {
        assert_eq!(subtract(5, 7), -2);
    }

    #[test]
    fn test_is_even() {
        assert!(is_even(0));
        assert!(!is_even(-3));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn test_divide_by_zero() {
        divide(1, 0);
    }

    #[test]
    fn test_divide_with_result() -> Result<(), String> {
        if divide(10, 2) == 5 {
            Ok(())
        } else {
            Err("10 / 2 should be 5".to_string())
        }
    }

    #[test]
    #[ignore]
    fn test_large_sum() {
        let total: i64 = (0..10_000_000i64).sum();
        assert_eq!(total, 49_999_995_000_000);
    }
}
