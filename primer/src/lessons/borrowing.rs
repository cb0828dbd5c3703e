//! 참조와 슬라이스
//!
//! 공유 참조는 몇 개든, 가변 참조는 정확히 하나만 허용되며 둘이 동시에
//! 있을 수는 없다. 참조는 가리키는 값보다 오래 살 수 없다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;

pub struct Borrowing;

pub fn name_length(name: &str) -> usize {
    name.len()
}

pub fn append_clan_tag(name: &mut String, tag: &str) {
    name.push_str(" [");
    name.push_str(tag);
    name.push(']');
}

/// 공백으로 나눈 첫 단어. 입력에서 빌려 온다.
pub fn first_word(s: &str) -> &str {
    for (i, byte) in s.bytes().enumerate() {
        if byte == b' ' {
            return &s[..i];
        }
    }
    s
}

pub fn sum_slice(values: &[i32]) -> i32 {
    values.iter().sum()
}

/// 가변 빌림 하나로 모든 플레이어를 제자리에서 회복시킨다
pub fn heal_all(hp: &mut [u32], amount: u32, max: u32) {
    for value in hp.iter_mut() {
        *value = (*value + amount).min(max);
    }
}

impl Lesson for Borrowing {
    fn number(&self) -> u32 {
        3
    }

    fn slug(&self) -> &'static str {
        "borrowing"
    }

    fn title(&self) -> &'static str {
        "Borrowing and references"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("const std::string& ref = s;", "let r = &s; is a shared borrow"),
            (
                "int* p may be null or dangling",
                "references are never null and never outlive their referent",
            ),
            (
                "any number of non-const references may alias",
                "one &mut or any number of & at a time",
            ),
            (
                "push_back while iterating invalidates iterators at runtime",
                "mutating a Vec while iterating over it is a compile error",
            ),
            (
                "C++20 std::span<T> views a contiguous range",
                "&[T] carries its length and is bounds-checked",
            ),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Shared references");
        let name = String::from("hello");
        let len = name_length(&name);
        out.line(format!("'{}' has length {} and is still owned here", name, len));

        let x = 5;
        let r = &x;
        out.line(format!("x = {}, r = {}, *r = {}", x, r, *r));

        out.heading("Mutable references");
        let mut name = String::from("ferris");
        append_clan_tag(&mut name, "RS");
        out.line(format!("after append_clan_tag: {}", name));
        out.line("two live `&mut name` at once is error[E0499]");

        out.heading("Reference rules");
        let mut data = String::from("state");
        let r1 = &data;
        let r2 = &data;
        out.line(format!("many readers: {} and {}", r1, r2));
        let r3 = &mut data;
        r3.push_str("-updated");
        out.line(format!(
            "after the readers' last use a writer is allowed: {}",
            r3
        ));

        out.heading("Dangling references");
        out.line("returning `&s` for a local `s` fails with error[E0106]; return the String itself");

        out.heading("Slices");
        let greeting = String::from("hello world");
        out.line(format!(
            "&greeting[0..5] = {}, &greeting[6..] = {}",
            &greeting[0..5],
            &greeting[6..]
        ));
        out.line(format!("first_word = {}", first_word(&greeting)));
        let scores = [10, 20, 30, 40, 50];
        out.line(format!("sum of &scores[1..3] = {}", sum_slice(&scores[1..3])));

        let mut hp = [40, 95, 100];
        heal_all(&mut hp, 10, 100);
        out.line(format!("heal_all over &mut [u32]: {:?}", hp));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_word() {
        assert_eq!(first_word("hello world"), "hello");
        assert_eq!(first_word("single"), "single");
        assert_eq!(first_word(""), "");
    }

    #[test]
    fn test_append_clan_tag() {
        let mut name = String::from("ferris");
        append_clan_tag(&mut name, "RS");
        assert_eq!(name, "ferris [RS]");
    }

    #[test]
    fn test_sum_slice() {
        assert_eq!(sum_slice(&[1, 2, 3]), 6);
        assert_eq!(sum_slice(&[]), 0);
    }

    #[test]
    fn test_heal_all_caps_at_max() {
        let mut hp = [40, 95, 100];
        heal_all(&mut hp, 10, 100);
        assert_eq!(hp, [50, 100, 100]);
    }
}
