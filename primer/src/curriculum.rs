//! 장 목록과 실행기
//!
//! [`Curriculum`] 은 가르치는 순서대로 장을 가진다. 장은 번호 (`7`) 나 슬러그
//! (`traits`) 로 고르고, 실행할 때마다 장마다 [`Transcript`] 하나가 나온다.
//! 모든 장의 기록은 C++20 비교 절로 끝난다.

use crate::lessons;
use crate::transcript::Transcript;
use log::{debug, info};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrimerError {
    #[error("unknown chapter `{0}`; use --list to see the available chapters")]
    UnknownChapter(String),

    #[error("chapter {chapter} failed: {message}")]
    Lesson { chapter: u32, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 모든 기록의 마지막 절 제목
pub const CPP_COMPARISON: &str = "C++20 comparison";

/// 입문서의 한 장
pub trait Lesson {
    fn number(&self) -> u32;

    /// 장을 고를 때 쓰는 짧은 소문자 이름
    fn slug(&self) -> &'static str;

    fn title(&self) -> &'static str;

    /// 이 장이 대비하는 (C++20 쪽, 러스트 쪽) 짝
    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)];

    /// 장의 예제를 모두 실행하며 보여 준 것을 적는다
    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError>;
}

pub struct Curriculum {
    lessons: Vec<Box<dyn Lesson>>,
}

impl Curriculum {
    /// 가르치는 순서대로 모든 장
    pub fn standard() -> Self {
        let lessons: Vec<Box<dyn Lesson>> = vec![
            Box::new(lessons::basics::Basics),
            Box::new(lessons::ownership::Ownership),
            Box::new(lessons::borrowing::Borrowing),
            Box::new(lessons::lifetimes::Lifetimes),
            Box::new(lessons::structs::Structs),
            Box::new(lessons::enums::Enums),
            Box::new(lessons::traits::Traits),
            Box::new(lessons::generics::Generics),
            Box::new(lessons::error_handling::ErrorHandling),
            Box::new(lessons::collections::Collections),
            Box::new(lessons::iterators::Iterators),
            Box::new(lessons::smart_pointers::SmartPointers),
            Box::new(lessons::concurrency::Concurrency),
            Box::new(lessons::modules::Modules),
            Box::new(lessons::macros::Macros),
            Box::new(lessons::unsafe_code::UnsafeCode),
            Box::new(lessons::async_await::AsyncAwait),
            Box::new(lessons::idioms::Idioms),
            Box::new(lessons::testing::Testing),
        ];
        Self { lessons }
    }

    pub fn lessons(&self) -> impl Iterator<Item = &dyn Lesson> {
        self.lessons.iter().map(|l| l.as_ref())
    }

    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// 번호나 대소문자를 가리지 않는 슬러그로 장을 찾는다
    pub fn find(&self, selector: &str) -> Option<&dyn Lesson> {
        let selector = selector.trim();
        if let Ok(number) = selector.parse::<u32>() {
            return self.lessons().find(|l| l.number() == number);
        }
        let slug = selector.to_lowercase().replace('-', "_");
        self.lessons().find(|l| l.slug() == slug)
    }

    /// 선택자를 장으로 바꾼다. 선택이 비어 있으면 모든 장이다.
    pub fn select(&self, selectors: &[String]) -> Result<Vec<&dyn Lesson>, PrimerError> {
        if selectors.is_empty() {
            return Ok(self.lessons().collect());
        }
        selectors
            .iter()
            .map(|s| {
                self.find(s)
                    .ok_or_else(|| PrimerError::UnknownChapter(s.clone()))
            })
            .collect()
    }

    pub fn run_lesson(&self, lesson: &dyn Lesson) -> Result<Transcript, PrimerError> {
        debug!("Running chapter {} ({})", lesson.number(), lesson.slug());
        let mut transcript = Transcript::new(lesson.number(), lesson.title());
        lesson.run(&mut transcript)?;

        transcript.heading(CPP_COMPARISON);
        for (cpp, rust) in lesson.cpp_contrasts() {
            transcript.line(format!("C++: {}  |  Rust: {}", cpp, rust));
        }
        Ok(transcript)
    }

    pub fn run(&self, selectors: &[String]) -> Result<Vec<Transcript>, PrimerError> {
        let selected = self.select(selectors)?;
        info!("Running {} chapter(s)", selected.len());
        selected
            .into_iter()
            .map(|lesson| self.run_lesson(lesson))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_curriculum_is_numbered_in_order() {
        let curriculum = Curriculum::standard();
        assert_eq!(curriculum.len(), 19);
        for (idx, lesson) in curriculum.lessons().enumerate() {
            assert_eq!(lesson.number(), idx as u32 + 1);
        }
    }

    #[test]
    fn test_slugs_are_unique() {
        let curriculum = Curriculum::standard();
        let mut slugs: Vec<&str> = curriculum.lessons().map(|l| l.slug()).collect();
        slugs.sort();
        slugs.dedup();
        assert_eq!(slugs.len(), curriculum.len());
    }

    #[test]
    fn test_find_by_number_and_slug() {
        let curriculum = Curriculum::standard();
        assert_eq!(curriculum.find("7").unwrap().slug(), "traits");
        assert_eq!(curriculum.find("Smart-Pointers").unwrap().number(), 12);
        assert!(curriculum.find("99").is_none());
        assert!(curriculum.find("templates").is_none());
    }

    #[test]
    fn test_select_unknown_chapter() {
        let curriculum = Curriculum::standard();
        let err = curriculum
            .select(&["borrowing".to_string(), "nope".to_string()])
            .err()
            .unwrap();
        assert!(matches!(err, PrimerError::UnknownChapter(ref s) if s == "nope"));
    }

    #[test]
    fn test_run_selected_chapters() {
        let curriculum = Curriculum::standard();
        let transcripts = curriculum
            .run(&["2".to_string(), "borrowing".to_string()])
            .unwrap();
        assert_eq!(transcripts.len(), 2);
        assert_eq!(transcripts[0].chapter, 2);
        assert_eq!(transcripts[1].chapter, 3);
        assert!(!transcripts[1].sections.is_empty());
    }

    #[test]
    fn test_every_chapter_ends_with_cpp_comparison() {
        let curriculum = Curriculum::standard();
        for lesson in curriculum.lessons() {
            assert!(
                lesson.cpp_contrasts().len() >= 4,
                "{}장의 C++ 비교가 부족하다",
                lesson.number()
            );
        }

        let transcript = curriculum.run_lesson(curriculum.find("ownership").unwrap()).unwrap();
        let last = transcript.sections.last().unwrap();
        assert_eq!(last.title, CPP_COMPARISON);
        assert!(last.lines.iter().all(|l| l.starts_with("C++: ") && l.contains("  |  Rust: ")));
        assert!(transcript.contains("std::move"));
    }
}
