//! 장을 실행하며 모은 출력
//!
//! 장은 표준 출력 대신 [`Transcript`] 에 쓴다. 보여 주는 방식은 실행기가
//! 정하고, 테스트는 장이 설명한 내용을 확인할 수 있다.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transcript {
    pub chapter: u32,
    pub title: String,
    pub sections: Vec<Section>,
}

impl Transcript {
    pub fn new(chapter: u32, title: impl Into<String>) -> Self {
        Self {
            chapter,
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// 새 절을 연다. 뒤따르는 줄은 이 절에 속한다.
    pub fn heading(&mut self, title: impl Into<String>) {
        self.sections.push(Section {
            title: title.into(),
            lines: Vec::new(),
        });
    }

    pub fn line(&mut self, text: impl Into<String>) {
        if self.sections.is_empty() {
            self.heading("");
        }
        if let Some(section) = self.sections.last_mut() {
            section.lines.push(text.into());
        }
    }

    /// 모든 절의 모든 줄, 순서대로
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.sections
            .iter()
            .flat_map(|s| s.lines.iter().map(String::as_str))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().any(|line| line.contains(needle))
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== {:02}. {} ===", self.chapter, self.title)?;
        for section in &self.sections {
            writeln!(f)?;
            if !section.title.is_empty() {
                writeln!(f, "--- {} ---", section.title)?;
            }
            for line in &section.lines {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_go_to_latest_section() {
        let mut t = Transcript::new(2, "Ownership");
        t.heading("Move");
        t.line("s1 moved into s2");
        t.heading("Clone");
        t.line("deep copy");

        assert_eq!(t.sections.len(), 2);
        assert_eq!(t.sections[1].lines, vec!["deep copy".to_string()]);
        assert!(t.contains("moved"));
    }

    #[test]
    fn test_line_without_heading_opens_untitled_section() {
        let mut t = Transcript::new(1, "Basics");
        t.line("hello");
        assert_eq!(t.sections.len(), 1);
        assert_eq!(t.sections[0].title, "");
    }

    #[test]
    fn test_render() {
        let mut t = Transcript::new(3, "Borrowing");
        t.heading("Slices");
        t.line("first word: hello");

        let rendered = t.render();
        assert!(rendered.starts_with("=== 03. Borrowing ==="));
        assert!(rendered.contains("--- Slices ---\nfirst word: hello\n"));
    }
}
