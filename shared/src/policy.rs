//! 커밋 메시지와 코드 주석의 언어 정책
//!
//! 기여 가이드는 커밋 메시지와 소스 주석을 어떤 언어로 쓰는지 정한다. 이
//! 모듈은 글이 그 정책을 따르는지 판단하고, 검사할 수 있도록 러스트 소스에서
//! 주석을 꺼낸다.

use ast_grep_core::matcher::KindMatcher;
use ast_grep_core::ops::Any;
use ast_grep_language::{LanguageExt, SupportLang};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    Korean,
    English,
}

impl Language {
    /// 가이드에 적힌 언어 이름을 읽는다
    pub fn from_name(text: &str) -> Option<Language> {
        let lower = text.to_lowercase();
        if ["korean", "한국어", "한글"].iter().any(|k| lower.contains(k)) {
            Some(Language::Korean)
        } else if ["english", "영어"].iter().any(|k| lower.contains(k)) {
            Some(Language::English)
        } else {
            None
        }
    }

    /// `text` 가 이 언어로 쓰였는지 본다.
    ///
    /// 글자가 하나도 없는 글 (구분선, 숫자, 기호) 은 어느 언어로도 통과한다.
    pub fn accepts(&self, text: &str) -> bool {
        if !text.chars().any(char::is_alphabetic) {
            return true;
        }
        match self {
            Language::Korean => contains_hangul(text),
            Language::English => !contains_hangul(text),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Korean => write!(f, "Korean"),
            Language::English => write!(f, "English"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PolicySubject {
    CommitMessages,
    CodeComments,
}

impl PolicySubject {
    pub const ALL: [PolicySubject; 2] = [PolicySubject::CommitMessages, PolicySubject::CodeComments];

    pub fn from_name(text: &str) -> Option<PolicySubject> {
        let lower = text.to_lowercase();
        if lower.contains("commit") || lower.contains("커밋") {
            Some(PolicySubject::CommitMessages)
        } else if lower.contains("comment") || lower.contains("주석") {
            Some(PolicySubject::CodeComments)
        } else {
            None
        }
    }
}

impl fmt::Display for PolicySubject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicySubject::CommitMessages => write!(f, "commit messages"),
            PolicySubject::CodeComments => write!(f, "code comments"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguagePolicy {
    pub subject: PolicySubject,
    pub language: Language,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PolicyViolation {
    #[error("commit message is empty")]
    EmptyMessage,

    #[error("line {line}: {subject} must be written in {expected}: \"{text}\"")]
    WrongLanguage {
        subject: PolicySubject,
        expected: Language,
        line: usize,
        text: String,
    },
}

/// `text` 에 한글 음절이나 자모가 있으면 참
pub fn contains_hangul(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{AC00}'..='\u{D7A3}'
            | '\u{1100}'..='\u{11FF}'
            | '\u{3130}'..='\u{318F}')
    })
}

/// `commit-msg` 훅이 보는 그대로 커밋 메시지 파일을 검사한다
pub fn check_commit_message(message: &str, language: Language) -> Result<(), PolicyViolation> {
    let mut subject = None;

    for (idx, line) in message.lines().enumerate() {
        // git 가위 줄 아래는 커밋에 들어가지 않는다
        if line.starts_with("# ------------------------ >8 ------------------------") {
            break;
        }
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        subject = Some((idx + 1, line.trim()));
        break;
    }

    let Some((line, text)) = subject else {
        return Err(PolicyViolation::EmptyMessage);
    };

    if language.accepts(text) {
        Ok(())
    } else {
        Err(PolicyViolation::WrongLanguage {
            subject: PolicySubject::CommitMessages,
            expected: language,
            line,
            text: text.to_string(),
        })
    }
}

/// 러스트 소스에서 찾은 주석 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// 주석이 시작하는 줄 (1부터)
    pub line: usize,
    pub text: String,
    /// `///`, `//!`, `/** */`, `/*! */`
    pub doc: bool,
}

const COMMENT_KINDS: [&str; 2] = ["line_comment", "block_comment"];

/// rustdoc 과 clippy 가 이름으로 찾는 문서 절 제목
const RUSTDOC_SECTIONS: [&str; 4] = ["# Safety", "# Panics", "# Errors", "# Examples"];

/// 러스트 소스의 주석을 모두 꺼낸다.
///
/// tree-sitter 러스트 문법의 주석 노드를 그대로 쓰므로 문자열 리터럴 안의
/// `//` 는 주석이 아니고 블록 주석은 중첩된다.
pub fn extract_comments(source: &str) -> Vec<Comment> {
    let root = SupportLang::Rust.ast_grep(source);
    let matchers: Vec<KindMatcher> = COMMENT_KINDS
        .iter()
        .map(|k| KindMatcher::new(k, SupportLang::Rust))
        .collect();
    let matcher = Any::new(matchers);

    let mut comments: Vec<Comment> = root
        .root()
        .find_all(&matcher)
        .map(|node| {
            let raw = node.text();
            let (text, doc) = if node.kind().as_ref() == "block_comment" {
                block_comment_body(raw.trim_end())
            } else {
                line_comment_body(raw.trim_end())
            };
            Comment {
                line: node.start_pos().line() + 1,
                text: text.trim().to_string(),
                doc,
            }
        })
        .collect();

    comments.sort_by_key(|c| c.line);
    comments
}

/// `////` 로 시작하면 문서 주석이 아니다
fn line_comment_body(raw: &str) -> (&str, bool) {
    let rest = raw.strip_prefix("//").unwrap_or(raw);
    let doc = (rest.starts_with('/') && !rest.starts_with("//")) || rest.starts_with('!');
    if doc {
        (&rest[1..], true)
    } else {
        (rest, false)
    }
}

/// `/***` 와 `/**/` 는 문서 주석이 아니다
fn block_comment_body(raw: &str) -> (&str, bool) {
    let doc = (raw.starts_with("/**") && !raw.starts_with("/***") && raw != "/**/")
        || raw.starts_with("/*!");
    let inner = raw.strip_prefix("/*").unwrap_or(raw);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    if doc {
        (&inner[1..], true)
    } else {
        (inner, false)
    }
}

/// `source` 에서 `language` 로 쓰이지 않은 주석을 모두 보고한다.
///
/// 문서 주석 안의 코드 펜스 (문서 테스트) 와 rustdoc 절 제목은 언어와
/// 무관하므로 검사하지 않는다.
pub fn check_comments(source: &str, language: Language) -> Vec<PolicyViolation> {
    let mut in_fence = false;
    let mut violations = Vec::new();

    for comment in extract_comments(source) {
        if comment.doc && comment.text.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if !comment.doc {
            in_fence = false;
        }
        let section = comment.doc && RUSTDOC_SECTIONS.contains(&comment.text.as_str());
        if in_fence || section || language.accepts(&comment.text) {
            continue;
        }
        violations.push(PolicyViolation::WrongLanguage {
            subject: PolicySubject::CodeComments,
            expected: language,
            line: comment.line,
            text: comment.text,
        });
    }
    violations
}
