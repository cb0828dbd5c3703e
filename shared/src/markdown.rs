//! `tree-sitter-md` 블록 문법으로 마크다운을 읽는다
//!
//! 프로젝트 문서가 쓰는 구성 요소만 [`Block`] 으로 옮긴다: ATX/setext 제목,
//! GFM 파이프 표, 펜스 코드 블록, 목록 항목, 문단. 펜스 안의 내용은 해석하지
//! 않는다.

use std::borrow::Cow;

use ast_grep_core::language::Language;
use ast_grep_core::matcher::{KindMatcher, Pattern, PatternBuilder, PatternError};
use ast_grep_core::ops::Any;
use ast_grep_core::tree_sitter::{LanguageExt, StrDoc, TSLanguage};
use ast_grep_core::{Doc, Node};

/// `tree-sitter-md` 블록 문법을 ast-grep 언어로 감싼 것
#[derive(Clone, Copy, Debug)]
pub struct MarkdownLang;

impl Language for MarkdownLang {
    fn pre_process_pattern<'q>(&self, query: &'q str) -> Cow<'q, str> {
        Cow::Borrowed(query)
    }

    fn kind_to_id(&self, kind: &str) -> u16 {
        self.get_ts_language().id_for_node_kind(kind, true)
    }

    fn field_to_id(&self, field: &str) -> Option<u16> {
        self.get_ts_language()
            .field_id_for_name(field)
            .map(std::num::NonZero::get)
    }

    fn build_pattern(&self, builder: &PatternBuilder) -> Result<Pattern, PatternError> {
        builder.build(|src| StrDoc::try_new(src, *self))
    }
}

impl LanguageExt for MarkdownLang {
    fn get_ts_language(&self) -> TSLanguage {
        tree_sitter_md::LANGUAGE.into()
    }
}

/// 표 본문의 한 행과 그 행의 줄 번호
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub line: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        text: String,
        line: usize,
    },
    Table {
        header: Vec<String>,
        rows: Vec<TableRow>,
        line: usize,
    },
    Code {
        language: Option<String>,
        body: String,
        /// 본문 첫 줄의 번호
        line: usize,
    },
    ListItem {
        text: String,
        line: usize,
    },
    Paragraph {
        text: String,
        line: usize,
    },
}

impl Block {
    pub fn line(&self) -> usize {
        match self {
            Block::Heading { line, .. }
            | Block::Table { line, .. }
            | Block::Code { line, .. }
            | Block::ListItem { line, .. }
            | Block::Paragraph { line, .. } => *line,
        }
    }
}

const BLOCK_KINDS: [&str; 6] = [
    "atx_heading",
    "setext_heading",
    "pipe_table",
    "fenced_code_block",
    "list_item",
    "paragraph",
];

/// ATX 제목 줄에서 제목 글자만 남긴다.
///
/// 닫는 `#` 열은 앞에 공백이 있을 때만 떼어 낸다 (`# C#` 는 `C#`).
pub fn heading_text(raw: &str) -> String {
    let first = raw.lines().next().unwrap_or_default().trim();
    let content = first.trim_start_matches('#').trim();
    let without_closing = content.trim_end_matches('#');

    if without_closing.is_empty() {
        String::new()
    } else if without_closing.len() == content.len() {
        content.to_string()
    } else if without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end().to_string()
    } else {
        content.to_string()
    }
}

fn heading_level(raw: &str) -> u8 {
    let hashes = raw.trim_start().chars().take_while(|c| *c == '#').count();
    u8::try_from(hashes.clamp(1, 6)).unwrap_or(1)
}

/// 셀 앞뒤의 백틱과 공백을 없앤다
pub fn strip_inline_code(cell: &str) -> String {
    cell.trim().trim_matches('`').trim().to_string()
}

/// 여러 줄 문단을 한 줄로 붙인다
fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn line_of<D: Doc>(node: &Node<D>) -> usize {
    node.start_pos().line() + 1
}

fn atx_heading<D: Doc>(node: &Node<D>) -> Block {
    let raw = node.text();
    Block::Heading {
        level: heading_level(&raw),
        text: heading_text(&raw),
        line: line_of(node),
    }
}

fn setext_heading<D: Doc>(node: &Node<D>) -> Block {
    let mut text = String::new();
    let mut level = 1;
    for child in node.children() {
        match child.kind().as_ref() {
            "paragraph" => text = join_lines(&child.text()),
            "setext_h2_underline" => level = 2,
            _ => {}
        }
    }
    Block::Heading {
        level,
        text,
        line: line_of(node),
    }
}

/// 행의 셀을 열 위치대로 꺼낸다. 비어 있는 셀은 빈 문자열이 된다.
fn row_cells<D: Doc>(row: &Node<D>) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current: Option<String> = None;
    let mut started = false;

    for child in row.children() {
        match child.kind().as_ref() {
            "pipe_table_cell" => {
                current = Some(child.text().trim().replace("\\|", "|"));
                started = true;
            }
            "|" => {
                // 맨 앞의 `|` 는 셀 경계가 아니다
                if started {
                    cells.push(current.take().unwrap_or_default());
                }
                started = true;
            }
            _ => {}
        }
    }
    if let Some(last) = current {
        cells.push(last);
    }
    cells
}

fn table<D: Doc>(node: &Node<D>) -> Block {
    let mut header = Vec::new();
    let mut rows = Vec::new();
    for child in node.children() {
        match child.kind().as_ref() {
            "pipe_table_header" => header = row_cells(&child),
            "pipe_table_row" => rows.push(TableRow {
                cells: row_cells(&child),
                line: line_of(&child),
            }),
            _ => {}
        }
    }
    Block::Table {
        header,
        rows,
        line: line_of(node),
    }
}

fn code_block<D: Doc>(node: &Node<D>) -> Block {
    let mut language = None;
    let mut body = String::new();
    let mut line = line_of(node) + 1;

    for child in node.children() {
        match child.kind().as_ref() {
            "info_string" => {
                language = child.text().split_whitespace().next().map(str::to_string);
            }
            "code_fence_content" => {
                line = line_of(&child);
                body = child.text().trim_end_matches(['\n', '\r']).to_string();
            }
            _ => {}
        }
    }
    Block::Code {
        language,
        body,
        line,
    }
}

fn list_entry<D: Doc>(node: &Node<D>) -> Block {
    let text = node
        .children()
        .find(|c| c.kind().as_ref() == "paragraph")
        .map(|p| join_lines(&p.text()))
        .unwrap_or_default();
    Block::ListItem {
        text,
        line: line_of(node),
    }
}

/// 목록 항목과 setext 제목 안의 문단은 그쪽 블록에 속한다
fn is_nested_paragraph<D: Doc>(node: &Node<D>) -> bool {
    node.parent()
        .is_some_and(|p| matches!(p.kind().as_ref(), "list_item" | "setext_heading"))
}

/// 문서 전체를 블록으로 나눈다. 결과는 원문 순서를 따른다.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let root = MarkdownLang.ast_grep(text);
    let matchers: Vec<KindMatcher> = BLOCK_KINDS
        .iter()
        .map(|k| KindMatcher::new(k, MarkdownLang))
        .collect();
    let matcher = Any::new(matchers);

    let mut blocks = Vec::new();
    for node in root.root().find_all(&matcher) {
        let block = match node.kind().as_ref() {
            "atx_heading" => atx_heading(&node),
            "setext_heading" => setext_heading(&node),
            "pipe_table" => table(&node),
            "fenced_code_block" => code_block(&node),
            "list_item" => list_entry(&node),
            "paragraph" if !is_nested_paragraph(&node) => Block::Paragraph {
                text: join_lines(&node.text()),
                line: line_of(&node),
            },
            _ => continue,
        };
        blocks.push(block);
    }

    blocks.sort_by_key(Block::line);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_text() {
        assert_eq!(heading_text("# Title\n"), "Title");
        assert_eq!(heading_text("### 네트워킹 ###"), "네트워킹");
        assert_eq!(heading_text("# C#"), "C#");
        assert_eq!(heading_text("## C# ##"), "C#");
        assert_eq!(heading_text("# ###"), "");
    }

    #[test]
    fn test_parse_blocks_table_and_code() {
        let text = "# Libs\n\n| name | use |\n|---|---|\n| serde | 직렬화 |\n\n```toml\n[dependencies]\n# inside\n```\n\n- item one\n";
        let blocks = parse_blocks(text);

        assert!(matches!(&blocks[0], Block::Heading { level: 1, text, .. } if text == "Libs"));
        match &blocks[1] {
            Block::Table { header, rows, line } => {
                assert_eq!(header, &vec!["name".to_string(), "use".to_string()]);
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].cells, vec!["serde", "직렬화"]);
                assert_eq!(rows[0].line, 5);
                assert_eq!(*line, 3);
            }
            other => panic!("표가 아님: {:?}", other),
        }
        match &blocks[2] {
            Block::Code {
                language,
                body,
                line,
            } => {
                assert_eq!(language.as_deref(), Some("toml"));
                assert_eq!(body, "[dependencies]\n# inside");
                assert_eq!(*line, 8);
            }
            other => panic!("코드 블록이 아님: {:?}", other),
        }
        assert!(matches!(&blocks[3], Block::ListItem { text, .. } if text == "item one"));
        assert_eq!(blocks.len(), 4);
    }

    #[test]
    fn test_table_without_outer_pipes() {
        let blocks = parse_blocks("크레이트 | 용도\n---|---\n`tokio` | 런타임\n");
        match &blocks[0] {
            Block::Table { header, rows, .. } => {
                assert_eq!(header, &vec!["크레이트".to_string(), "용도".to_string()]);
                assert_eq!(rows[0].cells, vec!["`tokio`", "런타임"]);
                assert_eq!(rows[0].line, 3);
            }
            other => panic!("표가 아님: {:?}", other),
        }
    }

    #[test]
    fn test_table_escaped_pipe_and_empty_cell() {
        let blocks = parse_blocks("| a | b |\n|---|---|\n| x \\| y | |\n");
        match &blocks[0] {
            Block::Table { rows, .. } => assert_eq!(rows[0].cells, vec!["x | y", ""]),
            other => panic!("표가 아님: {:?}", other),
        }
    }

    #[test]
    fn test_rows_without_delimiter_are_paragraphs() {
        let blocks = parse_blocks("| just | pipes |\n");
        assert!(matches!(&blocks[0], Block::Paragraph { .. }));
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let blocks = parse_blocks("```bash\ncargo build\n# Not a heading\n");
        assert_eq!(blocks.len(), 1);
        match &blocks[0] {
            Block::Code { body, language, .. } => {
                assert_eq!(language.as_deref(), Some("bash"));
                assert_eq!(body, "cargo build\n# Not a heading");
            }
            other => panic!("코드 블록이 아님: {:?}", other),
        }
    }

    #[test]
    fn test_hashtag_is_not_a_heading() {
        let blocks = parse_blocks("#hashtag\n");
        assert!(matches!(&blocks[0], Block::Paragraph { text, .. } if text == "#hashtag"));
    }

    #[test]
    fn test_list_item_text_excludes_marker() {
        let blocks = parse_blocks("- 커밋 메시지: 한국어\n- **코드 주석**: 한국어\n");
        let items: Vec<&str> = blocks
            .iter()
            .filter_map(|b| match b {
                Block::ListItem { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(items, vec!["커밋 메시지: 한국어", "**코드 주석**: 한국어"]);
    }

    #[test]
    fn test_strip_inline_code() {
        assert_eq!(strip_inline_code(" `tokio-tungstenite` "), "tokio-tungstenite");
        assert_eq!(strip_inline_code("serde"), "serde");
    }
}
