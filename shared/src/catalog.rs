//! 패키지 추천 문서 모델
//!
//! 문서는 관심사마다 제목 하나를 두고 그 아래에 추천 크레이트를 모은다. 각
//! 관심사에는 (크레이트, 용도) 두 열짜리 표가 있다. `toml` 코드 블록은 예시
//! 매니페스트이고, C++ 비교 제목 아래의 표는 용도마다 러스트 크레이트와 그것이
//! 대신하는 네이티브 라이브러리를 짝짓는다.
//!
//! 배치는 너그럽게 읽는다. 지침이 어긋나는 곳은 [`Catalog::validate`] 가
//! 모두 보고한다.

use crate::error::{DocError, Result};
use crate::issue::{Issue, IssueKind};
use crate::manifest::Manifest;
use crate::markdown::{parse_blocks, strip_inline_code, Block};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// 추천이 속한 관심사
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Networking,
    Serialization,
    Persistence,
    Concurrency,
    Utilities,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Networking,
        Category::Serialization,
        Category::Persistence,
        Category::Concurrency,
        Category::Utilities,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Category::Networking => &["networking", "network", "네트워크", "네트워킹"],
            Category::Serialization => &["serialization", "serialisation", "직렬화"],
            Category::Persistence => &["persistence", "database", "데이터베이스", "영속성"],
            Category::Concurrency => &["concurrency", "parallelism", "동시성", "병렬"],
            Category::Utilities => &["utilities", "utility", "유틸"],
        }
    }

    /// 영어나 한국어 키워드로 제목을 분류에 대응시킨다
    pub fn from_heading(text: &str) -> Option<Category> {
        let lower = text.to_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.keywords().iter().any(|k| lower.contains(k)))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Networking => "Networking",
            Category::Serialization => "Serialization",
            Category::Persistence => "Persistence",
            Category::Concurrency => "Concurrency",
            Category::Utilities => "Utilities",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub category: Category,
    pub purpose: String,
    pub line: usize,
}

/// 네이티브 생태계 비교표의 한 행
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    pub purpose: String,
    pub rust: String,
    pub native: String,
    pub line: usize,
}

impl Comparison {
    /// 러스트 칸의 크레이트 이름. 표준 라이브러리 경로는 뺀다.
    pub fn rust_crates(&self) -> Vec<String> {
        self.rust
            .split([',', '/'])
            .map(strip_inline_code)
            .filter(|name| !name.is_empty() && name != "-" && !is_std_path(name))
            .collect()
    }
}

/// 분류 제목과 그 아래 나열된 행의 수
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySection {
    pub category: Category,
    pub heading: String,
    pub line: usize,
    pub entries: usize,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    pub title: Option<String>,
    pub recommendations: Vec<Recommendation>,
    pub sections: Vec<CategorySection>,
    pub manifest: Option<Manifest>,
    pub comparisons: Vec<Comparison>,
}

/// 표를 읽을 때의 제목 문맥
#[derive(Debug, Clone, Copy)]
enum Context {
    None,
    Category { level: u8, section: usize },
    Comparison { level: u8 },
}

impl Context {
    fn level(&self) -> Option<u8> {
        match self {
            Context::None => None,
            Context::Category { level, .. } | Context::Comparison { level } => Some(*level),
        }
    }
}

fn is_comparison_heading(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("c++") || lower.contains("comparison") || lower.contains("비교")
}

/// `std`, `core`, `alloc` 자체이거나 그 아래 경로
fn is_std_path(name: &str) -> bool {
    ["std", "core", "alloc"].iter().any(|root| {
        name == *root
            || name
                .strip_prefix(root)
                .is_some_and(|rest| rest.starts_with("::"))
    })
}

/// cargo 처럼 `-`/`_` 와 대소문자를 같게 보는 이름 키
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace('_', "-")
}

impl Catalog {
    pub fn parse(text: &str) -> Result<Self> {
        let mut catalog = Catalog::default();
        let mut context = Context::None;

        for block in parse_blocks(text) {
            match block {
                Block::Heading { level, text, line } => {
                    if level == 1 && catalog.title.is_none() {
                        catalog.title = Some(text.clone());
                    }

                    context = if is_comparison_heading(&text) {
                        Context::Comparison { level }
                    } else if let Some(category) = Category::from_heading(&text) {
                        catalog.sections.push(CategorySection {
                            category,
                            heading: text,
                            line,
                            entries: 0,
                        });
                        Context::Category {
                            level,
                            section: catalog.sections.len() - 1,
                        }
                    } else if context.level().is_some_and(|current| level > current) {
                        // 하위 제목은 바깥 관심사에 그대로 속한다
                        context
                    } else {
                        Context::None
                    };
                }
                Block::Table { rows, .. } => match context {
                    Context::Category { section, .. } => {
                        let category = catalog.sections[section].category;
                        for row in rows {
                            let name = row.cells.first().map(|c| strip_inline_code(c));
                            let Some(name) = name.filter(|n| !n.is_empty()) else {
                                continue;
                            };
                            let purpose = row.cells.get(1).map(|c| c.trim()).unwrap_or("");
                            catalog.recommendations.push(Recommendation {
                                name,
                                category,
                                purpose: purpose.to_string(),
                                line: row.line,
                            });
                            catalog.sections[section].entries += 1;
                        }
                    }
                    Context::Comparison { .. } => {
                        for row in rows {
                            let cell = |i: usize| row.cells.get(i).map(|c| c.trim().to_string());
                            catalog.comparisons.push(Comparison {
                                purpose: cell(0).unwrap_or_default(),
                                rust: cell(1).unwrap_or_default(),
                                native: cell(2).unwrap_or_default(),
                                line: row.line,
                            });
                        }
                    }
                    Context::None => {}
                },
                Block::Code {
                    language: Some(language),
                    body,
                    line,
                } if language.eq_ignore_ascii_case("toml") && catalog.manifest.is_none() => {
                    catalog.manifest = Some(Manifest::parse(&body, line)?);
                }
                _ => {}
            }
        }

        if catalog.recommendations.is_empty() {
            return Err(DocError::Empty);
        }

        debug!(
            "Parsed catalog: {} recommendations, {} comparisons",
            catalog.recommendations.len(),
            catalog.comparisons.len()
        );
        Ok(catalog)
    }

    /// 대소문자와 `-`/`_` 차이를 무시하고 추천을 찾는다
    pub fn find(&self, name: &str) -> Option<&Recommendation> {
        let key = normalize_name(name);
        self.recommendations
            .iter()
            .find(|r| normalize_name(&r.name) == key)
    }

    /// 분류별로 묶은 추천. 분류는 처음 나온 순서를 따른다.
    pub fn by_category(&self) -> Vec<(Category, Vec<&Recommendation>)> {
        let mut groups: Vec<(Category, Vec<&Recommendation>)> = Vec::new();
        for rec in &self.recommendations {
            match groups.iter_mut().find(|(c, _)| *c == rec.category) {
                Some((_, entries)) => entries.push(rec),
                None => groups.push((rec.category, vec![rec])),
            }
        }
        groups
    }

    /// 지침이 서로 어긋나지 않는지 검사한다
    pub fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();

        let mut seen: HashMap<String, &Recommendation> = HashMap::new();
        for rec in &self.recommendations {
            if rec.purpose.is_empty() {
                issues.push(Issue::new(
                    IssueKind::EmptyPurpose,
                    format!("`{}` has no usage description", rec.name),
                    Some(rec.line),
                ));
            }

            match seen.get(&normalize_name(&rec.name)) {
                Some(first) if first.purpose == rec.purpose => {
                    issues.push(Issue::new(
                        IssueKind::DuplicateEntry,
                        format!(
                            "`{}` is listed again (first listed at line {})",
                            rec.name, first.line
                        ),
                        Some(rec.line),
                    ));
                }
                Some(first) => {
                    issues.push(Issue::new(
                        IssueKind::ContradictoryGuidance,
                        format!(
                            "`{}` is described as \"{}\" under {} but as \"{}\" at line {}",
                            rec.name, rec.purpose, rec.category, first.purpose, first.line
                        ),
                        Some(rec.line),
                    ));
                }
                None => {
                    seen.insert(normalize_name(&rec.name), rec);
                }
            }
        }

        for section in &self.sections {
            if section.entries == 0 {
                issues.push(Issue::new(
                    IssueKind::EmptyCategory,
                    format!("section \"{}\" lists no packages", section.heading),
                    Some(section.line),
                ));
            }
        }

        if let Some(manifest) = &self.manifest {
            for dep in &manifest.dependencies {
                if !seen.contains_key(&normalize_name(&dep.name)) {
                    issues.push(Issue::new(
                        IssueKind::ManifestUnlisted,
                        format!(
                            "manifest example depends on `{}` which is not recommended",
                            dep.name
                        ),
                        Some(manifest.line),
                    ));
                }
            }
        }

        for comparison in &self.comparisons {
            for name in comparison.rust_crates() {
                if !seen.contains_key(&normalize_name(&name)) {
                    issues.push(Issue::new(
                        IssueKind::ComparisonUnlisted,
                        format!(
                            "comparison for \"{}\" names `{}` which is not recommended",
                            comparison.purpose, name
                        ),
                        Some(comparison.line),
                    ));
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Severity;

    const SAMPLE: &str = "# 추천 라이브러리

## 네트워킹 (Networking)

| 크레이트 | 용도 |
|---|---|
| `tokio` | 비동기 런타임 |
| `tokio-tungstenite` | WebSocket 서버 |

### WebSocket 보조

| 크레이트 | 용도 |
|---|---|
| `futures-util` | 스트림 분할 |

## 직렬화 (Serialization)

| 크레이트 | 용도 |
|---|---|
| `serde` | 직렬화 프레임워크 |
| `bincode` | 바이너리 패킷 인코딩 |

## Cargo.toml 예시

```toml
[dependencies]
tokio = { version = \"1\", features = [\"full\"] }
serde = { version = \"1.0\", features = [\"derive\"] }
```

## C++ 비교

| 용도 | Rust | C++ |
|---|---|---|
| 비동기 I/O | `tokio` | Boost.Asio |
| 스레드 | `std::thread` | std::thread |
";

    #[test]
    fn test_category_from_heading() {
        assert_eq!(
            Category::from_heading("네트워킹 (Networking)"),
            Some(Category::Networking)
        );
        assert_eq!(Category::from_heading("데이터베이스"), Some(Category::Persistence));
        assert_eq!(Category::from_heading("Concurrency"), Some(Category::Concurrency));
        assert_eq!(Category::from_heading("Cargo.toml 예시"), None);
        assert_eq!(Category::from_heading("저장소 구조"), None);
        assert_eq!(Category::from_heading("영속성 (Persistence)"), Some(Category::Persistence));
    }

    #[test]
    fn test_repository_layout_heading_is_not_a_category() {
        let text = "## 네트워킹\n\n| a | b |\n|-|-|\n| tokio | 런타임 |\n\n## 저장소 구조\n\n- `shared/`: 공용 코드\n";
        let catalog = Catalog::parse(text).unwrap();
        assert_eq!(catalog.sections.len(), 1);
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn test_table_without_outer_pipes() {
        let text = "## Networking\n\n크레이트 | 용도\n---|---\n`tokio` | 런타임\n";
        let catalog = Catalog::parse(text).unwrap();
        let tokio = catalog.find("tokio").unwrap();
        assert_eq!(tokio.purpose, "런타임");
        assert_eq!(tokio.line, 5);
    }

    #[test]
    fn test_parse_sample() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.title.as_deref(), Some("추천 라이브러리"));
        assert_eq!(catalog.recommendations.len(), 5);

        let ws = catalog.find("futures_util").unwrap();
        assert_eq!(ws.category, Category::Networking);

        let bincode = catalog.find("bincode").unwrap();
        assert_eq!(bincode.category, Category::Serialization);
        assert_eq!(bincode.purpose, "바이너리 패킷 인코딩");

        assert_eq!(catalog.manifest.as_ref().unwrap().dependencies.len(), 2);
        assert_eq!(catalog.comparisons.len(), 2);
        assert!(catalog.validate().is_empty());
    }

    #[test]
    fn test_by_category_keeps_declaration_order() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        let groups = catalog.by_category();
        assert_eq!(groups[0].0, Category::Networking);
        assert_eq!(groups[0].1.len(), 3);
        assert_eq!(groups[1].0, Category::Serialization);
    }

    #[test]
    fn test_empty_document_is_error() {
        assert!(matches!(Catalog::parse("# nothing here\n"), Err(DocError::Empty)));
    }

    #[test]
    fn test_duplicate_with_same_purpose_is_warning() {
        let text = "## Networking\n\n| a | b |\n|-|-|\n| tokio | 런타임 |\n\n## Concurrency\n\n| a | b |\n|-|-|\n| Tokio | 런타임 |\n";
        let issues = Catalog::parse(text).unwrap().validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::DuplicateEntry);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(issues[0].line, Some(11));
    }

    #[test]
    fn test_duplicate_with_other_purpose_is_contradiction() {
        let text = "## Networking\n| a | b |\n|-|-|\n| tokio | 런타임 |\n| tokio | 사용 금지 |\n";
        let issues = Catalog::parse(text).unwrap().validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::ContradictoryGuidance);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_manifest_must_use_recommended_crates() {
        let text = "## Networking\n| a | b |\n|-|-|\n| tokio | 런타임 |\n\n```toml\n[dependencies]\ntokio = \"1\"\nsqlx = \"0.7\"\n```\n";
        let issues = Catalog::parse(text).unwrap().validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::ManifestUnlisted);
        assert!(issues[0].message.contains("sqlx"));
    }

    #[test]
    fn test_empty_purpose_and_empty_category() {
        let text = "## Networking\n| a | b |\n|-|-|\n| tokio | |\n\n## Persistence\n| a | b |\n|-|-|\n";
        let issues = Catalog::parse(text).unwrap().validate();
        let kinds: Vec<&IssueKind> = issues.iter().map(|i| &i.kind).collect();
        assert!(kinds.contains(&&IssueKind::EmptyPurpose));
        assert!(kinds.contains(&&IssueKind::EmptyCategory));
    }

    #[test]
    fn test_comparison_crates() {
        let comparison = Comparison {
            purpose: "직렬화".to_string(),
            rust: "`serde` / `bincode`, std::io".to_string(),
            native: "protobuf".to_string(),
            line: 1,
        };
        assert_eq!(comparison.rust_crates(), vec!["serde", "bincode"]);
    }

    #[test]
    fn test_comparison_keeps_crates_named_like_std() {
        let comparison = Comparison {
            purpose: "웹".to_string(),
            rust: "`stdweb` / `structopt`".to_string(),
            native: "emscripten".to_string(),
            line: 1,
        };
        assert_eq!(comparison.rust_crates(), vec!["stdweb", "structopt"]);

        let std_only = Comparison {
            purpose: "스레드".to_string(),
            rust: "`std`, `core::sync`, `alloc::vec`".to_string(),
            native: "std::thread".to_string(),
            line: 1,
        };
        assert!(std_only.rust_crates().is_empty());
    }

    #[test]
    fn test_unlisted_comparison_crate_is_warning() {
        let text = "## Networking\n| a | b |\n|-|-|\n| tokio | 런타임 |\n\n## C++ comparison\n| p | r | c |\n|-|-|-|\n| db | `sqlx` | libpq |\n";
        let issues = Catalog::parse(text).unwrap().validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind, IssueKind::ComparisonUnlisted);
    }

    #[test]
    fn test_malformed_manifest_is_parse_error() {
        let text = "## Networking\n| a | b |\n|-|-|\n| tokio | 런타임 |\n\n```toml\n[dependencies\n```\n";
        assert!(matches!(Catalog::parse(text), Err(DocError::Manifest { line: 7, .. })));
    }
}
