//! 추천 문서에 들어 있는 의존성 조각

use crate::error::{DocError, Result};
use serde::Serialize;
use toml::{Table, Value};

/// 의존성을 선언하는 매니페스트 표. 읽는 순서대로.
const DEPENDENCY_SECTIONS: [&str; 3] = ["dependencies", "dev-dependencies", "build-dependencies"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub name: String,
    pub version: Option<String>,
    pub features: Vec<String>,
    /// 항목이 선언된 표, 예: `dependencies`
    pub section: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub dependencies: Vec<Dependency>,
    /// 조각 첫 줄이 문서에서 놓인 줄 번호
    pub line: usize,
}

impl Manifest {
    /// TOML 조각을 읽는다. `line` 은 오류 메시지에 쓸 조각 위치다.
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        let table: Table = toml::from_str(text).map_err(|e| DocError::Manifest {
            line,
            message: e.message().to_string(),
        })?;

        let mut dependencies = Vec::new();

        for section in DEPENDENCY_SECTIONS {
            if let Some(entries) = table.get(section) {
                collect_section(entries, section, line, &mut dependencies)?;
            }
        }

        if let Some(Value::Table(workspace)) = table.get("workspace") {
            if let Some(entries) = workspace.get("dependencies") {
                collect_section(entries, "workspace.dependencies", line, &mut dependencies)?;
            }
        }

        Ok(Self { dependencies, line })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.dependencies.iter().map(|d| d.name.as_str())
    }
}

fn collect_section(
    entries: &Value,
    section: &str,
    line: usize,
    out: &mut Vec<Dependency>,
) -> Result<()> {
    let Value::Table(entries) = entries else {
        return Err(DocError::Manifest {
            line,
            message: format!("[{}] is not a table", section),
        });
    };

    for (name, value) in entries {
        out.push(parse_dependency(name, value, section, line)?);
    }
    Ok(())
}

fn parse_dependency(name: &str, value: &Value, section: &str, line: usize) -> Result<Dependency> {
    match value {
        Value::String(version) => Ok(Dependency {
            name: name.to_string(),
            version: Some(version.clone()),
            features: Vec::new(),
            section: section.to_string(),
        }),
        Value::Table(detail) => {
            let has_source = ["version", "path", "git", "workspace"]
                .iter()
                .any(|key| detail.contains_key(*key));
            if !has_source {
                return Err(DocError::Manifest {
                    line,
                    message: format!("dependency `{}` has no version, path or git source", name),
                });
            }

            let features = match detail.get("features") {
                Some(Value::Array(items)) => items
                    .iter()
                    .filter_map(|f| f.as_str().map(str::to_string))
                    .collect(),
                _ => Vec::new(),
            };

            Ok(Dependency {
                name: name.to_string(),
                version: detail.get("version").and_then(|v| v.as_str()).map(str::to_string),
                features,
                section: section.to_string(),
            })
        }
        other => Err(DocError::Manifest {
            line,
            message: format!("dependency `{}` has unsupported value type {}", name, other.type_str()),
        }),
    }
}
