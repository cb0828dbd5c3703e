//! 문서와 정책 검사

use crate::error::{CheckError, Result};
use ignore::WalkBuilder;
use log::{debug, info, warn};
use shared::policy::{check_comments, check_commit_message};
use shared::{Catalog, Guidance, Language, PolicySubject, PolicyViolation, Report};
use std::fs;
use std::path::{Path, PathBuf};

pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CheckError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_guidance(path: &Path) -> Result<Guidance> {
    Ok(Guidance::parse(&read_document(path)?))
}

pub fn load_catalog(path: &Path) -> Result<Catalog> {
    let text = read_document(path)?;
    Catalog::parse(&text).map_err(|source| CheckError::Document {
        document: path.display().to_string(),
        source,
    })
}

/// 기여 가이드: 적힌 명령과 언어 정책
pub fn check_guidance(document: &str, text: &str) -> Report {
    let guidance = Guidance::parse(text);
    debug!(
        "{}: {} command(s), {} policy statement(s)",
        document,
        guidance.commands.len(),
        guidance.policies.len()
    );
    Report::new(document, guidance.validate())
}

/// 추천 목록: 항목, 예시 매니페스트, 비교표
pub fn check_catalog(document: &str, text: &str) -> Result<Report> {
    let catalog = Catalog::parse(text).map_err(|source| CheckError::Document {
        document: document.to_string(),
        source,
    })?;
    Ok(Report::new(document, catalog.validate()))
}

/// 두 문서를 검사해 문서마다 보고서 하나를 돌려준다
pub fn check_docs(guidance: &Path, catalog: &Path) -> Result<Vec<Report>> {
    let guidance_name = guidance.display().to_string();
    let catalog_name = catalog.display().to_string();

    let reports = vec![
        check_guidance(&guidance_name, &read_document(guidance)?),
        check_catalog(&catalog_name, &read_document(catalog)?)?,
    ];
    for report in &reports {
        info!(
            "{}: {} issue(s)",
            report.document,
            report.issues.len()
        );
    }
    Ok(reports)
}

pub fn required_policy(guidance: &Guidance, subject: PolicySubject) -> Result<Language> {
    guidance.policy(subject).ok_or(CheckError::NoPolicy(subject))
}

/// git 이 `commit-msg` 훅에 넘기는 글에 커밋 메시지 정책을 적용한다
pub fn check_commit(guidance: &Guidance, message: &str) -> Result<()> {
    let language = required_policy(guidance, PolicySubject::CommitMessages)?;
    check_commit_message(message, language)?;
    Ok(())
}

#[derive(Debug)]
pub struct FileViolations {
    pub path: PathBuf,
    pub violations: Vec<PolicyViolation>,
}

/// `paths` 아래의 모든 `.rs` 파일을 파일 이름 순서로 모은다. 숨김 항목,
/// gitignore 대상, `target/` 디렉터리는 건너뛴다.
pub fn collect_rust_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let Some((first, rest)) = paths.split_first() else {
        return Ok(Vec::new());
    };
    for path in paths {
        if !path.exists() {
            return Err(CheckError::Io {
                path: path.clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file or directory"),
            });
        }
    }

    let mut builder = WalkBuilder::new(first);
    for path in rest {
        builder.add(path);
    }
    builder
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|ft| ft.is_dir());
            !(is_dir && entry.depth() > 0 && entry.file_name() == "target")
        });

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_some_and(|ft| ft.is_file())
            && path.extension().is_some_and(|ext| ext == "rs")
        {
            debug!("Found {}", path.display());
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// 주석이 `language` 를 어긴 파일. 깨끗한 파일은 빠진다.
pub fn scan_comments(paths: &[PathBuf], language: Language) -> Result<Vec<FileViolations>> {
    let files = collect_rust_files(paths)?;
    info!("Scanning comments in {} file(s)", files.len());

    let mut findings = Vec::new();
    for path in files {
        let violations = check_comments(&read_document(&path)?, language);
        if !violations.is_empty() {
            warn!("{}: {} comment(s) not in {}", path.display(), violations.len(), language);
            findings.push(FileViolations { path, violations });
        }
    }
    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const GUIDE: &str = "# 기여 안내\n\n\
```bash\n\
cargo build\n\
cargo run -p primer\n\
cargo test\n\
cargo test test_name\n\
cargo check\n\
cargo fmt\n\
cargo clippy\n\
```\n\n\
- 커밋 메시지: 한국어\n\
- 코드 주석: 한국어\n";

    #[test]
    fn test_check_guidance_clean() {
        let report = check_guidance("CONTRIBUTING.md", GUIDE);
        assert!(report.issues.is_empty(), "{:?}", report.issues);
    }

    #[test]
    fn test_check_guidance_reports_foreign_tool() {
        let text = GUIDE.replace("cargo check", "make check");
        let report = check_guidance("CONTRIBUTING.md", &text);
        assert!(report.has_errors());
    }

    #[test]
    fn test_check_catalog_empty_document() {
        let err = check_catalog("empty.md", "# nothing here\n").unwrap_err();
        assert!(matches!(err, CheckError::Document { .. }));
    }

    #[test]
    fn test_check_docs_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = check_docs(&dir.path().join("nope.md"), &dir.path().join("also.md")).unwrap_err();
        assert!(matches!(err, CheckError::Io { .. }));
    }

    #[test]
    fn test_check_commit() {
        let guidance = Guidance::parse(GUIDE);
        assert!(check_commit(&guidance, "서버 틱 처리 수정\n").is_ok());
        assert!(matches!(
            check_commit(&guidance, "Fix tick handling\n"),
            Err(CheckError::Policy(PolicyViolation::WrongLanguage { .. }))
        ));
    }

    #[test]
    fn test_check_commit_without_policy() {
        let guidance = Guidance::parse("```bash\ncargo build\n```\n");
        assert!(matches!(
            check_commit(&guidance, "anything"),
            Err(CheckError::NoPolicy(PolicySubject::CommitMessages))
        ));
    }

    #[test]
    fn test_scan_comments_recurses_and_skips_target() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src/net")).unwrap();
        fs::create_dir_all(dir.path().join("target/debug")).unwrap();
        fs::create_dir_all(dir.path().join(".cache")).unwrap();
        fs::write(dir.path().join("src/lib.rs"), "// 서버 상태\nfn a() {}\n").unwrap();
        fs::write(dir.path().join("src/net/mod.rs"), "// tick loop\nfn b() {}\n").unwrap();
        fs::write(dir.path().join("src/notes.txt"), "// not rust\n").unwrap();
        fs::write(dir.path().join("target/debug/gen.rs"), "// generated\n").unwrap();
        fs::write(dir.path().join(".cache/tmp.rs"), "// cached\n").unwrap();

        let files = collect_rust_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files.len(), 2);

        let findings = scan_comments(&[dir.path().to_path_buf()], Language::Korean).unwrap();
        assert_eq!(findings.len(), 1);
        assert!(findings[0].path.ends_with("src/net/mod.rs"));
        assert_eq!(findings[0].violations.len(), 1);
    }

    #[test]
    fn test_collect_rust_files_missing_path() {
        let dir = TempDir::new().unwrap();
        assert!(collect_rust_files(&[dir.path().join("missing")]).is_err());
    }
}
