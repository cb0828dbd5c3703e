//! 워크스페이스 크레이트를 가로지르는 통합 테스트
//!
//! 실제 프로젝트 문서를 검사기에 통과시키고, 바이너리가 하듯 입문서를 돌린다.

use bincode::{deserialize, serialize};
use primer::lessons::enums::{decode, encode, Packet};
use primer::{Curriculum, PrimerError, CPP_COMPARISON};
use serde::{de::DeserializeOwned, Serialize};
use shared::{Catalog, CommandKind, Guidance, Language, PolicySubject};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const GUIDE: &str = include_str!("../CONTRIBUTING.md");
const CATALOG: &str = include_str!("../docs/recommend-lib.md");

fn workspace_path(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

/// 프로젝트 문서 테스트
mod document_tests {
    use super::*;

    /// 저장소의 기여 가이드가 개발 흐름의 모든 단계를 적고 있다
    #[test]
    fn contributor_guide_is_consistent() {
        let guidance = Guidance::parse(GUIDE);
        let issues = guidance.validate();
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);

        for kind in CommandKind::ALL {
            assert!(guidance.command(kind).is_some(), "missing {}", kind);
        }
        assert_eq!(
            guidance.command(CommandKind::TestFilter).unwrap().command_line(),
            "cargo test <test_name>"
        );
        assert_eq!(
            guidance.policy(PolicySubject::CommitMessages),
            Some(Language::Korean)
        );
        assert_eq!(
            guidance.policy(PolicySubject::CodeComments),
            Some(Language::Korean)
        );
    }

    /// 추천 표, 예시 매니페스트, 비교표가 서로 맞는다
    #[test]
    fn recommendation_list_is_consistent() {
        let catalog = Catalog::parse(CATALOG).unwrap();
        let issues = catalog.validate();
        assert!(issues.is_empty(), "unexpected issues: {:?}", issues);

        let manifest = catalog.manifest.as_ref().unwrap();
        for name in manifest.names() {
            assert!(catalog.find(name).is_some(), "{} is not recommended", name);
        }
        for comparison in &catalog.comparisons {
            for name in comparison.rust_crates() {
                assert!(catalog.find(&name).is_some(), "{} is not recommended", name);
            }
        }
    }

    /// 워크스페이스 명령이 실제 대상을 가리킨다
    #[test]
    fn documented_run_command_targets_workspace_member() {
        let guidance = Guidance::parse(GUIDE);
        let run = guidance.command(CommandKind::Run).unwrap();
        let package = run
            .args
            .iter()
            .skip_while(|a| *a != "-p")
            .nth(1)
            .unwrap();
        assert!(workspace_path(package).join("Cargo.toml").exists());
    }
}

/// 문서 검사기 테스트
mod doccheck_tests {
    use super::*;

    #[test]
    fn checker_passes_on_checked_in_documents() {
        let reports = doccheck::check_docs(
            &workspace_path(shared::GUIDANCE_PATH),
            &workspace_path(shared::CATALOG_PATH),
        )
        .unwrap();
        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.issues.is_empty()));
    }

    #[test]
    fn checker_flags_a_broken_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("recommend-lib.md");
        let broken = CATALOG.replace("tracing = \"0.1\"", "tracing = \"0.1\"\nlog4rs = \"1.2\"");
        fs::write(&catalog, broken).unwrap();

        let reports =
            doccheck::check_docs(&workspace_path(shared::GUIDANCE_PATH), &catalog).unwrap();
        assert!(!reports[0].has_errors());
        assert!(reports[1].has_errors());
        assert!(reports[1]
            .issues
            .iter()
            .any(|i| i.message.contains("log4rs")));
    }

    #[test]
    fn commit_hook_follows_guide_policy() {
        let dir = TempDir::new().unwrap();
        let message = dir.path().join("COMMIT_EDITMSG");
        let guidance = Guidance::parse(GUIDE);

        fs::write(&message, "# 주석 줄\n접속 처리 로직 정리\n").unwrap();
        let text = fs::read_to_string(&message).unwrap();
        assert!(doccheck::check_commit(&guidance, &text).is_ok());

        fs::write(&message, "Refactor connection handling\n").unwrap();
        let text = fs::read_to_string(&message).unwrap();
        assert!(doccheck::check_commit(&guidance, &text).is_err());
    }

    #[test]
    fn comment_scan_over_source_tree() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("main.rs"),
            "/// 진입점\nfn main() {\n    let url = \"http://localhost\"; // 기본 주소\n}\n",
        )
        .unwrap();
        let findings = doccheck::scan_comments(&[dir.path().to_path_buf()], Language::Korean).unwrap();
        assert!(findings.is_empty());

        let findings = doccheck::scan_comments(&[dir.path().to_path_buf()], Language::English).unwrap();
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].violations.len(), 2);
    }

    /// 이 저장소의 러스트 주석이 기여 가이드의 주석 정책을 따른다
    #[test]
    fn workspace_comments_follow_guide_policy() {
        let guidance = Guidance::parse(GUIDE);
        let language =
            doccheck::checks::required_policy(&guidance, PolicySubject::CodeComments).unwrap();
        let roots: Vec<PathBuf> = ["shared", "primer", "doccheck", "tests"]
            .iter()
            .map(|dir| workspace_path(dir))
            .collect();

        let findings = doccheck::scan_comments(&roots, language).unwrap();
        let report: Vec<String> = findings
            .iter()
            .flat_map(|f| {
                f.violations
                    .iter()
                    .map(move |v| format!("{}: {}", f.path.display(), v))
            })
            .collect();
        assert!(report.is_empty(), "{}", report.join("\n"));
    }
}

/// 입문서 테스트
mod primer_tests {
    use super::*;

    fn roundtrip<T: Serialize + DeserializeOwned>(value: &T) -> T {
        deserialize(&serialize(value).unwrap()).unwrap()
    }

    /// tokio 런타임을 띄우는 장을 포함해 모든 장을 돌린다
    #[test]
    fn whole_curriculum_runs() {
        let curriculum = Curriculum::standard();
        let transcripts = curriculum.run(&[]).unwrap();
        assert_eq!(transcripts.len(), 19);

        for (idx, transcript) in transcripts.iter().enumerate() {
            assert_eq!(transcript.chapter, idx as u32 + 1);
            assert!(!transcript.sections.is_empty(), "chapter {} is empty", transcript.chapter);
            assert!(transcript
                .render()
                .starts_with(&format!("=== {:02}. ", transcript.chapter)));

            let comparison = transcript.sections.last().unwrap();
            assert_eq!(comparison.title, CPP_COMPARISON);
            assert!(comparison.lines.len() >= 4, "chapter {} has no C++20 contrast", transcript.chapter);
            assert!(comparison.lines.iter().all(|l| l.contains("C++")));
        }
    }

    #[test]
    fn unknown_chapter_is_rejected() {
        let err = Curriculum::standard()
            .run(&["20".to_string()])
            .unwrap_err();
        assert!(matches!(err, PrimerError::UnknownChapter(_)));
    }

    #[test]
    fn lesson_packets_use_bincode_wire_format() {
        let packets = vec![
            Packet::Connect { client_version: 3 },
            Packet::Move { x: 1.5, y: -2.0 },
            Packet::Chat("gg".to_string()),
            Packet::Disconnect,
        ];

        for packet in &packets {
            let bytes = encode(packet).unwrap();
            assert_eq!(bytes, serialize(packet).unwrap());
            assert_eq!(&decode(&bytes).unwrap(), packet);
            assert_eq!(&roundtrip(packet), packet);
        }
        assert!(decode(&[0xff, 0xff, 0xff, 0xff]).is_err());
    }

    #[test]
    fn vector_math_from_traits_chapter() {
        use primer::lessons::traits::Vec2;

        let v = Vec2::new(3.0, 4.0) + Vec2::new(0.0, 0.0);
        assert_approx_eq::assert_approx_eq!(v.length(), 5.0);
    }

    #[tokio::test]
    async fn async_chapter_helpers_inside_runtime() {
        use primer::lessons::async_await::{fetch_pair, pipeline, with_deadline};

        let (a, b) = fetch_pair(10, 11).await;
        assert_eq!((a.as_str(), b.as_str()), ("player-10", "player-11"));
        assert_eq!(pipeline(3).await, vec![1, 2, 3]);
        assert!(with_deadline(100, 1).await.is_err());
    }

    #[test]
    fn async_helpers_with_block_on() {
        let sum = tokio_test::block_on(primer::lessons::async_await::add_async(40, 2));
        assert_eq!(sum, 42);
    }
}
