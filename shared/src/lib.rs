//! # 공용 문서 모델
//!
//! 모든 기여자가 읽는 두 프로젝트 문서의 모델이다. 하나는 기여 가이드 (빌드와
//! 테스트 명령, 언어 정책) 이고 다른 하나는 패키지 추천 목록이다. 둘 다 평범한
//! 마크다운이며, 이 크레이트가 타입 있는 값으로 바꾸고 서로 어긋나지 않는지
//! 검사한다.
//!
//! ## 모듈
//!
//! - `markdown`: `tree-sitter-md` 로 제목, 표, 펜스, 목록을 읽는다
//! - `catalog`: 관심사별 추천 크레이트, 예시 매니페스트, C++ 비교
//! - `manifest`: `toml` 로 읽는 의존성 조각
//! - `guidance`: 적힌 cargo 명령과 언어 정책
//! - `policy`: 한글 판별, 커밋 메시지와 주석 검사
//! - `issue`: 찾은 문제와 문서별 보고서

pub mod catalog;
pub mod error;
pub mod guidance;
pub mod issue;
pub mod manifest;
pub mod markdown;
pub mod policy;

pub use catalog::{Catalog, Category, Comparison, Recommendation};
pub use error::{DocError, Result};
pub use guidance::{CommandKind, DevCommand, Guidance};
pub use issue::{Issue, IssueKind, Report, Severity};
pub use manifest::{Dependency, Manifest};
pub use policy::{Language, LanguagePolicy, PolicySubject, PolicyViolation};

/// 워크스페이스 루트 기준 기여 가이드의 기본 위치
pub const GUIDANCE_PATH: &str = "CONTRIBUTING.md";

/// 패키지 추천 문서의 기본 위치
pub const CATALOG_PATH: &str = "docs/recommend-lib.md";
