//! # 문서 검사기
//!
//! 기여 가이드와 패키지 추천 목록이 사실과 맞는지 지킨다. 두 문서를 `shared`
//! 모델로 읽고, 새로 온 사람이 걸려 넘어질 만한 곳을 보고한다.
//!
//! ## 검사 항목
//!
//! ### 기여 가이드
//! - 개발 흐름의 모든 단계 (빌드, 실행, 테스트, 단일 테스트, 검사, 포맷, 린트)
//!   에 명령이 적혀 있다
//! - 적힌 명령은 실제 하위 명령을 쓰는 cargo 호출이다
//! - 커밋 메시지와 코드 주석의 언어 정책이 적혀 있다
//!
//! ### 추천 목록
//! - 크레이트마다 한 번, 용도와 함께, 알려진 관심사 아래에 나온다
//! - 예시 매니페스트와 C++ 비교표는 목록에 있는 크레이트만 쓴다
//!
//! ### 언어 정책
//! 커밋 메시지 (`commit-msg` 훅) 와 소스 주석이 가이드가 요구하는 언어로
//! 쓰였는지 검사한다.
//!
//! ## 모듈 구성
//!
//! - `checks`: 문서 읽기, 검사 실행, 소스 트리 훑기
//! - `render`: 텍스트와 JSON 출력
//! - `error`: 오류 타입 [`CheckError`]

pub mod checks;
pub mod error;
pub mod render;

pub use checks::{check_catalog, check_commit, check_docs, check_guidance, scan_comments, FileViolations};
pub use error::{CheckError, Result};
pub use render::{render_catalog, render_commands, render_reports, OutputFormat};
