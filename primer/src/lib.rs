//! # 게임 서버 입문서
//!
//! 게임 서버 개발자에게 필요한 러스트를 짧은 열아홉 장으로 훑는다. 장마다
//! 러스트 관용구를 같은 문제를 C++20 으로 풀던 방식과 대비한다. 각 장은
//! 보여 준 것을 [`Transcript`] 에 적는 [`Lesson`] 이다.
//!
//! ## 모듈 구성
//!
//! ### 장 목록 (`curriculum`)
//! 순서가 있는 장 목록:
//! - 번호나 슬러그로 장 찾기
//! - 고른 장을 실행하고 기록 모으기
//! - 기록 끝에 C++20 비교 절 붙이기
//!
//! ### 장 (`lessons`)
//! 장마다 모듈 하나. 예제 함수는 공개되어 있어 장이 설명하는 동작을
//! 테스트가 확인한다.
//!
//! ### 기록 (`transcript`)
//! 장을 실행하며 절 단위로 모은 출력.

pub mod curriculum;
pub mod lessons;
pub mod transcript;

pub use curriculum::{Curriculum, Lesson, PrimerError, CPP_COMPARISON};
pub use transcript::{Section, Transcript};
