//! 장마다 모듈 하나. 예제는 게임 서버 상황을 빌린다:
//! 플레이어, 세션, 패킷, 틱 루프.

pub mod async_await;
pub mod basics;
pub mod borrowing;
pub mod collections;
pub mod concurrency;
pub mod enums;
pub mod error_handling;
pub mod generics;
pub mod idioms;
pub mod iterators;
pub mod lifetimes;
pub mod macros;
pub mod modules;
pub mod ownership;
pub mod smart_pointers;
pub mod structs;
pub mod testing;
pub mod traits;
pub mod unsafe_code;
