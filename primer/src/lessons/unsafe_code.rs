//! `unsafe` 는 컴파일러가 검사할 수 없는 다섯 가지 연산을 연다. raw 포인터
//! 역참조, unsafe 함수 호출, 가변 static 접근, unsafe 트레이트 구현,
//! union 필드 읽기다. 관례는 불변식이 unsafe 블록을 건전하게 만드는
//! 안전한 API 로 감싸는 것이다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use std::slice;
use std::sync::atomic::{AtomicU32, Ordering};

pub struct UnsafeCode;

/// 겹치지 않는 두 가변 절반에 대한 안전한 감싸개
pub fn split_at_mut(values: &mut [i32], mid: usize) -> (&mut [i32], &mut [i32]) {
    let len = values.len();
    assert!(mid <= len, "mid {} out of bounds for length {}", mid, len);
    let ptr = values.as_mut_ptr();

    // SAFETY: 두 범위 모두 `values` 안에 있고 겹치지 않는다
    unsafe {
        (
            slice::from_raw_parts_mut(ptr, mid),
            slice::from_raw_parts_mut(ptr.add(mid), len - mid),
        )
    }
}

/// `offset` 에서 리틀 엔디언 u16 을 읽는다. 끝을 넘으면 `None`.
pub fn read_u16_le(buffer: &[u8], offset: usize) -> Option<u16> {
    if offset.checked_add(2)? > buffer.len() {
        return None;
    }
    // SAFETY: 범위는 위에서 검사했고 read_unaligned 는 정렬을 요구하지 않는다
    let raw = unsafe { std::ptr::read_unaligned(buffer.as_ptr().add(offset) as *const u16) };
    Some(u16::from_le(raw))
}

/// # Safety
///
/// `ptr` 은 null 이 아니고 정렬되어 있으며 초기화된 `i32` 를 가리켜야 한다.
pub unsafe fn double_in_place(ptr: *mut i32) {
    *ptr *= 2;
}

extern "C" {
    fn abs(input: i32) -> i32;
}

pub fn c_abs(value: i32) -> i32 {
    // SAFETY: libc `abs` 는 유효한 i32 말고는 전제 조건이 없다
    unsafe { abs(value) }
}

/// 전역 패킷 카운터. `static mut` 이면 접근할 때마다 `unsafe` 가 필요하지만
/// 원자 타입은 그것 없이 같은 전역을 준다.
pub static PACKETS_SEEN: AtomicU32 = AtomicU32::new(0);

pub fn record_packet() -> u32 {
    PACKETS_SEEN.fetch_add(1, Ordering::Relaxed) + 1
}

/// 구현하는 쪽은 모든 바이트가 0 인 값이 유효하다고 약속한다
///
/// # Safety
///
/// 모든 필드가 0 패턴을 받아들이는 타입에만 구현한다.
pub unsafe trait Zeroable: Sized {
    fn zeroed() -> Self {
        // SAFETY: 이 unsafe 트레이트를 구현한 쪽이 보장한다
        unsafe { std::mem::zeroed() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct Snapshot {
    pub tick: u32,
    pub x: f32,
    pub y: f32,
}

// SAFETY: u32 와 f32 는 0 으로 채워도 유효하다
unsafe impl Zeroable for Snapshot {}

impl Lesson for UnsafeCode {
    fn number(&self) -> u32 {
        16
    }

    fn slug(&self) -> &'static str {
        "unsafe_code"
    }

    fn title(&self) -> &'static str {
        "Unsafe Rust"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "any line may dereference a raw pointer",
                "raw pointers are dereferenced only inside unsafe",
            ),
            ("const T* and T*", "*const T and *mut T"),
            ("extern \"C\" declarations", "extern \"C\" blocks, called inside unsafe"),
            ("global mutable variables", "static mut needs unsafe; atomics are preferred"),
            (
                "safety preconditions live in comments",
                "unsafe fn and unsafe trait carry the contract in the type system",
            ),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Raw pointers");
        let mut hp = 50;
        let read_ptr = &hp as *const i32;
        // SAFETY: `read_ptr` 은 살아 있는 지역 변수를 가리킨다
        let value = unsafe { *read_ptr };
        out.line(format!("creating raw pointers is safe; dereferencing {} needed unsafe", value));
        let write_ptr = &mut hp as *mut i32;
        // SAFETY: `write_ptr` 이 `hp` 에 대한 유일한 접근이다
        unsafe { double_in_place(write_ptr) };
        out.line(format!("unsafe fn doubled hp to {}", hp));

        out.heading("Safe abstractions");
        let mut lanes = [1, 2, 3, 4, 5];
        let (left, right) = split_at_mut(&mut lanes, 2);
        left[0] = 10;
        right[0] = 30;
        out.line(format!(
            "split_at_mut hands out two &mut halves: {:?}",
            lanes
        ));
        let header = [0x34, 0x12, 0xff];
        out.line(format!(
            "read_u16_le(header, 0) = {:?}, at 2 = {:?}",
            read_u16_le(&header, 0).map(|v| format!("{:#06x}", v)),
            read_u16_le(&header, 2)
        ));

        out.heading("FFI");
        out.line(format!("libc abs(-42) via extern \"C\" = {}", c_abs(-42)));

        out.heading("Mutable statics");
        let count = record_packet();
        out.line(format!(
            "AtomicU32 global incremented to at least {} without unsafe",
            count
        ));

        out.heading("Unsafe traits");
        let snapshot = Snapshot::zeroed();
        out.line(format!("Snapshot::zeroed() = {:?}", snapshot));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_mut() {
        let mut values = [1, 2, 3, 4];
        let (a, b) = split_at_mut(&mut values, 1);
        assert_eq!(a, &mut [1]);
        assert_eq!(b, &mut [2, 3, 4]);
        b[0] = 20;
        assert_eq!(values, [1, 20, 3, 4]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_split_at_mut_out_of_bounds() {
        let mut values = [1, 2];
        split_at_mut(&mut values, 3);
    }

    #[test]
    fn test_read_u16_le() {
        assert_eq!(read_u16_le(&[0x34, 0x12], 0), Some(0x1234));
        assert_eq!(read_u16_le(&[0x34, 0x12], 1), None);
        assert_eq!(read_u16_le(&[], usize::MAX), None);
    }

    #[test]
    fn test_c_abs() {
        assert_eq!(c_abs(-7), 7);
        assert_eq!(c_abs(3), 3);
    }

    #[test]
    fn test_zeroed_snapshot() {
        assert_eq!(
            Snapshot::zeroed(),
            Snapshot {
                tick: 0,
                x: 0.0,
                y: 0.0
            }
        );
    }

    #[test]
    fn test_record_packet_increments() {
        let first = record_packet();
        let second = record_packet();
        assert!(second > first);
    }
}
