//! 제네릭은 단형화된다. 인스턴스마다 따로 특수화된 코드로 컴파일되고,
//! 트레이트 바운드는 인스턴스화 시점이 아니라 정의 시점에 미리
//! 검사된다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use std::marker::PhantomData;

pub struct Generics;

pub fn largest<T: PartialOrd + Copy>(list: &[T]) -> Option<T> {
    let mut iter = list.iter().copied();
    let mut best = iter.next()?;
    for item in iter {
        if item > best {
            best = item;
        }
    }
    Some(best)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<T> {
    pub x: T,
    pub y: T,
}

impl<T> Point<T> {
    pub fn x(&self) -> &T {
        &self.x
    }
}

/// `f32` 점에서만 쓸 수 있다
impl Point<f32> {
    pub fn distance_from_origin(&self) -> f32 {
        (self.x.powi(2) + self.y.powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pair<X, Y> {
    pub first: X,
    pub second: Y,
}

impl<X, Y> Pair<X, Y> {
    /// 자기 타입 매개변수를 가진 제네릭 메서드
    pub fn mixup<X2, Y2>(self, other: Pair<X2, Y2>) -> Pair<X, Y2> {
        Pair {
            first: self.first,
            second: other.second,
        }
    }
}

/// 연관 항목 타입을 가진 컨테이너
pub trait Container {
    type Item;

    fn get(&self, index: usize) -> Option<&Self::Item>;
    fn first(&self) -> Option<&Self::Item> {
        self.get(0)
    }
    fn len(&self) -> usize;
}

#[derive(Debug, Default)]
pub struct Inventory {
    items: Vec<String>,
}

impl Inventory {
    pub fn add(&mut self, item: &str) {
        self.items.push(item.to_string());
    }
}

impl Container for Inventory {
    type Item = String;

    fn get(&self, index: usize) -> Option<&String> {
        self.items.get(index)
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// 최근 `N` 개 표본을 담는 고정 용량 링. 크기는 컴파일 타임에 정해진다.
#[derive(Debug)]
pub struct PingWindow<const N: usize> {
    samples: [u32; N],
    next: usize,
    filled: usize,
}

impl<const N: usize> PingWindow<N> {
    pub fn new() -> Self {
        Self {
            samples: [0; N],
            next: 0,
            filled: 0,
        }
    }

    pub fn push(&mut self, ms: u32) {
        if N == 0 {
            return;
        }
        self.samples[self.next] = ms;
        self.next = (self.next + 1) % N;
        self.filled = (self.filled + 1).min(N);
    }

    pub fn average(&self) -> Option<f32> {
        if self.filled == 0 {
            return None;
        }
        let sum: u32 = self.samples[..self.filled].iter().sum();
        Some(sum as f32 / self.filled as f32)
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for PingWindow<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// 타입 있는 id 용 표식 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerTag;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomTag;

/// 다른 엔티티의 id 와 섞일 수 없는 id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Id<T> {
    pub raw: u32,
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    pub fn new(raw: u32) -> Self {
        Self {
            raw,
            _marker: PhantomData,
        }
    }
}

pub fn join_room(player: Id<PlayerTag>, room: Id<RoomTag>) -> String {
    format!("player {} joined room {}", player.raw, room.raw)
}

impl Lesson for Generics {
    fn number(&self) -> u32 {
        8
    }

    fn slug(&self) -> &'static str {
        "generics"
    }

    fn title(&self) -> &'static str {
        "Generics"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("templates are monomorphized", "generics are monomorphized too, at zero runtime cost"),
            (
                "template errors surface at instantiation",
                "bounds are checked once where the generic is defined",
            ),
            ("function<int>()", "function::<i32>() with the turbofish"),
            ("template<typename T, size_t N>", "const generics: struct Buffer<T, const N: usize>"),
            ("typename T::value_type member typedefs", "associated types such as Iterator::Item"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Generic functions");
        out.line(format!("largest score {:?}", largest(&[34, 50, 25, 100, 65])));
        out.line(format!("largest char {:?}", largest(&['y', 'm', 'a', 'q'])));
        out.line(format!("largest of nothing {:?}", largest::<f64>(&[])));

        out.heading("Generic structs");
        let int_point = Point { x: 5, y: 10 };
        let float_point = Point { x: 3.0f32, y: 4.0 };
        out.line(format!(
            "Point<i32>.x() = {}, Point<f32> distance = {}",
            int_point.x(),
            float_point.distance_from_origin()
        ));

        out.heading("Generic methods");
        let p1 = Pair {
            first: 5,
            second: 10.4,
        };
        let p2 = Pair {
            first: "hello",
            second: 'c',
        };
        let p3 = p1.mixup(p2);
        out.line(format!("mixup -> first {}, second {}", p3.first, p3.second));

        out.heading("Associated types");
        let mut inventory = Inventory::default();
        inventory.add("sword");
        inventory.add("potion");
        out.line(format!(
            "inventory holds {} item(s), first {:?}",
            inventory.len(),
            inventory.first()
        ));

        out.heading("Const generics");
        let mut window: PingWindow<3> = PingWindow::new();
        for ms in [40, 60, 80, 100] {
            window.push(ms);
        }
        out.line(format!(
            "last {} pings average {:?} ms",
            window.capacity(),
            window.average()
        ));

        out.heading("PhantomData");
        let player = Id::<PlayerTag>::new(7);
        let room = Id::<RoomTag>::new(2);
        out.line(join_room(player, room));
        out.line("join_room(room, player) does not compile: the tags differ");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn test_largest() {
        assert_eq!(largest(&[1, 5, 3]), Some(5));
        assert_eq!(largest(&[2.5, -1.0]), Some(2.5));
        assert_eq!(largest::<u8>(&[]), None);
    }

    #[test]
    fn test_distance_from_origin() {
        let p = Point { x: 3.0f32, y: 4.0 };
        assert_approx_eq!(p.distance_from_origin(), 5.0);
    }

    #[test]
    fn test_mixup() {
        let a = Pair { first: 1, second: 2 };
        let b = Pair {
            first: "x",
            second: "y",
        };
        assert_eq!(a.mixup(b), Pair { first: 1, second: "y" });
    }

    #[test]
    fn test_ping_window_wraps() {
        let mut window: PingWindow<2> = PingWindow::new();
        assert_eq!(window.average(), None);
        window.push(10);
        assert_approx_eq!(window.average().unwrap(), 10.0);
        window.push(20);
        window.push(40);
        assert_approx_eq!(window.average().unwrap(), 30.0);
    }

    #[test]
    fn test_inventory_container() {
        let mut inventory = Inventory::default();
        assert!(inventory.first().is_none());
        inventory.add("shield");
        assert_eq!(inventory.first().map(String::as_str), Some("shield"));
        assert_eq!(inventory.len(), 1);
    }
}
