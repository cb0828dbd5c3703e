//! 트레이트: 상속 없이 공유하는 동작
//!
//! `impl Trait` 과 제네릭 바운드는 정적으로 디스패치하고 `dyn Trait` 은
//! vtable 을 거친다. 연산자도 트레이트다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

pub struct Traits;

pub trait Summary {
    fn author(&self) -> String;

    /// 필수 메서드 위에 만든 기본 메서드
    fn summarize(&self) -> String {
        format!("(read more from {}...)", self.author())
    }
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub sender: String,
    pub text: String,
}

impl Summary for ChatMessage {
    fn author(&self) -> String {
        format!("@{}", self.sender)
    }

    fn summarize(&self) -> String {
        format!("{}: {}", self.author(), self.text)
    }
}

#[derive(Debug, Clone)]
pub struct MatchResult {
    pub winner: String,
    pub rounds: u32,
}

impl Summary for MatchResult {
    fn author(&self) -> String {
        self.winner.clone()
    }
}

/// `impl Trait` 을 통한 정적 디스패치
pub fn notify(item: &impl Summary) -> String {
    format!("Breaking news! {}", item.summarize())
}

pub trait Shape {
    fn area(&self) -> f32;
    fn name(&self) -> &'static str;
}

pub struct Circle {
    pub radius: f32,
}

pub struct Rect {
    pub width: f32,
    pub height: f32,
}

impl Shape for Circle {
    fn area(&self) -> f32 {
        std::f32::consts::PI * self.radius * self.radius
    }

    fn name(&self) -> &'static str {
        "circle"
    }
}

impl Shape for Rect {
    fn area(&self) -> f32 {
        self.width * self.height
    }

    fn name(&self) -> &'static str {
        "rect"
    }
}

/// 서로 다른 타입 목록에 대한 동적 디스패치
pub fn total_area(shapes: &[Box<dyn Shape>]) -> f32 {
    shapes.iter().map(|s| s.area()).sum()
}

/// 연산자 오버로딩을 갖춘 2차원 벡터
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, scalar: f32) -> Vec2 {
        Vec2::new(self.x * scalar, self.y * scalar)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;

    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Vec2) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// 상위 트레이트: 상자에 찍을 수 있는 것은 `Display` 여야 한다
pub trait OutlinePrint: fmt::Display {
    fn outline(&self) -> String {
        let text = self.to_string();
        let border = "*".repeat(text.len() + 4);
        format!("{}\n* {} *\n{}", border, text, border)
    }
}

impl OutlinePrint for Vec2 {}

impl Lesson for Traits {
    fn number(&self) -> u32 {
        7
    }

    fn slug(&self) -> &'static str {
        "traits"
    }

    fn title(&self) -> &'static str {
        "Traits"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("abstract base class with pure virtual functions", "trait with required methods"),
            ("class NewsArticle : public Summary", "impl Summary for NewsArticle, no inheritance"),
            (
                "C++20 concepts with requires clauses",
                "trait bounds and where clauses, checked at the definition",
            ),
            (
                "Summary* or std::unique_ptr<Summary> for dynamic dispatch",
                "&dyn Summary or Box<dyn Summary>",
            ),
            ("operator+ as a member or free function", "impl std::ops::Add"),
            (
                "compiler-generated copy and comparison members",
                "#[derive(Clone, PartialEq, Debug)]",
            ),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Implementing traits");
        let chat = ChatMessage {
            sender: "ferris".to_string(),
            text: "ready?".to_string(),
        };
        out.line(chat.summarize());

        out.heading("Default implementations");
        let result = MatchResult {
            winner: "blue team".to_string(),
            rounds: 3,
        };
        out.line(format!("{} (after {} rounds)", result.summarize(), result.rounds));

        out.heading("Trait bounds");
        out.line(notify(&chat));

        out.heading("Trait objects");
        let shapes: Vec<Box<dyn Shape>> = vec![
            Box::new(Circle { radius: 1.0 }),
            Box::new(Rect {
                width: 2.0,
                height: 3.0,
            }),
        ];
        for shape in &shapes {
            out.line(format!("{} area {:.2}", shape.name(), shape.area()));
        }
        out.line(format!("total area {:.2}", total_area(&shapes)));

        out.heading("Derived traits");
        let a = Vec2::new(1.0, 2.0);
        out.line(format!(
            "Debug {:?}, Default {:?}, PartialEq {}",
            a,
            Vec2::default(),
            a == Vec2::new(1.0, 2.0)
        ));

        out.heading("Operator overloading");
        let velocity = Vec2::new(3.0, 4.0);
        let mut position = Vec2::default();
        position += velocity * 0.5;
        out.line(format!(
            "position {} after half a tick, speed {}, reversed {}",
            position,
            velocity.length(),
            -velocity
        ));
        out.line(format!("difference {}", velocity - position));

        out.heading("Supertraits");
        for line in position.outline().lines() {
            out.line(line);
        }
        Ok(())
    }
}
