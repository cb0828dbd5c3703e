//! 이름 있는 필드의 구조체, 튜플 구조체, 유닛 구조체. 동작은 `impl` 블록에
//! 두고, 생성자는 평범한 연관 함수다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;

pub struct Structs;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub level: u32,
    pub hp: u32,
    pub active: bool,
}

impl Player {
    /// 생성자로 쓰는 연관 함수
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            level: 1,
            hp: 100,
            active: true,
        }
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
        if self.hp == 0 {
            self.active = false;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// 플레이어를 소비한다. 예: 세션이 끝날 때
    pub fn into_name(self) -> String {
        self.name
    }
}

/// 튜플 구조체: 필드 이름이 보탤 것이 없다
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

/// `Color` 와 모양은 같지만 다른 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileCoord(pub u8, pub u8, pub u8);

/// 유닛 구조체: 데이터 없는 표식
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heartbeat;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: u32,
    pub height: u32,
}

impl Arena {
    pub fn square(size: u32) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    pub fn can_hold(&self, other: &Arena) -> bool {
        self.width > other.width && self.height > other.height
    }
}

impl Lesson for Structs {
    fn number(&self) -> u32 {
        5
    }

    fn slug(&self) -> &'static str {
        "structs"
    }

    fn title(&self) -> &'static str {
        "Structs"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "struct and class differ in default access",
                "only struct; fields are private outside the module unless pub",
            ),
            ("methods are declared in the class body", "methods live in separate impl blocks"),
            (
                "constructors and member initializer lists",
                "associated functions such as new() by convention",
            ),
            ("const member function", "&self method; &mut self mutates and self consumes"),
            ("static member function", "associated function without self, called with ::"),
            ("inheritance for code reuse", "composition plus traits; structs do not inherit"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Named fields");
        let mut hero = Player::new("hero");
        hero.level = 5;
        out.line(format!("{:?}", hero));

        let sidekick = Player {
            name: String::from("sidekick"),
            ..hero.clone()
        };
        out.line(format!(
            "struct update syntax copies the rest: level {}",
            sidekick.level
        ));

        out.heading("Tuple structs");
        let red = Color(255, 0, 0);
        let tile = TileCoord(1, 2, 0);
        out.line(format!("Color({}, {}, {}) and {:?} are different types", red.0, red.1, red.2, tile));

        out.heading("Unit structs");
        out.line(format!(
            "{:?} carries no data and occupies {} bytes",
            Heartbeat,
            std::mem::size_of::<Heartbeat>()
        ));

        out.heading("Methods");
        hero.take_damage(30);
        out.line(format!("after 30 damage: hp {} alive {}", hero.hp, hero.is_alive()));
        hero.take_damage(500);
        out.line(format!("after 500 damage: hp {} active {}", hero.hp, hero.active));

        let big = Arena {
            width: 30,
            height: 50,
        };
        let small = Arena {
            width: 10,
            height: 40,
        };
        out.line(format!(
            "arena area {}, can hold the small one: {}",
            big.area(),
            big.can_hold(&small)
        ));

        out.heading("Associated functions");
        let square = Arena::square(20);
        out.line(format!("Arena::square(20) = {:?}", square));
        out.line(format!("into_name() consumes the player: {}", hero.into_name()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = Player::new("alice");
        assert_eq!(player.level, 1);
        assert_eq!(player.hp, 100);
        assert!(player.active);
    }

    #[test]
    fn test_take_damage_saturates() {
        let mut player = Player::new("bob");
        player.take_damage(40);
        assert_eq!(player.hp, 60);
        player.take_damage(100);
        assert_eq!(player.hp, 0);
        assert!(!player.is_alive());
        assert!(!player.active);
    }

    #[test]
    fn test_arena_can_hold() {
        let big = Arena::square(10);
        assert!(big.can_hold(&Arena::square(5)));
        assert!(!big.can_hold(&Arena::square(10)));
        assert_eq!(big.area(), 100);
    }
}
