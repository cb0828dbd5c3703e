//! 소유권: 모든 값에는 정확히 한 명의 소유자가 있고 소유자와 함께 drop 된다.
//! 대입은 기본이 이동이다. `Copy` 타입만 복제된다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;

pub struct Ownership;

/// 평범한 데이터인 위치. 복제가 싸서 `Copy` 다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// 이름을 값으로 받는다. 호출한 쪽은 더 이상 쓸 수 없다.
pub fn register_player(name: String) -> usize {
    name.len()
}

pub fn spawn_position(x: f32, y: f32) -> Position {
    Position { x, y }
}

pub fn default_player_name() -> String {
    String::from("guest")
}

/// 소유권이 들어갔다가 다시 나온다
pub fn tag_player(mut name: String) -> String {
    name.push_str("#1");
    name
}

/// 빌림을 모를 때의 어색한 방식: 결과와 함께 값을 돌려준다
pub fn name_length_awkward(name: String) -> (String, usize) {
    let len = name.len();
    (name, len)
}

impl Lesson for Ownership {
    fn number(&self) -> u32 {
        2
    }

    fn slug(&self) -> &'static str {
        "ownership"
    }

    fn title(&self) -> &'static str {
        "Ownership"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "std::string s2 = s1; deep-copies",
                "let s2 = s1; moves and s1 is unusable afterwards",
            ),
            (
                "std::move is opt-in and leaves a valid but unspecified object",
                "moving is the default and the moved-from binding is statically dead",
            ),
            (
                "std::unique_ptr gives single ownership as a library type",
                "every value has exactly one owner at language level",
            ),
            ("destructors run at scope end (RAII)", "Drop runs at scope end, the same RAII"),
            (
                "copy constructors run implicitly and may be expensive",
                "Copy only for cheap bitwise types; deep copies need .clone()",
            ),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Ownership rules");
        {
            let motd = String::from("welcome to the arena");
            out.line(format!("`motd` owns its heap buffer: \"{}\"", motd));
        }
        out.line("leaving the scope drops `motd` and frees the buffer (RAII without destructors to write)");

        out.heading("Move semantics");
        let s1 = String::from("player-one");
        let s2 = s1;
        out.line(format!("let s2 = s1; moves the buffer, s2 = {}", s2));
        out.line("using s1 afterwards is error[E0382]: borrow of moved value");

        let spawn = spawn_position(10.0, 20.0);
        let copy = spawn;
        out.line(format!(
            "Position is Copy, so both stay usable: {:?} and {:?}",
            spawn, copy
        ));

        out.heading("Clone and Copy");
        let original = String::from("lobby");
        let cloned = original.clone();
        out.line(format!(
            "clone() is an explicit deep copy: {} / {}",
            original, cloned
        ));
        out.line("integers, floats, bool, char and tuples of Copy types are Copy");

        out.heading("Ownership through functions");
        let name = String::from("rustacean");
        let len = register_player(name);
        out.line(format!("register_player took the name ({} bytes)", len));

        let guest = default_player_name();
        out.line(format!("default_player_name gives ownership: {}", guest));

        let tagged = tag_player(guest);
        out.line(format!("tag_player takes and gives back: {}", tagged));

        let (tagged, len) = name_length_awkward(tagged);
        out.line(format!(
            "returning a tuple works but is clumsy: ({}, {}); borrowing fixes this next",
            tagged, len
        ));
        Ok(())
    }
}
