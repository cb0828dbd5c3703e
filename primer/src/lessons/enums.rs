//! 열거형은 변형마다 데이터를 가지고, `match` 는 모든 경우를 다뤄야 하며,
//! `Option` 이 null 을 대신한다. 패킷 열거형은 UDP 게임 프로토콜이 전송하는
//! 방식 그대로 bincode 로 직렬화된다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use bincode::{deserialize, serialize};
use serde::{Deserialize, Serialize};

pub struct Enums;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Packet {
    Connect { client_version: u32 },
    Move { x: f32, y: f32 },
    Chat(String),
    Disconnect,
}

impl Packet {
    pub fn describe(&self) -> String {
        match self {
            Packet::Connect { client_version } => format!("connect (v{})", client_version),
            Packet::Move { x, y } => format!("move to ({}, {})", x, y),
            Packet::Chat(text) if text.is_empty() => "empty chat".to_string(),
            Packet::Chat(text) => format!("chat: {}", text),
            Packet::Disconnect => "disconnect".to_string(),
        }
    }
}

/// 패킷을 전송용 바이트로 인코딩한다
pub fn encode(packet: &Packet) -> Result<Vec<u8>, bincode::Error> {
    serialize(packet)
}

pub fn decode(bytes: &[u8]) -> Result<Packet, bincode::Error> {
    deserialize(bytes)
}

pub fn find_player(ids: &[u32], id: u32) -> Option<usize> {
    ids.iter().position(|candidate| *candidate == id)
}

/// 매치 가드, 범위, `@` 바인딩을 한곳에서
pub fn classify_hp(hp: i32) -> String {
    match hp {
        i32::MIN..=0 => "dead".to_string(),
        n @ 1..=20 => format!("critical ({})", n),
        n if n % 2 == 0 => format!("healthy, even ({})", n),
        n => format!("healthy ({})", n),
    }
}

/// `while let` 으로 대기 중인 패킷을 꺼내며 이동 패킷을 센다
pub fn drain_moves(mut queue: Vec<Packet>) -> usize {
    let mut moves = 0;
    while let Some(packet) = queue.pop() {
        if let Packet::Move { .. } = packet {
            moves += 1;
        }
    }
    moves
}

impl Lesson for Enums {
    fn number(&self) -> u32 {
        6
    }

    fn slug(&self) -> &'static str {
        "enums"
    }

    fn title(&self) -> &'static str {
        "Enums and pattern matching"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("enum class Color : uint16_t", "#[repr(u16)] enum, scoped like enum class"),
            (
                "std::variant plus std::visit",
                "enum variants carry data and match destructures them",
            ),
            ("switch without default silently skips new cases", "match must cover every variant"),
            ("std::optional<T> or nullptr", "Option<T>; there are no null references"),
            ("the default: label", "the _ catch-all arm"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Basic enums");
        let facing = Direction::Left;
        out.line(format!("{:?} is the opposite of {:?}", facing.opposite(), facing));

        out.heading("Enums with data");
        let packets = vec![
            Packet::Connect { client_version: 3 },
            Packet::Move { x: 1.5, y: -2.0 },
            Packet::Chat("gg".to_string()),
            Packet::Disconnect,
        ];
        for packet in &packets {
            out.line(packet.describe());
        }

        let bytes = encode(&packets[1]).map_err(|e| PrimerError::Lesson {
            chapter: 6,
            message: e.to_string(),
        })?;
        let decoded = decode(&bytes).map_err(|e| PrimerError::Lesson {
            chapter: 6,
            message: e.to_string(),
        })?;
        out.line(format!(
            "bincode puts {:?} on the wire in {} bytes and reads back {:?}",
            packets[1],
            bytes.len(),
            decoded
        ));

        out.heading("Option");
        let ids = [7, 11, 42];
        match find_player(&ids, 42) {
            Some(index) => out.line(format!("player 42 found at index {}", index)),
            None => out.line("player 42 not found"),
        }
        let missing = find_player(&ids, 5);
        out.line(format!(
            "missing player: {:?}, unwrap_or(usize::MAX) = {}",
            missing,
            missing.unwrap_or(usize::MAX)
        ));

        out.heading("match");
        for hp in [-5, 12, 64, 77] {
            out.line(format!("hp {} -> {}", hp, classify_hp(hp)));
        }

        out.heading("if let / while let");
        if let Packet::Chat(text) = &packets[2] {
            out.line(format!("if let pulls out the chat text: {}", text));
        }
        out.line(format!("while let drained {} move packet(s)", drain_moves(packets)));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_direction() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Right.opposite().opposite(), Direction::Right);
    }

    #[test]
    fn test_packet_serialization_move() {
        let packet = Packet::Move { x: 3.0, y: 4.0 };
        let bytes = encode(&packet).unwrap();
        assert_eq!(decode(&bytes).unwrap(), packet);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(decode(&[0xff, 0xff, 0xff, 0xff]).is_err());
    }

    #[test]
    fn test_describe() {
        assert_eq!(Packet::Chat(String::new()).describe(), "empty chat");
        assert_eq!(
            Packet::Connect { client_version: 2 }.describe(),
            "connect (v2)"
        );
    }

    #[test]
    fn test_classify_hp() {
        assert_eq!(classify_hp(0), "dead");
        assert_eq!(classify_hp(20), "critical (20)");
        assert_eq!(classify_hp(64), "healthy, even (64)");
        assert_eq!(classify_hp(77), "healthy (77)");
    }

    #[test]
    fn test_drain_moves() {
        let queue = vec![
            Packet::Move { x: 0.0, y: 0.0 },
            Packet::Disconnect,
            Packet::Move { x: 1.0, y: 1.0 },
        ];
        assert_eq!(drain_moves(queue), 2);
    }
}
