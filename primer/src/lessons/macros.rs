//! 선언적 매크로는 글자가 아니라 토큰 트리에 매치한다. 위생적이며
//! 전개 결과는 다른 코드처럼 타입 검사를 받는다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use std::collections::HashMap;

pub struct Macros;

#[macro_export]
macro_rules! square {
    ($x:expr) => {
        $x * $x
    };
}

/// 재귀 매크로: 식 여러 개의 최댓값
#[macro_export]
macro_rules! max_of {
    ($x:expr) => { $x };
    ($x:expr, $($rest:expr),+) => {{
        let head = $x;
        let tail = $crate::max_of!($($rest),+);
        if head > tail { head } else { tail }
    }};
}

/// 예: `hashmap! { "a" => 1, "b" => 2 }`
#[macro_export]
macro_rules! hashmap {
    ($($key:expr => $value:expr),* $(,)?) => {{
        let mut map = ::std::collections::HashMap::new();
        $( map.insert($key, $value); )*
        map
    }};
}

/// 인자 개수를 컴파일 타임에 센다
#[macro_export]
macro_rules! count_args {
    () => { 0usize };
    ($head:tt $($tail:tt)*) => { 1usize + $crate::count_args!($($tail)*) };
}

/// 전송 id 로 찾아보는 함수를 곁들인 패킷 id 열거형을 선언한다
macro_rules! packet_ids {
    ($name:ident { $($variant:ident = $id:expr),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn id(self) -> u8 {
                match self {
                    $($name::$variant => $id),+
                }
            }

            pub fn from_id(id: u8) -> Option<Self> {
                match id {
                    $(x if x == $id => Some($name::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

packet_ids!(PacketId {
    Connect = 1,
    Input = 2,
    Snapshot = 3,
    Disconnect = 9,
});

/// 매크로 안의 `a` 는 호출한 쪽의 `a` 와 절대 겹치지 않는다
macro_rules! hygienic_double {
    ($e:expr) => {{
        let a = 2;
        $e * a
    }};
}

pub fn hygiene_demo() -> i32 {
    let a = 10;
    hygienic_double!(a + 1)
}

impl Lesson for Macros {
    fn number(&self) -> u32 {
        15
    }

    fn slug(&self) -> &'static str {
        "macros"
    }

    fn title(&self) -> &'static str {
        "Macros"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("#define substitutes text", "macro_rules! matches token trees"),
            (
                "macro locals can collide with caller names",
                "macros are hygienic and their locals do not leak",
            ),
            ("variadic templates", "repetition with $( ... ),*"),
            ("#x stringizing", "stringify!"),
            ("code generation only through templates", "derive and attribute procedural macros"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Declarative macros");
        out.line(format!("square!(7) = {}", square!(7)));
        out.line(format!(
            "square!(2 + 3) = {} ($x:expr keeps the expression grouped, unlike a C preprocessor)",
            square!(2 + 3)
        ));

        out.heading("Patterns");
        out.line(format!("max_of!(3) = {}", max_of!(3)));
        out.line(format!("max_of!(3, 9, 4) = {}", max_of!(3, 9, 4)));

        out.heading("Repetition");
        let ranks: HashMap<&str, u32> = hashmap! { "gold" => 1, "silver" => 2, "bronze" => 3 };
        out.line(format!("hashmap! built {} entries, gold = {:?}", ranks.len(), ranks.get("gold")));
        out.line(format!("count_args!(a b c d) = {}", count_args!(a b c d)));
        out.line(format!(
            "packet_ids! generated {:?} with id {} and from_id(3) = {:?}",
            PacketId::Disconnect,
            PacketId::Disconnect.id(),
            PacketId::from_id(3)
        ));

        out.heading("Hygiene");
        out.line(format!(
            "caller's a = 10, hygienic_double!(a + 1) = {}",
            hygiene_demo()
        ));

        out.heading("Useful standard macros");
        let v = vec![1, 2, 3];
        out.line(format!("vec! -> {:?}, format! -> {}", v, format!("{:>5}", "pad")));
        out.line("assert!/assert_eq! check invariants, todo!/unimplemented! mark gaps, dbg! prints and returns");

        out.heading("Procedural macros");
        out.line("#[derive(Debug, Serialize)] runs compiler plugins over the item's tokens");
        out.line("attribute macros like #[tokio::main] rewrite the function they annotate");
        Ok(())
    }
}
