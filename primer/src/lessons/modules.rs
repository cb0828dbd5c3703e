//! 모듈, 가시성, 경로. 헤더는 없다. 모듈은 인터페이스와 구현을 함께
//! 선언하고, 항목은 `pub` 을 붙이지 않으면
//! 비공개다.

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;

pub struct Modules;

pub mod server {
    pub mod session {
        /// 비공개 필드가 하나 있는 공개 구조체. 호출하는 쪽은 `new` 를 써야 한다.
        #[derive(Debug)]
        pub struct Session {
            pub id: u32,
            token: String,
        }

        impl Session {
            pub fn new(id: u32) -> Self {
                Self {
                    id,
                    token: super::auth::issue_token(id),
                }
            }

            pub fn token_len(&self) -> usize {
                self.token.len()
            }

            pub fn verify(&self, token: &str) -> bool {
                self.token == token
            }
        }
    }

    mod auth {
        /// `server` 와 그 자식에게만 보인다
        pub(super) fn issue_token(id: u32) -> String {
            format!("tok-{:04}-{}", id, secret_suffix())
        }

        fn secret_suffix() -> &'static str {
            "x9"
        }
    }

    pub(crate) fn crate_only_banner() -> &'static str {
        "visible anywhere in this crate"
    }

    pub use self::session::Session;
}

pub mod protocol {
    pub const VERSION: u32 = 3;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Channel {
        Reliable,
        Unreliable,
    }

    pub fn channel_for(kind: &str) -> Channel {
        match kind {
            "chat" | "connect" => Channel::Reliable,
            _ => Channel::Unreliable,
        }
    }
}

use protocol::Channel as Delivery;
use server::Session;

impl Lesson for Modules {
    fn number(&self) -> u32 {
        14
    }

    fn slug(&self) -> &'static str {
        "modules"
    }

    fn title(&self) -> &'static str {
        "Modules"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("header and source files", "one module file holds interface and implementation"),
            ("public and private per class", "pub per item, private by default"),
            ("using namespace", "use imports specific paths"),
            ("C++20 modules with export", "mod declarations; items stay private until pub"),
            ("no standard package manager", "Cargo.toml and crates.io"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Module basics");
        let session = server::session::Session::new(7);
        out.line(format!(
            "full path server::session::Session::new(7) -> id {}",
            session.id
        ));
        out.line(format!("protocol::VERSION = {}", protocol::VERSION));

        out.heading("Visibility");
        out.line(format!(
            "token is private; token_len() = {}",
            session.token_len()
        ));
        out.line(format!("pub(crate): {}", server::crate_only_banner()));
        out.line("server::auth::issue_token is pub(super): calling it here is error[E0603]");

        out.heading("use");
        let again = Session::new(8);
        out.line(format!(
            "re-exported server::Session works the same: id {}",
            again.id
        ));
        let delivery: Delivery = protocol::channel_for("chat");
        out.line(format!("`use ... as Delivery` renames: {:?}", delivery));

        out.heading("File layout");
        out.line("mod lessons; loads src/lessons/mod.rs or src/lessons.rs");
        out.line("each chapter here is its own file under src/lessons/");
        out.line("dependencies are declared in Cargo.toml, shared versions in [workspace.dependencies]");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_token() {
        let session = Session::new(42);
        assert!(session.verify("tok-0042-x9"));
        assert!(!session.verify("tok-0042"));
        assert_eq!(session.token_len(), 11);
    }

    #[test]
    fn test_channel_for() {
        assert_eq!(protocol::channel_for("chat"), Delivery::Reliable);
        assert_eq!(protocol::channel_for("move"), Delivery::Unreliable);
    }
}
