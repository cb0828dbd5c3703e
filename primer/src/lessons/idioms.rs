//! 일상적인 러스트 패턴: 빌더, 뉴타입, 타입 상태, 변환 트레이트,
//! `Default`, RAII 가드

use crate::curriculum::{Lesson, PrimerError};
use crate::transcript::Transcript;
use std::error::Error;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::time::Instant;

pub struct Idioms;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_players: usize,
    pub tick_rate: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            max_players: 16,
            tick_rate: 60,
        }
    }
}

#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    config: ServerConfig,
}

impl ServerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    pub fn max_players(mut self, max_players: usize) -> Self {
        self.config.max_players = max_players;
        self
    }

    pub fn tick_rate(mut self, tick_rate: u32) -> Self {
        self.config.tick_rate = tick_rate;
        self
    }

    pub fn build(self) -> Result<ServerConfig, String> {
        if self.config.tick_rate == 0 {
            return Err("tick rate must be positive".to_string());
        }
        Ok(self.config)
    }
}

/// 컴파일 타임에 다른 u32 와 구별된다
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:04}", self.0)
    }
}

impl From<u32> for PlayerId {
    fn from(raw: u32) -> Self {
        PlayerId(raw)
    }
}

/// 특권 범위 밖의 포트
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Port(u16);

impl TryFrom<i64> for Port {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u16::try_from(value) {
            Ok(port) if port >= 1024 => Ok(Port(port)),
            Ok(port) => Err(format!("port {} is privileged", port)),
            Err(_) => Err(format!("{} is not a port number", value)),
        }
    }
}

impl Deref for Port {
    type Target = u16;

    fn deref(&self) -> &u16 {
        &self.0
    }
}

pub struct Disconnected;
pub struct Connected;
pub struct Authenticated;

/// `Authenticated` 연결만 게임 트래픽을 보낼 수 있다
pub struct Connection<State> {
    pub peer: String,
    pub user: Option<String>,
    _state: PhantomData<State>,
}

impl Connection<Disconnected> {
    pub fn new(peer: impl Into<String>) -> Self {
        Self {
            peer: peer.into(),
            user: None,
            _state: PhantomData,
        }
    }

    pub fn connect(self) -> Connection<Connected> {
        Connection {
            peer: self.peer,
            user: None,
            _state: PhantomData,
        }
    }
}

impl Connection<Connected> {
    pub fn authenticate(self, user: &str) -> Connection<Authenticated> {
        Connection {
            peer: self.peer,
            user: Some(user.to_string()),
            _state: PhantomData,
        }
    }
}

impl Connection<Authenticated> {
    pub fn send(&self, payload: &str) -> String {
        format!(
            "{}@{} <- {}",
            self.user.as_deref().unwrap_or("?"),
            self.peer,
            payload
        )
    }
}

/// drop 될 때 걸린 시간을 `sink` 에 적는다
pub struct TimerGuard<'a> {
    label: &'static str,
    started: Instant,
    sink: &'a mut Vec<String>,
}

impl<'a> TimerGuard<'a> {
    pub fn start(label: &'static str, sink: &'a mut Vec<String>) -> Self {
        Self {
            label,
            started: Instant::now(),
            sink,
        }
    }
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        let elapsed = self.started.elapsed();
        self.sink
            .push(format!("{} finished in {}us", self.label, elapsed.as_micros()));
    }
}

/// 서로 다른 에러 타입이 `?` 를 거쳐 `Box<dyn Error>` 로 모인다
pub fn parse_endpoint(text: &str) -> Result<(String, Port), Box<dyn Error>> {
    let (host, port) = text.split_once(':').ok_or("missing ':' in endpoint")?;
    let raw: i64 = port.parse()?;
    let port = Port::try_from(raw)?;
    Ok((host.to_string(), port))
}

fn describe(text: &str) -> String {
    text.to_uppercase()
}

impl Lesson for Idioms {
    fn number(&self) -> u32 {
        18
    }

    fn slug(&self) -> &'static str {
        "idioms"
    }

    fn title(&self) -> &'static str {
        "Rust Idioms"
    }

    fn cpp_contrasts(&self) -> &'static [(&'static str, &'static str)] {
        &[
            (
                "builder class with method chaining",
                "builder that consumes self and ends in build()",
            ),
            ("using UserId = uint64_t; is the same type", "struct UserId(u64) is a distinct type"),
            (
                "runtime state checks on a connection object",
                "typestate makes invalid transitions fail to compile",
            ),
            ("explicit conversion constructors and operators", "From, Into and TryFrom"),
            ("RAII guards by convention", "Drop guards enforced by the language"),
        ]
    }

    fn run(&self, out: &mut Transcript) -> Result<(), PrimerError> {
        out.heading("Builder and Default");
        let config = ServerConfigBuilder::new()
            .host("0.0.0.0")
            .port(7777)
            .max_players(64)
            .build()
            .map_err(|message| PrimerError::Lesson {
                chapter: 18,
                message,
            })?;
        out.line(format!("built {:?}", config));
        out.line(format!(
            "..Default::default() fills the rest: tick_rate {}",
            ServerConfig {
                port: 9000,
                ..Default::default()
            }
            .tick_rate
        ));

        out.heading("Newtypes and conversions");
        let id: PlayerId = 42.into();
        out.line(format!("PlayerId from u32 via Into: {}", id));
        out.line(format!("Port::try_from(80) = {:?}", Port::try_from(80i64)));
        out.line(format!("Port::try_from(70000) = {:?}", Port::try_from(70000i64)));

        out.heading("Typestate");
        let session = Connection::new("10.0.0.7").connect().authenticate("alice");
        out.line(session.send("MOVE 1 0"));
        out.line("calling send() before authenticate() does not compile");

        out.heading("Deref coercion");
        let owned = String::from("deref");
        out.line(format!("&String coerces to &str: {}", describe(&owned)));
        if let Ok(port) = Port::try_from(8080i64) {
            out.line(format!("*port reads the inner u16: {}", *port + 1));
        }

        out.heading("RAII");
        let mut log = Vec::new();
        {
            let _timer = TimerGuard::start("tick", &mut log);
        }
        out.line(format!("guard dropped at scope end: {}", log.len() == 1));

        out.heading("? with Box<dyn Error>");
        for endpoint in ["game.local:7777", "game.local", "game.local:80"] {
            match parse_endpoint(endpoint) {
                Ok((host, port)) => out.line(format!("{} -> {}:{}", endpoint, host, *port)),
                Err(e) => out.line(format!("{} -> error: {}", endpoint, e)),
            }
        }
        Ok(())
    }
}
