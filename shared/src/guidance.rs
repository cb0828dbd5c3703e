//! 기여 가이드 문서 모델
//!
//! 가이드는 기여자가 실행하는 cargo 명령을 셸 코드 블록 안에 한 줄에 하나씩
//! 적고, 언어 정책을 `대상: 언어` 꼴의 목록 항목으로 적는다.

use crate::issue::{Issue, IssueKind};
use crate::markdown::{parse_blocks, Block};
use crate::policy::{Language, LanguagePolicy, PolicySubject};
use log::debug;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// 가이드가 쓸 수 있는 cargo 하위 명령
const KNOWN_SUBCOMMANDS: [&str; 10] = [
    "build", "run", "test", "check", "fmt", "clippy", "doc", "bench", "clean", "update",
];

/// 다음 인자가 테스트 필터가 아니라 값인 플래그
const VALUE_FLAGS: [&str; 13] = [
    "-p",
    "--package",
    "--test",
    "--bin",
    "--example",
    "--features",
    "-F",
    "--target",
    "--manifest-path",
    "-j",
    "--jobs",
    "--profile",
    "--color",
];

/// 개발 흐름에서 명령이 맡는 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CommandKind {
    Build,
    Run,
    Test,
    TestFilter,
    Check,
    Format,
    Lint,
}

impl CommandKind {
    pub const ALL: [CommandKind; 7] = [
        CommandKind::Build,
        CommandKind::Run,
        CommandKind::Test,
        CommandKind::TestFilter,
        CommandKind::Check,
        CommandKind::Format,
        CommandKind::Lint,
    ];
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CommandKind::Build => "build",
            CommandKind::Run => "run",
            CommandKind::Test => "test",
            CommandKind::TestFilter => "single test",
            CommandKind::Check => "check",
            CommandKind::Format => "format",
            CommandKind::Lint => "lint",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevCommand {
    pub kind: Option<CommandKind>,
    pub program: String,
    pub args: Vec<String>,
    pub description: Option<String>,
    pub line: usize,
}

impl DevCommand {
    /// 셸 한 줄을 읽는다. 빈 줄과 `#` 주석은 `None` 이다.
    pub fn parse(raw: &str, line: usize) -> Option<Self> {
        let trimmed = raw.trim();
        let trimmed = trimmed.strip_prefix("$ ").unwrap_or(trimmed);
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let (command, description) = match trimmed.find(" #") {
            Some(pos) => (
                &trimmed[..pos],
                Some(trimmed[pos + 2..].trim().to_string()).filter(|d| !d.is_empty()),
            ),
            None => (trimmed, None),
        };

        let mut tokens = command.split_whitespace().map(str::to_string);
        let program = tokens.next()?;
        let args: Vec<String> = tokens.collect();
        let kind = classify(&program, &args);

        Some(Self {
            kind,
            program,
            args,
            description,
            line,
        })
    }

    /// `+nightly` 같은 툴체인 지정을 건너뛴 cargo 하위 명령
    pub fn subcommand(&self) -> Option<&str> {
        if self.program != "cargo" {
            return None;
        }
        self.args
            .iter()
            .map(String::as_str)
            .find(|arg| !arg.starts_with('-') && !arg.starts_with('+'))
    }

    /// 공백을 정리한 명령줄
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn classify(program: &str, args: &[String]) -> Option<CommandKind> {
    if program != "cargo" {
        return None;
    }

    let mut rest = args
        .iter()
        .skip_while(|arg| arg.starts_with('-') || arg.starts_with('+'));
    let subcommand = rest.next()?;

    match subcommand.as_str() {
        "build" => Some(CommandKind::Build),
        "run" => Some(CommandKind::Run),
        "check" => Some(CommandKind::Check),
        "fmt" => Some(CommandKind::Format),
        "clippy" => Some(CommandKind::Lint),
        "test" => {
            let mut expects_value = false;
            let mut has_filter = false;
            for arg in rest {
                if expects_value {
                    expects_value = false;
                } else if arg == "--" {
                    continue;
                } else if VALUE_FLAGS.contains(&arg.as_str()) {
                    expects_value = true;
                } else if !arg.starts_with('-') {
                    has_filter = true;
                    break;
                }
            }
            Some(if has_filter {
                CommandKind::TestFilter
            } else {
                CommandKind::Test
            })
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Guidance {
    pub commands: Vec<DevCommand>,
    pub policies: Vec<LanguagePolicy>,
}

fn is_shell_block(language: Option<&str>) -> bool {
    matches!(language, None | Some("bash") | Some("sh") | Some("shell") | Some("console"))
}

fn parse_policy(item: &str) -> Option<LanguagePolicy> {
    let cleaned: String = item.chars().filter(|c| *c != '*' && *c != '`').collect();
    let (subject, language) = cleaned.split_once(':')?;
    Some(LanguagePolicy {
        subject: PolicySubject::from_name(subject)?,
        language: Language::from_name(language)?,
    })
}

impl Guidance {
    pub fn parse(text: &str) -> Self {
        let mut guidance = Guidance::default();

        for block in parse_blocks(text) {
            match block {
                Block::Code {
                    language,
                    body,
                    line,
                } if is_shell_block(language.as_deref()) => {
                    for (offset, raw) in body.lines().enumerate() {
                        if let Some(command) = DevCommand::parse(raw, line + offset) {
                            guidance.commands.push(command);
                        }
                    }
                }
                Block::ListItem { text, .. } => {
                    if let Some(policy) = parse_policy(&text) {
                        guidance.policies.push(policy);
                    }
                }
                _ => {}
            }
        }

        debug!(
            "Parsed guidance: {} commands, {} policies",
            guidance.commands.len(),
            guidance.policies.len()
        );
        guidance
    }

    /// 주어진 종류의 첫 명령
    pub fn command(&self, kind: CommandKind) -> Option<&DevCommand> {
        self.commands.iter().find(|c| c.kind == Some(kind))
    }

    /// 대상에 요구되는 언어. 마지막 문장이 이긴다.
    pub fn policy(&self, subject: PolicySubject) -> Option<Language> {
        self.policies
            .iter()
            .rev()
            .find(|p| p.subject == subject)
            .map(|p| p.language)
    }

    /// 적힌 명령이 cargo 도구와 맞는지 검사한다
    pub fn validate(&self) -> Vec<Issue> {
        let mut issues = Vec::new();

        for kind in CommandKind::ALL {
            if self.command(kind).is_none() {
                issues.push(Issue::new(
                    IssueKind::MissingCommand,
                    format!("no {} command is documented", kind),
                    None,
                ));
            }
        }

        let mut seen: HashMap<String, usize> = HashMap::new();
        for command in &self.commands {
            if command.program != "cargo" {
                issues.push(Issue::new(
                    IssueKind::ForeignTool,
                    format!("`{}` is not a cargo invocation", command.command_line()),
                    Some(command.line),
                ));
            } else {
                match command.subcommand() {
                    Some(sub) if KNOWN_SUBCOMMANDS.contains(&sub) => {}
                    Some(sub) => issues.push(Issue::new(
                        IssueKind::UnknownSubcommand,
                        format!("`cargo {}` is not a supported subcommand", sub),
                        Some(command.line),
                    )),
                    None => issues.push(Issue::new(
                        IssueKind::UnknownSubcommand,
                        "`cargo` is invoked without a subcommand",
                        Some(command.line),
                    )),
                }
            }

            let key = command.command_line();
            if let Some(first) = seen.get(&key) {
                issues.push(Issue::new(
                    IssueKind::DuplicateCommand,
                    format!("`{}` is already listed at line {}", key, first),
                    Some(command.line),
                ));
            } else {
                seen.insert(key, command.line);
            }
        }

        for subject in PolicySubject::ALL {
            if self.policy(subject).is_none() {
                issues.push(Issue::new(
                    IssueKind::MissingPolicy,
                    format!("no language policy for {}", subject),
                    None,
                ));
            }
        }

        issues
    }
}
