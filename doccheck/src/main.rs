use clap::{Parser, Subcommand};
use doccheck::checks::{load_catalog, load_guidance, read_document, required_policy};
use doccheck::{
    check_commit, check_docs, render_catalog, render_commands, render_reports, scan_comments,
    OutputFormat,
};
use log::{error, info};
use shared::PolicySubject;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 명령과 정책을 읽어 올 기여 가이드
    #[arg(short = 'g', long, global = true, default_value = shared::GUIDANCE_PATH)]
    guidance: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 기여 가이드와 추천 목록을 검사한다
    Docs {
        /// 패키지 추천 문서
        #[arg(short = 'c', long, default_value = shared::CATALOG_PATH)]
        catalog: PathBuf,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// 커밋 메시지 언어를 검사한다 (git commit-msg 훅)
    CommitMsg {
        /// 커밋 메시지가 든 파일
        file: PathBuf,
    },

    /// .rs 파일의 코드 주석 언어를 검사한다
    Comments {
        /// 검사할 파일이나 디렉터리
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// 추천 크레이트를 관심사별로 출력한다
    Catalog {
        #[arg(short = 'c', long, default_value = shared::CATALOG_PATH)]
        catalog: PathBuf,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// 문서에 적힌 개발 명령을 출력한다
    Commands,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Command::Docs { catalog, format } => {
            let reports = check_docs(&args.guidance, &catalog)?;
            print!("{}", render_reports(&reports, format)?);
            if reports.iter().any(|r| r.has_errors()) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::CommitMsg { file } => {
            let guidance = load_guidance(&args.guidance)?;
            let message = read_document(&file)?;
            if let Err(e) = check_commit(&guidance, &message) {
                error!("Commit message rejected");
                eprintln!("{}", e);
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Comments { paths } => {
            let guidance = load_guidance(&args.guidance)?;
            let language = required_policy(&guidance, PolicySubject::CodeComments)?;
            let findings = scan_comments(&paths, language)?;
            for finding in &findings {
                for violation in &finding.violations {
                    println!("{}: {}", finding.path.display(), violation);
                }
            }
            if !findings.is_empty() {
                return Ok(ExitCode::FAILURE);
            }
            info!("All comments follow the {} policy", language);
        }
        Command::Catalog { catalog, format } => {
            let catalog = load_catalog(&catalog)?;
            print!("{}", render_catalog(&catalog, format)?);
        }
        Command::Commands => {
            let guidance = load_guidance(&args.guidance)?;
            print!("{}", render_commands(&guidance)?);
        }
    }

    Ok(ExitCode::SUCCESS)
}
