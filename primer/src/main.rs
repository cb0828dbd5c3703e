use clap::Parser;
use log::info;
use primer::Curriculum;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 실행할 장 번호나 슬러그. 여러 번 줄 수 있다 (기본: 전부)
    #[arg(short = 'c', long = "chapter")]
    chapters: Vec<String>,

    /// 목차를 출력하고 끝낸다
    #[arg(short = 'l', long)]
    list: bool,
}

/// `#[tokio::main]` 을 쓰지 않는다. 비동기 장이 자기 런타임을 만들며 다른
/// 런타임 안에서는 block_on 할 수 없다.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let curriculum = Curriculum::standard();

    if args.list {
        for lesson in curriculum.lessons() {
            println!("{:>2}. {:<16} {}", lesson.number(), lesson.slug(), lesson.title());
        }
        return Ok(());
    }

    println!("==========================================");
    println!("  Rust for Game Servers: a C++20 primer");
    println!("==========================================");

    let transcripts = curriculum.run(&args.chapters)?;
    for transcript in &transcripts {
        println!();
        print!("{}", transcript);
    }

    println!();
    println!("==========================================");
    println!("  {} chapter(s) completed", transcripts.len());
    println!("==========================================");
    info!("Primer finished");

    Ok(())
}
