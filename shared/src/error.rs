use thiserror::Error;

/// 프로젝트 문서를 읽다가 생긴 실패
#[derive(Error, Debug)]
pub enum DocError {
    #[error("document contains no recommendations")]
    Empty,

    #[error("invalid manifest snippet at line {line}: {message}")]
    Manifest { line: usize, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DocError>;
