use crate::args::ArgsError;
use failure::Fail;
use std::io;

/// kvs-shell 错误类型.
#[derive(Debug, Fail)]
pub enum KvsError {
    /// IO 错误.
    #[fail(display = "{}", _0)]
    Io(#[cause] io::Error),
    /// sled 引擎错误.
    #[fail(display = "{}", _0)]
    Sled(#[cause] sled::Error),
    /// 参数解析错误.
    #[fail(display = "{}", _0)]
    Args(#[cause] ArgsError),
    /// 遍历数据库时出错，属于不可恢复的错误.
    #[fail(display = "Iteration failed: {}", _0)]
    Iteration(String),
}

impl From<io::Error> for KvsError {
    fn from(err: io::Error) -> KvsError {
        KvsError::Io(err)
    }
}

impl From<sled::Error> for KvsError {
    fn from(err: sled::Error) -> KvsError {
        KvsError::Sled(err)
    }
}

impl From<ArgsError> for KvsError {
    fn from(err: ArgsError) -> KvsError {
        KvsError::Args(err)
    }
}

/// kvs-shell中的Result类型
pub type Result<T> = std::result::Result<T, KvsError>;
