#![deny(missing_docs)]
//! 一个用于查看和修改sled键值数据库的交互式shell。

pub use engines::{KvPairs, KvsEngine, SledEngine};
pub use error::{KvsError, Result};
pub use shell::Shell;

#[macro_use]
extern crate slog;

pub mod args;
pub mod command;
mod engines;
mod error;
mod shell;
