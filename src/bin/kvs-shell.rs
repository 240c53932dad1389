#[macro_use]
extern crate slog;

use clap::{ArgAction, Parser};
use kvs_shell::{Shell, SledEngine};
use slog::{Drain, Level, Logger};
use std::io;
use std::process::exit;

/// sled默认的缓存容量，1GiB
const DEFAULT_CACHE_CAPACITY: u64 = 1024 * 1024 * 1024;

#[derive(Debug, Parser)]
#[command(name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        author = env!("CARGO_PKG_AUTHORS"),
        about = env!("CARGO_PKG_DESCRIPTION"))]
struct Cli {
    /// 数据库目录，不存在时会被创建
    #[arg(long = "db_path", value_name = "DB_PATH")]
    db_path: Option<String>,

    /// sled缓存容量（字节）
    #[arg(long = "cache_capacity", default_value_t = DEFAULT_CACHE_CAPACITY)]
    cache_capacity: u64,

    /// 写入后不立即落盘
    #[arg(long = "no_flush")]
    no_flush: bool,

    /// 日志级别，-v 为info，-vv 为debug
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    exit(run(cli));
}

/// 返回进程退出码，返回前所有日志都已写出
fn run(cli: Cli) -> i32 {
    let db_path = match cli.db_path {
        Some(path) if !path.is_empty() => path,
        _ => {
            eprintln!("Error: --db_path is required.");
            eprintln!("Usage: {} --db_path=<db_path>", env!("CARGO_BIN_NAME"));
            return 1;
        }
    };

    let logger = build_logger(cli.verbose);
    let engine = match SledEngine::open(&db_path, cli.cache_capacity) {
        Ok(engine) => engine.flush_on_write(!cli.no_flush),
        Err(e) => {
            error!(logger, "Failed to open database"; "path" => &db_path, "error" => %e);
            eprintln!("Failed to open database: {}", e);
            return 1;
        }
    };
    info!(logger, "Opened database"; "path" => &db_path, "flush_on_write" => !cli.no_flush);

    let shell = Shell::new(engine, logger.clone());
    let stdin = io::stdin();
    let code = match shell.run(stdin.lock(), &mut io::stdout(), &mut io::stderr()) {
        Ok(()) => 0,
        Err(e) => {
            error!(logger, "Shell terminated"; "error" => %e);
            eprintln!("Error: {}", e);
            1
        }
    };

    drop(shell);
    info!(logger, "Closed database"; "path" => &db_path);
    code
}

fn build_logger(verbose: u8) -> Logger {
    let level = match verbose {
        0 => Level::Warning,
        1 => Level::Info,
        _ => Level::Debug,
    };
    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    let drain = drain.filter_level(level).fuse();
    Logger::root(drain, o!("version" => env!("CARGO_PKG_VERSION")))
}
