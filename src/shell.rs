use crate::args::{decode_one, decode_two, ArgsError};
use crate::command::{split_verb, Verb};
use crate::engines::KvsEngine;
use crate::{KvsError, Result};

use slog::Logger;
use std::io::{self, BufRead, Write};

/// 启动时打印的提示
const BANNER: &str = "kvs-shell. Type 'exit' to quit.";
/// 结束shell的命令
const EXIT: &str = "exit";
const PROMPT: &str = "> ";

/// 交互式shell
///
/// 从输入中逐行读取命令，并将其转发给存储引擎。键和值按原始字节传递和输出。
/// 参数错误和单条命令的引擎错误只会打印出来，遍历数据库时出错则会终止shell。
pub struct Shell<E: KvsEngine> {
    engine: E,
    logger: Logger,
}

impl<E: KvsEngine> Shell<E> {
    /// 根据给定存储引擎生成一个shell
    pub fn new(engine: E, logger: Logger) -> Self {
        Shell { engine, logger }
    }

    /// 运行shell，直到读到`exit`或输入结束
    ///
    /// 命令结果写入`out`，诊断信息写入`err`。
    ///
    /// # Errors
    ///
    /// 读写失败或遍历数据库失败时返回错误，此时shell已停止。
    pub fn run<R: BufRead>(
        &self,
        mut input: R,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Result<()> {
        info!(self.logger, "Shell started");
        writeln!(out, "{}", BANNER)?;

        let mut buf = Vec::new();
        loop {
            write!(out, "{}", PROMPT)?;
            out.flush()?;

            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                // 输入结束等同于exit
                writeln!(out)?;
                break;
            }
            let line = trim_line_ending(&buf);

            if line == EXIT.as_bytes() {
                break;
            }
            self.execute(line, out, err)?;
        }

        writeln!(out, "Exiting the shell.")?;
        info!(self.logger, "Shell stopped");
        Ok(())
    }

    /// 执行一行命令
    pub fn execute(&self, line: &[u8], out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
        let (name, args) = split_verb(line);
        let verb = match Verb::lookup(name) {
            Some(verb) => verb,
            None => {
                debug!(self.logger, "Unknown command"; "line" => %String::from_utf8_lossy(line));
                write_parts(err, &[b"Unknown command: ", line, b"\n"])?;
                return Ok(());
            }
        };

        debug!(self.logger, "Dispatching command"; "verb" => verb.name());
        match verb {
            Verb::Get => self.get(args, out, err),
            Verb::Put => self.put(args, out, err),
            Verb::Set => self.set(args, out, err),
            Verb::Delete => self.delete(args, out, err),
            Verb::List => self.list(args, out, err),
            Verb::Help => help(args, out, err),
        }
    }

    fn get(&self, args: &[u8], out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
        let key = match decode_one(args) {
            Ok(key) => key,
            Err(e) => return usage_error(Verb::Get, &e, err),
        };

        match self.engine.get(&key) {
            Ok(Some(value)) => write_pair(out, &key, &value)?,
            Ok(None) => write_parts(out, &[b"Key '", &key[..], b"' not found\n"])?,
            Err(e) => {
                warn!(self.logger, "Get failed"; "key" => %String::from_utf8_lossy(&key), "error" => %e);
                write_parts(out, &[b"Error retrieving key '", &key[..], b"': "])?;
                writeln!(out, "{}", e)?;
            }
        }
        Ok(())
    }

    fn put(&self, args: &[u8], out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
        let (key, value) = match decode_two(args) {
            Ok(pair) => pair,
            Err(e) => return usage_error(Verb::Put, &e, err),
        };

        match self.engine.set(&key, &value) {
            Ok(()) => write_parts(out, &[b"put '", &key[..], b"' to '", &value[..], b"'\n"])?,
            Err(e) => {
                warn!(self.logger, "Put failed"; "key" => %String::from_utf8_lossy(&key), "error" => %e);
                writeln!(out, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn set(&self, args: &[u8], out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
        let (key, value) = match decode_two(args) {
            Ok(pair) => pair,
            Err(e) => return usage_error(Verb::Set, &e, err),
        };

        let res = self.engine.get(&key).and_then(|old| match old {
            Some(_) => self.engine.set(&key, &value).map(|_| true),
            None => Ok(false),
        });
        match res {
            Ok(true) => write_parts(out, &[b"set '", &key[..], b"' to '", &value[..], b"'\n"])?,
            Ok(false) => write_parts(out, &[b"Key '", &key[..], b"' not found\n"])?,
            Err(e) => {
                warn!(self.logger, "Set failed"; "key" => %String::from_utf8_lossy(&key), "error" => %e);
                writeln!(out, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    fn delete(&self, args: &[u8], out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
        let key = match decode_one(args) {
            Ok(key) => key,
            Err(e) => return usage_error(Verb::Delete, &e, err),
        };

        match self.engine.remove(&key) {
            Ok(()) => write_parts(out, &[b"Deleted ", &key[..], b"\n"])?,
            Err(e) => {
                warn!(self.logger, "Delete failed"; "key" => %String::from_utf8_lossy(&key), "error" => %e);
                writeln!(out, "Error: {}", e)?;
            }
        }
        Ok(())
    }

    /// 遍历失败是致命错误，已打印的键值对保留，shell随之终止
    fn list(&self, args: &[u8], out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
        let prefix = if args.is_empty() {
            Vec::new()
        } else {
            match decode_one(args) {
                Ok(prefix) => prefix,
                Err(e) => return usage_error(Verb::List, &e, err),
            }
        };

        for pair in self.engine.scan(&prefix) {
            let (key, value) = pair.map_err(|e| {
                error!(self.logger, "Iteration failed";
                    "prefix" => %String::from_utf8_lossy(&prefix), "error" => %e);
                KvsError::Iteration(e.to_string())
            })?;
            write_pair(out, &key, &value)?;
        }
        Ok(())
    }
}

fn help(args: &[u8], out: &mut dyn Write, err: &mut dyn Write) -> Result<()> {
    if !args.is_empty() {
        return usage_error(Verb::Help, &ArgsError::TrailingInput, err);
    }

    writeln!(out, "Commands:")?;
    for verb in Verb::all() {
        writeln!(out, "  {:<26}{}", verb.usage(), verb.summary())?;
    }
    writeln!(out, "  {:<26}{}", EXIT, "leave the shell")?;
    writeln!(
        out,
        "Keys and values are wrapped in single quotes; write '' for a literal quote."
    )?;
    Ok(())
}

fn usage_error(verb: Verb, e: &ArgsError, err: &mut dyn Write) -> Result<()> {
    writeln!(
        err,
        "Invalid '{}' command: {}. Usage: {}",
        verb.name(),
        e,
        verb.usage()
    )?;
    Ok(())
}

/// 按原样输出`'<key>': '<value>'`
fn write_pair(out: &mut dyn Write, key: &[u8], value: &[u8]) -> io::Result<()> {
    write_parts(out, &[b"'", key, b"': '", value, b"'\n"])
}

fn write_parts(out: &mut dyn Write, parts: &[&[u8]]) -> io::Result<()> {
    for part in parts {
        out.write_all(part)?;
    }
    Ok(())
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
