use super::{KvPairs, KvsEngine};
use crate::Result;
use ::sled::{Config, Db};
use std::path::Path;

/// sled::Db包装
#[derive(Clone)]
pub struct SledEngine {
    db: Db,
    // 每次写入后是否立即落盘
    flush_on_write: bool,
}

impl SledEngine {
    /// 根据给定Db生成一个SledEngine，每次写入后都会落盘
    pub fn new(db: Db) -> Self {
        SledEngine {
            db,
            flush_on_write: true,
        }
    }

    /// 打开给定路径下的数据库，目录不存在时会被创建
    pub fn open(path: impl AsRef<Path>, cache_capacity: u64) -> Result<Self> {
        let db = Config::new()
            .path(path)
            .cache_capacity(cache_capacity)
            .open()?;
        Ok(SledEngine::new(db))
    }

    /// 设置写入后是否立即落盘
    pub fn flush_on_write(mut self, flush: bool) -> Self {
        self.flush_on_write = flush;
        self
    }

    fn maybe_flush(&self) -> Result<()> {
        if self.flush_on_write {
            self.db.flush()?;
        }
        Ok(())
    }
}

impl KvsEngine for SledEngine {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key)?.map(|ivec| ivec.to_vec()))
    }

    fn remove(&self, key: &[u8]) -> Result<()> {
        self.db.remove(key)?;
        self.maybe_flush()
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db.insert(key, value)?;
        self.maybe_flush()
    }

    fn scan(&self, prefix: &[u8]) -> KvPairs<'_> {
        Box::new(
            self.db
                .scan_prefix(prefix)
                .map(|res| -> Result<(Vec<u8>, Vec<u8>)> {
                    let (key, value) = res?;
                    Ok((key.to_vec(), value.to_vec()))
                }),
        )
    }
}
