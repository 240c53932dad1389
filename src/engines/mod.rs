//! 该模块包含shell使用的键值对存储引擎

use crate::error::Result;

/// 按键升序遍历键值对的迭代器
pub type KvPairs<'a> = Box<dyn Iterator<Item = Result<(Vec<u8>, Vec<u8>)>> + 'a>;

/// 键值对存储引擎特征
///
/// 键和值都是不透明的字节序列
pub trait KvsEngine {
    /// 设置键值对，已存在的值会被覆盖
    fn set(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// 根据给定键返回对应值
    ///
    /// 若键不存在，则返回None
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// 删除给定键
    ///
    /// 删除不存在的键不是错误
    fn remove(&self, key: &[u8]) -> Result<()>;

    /// 按键的字节序升序遍历所有以`prefix`开头的键值对
    ///
    /// 空前缀遍历整个数据库
    fn scan(&self, prefix: &[u8]) -> KvPairs<'_>;
}

mod sled;

pub use self::sled::SledEngine;
