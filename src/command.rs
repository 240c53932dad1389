//! 命令行的拆分与分发表

/// shell 支持的命令
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    /// 读取键对应的值
    Get,
    /// 写入或覆盖键值对
    Put,
    /// 只覆盖已存在的键
    Set,
    /// 删除键
    Delete,
    /// 按键的顺序列出键值对，可以给出前缀
    List,
    /// 打印帮助信息
    Help,
}

/// 命令名到命令的映射表，只做精确匹配
const VERBS: &[(&str, Verb)] = &[
    ("get", Verb::Get),
    ("put", Verb::Put),
    ("set", Verb::Set),
    ("delete", Verb::Delete),
    ("list", Verb::List),
    ("help", Verb::Help),
];

impl Verb {
    /// 根据命令名查找命令，不存在时返回None
    pub fn lookup(name: &[u8]) -> Option<Verb> {
        VERBS
            .iter()
            .find(|(verb_name, _)| verb_name.as_bytes() == name)
            .map(|&(_, verb)| verb)
    }

    /// 命令名
    pub fn name(self) -> &'static str {
        VERBS
            .iter()
            .find(|&&(_, verb)| verb == self)
            .map(|&(name, _)| name)
            .unwrap_or_default()
    }

    /// 命令用法
    pub fn usage(self) -> &'static str {
        match self {
            Verb::Get => "get '<key>'",
            Verb::Put => "put '<key>' '<value>'",
            Verb::Set => "set '<key>' '<value>'",
            Verb::Delete => "delete '<key>'",
            Verb::List => "list ['<prefix>']",
            Verb::Help => "help",
        }
    }

    /// 命令说明
    pub fn summary(self) -> &'static str {
        match self {
            Verb::Get => "print the value stored under the key",
            Verb::Put => "store the value under the key, replacing any old value",
            Verb::Set => "replace the value of an existing key",
            Verb::Delete => "remove the key",
            Verb::List => "print every pair in key order, optionally only keys with the prefix",
            Verb::Help => "print this help message",
        }
    }

    /// 所有命令，按帮助信息中的顺序排列
    pub fn all() -> impl Iterator<Item = Verb> {
        VERBS.iter().map(|&(_, verb)| verb)
    }
}

/// 在第一个空格处将命令行拆分为命令名和参数
pub fn split_verb(line: &[u8]) -> (&[u8], &[u8]) {
    match line.iter().position(|&b| b == b' ') {
        Some(pos) => (&line[..pos], &line[pos + 1..]),
        None => (line, &line[line.len()..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_at_first_space() {
        fn split(line: &str) -> (&str, &str) {
            let (verb, args) = split_verb(line.as_bytes());
            (
                std::str::from_utf8(verb).unwrap(),
                std::str::from_utf8(args).unwrap(),
            )
        }

        assert_eq!(split("get 'a'"), ("get", "'a'"));
        assert_eq!(split("put 'a b' 'c'"), ("put", "'a b' 'c'"));
        assert_eq!(split("list"), ("list", ""));
        assert_eq!(split("list "), ("list", ""));
        assert_eq!(split(""), ("", ""));
        assert_eq!(split("   "), ("", "  "));
        assert_eq!(split_verb(b"get '\xff'"), (&b"get"[..], &b"'\xff'"[..]));
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!(Verb::lookup(b"get"), Some(Verb::Get));
        assert_eq!(Verb::lookup(b"delete"), Some(Verb::Delete));
        assert_eq!(Verb::lookup(b"GET"), None);
        assert_eq!(Verb::lookup(b"g"), None);
        assert_eq!(Verb::lookup(b"del"), None);
        assert_eq!(Verb::lookup(b"exit"), None);
        assert_eq!(Verb::lookup(b""), None);
    }

    #[test]
    fn every_verb_has_a_name() {
        for verb in Verb::all() {
            assert_eq!(Verb::lookup(verb.name().as_bytes()), Some(verb));
            assert!(verb.usage().starts_with(verb.name()));
        }
    }
}
