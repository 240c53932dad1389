//! 单引号参数的解析
//!
//! 键和值都需要用单引号包围，参数内部的单引号写作两个连续的单引号，
//! 例如 `'it''s'` 解析为 `it's`。参数按字节处理，不要求是合法的UTF-8。

use failure::Fail;

const QUOTE: u8 = b'\'';
const SPACE: u8 = b' ';

/// 参数解析错误
#[derive(Debug, Fail, PartialEq, Eq)]
pub enum ArgsError {
    /// 没有给出参数
    #[fail(display = "missing argument")]
    Empty,
    /// 参数没有以单引号开头
    #[fail(display = "arguments must be surrounded by quotes")]
    MissingOpeningQuote,
    /// 缺少结束的单引号
    #[fail(display = "unterminated quote")]
    UnterminatedQuote,
    /// 两个参数之间缺少空格
    #[fail(display = "arguments must be separated by a space")]
    MissingSeparator,
    /// 只给出了一个参数
    #[fail(display = "expected two arguments")]
    MissingArgument,
    /// 最后一个参数之后还有多余的输入
    #[fail(display = "unexpected input after the last argument")]
    TrailingInput,
}

/// 解析单个被单引号包围的参数，用于 get、delete 等命令
pub fn decode_one(raw: &[u8]) -> Result<Vec<u8>, ArgsError> {
    if raw.is_empty() {
        return Err(ArgsError::Empty);
    }
    let (text, rest) = take_quoted(raw)?;
    if !rest.is_empty() {
        return Err(ArgsError::TrailingInput);
    }
    Ok(text)
}

/// 解析两个以空格分隔、被单引号包围的参数，用于 put、set 命令
pub fn decode_two(raw: &[u8]) -> Result<(Vec<u8>, Vec<u8>), ArgsError> {
    if raw.is_empty() {
        return Err(ArgsError::Empty);
    }
    let (first, rest) = take_quoted(raw)?;
    let spaces = rest.iter().take_while(|&&b| b == SPACE).count();
    let trimmed = &rest[spaces..];
    if trimmed.is_empty() {
        return Err(ArgsError::MissingArgument);
    }
    if spaces == 0 {
        return Err(ArgsError::MissingSeparator);
    }
    let (second, rest) = take_quoted(trimmed)?;
    if !rest.is_empty() {
        return Err(ArgsError::TrailingInput);
    }
    Ok((first, second))
}

/// 将字节编码为带单引号的参数，是 `decode_one` 的逆操作
pub fn quote(text: &[u8]) -> Vec<u8> {
    let mut quoted = Vec::with_capacity(text.len() + 2);
    quoted.push(QUOTE);
    for &b in text {
        if b == QUOTE {
            quoted.push(QUOTE);
        }
        quoted.push(b);
    }
    quoted.push(QUOTE);
    quoted
}

/// 读取开头的一个参数，返回解码后的字节和结束引号之后的剩余输入
fn take_quoted(raw: &[u8]) -> Result<(Vec<u8>, &[u8]), ArgsError> {
    let body = match raw.split_first() {
        Some((&QUOTE, body)) => body,
        _ => return Err(ArgsError::MissingOpeningQuote),
    };

    let mut text = Vec::with_capacity(body.len());
    let mut i = 0;
    while i < body.len() {
        if body[i] != QUOTE {
            text.push(body[i]);
            i += 1;
        } else if body.get(i + 1) == Some(&QUOTE) {
            text.push(QUOTE);
            i += 2;
        } else {
            return Ok((text, &body[i + 1..]));
        }
    }

    Err(ArgsError::UnterminatedQuote)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(raw: &[u8]) -> Result<Vec<u8>, ArgsError> {
        decode_one(raw)
    }

    fn two(raw: &[u8]) -> Result<(Vec<u8>, Vec<u8>), ArgsError> {
        decode_two(raw)
    }

    #[test]
    fn decode_one_plain() {
        assert_eq!(one(b"'key1'"), Ok(b"key1".to_vec()));
        assert_eq!(one(b"'hello world'"), Ok(b"hello world".to_vec()));
        assert_eq!(one(b"''"), Ok(Vec::new()));
    }

    #[test]
    fn decode_one_doubled_quotes() {
        assert_eq!(one(b"'it''s'"), Ok(b"it's".to_vec()));
        assert_eq!(one(b"''''"), Ok(b"'".to_vec()));
        assert_eq!(one(b"'a'''"), Ok(b"a'".to_vec()));
    }

    #[test]
    fn decode_one_keeps_raw_bytes() {
        assert_eq!(one(b"'\xff'"), Ok(vec![0xff]));
        assert_eq!(one(b"'\xfe\x00'"), Ok(vec![0xfe, 0x00]));
        assert_eq!(one("'caf\u{e9}'".as_bytes()), Ok("caf\u{e9}".as_bytes().to_vec()));
    }

    #[test]
    fn decode_one_malformed() {
        assert_eq!(one(b""), Err(ArgsError::Empty));
        assert_eq!(one(b"key"), Err(ArgsError::MissingOpeningQuote));
        assert_eq!(one(b" 'key'"), Err(ArgsError::MissingOpeningQuote));
        assert_eq!(one(b"'key"), Err(ArgsError::UnterminatedQuote));
        assert_eq!(one(b"'''"), Err(ArgsError::UnterminatedQuote));
        assert_eq!(one(b"'a' 'b'"), Err(ArgsError::TrailingInput));
        assert_eq!(one(b"'a'b'"), Err(ArgsError::TrailingInput));
    }

    #[test]
    fn decode_two_plain() {
        assert_eq!(two(b"'a' 'b'"), Ok((b"a".to_vec(), b"b".to_vec())));
        assert_eq!(
            two(b"'a key'   'a value'"),
            Ok((b"a key".to_vec(), b"a value".to_vec()))
        );
        assert_eq!(two(b"'' ''"), Ok((Vec::new(), Vec::new())));
        assert_eq!(two(b"'\xff' '\x80'"), Ok((vec![0xff], vec![0x80])));
    }

    #[test]
    fn decode_two_escapes_each_argument() {
        assert_eq!(
            two(b"'it''s' 'don''t'"),
            Ok((b"it's".to_vec(), b"don't".to_vec()))
        );
        assert_eq!(two(b"'a''' '''b'"), Ok((b"a'".to_vec(), b"'b".to_vec())));
    }

    #[test]
    fn decode_two_malformed() {
        assert_eq!(two(b""), Err(ArgsError::Empty));
        assert_eq!(two(b"a b"), Err(ArgsError::MissingOpeningQuote));
        assert_eq!(two(b"'a' b"), Err(ArgsError::MissingOpeningQuote));
        assert_eq!(two(b"'a' 'b"), Err(ArgsError::UnterminatedQuote));
        assert_eq!(two(b"'a"), Err(ArgsError::UnterminatedQuote));
        assert_eq!(two(b"'a'"), Err(ArgsError::MissingArgument));
        assert_eq!(two(b"'a' "), Err(ArgsError::MissingArgument));
        assert_eq!(two(b"'a'x 'b'"), Err(ArgsError::MissingSeparator));
        assert_eq!(two(b"'a' 'b' 'c'"), Err(ArgsError::TrailingInput));
    }

    #[test]
    fn quote_is_inverse_of_decode() {
        let texts: &[&[u8]] = &[b"", b"plain", b"it's", b"''", b"a b c", b"'edge'", b"\xff'\xfe"];
        for text in texts {
            assert_eq!(one(&quote(text)), Ok(text.to_vec()));
        }
        assert_eq!(quote(b"it's"), b"'it''s'".to_vec());
    }
}
