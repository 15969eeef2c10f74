//! Split a command line into arguments, honoring quotes.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TokenizeErr {
    #[error("missing closing {0} quote")]
    UnterminatedQuote(char),
    #[error("line ends with a lone backslash")]
    TrailingEscape,
}

/// Whitespace separates arguments. Single quotes keep text verbatim, double quotes allow `\"`
/// and `\\` escapes, and a backslash outside quotes escapes the next character.
pub fn split_line(line: &str) -> Result<Vec<String>, TokenizeErr> {
    let mut args = Vec::new();
    let mut current = String::new();
    // distinguishes `""` (empty argument) from no argument at all
    let mut in_arg = false;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            c if c.is_whitespace() => {
                if in_arg {
                    args.push(std::mem::take(&mut current));
                    in_arg = false;
                }
            }
            '\'' => {
                in_arg = true;
                loop {
                    match chars.next() {
                        Some('\'') => break,
                        Some(c) => current.push(c),
                        None => return Err(TokenizeErr::UnterminatedQuote('\'')),
                    }
                }
            }
            '"' => {
                in_arg = true;
                loop {
                    match chars.next() {
                        Some('"') => break,
                        Some('\\') => match chars.next() {
                            Some(c @ ('"' | '\\')) => current.push(c),
                            Some(c) => {
                                current.push('\\');
                                current.push(c);
                            }
                            None => return Err(TokenizeErr::UnterminatedQuote('"')),
                        },
                        Some(c) => current.push(c),
                        None => return Err(TokenizeErr::UnterminatedQuote('"')),
                    }
                }
            }
            '\\' => {
                in_arg = true;
                current.push(chars.next().ok_or(TokenizeErr::TrailingEscape)?);
            }
            c => {
                in_arg = true;
                current.push(c);
            }
        }
    }
    if in_arg {
        args.push(current);
    }

    Ok(args)
}

#[cfg(test)]
mod test {
    use super::{split_line, TokenizeErr};

    #[test]
    fn quoted_description_is_one_argument() {
        let args = split_line(r#"deposit 123 10.50 --description "rent for May""#).unwrap();
        assert_eq!(args, ["deposit", "123", "10.50", "--description", "rent for May"]);

        let args = split_line("withdraw  'a b'c \"\" x\\ y").unwrap();
        assert_eq!(args, ["withdraw", "a bc", "", "x y"]);

        assert!(split_line("   ").unwrap().is_empty());
    }

    #[test]
    fn broken_quoting() {
        assert_eq!(
            split_line("deposit \"oops").unwrap_err(),
            TokenizeErr::UnterminatedQuote('"')
        );
        assert_eq!(split_line("x \\").unwrap_err(), TokenizeErr::TrailingEscape);
        assert_eq!(
            split_line(r#""say \"hi\"""#).unwrap(),
            [r#"say "hi""#]
        );
    }
}
