use thiserror::Error;

use crate::{PrimitiveType, Type, WildcardBound};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeParseError {
    #[error("unexpected end of type `{0}`")]
    UnexpectedEof(String),
    #[error("unexpected `{found}` in type `{input}`")]
    Unexpected { input: String, found: char },
    #[error("trailing input `{rest}` after type `{input}`")]
    Trailing { input: String, rest: String },
    #[error("`void` is only valid as a top-level type")]
    NestedVoid,
}

pub(crate) fn parse_type(input: &str) -> Result<Type, TypeParseError> {
    let (ty, rest) = parse_one(input, input, false)?;
    let rest = rest.trim_start();
    if !rest.is_empty() {
        return Err(TypeParseError::Trailing {
            input: input.to_string(),
            rest: rest.to_string(),
        });
    }
    Ok(ty)
}

fn parse_one<'a>(
    full: &str,
    input: &'a str,
    nested: bool,
) -> Result<(Type, &'a str), TypeParseError> {
    let input = input.trim_start();
    let Some(first) = input.chars().next() else {
        return Err(TypeParseError::UnexpectedEof(full.to_string()));
    };

    if first == '?' {
        if !nested {
            return Err(TypeParseError::Unexpected {
                input: full.to_string(),
                found: '?',
            });
        }
        let rest = input[1..].trim_start();
        let (keyword, after) = split_ident(rest);
        return match keyword {
            "extends" => {
                let (bound, rest) = parse_one(full, after, true)?;
                Ok((
                    Type::Wildcard(Some(WildcardBound::Extends(Box::new(bound)))),
                    rest,
                ))
            }
            "super" => {
                let (bound, rest) = parse_one(full, after, true)?;
                Ok((
                    Type::Wildcard(Some(WildcardBound::Super(Box::new(bound)))),
                    rest,
                ))
            }
            _ => Ok((Type::Wildcard(None), rest)),
        };
    }

    let (name, mut rest) = split_qualified_name(input);
    if name.is_empty() {
        return Err(TypeParseError::Unexpected {
            input: full.to_string(),
            found: first,
        });
    }

    let mut ty = if name == "void" {
        if nested {
            return Err(TypeParseError::NestedVoid);
        }
        Type::Void
    } else if let Some(primitive) = PrimitiveType::from_keyword(name) {
        Type::Primitive(primitive)
    } else {
        Type::Named(name.to_string())
    };

    rest = rest.trim_start();
    if let Some(after) = rest.strip_prefix('<') {
        let mut args = Vec::new();
        let mut cursor = after;
        loop {
            let (arg, after_arg) = parse_one(full, cursor, true)?;
            args.push(arg);
            let after_arg = after_arg.trim_start();
            match after_arg.chars().next() {
                Some(',') => cursor = &after_arg[1..],
                Some('>') => {
                    rest = &after_arg[1..];
                    break;
                }
                Some(found) => {
                    return Err(TypeParseError::Unexpected {
                        input: full.to_string(),
                        found,
                    })
                }
                None => return Err(TypeParseError::UnexpectedEof(full.to_string())),
            }
        }
        ty = Type::generic(ty, args);
    }

    loop {
        let trimmed = rest.trim_start();
        let Some(after) = trimmed.strip_prefix('[') else {
            break;
        };
        let after = after.trim_start();
        let Some(after) = after.strip_prefix(']') else {
            return Err(TypeParseError::Unexpected {
                input: full.to_string(),
                found: after.chars().next().unwrap_or('['),
            });
        };
        if ty == Type::Void {
            return Err(TypeParseError::NestedVoid);
        }
        ty = Type::array(ty);
        rest = after;
    }

    Ok((ty, rest))
}

fn split_ident(input: &str) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_' || *c == '$'))
        .map(|(idx, _)| idx)
        .unwrap_or(input.len());
    (&input[..end], &input[end..])
}

fn split_qualified_name(input: &str) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_' || *c == '$' || *c == '.'))
        .map(|(idx, _)| idx)
        .unwrap_or(input.len());
    (&input[..end], &input[end..])
}
