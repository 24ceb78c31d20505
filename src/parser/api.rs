use pest::error::{Error, ErrorVariant};
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::runner::ds::error::ComposeError;
use crate::runner::ds::node::NodeRef;
use crate::runner::ds::object_property::PropertyKey;
use crate::runner::ds::value::{NumberType, Value};

#[derive(Parser)]
#[grammar = "parser/props_grammar.pest"] // relative to src
pub struct PropsParser;

/// Reads an object literal into a fallback-less mapping node. Nested objects become
/// mapping nodes of their own; for duplicate keys the last one wins.
pub fn parse_props(source: &str) -> Result<NodeRef, ComposeError> {
    build_props(source).map_err(|e| ComposeError::InvalidTarget(format!("{}", e)))
}

fn build_props(source: &str) -> Result<NodeRef, Error<Rule>> {
    let props = PropsParser::parse(Rule::props, source)?
        .next()
        .ok_or_else(|| {
            Error::new_from_pos(empty_input_error(), pest::Position::from_start(source))
        })?;
    for pair in props.into_inner() {
        match pair.as_rule() {
            Rule::object => return build_object(pair),
            Rule::EOI => { /* Do nothing */ }
            _ => return Err(get_unexpected_error(1, &pair)),
        }
    }
    Err(Error::new_from_pos(
        empty_input_error(),
        pest::Position::from_start(source),
    ))
}

fn empty_input_error() -> ErrorVariant<Rule> {
    ErrorVariant::CustomError {
        message: "expected an object literal".to_string(),
    }
}

fn build_object(pair: Pair<Rule>) -> Result<NodeRef, Error<Rule>> {
    let node = NodeRef::plain();
    for property in pair.into_inner() {
        if property.as_rule() != Rule::property {
            return Err(get_unexpected_error(2, &property));
        }
        let err = get_unexpected_error(7, &property);
        let mut inner = property.into_inner();
        let (key_pair, value_pair) = match (inner.next(), inner.next()) {
            (Some(k), Some(v)) => (k, v),
            _ => return Err(err),
        };
        let key = build_key(key_pair)?;
        let value = build_value(value_pair)?;
        node.set(key, value);
    }
    Ok(node)
}

fn build_key(pair: Pair<Rule>) -> Result<PropertyKey, Error<Rule>> {
    match pair.as_rule() {
        Rule::identifier => Ok(PropertyKey::Str(pair.as_str().to_string())),
        Rule::string => Ok(PropertyKey::Str(build_string(pair)?)),
        _ => Err(get_unexpected_error(3, &pair)),
    }
}

fn build_value(pair: Pair<Rule>) -> Result<Value, Error<Rule>> {
    Ok(match pair.as_rule() {
        Rule::object => Value::Object(build_object(pair)?),
        Rule::string => Value::String(build_string(pair)?),
        Rule::number => Value::Number(build_number(&pair)?),
        Rule::boolean => Value::Boolean(pair.as_str() == "true"),
        Rule::null => Value::Null,
        Rule::undefined => Value::Undefined,
        _ => return Err(get_unexpected_error(4, &pair)),
    })
}

fn build_number(pair: &Pair<Rule>) -> Result<NumberType, Error<Rule>> {
    let text = pair.as_str();
    let is_integer = !text.contains(|c: char| c == '.' || c == 'e' || c == 'E');
    if is_integer {
        if let Ok(i) = text.parse::<i64>() {
            return Ok(NumberType::Integer(i));
        }
    }
    text.parse::<f64>().map(NumberType::Float).map_err(|e| {
        Error::new_from_span(
            ErrorVariant::CustomError {
                message: format!("invalid number `{}`: {}", text, e),
            },
            pair.as_span(),
        )
    })
}

fn build_string(pair: Pair<Rule>) -> Result<String, Error<Rule>> {
    let inner = match pair.clone().into_inner().next() {
        Some(p) => p,
        None => return Err(get_unexpected_error(5, &pair)),
    };
    let mut out = String::with_capacity(inner.as_str().len());
    let mut chars = inner.as_str().chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => return Err(get_unexpected_error(6, &inner)),
        }
    }
    Ok(out)
}

fn get_unexpected_error(id: i32, pair: &Pair<Rule>) -> Error<Rule> {
    let message = format!("Unexpected state reached [{:?}] - {}", pair.as_rule(), id);
    Error::new_from_span(ErrorVariant::CustomError { message }, pair.as_span())
}
