//! Parser for the textual tree grammar.
//!
//! The syntax lives in `tree_gen.pest`. Parsing feeds a fresh
//! [`Specification`] through its builder methods, so directive and node
//! errors raised by the specification (duplicates, reserved names) are
//! reported with the span of the offending declaration.

use std::iter::Peekable;

use pest::{
    Parser, Span,
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
};
use pest_derive::Parser;
use tracing::debug;

use crate::{
    errors::{ParseError, SpecError},
    spec::{ChildNode, Multiplicity, NodeId, Specification},
};

#[derive(Parser)]
#[grammar = "tree_gen.pest"]
pub struct TreeGenParser;

/// Parses tree grammar text into an unresolved [`Specification`].
///
/// # Errors
///
/// Returns [`ParseError::Syntax`] when the text does not match the grammar
/// and [`ParseError::Spec`] when a declaration is rejected by the
/// specification (for example a duplicate node name).
pub fn parse(source: &str) -> Result<Specification, ParseError> {
    let mut spec = Specification::new();
    let pairs = TreeGenParser::parse(Rule::grammar, source)?;
    for grammar in pairs {
        for item in grammar.into_inner() {
            parse_item(&mut spec, item)?;
        }
    }
    debug!(nodes = spec.builders.len(), "parsed tree grammar");
    Ok(spec)
}

fn parse_item(spec: &mut Specification, pair: Pair<'_, Rule>) -> Result<(), ParseError> {
    let span = pair.as_span();
    let result = match pair.as_rule() {
        Rule::decl_file => spec.set_decl_file(&string_value(pair, span)?),
        Rule::defn_file => spec.set_defn_file(&string_value(pair, span)?),
        Rule::decl_use => {
            spec.add_decl_use(&string_value(pair, span)?);
            Ok(())
        }
        Rule::defn_use => {
            spec.add_defn_use(&string_value(pair, span)?);
            Ok(())
        }
        Rule::tree_scope => spec.set_tree_scope(expect(&mut pair.into_inner(), Rule::path, span)?.as_str()),
        Rule::initializer => {
            spec.set_initializer(expect(&mut pair.into_inner(), Rule::path, span)?.as_str())
        }
        Rule::location => spec.set_location(expect(&mut pair.into_inner(), Rule::path, span)?.as_str()),
        Rule::namespace => {
            let mut inner = pair.into_inner().peekable();
            let doc = take_doc(&mut inner);
            let declaration = expect(&mut inner, Rule::namespace_name, span)?;
            let name = expect(&mut declaration.into_inner(), Rule::ident, span)?;
            spec.add_namespace(name.as_str(), &doc);
            Ok(())
        }
        Rule::node => {
            parse_node(spec, pair)?;
            Ok(())
        }
        Rule::EOI => Ok(()),
        _ => return Err(unexpected(&pair)),
    };
    result.map_err(|source| spec_error(source, span))
}

fn parse_node(spec: &mut Specification, pair: Pair<'_, Rule>) -> Result<NodeId, ParseError> {
    let span = pair.as_span();
    let mut inner = pair.into_inner().peekable();
    let doc = take_doc(&mut inner);
    let name = expect(&mut inner, Rule::ident, span)?;
    let id = spec
        .add_node(name.as_str(), &doc)
        .map_err(|source| spec_error(source, name.as_span()))?;

    for item in inner {
        match item.as_rule() {
            Rule::child => spec.add_child(id, parse_child(item)?),
            Rule::error_marker => spec.mark_error(id),
            Rule::node => {
                let child_span = item.as_span();
                let derived = parse_node(spec, item)?;
                spec.derive_from(derived, id)
                    .map_err(|source| spec_error(source, child_span))?;
            }
            _ => return Err(unexpected(&item)),
        }
    }
    Ok(id)
}

fn parse_child(pair: Pair<'_, Rule>) -> Result<ChildNode, ParseError> {
    let span = pair.as_span();
    let mut inner = pair.into_inner().peekable();
    let doc = take_doc(&mut inner);
    let name = expect(&mut inner, Rule::ident, span)?.as_str();
    let Some(kind) = inner.next() else {
        return Err(custom_error(span, "missing child type".to_string()).into());
    };

    let kind_span = kind.as_span();
    let child = match kind.as_rule() {
        Rule::relational => {
            let mut parts = kind.into_inner();
            let multiplicity = parse_multiplicity(expect(&mut parts, Rule::multiplicity, kind_span)?)?;
            let target = expect(&mut parts, Rule::ident, kind_span)?;
            ChildNode::node(name, multiplicity, target.as_str())
        }
        Rule::external => {
            let mut parts = kind.into_inner();
            let multiplicity = parse_multiplicity(expect(&mut parts, Rule::multiplicity, kind_span)?)?;
            let type_name = expect(&mut parts, Rule::type_text, kind_span)?;
            ChildNode::external(name, multiplicity, type_name.as_str().trim())
        }
        Rule::primitive => {
            let type_name = expect(&mut kind.into_inner(), Rule::type_text, kind_span)?;
            ChildNode::primitive(name, type_name.as_str().trim())
        }
        _ => return Err(unexpected(&kind)),
    };
    Ok(child.with_doc(&doc))
}

fn parse_multiplicity(pair: Pair<'_, Rule>) -> Result<Multiplicity, ParseError> {
    Multiplicity::from_keyword(pair.as_str()).ok_or_else(|| {
        custom_error(
            pair.as_span(),
            format!("unknown multiplicity `{}`", pair.as_str()),
        )
        .into()
    })
}

/// Consumes a leading doc comment, if present, and returns its text.
fn take_doc(pairs: &mut Peekable<Pairs<'_, Rule>>) -> String {
    match pairs.next_if(|pair| pair.as_rule() == Rule::doc) {
        Some(doc) => doc
            .into_inner()
            .map(|line| {
                let text = line.as_str().trim_start_matches('#');
                text.strip_prefix(' ').unwrap_or(text).trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n"),
        None => String::new(),
    }
}

fn string_value(pair: Pair<'_, Rule>, span: Span<'_>) -> Result<String, ParseError> {
    let string = expect(&mut pair.into_inner(), Rule::string, span)?;
    let inner = expect(&mut string.into_inner(), Rule::string_inner, span)?;
    Ok(inner.as_str().to_string())
}

/// Returns the next pair produced by `rule`, skipping anything before it.
fn expect<'i>(
    pairs: &mut impl Iterator<Item = Pair<'i, Rule>>,
    rule: Rule,
    span: Span<'i>,
) -> Result<Pair<'i, Rule>, ParseError> {
    pairs
        .find(|pair| pair.as_rule() == rule)
        .ok_or_else(|| custom_error(span, format!("expected {rule:?}")).into())
}

fn custom_error(span: Span<'_>, message: String) -> Error<Rule> {
    Error::new_from_span(ErrorVariant::CustomError { message }, span)
}

fn spec_error(source: SpecError, span: Span<'_>) -> ParseError {
    ParseError::Spec {
        location: Box::new(custom_error(span, source.to_string())),
        source,
    }
}

fn unexpected(pair: &Pair<'_, Rule>) -> ParseError {
    custom_error(
        pair.as_span(),
        format!("unexpected {:?}", pair.as_rule()),
    )
    .into()
}
