//! Structure-aware view of JavaScript / TypeScript / JSX source text.
//!
//! This is not a parser for the whole language. It tokenizes enough to be
//! sure that an edit lands in code and not inside a string, comment, template
//! or regex, that brackets balance, and that JSX trees nest correctly. On top
//! of the token stream, [`SourceFile`] answers the handful of shape queries
//! the mutators need (imports, the default-exported function, returned JSX,
//! an object literal bound to a name) and produces [`TextEdit`]s that leave
//! every other byte of the file untouched.

mod edit;
mod jsx;
mod lexer;
mod module;

pub use edit::{TextEdit, apply_edits};
pub use jsx::{JsxChild, JsxElement, JsxExpression};
pub use module::{ArrayLiteral, FunctionBody, ImportDecl, ObjectLiteral, Property, SourceFile};

use std::ops::Range;

use crate::domain::DomainError;

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn text<'s>(&self, src: &'s str) -> &'s str {
        &src[self.start..self.end]
    }

    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Whether `<` may open a JSX element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `.ts` / config files: `<` is always an operator or a type bracket.
    Script,
    /// `.tsx` / `.jsx` / `.js` components.
    Jsx,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident,
    Str,
    Template,
    Number,
    Regex,
    Punct(char),
    Jsx(Box<JsxElement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SyntaxError {
    offset: usize,
    message: String,
}

impl SyntaxError {
    pub(crate) fn new(offset: usize, message: impl Into<String>) -> Self {
        Self {
            offset,
            message: message.into(),
        }
    }

    pub(crate) fn into_domain(self, src: &str) -> DomainError {
        let (line, column) = line_column(src, self.offset);
        DomainError::SourceParse {
            line,
            column,
            reason: self.message,
        }
    }
}

/// 1-based line and column (in chars) of a byte offset.
pub fn line_column(src: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(src.len());
    let before = &src[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = src[line_start..offset].chars().count() + 1;
    (line, column)
}

/// Leading whitespace of the line containing `offset`.
pub(crate) fn line_indent(src: &str, offset: usize) -> &str {
    let line_start = src[..offset].rfind('\n').map_or(0, |i| i + 1);
    let rest = &src[line_start..];
    let width = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    &rest[..width]
}
