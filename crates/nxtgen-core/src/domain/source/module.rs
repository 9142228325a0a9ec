use std::ops::Range;

use super::{
    Dialect, Span, Token, TokenKind, edit::TextEdit, jsx::JsxElement, lexer::Lexer, line_indent,
};
use crate::domain::DomainError;

/// A tokenized module with bracket structure resolved.
#[derive(Debug, Clone)]
pub struct SourceFile<'a> {
    src: &'a str,
    tokens: Vec<Token>,
    /// Bracket nesting depth of each token; an opener and its closer share a depth.
    depths: Vec<usize>,
    matching: Vec<Option<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportDecl {
    /// From `import` through the trailing `;` when present.
    pub span: Span,
    pub specifier: String,
    /// Imported names inside the braces, before any `as` rename.
    pub named: Vec<String>,
    /// Local names bound as values: the default import plus named imports
    /// not marked `type`. Always empty for `import type`.
    pub bindings: Vec<String>,
    pub type_only: bool,
    /// Token indices of the braces around named imports.
    braces: Option<(usize, usize)>,
}

/// Token indices of a function body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionBody {
    Block { open: usize, close: usize },
    /// Concise arrow body starting at this token.
    Expression { start: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// `None` for spreads and computed keys.
    pub key: Option<String>,
    pub span: Span,
    /// Token range of the value, absent for shorthand properties and methods.
    pub value: Option<Range<usize>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectLiteral {
    pub open: usize,
    pub close: usize,
    pub properties: Vec<Property>,
    /// End offset of a comma after the last property.
    pub trailing_comma: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayLiteral {
    pub open: usize,
    pub close: usize,
    pub elements: Vec<Span>,
    pub trailing_comma: Option<usize>,
}

impl ObjectLiteral {
    pub fn property(&self, key: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.key.as_deref() == Some(key))
    }
}

impl<'a> SourceFile<'a> {
    pub fn parse(src: &'a str, dialect: Dialect) -> Result<Self, DomainError> {
        let tokens = Lexer::new(src, dialect)
            .tokenize()
            .map_err(|e| e.into_domain(src))?;

        let mut depths = Vec::with_capacity(tokens.len());
        let mut matching = vec![None; tokens.len()];
        let mut stack = Vec::new();
        for (i, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Punct('(' | '[' | '{') => {
                    depths.push(stack.len());
                    stack.push(i);
                }
                TokenKind::Punct(')' | ']' | '}') => {
                    if let Some(open) = stack.pop() {
                        matching[open] = Some(i);
                        matching[i] = Some(open);
                    }
                    depths.push(stack.len());
                }
                _ => depths.push(stack.len()),
            }
        }

        Ok(Self {
            src,
            tokens,
            depths,
            matching,
        })
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    // ── Token helpers ────────────────────────────────────────────────────

    fn text(&self, i: usize) -> &'a str {
        self.tokens[i].span.text(self.src)
    }

    fn is_ident(&self, i: usize, word: &str) -> bool {
        self.tokens
            .get(i)
            .is_some_and(|t| t.kind == TokenKind::Ident && t.span.text(self.src) == word)
    }

    fn ident_at(&self, i: usize) -> Option<&'a str> {
        self.tokens
            .get(i)
            .filter(|t| t.kind == TokenKind::Ident)
            .map(|t| t.span.text(self.src))
    }

    fn is_punct(&self, i: usize, c: char) -> bool {
        self.tokens
            .get(i)
            .is_some_and(|t| t.kind == TokenKind::Punct(c))
    }

    fn is_str(&self, i: usize) -> bool {
        self.tokens.get(i).is_some_and(|t| t.kind == TokenKind::Str)
    }

    /// `=>` with no space between the two characters.
    fn is_arrow(&self, i: usize) -> bool {
        self.is_punct(i, '=')
            && self.is_punct(i + 1, '>')
            && self.tokens[i].span.end == self.tokens[i + 1].span.start
    }

    fn on_later_line(&self, before: usize, after: usize) -> bool {
        let from = self.tokens[before].span.end;
        let to = self.tokens[after].span.start;
        self.src[from..to].contains('\n')
    }

    fn unquote(&self, i: usize) -> String {
        let text = self.text(i);
        text[1..text.len() - 1].to_string()
    }

    fn span_of(&self, range: &Range<usize>) -> Span {
        Span::new(
            self.tokens[range.start].span.start,
            self.tokens[range.end - 1].span.end,
        )
    }

    // ── Imports ──────────────────────────────────────────────────────────

    pub fn imports(&self) -> Vec<ImportDecl> {
        let mut imports = Vec::new();
        let mut i = 0;
        while i < self.tokens.len() {
            if self.depths[i] != 0
                || !self.is_ident(i, "import")
                || self.is_punct(i + 1, '(')
                || self.is_punct(i + 1, '.')
            {
                i += 1;
                continue;
            }

            let mut j = i + 1;
            let mut specifier = None;
            while j < self.tokens.len() {
                if self.is_str(j) && (j == i + 1 || self.is_ident(j - 1, "from")) {
                    specifier = Some(j);
                    break;
                }
                if self.depths[j] == 0 && self.is_punct(j, ';') {
                    break;
                }
                j += 1;
            }
            let Some(spec) = specifier else {
                i = j + 1;
                continue;
            };

            let end = if self.is_punct(spec + 1, ';') {
                spec + 1
            } else {
                spec
            };
            imports.push(self.import_decl(i, spec, end));
            i = end + 1;
        }
        imports
    }

    /// `import` keyword at `kw`, module string at `spec`, last token at `end`.
    fn import_decl(&self, kw: usize, spec: usize, end: usize) -> ImportDecl {
        // `import type from "x"` imports a default binding called `type`.
        let type_only = self.is_ident(kw + 1, "type") && !self.is_ident(kw + 2, "from");
        let first = if type_only { kw + 2 } else { kw + 1 };

        let mut named = Vec::new();
        let mut bindings = Vec::new();
        if !type_only {
            if let Some(name) = self.ident_at(first).filter(|n| *n != "from") {
                bindings.push(name.to_string());
            }
        }

        let braces = (first..spec)
            .find(|&k| self.is_punct(k, '{'))
            .and_then(|open| Some((open, self.matching[open]?)));
        if let Some((open, close)) = braces {
            let (items, _) = self.split_items(open, close);
            for item in items {
                let type_item = self.is_ident(item.start, "type") && item.len() > 1;
                let at = if type_item { item.start + 1 } else { item.start };
                let Some(imported) = self.ident_at(at) else {
                    continue;
                };
                named.push(imported.to_string());
                if type_only || type_item {
                    continue;
                }
                let local = if self.is_ident(at + 1, "as") {
                    self.ident_at(at + 2).unwrap_or(imported)
                } else {
                    imported
                };
                bindings.push(local.to_string());
            }
        }

        ImportDecl {
            span: Span::new(self.tokens[kw].span.start, self.tokens[end].span.end),
            specifier: self.unquote(spec),
            named,
            bindings,
            type_only,
            braces,
        }
    }

    /// Whether an import of `module` binds `name` as a value.
    pub fn imports_value(&self, name: &str, module: &str) -> bool {
        self.imports()
            .iter()
            .any(|i| i.specifier == module && i.bindings.iter().any(|b| b == name))
    }

    /// Edit that brings `name` from `module` into scope, or `None` when it
    /// already is.
    ///
    /// The name joins the braces of an existing value import of the module
    /// when there is one; otherwise `statement` is inserted as a new import.
    pub fn named_import_edit(&self, name: &str, module: &str, statement: &str) -> Option<TextEdit> {
        let imports = self.imports();
        let matching: Vec<&ImportDecl> = imports.iter().filter(|i| i.specifier == module).collect();
        if matching.iter().any(|i| i.bindings.iter().any(|b| b == name)) {
            return None;
        }
        let braces = matching
            .iter()
            .filter(|i| !i.type_only)
            .find_map(|i| i.braces);
        Some(match braces {
            Some((open, close)) => {
                let (items, trailing) = self.split_items(open, close);
                let spans: Vec<Span> = items.iter().map(|r| self.span_of(r)).collect();
                self.append_item(open, close, &spans, trailing, name, true)
            }
            None => self.import_insertion(statement),
        })
    }

    /// Quote character used by the first import, defaulting to `"`.
    pub fn preferred_quote(&self) -> char {
        self.imports()
            .first()
            .and_then(|i| {
                i.span
                    .text(self.src)
                    .chars()
                    .rev()
                    .find(|c| *c == '"' || *c == '\'')
            })
            .unwrap_or('"')
    }

    /// Whether the existing imports end with `;` (true when there are none).
    pub fn uses_semicolons(&self) -> bool {
        self.imports()
            .last()
            .is_none_or(|i| self.src[..i.span.end].ends_with(';'))
    }

    /// Where a new import statement goes: after the last import, else after
    /// the directive prologue, else at the very top.
    pub fn import_insertion(&self, statement: &str) -> TextEdit {
        if let Some(last) = self.imports().last() {
            return TextEdit::insert(self.end_of_statement_line(last.span.end), format!("\n{statement}"));
        }
        if let Some(end) = self.directive_prologue_end() {
            return TextEdit::insert(self.end_of_statement_line(end), format!("\n\n{statement}"));
        }
        TextEdit::insert(0, format!("{statement}\n"))
    }

    /// Extend `offset` to the end of its line unless another token follows
    /// on the same line.
    fn end_of_statement_line(&self, offset: usize) -> usize {
        let line_end = self.src[offset..]
            .find('\n')
            .map_or(self.src.len(), |k| offset + k);
        let next_token = self.tokens.iter().find(|t| t.span.start >= offset);
        match next_token {
            Some(t) if t.span.start < line_end => offset,
            _ => line_end,
        }
    }

    /// End offset of leading `"use client";`-style directives.
    pub fn directive_prologue_end(&self) -> Option<usize> {
        let mut end = None;
        let mut i = 0;
        while self.is_str(i) {
            if self.is_punct(i + 1, ';') {
                end = Some(self.tokens[i + 1].span.end);
                i += 2;
            } else if i + 1 >= self.tokens.len() || self.on_later_line(i, i + 1) {
                end = Some(self.tokens[i].span.end);
                i += 1;
            } else {
                break;
            }
        }
        end
    }

    // ── Functions ────────────────────────────────────────────────────────

    /// Body of the module's default-exported component function.
    pub fn default_export_function(&self) -> Option<FunctionBody> {
        let i = (0..self.tokens.len()).find(|&i| {
            self.depths[i] == 0 && self.is_ident(i, "export") && self.is_ident(i + 1, "default")
        })?;
        let mut j = i + 2;
        if self.is_ident(j, "async") && !self.is_punct(j + 1, '(') {
            j += 1;
        }
        if self.is_ident(j, "function") {
            return self.function_body(j);
        }
        if self.is_punct(j, '(') || self.is_ident(j, "async") {
            return self.arrow_body(j);
        }
        let name = self.ident_at(j)?;
        self.named_function(name)
    }

    /// `function` keyword at `kw`.
    fn function_body(&self, kw: usize) -> Option<FunctionBody> {
        let mut k = kw + 1;
        if self.is_punct(k, '*') {
            k += 1;
        }
        if self.ident_at(k).is_some() {
            k += 1;
        }
        if self.is_punct(k, '<') {
            k = self.skip_angle_brackets(k)?;
        }
        if !self.is_punct(k, '(') {
            return None;
        }
        let after_params = self.matching[k]? + 1;
        let open = self.block_after_signature(after_params)?;
        Some(FunctionBody::Block {
            open,
            close: self.matching[open]?,
        })
    }

    /// Parameters (or `async`) of an arrow function at `k`.
    fn arrow_body(&self, mut k: usize) -> Option<FunctionBody> {
        if self.is_ident(k, "async") {
            k += 1;
        }
        if self.is_punct(k, '<') {
            k = self.skip_angle_brackets(k)?;
        }
        if self.is_punct(k, '(') {
            k = self.matching[k]? + 1;
        } else if self.ident_at(k).is_some() {
            k += 1;
        } else {
            return None;
        }

        let depth = self.depths.get(k).copied()?;
        let arrow = (k..self.tokens.len())
            .take_while(|&t| self.depths[t] >= depth)
            .find(|&t| self.depths[t] == depth && self.is_arrow(t))?;
        let start = arrow + 2;
        if self.is_punct(start, '{') {
            Some(FunctionBody::Block {
                open: start,
                close: self.matching[start]?,
            })
        } else {
            (start < self.tokens.len()).then_some(FunctionBody::Expression { start })
        }
    }

    /// First `{` after a parameter list that opens the body, stepping over a
    /// return type annotation (which may itself contain object types).
    fn block_after_signature(&self, mut k: usize) -> Option<usize> {
        if !self.is_punct(k, ':') {
            return self.is_punct(k, '{').then_some(k);
        }
        k += 1;
        let mut type_expected = true;
        while k < self.tokens.len() {
            match self.tokens[k].kind {
                TokenKind::Punct('{') if !type_expected => return Some(k),
                TokenKind::Punct('{' | '(' | '[') => {
                    k = self.matching[k]? + 1;
                    type_expected = false;
                }
                TokenKind::Punct('|' | '&' | '<' | ',' | '.') => {
                    k += 1;
                    type_expected = true;
                }
                TokenKind::Punct(';') => return None,
                _ => {
                    k += 1;
                    type_expected = false;
                }
            }
        }
        None
    }

    fn skip_angle_brackets(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for k in open..self.tokens.len() {
            if self.is_punct(k, '<') {
                depth += 1;
            } else if self.is_punct(k, '>') {
                depth -= 1;
                if depth == 0 {
                    return Some(k + 1);
                }
            }
        }
        None
    }

    /// `function name(...)` or `const name = (...) =>` at top level.
    fn named_function(&self, name: &str) -> Option<FunctionBody> {
        for i in 0..self.tokens.len() {
            if self.depths[i] != 0 {
                continue;
            }
            if self.is_ident(i, "function") && self.is_ident(i + 1, name) {
                return self.function_body(i);
            }
            if matches!(self.ident_at(i), Some("const" | "let" | "var"))
                && self.is_ident(i + 1, name)
            {
                let eq = (i + 2..self.tokens.len())
                    .find(|&k| self.depths[k] == 0 && self.is_punct(k, '=') && !self.is_arrow(k))?;
                return self.arrow_body(eq + 1);
            }
        }
        None
    }

    /// JSX trees returned from the body's top level.
    pub fn returned_jsx(&self, body: FunctionBody) -> Vec<&JsxElement> {
        match body {
            FunctionBody::Block { open, close } => {
                let depth = self.depths[open] + 1;
                (open + 1..close)
                    .filter(|&i| self.depths[i] == depth && self.is_ident(i, "return"))
                    .filter_map(|i| self.jsx_at(i + 1))
                    .collect()
            }
            FunctionBody::Expression { start } => self.jsx_at(start).into_iter().collect(),
        }
    }

    fn jsx_at(&self, mut i: usize) -> Option<&JsxElement> {
        while self.is_punct(i, '(') {
            i += 1;
        }
        match &self.tokens.get(i)?.kind {
            TokenKind::Jsx(element) => Some(element),
            _ => None,
        }
    }

    // ── Object and array literals ────────────────────────────────────────

    /// Object literal assigned to top-level `const|let|var name`.
    pub fn object_binding(&self, name: &str) -> Option<ObjectLiteral> {
        let decl = (0..self.tokens.len()).find(|&i| {
            self.depths[i] == 0
                && matches!(self.ident_at(i), Some("const" | "let" | "var"))
                && self.is_ident(i + 1, name)
        })?;
        let eq = (decl + 2..self.tokens.len())
            .take_while(|&k| !(self.depths[k] == 0 && self.is_punct(k, ';')))
            .find(|&k| self.depths[k] == 0 && self.is_punct(k, '='))?;
        self.is_punct(eq + 1, '{')
            .then(|| self.object_at(eq + 1))
            .flatten()
    }

    /// Any top-level `export default`.
    pub fn has_default_export(&self) -> bool {
        (0..self.tokens.len()).any(|i| {
            self.depths[i] == 0 && self.is_ident(i, "export") && self.is_ident(i + 1, "default")
        })
    }

    /// `module.exports`, `exports.x` or a `require(...)` call anywhere.
    pub fn uses_commonjs(&self) -> bool {
        (0..self.tokens.len()).any(|i| {
            if i > 0 && self.is_punct(i - 1, '.') {
                return false;
            }
            match self.ident_at(i) {
                Some("module") => self.is_punct(i + 1, '.') && self.is_ident(i + 2, "exports"),
                Some("exports") => self.is_punct(i + 1, '.'),
                Some("require") => self.is_punct(i + 1, '('),
                _ => false,
            }
        })
    }

    /// `export default name` (optionally followed by `satisfies T` / `as T`).
    pub fn default_exports_binding(&self, name: &str) -> bool {
        (0..self.tokens.len()).any(|i| {
            self.depths[i] == 0
                && self.is_ident(i, "export")
                && self.is_ident(i + 1, "default")
                && self.is_ident(i + 2, name)
                && !self.is_punct(i + 3, '.')
                && !self.is_punct(i + 3, '(')
        })
    }

    pub fn object_at(&self, open: usize) -> Option<ObjectLiteral> {
        if !self.is_punct(open, '{') {
            return None;
        }
        let close = self.matching[open]?;
        let (items, trailing) = self.split_items(open, close);
        let properties = items
            .into_iter()
            .map(|item| {
                let key = match self.tokens[item.start].kind {
                    TokenKind::Ident => Some(self.text(item.start).to_string()),
                    TokenKind::Str => Some(self.unquote(item.start)),
                    _ => None,
                };
                let value = (key.is_some() && self.is_punct(item.start + 1, ':') && item.len() > 2)
                    .then(|| item.start + 2..item.end);
                Property {
                    key,
                    span: self.span_of(&item),
                    value,
                }
            })
            .collect();
        Some(ObjectLiteral {
            open,
            close,
            properties,
            trailing_comma: trailing,
        })
    }

    /// The property's value when it is an array literal.
    pub fn array_value(&self, property: &Property) -> Option<ArrayLiteral> {
        let value = property.value.as_ref()?;
        let open = value.start;
        if !self.is_punct(open, '[') || self.matching[open] != Some(value.end - 1) {
            return None;
        }
        let close = value.end - 1;
        let (items, trailing) = self.split_items(open, close);
        Some(ArrayLiteral {
            open,
            close,
            elements: items.iter().map(|r| self.span_of(r)).collect(),
            trailing_comma: trailing,
        })
    }

    /// Comma-separated token ranges between two matching brackets, plus the
    /// end offset of a trailing comma.
    fn split_items(&self, open: usize, close: usize) -> (Vec<Range<usize>>, Option<usize>) {
        let depth = self.depths[open] + 1;
        let mut items = Vec::new();
        let mut start = open + 1;
        let mut last_comma = None;
        for i in open + 1..close {
            if self.depths[i] == depth && self.is_punct(i, ',') {
                if i > start {
                    items.push(start..i);
                }
                start = i + 1;
                last_comma = Some(i);
            }
        }
        if start < close {
            items.push(start..close);
            last_comma = None;
        }
        let trailing = last_comma
            .filter(|_| !items.is_empty())
            .map(|i| self.tokens[i].span.end);
        (items, trailing)
    }

    // ── Appending ────────────────────────────────────────────────────────

    /// Append `item` to an array, matching its single- or multi-line layout.
    pub fn append_element(&self, array: &ArrayLiteral, item: &str) -> TextEdit {
        self.append_item(
            array.open,
            array.close,
            &array.elements,
            array.trailing_comma,
            item,
            false,
        )
    }

    /// Append a `key: value` property to an object literal.
    pub fn append_property(&self, object: &ObjectLiteral, property: &str) -> TextEdit {
        let spans: Vec<Span> = object.properties.iter().map(|p| p.span).collect();
        self.append_item(object.open, object.close, &spans, object.trailing_comma, property, true)
    }

    fn append_item(
        &self,
        open: usize,
        close: usize,
        items: &[Span],
        trailing_comma: Option<usize>,
        item: &str,
        pad_empty: bool,
    ) -> TextEdit {
        let inner_start = self.tokens[open].span.end;
        let inner_end = self.tokens[close].span.start;

        let (Some(first), Some(last)) = (items.first(), items.last()) else {
            let text = if pad_empty {
                format!(" {item} ")
            } else {
                item.to_string()
            };
            let inner = &self.src[inner_start..inner_end];
            if inner.trim().is_empty() {
                return TextEdit::replace(inner_start..inner_end, text);
            }
            // Only comments inside: the item goes after the last of them.
            let content_end = inner_start + inner.trim_end().len();
            if !inner.contains('\n') {
                return TextEdit::insert(content_end, format!(" {item}"));
            }
            let indent = if self.src[inner_start..content_end].contains('\n') {
                line_indent(self.src, content_end - 1).to_string()
            } else {
                format!("{}  ", line_indent(self.src, inner_end))
            };
            return TextEdit::insert(content_end, format!("\n{indent}{item}"));
        };

        if self.src[inner_start..first.start].contains('\n') {
            let indent = line_indent(self.src, last.start);
            match trailing_comma {
                Some(end) => TextEdit::insert(end, format!("\n{indent}{item},")),
                None => TextEdit::insert(last.end, format!(",\n{indent}{item}")),
            }
        } else {
            match trailing_comma {
                Some(end) => TextEdit::insert(end, format!(" {item},")),
                None => TextEdit::insert(last.end, format!(", {item}")),
            }
        }
    }
}
