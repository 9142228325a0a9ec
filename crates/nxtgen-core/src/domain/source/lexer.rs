use super::{
    Dialect, Span, SyntaxError, Token, TokenKind,
    jsx::{JsxChild, JsxElement, JsxExpression},
};

/// Keywords after which a `/` starts a regex and a `<` may start JSX.
const EXPRESSION_KEYWORDS: &[&str] = &[
    "return", "typeof", "default", "yield", "await", "else", "case", "do", "in", "of", "new",
    "delete", "void", "throw", "instanceof",
];

pub(crate) struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    dialect: Dialect,
    brackets: Vec<(char, usize)>,
    expr_allowed: bool,
}

impl<'a> Lexer<'a> {
    pub(crate) fn new(src: &'a str, dialect: Dialect) -> Self {
        Self {
            src,
            pos: 0,
            dialect,
            brackets: Vec::new(),
            expr_allowed: true,
        }
    }

    pub(crate) fn tokenize(mut self) -> Result<Vec<Token>, SyntaxError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        if let Some(&(open, at)) = self.brackets.last() {
            return Err(SyntaxError::new(at, format!("unclosed '{open}'")));
        }
        Ok(tokens)
    }

    // ── Cursor ───────────────────────────────────────────────────────────

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_at(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while self.peek().is_some_and(&pred) {
            self.bump();
        }
        &self.src[start..self.pos]
    }

    fn skip_trivia(&mut self) -> Result<(), SyntaxError> {
        loop {
            match (self.peek(), self.peek_at(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.bump();
                }
                (Some('/'), Some('/')) => {
                    self.eat_while(|c| c != '\n');
                }
                (Some('/'), Some('*')) => match self.src[self.pos + 2..].find("*/") {
                    Some(i) => self.pos += 2 + i + 2,
                    None => return Err(SyntaxError::new(self.pos, "unterminated block comment")),
                },
                _ => return Ok(()),
            }
        }
    }

    // ── Tokens ───────────────────────────────────────────────────────────

    fn next_token(&mut self) -> Result<Option<Token>, SyntaxError> {
        self.skip_trivia()?;
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(None);
        };

        let kind = match c {
            '"' | '\'' => {
                self.string(c)?;
                TokenKind::Str
            }
            '`' => {
                self.template()?;
                TokenKind::Template
            }
            c if is_ident_start(c) => {
                self.eat_while(is_ident_part);
                TokenKind::Ident
            }
            c if c.is_ascii_digit()
                || (c == '.' && self.peek_at(1).is_some_and(|d| d.is_ascii_digit())) =>
            {
                self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.');
                TokenKind::Number
            }
            '/' if self.expr_allowed => {
                self.regex()?;
                TokenKind::Regex
            }
            '<' if self.jsx_starts_here() => TokenKind::Jsx(Box::new(self.jsx_element()?)),
            _ => {
                self.bump();
                self.track_bracket(c, start)?;
                TokenKind::Punct(c)
            }
        };

        self.expr_allowed = match &kind {
            TokenKind::Ident => EXPRESSION_KEYWORDS.contains(&&self.src[start..self.pos]),
            TokenKind::Punct(p) => !matches!(p, ')' | ']' | '}'),
            _ => false,
        };

        Ok(Some(Token {
            kind,
            span: Span::new(start, self.pos),
        }))
    }

    fn track_bracket(&mut self, c: char, at: usize) -> Result<(), SyntaxError> {
        let expected = match c {
            '(' | '[' | '{' => {
                self.brackets.push((c, at));
                return Ok(());
            }
            ')' => '(',
            ']' => '[',
            '}' => '{',
            _ => return Ok(()),
        };
        match self.brackets.pop() {
            Some((open, _)) if open == expected => Ok(()),
            Some((open, _)) => Err(SyntaxError::new(
                at,
                format!("'{c}' does not close '{open}'"),
            )),
            None => Err(SyntaxError::new(at, format!("unexpected '{c}'"))),
        }
    }

    fn string(&mut self, quote: char) -> Result<(), SyntaxError> {
        let start = self.pos;
        self.bump();
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some(c) if c == quote => return Ok(()),
                Some('\n') | None => {
                    return Err(SyntaxError::new(start, "unterminated string literal"));
                }
                Some(_) => {}
            }
        }
    }

    fn template(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        self.bump();
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some('`') => return Ok(()),
                Some('$') if self.peek() == Some('{') => {
                    let open = self.pos;
                    self.bump();
                    self.balanced_expression(open)?;
                }
                Some(_) => {}
                None => return Err(SyntaxError::new(start, "unterminated template literal")),
            }
        }
    }

    fn regex(&mut self) -> Result<(), SyntaxError> {
        let start = self.pos;
        self.bump();
        let mut in_class = false;
        loop {
            match self.bump() {
                Some('\\') => {
                    self.bump();
                }
                Some('[') => in_class = true,
                Some(']') => in_class = false,
                Some('/') if !in_class => break,
                Some('\n') | None => {
                    return Err(SyntaxError::new(start, "unterminated regular expression"));
                }
                Some(_) => {}
            }
        }
        self.eat_while(is_ident_part);
        Ok(())
    }

    /// Lex tokens until the `{` at `open` (already consumed) is closed.
    ///
    /// Returns the JSX elements found inside and the offset of the closing brace.
    fn balanced_expression(
        &mut self,
        open: usize,
    ) -> Result<(Vec<JsxElement>, usize), SyntaxError> {
        self.brackets.push(('{', open));
        let depth = self.brackets.len();
        self.expr_allowed = true;

        let mut elements = Vec::new();
        loop {
            let Some(token) = self.next_token()? else {
                return Err(SyntaxError::new(open, "unclosed '{'"));
            };
            if self.brackets.len() < depth {
                return Ok((elements, token.span.start));
            }
            if let TokenKind::Jsx(element) = token.kind {
                elements.push(*element);
            }
        }
    }

    // ── JSX ──────────────────────────────────────────────────────────────

    fn jsx_starts_here(&self) -> bool {
        if self.dialect != Dialect::Jsx || !self.expr_allowed {
            return false;
        }
        let rest = &self.src[self.pos + 1..];
        if rest.starts_with('>') {
            return true;
        }
        if !rest.starts_with(is_ident_start) {
            return false;
        }
        // `<T,>(x: T) => x` and `<T extends U>(...)` are type parameters.
        let name_len = rest.find(|c: char| !is_ident_part(c)).unwrap_or(rest.len());
        let after = rest[name_len..].trim_start();
        let type_params = after.starts_with(',')
            || after
                .strip_prefix("extends")
                .is_some_and(|r| !r.starts_with(is_ident_part));
        !type_params
    }

    fn jsx_name(&mut self) -> &'a str {
        self.eat_while(|c| is_ident_part(c) || matches!(c, '.' | ':' | '-'))
    }

    fn jsx_element(&mut self) -> Result<JsxElement, SyntaxError> {
        let start = self.pos;
        self.bump();
        self.skip_trivia()?;
        let name = self.jsx_name();

        let self_closing = loop {
            self.skip_trivia()?;
            match self.peek() {
                Some('>') => {
                    self.bump();
                    break false;
                }
                Some('/') => {
                    self.bump();
                    self.expect_jsx_gt()?;
                    break true;
                }
                Some('{') => {
                    let open = self.pos;
                    self.bump();
                    self.balanced_expression(open)?;
                }
                Some(c) if is_ident_start(c) => self.jsx_attribute()?,
                Some(c) => {
                    return Err(SyntaxError::new(
                        self.pos,
                        format!("unexpected '{c}' in JSX tag <{name}>"),
                    ));
                }
                None => {
                    return Err(SyntaxError::new(start, format!("unterminated JSX tag <{name}>")));
                }
            }
        };

        let mut children = Vec::new();
        if !self_closing {
            self.jsx_children(start, name, &mut children)?;
        }

        Ok(JsxElement {
            name: (!name.is_empty()).then(|| name.to_string()),
            span: Span::new(start, self.pos),
            children,
        })
    }

    fn jsx_attribute(&mut self) -> Result<(), SyntaxError> {
        self.jsx_name();
        self.skip_trivia()?;
        if self.peek() != Some('=') {
            return Ok(());
        }
        self.bump();
        self.skip_trivia()?;
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                let start = self.pos;
                self.bump();
                loop {
                    match self.bump() {
                        Some(c) if c == quote => return Ok(()),
                        Some(_) => {}
                        None => {
                            return Err(SyntaxError::new(start, "unterminated attribute string"));
                        }
                    }
                }
            }
            Some('{') => {
                let open = self.pos;
                self.bump();
                self.balanced_expression(open).map(drop)
            }
            Some('<') => self.jsx_element().map(drop),
            _ => Err(SyntaxError::new(self.pos, "expected attribute value")),
        }
    }

    fn jsx_children(
        &mut self,
        start: usize,
        name: &str,
        children: &mut Vec<JsxChild>,
    ) -> Result<(), SyntaxError> {
        loop {
            let text_start = self.pos;
            self.eat_while(|c| c != '<' && c != '{');
            if self.pos > text_start {
                children.push(JsxChild::Text(Span::new(text_start, self.pos)));
            }

            match self.peek() {
                None => {
                    return Err(SyntaxError::new(start, format!("unclosed JSX element <{name}>")));
                }
                Some('{') => {
                    let open = self.pos;
                    self.bump();
                    let (elements, close) = self.balanced_expression(open)?;
                    children.push(JsxChild::Expression(JsxExpression {
                        span: Span::new(open, close + 1),
                        inner: Span::new(open + 1, close),
                        elements,
                    }));
                }
                Some(_) => {
                    let tag = self.pos;
                    self.bump();
                    self.skip_trivia()?;
                    if self.peek() != Some('/') {
                        self.pos = tag;
                        children.push(JsxChild::Element(self.jsx_element()?));
                        continue;
                    }
                    self.bump();
                    self.skip_trivia()?;
                    let closing = self.jsx_name();
                    self.skip_trivia()?;
                    self.expect_jsx_gt()?;
                    if closing != name {
                        return Err(SyntaxError::new(
                            tag,
                            format!("expected </{name}> but found </{closing}>"),
                        ));
                    }
                    return Ok(());
                }
            }
        }
    }

    fn expect_jsx_gt(&mut self) -> Result<(), SyntaxError> {
        if self.peek() == Some('>') {
            self.bump();
            Ok(())
        } else {
            Err(SyntaxError::new(self.pos, "expected '>'"))
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
