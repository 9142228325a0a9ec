use super::Span;

/// A JSX element or fragment (`name == None`).
#[derive(Debug, Clone, PartialEq)]
pub struct JsxElement {
    pub name: Option<String>,
    pub span: Span,
    pub children: Vec<JsxChild>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JsxChild {
    Text(Span),
    Expression(JsxExpression),
    Element(JsxElement),
}

/// A `{ ... }` child container.
#[derive(Debug, Clone, PartialEq)]
pub struct JsxExpression {
    /// Including the braces.
    pub span: Span,
    /// Between the braces.
    pub inner: Span,
    /// JSX elements that appear anywhere inside the expression.
    pub elements: Vec<JsxElement>,
}

impl JsxElement {
    pub fn is_named(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }

    /// Visit every child container in the tree, depth first, together with
    /// whether an ancestor (or this element) is named `wrapper`.
    pub fn visit_expressions<'e>(
        &'e self,
        wrapper: &str,
        inside_wrapper: bool,
        visit: &mut dyn FnMut(&'e JsxExpression, bool),
    ) {
        let inside = inside_wrapper || self.is_named(wrapper);
        for child in &self.children {
            match child {
                JsxChild::Text(_) => {}
                JsxChild::Element(element) => element.visit_expressions(wrapper, inside, visit),
                JsxChild::Expression(expr) => {
                    visit(expr, inside);
                    for nested in &expr.elements {
                        nested.visit_expressions(wrapper, inside, visit);
                    }
                }
            }
        }
    }
}
