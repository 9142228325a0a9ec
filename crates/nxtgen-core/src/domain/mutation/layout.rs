use serde::Serialize;

use super::{Mutation, SkipReason, named_import};
use crate::domain::{
    DomainError,
    source::{Dialect, JsxExpression, SourceFile, TextEdit},
};

/// A provider component that must enclose the root layout's `{children}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrapperComponent {
    pub name: String,
    pub module: String,
}

impl WrapperComponent {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
        }
    }
}

/// Wrap the root layout's children slot in `wrapper` and import it.
///
/// The slot is the first `{children}` container (whitespace inside the
/// braces ignored) returned by the default-exported function that is not
/// already nested inside an element named like the wrapper. When every slot
/// is already wrapped only the import is ensured, so re-running is a no-op.
pub fn wrap_children(src: &str, wrapper: &WrapperComponent) -> Result<Mutation, DomainError> {
    let file = SourceFile::parse(src, Dialect::Jsx)?;
    let Some(body) = file.default_export_function() else {
        return Ok(Mutation::skipped(src, SkipReason::NoDefaultExport));
    };

    let mut free: Option<&JsxExpression> = None;
    let mut wrapped = false;
    for root in file.returned_jsx(body) {
        root.visit_expressions(&wrapper.name, false, &mut |expr, inside| {
            if expr.inner.text(src).trim() != "children" {
                return;
            }
            if inside {
                wrapped = true;
            } else if free.is_none() {
                free = Some(expr);
            }
        });
    }

    let mut edits = Vec::new();
    match free {
        Some(slot) => {
            let name = &wrapper.name;
            edits.push((
                TextEdit::replace(
                    slot.span.range(),
                    format!("<{name}>{}</{name}>", slot.span.text(src)),
                ),
                "wrap children",
            ));
        }
        None if wrapped => {}
        None => return Ok(Mutation::skipped(src, SkipReason::NoChildrenSlot)),
    }

    let statement = named_import(
        &wrapper.name,
        &wrapper.module,
        file.preferred_quote(),
        file.uses_semicolons(),
    );
    if let Some(edit) = file.named_import_edit(&wrapper.name, &wrapper.module, &statement) {
        edits.push((edit, "add import"));
    }

    Ok(Mutation::from_edits(src, edits, None))
}
