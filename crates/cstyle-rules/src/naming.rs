//! Shared reporting for the naming-convention rules.

use cstyle_core::fix::is_valid_identifier_start;
use cstyle_core::{CheckContext, DeclarationNode, Rule, Violation};
use tracing::trace;

/// Builds the violation for a name whose corrected form is `candidate`.
///
/// Returns `None` when the name already matches. `anchor` is the byte offset
/// inside the name the diagnostic points at. The fix replaces the whole name
/// span and is omitted when `candidate` is not a usable identifier.
pub(crate) fn report<R: Rule>(
    rule: &R,
    ctx: &CheckContext<'_>,
    decl: &DeclarationNode,
    candidate: String,
    anchor: usize,
    message: impl Into<String>,
    doc_ref: &str,
) -> Option<Violation> {
    if candidate == decl.name {
        return None;
    }
    let anchor_len = decl
        .name
        .get(anchor..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    let fix = if is_valid_identifier_start(&candidate) {
        Some(ctx.fix(decl.span, candidate))
    } else {
        trace!(name = %decl.name, "candidate is not an identifier, no fix");
        None
    };
    Some(
        ctx.violation(rule, decl.span.sub(anchor, anchor_len), message)
            .with_optional_fix(fix)
            .with_doc_ref(doc_ref),
    )
}
