//! `format_operand`: translate a TAC place into a bare ASM operand. This
//! does not decide whether a by-reference dereference is needed — that is
//! [`FrameLayout::by_ref_param_offset`], consulted by the instruction
//! translator before a value is read or written.

use crate::frame::FrameLayout;

pub fn format_operand(place: &str, frame: &FrameLayout) -> String {
    if let Some(n) = place.strip_prefix("_BP-") {
        return format!("[BP-{n}]");
    }
    if let Some(n) = place.strip_prefix("_BP+") {
        return format!("[BP+{n}]");
    }
    if let Some(&n) = frame.temp_slots.get(place) {
        return format!("[BP-{n}]");
    }
    // A depth-1 name, a string-pool label, or a literal: emitted verbatim.
    place.to_string()
}

/// `true` for an integer/real literal place (as opposed to a name, label,
/// or BP-relative slot) — these can be pushed or moved as immediates.
pub fn is_literal(place: &str) -> bool {
    place.parse::<i64>().is_ok() || place.parse::<f64>().is_ok()
}
