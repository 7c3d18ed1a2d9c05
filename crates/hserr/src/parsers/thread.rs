//! Thread listing, stack frame, and VM-operation lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{StackFrame, ThreadLine, VmOperation};
use crate::units::parse_hex;

static THREAD_RE: Lazy<Regex> = Lazy::new(|| {
    // Accepts both the listing form (`0xADDR JavaThread "name"`) and the
    // current-thread form (`Current thread (0xADDR):  JavaThread "name"`).
    Regex::new(r#"0x([0-9a-fA-F]+)\)?:?\s+([A-Za-z]*Thread)\b(?:\s+"([^"]*)")?"#).unwrap()
});
static STATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[(_[a-z_]+)").unwrap());
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bid=(\d+)").unwrap());

fn parse_thread_fields(line: &str) -> ThreadLine {
    let (address, thread_type, name) = THREAD_RE
        .captures(line)
        .map(|c| {
            (
                c.get(1).and_then(|m| parse_hex(m.as_str())),
                c.get(2).map(|m| m.as_str().to_string()),
                c.get(3).map(|m| m.as_str().to_string()),
            )
        })
        .unwrap_or((None, None, None));
    ThreadLine {
        raw: line.to_string(),
        address,
        thread_type,
        name,
        state: STATE_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()),
        id: ID_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok()),
    }
}

pub fn parse_thread(line: &str) -> ThreadLine {
    parse_thread_fields(line)
}

pub fn parse_current_thread(line: &str) -> ThreadLine {
    parse_thread_fields(line)
}

pub fn parse_stack_frame(line: &str) -> StackFrame {
    let mut chars = line.chars();
    let frame_type = match (chars.next(), chars.next()) {
        (Some(first), Some(second))
            if matches!(first, 'J' | 'j' | 'V' | 'C' | 'v') && second.is_whitespace() =>
        {
            Some(first)
        }
        _ => None,
    };
    StackFrame { raw: line.to_string(), frame_type }
}

static VM_OP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"VM_Operation \([^)]*\):\s*([A-Za-z_][A-Za-z0-9_]*)").unwrap());
static VM_OP_EVENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"VM operation:?\s*([A-Za-z_][A-Za-z0-9_]*)").unwrap());

pub fn parse_vm_operation(line: &str) -> VmOperation {
    VmOperation {
        raw: line.to_string(),
        operation: VM_OP_RE
            .captures(line)
            .or_else(|| VM_OP_EVENT_RE.captures(line))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()),
    }
}
