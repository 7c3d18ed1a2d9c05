//! Dynamic-library / memory-mapping lines.
//!
//! Two layouts share the kind: the POSIX `/proc/self/maps` form and the
//! Windows module table form. The section header and the
//! `Total number of mappings:` footer also land here.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{DynamicLibrary, MappingLayout};
use crate::units::parse_hex;

static POSIX_RE: Lazy<Regex> = Lazy::new(|| {
    // Device ids run 2-4 hex chars per side, inodes up to 19 digits. The
    // path may contain spaces and parentheses or be absent entirely.
    Regex::new(
        r"^([0-9a-fA-F]{4,16})-([0-9a-fA-F]{4,16})\s+([rwxps-]{4})\s+([0-9a-fA-F]+)\s+([0-9a-fA-F]{2,4}:[0-9a-fA-F]{2,4})\s+(\d{1,19})\s*(.*)$",
    )
    .unwrap()
});

static WINDOWS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0x([0-9a-fA-F]{8,16})\s+-\s+0x([0-9a-fA-F]{8,16})\s+(\S.*)$").unwrap()
});

pub fn parse_mapping(line: &str) -> DynamicLibrary {
    if let Some(caps) = POSIX_RE.captures(line) {
        let path = caps.get(7).map(|m| m.as_str().trim().to_string());
        return DynamicLibrary {
            raw: line.to_string(),
            layout: MappingLayout::Posix,
            start: parse_hex(caps.get(1).map_or("", |m| m.as_str())),
            end: parse_hex(caps.get(2).map_or("", |m| m.as_str())),
            permissions: caps.get(3).map(|m| m.as_str().to_string()),
            offset: parse_hex(caps.get(4).map_or("", |m| m.as_str())),
            device: caps.get(5).map(|m| m.as_str().to_string()),
            inode: caps.get(6).and_then(|m| m.as_str().parse().ok()),
            path: path.filter(|p| !p.is_empty()),
        };
    }

    if let Some(caps) = WINDOWS_RE.captures(line) {
        return DynamicLibrary {
            raw: line.to_string(),
            layout: MappingLayout::Windows,
            start: parse_hex(caps.get(1).map_or("", |m| m.as_str())),
            end: parse_hex(caps.get(2).map_or("", |m| m.as_str())),
            permissions: None,
            offset: None,
            device: None,
            inode: None,
            path: caps.get(3).map(|m| m.as_str().trim().to_string()),
        };
    }

    let layout = if line.starts_with("Total number of mappings:") {
        MappingLayout::Footer
    } else {
        MappingLayout::Other
    };
    DynamicLibrary {
        raw: line.to_string(),
        layout,
        start: None,
        end: None,
        permissions: None,
        offset: None,
        device: None,
        inode: None,
        path: None,
    }
}
