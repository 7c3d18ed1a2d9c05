//! Heap, meminfo, and native-memory-tracking lines.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{CompressedOopsMode, HeapAddress, HeapRegion, MeminfoLine, NmtLine};
use crate::units::{parse_hex, parse_size};

static REGION_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(PSYoungGen|PSOldGen|ParOldGen|par new generation|def new generation|tenured generation|concurrent mark-sweep generation|garbage-first heap|Metaspace|class space|eden|from|to|object)\b",
    )
    .unwrap()
});

static TOTAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\btotal\s+(\d+[KMGkmg]?)\b").unwrap());
static USED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bused\s+(\d+[KMGkmg]?)\b").unwrap());
static RESERVED_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\breserved\s+(\d+[KMGkmg]?)\b").unwrap());
static SPACE_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bspace\s+(\d+[KMGkmg]?),").unwrap());
static RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[0x([0-9a-fA-F]+),.*0x([0-9a-fA-F]+)\)").unwrap()
});

pub fn parse_heap_region(line: &str) -> HeapRegion {
    let name = REGION_NAME_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());
    let total = TOTAL_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .and_then(|m| parse_size(m.as_str()))
        .or_else(|| {
            // "eden space 65536K, 94% used [...]" reports the size after
            // the word "space".
            SPACE_SIZE_RE
                .captures(line)
                .and_then(|c| c.get(1))
                .and_then(|m| parse_size(m.as_str()))
        });
    let (range_start, range_end) = RANGE_RE
        .captures(line)
        .map(|c| {
            (
                parse_hex(c.get(1).map_or("", |m| m.as_str())),
                parse_hex(c.get(2).map_or("", |m| m.as_str())),
            )
        })
        .unwrap_or((None, None));
    HeapRegion {
        raw: line.to_string(),
        name,
        total_bytes: total,
        used_bytes: USED_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| parse_size(m.as_str())),
        reserved_bytes: RESERVED_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| parse_size(m.as_str())),
        range_start,
        range_end,
    }
}

static HEAP_ADDR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)heap address:\s*(0x[0-9a-fA-F]+)").unwrap());
static HEAP_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"size:\s*(\d+\s*[A-Za-z]{0,2})").unwrap());
static OOPS_MODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Compressed Oops mode:\s*([^,]+)").unwrap());

pub fn parse_heap_address(line: &str) -> HeapAddress {
    let oops_mode = match OOPS_MODE_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
    {
        Some("32-bit") => CompressedOopsMode::Bit32,
        Some(mode) if mode.starts_with("Zero based") => CompressedOopsMode::ZeroBased,
        Some(mode) if mode.starts_with("Non-zero") => CompressedOopsMode::NonZeroBased,
        Some(_) => CompressedOopsMode::None,
        None => CompressedOopsMode::Unknown,
    };
    HeapAddress {
        raw: line.to_string(),
        start: HEAP_ADDR_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| parse_hex(m.as_str())),
        size_bytes: HEAP_SIZE_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| parse_size(m.as_str())),
        oops_mode,
    }
}

static MEMINFO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)\s*:\s*(\d+)\s*(kB)?").unwrap());
static OS_MEMORY_SWAP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"swap (\d+)k\((\d+)k free\)").unwrap());

pub fn parse_meminfo(line: &str) -> MeminfoLine {
    if line.starts_with("Memory:") {
        let (swap_total, swap_free) = OS_MEMORY_SWAP_RE
            .captures(line)
            .map(|c| {
                (
                    c.get(1).and_then(|m| m.as_str().parse::<u64>().ok()),
                    c.get(2).and_then(|m| m.as_str().parse::<u64>().ok()),
                )
            })
            .unwrap_or((None, None));
        return MeminfoLine {
            raw: line.to_string(),
            key: Some("Memory".to_string()),
            value_bytes: None,
            swap_total_bytes: swap_total.and_then(|kb| kb.checked_mul(1024)),
            swap_free_bytes: swap_free.and_then(|kb| kb.checked_mul(1024)),
        };
    }
    match MEMINFO_RE.captures(line) {
        Some(caps) => {
            let value: Option<u64> = caps.get(2).and_then(|m| m.as_str().parse().ok());
            let in_kb = caps.get(3).is_some();
            MeminfoLine {
                raw: line.to_string(),
                key: caps.get(1).map(|m| m.as_str().to_string()),
                value_bytes: value
                    .and_then(|v| if in_kb { v.checked_mul(1024) } else { Some(v) }),
                swap_total_bytes: None,
                swap_free_bytes: None,
            }
        }
        None => MeminfoLine {
            raw: line.to_string(),
            key: None,
            value_bytes: None,
            swap_total_bytes: None,
            swap_free_bytes: None,
        },
    }
}

static NMT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^-\s*|^\s*)([A-Za-z][A-Za-z .]*?)\s*[:(].*?reserved=(\d+)KB,\s*committed=(\d+)KB")
        .unwrap()
});

pub fn parse_nmt_line(line: &str) -> NmtLine {
    match NMT_RE.captures(line) {
        Some(caps) => NmtLine {
            raw: line.to_string(),
            category: caps.get(1).map(|m| m.as_str().trim().to_string()),
            reserved_bytes: caps
                .get(2)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .and_then(|kb| kb.checked_mul(1024)),
            committed_bytes: caps
                .get(3)
                .and_then(|m| m.as_str().parse::<u64>().ok())
                .and_then(|kb| kb.checked_mul(1024)),
        },
        None => NmtLine {
            raw: line.to_string(),
            category: None,
            reserved_bytes: None,
            committed_bytes: None,
        },
    }
}
