//! Line classification.
//!
//! `classify` maps one raw line to a [`Kind`], consulting only the kind of
//! the previously classified line. Matching runs in two regimes:
//!
//! 1. Self-describing matchers, tried in a fixed most-specific-first order;
//!    the first match wins.
//! 2. Context-only continuation: a line with no recognizable structure of
//!    its own continues the block opened by the prior record, when the
//!    prior kind is one of the block kinds. Blocks close on a blank line,
//!    any self-describing match, or end of input.
//!
//! The function is total: everything else is `Unidentified`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{is_error_report_wrapper, Kind};

/// One ordered matcher. Mirrors the detector-list layout of the format
/// detection pipeline: independent predicates, first hit wins.
struct Matcher {
    kind: Kind,
    matches: fn(&str) -> bool,
}

static MAPS_RE: Lazy<Regex> = Lazy::new(|| {
    // start-end perms offset major:minor inode [path]
    Regex::new(
        r"^[0-9a-fA-F]{4,16}-[0-9a-fA-F]{4,16}\s+[rwxps-]{4}\s+[0-9a-fA-F]+\s+[0-9a-fA-F]{2,4}:[0-9a-fA-F]{2,4}\s+\d{1,19}",
    )
    .unwrap()
});

static WIN_MODULE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^0x[0-9a-fA-F]{8,16}\s+-\s+0x[0-9a-fA-F]{8,16}\s+\S").unwrap()
});

static HEAP_REGION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s{1,2}(PSYoungGen|PSOldGen|ParOldGen|par new generation|def new generation|tenured generation|concurrent mark-sweep generation|garbage-first heap|Metaspace|class space)\s",
    )
    .unwrap()
});

static HEAP_SPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s+(eden|from|to|object)\s+space\s|^\s+region size \d").unwrap()
});

static GLOBAL_FLAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(bool|intx|uintx|uint64_t|size_t|double|ccstr|ccstrlist)\s+\w+\s*:?=").unwrap()
});

static THREAD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(=>)?\s*0x[0-9a-fA-F]+\s+(JavaThread|VMThread|WorkerThread|GCTaskThread|WatcherThread|ConcurrentGCThread|Thread)\b",
    )
    .unwrap()
});

static FRAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[JjVCv]\s+\S").unwrap());

static CPUINFO_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(processor|vendor_id|cpu family|model name|model|stepping|microcode|cpu MHz|cache size|physical id|siblings|core id|cpu cores|apicid|initial apicid|fpu|fpu_exception|cpuid level|wp|flags|bugs|bogomips|clflush size|cache_alignment|address sizes|power management)\s*:",
    )
    .unwrap()
});

static MEMINFO_KEY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(MemTotal|MemFree|MemAvailable|Buffers|Cached|SwapCached|SwapTotal|SwapFree|Active|Inactive|Dirty|Writeback|AnonPages|Mapped|Shmem|Slab|SReclaimable|SUnreclaim|KernelStack|PageTables|CommitLimit|Committed_AS|VmallocTotal|VmallocUsed|VmallocChunk|HardwareCorrupted|HugePages_Total|HugePages_Free|HugePages_Rsvd|HugePages_Surp|Hugepagesize|DirectMap4k|DirectMap2M|DirectMap1G|Unevictable|Mlocked|NFS_Unstable|Bounce|WritebackTmp)\s*:",
    )
    .unwrap()
});

static ENV_VAR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(PATH|LD_LIBRARY_PATH|LD_PRELOAD|JAVA_HOME|JRE_HOME|JAVA_TOOL_OPTIONS|_JAVA_OPTIONS|_JAVA_SR_SIGNUM|CLASSPATH|SHELL|HOSTTYPE|OSTYPE|ARCH|MACHTYPE|USERNAME|LANG|LC_ALL|DISPLAY|TERM|TMPDIR|PKG_CONFIG_PATH)=",
    )
    .unwrap()
});

static PROCESS_MEMORY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s+(Virtual Memory|Resident Set Size|Swapped out)[:\s]").unwrap()
});

// Order matters: most specific first, universal fallback handled by the
// caller after context continuation.
static MATCHERS: &[Matcher] = &[
    Matcher { kind: Kind::EndMarker, matches: |l| l == "END." },
    Matcher { kind: Kind::Header, matches: |l| l.starts_with('#') },
    Matcher { kind: Kind::VmInfo, matches: |l| l.starts_with("vm_info:") },
    Matcher {
        kind: Kind::VmArguments,
        matches: |l| {
            l.starts_with("jvm_args:")
                || l.starts_with("java_command:")
                || l.starts_with("java_class_path")
                || l.starts_with("Launcher Type:")
                || l == "VM Arguments:"
        },
    },
    Matcher {
        kind: Kind::ElapsedTime,
        matches: |l| l.starts_with("elapsed time:") || l.contains("elapsed time:"),
    },
    Matcher { kind: Kind::Time, matches: |l| l.starts_with("time:") || l.starts_with("Time:") },
    Matcher { kind: Kind::Timezone, matches: |l| l.starts_with("timezone:") },
    Matcher { kind: Kind::Uname, matches: |l| l.starts_with("uname:") },
    Matcher { kind: Kind::SigInfo, matches: |l| l.starts_with("siginfo:") },
    Matcher { kind: Kind::Rlimit, matches: |l| l.starts_with("rlimit:") },
    Matcher {
        kind: Kind::OsInfo,
        matches: |l| {
            l.starts_with("OS:")
                || l.starts_with("Red Hat Enterprise Linux")
                || l.starts_with("CentOS Linux release")
                || l.starts_with("CentOS release")
                || l.starts_with("Oracle Linux Server release")
                || l.starts_with("Fedora release")
                || l.starts_with("Ubuntu ")
                || l.starts_with("Windows ")
                || l.starts_with(" Windows ")
        },
    },
    Matcher {
        kind: Kind::HeapAddress,
        matches: |l| l.starts_with("heap address:") || l.starts_with("Heap address:"),
    },
    Matcher { kind: Kind::HeapSummary, matches: |l| l == "Heap:" || l.starts_with("Heap:") },
    Matcher {
        kind: Kind::HeapRegion,
        matches: |l| HEAP_REGION_RE.is_match(l) || HEAP_SPACE_RE.is_match(l),
    },
    Matcher {
        kind: Kind::GlobalFlag,
        matches: |l| l == "[Global flags]" || GLOBAL_FLAG_RE.is_match(l),
    },
    Matcher { kind: Kind::CurrentThread, matches: |l| l.starts_with("Current thread") },
    Matcher {
        kind: Kind::Thread,
        matches: |l| {
            THREAD_RE.is_match(l)
                || l.starts_with("Java Threads:")
                || l.starts_with("Other Threads:")
                || l.starts_with("Threads class SMR info:")
                || l.starts_with("_java_thread_list=")
        },
    },
    Matcher {
        kind: Kind::StackFrame,
        matches: |l| {
            FRAME_RE.is_match(l)
                || l.starts_with("Native frames:")
                || l.starts_with("Java frames:")
                || l.starts_with("Stack: [")
        },
    },
    Matcher {
        kind: Kind::VmOperation,
        matches: |l| {
            l.starts_with("VM_Operation")
                || (l.starts_with("Event:") && l.contains("VM operation"))
        },
    },
    Matcher {
        kind: Kind::RegisterToMemoryMapping,
        matches: |l| l.starts_with("Register to memory mapping:"),
    },
    Matcher {
        kind: Kind::StackSlotToMemoryMapping,
        matches: |l| l.starts_with("Stack slot to memory mapping:"),
    },
    Matcher { kind: Kind::GcPreciousLog, matches: |l| l.starts_with("GC Precious Log:") },
    Matcher {
        kind: Kind::NativeMemoryTracking,
        matches: |l| l.starts_with("Native Memory Tracking:"),
    },
    Matcher {
        kind: Kind::ProcessMemory,
        matches: |l| l.starts_with("Process Memory:") || PROCESS_MEMORY_RE.is_match(l),
    },
    Matcher {
        kind: Kind::DynamicLibrary,
        matches: |l| {
            l == "Dynamic libraries:"
                || l.starts_with("Total number of mappings:")
                || MAPS_RE.is_match(l)
                || WIN_MODULE_RE.is_match(l)
        },
    },
    Matcher {
        kind: Kind::Meminfo,
        matches: |l| {
            l == "/proc/meminfo:"
                || l.starts_with("Memory:")
                || MEMINFO_KEY_RE.is_match(l)
        },
    },
    Matcher {
        kind: Kind::CpuInfo,
        matches: |l| {
            l.starts_with("CPU:")
                || l == "/proc/cpuinfo:"
                || l.starts_with("/proc/cpuinfo")
                || CPUINFO_KEY_RE.is_match(l)
        },
    },
    Matcher {
        kind: Kind::EnvVar,
        matches: |l| l == "Environment Variables:" || ENV_VAR_RE.is_match(l),
    },
];

static DIVIDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-{5,}").unwrap());

/// Classify one line given the kind of the immediately preceding record.
///
/// Deterministic and total; `Unidentified` is the universal fallback.
pub fn classify(line: &str, prior: Option<Kind>) -> Kind {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Kind::Blank;
    }

    // The error reporter failed while writing the current section; the
    // wrapper line still belongs to that section.
    if is_error_report_wrapper(line) {
        if let Some(prior) = prior {
            if prior != Kind::Blank && prior != Kind::Unidentified {
                return prior;
            }
        }
    }

    for matcher in MATCHERS {
        if (matcher.matches)(line) {
            return matcher.kind;
        }
    }

    // Section dividers (`---------------  T H R E A D  ---------------`)
    // close any open block; they carry no content of their own.
    if DIVIDER_RE.is_match(line) {
        return Kind::Unidentified;
    }

    // Context-only lines: hex dumps, bare addresses, bare class names.
    // They belong to whichever block is still open.
    if let Some(prior) = prior {
        if prior.is_block() {
            return prior;
        }
    }

    Kind::Unidentified
}
