//! The crash document: every parsed record in file order, plus derived
//! read-only queries.
//!
//! The document only ever appends; records are never mutated or deleted.
//! Derived queries are computed on demand from whatever records are present
//! and report an explicit unknown (`None` / sentinel enum variant) when a
//! section is missing, never a silent zero.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{
    is_error_report_wrapper, DynamicLibrary, ElapsedTime, EnvVar, GlobalFlag, HeaderLine,
    HeapAddress, HeapRegion, Kind, MeminfoLine, NmtLine, OsVersion, Record, ThreadLine, TimeLine,
    Vendor, VmArguments, VmArgumentsFlavor, VmInfo, VmOperation,
};
use crate::units::{first_number, parse_size};

/// Sentinel for an unknown current thread.
pub const UNKNOWN_THREAD: &str = "unknown";

/// Estimated total of the reserved-memory addends. `complete` is false when
/// at least one addend was unknown and therefore counted as zero; an
/// all-present-and-zero total reports `complete == true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimatedTotal {
    pub bytes: u64,
    pub complete: bool,
}

/// One fully ingested (or still-ingesting) fatal error log.
#[derive(Debug, Default)]
pub struct CrashDocument {
    records: Vec<Record>,
    complete: bool,
}

impl CrashDocument {
    pub(crate) fn push(&mut self, record: Record) {
        if let Some(kind) = duplicate_singleton(&self.records, &record) {
            tracing::debug!(kind = kind.as_str(), "duplicate singleton record, last write wins");
        }
        self.records.push(record);
    }

    pub(crate) fn mark_complete(&mut self) {
        self.complete = true;
    }

    /// Whether ingestion has finished. Analysis refuses incomplete
    /// documents.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// All records, in input file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    // Multi-occurrence collections, each in file order.

    pub fn headers(&self) -> impl Iterator<Item = &HeaderLine> {
        self.records.iter().filter_map(|r| match r {
            Record::Header(h) => Some(h),
            _ => None,
        })
    }

    pub fn threads(&self) -> impl Iterator<Item = &ThreadLine> {
        self.records.iter().filter_map(|r| match r {
            Record::Thread(t) => Some(t),
            _ => None,
        })
    }

    pub fn stack_frames(&self) -> impl Iterator<Item = &crate::model::StackFrame> {
        self.records.iter().filter_map(|r| match r {
            Record::StackFrame(f) => Some(f),
            _ => None,
        })
    }

    pub fn dynamic_libraries(&self) -> impl Iterator<Item = &DynamicLibrary> {
        self.records.iter().filter_map(|r| match r {
            Record::DynamicLibrary(d) => Some(d),
            _ => None,
        })
    }

    pub fn cpu_info(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(|r| match r {
            Record::CpuInfo { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    pub fn env_vars(&self) -> impl Iterator<Item = &EnvVar> {
        self.records.iter().filter_map(|r| match r {
            Record::EnvVar(e) => Some(e),
            _ => None,
        })
    }

    pub fn gc_precious_log(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(|r| match r {
            Record::GcPreciousLog { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    pub fn native_memory_tracking(&self) -> impl Iterator<Item = &NmtLine> {
        self.records.iter().filter_map(|r| match r {
            Record::NativeMemoryTracking(n) => Some(n),
            _ => None,
        })
    }

    pub fn global_flags(&self) -> impl Iterator<Item = &GlobalFlag> {
        self.records.iter().filter_map(|r| match r {
            Record::GlobalFlag(g) => Some(g),
            _ => None,
        })
    }

    pub fn meminfo(&self) -> impl Iterator<Item = &MeminfoLine> {
        self.records.iter().filter_map(|r| match r {
            Record::Meminfo(m) => Some(m),
            _ => None,
        })
    }

    pub fn register_mappings(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(|r| match r {
            Record::RegisterToMemoryMapping { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    pub fn stack_slot_mappings(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(|r| match r {
            Record::StackSlotToMemoryMapping { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    pub fn vm_operations(&self) -> impl Iterator<Item = &VmOperation> {
        self.records.iter().filter_map(|r| match r {
            Record::VmOperation(v) => Some(v),
            _ => None,
        })
    }

    pub fn vm_arguments(&self) -> impl Iterator<Item = &VmArguments> {
        self.records.iter().filter_map(|r| match r {
            Record::VmArguments(v) => Some(v),
            _ => None,
        })
    }

    pub fn heap_regions(&self) -> impl Iterator<Item = &HeapRegion> {
        self.records.iter().filter_map(|r| match r {
            Record::HeapRegion(h) => Some(h),
            _ => None,
        })
    }

    pub fn unidentified_lines(&self) -> impl Iterator<Item = &str> {
        self.records.iter().filter_map(|r| match r {
            Record::Unidentified { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    // Singletons: last write wins on duplicates.

    pub fn vm_info(&self) -> Option<&VmInfo> {
        self.records.iter().rev().find_map(|r| match r {
            Record::VmInfo(v) => Some(v),
            _ => None,
        })
    }

    pub fn heap_address(&self) -> Option<&HeapAddress> {
        self.records.iter().rev().find_map(|r| match r {
            Record::HeapAddress(h) => Some(h),
            _ => None,
        })
    }

    pub fn os_info(&self) -> Option<&str> {
        self.records.iter().rev().find_map(|r| match r {
            Record::OsInfo { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    /// All OS-info text joined, oldest first. The distro release line may
    /// follow the `OS:` line as a separate record.
    pub fn os_info_text(&self) -> String {
        let lines: Vec<&str> = self
            .records
            .iter()
            .filter_map(|r| match r {
                Record::OsInfo { raw } => Some(raw.as_str()),
                _ => None,
            })
            .collect();
        lines.join("\n")
    }

    pub fn uname(&self) -> Option<&str> {
        self.records.iter().rev().find_map(|r| match r {
            Record::Uname { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    pub fn time(&self) -> Option<&TimeLine> {
        self.records.iter().rev().find_map(|r| match r {
            Record::Time(t) => Some(t),
            _ => None,
        })
    }

    pub fn elapsed_time(&self) -> Option<&ElapsedTime> {
        self.records.iter().rev().find_map(|r| match r {
            Record::ElapsedTime(e) => Some(e),
            _ => None,
        })
    }

    pub fn timezone(&self) -> Option<&str> {
        self.records.iter().rev().find_map(|r| match r {
            Record::Timezone { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    pub fn current_thread(&self) -> Option<&ThreadLine> {
        self.records.iter().rev().find_map(|r| match r {
            Record::CurrentThread(t) => Some(t),
            _ => None,
        })
    }

    pub fn sig_info(&self) -> Option<&str> {
        self.records.iter().rev().find_map(|r| match r {
            Record::SigInfo { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    pub fn rlimit(&self) -> Option<&str> {
        self.records.iter().rev().find_map(|r| match r {
            Record::Rlimit { raw } => Some(raw.as_str()),
            _ => None,
        })
    }

    pub fn has_end_marker(&self) -> bool {
        self.records.iter().any(|r| matches!(r, Record::EndMarker { .. }))
    }

    /// The full multi-line header, joined in file order.
    pub fn header_text(&self) -> String {
        let lines: Vec<&str> = self.headers().map(|h| h.raw.as_str()).collect();
        lines.join("\n")
    }

    /// Mapping count: the explicit `Total number of mappings:` footer when
    /// present, otherwise the number of parsed mapping entries.
    pub fn mapping_count(&self) -> u64 {
        let footer = self
            .dynamic_libraries()
            .filter(|d| matches!(d.layout, crate::model::MappingLayout::Footer))
            .last()
            .and_then(|d| first_number(&d.raw));
        footer.unwrap_or_else(|| self.dynamic_libraries().filter(|d| d.is_mapping()).count() as u64)
    }

    /// Kinds of sections that contained an error-reporting wrapper line,
    /// deduplicated, in first-seen order.
    pub fn error_reporting_sections(&self) -> Vec<Kind> {
        let mut kinds = Vec::new();
        for record in &self.records {
            if is_error_report_wrapper(record.raw()) && !kinds.contains(&record.kind()) {
                kinds.push(record.kind());
            }
        }
        kinds
    }

    /// First error-reporting wrapper line, verbatim.
    pub fn error_reporting_evidence(&self) -> Option<&str> {
        self.records
            .iter()
            .map(|r| r.raw())
            .find(|raw| is_error_report_wrapper(raw))
    }

    // ---- memory accounting ----

    fn global_flag_bytes(&self, name: &str) -> Option<u64> {
        self.global_flags()
            .last_where(|g| g.name.as_deref() == Some(name))
            .and_then(|g| g.value.as_deref())
            .and_then(parse_size)
    }

    fn jvm_arg_bytes(&self, prefix: &str) -> Option<u64> {
        let args = self
            .vm_arguments()
            .filter(|a| a.flavor == VmArgumentsFlavor::JvmArgs)
            .last()?;
        // Last occurrence wins, matching JVM option semantics.
        args.value
            .split_whitespace()
            .filter_map(|token| token.strip_prefix(prefix))
            .filter_map(|v| parse_size(v.trim_start_matches('=')))
            .last()
    }

    /// Reserved heap: heap-address line, then `MaxHeapSize` flag, then
    /// `-Xmx`.
    pub fn heap_reserved(&self) -> Option<u64> {
        self.heap_address()
            .and_then(|h| h.size_bytes)
            .or_else(|| self.global_flag_bytes("MaxHeapSize"))
            .or_else(|| self.jvm_arg_bytes("-Xmx"))
    }

    /// Reserved metaspace: heap-region line, then `MaxMetaspaceSize` flag,
    /// then `-XX:MaxMetaspaceSize`.
    pub fn metaspace_reserved(&self) -> Option<u64> {
        self.heap_regions()
            .last_where(|r| r.name.as_deref() == Some("Metaspace"))
            .and_then(|r| r.reserved_bytes)
            .or_else(|| self.global_flag_bytes("MaxMetaspaceSize"))
            .or_else(|| self.jvm_arg_bytes("-XX:MaxMetaspaceSize"))
    }

    /// Reserved direct memory: `MaxDirectMemorySize` flag, then
    /// `-XX:MaxDirectMemorySize`.
    pub fn direct_memory_reserved(&self) -> Option<u64> {
        self.global_flag_bytes("MaxDirectMemorySize")
            .or_else(|| self.jvm_arg_bytes("-XX:MaxDirectMemorySize"))
    }

    /// Reserved thread stacks: thread count times per-thread stack size
    /// (`ThreadStackSize` is reported in kilobytes; `-Xss` in bytes).
    /// Unknown when no thread section or no stack size was seen.
    pub fn thread_stack_reserved(&self) -> Option<u64> {
        let count = self.threads().filter(|t| t.address.is_some()).count() as u64;
        if count == 0 {
            return None;
        }
        let per_thread = self
            .global_flag_bytes("ThreadStackSize")
            .and_then(|kb| kb.checked_mul(1024))
            .or_else(|| self.jvm_arg_bytes("-Xss"))?;
        count.checked_mul(per_thread)
    }

    /// Reserved code cache: `ReservedCodeCacheSize` flag, then
    /// `-XX:ReservedCodeCacheSize`.
    pub fn code_cache_reserved(&self) -> Option<u64> {
        self.global_flag_bytes("ReservedCodeCacheSize")
            .or_else(|| self.jvm_arg_bytes("-XX:ReservedCodeCacheSize"))
    }

    /// Sum of all reserved-memory addends, counting unknown addends as zero
    /// and flagging the total as incomplete when any addend was unknown.
    pub fn estimated_reserved_total(&self) -> EstimatedTotal {
        let addends = [
            self.heap_reserved(),
            self.metaspace_reserved(),
            self.direct_memory_reserved(),
            self.thread_stack_reserved(),
            self.code_cache_reserved(),
        ];
        EstimatedTotal {
            bytes: addends
                .iter()
                .fold(0u64, |acc, a| acc.saturating_add(a.unwrap_or(0))),
            complete: addends.iter().all(|a| a.is_some()),
        }
    }

    // ---- provenance ----

    /// First RPM-style JDK path fragment in the dynamic library section.
    pub fn rpm_path(&self) -> Option<&DynamicLibrary> {
        static RPM_RE: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(java|jdk)-[0-9][^/]*openjdk[^/]*\.el[0-9]").unwrap()
        });
        self.dynamic_libraries()
            .find(|d| d.path.as_deref().is_some_and(|p| RPM_RE.is_match(p)))
    }

    /// JDK vendor, combining weak signals in a fixed precedence order:
    /// header bug URL, then `vm_info` builder, then RPM packaging path,
    /// then OS info, then uname. First decisive signal wins.
    pub fn vendor(&self) -> Vendor {
        if let Some(vendor) = self.headers().find_map(|h| {
            h.bug_url().and_then(vendor_from_url)
        }) {
            return vendor;
        }
        if let Some(info) = self.vm_info() {
            if info.builder != Vendor::Unidentified {
                return info.builder;
            }
        }
        if self.rpm_path().is_some() {
            return Vendor::RedHat;
        }
        if self.os_info_text().contains("Red Hat") {
            return Vendor::RedHat;
        }
        if self.uname().is_some_and(|u| u.contains(".el")) {
            return Vendor::RedHat;
        }
        Vendor::Unidentified
    }

    /// Operating system version from the OS-info text, falling back to the
    /// uname kernel suffix.
    pub fn os_version(&self) -> OsVersion {
        static RHEL_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"Red Hat Enterprise Linux[^0-9]*release (\d+)").unwrap());
        static CENTOS_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"CentOS(?: Linux)? release (\d+)").unwrap());
        static UNAME_EL_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"\.el(\d+)").unwrap());

        let text = self.os_info_text();
        if let Some(major) = RHEL_RE
            .captures(&text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
        {
            return OsVersion::Rhel(major);
        }
        if let Some(major) = CENTOS_RE
            .captures(&text)
            .and_then(|c| c.get(1))
            .and_then(|m| m.as_str().parse().ok())
        {
            return OsVersion::CentOs(major);
        }
        if text.contains("Windows") {
            return OsVersion::Windows;
        }
        if let Some(uname) = self.uname() {
            if let Some(major) = UNAME_EL_RE
                .captures(uname)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok())
            {
                return OsVersion::Rhel(major);
            }
        }
        if text.is_empty() && self.uname().is_none() {
            OsVersion::Unidentified
        } else {
            OsVersion::Other
        }
    }

    /// Name of the crashing thread, or the explicit unknown sentinel.
    pub fn current_thread_name(&self) -> &str {
        self.current_thread()
            .and_then(|t| t.name.as_deref())
            .unwrap_or(UNKNOWN_THREAD)
    }

    /// A log that stops without an end marker or an elapsed-time record is
    /// truncated.
    pub fn is_truncated(&self) -> bool {
        !(self.has_end_marker() || self.elapsed_time().is_some())
    }

    /// Swap accounting: (total, used) bytes. The OS `Memory:` summary line
    /// wins over `/proc/meminfo` entries.
    pub fn swap_usage(&self) -> Option<(u64, u64)> {
        if let Some(line) = self
            .meminfo()
            .last_where(|m| m.swap_total_bytes.is_some())
        {
            let total = line.swap_total_bytes?;
            let free = line.swap_free_bytes?;
            return Some((total, total.saturating_sub(free)));
        }
        let total = self
            .meminfo()
            .last_where(|m| m.key.as_deref() == Some("SwapTotal"))
            .and_then(|m| m.value_bytes)?;
        let free = self
            .meminfo()
            .last_where(|m| m.key.as_deref() == Some("SwapFree"))
            .and_then(|m| m.value_bytes)?;
        Some((total, total.saturating_sub(free)))
    }

    /// Evidence lines backing [`swap_usage`](Self::swap_usage), verbatim.
    pub fn swap_evidence(&self) -> Option<String> {
        if let Some(line) = self.meminfo().last_where(|m| m.swap_total_bytes.is_some()) {
            return Some(line.raw.clone());
        }
        let total = self.meminfo().last_where(|m| m.key.as_deref() == Some("SwapTotal"))?;
        let free = self.meminfo().last_where(|m| m.key.as_deref() == Some("SwapFree"))?;
        Some(format!("{}\n{}", total.raw, free.raw))
    }
}

pub(crate) fn vendor_from_url(url: &str) -> Option<Vendor> {
    if url.contains("redhat.com") {
        Some(Vendor::RedHat)
    } else if url.contains("bugreport.java.com") || url.contains("java.com/bugreport") {
        Some(Vendor::Oracle)
    } else if url.contains("adoptium") || url.contains("adoptopenjdk") {
        Some(Vendor::Adoptium)
    } else if url.contains("azul.com") {
        Some(Vendor::Azul)
    } else if url.contains("corretto") {
        Some(Vendor::Amazon)
    } else if url.contains("microsoft") {
        Some(Vendor::Microsoft)
    } else {
        None
    }
}

/// Kinds that hold at most one instance. Header lines accumulate and are
/// exempt.
fn duplicate_singleton(records: &[Record], incoming: &Record) -> Option<Kind> {
    let kind = incoming.kind();
    let singleton = matches!(
        kind,
        Kind::VmInfo
            | Kind::HeapAddress
            | Kind::Uname
            | Kind::Time
            | Kind::ElapsedTime
            | Kind::Timezone
            | Kind::CurrentThread
            | Kind::SigInfo
            | Kind::Rlimit
    );
    if singleton && records.iter().any(|r| r.kind() == kind) {
        Some(kind)
    } else {
        None
    }
}

/// Small convenience: the last item of a filtered iterator.
trait LastWhere: Iterator + Sized {
    fn last_where<P>(self, predicate: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool;
}

impl<I: Iterator> LastWhere for I {
    fn last_where<P>(self, predicate: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.filter(predicate).last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::ingest;

    fn doc(lines: &[&str]) -> CrashDocument {
        ingest(lines.iter().copied())
    }

    #[test]
    fn test_heap_reserved_prefers_heap_address() {
        let d = doc(&[
            "heap address: 0x00000000c0000000, size: 1024 MB, Compressed Oops mode: 32-bit",
            "   size_t MaxHeapSize                              = 536870912                                {product}",
        ]);
        assert_eq!(d.heap_reserved(), Some(1024 * 1024 * 1024));
    }

    #[test]
    fn test_heap_reserved_falls_back_to_flag_then_arg() {
        let d = doc(&[
            "   size_t MaxHeapSize                              = 536870912                                {product}",
        ]);
        assert_eq!(d.heap_reserved(), Some(536870912));

        let d = doc(&["jvm_args: -Xms512m -Xmx2g"]);
        assert_eq!(d.heap_reserved(), Some(2 * 1024 * 1024 * 1024));

        let d = doc(&["jvm_args: -XX:+UseG1GC"]);
        assert_eq!(d.heap_reserved(), None);
    }

    #[test]
    fn test_thread_stack_reserved() {
        let d = doc(&[
            "  0x00007f6d08013000 JavaThread \"main\" [_thread_in_native, id=8110]",
            "  0x00007f6d08014000 JavaThread \"worker\" [_thread_blocked, id=8111]",
            "   intx ThreadStackSize                          = 1024                                {pd product}",
        ]);
        // Two threads at 1024 KB each.
        assert_eq!(d.thread_stack_reserved(), Some(2 * 1024 * 1024));
    }

    #[test]
    fn test_thread_stack_overflow_degrades_to_unknown() {
        let d = doc(&[
            "  0x00007f6d08013000 JavaThread \"main\" [_thread_in_native, id=8110]",
            "  0x00007f6d08014000 JavaThread \"worker\" [_thread_blocked, id=8111]",
            "jvm_args: -Xss18446744073709551615",
        ]);
        assert_eq!(d.thread_stack_reserved(), None);
    }

    #[test]
    fn test_thread_stack_unknown_without_threads() {
        let d = doc(&[
            "   intx ThreadStackSize                          = 1024                                {pd product}",
        ]);
        assert_eq!(d.thread_stack_reserved(), None);
    }

    #[test]
    fn test_estimated_total_distinguishes_unknown_from_zero() {
        let d = doc(&["jvm_args: -Xmx1g"]);
        let total = d.estimated_reserved_total();
        assert_eq!(total.bytes, 1024 * 1024 * 1024);
        assert!(!total.complete);
    }

    #[test]
    fn test_vendor_precedence_bug_url_wins() {
        let d = doc(&[
            "#   https://bugzilla.redhat.com/enter_bug.cgi",
            "vm_info: Java HotSpot(TM) 64-Bit Server VM (25.331-b09) for linux-amd64 JRE (1.8.0_331-b09), built on Mar 28 2022 10:33:01 by \"java_re\" with gcc",
        ]);
        assert_eq!(d.vendor(), Vendor::RedHat);
    }

    #[test]
    fn test_vendor_from_builder_when_no_url() {
        let d = doc(&[
            "vm_info: Java HotSpot(TM) 64-Bit Server VM (25.331-b09) for linux-amd64 JRE (1.8.0_331-b09), built on Mar 28 2022 10:33:01 by \"java_re\" with gcc",
        ]);
        assert_eq!(d.vendor(), Vendor::Oracle);
    }

    #[test]
    fn test_vendor_from_rpm_path() {
        let d = doc(&[
            "7f6d0c000000-7f6d0c021000 r-xp 00000000 fd:00 525 /usr/lib/jvm/java-1.8.0-openjdk-1.8.0.345.b01-1.el7_9.x86_64/jre/lib/amd64/server/libjvm.so",
        ]);
        assert_eq!(d.vendor(), Vendor::RedHat);
    }

    #[test]
    fn test_vendor_unidentified_without_signals() {
        let d = doc(&["jvm_args: -Xmx1g"]);
        assert_eq!(d.vendor(), Vendor::Unidentified);
    }

    #[test]
    fn test_os_version_from_release_text() {
        let d = doc(&["OS:Red Hat Enterprise Linux Server release 7.9 (Maipo)"]);
        assert_eq!(d.os_version(), OsVersion::Rhel(7));
        assert_eq!(d.os_version().to_string(), "RHEL7");
    }

    #[test]
    fn test_os_version_from_uname_fallback() {
        let d = doc(&["uname:Linux 3.10.0-1160.el7.x86_64 #1 SMP x86_64"]);
        assert_eq!(d.os_version(), OsVersion::Rhel(7));
    }

    #[test]
    fn test_os_version_unidentified() {
        let d = doc(&["jvm_args: -Xmx1g"]);
        assert_eq!(d.os_version(), OsVersion::Unidentified);
    }

    #[test]
    fn test_truncation_flag() {
        let d = doc(&["# A fatal error has been detected by the Java Runtime Environment:"]);
        assert!(d.is_truncated());

        let d = doc(&["# A fatal error", "END."]);
        assert!(!d.is_truncated());

        let d = doc(&["# A fatal error", "elapsed time: 228 seconds (0d 0h 3m 48s)"]);
        assert!(!d.is_truncated());
    }

    #[test]
    fn test_current_thread_sentinel() {
        let d = doc(&["jvm_args: -Xmx1g"]);
        assert_eq!(d.current_thread_name(), UNKNOWN_THREAD);

        let d = doc(&[
            "Current thread (0x00007f6d08013000):  JavaThread \"main\" [_thread_in_native, id=8110]",
        ]);
        assert_eq!(d.current_thread_name(), "main");
    }

    #[test]
    fn test_mapping_count_prefers_footer() {
        let d = doc(&[
            "Dynamic libraries:",
            "7f6d0c000000-7f6d0c021000 rw-p 00000000 00:00 0 ",
            "Total number of mappings: 65532",
        ]);
        assert_eq!(d.mapping_count(), 65532);

        let d = doc(&[
            "Dynamic libraries:",
            "7f6d0c000000-7f6d0c021000 rw-p 00000000 00:00 0 ",
            "7f6d0c021000-7f6d0c040000 r--p 00000000 00:00 0 ",
        ]);
        assert_eq!(d.mapping_count(), 2);
    }

    #[test]
    fn test_duplicate_singleton_last_write_wins() {
        let d = doc(&[
            "heap address: 0x00000000c0000000, size: 1024 MB, Compressed Oops mode: 32-bit",
            "heap address: 0x0000000080000000, size: 2048 MB, Compressed Oops mode: Zero based",
        ]);
        assert_eq!(d.heap_address().unwrap().size_bytes, Some(2048 * 1024 * 1024));
    }

    #[test]
    fn test_record_order_preserved() {
        let lines = [
            "# header",
            "",
            "Dynamic libraries:",
            "7f6d0c000000-7f6d0c021000 rw-p 00000000 00:00 0 ",
            "END.",
        ];
        let d = doc(&lines);
        let raws: Vec<&str> = d.records().iter().map(|r| r.raw()).collect();
        assert_eq!(raws, vec!["# header", "", "Dynamic libraries:",
            "7f6d0c000000-7f6d0c021000 rw-p 00000000 00:00 0 ", "END."]);
    }

    #[test]
    fn test_swap_usage_from_memory_line() {
        let d = doc(&[
            "Memory: 4k page, physical 16218460k(9979480k free), swap 2097148k(1048574k free)",
        ]);
        let (total, used) = d.swap_usage().unwrap();
        assert_eq!(total, 2097148 * 1024);
        assert_eq!(used, (2097148 - 1048574) * 1024);
    }
}
