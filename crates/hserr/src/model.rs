//! Record taxonomy for fatal error logs.
//!
//! Every line of a crash log is classified into exactly one [`Kind`] and
//! parsed into the matching [`Record`] variant. Records keep the verbatim
//! line they came from: analysis findings quote input text unchanged, and a
//! half-parsed record can always be re-examined from its raw form.

use chrono::NaiveDateTime;
use serde::Serialize;
use thiserror::Error;

/// The closed set of record kinds the classifier recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// `#`-prefixed header block at the top of the log.
    Header,
    /// `vm_info:` line.
    VmInfo,
    /// `jvm_args:` / `java_command:` / class path / launcher lines.
    VmArguments,
    /// `Heap:` section header.
    HeapSummary,
    /// A heap generation/space line (`PSYoungGen total ... used ...`).
    HeapRegion,
    /// `heap address:` line.
    HeapAddress,
    /// `CPU:` summary or a `/proc/cpuinfo` block line.
    CpuInfo,
    /// `/proc/self/maps`-style mapping, Windows module line, section
    /// header or mapping-count footer.
    DynamicLibrary,
    /// `KEY=VALUE` environment variable line.
    EnvVar,
    /// `GC Precious Log:` block line.
    GcPreciousLog,
    /// `Native Memory Tracking:` block line.
    NativeMemoryTracking,
    /// `Register to memory mapping:` block line.
    RegisterToMemoryMapping,
    /// `Stack slot to memory mapping:` block line.
    StackSlotToMemoryMapping,
    /// Thread listing line.
    Thread,
    /// `Current thread (0x...):` line.
    CurrentThread,
    /// Native/Java stack frame line.
    StackFrame,
    /// `Process Memory:` section line.
    ProcessMemory,
    /// `OS:` line or distro release text.
    OsInfo,
    /// `uname:` line.
    Uname,
    /// `[Global flags]` entry.
    GlobalFlag,
    /// `/proc/meminfo` entry or the OS `Memory:` summary line.
    Meminfo,
    /// `time:` line.
    Time,
    /// `elapsed time:` line (also `Time:` lines that carry one).
    ElapsedTime,
    /// `timezone:` line.
    Timezone,
    /// `VM_Operation` line or VM-operation event entry.
    VmOperation,
    /// `siginfo:` line.
    SigInfo,
    /// `rlimit:` line.
    Rlimit,
    /// Literal `END.` marker, the last line of a complete log.
    EndMarker,
    /// Blank line.
    Blank,
    /// Universal fallback.
    Unidentified,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Header => "header",
            Kind::VmInfo => "vm_info",
            Kind::VmArguments => "vm_arguments",
            Kind::HeapSummary => "heap_summary",
            Kind::HeapRegion => "heap_region",
            Kind::HeapAddress => "heap_address",
            Kind::CpuInfo => "cpu_info",
            Kind::DynamicLibrary => "dynamic_library",
            Kind::EnvVar => "env_var",
            Kind::GcPreciousLog => "gc_precious_log",
            Kind::NativeMemoryTracking => "native_memory_tracking",
            Kind::RegisterToMemoryMapping => "register_to_memory_mapping",
            Kind::StackSlotToMemoryMapping => "stack_slot_to_memory_mapping",
            Kind::Thread => "thread",
            Kind::CurrentThread => "current_thread",
            Kind::StackFrame => "stack_frame",
            Kind::ProcessMemory => "process_memory",
            Kind::OsInfo => "os_info",
            Kind::Uname => "uname",
            Kind::GlobalFlag => "global_flag",
            Kind::Meminfo => "meminfo",
            Kind::Time => "time",
            Kind::ElapsedTime => "elapsed_time",
            Kind::Timezone => "timezone",
            Kind::VmOperation => "vm_operation",
            Kind::SigInfo => "siginfo",
            Kind::Rlimit => "rlimit",
            Kind::EndMarker => "end_marker",
            Kind::Blank => "blank",
            Kind::Unidentified => "unidentified",
        }
    }

    /// Blocks whose content starts after a blank line: the blank between
    /// header and content does not close these. Blanks after content close
    /// them like any other block.
    pub fn spans_blank_lines(&self) -> bool {
        matches!(
            self,
            Kind::RegisterToMemoryMapping | Kind::StackSlotToMemoryMapping
        )
    }

    /// Block kinds accept context-only continuation lines: a structurally
    /// unrecognizable line directly after one of these belongs to the same
    /// block.
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            Kind::DynamicLibrary
                | Kind::CpuInfo
                | Kind::GcPreciousLog
                | Kind::NativeMemoryTracking
                | Kind::RegisterToMemoryMapping
                | Kind::StackSlotToMemoryMapping
        )
    }
}

/// Contract-violation errors. Malformed input is never an error anywhere in
/// this crate; the only failure mode is calling into the analysis engine
/// with a document whose ingestion has not finished.
#[derive(Debug, Error)]
pub enum Error {
    #[error("document is still being ingested; finish ingestion before analyzing")]
    IncompleteDocument,
}

/// Coarse storage category behind a mapping's device major id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceCategory {
    FixedDisk,
    ScsiDisk,
    Nfs,
    AwsBlockStorage,
    Unidentified,
}

/// Compressed-oop addressing mode reported on the `heap address:` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompressedOopsMode {
    Bit32,
    ZeroBased,
    NonZeroBased,
    None,
    Unknown,
}

/// JDK vendor, inferred from builder identity, bug URL, or packaging paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    RedHat,
    Oracle,
    Adoptium,
    Azul,
    Amazon,
    Microsoft,
    Unidentified,
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Vendor::RedHat => "Red Hat",
            Vendor::Oracle => "Oracle",
            Vendor::Adoptium => "Adoptium",
            Vendor::Azul => "Azul",
            Vendor::Amazon => "Amazon",
            Vendor::Microsoft => "Microsoft",
            Vendor::Unidentified => "Unidentified",
        };
        f.write_str(s)
    }
}

/// Operating system version, as coarse as the evidence allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OsVersion {
    Rhel(u8),
    CentOs(u8),
    Windows,
    Other,
    Unidentified,
}

impl std::fmt::Display for OsVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OsVersion::Rhel(major) => write!(f, "RHEL{}", major),
            OsVersion::CentOs(major) => write!(f, "CENTOS{}", major),
            OsVersion::Windows => f.write_str("WINDOWS"),
            OsVersion::Other => f.write_str("OTHER"),
            OsVersion::Unidentified => f.write_str("UNIDENTIFIED"),
        }
    }
}

/// Field layout a dynamic-library record was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingLayout {
    /// `start-end perms offset dev inode path`
    Posix,
    /// `0xADDR - 0xADDR  path`
    Windows,
    /// `Total number of mappings: N`
    Footer,
    /// Section header or unparseable block content.
    Other,
}

/// One `#` header line. Sub-classification is computed from the raw text so
/// the multi-line header can be interrogated line by line or as a whole.
#[derive(Debug, Clone, Serialize)]
pub struct HeaderLine {
    pub raw: String,
}

const SIGNAL_NAMES: &[&str] = &[
    "SIGSEGV",
    "SIGBUS",
    "SIGILL",
    "SIGFPE",
    "EXCEPTION_ACCESS_VIOLATION",
    "EXCEPTION_STACK_OVERFLOW",
];

impl HeaderLine {
    pub fn signal_name(&self) -> Option<&'static str> {
        SIGNAL_NAMES.iter().copied().find(|s| self.raw.contains(s))
    }

    pub fn is_signal(&self) -> bool {
        self.signal_name().is_some()
    }

    pub fn is_internal_error(&self) -> bool {
        self.raw.contains("Internal Error")
    }

    pub fn is_out_of_memory(&self) -> bool {
        self.raw.contains("Out of Memory Error")
    }

    pub fn is_insufficient_memory(&self) -> bool {
        self.raw.contains("There is insufficient memory")
    }

    /// Native memory allocation failure, e.g.
    /// `# Native memory allocation (mmap) failed to map 12288 bytes ...`.
    pub fn is_allocation_failure(&self) -> bool {
        self.raw.contains("Native memory allocation")
            && (self.raw.contains("failed to map") || self.raw.contains("failed to allocate"))
    }

    pub fn is_page_file_too_small(&self) -> bool {
        self.raw.contains("paging file is too small")
    }

    pub fn bug_url(&self) -> Option<&str> {
        let start = self.raw.find("http")?;
        let tail = &self.raw[start..];
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        Some(&tail[..end])
    }

    pub fn is_problematic_frame(&self) -> bool {
        self.raw.contains("Problematic frame")
    }

    /// `[error occurred during error reporting (...), id 0x...]` wrapper.
    pub fn is_error_report_failure(&self) -> bool {
        is_error_report_wrapper(&self.raw)
    }
}

/// Wrapper marker emitted when the JVM's own error reporter failed while
/// writing a section. May appear inside any section, not only the header.
pub fn is_error_report_wrapper(line: &str) -> bool {
    line.contains("[error occurred during error reporting")
}

/// Which VM-arguments line this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VmArgumentsFlavor {
    JvmArgs,
    JavaCommand,
    ClassPath,
    LauncherType,
    SectionHeader,
}

#[derive(Debug, Clone, Serialize)]
pub struct VmArguments {
    pub raw: String,
    pub flavor: VmArgumentsFlavor,
    /// Text after the `key:` prefix, trimmed. Empty means the line was
    /// present but carried no value.
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct VmInfo {
    pub raw: String,
    pub vm_name: Option<String>,
    pub release: Option<String>,
    pub build_date: Option<NaiveDateTime>,
    pub builder: Vendor,
    pub os: Option<String>,
    pub arch: Option<String>,
}

/// Two JDK releases occasionally ship the same release string; the build
/// date tells them apart. Qualified with `-1`/`-2` in release order.
const AMBIGUOUS_RELEASES: &[(&str, &str, &str)] = &[
    ("1.8.0_222-b10", "Jul 11 2019", "-1"),
    ("1.8.0_222-b10", "Jul 17 2019", "-2"),
    ("1.8.0_232-b09", "Oct 15 2019", "-1"),
    ("1.8.0_232-b09", "Oct 19 2019", "-2"),
];

impl VmInfo {
    /// Release string, qualified with a `-1`/`-2` suffix when the bare
    /// string is shared by two builds.
    pub fn qualified_release(&self) -> Option<String> {
        let release = self.release.as_deref()?;
        if let Some(date) = self.build_date {
            let stamp = date.format("%b %e %Y").to_string();
            let collapsed: String = stamp.split_whitespace().collect::<Vec<_>>().join(" ");
            for (known, known_date, suffix) in AMBIGUOUS_RELEASES {
                if *known == release && *known_date == collapsed {
                    return Some(format!("{}{}", release, suffix));
                }
            }
        }
        Some(release.to_string())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HeapRegion {
    pub raw: String,
    pub name: Option<String>,
    pub total_bytes: Option<u64>,
    pub used_bytes: Option<u64>,
    pub reserved_bytes: Option<u64>,
    pub range_start: Option<u64>,
    pub range_end: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeapAddress {
    pub raw: String,
    pub start: Option<u64>,
    pub size_bytes: Option<u64>,
    pub oops_mode: CompressedOopsMode,
}

#[derive(Debug, Clone, Serialize)]
pub struct DynamicLibrary {
    pub raw: String,
    pub layout: MappingLayout,
    pub start: Option<u64>,
    pub end: Option<u64>,
    pub permissions: Option<String>,
    pub offset: Option<u64>,
    /// `major:minor` exactly as printed, e.g. `103:03` or `fd:00`.
    pub device: Option<String>,
    pub inode: Option<u64>,
    pub path: Option<String>,
}

/// Known device major ids (hex, as printed in `/proc/self/maps`).
const DEVICE_MAJORS: &[(&str, DeviceCategory)] = &[
    ("03", DeviceCategory::FixedDisk), // IDE
    ("16", DeviceCategory::FixedDisk),
    ("fd", DeviceCategory::FixedDisk), // device-mapper
    ("08", DeviceCategory::ScsiDisk),
    ("41", DeviceCategory::ScsiDisk),
    ("00", DeviceCategory::Nfs),
    ("103", DeviceCategory::AwsBlockStorage), // blkext/NVMe
    ("ca", DeviceCategory::AwsBlockStorage),  // Xen xvd
];

impl DynamicLibrary {
    /// True for the actual mapping entries, not the section header/footer.
    pub fn is_mapping(&self) -> bool {
        matches!(self.layout, MappingLayout::Posix | MappingLayout::Windows)
    }

    pub fn device_category(&self) -> DeviceCategory {
        let Some(device) = self.device.as_deref() else {
            return DeviceCategory::Unidentified;
        };
        let major = device.split(':').next().unwrap_or("");
        let normalized = major.trim_start_matches('0');
        let major = if normalized.is_empty() { "0" } else { normalized };
        for (known, category) in DEVICE_MAJORS {
            let known_trim = known.trim_start_matches('0');
            let known_trim = if known_trim.is_empty() { "0" } else { known_trim };
            if major.eq_ignore_ascii_case(known_trim) {
                return *category;
            }
        }
        DeviceCategory::Unidentified
    }

    pub fn is_native_library(&self) -> bool {
        self.path
            .as_deref()
            .map(|p| p.ends_with(".so") || p.contains(".so.") || p.ends_with(".dll"))
            .unwrap_or(false)
    }

    pub fn is_jar(&self) -> bool {
        self.path.as_deref().map(|p| p.ends_with(".jar")).unwrap_or(false)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvVar {
    pub raw: String,
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NmtLine {
    pub raw: String,
    pub category: Option<String>,
    pub reserved_bytes: Option<u64>,
    pub committed_bytes: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThreadLine {
    pub raw: String,
    pub address: Option<u64>,
    pub thread_type: Option<String>,
    pub name: Option<String>,
    pub state: Option<String>,
    pub id: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StackFrame {
    pub raw: String,
    /// `J`/`j`/`V`/`C`/`v` frame marker; `None` for section headers.
    pub frame_type: Option<char>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalFlag {
    pub raw: String,
    pub flag_type: Option<String>,
    pub name: Option<String>,
    pub value: Option<String>,
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeminfoLine {
    pub raw: String,
    pub key: Option<String>,
    pub value_bytes: Option<u64>,
    /// Populated from the OS `Memory:` summary line only.
    pub swap_total_bytes: Option<u64>,
    pub swap_free_bytes: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimeLine {
    pub raw: String,
    pub timestamp: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ElapsedTime {
    pub raw: String,
    pub seconds: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VmOperation {
    pub raw: String,
    pub operation: Option<String>,
}

/// A parsed line. Immutable once created; context never leaks into a record.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Header(HeaderLine),
    VmInfo(VmInfo),
    VmArguments(VmArguments),
    HeapSummary { raw: String },
    HeapRegion(HeapRegion),
    HeapAddress(HeapAddress),
    CpuInfo { raw: String },
    DynamicLibrary(DynamicLibrary),
    EnvVar(EnvVar),
    GcPreciousLog { raw: String },
    NativeMemoryTracking(NmtLine),
    RegisterToMemoryMapping { raw: String },
    StackSlotToMemoryMapping { raw: String },
    Thread(ThreadLine),
    CurrentThread(ThreadLine),
    StackFrame(StackFrame),
    ProcessMemory { raw: String },
    OsInfo { raw: String },
    Uname { raw: String },
    GlobalFlag(GlobalFlag),
    Meminfo(MeminfoLine),
    Time(TimeLine),
    ElapsedTime(ElapsedTime),
    Timezone { raw: String },
    VmOperation(VmOperation),
    SigInfo { raw: String },
    Rlimit { raw: String },
    EndMarker { raw: String },
    Blank,
    Unidentified { raw: String },
}

impl Record {
    pub fn kind(&self) -> Kind {
        match self {
            Record::Header(_) => Kind::Header,
            Record::VmInfo(_) => Kind::VmInfo,
            Record::VmArguments(_) => Kind::VmArguments,
            Record::HeapSummary { .. } => Kind::HeapSummary,
            Record::HeapRegion(_) => Kind::HeapRegion,
            Record::HeapAddress(_) => Kind::HeapAddress,
            Record::CpuInfo { .. } => Kind::CpuInfo,
            Record::DynamicLibrary(_) => Kind::DynamicLibrary,
            Record::EnvVar(_) => Kind::EnvVar,
            Record::GcPreciousLog { .. } => Kind::GcPreciousLog,
            Record::NativeMemoryTracking(_) => Kind::NativeMemoryTracking,
            Record::RegisterToMemoryMapping { .. } => Kind::RegisterToMemoryMapping,
            Record::StackSlotToMemoryMapping { .. } => Kind::StackSlotToMemoryMapping,
            Record::Thread(_) => Kind::Thread,
            Record::CurrentThread(_) => Kind::CurrentThread,
            Record::StackFrame(_) => Kind::StackFrame,
            Record::ProcessMemory { .. } => Kind::ProcessMemory,
            Record::OsInfo { .. } => Kind::OsInfo,
            Record::Uname { .. } => Kind::Uname,
            Record::GlobalFlag(_) => Kind::GlobalFlag,
            Record::Meminfo(_) => Kind::Meminfo,
            Record::Time(_) => Kind::Time,
            Record::ElapsedTime(_) => Kind::ElapsedTime,
            Record::Timezone { .. } => Kind::Timezone,
            Record::VmOperation(_) => Kind::VmOperation,
            Record::SigInfo { .. } => Kind::SigInfo,
            Record::Rlimit { .. } => Kind::Rlimit,
            Record::EndMarker { .. } => Kind::EndMarker,
            Record::Blank => Kind::Blank,
            Record::Unidentified { .. } => Kind::Unidentified,
        }
    }

    /// Verbatim input line. Blank lines report an empty string.
    pub fn raw(&self) -> &str {
        match self {
            Record::Header(h) => &h.raw,
            Record::VmInfo(v) => &v.raw,
            Record::VmArguments(v) => &v.raw,
            Record::HeapSummary { raw } => raw,
            Record::HeapRegion(r) => &r.raw,
            Record::HeapAddress(h) => &h.raw,
            Record::CpuInfo { raw } => raw,
            Record::DynamicLibrary(d) => &d.raw,
            Record::EnvVar(e) => &e.raw,
            Record::GcPreciousLog { raw } => raw,
            Record::NativeMemoryTracking(n) => &n.raw,
            Record::RegisterToMemoryMapping { raw } => raw,
            Record::StackSlotToMemoryMapping { raw } => raw,
            Record::Thread(t) => &t.raw,
            Record::CurrentThread(t) => &t.raw,
            Record::StackFrame(s) => &s.raw,
            Record::ProcessMemory { raw } => raw,
            Record::OsInfo { raw } => raw,
            Record::Uname { raw } => raw,
            Record::GlobalFlag(g) => &g.raw,
            Record::Meminfo(m) => &m.raw,
            Record::Time(t) => &t.raw,
            Record::ElapsedTime(e) => &e.raw,
            Record::Timezone { raw } => raw,
            Record::VmOperation(v) => &v.raw,
            Record::SigInfo { raw } => raw,
            Record::Rlimit { raw } => raw,
            Record::EndMarker { raw } => raw,
            Record::Blank => "",
            Record::Unidentified { raw } => raw,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(device: &str, path: &str) -> DynamicLibrary {
        DynamicLibrary {
            raw: String::new(),
            layout: MappingLayout::Posix,
            start: None,
            end: None,
            permissions: None,
            offset: None,
            device: Some(device.to_string()),
            inode: None,
            path: Some(path.to_string()),
        }
    }

    #[test]
    fn test_device_category_aws() {
        let lib = mapping("103:03", "/usr/lib/jvm/java-11-openjdk/lib/server/libjvm.so");
        assert_eq!(lib.device_category(), DeviceCategory::AwsBlockStorage);
        assert!(lib.is_native_library());
        assert!(!lib.is_jar());
    }

    #[test]
    fn test_device_category_known_majors() {
        assert_eq!(mapping("08:02", "/x").device_category(), DeviceCategory::ScsiDisk);
        assert_eq!(mapping("fd:00", "/x").device_category(), DeviceCategory::FixedDisk);
        assert_eq!(mapping("00:35", "/x").device_category(), DeviceCategory::Nfs);
        assert_eq!(mapping("99:00", "/x").device_category(), DeviceCategory::Unidentified);
    }

    #[test]
    fn test_jar_mapping_is_not_native() {
        let lib = mapping("fd:00", "/opt/app/app.jar");
        assert!(lib.is_jar());
        assert!(!lib.is_native_library());
    }

    #[test]
    fn test_versioned_so_is_native() {
        let lib = mapping("08:02", "/usr/lib64/libc.so.6");
        assert!(lib.is_native_library());
    }

    #[test]
    fn test_header_subclassifiers() {
        let oom = HeaderLine {
            raw: "# Native memory allocation (mmap) failed to map 12288 bytes for committing reserved memory.".into(),
        };
        assert!(oom.is_allocation_failure());
        assert!(!oom.is_signal());

        let sig = HeaderLine {
            raw: "#  SIGSEGV (0xb) at pc=0x00007f6d0a0a0a0a, pid=1234, tid=5678".into(),
        };
        assert_eq!(sig.signal_name(), Some("SIGSEGV"));

        let url = HeaderLine {
            raw: "#   https://bugzilla.redhat.com/enter_bug.cgi?product=Red%20Hat%20Enterprise%20Linux%207".into(),
        };
        assert_eq!(
            url.bug_url(),
            Some("https://bugzilla.redhat.com/enter_bug.cgi?product=Red%20Hat%20Enterprise%20Linux%207")
        );
    }

    #[test]
    fn test_qualified_release_disambiguates_by_build_date() {
        let base = VmInfo {
            raw: String::new(),
            vm_name: None,
            release: Some("1.8.0_222-b10".into()),
            build_date: crate::units::parse_datetime("Jul 17 2019"),
            builder: Vendor::RedHat,
            os: None,
            arch: None,
        };
        assert_eq!(base.qualified_release().as_deref(), Some("1.8.0_222-b10-2"));

        let unambiguous = VmInfo {
            release: Some("1.8.0_345-b01".into()),
            ..base
        };
        assert_eq!(unambiguous.qualified_release().as_deref(), Some("1.8.0_345-b01"));
    }

    #[test]
    fn test_error_report_wrapper() {
        assert!(is_error_report_wrapper(
            "[error occurred during error reporting (printing register info), id 0xb]"
        ));
        assert!(!is_error_report_wrapper("RAX=0x0000000000000000"));
    }
}
