//! The rule list.
//!
//! Each rule inspects the document and optionally emits one finding with
//! the literal line(s) that triggered it. Rules never look at each other's
//! output, so the list can be reordered freely without changing results
//! (first-fire-wins only matters when two rules share a key, which none
//! do).

use crate::document::{vendor_from_url, CrashDocument};
use crate::model::Vendor;

use super::{Finding, FindingKey};

pub type Rule = fn(&CrashDocument) -> Option<Finding>;

/// Linux default for `vm.max_map_count`.
const MAX_MAP_COUNT_DEFAULT: u64 = 65_530;

/// A crash within this many seconds of JVM start counts as "at startup".
const STARTUP_WINDOW_SECONDS: f64 = 300.0;

pub const ALL: &[Rule] = &[
    possible_red_hat_build,
    vendor_identified,
    build_not_identified,
    raise_max_map_count,
    page_file_small_at_startup,
    page_file_small,
    out_of_memory,
    insufficient_memory,
    swapped_out,
    internal_error,
    crash_in_native_library,
    error_reporting_failure,
    unidentified_content,
    truncated_log,
    jvm_options_unknown,
    jvm_options_empty,
];

/// RPM-style JDK packaging path in the dynamic library section.
fn possible_red_hat_build(doc: &CrashDocument) -> Option<Finding> {
    doc.rpm_path().map(|lib| Finding {
        key: FindingKey::PossibleRedHatBuild,
        evidence: lib.raw.clone(),
    })
}

/// Known vendor bug URL in the header identifies who shipped the build. A
/// URL no vendor claims is not a signal.
fn vendor_identified(doc: &CrashDocument) -> Option<Finding> {
    doc.headers()
        .find(|h| h.bug_url().and_then(vendor_from_url).is_some())
        .map(|h| Finding {
            key: FindingKey::VendorIdentified,
            evidence: h.raw.clone(),
        })
}

/// No provenance signal at all.
fn build_not_identified(doc: &CrashDocument) -> Option<Finding> {
    if doc.vendor() != Vendor::Unidentified {
        return None;
    }
    let evidence = doc
        .vm_info()
        .map(|v| v.raw.clone())
        .or_else(|| doc.headers().next().map(|h| h.raw.clone()))
        .unwrap_or_default();
    Some(Finding { key: FindingKey::BuildNotIdentified, evidence })
}

/// Native allocation failure with the mapping count at the Linux
/// `max_map_count` default: the process ran out of memory map areas, not
/// memory.
fn raise_max_map_count(doc: &CrashDocument) -> Option<Finding> {
    let header = doc.headers().find(|h| h.is_allocation_failure())?;
    let count = doc.mapping_count();
    // 95% of the default, computed without multiplying the (untrusted)
    // footer count.
    if count >= MAX_MAP_COUNT_DEFAULT - MAX_MAP_COUNT_DEFAULT / 20 {
        Some(Finding {
            key: FindingKey::OutOfMemoryRlimitMaxMapCount,
            evidence: header.raw.clone(),
        })
    } else {
        None
    }
}

fn page_file_failure(doc: &CrashDocument) -> Option<String> {
    doc.headers()
        .find(|h| h.is_page_file_too_small())
        .map(|h| h.raw.clone())
}

/// Windows page file exhausted before the JVM finished starting.
fn page_file_small_at_startup(doc: &CrashDocument) -> Option<Finding> {
    let evidence = page_file_failure(doc)?;
    let at_startup = doc
        .elapsed_time()
        .and_then(|e| e.seconds)
        .map_or(true, |s| s < STARTUP_WINDOW_SECONDS);
    at_startup.then_some(Finding {
        key: FindingKey::PageFileSmallAtStartup,
        evidence,
    })
}

/// Windows page file exhausted in steady state.
fn page_file_small(doc: &CrashDocument) -> Option<Finding> {
    let evidence = page_file_failure(doc)?;
    let at_startup = doc
        .elapsed_time()
        .and_then(|e| e.seconds)
        .map_or(true, |s| s < STARTUP_WINDOW_SECONDS);
    (!at_startup).then_some(Finding { key: FindingKey::PageFileSmall, evidence })
}

fn out_of_memory(doc: &CrashDocument) -> Option<Finding> {
    doc.headers().find(|h| h.is_out_of_memory()).map(|h| Finding {
        key: FindingKey::OutOfMemory,
        evidence: h.raw.clone(),
    })
}

fn insufficient_memory(doc: &CrashDocument) -> Option<Finding> {
    doc.headers()
        .find(|h| h.is_insufficient_memory())
        .map(|h| Finding {
            key: FindingKey::InsufficientMemory,
            evidence: h.raw.clone(),
        })
}

/// More than 5% of swap in use at crash time.
fn swapped_out(doc: &CrashDocument) -> Option<Finding> {
    let (total, used) = doc.swap_usage()?;
    if used > 0 && used * 20 >= total {
        Some(Finding {
            key: FindingKey::SwappedOut,
            evidence: doc.swap_evidence().unwrap_or_default(),
        })
    } else {
        None
    }
}

fn internal_error(doc: &CrashDocument) -> Option<Finding> {
    doc.headers().find(|h| h.is_internal_error()).map(|h| Finding {
        key: FindingKey::InternalError,
        evidence: h.raw.clone(),
    })
}

/// Problematic frame in non-JVM native code.
fn crash_in_native_library(doc: &CrashDocument) -> Option<Finding> {
    doc.headers().find(|h| h.is_problematic_frame())?;
    doc.headers()
        .find(|h| {
            h.raw.starts_with("# C ")
                && (h.raw.contains(".so") || h.raw.contains(".dll"))
                && !h.raw.contains("libjvm")
        })
        .map(|h| Finding {
            key: FindingKey::CrashInNativeLibrary,
            evidence: h.raw.clone(),
        })
}

/// The JVM's own error reporter failed while writing a section.
fn error_reporting_failure(doc: &CrashDocument) -> Option<Finding> {
    if doc.error_reporting_sections().is_empty() {
        return None;
    }
    Some(Finding {
        key: FindingKey::ErrorOccurredDuringErrorReporting,
        evidence: doc.error_reporting_evidence().unwrap_or_default().to_string(),
    })
}

/// One aggregate finding for all unclassifiable lines, never one per line.
fn unidentified_content(doc: &CrashDocument) -> Option<Finding> {
    let mut lines = doc.unidentified_lines();
    let first = lines.next()?;
    let mut evidence = first.to_string();
    for line in lines.take(2) {
        evidence.push('\n');
        evidence.push_str(line);
    }
    Some(Finding { key: FindingKey::UnidentifiedContent, evidence })
}

/// Neither an end marker nor an elapsed-time record: the log stopped
/// mid-dump.
fn truncated_log(doc: &CrashDocument) -> Option<Finding> {
    if !doc.is_truncated() {
        return None;
    }
    let evidence = doc
        .records()
        .iter()
        .rev()
        .map(|r| r.raw())
        .find(|raw| !raw.is_empty())
        .unwrap_or_default()
        .to_string();
    Some(Finding { key: FindingKey::TruncatedLog, evidence })
}

/// No `jvm_args:` line at all: the options are unknown, which is different
/// from known-and-empty.
fn jvm_options_unknown(doc: &CrashDocument) -> Option<Finding> {
    use crate::model::VmArgumentsFlavor;
    let has_args_line = doc
        .vm_arguments()
        .any(|a| a.flavor == VmArgumentsFlavor::JvmArgs);
    if has_args_line {
        return None;
    }
    let evidence = doc
        .vm_arguments()
        .next()
        .map(|a| a.raw.clone())
        .unwrap_or_default();
    Some(Finding { key: FindingKey::JvmOptionsUnknown, evidence })
}

/// A `jvm_args:` line that carries no options.
fn jvm_options_empty(doc: &CrashDocument) -> Option<Finding> {
    use crate::model::VmArgumentsFlavor;
    doc.vm_arguments()
        .find(|a| a.flavor == VmArgumentsFlavor::JvmArgs && a.value.is_empty())
        .map(|a| Finding {
            key: FindingKey::JvmOptionsEmpty,
            evidence: a.raw.clone(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::ingest::ingest;

    const MMAP_FAILURE: &str = "# Native memory allocation (mmap) failed to map 12288 bytes for committing reserved memory.";

    #[test]
    fn test_raise_max_map_count_fires_once_with_header_evidence() {
        let doc = ingest([
            MMAP_FAILURE,
            "Dynamic libraries:",
            "7f6d0c000000-7f6d0c021000 rw-p 00000000 00:00 0 ",
            "Total number of mappings: 65532",
        ]);
        let findings = analyze(&doc).unwrap();
        assert_eq!(
            findings.get(FindingKey::OutOfMemoryRlimitMaxMapCount),
            Some(MMAP_FAILURE)
        );
        assert_eq!(
            findings
                .iter()
                .filter(|f| f.key == FindingKey::OutOfMemoryRlimitMaxMapCount)
                .count(),
            1
        );
    }

    #[test]
    fn test_raise_max_map_count_survives_absurd_footer() {
        // A footer claiming u64::MAX mappings is still just a big count.
        let doc = ingest([
            MMAP_FAILURE,
            "Dynamic libraries:",
            "Total number of mappings: 18446744073709551615",
        ]);
        let findings = analyze(&doc).unwrap();
        assert!(findings.contains(FindingKey::OutOfMemoryRlimitMaxMapCount));
    }

    #[test]
    fn test_raise_max_map_count_needs_both_signals() {
        // Allocation failure with a small mapping count: not the sysctl.
        let doc = ingest([
            MMAP_FAILURE,
            "Dynamic libraries:",
            "Total number of mappings: 1200",
        ]);
        let findings = analyze(&doc).unwrap();
        assert!(!findings.contains(FindingKey::OutOfMemoryRlimitMaxMapCount));

        // Huge mapping count without an allocation failure: nothing to say.
        let doc = ingest(["Dynamic libraries:", "Total number of mappings: 65532"]);
        let findings = analyze(&doc).unwrap();
        assert!(!findings.contains(FindingKey::OutOfMemoryRlimitMaxMapCount));
    }

    #[test]
    fn test_possible_red_hat_build_and_os_version() {
        let doc = ingest([
            "OS:Red Hat Enterprise Linux Server release 7.9 (Maipo)",
            "Dynamic libraries:",
            "7f6d0c000000-7f6d0c021000 r-xp 00000000 fd:00 525 /usr/lib/jvm/java-1.8.0-openjdk-1.8.0.345.b01-1.el7_9.x86_64/jre/lib/amd64/server/libjvm.so",
        ]);
        assert_eq!(doc.os_version().to_string(), "RHEL7");
        let findings = analyze(&doc).unwrap();
        let evidence = findings.get(FindingKey::PossibleRedHatBuild).unwrap();
        assert!(evidence.contains("java-1.8.0-openjdk"));
        assert!(!findings.contains(FindingKey::BuildNotIdentified));
    }

    #[test]
    fn test_build_not_identified_without_signals() {
        let doc = ingest(["jvm_args: -Xmx1g"]);
        let findings = analyze(&doc).unwrap();
        assert!(findings.contains(FindingKey::BuildNotIdentified));
        assert!(!findings.contains(FindingKey::PossibleRedHatBuild));
    }

    #[test]
    fn test_vendor_identified_from_bug_url() {
        let url_line = "#   https://bugzilla.redhat.com/enter_bug.cgi";
        let doc = ingest(["# A fatal error has been detected", url_line]);
        let findings = analyze(&doc).unwrap();
        assert_eq!(findings.get(FindingKey::VendorIdentified), Some(url_line));
        assert!(!findings.contains(FindingKey::BuildNotIdentified));
    }

    #[test]
    fn test_unrecognized_bug_url_is_not_a_vendor() {
        let doc = ingest([
            "# If you would like to submit a bug report, please visit:",
            "#   https://bugs.example.org/report",
        ]);
        let findings = analyze(&doc).unwrap();
        assert!(!findings.contains(FindingKey::VendorIdentified));
        assert!(findings.contains(FindingKey::BuildNotIdentified));
    }

    #[test]
    fn test_page_file_rules_are_mutually_exclusive() {
        let header = "# Native memory allocation (malloc) failed to allocate 1048576 bytes. Error detail: AllocateHeap: the paging file is too small for this operation to complete";

        // No elapsed time: assume startup.
        let doc = ingest([header]);
        let findings = analyze(&doc).unwrap();
        assert!(findings.contains(FindingKey::PageFileSmallAtStartup));
        assert!(!findings.contains(FindingKey::PageFileSmall));

        // Early crash: startup.
        let doc = ingest([header, "elapsed time: 12.5 seconds (0d 0h 0m 12s)"]);
        let findings = analyze(&doc).unwrap();
        assert!(findings.contains(FindingKey::PageFileSmallAtStartup));
        assert!(!findings.contains(FindingKey::PageFileSmall));

        // Long-running process: steady state.
        let doc = ingest([header, "elapsed time: 86400 seconds (1d 0h 0m 0s)"]);
        let findings = analyze(&doc).unwrap();
        assert!(findings.contains(FindingKey::PageFileSmall));
        assert!(!findings.contains(FindingKey::PageFileSmallAtStartup));
    }

    #[test]
    fn test_unidentified_content_is_one_aggregate_finding() {
        let doc = ingest([
            "first stray line",
            "second stray line",
            "third stray line",
            "fourth stray line",
        ]);
        let findings = analyze(&doc).unwrap();
        let unidentified: Vec<_> = findings
            .iter()
            .filter(|f| f.key == FindingKey::UnidentifiedContent)
            .collect();
        assert_eq!(unidentified.len(), 1);
        assert!(unidentified[0].evidence.starts_with("first stray line"));
    }

    #[test]
    fn test_truncated_log_finding_flips_with_end_marker() {
        let doc = ingest(["# A fatal error has been detected"]);
        assert!(analyze(&doc).unwrap().contains(FindingKey::TruncatedLog));

        let doc = ingest(["# A fatal error has been detected", "END."]);
        assert!(!analyze(&doc).unwrap().contains(FindingKey::TruncatedLog));
    }

    #[test]
    fn test_error_reporting_failure_names_section() {
        let doc = ingest([
            "Register to memory mapping:",
            "[error occurred during error reporting (printing register info), id 0xb]",
        ]);
        let findings = analyze(&doc).unwrap();
        let evidence = findings
            .get(FindingKey::ErrorOccurredDuringErrorReporting)
            .unwrap();
        assert!(evidence.contains("printing register info"));
        assert_eq!(
            doc.error_reporting_sections(),
            vec![crate::model::Kind::RegisterToMemoryMapping]
        );
    }

    #[test]
    fn test_jvm_options_unknown_vs_empty() {
        let doc = ingest(["java_command: org.example.Main"]);
        let findings = analyze(&doc).unwrap();
        assert!(findings.contains(FindingKey::JvmOptionsUnknown));
        assert!(!findings.contains(FindingKey::JvmOptionsEmpty));

        let doc = ingest(["jvm_args: ", "java_command: org.example.Main"]);
        let findings = analyze(&doc).unwrap();
        assert!(findings.contains(FindingKey::JvmOptionsEmpty));
        assert!(!findings.contains(FindingKey::JvmOptionsUnknown));

        let doc = ingest(["jvm_args: -Xmx1g"]);
        let findings = analyze(&doc).unwrap();
        assert!(!findings.contains(FindingKey::JvmOptionsEmpty));
        assert!(!findings.contains(FindingKey::JvmOptionsUnknown));
    }

    #[test]
    fn test_swapped_out() {
        let doc = ingest([
            "Memory: 4k page, physical 16218460k(9979480k free), swap 2097148k(1048574k free)",
        ]);
        let findings = analyze(&doc).unwrap();
        let evidence = findings.get(FindingKey::SwappedOut).unwrap();
        assert!(evidence.contains("swap 2097148k"));

        let doc = ingest([
            "Memory: 4k page, physical 16218460k(9979480k free), swap 2097148k(2097148k free)",
        ]);
        let findings = analyze(&doc).unwrap();
        assert!(!findings.contains(FindingKey::SwappedOut));
    }

    #[test]
    fn test_crash_in_native_library() {
        let doc = ingest([
            "# Problematic frame:",
            "# C  [libnative.so+0x1234]  badfunc+0x14",
        ]);
        let findings = analyze(&doc).unwrap();
        assert_eq!(
            findings.get(FindingKey::CrashInNativeLibrary),
            Some("# C  [libnative.so+0x1234]  badfunc+0x14")
        );
    }
}
