//! VM identity and argument lines: `vm_info:`, the `jvm_args:` family, and
//! `[Global flags]` entries.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{GlobalFlag, Vendor, VmArguments, VmArgumentsFlavor, VmInfo};
use crate::units::parse_datetime;

static VM_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^vm_info:\s*([^(]+?)\s*\(").unwrap());
static RELEASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"JRE \(([^)]+)\)").unwrap());
static BUILT_ON_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"built on (.+?)(?: by |$)").unwrap());
static BUILDER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"by "([^"]+)""#).unwrap());
static TARGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"for ([A-Za-z0-9_]+)-([A-Za-z0-9_]+)").unwrap()
});

/// Builder identities seen in `vm_info:` build strings.
const BUILDERS: &[(&str, Vendor)] = &[
    ("mockbuild", Vendor::RedHat),
    ("java_re", Vendor::Oracle),
    ("mach5one", Vendor::Oracle),
    ("jenkins", Vendor::Adoptium),
    ("zulu_re", Vendor::Azul),
    ("ec2-user", Vendor::Amazon),
    ("vsts", Vendor::Microsoft),
];

pub fn parse_vm_info(line: &str) -> VmInfo {
    let builder = BUILDER_RE
        .captures(line)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .and_then(|name| {
            BUILDERS
                .iter()
                .find(|(known, _)| *known == name)
                .map(|(_, vendor)| *vendor)
        })
        .unwrap_or(Vendor::Unidentified);

    let (os, arch) = TARGET_RE
        .captures(line)
        .map(|c| {
            (
                c.get(1).map(|m| m.as_str().to_string()),
                c.get(2).map(|m| m.as_str().to_string()),
            )
        })
        .unwrap_or((None, None));

    VmInfo {
        raw: line.to_string(),
        vm_name: VM_NAME_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()),
        release: RELEASE_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string()),
        build_date: BUILT_ON_RE
            .captures(line)
            .and_then(|c| c.get(1))
            .and_then(|m| parse_datetime(m.as_str())),
        builder,
        os,
        arch,
    }
}

pub fn parse_vm_arguments(line: &str) -> VmArguments {
    let (flavor, value) = if line == "VM Arguments:" {
        (VmArgumentsFlavor::SectionHeader, "")
    } else if let Some(rest) = line.strip_prefix("jvm_args:") {
        (VmArgumentsFlavor::JvmArgs, rest)
    } else if let Some(rest) = line.strip_prefix("java_command:") {
        (VmArgumentsFlavor::JavaCommand, rest)
    } else if let Some(rest) = line.strip_prefix("Launcher Type:") {
        (VmArgumentsFlavor::LauncherType, rest)
    } else if line.starts_with("java_class_path") {
        (
            VmArgumentsFlavor::ClassPath,
            line.split_once(':').map(|(_, v)| v).unwrap_or(""),
        )
    } else {
        (VmArgumentsFlavor::JvmArgs, line)
    };
    VmArguments {
        raw: line.to_string(),
        flavor,
        value: value.trim().to_string(),
    }
}

static GLOBAL_FLAG_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^\s*(bool|intx|uintx|uint64_t|size_t|double|ccstr|ccstrlist)\s+(\w+)\s*:?=\s*("[^"]*"|\S*)\s*(\{[^}]*\})?\s*(\{[^}]*\})?\s*$"#,
    )
    .unwrap()
});

pub fn parse_global_flag(line: &str) -> GlobalFlag {
    match GLOBAL_FLAG_RE.captures(line) {
        Some(caps) => GlobalFlag {
            raw: line.to_string(),
            flag_type: caps.get(1).map(|m| m.as_str().to_string()),
            name: caps.get(2).map(|m| m.as_str().to_string()),
            value: caps
                .get(3)
                .map(|m| m.as_str().trim_matches('"').to_string()),
            origin: caps
                .get(4)
                .map(|m| m.as_str().trim_matches(['{', '}']).to_string()),
        },
        None => GlobalFlag {
            raw: line.to_string(),
            flag_type: None,
            name: None,
            value: None,
            origin: None,
        },
    }
}
