//! Record parsers: one per family of kinds.
//!
//! Every parser is total for any line the classifier routed to its kind.
//! Malformed fields degrade to `None`; a line is never rejected once a kind
//! matched it.

pub mod dynlib;
pub mod header;
pub mod memory;
pub mod os;
pub mod thread;
pub mod vm;

use crate::model::{Kind, Record};

/// Turn a classified line into its typed record.
pub fn parse(kind: Kind, line: &str) -> Record {
    let line = line.trim_end_matches(['\r', '\n']);
    match kind {
        Kind::Header => Record::Header(header::parse_header(line)),
        Kind::VmInfo => Record::VmInfo(vm::parse_vm_info(line)),
        Kind::VmArguments => Record::VmArguments(vm::parse_vm_arguments(line)),
        Kind::GlobalFlag => Record::GlobalFlag(vm::parse_global_flag(line)),
        Kind::HeapSummary => Record::HeapSummary { raw: line.to_string() },
        Kind::HeapRegion => Record::HeapRegion(memory::parse_heap_region(line)),
        Kind::HeapAddress => Record::HeapAddress(memory::parse_heap_address(line)),
        Kind::Meminfo => Record::Meminfo(memory::parse_meminfo(line)),
        Kind::NativeMemoryTracking => {
            Record::NativeMemoryTracking(memory::parse_nmt_line(line))
        }
        Kind::ProcessMemory => Record::ProcessMemory { raw: line.to_string() },
        Kind::DynamicLibrary => Record::DynamicLibrary(dynlib::parse_mapping(line)),
        Kind::Thread => Record::Thread(thread::parse_thread(line)),
        Kind::CurrentThread => Record::CurrentThread(thread::parse_current_thread(line)),
        Kind::StackFrame => Record::StackFrame(thread::parse_stack_frame(line)),
        Kind::VmOperation => Record::VmOperation(thread::parse_vm_operation(line)),
        Kind::CpuInfo => Record::CpuInfo { raw: line.to_string() },
        Kind::OsInfo => Record::OsInfo { raw: line.to_string() },
        Kind::Uname => Record::Uname { raw: line.to_string() },
        Kind::EnvVar => Record::EnvVar(os::parse_env_var(line)),
        Kind::Time => Record::Time(os::parse_time(line)),
        Kind::ElapsedTime => Record::ElapsedTime(os::parse_elapsed_time(line)),
        Kind::Timezone => Record::Timezone { raw: line.to_string() },
        Kind::SigInfo => Record::SigInfo { raw: line.to_string() },
        Kind::Rlimit => Record::Rlimit { raw: line.to_string() },
        Kind::GcPreciousLog => Record::GcPreciousLog { raw: line.to_string() },
        Kind::RegisterToMemoryMapping => {
            Record::RegisterToMemoryMapping { raw: line.to_string() }
        }
        Kind::StackSlotToMemoryMapping => {
            Record::StackSlotToMemoryMapping { raw: line.to_string() }
        }
        Kind::EndMarker => Record::EndMarker { raw: line.to_string() },
        Kind::Blank => Record::Blank,
        Kind::Unidentified => Record::Unidentified { raw: line.to_string() },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_raw_for_every_kind() {
        let line = "arbitrary content";
        for kind in [
            Kind::HeapSummary,
            Kind::CpuInfo,
            Kind::OsInfo,
            Kind::Uname,
            Kind::GcPreciousLog,
            Kind::RegisterToMemoryMapping,
            Kind::StackSlotToMemoryMapping,
            Kind::ProcessMemory,
            Kind::SigInfo,
            Kind::Rlimit,
            Kind::Timezone,
            Kind::Unidentified,
        ] {
            let record = parse(kind, line);
            assert_eq!(record.kind(), kind);
            assert_eq!(record.raw(), line);
        }
    }

    #[test]
    fn test_parse_is_total_on_malformed_input() {
        // A line routed to the wrong kind still yields a record of that
        // kind, with fields unset.
        let record = parse(Kind::DynamicLibrary, "not a mapping at all");
        assert_eq!(record.kind(), Kind::DynamicLibrary);
        let record = parse(Kind::HeapAddress, "#### garbage");
        assert_eq!(record.kind(), Kind::HeapAddress);
    }
}
