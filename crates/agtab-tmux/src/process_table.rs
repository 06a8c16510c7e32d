//! Per-cycle process snapshot: the parent → children index plus lazily
//! read, memoized command lines and names.

use std::collections::HashMap;

use agtab_core::{ProcessLookup, Topology};

use crate::procfs::{ProcessSource, decode_cmdline, parse_ppid_from_stat};

/// Memoizing `ProcessLookup` over a `ProcessSource`. Each file is read at
/// most once per instance; build a fresh one every cycle.
#[derive(Debug)]
pub struct ProcessMetadata<S> {
    source: S,
    cmdlines: HashMap<u32, String>,
    comms: HashMap<u32, String>,
}

impl<S: ProcessSource> ProcessMetadata<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cmdlines: HashMap::new(),
            comms: HashMap::new(),
        }
    }
}

impl<S: ProcessSource> ProcessLookup for ProcessMetadata<S> {
    fn cmdline(&mut self, pid: u32) -> String {
        let source = &self.source;
        self.cmdlines
            .entry(pid)
            .or_insert_with(|| {
                source
                    .cmdline(pid)
                    .map(|raw| decode_cmdline(&raw))
                    .unwrap_or_default()
            })
            .clone()
    }

    fn comm(&mut self, pid: u32) -> String {
        let source = &self.source;
        self.comms
            .entry(pid)
            .or_insert_with(|| {
                source
                    .comm(pid)
                    .map(|comm| comm.trim().to_string())
                    .unwrap_or_default()
            })
            .clone()
    }
}

#[derive(Debug)]
pub struct ProcessTable<S> {
    pub topology: Topology,
    pub metadata: ProcessMetadata<S>,
}

impl<S: ProcessSource> ProcessTable<S> {
    /// Read every process's parent link once and index children.
    pub fn scan(source: S) -> Self {
        let links: Vec<(u32, u32)> = source
            .pids()
            .into_iter()
            .map(|pid| {
                let ppid = source
                    .stat(pid)
                    .map_or(0, |stat| parse_ppid_from_stat(&stat));
                (pid, ppid)
            })
            .collect();
        let topology = Topology::from_parent_links(links);
        tracing::trace!(parents = topology.parent_count(), "process table scanned");
        Self {
            topology,
            metadata: ProcessMetadata::new(source),
        }
    }
}
