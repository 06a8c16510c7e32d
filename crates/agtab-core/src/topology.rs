//! Process topology: parent → children index and agent lookup beneath a
//! pane's shell.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::types::AgentKind;

/// Lazy, memoizing view of per-process metadata. Implementations return an
/// empty string when the process is gone or unreadable.
pub trait ProcessLookup {
    /// Full command line with arguments joined by spaces.
    fn cmdline(&mut self, pid: u32) -> String;
    /// Short command name.
    fn comm(&mut self, pid: u32) -> String;
}

impl<T: ProcessLookup + ?Sized> ProcessLookup for &mut T {
    fn cmdline(&mut self, pid: u32) -> String {
        (**self).cmdline(pid)
    }

    fn comm(&mut self, pid: u32) -> String {
        (**self).comm(pid)
    }
}

/// Parent → direct children map, rebuilt from a full process scan each cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Topology {
    children: HashMap<u32, Vec<u32>>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(pid, ppid)` pairs. Zero and self-referential parents
    /// produce no edge. Children are kept in ascending pid order.
    pub fn from_parent_links(links: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut children: HashMap<u32, Vec<u32>> = HashMap::new();
        for (pid, ppid) in links {
            if ppid == 0 || ppid == pid {
                continue;
            }
            children.entry(ppid).or_default().push(pid);
        }
        for kids in children.values_mut() {
            kids.sort_unstable();
            kids.dedup();
        }
        Self { children }
    }

    pub fn children(&self, pid: u32) -> &[u32] {
        self.children.get(&pid).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_edge(&self, parent: u32, child: u32) -> bool {
        self.children(parent).contains(&child)
    }

    /// Number of processes with at least one child.
    pub fn parent_count(&self) -> usize {
        self.children.len()
    }

    /// All transitive descendants of `pid` in breadth-first order, excluding
    /// `pid` itself. Each process is visited at most once.
    pub fn descendants(&self, pid: u32) -> Vec<u32> {
        let mut result = Vec::new();
        let mut visited: HashSet<u32> = HashSet::from([pid]);
        let mut queue: VecDeque<u32> = self.children(pid).iter().copied().collect();
        while let Some(next) = queue.pop_front() {
            if !visited.insert(next) {
                continue;
            }
            result.push(next);
            queue.extend(self.children(next).iter().copied());
        }
        result
    }
}

/// Agent process located beneath a pane's shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentProcess {
    pub pid: u32,
    pub kind: AgentKind,
}

/// Find the agent among the shell's children, then its grandchildren.
///
/// Deeper generations are never searched: an agent three levels down is
/// more likely an unrelated tool the agent itself spawned.
pub fn find_agent(
    shell_pid: u32,
    topology: &Topology,
    procs: &mut impl ProcessLookup,
) -> Option<AgentProcess> {
    let children = topology.children(shell_pid);
    let grandchildren = children
        .iter()
        .flat_map(|&child| topology.children(child).iter().copied());

    children
        .iter()
        .copied()
        .chain(grandchildren)
        .find_map(|pid| {
            AgentKind::from_command_line(&procs.cmdline(pid)).map(|kind| AgentProcess { pid, kind })
        })
}
