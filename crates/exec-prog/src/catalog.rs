//! Syscall catalog the decoder resolves instruction words against.
//!
//! The catalog is owned by the caller and only borrowed for the lifetime of the decoded program;
//! the decoder never builds or mutates one.

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Syscall {
    /// Position in the owning catalog; this is the instruction word that selects the call.
    pub id: usize,
    /// Kernel syscall number.
    pub nr: u64,
    /// Full variant name, e.g. `openat$dir`.
    pub name: String,
    /// Name of the underlying kernel call, e.g. `openat`.
    pub call_name: String,
}

/// Implementations must return entries whose [`Syscall::id`] equals the index they were looked up
/// by; the decoder rejects any other entry.
pub trait SyscallCatalog {
    fn len(&self) -> usize;

    fn syscall(&self, index: usize) -> Option<&Syscall>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Description of one catalog entry as found in a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SyscallDesc {
    Name(String),
    Full {
        name: String,
        #[serde(default)]
        call_name: Option<String>,
        #[serde(default)]
        nr: u64,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog entry #{0} has an empty name")]
    EmptyName(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyscallTable {
    syscalls: Vec<Syscall>,
}

impl SyscallTable {
    /// Builds a table from descriptions, assigning ids by position.
    pub fn new(descs: impl IntoIterator<Item = SyscallDesc>) -> Result<Self, CatalogError> {
        let syscalls = descs
            .into_iter()
            .enumerate()
            .map(|(id, desc)| {
                let (name, call_name, nr) = match desc {
                    SyscallDesc::Name(name) => (name, None, 0),
                    SyscallDesc::Full {
                        name,
                        call_name,
                        nr,
                    } => (name, call_name, nr),
                };
                if name.is_empty() {
                    return Err(CatalogError::EmptyName(id));
                }
                let call_name = call_name.unwrap_or_else(|| base_call_name(&name).to_string());
                Ok(Syscall {
                    id,
                    nr,
                    name,
                    call_name,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { syscalls })
    }

    /// Parses a JSON array whose elements are either plain names or
    /// `{"name": .., "call_name": .., "nr": ..}` objects.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let descs: Vec<SyscallDesc> = serde_json::from_str(json)?;
        Self::new(descs)
    }

    /// Table of `len` placeholder entries, for inspecting programs without their descriptions.
    pub fn anonymous(len: usize) -> Self {
        let syscalls = (0..len)
            .map(|id| {
                let name = format!("syscall#{id}");
                Syscall {
                    id,
                    nr: id as u64,
                    call_name: name.clone(),
                    name,
                }
            })
            .collect();
        Self { syscalls }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Syscall> {
        self.syscalls.iter()
    }

    pub fn by_name(&self, name: &str) -> Option<&Syscall> {
        self.syscalls.iter().find(|s| s.name == name)
    }
}

impl SyscallCatalog for SyscallTable {
    fn len(&self) -> usize {
        self.syscalls.len()
    }

    fn syscall(&self, index: usize) -> Option<&Syscall> {
        self.syscalls.get(index)
    }
}

/// `openat$dir` -> `openat`.
fn base_call_name(name: &str) -> &str {
    name.split_once('$').map_or(name, |(base, _)| base)
}
