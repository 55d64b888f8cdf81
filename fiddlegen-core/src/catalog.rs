//! Catalog provider trait, the TOML catalog dump, and the metadata accessor.
//!
//! The `Catalog` trait abstracts over the native library's introspection
//! calls so the generator can run against a live library binding, a catalog
//! dump on disk, or a test double. The accessor sits above the trait and owns
//! the failure policy: list calls degrade to empty, everything else is fatal.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::descriptor::{DescriptorError, FunctionDescriptor};

/// Errors from the catalog provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog call {call} failed with return code {code}")]
    RetCode { call: &'static str, code: i32 },

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("unknown group '{0}'")]
    UnknownGroup(String),

    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(#[from] DescriptorError),

    #[error("functions '{first}' and '{second}' both map to identifier '{ident}'")]
    DuplicateIdentifier {
        ident: String,
        first: String,
        second: String,
    },

    #[error("read catalog dump {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse catalog dump: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Opaque reference to one catalog function.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionHandle {
    name: String,
}

impl FunctionHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The native library's self-describing function catalog.
pub trait Catalog {
    /// Names of all function groups, in catalog order.
    fn group_table(&self) -> Result<Vec<String>, CatalogError>;

    /// Names of the functions in `group`, in catalog order.
    fn function_table(&self, group: &str) -> Result<Vec<String>, CatalogError>;

    /// Resolve a function by catalog name.
    fn function_handle(&self, name: &str) -> Result<FunctionHandle, CatalogError>;

    /// Fetch the full descriptor behind a handle.
    fn function_info(&self, handle: &FunctionHandle) -> Result<FunctionDescriptor, CatalogError>;
}

// ─── Catalog dump ────────────────────────────────────────────────────

/// One group of a catalog dump.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupDump {
    pub name: String,
    #[serde(default)]
    pub functions: Vec<FunctionDescriptor>,
}

/// A catalog snapshot, usually loaded from TOML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDump {
    #[serde(default)]
    pub groups: Vec<GroupDump>,
}

impl CatalogDump {
    /// Load a catalog dump from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse a catalog dump from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let mut dump: CatalogDump = toml::from_str(content)?;
        for group in &mut dump.groups {
            for function in &mut group.functions {
                function.group = group.name.clone();
            }
        }
        Ok(dump)
    }

    /// Append `descriptor` to `group`, creating the group at the end if needed.
    pub fn push(&mut self, group: &str, mut descriptor: FunctionDescriptor) {
        descriptor.group = group.to_string();
        match self.groups.iter_mut().find(|g| g.name == group) {
            Some(existing) => existing.functions.push(descriptor),
            None => self.groups.push(GroupDump {
                name: group.to_string(),
                functions: vec![descriptor],
            }),
        }
    }

    pub fn function_count(&self) -> usize {
        self.groups.iter().map(|g| g.functions.len()).sum()
    }

    fn find(&self, name: &str) -> Option<&FunctionDescriptor> {
        self.groups
            .iter()
            .flat_map(|g| g.functions.iter())
            .find(|f| f.name == name)
    }
}

impl Catalog for CatalogDump {
    fn group_table(&self) -> Result<Vec<String>, CatalogError> {
        Ok(self.groups.iter().map(|g| g.name.clone()).collect())
    }

    fn function_table(&self, group: &str) -> Result<Vec<String>, CatalogError> {
        self.groups
            .iter()
            .find(|g| g.name == group)
            .map(|g| g.functions.iter().map(|f| f.name.clone()).collect())
            .ok_or_else(|| CatalogError::UnknownGroup(group.to_string()))
    }

    fn function_handle(&self, name: &str) -> Result<FunctionHandle, CatalogError> {
        self.find(name)
            .map(|f| FunctionHandle::new(f.name.clone()))
            .ok_or_else(|| CatalogError::UnknownFunction(name.to_string()))
    }

    fn function_info(&self, handle: &FunctionHandle) -> Result<FunctionDescriptor, CatalogError> {
        self.find(handle.name())
            .cloned()
            .ok_or_else(|| CatalogError::UnknownFunction(handle.name().to_string()))
    }
}

// ─── Metadata accessor ───────────────────────────────────────────────

/// Failure-policy layer over a `Catalog`.
pub struct MetadataAccessor<'a> {
    catalog: &'a dyn Catalog,
}

impl<'a> MetadataAccessor<'a> {
    pub fn new(catalog: &'a dyn Catalog) -> Self {
        Self { catalog }
    }

    /// All group names; a failing provider yields no groups.
    pub fn list_groups(&self) -> Vec<String> {
        self.catalog.group_table().unwrap_or_else(|err| {
            warn!(error = %err, "group table unavailable, treating catalog as empty");
            Vec::new()
        })
    }

    /// Function names in `group`; a failing provider yields no functions.
    pub fn list_functions(&self, group: &str) -> Vec<String> {
        self.catalog.function_table(group).unwrap_or_else(|err| {
            warn!(group, error = %err, "function table unavailable, treating group as empty");
            Vec::new()
        })
    }

    pub fn resolve_handle(&self, name: &str) -> Result<FunctionHandle, CatalogError> {
        self.catalog.function_handle(name)
    }

    /// Fetch and validate the descriptor behind `handle`.
    pub fn describe(&self, handle: &FunctionHandle) -> Result<FunctionDescriptor, CatalogError> {
        let descriptor = self.catalog.function_info(handle)?;
        descriptor.validate()?;
        Ok(descriptor)
    }
}
