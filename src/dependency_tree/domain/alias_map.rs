use std::collections::BTreeMap;

/// Where an aliased dependency actually points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTarget {
    /// Real package name (e.g. `@babel/core`)
    pub resolved_name: String,
    /// Version or range of the real package
    pub resolved_version: String,
    /// The alias specifier as written in the lockfile, e.g. `npm:real@1.2.3`
    pub original_alias_target: String,
}

/// Alias declarations found while scanning one lockfile
///
/// For npm lockfiles the key is the declared dependency key. For yarn
/// lockfiles it is the full descriptor `<alias>@npm:<target>@<range>`, which
/// is also how a dependency-list reference to the alias is looked up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasMap {
    entries: BTreeMap<String, AliasTarget>,
}

impl AliasMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: String, target: AliasTarget) {
        self.entries.insert(key, target);
    }

    pub fn get(&self, key: &str) -> Option<&AliasTarget> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &AliasTarget)> {
        self.entries.iter()
    }
}

/// Splits `name@version` at the last `@`, so scoped names keep their leading `@`
///
/// Returns `None` when there is no separator after the first character.
pub fn split_name_version(spec: &str) -> Option<(&str, &str)> {
    match spec.rfind('@') {
        Some(index) if index > 0 => Some((&spec[..index], &spec[index + 1..])),
        _ => None,
    }
}
