//! The project catalog: a static, read-only table mapping installable demo
//! project names to their archive URLs.
//!
//! The catalog is passed into the [`Installer`](crate::installer::Installer)
//! rather than consulted as a global, so tests can substitute alternate
//! tables pointing at local servers.

use crate::core::CliError;

/// One installable project template.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// The name users pass to `tessera init`.
    pub name: String,
    /// URL of a gzip-compressed tar archive of the project.
    pub url: String,
}

/// An immutable name → URL lookup table for installable projects.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from explicit (name, url) pairs. Used by tests and
    /// by [`Catalog::builtin`].
    pub fn new(pairs: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(name, url)| CatalogEntry {
                    name: name.into(),
                    url: url.into(),
                })
                .collect(),
        }
    }

    /// The catalog of officially published demo projects.
    ///
    /// The tarball endpoints wrap all content in a single commit-qualified
    /// directory; the installer strips that wrapper on extraction.
    pub fn builtin() -> Self {
        Self::new([
            (
                "quickstart",
                "https://github.com/tessera-labs/quickstart/tarball/main",
            ),
            (
                "java-quickstart",
                "https://github.com/tessera-labs/java-quickstart/tarball/main",
            ),
        ])
    }

    /// Resolve a project name to its archive URL.
    ///
    /// Unknown names produce [`CliError::UnknownProject`] carrying the
    /// sorted list of valid names for display.
    pub fn resolve(&self, name: &str) -> Result<&str, CliError> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.url.as_str())
            .ok_or_else(|| CliError::UnknownProject {
                name: name.to_string(),
                available: self.names(),
            })
    }

    /// All project names, sorted for stable display.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.iter().map(|e| e.name.clone()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_project() {
        let catalog = Catalog::new([("quickstart", "https://example.com/qs.tar.gz")]);
        assert_eq!(
            catalog.resolve("quickstart").unwrap(),
            "https://example.com/qs.tar.gz"
        );
    }

    #[test]
    fn unknown_project_carries_sorted_names() {
        let catalog = Catalog::new([
            ("zeta", "https://example.com/z.tar.gz"),
            ("alpha", "https://example.com/a.tar.gz"),
        ]);

        match catalog.resolve("missing") {
            Err(CliError::UnknownProject { name, available }) => {
                assert_eq!(name, "missing");
                assert_eq!(available, vec!["alpha".to_string(), "zeta".to_string()]);
            }
            other => panic!("expected UnknownProject, got {other:?}"),
        }
    }

    #[test]
    fn builtin_catalog_includes_quickstart() {
        let catalog = Catalog::builtin();
        assert!(catalog.names().contains(&"quickstart".to_string()));
    }
}
