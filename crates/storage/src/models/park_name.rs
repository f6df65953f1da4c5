/// A park display name with surrounding and repeated whitespace removed.
///
/// Catalog files are hand edited, so "Zion  National Park " and
/// "Zion National Park" must land on the same row. The type forces callers to
/// go through the cleanup before a name reaches the `parks.name` column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParkName(String);

impl ParkName {
    /// Collapses runs of whitespace into single spaces and trims both ends.
    /// Returns `None` when nothing is left.
    ///
    /// # Examples
    ///
    /// ```
    /// use storage::models::ParkName;
    ///
    /// let name = ParkName::new("  Grand   Canyon ").unwrap();
    /// assert_eq!(name.as_str(), "Grand Canyon");
    /// assert!(ParkName::new("   ").is_none());
    /// ```
    pub fn new(raw: &str) -> Option<Self> {
        let cleaned = raw.split_whitespace().collect::<Vec<_>>().join(" ");
        if cleaned.is_empty() {
            None
        } else {
            Some(Self(cleaned))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive key used to spot near-duplicate catalog entries.
    /// ASCII folding, matching SQLite's `NOCASE` collation on `parks.name`.
    pub fn dedup_key(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl std::fmt::Display for ParkName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
