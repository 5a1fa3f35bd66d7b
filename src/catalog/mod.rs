//! Static artwork catalog.
//!
//! The catalog is an ordered, read-only list supplied by configuration or
//! the built-in defaults. Selection is by position, like the gallery grid
//! the mint flow was designed around.

pub mod artwork;

pub use artwork::{ArtworkRecord, PriceError};

/// Ordered, read-only list of artworks.
#[derive(Debug, Clone)]
pub struct Catalog {
    artworks: Vec<ArtworkRecord>,
}

impl Catalog {
    pub fn new(artworks: Vec<ArtworkRecord>) -> Self {
        Self { artworks }
    }

    /// Catalog from configured entries, or the built-in one when none are given.
    pub fn from_config(entries: &[ArtworkRecord]) -> Self {
        if entries.is_empty() {
            Self::default()
        } else {
            Self::new(entries.to_vec())
        }
    }

    pub fn len(&self) -> usize {
        self.artworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artworks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArtworkRecord> {
        self.artworks.iter()
    }

    /// Artwork at a display position.
    pub fn get(&self, index: usize) -> Option<&ArtworkRecord> {
        self.artworks.get(index)
    }

    /// Artwork with the given id.
    pub fn find(&self, id: u64) -> Option<&ArtworkRecord> {
        self.artworks.iter().find(|a| a.id == id)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            ArtworkRecord::new(1, "Cosmic Dreamer", "Digital Visionary", "0.05 ETH"),
            ArtworkRecord::new(2, "Neural Nexus", "Crypto Creator", "0.08 ETH"),
            ArtworkRecord::new(3, "Ethereal Essence", "Blockchain Artisan", "0.12 ETH"),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = Catalog::default();
        let names: Vec<_> = catalog.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Cosmic Dreamer", "Neural Nexus", "Ethereal Essence"]);
    }

    #[test]
    fn test_lookup_by_index_and_id() {
        let catalog = Catalog::default();
        assert_eq!(catalog.get(1).map(|a| a.id), Some(2));
        assert_eq!(catalog.find(3).map(|a| a.name.as_str()), Some("Ethereal Essence"));
        assert!(catalog.get(3).is_none());
        assert!(catalog.find(42).is_none());
    }

    #[test]
    fn test_configured_entries_replace_builtin() {
        let entries = vec![ArtworkRecord::new(9, "Solo", "One", "0.5 ETH")];
        let catalog = Catalog::from_config(&entries);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get(0).map(|a| a.id), Some(9));

        assert_eq!(Catalog::from_config(&[]).len(), 3);
    }
}
