use crate::sbom_upload::domain::SbomCategory;

/// Ordered dispatch table from file-name keys to SBOM categories
const CATEGORY_TABLE: [SbomCategory; 4] = [
    SbomCategory::PackageManagers,
    SbomCategory::Applications,
    SbomCategory::IdeExtensions,
    SbomCategory::BrowserExtensions,
];

/// CategoryTable policy for inferring an SBOM's category from its file name
///
/// Each entry's key is tested by substring containment against the file
/// name, in table order; the first match wins.
///
/// Precedence between overlapping keys (one key containing another) is not
/// defined by the naming convention. Such pairs are reported through
/// [`CategoryTable::overlapping_keys`] instead of being resolved silently.
pub struct CategoryTable;

impl CategoryTable {
    /// All categories in dispatch order
    pub fn entries() -> &'static [SbomCategory] {
        &CATEGORY_TABLE
    }

    /// Detects the category of a file by its name
    ///
    /// # Returns
    /// The first category whose key occurs in `file_name`, or None
    pub fn detect(file_name: &str) -> Option<SbomCategory> {
        CATEGORY_TABLE
            .iter()
            .copied()
            .find(|category| file_name.contains(category.key()))
    }

    /// Pairs `(shadowing, shadowed)` where the first key is a substring of
    /// the second, making the match for some file names order dependent
    pub fn overlapping_keys() -> Vec<(&'static str, &'static str)> {
        Self::overlaps_in(&CATEGORY_TABLE)
    }

    fn overlaps_in(table: &[SbomCategory]) -> Vec<(&'static str, &'static str)> {
        let mut overlaps = Vec::new();
        for (i, a) in table.iter().enumerate() {
            for b in table.iter().skip(i + 1) {
                if b.key().contains(a.key()) {
                    overlaps.push((a.key(), b.key()));
                } else if a.key().contains(b.key()) {
                    overlaps.push((b.key(), a.key()));
                }
            }
        }
        overlaps
    }
}
