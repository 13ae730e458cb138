use rustc_hash::FxHashSet;

/// Outcome of a deduplication pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Deduplicated {
    /// First occurrences, in input order
    pub unique: Vec<String>,
    /// How many entries were dropped as repeats
    pub duplicate_count: usize,
}

/// Drop repeated links, keeping the first occurrence of each.
///
/// Equality is exact: `https://t.me/a` and `https://t.me/a/` are distinct.
pub fn dedup<S: AsRef<str>>(links: &[S]) -> Deduplicated {
    let mut seen = FxHashSet::with_capacity_and_hasher(links.len(), Default::default());
    let mut unique = Vec::with_capacity(links.len());
    let mut duplicate_count = 0;

    for link in links {
        let link = link.as_ref();
        if seen.insert(link) {
            unique.push(link.to_string());
        } else {
            duplicate_count += 1;
        }
    }

    Deduplicated {
        unique,
        duplicate_count,
    }
}
