//! Content fingerprints for change detection of reference data

use std::hash::{Hash, Hasher};

use ahash::AHasher;

/// Incremental fingerprint over a sequence of strings.
///
/// Order-sensitive: the same strings in a different order give a different
/// fingerprint.
pub(crate) struct Fingerprinter(AHasher);

impl Fingerprinter {
    pub(crate) fn new() -> Self {
        Self(AHasher::default())
    }

    pub(crate) fn add(&mut self, text: &str) {
        text.hash(&mut self.0);
    }

    pub(crate) fn finish(&self) -> String {
        format!("{:016x}", self.0.finish())
    }
}

/// Fingerprint of a whole corpus
pub(crate) fn fingerprint_of<I, S>(texts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fp = Fingerprinter::new();
    for text in texts {
        fp.add(text.as_ref());
    }
    fp.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_and_order_sensitive() {
        let a = fingerprint_of(["one", "two"]);
        assert_eq!(a, fingerprint_of(["one", "two"]));
        assert_ne!(a, fingerprint_of(["two", "one"]));
        assert_eq!(a.len(), 16);
    }
}
