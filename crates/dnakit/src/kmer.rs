//! K-mer counting.
//!
//! [`count_kmers`] is the one-shot sliding-window count; [`KmerCounter`]
//! accumulates counts for a fixed `k` across several sequences.

use rustc_hash::FxHashMap;

use crate::sequence::Sequence;

/// Occurrence counts keyed by k-mer. Iteration order is unspecified.
pub type KmerCounts = FxHashMap<String, u64>;

/// Counts every length-`k` substring of `sequence`.
///
/// One window starts at each index `i` in `0..=len - k`, where lengths and
/// indices count characters, so the input does not need to be validated.
/// When `k` exceeds the sequence length the result is empty. A `k` of zero
/// counts the `len + 1` empty windows under the empty string.
///
/// # Examples
///
/// ```
/// use dnakit::kmer::count_kmers;
///
/// let counts = count_kmers("ATGC", 2);
/// assert_eq!(counts.len(), 3);
/// assert_eq!(counts["TG"], 1);
///
/// assert!(count_kmers("ATGC", 5).is_empty());
/// ```
pub fn count_kmers(sequence: &str, k: usize) -> KmerCounts {
    let mut counts = KmerCounts::default();
    for_each_kmer(sequence, k, |kmer| {
        *counts.entry(kmer.to_string()).or_insert(0) += 1;
    });
    counts
}

/// Calls `f` with every length-`k` window of `sequence`, left to right.
fn for_each_kmer<'a>(sequence: &'a str, k: usize, mut f: impl FnMut(&'a str)) {
    if sequence.is_ascii() {
        if k > sequence.len() {
            return;
        }
        for i in 0..=sequence.len() - k {
            f(&sequence[i..i + k]);
        }
        return;
    }

    // Byte offsets of every character boundary, including the end.
    let bounds: Vec<usize> = sequence
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(sequence.len()))
        .collect();
    let len = bounds.len() - 1;
    if k > len {
        return;
    }
    for i in 0..=len - k {
        f(&sequence[bounds[i]..bounds[i + k]]);
    }
}

/// A k-mer counter that tracks frequencies over one or more sequences.
///
/// # Examples
///
/// ```
/// use dnakit::sequence::Sequence;
/// use dnakit::kmer::KmerCounter;
///
/// let seq = Sequence::new("ATGATGATG").unwrap();
/// let mut counter = KmerCounter::new(3);
/// counter.count(&seq);
///
/// let top = counter.most_frequent(1);
/// assert_eq!(top[0], ("ATG".to_string(), 3));
/// ```
#[derive(Debug, Clone, Default)]
pub struct KmerCounter {
    k: usize,
    counts: KmerCounts,
    total: u64,
}

impl KmerCounter {
    /// Creates an empty counter for k-mers of length `k`.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            counts: KmerCounts::default(),
            total: 0,
        }
    }

    /// Returns the k value.
    pub fn k(&self) -> usize {
        self.k
    }

    /// Returns the total number of windows counted.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the number of distinct k-mers seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Counts the k-mers of a validated sequence.
    pub fn count(&mut self, sequence: &Sequence) {
        self.count_str(sequence.bases());
    }

    /// Counts the k-mers of arbitrary text.
    pub fn count_str(&mut self, sequence: &str) {
        let counts = &mut self.counts;
        let total = &mut self.total;
        for_each_kmer(sequence, self.k, |kmer| {
            *counts.entry(kmer.to_string()).or_insert(0) += 1;
            *total += 1;
        });
    }

    /// Counts k-mers in multiple sequences.
    pub fn count_all<'a>(&mut self, sequences: impl IntoIterator<Item = &'a Sequence>) {
        for seq in sequences {
            self.count(seq);
        }
    }

    /// Returns the count for `kmer`, or 0 if it was never seen.
    pub fn get(&self, kmer: &str) -> u64 {
        self.counts.get(kmer).copied().unwrap_or(0)
    }

    /// Returns the `n` most frequent k-mers, ties broken lexicographically.
    pub fn most_frequent(&self, n: usize) -> Vec<(String, u64)> {
        let mut counts: Vec<_> = self.counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts.truncate(n);
        counts
    }

    /// Returns every k-mer and its count, sorted by k-mer.
    pub fn sorted(&self) -> Vec<(String, u64)> {
        let mut counts: Vec<_> = self.counts.iter().map(|(k, v)| (k.clone(), *v)).collect();
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        counts
    }

    /// Merges another counter into this one.
    ///
    /// # Panics
    ///
    /// Panics if the k values don't match.
    pub fn merge(&mut self, other: &KmerCounter) {
        assert_eq!(self.k, other.k, "Cannot merge counters with different k values");

        for (kmer, count) in &other.counts {
            *self.counts.entry(kmer.clone()).or_insert(0) += count;
        }
        self.total += other.total;
    }

    /// Returns a view of the raw counts.
    pub fn counts(&self) -> &KmerCounts {
        &self.counts
    }

    /// Consumes the counter, returning the raw counts.
    pub fn into_counts(self) -> KmerCounts {
        self.counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn counts_of(pairs: &[(&str, u64)]) -> KmerCounts {
        pairs.iter().map(|&(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_one_mers() {
        let counts = count_kmers("AAAATTTTGGGGCCCC", 1);
        assert_eq!(counts, counts_of(&[("A", 4), ("T", 4), ("G", 4), ("C", 4)]));
    }

    #[test]
    fn test_k_larger_than_sequence() {
        assert!(count_kmers("ATG", 4).is_empty());
        assert!(count_kmers("", 1).is_empty());
    }

    #[test]
    fn test_k_equal_to_length() {
        assert_eq!(count_kmers("ATG", 3), counts_of(&[("ATG", 1)]));
    }

    #[test]
    fn test_k_zero_counts_empty_windows() {
        assert_eq!(count_kmers("ATGC", 0), counts_of(&[("", 5)]));
        assert_eq!(count_kmers("", 0), counts_of(&[("", 1)]));
    }

    #[test]
    fn test_non_ascii_windows_by_character() {
        assert_eq!(count_kmers("AéA", 2), counts_of(&[("Aé", 1), ("éA", 1)]));
        assert!(count_kmers("éé", 3).is_empty());
    }

    #[test]
    fn test_counter_accumulates() {
        let mut counter = KmerCounter::new(2);
        counter.count(&Sequence::new("ATGC").unwrap());
        counter.count(&Sequence::new("ATGC").unwrap());

        assert_eq!(counter.total(), 6);
        assert_eq!(counter.distinct(), 3);
        assert_eq!(counter.get("AT"), 2);
        assert_eq!(counter.get("CA"), 0);
    }

    #[test]
    fn test_most_frequent_ties() {
        let mut counter = KmerCounter::new(1);
        counter.count_str("GGAACT");

        assert_eq!(
            counter.most_frequent(3),
            vec![("A".to_string(), 2), ("G".to_string(), 2), ("C".to_string(), 1)]
        );
    }

    #[test]
    fn test_sorted() {
        let mut counter = KmerCounter::new(2);
        counter.count_str("TTAA");
        assert_eq!(
            counter.sorted(),
            vec![("AA".to_string(), 1), ("TA".to_string(), 1), ("TT".to_string(), 1)]
        );
    }

    #[test]
    fn test_merge() {
        let mut first = KmerCounter::new(2);
        first.count_str("ATGC");
        let mut second = KmerCounter::new(2);
        second.count_str("GCA");

        first.merge(&second);
        assert_eq!(first.get("GC"), 2);
        assert_eq!(first.get("CA"), 1);
        assert_eq!(first.total(), 5);
    }

    #[test]
    #[should_panic(expected = "different k values")]
    fn test_merge_mismatched_k() {
        let mut first = KmerCounter::new(2);
        first.merge(&KmerCounter::new(3));
    }
}
