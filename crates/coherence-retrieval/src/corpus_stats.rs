//! Document frequency and smoothed IDF over one hypothesis' records.

use rayon::prelude::*;
use tracing::warn;

use coherence_core::models::ContextRecord;
use coherence_embeddings::reweight;

/// Corpus statistics for a single hypothesis, computed on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStats {
    dimensions: usize,
    document_count: usize,
    document_frequency: Vec<u32>,
    idf: Vec<f32>,
}

impl CorpusStats {
    /// Count, per dimension, the records with a non-zero weight there.
    ///
    /// Records whose vector length differs from `dimensions` are left out
    /// of `N` and `df` entirely.
    pub fn compute(records: &[ContextRecord], dimensions: usize) -> Self {
        let mut document_frequency = vec![0u32; dimensions];
        let mut document_count = 0usize;

        for record in records {
            if record.vector.len() != dimensions {
                warn!(
                    hypothesis_id = %record.hypothesis_id,
                    artifact_id = %record.artifact_id,
                    expected = dimensions,
                    actual = record.vector.len(),
                    "skipping record with mismatched vector dimensions"
                );
                continue;
            }
            document_count += 1;
            for (df, weight) in document_frequency.iter_mut().zip(&record.vector) {
                if *weight > 0.0 {
                    *df += 1;
                }
            }
        }

        let n = document_count as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| (((1.0 + n) / (1.0 + df as f64)).ln() + 1.0) as f32)
            .collect();

        Self {
            dimensions,
            document_count,
            document_frequency,
            idf,
        }
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// `N`: records that contributed to the statistics.
    pub fn document_count(&self) -> usize {
        self.document_count
    }

    pub fn document_frequency(&self) -> &[u32] {
        &self.document_frequency
    }

    /// `ln((1 + N) / (1 + df)) + 1` per dimension. Always ≥ 1.
    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// Whether a record can be compared under these statistics.
    pub fn accepts(&self, record: &ContextRecord) -> bool {
        record.vector.len() == self.dimensions
    }

    /// IDF-weighted, unit-length copy of a raw vector.
    pub fn weigh(&self, raw: &[f32]) -> Vec<f32> {
        reweight(raw, &self.idf)
    }

    /// [`CorpusStats::weigh`] over many records in parallel, order preserved.
    pub fn weigh_all(&self, records: &[&ContextRecord]) -> Vec<Vec<f32>> {
        records.par_iter().map(|r| self.weigh(&r.vector)).collect()
    }
}

/// IDF vector of length `dimensions` for the given records.
pub fn compute_idf(records: &[ContextRecord], dimensions: usize) -> Vec<f32> {
    CorpusStats::compute(records, dimensions).idf
}
