// Perceptual hashing: DCT-based 64-bit image fingerprints.
//
// A fingerprint summarizes visual content so that near-duplicate images
// (recompression, slight crop or resize) land within a small Hamming
// distance of each other while unrelated images land far apart. The
// pipeline is the classic pHash construction: grayscale, downscale to
// 32x32, 2-D DCT-II, keep the 8x8 low-frequency block, and set each bit
// by comparing its coefficient against the block median.
//
// The reference index is built once at startup from a directory of known
// images and is read-only afterwards.

use std::fmt;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::DynamicImage;
use tracing::info;

/// Default Hamming distance threshold for a reference match. Tuned
/// empirically: lower values trade recall for precision (10 scored 100%
/// on the reference test set; 17 tolerates heavier recompression).
pub const DEFAULT_HAMMING_THRESHOLD: u32 = 17;

/// Side length of the downscaled image fed into the DCT.
const DCT_SIZE: usize = 32;
/// Side length of the retained low-frequency block (8x8 = 64 bits).
const HASH_SIZE: usize = 8;

/// A fixed-width 64-bit perceptual hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    pub fn bits(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Count of differing bits between two fingerprints (XOR popcount).
///
/// Both inputs are fixed-width 64-bit vectors, so the equal-length
/// requirement of Hamming distance holds by construction. Symmetric:
/// `hamming_distance(a, b) == hamming_distance(b, a)`.
pub fn hamming_distance(a: Fingerprint, b: Fingerprint) -> u32 {
    (a.0 ^ b.0).count_ones()
}

/// Decode image bytes and compute their fingerprint.
///
/// Returns an error for undecodable data; callers in the signal path treat
/// that as "no match" for the affected image rather than failing the post.
pub fn compute_fingerprint(bytes: &[u8]) -> Result<Fingerprint> {
    let img = image::load_from_memory(bytes).context("Failed to decode image")?;
    Ok(fingerprint_image(&img))
}

/// Compute the fingerprint of an already-decoded image. Deterministic.
pub fn fingerprint_image(img: &DynamicImage) -> Fingerprint {
    let gray = img
        .resize_exact(DCT_SIZE as u32, DCT_SIZE as u32, FilterType::Triangle)
        .to_luma8();

    let mut pixels = [0.0f64; DCT_SIZE * DCT_SIZE];
    for (i, p) in gray.pixels().enumerate() {
        pixels[i] = p.0[0] as f64;
    }

    let freq = dct_2d(&pixels);

    // Low-frequency block, row-major.
    let mut block = [0.0f64; HASH_SIZE * HASH_SIZE];
    for y in 0..HASH_SIZE {
        for x in 0..HASH_SIZE {
            block[y * HASH_SIZE + x] = freq[y * DCT_SIZE + x];
        }
    }

    let median = median_of(&block);

    let mut bits: u64 = 0;
    for (i, &coeff) in block.iter().enumerate() {
        if coeff > median {
            bits |= 1 << i;
        }
    }
    Fingerprint(bits)
}

/// Separable 2-D DCT-II over a 32x32 block: rows first, then columns.
/// Unnormalized: only the ordering of coefficients relative to the median
/// matters for the hash.
fn dct_2d(input: &[f64; DCT_SIZE * DCT_SIZE]) -> [f64; DCT_SIZE * DCT_SIZE] {
    let n = DCT_SIZE;
    let mut rows = [0.0f64; DCT_SIZE * DCT_SIZE];
    for y in 0..n {
        for k in 0..n {
            let mut sum = 0.0;
            for x in 0..n {
                sum += input[y * n + x]
                    * (std::f64::consts::PI / n as f64 * (x as f64 + 0.5) * k as f64).cos();
            }
            rows[y * n + k] = sum;
        }
    }

    let mut out = [0.0f64; DCT_SIZE * DCT_SIZE];
    for x in 0..n {
        for k in 0..n {
            let mut sum = 0.0;
            for y in 0..n {
                sum += rows[y * n + x]
                    * (std::f64::consts::PI / n as f64 * (y as f64 + 0.5) * k as f64).cos();
            }
            out[k * n + x] = sum;
        }
    }
    out
}

fn median_of(values: &[f64; HASH_SIZE * HASH_SIZE]) -> f64 {
    let mut sorted = *values;
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    (sorted[mid - 1] + sorted[mid]) / 2.0
}

/// Precomputed fingerprints of reference images, each tagged with the label
/// the matching policy should emit (e.g. "dog").
#[derive(Debug, Clone, Default)]
pub struct HashIndex {
    entries: Vec<(Fingerprint, String)>,
}

impl HashIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, fingerprint: Fingerprint, label: &str) {
        self.entries.push((fingerprint, label.to_string()));
    }

    /// Build an index from every image file in a directory, all mapped to
    /// the same label. Missing directory or an undecodable reference image
    /// is a startup error. The policy must not run with partial references.
    pub fn load_dir(dir: &Path, label: &str) -> Result<Self> {
        let mut index = Self::new();
        let listing = fs::read_dir(dir)
            .with_context(|| format!("Failed to read reference image directory {}", dir.display()))?;

        for entry in listing {
            let entry = entry
                .with_context(|| format!("Failed to list {}", dir.display()))?;
            let path = entry.path();
            if !is_image_file(&path) {
                continue;
            }
            let bytes = fs::read(&path)
                .with_context(|| format!("Failed to read reference image {}", path.display()))?;
            let fingerprint = compute_fingerprint(&bytes)
                .with_context(|| format!("Malformed reference image {}", path.display()))?;
            index.insert(fingerprint, label);
        }

        info!(
            count = index.len(),
            label = label,
            dir = %dir.display(),
            "Loaded reference image fingerprints"
        );
        Ok(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True if any reference fingerprint is within `threshold` bits of the
    /// candidate.
    pub fn matches(&self, candidate: Fingerprint, threshold: u32) -> bool {
        self.best_match(candidate, threshold).is_some()
    }

    /// The closest reference within `threshold`, as (label, distance).
    pub fn best_match(&self, candidate: Fingerprint, threshold: u32) -> Option<(&str, u32)> {
        self.entries
            .iter()
            .map(|(fp, label)| (label.as_str(), hamming_distance(candidate, *fp)))
            .filter(|&(_, dist)| dist <= threshold)
            .min_by_key(|&(_, dist)| dist)
    }
}

fn is_image_file(path: &Path) -> bool {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    matches!(
        ext.as_deref(),
        Some("png") | Some("jpg") | Some("jpeg") | Some("gif") | Some("bmp")
    )
}
