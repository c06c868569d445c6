use std::ops::Range;

use rayon::prelude::*;

/// Lowercase hex BLAKE3 digest of `data`.
pub fn digest_hex(data: &[u8]) -> String {
    hex::encode(blake3::hash(data).as_bytes())
}

/// Digest every `ranges[i]` slice of `data`, in parallel, keeping order.
pub fn digest_ranges(data: &[u8], ranges: &[Range<usize>]) -> Vec<[u8; 32]> {
    ranges
        .par_iter()
        .map(|r| *blake3::hash(&data[r.clone()]).as_bytes())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_match_sequential_hashing() {
        let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
        let ranges = vec![0..0, 0..10, 10..5000, 5000..10_000];
        let got = digest_ranges(&data, &ranges);
        for (r, d) in ranges.iter().zip(&got) {
            assert_eq!(d, blake3::hash(&data[r.clone()]).as_bytes());
        }
    }

    #[test]
    fn hex_of_empty_input() {
        assert_eq!(
            digest_hex(b""),
            "af1349b9f5f9a1a6a0404dea36dcc9499bcb25c9adc112b7cc9a93cae41f3262"
        );
    }
}
