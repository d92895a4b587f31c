//! Nucleotide alphabet helpers

/// Alphabet in draw order
pub const BASES: [u8; 4] = [b'A', b'T', b'G', b'C'];

/// Watson-Crick complement; bytes outside the alphabet pass through
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'G' => b'C',
        b'C' => b'G',
        other => other,
    }
}

/// Reverse complement of an ACGT string
pub fn reverse_complement(seq: &str) -> String {
    seq.bytes().rev().map(|b| complement(b) as char).collect()
}

/// The `choice`-th base (mod 3) of the three bases that differ from `original`
pub fn substitute(original: u8, choice: usize) -> u8 {
    let others: Vec<u8> = BASES.iter().copied().filter(|&b| b != original).collect();
    others[choice % others.len()]
}

/// True when `seq` is non-empty and only contains A, T, G or C
pub fn is_valid_dna(seq: &str) -> bool {
    !seq.is_empty() && seq.bytes().all(|b| BASES.contains(&b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_complement() {
        assert_eq!(reverse_complement("ATGC"), "GCAT");
        assert_eq!(reverse_complement("AAGT"), "ACTT");
        assert_eq!(reverse_complement(""), "");
    }

    #[test]
    fn test_reverse_complement_is_involution() {
        let seq = "ATCGGTTACGATCCA";
        assert_eq!(reverse_complement(&reverse_complement(seq)), seq);
    }

    #[test]
    fn test_substitute_never_returns_original() {
        for &base in &BASES {
            for choice in 0..3 {
                let sub = substitute(base, choice);
                assert_ne!(sub, base);
                assert!(BASES.contains(&sub));
            }
        }
        assert_eq!(substitute(b'A', 0), b'T');
        assert_eq!(substitute(b'A', 2), b'C');
    }

    #[test]
    fn test_is_valid_dna() {
        assert!(is_valid_dna("ATGC"));
        assert!(!is_valid_dna("ATGN"));
        assert!(!is_valid_dna(""));
    }
}
