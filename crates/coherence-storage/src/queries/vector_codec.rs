//! Little-endian f32 BLOB encoding for stored vectors.

pub fn f32_vec_to_bytes(v: &[f32]) -> Vec<u8> {
    v.iter().flat_map(|x| x.to_le_bytes()).collect()
}

/// Decode a BLOB. Trailing bytes that do not form a full f32 are ignored.
pub fn bytes_to_f32_vec(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_four_bytes_per_value() {
        assert_eq!(f32_vec_to_bytes(&[1.0, 0.0, 3.5]).len(), 12);
    }

    #[test]
    fn decodes_what_it_encodes() {
        let v = vec![0.0, 1.0, 2.0, 17.0];
        assert_eq!(bytes_to_f32_vec(&f32_vec_to_bytes(&v)), v);
    }

    #[test]
    fn ignores_trailing_partial_value() {
        let mut bytes = f32_vec_to_bytes(&[2.0]);
        bytes.push(0xff);
        assert_eq!(bytes_to_f32_vec(&bytes), vec![2.0]);
    }
}
