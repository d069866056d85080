use uuid::Uuid;

/// Derives a PNR from a random 128-bit id: unpadded hex, first 8
/// chars, uppercased. Collisions are possible; uniqueness is enforced
/// only by the storage-layer unique constraint.
pub fn generate() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pnr_is_eight_uppercase_hex_chars() {
        for _ in 0..50 {
            let pnr = generate();
            assert_eq!(pnr.len(), 8);
            assert!(pnr.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }
}
