//! The two canonical sector payloads the experiment toggles between.
//!
//! `OLD` counts upward byte by byte and `NEW` is its bitwise complement, so
//! the payloads disagree in every byte and neither is all-zero or all-one.
//! Erased or zeroed flash can never pass for either payload, and a single
//! flipped bit in either direction is visible to the classifier.

use crate::{Sector, SECTOR_LEN};

/// Baseline payload, rewritten before every armed run.
pub const OLD: Sector = old_payload();

/// Payload whose write the power cut is aimed at.
pub const NEW: Sector = new_payload();

const fn old_payload() -> Sector {
    let mut buf = [0u8; SECTOR_LEN];
    let mut i = 0;
    while i < SECTOR_LEN {
        buf[i] = i as u8;
        i += 1;
    }
    buf
}

const fn new_payload() -> Sector {
    let mut buf = old_payload();
    let mut i = 0;
    while i < SECTOR_LEN {
        buf[i] = !buf[i];
        i += 1;
    }
    buf
}

// The classifier depends on the payloads disagreeing in every byte.
const _: () = {
    let mut i = 0;
    while i < SECTOR_LEN {
        assert!(OLD[i] != NEW[i]);
        i += 1;
    }
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payloads_disagree_in_every_byte() {
        for i in 0..SECTOR_LEN {
            assert_ne!(OLD[i], NEW[i]);
        }
    }

    #[test]
    fn neither_payload_looks_like_erased_flash() {
        for payload in [OLD, NEW] {
            assert!(payload.iter().any(|&b| b != 0x00));
            assert!(payload.iter().any(|&b| b != 0xff));
        }
    }

    #[test]
    fn generation_is_idempotent() {
        assert_eq!(old_payload(), OLD);
        assert_eq!(new_payload(), NEW);
        assert_eq!(old_payload(), old_payload());
    }

    #[test]
    fn old_counts_upward_modulo_256() {
        assert_eq!(OLD[0], 0x00);
        assert_eq!(OLD[255], 0xff);
        assert_eq!(OLD[256], 0x00);
        assert_eq!(OLD[511], 0xff);
        assert_eq!(NEW[0], 0xff);
        assert_eq!(NEW[511], 0x00);
    }
}
