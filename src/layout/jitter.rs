// Deterministic per-item jitter.
//
// Offsets come from a 32-bit FNV-1a hash of the item key, never from item
// order or an RNG, so an item lands near the same spot whenever it is laid
// out again.

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over `salt` followed by `key`.
pub fn fnv1a(salt: &[u8], key: &str) -> u32 {
    salt.iter()
        .chain(key.as_bytes())
        .fold(FNV_OFFSET, |h, &b| (h ^ b as u32).wrapping_mul(FNV_PRIME))
}

/// Hash normalized to [0, 1).
pub fn unit_hash(salt: &[u8], key: &str) -> f64 {
    fnv1a(salt, key) as f64 / (u32::MAX as f64 + 1.0)
}

/// Signed offsets in [-0.5, 0.5) for the angle and the radius of one item.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Jitter {
    pub angle: f64,
    pub radius: f64,
}

impl Jitter {
    pub fn for_key(key: &str) -> Self {
        Self {
            angle: unit_hash(b"angle:", key) - 0.5,
            radius: unit_hash(b"radius:", key) - 0.5,
        }
    }
}
