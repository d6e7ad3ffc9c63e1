//! Execute-bit derivation for installed binaries.

const READ_BITS: u32 = 0o444;

/// Grant execute wherever read is granted.
///
/// Owner, group and other read bits each imply the matching execute bit. All
/// other bits, including execute bits already set, are kept as they are.
pub fn exec_mode_from_read(mode: u32) -> u32 {
    mode | ((mode & READ_BITS) >> 2)
}
