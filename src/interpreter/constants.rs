// Constants for the memory engine

/// Address of the first node minted in a program
/// Heap addresses start at 0x1000 so they read clearly as pointers in the UI
pub const HEAP_ADDRESS_START: u64 = 0x1000;

/// Distance between consecutively minted node addresses
pub const NODE_ADDRESS_STRIDE: u64 = 0x10;

/// Default snapshot cache limit for the timeline (64 MB)
pub const DEFAULT_SNAPSHOT_LIMIT: usize = 64 * 1024 * 1024;
