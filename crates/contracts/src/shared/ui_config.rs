//! UI timing and layout constants shared by every screen.

/// How long a closing dialog keeps its row while the exit transition plays.
pub const EXIT_TRANSITION_MS: u32 = 500;

/// Below this viewport width primary buttons collapse to icon-only.
pub const COMPACT_BREAKPOINT_PX: u32 = 640;

/// Lifetime of a transient notification.
pub const NOTIFICATION_TTL_MS: u32 = 5_000;

pub const DEFAULT_PAGE_SIZE: usize = 50;

pub const PAGE_SIZE_OPTIONS: [usize; 3] = [25, 50, 100];

/// Spreadsheet upload ceiling.
pub const MAX_IMPORT_BYTES: u64 = 5 * 1024 * 1024;
