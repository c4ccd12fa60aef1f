// Constants for the tracer

/// Lines the executor may visit in one run before it stops.
/// Guards against programs that never leave a `WHILE`.
pub const DEFAULT_STEP_LIMIT: usize = 500;

/// Memory budget for recorded snapshots (64 MiB)
pub const DEFAULT_SNAPSHOT_MEMORY_LIMIT: usize = 64 * 1024 * 1024;
