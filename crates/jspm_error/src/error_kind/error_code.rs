// --- Resolution
pub const UNRESOLVED_MODULE: &str = "UNRESOLVED_MODULE";
pub const INVALID_RESOLUTION: &str = "INVALID_RESOLUTION";
pub const AMBIGUOUS_PARENT_RESOLUTION: &str = "AMBIGUOUS_PARENT_RESOLUTION";
pub const UNRESOLVED_OPTIONAL_DEPENDENCY: &str = "UNRESOLVED_OPTIONAL_DEPENDENCY";
pub const UNRESOLVED_DEPENDENCY: &str = "UNRESOLVED_DEPENDENCY";
pub const NOT_IMPLEMENTED: &str = "NOT_IMPLEMENTED";

// --- Transform
pub const UNEXPECTED_FORMAT: &str = "UNEXPECTED_FORMAT";
pub const MISSING_TRANSFORM: &str = "MISSING_TRANSFORM";
pub const TRANSFORM_FAILED: &str = "TRANSFORM_FAILED";
pub const MINIFY_FAILED: &str = "MINIFY_FAILED";

// --- Build
pub const FETCH_FAILED: &str = "FETCH_FAILED";
pub const INVALID_IMPORT_MAP: &str = "INVALID_IMPORT_MAP";
pub const BUILD_NOT_STARTED: &str = "BUILD_NOT_STARTED";
pub const PANIC: &str = "PANIC";
pub const IO_ERROR: &str = "IO_ERROR";
