//! Domain layer constants
//!
//! Syntax markers used by capability declarations and the names of
//! built-in types every registry knows about.

// ============================================================================
// DESCRIPTOR SYNTAX
// ============================================================================

/// Opens a capability marker, as in `<Nameable>`
pub const CAPABILITY_OPEN: char = '<';

/// Closes a capability marker
pub const CAPABILITY_CLOSE: char = '>';

/// Declaration that accepts any object
pub const ANY_MARKER: &str = "@";

/// Separator allowed inside qualified type names (`store::RecordStore`)
pub const PATH_SEPARATOR: &str = "::";

// ============================================================================
// BUILT-IN TYPES
// ============================================================================

/// Placeholder root type resolved for `@` declarations
pub const ROOT_TYPE_NAME: &str = "Object";

/// Description of the placeholder root type
pub const ROOT_TYPE_DESCRIPTION: &str = "Root placeholder object with no assumed behaviour";
