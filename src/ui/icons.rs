//! Shared UI icons.
//!
//! Fall back to plain ASCII markers on terminals without emoji support.

use console::Emoji;

// Status indicators
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "[ERR]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN]");

// Value origin markers
pub static DERIVED: Emoji<'_, '_> = Emoji("🔄 ", "[DERIVED]");
pub static CORRECTED: Emoji<'_, '_> = Emoji("🔧 ", "[FIXED]");
