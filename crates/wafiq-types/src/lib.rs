//! Shared type definitions for the Wafiq Ortho service.
//!
//! Every type that crosses the HTTP boundary is defined here so the
//! server, the core logic, and the web front end agree on one shape.
//! Types flow downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`enums`] -- Service mode and error classification
//! - [`progress`] -- Progress record and derived statistics
//! - [`content`] -- Static learning content (colors, stories)
//! - [`report`] -- Health snapshots and error reports for the host

pub mod content;
pub mod enums;
pub mod progress;
pub mod report;

// Re-export all public types at crate root for convenience.
pub use content::{ColorSwatch, Story};
pub use enums::{ErrorKind, ServiceMode};
pub use progress::{ProgressRecord, ProgressStats};
pub use report::{ErrorReport, HealthSnapshot, RuntimeInfo};

#[cfg(test)]
mod tests {
    //! `TypeScript` binding generation for the web front end.

    #[test]
    fn export_bindings() {
        // Files are written to the `bindings/` directory relative to
        // the crate root.
        use ts_rs::TS;

        let _ = crate::enums::ServiceMode::export_all();
        let _ = crate::enums::ErrorKind::export_all();
        let _ = crate::progress::ProgressRecord::export_all();
        let _ = crate::progress::ProgressStats::export_all();
        let _ = crate::content::ColorSwatch::export_all();
        let _ = crate::content::Story::export_all();
        let _ = crate::report::HealthSnapshot::export_all();
        let _ = crate::report::RuntimeInfo::export_all();
        let _ = crate::report::ErrorReport::export_all();
    }
}
