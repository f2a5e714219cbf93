/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library.
These are intended to provide useful information for extending the library and/or fixing issues.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to [unit propagation](crate::procedures::propagation)
    pub const PROPAGATION: &str = "propagation";

    /// Logs related to [conflict analysis](crate::procedures::analysis)
    pub const ANALYSIS: &str = "analysis";

    /// Logs related to [backjumping](crate::procedures::backjump)
    pub const BACKJUMP: &str = "backjump";

    /// Logs related to [decisions](crate::procedures::decision)
    pub const DECISION: &str = "decision";

    /// Logs related to the [incompatibility database](crate::db::incompatibility)
    pub const INCOMPATIBILITY_DB: &str = "incompatibility_db";

    /// Logs related to the [trail](crate::db::trail)
    pub const TRAIL: &str = "trail";

    /// Logs related to [reports](crate::reports)
    pub const REPORT: &str = "report";
}
