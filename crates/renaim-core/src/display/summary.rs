//! Markdown summary of a batch run.

use std::fmt;

use crate::batch::BatchSummary;

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dry_run {
            writeln!(f, "# Summary (dry run)")?;
        } else {
            writeln!(f, "# Summary")?;
        }
        writeln!(f)?;
        writeln!(f, "- **Inputs**: {}", self.total())?;
        writeln!(f, "- **Succeeded**: {}", self.succeeded())?;
        writeln!(f, "- **Skipped**: {}", self.skipped())?;
        writeln!(f, "- **Failed**: {}", self.failed())
    }
}
