//! Writing case outcomes.

use std::io::Write;

use crate::error::AppResult;
use crate::run_service::CaseOutcome;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// CSV writes recordings as tables and a design as `path,value` pairs with
/// the unknown first.
pub fn write_outcome<W: Write>(outcome: &CaseOutcome, format: OutputFormat, mut w: W) -> AppResult<()> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut w, outcome)?;
            writeln!(w)?;
        }
        OutputFormat::Csv => match outcome {
            CaseOutcome::Transient(r) | CaseOutcome::Sweep(r) => r.write_csv(&mut w)?,
            CaseOutcome::Design(d) => {
                writeln!(w, "path,value")?;
                writeln!(w, "{},{}", d.solution.unknown, d.solution.value)?;
                for (path, value) in &d.outputs {
                    if *path != d.solution.unknown {
                        writeln!(w, "{path},{value}")?;
                    }
                }
            }
        },
    }
    Ok(())
}
