//! Sample export formats
//!
//! Two text representations of a recorded history, both oldest sample first:
//!
//! ```text
//! # k	u(k)	y(k)            <- Tsv
//! 0	1	1
//! 1	1	1.5
//!
//! % Export format: MATLAB compatible
//! % Columns: k u y
//! data = [0 1 1;1 1 1.5];    <- Matlab
//! % Usage in MATLAB/Octave: ...
//! ```

use crate::history::Sample;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Header line of the tab-separated format
pub const TSV_HEADER: &str = "# k\tu(k)\ty(k)";

/// Line written instead of any data when nothing has been recorded
pub const EMPTY_MARKER: &str = "# Empty buffer";

/// Output format for a sample dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Tab-separated values, one row per sample
    #[default]
    Tsv,
    /// A single `data = [...]` matrix assignment readable by MATLAB/Octave
    Matlab,
}

impl ExportFormat {
    /// Conventional file extension for the format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Tsv => "tsv",
            ExportFormat::Matlab => "m",
        }
    }
}

/// Write `samples` to `writer` in the requested format
pub fn write_samples<W: Write>(mut writer: W, samples: &[Sample], format: ExportFormat) -> io::Result<()> {
    if samples.is_empty() {
        writeln!(writer, "{}", EMPTY_MARKER)?;
        return Ok(());
    }

    match format {
        ExportFormat::Tsv => write_tsv(writer, samples),
        ExportFormat::Matlab => write_matlab(writer, samples),
    }
}

fn write_tsv<W: Write>(mut writer: W, samples: &[Sample]) -> io::Result<()> {
    writeln!(writer, "{}", TSV_HEADER)?;

    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .quote_style(csv::QuoteStyle::Never)
        .has_headers(false)
        .from_writer(writer);

    for sample in samples {
        wtr.write_record(&[
            sample.step.to_string(),
            sample.input.to_string(),
            sample.output.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn write_matlab<W: Write>(mut writer: W, samples: &[Sample]) -> io::Result<()> {
    writeln!(writer, "% Export format: MATLAB compatible")?;
    writeln!(writer, "% Columns: k u y")?;
    write!(writer, "data = [")?;
    for (i, sample) in samples.iter().enumerate() {
        if i > 0 {
            write!(writer, ";")?;
        }
        write!(writer, "{} {} {}", sample.step, sample.input, sample.output)?;
    }
    writeln!(writer, "];")?;
    writeln!(
        writer,
        "% Usage in MATLAB/Octave: load('file'); k = data(:,1); u = data(:,2); y = data(:,3);"
    )?;
    Ok(())
}

/// Render `samples` into a `String`
pub fn samples_to_string(samples: &[Sample], format: ExportFormat) -> String {
    let mut buffer = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_samples(&mut buffer, samples, format);
    String::from_utf8_lossy(&buffer).into_owned()
}
