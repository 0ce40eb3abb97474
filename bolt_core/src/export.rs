//! # CSV Export
//!
//! Writes saved calculations as one CSV row each, oldest first. Values are
//! rounded to `GlobalSettings::display_decimals` here and nowhere else; the
//! history file keeps full precision.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::errors::{CalcError, CalcResult};
use crate::project::Project;

/// Column order of the exported file
pub const CSV_HEADER: [&str; 16] = [
    "id",
    "saved_at",
    "label",
    "grade",
    "diameter_mm",
    "threaded_length_mm",
    "threaded_planes",
    "unthreaded_planes",
    "kr",
    "shear_capacity_kn",
    "tensile_capacity_kn",
    "min_pitch_mm",
    "max_pitch_mm",
    "min_edge_sheared_mm",
    "min_edge_rolled_mm",
    "min_edge_rolled_section_mm",
];

/// Write the history as CSV to any writer. Returns the number of rows written.
pub fn write_history_csv<W: Write>(project: &Project, writer: W) -> CalcResult<usize> {
    let settings = &project.settings;
    let round = |v: f64| settings.round_for_display(v).to_string();

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;

    let mut entries = project.history();
    entries.reverse();

    for (id, saved) in &entries {
        let input = saved.bolt_input();
        let result = &saved.result;
        let limits = &result.detailing;
        wtr.write_record([
            id.to_string(),
            saved.saved_at.to_rfc3339(),
            input.label.clone(),
            result.grade.code().to_string(),
            input.diameter_mm.to_string(),
            input.threaded_length_mm.to_string(),
            input.threaded_planes.to_string(),
            input.unthreaded_planes.to_string(),
            round(result.kr),
            round(result.shear_capacity_kn),
            round(result.tensile_capacity_kn),
            round(limits.min_pitch_mm),
            round(limits.max_pitch_mm),
            round(limits.min_edge_sheared_mm),
            round(limits.min_edge_rolled_mm),
            round(limits.min_edge_rolled_section_mm),
        ])?;
    }

    wtr.flush()
        .map_err(|e| CalcError::CsvError { reason: e.to_string() })?;
    Ok(entries.len())
}

/// Export the history to a CSV file at `path`.
pub fn export_history_csv(project: &Project, path: &Path) -> CalcResult<usize> {
    let file = File::create(path)
        .map_err(|e| CalcError::file_error("create", path.display().to_string(), e.to_string()))?;
    let rows = write_history_csv(project, file)?;
    info!(path = %path.display(), rows, "exported calculation history");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate, BoltInput};

    fn project_with(labels: &[&str]) -> Project {
        let mut project = Project::new("Engineer", "25-001");
        for (i, label) in labels.iter().enumerate() {
            let input = BoltInput {
                label: label.to_string(),
                grade: "8.8".to_string(),
                diameter_mm: 20.0,
                threaded_length_mm: 0.0,
                threaded_planes: 1,
                unthreaded_planes: 0,
            };
            let result = calculate(&input).unwrap();
            let id = project.add_calculation(input, result);
            project.items.get_mut(&id).unwrap().saved_at =
                chrono::DateTime::from_timestamp(1_700_000_000 + i as i64, 0).unwrap();
        }
        project
    }

    fn export_to_string(project: &Project) -> String {
        let mut buf = Vec::new();
        write_history_csv(project, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_only_for_empty_history() {
        let csv = export_to_string(&Project::default());
        assert_eq!(csv.trim_end(), CSV_HEADER.join(","));
    }

    #[test]
    fn test_rows_are_rounded_and_chronological() {
        let project = project_with(&["first", "second"]);
        let csv = export_to_string(&project);
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains(",first,"));
        assert!(lines[2].contains(",second,"));
        assert!(lines[1].contains(",8.8,20,0,1,0,1,116.72,188.26,50,200,35,30,25"));
    }

    #[test]
    fn test_labels_with_commas_are_quoted() {
        let project = project_with(&["Splice, north"]);
        let csv = export_to_string(&project);
        assert!(csv.contains("\"Splice, north\""));
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("history.csv");
        let rows = export_history_csv(&project_with(&["a", "b", "c"]), &path).unwrap();
        assert_eq!(rows, 3);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 4);
    }
}
