//! Integration tests: legacy CSV byte layout and write/read round-trip.

use approx::assert_relative_eq;
use ndarray::array;
use riverscope_frame::{
    CoordinateGrid, CsvWriterConfig, IndexOrder, StepFrame, VariableEntry, read_result_csv,
    write_result_csv,
};

fn grid_3x2() -> CoordinateGrid {
    let x = array![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]];
    let y = array![[0.0, 10.0], [0.0, 10.0], [0.0, 10.0]];
    CoordinateGrid::new(x, y).expect("valid grid")
}

#[test]
fn byte_exact_layout_for_3x2_grid() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let grid = grid_3x2();
    let h = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];

    let frame = StepFrame::build(
        1,
        0.0,
        &grid,
        vec![VariableEntry::new("h", h)],
        IndexOrder::ColumnMajor,
    )
    .expect("frame builds");

    let path = write_result_csv(&frame, dir.path(), &CsvWriterConfig::default())
        .expect("write succeeds");
    assert_eq!(path.file_name().unwrap(), "Result_1.csv");

    let bytes = std::fs::read(&path).expect("read back");
    assert_eq!(&bytes[..3], b"\xef\xbb\xbf", "UTF-8 BOM prefix");

    let text = String::from_utf8(bytes[3..].to_vec()).expect("utf-8 body");
    let lines: Vec<&str> = text.lines().collect();

    // 2 header lines + column header + 6 data rows.
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "iRIC output t = 0");
    assert_eq!(lines[1], "3,2");
    assert_eq!(lines[2], "I,J,X,Y,h");
    // Column-major: I varies fastest.
    assert_eq!(lines[3], "1,1,0,0,1");
    assert_eq!(lines[4], "2,1,1,0,3");
    assert_eq!(lines[5], "3,1,2,0,5");
    assert_eq!(lines[6], "1,2,0,10,2");
    assert_eq!(lines[7], "2,2,1,10,4");
    assert_eq!(lines[8], "3,2,2,10,6");
}

#[test]
fn fractional_time_and_custom_template() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let grid = grid_3x2();
    let frame =
        StepFrame::build(42, 1.5, &grid, vec![], IndexOrder::default()).expect("frame builds");

    let config = CsvWriterConfig::default().with_filename_template("Snapshot_{step}.csv");
    let path = write_result_csv(&frame, dir.path(), &config).expect("write succeeds");
    assert_eq!(path.file_name().unwrap(), "Snapshot_42.csv");

    let text = std::fs::read_to_string(&path).expect("read back");
    assert!(text.starts_with("\u{feff}iRIC output t = 1.5\n"));
}

#[test]
fn round_trip_preserves_dims_time_and_values() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let grid = grid_3x2();
    let depth = array![[0.11, 0.5], [1.25, 2.0], [3.125, 4.75]];
    let zb = array![[-1.5, -1.0], [-0.5, 0.0], [0.5, 1.0]];

    let frame = StepFrame::build(
        3,
        2.25,
        &grid,
        vec![
            VariableEntry::new("Depth", depth.clone()),
            VariableEntry::new("ZB", zb),
        ],
        IndexOrder::ColumnMajor,
    )
    .expect("frame builds");

    let path = write_result_csv(&frame, dir.path(), &CsvWriterConfig::default())
        .expect("write succeeds");
    let parsed = read_result_csv(&path).expect("parse succeeds");

    assert_relative_eq!(parsed.time(), 2.25);
    assert_eq!(parsed.imax(), 3);
    assert_eq!(parsed.jmax(), 2);
    assert_eq!(
        parsed.columns(),
        &["I", "J", "X", "Y", "Depth", "ZB"].map(String::from)
    );
    assert_eq!(parsed.rows().len(), 6);

    let read_depth = parsed.column("Depth").expect("Depth column present");
    // Column-major ravel of the source array.
    let expected = [0.11, 1.25, 3.125, 0.5, 2.0, 4.75];
    for (got, want) in read_depth.iter().zip(expected) {
        assert_relative_eq!(*got, want);
    }

    let i = parsed.column("I").expect("I column present");
    assert_eq!(i, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0]);
}

#[test]
fn reader_rejects_bad_time_line() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("Result_1.csv");
    std::fs::write(&path, "not a time line\n3,2\nI,J,X,Y\n").expect("write fixture");

    let err = read_result_csv(&path).unwrap_err();
    assert!(err.to_string().contains("bad time line"));
}

#[test]
fn reader_tolerates_malformed_dims_line() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("Result_1.csv");
    std::fs::write(
        &path,
        "iRIC output t = 5\ngarbage\nI,J,X,Y\n1,1,0,0\n",
    )
    .expect("write fixture");

    let parsed = read_result_csv(&path).expect("parse succeeds");
    assert_relative_eq!(parsed.time(), 5.0);
    assert_eq!((parsed.imax(), parsed.jmax()), (0, 0));
    assert_eq!(parsed.rows().len(), 1);
}
