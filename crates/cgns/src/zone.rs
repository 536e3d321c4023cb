//! Zone-level discovery: coordinates, solution groups, variables.

use std::path::PathBuf;
use std::sync::LazyLock;

use ndarray::Array2;
use regex::Regex;
use riverscope_frame::CoordinateGrid;
use tracing::debug;

use crate::error::CgnsError;
use crate::node::{Node, decode_name_table};

/// Trailing integer of a solution-group name, for numeric ordering.
static TRAILING_INT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)$").expect("valid regex"));

/// Marker node inside a solution group; not a field variable.
const GRID_LOCATION: &str = "GridLocation";

/// A raw variable node discovered under one solution group.
///
/// `array` is populated only for readable 2-D payloads; the shape is kept
/// either way so shape-mismatch exclusions can be reported.
#[derive(Debug)]
pub struct SolutionVariable {
    /// Variable name (the node name).
    pub name: String,
    /// Payload shape as stored.
    pub shape: Vec<usize>,
    /// The payload, when it is a readable 2-D array.
    pub array: Option<Array2<f64>>,
}

/// A reference into the open container pinned at one named zone.
#[derive(Debug)]
pub struct Zone {
    group: hdf5::Group,
    zone_path: String,
    file_path: PathBuf,
}

impl Zone {
    pub(crate) fn new(group: hdf5::Group, zone_path: String, file_path: PathBuf) -> Self {
        Self {
            group,
            zone_path,
            file_path,
        }
    }

    /// Zone path inside the container (no leading slash).
    pub fn path(&self) -> &str {
        &self.zone_path
    }

    /// Read the zone's coordinate grid.
    ///
    /// Requires both `GridCoordinates/CoordinateX` and `CoordinateY`, of
    /// equal shape.
    ///
    /// # Errors
    ///
    /// Returns [`CgnsError::MissingCoordinates`] when either array is
    /// absent, unreadable, or the two shapes disagree. Conversion cannot
    /// proceed without a grid.
    pub fn coordinates(&self) -> Result<CoordinateGrid, CgnsError> {
        let x = self.read_coordinate("CoordinateX")?;
        let y = self.read_coordinate("CoordinateY")?;
        CoordinateGrid::new(x, y).map_err(|e| CgnsError::MissingCoordinates {
            path: self.file_path.clone(),
            reason: e.to_string(),
        })
    }

    fn read_coordinate(&self, name: &str) -> Result<Array2<f64>, CgnsError> {
        let coords = self
            .group
            .group("GridCoordinates")
            .map_err(|_| self.missing_coordinates("no GridCoordinates node"))?;
        Node::open(&coords, name)
            .and_then(|n| n.read_2d())
            .map_err(|e| self.missing_coordinates(&e.to_string()))
    }

    fn missing_coordinates(&self, reason: &str) -> CgnsError {
        CgnsError::MissingCoordinates {
            path: self.file_path.clone(),
            reason: reason.to_string(),
        }
    }

    /// Ordered solution-group names, one per step.
    ///
    /// Reads the `ZoneIterativeData/FlowSolutionPointers` character table;
    /// when that node is absent or undecodable, falls back to scanning the
    /// zone's children for `FlowSolution*` groups sorted by trailing
    /// integer (so `FlowSolution10` follows `FlowSolution9`), then by
    /// lowercased name. May legitimately be empty.
    ///
    /// # Errors
    ///
    /// Returns [`CgnsError::Hdf5`] only when listing the zone's children
    /// fails outright.
    pub fn solution_names(&self) -> Result<Vec<String>, CgnsError> {
        match self.pointer_names() {
            Ok(names) if !names.is_empty() => return Ok(names),
            Ok(_) => {}
            Err(e) => {
                debug!(
                    zone = %self.zone_path,
                    error = %e,
                    "FlowSolutionPointers unreadable; scanning zone children"
                );
            }
        }
        self.scan_solution_groups()
    }

    /// Names from the `FlowSolutionPointers` table.
    fn pointer_names(&self) -> Result<Vec<String>, CgnsError> {
        let iterative = self
            .group
            .group("ZoneIterativeData")
            .map_err(|_| CgnsError::MissingNode {
                node: format!("{}/ZoneIterativeData", self.zone_path),
            })?;
        let node = Node::open(&iterative, "FlowSolutionPointers")?;
        decode_name_table(&node)
    }

    /// Fallback scan over the zone's children.
    fn scan_solution_groups(&self) -> Result<Vec<String>, CgnsError> {
        let mut names: Vec<String> = self
            .group
            .member_names()?
            .into_iter()
            .filter(|n| n.to_lowercase().starts_with("flowsolution"))
            .filter(|n| self.group.group(n).is_ok())
            .collect();
        names.sort_by_key(|n| solution_sort_key(n));
        Ok(names)
    }

    /// Variable node names under one solution group, excluding the
    /// `GridLocation` marker. Cheap: no payloads are read.
    ///
    /// # Errors
    ///
    /// Returns [`CgnsError::MissingNode`] when the solution group itself is
    /// absent.
    pub fn solution_variable_names(&self, solution: &str) -> Result<Vec<String>, CgnsError> {
        let group = self
            .group
            .group(solution)
            .map_err(|_| CgnsError::MissingNode {
                node: format!("{}/{solution}", self.zone_path),
            })?;
        Ok(group
            .member_names()?
            .into_iter()
            .filter(|n| n != GRID_LOCATION)
            .collect())
    }

    /// Raw variable nodes under one solution group, excluding the
    /// `GridLocation` marker.
    ///
    /// A node whose payload is missing or unreadable is skipped outright
    /// (logged at debug level); a readable payload of any shape is
    /// returned, and the caller applies the shape-inclusion policy.
    ///
    /// # Errors
    ///
    /// Returns [`CgnsError::MissingNode`] when the solution group itself is
    /// absent.
    pub fn solution_variables(&self, solution: &str) -> Result<Vec<SolutionVariable>, CgnsError> {
        let group = self
            .group
            .group(solution)
            .map_err(|_| CgnsError::MissingNode {
                node: format!("{}/{solution}", self.zone_path),
            })?;

        let mut variables = Vec::new();
        for name in group.member_names()? {
            if name == GRID_LOCATION {
                continue;
            }
            let node = match Node::open(&group, &name) {
                Ok(n) => n,
                Err(e) => {
                    debug!(var = %name, error = %e, "skipping unreadable variable node");
                    continue;
                }
            };
            let Some(shape) = node.payload_shape() else {
                debug!(var = %name, "skipping variable node without payload");
                continue;
            };
            let array = match node.read_2d() {
                Ok(a) => Some(a),
                Err(CgnsError::UnexpectedShape { .. }) => None,
                Err(e) => {
                    debug!(var = %name, error = %e, "skipping variable node: read error");
                    continue;
                }
            };
            variables.push(SolutionVariable { name, shape, array });
        }
        Ok(variables)
    }

    /// The solution group's `GridLocation` label, normalized to uppercase
    /// with spaces removed (e.g. `VERTEX`, `CELLCENTER`). Best-effort;
    /// informational only — field arrays are filtered by shape, which is
    /// what actually excludes cell-centered data.
    pub fn grid_location(&self, solution: &str) -> Option<String> {
        let group = self.group.group(solution).ok()?;

        if let Ok(attr) = group.attr(GRID_LOCATION) {
            if let Ok(value) = attr.read_scalar::<hdf5::types::VarLenAscii>() {
                return normalize_location(value.as_str());
            }
        }

        let node = Node::open(&group, GRID_LOCATION).ok()?;
        let ds = node.payload().ok()?;
        let raw = ds.read_raw::<i8>().ok()?;
        let bytes: Vec<u8> = raw.into_iter().map(|b| b as u8).collect();
        normalize_location(&String::from_utf8_lossy(&bytes))
    }
}

/// Sort key: trailing integer when present, else lowercased name ranked
/// after all numbered entries.
fn solution_sort_key(name: &str) -> (u8, u64, String) {
    if let Some(caps) = TRAILING_INT.captures(name) {
        if let Ok(n) = caps[1].parse::<u64>() {
            return (0, n, name.to_lowercase());
        }
    }
    (1, 0, name.to_lowercase())
}

fn normalize_location(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\0')
        .collect::<String>()
        .to_uppercase();
    if cleaned.is_empty() { None } else { Some(cleaned) }
}
