//! Typed access to the untyped CGNS node tree.
//!
//! CGNS-on-HDF5 stores a node's payload in a child dataset named `" data"`
//! (leading space included). Field values therefore show up either as a
//! dataset directly under a variable's node or inside that conventional
//! child; discovery ignores every other shape or nesting.

use ndarray::Array2;

use crate::error::CgnsError;

/// Name of the conventional payload dataset under a CGNS group node.
pub(crate) const DATA_CHILD: &str = " data";

/// One node of the tree: HDF5 only exposes groups and datasets.
#[derive(Debug)]
pub enum Node {
    /// A group node; its payload, if any, lives in the `" data"` child.
    Group(hdf5::Group),
    /// A dataset node holding the payload directly.
    Dataset(hdf5::Dataset),
}

impl Node {
    /// Look up `name` under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`CgnsError::MissingNode`] when no dataset or group of that
    /// name exists.
    pub fn open(parent: &hdf5::Group, name: &str) -> Result<Self, CgnsError> {
        if let Ok(ds) = parent.dataset(name) {
            return Ok(Node::Dataset(ds));
        }
        if let Ok(g) = parent.group(name) {
            return Ok(Node::Group(g));
        }
        Err(CgnsError::MissingNode {
            node: format!("{}/{name}", parent.name()),
        })
    }

    /// Absolute path of this node inside the container.
    pub fn path(&self) -> String {
        match self {
            Node::Group(g) => g.name(),
            Node::Dataset(d) => d.name(),
        }
    }

    /// The payload dataset: the dataset itself, or the group's `" data"`
    /// child.
    ///
    /// # Errors
    ///
    /// Returns [`CgnsError::MissingNode`] for a group without the
    /// conventional child.
    pub fn payload(&self) -> Result<hdf5::Dataset, CgnsError> {
        match self {
            Node::Dataset(d) => Ok(d.clone()),
            Node::Group(g) => g.dataset(DATA_CHILD).map_err(|_| CgnsError::MissingNode {
                node: format!("{}/{DATA_CHILD}", g.name()),
            }),
        }
    }

    /// Shape of the payload, when one exists.
    pub fn payload_shape(&self) -> Option<Vec<usize>> {
        self.payload().ok().map(|ds| ds.shape())
    }

    /// Read the payload as a 2-D `f64` array.
    ///
    /// # Errors
    ///
    /// Returns [`CgnsError::UnexpectedShape`] when the payload is not 2-D,
    /// [`CgnsError::MissingNode`] when there is no payload, or
    /// [`CgnsError::Hdf5`] when the raw read fails.
    pub fn read_2d(&self) -> Result<Array2<f64>, CgnsError> {
        let ds = self.payload()?;
        if ds.ndim() != 2 {
            return Err(CgnsError::UnexpectedShape {
                node: self.path(),
                got: ds.shape(),
            });
        }
        Ok(ds.read_2d::<f64>()?)
    }

    /// Read the payload as a 1-D `f64` array.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Node::read_2d`], for 1-D payloads.
    pub fn read_1d(&self) -> Result<Vec<f64>, CgnsError> {
        let ds = self.payload()?;
        if ds.ndim() != 1 {
            return Err(CgnsError::UnexpectedShape {
                node: self.path(),
                got: ds.shape(),
            });
        }
        Ok(ds.read_1d::<f64>()?.to_vec())
    }
}

/// Decode a CGNS int8 character table into trimmed ASCII strings.
///
/// `FlowSolutionPointers` stores one fixed-width row per step; rows are
/// NUL-padded.
pub(crate) fn decode_name_table(node: &Node) -> Result<Vec<String>, CgnsError> {
    let ds = node.payload()?;
    if ds.ndim() != 2 {
        return Err(CgnsError::UnexpectedShape {
            node: node.path(),
            got: ds.shape(),
        });
    }
    let table = ds.read_2d::<i8>()?;
    let names = table
        .rows()
        .into_iter()
        .map(|row| {
            let bytes: Vec<u8> = row.iter().map(|&b| b as u8).collect();
            String::from_utf8_lossy(&bytes)
                .replace('\0', "")
                .trim()
                .to_string()
        })
        .collect();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;
    use tempfile::TempDir;

    fn scratch_file(dir: &TempDir) -> hdf5::File {
        hdf5::File::create(dir.path().join("node_tests.h5")).expect("create hdf5 file")
    }

    #[test]
    fn payload_from_group_data_child() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = scratch_file(&dir);
        let g = file.create_group("CoordinateX").expect("group");
        let arr = Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).expect("array");
        g.new_dataset_builder()
            .with_data(&arr)
            .create(DATA_CHILD)
            .expect("dataset");

        let node = Node::open(&file, "CoordinateX").expect("node exists");
        assert!(matches!(node, Node::Group(_)));
        let read = node.read_2d().expect("payload readable");
        assert_eq!(read, arr);
    }

    #[test]
    fn payload_from_direct_dataset() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = scratch_file(&dir);
        let arr = Array2::from_shape_vec((1, 3), vec![9.0, 8.0, 7.0]).expect("array");
        file.new_dataset_builder()
            .with_data(&arr)
            .create("Depth")
            .expect("dataset");

        let node = Node::open(&file, "Depth").expect("node exists");
        assert!(matches!(node, Node::Dataset(_)));
        assert_eq!(node.read_2d().expect("readable"), arr);
    }

    #[test]
    fn missing_node_is_explicit() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = scratch_file(&dir);
        let err = Node::open(&file, "NoSuchNode").unwrap_err();
        assert!(matches!(err, CgnsError::MissingNode { .. }));
    }

    #[test]
    fn group_without_data_child_has_no_payload() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = scratch_file(&dir);
        file.create_group("Empty").expect("group");
        let node = Node::open(&file, "Empty").expect("node exists");
        assert!(node.payload().is_err());
        assert_eq!(node.payload_shape(), None);
    }

    #[test]
    fn non_2d_payload_is_rejected_with_shape() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = scratch_file(&dir);
        file.new_dataset_builder()
            .with_data([1.0f64, 2.0, 3.0].as_slice())
            .create("OneD")
            .expect("dataset");
        let node = Node::open(&file, "OneD").expect("node exists");
        let err = node.read_2d().unwrap_err();
        match err {
            CgnsError::UnexpectedShape { got, .. } => assert_eq!(got, vec![3]),
            other => panic!("expected UnexpectedShape, got {other:?}"),
        }
    }

    #[test]
    fn name_table_decode_strips_nul_padding() {
        let dir = tempfile::tempdir().expect("temp dir");
        let file = scratch_file(&dir);
        let g = file.create_group("FlowSolutionPointers").expect("group");

        // Two fixed-width rows: "FlowSolution1\0\0\0", "FlowSolution2\0\0\0".
        let width = 16;
        let mut raw = Vec::new();
        for name in ["FlowSolution1", "FlowSolution2"] {
            let mut row = name.as_bytes().to_vec();
            row.resize(width, 0);
            raw.extend(row.into_iter().map(|b| b as i8));
        }
        let table = Array2::from_shape_vec((2, width), raw).expect("table");
        g.new_dataset_builder()
            .with_data(&table)
            .create(DATA_CHILD)
            .expect("dataset");

        let node = Node::open(&file, "FlowSolutionPointers").expect("node exists");
        let names = decode_name_table(&node).expect("decodes");
        assert_eq!(names, vec!["FlowSolution1", "FlowSolution2"]);
    }
}
