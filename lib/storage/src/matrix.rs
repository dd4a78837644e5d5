use bookrec_core::{Error, Result, SimilarityMatrix};
use std::path::Path;

/// Read a similarity matrix
///
/// `.bin` files hold a bincode `Vec<Vec<f64>>`. Anything else is read as a JSON
/// array of rows, where `null` cells (pandas NaN) become NaN.
pub fn read_matrix(artifact: &str, path: &Path) -> Result<SimilarityMatrix> {
    let bytes = crate::read_artifact(artifact, path)?;
    let is_bincode = path.extension().and_then(|e| e.to_str()) == Some("bin");
    let rows = if is_bincode {
        decode_bincode(artifact, &bytes)?
    } else {
        decode_json(artifact, &bytes)?
    };
    SimilarityMatrix::from_rows(rows)
}

pub fn decode_json(artifact: &str, bytes: &[u8]) -> Result<Vec<Vec<f64>>> {
    let rows: Vec<Vec<Option<f64>>> = serde_json::from_slice(bytes)
        .map_err(|e| Error::Serialization(format!("{}: {}", artifact, e)))?;
    Ok(rows
        .into_iter()
        .map(|row| row.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
        .collect())
}

pub fn decode_bincode(artifact: &str, bytes: &[u8]) -> Result<Vec<Vec<f64>>> {
    bincode::deserialize(bytes).map_err(|e| Error::Serialization(format!("{}: {}", artifact, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_nulls_become_nan() {
        let rows = decode_json("similarity", b"[[1.0, null], [0.5, 1]]").unwrap();
        assert_eq!(rows[0][0], 1.0);
        assert!(rows[0][1].is_nan());
        assert_eq!(rows[1], vec![0.5, 1.0]);
    }

    #[test]
    fn test_read_bincode_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("score.bin");
        let rows = vec![vec![1.0, 0.25], vec![0.25, 1.0]];
        std::fs::write(&path, bincode::serialize(&rows).unwrap()).unwrap();

        let matrix = read_matrix("similarity", &path).unwrap();
        assert_eq!(matrix.dim(), 2);
        assert_eq!(matrix.get(0, 1), Some(0.25));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_matrix("similarity", &dir.path().join("score.json")).unwrap_err();
        assert!(matches!(err, Error::ArtifactMissing { .. }));
    }
}
