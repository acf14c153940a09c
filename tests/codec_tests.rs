//! Unit tests for the genome codec.

use transport_ga::codec::{decode, encode, Dimensions};
use transport_ga::error::ConfigurationError;

/// Creates a 3 x 5 shipment matrix with distinct entries.
fn create_test_matrix() -> Vec<Vec<f64>> {
    vec![
        vec![0.0, 1.5, 2.0, 3.25, 4.0],
        vec![10.0, 11.0, 12.5, 13.0, 14.0],
        vec![100.0, 0.0, 0.0, 7.75, 3100.0],
    ]
}

#[test]
fn test_encode_is_row_major() {
    let matrix = create_test_matrix();
    let genome = encode(&matrix);

    assert_eq!(genome.len(), 15);
    assert_eq!(&genome[0..5], &matrix[0][..]);
    assert_eq!(&genome[5..10], &matrix[1][..]);
    assert_eq!(genome[14], 3100.0);
}

#[test]
fn test_decode_inverts_encode() {
    let matrix = create_test_matrix();
    let dims = Dimensions::new(3, 5).unwrap();

    assert_eq!(decode(&encode(&matrix), dims), matrix);
}

#[test]
fn test_decode_inverts_encode_for_other_shapes() {
    for (rows, cols) in [(1, 1), (1, 4), (4, 1), (2, 7)] {
        let matrix: Vec<Vec<f64>> = (0..rows)
            .map(|i| (0..cols).map(|j| (i * cols + j) as f64 * 0.5).collect())
            .collect();
        let dims = Dimensions::new(rows, cols).unwrap();

        assert_eq!(decode(&encode(&matrix), dims), matrix);
    }
}

#[test]
fn test_dimension_index_matches_encoding() {
    let matrix = create_test_matrix();
    let genome = encode(&matrix);
    let dims = Dimensions::new(3, 5).unwrap();

    for i in 0..3 {
        for j in 0..5 {
            assert_eq!(genome[dims.index(i, j)], matrix[i][j]);
        }
    }
    assert_eq!(dims.genome_len(), 15);
}

#[test]
fn test_empty_dimensions_are_rejected() {
    assert_eq!(
        Dimensions::new(0, 5),
        Err(ConfigurationError::EmptyDimension("warehouse"))
    );
    assert_eq!(
        Dimensions::new(3, 0),
        Err(ConfigurationError::EmptyDimension("store"))
    );
}
