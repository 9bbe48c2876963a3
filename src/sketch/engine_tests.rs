pub(crate) use super::*;

/// Deterministic pseudo-random source rows with distinct energy.
fn synthetic_rows(n: usize, m: usize) -> Matrix<f32> {
    let data: Vec<f32> = (0..n * m)
        .map(|i| ((i * 2_654_435_761 % 1_000_003) as f32 / 1_000_003.0 - 0.5) * (1.0 + i as f32 / (n * m) as f32))
        .collect();
    Matrix::from_vec(n, m, data).expect("data length equals n*m")
}

#[test]
fn test_output_shape() {
    let a = synthetic_rows(64, 27);
    let b = sketch_rows(&a, 16).expect("valid sketch input");
    assert_eq!(b.shape(), (16, 27));
}

#[test]
fn test_copy_path_when_l_equals_n() {
    // l = n: the buffer fills with the source rows and never shrinks.
    let a = synthetic_rows(64, 27);
    let b = sketch_rows(&a, 64).expect("valid sketch input");
    assert_eq!(b.as_slice(), a.as_slice());
}

#[test]
fn test_l_greater_than_n_pads_with_zero_rows() {
    let a = synthetic_rows(3, 5);
    let b = sketch_rows(&a, 6).expect("valid sketch input");
    assert_eq!(b.shape(), (6, 5));
    for i in 0..3 {
        assert_eq!(b.row_slice(i), a.row_slice(i));
    }
    for i in 3..6 {
        assert!(b.row_norm_sq(i) < 1e-12);
    }
}

#[test]
fn test_shrink_frees_exactly_half() {
    let a = synthetic_rows(8, 12);
    let mut buffer = SketchBuffer::new(8, 12);
    buffer.absorb(&a).expect("column counts match");
    assert_eq!(buffer.occupied(), 8);

    buffer.shrink().expect("full buffer shrinks");
    assert_eq!(buffer.occupied(), 4);
    assert_eq!(buffer.nonzero_rows(), 4);
}

#[test]
fn test_early_stop_drop_count() {
    // l = 4 fills at row 4; the single remaining row is fewer than
    // l/2 = 2, so it is dropped. Lossy by design.
    let a = synthetic_rows(5, 6);
    let mut buffer = SketchBuffer::new(4, 6);
    buffer.absorb(&a).expect("column counts match");
    assert_eq!(buffer.dropped(), 1);
    assert_eq!(buffer.into_matrix().shape(), (4, 6));
}

#[test]
fn test_no_drop_when_rows_divide_evenly() {
    // l = 4, n = 10: fill 4, then shrink cycles absorb the rest.
    let a = synthetic_rows(10, 6);
    let mut buffer = SketchBuffer::new(4, 6);
    buffer.absorb(&a).expect("column counts match");
    assert_eq!(buffer.dropped(), 0);
}

#[test]
fn test_rank_one_direction_preserved() {
    // All rows along one direction: the sketch keeps that row space.
    let dir = [1.0_f32, 2.0, -1.0, 0.5];
    let mut data = Vec::new();
    for i in 0..12 {
        let scale = 1.0 + i as f32 * 0.25;
        data.extend(dir.iter().map(|d| d * scale));
    }
    let a = Matrix::from_vec(12, 4, data).expect("data length equals 12*4");
    let b = sketch_rows(&a, 4).expect("valid sketch input");

    let norm_dir: f32 = dir.iter().map(|x| x * x).sum::<f32>().sqrt();
    for i in 0..4 {
        let row = b.row_slice(i);
        let norm_row = row.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm_row < 1e-5 {
            continue;
        }
        let cos: f32 = row
            .iter()
            .zip(dir.iter())
            .map(|(a, b)| a * b)
            .sum::<f32>()
            / (norm_row * norm_dir);
        assert!(
            cos.abs() > 1.0 - 1e-4,
            "sketch row {i} left the source direction (cos = {cos})"
        );
    }
}

#[test]
fn test_gram_energy_never_exceeds_source() {
    // Frequent Directions never overestimates energy: x^T B^T B x <=
    // x^T A^T A x for every x, checked here on the coordinate axes.
    let a = synthetic_rows(32, 9);
    let b = sketch_rows(&a, 8).expect("valid sketch input");
    for j in 0..9 {
        let col_a: f32 = (0..32).map(|i| a.get(i, j) * a.get(i, j)).sum();
        let col_b: f32 = (0..8).map(|i| b.get(i, j) * b.get(i, j)).sum();
        assert!(
            col_b <= col_a + 1e-3,
            "column {j} energy grew: {col_b} > {col_a}"
        );
    }
}

#[test]
fn test_column_mismatch_rejected() {
    let a = synthetic_rows(4, 5);
    let mut buffer = SketchBuffer::new(4, 6);
    assert!(buffer.absorb(&a).is_err());
}

#[test]
fn test_determinism() {
    let a = synthetic_rows(40, 11);
    let b1 = sketch_rows(&a, 10).expect("valid sketch input");
    let b2 = sketch_rows(&a, 10).expect("valid sketch input");
    assert_eq!(b1.as_slice(), b2.as_slice());
}
