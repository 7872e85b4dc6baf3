use pltq::core::compression::{bundle, Tables};
use pltq::{
    read_archive, read_quantized, write_archive, write_quantized, ArchiveReader, ArchiveWriter,
    Descriptor, QuantConfig, QuantError, Quantizer,
};
use std::fs;
use std::io::{Cursor, Read};

fn max_abs_error(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[test]
fn test_three_point_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_quantized(&[vec![0.0f64, 5.0, 10.0]], dir.path(), "s.zip", 256).unwrap();

    let batch = read_archive(&path, 256).unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].descriptor, Descriptor::new(3, 0.0, 10.0).unwrap());
    assert_eq!(batch[0].levels, vec![0, 128, 255]);

    let values = read_quantized(&path, 256).unwrap();
    assert!(max_abs_error(&values[0], &[0.0, 5.0, 10.0]) <= 10.0 / 255.0);
}

#[test]
fn test_order_preserved_for_various_sizes() {
    let dir = tempfile::tempdir().unwrap();

    for n in [0usize, 1, 7] {
        // Each series is flat at its own index, so order is visible after decode
        let series: Vec<Vec<f64>> = (0..n).map(|i| vec![i as f64; i + 1]).collect();
        let name = format!("order_{}.zip", n);
        let path = write_quantized(&series, dir.path(), &name, 256).unwrap();

        let restored = read_quantized(&path, 256).unwrap();
        assert_eq!(restored, series);
    }
}

#[test]
fn test_custom_resolution_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let config = QuantConfig {
        num_levels: 4096,
        compression_level: Some(9),
    };
    let writer = ArchiveWriter::new(&config).unwrap();

    let series: Vec<Vec<f64>> = vec![
        (0..500).map(|i| (i as f64 * 0.05).sin() * 3.0).collect(),
        (0..50).map(|i| i as f64 * 1.5 - 20.0).collect(),
    ];
    let path = writer.write_series(&series, dir.path(), "hi.zip").unwrap();

    let reader = ArchiveReader::open(&path, config.num_levels).unwrap();
    for (i, original) in series.iter().enumerate() {
        let d = reader.descriptor(i).expect("descriptor present");
        let step = (d.max - d.min) / 4095.0;
        let restored = reader.reconstruct(i).unwrap();
        assert_eq!(restored.len(), original.len());
        assert!(max_abs_error(&restored, original) <= step + 1e-4);
    }
}

#[test]
fn test_archive_entries_match_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_quantized(
        &[vec![1.0f64, 2.0], vec![-0.5, 1.0, 4.0]],
        dir.path(),
        "fmt.zip",
        256,
    )
    .unwrap();

    let mut archive = zip::ZipArchive::new(Cursor::new(fs::read(&path).unwrap())).unwrap();
    assert_eq!(archive.len(), 2);

    let mut metadata = String::new();
    archive
        .by_name("metadata.csv")
        .unwrap()
        .read_to_string(&mut metadata)
        .unwrap();
    assert_eq!(metadata, "length,min,max\r\n2,1,2\r\n3,-0.5,4\r\n");

    let mut data = String::new();
    archive
        .by_name("quantized.csv")
        .unwrap()
        .read_to_string(&mut data)
        .unwrap();
    assert_eq!(data, "0,255\r\n0,85,255\r\n");
}

#[test]
fn test_truncated_data_table_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("short.zip");
    let tables = Tables {
        metadata: "length,min,max\r\n2,0,1\r\n2,0,1\r\n".to_string(),
        data: "0,255\r\n".to_string(),
    };
    fs::write(&path, bundle(&tables, None).unwrap()).unwrap();

    assert!(matches!(
        read_archive(&path, 256),
        Err(QuantError::CorruptArchive(_))
    ));
}

#[test]
fn test_oversized_declared_length_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huge.zip");

    for length in ["18446744073709551615", "100000000000"] {
        let tables = Tables {
            metadata: format!("length,min,max\n{},0,1\n", length),
            data: "0,1\n".to_string(),
        };
        fs::write(&path, bundle(&tables, None).unwrap()).unwrap();

        assert!(matches!(
            read_archive(&path, 256),
            Err(QuantError::CorruptArchive(_))
        ));
    }
}

#[test]
fn test_extra_data_columns_are_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wide.zip");
    let tables = Tables {
        metadata: "length,min,max\n2,0,10\n".to_string(),
        data: "0,255,17,not-a-number\n".to_string(),
    };
    fs::write(&path, bundle(&tables, None).unwrap()).unwrap();

    let values = read_quantized(&path, 256).unwrap();
    assert_eq!(values, vec![vec![0.0, 10.0]]);
}

#[test]
fn test_non_numeric_field_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nan.zip");
    let tables = Tables {
        metadata: "length,min,max\n2,0,ten\n".to_string(),
        data: "0,255\n".to_string(),
    };
    fs::write(&path, bundle(&tables, None).unwrap()).unwrap();

    assert!(matches!(
        ArchiveReader::open(&path, 256),
        Err(QuantError::CorruptArchive(_))
    ));
}

#[test]
fn test_garbage_file_is_corrupt() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("junk.zip");
    fs::write(&path, b"length,min,max\n1,0,1\n").unwrap();

    assert!(matches!(
        read_archive(&path, 256),
        Err(QuantError::CorruptArchive(_))
    ));
}

#[test]
fn test_write_then_read_batch_directly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("batch.zip");
    let q = Quantizer::default();
    let batch = q
        .encode_all(&[vec![3.0f64, 1.0, 2.0], vec![7.5]])
        .unwrap();

    write_archive(&batch, &path).unwrap();
    assert_eq!(read_archive(&path, 256).unwrap(), batch);
}
