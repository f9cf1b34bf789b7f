//! Integration tests for the float decorator over real files

use pcmwave::{Error, FloatWave, SampleStream, WaveBuilder, WaveFile};
use tempfile::TempDir;

mod common;

#[test]
fn test_decorate_selects_variant_by_bit_depth() {
    let dir = TempDir::new().unwrap();

    let wave = WaveFile::create(dir.path().join("8.wav"), 1, 44100, 8).unwrap();
    assert_eq!(FloatWave::decorate(wave).unwrap().bits_per_sample(), 8);

    let wave = WaveFile::create(dir.path().join("16.wav"), 1, 44100, 16).unwrap();
    assert_eq!(FloatWave::decorate(wave).unwrap().bits_per_sample(), 16);
}

#[test]
fn test_decorator_is_debug_printable() {
    let dir = TempDir::new().unwrap();
    let wave = WaveFile::create(dir.path().join("dbg.wav"), 1, 44100, 8).unwrap();
    let float = FloatWave::decorate(wave).unwrap();
    assert!(format!("{:?}", float).contains("FloatWave"));
}

#[test]
fn test_decorate_unmapped_bit_depth_fails() {
    let dir = TempDir::new().unwrap();
    let wave = WaveFile::create(dir.path().join("32.wav"), 1, 44100, 32).unwrap();
    let err = FloatWave::decorate(wave).unwrap_err();
    assert!(matches!(err, Error::FloatDecoratorNotFound(32)));
}

#[test]
fn test_variant_constructor_checks_bit_depth() {
    let dir = TempDir::new().unwrap();
    let wave = WaveFile::create(dir.path().join("16.wav"), 1, 44100, 16).unwrap();
    let err = FloatWave::new_8bit(wave).unwrap_err();
    assert!(matches!(
        err,
        Error::NotApplicableBitPerSample {
            expected: 8,
            actual: 16
        }
    ));
}

#[test]
fn test_8bit_boundary_writes_hit_exact_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bounds8.wav");

    let mut wave = WaveBuilder::new()
        .channels(1)
        .bits_per_sample(8)
        .create_float(&path)
        .unwrap();
    wave.write_frame(&[-1.0]).unwrap();
    wave.write_frame(&[0.0]).unwrap();
    wave.write_frame(&[1.0]).unwrap();
    wave.close().unwrap();

    assert_eq!(common::read_payload(&path), vec![0x00, 0x80, 0xff]);
}

#[test]
fn test_16bit_boundary_writes_hit_exact_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bounds16.wav");

    let mut wave = WaveBuilder::new().channels(1).create_float(&path).unwrap();
    wave.write_frame(&[0.0]).unwrap();
    wave.write_frame(&[0.5]).unwrap();
    wave.write_frame(&[1.0]).unwrap();
    wave.write_frame(&[-0.5]).unwrap();
    wave.write_frame(&[-1.0]).unwrap();
    wave.close().unwrap();

    assert_eq!(
        common::read_payload(&path),
        vec![
            0x00, 0x00, // 0.0 -> 0
            0x00, 0x40, // 0.5 -> 16384
            0xff, 0x7f, // 1.0 clamps to 32767
            0x00, 0xc0, // -0.5 -> 49152
            0x00, 0x80, // -1.0 clamps to 32768, the signed minimum
        ]
    );
}

#[test]
fn test_reads_convert_raw_payload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("read8.wav");
    common::write_raw_wav(&path, 1, 44100, 8, &[0, 64, 128, 192]);

    let mut wave = FloatWave::decorate(WaveFile::open(&path).unwrap()).unwrap();
    assert_eq!(wave.read_frame().unwrap(), vec![-1.0]);
    assert_eq!(wave.read_frame().unwrap(), vec![-0.5]);
    assert_eq!(wave.read_frame().unwrap(), vec![0.0]);
    assert_eq!(wave.read_frame().unwrap(), vec![0.5]);
}

#[test]
fn test_float_round_trip_through_file() {
    let dir = TempDir::new().unwrap();
    let source = dir.path().join("source.wav");
    let copy = dir.path().join("copy.wav");

    let payload = [0u8, 1, 5, 127, 128, 129, 254, 255];
    common::write_raw_wav(&source, 1, 44100, 8, &payload);

    let mut reader = FloatWave::decorate(WaveFile::open(&source).unwrap()).unwrap();
    let mut writer = WaveBuilder::new()
        .channels(1)
        .bits_per_sample(8)
        .create_float(&copy)
        .unwrap();

    let frames: Vec<Vec<f64>> = reader
        .frames(0)
        .unwrap()
        .map(|item| item.map(|(_, frame)| frame))
        .collect::<pcmwave::Result<_>>()
        .unwrap();
    writer.write_frames(frames).unwrap();
    writer.close().unwrap();

    // normalization is reversible: the copied payload is bit-identical
    assert_eq!(common::read_payload(&copy), payload);
}

#[test]
fn test_stream_yields_converted_frames_in_order() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("stream.wav");
    common::write_raw_wav(&path, 2, 44100, 8, &[128, 128, 192, 64]);

    let mut wave = FloatWave::decorate(WaveFile::open(&path).unwrap()).unwrap();
    let streamed: Vec<(u64, Vec<f64>)> = wave
        .frames(0)
        .unwrap()
        .collect::<pcmwave::Result<_>>()
        .unwrap();
    assert_eq!(
        streamed,
        vec![(0, vec![0.0, 0.0]), (1, vec![0.5, -0.5])]
    );
}

#[test]
fn test_indexed_access_and_peek_convert() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("indexed.wav");
    common::write_raw_wav(&path, 1, 44100, 8, &[64, 192]);

    let mut wave = FloatWave::decorate(WaveFile::open(&path).unwrap()).unwrap();
    assert_eq!(wave.frame_at(1).unwrap(), vec![0.5]);
    assert_eq!(wave.position().unwrap(), 0);
    assert_eq!(wave.current_frame().unwrap(), vec![-0.5]);
    assert_eq!(wave.position().unwrap(), 0);

    wave.set_frame_at(0, &[1.0]).unwrap();
    assert_eq!(wave.frame_at(0).unwrap(), vec![255.0 / 128.0 - 1.0]);

    assert!(wave.has_frame(1).unwrap());
    assert!(!wave.has_frame(2).unwrap());
}

#[test]
fn test_decorator_passes_format_and_lifecycle_through() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("delegate.wav");

    let mut wave = WaveBuilder::new()
        .channels(2)
        .sample_rate(48000)
        .create_float(&path)
        .unwrap();
    assert!(wave.is_writable());
    assert_eq!(wave.channels(), 2);
    assert_eq!(wave.sample_rate(), 48000);
    assert_eq!(wave.bytes_per_second(), 192000);
    assert_eq!(wave.frame_size(), 4);
    assert_eq!(wave.bytes_per_sample(), 2);

    wave.write_frame(&[0.25, -0.25]).unwrap();
    wave.save().unwrap();
    assert_eq!(common::read_u32_at(&path, 0x28), 4);

    wave.close().unwrap();
    wave.close().unwrap();
    assert!(matches!(wave.read_frame().unwrap_err(), Error::FileClosed));
}
