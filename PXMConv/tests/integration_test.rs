use pxmconv::formats::pxm::parse_pxm_bytes;
use pxmconv::formats::qlp::{write_qlp, write_qlp_bytes};
use pxmconv::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write_files(dir: &Path, payloads: &[Vec<u8>]) -> Vec<PathBuf> {
    payloads
        .iter()
        .enumerate()
        .map(|(i, data)| {
            let path = dir.join(format!("input_{i}.bin"));
            fs::write(&path, data).unwrap();
            path
        })
        .collect()
}

fn legacy(entries: &[(&str, Vec<u8>)]) -> QlpArchive {
    entries.iter().map(|(name, data)| (*name, data.clone())).collect()
}

fn sample_payloads(count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| (0..(i * 3 + 1) as u8).map(|b| b.wrapping_mul(31).wrapping_add(i as u8)).collect())
        .collect()
}

#[test]
fn test_pack_then_extract_round_trip() {
    for count in [0, 1, 2, 5] {
        let dir = tempdir().unwrap();
        let payloads = sample_payloads(count);
        let inputs = write_files(dir.path(), &payloads);
        let pxm = dir.path().join("packed.pxm");

        let records = PxmOperations::create(&pxm, &inputs).unwrap();
        assert_eq!(records.len(), count);

        let outputs: Vec<PathBuf> = (0..count)
            .map(|i| dir.path().join(format!("output_{i}.bin")))
            .collect();
        let written = PxmOperations::extract(&pxm, &outputs).unwrap();
        assert_eq!(written, outputs);

        for (path, expected) in outputs.iter().zip(&payloads) {
            assert_eq!(&fs::read(path).unwrap(), expected);
        }
    }
}

#[test]
fn test_packed_offsets_are_word_aligned() {
    let dir = tempdir().unwrap();
    let payloads: Vec<Vec<u8>> = [1usize, 2, 3, 4, 5, 8, 13]
        .iter()
        .map(|&n| vec![0x5A; n])
        .collect();
    let inputs = write_files(dir.path(), &payloads);
    let pxm = dir.path().join("aligned.pxm");

    let records = PxmOperations::create(&pxm, &inputs).unwrap();
    assert_eq!(records[0].offset, 8 + 8 * 7);

    for pair in records.windows(2) {
        let gap = u64::from(pair[1].offset) - pair[0].end();
        assert!(gap < 4);
        assert_eq!(pair[1].offset % 4, 0);
    }
    assert_eq!(PxmOperations::list(&pxm).unwrap(), records);
}

#[test]
fn test_extract_falls_back_to_numbered_names() {
    let dir = tempdir().unwrap();
    let pxm = dir.path().join("model.pxm");
    let bytes = pxmconv::formats::pxm::write_pxm_bytes(&[b"one".as_slice(), b"two", b"three"]).unwrap();
    fs::write(&pxm, bytes).unwrap();

    let first = dir.path().join("first.bin");
    let written = PxmOperations::extract(&pxm, std::slice::from_ref(&first)).unwrap();

    let second = dir.path().join("model.pxm_1");
    let third = dir.path().join("model.pxm_2");
    assert_eq!(written, vec![first.clone(), second.clone(), third.clone()]);
    assert_eq!(fs::read(first).unwrap(), b"one");
    assert_eq!(fs::read(second).unwrap(), b"two");
    assert_eq!(fs::read(third).unwrap(), b"three");
}

#[test]
fn test_extract_ignores_wrong_magic() {
    let dir = tempdir().unwrap();
    let pxm = dir.path().join("odd.pxm");
    let mut bytes = pxmconv::formats::pxm::write_pxm_bytes(&[b"data".as_slice()]).unwrap();
    bytes[..4].copy_from_slice(b"JUNK");
    fs::write(&pxm, bytes).unwrap();

    let out = dir.path().join("out.bin");
    PxmOperations::extract(&pxm, std::slice::from_ref(&out)).unwrap();
    assert_eq!(fs::read(out).unwrap(), b"data");
}

#[test]
fn test_convert_legacy_file() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("old.pxm");
    let dest = dir.path().join("new.pxm");
    write_qlp(
        &source,
        &legacy(&[("tim", vec![0xA1; 10]), ("vh", vec![0xB2; 5]), ("vb", vec![0xC3; 7])]),
    )
    .unwrap();

    convert_qlp_file(&source, &dest).unwrap();

    assert_eq!(
        PxmOperations::list(&dest).unwrap(),
        vec![PxmRecord { offset: 24, size: 12 }, PxmRecord { offset: 40, size: 10 }]
    );
    let bytes = fs::read(&dest).unwrap();
    assert_eq!(bytes.len(), 50);

    let mut merged = vec![0xB2; 5];
    merged.extend_from_slice(&[0xC3; 7]);
    assert_eq!(parse_pxm_bytes(&bytes).unwrap(), vec![merged, vec![0xA1; 10]]);
}

#[test]
fn test_convert_rejects_wrong_entry_count() {
    let two = legacy(&[("a", vec![1]), ("b", vec![2])]);
    let four = legacy(&[("a", vec![1]), ("b", vec![2]), ("c", vec![3]), ("d", vec![4])]);

    for (archive, count) in [(two, 2), (four, 4)] {
        let dir = tempdir().unwrap();
        let source = dir.path().join("old.pxm");
        let dest = dir.path().join("new.pxm");
        write_qlp(&source, &archive).unwrap();

        let err = convert_qlp_file(&source, &dest).unwrap_err();
        assert!(matches!(err, Error::UnexpectedEntryCount { expected: 3, found } if found == count));
        assert!(!dest.exists());
    }
}

#[test]
fn test_convert_missing_source_writes_nothing() {
    let dir = tempdir().unwrap();
    let dest = dir.path().join("new.pxm");

    let err = convert_qlp_file(dir.path().join("missing.pxm"), &dest).unwrap_err();
    assert!(matches!(err, Error::UnexpectedEntryCount { found: 0, .. }));
    assert!(!dest.exists());
}

#[test]
fn test_convert_in_place_keeps_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.pxm");
    let archive = legacy(&[("tim", vec![1; 4]), ("vh", vec![2; 3]), ("vb", vec![3; 2])]);
    let original = write_qlp_bytes(&archive).unwrap();
    fs::write(&path, &original).unwrap();

    let backup = convert_qlp_in_place(&path, &ConvertOptions::default()).unwrap();

    assert_eq!(backup, dir.path().join("model.pxm.BAK"));
    assert_eq!(fs::read(&backup).unwrap(), original);
    assert_eq!(
        parse_pxm_bytes(&fs::read(&path).unwrap()).unwrap(),
        vec![vec![2, 2, 2, 3, 3], vec![1; 4]]
    );
}

#[test]
fn test_failed_in_place_leaves_only_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.pxm");
    write_qlp(&path, &legacy(&[("only", vec![1, 2, 3])])).unwrap();

    let options = ConvertOptions::new().with_backup_suffix(".old");
    let err = convert_qlp_in_place(&path, &options).unwrap_err();

    assert!(matches!(err, Error::UnexpectedEntryCount { found: 1, .. }));
    assert!(!path.exists());
    assert!(dir.path().join("model.pxm.old").exists());
}

#[test]
fn test_directory_sweep_continues_after_failure() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("stage1").join("models");
    fs::create_dir_all(&nested).unwrap();

    let good = legacy(&[("tim", vec![7; 6]), ("vh", vec![8; 2]), ("vb", vec![9; 2])]);
    let bad = legacy(&[("tim", vec![7; 6])]);
    write_qlp(dir.path().join("a.pxm"), &good).unwrap();
    write_qlp(nested.join("b.PXM"), &good).unwrap();
    write_qlp(nested.join("c.pxm"), &bad).unwrap();
    fs::write(nested.join("notes.txt"), b"not a container").unwrap();

    let files = find_pxm_files(dir.path()).unwrap();
    assert_eq!(files.len(), 3);

    let result = convert_directory(dir.path(), &ConvertOptions::default()).unwrap();
    assert_eq!(result.success_count, 2);
    assert_eq!(result.fail_count, 1);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].0, nested.join("c.pxm"));

    let converted = parse_pxm_bytes(&fs::read(dir.path().join("a.pxm")).unwrap()).unwrap();
    assert_eq!(converted, vec![vec![8, 8, 9, 9], vec![7; 6]]);
    assert!(nested.join("b.PXM.BAK").exists());
    assert!(nested.join("c.pxm.BAK").exists());
    assert!(!nested.join("c.pxm").exists());
}

#[test]
fn test_directory_sweep_missing_dir() {
    let dir = tempdir().unwrap();
    assert!(find_pxm_files(dir.path().join("nope")).is_err());
}

#[test]
fn test_second_sweep_keeps_legacy_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.pxm");
    let backup = dir.path().join("model.pxm.BAK");
    let archive = legacy(&[("tim", vec![1; 4]), ("vh", vec![2; 3]), ("vb", vec![3; 2])]);
    let original = write_qlp_bytes(&archive).unwrap();
    fs::write(&path, &original).unwrap();

    let first = convert_directory(dir.path(), &ConvertOptions::default()).unwrap();
    assert_eq!((first.success_count, first.fail_count), (1, 0));
    let converted = fs::read(&path).unwrap();

    let second = convert_directory(dir.path(), &ConvertOptions::default()).unwrap();
    assert_eq!((second.success_count, second.fail_count), (0, 1));
    assert_eq!(second.errors[0].0, path);

    assert_eq!(fs::read(&backup).unwrap(), original);
    assert_eq!(fs::read(&path).unwrap(), converted);
}

#[test]
fn test_in_place_refuses_existing_backup() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("model.pxm");
    let backup = dir.path().join("model.pxm.BAK");
    fs::write(&path, b"current").unwrap();
    fs::write(&backup, b"older").unwrap();

    let err = convert_qlp_in_place(&path, &ConvertOptions::default()).unwrap_err();

    assert!(matches!(err, Error::BackupExists(ref p) if *p == backup));
    assert_eq!(fs::read(&path).unwrap(), b"current");
    assert_eq!(fs::read(&backup).unwrap(), b"older");
}

#[cfg(unix)]
#[test]
fn test_sweep_skips_dangling_link() {
    let dir = tempdir().unwrap();
    let good = dir.path().join("good.pxm");
    write_qlp(&good, &legacy(&[("tim", vec![1; 4]), ("vh", vec![2]), ("vb", vec![3])])).unwrap();
    std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("stale")).unwrap();

    assert_eq!(find_pxm_files(dir.path()).unwrap(), vec![good.clone()]);

    let result = convert_directory(dir.path(), &ConvertOptions::default()).unwrap();
    assert_eq!((result.success_count, result.fail_count), (1, 0));
    assert!(dir.path().join("good.pxm.BAK").exists());
    assert_eq!(
        parse_pxm_bytes(&fs::read(&good).unwrap()).unwrap(),
        vec![vec![2, 3], vec![1; 4]]
    );
}

#[test]
fn test_extract_truncated_directory_writes_nothing() {
    let dir = tempdir().unwrap();
    let pxm = dir.path().join("short.pxm");
    let mut bytes = pxmconv::formats::pxm::write_pxm_bytes(&[b"abcd".as_slice()]).unwrap();
    bytes[4] = 3;
    bytes.truncate(16);
    fs::write(&pxm, bytes).unwrap();

    assert!(matches!(PxmOperations::extract(&pxm, &[]), Err(Error::Io(_))));
    assert!(!dir.path().join("short.pxm_0").exists());
}
