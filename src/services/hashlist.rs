use crate::cli::HashAlgorithm;
use crate::domain::models::HashListEntry;
use anyhow::Context;
use rust_xlsxwriter::Workbook;
use sha2::{Digest, Sha256};
use std::path::Path;

pub fn digest_file(path: &Path, algorithm: &HashAlgorithm) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(match algorithm {
        HashAlgorithm::Md5 => hex::encode(md5::Md5::digest(&bytes)),
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(&bytes)),
    })
}

/// Hashes every regular file directly inside `folder`, sorted by file name.
pub fn hash_folder(
    folder: &Path,
    algorithm: &HashAlgorithm,
) -> anyhow::Result<Vec<HashListEntry>> {
    let listing = std::fs::read_dir(folder)
        .with_context(|| format!("listing {}", folder.display()))?;
    let mut files = Vec::new();
    for entry in listing {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }
    files.sort();

    files
        .iter()
        .map(|p| {
            Ok(HashListEntry {
                file_name: p
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                hash: digest_file(p, algorithm)?,
            })
        })
        .collect()
}

/// Writes one row per entry: column 1 the file name, column 2 the hash.
pub fn write_hash_list(entries: &[HashListEntry], output: &Path) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (row, e) in entries.iter().enumerate() {
        let row = u32::try_from(row).context("too many files for one worksheet")?;
        sheet.write_string(row, 0, &e.file_name)?;
        sheet.write_string(row, 1, &e.hash)?;
    }
    workbook
        .save(output)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::hash_source::extract_hashes;
    use tempfile::TempDir;

    #[test]
    fn known_digests() {
        let tmp = TempDir::new().expect("temp dir");
        let p = tmp.path().join("hello.txt");
        std::fs::write(&p, "hello").expect("write");
        assert_eq!(
            digest_file(&p, &HashAlgorithm::Md5).expect("md5"),
            "5d41402abc4b2a76b9719d911017c592"
        );
        assert_eq!(
            digest_file(&p, &HashAlgorithm::Sha256).expect("sha256"),
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn generated_list_reads_back_in_name_order() {
        let tmp = TempDir::new().expect("temp dir");
        let samples = tmp.path().join("samples");
        std::fs::create_dir_all(samples.join("nested")).expect("mkdir");
        std::fs::write(samples.join("b.bin"), "bbb").expect("write b");
        std::fs::write(samples.join("a.bin"), "aaa").expect("write a");
        std::fs::write(samples.join("nested/skip.bin"), "zzz").expect("write nested");

        let entries = hash_folder(&samples, &HashAlgorithm::Md5).expect("hash folder");
        let names: Vec<&str> = entries.iter().map(|e| e.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.bin", "b.bin"]);

        let out = tmp.path().join("hashes.xlsx");
        write_hash_list(&entries, &out).expect("write list");
        let hashes = extract_hashes(&out).expect("read back");
        assert_eq!(hashes, vec![entries[0].hash.clone(), entries[1].hash.clone()]);
    }
}
