//! Shared helpers for integration tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

/// Build a gzip-compressed tar archive in memory.
///
/// Entries are (path, contents) pairs; `None` contents produce a directory
/// entry. Paths should include the synthetic wrapper directory, the way
/// hosting services generate project tarballs.
pub fn build_tar_gz(entries: &[(&str, Option<&str>)]) -> Vec<u8> {
    let gz = GzEncoder::new(Vec::new(), Compression::default());
    let mut builder = tar::Builder::new(gz);

    for (path, contents) in entries {
        let mut header = tar::Header::new_gnu();
        match contents {
            Some(body) => {
                header.set_size(body.len() as u64);
                header.set_mode(0o644);
                header.set_entry_type(tar::EntryType::Regular);
                header.set_cksum();
                builder
                    .append_data(&mut header, path, body.as_bytes())
                    .unwrap();
            }
            None => {
                header.set_size(0);
                header.set_mode(0o755);
                header.set_entry_type(tar::EntryType::Directory);
                header.set_cksum();
                builder
                    .append_data(&mut header, path, std::io::empty())
                    .unwrap();
            }
        }
    }

    builder.into_inner().unwrap().finish().unwrap()
}

/// A quickstart-shaped archive wrapped in a commit-qualified directory.
pub fn quickstart_archive() -> Vec<u8> {
    build_tar_gz(&[
        ("tessera-labs-quickstart-9f8e7d6/", None),
        (
            "tessera-labs-quickstart-9f8e7d6/README.md",
            Some("# Quickstart\n"),
        ),
        ("tessera-labs-quickstart-9f8e7d6/src/", None),
        (
            "tessera-labs-quickstart-9f8e7d6/src/main.rs",
            Some("fn main() { println!(\"hello\"); }\n"),
        ),
        (
            "tessera-labs-quickstart-9f8e7d6/docker-compose.yml",
            Some("services: {}\n"),
        ),
    ])
}

/// Snapshot a directory tree as relative path → file contents (directories
/// map to `None`).
pub fn snapshot_tree(root: &Path) -> BTreeMap<String, Option<String>> {
    let mut out = BTreeMap::new();
    walk(root, root, &mut out);
    out
}

fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<String, Option<String>>) {
    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();
        let rel = path
            .strip_prefix(root)
            .unwrap()
            .to_string_lossy()
            .replace('\\', "/");
        if path.is_dir() {
            out.insert(rel, None);
            walk(root, &path, out);
        } else {
            out.insert(rel, Some(fs::read_to_string(&path).unwrap()));
        }
    }
}
