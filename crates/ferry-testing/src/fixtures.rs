//! Common test fixtures for ferry testing

use crate::TestDir;
use anyhow::Result;

/// Creates a standard flat sync source: three text files plus a
/// subdirectory and a binary file. Only the four top-level files
/// participate in a sync run; the subdirectory must be ignored.
pub fn create_sync_files(test_dir: &TestDir) -> Result<()> {
    test_dir.create_file("a.txt", b"This is file a.")?;
    test_dir.create_file("b.txt", b"This is file b.")?;
    test_dir.create_file("c.txt", b"This is file c.")?;

    // Binary file (simple image placeholder)
    test_dir.create_file("image.jpg", &[0xFF, 0xD8, 0xFF, 0xE0])?;

    // Nested content that a non-recursive enumeration must skip
    test_dir.create_dir("nested")?;
    test_dir.create_file("nested/ignored.txt", b"Not part of the run.")?;

    Ok(())
}

/// Creates a numbered batch of small files, `item-000.dat` through
/// `item-NNN.dat`, for cadence and ordering tests.
pub fn create_numbered_files(test_dir: &TestDir, count: usize) -> Result<Vec<String>> {
    let mut names = Vec::with_capacity(count);
    for i in 0..count {
        let name = format!("item-{:03}.dat", i);
        test_dir.create_file(&name, format!("payload {}", i).as_bytes())?;
        names.push(name);
    }
    Ok(names)
}
