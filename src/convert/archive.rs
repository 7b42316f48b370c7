//! ZIP bundling for multi-file results

use crate::error::Result;
use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Bundle named buffers into a single deflated ZIP archive, preserving order.
pub fn bundle<N, D>(entries: &[(N, D)]) -> Result<Vec<u8>>
where
    N: AsRef<str>,
    D: AsRef<[u8]>,
{
    let mut zip_buffer = Vec::new();
    {
        let mut zip = ZipWriter::new(Cursor::new(&mut zip_buffer));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for (name, data) in entries {
            zip.start_file(name.as_ref(), options)?;
            zip.write_all(data.as_ref())?;
        }
        zip.finish()?;
    }
    Ok(zip_buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_bundle_keeps_order_and_content() {
        let entries = vec![
            ("page_1.png".to_string(), vec![1u8, 2, 3]),
            ("page_2.png".to_string(), vec![4u8, 5]),
        ];
        let archive = bundle(&entries).unwrap();

        let mut reader = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(reader.len(), 2);

        let mut first = reader.by_index(0).unwrap();
        assert_eq!(first.name(), "page_1.png");
        let mut buf = Vec::new();
        first.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, vec![1, 2, 3]);
    }

    #[test]
    fn test_bundle_empty() {
        let entries: Vec<(String, Vec<u8>)> = Vec::new();
        let archive = bundle(&entries).unwrap();
        let reader = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(reader.len(), 0);
    }
}
