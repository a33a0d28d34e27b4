use std::fs;
use std::path::Path;

use ahash::AHashMap;
use flate2::{Decompress, FlushDecompress, Status};
use log::{debug, warn};

use crate::{
    errors::ZipError,
    structs::{
        central_directory::CentralDirectory, eocd::EndOfCentralDirectory,
        local_file_header::LocalFileHeader,
    },
};

/// Upper bound for entries whose declared uncompressed size can't be trusted
const MAX_INFLATED_SIZE: usize = 64 * 1024 * 1024;

/// Read-only view of a central directory entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipEntryRo {
    name: String,
    compression_method: u16,
    general_purpose: u16,
    crc32: u32,
    compressed_size: u32,
    uncompressed_size: u32,
    local_header_offset: u32,
}

impl ZipEntryRo {
    pub const STORED: u16 = 0;
    pub const DEFLATED: u16 = 8;

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn compression_method(&self) -> u16 {
        self.compression_method
    }

    #[inline]
    pub fn crc32(&self) -> u32 {
        self.crc32
    }

    #[inline]
    pub fn compressed_size(&self) -> u32 {
        self.compressed_size
    }

    #[inline]
    pub fn uncompressed_size(&self) -> u32 {
        self.uncompressed_size
    }

    /// Offset of the local file header as declared by the central directory
    #[inline]
    pub fn local_header_offset(&self) -> u32 {
        self.local_header_offset
    }

    /// Sizes are written after the data, the local header holds zeros
    #[inline]
    pub fn has_data_descriptor(&self) -> bool {
        self.general_purpose & 0x08 != 0
    }

    #[inline]
    pub fn is_directory(&self) -> bool {
        self.name.ends_with('/')
    }
}

/// Location of an entry's bytes inside the archive buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryFileMap {
    /// Offset of the local file header
    pub local_header_offset: usize,
    /// Offset of the first data byte, after the local header's own name and extra field
    pub data_offset: usize,
    /// Number of stored (possibly compressed) bytes
    pub size: usize,
}

/// Represents a parsed ZIP archive
///
/// Entries are located through the central directory, so padding or
/// unrelated bytes between local entries don't matter.
pub struct ZipArchive {
    input: Vec<u8>,
    entries: Vec<ZipEntryRo>,
    by_name: AHashMap<String, usize>,
}

impl ZipArchive {
    const EOCD_CHUNK_SIZE: usize = 4096;

    /// Read and parse archive from the filesystem
    pub fn open(path: impl AsRef<Path>) -> Result<ZipArchive, ZipError> {
        let input = fs::read(path)?;
        ZipArchive::new(input)
    }

    pub fn new(input: Vec<u8>) -> Result<ZipArchive, ZipError> {
        if input.len() < EndOfCentralDirectory::MIN_SIZE {
            return Err(ZipError::NotFoundEOCD);
        }

        let eocd_offset = EndOfCentralDirectory::find_eocd(&input, Self::EOCD_CHUNK_SIZE)
            .ok_or(ZipError::NotFoundEOCD)?;

        let eocd = EndOfCentralDirectory::parse(&mut &input[eocd_offset..])
            .map_err(|_| ZipError::ParseError)?;

        let central_directory =
            CentralDirectory::parse(&input, &eocd).map_err(|_| ZipError::ParseError)?;

        if central_directory.entries.len() != eocd.total_entries as usize {
            warn!(
                "central directory has {} entries, eocd declares {} ({} on this disk)",
                central_directory.entries.len(),
                eocd.total_entries,
                eocd.entries_on_this_disk
            );
        }

        let entries: Vec<ZipEntryRo> = central_directory
            .entries
            .into_iter()
            .map(|entry| ZipEntryRo {
                name: entry.file_name,
                compression_method: entry.compression_method,
                general_purpose: entry.general_purpose,
                crc32: entry.crc32,
                compressed_size: entry.compressed_size,
                uncompressed_size: entry.uncompressed_size,
                local_header_offset: entry.local_header_offset,
            })
            .collect();

        let mut by_name = AHashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            // first entry wins, like most readers
            by_name.entry(entry.name.clone()).or_insert(index);
        }

        debug!("opened zip archive with {} entries", entries.len());

        Ok(ZipArchive {
            input,
            entries,
            by_name,
        })
    }

    /// Get list of the filenames in central directory order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// All entries in central directory order
    #[inline]
    pub fn entries(&self) -> &[ZipEntryRo] {
        &self.entries
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find_entry_by_name(&self, name: &str) -> Result<&ZipEntryRo, ZipError> {
        self.by_name
            .get(name)
            .map(|&index| &self.entries[index])
            .ok_or_else(|| ZipError::FileNotFound(name.to_owned()))
    }

    /// Locate entry data using the local header at the declared offset
    ///
    /// The local header carries its own name and extra field lengths, which
    /// may differ from the central directory ones.
    pub fn create_entry_file_map(&self, entry: &ZipEntryRo) -> Result<EntryFileMap, ZipError> {
        let local_header_offset = entry.local_header_offset as usize;
        let local_header = LocalFileHeader::parse(&self.input, local_header_offset)
            .map_err(|_| ZipError::ParseError)?;

        if local_header.compression_method != entry.compression_method {
            warn!(
                "{}: local header compression method {} differs from central directory {}",
                entry.name, local_header.compression_method, entry.compression_method
            );
        }

        // with a data descriptor the local sizes are zero
        if local_header.compressed_size != 0
            && !entry.has_data_descriptor()
            && local_header.compressed_size != entry.compressed_size
        {
            warn!(
                "{}: local header size {} differs from central directory {}",
                entry.name, local_header.compressed_size, entry.compressed_size
            );
        }
        let size = entry.compressed_size as usize;

        let data_offset = local_header_offset + local_header.size();
        if data_offset
            .checked_add(size)
            .is_none_or(|end| end > self.input.len())
        {
            return Err(ZipError::EOF);
        }

        debug!(
            "{}: local uncompressed size {}, data at {:#x}",
            entry.name, local_header.uncompressed_size, data_offset
        );

        Ok(EntryFileMap {
            local_header_offset,
            data_offset,
            size,
        })
    }

    /// Raw entry bytes, borrowed from the archive buffer
    pub fn entry_data(&self, map: &EntryFileMap) -> &[u8] {
        self.input
            .get(map.data_offset..map.data_offset.saturating_add(map.size))
            .unwrap_or_default()
    }

    /// Read and decompress file from zip archive
    pub fn read(&self, name: &str) -> Result<Vec<u8>, ZipError> {
        let entry = self.find_entry_by_name(name)?;
        let map = self.create_entry_file_map(entry)?;
        let data = self.entry_data(&map);

        match entry.compression_method {
            ZipEntryRo::STORED => Ok(data.to_vec()),
            ZipEntryRo::DEFLATED => {
                let mut uncompressed_data = Vec::with_capacity(entry.uncompressed_size as usize);

                let status = Decompress::new(false)
                    .decompress_vec(data, &mut uncompressed_data, FlushDecompress::Finish)
                    .map_err(|_| ZipError::DecompressionError)?;

                match status {
                    Status::StreamEnd => Ok(uncompressed_data),
                    // ran out of space, the declared size is wrong
                    _ => {
                        warn!("{name}: declared uncompressed size is too small");
                        Self::inflate_with_limit(data, MAX_INFLATED_SIZE)
                    }
                }
            }
            method => Err(ZipError::UnsupportedCompression(method)),
        }
    }

    /// Inflate without trusting the declared size, up to `limit` output bytes
    fn inflate_with_limit(data: &[u8], limit: usize) -> Result<Vec<u8>, ZipError> {
        let mut decompressor = Decompress::new(false);
        let mut output = Vec::with_capacity(data.len().saturating_mul(2).max(4096).min(limit));

        loop {
            // one spare byte past the limit tells a full stream from an oversized one
            if output.len() > limit {
                warn!("inflated data exceeds {limit} bytes, giving up");
                return Err(ZipError::DecompressionError);
            }
            if output.len() == output.capacity() {
                let grow = output.capacity().max(4096).min(limit + 1 - output.len());
                output.reserve_exact(grow);
            }

            let consumed = decompressor.total_in() as usize;
            let input = data.get(consumed..).ok_or(ZipError::EOF)?;
            let before = (decompressor.total_in(), decompressor.total_out());

            let status = decompressor
                .decompress_vec(input, &mut output, FlushDecompress::None)
                .map_err(|_| ZipError::DecompressionError)?;

            match status {
                Status::StreamEnd if output.len() <= limit => return Ok(output),
                Status::StreamEnd => {}
                _ if (decompressor.total_in(), decompressor.total_out()) == before
                    && output.len() < output.capacity() =>
                {
                    // no progress with room left: truncated stream
                    return Err(ZipError::DecompressionError);
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::Compression;
    use flate2::write::DeflateEncoder;

    use super::*;

    struct TestEntry<'a> {
        name: &'a str,
        data: Vec<u8>,
        method: u16,
        uncompressed_size: u32,
        /// bytes inserted before the local header
        gap: usize,
        /// extra field only present in the local header
        local_extra: usize,
    }

    impl<'a> TestEntry<'a> {
        fn stored(name: &'a str, data: &[u8]) -> Self {
            TestEntry {
                name,
                data: data.to_vec(),
                method: ZipEntryRo::STORED,
                uncompressed_size: data.len() as u32,
                gap: 0,
                local_extra: 0,
            }
        }

        fn deflated(name: &'a str, data: &[u8]) -> Self {
            let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
            encoder.write_all(data).unwrap();

            TestEntry {
                name,
                data: encoder.finish().unwrap(),
                method: ZipEntryRo::DEFLATED,
                uncompressed_size: data.len() as u32,
                gap: 0,
                local_extra: 0,
            }
        }
    }

    fn build_archive(entries: &[TestEntry]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut central = Vec::new();

        for entry in entries {
            out.extend(std::iter::repeat_n(0xAAu8, entry.gap));
            let offset = out.len() as u32;

            out.extend_from_slice(&0x04034b50u32.to_le_bytes());
            out.extend_from_slice(&20u16.to_le_bytes()); // version needed
            out.extend_from_slice(&0u16.to_le_bytes()); // flags
            out.extend_from_slice(&entry.method.to_le_bytes());
            out.extend_from_slice(&[0u8; 4]); // time + date
            out.extend_from_slice(&0u32.to_le_bytes()); // crc32
            out.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
            out.extend_from_slice(&entry.uncompressed_size.to_le_bytes());
            out.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
            out.extend_from_slice(&(entry.local_extra as u16).to_le_bytes());
            out.extend_from_slice(entry.name.as_bytes());
            out.extend(std::iter::repeat_n(0u8, entry.local_extra));
            out.extend_from_slice(&entry.data);

            central.extend_from_slice(&0x02014b50u32.to_le_bytes());
            central.extend_from_slice(&20u16.to_le_bytes()); // version made by
            central.extend_from_slice(&20u16.to_le_bytes()); // version needed
            central.extend_from_slice(&0u16.to_le_bytes()); // flags
            central.extend_from_slice(&entry.method.to_le_bytes());
            central.extend_from_slice(&[0u8; 4]); // time + date
            central.extend_from_slice(&0u32.to_le_bytes()); // crc32
            central.extend_from_slice(&(entry.data.len() as u32).to_le_bytes());
            central.extend_from_slice(&entry.uncompressed_size.to_le_bytes());
            central.extend_from_slice(&(entry.name.len() as u16).to_le_bytes());
            central.extend_from_slice(&0u16.to_le_bytes()); // extra
            central.extend_from_slice(&0u16.to_le_bytes()); // comment
            central.extend_from_slice(&0u16.to_le_bytes()); // disk
            central.extend_from_slice(&0u16.to_le_bytes()); // internal attrs
            central.extend_from_slice(&0u32.to_le_bytes()); // external attrs
            central.extend_from_slice(&offset.to_le_bytes());
            central.extend_from_slice(entry.name.as_bytes());
        }

        let central_offset = out.len() as u32;
        out.extend_from_slice(&central);

        out.extend_from_slice(&0x06054b50u32.to_le_bytes());
        out.extend_from_slice(&[0u8; 4]); // disk numbers
        out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
        out.extend_from_slice(&(central.len() as u32).to_le_bytes());
        out.extend_from_slice(&central_offset.to_le_bytes());
        out.extend_from_slice(&0u16.to_le_bytes());
        out
    }

    #[test]
    fn empty_archive_opens() {
        let archive = ZipArchive::new(build_archive(&[])).unwrap();

        assert!(archive.is_empty());
        assert_eq!(archive.names().count(), 0);
        assert!(matches!(
            archive.find_entry_by_name("res/values/strings.xml"),
            Err(ZipError::FileNotFound(name)) if name == "res/values/strings.xml"
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            ZipArchive::new(b"PK\x03\x04 definitely not a zip".to_vec()),
            Err(ZipError::NotFoundEOCD)
        ));
        assert!(matches!(
            ZipArchive::new(Vec::new()),
            Err(ZipError::NotFoundEOCD)
        ));
    }

    #[test]
    fn entry_after_gap() {
        let mut second = TestEntry::stored("res/values-fr/strings.xml", b"bonjour");
        second.gap = 32;
        let archive = ZipArchive::new(build_archive(&[
            TestEntry::stored("res/values/strings.xml", b"hello"),
            second,
        ]))
        .unwrap();

        let first = archive.find_entry_by_name("res/values/strings.xml").unwrap();
        let first_map = archive.create_entry_file_map(first).unwrap();
        assert_eq!(first_map.local_header_offset, 0);
        assert_eq!(first_map.data_offset, 30 + "res/values/strings.xml".len());
        assert_eq!(archive.entry_data(&first_map), b"hello");

        let entry = archive
            .find_entry_by_name("res/values-fr/strings.xml")
            .unwrap();
        let map = archive.create_entry_file_map(entry).unwrap();

        let first_end = first_map.data_offset + first_map.size;
        assert_eq!(map.local_header_offset, first_end + 32);
        assert_eq!(
            map.data_offset,
            map.local_header_offset + 30 + "res/values-fr/strings.xml".len()
        );
        assert_eq!(map.size, 7);
        assert_eq!(archive.entry_data(&map), b"bonjour");
    }

    #[test]
    fn local_extra_field_shifts_data() {
        let mut entry = TestEntry::stored("a.txt", b"payload");
        entry.local_extra = 5;
        let archive = ZipArchive::new(build_archive(&[entry])).unwrap();

        let entry = archive.find_entry_by_name("a.txt").unwrap();
        let map = archive.create_entry_file_map(entry).unwrap();
        assert_eq!(map.data_offset, 30 + 5 + 5);
        assert_eq!(archive.read("a.txt").unwrap(), b"payload");
    }

    #[test]
    fn read_deflated_and_stored() {
        let text = "<resources><string name=\"app\">demo</string></resources>".repeat(8);
        let archive = ZipArchive::new(build_archive(&[
            TestEntry::deflated("res/values/strings.xml", text.as_bytes()),
            TestEntry::stored("raw.bin", &[1, 2, 3]),
        ]))
        .unwrap();

        assert_eq!(
            archive.names().collect::<Vec<_>>(),
            vec!["res/values/strings.xml", "raw.bin"]
        );
        assert_eq!(archive.read("res/values/strings.xml").unwrap(), text.as_bytes());
        assert_eq!(archive.read("raw.bin").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn understated_uncompressed_size() {
        let text = b"0123456789".repeat(100);
        let mut entry = TestEntry::deflated("big.txt", &text);
        entry.uncompressed_size = 10;
        let archive = ZipArchive::new(build_archive(&[entry])).unwrap();

        assert_eq!(archive.read("big.txt").unwrap(), text);
    }

    #[test]
    fn inflate_stops_at_limit() {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
        encoder.write_all(&[0u8; 100_000]).unwrap();
        let compressed = encoder.finish().unwrap();

        assert!(matches!(
            ZipArchive::inflate_with_limit(&compressed, 10_000),
            Err(ZipError::DecompressionError)
        ));
        assert_eq!(
            ZipArchive::inflate_with_limit(&compressed, 100_000).unwrap().len(),
            100_000
        );
    }

    #[test]
    fn inflate_truncated_stream() {
        let text = b"abcdefghij".repeat(500);
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&text).unwrap();
        let compressed = encoder.finish().unwrap();

        assert!(ZipArchive::inflate_with_limit(&compressed[..compressed.len() / 2], 1 << 20).is_err());
    }

    #[test]
    fn unsupported_method() {
        let mut entry = TestEntry::stored("lzma.bin", b"xx");
        entry.method = 14;
        let archive = ZipArchive::new(build_archive(&[entry])).unwrap();

        assert!(matches!(
            archive.read("lzma.bin"),
            Err(ZipError::UnsupportedCompression(14))
        ));
    }

    #[test]
    fn truncated_entry_data() {
        let mut bytes = build_archive(&[TestEntry::stored("a.txt", b"payload")]);
        // claim more data than the archive has
        let size_offset = 18;
        bytes[size_offset..size_offset + 4].copy_from_slice(&0xFFFFu32.to_le_bytes());
        let central_size_offset = bytes.len() - 22 - (46 + 5) + 20;
        bytes[central_size_offset..central_size_offset + 4]
            .copy_from_slice(&0xFFFFu32.to_le_bytes());

        let archive = ZipArchive::new(bytes).unwrap();
        let entry = archive.find_entry_by_name("a.txt").unwrap();
        assert!(matches!(
            archive.create_entry_file_map(entry),
            Err(ZipError::EOF)
        ));
    }
}
