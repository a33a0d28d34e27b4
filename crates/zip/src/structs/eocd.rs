use memchr::memmem;

use winnow::{
    binary::{le_u16, le_u32},
    error::{ContextError, ErrMode},
    prelude::*,
    token::take,
};

/// End of central directory record, the only fixed anchor of an archive
#[derive(Debug)]
pub(crate) struct EndOfCentralDirectory {
    pub(crate) entries_on_this_disk: u16,
    pub(crate) total_entries: u16,
    pub(crate) central_dir_size: u32,
    pub(crate) central_dir_offset: u32,
}

impl EndOfCentralDirectory {
    const MAGIC: [u8; 4] = [0x50, 0x4B, 0x05, 0x06];

    /// 4 (MAGIC) + 18 (DATA), without the comment
    pub(crate) const MIN_SIZE: usize = 22;

    #[inline(always)]
    const fn magic_u32() -> u32 {
        u32::from_le_bytes(Self::MAGIC)
    }

    pub(crate) fn parse(input: &mut &[u8]) -> ModalResult<EndOfCentralDirectory> {
        let (
            _,
            _disk_number,
            _central_dir_start_disk,
            entries_on_this_disk,
            total_entries,
            central_dir_size,
            central_dir_offset,
            comment_length,
        ) = (
            le_u32.verify(|magic| *magic == Self::magic_u32()), // magic
            le_u16,                                             // disk_number
            le_u16,                                             // central_dir_start_disk
            le_u16,                                             // entries_on_this_disk
            le_u16,                                             // total_entries
            le_u32,                                             // central_dir_size
            le_u32,                                             // central_dir_offset
            le_u16,                                             // comment_length
        )
            .parse_next(input)?;

        take::<_, _, ErrMode<ContextError>>(comment_length)
            .void()
            .parse_next(input)?;

        Ok(EndOfCentralDirectory {
            entries_on_this_disk,
            total_entries,
            central_dir_size,
            central_dir_offset,
        })
    }

    /// Searching magic from the end of the file
    ///
    /// Chunks overlap by the magic length, so a record split between two
    /// chunks is still found.
    pub(crate) fn find_eocd(input: &[u8], chunk_size: usize) -> Option<usize> {
        let overlap = Self::MAGIC.len() - 1;
        let chunk_size = chunk_size.max(Self::MAGIC.len());
        let mut end = input.len();

        while end >= Self::MAGIC.len() {
            let start = end.saturating_sub(chunk_size);
            let chunk = &input[start..end];

            if let Some(pos) = memmem::rfind(chunk, &Self::MAGIC) {
                return Some(start + pos);
            }

            if start == 0 {
                break;
            }
            end = start + overlap;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_record_across_chunk_border() {
        let mut input = vec![0u8; 10];
        input.extend_from_slice(&EndOfCentralDirectory::MAGIC);
        input.extend_from_slice(&[0u8; 14]);

        // first chunk starts at 28 - 16 = 12, in the middle of the magic
        assert_eq!(EndOfCentralDirectory::find_eocd(&input, 16), Some(10));
        assert_eq!(EndOfCentralDirectory::find_eocd(&input, 4096), Some(10));
        assert_eq!(EndOfCentralDirectory::find_eocd(&input[11..], 16), None);
    }

    #[test]
    fn parse_empty_record() {
        let mut record = EndOfCentralDirectory::MAGIC.to_vec();
        record.extend_from_slice(&[0u8; 18]);

        let eocd = EndOfCentralDirectory::parse(&mut record.as_slice()).unwrap();
        assert_eq!(eocd.total_entries, 0);
        assert_eq!(eocd.central_dir_offset, 0);
    }

    #[test]
    fn truncated_comment_is_rejected() {
        let mut record = EndOfCentralDirectory::MAGIC.to_vec();
        record.extend_from_slice(&[0u8; 16]);
        record.extend_from_slice(&5u16.to_le_bytes());
        record.extend_from_slice(b"ab");

        assert!(EndOfCentralDirectory::parse(&mut record.as_slice()).is_err());

        record.extend_from_slice(b"cde");
        assert!(EndOfCentralDirectory::parse(&mut record.as_slice()).is_ok());
    }
}
