//! Bounded, always-terminated string copy into fixed-size byte buffers.

/// Copy `source` into `destination`, stopping at the first NUL in `source`
/// or after `destination.len() - 1` bytes, whichever comes first, and
/// write a NUL terminator after the copied bytes. Returns the number of
/// bytes copied, terminator excluded.
///
/// An empty `destination` has no room for the terminator and is left
/// alone.
pub fn copy_bounded(destination: &mut [u8], source: &[u8]) -> usize {
    let Some(room) = destination.len().checked_sub(1) else {
        return 0;
    };
    let source_len = source.iter().position(|&b| b == 0).unwrap_or(source.len());
    let n = source_len.min(room);
    destination[..n].copy_from_slice(&source[..n]);
    destination[n] = 0;
    n
}

/// Bytes of `buffer` before its first NUL (all of it if there is none).
pub fn terminated(buffer: &[u8]) -> &[u8] {
    let end = buffer.iter().position(|&b| b == 0).unwrap_or(buffer.len());
    &buffer[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copies_short_source() {
        let mut dest = [0xaau8; 10];
        assert_eq!(copy_bounded(&mut dest, b"hello"), 5);
        assert_eq!(terminated(&dest), b"hello");
    }

    #[test]
    fn truncates_long_source() {
        let mut dest = [0u8; 10];
        assert_eq!(copy_bounded(&mut dest, b"verylongstring"), 9);
        assert_eq!(terminated(&dest), b"verylongs");
        assert_eq!(dest[9], 0);
    }

    #[test]
    fn exact_fit_keeps_terminator() {
        let mut dest = [0xffu8; 10];
        copy_bounded(&mut dest, b"123456789");
        assert_eq!(terminated(&dest), b"123456789");
    }

    #[test]
    fn empty_source() {
        let mut dest = *b"junkjunk\0\0";
        assert_eq!(copy_bounded(&mut dest, b""), 0);
        assert_eq!(terminated(&dest), b"");
    }

    #[test]
    fn single_byte_destination_holds_only_terminator() {
        let mut dest = [b'x'; 1];
        assert_eq!(copy_bounded(&mut dest, b"test"), 0);
        assert_eq!(terminated(&dest), b"");
    }

    #[test]
    fn empty_destination_is_noop() {
        let mut dest: [u8; 0] = [];
        assert_eq!(copy_bounded(&mut dest, b"test"), 0);
    }

    #[test]
    fn stops_at_embedded_nul() {
        let mut dest = [0xffu8; 8];
        assert_eq!(copy_bounded(&mut dest, b"ab\0cd"), 2);
        assert_eq!(terminated(&dest), b"ab");
    }
}
