//! Raw byte scanning: object bodies, stream payloads and marker search.
//!
//! The scanner works directly on the file bytes without building an object
//! model. Markers are matched ASCII case-insensitively.

/// Characters trimmed from the front of a stream payload.
const LEADING_TRIM: &[u8] = b" \t\n\r\0\x0B";

/// Iterator over the bodies of `obj ... endobj` spans in a PDF file.
///
/// An `obj` marker must be followed by an end-of-line byte; the body runs to
/// the next `endobj` marker that is itself followed by an end-of-line byte.
/// A final object without `endobj` runs to the end of the input, so a
/// truncated file still yields its last object.
pub struct ObjectScanner<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ObjectScanner<'a> {
    /// Create a scanner over the whole file.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl<'a> Iterator for ObjectScanner<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let (body_start, body_end, resume) =
            find_delimited(self.data, self.pos, b"obj", b"endobj")?;
        self.pos = resume;
        Some(&self.data[body_start..body_end])
    }
}

/// Scan `data` for object bodies.
pub fn scan_objects(data: &[u8]) -> ObjectScanner<'_> {
    ObjectScanner::new(data)
}

/// Return the stream payload of an object body, if it has one.
///
/// The payload lies between the first `stream` marker and the following
/// `endstream` marker (both followed by an end-of-line byte), with leading
/// whitespace removed. A missing `endstream` extends the payload to the end
/// of the object.
pub fn stream_payload(object: &[u8]) -> Option<&[u8]> {
    let (start, end, _) = find_delimited(object, 0, b"stream", b"endstream")?;
    let payload = &object[start..end];
    let skip = payload
        .iter()
        .position(|b| !LEADING_TRIM.contains(b))
        .unwrap_or(payload.len());
    Some(&payload[skip..])
}

/// Find the next `open`+EOL ... `close`+EOL span at or after `from`.
///
/// Returns the body range and the position just after the closing marker.
fn find_delimited(
    data: &[u8],
    from: usize,
    open: &[u8],
    close: &[u8],
) -> Option<(usize, usize, usize)> {
    let open_at = find_marker_eol(data, from, open)?;
    let body_start = open_at + open.len() + 1;

    match find_marker_eol(data, body_start, close) {
        Some(close_at) => Some((body_start, close_at, close_at + close.len() + 1)),
        None => Some((body_start, data.len(), data.len())),
    }
}

/// Find `marker` followed by `\r` or `\n`, searching from `from`.
fn find_marker_eol(data: &[u8], from: usize, marker: &[u8]) -> Option<usize> {
    let mut pos = from;
    while let Some(at) = find_ci(data, pos, marker) {
        if matches!(data.get(at + marker.len()), Some(b'\r' | b'\n')) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// ASCII case-insensitive search for `needle` in `haystack[from..]`.
pub fn find_ci(haystack: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || from >= haystack.len() || haystack.len() - from < needle.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|i| from + i)
}

/// PDF whitespace characters.
pub fn is_pdf_whitespace(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r' | b' ')
}

/// PDF delimiter characters.
pub fn is_pdf_delimiter(byte: u8) -> bool {
    matches!(
        byte,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scan_objects() {
        let data = b"%PDF-1.4\n1 0 obj\n<< /Type /Catalog >>\nendobj\n2 0 obj\r<< /A 1 >>\rendobj\r";
        let objects: Vec<_> = scan_objects(data).collect();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0], b"<< /Type /Catalog >>\n");
        assert_eq!(objects[1], b"<< /A 1 >>\r");
    }

    #[test]
    fn test_scan_objects_case_insensitive() {
        let data = b"1 0 OBJ\nbody\nENDOBJ\n";
        let objects: Vec<_> = scan_objects(data).collect();
        assert_eq!(objects, vec![&b"body\n"[..]]);
    }

    #[test]
    fn test_scan_objects_truncated_final_object() {
        let data = b"1 0 obj\nfirst\nendobj\n2 0 obj\nunterminated";
        let objects: Vec<_> = scan_objects(data).collect();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[1], b"unterminated");
    }

    #[test]
    fn test_scan_objects_requires_eol_after_marker() {
        let data = b"/XObject 5 0 R obj body endobj";
        assert_eq!(scan_objects(data).count(), 0);
    }

    #[test]
    fn test_scan_objects_empty_input() {
        assert_eq!(scan_objects(b"").count(), 0);
    }

    #[test]
    fn test_stream_payload() {
        let object = b"<< /Length 5 >>\nstream\r\n  hello\nendstream\n";
        assert_eq!(stream_payload(object), Some(&b"hello\n"[..]));
    }

    #[test]
    fn test_stream_payload_missing_endstream() {
        let object = b"<< >>\nstream\npayload";
        assert_eq!(stream_payload(object), Some(&b"payload"[..]));
    }

    #[test]
    fn test_stream_payload_absent() {
        assert_eq!(stream_payload(b"<< /Type /Page >>\n"), None);
    }

    #[test]
    fn test_find_ci() {
        assert_eq!(find_ci(b"abcBEGINbfchar", 0, b"beginbfchar"), Some(3));
        assert_eq!(find_ci(b"abc", 1, b"abcd"), None);
        assert_eq!(find_ci(b"xyz", 5, b"x"), None);
    }

    proptest! {
        #[test]
        fn scan_objects_never_panics(data in prop::collection::vec(any::<u8>(), 0..2000)) {
            for object in scan_objects(&data) {
                let _ = stream_payload(object);
            }
        }
    }
}
