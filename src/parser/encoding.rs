/// Code points for bytes 0x80..=0x9F. The five bytes windows-1252 leaves
/// unassigned keep their C1 control code point.
const WINDOWS_1252_HIGH: [char; 32] = [
    '\u{20AC}', '\u{0081}', '\u{201A}', '\u{0192}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{02C6}', '\u{2030}', '\u{0160}', '\u{2039}', '\u{0152}', '\u{008D}', '\u{017D}', '\u{008F}',
    '\u{0090}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{02DC}', '\u{2122}', '\u{0161}', '\u{203A}', '\u{0153}', '\u{009D}', '\u{017E}', '\u{0178}'
];

/// Decodes statement bytes labelled ISO-8859-1 the way browsers do, as
/// windows-1252: bytes 0x80..=0x9F become `€`, curly quotes, dashes and the
/// like, every other byte maps to the code point with the same value.
/// Decoding cannot fail.
pub fn decode_windows_1252(bytes: &[u8]) -> String {
    bytes.iter()
        .map(|&byte| match byte {
            0x80..=0x9F => WINDOWS_1252_HIGH[usize::from(byte - 0x80)],
            _ => char::from(byte)
        })
        .collect()
}
