/// Bytes shown per hexdump line
const LINE_WIDTH: usize = 16;

/// Renders `data` as hexdump lines: offset, hex bytes and a printable ASCII gutter.
///
/// `00000000: 56 FF FF 00 06 AC  V.....`
pub fn hexdump(data: &[u8]) -> Vec<String> {
    data.chunks(LINE_WIDTH)
        .enumerate()
        .map(|(i, chunk)| {
            let hex_bytes: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
            let mut hex_column = hex_bytes.join(" ");
            if chunk.len() > 8 {
                // Extra gap between the two halves of a line
                hex_column.insert(8 * 3 - 1, ' ');
            }

            let ascii: String = chunk
                .iter()
                .map(|b| if b.is_ascii_graphic() || *b == b' ' { *b as char } else { '.' })
                .collect();

            format!("{:08X}: {:<48}  {}", i * LINE_WIDTH, hex_column, ascii)
        })
        .collect()
}
