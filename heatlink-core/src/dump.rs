//! Hex/ASCII dump of controller datagrams for debug logging

const ROW_WIDTH: usize = 16;
const GROUP_WIDTH: usize = 8;

/// Render `data` as rows of sixteen bytes: hex in two groups of eight,
/// followed by the printable characters (`.` for anything else)
pub fn hex_dump(data: &[u8]) -> String {
    let mut out = String::new();
    for (row, chunk) in data.chunks(ROW_WIDTH).enumerate() {
        if row > 0 {
            out.push('\n');
        }
        out.push_str(&format!("{:04x}  ", row * ROW_WIDTH));
        for i in 0..ROW_WIDTH {
            if i == GROUP_WIDTH {
                out.push(' ');
            }
            match chunk.get(i) {
                Some(b) => out.push_str(&format!("{:02x} ", b)),
                None => out.push_str("   "),
            }
        }
        out.push(' ');
        for &b in chunk {
            out.push(if b.is_ascii_graphic() || b == b' ' {
                char::from(b)
            } else {
                '.'
            });
        }
    }
    out
}
