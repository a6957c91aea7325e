use std::io;

/// Writes a hex dump of the given data. The `initial_offset` is
/// what the first byte of the data should be considered as, for printing
/// of offsets.
pub fn hex_dump_to<W: io::Write>(
    mut output: W,
    data: &[u8],
    initial_offset: usize,
) -> io::Result<()> {
    // We want to print out an output like this:
    //       00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F
    //       -----------------------------------------------
    // 0000: 01 23 45 67 89 AB CD EF 01 23 45 67 89 AB CD EF  .#Eg.....#Eg....
    if data.is_empty() {
        return Ok(());
    }

    // The final byte will be at offset length - 1.
    let max_offset = initial_offset + data.len() - 1;
    let num_offset_hex_chars = std::cmp::max(
        4,
        ((usize::BITS - max_offset.leading_zeros()).div_ceil(4)) as usize,
    );
    let offset_padding = " ".repeat(num_offset_hex_chars);

    writeln!(
        output,
        "{offset_padding}  00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F"
    )?;
    writeln!(
        output,
        "{offset_padding}  -----------------------------------------------"
    )?;

    let mut remaining_data = data;
    let mut curr_offset = initial_offset;
    while !remaining_data.is_empty() {
        // The position of the first byte shown in the current line
        let line_start = curr_offset % 16;
        let line_end = std::cmp::min(remaining_data.len(), 16 - line_start) + line_start;
        let line_length = line_end - line_start;
        let line = &remaining_data[..line_length];

        let line_hex: String = line.iter().map(|b| format!("{b:02X} ")).collect();
        let line_ascii: String = line
            .iter()
            .map(|&b| if (32..=126).contains(&b) { b as char } else { '.' })
            .collect();

        writeln!(
            output,
            "{:0width$X}: {}{}{} {}{}",
            curr_offset - line_start,
            "   ".repeat(line_start),
            line_hex,
            "   ".repeat(16 - line_end),
            " ".repeat(line_start),
            line_ascii,
            width = num_offset_hex_chars,
        )?;
        remaining_data = &remaining_data[line_length..];
        curr_offset += line_length;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dumps_full_and_partial_lines() {
        let data: Vec<u8> = (0x41..0x41 + 20).collect();
        let mut out = Vec::new();
        hex_dump_to(&mut out, &data, 0).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("0000: 41 42 43"));
        assert!(lines[2].ends_with("ABCDEFGHIJKLMNOP"));
        assert!(lines[3].starts_with("0010: 51 52 53 54 "));
        assert!(lines[3].ends_with("QRST"));
    }

    #[test]
    fn unaligned_start_is_padded() {
        let mut out = Vec::new();
        hex_dump_to(&mut out, &[0xFF, 0x30], 0x1E).unwrap();
        let text = String::from_utf8(out).unwrap();
        let line = text.lines().nth(2).unwrap();
        assert!(line.starts_with("0010: "));
        assert!(line.contains("FF 30"));
        assert!(line.ends_with(".0"));
    }

    #[test]
    fn empty_data_writes_nothing() {
        let mut out = Vec::new();
        hex_dump_to(&mut out, &[], 0).unwrap();
        assert!(out.is_empty());
    }
}
