use anyhow::{bail, Context, Result};

/// Contiguous bytes starting at `address`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub address: u32,
    pub data: Vec<u8>,
}

/// Parse an Intel HEX file as produced by avr-objcopy.
///
/// Record types:
/// - 00: Data
/// - 01: End of File
/// - 02: Extended Segment Address
/// - 03/05: Start address (ignored, the bootloader jumps to 0)
/// - 04: Extended Linear Address
pub fn parse(input: &str) -> Result<Vec<Segment>> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut base: u32 = 0;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some(body) = line.strip_prefix(':') else {
            bail!("line {line_no}: missing start code ':'");
        };

        let bytes = decode(body).with_context(|| format!("line {line_no}: invalid hex data"))?;
        if bytes.len() < 5 {
            bail!("line {line_no}: record too short");
        }

        let count = bytes[0] as usize;
        if bytes.len() != 5 + count {
            bail!(
                "line {line_no}: expected {count} data bytes, got {}",
                bytes.len() - 5
            );
        }
        if bytes.iter().fold(0u8, |acc, &b| acc.wrapping_add(b)) != 0 {
            bail!("line {line_no}: checksum mismatch");
        }

        let offset = u16::from_be_bytes([bytes[1], bytes[2]]) as u32;
        let data = &bytes[4..4 + count];

        match bytes[3] {
            0x00 => {
                let address = base + offset;
                match segments.last_mut() {
                    Some(last) if last.address + last.data.len() as u32 == address => {
                        last.data.extend_from_slice(data);
                    }
                    _ => segments.push(Segment {
                        address,
                        data: data.to_vec(),
                    }),
                }
            }
            0x01 => break,
            0x02 | 0x04 => {
                if count != 2 {
                    bail!("line {line_no}: address record must carry 2 bytes");
                }
                let value = u16::from_be_bytes([data[0], data[1]]) as u32;
                base = if bytes[3] == 0x02 { value << 4 } else { value << 16 };
            }
            0x03 | 0x05 => {}
            other => bail!("line {line_no}: unsupported record type 0x{other:02X}"),
        }
    }

    Ok(segments)
}

/// Join the segments into one image. Gaps read as erased flash (0xFF).
/// Returns the image's start address with the bytes.
pub fn flatten(segments: &[Segment]) -> Result<(u32, Vec<u8>)> {
    let (Some(start), Some(end)) = (
        segments.iter().map(|s| s.address).min(),
        segments
            .iter()
            .map(|s| s.address + s.data.len() as u32)
            .max(),
    ) else {
        bail!("no data records in HEX file");
    };

    let mut image = vec![0xFFu8; (end - start) as usize];
    for segment in segments {
        let at = (segment.address - start) as usize;
        image[at..at + segment.data.len()].copy_from_slice(&segment.data);
    }
    Ok((start, image))
}

fn decode(hex: &str) -> Result<Vec<u8>> {
    if hex.len() % 2 != 0 {
        bail!("odd number of hex characters");
    }
    (0..hex.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .with_context(|| format!("invalid hex at position {i}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_and_eof() {
        let hex = ":10000000000102030405060708090A0B0C0D0E0F78\n\
                   :00000001FF\n";
        let segments = parse(hex).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].address, 0);
        assert_eq!(segments[0].data, (0u8..16).collect::<Vec<_>>());
    }

    #[test]
    fn extended_segment_address() {
        let hex = ":020000020100FB\n\
                   :10000000112233445566778899AABBCCDDEEFF00F8\n\
                   :00000001FF\n";
        let segments = parse(hex).unwrap();
        assert_eq!(segments[0].address, 0x1000);
    }

    #[test]
    fn extended_linear_address() {
        let hex = ":020000040001F9\n\
                   :04000000AABBCCDDEE\n\
                   :00000001FF\n";
        let segments = parse(hex).unwrap();
        assert_eq!(segments[0].address, 0x1_0000);
    }

    #[test]
    fn start_address_is_ignored() {
        let hex = ":04000000AABBCCDDEE\n\
                   :0400000300000000F9\n\
                   :00000001FF\n";
        assert_eq!(parse(hex).unwrap().len(), 1);
    }

    #[test]
    fn bad_checksum() {
        let hex = ":10000000000102030405060708090A0B0C0D0E0F00\n";
        assert!(parse(hex).is_err());
    }

    #[test]
    fn short_record_is_rejected() {
        assert!(parse(":10000000AABB\n").is_err());
        assert!(parse("10000000\n").is_err());
    }

    #[test]
    fn contiguous_records_merge() {
        let hex = ":04000000AABBCCDDEE\n\
                   :04000400112233444E\n\
                   :00000001FF\n";
        let segments = parse(hex).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(
            segments[0].data,
            vec![0xAA, 0xBB, 0xCC, 0xDD, 0x11, 0x22, 0x33, 0x44]
        );
    }

    #[test]
    fn flatten_fills_gaps() {
        let segments = vec![
            Segment {
                address: 0x100,
                data: vec![0xAA, 0xBB],
            },
            Segment {
                address: 0x110,
                data: vec![0xCC, 0xDD],
            },
        ];
        let (start, image) = flatten(&segments).unwrap();
        assert_eq!(start, 0x100);
        assert_eq!(image.len(), 0x12);
        assert_eq!(&image[..3], &[0xAA, 0xBB, 0xFF]);
        assert_eq!(&image[0x10..], &[0xCC, 0xDD]);
    }

    #[test]
    fn flatten_nothing() {
        assert!(flatten(&[]).is_err());
    }
}
