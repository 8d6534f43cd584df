//! Standard-alphabet base64 without line breaks.

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: u8 = b'=';

/// Number of bytes `encode` produces for `len` input bytes.
pub fn encoded_len(len: usize) -> usize {
    len.div_ceil(3) * 4
}

/// Encodes `data` with padding.
pub fn encode(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(data.len()));

    let mut chunks = data.chunks_exact(3);
    for chunk in &mut chunks {
        let v = u32::from(chunk[0]) << 16 | u32::from(chunk[1]) << 8 | u32::from(chunk[2]);
        push_sextets(&mut out, v, 4);
    }

    match *chunks.remainder() {
        [a] => {
            push_sextets(&mut out, u32::from(a) << 16, 2);
            out.extend_from_slice(&[PAD, PAD]);
        }
        [a, b] => {
            push_sextets(&mut out, u32::from(a) << 16 | u32::from(b) << 8, 3);
            out.push(PAD);
        }
        _ => {}
    }

    out
}

fn push_sextets(out: &mut Vec<u8>, v: u32, count: usize) {
    for i in 0..count {
        let shift = 18 - 6 * i;
        out.push(ALPHABET[((v >> shift) & 63) as usize]);
    }
}

fn sextet(c: u8) -> Option<u32> {
    let v = match c {
        b'A'..=b'Z' => c - b'A',
        b'a'..=b'z' => c - b'a' + 26,
        b'0'..=b'9' => c - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => return None,
    };
    Some(u32::from(v))
}

/// Decodes padded base64. Returns `None` on malformed input.
///
/// Input length must be a multiple of 4 and padding may only appear in the
/// final quad, as `xx==` or `xxx=`.
pub fn decode(text: &[u8]) -> Option<Vec<u8>> {
    if text.len() % 4 != 0 {
        return None;
    }

    let mut out = Vec::with_capacity(text.len() / 4 * 3);
    let quads = text.len() / 4;

    for (i, quad) in text.chunks_exact(4).enumerate() {
        let last = i + 1 == quads;
        let (c2, c3) = (quad[2], quad[3]);

        let mut v = sextet(quad[0])? << 18 | sextet(quad[1])? << 12;

        match (c2 == PAD, c3 == PAD) {
            (false, false) => {
                v |= sextet(c2)? << 6 | sextet(c3)?;
                out.extend_from_slice(&[(v >> 16) as u8, (v >> 8) as u8, v as u8]);
            }
            (false, true) if last => {
                v |= sextet(c2)? << 6;
                out.extend_from_slice(&[(v >> 16) as u8, (v >> 8) as u8]);
            }
            (true, true) if last => out.push((v >> 16) as u8),
            _ => return None,
        }
    }

    Some(out)
}
