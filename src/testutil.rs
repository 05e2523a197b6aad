//! Builders for synthetic Ogg Opus streams used across the test modules.

use crate::ogg::flags;

pub(crate) const SERIAL: u32 = 0x0500_29CD;

/// Builds one Ogg page with an explicit segment table.
pub(crate) fn page_raw(
    header_type: u8,
    granule: i64,
    serial: u32,
    sequence: u32,
    lacing: &[u8],
    body: &[u8],
) -> Vec<u8> {
    assert_eq!(
        lacing.iter().map(|&s| s as usize).sum::<usize>(),
        body.len(),
        "segment table must cover the body"
    );
    let mut out = Vec::with_capacity(27 + lacing.len() + body.len());
    out.extend_from_slice(b"OggS");
    out.push(0);
    out.push(header_type);
    out.extend_from_slice(&granule.to_le_bytes());
    out.extend_from_slice(&serial.to_le_bytes());
    out.extend_from_slice(&sequence.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes()); // checksum; not validated
    out.push(lacing.len() as u8);
    out.extend_from_slice(lacing);
    out.extend_from_slice(body);
    out
}

/// Lacing values for one packet of `len` bytes, fully contained in a page.
pub(crate) fn lacing_for(len: usize) -> Vec<u8> {
    let mut lacing = vec![255u8; len / 255];
    lacing.push((len % 255) as u8);
    lacing
}

/// Builds a page holding the given packets, each fully contained.
pub(crate) fn page_with_packets(
    header_type: u8,
    granule: i64,
    sequence: u32,
    packets: &[&[u8]],
) -> Vec<u8> {
    let mut lacing = Vec::new();
    let mut body = Vec::new();
    for packet in packets {
        lacing.extend_from_slice(&lacing_for(packet.len()));
        body.extend_from_slice(packet);
    }
    page_raw(header_type, granule, SERIAL, sequence, &lacing, &body)
}

/// Builds an `OpusHead` identification packet (channel mapping family 0).
pub(crate) fn id_header(
    channels: u8,
    pre_skip: u16,
    sample_rate: u32,
    output_gain: u16,
    mapping_family: u8,
) -> Vec<u8> {
    let mut packet = Vec::with_capacity(19);
    packet.extend_from_slice(b"OpusHead");
    packet.push(1);
    packet.push(channels);
    packet.extend_from_slice(&pre_skip.to_le_bytes());
    packet.extend_from_slice(&sample_rate.to_le_bytes());
    packet.extend_from_slice(&output_gain.to_le_bytes());
    packet.push(mapping_family);
    packet
}

/// Builds an `OpusTags` packet with the given vendor and no user comments.
pub(crate) fn tags_header(vendor: &str) -> Vec<u8> {
    let mut packet = Vec::new();
    packet.extend_from_slice(b"OpusTags");
    packet.extend_from_slice(&(vendor.len() as u32).to_le_bytes());
    packet.extend_from_slice(vendor.as_bytes());
    packet.extend_from_slice(&0u32.to_le_bytes());
    packet
}

/// Assembles a complete stream: a BOS page with the id packet, a page with
/// the tags packet, then one page per audio packet with the final page
/// flagged end-of-stream. Granules advance 960 samples per audio page.
pub(crate) fn stream(id: &[u8], tags: &[u8], audio: &[&[u8]]) -> Vec<u8> {
    let mut out = page_with_packets(flags::BOS, 0, 0, &[id]);
    out.extend_from_slice(&page_with_packets(0, 0, 1, &[tags]));
    for (i, &packet) in audio.iter().enumerate() {
        let header_type = if i + 1 == audio.len() { flags::EOS } else { 0 };
        let granule = 960 * (i as i64 + 1);
        out.extend_from_slice(&page_with_packets(
            header_type,
            granule,
            2 + i as u32,
            &[packet],
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lacing_for_boundaries() {
        assert_eq!(lacing_for(0), vec![0]);
        assert_eq!(lacing_for(254), vec![254]);
        assert_eq!(lacing_for(255), vec![255, 0]);
        assert_eq!(lacing_for(300), vec![255, 45]);
        assert_eq!(lacing_for(510), vec![255, 255, 0]);
    }

    #[test]
    fn test_page_layout() {
        let page = page_raw(flags::BOS, 7, SERIAL, 3, &[2], &[0xAB, 0xCD]);
        assert_eq!(&page[..4], b"OggS");
        assert_eq!(page[4], 0);
        assert_eq!(page[5], flags::BOS);
        assert_eq!(i64::from_le_bytes(page[6..14].try_into().unwrap()), 7);
        assert_eq!(u32::from_le_bytes(page[14..18].try_into().unwrap()), SERIAL);
        assert_eq!(u32::from_le_bytes(page[18..22].try_into().unwrap()), 3);
        assert_eq!(page[26], 1);
        assert_eq!(page[27], 2);
        assert_eq!(&page[28..], &[0xAB, 0xCD]);
    }
}
