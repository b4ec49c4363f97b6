/// Size of the fixed header preceding the signature offsets table
const HEADER_SIZE: usize = 2;
/// Size of one `Ed25519SignatureOffsets` entry
const OFFSETS_SIZE: usize = 14;
const SIGNATURE_SIZE: usize = 64;
const PUBKEY_SIZE: usize = 32;
/// Instruction index value meaning "data lives in this instruction"
const CURRENT_IX_INDEX: u16 = u16::MAX;

/// Parsed components of an Ed25519 signature verification instruction
pub struct ParsedEd25519 {
    /// Number of signatures declared by the instruction header
    pub sig_count: u8,
    /// 32-byte Ed25519 public key used for signature verification
    pub pubkey: [u8; 32],
    /// Message bytes that were signed
    pub message: Vec<u8>,
}

/// Number of signatures declared by an Ed25519 instruction, if the header is present
pub fn ed25519_sig_count(data: &[u8]) -> Option<u8> {
    data.first().copied()
}

fn read_u16(data: &[u8], at: usize) -> Option<u16> {
    let bytes = data.get(at..at + 2)?;
    Some(u16::from_le_bytes([bytes[0], bytes[1]]))
}

/// Parse single-signature Ed25519 verify instruction data.
///
/// Layout (Solana Ed25519 precompile):
/// ```text
/// Byte  0:      number of signatures (u8)
/// Byte  1:      padding
/// Bytes 2-3:    signature offset (u16 LE)
/// Bytes 4-5:    signature instruction index (u16 LE)
/// Bytes 6-7:    public key offset (u16 LE)
/// Bytes 8-9:    public key instruction index (u16 LE)
/// Bytes 10-11:  message offset (u16 LE)
/// Bytes 12-13:  message size (u16 LE)
/// Bytes 14-15:  message instruction index (u16 LE)
/// ```
///
/// Returns None when the header declares no signature, when any
/// instruction index points outside this instruction, or when an offset
/// range falls outside the data.
pub fn parse_ed25519_ix(data: &[u8]) -> Option<ParsedEd25519> {
    if data.len() < HEADER_SIZE + OFFSETS_SIZE {
        return None;
    }
    let sig_count = data[0];
    if sig_count == 0 {
        return None;
    }

    let sig_offset = read_u16(data, 2)? as usize;
    let sig_ix_index = read_u16(data, 4)?;
    let pubkey_offset = read_u16(data, 6)? as usize;
    let pubkey_ix_index = read_u16(data, 8)?;
    let msg_offset = read_u16(data, 10)? as usize;
    let msg_size = read_u16(data, 12)? as usize;
    let msg_ix_index = read_u16(data, 14)?;

    if [sig_ix_index, pubkey_ix_index, msg_ix_index]
        .iter()
        .any(|index| *index != CURRENT_IX_INDEX)
    {
        return None;
    }

    // signature must be present even though the precompile already checked it
    data.get(sig_offset..sig_offset + SIGNATURE_SIZE)?;

    let mut pubkey = [0u8; PUBKEY_SIZE];
    pubkey.copy_from_slice(data.get(pubkey_offset..pubkey_offset + PUBKEY_SIZE)?);

    let message = data.get(msg_offset..msg_offset + msg_size)?.to_vec();

    Some(ParsedEd25519 {
        sig_count,
        pubkey,
        message,
    })
}
