//! Synthetic GF1 patch builder for integration tests

#![allow(dead_code)]

pub const SIXTEEN_BIT: u8 = 0x01;
pub const UNSIGNED: u8 = 0x02;
pub const LOOPING: u8 = 0x04;

/// One sample record: metadata block plus payload
pub struct TestSample {
    pub modes: u8,
    pub sample_rate: u16,
    pub payload: Vec<u8>,
}

impl TestSample {
    pub fn new(modes: u8, payload: &[u8]) -> Self {
        TestSample {
            modes,
            sample_rate: 44_100,
            payload: payload.to_vec(),
        }
    }

    fn encode(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(b"Sample\0"); // Wave name
        out.push(0x00); // Fractions
        out.extend_from_slice(&(self.payload.len() as u32).to_le_bytes());
        out.extend_from_slice(&0u32.to_le_bytes()); // Loop start
        out.extend_from_slice(&(self.payload.len() as u32).to_le_bytes()); // Loop end
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&20_000u32.to_le_bytes()); // Low freq
        out.extend_from_slice(&8_000_000u32.to_le_bytes()); // High freq
        out.extend_from_slice(&440_000u32.to_le_bytes()); // Root freq
        out.extend_from_slice(&[0, 0]); // Tuning
        out.push(7); // Balance
        out.extend_from_slice(&[0u8; 12]); // Envelope tables
        out.extend_from_slice(&[0, 0, 0]); // Tremolo
        out.extend_from_slice(&[0, 0, 0]); // Vibrato
        out.push(self.modes);
        out.extend_from_slice(&60u16.to_le_bytes()); // Scale freq
        out.extend_from_slice(&1024u16.to_le_bytes()); // Scale factor
        out.extend_from_slice(&[0u8; 36]); // Reserved
        out.extend_from_slice(&self.payload);
    }
}

/// Build a complete patch with counts as stored on disk
pub fn build_patch(magic: &[u8], instruments: u8, layers: u8, samples: &[TestSample]) -> Vec<u8> {
    let mut data = vec![0u8; 239];
    data[..magic.len()].copy_from_slice(magic);
    data[82] = instruments;
    data[151] = layers;
    data[198] = samples.len() as u8;
    for sample in samples {
        sample.encode(&mut data);
    }
    data
}

/// Single-instrument, single-layer patch with the 1.10 magic
pub fn simple_patch(samples: &[TestSample]) -> Vec<u8> {
    build_patch(b"GF1PATCH110", 1, 1, samples)
}
