use chacha20::ChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use rand::rngs::OsRng;
use rand::{Rng, RngCore};
use zeroize::Zeroizing;

const BUFFER_LEN: usize = 1024;
const DRAW_BYTES: usize = 8;

/// A source of independent uniform draws.
pub trait RandomSource {
    /// Returns a value uniformly distributed over `0..bound`.
    ///
    /// A `bound` of 0 or 1 yields 0.
    fn below(&mut self, bound: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, bound: usize) -> usize {
        (**self).below(bound)
    }
}

/// Operating system entropy.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        OsRng.gen_range(0..bound)
    }
}

/// ChaCha20 keystream with unbiased rejection sampling.
///
/// The same key always yields the same sequence of draws.
pub struct KeystreamRng {
    cipher: ChaCha20,
    buffer: Zeroizing<Vec<u8>>,
    pos: usize,
}

impl KeystreamRng {
    pub fn new(key: &[u8; 32]) -> Self {
        let mut cipher = ChaCha20::new(key.into(), &[0u8; 12].into());
        let mut buffer = Zeroizing::new(vec![0u8; BUFFER_LEN]);
        cipher.apply_keystream(&mut buffer);
        Self {
            cipher,
            buffer,
            pos: 0,
        }
    }

    pub fn from_entropy() -> Self {
        let mut key = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(&mut key[..]);
        Self::new(&key)
    }

    fn refill(&mut self) {
        self.buffer.fill(0);
        self.cipher.apply_keystream(&mut self.buffer);
        self.pos = 0;
    }

    fn next_draw(&mut self) -> u64 {
        if self.pos + DRAW_BYTES > self.buffer.len() {
            self.refill();
        }

        let mut bytes = [0u8; DRAW_BYTES];
        bytes.copy_from_slice(&self.buffer[self.pos..self.pos + DRAW_BYTES]);
        self.pos += DRAW_BYTES;

        u64::from_le_bytes(bytes)
    }
}

impl RandomSource for KeystreamRng {
    fn below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }

        let bound = bound as u64;
        let rejection_threshold = (u64::MAX / bound) * bound;

        loop {
            let draw = self.next_draw();
            if draw < rejection_threshold {
                return (draw % bound) as usize;
            }
        }
    }
}
