use crate::charset::{Alphabet, DIGITS, SYMBOLS};
use crate::random::{OsRandom, RandomSource};
use anyhow::Result;
use zeroize::Zeroizing;

pub const MIN_UI_LENGTH: usize = 6;
pub const MAX_UI_LENGTH: usize = 50;

/// What to generate: a length plus which optional character classes to mix in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub length: usize,
    pub include_digits: bool,
    pub include_symbols: bool,
}

impl GenerationRequest {
    pub const DEFAULT: Self = Self {
        length: 12,
        include_digits: true,
        include_symbols: false,
    };

    pub const fn new(length: usize, include_digits: bool, include_symbols: bool) -> Self {
        Self {
            length,
            include_digits,
            include_symbols,
        }
    }

    pub fn alphabet(&self) -> Alphabet {
        Alphabet::new(self.include_digits, self.include_symbols)
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub fn generate(request: &GenerationRequest) -> Result<Zeroizing<String>> {
    generate_with(request, &mut OsRandom)
}

/// Generates a password using `rng` for every draw.
///
/// One digit and then one symbol are seeded first when requested, as long as
/// `length` leaves room for them; a single-character request with both classes
/// enabled therefore yields one digit. The buffer is then filled from the full
/// alphabet and shuffled with Fisher-Yates.
pub fn generate_with<R>(request: &GenerationRequest, rng: &mut R) -> Result<Zeroizing<String>>
where
    R: RandomSource + ?Sized,
{
    if request.length == 0 {
        anyhow::bail!("Password length must be at least 1");
    }

    let alphabet = request.alphabet();
    let mut password_bytes = Zeroizing::new(Vec::with_capacity(request.length));

    let mut seed_sets: Vec<&[u8]> = Vec::with_capacity(2);
    if request.include_digits {
        seed_sets.push(DIGITS);
    }
    if request.include_symbols {
        seed_sets.push(SYMBOLS);
    }

    for set in seed_sets.into_iter().take(request.length) {
        password_bytes.push(pick(set, rng));
    }

    log::trace!(
        "seeded {} of {} characters from an alphabet of {}",
        password_bytes.len(),
        request.length,
        alphabet.len()
    );

    while password_bytes.len() < request.length {
        password_bytes.push(pick(alphabet.as_bytes(), rng));
    }

    shuffle(password_bytes.as_mut_slice(), rng);

    let result = String::from_utf8(password_bytes.to_vec())?;

    Ok(Zeroizing::new(result))
}

fn pick<R: RandomSource + ?Sized>(set: &[u8], rng: &mut R) -> u8 {
    set[rng.below(set.len())]
}

fn shuffle<T, R: RandomSource + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.below(i + 1);
        items.swap(i, j);
    }
}
