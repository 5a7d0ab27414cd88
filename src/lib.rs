pub mod charset;
pub mod generator;
pub mod random;
pub mod strength;

pub use charset::Alphabet;
pub use generator::{GenerationRequest, MAX_UI_LENGTH, MIN_UI_LENGTH, generate, generate_with};
pub use random::{KeystreamRng, OsRandom, RandomSource};
pub use strength::{StrengthAssessment, StrengthLabel, classify};
