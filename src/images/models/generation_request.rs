use rand::Rng;
use serde::Serialize;

pub const PROMPT: &str = "Complete the missing parts of this building to show what it would have looked like in its prime.";
pub const NEGATIVE_PROMPT: &str = "Do not add any modern elements. in Turkey.";
pub const SIMILARITY_STRENGTH: f64 = 0.7;
pub const IMAGE_SIZE: u16 = 1024;
pub const QUALITY: &str = "standard";
pub const CFG_SCALE: u8 = 10;
pub const MAX_SEED: u8 = 10;

/// Parameters sent with every image variation call. Only the seed varies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub text: String,
    pub negative_text: String,
    pub similarity_strength: f64,
    pub height: u16,
    pub width: u16,
    pub quality: String,
    pub cfg_scale: u8,
    pub seed: u8,
}

impl GenerationRequest {
    pub fn with_seed(seed: u8) -> Self {
        Self {
            text: PROMPT.to_string(),
            negative_text: NEGATIVE_PROMPT.to_string(),
            similarity_strength: SIMILARITY_STRENGTH,
            height: IMAGE_SIZE,
            width: IMAGE_SIZE,
            quality: QUALITY.to_string(),
            cfg_scale: CFG_SCALE,
            seed,
        }
    }

    pub fn with_random_seed() -> Self {
        Self::with_seed(rand::thread_rng().gen_range(0..=MAX_SEED))
    }
}
