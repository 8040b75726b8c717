use rand::RngExt;

use crate::domain::repository::CodeGenerator;

/// Uniformly random 6-digit codes in 100000..=999999.
#[derive(Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn next_code(&self) -> String {
        let code: u32 = rand::rng().random_range(100_000..1_000_000);
        code.to_string()
    }
}
