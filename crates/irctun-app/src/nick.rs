//! Random nickname synthesis.

use crate::{Environment, roster::fold_case};

const WORDS: &[&str] = &[
    "dark", "cyber", "acid", "hex", "null", "void", "byte", "neo", "max", "zed", "fox", "ace",
    "dex", "arc", "zen", "wolf", "lynx", "hawk", "echo", "nova", "ash", "sol", "mint", "jade",
    "ruby", "axel", "rex", "tux", "blaze", "storm", "ghost", "frost", "steel", "chrome", "sigma",
];

const ATTEMPTS: usize = 8;

/// A word from a fixed list followed by a number in `100..=999`.
pub fn random_nick(env: &impl Environment) -> String {
    let r = env.random_u64();
    let word = WORDS[(r % WORDS.len() as u64) as usize];
    let number = (r / WORDS.len() as u64) % 900 + 100;
    format!("{word}{number}")
}

/// A random nickname guaranteed to differ from `current` (case-insensitively).
pub fn fresh_nick(env: &impl Environment, current: &str) -> String {
    let current_key = fold_case(current);
    for _ in 0..ATTEMPTS {
        let candidate = random_nick(env);
        if fold_case(&candidate) != current_key {
            return candidate;
        }
    }
    format!("{current}_")
}
