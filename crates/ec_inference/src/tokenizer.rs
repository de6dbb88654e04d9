use ec_core::Result;
use std::fmt;
use tiktoken_rs::CoreBPE;

/// Counts model tokens. Used for budget checks only, never to cut text.
pub trait TokenCounter: Send + Sync {
    fn count_tokens(&self, text: &str) -> usize;
}

/// GPT-2 byte-pair encoding (`r50k_base`).
pub struct Gpt2Tokenizer {
    bpe: CoreBPE,
}

impl fmt::Debug for Gpt2Tokenizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gpt2Tokenizer")
            .field("bpe", &"r50k_base")
            .finish()
    }
}

impl Gpt2Tokenizer {
    pub fn new() -> Result<Self> {
        let bpe = tiktoken_rs::r50k_base()?;
        Ok(Self { bpe })
    }
}

impl TokenCounter for Gpt2Tokenizer {
    fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_gpt2_tokens() {
        let tokenizer = Gpt2Tokenizer::new().unwrap();
        assert_eq!(tokenizer.count_tokens(""), 0);
        assert_eq!(tokenizer.count_tokens("hello world"), 2);
        assert!(tokenizer.count_tokens("The economy of Germany contracted slightly.") > 5);
    }
}
