/// Cipher glyphs used by the fast hover scrambles: terse punctuation with a
/// heavy underscore tail so mid-scramble text reads like redacted machine
/// noise.
pub(crate) const CIPHER_CHARS: &str = r"!<>-_\/[]{}—=+*^?#________";

/// Full decrypt pool: letters plus symbols, used by the slower reveal
/// effects.
pub(crate) const DECRYPT_CHARS: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+{}:<>?|[];',./";

/// Build a sampling pool from a glyph string. Repeated characters are kept:
/// repetition is how a pool weights itself.
pub(crate) fn pool_from(glyphs: &str) -> Vec<char> {
    glyphs.chars().collect()
}
