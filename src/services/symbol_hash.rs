/// Stable 32-bit hash of a ticker symbol.
///
/// Folds the UTF-16 code units of the symbol into a wrapping `i32`
/// accumulator (`acc * 31 + code`) and returns its absolute value. The fold
/// is character-exact: no trimming or case folding, so `"AAPL"` and
/// `"AAPL "` hash differently. The empty string hashes to 0.
pub fn symbol_hash(symbol: &str) -> u32 {
    let acc = symbol.encode_utf16().fold(0i32, |acc, code| {
        acc.wrapping_shl(5)
            .wrapping_sub(acc)
            .wrapping_add(i32::from(code))
    });
    acc.unsigned_abs()
}
