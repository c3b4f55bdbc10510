/// The fixed three-row qwerty layout shown under the sentence. Letters only;
/// the space bar is rendered separately by the UI.
pub const KEY_ROWS: [&[char]; 3] = [
    &['q', 'w', 'e', 'r', 't', 'y', 'u', 'i', 'o', 'p'],
    &['a', 's', 'd', 'f', 'g', 'h', 'j', 'k', 'l'],
    &['z', 'x', 'c', 'v', 'b', 'n', 'm'],
];

/// Map a target character to the key cap that should light up.
/// Uppercase letters fold to their lowercase cap; characters without a cap
/// (punctuation, digits) highlight nothing.
pub fn key_for_char(c: char) -> Option<char> {
    if c == ' ' {
        return Some(' ');
    }
    let folded = c.to_ascii_lowercase();
    KEY_ROWS
        .iter()
        .any(|row| row.contains(&folded))
        .then_some(folded)
}
