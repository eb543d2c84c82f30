//! ARPAbet to IPA symbol mapping for CMU-style pronouncing dictionaries.
//!
//! Stress digits (0, 1, 2) are read to pick the reduced vowel for `AH0` and
//! `ER0` and otherwise dropped; no stress marks are emitted.

/// Split a trailing stress digit off an ARPAbet phone.
fn split_stress(phone: &str) -> (&str, Option<u8>) {
    match phone.as_bytes().last() {
        Some(digit @ b'0'..=b'2') => (&phone[..phone.len() - 1], Some(digit - b'0')),
        _ => (phone, None),
    }
}

/// IPA for a single ARPAbet phone, e.g. `"AH0"` or `"SH"`.
///
/// Matching is case-insensitive. Returns `None` for unknown symbols.
pub fn arpabet_to_ipa(phone: &str) -> Option<&'static str> {
    let (base, stress) = split_stress(phone);
    let upper = base.to_ascii_uppercase();

    let ipa = match upper.as_str() {
        // Vowels
        "AA" => "ɑ",
        "AE" => "æ",
        "AH" if stress == Some(0) => "ə",
        "AH" => "ʌ",
        "AO" => "ɔ",
        "AW" => "aʊ",
        "AX" => "ə",
        "AXR" => "ɚ",
        "AY" => "aɪ",
        "EH" => "ɛ",
        "ER" if stress == Some(0) => "ɚ",
        "ER" => "ɝ",
        "EY" => "eɪ",
        "IH" => "ɪ",
        "IX" => "ɨ",
        "IY" => "i",
        "OW" => "oʊ",
        "OY" => "ɔɪ",
        "UH" => "ʊ",
        "UW" => "u",
        "UX" => "ʉ",
        // Consonants
        "B" => "b",
        "CH" => "tʃ",
        "D" => "d",
        "DH" => "ð",
        "DX" => "ɾ",
        "F" => "f",
        "G" => "ɡ",
        "HH" => "h",
        "JH" => "dʒ",
        "K" => "k",
        "L" => "l",
        "M" => "m",
        "N" => "n",
        "NG" => "ŋ",
        "P" => "p",
        "Q" => "ʔ",
        "R" => "ɹ",
        "S" => "s",
        "SH" => "ʃ",
        "T" => "t",
        "TH" => "θ",
        "V" => "v",
        "W" => "w",
        "WH" => "ʍ",
        "Y" => "j",
        "Z" => "z",
        "ZH" => "ʒ",
        _ => return None,
    };
    Some(ipa)
}
