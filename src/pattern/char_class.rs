//! Predefined byte classes, selected by a single letter in pattern source.

use phf::{Map, phf_map};

/// Class letter to member bytes.
const CLASSES: Map<char, &'static str> = phf_map! {
    '_' => " \t\n\r\x0b\x0c",
    'a' => "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz",
    'o' => "!#$%&()*+,-./:;<=>?@[\\]^`{|}~",
    'n' => "0123456789",
    'Q' => "\"",
    'q' => "'",
};

/// Member bytes of the class named by `letter`, if it names one.
pub fn class_members(letter: u8) -> Option<&'static [u8]> {
    CLASSES.get(&char::from(letter)).map(|members| members.as_bytes())
}
