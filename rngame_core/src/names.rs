use rand::Rng;

pub const CONSONANTS: [char; 20] = [
    'b', 'c', 'd', 'f', 'g', 'h', 'j', 'k', 'l', 'm', 'n', 'p', 'q', 'r', 's', 't', 'v', 'w', 'x',
    'z',
];
pub const VOWELS: [char; 6] = ['a', 'e', 'i', 'o', 'u', 'y'];

/// Generates a pronounceable name of exactly `length` letters.
///
/// Even positions draw a consonant, odd positions a vowel. The first letter is uppercase.
/// Names are not guaranteed to be unique.
pub fn random_name<R: Rng>(rng: &mut R, length: usize) -> String {
    let mut name = String::with_capacity(length);
    for i in 0..length {
        let letter = if i % 2 == 0 {
            CONSONANTS[rng.random_range(0..CONSONANTS.len())]
        } else {
            VOWELS[rng.random_range(0..VOWELS.len())]
        };
        if i == 0 {
            name.push(letter.to_ascii_uppercase());
        } else {
            name.push(letter);
        }
    }
    name
}
