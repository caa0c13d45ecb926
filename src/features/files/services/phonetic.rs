//! "Sounds like" matching for the file search.
//!
//! Uses American Soundex: the first letter is kept, the remaining consonants
//! are mapped to digit classes, adjacent duplicates collapse (also across
//! `H`/`W`), vowels separate duplicates, and the code is padded or cut to
//! four characters. Non-ASCII letters and non-letters are ignored.

/// Soundex code of `input`, or `None` if it contains no ASCII letter
pub fn soundex(input: &str) -> Option<String> {
    let mut letters = input
        .chars()
        .filter(char::is_ascii_alphabetic)
        .map(|c| c.to_ascii_uppercase());

    let first = letters.next()?;
    let mut code = String::with_capacity(4);
    code.push(first);

    let mut last = digit(first);
    for letter in letters {
        match digit(letter) {
            Some(d) => {
                if last != Some(d) {
                    code.push(d);
                    if code.len() == 4 {
                        break;
                    }
                }
                last = Some(d);
            }
            None if letter == 'H' || letter == 'W' => {}
            None => last = None,
        }
    }

    while code.len() < 4 {
        code.push('0');
    }
    Some(code)
}

/// Whether `text` sounds like the word whose code is `term_code`.
///
/// Compares against the whole text and against each word in it, so
/// "logo" matches "Logo.png" and "company logo".
pub fn sounds_like(text: &str, term_code: &str) -> bool {
    if soundex(text).as_deref() == Some(term_code) {
        return true;
    }
    text.split(|c: char| !c.is_ascii_alphabetic())
        .filter(|word| !word.is_empty())
        .any(|word| soundex(word).as_deref() == Some(term_code))
}

fn digit(letter: char) -> Option<char> {
    match letter {
        'B' | 'F' | 'P' | 'V' => Some('1'),
        'C' | 'G' | 'J' | 'K' | 'Q' | 'S' | 'X' | 'Z' => Some('2'),
        'D' | 'T' => Some('3'),
        'L' => Some('4'),
        'M' | 'N' => Some('5'),
        'R' => Some('6'),
        _ => None,
    }
}
