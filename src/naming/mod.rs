//! Identifier lexing and the deterministic present-tense check.
//!
//! Both present-tense classifiers tokenize through [`words`] so that they
//! agree on what a "word" is.

/// Split an identifier into lowercase words.
///
/// Word boundaries are a lowercase-to-uppercase transition, an underscore or
/// any other non-alphanumeric character. Digits stay attached to the word
/// they follow. An uppercase run followed by a lowercase letter starts a new
/// word at its last letter, so `parseXMLFile` yields `parse`, `xml`, `file`.
#[must_use]
pub fn words(identifier: &str) -> Vec<String> {
    let chars: Vec<char> = identifier.chars().collect();
    let mut result = Vec::new();
    let mut current = String::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            flush(&mut current, &mut result);
            continue;
        }
        if ch.is_uppercase() && !current.is_empty() {
            let prev = chars[idx - 1];
            let next_is_lower = chars.get(idx + 1).is_some_and(|c| c.is_lowercase());
            if !prev.is_uppercase() || next_is_lower {
                flush(&mut current, &mut result);
            }
        }
        current.extend(ch.to_lowercase());
    }
    flush(&mut current, &mut result);
    result
}

fn flush(current: &mut String, out: &mut Vec<String>) {
    if !current.is_empty() {
        out.push(std::mem::take(current));
    }
}

/// Deterministic third-person-singular check over the raw identifier.
///
/// The character right before the first uppercase character has to be `s`;
/// without an uppercase character the last character has to be `s`. Digits
/// are transparent: they never count as uppercase and are skipped when
/// looking for the preceding character, so `removes1` and `removes1Item`
/// pass while `Does1` fails.
#[must_use]
pub fn is_present_tense(name: &str) -> bool {
    let mut prev = None;
    for ch in name.chars() {
        if ch.is_uppercase() {
            return prev == Some('s');
        }
        if !ch.is_numeric() {
            prev = Some(ch);
        }
    }
    prev == Some('s')
}

/// Whether the identifier is lower camelCase built from at least two words.
///
/// Only ASCII letters and digits are allowed, the identifier starts with a
/// lowercase letter, and no lexed word may contain a digit.
#[must_use]
pub fn is_camel_case(name: &str) -> bool {
    let starts_lower = name.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    let only_alnum = name.chars().all(|c| c.is_ascii_alphanumeric());
    let lexed = words(name);
    starts_lower
        && only_alnum
        && lexed.len() >= 2
        && lexed
            .iter()
            .all(|word| word.chars().all(char::is_alphabetic))
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
