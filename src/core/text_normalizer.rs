//! Text Normalization
//!
//! Utterance cleanup before parsing, and product-name canonicalization
//! after it.

use lazy_static::lazy_static;
use std::collections::HashMap;

lazy_static! {
    /// Colloquial product names mapped to the names shown on the cart
    static ref PRODUCT_ALIASES: HashMap<&'static str, &'static str> = HashMap::from([
        ("coke", "Coca Cola"),
        ("coca cola", "Coca Cola"),
        ("cocacola", "Coca Cola"),
        ("coke zero", "Coke Zero"),
        ("sprite", "Sprite"),
        ("royal", "Royal Tru-Orange"),
        ("mountain dew", "Mountain Dew"),
        ("mtn dew", "Mountain Dew"),
        ("softdrink", "Soft Drink"),
        ("softdrinks", "Soft Drink"),
        ("soft drinks", "Soft Drink"),
        ("bottle water", "Bottled Water"),
        ("bottled water", "Bottled Water"),
        ("mineral water", "Bottled Water"),
        ("biscuits", "Biscuit"),
        ("biscuit", "Biscuit"),
        ("skyflakes", "SkyFlakes"),
        ("sky flakes", "SkyFlakes"),
        ("chips", "Chips"),
        ("chip", "Chips"),
        ("canton", "Pancit Canton"),
        ("pancit canton", "Pancit Canton"),
        ("noodles", "Instant Noodles"),
        ("instant noodles", "Instant Noodles"),
        ("cup noodles", "Cup Noodles"),
        ("eggs", "Egg"),
        ("sardines", "Sardines"),
        ("sardine", "Sardines"),
        ("corned beef", "Corned Beef"),
        ("3 in 1", "3-in-1 Coffee"),
        ("three in one", "3-in-1 Coffee"),
        ("coffee", "Coffee"),
        ("candies", "Candy"),
        ("candy", "Candy"),
        ("cigarettes", "Cigarette"),
        ("cigarette", "Cigarette"),
        ("yosi", "Cigarette"),
        ("breads", "Bread"),
        ("pandesal", "Pandesal"),
    ]);

    static ref NUMBER_WORDS: HashMap<&'static str, u64> = HashMap::from([
        ("one", 1),
        ("two", 2),
        ("three", 3),
        ("four", 4),
        ("five", 5),
        ("six", 6),
        ("seven", 7),
        ("eight", 8),
        ("nine", 9),
        ("ten", 10),
        ("eleven", 11),
        ("twelve", 12),
        ("thirteen", 13),
        ("fourteen", 14),
        ("fifteen", 15),
        ("sixteen", 16),
        ("seventeen", 17),
        ("eighteen", 18),
        ("nineteen", 19),
        ("twenty", 20),
        ("thirty", 30),
        ("forty", 40),
        ("fifty", 50),
        ("sixty", 60),
        ("seventy", 70),
        ("eighty", 80),
        ("ninety", 90),
    ]);
}

/// Lower-case and trim raw transcribed text
pub fn normalize_utterance(text: &str) -> String {
    text.trim().to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum NumberWord {
    Value(u64),
    Hundred,
    Thousand,
}

fn number_word(word: &str) -> Option<NumberWord> {
    match word {
        "hundred" => Some(NumberWord::Hundred),
        "thousand" => Some(NumberWord::Thousand),
        _ => NUMBER_WORDS.get(word).map(|&v| NumberWord::Value(v)),
    }
}

/// Split a token into (leading punctuation, word, trailing punctuation)
fn split_token(token: &str) -> (&str, &str, &str) {
    let start = token
        .find(|c: char| c.is_alphanumeric())
        .unwrap_or(token.len());
    let end = token
        .rfind(|c: char| c.is_alphanumeric())
        .map(|i| i + token[i..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(start);
    (&token[..start], &token[start..end], &token[end..])
}

/// Items are separated by "and", commas and "+"
fn ends_segment((prefix, word, suffix): (&str, &str, &str)) -> bool {
    word == "and" || [prefix, suffix].iter().any(|p| p.contains([',', '+']))
}

fn is_currency_marker((prefix, word, _): (&str, &str, &str)) -> bool {
    prefix.starts_with('₱') || matches!(word, "pesos" | "peso" | "php" | "p")
}

/// Rewrite spoken quantities and amounts as digits:
/// "two coke, fifty pesos" -> "2 coke, 50 pesos".
///
/// Only a number opening an item phrase or directly before a currency
/// marker is rewritten, so "2 seven up" keeps its product name.
/// "and" is never absorbed into a number since it also separates items.
/// Whitespace is collapsed to single spaces.
pub fn rewrite_number_words(text: &str) -> String {
    let tokens: Vec<(&str, &str, &str)> = text.split_whitespace().map(split_token).collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut segment_start = true;
    let mut i = 0;

    while i < tokens.len() {
        let (prefix, word, _) = tokens[i];

        // "a hundred" / "a thousand"
        let leading_article = word == "a"
            && matches!(
                tokens.get(i + 1).and_then(|t| number_word(t.1)),
                Some(NumberWord::Hundred | NumberWord::Thousand)
            )
            && tokens[i].2.is_empty();

        let starts_number =
            leading_article || matches!(number_word(word), Some(NumberWord::Value(_)));

        if !prefix.is_empty() || !starts_number {
            segment_start = ends_segment(tokens[i]);
            out.push(text_token(tokens[i]));
            i += 1;
            continue;
        }

        let mut total = 0u64;
        let mut current = if leading_article { 1 } else { 0 };
        let mut last: Option<NumberWord> = if leading_article {
            Some(NumberWord::Value(1))
        } else {
            None
        };
        let mut j = if leading_article { i + 1 } else { i };
        let mut suffix = "";

        while j < tokens.len() {
            let (p, w, s) = tokens[j];
            if !p.is_empty() {
                break;
            }
            let Some(next) = number_word(w) else {
                break;
            };

            let accepted = match (last, next) {
                (None, NumberWord::Value(_)) => true,
                (Some(NumberWord::Value(prev)), NumberWord::Value(v)) => {
                    prev >= 20 && prev % 10 == 0 && v < 10
                }
                (Some(NumberWord::Value(_)), NumberWord::Hundred) => current > 0 && current < 10,
                (Some(NumberWord::Value(_)), NumberWord::Thousand) => {
                    current > 0 && current < 1000
                }
                (Some(NumberWord::Hundred), NumberWord::Value(_)) => true,
                (Some(NumberWord::Hundred), NumberWord::Thousand) => true,
                (Some(NumberWord::Thousand), NumberWord::Value(_)) => true,
                _ => false,
            };
            if !accepted {
                break;
            }

            match next {
                NumberWord::Value(v) => current += v,
                NumberWord::Hundred => current *= 100,
                NumberWord::Thousand => {
                    total += current * 1000;
                    current = 0;
                }
            }
            last = Some(next);
            j += 1;

            // Punctuation closes the number
            if !s.is_empty() {
                suffix = s;
                break;
            }
        }

        let before_currency =
            suffix.is_empty() && tokens.get(j).is_some_and(|&t| is_currency_marker(t));

        if j == i || (leading_article && j == i + 1) || !(segment_start || before_currency) {
            segment_start = ends_segment(tokens[i]);
            out.push(text_token(tokens[i]));
            i += 1;
            continue;
        }

        out.push(format!("{}{}", total + current, suffix));
        segment_start = suffix.contains([',', '+']);
        i = j;
    }

    out.join(" ")
}

fn text_token((prefix, word, suffix): (&str, &str, &str)) -> String {
    format!("{}{}{}", prefix, word, suffix)
}

/// Capitalize the first letter of every whitespace-delimited word
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Maps spoken product names to canonical display names
#[derive(Debug, Clone)]
pub struct NameNormalizer {
    /// Lower-cased alias -> canonical name
    aliases: HashMap<String, String>,
}

impl Default for NameNormalizer {
    fn default() -> Self {
        Self::new(HashMap::new())
    }
}

impl NameNormalizer {
    /// Build from the built-in table plus extra aliases (extras win)
    pub fn new(extra_aliases: HashMap<String, String>) -> Self {
        let mut aliases: HashMap<String, String> = PRODUCT_ALIASES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        for (from, to) in extra_aliases {
            let key = from.trim().to_lowercase();
            if key.is_empty() || to.trim().is_empty() {
                continue;
            }
            aliases.insert(key, to.trim().to_string());
        }

        Self { aliases }
    }

    /// Canonical name for a spoken product name
    pub fn normalize(&self, raw: &str) -> String {
        let key = raw.trim().to_lowercase();
        if let Some(canonical) = self.aliases.get(&key) {
            return canonical.clone();
        }

        let titled = title_case(raw);
        if titled.is_empty() {
            raw.to_string()
        } else {
            titled
        }
    }

    /// Alias table sorted by alias
    pub fn aliases(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<(&str, &str)> = self
            .aliases
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort();
        entries
    }
}

/// Canonical name using only the built-in alias table
pub fn normalize_product_name(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    match PRODUCT_ALIASES.get(key.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => {
            let titled = title_case(raw);
            if titled.is_empty() {
                raw.to_string()
            } else {
                titled
            }
        }
    }
}
