use bigdecimal::BigDecimal;
use std::time::Instant;
use voicecart::core::{ParserOptions, VoiceParser};
use voicecart::core::text_normalizer::NameNormalizer;
use voicecart::{match_products_with_database, parse_voice_input};

mod common;
use common::store_catalog;

#[test]
fn test_transcript_flood_fuzz() {
    // Simulate a flood of garbage transcripts
    let garbage = [
        "asdfghjkl",
        "!!! @@@ ###",
        "1234567890",
        "extremely long string that doesn't mean anything to the cashier at all but might cause trouble if we were careless with slicing",
        "",
        " ",
        "and and and , , + +",
        "0 coke, 0 pesos",
        "p p p php pesos ₱",
        "99999999999999999999 coke",
        "1.5 coke",
        "ñ 2 ñandú, 3 ☕",
    ];

    let catalog = store_catalog();
    for text in garbage {
        let data = parse_voice_input(text);
        assert_eq!(data.raw_text, text);
        assert!(data.amount_paid >= BigDecimal::from(0));
        assert!(data.products.iter().all(|p| p.quantity > 0 && !p.name.is_empty()));

        for item in match_products_with_database(&data.products, &catalog) {
            if !item.matched {
                assert!(item.id.is_empty());
                assert_eq!(item.total, BigDecimal::from(0));
            }
        }
    }
}

#[test]
fn test_spoken_number_flood() {
    let parser = VoiceParser::new(
        ParserOptions {
            spoken_numbers: true,
        },
        NameNormalizer::default(),
    );

    let phrases = [
        "a a a a",
        "hundred thousand hundred",
        "ninety ninety ninety",
        "one, two, three",
        "a hundred",
        "twenty-one coke",
        "thousand pesos",
    ];

    for text in phrases {
        let data = parser.parse(text);
        assert_eq!(data.raw_text, text);
    }

    // Stability under repetition
    let start = Instant::now();
    for i in 0..1000 {
        let text = format!("{} coke and {} piattos, {} pesos", i % 7 + 1, i % 3 + 1, i);
        let data = parser.parse(&text);
        assert_eq!(data.products.len(), 2);
        assert_eq!(data.amount_paid, BigDecimal::from(i));
    }
    println!("Parsed 1000 utterances in {:?}", start.elapsed());
}
