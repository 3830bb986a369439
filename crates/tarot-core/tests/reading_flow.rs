use tarot_core::{
    CardCatalog, Deck, FocusArea, Orientation, Reading, SpreadKind, SpreadTemplate, assemble,
};

const RIDER_WAITE: &str = include_str!("../data/rider_waite.jsonl");

/// The Fool, The Magician, The High Priestess, in that order.
fn stub_catalog() -> CardCatalog {
    let stub = RIDER_WAITE.lines().take(3).collect::<Vec<_>>().join("\n");
    CardCatalog::load_sized(&stub, 3).unwrap()
}

fn read(
    catalog: &CardCatalog,
    seed: u64,
    spread: &str,
    focus: FocusArea,
    question: Option<&str>,
) -> Reading {
    let template = SpreadTemplate::from_name(spread).unwrap();
    let mut deck = Deck::new(catalog);
    deck.shuffle(Some(seed));
    let draws = deck.draw(template.card_count()).unwrap();
    assemble(&template, draws, focus, question).unwrap()
}

#[test]
fn seeded_single_card_fixture() {
    let reading = read(&stub_catalog(), 7, "single", FocusArea::General, None);

    assert_eq!(reading.cards.len(), 1);
    let card = &reading.cards[0];
    assert_eq!(card.card.name, "The High Priestess");
    assert_eq!(card.orientation, Orientation::Reversed);
    assert_eq!(card.position, "Present");

    assert_eq!(
        reading.baseline,
        "**Focus**: General\n\
         \n\
         ## Present: The High Priestess (Reversed)\n\
         Passion, moral or physical ardour, conceit, surface knowledge."
    );
}

#[test]
fn seeded_three_card_fixture() {
    let reading = read(
        &stub_catalog(),
        7,
        "three",
        FocusArea::Career,
        Some("Should I take the offer?"),
    );

    let drawn: Vec<_> = reading
        .cards
        .iter()
        .map(|c| (c.position.as_str(), c.card.name.as_str(), c.orientation))
        .collect();
    assert_eq!(
        drawn,
        [
            ("Past", "The High Priestess", Orientation::Reversed),
            ("Present", "The Fool", Orientation::Reversed),
            ("Future", "The Magician", Orientation::Upright),
        ]
    );

    assert_eq!(
        reading.baseline,
        "**Question**: Should I take the offer?\n\
         **Focus**: Career\n\
         \n\
         ## Past: The High Priestess (Reversed)\n\
         Passion, moral or physical ardour, conceit, surface knowledge.\n\
         \n\
         ## Present: The Fool (Reversed)\n\
         Negligence, absence, distribution, carelessness, apathy, nullity, vanity.\n\
         \n\
         ## Future: The Magician (Upright)\n\
         Skill, diplomacy, address, subtlety, the will directed toward a chosen end, self-confidence."
    );
}

#[test]
fn same_seed_same_reading() {
    let catalog = CardCatalog::rider_waite().unwrap();
    let a = read(&catalog, 42, "celtic", FocusArea::Spiritual, None);
    let b = read(&catalog, 42, "celtic", FocusArea::Spiritual, None);
    assert_eq!(a.cards, b.cards);
    assert_eq!(a.baseline, b.baseline);
    assert_eq!(a.spread, SpreadKind::Celtic);
}

#[test]
fn full_deck_celtic_cross_has_ten_distinct_cards() {
    let catalog = CardCatalog::rider_waite().unwrap();
    let reading = read(&catalog, 2024, "celtic_cross", FocusArea::General, None);
    let mut ids: Vec<_> = reading.cards.iter().map(|c| c.card.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 10);
    assert_eq!(reading.cards[9].position, "Outcome");
}

#[test]
fn reading_survives_json_round_trip() {
    let catalog = CardCatalog::rider_waite().unwrap();
    let reading = read(&catalog, 1, "three", FocusArea::Relationships, Some("Us?"));
    let json = serde_json::to_string_pretty(&reading).unwrap();
    let back: Reading = serde_json::from_str(&json).unwrap();
    assert_eq!(back, reading);
}

#[test]
fn stub_deck_cannot_serve_celtic_cross() {
    let catalog = stub_catalog();
    let mut deck = Deck::new(&catalog);
    deck.shuffle(Some(7));
    let err = deck.draw(10).unwrap_err();
    assert_eq!(err.to_string(), "cannot draw 10 cards, only 3 remaining");
    assert_eq!(deck.remaining(), 3);
}
