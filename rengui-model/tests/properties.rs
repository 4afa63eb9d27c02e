use proptest::prelude::*;
use rengui_model::{Card, Choice, Kind, StoryDocument};

#[derive(Debug, Clone)]
struct Fields {
    kind: Kind,
    actor: String,
    text: String,
    video: String,
    background: String,
    condition: String,
    sprites: (String, String, String),
    choices: Vec<(String, String)>,
}

fn arb_kind() -> impl Strategy<Value = Kind> {
    prop_oneof![Just(Kind::Dialogue), Just(Kind::Video), Just(Kind::Branch)]
}

fn arb_fields() -> impl Strategy<Value = Fields> {
    (
        arb_kind(),
        "[A-Za-z ]{0,8}",
        "\\PC{0,16}",
        prop_oneof![Just(String::new()), "[a-z]{1,6}\\.ivf"],
        "[a-z_]{0,6}",
        "[a-z<>= 0-9]{0,10}",
        ("[a-z]{0,4}", "[a-z]{0,4}", "[a-z]{0,4}"),
        prop::collection::vec(("[A-Za-z]{0,6}", "scene_[0-9]{2}"), 0..3),
    )
        .prop_map(|(kind, actor, text, video, background, condition, sprites, choices)| Fields {
            kind,
            actor,
            text,
            video,
            background,
            condition,
            sprites,
            choices,
        })
}

fn build(fields: &[Fields]) -> StoryDocument {
    let mut doc = StoryDocument::new();
    for f in fields {
        let id = doc.add_card(f.kind);
        let card = doc.card_mut(id).unwrap();
        card.actor = f.actor.clone();
        card.text = f.text.clone();
        card.video = f.video.clone();
        card.background = f.background.clone();
        card.condition = f.condition.clone();
        card.char_left = f.sprites.0.clone();
        card.char_center = f.sprites.1.clone();
        card.char_right = f.sprites.2.clone();
        card.choices = f.choices.iter().map(|(t, n)| Choice::new(t.as_str(), n.as_str())).collect();
    }
    doc
}

fn same_cards(a: &[Card], b: &[Card]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_content(y))
}

proptest! {
    #[test]
    fn round_trip_keeps_order_and_fields(fields in prop::collection::vec(arb_fields(), 0..12)) {
        let doc = build(&fields);
        let reloaded = StoryDocument::parse(&doc.save().unwrap()).unwrap();
        prop_assert!(same_cards(doc.cards(), reloaded.cards()));
        prop_assert_eq!(&doc.system, &reloaded.system);
        prop_assert_eq!(&doc.ui, &reloaded.ui);
    }

    #[test]
    fn inference_is_stable_across_cycles(fields in prop::collection::vec(arb_fields(), 1..8), cycles in 1usize..4) {
        let doc = build(&fields);
        let mut current = doc.clone();
        for _ in 0..cycles {
            current = StoryDocument::parse(&current.save().unwrap()).unwrap();
        }
        let kinds: Vec<Kind> = current.cards().iter().map(|c| c.kind).collect();
        let expected: Vec<Kind> = fields.iter().map(|f| f.kind).collect();
        prop_assert_eq!(kinds, expected);
    }
}
