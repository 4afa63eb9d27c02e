use rengui_model::{Choice, Kind, StoryDocument};
use serde_json::{json, Value};

fn saved_value(doc: &StoryDocument) -> Value {
    serde_json::from_str(&doc.save().unwrap()).unwrap()
}

#[test]
fn test_new_project_dialogue_shape() {
    let mut doc = StoryDocument::load("");
    assert_eq!((doc.system.screen_width, doc.system.screen_height), (1280, 720));
    assert_eq!(doc.ui.box_color, "#000000");
    assert_eq!(doc.ui.box_opacity, 0.7);

    let id = doc.add_card(Kind::Dialogue);
    let card = doc.card_mut(id).unwrap();
    card.actor = "Rin".into();
    card.text = "Hello.".into();

    let value = saved_value(&doc);
    assert_eq!(value["version"], 1);
    assert_eq!(value["variables"], json!({}));
    assert_eq!(value["scenes"][0]["id"], "scene_01");
    assert_eq!(
        value["scenes"][0]["dialogues"][0],
        json!({
            "actor": "Rin", "text": "Hello.", "background": "", "bgm": "", "sfx": "",
            "condition": "", "charLeft": "", "charCenter": "", "charRight": ""
        })
    );
    assert_eq!(
        value["ui"],
        json!({ "boxColor": "#000000", "boxOpacity": 0.7, "textColor": "#FFFFFF", "boxHeight": 200, "fontSize": 24 })
    );
}

#[test]
fn test_untagged_legacy_cards_are_classified() {
    let raw = r#"{
        "version": 1,
        "scenes": [ { "id": "scene_01", "dialogues": [
            { "actor": "Rin", "text": "Hi" },
            { "actor": "Video Clip", "text": "op.ivf", "video": "op.ivf" },
            { "text": "Where to?", "video": "op.ivf", "choices": [ { "text": "Left", "nextId": "scene_02" } ] },
            { "type": "video", "actor": "Video Clip", "text": "(No file selected)" }
        ] } ]
    }"#;
    let doc = StoryDocument::parse(raw).unwrap();
    let kinds: Vec<Kind> = doc.cards().iter().map(|c| c.kind).collect();
    assert_eq!(kinds, vec![Kind::Dialogue, Kind::Video, Kind::Branch, Kind::Video]);
    assert_eq!(doc.cards()[2].choices, vec![Choice::new("Left", "scene_02")]);
}

#[test]
fn test_reorder_is_persisted() {
    let mut doc = StoryDocument::new();
    for name in ["a", "b", "c", "d"] {
        let id = doc.add_card(Kind::Dialogue);
        doc.card_mut(id).unwrap().actor = name.into();
    }
    doc.move_card(2, 0).unwrap();

    let value = saved_value(&doc);
    let actors: Vec<&str> = value["scenes"][0]["dialogues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["actor"].as_str().unwrap())
        .collect();
    assert_eq!(actors, vec!["c", "a", "b", "d"]);
}

#[test]
fn test_extra_scenes_and_variables_pass_through() {
    let raw = r#"{
        "version": 1,
        "variables": { "love": 0 },
        "scenes": [
            { "id": "intro", "dialogues": [ { "actor": "A", "text": "1" } ] },
            { "id": "scene_02", "dialogues": [ { "actor": "B", "text": "2" } ] }
        ]
    }"#;
    let mut doc = StoryDocument::parse(raw).unwrap();
    assert_eq!(doc.scene().id, "intro");
    doc.add_card(Kind::Video);

    let value = saved_value(&doc);
    assert_eq!(value["variables"], json!({ "love": 0 }));
    assert_eq!(value["scenes"][0]["dialogues"].as_array().unwrap().len(), 2);
    assert_eq!(value["scenes"][0]["dialogues"][1]["type"], "video");
    assert_eq!(value["scenes"][1]["id"], "scene_02");
    assert_eq!(value["scenes"][1]["dialogues"][0]["actor"], "B");
}

#[test]
fn test_malformed_cards_do_not_empty_the_scene() {
    let raw = r#"{
        "version": 3,
        "scenes": [
            { "id": "scene_01", "dialogues": [
                { "actor": "A", "text": "1" },
                { "actor": "B", "text": "2" },
                null,
                { "text": "Where to?", "choices": [ { "text": "Roof", "nextId": "scene_02" }, { "text": 5 } ] }
            ] },
            7
        ]
    }"#;
    let doc = StoryDocument::parse(raw).unwrap();
    assert_eq!(doc.scenes().len(), 1);
    assert_eq!(doc.version(), 1);

    let actors: Vec<&str> = doc.cards().iter().map(|c| c.actor.as_str()).collect();
    assert_eq!(actors, vec!["A", "B", ""]);
    assert_eq!(doc.cards()[2].kind, Kind::Branch);
    assert_eq!(doc.cards()[2].choices, vec![Choice::new("Roof", "scene_02")]);

    let value = saved_value(&doc);
    assert_eq!(value["version"], 1);
    assert_eq!(value["scenes"][0]["dialogues"].as_array().unwrap().len(), 3);
}
